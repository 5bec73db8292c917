//! Lighting service — use-cases for driving the light registry.
//!
//! The service owns the registry outright. Every mutating call reads "now"
//! from the [`Clock`], applies the change, publishes the resulting events and
//! hands them back to the caller for rendering.

use std::time::{Duration, Instant};

use roomlight_domain::error::LightingError;
use roomlight_domain::event::Event;
use roomlight_domain::registry::{LightRegistry, RoomStatus};
use roomlight_domain::room::RoomName;
use roomlight_domain::time::remaining;

use crate::ports::{Clock, EventPublisher};

/// Application service wrapping a [`LightRegistry`].
pub struct LightingService<C, P> {
    registry: LightRegistry,
    clock: C,
    publisher: P,
}

impl<C: Clock, P: EventPublisher> LightingService<C, P> {
    /// Create a new service around an existing registry.
    pub fn new(registry: LightRegistry, clock: C, publisher: P) -> Self {
        Self {
            registry,
            clock,
            publisher,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    /// Register a new room.
    ///
    /// # Errors
    ///
    /// Returns [`LightingError::RoomAlreadyExists`] for a duplicate name.
    pub async fn add_room(&mut self, room: RoomName) -> Result<Event, LightingError> {
        let result = self.registry.add_room(room);
        self.settle(result).await
    }

    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] for an unknown room.
    pub async fn turn_on(&mut self, room: &str) -> Result<Event, LightingError> {
        let result = self.registry.turn_on(room);
        self.settle(result).await
    }

    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] for an unknown room.
    pub async fn turn_off(&mut self, room: &str) -> Result<Event, LightingError> {
        let result = self.registry.turn_off(room);
        self.settle(result).await
    }

    /// Turn a room on with an auto-off timer of `duration` from now.
    ///
    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] for an unknown room, or
    /// [`LightingError::Validation`] when the deadline overflows.
    pub async fn set_timer(
        &mut self,
        room: &str,
        duration: Duration,
    ) -> Result<Event, LightingError> {
        let now = self.clock.now();
        let result = self.registry.set_timer(room, now, duration);
        self.settle(result).await
    }

    /// Run one poll cycle, switching off every light whose timer is due.
    pub async fn poll(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let expired = self.registry.poll(now);
        for event in &expired {
            tracing::info!(room = ?event.room, "timer expired");
        }
        self.publish_all(&expired).await;
        expired
    }

    /// Force every light on and disarm all timers.
    pub async fn emergency_override(&mut self) -> Vec<Event> {
        let events = self.registry.emergency_override();
        tracing::warn!(rooms = self.registry.len(), "emergency override activated");
        self.publish_all(&events).await;
        events
    }

    /// Status of every room, sorted by room name.
    #[must_use]
    pub fn status_snapshot(&self) -> Vec<RoomStatus> {
        self.registry.status_snapshot()
    }

    /// Time left on a snapshot row's timer, measured against the clock.
    pub fn remaining(&self, status: &RoomStatus) -> Option<Duration> {
        let now = self.clock.now();
        status.deadline.map(|deadline| remaining(deadline, now))
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.registry.next_deadline()
    }

    async fn settle(
        &self,
        result: Result<Event, LightingError>,
    ) -> Result<Event, LightingError> {
        match &result {
            Ok(event) => {
                tracing::debug!(event = %event.event_type, room = ?event.room, "applied");
                self.publish_all(std::slice::from_ref(event)).await;
            }
            Err(err) => tracing::debug!(error = %err, "rejected"),
        }
        result
    }

    async fn publish_all(&self, events: &[Event]) {
        for event in events {
            if let Err(err) = self.publisher.publish(event.clone()).await {
                tracing::warn!(error = %err, event = %event.event_type, "failed to publish event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomlight_domain::event::EventType;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use crate::ports::event_bus::PublishError;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingPublisher {
        fn types(&self) -> Vec<EventType> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|event| event.event_type)
                .collect()
        }
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), PublishError>> + Send {
            self.events.lock().unwrap().push(event);
            async { Ok(()) }
        }
    }

    struct ClosedPublisher;

    impl EventPublisher for ClosedPublisher {
        fn publish(&self, _event: Event) -> impl Future<Output = Result<(), PublishError>> + Send {
            async { Err(PublishError) }
        }
    }

    type TestService = LightingService<Arc<ManualClock>, Arc<RecordingPublisher>>;

    fn make_service() -> (TestService, Arc<ManualClock>, Arc<RecordingPublisher>) {
        let clock = ManualClock::new();
        let publisher = Arc::new(RecordingPublisher::default());
        let svc = LightingService::new(LightRegistry::new(), clock.clone(), publisher.clone());
        (svc, clock, publisher)
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name).unwrap()
    }

    #[tokio::test]
    async fn should_add_room_and_publish_event() {
        let (mut svc, _, publisher) = make_service();

        let event = svc.add_room(room("Kitchen")).await.unwrap();

        assert_eq!(event.event_type, EventType::RoomAdded);
        assert!(svc.registry().contains("Kitchen"));
        assert_eq!(publisher.types(), [EventType::RoomAdded]);
    }

    #[tokio::test]
    async fn should_not_publish_when_room_already_exists() {
        let (mut svc, _, publisher) = make_service();
        svc.add_room(room("Kitchen")).await.unwrap();

        let result = svc.add_room(room("Kitchen")).await;

        assert!(matches!(
            result,
            Err(LightingError::RoomAlreadyExists { .. })
        ));
        assert_eq!(publisher.types(), [EventType::RoomAdded]);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_room() {
        let (mut svc, _, publisher) = make_service();

        assert!(matches!(
            svc.turn_on("Attic").await,
            Err(LightingError::RoomNotFound { .. })
        ));
        assert!(matches!(
            svc.turn_off("Attic").await,
            Err(LightingError::RoomNotFound { .. })
        ));
        assert!(matches!(
            svc.set_timer("Attic", Duration::from_secs(1)).await,
            Err(LightingError::RoomNotFound { .. })
        ));
        assert!(publisher.types().is_empty());
    }

    #[tokio::test]
    async fn should_turn_light_on_and_off() {
        let (mut svc, _, publisher) = make_service();
        svc.add_room(room("Kitchen")).await.unwrap();

        svc.turn_on("Kitchen").await.unwrap();
        assert_eq!(svc.registry().status("Kitchen"), Ok(true));

        svc.turn_off("Kitchen").await.unwrap();
        assert_eq!(svc.registry().status("Kitchen"), Ok(false));

        assert_eq!(
            publisher.types(),
            [
                EventType::RoomAdded,
                EventType::LightTurnedOn,
                EventType::LightTurnedOff
            ]
        );
    }

    #[tokio::test]
    async fn should_expire_timer_using_injected_clock() {
        let (mut svc, clock, publisher) = make_service();
        svc.add_room(room("Kitchen")).await.unwrap();
        svc.set_timer("Kitchen", Duration::from_secs(5)).await.unwrap();

        clock.advance(Duration::from_secs(4));
        assert!(svc.poll().await.is_empty());
        assert_eq!(svc.registry().status("Kitchen"), Ok(true));

        clock.advance(Duration::from_secs(1));
        let expired = svc.poll().await;
        assert_eq!(expired.len(), 1);
        assert_eq!(svc.registry().status("Kitchen"), Ok(false));

        clock.advance(Duration::from_secs(1));
        assert!(svc.poll().await.is_empty());

        assert_eq!(
            publisher.types(),
            [
                EventType::RoomAdded,
                EventType::TimerArmed,
                EventType::TimerExpired
            ]
        );
    }

    #[tokio::test]
    async fn should_report_remaining_time_in_snapshot() {
        let (mut svc, clock, _) = make_service();
        svc.add_room(room("Kitchen")).await.unwrap();
        svc.add_room(room("Hall")).await.unwrap();
        svc.set_timer("Kitchen", Duration::from_secs(10)).await.unwrap();
        clock.advance(Duration::from_secs(3));

        let snapshot = svc.status_snapshot();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(svc.remaining(&snapshot[0]), None);
        assert_eq!(svc.remaining(&snapshot[1]), Some(Duration::from_secs(7)));
        assert_eq!(svc.next_deadline(), snapshot[1].deadline);
    }

    #[tokio::test]
    async fn should_publish_every_emergency_event() {
        let (mut svc, _, publisher) = make_service();
        svc.add_room(room("Kitchen")).await.unwrap();
        svc.add_room(room("Hall")).await.unwrap();
        svc.set_timer("Hall", Duration::from_secs(5)).await.unwrap();

        let events = svc.emergency_override().await;

        assert_eq!(events.len(), 3);
        assert!(svc.status_snapshot().iter().all(|s| s.is_on && s.deadline.is_none()));
        assert_eq!(
            &publisher.types()[3..],
            [
                EventType::EmergencyActivated,
                EventType::LightTurnedOn,
                EventType::LightTurnedOn
            ]
        );
    }

    #[tokio::test]
    async fn should_succeed_when_publisher_fails() {
        let mut svc = LightingService::new(LightRegistry::new(), ManualClock::new(), ClosedPublisher);

        svc.add_room(room("Kitchen")).await.unwrap();
        let event = svc.turn_on("Kitchen").await.unwrap();

        assert_eq!(event.event_type, EventType::LightTurnedOn);
        assert_eq!(svc.registry().status("Kitchen"), Ok(true));
    }
}
