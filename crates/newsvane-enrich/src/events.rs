//! Best-effort fan-out of analysis events to live subscribers.
//!
//! A process-wide broadcast channel owned by the server's lifecycle and
//! injected into both the pipeline (publisher) and each stream connection
//! (subscriber). No buffering beyond the channel's ring, no persistence,
//! no backpressure: a subscriber registered after a publish misses the
//! event, and a publish with no subscribers is a no-op.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

/// Payload of an `ANALYSIS_CREATED` event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCreatedPayload {
    pub article_id: i64,
    pub analysis_id: i64,
    pub sentiment: f64,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

/// An event published by the enrichment pipeline.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    AnalysisCreated(AnalysisCreatedPayload),
}

impl IngestEvent {
    /// Wire-level event name, used as the SSE event type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            IngestEvent::AnalysisCreated(_) => "ANALYSIS_CREATED",
        }
    }

    /// Serialize the event payload (not the envelope) to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        match self {
            IngestEvent::AnalysisCreated(payload) => serde_json::to_string(payload),
        }
    }
}

/// Cloneable handle to the process-wide event channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<IngestEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver an event to all currently-registered subscribers.
    ///
    /// Best-effort: when nobody is subscribed the event is dropped
    /// silently, matching the contract that events are not persisted.
    pub fn publish(&self, event: IngestEvent) {
        let _ = self.tx.send(event);
    }

    /// Register a new subscriber. The handle unsubscribes on drop.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IngestEvent> {
        self.tx.subscribe()
    }

    /// Number of currently-registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> IngestEvent {
        IngestEvent::AnalysisCreated(AnalysisCreatedPayload {
            article_id: 1,
            analysis_id: 2,
            sentiment: 0.75,
            title: "Climate policy gains momentum".to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap(),
        })
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(event());

        let received = rx.recv().await.unwrap();
        let IngestEvent::AnalysisCreated(payload) = received;
        assert_eq!(payload.article_id, 1);
        assert_eq!(payload.analysis_id, 2);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(event());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        bus.publish(event());

        let mut rx = bus.subscribe();
        bus.publish(event());

        // Only the event published after subscription is delivered.
        assert!(rx.recv().await.is_ok());
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let json = event().payload_json().unwrap();
        assert!(json.contains("\"articleId\":1"));
        assert!(json.contains("\"analysisId\":2"));
        assert!(json.contains("\"publishedAt\""));
        assert_eq!(event().name(), "ANALYSIS_CREATED");
    }
}
