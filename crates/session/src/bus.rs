//! In-process session event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Renderers subscribe to [`SessionEvent`]s instead of polling the session.

use serde::Serialize;
use tokio::sync::broadcast;
use wayfarer_core::filter::FilterOutcome;
use wayfarer_core::itinerary::{Itinerary, ItineraryError};
use wayfarer_core::selection::SelectionChange;
use wayfarer_core::types::DestinationId;

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// Something the renderer should redraw.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A filter pass finished.
    ResultsUpdated { outcome: FilterOutcome },

    /// A destination was toggled in or out of the selection.
    SelectionChanged {
        destination_id: DestinationId,
        change: SelectionChange,
        selected: Vec<DestinationId>,
    },

    ItineraryGenerated { itinerary: Itinerary },

    /// Plan validation failed; `message` is the visitor-facing text.
    ItineraryRejected {
        error: ItineraryError,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// SessionBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus; every subscriber sees every event.
///
/// ```rust
/// use wayfarer_session::bus::{SessionBus, SessionEvent};
/// use wayfarer_core::filter::FilterOutcome;
///
/// let bus = SessionBus::default();
/// let mut rx = bus.subscribe();
/// bus.publish(SessionEvent::ResultsUpdated { outcome: FilterOutcome::default() });
/// assert!(rx.try_recv().is_ok());
/// ```
pub struct SessionBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers observe `RecvError::Lagged` once the buffer overflows.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
