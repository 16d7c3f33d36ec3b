//! Activity events.
//!
//! Builders report what they did through an `EventSink` handed to them by
//! the caller. There is no process-wide log.
//!
//! | Sink | Behaviour |
//! |------|-----------|
//! | `NoopSink` | drops everything (default) |
//! | `MemorySink` | keeps timestamped entries for inspection |
//! | `TracingSink` | forwards to `tracing` at INFO |

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::model::{InterestId, UserId};

/// Something a builder did to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum NetworkEvent {
    /// An interest of a newly inserted user was looked up.
    InterestRecorded { user: UserId, interest: InterestId },
    /// Edge for a declared relation; `shared` interests annotated.
    DirectRelationship { from: UserId, to: UserId, shared: usize },
    /// Edge created in indirect-expansion mode.
    IndirectRelationship { from: UserId, to: UserId, shared: usize },
    /// `user` entered the graph as a neighbour of `by`.
    UserIncluded { by: UserId, user: UserId },
    /// `user` went from `Included` to `Added`.
    UserPromoted { user: UserId },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: NetworkEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: NetworkEvent) {}
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub event: NetworkEvent,
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn events(&self) -> Vec<NetworkEvent> {
        self.entries.lock().iter().map(|e| e.event.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: NetworkEvent) {
        self.entries.lock().push(LogEntry { at: Utc::now(), event });
    }
}

/// Shared sinks: lets a caller keep a handle to a sink it gave away.
impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn record(&self, event: NetworkEvent) {
        (**self).record(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: NetworkEvent) {
        match event {
            NetworkEvent::InterestRecorded { user, interest } => {
                tracing::info!(%user, %interest, "interest recorded");
            }
            NetworkEvent::DirectRelationship { from, to, shared } => {
                tracing::info!(%from, %to, shared, "direct relationship");
            }
            NetworkEvent::IndirectRelationship { from, to, shared } => {
                tracing::info!(%from, %to, shared, "indirect relationship");
            }
            NetworkEvent::UserIncluded { by, user } => {
                tracing::info!(%by, %user, "user included");
            }
            NetworkEvent::UserPromoted { user } => {
                tracing::info!(%user, "user promoted");
            }
        }
    }
}
