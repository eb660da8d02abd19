//! The output channel: the single source of truth for what the user sees.

use std::time::SystemTime;

use blockpad_eval::{Sink, SinkError};
use serde::Serialize;

/// Identity of one output event.
///
/// Strictly increasing in emission order. Ids are never reused for the life
/// of a channel, including across [`OutputChannel::reset`]: the counter
/// survives a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EventId(u64);

/// One captured emission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputEvent {
    pub id: EventId,
    /// May be empty, never absent.
    pub text: String,
    /// Wall-clock capture time.
    pub timestamp: SystemTime,
}

/// Ordered, append-only log of output events. `reset` is the only mutator
/// that removes data.
#[derive(Debug, Clone, Default)]
pub struct OutputChannel {
    events: Vec<OutputEvent>,
    next_id: u64,
}

impl OutputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event: next id, current wall-clock time. Never rejects,
    /// never blocks.
    pub fn append(&mut self, text: impl Into<String>) -> &OutputEvent {
        let event = OutputEvent {
            id: EventId(self.next_id),
            text: text.into(),
            timestamp: SystemTime::now(),
        };
        self.next_id += 1;
        let idx = self.events.len();
        self.events.push(event);
        &self.events[idx]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    /// Clear all events. The id counter is not reset, so later events never
    /// reuse an id from before the clear.
    pub fn reset(&mut self) {
        self.events.clear();
    }
}

impl Sink for OutputChannel {
    fn emit(&mut self, text: &str) -> Result<(), SinkError> {
        self.append(text);
        Ok(())
    }
}
