use serde_json::Value;
use std::collections::VecDeque;

/// A snapshot of everything that happened in a session, newest event first.
///
/// Events are kept as raw JSON as the transport delivered them. Decoding happens
/// per event when the log is read, so one malformed entry can be skipped without
/// losing the rest of the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: VecDeque<Value>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_newest_first(events: Vec<Value>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn from_chronological(events: Vec<Value>) -> Self {
        Self {
            events: events.into_iter().rev().collect(),
        }
    }

    /// Records a new event. It becomes the newest entry.
    pub fn push(&mut self, event: Value) {
        self.events.push_front(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn newest(&self) -> Option<&Value> {
        self.events.front()
    }

    /// Newest to oldest, the order the log is delivered in.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Value> {
        self.events.iter()
    }

    /// Oldest to newest.
    pub fn chronological(&self) -> impl Iterator<Item = &Value> {
        self.events.iter().rev()
    }

    /// The marker the session UI appends when the user ends the conversation.
    pub fn session_ended() -> Value {
        serde_json::json!({ "type": "session.ended" })
    }
}

impl From<Vec<Value>> for EventLog {
    fn from(events: Vec<Value>) -> Self {
        Self::from_newest_first(events)
    }
}
