use crate::error::SummaryError;
use crate::event_log::EventLog;
use coach_realtime_types::{MessageRole, ServerEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => f.write_str("User"),
            Speaker::Assistant => f.write_str("Assistant"),
        }
    }
}

/// One spoken turn reconstructed from the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Folds an [`EventLog`] into the ordered dialogue.
///
/// Entries the reducer cannot read are skipped and logged. Only when more of them
/// turn up than the configured tolerance is the snapshot as a whole rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptReducer {
    max_malformed: Option<usize>,
}

impl TranscriptReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the reduction once more than `tolerance` entries are malformed.
    pub fn with_max_malformed(mut self, tolerance: usize) -> Self {
        self.max_malformed = Some(tolerance);
        self
    }

    pub fn reduce(&self, log: &EventLog) -> Result<Vec<TranscriptTurn>, SummaryError> {
        let mut turns = Vec::new();
        let mut malformed = 0;

        for (position, raw) in log.chronological().enumerate() {
            match decode_event(raw) {
                Ok(event) => turns.extend(turn_from(&event)),
                Err(reason) => {
                    malformed += 1;
                    tracing::warn!("skipping malformed session event #{}: {}", position, reason);
                }
            }
        }

        if let Some(tolerance) = self.max_malformed {
            if malformed > tolerance {
                return Err(SummaryError::TranscriptExtraction {
                    malformed,
                    tolerance,
                });
            }
        }

        Ok(turns)
    }
}

/// Reduces with the default (unbounded) skip tolerance.
pub fn reduce(log: &EventLog) -> Result<Vec<TranscriptTurn>, SummaryError> {
    TranscriptReducer::default().reduce(log)
}

/// Decodes one raw log entry. Unknown event types decode to [`ServerEvent::Other`];
/// an error means the entry is malformed.
pub(crate) fn decode_event(raw: &Value) -> Result<ServerEvent, String> {
    if !raw.is_object() {
        return Err("event is not a JSON object".to_string());
    }
    if !raw.get("type").is_some_and(Value::is_string) {
        return Err("event has no string `type`".to_string());
    }
    ServerEvent::deserialize(raw).map_err(|e| e.to_string())
}

fn turn_from(event: &ServerEvent) -> Option<TranscriptTurn> {
    match event {
        ServerEvent::ConversationItemCreated(created) => {
            let item = created.item();
            let speaker = match item.role {
                None | Some(MessageRole::User) => Speaker::User,
                Some(MessageRole::Assistant) => Speaker::Assistant,
                Some(MessageRole::System) => {
                    tracing::debug!("system item is not part of the dialogue");
                    return None;
                }
            };
            let text = item
                .content
                .first()
                .and_then(|block| block.as_text())
                .unwrap_or_default();
            Some(TranscriptTurn::new(speaker, text))
        }
        ServerEvent::ResponseDone(done) => {
            let fragments: Vec<&str> = done
                .response()
                .output
                .iter()
                .flat_map(|output| output.text_fragments())
                .collect();
            if fragments.is_empty() {
                None
            } else {
                Some(TranscriptTurn::new(Speaker::Assistant, fragments.join(" ")))
            }
        }
        other => {
            tracing::debug!("no transcript turn for {} event", other.kind());
            None
        }
    }
}
