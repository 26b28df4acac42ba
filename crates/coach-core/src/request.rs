use crate::transcript::TranscriptTurn;
use coach_realtime_types::events::client::ConversationItemCreateEvent;
use coach_realtime_types::{ClientEvent, Item, MessageItem, MessageRole};

/// Where the serialized transcript goes in a summary prompt template.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

/// The built-in summary prompt. The headers and bullet layout here are exactly
/// what [`crate::parser::parse`] reads back.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = r#"Please analyze our conversation and write a summary of my conflict resolution practice session.

Reply using exactly the four sections below, in this order, with the headers written exactly as shown and a blank line between sections. Start every item in the first three sections on its own line with "- ". List at least two items in each of those sections. Write the last section as a few sentences of prose.

STRENGTHS:
- <a strength I demonstrated>
- <another strength>

AREAS FOR IMPROVEMENT:
- <something I can improve>
- <another area>

PERSONALIZED SUGGESTIONS:
- <a specific, actionable suggestion>
- <another suggestion>

OVERALL PROGRESS:
<a brief description of my overall progress and growth>

Conversation transcript:
{transcript}
"#;

/// Turns a transcript into the request that asks the model for a summary.
#[derive(Debug, Clone)]
pub struct SummaryRequestBuilder {
    template: String,
}

impl Default for SummaryRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryRequestBuilder {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
        }
    }

    /// Replaces the built-in prompt. The template should contain
    /// [`TRANSCRIPT_PLACEHOLDER`]; without it the transcript is left out.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn prompt(&self, transcript: &[TranscriptTurn]) -> String {
        self.template
            .replace(TRANSCRIPT_PLACEHOLDER, &serialize_transcript(transcript))
    }

    /// The `conversation.item.create` event carrying the prompt as a user message.
    pub fn build(&self, transcript: &[TranscriptTurn]) -> ClientEvent {
        let item = MessageItem::builder()
            .with_role(MessageRole::User)
            .with_input_text(&self.prompt(transcript))
            .build();
        ClientEvent::ConversationItemCreate(ConversationItemCreateEvent::new(Item::Message(item)))
    }
}

/// One `Speaker: text` line per turn. Turns with no text are left out.
pub fn serialize_transcript(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .filter(|turn| !turn.text.trim().is_empty())
        .map(|turn| format!("{}: {}", turn.speaker, turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}
