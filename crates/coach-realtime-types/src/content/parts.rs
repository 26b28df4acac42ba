//! Content blocks as the server reports them.
//!
//! These are lenient: every field is optional so that a block the server shapes
//! differently (audio with a transcript, a function call without text) still
//! decodes, and callers decide what counts as text.

/// One block inside an item's `content` list.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Present on spoken (`input_audio` / `audio`) blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl ContentPart {
    /// The written text of the block, falling back to the transcript of spoken audio.
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref().or(self.transcript.as_deref())
    }
}

/// One entry of a completed response's `output` list.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentPart>,
}

impl OutputItem {
    /// Every non-empty piece of text this entry carries: its own `text` first,
    /// then the text (or transcript) of each nested content block, in order.
    pub fn text_fragments(&self) -> impl Iterator<Item = &str> {
        self.text
            .as_deref()
            .into_iter()
            .chain(self.content.iter().filter_map(ContentPart::as_text))
            .filter(|fragment| !fragment.trim().is_empty())
    }
}
