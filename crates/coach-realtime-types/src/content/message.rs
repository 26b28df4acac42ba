#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageItem {
    /// The role of the message sender: "user", "assistant", "system"
    role: MessageRole,

    /// The content of the message
    content: Vec<Content>,
}

impl MessageItem {
    pub fn builder() -> MessageItemBuilder {
        MessageItemBuilder::new()
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }
}

pub struct MessageItemBuilder {
    item: MessageItem,
}

impl Default for MessageItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageItemBuilder {
    pub fn new() -> Self {
        Self {
            item: MessageItem {
                role: MessageRole::User,
                content: Vec::new(),
            },
        }
    }

    pub fn with_role(mut self, role: MessageRole) -> Self {
        self.item.role = role;
        self
    }

    pub fn with_input_text(mut self, text: &str) -> Self {
        self.item.content.push(Content::input_text(text));
        self
    }

    pub fn build(self) -> MessageItem {
        self.item
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum MessageRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "input_text")]
    InputText(TextContent),
    #[serde(rename = "text")]
    Text(TextContent),
}

impl Content {
    pub fn input_text(text: &str) -> Self {
        Content::InputText(TextContent::new(text))
    }

    pub fn text(&self) -> &str {
        match self {
            Content::InputText(content) | Content::Text(content) => content.text(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct TextContent {
    text: String,
}

impl TextContent {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
