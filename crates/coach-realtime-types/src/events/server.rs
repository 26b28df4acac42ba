use crate::{ContentPart, MessageRole, OutputItem};

/// `session.created` event. Only its arrival matters; the session payload is not read.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionCreatedEvent {}

/// `session.ended` marker
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionEndedEvent {}

/// `conversation.item.created` event
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConversationItemCreatedEvent {
    /// The item that was created
    item: ItemResource,
}

impl ConversationItemCreatedEvent {
    pub fn item(&self) -> &ItemResource {
        &self.item
    }
}

/// A conversation item as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,

    #[serde(default)]
    pub content: Vec<ContentPart>,
}

/// `response.done` event
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponseDoneEvent {
    /// The response resource
    response: ResponseResource,
}

impl ResponseDoneEvent {
    pub fn response(&self) -> &ResponseResource {
        &self.response
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponseResource {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}
