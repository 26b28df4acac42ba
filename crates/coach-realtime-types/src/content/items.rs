use crate::content::message::MessageItem;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Item {
    #[serde(rename = "message")]
    Message(MessageItem),
}

impl Item {
    /// Convenience accessor for the message payload.
    pub fn as_message(&self) -> Option<&MessageItem> {
        match self {
            Item::Message(message) => Some(message),
        }
    }
}
