use crate::Item;

/// `conversation.item.create` event
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConversationItemCreateEvent {
    /// The item to add to the conversation
    item: Item,
}

impl ConversationItemCreateEvent {
    pub fn new(item: Item) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }
}
