pub mod client;
pub mod server;

use client::*;
use server::*;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "conversation.item.create")]
    ConversationItemCreate(ConversationItemCreateEvent),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "session.created")]
    SessionCreated(SessionCreatedEvent),
    /// Appended locally by the session UI when the user ends the conversation.
    #[serde(rename = "session.ended")]
    SessionEnded(SessionEndedEvent),
    #[serde(rename = "conversation.item.created")]
    ConversationItemCreated(ConversationItemCreatedEvent),
    #[serde(rename = "response.done")]
    ResponseDone(ResponseDoneEvent),
    /// Every event type the summary pipeline does not read.
    #[serde(other)]
    Other,
}

impl ServerEvent {
    /// The wire `type` of the event, or `"other"` for unrecognised events.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::SessionCreated(_) => "session.created",
            ServerEvent::SessionEnded(_) => "session.ended",
            ServerEvent::ConversationItemCreated(_) => "conversation.item.created",
            ServerEvent::ResponseDone(_) => "response.done",
            ServerEvent::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentPart, Item, MessageItem, MessageRole};
    use serde_json::json;

    #[test]
    fn test_item_create_serializes_to_realtime_wire_shape() {
        let item = MessageItem::builder()
            .with_role(MessageRole::User)
            .with_input_text("summarize please")
            .build();
        let event = ClientEvent::ConversationItemCreate(ConversationItemCreateEvent::new(
            Item::Message(item),
        ));

        let wire = serde_json::to_value(&event).unwrap();

        assert_eq!(
            wire,
            json!({
                "type": "conversation.item.create",
                "item": {
                    "type": "message",
                    "role": "user",
                    "content": [{ "type": "input_text", "text": "summarize please" }]
                }
            })
        );
    }

    #[test]
    fn test_conversation_item_created_reads_role_and_content() {
        let wire = json!({
            "type": "conversation.item.created",
            "event_id": "event_1",
            "previous_item_id": null,
            "item": {
                "id": "item_1",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "audio", "transcript": "Hello there" }]
            }
        });

        let event: ServerEvent = serde_json::from_value(wire).unwrap();

        match event {
            ServerEvent::ConversationItemCreated(created) => {
                assert_eq!(created.item().role, Some(MessageRole::Assistant));
                assert_eq!(created.item().content[0].as_text(), Some("Hello there"));
            }
            other => panic!("Expected conversation.item.created, got {:?}", other),
        }
    }

    #[test]
    fn test_response_done_collects_text_fragments_in_order() {
        let wire = json!({
            "type": "response.done",
            "response": {
                "id": "resp_1",
                "status": "completed",
                "output": [
                    { "type": "text", "text": "First" },
                    { "type": "function_call", "name": "noop", "arguments": "{}" },
                    { "type": "message", "content": [{ "type": "text", "text": "Second" }] }
                ]
            }
        });

        let event: ServerEvent = serde_json::from_value(wire).unwrap();

        let ServerEvent::ResponseDone(done) = event else {
            panic!("Expected response.done");
        };
        let fragments: Vec<&str> = done
            .response()
            .output
            .iter()
            .flat_map(|output| output.text_fragments())
            .collect();
        assert_eq!(fragments, vec!["First", "Second"]);
    }

    #[test]
    fn test_unknown_event_types_decode_as_other() {
        let event: ServerEvent =
            serde_json::from_value(json!({ "type": "rate_limits.updated", "rate_limits": [] }))
                .unwrap();
        assert_eq!(event, ServerEvent::Other);
        assert_eq!(event.kind(), "other");
    }

    #[test]
    fn test_session_markers_need_no_payload() {
        let ended: ServerEvent = serde_json::from_value(json!({ "type": "session.ended" })).unwrap();
        assert_eq!(ended.kind(), "session.ended");

        let created: ServerEvent = serde_json::from_value(
            json!({ "type": "session.created", "event_id": "e", "session": { "id": "s" } }),
        )
        .unwrap();
        assert_eq!(created.kind(), "session.created");
    }

    #[test]
    fn test_content_part_prefers_text_over_transcript() {
        let part = ContentPart {
            text: Some("typed".to_string()),
            transcript: Some("spoken".to_string()),
        };
        assert_eq!(part.as_text(), Some("typed"));
    }
}
