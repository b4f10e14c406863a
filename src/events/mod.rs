//! Messenger webhook event types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The only `object` value the webhook acts on.
pub const PAGE_OBJECT: &str = "page";

/// Top-level body of a `POST /webhook` delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl InboundEvent {
    pub fn is_page(&self) -> bool {
        self.object == PAGE_OBJECT
    }

    /// The first messaging event of every entry.
    ///
    /// Facebook may batch several events into one entry; only the first one is
    /// handled.
    pub fn first_events(&self) -> impl Iterator<Item = &MessagingEvent> {
        self.entry.iter().filter_map(|entry| entry.messaging.first())
    }
}

/// Body of a Send API call. The message payload is passed through untouched.
#[derive(Debug, Serialize)]
pub struct OutboundMessage<'a> {
    pub recipient: Recipient<'a>,
    pub message: &'a Value,
}

#[derive(Debug, Serialize)]
pub struct Recipient<'a> {
    pub id: &'a str,
}

impl<'a> OutboundMessage<'a> {
    pub fn new(recipient_id: &'a str, message: &'a Value) -> Self {
        Self {
            recipient: Recipient { id: recipient_id },
            message,
        }
    }
}

/// Payload echoing `text` back to its sender.
pub fn echo_payload(text: &str) -> Value {
    json!({ "text": format!("You said: \"{}\"", text) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_event() {
        let body = r#"{
            "object": "page",
            "entry": [{
                "id": "123456789",
                "time": 1458692752478,
                "messaging": [{
                    "sender": {"id": "user123"},
                    "recipient": {"id": "page123"},
                    "timestamp": 1458692752478,
                    "message": {"mid": "mid.123", "text": "Hello"}
                }]
            }]
        }"#;

        let event: InboundEvent = serde_json::from_str(body).unwrap();
        assert!(event.is_page());

        let first: Vec<_> = event.first_events().collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sender.as_ref().unwrap().id, "user123");
        assert_eq!(
            first[0].message.as_ref().unwrap().text.as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_only_first_event_per_entry() {
        let body = r#"{
            "object": "page",
            "entry": [
                {"messaging": [
                    {"sender": {"id": "a"}, "message": {"text": "one"}},
                    {"sender": {"id": "a"}, "message": {"text": "two"}}
                ]},
                {"messaging": []},
                {},
                {"messaging": [{"sender": {"id": "b"}, "message": {"text": "three"}}]}
            ]
        }"#;

        let event: InboundEvent = serde_json::from_str(body).unwrap();
        let texts: Vec<_> = event
            .first_events()
            .filter_map(|e| e.message.as_ref()?.text.clone())
            .collect();

        assert_eq!(texts, vec!["one", "three"]);
    }

    #[test]
    fn test_non_page_object() {
        let event: InboundEvent =
            serde_json::from_str(r#"{"object": "instagram", "entry": []}"#).unwrap();
        assert!(!event.is_page());

        let event: InboundEvent = serde_json::from_str("{}").unwrap();
        assert!(!event.is_page());
    }

    #[test]
    fn test_outbound_message_shape() {
        let payload = json!({"text": "hi"});
        let body = serde_json::to_value(OutboundMessage::new("user123", &payload)).unwrap();

        assert_eq!(
            body,
            json!({"recipient": {"id": "user123"}, "message": {"text": "hi"}})
        );
    }

    #[test]
    fn test_echo_payload() {
        assert_eq!(
            echo_payload("Rich Card!"),
            json!({"text": "You said: \"Rich Card!\""})
        );
    }
}
