//! In-process stand-ins for the outbound services

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentFetcher, DeliveryError, MessageSender};

/// Records every payload it is asked to send.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, Value)>>,
    fail_with: Option<u16>,
}

impl RecordingSender {
    /// A sender that records the call and then reports `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            sent: Mutex::default(),
            fail_with: Some(status),
        }
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, recipient_id: &str, payload: &Value) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), payload.clone()));

        match self.fail_with {
            Some(status) => Err(DeliveryError::Status {
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

/// Canned reply for [`ScriptedFetcher`].
#[derive(Clone)]
pub enum FetchReply {
    Payload(Value),
    Status(u16),
    Empty,
}

/// Answers every fetch with the same reply and records the request.
pub struct ScriptedFetcher {
    reply: FetchReply,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedFetcher {
    pub fn new(reply: FetchReply) -> Self {
        Self {
            reply,
            calls: Mutex::default(),
        }
    }

    /// `(subscriber_id, moment_id)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for ScriptedFetcher {
    async fn fetch(&self, subscriber_id: &str, moment_id: &str) -> Result<Value, DeliveryError> {
        self.calls
            .lock()
            .unwrap()
            .push((subscriber_id.to_string(), moment_id.to_string()));

        match &self.reply {
            FetchReply::Payload(payload) => Ok(payload.clone()),
            FetchReply::Status(status) => Err(DeliveryError::Status {
                status: *status,
                body: "{\"error\":\"boom\"}".to_string(),
            }),
            FetchReply::Empty => Err(DeliveryError::EmptyResult),
        }
    }
}
