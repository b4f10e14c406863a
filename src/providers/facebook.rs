//! Messenger Send API client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::events::OutboundMessage;

use super::{DeliveryError, MessageSender};

pub struct FacebookMessenger {
    client: Client,
    api_root: String,
    access_token: String,
}

impl FacebookMessenger {
    pub fn new(api_root: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_root: api_root.into(),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl MessageSender for FacebookMessenger {
    async fn send(&self, recipient_id: &str, payload: &Value) -> Result<(), DeliveryError> {
        debug!("Sending message to {}: {}", recipient_id, payload);

        let response = self
            .client
            .post(&self.api_root)
            .query(&[("access_token", &self.access_token)])
            .json(&OutboundMessage::new(recipient_id, payload))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
