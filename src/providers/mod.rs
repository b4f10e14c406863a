//! Outbound API integrations
//!
//! Two services sit behind this module: the Messenger Send API, which delivers
//! messages to subscribers, and Direqt, which serves pre-authored moments.
//! Both are modelled as traits so the message handler can be exercised
//! without a network.

mod direqt;
mod facebook;

#[cfg(test)]
pub(crate) mod fakes;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use direqt::DireqtClient;
pub use facebook::FacebookMessenger;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response carried no payload")]
    EmptyResult,

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Delivers a message payload to a subscriber.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, recipient_id: &str, payload: &Value) -> Result<(), DeliveryError>;
}

/// Looks up the message payload of a moment for a subscriber.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, subscriber_id: &str, moment_id: &str) -> Result<Value, DeliveryError>;
}
