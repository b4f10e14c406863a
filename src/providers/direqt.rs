//! Direqt content API client
//!
//! Moments are fetched with `POST {root}/fetch?key={api_key}`. The response
//! carries the message payload as a JSON-encoded string in `payload`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContentFetcher, DeliveryError};

/// Moment format understood by Messenger.
pub const MOMENT_FORMAT: &str = "FBM";

/// Targeting sent with every fetch. Must never carry personal data.
pub const DEFAULT_TARGETING: &str = r#"{"language":"en"}"#;

#[derive(Debug, Serialize)]
struct FetchRequest<'a> {
    format: &'a str,
    moment: &'a str,
    subscriber: &'a str,
    targeting: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct FetchResponse {
    #[serde(default)]
    payload: Option<String>,
}

pub struct DireqtClient {
    client: Client,
    api_root: String,
    api_key: String,
    api_secret: Option<String>,
}

impl DireqtClient {
    pub fn new(
        api_root: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_root: api_root.into(),
            api_key: api_key.into(),
            api_secret,
        }
    }
}

#[async_trait]
impl ContentFetcher for DireqtClient {
    async fn fetch(&self, subscriber_id: &str, moment_id: &str) -> Result<Value, DeliveryError> {
        let url = format!("{}/fetch", self.api_root.trim_end_matches('/'));

        let request = FetchRequest {
            format: MOMENT_FORMAT,
            moment: moment_id,
            subscriber: subscriber_id,
            targeting: DEFAULT_TARGETING,
        };

        let mut req_builder = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request);

        // Basic auth is only needed for custom configurations
        if let Some(ref secret) = self.api_secret {
            req_builder = req_builder.basic_auth(&self.api_key, Some(secret));
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let fetched: FetchResponse = serde_json::from_str(&body).unwrap_or_default();

        match fetched.payload.filter(|p| !p.is_empty()) {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Err(DeliveryError::EmptyResult),
        }
    }
}
