//! Message handler
//!
//! The MessageHandler turns one inbound message into outbound calls:
//! 1. Echoes the text back to the sender
//! 2. If the text names a playground moment, fetches it from Direqt
//! 3. Relays the fetched payload to the sender
//!
//! Steps 1 and 2 run concurrently. Failures are logged and never propagated.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::events::{echo_payload, InboundEvent, IncomingMessage};
use crate::providers::{ContentFetcher, DeliveryError, MessageSender};

use super::keywords;

/// Outcome of handling a single message.
#[derive(Debug)]
pub struct HandleReport {
    pub sender_id: String,
    pub echo: Result<(), DeliveryError>,
    pub moment: Option<MomentReport>,
}

/// Outcome of a moment fetch. `Ok` means the payload was relayed.
#[derive(Debug)]
pub struct MomentReport {
    pub moment_id: String,
    pub result: Result<(), DeliveryError>,
}

pub struct MessageHandler {
    sender: Arc<dyn MessageSender>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl MessageHandler {
    pub fn new(sender: Arc<dyn MessageSender>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { sender, fetcher }
    }

    /// Handle the first messaging event of each entry, in order.
    pub async fn handle_event(&self, event: &InboundEvent) -> Vec<HandleReport> {
        let mut reports = Vec::new();

        for messaging in event.first_events() {
            let Some(message) = &messaging.message else {
                debug!("Ignoring non-message event");
                continue;
            };

            let Some(sender) = &messaging.sender else {
                warn!("No sender ID in message");
                continue;
            };

            if let Some(report) = self.handle(&sender.id, message).await {
                reports.push(report);
            }
        }

        reports
    }

    /// Handle a single message. Returns `None` for messages without text.
    pub async fn handle(&self, sender_id: &str, message: &IncomingMessage) -> Option<HandleReport> {
        let Some(text) = message.text.as_deref() else {
            debug!("Ignoring message without text");
            return None;
        };

        info!(
            "Received message {} from {}: {}",
            message.mid.as_deref().unwrap_or("-"),
            sender_id,
            text
        );

        let echo = async {
            let result = self.sender.send(sender_id, &echo_payload(text)).await;
            if let Err(ref e) = result {
                error!("Facebook send request failed: {}", e);
            }
            result
        };

        let moment = async {
            match keywords::moment_for(text) {
                Some(moment_id) => {
                    let result = self.deliver_moment(sender_id, &moment_id).await;
                    Some(MomentReport { moment_id, result })
                }
                None => None,
            }
        };

        let (echo, moment) = tokio::join!(echo, moment);

        Some(HandleReport {
            sender_id: sender_id.to_string(),
            echo,
            moment,
        })
    }

    /// Fetch a moment and relay its payload to the subscriber.
    async fn deliver_moment(&self, sender_id: &str, moment_id: &str) -> Result<(), DeliveryError> {
        let payload = match self.fetcher.fetch(sender_id, moment_id).await {
            Ok(payload) => payload,
            Err(DeliveryError::EmptyResult) => {
                info!("Direqt fetch for Moment '{}' was empty.", moment_id);
                return Err(DeliveryError::EmptyResult);
            }
            Err(e) => {
                error!("Direqt fetch for Moment '{}' failed: {}", moment_id, e);
                return Err(e);
            }
        };

        info!("Direqt fetch for Moment '{}' received payload.", moment_id);

        self.sender.send(sender_id, &payload).await.map_err(|e| {
            error!("Facebook send request failed: {}", e);
            e
        })
    }
}
