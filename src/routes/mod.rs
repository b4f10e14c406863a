//! API routes
//!
//! `GET /webhook` answers Facebook's subscription handshake and
//! `POST /webhook` accepts event deliveries. Deliveries are acknowledged
//! right away; the messages are handled on a background task.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::events::InboundEvent;
use crate::AppState;

/// Body returned for every accepted delivery.
pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

const SUBSCRIBE_MODE: &str = "subscribe";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn verify(
    State(state): State<AppState>,
    params: Result<Query<VerifyParams>, QueryRejection>,
) -> Response {
    // Repeated or malformed hub.* parameters never match
    let Ok(Query(params)) = params else {
        warn!("Webhook verification failed: malformed query");
        return StatusCode::FORBIDDEN.into_response();
    };

    let subscribed = params.mode.as_deref() == Some(SUBSCRIBE_MODE)
        && params.verify_token.as_deref() == Some(state.config.verify_token.as_str());

    if subscribed {
        info!("WEBHOOK_VERIFIED");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        warn!("Webhook verification failed: invalid mode or token");
        StatusCode::FORBIDDEN.into_response()
    }
}

async fn receive(State(state): State<AppState>, body: Bytes) -> Response {
    let event: InboundEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Invalid webhook payload: {}", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    if !event.is_page() {
        debug!("Ignoring webhook for object '{}'", event.object);
        return StatusCode::NOT_FOUND.into_response();
    }

    let handler = state.handler.clone();
    tokio::spawn(async move {
        for report in handler.handle_event(&event).await {
            debug!(
                "Handled message from {}: echo_ok={}, moment={:?}",
                report.sender_id,
                report.echo.is_ok(),
                report
                    .moment
                    .as_ref()
                    .map(|m| (m.moment_id.as_str(), m.result.is_ok())),
            );
        }
    });

    (StatusCode::OK, EVENT_RECEIVED).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", get(verify).post(receive))
}
