//! Direqt example webhook for Facebook Messenger
//!
//! Echoes every text message back to its sender. Messages naming one of the
//! Direqt playground moments ("text", "rich card", "media") additionally get
//! the moment's pre-authored content fetched from Direqt and relayed.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dispatch;
mod events;
mod providers;
mod routes;

use config::Config;
use dispatch::MessageHandler;
use providers::{DireqtClient, FacebookMessenger};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub handler: Arc<MessageHandler>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "direqt_webhook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let messenger = FacebookMessenger::new(
        config.facebook_api_root.clone(),
        config.page_access_token.clone(),
    );
    let direqt = DireqtClient::new(
        config.direqt_api_root.clone(),
        config.direqt_api_key.clone(),
        config.direqt_api_secret.clone(),
    );

    tracing::info!(
        "Relaying to {} with moments from {}",
        config.facebook_api_root,
        config.direqt_api_root
    );

    let handler = Arc::new(MessageHandler::new(Arc::new(messenger), Arc::new(direqt)));

    let state = AppState { config, handler };

    let app = Router::new()
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Direqt example webhook is listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
