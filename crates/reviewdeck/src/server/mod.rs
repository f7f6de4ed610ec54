//! Local web form server
//!
//! Serves the single review page and the JSON/multipart endpoints behind
//! it. Every generation endpoint answers `{"result": ...}` with 200 or
//! `{"error": ...}` with 500.

mod form;
mod handlers;
mod page;
mod routes;

pub use routes::create_router;

use std::sync::Arc;

use anyhow::{Context, Result};
use reviewdeck_client::{Dispatcher, HttpTransport, Transport};
use reviewdeck_core::config::Config;
use reviewdeck_core::credentials::CredentialSet;
use reviewdeck_core::provider::Provider;
use serde::Serialize;
use tracing::info;

use crate::commands::common::build_dispatcher_with;

/// Which providers had a key in the environment at startup
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EnvKeys {
    pub openai: bool,
    pub gemini: bool,
}

impl EnvKeys {
    pub fn from_credentials(credentials: &CredentialSet) -> Self {
        Self {
            openai: credentials.is_set(Provider::OpenAi),
            gemini: credentials.is_set(Provider::Gemini),
        }
    }
}

/// Shared state for the web server.
pub struct AppState<T> {
    pub config: Config,
    pub dispatcher: Dispatcher<T>,
    pub env_keys: EnvKeys,
}

impl<T: Transport> AppState<T> {
    pub fn new(config: Config, dispatcher: Dispatcher<T>) -> Self {
        let env_keys = EnvKeys::from_credentials(dispatcher.credentials());
        Self {
            config,
            dispatcher,
            env_keys,
        }
    }
}

/// Start the web server and run until Ctrl-C.
pub async fn serve(config: Config, bind: &str) -> Result<()> {
    let credentials = Arc::new(CredentialSet::from_env());
    let dispatcher: Dispatcher<HttpTransport> = build_dispatcher_with(&config, credentials)?;
    let state = Arc::new(AppState::new(config, dispatcher));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("Serving review form at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
