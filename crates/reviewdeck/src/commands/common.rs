//! Shared helpers for CLI commands
//!
//! Config loading and dispatcher construction, plus model resolution with
//! the standard fallback chain: CLI flag > first configured model.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reviewdeck_client::{Dispatcher, HttpTransport};
use reviewdeck_core::config::Config;
use reviewdeck_core::credentials::CredentialSet;

/// Load the config from `path` or the standard location, defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load_or_default(path).context("failed to load reviewdeck config")
}

/// Build the production dispatcher over a credential set seeded from the environment.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher<HttpTransport>> {
    let credentials = Arc::new(CredentialSet::from_env());
    build_dispatcher_with(config, credentials)
}

pub fn build_dispatcher_with(
    config: &Config,
    credentials: Arc<CredentialSet>,
) -> Result<Dispatcher<HttpTransport>> {
    let timeout = config.http.timeout_secs.map(Duration::from_secs);
    let transport = HttpTransport::new(timeout).context("failed to build HTTP client")?;
    Ok(Dispatcher::new(
        transport,
        credentials,
        &config.provider_settings(),
    ))
}

/// Resolve which model to use: `cli` > first configured model.
pub fn resolve_model(config: &Config, cli: Option<String>) -> String {
    cli.filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| config.default_model().to_string())
}
