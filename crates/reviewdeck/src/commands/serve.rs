//! Serve command: run the local review form

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use super::common;

pub struct ServeArgs {
    pub config_path: Option<PathBuf>,
    pub bind: Option<String>,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = common::load_config(args.config_path.as_deref())?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    eprintln!(
        "{} Review form at {} (Ctrl-C to stop)",
        "→".cyan(),
        format!("http://{bind}").bold()
    );

    crate::server::serve(config, &bind).await
}
