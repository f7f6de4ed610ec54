//! Check command: connectivity self-test against configured models

use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use reviewdeck_core::config::Config;
use reviewdeck_core::generation::{
    GenerationRequest, SELF_TEST_MAX_TOKENS, SELF_TEST_TEMPERATURE,
};
use reviewdeck_core::prompt::self_test_prompt;
use reviewdeck_core::provider::Provider;

use super::common;
use crate::output::{status_cell, table};

pub async fn run(config_path: Option<&Path>, models: Vec<String>) -> Result<()> {
    let config = common::load_config(config_path)?;
    let dispatcher = common::build_dispatcher(&config)?;

    let models = if models.is_empty() {
        default_targets(&config)
    } else {
        models
    };
    if models.is_empty() {
        bail!("No models configured. Add some under `models` in the config or pass --model.");
    }

    let mut rows = table(&["Model", "Provider", "Status"]);
    let mut failures = 0;

    for model in &models {
        let request = GenerationRequest::new(model.clone(), self_test_prompt())
            .with_max_tokens(SELF_TEST_MAX_TOKENS)
            .with_temperature(SELF_TEST_TEMPERATURE);
        let result = dispatcher.generate(&request).await;
        if !result.is_text() {
            failures += 1;
        }
        let provider = dispatcher
            .route(model)
            .map(|p| p.display_name())
            .unwrap_or("-");
        rows.add_row(vec![model.clone(), provider.to_string(), status_cell(&result)]);
    }

    println!("{rows}");

    if failures > 0 {
        bail!("{failures} of {} self-tests failed", models.len());
    }
    eprintln!("{}", "All self-tests passed.".green().bold());
    Ok(())
}

/// First configured model of each provider.
fn default_targets(config: &Config) -> Vec<String> {
    Provider::all()
        .iter()
        .filter_map(|provider| {
            config
                .models
                .iter()
                .find(|m| Provider::classify(m) == Some(*provider))
                .cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_one_per_provider() {
        let config = Config::default();
        assert_eq!(
            default_targets(&config),
            vec!["gpt-4o-mini".to_string(), "gemini-2.5-flash".to_string()]
        );
    }

    #[test]
    fn test_default_targets_skip_missing_providers() {
        let mut config = Config::default();
        config.models = vec!["gemini-3-flash-preview".into(), "claude-3".into()];
        assert_eq!(default_targets(&config), vec!["gemini-3-flash-preview".to_string()]);
    }
}
