//! Models command: list configured models and whether they can be called

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use reviewdeck_core::credentials::{CredentialSet, env_var};
use reviewdeck_core::provider::{Provider, RoutingPolicy};

use super::common;
use crate::output::table;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = common::load_config(config_path)?;
    let credentials = CredentialSet::from_env();

    let mut rows = table(&["Model", "Provider", "API key"]);
    for model in &config.models {
        let (provider, key) = describe(model, config.routing, &credentials);
        rows.add_row(vec![model.clone(), provider, key]);
    }
    println!("{rows}");

    if config.routing == RoutingPolicy::Permissive
        && config.models.iter().any(|m| Provider::classify(m).is_none())
    {
        eprintln!(
            "{} models without a gpt/gemini prefix are sent to OpenAI",
            "Note:".bold()
        );
    }
    Ok(())
}

fn describe(model: &str, routing: RoutingPolicy, credentials: &CredentialSet) -> (String, String) {
    match routing.route(model) {
        Some(provider) => {
            let key = if credentials.resolve(provider, env_var).is_some() {
                "set".to_string()
            } else {
                format!("missing ({})", provider.call_time_env_vars().join(" / "))
            };
            (provider.display_name().to_string(), key)
        }
        None => ("unsupported".to_string(), "-".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewdeck_core::credentials::CredentialUpdate;

    #[test]
    fn test_describe_held_key() {
        let creds = CredentialSet::new();
        creds.update(&CredentialUpdate {
            openai: Some("k".into()),
            gemini: None,
        });
        let (provider, key) = describe("gpt-4o-mini", RoutingPolicy::Permissive, &creds);
        assert_eq!(provider, "OpenAI");
        assert_eq!(key, "set");
    }

    #[test]
    fn test_describe_strict_unknown_model() {
        let creds = CredentialSet::new();
        let (provider, key) = describe("claude-3", RoutingPolicy::Strict, &creds);
        assert_eq!(provider, "unsupported");
        assert_eq!(key, "-");
    }
}
