//! Review page rendering

use reviewdeck_core::config::Config;
use serde::Serialize;

use super::EnvKeys;

const INDEX_TEMPLATE: &str = include_str!("index.html");

#[derive(Serialize)]
struct IndexContext<'a> {
    version: &'a str,
    models_json: String,
    default_max_tokens: u32,
    has_openai_env: bool,
    has_gemini_env: bool,
}

/// Serialize for embedding inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_index(config: &Config, env_keys: EnvKeys) -> anyhow::Result<String> {
    let mut env = minijinja::Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    let tmpl = env.get_template("index.html")?;

    let context = IndexContext {
        version: env!("CARGO_PKG_VERSION"),
        models_json: script_json(&config.models)?,
        default_max_tokens: reviewdeck_core::generation::DEFAULT_MAX_TOKENS,
        has_openai_env: env_keys.openai,
        has_gemini_env: env_keys.gemini,
    };
    Ok(tmpl.render(context)?)
}
