//! Generate command: send one prompt to a model and print the result

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use reviewdeck_core::generation::GenerationRequest;

use super::common;
use crate::output::write_result;

pub struct GenerateArgs {
    pub config_path: Option<PathBuf>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub file: Option<PathBuf>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub json: bool,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let config = common::load_config(args.config_path.as_deref())?;
    let dispatcher = common::build_dispatcher(&config)?;

    let prompt = read_prompt(args.prompt, args.file)?;
    let model = common::resolve_model(&config, args.model);

    let request = GenerationRequest::new(model, prompt)
        .with_max_tokens(args.max_tokens)
        .with_temperature(args.temperature);
    let result = dispatcher.generate(&request).await;

    let ok = write_result(&mut std::io::stdout(), &result, args.json)?;
    if !ok {
        match result.as_error() {
            Some(error) if !args.json => bail!("{error}"),
            _ => bail!("generation failed"),
        }
    }
    Ok(())
}

/// Prompt from the argument, a file, or stdin, in that order.
fn read_prompt(prompt: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let prompt = match (prompt, file) {
        (Some(p), _) => p,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read prompt file: {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read prompt from stdin")?;
            buf
        }
    };
    if prompt.trim().is_empty() {
        bail!("prompt is empty");
    }
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_prompt_from_argument() {
        let prompt = read_prompt(Some("hello".into()), None).unwrap();
        assert_eq!(prompt, "hello");
    }

    #[test]
    fn test_read_prompt_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "from file").unwrap();
        let prompt = read_prompt(None, Some(path)).unwrap();
        assert_eq!(prompt, "from file");
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        assert!(read_prompt(Some("  \n".into()), None).is_err());
    }

    #[test]
    fn test_missing_prompt_file() {
        let err = read_prompt(None, Some(PathBuf::from("/definitely/not/here.txt"))).unwrap_err();
        assert!(err.to_string().contains("failed to read prompt file"));
    }
}
