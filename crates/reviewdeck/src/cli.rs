//! CLI argument definitions using clap

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Local review and checklist co-pilot backed by OpenAI- or Gemini-compatible LLMs
#[derive(Parser)]
#[command(name = "reviewdeck")]
#[command(author, version, about)]
#[command(long_about = "Local review and checklist co-pilot backed by LLM APIs.\n\n\
    Serves a browser form that reorganizes submissions and checklists and runs \
    checklist reviews through OpenAI- or Gemini-compatible models.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "REVIEWDECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Write a starter config file (at --config or the platform config directory)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Serve the review form on a local address
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Send a single prompt to a model and print the generated text
    Generate {
        /// Prompt text (read from --file or stdin when omitted)
        prompt: Option<String>,

        /// Model identifier (defaults to the first configured model)
        #[arg(long, short)]
        model: Option<String>,

        /// Read the prompt from a file
        #[arg(long, short, conflicts_with = "prompt")]
        file: Option<PathBuf>,

        /// Maximum output tokens
        #[arg(long, default_value_t = reviewdeck_core::generation::DEFAULT_MAX_TOKENS)]
        max_tokens: u32,

        /// Sampling temperature
        #[arg(long, default_value_t = reviewdeck_core::generation::DEFAULT_TEMPERATURE)]
        temperature: f64,

        /// Print the result as JSON (`{"text": ...}` or `{"error": ...}`)
        #[arg(long)]
        json: bool,
    },

    /// Run a connectivity self-test against one or more models
    Check {
        /// Models to test (defaults to one configured model per provider)
        #[arg(long = "model", short)]
        models: Vec<String>,
    },

    /// List configured models with their provider and key status
    Models,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Clone, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = self.config;
        match self.command {
            Some(Commands::Init { force }) => {
                crate::commands::init::run(config_path.as_deref(), force)
            }
            Some(Commands::Serve { bind }) => {
                crate::commands::serve::run(crate::commands::serve::ServeArgs {
                    config_path,
                    bind,
                })
                .await
            }
            Some(Commands::Generate {
                prompt,
                model,
                file,
                max_tokens,
                temperature,
                json,
            }) => {
                crate::commands::generate::run(crate::commands::generate::GenerateArgs {
                    config_path,
                    prompt,
                    model,
                    file,
                    max_tokens,
                    temperature,
                    json,
                })
                .await
            }
            Some(Commands::Check { models }) => {
                crate::commands::check::run(config_path.as_deref(), models).await
            }
            Some(Commands::Models) => crate::commands::models::run(config_path.as_deref()),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::generate_completions(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                // Show help when no subcommand is given
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["reviewdeck", "generate", "hello"]);
        match cli.command {
            Some(Commands::Generate {
                prompt,
                model,
                max_tokens,
                temperature,
                json,
                ..
            }) => {
                assert_eq!(prompt.as_deref(), Some("hello"));
                assert!(model.is_none());
                assert_eq!(max_tokens, 12000);
                assert_eq!(temperature, 0.2);
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_check_accepts_repeated_models() {
        let cli = Cli::parse_from([
            "reviewdeck",
            "check",
            "--model",
            "gpt-4o-mini",
            "-m",
            "gemini-2.5-flash",
        ]);
        match cli.command {
            Some(Commands::Check { models }) => {
                assert_eq!(models, vec!["gpt-4o-mini", "gemini-2.5-flash"]);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_init_force_flag() {
        let cli = Cli::parse_from(["reviewdeck", "init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["reviewdeck", "models", "--config", "/tmp/rd.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rd.yaml")));
    }
}
