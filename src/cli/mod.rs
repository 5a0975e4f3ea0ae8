//! CLI interface for newscast.

pub mod handlers;
pub mod output;
pub mod progress;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use output::OutputMode;

use crate::utils::require_non_blank;
use crate::NewscastError;

/// newscast - company news sentiment, summarized, translated and spoken
#[derive(Parser)]
#[command(name = "newscast", version, about, long_about = None)]
pub struct Cli {
    /// Override data directory (default: ~/.newscast)
    #[arg(long, env = "NEWSCAST_DATA_PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    /// Do not load the sentiment model (every article is Neutral)
    #[arg(long, global = true)]
    pub no_model: bool,

    /// Skip speech synthesis
    #[arg(long, global = true)]
    pub no_audio: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, score and summarize news about a company
    News {
        /// Company name to search for
        company: String,
    },

    /// Translate text and synthesize speech
    Tts {
        /// Text to speak
        text: String,
    },

    /// Show the keywords extracted from a piece of text
    Topics {
        /// Text to analyze
        text: String,
    },

    /// Start MCP server (stdio transport)
    Mcp,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether the command needs the application context (config, model, providers).
    pub fn needs_context(&self) -> bool {
        !matches!(self, Commands::Topics { .. } | Commands::Completions { .. })
    }

    /// Reject blank arguments up front, before the model or any client is set up.
    pub fn validate(&self) -> Result<(), NewscastError> {
        match self {
            Commands::News { company } => require_non_blank(company, "Company name").map(|_| ()),
            Commands::Tts { text } => require_non_blank(text, "Text").map(|_| ()),
            _ => Ok(()),
        }
    }
}

/// Execute a CLI command.
pub async fn execute(
    command: &Commands,
    ctx: Option<&crate::init::AppContext>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    command.validate()?;

    let require_ctx = || {
        ctx.ok_or_else(|| anyhow::anyhow!("Application context is not initialized"))
    };

    match command {
        Commands::News { company } => handlers::news::handle_news(require_ctx()?, company, mode).await?,
        Commands::Tts { text } => handlers::tts::handle_tts(require_ctx()?, text, mode).await?,
        Commands::Topics { text } => handlers::topics::handle_topics(text, mode)?,
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "newscast", &mut std::io::stdout());
        }
        Commands::Mcp => anyhow::bail!("MCP is started from main"),
    }

    Ok(())
}

/// Process exit code for a failed command.
///
/// 2 for invalid input, 3 when there was no news to report, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<NewscastError>() {
        Some(NewscastError::Validation(_)) => 2,
        Some(e) if e.is_no_data() => 3,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_news() {
        let cli = Cli::try_parse_from(["newscast", "--json", "--no-model", "news", "Tesla"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_model);
        assert!(!cli.no_audio);
        assert!(matches!(cli.command, Commands::News { ref company } if company == "Tesla"));
        assert!(cli.command.needs_context());
    }

    #[test]
    fn test_topics_runs_without_context() {
        let cli = Cli::try_parse_from(["newscast", "topics", "some text"]).unwrap();
        assert!(!cli.command.needs_context());
    }

    #[test]
    fn test_blank_arguments_fail_validation() {
        for args in [
            ["newscast", "news", "   "],
            ["newscast", "tts", ""],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            let err = cli.command.validate().unwrap_err();
            assert!(matches!(err, NewscastError::Validation(_)));
            assert_eq!(exit_code(&err.into()), 2);
        }

        let cli = Cli::try_parse_from(["newscast", "news", "Tesla"]).unwrap();
        assert!(cli.command.validate().is_ok());
        let cli = Cli::try_parse_from(["newscast", "topics", ""]).unwrap();
        assert!(cli.command.validate().is_ok());
    }

    #[tokio::test]
    async fn test_blank_company_fails_without_context() {
        let command = Commands::News {
            company: " ".into(),
        };
        let err = execute(&command, None, OutputMode::Json).await.unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        let validation: anyhow::Error = NewscastError::Validation("x".into()).into();
        assert_eq!(exit_code(&validation), 2);
        let no_data: anyhow::Error = NewscastError::NoArticles {
            company: "Acme".into(),
        }
        .into();
        assert_eq!(exit_code(&no_data), 3);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
