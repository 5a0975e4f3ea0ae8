//! newscast - company news sentiment pipeline
//!
//! Usage:
//!   newscast news "Tesla"        Sentiment report for a company
//!   newscast tts "Hello"         Translate and speak text
//!   newscast topics "text"       Show extracted keywords
//!   newscast mcp                 Start MCP server on stdio
//!   newscast --help              Show all commands

use anyhow::Result;
use clap::Parser;

use newscast::cli::output::{print_error, OutputMode};
use newscast::cli::{exit_code, Cli, Commands};
use newscast::init::{AppContext, InitOptions};
use newscast::mcp::server::run_mcp_server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr (safe for MCP stdio transport)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("newscast=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);
    let options = InitOptions {
        no_model: cli.no_model,
        no_audio: cli.no_audio,
    };

    let result = match cli.command.validate() {
        Err(e) => Err(e.into()),
        Ok(()) => run(&cli, options, mode).await,
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(cli: &Cli, options: InitOptions, mode: OutputMode) -> Result<()> {
    match &cli.command {
        Commands::Mcp => {
            let ctx = AppContext::new(cli.data_path.clone(), options).await?;
            run_mcp_server(ctx).await
        }
        cmd if cmd.needs_context() => {
            let ctx = AppContext::new(cli.data_path.clone(), options).await?;
            let result = newscast::cli::execute(cmd, Some(&ctx), mode).await;
            ctx.shutdown().await;
            result
        }
        cmd => newscast::cli::execute(cmd, None, mode).await,
    }
}
