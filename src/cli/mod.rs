//! Command-line interface definitions.

mod ask;
mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// Promptminer - LLM inference miner for peer-to-peer prompting networks.
#[derive(Parser, Debug)]
#[command(name = "promptminer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive one message through the forward path and print the completion
    Ask(AskArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `promptminer check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to serve
    pub message: String,

    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Dispatch a parsed command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask(args) => ask::execute(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    }
}
