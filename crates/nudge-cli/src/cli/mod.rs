//! CLI for the nudge dispatcher.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use nudge_core::config;
use nudge_core::request::Method;
use nudge_core::retry::Backoff;
use std::path::PathBuf;

use commands::{run_batch, run_send};

/// Top-level CLI for the nudge dispatcher.
#[derive(Debug, Parser)]
#[command(name = "nudge")]
#[command(about = "nudge: retrying dispatcher for fire-and-acknowledge HTTP calls", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Retry flags shared by send and batch; each overrides the config value.
#[derive(Debug, Args)]
pub struct RetryArgs {
    /// Retries allowed after the initial attempt.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Base backoff delay in milliseconds.
    #[arg(long, value_name = "MS")]
    pub base_delay_ms: Option<u64>,

    /// Backoff shape: fixed, linear or exponential.
    #[arg(long, value_name = "SHAPE")]
    pub backoff: Option<Backoff>,

    /// Apply jitter to backoff delays.
    #[arg(long)]
    pub jitter: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send one fire-and-acknowledge request.
    Send {
        /// HTTP or HTTPS endpoint to nudge.
        url: String,

        /// HTTP method (GET, POST, PUT, DELETE, PATCH).
        #[arg(long, default_value = "POST")]
        method: Method,

        /// Request header as 'Name: value'; repeatable.
        #[arg(long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Inline request body.
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,

        /// Read the request body from a file.
        #[arg(long, value_name = "PATH")]
        data_file: Option<PathBuf>,

        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Dispatch every entry of a JSON manifest.
    Batch {
        /// Path to the manifest file.
        path: PathBuf,

        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Send {
                url,
                method,
                headers,
                data,
                data_file,
                retry,
            } => run_send(
                &cfg,
                &url,
                method,
                &headers,
                data.as_deref(),
                data_file.as_deref(),
                &retry,
            )?,
            CliCommand::Batch { path, retry } => run_batch(&cfg, &path, &retry)?,
            CliCommand::Completions { shell } => {
                let mut cmd = Cli::command();
                let name = cmd.get_name().to_string();
                clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            }
        }

        Ok(())
    }
}
