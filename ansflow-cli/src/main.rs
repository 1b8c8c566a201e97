//! AnsFlow CLI
//!
//! Command-line front end for the AnsFlow CI/CD platform.

mod commands;
mod config;
mod id_resolver;
mod output;
mod types;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ansflow")]
#[command(about = "AnsFlow CI/CD Platform CLI", long_about = None)]
struct Cli {
    /// AnsFlow server URL
    #[arg(long, env = "ANSFLOW_URL", default_value = "http://localhost:8000")]
    server_url: String,

    /// File holding the access token
    /// [default: <config dir>/ansflow/credentials.json]
    #[arg(long, env = "ANSFLOW_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "ANSFLOW_TIMEOUT", default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ansflow=warn,ansflow_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        token_file: cli.token_file.unwrap_or_else(config::default_token_file),
        timeout: Duration::from_secs(cli.timeout),
    };

    handle_command(cli.command, &config).await
}
