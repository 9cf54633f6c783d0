//! DS3 command-line client.
//!
//! # Usage
//!
//! ```text
//! ds3 [--help | --version]
//! ds3 service
//! ds3 bucket <name>
//! ds3 get <bucket> <key> <file>
//! ds3 put <bucket> <key> <file>
//! ds3 delete <bucket> [key]
//! ds3 mkbucket <name>
//! ds3 bulk-put <bucket> <file>...
//! ds3 bulk-get <bucket> <key>...
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DS3_ENDPOINT` | *(required)* | Endpoint URL |
//! | `DS3_ACCESS_KEY` | *(required)* | Access id |
//! | `DS3_SECRET_KEY` | *(required)* | Secret key |
//! | `DS3_PROXY` / `http_proxy` | *(unset)* | Proxy URL |
//! | `DS3_MAX_REDIRECTS` | `5` | Redirects followed per request |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use ds3_client::ClientConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    let config = ClientConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;
    debug!(?config, ?command, "starting ds3");

    let client = config
        .into_client()
        .context("failed to create the DS3 client")?;

    command.run(&client, &mut std::io::stdout().lock())
}
