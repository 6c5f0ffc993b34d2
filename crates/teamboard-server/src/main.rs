// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the Teamboard server.

use anyhow::{Context, Result};
use clap::Parser;
use teamboard_core::{load_config, load_config_from};
use teamboard_server::cli::{Cli, hosted_bind_addr};
use teamboard_server::logging;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    cli.apply_overrides(&mut config, hosted_bind_addr());

    teamboard_server::run(&config).await
}
