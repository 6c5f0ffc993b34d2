// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Teamboard server.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on
//! stderr. The level is controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: info for teamboard, errors only for octocrab
//! teamboard
//!
//! # Per-user fetch details
//! RUST_LOG=teamboard_core=debug teamboard
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "teamboard_core=info,teamboard_server=info,octocrab=error";

/// Initialize the logging subsystem.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
