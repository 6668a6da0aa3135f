// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
pub mod fixtures;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log to stderr, filtered by `RUST_LOG`. Safe to call from many tests.
pub fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}
