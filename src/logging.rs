//! Tracing setup for the command-line front end.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DOSSIER_LOG";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `DOSSIER_LOG`.
///
/// Format: `DOSSIER_LOG=dossier=debug`. Falls back to `dossier=info` when
/// unset or invalid. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("dossier=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    });
}
