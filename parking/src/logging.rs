//! Diagnostics for the parking CLI.
//!
//! Check-in and check-out messages, listings and income reports are the
//! product output and are printed to stdout by the session. Ledger decisions
//! (admits, rejections, fees charged) and config resolution are traced as
//! `debug!`/`info!` events, which this module routes to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber for a CLI invocation.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, which keeps a
/// normal run silent. Set `RUST_LOG=parking=debug` to see every admit and
/// release decision alongside the console output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
