//! Diagnostics go to stderr through a `tracing` subscriber.
//!
//! The filter comes from `RUST_LOG` and defaults to `warn`, so library
//! round-trip warnings show up while decode traces stay quiet.

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "warn";

pub fn init() {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    let _ = INITIALISED.get_or_init(|| {
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let subscriber = fmt::fmt()
            .with_env_filter(filter)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
