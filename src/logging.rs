//! Diagnostic logging setup.
//!
//! Library code emits `tracing` events; the binary installs a fmt
//! subscriber writing to stderr so the interactive prompts on stdout stay
//! clean.  Events carry entry ids and counts only, never secrets.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "pwvault=warn",
        1 => "pwvault=info",
        _ => "pwvault=debug",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
