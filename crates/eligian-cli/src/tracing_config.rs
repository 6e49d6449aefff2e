//! Wires up `tracing-subscriber` for the binary (spec §9 ambient stack).
//! Compiler errors are diagnostics, rendered separately by
//! [`crate::reporter`]; this only covers the debug/trace-level pipeline
//! logging the rest of the workspace crates already emit (cache
//! invalidation, file-watch events, import resolution).

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `info` normally, `warn` under
/// `--quiet` so only diagnostics and hard errors print.
pub fn init(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).without_time().init();
}
