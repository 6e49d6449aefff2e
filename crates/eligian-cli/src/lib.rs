//! The `eligianc` command-line driver: argument parsing, diagnostic
//! reporting, `--watch` file-watching, and `--trace` timing, all wired
//! around [`eligian_core::compile`].

pub mod args;
pub mod driver;
pub mod reporter;
pub mod trace;
pub mod tracing_config;
pub mod watch;

pub use args::CliArgs;
pub use driver::run;
