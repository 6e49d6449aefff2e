//! The `eligianc` binary: compiles a single `.eligian` entry file into an
//! `IEngineConfiguration` JSON file.

use clap::Parser;
use eligian_cli::{args::CliArgs, driver, tracing_config};

fn main() {
    let args = CliArgs::parse();
    tracing_config::init(args.quiet);
    std::process::exit(driver::run(&args));
}
