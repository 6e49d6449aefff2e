//! Drives one compile: reads args, calls [`eligian_core::compile`], writes
//! the JSON output, and reports diagnostics. Exit codes (spec §9): `0` on a
//! clean compile, `1` when an Error-severity diagnostic suppressed
//! emission, `2` on an I/O failure reading the entry file or writing
//! output.

use crate::args::CliArgs;
use crate::reporter;
use crate::trace::Tracer;
use eligian_common::Diagnostic;
use eligian_core::{compile, CompileOptions, CoreError};
use eligian_workspace::{CancellationToken, RealFileSystemProvider};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTIC_ERROR: i32 = 1;
pub const EXIT_IO_ERROR: i32 = 2;

/// Entry point used by the binary: a single compile, or `--watch`'s
/// recompile-forever loop.
pub fn run(args: &CliArgs) -> i32 {
    if args.watch {
        run_watch(args)
    } else {
        run_once(args)
    }
}

fn run_watch(args: &CliArgs) -> i32 {
    let dir = args.input.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    info!(dir = %dir.display(), "watching for changes");
    run_once(args);
    match crate::watch::watch(dir, || {
        run_once(args);
    }) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: watch failed: {e}");
            EXIT_IO_ERROR
        }
    }
}

/// Runs one compile of `args.input`, reporting diagnostics and writing the
/// output file. Returns the process exit code.
pub fn run_once(args: &CliArgs) -> i32 {
    let entry_uri = args.input.to_string_lossy().to_string();
    let options = CompileOptions { optimize: args.optimize };
    let token = CancellationToken::new();

    let mut tracer = Tracer::new();
    let outcome = tracer.record("compile", || compile(&entry_uri, Box::new(RealFileSystemProvider), &options, &token));
    if args.trace {
        tracer.print_summary();
    }

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(CoreError::EntryFileRead { path, source }) => {
            eprintln!("error: cannot read '{path}': {source}");
            return EXIT_IO_ERROR;
        }
        Err(CoreError::Asset(e)) => {
            eprintln!("error: {e}");
            return EXIT_IO_ERROR;
        }
        Err(CoreError::Emit(e)) => {
            eprintln!("error: {e}");
            return EXIT_DIAGNOSTIC_ERROR;
        }
    };

    report_diagnostics(&outcome.diagnostics, &entry_uri, args);

    let Some(json) = outcome.json else {
        return EXIT_DIAGNOSTIC_ERROR;
    };

    let out_path = args.output_path();
    match write_output(&out_path, &json, !args.no_minify) {
        Ok(()) => {
            info!(output = %out_path.display(), "wrote compiled configuration");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("error: cannot write '{}': {e}", out_path.display());
            EXIT_IO_ERROR
        }
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic], entry_uri: &str, args: &CliArgs) {
    if diagnostics.is_empty() {
        return;
    }
    let mut sources = HashMap::new();
    if let Ok(text) = std::fs::read_to_string(Path::new(entry_uri)) {
        sources.insert(entry_uri.to_string(), text);
    }
    reporter::report(diagnostics, &sources, args.diagnostics_format);
}

fn write_output(path: &Path, json: &serde_json::Value, minify: bool) -> std::io::Result<()> {
    let rendered = if minify { serde_json::to_string(json)? } else { serde_json::to_string_pretty(json)? };
    std::fs::write(path, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn compiles_and_writes_output_for_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.eligian");
        std::fs::write(&input, "timeline \"t\" in \"#s\" using raf { at 0s..1s { log(\"hi\"); } }").unwrap();

        let args = CliArgs::parse_from(["eligianc", input.to_str().unwrap()]);
        let code = run_once(&args);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(args.output_path().exists());
    }

    #[test]
    fn missing_input_file_exits_with_io_error() {
        let args = CliArgs::parse_from(["eligianc", "/definitely/not/a/real/path.eligian"]);
        assert_eq!(run_once(&args), EXIT_IO_ERROR);
    }
}
