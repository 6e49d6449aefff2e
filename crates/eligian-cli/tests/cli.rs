//! Black-box coverage of the `eligianc` driver: real files on disk, no
//! in-memory provider shortcuts.

use eligian_cli::args::{CliArgs, DiagnosticsFormat};
use eligian_cli::driver::{self, EXIT_DIAGNOSTIC_ERROR, EXIT_IO_ERROR, EXIT_SUCCESS};
use clap::Parser;

#[test]
fn compiles_with_a_library_import_and_writes_minified_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("animations.eligian"),
        "library animations\naction fadeIn(selector, duration) { selectElement(selector); }",
    )
    .unwrap();
    let main = dir.path().join("main.eligian");
    std::fs::write(
        &main,
        "import { fadeIn } from \"./animations.eligian\"\n\
         timeline \"t\" in \"#s\" using raf { at 0s..1s { fadeIn(\"#el\", 1000); } }",
    )
    .unwrap();

    let args = CliArgs::parse_from(["eligianc", main.to_str().unwrap()]);
    assert_eq!(driver::run_once(&args), EXIT_SUCCESS);

    let out = std::fs::read_to_string(args.output_path()).unwrap();
    assert!(out.contains("\"requestAction\""));
    assert!(!out.contains('\n'), "default output should be minified");
}

#[test]
fn invalid_css_selector_exits_with_diagnostic_error_and_skips_output() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.eligian");
    std::fs::write(&main, "timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".button[\"); } }").unwrap();

    let args = CliArgs::parse_from(["eligianc", main.to_str().unwrap(), "--diagnostics-format", "json"]);
    assert_eq!(driver::run_once(&args), EXIT_DIAGNOSTIC_ERROR);
    assert!(!args.output_path().exists());
    assert_eq!(args.diagnostics_format, DiagnosticsFormat::Json);
}

#[test]
fn no_minify_writes_pretty_printed_output() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.eligian");
    std::fs::write(&main, "timeline \"t\" in \"#s\" using raf { at 0s..1s { log(\"hi\"); } }").unwrap();

    let args = CliArgs::parse_from(["eligianc", main.to_str().unwrap(), "--no-minify"]);
    assert_eq!(driver::run_once(&args), EXIT_SUCCESS);
    let out = std::fs::read_to_string(args.output_path()).unwrap();
    assert!(out.contains('\n'), "--no-minify output should be pretty-printed");
}

#[test]
fn missing_entry_file_exits_with_io_error_before_any_output_write() {
    let args = CliArgs::parse_from(["eligianc", "/no/such/file.eligian"]);
    assert_eq!(driver::run_once(&args), EXIT_IO_ERROR);
}
