//! Command-line surface for `eligianc` (spec §1, §9).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compiles an Eligian source file into an `IEngineConfiguration` JSON file.
#[derive(Parser, Debug)]
#[command(name = "eligianc", version, about = "Compiles an .eligian source file into an Eligius engine configuration")]
pub struct CliArgs {
    /// The entry .eligian file to compile.
    pub input: PathBuf,

    /// Where to write the compiled JSON. Defaults to the input path with a
    /// `.json` extension.
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Run the dead-code-elimination optimizer over the IR before emitting.
    #[arg(long)]
    pub optimize: bool,

    /// Write pretty-printed JSON instead of minified output.
    #[arg(long = "no-minify")]
    pub no_minify: bool,

    /// Recompile whenever the entry file or any file it imports changes.
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Print per-stage timing to stderr after each compile.
    #[arg(long)]
    pub trace: bool,

    /// Shape of diagnostics printed to stderr.
    #[arg(long = "diagnostics-format", value_enum, default_value = "human")]
    pub diagnostics_format: DiagnosticsFormat,

    /// Suppress informational logging; only diagnostics and errors print.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticsFormat {
    Human,
    Json,
}

impl CliArgs {
    /// The path `--out` resolves to when not given explicitly: the input
    /// path with its extension replaced by `.json`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| self.input.with_extension("json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn output_path_defaults_to_json_sibling() {
        let args = CliArgs::parse_from(["eligianc", "show.eligian"]);
        assert_eq!(args.output_path(), PathBuf::from("show.json"));
    }

    #[test]
    fn explicit_out_wins_over_the_default() {
        let args = CliArgs::parse_from(["eligianc", "show.eligian", "-o", "dist/show.json"]);
        assert_eq!(args.output_path(), PathBuf::from("dist/show.json"));
    }
}
