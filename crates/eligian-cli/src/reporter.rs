//! Renders diagnostics to stderr, either as the human-readable
//! `file:line:col: message` block with a source snippet (spec §9 ambient
//! stack), or as a JSON array when `--diagnostics-format json` is set.

use crate::args::DiagnosticsFormat;
use colored::Colorize;
use eligian_common::{Diagnostic, Severity};
use std::collections::HashMap;

pub fn report(diagnostics: &[Diagnostic], sources: &HashMap<String, String>, format: DiagnosticsFormat) {
    match format {
        DiagnosticsFormat::Human => report_human(diagnostics, sources),
        DiagnosticsFormat::Json => report_json(diagnostics),
    }
}

fn report_human(diagnostics: &[Diagnostic], sources: &HashMap<String, String>) {
    for diagnostic in diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Suggestion => "suggestion".cyan().bold(),
            Severity::Message => "note".normal().bold(),
        };
        eprintln!(
            "{}:{}:{}: {} [{}]: {}",
            diagnostic.file,
            diagnostic.location.line,
            diagnostic.location.column,
            severity,
            diagnostic.code.code_str(),
            diagnostic.message
        );

        if let Some(source) = sources.get(&diagnostic.file) {
            if let Some(line) = source.lines().nth(diagnostic.location.line.saturating_sub(1) as usize) {
                let caret_column = diagnostic.location.column.saturating_sub(1) as usize;
                eprintln!("  {line}");
                eprintln!("  {}{}", " ".repeat(caret_column), "^".red());
            }
        }

        if let Some(hint) = &diagnostic.hint {
            eprintln!("  {} {hint}", "hint:".cyan());
        }
    }
}

fn report_json(diagnostics: &[Diagnostic]) {
    match serde_json::to_string(diagnostics) {
        Ok(json) => eprintln!("{json}"),
        Err(e) => eprintln!("failed to serialize diagnostics: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_common::{DiagnosticCode, ValidationErrorKind};
    use eligian_common::position::SourceLocation;

    #[test]
    fn human_format_does_not_panic_without_source() {
        let diagnostics = vec![Diagnostic::error(
            DiagnosticCode::Validation(ValidationErrorKind::ActionNotDefined),
            "main.eligian",
            SourceLocation::new(3, 5, Some(4)),
            "'foo' is not a known action",
        )];
        report(&diagnostics, &HashMap::new(), DiagnosticsFormat::Human);
    }
}
