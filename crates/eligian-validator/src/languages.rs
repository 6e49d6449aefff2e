//! `languages { ... }` block rules (spec §3 invariant 6, §4.5).

use crate::context::ValidationContext;
use eligian_common::{Diagnostic, DiagnosticCode, ValidationErrorKind};
use eligian_parser::ast::LanguagesBlock;
use rustc_hash::FxHashMap;

fn is_valid_code(code: &str) -> bool {
    let Some((lang, region)) = code.split_once('-') else { return false };
    lang.len() == 2
        && lang.bytes().all(|b| b.is_ascii_lowercase())
        && region.len() == 2
        && region.bytes().all(|b| b.is_ascii_uppercase())
}

#[must_use]
pub fn check_languages(ctx: &ValidationContext, block: &LanguagesBlock) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: FxHashMap<&str, eligian_common::Span> = FxHashMap::default();
    let mut default_count = 0usize;

    for entry in &block.languages {
        if !is_valid_code(&entry.code) {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
                &ctx.doc.uri,
                ctx.location(entry.span),
                format!("'{}' is not a valid language code, expected format 'xx-XX'", entry.code),
            ));
        }

        if let Some(&first_span) = seen.get(entry.code.as_str()) {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::DuplicateDefinition),
                    &ctx.doc.uri,
                    ctx.location(entry.span),
                    format!("language '{}' is already declared", entry.code),
                )
                .with_hint(format!("first declared at {}", ctx.line_map.offset_to_position(first_span.start))),
            );
        } else {
            seen.insert(&entry.code, entry.span);
        }

        if entry.is_default {
            default_count += 1;
        }
    }

    if block.languages.len() > 1 && default_count != 1 {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
            &ctx.doc.uri,
            ctx.location(block.span),
            format!(
                "exactly one language must be marked default when multiple languages are declared, found {default_count}"
            ),
        ));
    }

    diagnostics
}
