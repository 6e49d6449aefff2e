//! Default asset import rules: one import per asset kind, extension/`as`
//! consistency (spec §3 invariant 9, §4.5).

use crate::context::ValidationContext;
use eligian_common::{Diagnostic, DiagnosticCode, Severity, ValidationErrorKind};
use eligian_parser::ast::{AssetKind, DefaultImportStmt};
use rustc_hash::FxHashMap;

fn extension_of(path: &str) -> Option<&str> {
    path.rsplit_once('.').map(|(_, ext)| ext)
}

/// Extensions unambiguously implying a kind, keyed by the kind they satisfy
/// without needing an explicit `as` clause.
fn matches_kind_without_as(kind: AssetKind, ext: &str) -> bool {
    match kind {
        AssetKind::Styles => ext.eq_ignore_ascii_case("css"),
        AssetKind::Layout => ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"),
        AssetKind::Locales => ext.eq_ignore_ascii_case("json"),
        AssetKind::Provider => ext.eq_ignore_ascii_case("js") || ext.eq_ignore_ascii_case("mjs"),
    }
}

/// Extensions that are ambiguous (exist for more than one kind) and so
/// always require an explicit `as <type>` clause, regardless of kind.
fn is_ambiguous_extension(ext: &str) -> bool {
    matches!(ext.to_ascii_lowercase().as_str(), "ogg" | "xml" | "txt")
}

#[must_use]
pub fn check_default_imports(ctx: &ValidationContext, imports: &[&DefaultImportStmt]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: FxHashMap<AssetKindKey, eligian_common::Span> = FxHashMap::default();

    for import in imports {
        let key = AssetKindKey(import.kind);
        if let Some(&first_span) = seen.get(&key) {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::DuplicateDefinition),
                    &ctx.doc.uri,
                    ctx.location(import.span),
                    "only one default import is allowed per asset kind".to_string(),
                )
                .with_hint(format!("first declared at {}", ctx.line_map.offset_to_position(first_span.start))),
            );
        } else {
            seen.insert(key, import.span);
        }

        let Some(ext) = extension_of(&import.path) else {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
                &ctx.doc.uri,
                ctx.location(import.path_span),
                format!("'{}' has no file extension; add an 'as <type>' clause", import.path),
            ));
            continue;
        };

        match &import.as_type {
            Some(as_type) => {
                if matches_kind_without_as(import.kind, ext) && !is_ambiguous_extension(ext) && ext != as_type {
                    diagnostics.push(Diagnostic::new(
                        Severity::Warning,
                        DiagnosticCode::Validation(ValidationErrorKind::ValidActionType),
                        &ctx.doc.uri,
                        ctx.location(import.path_span),
                        format!("'as {as_type}' does not match the file extension '.{ext}'"),
                    ));
                }
            }
            None if is_ambiguous_extension(ext) => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
                    &ctx.doc.uri,
                    ctx.location(import.path_span),
                    format!("'.{ext}' is ambiguous; add an 'as <type>' clause"),
                ));
            }
            None if !matches_kind_without_as(import.kind, ext) => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
                    &ctx.doc.uri,
                    ctx.location(import.path_span),
                    format!("'.{ext}' is not a recognized extension for this import kind; add an 'as <type>' clause"),
                ));
            }
            None => {}
        }
    }

    diagnostics
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct AssetKindKey(AssetKind);

impl std::hash::Hash for AssetKindKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let discriminant: u8 = match self.0 {
            AssetKind::Styles => 0,
            AssetKind::Layout => 1,
            AssetKind::Provider => 2,
            AssetKind::Locales => 3,
        };
        discriminant.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_assets::AssetRegistries;
    use eligian_workspace::{Document, IndexManager};

    fn imports_from(src: &str) -> (Document, Vec<DefaultImportStmt>) {
        let mut doc = Document::new("main.eligian", src.to_string());
        let ast = eligian_parser::parse(src).unwrap();
        let imports = match &ast {
            eligian_parser::Document::Program(p) => p.default_imports().cloned().collect(),
            eligian_parser::Document::Library(_) => panic!("expected program"),
        };
        doc.ast = Some(ast);
        (doc, imports)
    }

    #[test]
    fn flags_duplicate_kind() {
        let (doc, imports) = imports_from(
            "styles \"a.css\"\nstyles \"b.css\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }",
        );
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let refs: Vec<&DefaultImportStmt> = imports.iter().collect();
        let diagnostics = check_default_imports(&ctx, &refs);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::DuplicateDefinition)));
    }

    #[test]
    fn flags_ambiguous_extension_without_as() {
        let (doc, imports) = imports_from(
            "provider \"a.ogg\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }",
        );
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let refs: Vec<&DefaultImportStmt> = imports.iter().collect();
        let diagnostics = check_default_imports(&ctx, &refs);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField)));
    }
}
