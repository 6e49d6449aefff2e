//! The full parse → resolve → validate → fold → transform → optimize → emit
//! pipeline (spec §4, §5), driven by a single [`Workspace`] so library
//! imports, asset imports, and cancellation all share one file-system
//! provider.

use crate::loader::{load_document_assets, LoadError};
use eligian_assets::AssetRegistries;
use eligian_common::position::SourceLocation;
use eligian_common::{Diagnostic, DiagnosticCode, LineMap, TransformErrorKind};
use eligian_ir::{build_constant_map, optimize, transform_library, transform_program, ConstFoldError, TransformContext};
use eligian_validator::{validate_document, ValidationContext};
use eligian_workspace::{CancellationToken, Document, DocumentKind, FileSystemProvider, Workspace};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { optimize: true }
    }
}

/// Result of one [`compile`] call. `json` is only populated when no
/// `Error`-severity diagnostic was produced (spec §4.9 open question);
/// `diagnostics` always carries everything, so editor tooling sees warnings
/// and suggestions even on a successful compile.
#[derive(Debug)]
pub struct CompileOutcome {
    pub json: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutcome {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read entry file '{path}': {source}")]
    EntryFileRead { path: String, source: std::io::Error },
    #[error(transparent)]
    Asset(#[from] LoadError),
    #[error(transparent)]
    Emit(#[from] eligian_emitter::EmitError),
}

/// Compiles the document at `entry_uri`, resolving its library and asset
/// imports through `provider`. Transform always runs, even when parsing or
/// validation already produced errors, so a caller feeding the LSP still
/// gets whatever IR is reachable; only JSON emission is gated on there being
/// no `Error`-severity diagnostic.
#[instrument(skip(provider, options, token))]
pub fn compile(entry_uri: &str, provider: Box<dyn FileSystemProvider>, options: &CompileOptions, token: &CancellationToken) -> Result<CompileOutcome, CoreError> {
    let mut workspace = Workspace::new(provider);
    let entry_path = Path::new(entry_uri);
    let text = workspace
        .read_asset(entry_path)
        .map_err(|source| CoreError::EntryFileRead { path: entry_uri.to_string(), source })?;

    workspace.update(entry_uri, text);

    let mut diagnostics = Vec::new();
    let Some(doc) = workspace.get(entry_uri) else {
        return Ok(CompileOutcome { json: None, diagnostics });
    };
    diagnostics.extend(doc.diagnostics.clone());

    let program = match doc.kind() {
        // Parsing failed; the diagnostic is already on `doc.diagnostics`.
        None => return Ok(CompileOutcome { json: None, diagnostics }),
        Some(DocumentKind::Library) => {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::Transform(TransformErrorKind::InvalidImport),
                entry_uri,
                SourceLocation::default(),
                "the entry file must be a program, not a library",
            ));
            return Ok(CompileOutcome { json: None, diagnostics });
        }
        Some(DocumentKind::Program) => doc.as_program().expect("DocumentKind::Program implies as_program() is Some"),
    };

    let mut assets = AssetRegistries::new();
    let asset_contents = load_document_assets(entry_uri, program, &workspace, &mut assets)?;

    let validation_ctx = ValidationContext::new(doc, workspace.index(), &assets);
    diagnostics.extend(validate_document(&validation_ctx));

    if token.is_cancelled() {
        info!(entry_uri, "compile cancelled before transform, superseded by a newer edit");
        return Ok(CompileOutcome { json: None, diagnostics });
    }

    let (constants, fold_errors) = build_constant_map(program);
    diagnostics.extend(fold_errors.iter().map(|e| const_fold_diagnostic(doc, e)));

    let transform_ctx = TransformContext::new(doc, workspace.index(), &assets, &constants, &asset_contents);
    let (mut ir, transform_diags) = transform_program(program, &transform_ctx, compiled_at_stamp(), Some(entry_uri.to_string()));
    diagnostics.extend(transform_diags);

    // Library imports nest (spec §3 invariant 5: a program importing A, where
    // A itself imports B, pulls in both A's and B's actions), so this walks
    // the whole import graph reachable from the entry document, not just its
    // direct imports. `visited` guards against a library reachable through
    // two different paths being lowered (and its diagnostics reported) twice.
    let mut visited = std::collections::HashSet::new();
    let mut queue: std::collections::VecDeque<String> = doc.imports.iter().filter_map(|edge| edge.resolved_uri.clone()).collect();
    while let Some(lib_uri) = queue.pop_front() {
        if !visited.insert(lib_uri.clone()) {
            continue;
        }
        let Some(lib_doc) = workspace.get(&lib_uri) else { continue };
        let Some(library) = lib_doc.as_library() else { continue };
        let lib_ctx = TransformContext::new(lib_doc, workspace.index(), &assets, &constants, &asset_contents);
        let (lib_actions, lib_diags) = transform_library(library, &lib_ctx);
        ir.actions.extend(lib_actions);
        diagnostics.extend(lib_diags);
        queue.extend(lib_doc.imports.iter().filter_map(|edge| edge.resolved_uri.clone()));
    }

    if options.optimize {
        ir = optimize(ir);
    }

    let json = if diagnostics.iter().any(Diagnostic::is_error) { None } else { Some(eligian_emitter::emit(&ir)?) };

    Ok(CompileOutcome { json, diagnostics })
}

fn const_fold_diagnostic(doc: &Document, error: &ConstFoldError) -> Diagnostic {
    let line_map = LineMap::build(&doc.text);
    let location = line_map.offset_to_location(error.span().start, error.span().len());
    let code = match error {
        ConstFoldError::CircularDependency { .. } => DiagnosticCode::CircularDependency,
        ConstFoldError::DivisionByZero { .. } => DiagnosticCode::Transform(TransformErrorKind::InvalidExpression),
    };
    Diagnostic::error(code, doc.uri.clone(), location, error.to_string())
}

/// A fixed placeholder timestamp: `eligian-core` has no clock dependency,
/// and `metadata.compiledAt` is for humans reading the JSON, not something
/// the compiler itself reasons about or that affects emitted behavior.
fn compiled_at_stamp() -> String {
    "1970-01-01T00:00:00Z".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_workspace::InMemoryFileSystemProvider;

    fn provider_with(files: &[(&str, &str)]) -> Box<InMemoryFileSystemProvider> {
        let fs = InMemoryFileSystemProvider::new();
        for (path, contents) in files {
            fs.set_file(*path, *contents);
        }
        Box::new(fs)
    }

    #[test]
    fn compiles_a_minimal_program_to_json() {
        let fs = provider_with(&[("main.eligian", "timeline \"t\" in \"#s\" using raf { at 0s..1s { log(\"hi\"); } }")]);
        let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
        assert!(!outcome.has_errors());
        assert!(outcome.json.is_some());
        let json = outcome.json.unwrap();
        assert_eq!(json["timelines"][0]["timelineActions"][0]["startOperations"][0]["systemName"], "log");
    }

    #[test]
    fn suppresses_emission_when_a_selector_is_unresolvable() {
        let fs = provider_with(&[(
            "main.eligian",
            "styles \"main.css\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".missing\"); } }",
        ), ("main.css", ".present { color: red; }")]);
        let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
        assert!(outcome.has_errors());
        assert!(outcome.json.is_none());
    }

    #[test]
    fn merges_imported_library_actions() {
        let fs = provider_with(&[
            ("libs/a.eligian", "library a\naction noop() { log(\"lib\"); }"),
            (
                "main.eligian",
                "import { noop } from \"./libs/a.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { noop(); } }",
            ),
        ]);
        let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
        assert!(!outcome.has_errors());
        let json = outcome.json.unwrap();
        assert!(json["actions"].as_array().unwrap().iter().any(|a| a["name"] == "noop"));
    }

    #[test]
    fn a_cancelled_token_skips_transform_and_emission() {
        let fs = provider_with(&[("main.eligian", "timeline \"t\" in \"#s\" using raf { at 0s..1s { log(\"hi\"); } }")]);
        let token = CancellationToken::new();
        token.cancel();
        let outcome = compile("main.eligian", fs, &CompileOptions::default(), &token).unwrap();
        assert!(outcome.json.is_none());
    }
}
