//! The workspace: owns documents, drives the parse → link pipeline, and
//! resolves library imports (spec §4.2, §5).

use crate::cancellation::CancellationToken;
use crate::document::{Document, ImportEdge};
use crate::fs_provider::FileSystemProvider;
use crate::index::IndexManager;
use eligian_common::limits::MAX_IMPORT_DEPTH;
use eligian_common::position::SourceLocation;
use eligian_common::{Diagnostic, DiagnosticCode, LineMap};
use eligian_parser::ast;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The workspace owns every open document plus the shared cross-document
/// index (spec §3: "The workspace exclusively owns documents").
pub struct Workspace {
    documents: FxHashMap<String, Document>,
    provider: Box<dyn FileSystemProvider>,
    index: IndexManager,
    builds: FxHashMap<String, CancellationToken>,
}

impl Workspace {
    #[must_use]
    pub fn new(provider: Box<dyn FileSystemProvider>) -> Self {
        Self { documents: FxHashMap::default(), provider, index: IndexManager::new(), builds: FxHashMap::default() }
    }

    #[must_use]
    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    #[must_use]
    pub fn index(&self) -> &IndexManager {
        &self.index
    }

    /// Reads an asset file (CSS/HTML/locales) through the same provider that
    /// resolves library imports, so a facade loading asset text for the
    /// transform stage never needs a second file-system handle (spec §4.2:
    /// the `FileSystemProvider` trait already covers "resolve library
    /// imports and load asset files").
    pub fn read_asset(&self, path: &Path) -> std::io::Result<String> {
        self.provider.read_file(path)
    }

    /// Create or overwrite a document's text and rebuild it (spec §3: "mutated
    /// only through `update(uri, text)`"). Any build already in flight for
    /// this document is cancelled first, since its result is now stale.
    pub fn update(&mut self, uri: &str, text: String) -> &Document {
        self.cancel(uri);
        let version = self.documents.get(uri).map_or(0, |d| d.version) + 1;
        let mut doc = Document::new(uri, text);
        doc.version = version;
        self.documents.insert(uri.to_string(), doc);
        let token = CancellationToken::new();
        self.builds.insert(uri.to_string(), token.clone());
        self.build(uri, 0, &token);
        self.builds.remove(uri);
        self.documents.get(uri).expect("just inserted")
    }

    /// Cancel the build in flight for `uri`, if any (spec §5). A `--watch`
    /// loop calls this when a newer file-change event makes an already
    /// in-progress build (still walking nested library imports) stale.
    /// Returns whether a build was actually cancelled.
    pub fn cancel(&mut self, uri: &str) -> bool {
        match self.builds.remove(uri) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Drop a document and its exports; a later `update` rebuilds it fresh.
    pub fn invalidate(&mut self, uri: &str) {
        self.cancel(uri);
        self.documents.remove(uri);
        self.index.remove(uri);
    }

    fn build(&mut self, uri: &str, depth: usize, token: &CancellationToken) {
        self.build_with_stack(uri, depth, &mut Vec::new(), token);
    }

    fn build_with_stack(&mut self, uri: &str, depth: usize, in_progress: &mut Vec<String>, token: &CancellationToken) {
        if token.is_cancelled() {
            debug!(uri, "build cancelled, superseded by a newer edit");
            return;
        }
        if depth > MAX_IMPORT_DEPTH {
            self.push_diagnostic(uri, Diagnostic::error(
                DiagnosticCode::CircularDependency,
                uri,
                SourceLocation::new(1, 1, None),
                format!("import depth exceeds the maximum of {MAX_IMPORT_DEPTH}"),
            ));
            return;
        }

        let text = match self.documents.get(uri) {
            Some(d) => d.text.clone(),
            None => return,
        };

        let parse_result = eligian_parser::parse(&text);
        let mut diagnostics = Vec::new();
        let ast = match parse_result {
            Ok(ast) => Some(ast),
            Err(err) => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::Parse,
                    uri,
                    err.location,
                    format_parse_error(&err),
                ));
                None
            }
        };

        if let Some(doc) = self.documents.get_mut(uri) {
            doc.ast = ast.clone();
            doc.diagnostics = diagnostics;
        }

        let Some(ast) = ast else { return };
        self.index.register(uri, &ast);
        let line_map = LineMap::build(&text);

        let named_imports: Vec<ast::NamedImportStmt> = match &ast {
            ast::Document::Program(p) => p.named_imports().cloned().collect(),
            ast::Document::Library(l) => l.imports.clone(),
        };

        let mut edges = Vec::new();
        in_progress.push(uri.to_string());
        for import in &named_imports {
            if token.is_cancelled() {
                debug!(uri, "build cancelled mid-import-walk, superseded by a newer edit");
                in_progress.pop();
                return;
            }
            let resolved_uri = resolve_import_path(uri, &import.path);
            let resolved_str = resolved_uri.to_string_lossy().to_string();

            if in_progress.contains(&resolved_str) {
                self.push_diagnostic(uri, Diagnostic::error(
                    DiagnosticCode::CircularDependency,
                    uri,
                    SourceLocation::new(1, 1, None),
                    format!("circular library import: {resolved_str}"),
                ));
                edges.push(ImportEdge {
                    raw_path: import.path.clone(),
                    resolved_uri: None,
                    imported_names: import.names.iter().map(|n| n.name.clone()).collect(),
                });
                continue;
            }

            if !self.documents.contains_key(&resolved_str) {
                match self.provider.read_file(&resolved_uri) {
                    Ok(contents) => {
                        self.documents.insert(resolved_str.clone(), Document::new(resolved_str.clone(), contents));
                        self.build_with_stack(&resolved_str, depth + 1, in_progress, token);
                    }
                    Err(e) => {
                        warn!(path = %resolved_str, error = %e, "failed to load library import");
                        self.push_diagnostic(uri, Diagnostic::error(
                            DiagnosticCode::FileNotFound,
                            uri,
                            line_map.offset_to_location(import.path_span.start, import.path_span.len()),
                            format!("cannot find library '{}'", import.path),
                        ));
                        edges.push(ImportEdge {
                            raw_path: import.path.clone(),
                            resolved_uri: None,
                            imported_names: import.names.iter().map(|n| n.name.clone()).collect(),
                        });
                        continue;
                    }
                }
            }

            debug!(from = uri, to = %resolved_str, "resolved library import");
            edges.push(ImportEdge {
                raw_path: import.path.clone(),
                resolved_uri: Some(resolved_str),
                imported_names: import.names.iter().map(|n| n.name.clone()).collect(),
            });
        }
        in_progress.pop();

        if let Some(doc) = self.documents.get_mut(uri) {
            doc.imports = edges;
        }
    }

    fn push_diagnostic(&mut self, uri: &str, diagnostic: Diagnostic) {
        if let Some(doc) = self.documents.get_mut(uri) {
            doc.diagnostics.push(diagnostic);
        }
    }
}

impl ast::NamedImportStmt {
    fn path_span_location(&self) -> SourceLocation {
        SourceLocation::new(1, 1, Some(self.path.len() as u32))
    }
}

fn format_parse_error(err: &eligian_common::error::ParseError) -> String {
    match (&err.expected, &err.actual) {
        (Some(expected), Some(actual)) => format!("expected {expected}, found {actual}"),
        (Some(expected), None) => format!("expected {expected}"),
        _ => "syntax error".to_string(),
    }
}

/// Resolve an import path relative to the importing file's directory.
/// Parent-directory traversal (`../`) is permitted (spec §4.2).
fn resolve_import_path(importer_uri: &str, raw_path: &str) -> PathBuf {
    let base = Path::new(importer_uri).parent().unwrap_or_else(|| Path::new(""));
    normalize(&base.join(raw_path))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::ParentDir => {
                out.pop();
            }
            std::path::Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_provider::InMemoryFileSystemProvider;

    fn provider_with(files: &[(&str, &str)]) -> Box<InMemoryFileSystemProvider> {
        let fs = InMemoryFileSystemProvider::new();
        for (path, contents) in files {
            fs.set_file(*path, *contents);
        }
        Box::new(fs)
    }

    #[test]
    fn resolves_single_library_import() {
        let fs = provider_with(&[("libs/animations.eligian", "library animations\naction fadeIn(selector) { log(selector); }")]);
        let mut ws = Workspace::new(fs);
        ws.update(
            "main.eligian",
            "import { fadeIn } from \"./libs/animations.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { fadeIn(\".x\"); } }".to_string(),
        );
        let main = ws.get("main.eligian").unwrap();
        assert!(!main.has_errors());
        assert_eq!(main.imports[0].resolved_uri.as_deref(), Some("libs/animations.eligian"));
        assert!(ws.index().find_action("libs/animations.eligian", "fadeIn").is_some());
    }

    #[test]
    fn missing_library_produces_file_not_found_diagnostic() {
        let fs: Box<InMemoryFileSystemProvider> = provider_with(&[]);
        let mut ws = Workspace::new(fs);
        ws.update("main.eligian", "import { foo } from \"./missing.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }".to_string());
        let main = ws.get("main.eligian").unwrap();
        assert!(main.diagnostics.iter().any(|d| d.code == DiagnosticCode::FileNotFound));
    }

    #[test]
    fn resolves_nested_library_import() {
        let fs = provider_with(&[
            ("libs/base.eligian", "library base\naction selectAndLog(selector) { log(selector); }"),
            (
                "libs/extended.eligian",
                "library extended\nimport { selectAndLog } from \"./base.eligian\"\naction selectLogAndAnimate(selector) { selectAndLog(selector); }",
            ),
        ]);
        let mut ws = Workspace::new(fs);
        ws.update(
            "main.eligian",
            "import { selectLogAndAnimate } from \"./libs/extended.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { selectLogAndAnimate(\".x\"); } }".to_string(),
        );
        assert!(ws.index().find_action("libs/base.eligian", "selectAndLog").is_some());
        assert!(ws.index().find_action("libs/extended.eligian", "selectLogAndAnimate").is_some());
        assert!(!ws.get("main.eligian").unwrap().has_errors());
    }

    #[test]
    fn a_cancelled_build_stops_walking_imports() {
        let fs = provider_with(&[("libs/a.eligian", "library a\naction noop() { log(\"x\"); }")]);
        let mut ws = Workspace::new(fs);
        let token = CancellationToken::new();
        token.cancel();
        ws.documents.insert("main.eligian".to_string(), Document::new("main.eligian", "import { noop } from \"./libs/a.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { noop(); } }".to_string()));
        ws.build("main.eligian", 0, &token);
        assert!(ws.index().find_action("libs/a.eligian", "noop").is_none());
    }

    #[test]
    fn update_cancels_a_stale_pending_build() {
        let fs = provider_with(&[]);
        let mut ws = Workspace::new(fs);
        ws.documents.insert("main.eligian".to_string(), Document::new("main.eligian", String::new()));
        let stale = CancellationToken::new();
        ws.builds.insert("main.eligian".to_string(), stale.clone());
        ws.update("main.eligian", "timeline \"t\" in \"#s\" using raf { at 0s..1s { } }".to_string());
        assert!(stale.is_cancelled());
    }
}
