//! Reference resolution across the local AST scope chain and the global
//! index (spec §4.2: "ScopeProvider").

use crate::document::Document;
use crate::index::IndexManager;
use crate::symbol::ExportedAction;
use eligian_parser::ast;

/// Where an action name resolved from, so callers (the validator, the IR
/// transformer) can tell a same-document call apart from an imported one.
#[derive(Debug, Clone)]
pub struct ResolvedAction<'a> {
    pub action: &'a ExportedAction,
    pub doc_uri: String,
}

pub struct ScopeProvider;

impl ScopeProvider {
    /// Resolve an action name called from inside `doc`. Consults (1) the
    /// document's own top-level/library action definitions, then (2) named
    /// imports visible in the document, filtered to the local alias, with
    /// transitive resolution: importing a library composes its own imports.
    #[must_use]
    pub fn resolve_action<'a>(doc: &Document, index: &'a IndexManager, name: &str) -> Option<ResolvedAction<'a>> {
        if let Some(action) = index.find_action(&doc.uri, name) {
            return Some(ResolvedAction { action, doc_uri: doc.uri.clone() });
        }
        Self::resolve_via_imports(doc, index, name)
    }

    fn resolve_via_imports<'a>(doc: &Document, index: &'a IndexManager, name: &str) -> Option<ResolvedAction<'a>> {
        let named_imports: Vec<&ast::NamedImportStmt> = match doc.ast.as_ref()? {
            ast::Document::Program(p) => p.named_imports().collect(),
            ast::Document::Library(l) => l.imports.iter().collect(),
        };
        for import in named_imports {
            let Some(edge) = doc.imports.iter().find(|e| e.raw_path == import.path) else { continue };
            let Some(target_uri) = &edge.resolved_uri else { continue };
            for imported in &import.names {
                if imported.local_name() == name {
                    if let Some(action) = index.find_action(target_uri, &imported.name) {
                        return Some(ResolvedAction { action, doc_uri: target_uri.clone() });
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ImportEdge;
    use eligian_parser::parse;

    #[test]
    fn resolves_local_action_before_imports() {
        let mut doc = Document::new("main.eligian", "");
        doc.ast = Some(parse("action foo(x) { log(x); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { foo(1); } }").unwrap());
        let mut index = IndexManager::new();
        index.register(&doc.uri, doc.ast.as_ref().unwrap());
        let resolved = ScopeProvider::resolve_action(&doc, &index, "foo").unwrap();
        assert_eq!(resolved.doc_uri, "main.eligian");
    }

    #[test]
    fn resolves_aliased_import() {
        let mut lib = Document::new("lib.eligian", "");
        lib.ast = Some(parse("library animations\naction fadeIn(selector) { log(selector); }").unwrap());
        let mut index = IndexManager::new();
        index.register(&lib.uri, lib.ast.as_ref().unwrap());

        let mut main = Document::new("main.eligian", "");
        main.ast = Some(
            parse("import { fadeIn as fi } from \"./lib.eligian\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { fi(\".x\"); } }")
                .unwrap(),
        );
        main.imports.push(ImportEdge {
            raw_path: "./lib.eligian".to_string(),
            resolved_uri: Some("lib.eligian".to_string()),
            imported_names: vec!["fadeIn".to_string()],
        });

        let resolved = ScopeProvider::resolve_action(&main, &index, "fi").unwrap();
        assert_eq!(resolved.doc_uri, "lib.eligian");
        assert_eq!(resolved.action.name, "fadeIn");
    }
}
