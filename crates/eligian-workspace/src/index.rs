//! The cross-document symbol index (spec §4.2: "stores every symbol a
//! document exports").

use crate::symbol::ExportedAction;
use eligian_parser::ast;
use rustc_hash::FxHashMap;

/// Everything one document exports to the rest of the workspace.
#[derive(Clone, Debug, Default)]
pub struct DocumentExports {
    pub actions: Vec<ExportedAction>,
}

/// Maps document URI to its exports. Populated after a document's AST is
/// parsed, before reference linking runs (spec §4.2).
#[derive(Debug, Default)]
pub struct IndexManager {
    exports: FxHashMap<String, DocumentExports>,
}

impl IndexManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and replace the export set for a document. From a `Program`:
    /// its top-level action definitions. From a `Library`: all its action
    /// definitions (so nested library imports can see them transitively).
    pub fn register(&mut self, doc_uri: &str, ast: &ast::Document) {
        let actions = match ast {
            ast::Document::Program(p) => p
                .actions()
                .map(|a| ExportedAction {
                    name: a.name.clone(),
                    params: a.params.clone(),
                    visibility: a.visibility,
                    defining_doc_uri: doc_uri.to_string(),
                })
                .collect(),
            ast::Document::Library(l) => l
                .actions
                .iter()
                .map(|a| ExportedAction {
                    name: a.name.clone(),
                    params: a.params.clone(),
                    visibility: a.visibility,
                    defining_doc_uri: doc_uri.to_string(),
                })
                .collect(),
        };
        self.exports.insert(doc_uri.to_string(), DocumentExports { actions });
    }

    pub fn remove(&mut self, doc_uri: &str) {
        self.exports.remove(doc_uri);
    }

    #[must_use]
    pub fn exports_of(&self, doc_uri: &str) -> Option<&DocumentExports> {
        self.exports.get(doc_uri)
    }

    /// Find a named, non-private action exported by `doc_uri` (spec §4.2's
    /// lookup used both for direct named imports and for transitive resolution
    /// when a library re-imports another library's action).
    #[must_use]
    pub fn find_action<'a>(&'a self, doc_uri: &str, name: &str) -> Option<&'a ExportedAction> {
        self.exports.get(doc_uri)?.actions.iter().find(|a| a.name == name)
    }
}
