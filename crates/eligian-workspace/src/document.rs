//! A single source file tracked by the workspace (spec §3: "Document").

use eligian_common::Diagnostic;
use eligian_parser::ast;
use serde::{Deserialize, Serialize};

/// One resolved or unresolved import edge discovered while parsing a
/// document, kept around so the workspace can re-trigger builds when the
/// target changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportEdge {
    pub raw_path: String,
    pub resolved_uri: Option<String>,
    pub imported_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Program,
    Library,
}

/// A unit of source text identified by an absolute URI (spec §3). Owned
/// exclusively by the [`crate::workspace::Workspace`]; callers only ever hold
/// the URI string.
#[derive(Clone, Debug)]
pub struct Document {
    pub uri: String,
    pub text: String,
    pub version: u64,
    pub ast: Option<ast::Document>,
    pub diagnostics: Vec<Diagnostic>,
    pub imports: Vec<ImportEdge>,
}

impl Document {
    #[must_use]
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self { uri: uri.into(), text: text.into(), version: 0, ast: None, diagnostics: Vec::new(), imports: Vec::new() }
    }

    #[must_use]
    pub fn kind(&self) -> Option<DocumentKind> {
        match self.ast.as_ref()? {
            ast::Document::Program(_) => Some(DocumentKind::Program),
            ast::Document::Library(_) => Some(DocumentKind::Library),
        }
    }

    #[must_use]
    pub fn as_program(&self) -> Option<&ast::Program> {
        match self.ast.as_ref()? {
            ast::Document::Program(p) => Some(p),
            ast::Document::Library(_) => None,
        }
    }

    #[must_use]
    pub fn as_library(&self) -> Option<&ast::Library> {
        match self.ast.as_ref()? {
            ast::Document::Library(l) => Some(l),
            ast::Document::Program(_) => None,
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(eligian_common::Diagnostic::is_error)
    }
}
