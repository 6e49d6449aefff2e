//! Cross-document symbol references (spec §9: "never hold a raw pointer into
//! another document's AST").

use eligian_parser::ast::{Param, Visibility};
use serde::{Deserialize, Serialize};

/// An action exported by a document, as seen from outside (spec §4.2: "From a
/// `Library`: the library node and all its action definitions").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportedAction {
    pub name: String,
    pub params: Vec<Param>,
    pub visibility: Visibility,
    /// The document that owns this definition, distinct from the document
    /// the export entry is filed under (nested library re-exports carry the
    /// original definer through).
    pub defining_doc_uri: String,
}
