//! Wires the parser, workspace, validator, and IR crates into one pipeline:
//! parse -> resolve imports -> load assets -> validate -> fold constants ->
//! transform -> optimize -> emit (spec §4, §5). The CLI binary is a thin
//! wrapper over [`compile`]; an editor integration calling the `eligian-lsp`
//! query functions would drive this crate the same way.

pub mod loader;
pub mod pipeline;

pub use loader::{load_document_assets, LoadError};
pub use pipeline::{compile, CompileOptions, CompileOutcome, CoreError};
