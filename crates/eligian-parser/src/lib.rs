//! AST and recursive-descent parser for the Eligian DSL (spec §4.1).

pub mod ast;
pub mod parser;

pub use ast::Document;
pub use parser::{unescape_string, Parser};

use eligian_common::error::ParseError;

/// Parse a single document's source text.
///
/// This is the crate's sole entry point; [`Parser`] itself is exposed for
/// callers (the workspace loader, the LSP) that want to reuse the tokenizer
/// pass separately.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::parse_document(source)
}
