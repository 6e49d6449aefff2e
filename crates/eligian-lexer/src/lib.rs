//! Tokenizer for the Eligian DSL (spec §4.1).

pub mod lexer;
pub mod syntax_kind;
pub mod token;

pub use lexer::{LexError, Lexer};
pub use syntax_kind::SyntaxKind;
pub use token::Token;
