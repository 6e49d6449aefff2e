use crate::syntax_kind::SyntaxKind;
use eligian_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}
