//! `SyntaxKind` — every token the Eligian grammar recognizes (spec §4.1).

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    // Literals
    Identifier,
    StringLiteral,
    NumberLiteral,
    /// A number immediately followed by `s` or `ms`, e.g. `1.5s`, `200ms`.
    TimeLiteral,

    // Variable / system references
    /// `@name`
    VariableRef,
    /// `@@name`
    SystemRef,
    /// `$globalData.x.y` — lexed as one token, the path is split by the parser.
    GlobalDataPath,

    // Keywords
    KwLibrary,
    KwTimeline,
    KwUsing,
    KwIn,
    KwAction,
    KwEvent,
    KwOn,
    KwTopic,
    KwConst,
    KwIf,
    KwElse,
    KwFor,
    KwBreak,
    KwContinue,
    KwPrivate,
    KwImport,
    KwFrom,
    KwAs,
    KwLanguages,
    KwDefault,
    KwSequence,
    KwStagger,
    KwItems,
    KwWith,
    KwAt,
    KwTrue,
    KwFalse,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    DotDot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    AmpAmp,
    PipePipe,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Bang,
    Eq,

    EndOfFile,
    /// Emitted for any byte sequence the lexer cannot classify; the parser
    /// turns this into a `ParseError` rather than panicking.
    Unknown,
}

impl SyntaxKind {
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "library" => SyntaxKind::KwLibrary,
            "timeline" => SyntaxKind::KwTimeline,
            "using" => SyntaxKind::KwUsing,
            "in" => SyntaxKind::KwIn,
            "action" => SyntaxKind::KwAction,
            "event" => SyntaxKind::KwEvent,
            "on" => SyntaxKind::KwOn,
            "topic" => SyntaxKind::KwTopic,
            "const" => SyntaxKind::KwConst,
            "if" => SyntaxKind::KwIf,
            "else" => SyntaxKind::KwElse,
            "for" => SyntaxKind::KwFor,
            "break" => SyntaxKind::KwBreak,
            "continue" => SyntaxKind::KwContinue,
            "private" => SyntaxKind::KwPrivate,
            "import" => SyntaxKind::KwImport,
            "from" => SyntaxKind::KwFrom,
            "as" => SyntaxKind::KwAs,
            "languages" => SyntaxKind::KwLanguages,
            "default" => SyntaxKind::KwDefault,
            "sequence" => SyntaxKind::KwSequence,
            "stagger" => SyntaxKind::KwStagger,
            "items" => SyntaxKind::KwItems,
            "with" => SyntaxKind::KwWith,
            "at" => SyntaxKind::KwAt,
            "true" => SyntaxKind::KwTrue,
            "false" => SyntaxKind::KwFalse,
            _ => return None,
        })
    }

    #[must_use]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::KwLibrary
                | SyntaxKind::KwTimeline
                | SyntaxKind::KwUsing
                | SyntaxKind::KwIn
                | SyntaxKind::KwAction
                | SyntaxKind::KwEvent
                | SyntaxKind::KwOn
                | SyntaxKind::KwTopic
                | SyntaxKind::KwConst
                | SyntaxKind::KwIf
                | SyntaxKind::KwElse
                | SyntaxKind::KwFor
                | SyntaxKind::KwBreak
                | SyntaxKind::KwContinue
                | SyntaxKind::KwPrivate
                | SyntaxKind::KwImport
                | SyntaxKind::KwFrom
                | SyntaxKind::KwAs
                | SyntaxKind::KwLanguages
                | SyntaxKind::KwDefault
                | SyntaxKind::KwSequence
                | SyntaxKind::KwStagger
                | SyntaxKind::KwItems
                | SyntaxKind::KwWith
                | SyntaxKind::KwAt
                | SyntaxKind::KwTrue
                | SyntaxKind::KwFalse
        )
    }
}
