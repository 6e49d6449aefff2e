//! Hand-written lexer for the Eligian grammar (spec §4.1).
//!
//! Mirrors the teacher's `ScannerState` shape (a cursor over the source
//! bytes exposing `scan`/`get_token_value`-style queries) but specialized
//! to Eligian's much smaller token set: no regex re-scanning, no template
//! literals, no JSX.

use crate::syntax_kind::SyntaxKind;
use crate::token::Token;
use eligian_common::error::ParseError;
use eligian_common::{LineMap, Span};
use memchr::memchr;

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: u32,
}

/// Diagnostics produced while scanning that don't abort the whole document
/// (an unterminated string still produces *a* token so the parser can
/// recover at the next statement boundary).
#[derive(Debug, Clone)]
pub struct LexError {
    pub error: ParseError,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { source, bytes: source.as_bytes(), pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos as usize).copied()
    }

    fn peek_at(&self, offset: u32) -> Option<u8> {
        self.bytes.get((self.pos + offset) as usize).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.pos += 1;
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    // line comment: skip to next newline (or EOF)
                    match memchr(b'\n', &self.bytes[self.pos as usize..]) {
                        Some(rel) => self.pos += rel as u32,
                        None => self.pos = self.bytes.len() as u32,
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.pos += 2;
                    while self.pos < self.bytes.len() as u32 {
                        if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan the next token. Returns `SyntaxKind::EndOfFile` forever once the
    /// source is exhausted, so callers can always loop `while kind !=
    /// EndOfFile`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token::new(SyntaxKind::EndOfFile, Span::at(start)));
        };

        let kind = match c {
            b'"' | b'\'' => return self.scan_string(c),
            b'0'..=b'9' => return self.scan_number(),
            b'@' => {
                self.bump();
                if self.peek() == Some(b'@') {
                    self.bump();
                    self.scan_ident_tail();
                    SyntaxKind::SystemRef
                } else {
                    self.scan_ident_tail();
                    SyntaxKind::VariableRef
                }
            }
            b'$' => {
                self.bump();
                self.scan_ident_tail();
                while self.peek() == Some(b'.') {
                    self.bump();
                    self.scan_ident_tail();
                }
                SyntaxKind::GlobalDataPath
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                self.scan_ident_tail();
                let text = &self.source[start as usize..self.pos as usize];
                return Ok(Token::new(
                    SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier),
                    Span::new(start, self.pos),
                ));
            }
            b'{' => {
                self.bump();
                SyntaxKind::LBrace
            }
            b'}' => {
                self.bump();
                SyntaxKind::RBrace
            }
            b'(' => {
                self.bump();
                SyntaxKind::LParen
            }
            b')' => {
                self.bump();
                SyntaxKind::RParen
            }
            b'[' => {
                self.bump();
                SyntaxKind::LBracket
            }
            b']' => {
                self.bump();
                SyntaxKind::RBracket
            }
            b',' => {
                self.bump();
                SyntaxKind::Comma
            }
            b';' => {
                self.bump();
                SyntaxKind::Semicolon
            }
            b':' => {
                self.bump();
                SyntaxKind::Colon
            }
            b'.' => {
                self.bump();
                if self.peek() == Some(b'.') {
                    self.bump();
                    SyntaxKind::DotDot
                } else {
                    SyntaxKind::Dot
                }
            }
            b'+' => {
                self.bump();
                SyntaxKind::Plus
            }
            b'-' => {
                self.bump();
                SyntaxKind::Minus
            }
            b'*' => {
                self.bump();
                SyntaxKind::Star
            }
            b'/' => {
                self.bump();
                SyntaxKind::Slash
            }
            b'%' => {
                self.bump();
                SyntaxKind::Percent
            }
            b'&' if self.peek_at(1) == Some(b'&') => {
                self.pos += 2;
                SyntaxKind::AmpAmp
            }
            b'|' if self.peek_at(1) == Some(b'|') => {
                self.pos += 2;
                SyntaxKind::PipePipe
            }
            b'=' if self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                SyntaxKind::EqEq
            }
            b'!' if self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                SyntaxKind::BangEq
            }
            b'<' if self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                SyntaxKind::LtEq
            }
            b'>' if self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                SyntaxKind::GtEq
            }
            b'<' => {
                self.bump();
                SyntaxKind::Lt
            }
            b'>' => {
                self.bump();
                SyntaxKind::Gt
            }
            b'!' => {
                self.bump();
                SyntaxKind::Bang
            }
            b'=' => {
                self.bump();
                SyntaxKind::Eq
            }
            _ => {
                self.bump();
                SyntaxKind::Unknown
            }
        };

        Ok(Token::new(kind, Span::new(start, self.pos)))
    }

    fn scan_ident_tail(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_string(&mut self, quote: u8) -> Result<Token, LexError> {
        let start = self.pos;
        self.bump(); // opening quote
        let mut terminated = false;
        while let Some(c) = self.peek() {
            if c == b'\\' {
                self.pos += 2;
                continue;
            }
            if c == quote {
                self.bump();
                terminated = true;
                break;
            }
            if c == b'\n' {
                break;
            }
            self.pos += 1;
        }
        if !terminated {
            let line_map = LineMap::build(self.source);
            let loc = line_map.offset_to_location(start, self.pos - start);
            return Err(LexError {
                error: ParseError::new(loc, Some("closing quote".into()), Some("end of line".into())),
            });
        }
        Ok(Token::new(SyntaxKind::StringLiteral, Span::new(start, self.pos)))
    }

    fn scan_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        // Time-literal suffix: `s` or `ms` directly abutting the number,
        // not followed by another identifier character (so `5sec` doesn't
        // get mis-lexed as a time literal).
        let kind = if self.peek() == Some(b'm') && self.peek_at(1) == Some(b's') && !ident_follows(self, 2) {
            self.pos += 2;
            SyntaxKind::TimeLiteral
        } else if self.peek() == Some(b's') && !ident_follows(self, 1) {
            self.pos += 1;
            SyntaxKind::TimeLiteral
        } else {
            SyntaxKind::NumberLiteral
        };
        Ok(Token::new(kind, Span::new(start, self.pos)))
    }
}

fn ident_follows(lexer: &Lexer<'_>, offset: u32) -> bool {
    matches!(lexer.peek_at(offset), Some(c) if c.is_ascii_alphanumeric() || c == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == SyntaxKind::EndOfFile {
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(
            kinds("timeline foo"),
            vec![SyntaxKind::KwTimeline, SyntaxKind::Identifier]
        );
    }

    #[test]
    fn lexes_time_literals() {
        assert_eq!(kinds("1.5s 200ms 5"), vec![
            SyntaxKind::TimeLiteral,
            SyntaxKind::TimeLiteral,
            SyntaxKind::NumberLiteral
        ]);
    }

    #[test]
    fn distinguishes_variable_and_system_refs() {
        assert_eq!(
            kinds("@x @@loopIndex"),
            vec![SyntaxKind::VariableRef, SyntaxKind::SystemRef]
        );
    }

    #[test]
    fn lexes_global_data_path_as_single_token() {
        let mut lexer = Lexer::new("$globalData.foo.bar");
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, SyntaxKind::GlobalDataPath);
        assert_eq!(tok.text("$globalData.foo.bar"), "$globalData.foo.bar");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Lexer::new("\"abc");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn skips_line_and_block_comments() {
        assert_eq!(kinds("// hi\nconst /* x */ A"), vec![SyntaxKind::KwConst, SyntaxKind::Identifier]);
    }

    #[test]
    fn lexes_operators() {
        assert_eq!(
            kinds("&& || == != <= >="),
            vec![
                SyntaxKind::AmpAmp,
                SyntaxKind::PipePipe,
                SyntaxKind::EqEq,
                SyntaxKind::BangEq,
                SyntaxKind::LtEq,
                SyntaxKind::GtEq
            ]
        );
    }
}
