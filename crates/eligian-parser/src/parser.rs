//! Recursive-descent parser for the Eligian grammar (spec §4.1).

use crate::ast::*;
use eligian_common::error::ParseError;
use eligian_common::{LineMap, Span};
use eligian_lexer::{Lexer, SyntaxKind, Token};

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    line_map: LineMap,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> PResult<Self> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token().map_err(|e| e.error)?;
            let is_eof = tok.kind == SyntaxKind::EndOfFile;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(Self { source, tokens, pos: 0, line_map: LineMap::build(source) })
    }

    /// Parse a full document, dispatching on whether it opens with `library`
    /// (spec §3: "Program vs Library").
    pub fn parse_document(source: &'a str) -> PResult<Document> {
        let mut parser = Parser::new(source)?;
        if parser.at(SyntaxKind::KwLibrary) {
            Ok(Document::Library(parser.parse_library()?))
        } else {
            Ok(Document::Program(parser.parse_program()?))
        }
    }

    // -- token cursor helpers -------------------------------------------------

    fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    fn kind(&self) -> SyntaxKind {
        self.current().kind
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    fn at_text(&self, text: &str) -> bool {
        self.kind() == SyntaxKind::Identifier && self.token_text(self.current()) == text
    }

    fn token_text(&self, tok: Token) -> &'a str {
        tok.text(self.source)
    }

    fn bump(&mut self) -> Token {
        let tok = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn error(&self, span: Span, expected: impl Into<String>, actual: impl Into<String>) -> ParseError {
        let loc = self.line_map.offset_to_location(span.start, span.len());
        ParseError::new(loc, Some(expected.into()), Some(actual.into()))
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            let tok = self.current();
            Err(self.error(tok.span, what, format!("{:?}", tok.kind)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> PResult<(String, Span)> {
        let tok = self.expect(SyntaxKind::Identifier, what)?;
        Ok((self.token_text(tok).to_string(), tok.span))
    }

    fn expect_string(&mut self, what: &str) -> PResult<(String, Span)> {
        let tok = self.expect(SyntaxKind::StringLiteral, what)?;
        Ok((unescape_string(self.token_text(tok)), tok.span))
    }

    /// True if the current token is an identifier with this exact text —
    /// used for the contextual `start`/`end` keywords of endable actions,
    /// which are not reserved words anywhere else in the grammar.
    fn eat_text(&mut self, text: &str) -> bool {
        if self.at_text(text) {
            self.bump();
            true
        } else {
            false
        }
    }

    // -- top level -------------------------------------------------------------

    fn parse_library(&mut self) -> PResult<Library> {
        let start = self.current().span;
        self.expect(SyntaxKind::KwLibrary, "'library'")?;
        let (name, name_span) = self.expect_ident("library name")?;
        let mut imports = Vec::new();
        let mut actions = Vec::new();
        while !self.at(SyntaxKind::EndOfFile) {
            if self.at(SyntaxKind::KwImport) {
                imports.push(self.parse_named_import()?);
            } else if self.at(SyntaxKind::KwPrivate) || self.at(SyntaxKind::KwAction) {
                actions.push(self.parse_action_decl()?);
            } else {
                let tok = self.current();
                return Err(self.error(tok.span, "an action definition or import", format!("{:?}", tok.kind)));
            }
        }
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(Library { name, name_span, imports, actions, span: start.merge(end) })
    }

    fn parse_program(&mut self) -> PResult<Program> {
        let start = self.current().span;
        let languages = if self.at(SyntaxKind::KwLanguages) { Some(self.parse_languages_block()?) } else { None };
        let mut items = Vec::new();
        while !self.at(SyntaxKind::EndOfFile) {
            items.push(self.parse_program_item()?);
        }
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(Program { languages, items, span: start.merge(end) })
    }

    fn parse_program_item(&mut self) -> PResult<ProgramItem> {
        match self.kind() {
            SyntaxKind::Identifier if matches!(self.token_text(self.current()), "styles" | "layout" | "provider" | "locales" | "labels") => {
                Ok(ProgramItem::DefaultImport(self.parse_default_import()?))
            }
            SyntaxKind::KwImport => Ok(ProgramItem::NamedImport(self.parse_named_import()?)),
            SyntaxKind::KwConst => Ok(ProgramItem::Const(self.parse_const_decl()?)),
            SyntaxKind::KwPrivate | SyntaxKind::KwAction => Ok(ProgramItem::Action(self.parse_action_decl()?)),
            SyntaxKind::KwOn => Ok(ProgramItem::EventAction(self.parse_event_action()?)),
            SyntaxKind::KwTimeline => Ok(ProgramItem::Timeline(self.parse_timeline()?)),
            _ => {
                let tok = self.current();
                Err(self.error(
                    tok.span,
                    "an import, const, action, event action, or timeline",
                    format!("{:?}", tok.kind),
                ))
            }
        }
    }

    fn parse_languages_block(&mut self) -> PResult<LanguagesBlock> {
        let start = self.expect(SyntaxKind::KwLanguages, "'languages'")?.span;
        self.expect(SyntaxKind::LBrace, "'{'")?;
        let mut languages = Vec::new();
        while !self.at(SyntaxKind::RBrace) {
            let is_default = self.eat_text("default");
            let (code, span) = self.expect_string("a language code string")?;
            languages.push(LanguageEntry { code, is_default, span });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let end = self.expect(SyntaxKind::RBrace, "'}'")?.span;
        Ok(LanguagesBlock { languages, span: start.merge(end) })
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_default_import(&mut self) -> PResult<DefaultImportStmt> {
        let (kw, start) = self.expect_ident("'styles', 'layout', 'provider', or 'locales'/'labels'")?;
        let kind = match kw.as_str() {
            "styles" => AssetKind::Styles,
            "layout" => AssetKind::Layout,
            "provider" => AssetKind::Provider,
            "locales" | "labels" => AssetKind::Locales,
            _ => unreachable!(),
        };
        let (path, path_span) = self.expect_string("an asset path string")?;
        let as_type = if self.eat(SyntaxKind::KwAs) { Some(self.expect_ident("a type name")?.0) } else { None };
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(DefaultImportStmt { kind, path, path_span, as_type, span: start.merge(end) })
    }

    fn parse_named_import(&mut self) -> PResult<NamedImportStmt> {
        let start = self.expect(SyntaxKind::KwImport, "'import'")?.span;
        self.expect(SyntaxKind::LBrace, "'{'")?;
        let mut names = Vec::new();
        while !self.at(SyntaxKind::RBrace) {
            let (name, name_start) = self.expect_ident("an imported action name")?;
            let alias = if self.eat(SyntaxKind::KwAs) { Some(self.expect_ident("an alias")?.0) } else { None };
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            names.push(ImportedName { name, alias, span: name_start.merge(end) });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RBrace, "'}'")?;
        self.expect(SyntaxKind::KwFrom, "'from'")?;
        let (path, path_span) = self.expect_string("a library path string")?;
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(NamedImportStmt { names, path, path_span, span: start.merge(end) })
    }

    fn parse_const_decl(&mut self) -> PResult<ConstDecl> {
        let start = self.expect(SyntaxKind::KwConst, "'const'")?.span;
        let (name, name_span) = self.expect_ident("a constant name")?;
        self.expect(SyntaxKind::Eq, "'='")?;
        let value = self.parse_expr()?;
        self.eat(SyntaxKind::Semicolon);
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(ConstDecl { name, name_span, value, span: start.merge(end) })
    }

    fn parse_action_decl(&mut self) -> PResult<ActionDecl> {
        let start = self.current().span;
        let visibility = if self.eat(SyntaxKind::KwPrivate) { Visibility::Private } else { Visibility::Public };
        self.expect(SyntaxKind::KwAction, "'action'")?;
        let (name, name_span) = self.expect_ident("an action name")?;
        let params = self.parse_params()?;
        let body = if self.eat_text("start") {
            let start_body = self.parse_block()?;
            if !self.eat_text("end") {
                let tok = self.current();
                return Err(self.error(tok.span, "'end' block", format!("{:?}", tok.kind)));
            }
            let end_body = self.parse_block()?;
            ActionBody::Endable { start: start_body, end: end_body }
        } else {
            ActionBody::Regular(self.parse_block()?)
        };
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(ActionDecl { name, name_span, params, body, visibility, span: start.merge(end) })
    }

    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.expect(SyntaxKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.at(SyntaxKind::RParen) {
            let (name, name_start) = self.expect_ident("a parameter name")?;
            let ty = if self.eat(SyntaxKind::Colon) { Some(self.parse_type_annotation()?) } else { None };
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            params.push(Param { name, ty, span: name_start.merge(end) });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "')'")?;
        Ok(params)
    }

    fn parse_type_annotation(&mut self) -> PResult<TypeAnnotation> {
        let (name, span) = self.expect_ident("a type name")?;
        match name.as_str() {
            "string" => Ok(TypeAnnotation::String),
            "number" => Ok(TypeAnnotation::Number),
            "boolean" => Ok(TypeAnnotation::Boolean),
            "object" => Ok(TypeAnnotation::Object),
            "array" => Ok(TypeAnnotation::Array),
            "unknown" => Ok(TypeAnnotation::Unknown),
            _ => Err(self.error(span, "string|number|boolean|object|array|unknown", name)),
        }
    }

    fn parse_event_action(&mut self) -> PResult<EventActionDecl> {
        let start = self.expect(SyntaxKind::KwOn, "'on'")?.span;
        self.expect(SyntaxKind::KwEvent, "'event'")?;
        let (event_name, event_name_span) = self.expect_string("an event name string")?;
        let topic = if self.eat(SyntaxKind::KwTopic) { Some(self.expect_string("a topic string")?.0) } else { None };
        self.expect(SyntaxKind::KwAction, "'action'")?;
        let (handler_name, _) = self.expect_ident("a handler name")?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(EventActionDecl {
            event_name,
            event_name_span,
            topic,
            handler_name,
            params,
            body,
            span: start.merge(end),
        })
    }

    fn parse_timeline(&mut self) -> PResult<TimelineDecl> {
        let start = self.expect(SyntaxKind::KwTimeline, "'timeline'")?.span;
        let (name, _) = self.expect_string("a timeline name string")?;
        self.expect(SyntaxKind::KwIn, "'in'")?;
        let (selector, _) = self.expect_string("a selector string")?;
        self.expect(SyntaxKind::KwUsing, "'using'")?;
        let (provider_name, provider_span) = self.expect_ident("raf|video|audio|custom")?;
        let provider = match provider_name.as_str() {
            "raf" => ProviderKind::Raf,
            "video" => ProviderKind::Video,
            "audio" => ProviderKind::Audio,
            "custom" => ProviderKind::Custom,
            _ => return Err(self.error(provider_span, "raf|video|audio|custom", provider_name)),
        };
        self.expect(SyntaxKind::LBrace, "'{'")?;
        let mut events = Vec::new();
        while !self.at(SyntaxKind::RBrace) {
            events.push(self.parse_timeline_event()?);
        }
        let end = self.expect(SyntaxKind::RBrace, "'}'")?.span;
        Ok(TimelineDecl { name, selector, provider, events, span: start.merge(end) })
    }

    fn parse_time_value(&mut self) -> PResult<TimeValue> {
        let tok = self.current();
        match tok.kind {
            SyntaxKind::TimeLiteral => {
                self.bump();
                let text = self.token_text(tok);
                let (num, unit) = split_time_literal(text);
                let seconds = num.parse::<f64>().unwrap_or(0.0) * if unit == "ms" { 0.001 } else { 1.0 };
                Ok(TimeValue { seconds, span: tok.span })
            }
            SyntaxKind::NumberLiteral => {
                self.bump();
                let seconds = self.token_text(tok).parse::<f64>().unwrap_or(0.0);
                Ok(TimeValue { seconds, span: tok.span })
            }
            _ => Err(self.error(tok.span, "a time value (e.g. 1.5s, 200ms)", format!("{:?}", tok.kind))),
        }
    }

    fn parse_timeline_event(&mut self) -> PResult<TimelineEvent> {
        let start = self.current().span;
        if self.eat(SyntaxKind::KwAt) {
            let begin = self.parse_time_value()?;
            self.expect(SyntaxKind::DotDot, "'..'")?;
            let end_time = self.parse_time_value()?;
            let start_ops = self.parse_block()?;
            let end_ops = if self.at(SyntaxKind::LBrace) { self.parse_block()? } else { Vec::new() };
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            Ok(TimelineEvent::Timed { start: begin, end: end_time, start_ops, end_ops, span: start.merge(end) })
        } else if self.eat(SyntaxKind::KwSequence) {
            let body = self.parse_block()?;
            self.expect(SyntaxKind::KwFor, "'for'")?;
            let duration = self.parse_time_value()?;
            self.eat(SyntaxKind::Semicolon);
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            Ok(TimelineEvent::Sequence { body, duration, span: start.merge(end) })
        } else if self.eat(SyntaxKind::KwStagger) {
            let delay = self.parse_time_value()?;
            self.expect(SyntaxKind::KwItems, "'items'")?;
            self.expect(SyntaxKind::KwWith, "'with'")?;
            let (action_name, action_name_span) = self.expect_ident("an action name")?;
            self.eat(SyntaxKind::Semicolon);
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            Ok(TimelineEvent::Stagger { delay, action_name, action_name_span, span: start.merge(end) })
        } else {
            let tok = self.current();
            Err(self.error(tok.span, "'at', 'sequence', or 'stagger'", format!("{:?}", tok.kind)))
        }
    }

    // -- statements --------------------------------------------------------

    fn parse_block(&mut self) -> PResult<Vec<Statement>> {
        self.expect(SyntaxKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.at(SyntaxKind::RBrace) {
            stmts.push(self.parse_statement()?);
        }
        self.expect(SyntaxKind::RBrace, "'}'")?;
        Ok(stmts)
    }

    fn parse_statement(&mut self) -> PResult<Statement> {
        match self.kind() {
            SyntaxKind::KwIf => self.parse_if(),
            SyntaxKind::KwFor => self.parse_for(),
            SyntaxKind::KwBreak => {
                let span = self.bump().span;
                self.eat(SyntaxKind::Semicolon);
                Ok(Statement::Break(span))
            }
            SyntaxKind::KwContinue => {
                let span = self.bump().span;
                self.eat(SyntaxKind::Semicolon);
                Ok(Statement::Continue(span))
            }
            SyntaxKind::Identifier => self.parse_call_statement(),
            _ => {
                let tok = self.current();
                Err(self.error(tok.span, "a statement", format!("{:?}", tok.kind)))
            }
        }
    }

    fn parse_if(&mut self) -> PResult<Statement> {
        let start = self.expect(SyntaxKind::KwIf, "'if'")?.span;
        self.expect(SyntaxKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(SyntaxKind::RParen, "')'")?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.eat(SyntaxKind::KwElse) { Some(self.parse_block()?) } else { None };
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(Statement::If(IfStatement { condition, then_branch, else_branch, span: start.merge(end) }))
    }

    fn parse_for(&mut self) -> PResult<Statement> {
        let start = self.expect(SyntaxKind::KwFor, "'for'")?.span;
        self.expect(SyntaxKind::LParen, "'('")?;
        let (var_name, var_name_span) = self.expect_ident("a loop variable name")?;
        self.expect(SyntaxKind::KwIn, "'in'")?;
        let collection = self.parse_expr()?;
        self.expect(SyntaxKind::RParen, "')'")?;
        let body = self.parse_block()?;
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(Statement::For(ForStatement { var_name, var_name_span, collection, body, span: start.merge(end) }))
    }

    fn parse_call_statement(&mut self) -> PResult<Statement> {
        let (name, name_span) = self.expect_ident("an operation or action name")?;
        self.expect(SyntaxKind::LParen, "'('")?;
        let mut args = Vec::new();
        while !self.at(SyntaxKind::RParen) {
            args.push(self.parse_expr()?);
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "')'")?;
        self.eat(SyntaxKind::Semicolon);
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(Statement::Call(CallStatement { name, name_span, args, span: name_span.merge(end) }))
    }

    // -- expressions: precedence climbing ----------------------------------

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(SyntaxKind::PipePipe) {
            let right = self.parse_and()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op: BinaryOp::Or, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.eat(SyntaxKind::AmpAmp) {
            let right = self.parse_equality()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op: BinaryOp::And, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> PResult<Expr> {
        let mut left = self.parse_relational()?;
        loop {
            let op = if self.eat(SyntaxKind::EqEq) {
                BinaryOp::Eq
            } else if self.eat(SyntaxKind::BangEq) {
                BinaryOp::Neq
            } else {
                break;
            };
            let right = self.parse_relational()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> PResult<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = if self.eat(SyntaxKind::Lt) {
                BinaryOp::Lt
            } else if self.eat(SyntaxKind::Gt) {
                BinaryOp::Gt
            } else if self.eat(SyntaxKind::LtEq) {
                BinaryOp::Le
            } else if self.eat(SyntaxKind::GtEq) {
                BinaryOp::Ge
            } else {
                break;
            };
            let right = self.parse_additive()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = if self.eat(SyntaxKind::Plus) {
                BinaryOp::Add
            } else if self.eat(SyntaxKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.eat(SyntaxKind::Star) {
                BinaryOp::Mul
            } else if self.eat(SyntaxKind::Slash) {
                BinaryOp::Div
            } else if self.eat(SyntaxKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let right = self.parse_unary()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        if self.at(SyntaxKind::Bang) || self.at(SyntaxKind::Minus) {
            let tok = self.bump();
            let op = if tok.kind == SyntaxKind::Bang { UnaryOp::Not } else { UnaryOp::Neg };
            let operand = self.parse_unary()?;
            let span = tok.span.merge(operand.span());
            return Ok(Expr::Unary { op, operand: Box::new(operand), span });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let tok = self.current();
        match tok.kind {
            SyntaxKind::StringLiteral => {
                self.bump();
                Ok(Expr::Literal { value: Literal::String(unescape_string(self.token_text(tok))), span: tok.span })
            }
            SyntaxKind::NumberLiteral | SyntaxKind::TimeLiteral => {
                self.bump();
                let text = self.token_text(tok);
                let n = if tok.kind == SyntaxKind::TimeLiteral {
                    let (num, unit) = split_time_literal(text);
                    num.parse::<f64>().unwrap_or(0.0) * if unit == "ms" { 0.001 } else { 1.0 }
                } else {
                    text.parse::<f64>().unwrap_or(0.0)
                };
                Ok(Expr::Literal { value: Literal::Number(n), span: tok.span })
            }
            SyntaxKind::KwTrue => {
                self.bump();
                Ok(Expr::Literal { value: Literal::Boolean(true), span: tok.span })
            }
            SyntaxKind::KwFalse => {
                self.bump();
                Ok(Expr::Literal { value: Literal::Boolean(false), span: tok.span })
            }
            SyntaxKind::VariableRef => {
                self.bump();
                let name = self.token_text(tok).trim_start_matches('@').to_string();
                Ok(Expr::VariableRef { name, span: tok.span })
            }
            SyntaxKind::SystemRef => {
                self.bump();
                let name = self.token_text(tok).trim_start_matches('@').to_string();
                Ok(Expr::SystemRef { name, span: tok.span })
            }
            SyntaxKind::GlobalDataPath => {
                self.bump();
                let text = self.token_text(tok);
                let segments: Vec<String> = text.trim_start_matches('$').split('.').map(str::to_string).collect();
                Ok(Expr::GlobalDataPath { segments, span: tok.span })
            }
            SyntaxKind::LBracket => self.parse_array(),
            SyntaxKind::LBrace => self.parse_object(),
            SyntaxKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(SyntaxKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.error(tok.span, "an expression", format!("{:?}", tok.kind))),
        }
    }

    fn parse_array(&mut self) -> PResult<Expr> {
        let start = self.expect(SyntaxKind::LBracket, "'['")?.span;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::RBracket) {
            elements.push(self.parse_expr()?);
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let end = self.expect(SyntaxKind::RBracket, "']'")?.span;
        Ok(Expr::Array { elements, span: start.merge(end) })
    }

    fn parse_object(&mut self) -> PResult<Expr> {
        let start = self.expect(SyntaxKind::LBrace, "'{'")?.span;
        let mut fields = Vec::new();
        while !self.at(SyntaxKind::RBrace) {
            let key = if self.at(SyntaxKind::StringLiteral) {
                self.expect_string("a field name")?.0
            } else {
                self.expect_ident("a field name")?.0
            };
            self.expect(SyntaxKind::Colon, "':'")?;
            let value = self.parse_expr()?;
            fields.push((key, value));
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let end = self.expect(SyntaxKind::RBrace, "'}'")?.span;
        Ok(Expr::Object { fields, span: start.merge(end) })
    }
}

fn split_time_literal(text: &str) -> (&str, &str) {
    if let Some(stripped) = text.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = text.strip_suffix('s') {
        (stripped, "s")
    } else {
        (text, "")
    }
}

/// Resolve the common escape sequences inside a quoted string literal.
/// Eligian allows both `"` and `'` quotes (spec §4.1).
pub fn unescape_string(raw: &str) -> String {
    let inner = &raw[1..raw.len().saturating_sub(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\'') => out.push('\''),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Document {
        Parser::parse_document(src).unwrap_or_else(|e| panic!("parse failed: {:?}", e))
    }

    #[test]
    fn parses_minimal_program_with_timeline() {
        let doc = parse(
            r#"
            timeline "intro" in "#stage" using raf {
                at 0s..1s {
                    selectElement(".button");
                }
            }
            "#,
        );
        let Document::Program(p) = doc else { panic!("expected program") };
        assert_eq!(p.timelines().count(), 1);
    }

    #[test]
    fn parses_library_with_actions() {
        let doc = parse(
            r#"
            library animations
            action fadeIn(selector, duration) {
                selectElement(selector);
            }
            "#,
        );
        let Document::Library(lib) = doc else { panic!("expected library") };
        assert_eq!(lib.name, "animations");
        assert_eq!(lib.actions.len(), 1);
    }

    #[test]
    fn parses_endable_action() {
        let doc = parse(
            r#"
            action highlight(selector) start {
                addClass(selector, "active");
            } end {
                removeClass(selector, "active");
            }
            timeline "t" in "#s" using raf { at 0s..1s { } }
            "#,
        );
        let Document::Program(p) = doc else { panic!() };
        let action = p.actions().next().unwrap();
        assert!(matches!(action.body, ActionBody::Endable { .. }));
    }

    #[test]
    fn parses_const_expression() {
        let doc = parse("const BASE = 100;\nconst MUL = 2;\nconst DELAY = @BASE * @MUL;\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let Document::Program(p) = doc else { panic!() };
        assert_eq!(p.consts().count(), 3);
    }

    #[test]
    fn parses_named_and_default_imports() {
        let doc = parse(
            r#"
            styles "main.css"
            layout "index.html" as html
            import { fadeIn, slideOut as so } from "./animations.eligian"
            timeline "t" in "#s" using raf { at 0s..1s { } }
            "#,
        );
        let Document::Program(p) = doc else { panic!() };
        assert_eq!(p.default_imports().count(), 2);
        let named: Vec<_> = p.named_imports().collect();
        assert_eq!(named[0].names.len(), 2);
        assert_eq!(named[0].names[1].local_name(), "so");
    }

    #[test]
    fn parses_control_flow_and_expressions() {
        let doc = parse(
            r#"
            action loopy(items) {
                for (item in items) {
                    if (item == "x") {
                        log(item);
                    } else {
                        continue;
                    }
                }
            }
            timeline "t" in "#s" using raf { at 0s..1s { } }
            "#,
        );
        let Document::Program(p) = doc else { panic!() };
        let a = p.actions().next().unwrap();
        let ActionBody::Regular(body) = &a.body else { panic!() };
        assert!(matches!(body[0], Statement::For(_)));
    }

    #[test]
    fn reports_syntax_error_with_location() {
        let err = Parser::parse_document("timeline \"t\" in \"#s\" using raf {").unwrap_err();
        assert_eq!(err.location.line, 1);
    }

    #[test]
    fn parses_sequence_and_stagger_events() {
        let doc = parse(
            r#"
            action a() { log("x"); }
            timeline "t" in "#s" using raf {
                sequence { a(); } for 2s;
                stagger 100ms items with a;
            }
            "#,
        );
        let Document::Program(p) = doc else { panic!() };
        let tl = p.timelines().next().unwrap();
        assert_eq!(tl.events.len(), 2);
        assert!(matches!(tl.events[0], TimelineEvent::Sequence { .. }));
        assert!(matches!(tl.events[1], TimelineEvent::Stagger { .. }));
    }
}
