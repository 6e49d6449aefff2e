//! AST node types for the Eligian grammar (spec §3, §4.1).
//!
//! Every node is a tagged union carrying a [`Span`], following the teacher's
//! "discriminated records -> sum types with a source-location payload"
//! translation (spec §9 design notes) rather than the original's `$type`
//! string dispatch.

use eligian_common::{Span, Spanned};
use serde::{Deserialize, Serialize};

/// The root of a parsed document: a top-level `Program` or a `Library`
/// (spec §3: "Program vs Library").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Document {
    Program(Program),
    Library(Library),
}

impl Document {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Document::Program(p) => p.span,
            Document::Library(l) => l.span,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Program {
    pub languages: Option<LanguagesBlock>,
    pub items: Vec<ProgramItem>,
    pub span: Span,
}

impl Program {
    pub fn actions(&self) -> impl Iterator<Item = &ActionDecl> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::Action(a) => Some(a),
            _ => None,
        })
    }

    pub fn timelines(&self) -> impl Iterator<Item = &TimelineDecl> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::Timeline(t) => Some(t),
            _ => None,
        })
    }

    pub fn event_actions(&self) -> impl Iterator<Item = &EventActionDecl> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::EventAction(e) => Some(e),
            _ => None,
        })
    }

    pub fn consts(&self) -> impl Iterator<Item = &ConstDecl> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::Const(c) => Some(c),
            _ => None,
        })
    }

    pub fn default_imports(&self) -> impl Iterator<Item = &DefaultImportStmt> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::DefaultImport(d) => Some(d),
            _ => None,
        })
    }

    pub fn named_imports(&self) -> impl Iterator<Item = &NamedImportStmt> {
        self.items.iter().filter_map(|i| match i {
            ProgramItem::NamedImport(n) => Some(n),
            _ => None,
        })
    }
}

/// A library: header plus action definitions only (spec §3: "no timelines,
/// asset imports, or constants").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub name_span: Span,
    pub imports: Vec<NamedImportStmt>,
    pub actions: Vec<ActionDecl>,
    pub span: Span,
}

/// One top-level statement inside a `Program`, in source order — source
/// order matters for the "first imported CSS file" quick-fix rule (spec §4.3,
/// §9 open questions).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ProgramItem {
    DefaultImport(DefaultImportStmt),
    NamedImport(NamedImportStmt),
    Const(ConstDecl),
    Action(ActionDecl),
    EventAction(EventActionDecl),
    Timeline(TimelineDecl),
}

impl ProgramItem {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            ProgramItem::DefaultImport(i) => i.span,
            ProgramItem::NamedImport(i) => i.span,
            ProgramItem::Const(i) => i.span,
            ProgramItem::Action(i) => i.span,
            ProgramItem::EventAction(i) => i.span,
            ProgramItem::Timeline(i) => i.span,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Styles,
    Layout,
    Provider,
    Locales,
}

/// `styles "a.css"`, `layout "a.html" as html`, `provider "a.js"`, `locales
/// "a.json"` / `labels "a.json"` (spec §3 invariant 9, §4.5).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultImportStmt {
    pub kind: AssetKind,
    pub path: String,
    pub path_span: Span,
    pub as_type: Option<String>,
    pub span: Span,
}

/// `import { fadeIn, foo as bar } from "./lib.eligian"` (spec §4.2).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedImportStmt {
    pub names: Vec<ImportedName>,
    pub path: String,
    pub path_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportedName {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

impl ImportedName {
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguagesBlock {
    pub languages: Vec<LanguageEntry>,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub is_default: bool,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: String,
    pub name_span: Span,
    pub value: Expr,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeAnnotation {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// Parameter declared without a type annotation: gradual typing (spec
    /// §3 invariant 2) — bypasses assignability checks.
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ActionBody {
    Regular(Vec<Statement>),
    Endable { start: Vec<Statement>, end: Vec<Statement> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionDecl {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub body: ActionBody,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventActionDecl {
    pub event_name: String,
    pub event_name_span: Span,
    pub topic: Option<String>,
    pub handler_name: String,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    Raf,
    Video,
    Audio,
    Custom,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineDecl {
    pub name: String,
    pub selector: String,
    pub provider: ProviderKind,
    pub events: Vec<TimelineEvent>,
    pub span: Span,
}

/// A time value in seconds, as written in source (`Ts`/`Tms` or a bare
/// number meaning seconds).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    pub seconds: f64,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// `at Ts..Te [startOps] [endOps]` (spec §3).
    Timed {
        start: TimeValue,
        end: TimeValue,
        start_ops: Vec<Statement>,
        end_ops: Vec<Statement>,
        span: Span,
    },
    /// `sequence { ... } for <d>s` (spec §3).
    Sequence { body: Vec<Statement>, duration: TimeValue, span: Span },
    /// `stagger <delay>ms items with <action>` (spec §3).
    Stagger { delay: TimeValue, action_name: String, action_name_span: Span, span: Span },
}

impl TimelineEvent {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TimelineEvent::Timed { span, .. }
            | TimelineEvent::Sequence { span, .. }
            | TimelineEvent::Stagger { span, .. } => *span,
        }
    }
}

// ---------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Statement {
    /// A built-in operation call or a user-defined action call — uniform at
    /// source level (spec §3: "Operation call").
    Call(CallStatement),
    If(IfStatement),
    For(ForStatement),
    Break(Span),
    Continue(Span),
}

impl Statement {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Statement::Call(c) => c.span,
            Statement::If(i) => i.span,
            Statement::For(f) => f.span,
            Statement::Break(s) | Statement::Continue(s) => *s,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallStatement {
    pub name: String,
    pub name_span: Span,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Vec<Statement>,
    pub else_branch: Option<Vec<Statement>>,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForStatement {
    pub var_name: String,
    pub var_name_span: Span,
    pub collection: Expr,
    pub body: Vec<Statement>,
    pub span: Span,
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Expr {
    Literal { value: Literal, span: Span },
    /// `@name` resolving to a constant, parameter, or loop variable.
    VariableRef { name: String, span: Span },
    /// `@@name` — a system-scope variable (e.g. `@@loopIndex`).
    SystemRef { name: String, span: Span },
    /// `$globalData.a.b`
    GlobalDataPath { segments: Vec<String>, span: Span },
    Array { elements: Vec<Expr>, span: Span },
    Object { fields: Vec<(String, Expr)>, span: Span },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr>, span: Span },
    Unary { op: UnaryOp, operand: Box<Expr>, span: Span },
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::VariableRef { span, .. }
            | Expr::SystemRef { span, .. }
            | Expr::GlobalDataPath { span, .. }
            | Expr::Array { span, .. }
            | Expr::Object { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. } => *span,
        }
    }
}
