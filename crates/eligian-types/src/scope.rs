//! Local scope for type inference (spec §4.4 inference table) and the
//! variable-reference lookup it depends on.

use crate::types::Type;
use eligian_parser::ast::{BinaryOp, Expr, Literal, TypeAnnotation, UnaryOp};
use rustc_hash::FxHashMap;

/// Parameter and loop-variable types visible while checking one action or
/// event-action body. Rebuilt per body, never shared across bodies (spec §3
/// invariant 1: "action parameters local to the action; loop variables local
/// to their body").
#[derive(Clone, Debug, Default)]
pub struct LocalScope {
    vars: FxHashMap<String, Type>,
}

impl LocalScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        self.vars.insert(name.into(), ty);
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Type {
        self.vars.get(name).copied().unwrap_or(Type::Unknown)
    }

    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Shadowing copy used when entering a nested `for` body so the loop
    /// variable doesn't leak back into the parent scope on return.
    #[must_use]
    pub fn child(&self) -> Self {
        self.clone()
    }
}

impl From<&TypeAnnotation> for Type {
    fn from(value: &TypeAnnotation) -> Self {
        match value {
            TypeAnnotation::String => Type::String,
            TypeAnnotation::Number => Type::Number,
            TypeAnnotation::Boolean => Type::Boolean,
            TypeAnnotation::Object => Type::Object,
            TypeAnnotation::Array => Type::Array,
            TypeAnnotation::Unknown => Type::Unknown,
        }
    }
}

/// Infer an expression's type under `scope`, following the table in spec §4.4.
#[must_use]
pub fn infer(expr: &Expr, scope: &LocalScope) -> Type {
    match expr {
        Expr::Literal { value: Literal::String(_), .. } => Type::String,
        Expr::Literal { value: Literal::Number(_), .. } => Type::Number,
        Expr::Literal { value: Literal::Boolean(_), .. } => Type::Boolean,
        Expr::VariableRef { name, .. } => scope.lookup(name),
        // System-scope refs (`@@loopIndex`) and global-data paths are not
        // locally typed; they behave like `unknown` for assignability.
        Expr::SystemRef { .. } | Expr::GlobalDataPath { .. } => Type::Unknown,
        Expr::Array { .. } => Type::Array,
        Expr::Object { .. } => Type::Object,
        Expr::Unary { op: UnaryOp::Not, .. } => Type::Boolean,
        Expr::Unary { op: UnaryOp::Neg, .. } => Type::Number,
        Expr::Binary { op, left, right, .. } => infer_binary(*op, left, right, scope),
    }
}

fn infer_binary(op: BinaryOp, left: &Expr, right: &Expr, scope: &LocalScope) -> Type {
    match op {
        BinaryOp::And | BinaryOp::Or | BinaryOp::Eq | BinaryOp::Neq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => Type::Boolean,
        BinaryOp::Add => {
            let lt = infer(left, scope);
            let rt = infer(right, scope);
            if lt == Type::String || rt == Type::String { Type::String } else { Type::Number }
        }
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Type::Number,
    }
}
