//! Constant map construction and compile-time expression evaluation
//! (spec §4.6).

use eligian_common::{Span, Spanned};
use eligian_parser::ast::{BinaryOp, Expr, Literal, Program, UnaryOp};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstFoldError {
    #[error("circular dependency evaluating constant '{name}'")]
    CircularDependency { name: String, span: Span },
    #[error("division by zero evaluating constant '{name}'")]
    DivisionByZero { name: String, span: Span },
}

impl ConstFoldError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            ConstFoldError::CircularDependency { span, .. } | ConstFoldError::DivisionByZero { span, .. } => *span,
        }
    }
}

/// The set of names bound to a compile-time-known value, built by walking a
/// program's `const` declarations in dependency order (spec §4.6).
#[derive(Debug, Default, Clone)]
pub struct ConstantMap {
    values: FxHashMap<String, Value>,
}

impl ConstantMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Adds a pre-computed constant, used for HTML-import string constants
    /// (spec §4.6: "HTML imports are also added to the map as string
    /// constants").
    pub fn insert_html_import(&mut self, name: impl Into<String>, content: String) {
        self.values.insert(name.into(), Value::String(content));
    }
}

enum EvalOutcome {
    /// The expression references something that isn't (yet) known to be
    /// constant; the declaration is treated as a regular variable, not an
    /// error (spec §4.6).
    NotConstant,
    Error(ConstFoldError),
}

/// Walks `program`'s top-level `const` declarations, resolving each against
/// the others regardless of declaration order (a reference to a
/// later-declared constant still resolves), with cycle detection via an
/// in-progress stack per top-level resolution. `failed` memoizes every name
/// that has already produced a `ConstFoldError` (from this or an earlier
/// top-level attempt) so a cycle or division-by-zero is reported exactly
/// once, not once per member that the outer loop happens to revisit.
pub fn build_constant_map(program: &Program) -> (ConstantMap, Vec<ConstFoldError>) {
    let decls: FxHashMap<String, Expr> = program.consts().map(|d| (d.name.clone(), d.value.clone())).collect();
    let mut map = ConstantMap::new();
    let mut errors = Vec::new();
    let mut failed: FxHashSet<String> = FxHashSet::default();

    for decl in program.consts() {
        if map.get(&decl.name).is_some() || failed.contains(&decl.name) {
            continue;
        }
        let mut in_progress = Vec::new();
        match resolve(&decl.name, &decls, &mut map, &mut in_progress, &mut failed) {
            Ok(_) => {}
            Err(EvalOutcome::NotConstant) => {}
            Err(EvalOutcome::Error(err)) => errors.push(err),
        }
    }

    (map, errors)
}

fn resolve(name: &str, decls: &FxHashMap<String, Expr>, map: &mut ConstantMap, in_progress: &mut Vec<String>, failed: &mut FxHashSet<String>) -> Result<Value, EvalOutcome> {
    if let Some(value) = map.get(name) {
        return Ok(value.clone());
    }
    // Already reported once, from this or an earlier top-level resolution;
    // treat it as unresolvable rather than re-evaluating and re-reporting.
    if failed.contains(name) {
        return Err(EvalOutcome::NotConstant);
    }
    if in_progress.iter().any(|n| n == name) {
        let span = decls.get(name).map_or(Span::dummy(), Expr::span);
        failed.insert(name.to_string());
        return Err(EvalOutcome::Error(ConstFoldError::CircularDependency { name: name.to_string(), span }));
    }
    let Some(expr) = decls.get(name) else { return Err(EvalOutcome::NotConstant) };

    in_progress.push(name.to_string());
    let result = evaluate(expr, decls, map, in_progress, failed);
    in_progress.pop();

    match &result {
        Ok(value) => map.insert(name.to_string(), value.clone()),
        Err(EvalOutcome::Error(_)) => {
            failed.insert(name.to_string());
        }
        Err(EvalOutcome::NotConstant) => {}
    }
    result
}

/// Expressions nest arbitrarily deep (arrays of objects of arrays...);
/// `maybe_grow` keeps pathological nesting from blowing the stack instead of
/// bounding recursion depth up front.
fn evaluate(expr: &Expr, decls: &FxHashMap<String, Expr>, map: &mut ConstantMap, in_progress: &mut Vec<String>, failed: &mut FxHashSet<String>) -> Result<Value, EvalOutcome> {
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || evaluate_inner(expr, decls, map, in_progress, failed))
}

fn evaluate_inner(expr: &Expr, decls: &FxHashMap<String, Expr>, map: &mut ConstantMap, in_progress: &mut Vec<String>, failed: &mut FxHashSet<String>) -> Result<Value, EvalOutcome> {
    match expr {
        Expr::Literal { value, .. } => Ok(literal_to_value(value)),
        Expr::VariableRef { name, .. } => resolve(name, decls, map, in_progress, failed),
        Expr::SystemRef { .. } | Expr::GlobalDataPath { .. } => Err(EvalOutcome::NotConstant),
        Expr::Array { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate(element, decls, map, in_progress, failed)?);
            }
            Ok(Value::Array(values))
        }
        Expr::Object { fields, .. } => {
            let mut object = serde_json::Map::with_capacity(fields.len());
            for (key, value) in fields {
                object.insert(key.clone(), evaluate(value, decls, map, in_progress, failed)?);
            }
            Ok(Value::Object(object))
        }
        Expr::Unary { op, operand, .. } => {
            let value = evaluate(operand, decls, map, in_progress, failed)?;
            eval_unary(*op, &value)
        }
        Expr::Binary { op, left, right, span } => {
            let lv = evaluate(left, decls, map, in_progress, failed)?;
            let rv = evaluate(right, decls, map, in_progress, failed)?;
            eval_binary(*op, &lv, &rv, *span)
        }
    }
}

pub(crate) fn literal_to_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
        Literal::Boolean(b) => Value::Bool(*b),
    }
}

fn eval_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalOutcome> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!truthy(value))),
        UnaryOp::Neg => as_number(value).map(|n| json_number(-n)),
    }
}

fn eval_binary(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value, EvalOutcome> {
    match op {
        BinaryOp::Add => {
            if left.is_string() || right.is_string() {
                Ok(Value::String(format!("{}{}", display(left), display(right))))
            } else {
                let (l, r) = (as_number(left)?, as_number(right)?);
                Ok(json_number(l + r))
            }
        }
        BinaryOp::Sub => Ok(json_number(as_number(left)? - as_number(right)?)),
        BinaryOp::Mul => Ok(json_number(as_number(left)? * as_number(right)?)),
        BinaryOp::Div => {
            let (l, r) = (as_number(left)?, as_number(right)?);
            if r == 0.0 {
                return Err(EvalOutcome::Error(ConstFoldError::DivisionByZero { name: String::new(), span }));
            }
            Ok(json_number(l / r))
        }
        BinaryOp::Mod => {
            let (l, r) = (as_number(left)?, as_number(right)?);
            if r == 0.0 {
                return Err(EvalOutcome::Error(ConstFoldError::DivisionByZero { name: String::new(), span }));
            }
            Ok(json_number(l % r))
        }
        BinaryOp::And => Ok(Value::Bool(truthy(left) && truthy(right))),
        BinaryOp::Or => Ok(Value::Bool(truthy(left) || truthy(right))),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Neq => Ok(Value::Bool(left != right)),
        BinaryOp::Lt => Ok(Value::Bool(as_number(left)? < as_number(right)?)),
        BinaryOp::Gt => Ok(Value::Bool(as_number(left)? > as_number(right)?)),
        BinaryOp::Le => Ok(Value::Bool(as_number(left)? <= as_number(right)?)),
        BinaryOp::Ge => Ok(Value::Bool(as_number(left)? >= as_number(right)?)),
    }
}

fn as_number(value: &Value) -> Result<f64, EvalOutcome> {
    value.as_f64().ok_or(EvalOutcome::NotConstant)
}

pub(crate) fn json_number(n: f64) -> Value {
    serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Folds `expr` against an already-fully-resolved [`ConstantMap`], used when
/// lowering operation arguments rather than top-level `const` declarations:
/// no cycle detection needed (the map is closed), and an unresolvable
/// sub-expression (a parameter or loop variable) yields `None` rather than an
/// error, leaving the caller to decide whether that's acceptable.
#[must_use]
pub(crate) fn try_fold_with_constants(expr: &Expr, constants: &ConstantMap) -> Option<Value> {
    match expr {
        Expr::Literal { value, .. } => Some(literal_to_value(value)),
        Expr::VariableRef { name, .. } => constants.get(name).cloned(),
        Expr::SystemRef { .. } | Expr::GlobalDataPath { .. } => None,
        Expr::Array { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(try_fold_with_constants(element, constants)?);
            }
            Some(Value::Array(values))
        }
        Expr::Object { fields, .. } => {
            let mut object = serde_json::Map::with_capacity(fields.len());
            for (key, value) in fields {
                object.insert(key.clone(), try_fold_with_constants(value, constants)?);
            }
            Some(Value::Object(object))
        }
        Expr::Unary { op, operand, .. } => {
            let value = try_fold_with_constants(operand, constants)?;
            match op {
                UnaryOp::Not => Some(Value::Bool(!truthy(&value))),
                UnaryOp::Neg => value.as_f64().map(|n| json_number(-n)),
            }
        }
        Expr::Binary { op, left, right, .. } => {
            let lv = try_fold_with_constants(left, constants)?;
            let rv = try_fold_with_constants(right, constants)?;
            fold_binary_values(*op, &lv, &rv)
        }
    }
}

fn fold_binary_values(op: BinaryOp, left: &Value, right: &Value) -> Option<Value> {
    match op {
        BinaryOp::Add => {
            if left.is_string() || right.is_string() {
                Some(Value::String(format!("{}{}", display(left), display(right))))
            } else {
                Some(json_number(left.as_f64()? + right.as_f64()?))
            }
        }
        BinaryOp::Sub => Some(json_number(left.as_f64()? - right.as_f64()?)),
        BinaryOp::Mul => Some(json_number(left.as_f64()? * right.as_f64()?)),
        BinaryOp::Div => {
            let r = right.as_f64()?;
            if r == 0.0 { None } else { Some(json_number(left.as_f64()? / r)) }
        }
        BinaryOp::Mod => {
            let r = right.as_f64()?;
            if r == 0.0 { None } else { Some(json_number(left.as_f64()? % r)) }
        }
        BinaryOp::And => Some(Value::Bool(truthy(left) && truthy(right))),
        BinaryOp::Or => Some(Value::Bool(truthy(left) || truthy(right))),
        BinaryOp::Eq => Some(Value::Bool(left == right)),
        BinaryOp::Neq => Some(Value::Bool(left != right)),
        BinaryOp::Lt => Some(Value::Bool(left.as_f64()? < right.as_f64()?)),
        BinaryOp::Gt => Some(Value::Bool(left.as_f64()? > right.as_f64()?)),
        BinaryOp::Le => Some(Value::Bool(left.as_f64()? <= right.as_f64()?)),
        BinaryOp::Ge => Some(Value::Bool(left.as_f64()? >= right.as_f64()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_from(src: &str) -> Program {
        match eligian_parser::parse(src).unwrap() {
            eligian_parser::Document::Program(p) => p,
            eligian_parser::Document::Library(_) => panic!("expected program"),
        }
    }

    #[test]
    fn folds_arithmetic_constants() {
        let program = program_from("const a = 1 + 2\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (map, errors) = build_constant_map(&program);
        assert!(errors.is_empty());
        assert_eq!(map.get("a"), Some(&Value::from(3.0)));
    }

    #[test]
    fn string_concatenation_on_any_string_operand() {
        let program = program_from("const a = \"x\" + 1\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (map, errors) = build_constant_map(&program);
        assert!(errors.is_empty());
        assert_eq!(map.get("a"), Some(&Value::from("x1")));
    }

    #[test]
    fn resolves_forward_reference_regardless_of_order() {
        let program = program_from("const a = @b + 1\nconst b = 2\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (map, errors) = build_constant_map(&program);
        assert!(errors.is_empty());
        assert_eq!(map.get("a"), Some(&Value::from(3.0)));
        assert_eq!(map.get("b"), Some(&Value::from(2.0)));
    }

    #[test]
    fn detects_circular_dependency() {
        let program = program_from("const a = @b + 1\nconst b = @a\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (_, errors) = build_constant_map(&program);
        assert!(errors.iter().any(|e| matches!(e, ConstFoldError::CircularDependency { .. })));
    }

    #[test]
    fn circular_dependency_is_reported_exactly_once_per_cycle() {
        let program = program_from("const a = @b + 1\nconst b = @a\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (_, errors) = build_constant_map(&program);
        let cycle_errors: Vec<_> = errors.iter().filter(|e| matches!(e, ConstFoldError::CircularDependency { .. })).collect();
        assert_eq!(cycle_errors.len(), 1, "expected exactly one circular-dependency diagnostic, got {cycle_errors:?}");
    }

    #[test]
    fn three_member_cycle_is_reported_exactly_once() {
        let program = program_from(
            "const a = @b\nconst b = @c\nconst c = @a\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }",
        );
        let (_, errors) = build_constant_map(&program);
        let cycle_errors: Vec<_> = errors.iter().filter(|e| matches!(e, ConstFoldError::CircularDependency { .. })).collect();
        assert_eq!(cycle_errors.len(), 1, "expected exactly one circular-dependency diagnostic, got {cycle_errors:?}");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let program = program_from("const a = 1 / 0\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (_, errors) = build_constant_map(&program);
        assert!(errors.iter().any(|e| matches!(e, ConstFoldError::DivisionByZero { .. })));
    }

    #[test]
    fn unresolvable_expression_is_silently_skipped() {
        let program = program_from("const a = @@loopIndex\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let (map, errors) = build_constant_map(&program);
        assert!(errors.is_empty());
        assert!(map.get("a").is_none());
    }
}
