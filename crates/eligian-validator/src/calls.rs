//! Call resolution, argument arity, variable references, and control-flow
//! rules walked over one action/event-action body (spec §3 invariants 1/10,
//! §4.4, §4.5).

use crate::context::ValidationContext;
use eligian_common::{Diagnostic, DiagnosticCode, Severity, ValidationErrorKind};
use eligian_parser::ast::{CallStatement, Expr, ForStatement, IfStatement, Statement};
use eligian_types::{LocalScope, Type};
use eligian_workspace::ScopeProvider;

/// Recursively validates a statement block, threading a [`LocalScope`] that
/// grows with loop variables but never leaks them to the parent.
pub fn check_block(ctx: &ValidationContext, statements: &[Statement], scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    for stmt in statements {
        check_statement(ctx, stmt, scope, diagnostics);
    }
}

fn check_statement(ctx: &ValidationContext, stmt: &Statement, scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    match stmt {
        Statement::Call(call) => check_call(ctx, call, scope, diagnostics),
        Statement::If(if_stmt) => check_if_statement(ctx, if_stmt, scope, diagnostics),
        Statement::For(for_stmt) => check_for_statement(ctx, for_stmt, scope, diagnostics),
        Statement::Break(_) | Statement::Continue(_) => {}
    }
}

fn check_call(ctx: &ValidationContext, call: &CallStatement, scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    for arg in &call.args {
        check_expr(ctx, arg, scope, diagnostics);
    }

    if let Some(op) = eligian_types::lookup_operation(&call.name) {
        if op.is_syntax_only {
            return;
        }
        let required = op.params.iter().filter(|p| p.required).count();
        let max = op.params.len();
        if call.args.len() < required || call.args.len() > max {
            diagnostics.push(Diagnostic::new(
                Severity::Warning,
                DiagnosticCode::Validation(ValidationErrorKind::ParameterArityMismatch),
                &ctx.doc.uri,
                ctx.location(call.span),
                format!(
                    "'{}' expects between {} and {} argument(s), found {}",
                    call.name,
                    required,
                    max,
                    call.args.len()
                ),
            ));
        }
        return;
    }

    match ScopeProvider::resolve_action(ctx.doc, ctx.index, &call.name) {
        Some(resolved) => {
            let declared = resolved.action.params.len();
            if call.args.len() != declared {
                diagnostics.push(Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::Validation(ValidationErrorKind::ParameterArityMismatch),
                    &ctx.doc.uri,
                    ctx.location(call.span),
                    format!("action '{}' expects {} argument(s), found {}", call.name, declared, call.args.len()),
                ));
            }
        }
        None => {
            let candidates = eligian_types::operations::all().map(|op| op.name);
            let suggestion = eligian_assets::suggest(candidates, &call.name);
            let mut diag = Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::ActionNotDefined),
                &ctx.doc.uri,
                ctx.location(call.name_span),
                format!("'{}' is not a known operation or action", call.name),
            );
            if let Some(suggestion) = suggestion {
                diag = diag.with_hint(format!("did you mean '{suggestion}'?"));
            }
            diagnostics.push(diag);
        }
    }
}

fn check_if_statement(ctx: &ValidationContext, if_stmt: &IfStatement, scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    check_expr(ctx, &if_stmt.condition, scope, diagnostics);
    let condition_ty = eligian_types::infer(&if_stmt.condition, scope);
    for issue in eligian_types::check_if(condition_ty, if_stmt.then_branch.len()) {
        diagnostics.push(control_flow_diagnostic(ctx, if_stmt.span, issue));
    }
    check_block(ctx, &if_stmt.then_branch, scope, diagnostics);
    if let Some(else_branch) = &if_stmt.else_branch {
        check_block(ctx, else_branch, scope, diagnostics);
    }
}

fn check_for_statement(ctx: &ValidationContext, for_stmt: &ForStatement, scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    check_expr(ctx, &for_stmt.collection, scope, diagnostics);
    let collection_ty = eligian_types::infer(&for_stmt.collection, scope);
    for issue in eligian_types::check_for(collection_ty, for_stmt.body.len()) {
        diagnostics.push(control_flow_diagnostic(ctx, for_stmt.span, issue));
    }
    let mut child_scope = scope.child();
    child_scope.bind(for_stmt.var_name.clone(), Type::Unknown);
    check_block(ctx, &for_stmt.body, &child_scope, diagnostics);
}

fn control_flow_diagnostic(ctx: &ValidationContext, span: eligian_common::Span, issue: eligian_types::ControlFlowIssue) -> Diagnostic {
    use eligian_types::ControlFlowIssue as I;
    let (code, message) = match issue {
        I::NonBooleanCondition => (
            ValidationErrorKind::ValidActionType,
            "condition does not evaluate to a boolean".to_string(),
        ),
        I::NonArrayCollection => (
            ValidationErrorKind::ValidActionType,
            "loop collection does not evaluate to an array".to_string(),
        ),
        I::EmptyBody => (ValidationErrorKind::MissingRequiredField, "body has no statements".to_string()),
    };
    Diagnostic::new(Severity::Warning, DiagnosticCode::Validation(code), &ctx.doc.uri, ctx.location(span), message)
}

/// Checks `@name` references resolve to a bound parameter or loop variable,
/// recursing into compound expressions.
fn check_expr(ctx: &ValidationContext, expr: &Expr, scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    match expr {
        Expr::VariableRef { name, span } => {
            if matches!(scope.lookup(name), Type::Unknown) && !scope.is_bound(name) {
                let suggestion = eligian_assets::suggest(scope.names(), name);
                let mut diag = Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::UndefinedReference),
                    &ctx.doc.uri,
                    ctx.location(*span),
                    format!("'@{name}' is not defined in this scope"),
                );
                if let Some(suggestion) = suggestion {
                    diag = diag.with_hint(format!("did you mean '@{suggestion}'?"));
                }
                diagnostics.push(diag);
            }
        }
        Expr::Literal { .. } | Expr::SystemRef { .. } | Expr::GlobalDataPath { .. } => {}
        Expr::Array { elements, .. } => {
            for element in elements {
                check_expr(ctx, element, scope, diagnostics);
            }
        }
        Expr::Object { fields, .. } => {
            for (_, value) in fields {
                check_expr(ctx, value, scope, diagnostics);
            }
        }
        Expr::Binary { left, right, .. } => {
            check_expr(ctx, left, scope, diagnostics);
            check_expr(ctx, right, scope, diagnostics);
        }
        Expr::Unary { operand, .. } => check_expr(ctx, operand, scope, diagnostics),
    }
}
