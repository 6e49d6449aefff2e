//! Semantic validation: walks a parsed document and its resolved assets,
//! producing the diagnostics spec §4.5 describes (spec §7 for the taxonomy
//! each rule draws from).

mod calls;
mod context;
mod imports;
mod languages;
mod naming;
mod selectors;
mod timeline;

pub use context::ValidationContext;

use eligian_common::Diagnostic;
use eligian_parser::ast::{self, ActionBody, Document as Ast, Expr, Literal, Statement};
use eligian_types::{LocalScope, Type};
use tracing::debug;

/// Runs every validation rule over `ctx.doc`'s AST, returning every
/// diagnostic produced. Parse errors already live on the document and are
/// not duplicated here; this only runs when parsing succeeded.
#[must_use]
pub fn validate_document(ctx: &ValidationContext) -> Vec<Diagnostic> {
    let Some(ast) = ctx.doc.ast.as_ref() else {
        return Vec::new();
    };
    debug!(doc_uri = %ctx.doc.uri, "running semantic validation");

    let mut diagnostics = Vec::new();

    match ast {
        Ast::Program(program) => {
            diagnostics.extend(timeline::check_timeline_presence(ctx, program));

            if let Some(block) = &program.languages {
                diagnostics.extend(languages::check_languages(ctx, block));
            }

            let default_imports: Vec<_> = program.default_imports().collect();
            diagnostics.extend(imports::check_default_imports(ctx, &default_imports));

            let const_scope = program_const_scope(program);

            let actions: Vec<_> = program.actions().collect();
            diagnostics.extend(naming::check_action_names(ctx, &actions));
            for action in &actions {
                validate_action_body(ctx, action, &const_scope, &mut diagnostics);
            }

            let event_actions: Vec<_> = program.event_actions().collect();
            diagnostics.extend(naming::check_duplicate_event_actions(ctx, &event_actions));
            for event_action in &event_actions {
                let mut scope = const_scope.child();
                for param in &event_action.params {
                    scope.bind(param.name.clone(), param.ty.as_ref().map_or(Type::Unknown, Into::into));
                }
                calls::check_block(ctx, &event_action.body, &scope, &mut diagnostics);
                diagnostics.extend(collect_selector_diagnostics(ctx, &event_action.body));
            }

            for timeline in program.timelines() {
                diagnostics.extend(timeline::check_timeline(ctx, timeline));
                validate_timeline_events(ctx, timeline, &const_scope, &mut diagnostics);
            }
        }
        Ast::Library(library) => {
            let actions: Vec<_> = library.actions.iter().collect();
            diagnostics.extend(naming::check_action_names(ctx, &actions));
            for action in &actions {
                validate_action_body(ctx, action, &LocalScope::new(), &mut diagnostics);
            }
        }
    }

    diagnostics
}

/// Binds every top-level `const` name so references to it elsewhere in the
/// document don't read as undefined (spec §4.6: constants are visible to the
/// whole document that declares them, not just their own initializer).
/// Literal-valued constants get their exact type; anything else (an
/// expression referencing other constants) is bound `Unknown` — folding that
/// precisely is `eligian-ir`'s job, run after validation, not this crate's.
fn program_const_scope(program: &ast::Program) -> LocalScope {
    let mut scope = LocalScope::new();
    for decl in program.consts() {
        let ty = match &decl.value {
            Expr::Literal { value: Literal::String(_), .. } => Type::String,
            Expr::Literal { value: Literal::Number(_), .. } => Type::Number,
            Expr::Literal { value: Literal::Boolean(_), .. } => Type::Boolean,
            _ => Type::Unknown,
        };
        scope.bind(decl.name.clone(), ty);
    }
    scope
}

fn validate_action_body(ctx: &ValidationContext, action: &ast::ActionDecl, base_scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    let mut scope = base_scope.child();
    for param in &action.params {
        scope.bind(param.name.clone(), param.ty.as_ref().map_or(Type::Unknown, Into::into));
    }
    match &action.body {
        ActionBody::Regular(body) => {
            calls::check_block(ctx, body, &scope, diagnostics);
            diagnostics.extend(collect_selector_diagnostics(ctx, body));
        }
        ActionBody::Endable { start, end } => {
            calls::check_block(ctx, start, &scope, diagnostics);
            calls::check_block(ctx, end, &scope, diagnostics);
            diagnostics.extend(collect_selector_diagnostics(ctx, start));
            diagnostics.extend(collect_selector_diagnostics(ctx, end));
        }
    }
}

fn validate_timeline_events(ctx: &ValidationContext, timeline_decl: &ast::TimelineDecl, const_scope: &LocalScope, diagnostics: &mut Vec<Diagnostic>) {
    for event in &timeline_decl.events {
        match event {
            ast::TimelineEvent::Timed { start_ops, end_ops, .. } => {
                calls::check_block(ctx, start_ops, const_scope, diagnostics);
                calls::check_block(ctx, end_ops, const_scope, diagnostics);
                diagnostics.extend(collect_selector_diagnostics(ctx, start_ops));
                diagnostics.extend(collect_selector_diagnostics(ctx, end_ops));
            }
            ast::TimelineEvent::Sequence { body, .. } => {
                calls::check_block(ctx, body, const_scope, diagnostics);
                diagnostics.extend(collect_selector_diagnostics(ctx, body));
            }
            ast::TimelineEvent::Stagger { action_name, action_name_span, .. } => {
                if eligian_workspace::ScopeProvider::resolve_action(ctx.doc, ctx.index, action_name).is_none() {
                    diagnostics.push(Diagnostic::error(
                        eligian_common::DiagnosticCode::Validation(eligian_common::ValidationErrorKind::ActionNotDefined),
                        &ctx.doc.uri,
                        ctx.location(*action_name_span),
                        format!("'{action_name}' is not a known action"),
                    ));
                }
            }
        }
    }
}

fn collect_selector_diagnostics(ctx: &ValidationContext, statements: &[Statement]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    walk_statements(statements, &mut |call| {
        diagnostics.extend(selectors::check_call_selectors(ctx, call));
    });
    diagnostics
}

fn walk_statements(statements: &[Statement], visit: &mut impl FnMut(&ast::CallStatement)) {
    for stmt in statements {
        match stmt {
            Statement::Call(call) => visit(call),
            Statement::If(if_stmt) => {
                walk_statements(&if_stmt.then_branch, visit);
                if let Some(else_branch) = &if_stmt.else_branch {
                    walk_statements(else_branch, visit);
                }
            }
            Statement::For(for_stmt) => walk_statements(&for_stmt.body, visit),
            Statement::Break(_) | Statement::Continue(_) => {}
        }
    }
}
