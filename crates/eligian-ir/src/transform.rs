//! AST-to-IR desugaring (spec §4.7): action-call lowering, constant
//! inlining, controller sugar, HTML import inlining, and event-action
//! collection. Pure CPU — no file I/O happens here (spec §5); any asset text
//! the document references must already be loaded into
//! [`TransformContext::asset_contents`] by the caller.

use crate::const_fold::{self, ConstantMap};
use crate::ir::{
    ActionIR, AvailableLanguage, DurationIR, EligiusIR, EngineDescriptor, EventActionIR, IrMetadata, OperationIR, TimelineActionIR, TimelineIR,
    TimelineTypeIR,
};
use eligian_assets::AssetRegistries;
use eligian_common::position::LineMap;
use eligian_common::{Diagnostic, DiagnosticCode, TransformErrorKind};
use eligian_parser::ast::{
    ActionBody, ActionDecl, AssetKind, CallStatement, Expr, ForStatement, IfStatement, Library, Program, ProviderKind, Statement, TimelineDecl,
    TimelineEvent,
};
use eligian_workspace::{Document, IndexManager, ScopeProvider};
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Everything a single document's transform pass needs, beyond the parsed
/// AST: the already-built constant map, the asset registries (for metadata
/// lookups; raw bytes come from `asset_contents`), and cross-document action
/// resolution.
pub struct TransformContext<'a> {
    pub doc: &'a Document,
    pub index: &'a IndexManager,
    pub assets: &'a AssetRegistries,
    pub constants: &'a ConstantMap,
    /// Raw text of every asset file this document imports, keyed by the
    /// import path as written in source. Populated by the workspace-level
    /// caller, which owns file I/O.
    pub asset_contents: &'a FxHashMap<String, String>,
    line_map: LineMap,
}

impl<'a> TransformContext<'a> {
    #[must_use]
    pub fn new(doc: &'a Document, index: &'a IndexManager, assets: &'a AssetRegistries, constants: &'a ConstantMap, asset_contents: &'a FxHashMap<String, String>) -> Self {
        let line_map = LineMap::build(&doc.text);
        Self { doc, index, assets, constants, asset_contents, line_map }
    }
}

fn transform_error(ctx: &TransformContext, kind: TransformErrorKind, span: eligian_common::Span, message: impl Into<String>) -> Diagnostic {
    let location = ctx.line_map.offset_to_location(span.start, span.len());
    Diagnostic::error(DiagnosticCode::Transform(kind), ctx.doc.uri.clone(), location, message)
}

/// Transforms a top-level `Program` into the full [`EligiusIR`] record. The
/// returned `actions` only covers this document's own top-level action
/// declarations; a workspace-level caller that also wants to inline
/// transitively-imported library actions runs [`transform_library`] over
/// each imported document and merges the results in before emission.
pub fn transform_program(program: &Program, ctx: &TransformContext, compiled_at: String, source_file: Option<String>) -> (EligiusIR, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let (language, available_languages) = lower_languages(program);
    let container_selector = program.timelines().next().map(|t| t.selector.clone());
    let layout_template = lower_layout_template(program, ctx);

    let actions = program
        .actions()
        .map(|action| lower_action(action, ctx, &mut diagnostics))
        .collect();

    let event_actions = program
        .event_actions()
        .map(|event| EventActionIR {
            id: uuid::Uuid::new_v4(),
            event_name: event.event_name.clone(),
            event_topic: event.topic.clone(),
            start_operations: lower_block(&event.body, ctx, &mut diagnostics),
        })
        .collect();

    let timelines = program.timelines().map(|timeline| lower_timeline(timeline, ctx, &mut diagnostics)).collect();

    let ir = EligiusIR {
        id: uuid::Uuid::new_v4(),
        engine: EngineDescriptor::default(),
        container_selector,
        language,
        layout_template,
        available_languages,
        labels: Vec::new(),
        init_actions: Vec::new(),
        actions,
        event_actions,
        timelines,
        timeline_flow: None,
        timeline_provider_settings: None,
        metadata: IrMetadata {
            dsl_version: "1".to_string(),
            compiler_version: env!("CARGO_PKG_VERSION").to_string(),
            compiled_at,
            source_file,
        },
        source_location: eligian_common::position::SourceLocation::default(),
    };

    (ir, diagnostics)
}

/// Lowers a library document's action definitions to `ActionIR`s, for a
/// workspace-level caller to merge into an importing program's `actions[]`.
pub fn transform_library(library: &Library, ctx: &TransformContext) -> (Vec<ActionIR>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let actions = library.actions.iter().map(|action| lower_action(action, ctx, &mut diagnostics)).collect();
    (actions, diagnostics)
}

fn lower_languages(program: &Program) -> (Option<String>, Vec<AvailableLanguage>) {
    let Some(block) = &program.languages else {
        return (None, Vec::new());
    };
    let available: Vec<AvailableLanguage> = block.languages.iter().map(|l| AvailableLanguage { code: l.code.clone(), label: l.code.clone() }).collect();
    let default = block
        .languages
        .iter()
        .find(|l| l.is_default)
        .or_else(|| if block.languages.len() == 1 { block.languages.first() } else { None })
        .map(|l| l.code.clone());
    (default, available)
}

fn lower_layout_template(program: &Program, ctx: &TransformContext) -> Option<String> {
    let import = program.default_imports().find(|i| i.kind == AssetKind::Layout)?;
    ctx.asset_contents.get(&import.path).cloned()
}

fn lower_action(action: &ActionDecl, ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> ActionIR {
    let (start, end) = match &action.body {
        ActionBody::Regular(body) => (lower_block(body, ctx, diagnostics), None),
        ActionBody::Endable { start, end } => (lower_block(start, ctx, diagnostics), Some(lower_block(end, ctx, diagnostics))),
    };
    ActionIR { id: uuid::Uuid::new_v4(), name: action.name.clone(), start_operations: start, end_operations: end }
}

fn lower_timeline(timeline: &TimelineDecl, ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> TimelineIR {
    let timeline_type = match timeline.provider {
        ProviderKind::Raf => TimelineTypeIR::Raf,
        ProviderKind::Video => TimelineTypeIR::Video,
        ProviderKind::Audio => TimelineTypeIR::Audio,
        ProviderKind::Custom => TimelineTypeIR::Custom,
    };

    let mut actions = Vec::new();
    let mut duration = 0.0_f64;
    for event in &timeline.events {
        match event {
            TimelineEvent::Timed { start, end, start_ops, end_ops, .. } => {
                duration = duration.max(end.seconds);
                actions.push(TimelineActionIR {
                    id: uuid::Uuid::new_v4(),
                    name: format!("timed@{:.3}-{:.3}", start.seconds, end.seconds),
                    duration: DurationIR { start: start.seconds, end: end.seconds },
                    start_operations: lower_block(start_ops, ctx, diagnostics),
                    end_operations: if end_ops.is_empty() { None } else { Some(lower_block(end_ops, ctx, diagnostics)) },
                });
            }
            TimelineEvent::Sequence { body, duration: seq_duration, span } => {
                duration = duration.max(seq_duration.seconds);
                actions.push(TimelineActionIR {
                    id: uuid::Uuid::new_v4(),
                    name: "sequence".to_string(),
                    duration: DurationIR { start: 0.0, end: seq_duration.seconds },
                    start_operations: lower_block(body, ctx, diagnostics),
                    end_operations: None,
                });
                let _ = span;
            }
            TimelineEvent::Stagger { delay, action_name, action_name_span, .. } => {
                if ScopeProvider::resolve_action(ctx.doc, ctx.index, action_name).is_none() {
                    diagnostics.push(transform_error(
                        ctx,
                        TransformErrorKind::InvalidEvent,
                        *action_name_span,
                        format!("stagger references undefined action '{action_name}'"),
                    ));
                    continue;
                }
                let op = OperationIR::new("requestAction")
                    .with_data("systemName", Value::String(action_name.clone()))
                    .with_data("delay", const_fold::json_number(delay.seconds));
                actions.push(TimelineActionIR {
                    id: uuid::Uuid::new_v4(),
                    name: format!("stagger:{action_name}"),
                    duration: DurationIR { start: 0.0, end: delay.seconds },
                    start_operations: vec![op],
                    end_operations: None,
                });
            }
        }
    }

    TimelineIR { id: uuid::Uuid::new_v4(), timeline_type, uri: None, duration, loops: false, selector: timeline.selector.clone(), timeline_actions: actions }
}

/// `if`/`for` bodies can nest arbitrarily; grow the stack rather than bound
/// nesting depth up front (same guard `const_fold::evaluate` uses).
fn lower_block(statements: &[Statement], ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> Vec<OperationIR> {
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || lower_block_inner(statements, ctx, diagnostics))
}

fn lower_block_inner(statements: &[Statement], ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> Vec<OperationIR> {
    let mut ops = Vec::new();
    for statement in statements {
        match statement {
            Statement::Call(call) => lower_call(call, ctx, &mut ops, diagnostics),
            Statement::If(if_stmt) => ops.push(lower_if(if_stmt, ctx, diagnostics)),
            Statement::For(for_stmt) => ops.push(lower_for(for_stmt, ctx, diagnostics)),
            Statement::Break(_) => ops.push(OperationIR::new("break")),
            Statement::Continue(_) => ops.push(OperationIR::new("continue")),
        }
    }
    ops
}

fn lower_call(call: &CallStatement, ctx: &TransformContext, ops: &mut Vec<OperationIR>, diagnostics: &mut Vec<Diagnostic>) {
    if call.name == "addController" {
        lower_controller_sugar(call, ctx, ops, diagnostics);
        return;
    }

    if let Some(op) = eligian_types::lookup_operation(&call.name) {
        if op.is_syntax_only {
            // forEach/ifCondition are parsed as for/if and never reach a
            // call statement; addController is handled above. Nothing else
            // is marked syntax-only.
            return;
        }
        let mut data = serde_json::Map::new();
        for (param, arg) in op.params.iter().zip(&call.args) {
            data.insert(param.name.to_string(), expr_to_value(arg, ctx, diagnostics));
        }
        let mut ir_op = OperationIR::new(call.name.clone());
        ir_op.operation_data = data;
        ops.push(ir_op);
        return;
    }

    match ScopeProvider::resolve_action(ctx.doc, ctx.index, &call.name) {
        Some(resolved) => {
            ops.push(OperationIR::new("requestAction").with_data("systemName", Value::String(call.name.clone())));
            let mut data = serde_json::Map::new();
            for (param, arg) in resolved.action.params.iter().zip(&call.args) {
                data.insert(param.name.clone(), expr_to_value(arg, ctx, diagnostics));
            }
            ops.push(OperationIR::new("startAction").with_data("actionOperationData", Value::Object(data)));
        }
        None => diagnostics.push(transform_error(ctx, TransformErrorKind::InvalidAction, call.name_span, format!("'{}' does not resolve to an operation or action", call.name))),
    }
}

/// `selectElement(sel); addController("X", args);` lowers to the
/// `selectElement` call (left as-is, already pushed) followed by
/// `getControllerInstance` + `addControllerToElement` in place of the
/// `addController` call itself (spec §4.7).
fn lower_controller_sugar(call: &CallStatement, ctx: &TransformContext, ops: &mut Vec<OperationIR>, diagnostics: &mut Vec<Diagnostic>) {
    let preceded_by_select = ops.last().is_some_and(|op| op.system_name == "selectElement");
    if !preceded_by_select {
        diagnostics.push(transform_error(
            ctx,
            TransformErrorKind::InvalidAction,
            call.span,
            "'addController' must immediately follow a 'selectElement' call",
        ));
        return;
    }
    let system_name = call.args.first().map_or(Value::Null, |a| expr_to_value(a, ctx, diagnostics));
    let args = call.args.get(1).map_or_else(|| Value::Object(serde_json::Map::new()), |a| expr_to_value(a, ctx, diagnostics));
    ops.push(OperationIR::new("getControllerInstance").with_data("systemName", system_name));
    ops.push(OperationIR::new("addControllerToElement").with_data("json", args));
}

fn lower_if(if_stmt: &IfStatement, ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> OperationIR {
    let condition = expr_to_value(&if_stmt.condition, ctx, diagnostics);
    let then_ops = operations_to_value(lower_block(&if_stmt.then_branch, ctx, diagnostics));
    let mut op = OperationIR::new("ifCondition").with_data("condition", condition).with_data("operations", then_ops);
    if let Some(else_branch) = &if_stmt.else_branch {
        let else_ops = operations_to_value(lower_block(else_branch, ctx, diagnostics));
        op = op.with_data("elseOperations", else_ops);
    }
    op
}

fn lower_for(for_stmt: &ForStatement, ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> OperationIR {
    let collection = expr_to_value(&for_stmt.collection, ctx, diagnostics);
    let body_ops = operations_to_value(lower_block(&for_stmt.body, ctx, diagnostics));
    OperationIR::new("forEach")
        .with_data("collection", collection)
        .with_data("itemName", Value::String(for_stmt.var_name.clone()))
        .with_data("operations", body_ops)
}

fn operations_to_value(ops: Vec<OperationIR>) -> Value {
    Value::Array(ops.into_iter().map(|op| serde_json::to_value(op).unwrap_or(Value::Null)).collect())
}

fn expr_to_value(expr: &Expr, ctx: &TransformContext, diagnostics: &mut Vec<Diagnostic>) -> Value {
    match expr {
        Expr::VariableRef { name, .. } => ctx.constants.get(name).cloned().unwrap_or_else(|| Value::String(format!("$globalData.{name}"))),
        Expr::SystemRef { name, .. } => Value::String(format!("@@{name}")),
        Expr::GlobalDataPath { segments, .. } => Value::String(format!("$globalData.{}", segments.join("."))),
        Expr::Literal { .. } | Expr::Array { .. } | Expr::Object { .. } | Expr::Unary { .. } | Expr::Binary { .. } => {
            match const_fold::try_fold_with_constants(expr, ctx.constants) {
                Some(value) => value,
                None => {
                    diagnostics.push(transform_error(
                        ctx,
                        TransformErrorKind::InvalidExpression,
                        eligian_common::Spanned::span(expr),
                        "expression does not reduce to a compile-time constant",
                    ));
                    Value::Null
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::const_fold::build_constant_map;

    fn transform_src(src: &str) -> (EligiusIR, Vec<Diagnostic>) {
        let mut doc = Document::new("main.eligian", src);
        doc.ast = Some(eligian_parser::parse(src).unwrap());
        let mut index = IndexManager::new();
        index.register(&doc.uri, doc.ast.as_ref().unwrap());
        let assets = AssetRegistries::new();
        let program = doc.as_program().unwrap().clone();
        let (constants, const_errors) = build_constant_map(&program);
        assert!(const_errors.is_empty());
        let asset_contents = FxHashMap::default();
        let ctx = TransformContext::new(&doc, &index, &assets, &constants, &asset_contents);
        transform_program(&program, &ctx, "2026-01-01T00:00:00Z".to_string(), Some("main.eligian".to_string()))
    }

    #[test]
    fn lowers_builtin_call_into_operation_with_positional_params() {
        let (ir, diagnostics) = transform_src("timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".x\"); } } ");
        assert!(diagnostics.is_empty());
        let ops = &ir.timelines[0].timeline_actions[0].start_operations;
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].system_name, "selectElement");
        assert_eq!(ops[0].operation_data.get("selector"), Some(&Value::String(".x".to_string())));
    }

    #[test]
    fn lowers_user_action_call_into_request_and_start_action() {
        let (ir, diagnostics) =
            transform_src("action greet(name) { log(name); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { greet(\"hi\"); } }");
        assert!(diagnostics.is_empty());
        let ops = &ir.timelines[0].timeline_actions[0].start_operations;
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].system_name, "requestAction");
        assert_eq!(ops[1].system_name, "startAction");
        let data = ops[1].operation_data.get("actionOperationData").unwrap();
        assert_eq!(data.get("name"), Some(&Value::String("hi".to_string())));
    }

    #[test]
    fn inlines_constant_reference() {
        let (ir, diagnostics) =
            transform_src("const greeting = \"hello\"\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { log(@greeting); } }");
        assert!(diagnostics.is_empty());
        let ops = &ir.timelines[0].timeline_actions[0].start_operations;
        assert_eq!(ops[0].operation_data.get("message"), Some(&Value::String("hello".to_string())));
    }

    #[test]
    fn expands_controller_sugar_after_select_element() {
        let (ir, diagnostics) =
            transform_src("timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".x\"); addController(\"scrub\", {}); } }");
        assert!(diagnostics.is_empty());
        let ops = &ir.timelines[0].timeline_actions[0].start_operations;
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1].system_name, "getControllerInstance");
        assert_eq!(ops[2].system_name, "addControllerToElement");
    }

    #[test]
    fn controller_sugar_without_preceding_select_is_a_transform_error() {
        let (_, diagnostics) = transform_src("timeline \"t\" in \"#s\" using raf { at 0s..1s { addController(\"scrub\", {}); } }");
        assert!(diagnostics.iter().any(|d| matches!(d.code, DiagnosticCode::Transform(TransformErrorKind::InvalidAction))));
    }

    #[test]
    fn lowers_if_statement_into_if_condition_operation() {
        let (ir, diagnostics) = transform_src("timeline \"t\" in \"#s\" using raf { at 0s..1s { if (true) { log(\"x\"); } } }");
        assert!(diagnostics.is_empty());
        let ops = &ir.timelines[0].timeline_actions[0].start_operations;
        assert_eq!(ops[0].system_name, "ifCondition");
        assert!(ops[0].operation_data.contains_key("operations"));
    }

    #[test]
    fn container_selector_comes_from_first_timeline() {
        let (ir, _) = transform_src("timeline \"t\" in \"#stage\" using raf { at 0s..1s { } }");
        assert_eq!(ir.container_selector.as_deref(), Some("#stage"));
    }
}
