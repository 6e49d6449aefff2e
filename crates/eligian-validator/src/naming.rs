//! Name-uniqueness and built-in-conflict rules (spec §3 invariants 3-4, §4.5).

use crate::context::ValidationContext;
use eligian_common::{Diagnostic, DiagnosticCode, Severity, ValidationErrorKind};
use eligian_parser::ast::{self, ActionDecl};
use rustc_hash::FxHashMap;

#[must_use]
pub fn check_action_names(ctx: &ValidationContext, actions: &[&ActionDecl]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: FxHashMap<&str, eligian_common::Span> = FxHashMap::default();

    for action in actions {
        if let Some(&first_span) = seen.get(action.name.as_str()) {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::DuplicateDefinition),
                    &ctx.doc.uri,
                    ctx.location(action.name_span),
                    format!("action '{}' is already defined", action.name),
                )
                .with_hint(format!("first defined at {}", ctx.line_map.offset_to_position(first_span.start))),
            );
        } else {
            seen.insert(&action.name, action.name_span);
        }

        // `forEach`/`ifCondition` are parsed as the `for`/`if` keywords, never
        // as call-like identifiers, so they can't actually collide.
        if eligian_types::lookup_operation(&action.name).is_some_and(|op| op.name != "forEach" && op.name != "ifCondition") {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::ActionNameBuiltinConflict,
                &ctx.doc.uri,
                ctx.location(action.name_span),
                format!("action name '{}' collides with a built-in operation", action.name),
            ));
        }
    }
    diagnostics
}

/// Duplicate `on event "<name>" [topic "<t>"]` registrations for the same
/// event/topic pair within one document.
#[must_use]
pub fn check_duplicate_event_actions(ctx: &ValidationContext, event_actions: &[&ast::EventActionDecl]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: FxHashMap<(String, Option<String>), eligian_common::Span> = FxHashMap::default();

    for ev in event_actions {
        let key = (ev.event_name.clone(), ev.topic.clone());
        if let Some(&first_span) = seen.get(&key) {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::Validation(ValidationErrorKind::UniqueEventIds),
                    &ctx.doc.uri,
                    ctx.location(ev.event_name_span),
                    format!("event '{}' is already handled in this document", ev.event_name),
                )
                .with_hint(format!("first handled at {}", ctx.line_map.offset_to_position(first_span.start))),
            );
        } else {
            seen.insert(key, ev.event_name_span);
        }

        if eligian_types::lookup_event(&ev.event_name).is_none() {
            let suggestion = eligian_assets::suggest(eligian_types::events::all_names(), &ev.event_name);
            let mut diag = Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::ValidActionType),
                &ctx.doc.uri,
                ctx.location(ev.event_name_span),
                format!("'{}' is not a known event", ev.event_name),
            );
            if let Some(suggestion) = suggestion {
                diag = diag.with_hint(format!("did you mean '{suggestion}'?"));
            }
            diagnostics.push(diag);
        } else if let Some(sig) = eligian_types::lookup_event(&ev.event_name) {
            let declared = ev.params.len();
            if declared != sig.provided_args {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Warning,
                        DiagnosticCode::Validation(ValidationErrorKind::ParameterArityMismatch),
                        &ctx.doc.uri,
                        ctx.location(ev.event_name_span),
                        format!(
                            "event '{}' provides {} argument(s) but the handler declares {}",
                            ev.event_name, sig.provided_args, declared
                        ),
                    ),
                );
            }
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_assets::AssetRegistries;
    use eligian_workspace::{Document, IndexManager};

    fn doc_with(src: &str) -> Document {
        let mut doc = Document::new("main.eligian", src.to_string());
        doc.ast = Some(eligian_parser::parse(src).unwrap());
        doc
    }

    #[test]
    fn flags_duplicate_action_names() {
        let doc = doc_with(
            "action foo(x) { log(x); }\naction foo(y) { log(y); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }",
        );
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let program = doc.as_program().unwrap();
        let actions: Vec<&ActionDecl> = program.actions().collect();
        let diagnostics = check_action_names(&ctx, &actions);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::DuplicateDefinition)));
    }

    #[test]
    fn flags_action_colliding_with_builtin() {
        let doc = doc_with("action selectElement(x) { log(x); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { } }");
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let program = doc.as_program().unwrap();
        let actions: Vec<&ActionDecl> = program.actions().collect();
        let diagnostics = check_action_names(&ctx, &actions);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::ActionNameBuiltinConflict));
    }
}
