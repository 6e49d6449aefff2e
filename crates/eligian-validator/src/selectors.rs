//! CSS selector syntax and class/id/label existence checks against the
//! asset registries (spec §4.3, §4.5).

use crate::context::ValidationContext;
use eligian_assets::{is_valid_selector_syntax, parse_css};
use eligian_common::{Diagnostic, DiagnosticCode, ValidationErrorKind};
use eligian_parser::ast::{CallStatement, Expr, Literal};
use eligian_types::ArrayElementKind;

/// Walks a call's string-literal arguments against its operation signature,
/// flagging bad selector syntax and unknown class/id/label references.
#[must_use]
pub fn check_call_selectors(ctx: &ValidationContext, call: &CallStatement) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let Some(op) = eligian_types::lookup_operation(&call.name) else { return diagnostics };

    for (param, arg) in op.params.iter().zip(&call.args) {
        if param.name == "selector" {
            check_selector_arg(ctx, arg, &mut diagnostics);
        }
        if param.array_element_kind == Some(ArrayElementKind::TranslationKeyList) {
            if let Expr::Array { elements, .. } = arg {
                for element in elements {
                    check_label_key_arg(ctx, element, &mut diagnostics);
                }
            }
        }
    }
    diagnostics
}

fn check_selector_arg(ctx: &ValidationContext, arg: &Expr, diagnostics: &mut Vec<Diagnostic>) {
    let Expr::Literal { value: Literal::String(selector), span } = arg else { return };

    if !is_valid_selector_syntax(selector) {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::Validation(ValidationErrorKind::ValidSelector),
            &ctx.doc.uri,
            ctx.location(*span),
            format!("'{selector}' is not a syntactically valid CSS selector"),
        ));
        return;
    }

    let referenced = parse_css(selector);
    for class in &referenced.classes {
        let in_css = ctx.assets.css_class_exists(&ctx.doc.uri, class);
        let in_html = ctx.assets.html_metadata_for(&ctx.doc.uri).is_some_and(|m| m.classes.contains(class));
        if !in_css && !in_html {
            let mut diag = Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::ValidSelector),
                &ctx.doc.uri,
                ctx.location(*span),
                format!("class '.{class}' was not found in any imported stylesheet or layout"),
            );
            if let Some(suggestion) = ctx.assets.suggest_css_class(&ctx.doc.uri, class) {
                diag = diag.with_hint(format!("did you mean '.{suggestion}'?"));
            }
            diagnostics.push(diag);
        }
    }
    for id in &referenced.ids {
        let in_css = ctx.assets.css_id_exists(&ctx.doc.uri, id);
        let in_html = ctx.assets.html_metadata_for(&ctx.doc.uri).is_some_and(|m| m.ids.contains(id));
        if !in_css && !in_html {
            let mut diag = Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::ValidSelector),
                &ctx.doc.uri,
                ctx.location(*span),
                format!("id '#{id}' was not found in any imported stylesheet or layout"),
            );
            if let Some(suggestion) = ctx.assets.suggest_css_id(&ctx.doc.uri, id) {
                diag = diag.with_hint(format!("did you mean '#{suggestion}'?"));
            }
            diagnostics.push(diag);
        }
    }
}

fn check_label_key_arg(ctx: &ValidationContext, arg: &Expr, diagnostics: &mut Vec<Diagnostic>) {
    let Expr::Literal { value: Literal::String(key), span } = arg else { return };
    if ctx.assets.locale_key_exists(&ctx.doc.uri, key) {
        return;
    }
    let mut diag = Diagnostic::error(
        DiagnosticCode::Validation(ValidationErrorKind::MissingRequiredField),
        &ctx.doc.uri,
        ctx.location(*span),
        format!("translation key '{key}' was not found in any imported locales file"),
    );
    if let Some(suggestion) = ctx.assets.suggest_locale_key(&ctx.doc.uri, key) {
        diag = diag.with_hint(format!("did you mean '{suggestion}'?"));
    }
    diagnostics.push(diag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_assets::AssetRegistries;
    use eligian_parser::ast::AssetKind;
    use eligian_workspace::{Document, IndexManager};

    fn call_from(src: &str) -> (Document, CallStatement) {
        let mut doc = Document::new("main.eligian", src.to_string());
        let ast = eligian_parser::parse(src).unwrap();
        let call = match &ast {
            eligian_parser::Document::Program(p) => p
                .timelines()
                .next()
                .and_then(|t| t.events.first())
                .and_then(|e| match e {
                    eligian_parser::ast::TimelineEvent::Timed { start_ops, .. } => start_ops.first(),
                    _ => None,
                })
                .and_then(|s| match s {
                    eligian_parser::ast::Statement::Call(c) => Some(c.clone()),
                    _ => None,
                })
                .unwrap(),
            eligian_parser::Document::Library(_) => panic!("expected program"),
        };
        doc.ast = Some(ast);
        (doc, call)
    }

    #[test]
    fn flags_invalid_selector_syntax() {
        let (doc, call) = call_from("timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\"[unterminated\"); } }");
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let diagnostics = check_call_selectors(&ctx, &call);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::ValidSelector)));
    }

    #[test]
    fn flags_unknown_css_class() {
        let (doc, call) = call_from("timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".missing\"); } }");
        let index = IndexManager::new();
        let mut assets = AssetRegistries::new();
        assets.update_css_file("main.css", ".present { color: red; }");
        assets.register_import(&doc.uri, AssetKind::Styles, "main.css");
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let diagnostics = check_call_selectors(&ctx, &call);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::ValidSelector)));
    }
}
