//! Completion sources (spec §6): operation names, custom action names, CSS
//! class/id names, HTML elements/attributes, event skeletons, controllers,
//! label keys, and system-scope variables filtered by context.

use crate::types::{CompletionItem, CompletionItemKind};
use eligian_assets::AssetRegistries;
use eligian_parser::ast::Program;

/// Operation names, excluding DSL-only syntax sugar (spec §6: "filtering out
/// DSL syntax operations like `forEach`/`ifCondition`").
#[must_use]
pub fn complete_operation_names() -> Vec<CompletionItem> {
    eligian_types::operations::all()
        .filter(|sig| !sig.is_syntax_only)
        .map(|sig| CompletionItem::plain(sig.name, CompletionItemKind::Operation, Some(sig.description.to_string())))
        .collect()
}

/// Custom action names defined in the document itself (spec §6: "custom
/// action names defined in the document").
#[must_use]
pub fn complete_action_names(program: &Program) -> Vec<CompletionItem> {
    program
        .actions()
        .map(|a| {
            let params = a.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ");
            CompletionItem::plain(a.name.clone(), CompletionItemKind::Action, Some(format!("({params})")))
        })
        .collect()
}

/// Where in a string literal a CSS completion request landed, since `.` and
/// `#` prefixes select classes vs ids (spec §6: "with `.`/`#` prefix
/// detection inside string literals").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CssCompletionContext {
    Class,
    Id,
}

#[must_use]
pub fn complete_css_class(assets: &AssetRegistries, doc_uri: &str) -> Vec<CompletionItem> {
    assets.css_classes(doc_uri).into_iter().map(|c| CompletionItem::plain(c, CompletionItemKind::CssClass, None)).collect()
}

#[must_use]
pub fn complete_css_id(assets: &AssetRegistries, doc_uri: &str) -> Vec<CompletionItem> {
    assets.css_ids(doc_uri).into_iter().map(|c| CompletionItem::plain(c, CompletionItemKind::CssId, None)).collect()
}

#[must_use]
pub fn complete_html_elements(assets: &AssetRegistries, doc_uri: &str) -> Vec<CompletionItem> {
    let Some(html) = assets.html_metadata_for(doc_uri) else { return Vec::new() };
    html.elements.iter().map(|e| CompletionItem::plain(e.clone(), CompletionItemKind::HtmlElement, None)).collect()
}

/// HTML attributes seen on elements in the imported layout. The scanner
/// (`eligian_assets::html`) only records `id`/`class` values, not the
/// attribute names themselves, so this completes the two attributes a
/// layout can actually be queried by.
#[must_use]
pub fn complete_html_attributes(assets: &AssetRegistries, doc_uri: &str) -> Vec<CompletionItem> {
    let Some(html) = assets.html_metadata_for(doc_uri) else { return Vec::new() };
    let mut items = Vec::new();
    if !html.ids.is_empty() {
        items.push(CompletionItem::plain("id", CompletionItemKind::HtmlAttribute, None));
    }
    if !html.classes.is_empty() {
        items.push(CompletionItem::plain("class", CompletionItemKind::HtmlAttribute, None));
    }
    items
}

/// Event names, each producing a full event-action skeleton (spec §6:
/// "producing complete event-action skeletons via snippet").
#[must_use]
pub fn complete_event_names() -> Vec<CompletionItem> {
    eligian_types::events::all_names()
        .map(|name| {
            let sig = eligian_types::lookup_event(name).expect("name came from the registry it's looked up in");
            let params: Vec<String> = (0..sig.provided_args).map(|i| format!("arg{}", i + 1)).collect();
            let param_list = params.iter().enumerate().map(|(i, p)| format!("${}:{p}", i + 1)).collect::<Vec<_>>().join(", ");
            let handler_name = format!("handle{}", titlecase(name));
            let snippet = format!("on \"{name}\" as {handler_name}({param_list}) {{\n\t$0\n}}");
            CompletionItem::snippet(name, CompletionItemKind::Event, Some(format!("{} argument(s)", sig.provided_args)), snippet)
        })
        .collect()
}

fn titlecase(event_name: &str) -> String {
    event_name.split(['-', '_']).map(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }).collect()
}

/// Controller system names already referenced via `addController(...)` calls
/// elsewhere in the document, offered as completions for a new call (spec
/// §6: "controllers").
#[must_use]
pub fn complete_controller_names(program: &Program) -> Vec<CompletionItem> {
    let mut names: Vec<&str> = Vec::new();
    for action in program.actions() {
        collect_controller_names(action_statements(action), &mut names);
    }
    for event in program.event_actions() {
        collect_controller_names(&event.body, &mut names);
    }
    names.sort_unstable();
    names.dedup();
    names.into_iter().map(|n| CompletionItem::plain(n, CompletionItemKind::Controller, None)).collect()
}

fn action_statements(action: &eligian_parser::ast::ActionDecl) -> &[eligian_parser::ast::Statement] {
    match &action.body {
        eligian_parser::ast::ActionBody::Regular(body) => body,
        eligian_parser::ast::ActionBody::Endable { start, .. } => start,
    }
}

fn collect_controller_names<'a>(statements: &'a [eligian_parser::ast::Statement], out: &mut Vec<&'a str>) {
    use eligian_parser::ast::{Expr, Literal, Statement};
    for stmt in statements {
        match stmt {
            Statement::Call(call) if call.name == "addController" => {
                if let Some(Expr::Literal { value: Literal::String(s), .. }) = call.args.first() {
                    out.push(s.as_str());
                }
            }
            Statement::If(if_stmt) => {
                collect_controller_names(&if_stmt.then_branch, out);
                if let Some(else_branch) = &if_stmt.else_branch {
                    collect_controller_names(else_branch, out);
                }
            }
            Statement::For(for_stmt) => collect_controller_names(&for_stmt.body, out),
            _ => {}
        }
    }
}

/// Dotted translation keys known through the document's locale imports
/// (spec §6: "label/translation keys").
#[must_use]
pub fn complete_label_keys(assets: &AssetRegistries, doc_uri: &str) -> Vec<CompletionItem> {
    assets.locale_keys(doc_uri).into_iter().map(|k| CompletionItem::plain(k, CompletionItemKind::LabelKey, None)).collect()
}

/// Where a system-scope variable (`@@loopIndex`, …) is being completed, so
/// the set offered is filtered to what's actually in scope (spec §6:
/// "filtered by context (loop vs action vs always)").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemScopeContext {
    Loop,
    Action,
    Always,
}

#[must_use]
pub fn complete_system_scope_variables(context: SystemScopeContext) -> Vec<CompletionItem> {
    let mut items = vec![CompletionItem::plain("@@globalData", CompletionItemKind::SystemVariable, Some("shared global data object".to_string()))];
    if matches!(context, SystemScopeContext::Loop) {
        items.push(CompletionItem::plain(
            "@@loopIndex",
            CompletionItemKind::SystemVariable,
            Some("zero-based index of the current `for` iteration".to_string()),
        ));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_parser::ast::AssetKind;

    #[test]
    fn operation_completions_exclude_syntax_only() {
        let items = complete_operation_names();
        assert!(items.iter().any(|i| i.label == "selectElement"));
        assert!(!items.iter().any(|i| i.label == "forEach"));
    }

    #[test]
    fn event_completions_produce_snippets() {
        let items = complete_event_names();
        let play = items.iter().find(|i| i.label == "play").unwrap();
        assert!(play.is_snippet);
        assert!(play.insert_text.contains("on \"play\""));
    }

    #[test]
    fn css_completions_come_from_imported_stylesheet() {
        let mut assets = AssetRegistries::new();
        assets.update_css_file("main.css", ".hero { color: red; } #stage {}");
        assets.register_import("doc.eligian", AssetKind::Styles, "main.css");
        let classes = complete_css_class(&assets, "doc.eligian");
        assert!(classes.iter().any(|c| c.label == "hero"));
        let ids = complete_css_id(&assets, "doc.eligian");
        assert!(ids.iter().any(|c| c.label == "stage"));
    }

    #[test]
    fn loop_scope_includes_loop_index_action_scope_does_not() {
        let loop_vars = complete_system_scope_variables(SystemScopeContext::Loop);
        assert!(loop_vars.iter().any(|i| i.label == "@@loopIndex"));
        let action_vars = complete_system_scope_variables(SystemScopeContext::Action);
        assert!(!action_vars.iter().any(|i| i.label == "@@loopIndex"));
    }

    #[test]
    fn finds_controller_names_used_in_document() {
        let doc = eligian_parser::parse(
            "action show(selector) { selectElement(selector); addController(\"fadeInController\", {}); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { show(\".x\"); } }",
        )
        .unwrap();
        let eligian_parser::ast::Document::Program(program) = &doc else { panic!("expected a program") };
        let items = complete_controller_names(program);
        assert!(items.iter().any(|i| i.label == "fadeInController"));
    }
}
