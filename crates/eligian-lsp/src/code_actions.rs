//! Code actions (spec §6): create a missing labels file, add a missing CSS
//! class/id to the imported stylesheet, generate a `languages {…}` block
//! from imported locales, and fix an asset's declared type.

use crate::types::{Range, TextEdit, WorkspaceEdit};
use eligian_assets::AssetRegistries;
use eligian_common::Position;
use eligian_types::kinds::AssetType;
use serde_json::json;

/// Full starter content for a labels file that doesn't exist yet, keyed by
/// the locale codes already in use (spec §6: "create missing labels file
/// with template content").
#[must_use]
pub fn create_missing_labels_file(locale_codes: &[&str]) -> String {
    let codes = if locale_codes.is_empty() { vec!["en-US"] } else { locale_codes.to_vec() };
    let mut root = serde_json::Map::new();
    for code in codes {
        root.insert(code.to_string(), json!({}));
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(root)).expect("a map of empty objects always serializes")
}

/// A `WorkspaceEdit` that appends a new empty rule for `selector` at the end
/// of the imported CSS file (spec §6: "a WorkspaceEdit that inserts a new
/// rule at end-of-file").
#[must_use]
pub fn add_missing_css_selector(css_file_uri: &str, css_source: &str, selector: &str) -> WorkspaceEdit {
    let line_map = eligian_common::LineMap::build(css_source);
    let last_line = u32::try_from(line_map.line_count()).unwrap_or(u32::MAX);
    let needs_leading_newline = !css_source.ends_with('\n') && !css_source.is_empty();
    let mut new_text = String::new();
    if needs_leading_newline {
        new_text.push('\n');
    }
    new_text.push_str(&format!("{selector} {{\n}}\n"));
    let end_of_file = Position::new(last_line, 1);
    WorkspaceEdit::single(css_file_uri, TextEdit { range: Range::new(end_of_file, end_of_file), new_text })
}

/// Synthesize a `languages { ... }` block listing every locale code known
/// through the document's imports, the first one marked `default` (spec §6:
/// "generate a `languages {…}` block from imported locale files").
#[must_use]
pub fn generate_languages_block(assets: &AssetRegistries, doc_uri: &str) -> Option<String> {
    let mut codes = assets.locale_codes(doc_uri);
    if codes.is_empty() {
        return None;
    }
    codes.sort_unstable();
    codes.dedup();
    let mut block = String::from("languages {\n");
    for (i, code) in codes.iter().enumerate() {
        let default = if i == 0 { " default" } else { "" };
        block.push_str(&format!("  \"{code}\"{default}\n"));
    }
    block.push_str("}\n");
    Some(block)
}

/// Replace the `as <type>` suffix of a default import with the correct
/// asset type (spec §6: "fix asset type via `as <type>`").
#[must_use]
pub fn fix_asset_type(doc_uri: &str, as_clause_range: Range, correct: AssetType) -> WorkspaceEdit {
    let type_name = match correct {
        AssetType::Css => "css",
        AssetType::Html => "html",
        AssetType::Media => "media",
    };
    WorkspaceEdit::single(doc_uri, TextEdit { range: as_clause_range, new_text: format!("as {type_name}") })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_parser::ast::AssetKind;

    #[test]
    fn labels_file_template_covers_every_locale_code() {
        let content = create_missing_labels_file(&["en-US", "nl-NL"]);
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("en-US").is_some());
        assert!(value.get("nl-NL").is_some());
    }

    #[test]
    fn labels_file_template_defaults_to_en_us_when_no_locales_known() {
        let content = create_missing_labels_file(&[]);
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("en-US").is_some());
    }

    #[test]
    fn css_edit_appends_rule_at_end_of_file() {
        let edit = add_missing_css_selector("main.css", ".existing {}\n", ".hero");
        let (uri, edits) = &edit.changes[0];
        assert_eq!(uri, "main.css");
        assert!(edits[0].new_text.contains(".hero {"));
    }

    #[test]
    fn languages_block_marks_first_locale_default() {
        let mut assets = AssetRegistries::new();
        assets.update_locales_file("locales.json", r#"{"en-US": {"a": "A"}, "nl-NL": {"a": "B"}}"#).unwrap();
        assets.register_import("doc.eligian", AssetKind::Locales, "locales.json");
        let block = generate_languages_block(&assets, "doc.eligian").unwrap();
        assert!(block.starts_with("languages {"));
        assert!(block.contains("\"en-US\" default"));
        assert!(block.contains("\"nl-NL\"\n"));
    }

    #[test]
    fn no_languages_block_without_locale_imports() {
        let assets = AssetRegistries::new();
        assert!(generate_languages_block(&assets, "doc.eligian").is_none());
    }
}
