//! The shared asset registries and their per-document import mappings
//! (spec §4.3).

use crate::css::{self, CssMetadata};
use crate::did_you_mean;
use crate::html::{self, HtmlMetadata};
use crate::locales::{self, LocalesMetadata, LocalesParseError};
use eligian_parser::ast::AssetKind;
use rustc_hash::FxHashMap;
use tracing::debug;

/// One `documentURI` -> `assetURI` mapping, kept in source order so the
/// "first imported CSS file" quick-fix rule can be answered (spec §9 open
/// questions).
#[derive(Clone, Debug)]
pub struct AssetImport {
    pub kind: AssetKind,
    pub asset_uri: String,
}

/// Owns the three side-registries plus the per-document import mappings
/// (spec §4.3: "identical shape" across css/html/locales).
#[derive(Debug, Default)]
pub struct AssetRegistries {
    css: FxHashMap<String, CssMetadata>,
    html: FxHashMap<String, HtmlMetadata>,
    locales: FxHashMap<String, LocalesMetadata>,
    imports: FxHashMap<String, Vec<AssetImport>>,
}

impl AssetRegistries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_css_file(&mut self, asset_uri: &str, source: &str) {
        debug!(asset_uri, "updating css registry");
        self.css.insert(asset_uri.to_string(), css::parse_css(source));
    }

    pub fn update_html_file(&mut self, asset_uri: &str, source: &str) {
        debug!(asset_uri, "updating html registry");
        self.html.insert(asset_uri.to_string(), html::parse_html(source));
    }

    pub fn update_locales_file(&mut self, asset_uri: &str, source: &str) -> Result<(), LocalesParseError> {
        debug!(asset_uri, "updating locales registry");
        self.locales.insert(asset_uri.to_string(), locales::parse_locales(source)?);
        Ok(())
    }

    /// Wipe prior mappings before re-registering a document's imports
    /// (spec §4.3 invariant: "stale mappings never survive a re-parse").
    pub fn clear_document_mappings(&mut self, doc_uri: &str) {
        self.imports.remove(doc_uri);
    }

    pub fn register_import(&mut self, doc_uri: &str, kind: AssetKind, asset_uri: &str) {
        self.imports.entry(doc_uri.to_string()).or_default().push(AssetImport { kind, asset_uri: asset_uri.to_string() });
    }

    /// All documents that import `asset_uri`, for hot-reload revalidation
    /// (spec §4.3: "the workspace locates all documents that import that
    /// asset and schedules revalidation").
    #[must_use]
    pub fn documents_importing(&self, asset_uri: &str) -> Vec<String> {
        self.imports
            .iter()
            .filter(|(_, imports)| imports.iter().any(|i| i.asset_uri == asset_uri))
            .map(|(doc_uri, _)| doc_uri.clone())
            .collect()
    }

    fn css_imports(&self, doc_uri: &str) -> impl Iterator<Item = &CssMetadata> {
        self.imports
            .get(doc_uri)
            .into_iter()
            .flatten()
            .filter(|i| i.kind == AssetKind::Styles)
            .filter_map(|i| self.css.get(&i.asset_uri))
    }

    fn locales_imports(&self, doc_uri: &str) -> impl Iterator<Item = &LocalesMetadata> {
        self.imports
            .get(doc_uri)
            .into_iter()
            .flatten()
            .filter(|i| i.kind == AssetKind::Locales)
            .filter_map(|i| self.locales.get(&i.asset_uri))
    }

    #[must_use]
    pub fn html_metadata_for(&self, doc_uri: &str) -> Option<&HtmlMetadata> {
        let asset_uri = self.imports.get(doc_uri)?.iter().find(|i| i.kind == AssetKind::Layout)?.asset_uri.as_str();
        self.html.get(asset_uri)
    }

    #[must_use]
    pub fn css_class_exists(&self, doc_uri: &str, class: &str) -> bool {
        self.css_imports(doc_uri).any(|m| m.classes.contains(class))
    }

    #[must_use]
    pub fn css_id_exists(&self, doc_uri: &str, id: &str) -> bool {
        self.css_imports(doc_uri).any(|m| m.ids.contains(id))
    }

    #[must_use]
    pub fn locale_key_exists(&self, doc_uri: &str, key: &str) -> bool {
        self.locales_imports(doc_uri).any(|m| m.has_key(key))
    }

    /// Every CSS class known to `doc_uri` through its imports, for
    /// completion (spec §6: "CSS class/id names inside known
    /// className/selector arguments").
    #[must_use]
    pub fn css_classes(&self, doc_uri: &str) -> Vec<&str> {
        self.css_imports(doc_uri).flat_map(|m| m.classes.iter().map(String::as_str)).collect()
    }

    #[must_use]
    pub fn css_ids(&self, doc_uri: &str) -> Vec<&str> {
        self.css_imports(doc_uri).flat_map(|m| m.ids.iter().map(String::as_str)).collect()
    }

    /// Every translation key known to `doc_uri` through its locale imports,
    /// for label/translation-key completion (spec §6).
    #[must_use]
    pub fn locale_keys(&self, doc_uri: &str) -> Vec<&str> {
        self.locales_imports(doc_uri).flat_map(|m| m.keys.keys().map(String::as_str)).collect()
    }

    /// Every locale code known to `doc_uri` through its locale imports, used
    /// to generate a `languages {…}` block (spec §6).
    #[must_use]
    pub fn locale_codes(&self, doc_uri: &str) -> Vec<&str> {
        self.locales_imports(doc_uri).flat_map(|m| m.locale_codes.iter().map(String::as_str)).collect()
    }

    #[must_use]
    pub fn suggest_css_class(&self, doc_uri: &str, unknown: &str) -> Option<String> {
        let all: Vec<&str> = self.css_imports(doc_uri).flat_map(|m| m.classes.iter().map(String::as_str)).collect();
        did_you_mean::suggest(all, unknown).map(str::to_string)
    }

    #[must_use]
    pub fn suggest_css_id(&self, doc_uri: &str, unknown: &str) -> Option<String> {
        let all: Vec<&str> = self.css_imports(doc_uri).flat_map(|m| m.ids.iter().map(String::as_str)).collect();
        did_you_mean::suggest(all, unknown).map(str::to_string)
    }

    #[must_use]
    pub fn suggest_locale_key(&self, doc_uri: &str, unknown: &str) -> Option<String> {
        let all: Vec<&str> = self.locales_imports(doc_uri).flat_map(|m| m.keys.keys().map(String::as_str)).collect();
        did_you_mean::suggest(all, unknown).map(str::to_string)
    }

    /// The asset URI of the first CSS file imported by `doc_uri`, in source
    /// order — the quick-fix target when multiple stylesheets are imported
    /// (spec §9 open questions).
    #[must_use]
    pub fn first_imported_css_file(&self, doc_uri: &str) -> Option<&str> {
        self.imports.get(doc_uri)?.iter().find(|i| i.kind == AssetKind::Styles).map(|i| i.asset_uri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_css_class_membership_and_suggests() {
        let mut reg = AssetRegistries::new();
        reg.update_css_file("main.css", ".welcome-title { color: red; }");
        reg.register_import("doc.eligian", AssetKind::Styles, "main.css");
        assert!(reg.css_class_exists("doc.eligian", "welcome-title"));
        assert!(!reg.css_class_exists("doc.eligian", "wellcome-title"));
        assert_eq!(reg.suggest_css_class("doc.eligian", "wellcome-title"), Some("welcome-title".to_string()));
    }

    #[test]
    fn clearing_document_mappings_removes_stale_imports() {
        let mut reg = AssetRegistries::new();
        reg.update_css_file("main.css", ".x {}");
        reg.register_import("doc.eligian", AssetKind::Styles, "main.css");
        assert!(reg.css_class_exists("doc.eligian", "x"));
        reg.clear_document_mappings("doc.eligian");
        assert!(!reg.css_class_exists("doc.eligian", "x"));
    }

    #[test]
    fn hot_reload_updates_all_importing_documents() {
        let mut reg = AssetRegistries::new();
        reg.update_locales_file("locales.json", r#"{"en-US": {}}"#).unwrap();
        reg.register_import("a.eligian", AssetKind::Locales, "locales.json");
        reg.register_import("b.eligian", AssetKind::Locales, "locales.json");
        assert!(!reg.locale_key_exists("a.eligian", "button-text"));
        reg.update_locales_file("locales.json", r#"{"en-US": {"button-text": "Go"}}"#).unwrap();
        let affected = reg.documents_importing("locales.json");
        assert_eq!(affected.len(), 2);
        assert!(reg.locale_key_exists("a.eligian", "button-text"));
        assert!(reg.locale_key_exists("b.eligian", "button-text"));
    }

    #[test]
    fn first_imported_css_file_preserves_source_order() {
        let mut reg = AssetRegistries::new();
        reg.register_import("doc.eligian", AssetKind::Styles, "second.css");
        let mut reg2 = AssetRegistries::new();
        reg2.register_import("doc.eligian", AssetKind::Styles, "first.css");
        reg2.register_import("doc.eligian", AssetKind::Styles, "second.css");
        assert_eq!(reg2.first_imported_css_file("doc.eligian"), Some("first.css"));
    }
}
