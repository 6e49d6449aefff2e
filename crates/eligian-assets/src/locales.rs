//! Locales/labels side-registry (spec §4.3: "map of dotted translation keys
//! to set of locale codes").

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Default)]
pub struct LocalesMetadata {
    /// Dotted translation key -> locale codes that define it.
    pub keys: FxHashMap<String, FxHashSet<String>>,
    pub locale_codes: FxHashSet<String>,
}

#[derive(Debug, Error)]
pub enum LocalesParseError {
    #[error("invalid locales JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a top-level JSON object of locale code -> labels")]
    NotAnObject,
}

/// Parse a `locales.json`/`labels.json` file shaped as
/// `{ "en-US": { "button": { "text": "Go" } }, "nl-NL": { ... } }` into a
/// dotted-key index. Flattening makes `button.text` queryable regardless of
/// nesting depth.
pub fn parse_locales(source: &str) -> Result<LocalesMetadata, LocalesParseError> {
    let value: Value = serde_json::from_str(source)?;
    let Value::Object(locales) = value else { return Err(LocalesParseError::NotAnObject) };

    let mut meta = LocalesMetadata::default();
    for (locale_code, translations) in locales {
        meta.locale_codes.insert(locale_code.clone());
        let mut keys = Vec::new();
        flatten_keys(&translations, "", &mut keys);
        for key in keys {
            meta.keys.entry(key).or_default().insert(locale_code.clone());
        }
    }
    Ok(meta)
}

fn flatten_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                flatten_keys(child, &path, out);
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.push(prefix.to_string());
            }
        }
    }
}

impl LocalesMetadata {
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_keys_per_locale() {
        let meta = parse_locales(
            r#"{
                "en-US": {"button": {"text": "Go"}, "title": "Welcome"},
                "nl-NL": {"button": {"text": "Ga"}}
            }"#,
        )
        .unwrap();
        assert!(meta.has_key("button.text"));
        assert!(meta.has_key("title"));
        assert!(!meta.has_key("button"));
        assert_eq!(meta.keys["button.text"].len(), 2);
        assert_eq!(meta.keys["title"].len(), 1);
    }

    #[test]
    fn rejects_non_object_top_level() {
        assert!(parse_locales("[1, 2, 3]").is_err());
    }
}
