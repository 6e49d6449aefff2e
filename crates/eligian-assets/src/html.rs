//! HTML layout side-registry (spec §4.3, §6 completion sources).

use rustc_hash::FxHashSet;

#[derive(Clone, Debug, Default)]
pub struct HtmlMetadata {
    pub ids: FxHashSet<String>,
    pub classes: FxHashSet<String>,
    pub elements: FxHashSet<String>,
}

/// Scan an HTML layout file for element tags plus `id`/`class` attribute
/// values. Not a conforming HTML parser: it is a tag/attribute scanner good
/// enough to populate the validation and completion side-index.
#[must_use]
pub fn parse_html(source: &str) -> HtmlMetadata {
    let mut meta = HtmlMetadata::default();
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'!') {
            // doctype or comment, skip to matching '>'
            while i < bytes.len() && bytes[i] != b'>' {
                i += 1;
            }
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'/') {
            i += 1;
            continue;
        }
        let tag_start = i + 1;
        let mut tag_end = tag_start;
        while tag_end < bytes.len() && is_ident_byte(bytes[tag_end]) {
            tag_end += 1;
        }
        if tag_end > tag_start {
            meta.elements.insert(source[tag_start..tag_end].to_lowercase());
        }
        let mut end = tag_end;
        while end < bytes.len() && bytes[end] != b'>' {
            end += 1;
        }
        let tag_text = &source[tag_start..end.min(source.len())];
        for id in extract_attr_values(tag_text, "id") {
            meta.ids.insert(id);
        }
        for class_attr in extract_attr_values(tag_text, "class") {
            for class in class_attr.split_whitespace() {
                meta.classes.insert(class.to_string());
            }
        }
        i = end + 1;
    }
    meta
}

fn extract_attr_values(tag_text: &str, attr: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = tag_text;
    while let Some(pos) = find_attr(rest, attr) {
        rest = &rest[pos + attr.len()..];
        let Some(eq) = rest.find('=') else { break };
        let after_eq = rest[eq + 1..].trim_start();
        let Some(quote) = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'') else { continue };
        let value_start = 1;
        if let Some(value_end) = after_eq[value_start..].find(quote) {
            out.push(after_eq[value_start..value_start + value_end].to_string());
            rest = &after_eq[value_start + value_end..];
        } else {
            break;
        }
    }
    out
}

fn find_attr(text: &str, attr: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let attr_bytes = attr.as_bytes();
    let mut i = 0;
    while i + attr_bytes.len() <= bytes.len() {
        if &bytes[i..i + attr_bytes.len()] == attr_bytes {
            let before_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
            let after = bytes.get(i + attr_bytes.len()).copied();
            let after_ok = matches!(after, Some(b'=') | Some(b' ') | None);
            if before_ok && after_ok {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ids_classes_and_elements() {
        let meta = parse_html(r#"<div id="stage" class="container active"><span class="label"></span></div>"#);
        assert!(meta.ids.contains("stage"));
        assert!(meta.classes.contains("container"));
        assert!(meta.classes.contains("active"));
        assert!(meta.classes.contains("label"));
        assert!(meta.elements.contains("div"));
        assert!(meta.elements.contains("span"));
    }

    #[test]
    fn ignores_doctype_and_closing_tags() {
        let meta = parse_html("<!DOCTYPE html><html><body></body></html>");
        assert!(meta.elements.contains("html"));
        assert!(meta.elements.contains("body"));
        assert!(!meta.elements.contains("!doctype"));
    }
}
