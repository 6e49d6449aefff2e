//! CSS side-registry: class/id extraction and selector syntax sanity
//! (spec §4.3, §4.5).

use rustc_hash::FxHashSet;

#[derive(Clone, Debug, Default)]
pub struct CssMetadata {
    pub classes: FxHashSet<String>,
    pub ids: FxHashSet<String>,
}

/// Extract every class and id selector token from a stylesheet. This is a
/// scanner, not a full CSS parser: it looks for `.ident`/`#ident` runs
/// outside of string literals and comments, which is sufficient to build the
/// validation side-index (spec §4.3: "set of CSS classes, set of IDs").
#[must_use]
pub fn parse_css(source: &str) -> CssMetadata {
    let mut meta = CssMetadata::default();
    let bytes = source.as_bytes();
    let mut i = 0;
    let mut in_string: Option<u8> = None;
    while i < bytes.len() {
        let c = bytes[i];
        if let Some(quote) = in_string {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }
        match c {
            b'"' | b'\'' => {
                in_string = Some(c);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
            }
            b'.' | b'#' => {
                let is_class = c == b'.';
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_ident_byte(bytes[end]) {
                    end += 1;
                }
                if end > start {
                    let name = source[start..end].to_string();
                    if is_class {
                        meta.classes.insert(name);
                    } else {
                        meta.ids.insert(name);
                    }
                    i = end;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    meta
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Balanced-brackets/quotes sanity check for a selector string passed as an
/// operation argument (spec §4.5: "CSS selector syntax sanity").
#[must_use]
pub fn is_valid_selector_syntax(selector: &str) -> bool {
    let mut bracket_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut in_string: Option<char> = None;
    for c in selector.chars() {
        if let Some(quote) = in_string {
            if c == quote {
                in_string = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_string = Some(c),
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            _ => {}
        }
        if bracket_depth < 0 || paren_depth < 0 {
            return false;
        }
    }
    bracket_depth == 0 && paren_depth == 0 && in_string.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_classes_and_ids() {
        let meta = parse_css(".button { color: red; } #stage { width: 100%; } .button.active {}");
        assert!(meta.classes.contains("button"));
        assert!(meta.classes.contains("active"));
        assert!(meta.ids.contains("stage"));
    }

    #[test]
    fn ignores_selectors_inside_strings_and_comments() {
        let meta = parse_css("/* .ignored */ a[href=\".fake\"] { content: \".also-fake\"; } .real {}");
        assert!(!meta.classes.contains("ignored"));
        assert!(!meta.classes.contains("fake"));
        assert!(!meta.classes.contains("also-fake"));
        assert!(meta.classes.contains("real"));
    }

    #[test]
    fn detects_unbalanced_selector_syntax() {
        assert!(is_valid_selector_syntax(".button"));
        assert!(!is_valid_selector_syntax(".button["));
        assert!(!is_valid_selector_syntax("a[href=\"unterminated]"));
    }
}
