//! Document links (spec §6): label/locales import paths become clickable,
//! opening an external locale-editor command.

use crate::types::{DocumentLink, Range};
use eligian_common::LineMap;
use eligian_common::Spanned;
use eligian_parser::ast::{AssetKind, Program};

const OPEN_LOCALE_EDITOR_COMMAND: &str = "eligian.openLocaleEditor";

#[must_use]
pub fn asset_import_links(program: &Program, source: &str) -> Vec<DocumentLink> {
    let line_map = LineMap::build(source);
    program
        .default_imports()
        .filter(|import| import.kind == AssetKind::Locales)
        .map(|import| {
            let span = import.path_span;
            let start = line_map.offset_to_position(span.start());
            let end = line_map.offset_to_position(span.end());
            DocumentLink {
                range: Range::new(start, end),
                target: format!("command:{OPEN_LOCALE_EDITOR_COMMAND}?{}", json_arg(&import.path)),
                tooltip: Some("Open in locale editor".to_string()),
            }
        })
        .collect()
}

fn json_arg(path: &str) -> String {
    serde_json::to_string(&[path]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_locales_import_path() {
        let doc = eligian_parser::parse("locales \"locales.json\"\ntimeline \"t\" in \"#s\" using raf {}").unwrap();
        let eligian_parser::ast::Document::Program(program) = &doc else { panic!("expected a program") };
        let links = asset_import_links(program, "locales \"locales.json\"\ntimeline \"t\" in \"#s\" using raf {}");
        assert_eq!(links.len(), 1);
        assert!(links[0].target.contains("locales.json"));
    }

    #[test]
    fn does_not_link_css_imports() {
        let doc = eligian_parser::parse("styles \"main.css\"\ntimeline \"t\" in \"#s\" using raf {}").unwrap();
        let eligian_parser::ast::Document::Program(program) = &doc else { panic!("expected a program") };
        let links = asset_import_links(program, "styles \"main.css\"\ntimeline \"t\" in \"#s\" using raf {}");
        assert!(links.is_empty());
    }
}
