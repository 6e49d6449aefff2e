//! Shared read-only context threaded through every validation rule.

use eligian_assets::AssetRegistries;
use eligian_common::position::SourceLocation;
use eligian_common::Span;
use eligian_common::LineMap;
use eligian_workspace::{Document, IndexManager};

pub struct ValidationContext<'a> {
    pub doc: &'a Document,
    pub index: &'a IndexManager,
    pub assets: &'a AssetRegistries,
    pub line_map: LineMap,
}

impl<'a> ValidationContext<'a> {
    #[must_use]
    pub fn new(doc: &'a Document, index: &'a IndexManager, assets: &'a AssetRegistries) -> Self {
        Self { doc, index, assets, line_map: LineMap::build(&doc.text) }
    }

    #[must_use]
    pub fn location(&self, span: Span) -> SourceLocation {
        self.line_map.offset_to_location(span.start, span.len())
    }
}
