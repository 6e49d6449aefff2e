//! Shared shapes for the query layer, independent of any transport's wire
//! format (spec §6).

use eligian_common::Position;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// One file's worth of edits, keyed by document URI (an LSP `WorkspaceEdit`
/// narrowed to what our code actions ever produce: no renames, no creates
/// other than the labels-file case which returns the full content instead).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub changes: Vec<(String, Vec<TextEdit>)>,
}

impl WorkspaceEdit {
    #[must_use]
    pub fn single(uri: impl Into<String>, edit: TextEdit) -> Self {
        Self { changes: vec![(uri.into(), vec![edit])] }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionItemKind {
    Operation,
    Action,
    CssClass,
    CssId,
    HtmlElement,
    HtmlAttribute,
    Event,
    Controller,
    LabelKey,
    SystemVariable,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    pub detail: Option<String>,
    /// Plain replacement text, or a snippet with `$1`/`$2`/`$0` tab stops
    /// when `is_snippet` is set (spec §6: "producing complete event-action
    /// skeletons via snippet").
    pub insert_text: String,
    pub is_snippet: bool,
}

impl CompletionItem {
    #[must_use]
    pub fn plain(label: impl Into<String>, kind: CompletionItemKind, detail: Option<String>) -> Self {
        let label = label.into();
        Self { insert_text: label.clone(), label, kind, detail, is_snippet: false }
    }

    #[must_use]
    pub fn snippet(label: impl Into<String>, kind: CompletionItemKind, detail: Option<String>, insert_text: impl Into<String>) -> Self {
        Self { label: label.into(), kind, detail, insert_text: insert_text.into(), is_snippet: true }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentLink {
    pub range: Range,
    /// The command URI the client should invoke (spec §6: "clickable to
    /// open an external locale editor command").
    pub target: String,
    pub tooltip: Option<String>,
}
