//! Pure query functions over the compiler core for the language server
//! subset described in spec §6: hover, completion, code actions, document
//! links, and on-type formatting. No JSON-RPC transport lives here — that
//! belongs to whatever process embeds this crate, the same split the
//! teacher's own LSP crate draws (it carries no transport dependency
//! either).

pub mod code_actions;
pub mod completion;
pub mod document_links;
pub mod formatting;
pub mod hover;
pub mod notifications;
pub mod types;

pub use code_actions::{
    add_missing_css_selector, create_missing_labels_file, fix_asset_type, generate_languages_block,
};
pub use completion::{
    complete_action_names, complete_controller_names, complete_css_class, complete_css_id, complete_event_names,
    complete_html_attributes, complete_html_elements, complete_label_keys, complete_operation_names,
    complete_system_scope_variables, CssCompletionContext, SystemScopeContext,
};
pub use document_links::asset_import_links;
pub use formatting::jsdoc_template_for_action;
pub use hover::hover_for_operation;
pub use notifications::{AssetUpdated, ImportsDiscovered};
pub use types::{CompletionItem, CompletionItemKind, DocumentLink, Range, TextEdit, WorkspaceEdit};
