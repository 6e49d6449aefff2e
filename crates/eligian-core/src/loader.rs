//! Loads the asset files (stylesheets, layout HTML, locales, provider
//! scripts) a document's default imports name, feeding both the shared
//! [`AssetRegistries`] and the raw text the transform stage inlines into a
//! layout template (spec §4.3, §4.7).

use eligian_assets::AssetRegistries;
use eligian_parser::ast::{AssetKind, Program};
use eligian_workspace::Workspace;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read asset '{path}' imported by {doc_uri}: {source}")]
    Io { doc_uri: String, path: String, #[source] source: std::io::Error },
    #[error("invalid locales file '{path}' imported by {doc_uri}: {source}")]
    Locales { doc_uri: String, path: String, #[source] source: eligian_assets::locales::LocalesParseError },
}

/// Resolves `program`'s default imports against `doc_uri`'s directory, reads
/// each through `workspace`'s file-system provider, and updates `assets`.
/// Returns the raw text of every import keyed by the import path as written
/// in source, which is all a [`eligian_ir::transform::TransformContext`]
/// needs for layout-template inlining.
pub fn load_document_assets(
    doc_uri: &str,
    program: &Program,
    workspace: &Workspace,
    assets: &mut AssetRegistries,
) -> Result<FxHashMap<String, String>, LoadError> {
    assets.clear_document_mappings(doc_uri);
    let base = Path::new(doc_uri).parent().unwrap_or_else(|| Path::new(""));
    let mut asset_contents = FxHashMap::default();

    for import in program.default_imports() {
        let asset_path = base.join(&import.path);
        let asset_uri = asset_path.to_string_lossy().to_string();

        let contents = workspace
            .read_asset(&asset_path)
            .map_err(|source| LoadError::Io { doc_uri: doc_uri.to_string(), path: import.path.clone(), source })?;

        match import.kind {
            AssetKind::Styles => assets.update_css_file(&asset_uri, &contents),
            AssetKind::Layout => {
                assets.update_html_file(&asset_uri, &contents);
                asset_contents.insert(import.path.clone(), contents);
            }
            AssetKind::Locales => assets
                .update_locales_file(&asset_uri, &contents)
                .map_err(|source| LoadError::Locales { doc_uri: doc_uri.to_string(), path: import.path.clone(), source })?,
            // Provider scripts are validated by extension only (spec §4.3);
            // their content never feeds the registries or the transform.
            AssetKind::Provider => {}
        }

        assets.register_import(doc_uri, import.kind, &asset_uri);
    }

    Ok(asset_contents)
}
