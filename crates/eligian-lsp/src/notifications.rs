//! Custom JSON-RPC notification payloads (spec §6). Plain serde structs:
//! whatever embeds this crate owns the actual transport and method-name
//! dispatch (`eligian/cssUpdated`, `eligian/htmlUpdated`, …).

use serde::{Deserialize, Serialize};

/// Client-to-server notification sent after a CSS, HTML, or locales file on
/// disk changes, naming every document affected (spec §6: "{ cssFileUri,
/// documentUris[] }", and the HTML/locales analogues).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetUpdated {
    pub file_uri: String,
    pub document_uris: Vec<String>,
}

/// Server-to-client notification listing the asset files a document's
/// imports resolved to, for the client to watch (spec §6:
/// "`eligian/cssImportsDiscovered` ... same for html, locales").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportsDiscovered {
    pub document_uri: String,
    pub asset_file_uris: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_updated_round_trips_through_json() {
        let payload = AssetUpdated { file_uri: "main.css".to_string(), document_uris: vec!["a.eligian".to_string()] };
        let json = serde_json::to_value(&payload).unwrap();
        let back: AssetUpdated = serde_json::from_value(json).unwrap();
        assert_eq!(back.file_uri, "main.css");
    }
}
