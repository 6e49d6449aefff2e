//! Serializes an optimized [`eligian_ir::EligiusIR`] into the
//! `IEngineConfiguration` JSON shape (spec §4.9, §6). The IR's field names
//! already carry the emitted camelCase renames, so this is close to a
//! straight `serde_json::to_value` pass plus the `metadata.version`/
//! `metadata.generatedBy` stamp.

use eligian_ir::EligiusIR;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    /// The IR contained a value `serde_json` cannot represent (a
    /// non-finite float slipping through constant folding). Should not
    /// occur after a successful transform (spec §4.9).
    #[error("IR is not representable as JSON: {0}")]
    Unrepresentable(String),
}

/// The compiler version stamped into every emitted configuration's
/// `metadata.generatedBy` field.
pub const GENERATED_BY: &str = concat!("eligianc ", env!("CARGO_PKG_VERSION"));

pub fn emit(ir: &EligiusIR) -> Result<Value, EmitError> {
    let mut value = serde_json::to_value(ir).map_err(|e| EmitError::Unrepresentable(e.to_string()))?;

    let Value::Object(root) = &mut value else {
        return Err(EmitError::Unrepresentable("IR did not serialize to a JSON object".to_string()));
    };

    let metadata = root.entry("metadata").or_insert_with(|| json!({}));
    let Value::Object(metadata) = metadata else {
        return Err(EmitError::Unrepresentable("metadata field is not an object".to_string()));
    };
    metadata.insert("version".to_string(), Value::String("1.0.0".to_string()));
    metadata.insert("generatedBy".to_string(), Value::String(GENERATED_BY.to_string()));

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_common::position::SourceLocation;
    use eligian_ir::{AvailableLanguage, EligiusIR, EngineDescriptor, IrMetadata};
    use uuid::Uuid;

    fn sample_ir() -> EligiusIR {
        EligiusIR {
            id: Uuid::new_v4(),
            engine: EngineDescriptor::default(),
            container_selector: Some("#stage".to_string()),
            language: Some("en-US".to_string()),
            layout_template: None,
            available_languages: vec![AvailableLanguage { code: "en-US".to_string(), label: "en-US".to_string() }],
            labels: vec![],
            init_actions: vec![],
            actions: vec![],
            event_actions: vec![],
            timelines: vec![],
            timeline_flow: None,
            timeline_provider_settings: None,
            metadata: IrMetadata {
                dsl_version: "1".to_string(),
                compiler_version: "0.1.0".to_string(),
                compiled_at: "2026-01-01T00:00:00Z".to_string(),
                source_file: Some("main.eligian".to_string()),
            },
            source_location: SourceLocation::default(),
        }
    }

    #[test]
    fn stamps_version_and_generated_by() {
        let json = emit(&sample_ir()).unwrap();
        assert_eq!(json["metadata"]["version"], "1.0.0");
        assert_eq!(json["metadata"]["generatedBy"], GENERATED_BY);
        assert_eq!(json["containerSelector"], "#stage");
        assert_eq!(json["engine"]["systemName"], "Eligius");
    }

    #[test]
    fn preserves_uuids_verbatim() {
        let ir = sample_ir();
        let id = ir.id;
        let json = emit(&ir).unwrap();
        assert_eq!(json["id"], id.to_string());
    }
}
