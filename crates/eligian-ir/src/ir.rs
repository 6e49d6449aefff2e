//! The `EligiusIR` record (spec §4.7) and its nested operation/timeline
//! shapes. Field names match the emitted JSON shape verbatim (spec §4.9) so
//! the emitter is close to a straight `serde_json::to_value` pass.

use eligian_common::position::SourceLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineDescriptor {
    #[serde(rename = "systemName")]
    pub system_name: String,
}

impl Default for EngineDescriptor {
    fn default() -> Self {
        Self { system_name: "Eligius".to_string() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationIR {
    pub id: Uuid,
    #[serde(rename = "systemName")]
    pub system_name: String,
    #[serde(rename = "operationData", skip_serializing_if = "serde_json::Map::is_empty")]
    pub operation_data: serde_json::Map<String, Value>,
}

impl OperationIR {
    #[must_use]
    pub fn new(system_name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), system_name: system_name.into(), operation_data: serde_json::Map::new() }
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.operation_data.insert(key.into(), value);
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionIR {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "startOperations")]
    pub start_operations: Vec<OperationIR>,
    #[serde(rename = "endOperations", skip_serializing_if = "Option::is_none")]
    pub end_operations: Option<Vec<OperationIR>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventActionIR {
    pub id: Uuid,
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "eventTopic", skip_serializing_if = "Option::is_none")]
    pub event_topic: Option<String>,
    #[serde(rename = "startOperations")]
    pub start_operations: Vec<OperationIR>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DurationIR {
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineActionIR {
    pub id: Uuid,
    pub name: String,
    pub duration: DurationIR,
    #[serde(rename = "startOperations")]
    pub start_operations: Vec<OperationIR>,
    #[serde(rename = "endOperations", skip_serializing_if = "Option::is_none")]
    pub end_operations: Option<Vec<OperationIR>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineTypeIR {
    Raf,
    Video,
    Audio,
    Custom,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineIR {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub timeline_type: TimelineTypeIR,
    #[serde(rename = "uri", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub duration: f64,
    #[serde(rename = "loop")]
    pub loops: bool,
    pub selector: String,
    #[serde(rename = "timelineActions")]
    pub timeline_actions: Vec<TimelineActionIR>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvailableLanguage {
    pub code: String,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IrMetadata {
    #[serde(rename = "dslVersion")]
    pub dsl_version: String,
    #[serde(rename = "compilerVersion")]
    pub compiler_version: String,
    #[serde(rename = "compiledAt")]
    pub compiled_at: String,
    #[serde(rename = "sourceFile", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// The full intermediate representation produced by desugaring, consumed by
/// the optimizer and then the emitter (spec §4.7).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EligiusIR {
    pub id: Uuid,
    pub engine: EngineDescriptor,
    #[serde(rename = "containerSelector", skip_serializing_if = "Option::is_none")]
    pub container_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "layoutTemplate", skip_serializing_if = "Option::is_none")]
    pub layout_template: Option<String>,
    #[serde(rename = "availableLanguages")]
    pub available_languages: Vec<AvailableLanguage>,
    pub labels: Vec<Value>,
    #[serde(rename = "initActions")]
    pub init_actions: Vec<ActionIR>,
    pub actions: Vec<ActionIR>,
    #[serde(rename = "eventActions")]
    pub event_actions: Vec<EventActionIR>,
    pub timelines: Vec<TimelineIR>,
    #[serde(rename = "timelineFlow", skip_serializing_if = "Option::is_none")]
    pub timeline_flow: Option<Value>,
    #[serde(rename = "timelineProviderSettings", skip_serializing_if = "Option::is_none")]
    pub timeline_provider_settings: Option<Value>,
    pub metadata: IrMetadata,
    #[serde(skip)]
    pub source_location: SourceLocation,
}
