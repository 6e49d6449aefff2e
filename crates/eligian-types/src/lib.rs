//! Primitive type lattice, operation registry, and custom kinds (spec §4.4).

pub mod control_flow;
pub mod events;
pub mod kinds;
pub mod operations;
pub mod scope;
pub mod types;

pub use control_flow::{check_for, check_if, ControlFlowIssue};
pub use events::{lookup as lookup_event, EventSignature};
pub use kinds::{AssetType, ImportType, LabelGroup, LanguagesType, TimelineEventType, TimelineType, TranslationKey};
pub use operations::{lookup as lookup_operation, ArrayElementKind, OperationParam, OperationSignature};
pub use scope::{infer, LocalScope};
pub use types::Type;
