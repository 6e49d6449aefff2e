//! Constant folding, AST-to-IR desugaring, and the dead-code-elimination
//! optimizer (spec §4.6-§4.8), sitting between the validator and the
//! emitter in the compilation pipeline.

pub mod const_fold;
pub mod ir;
pub mod optimizer;
pub mod transform;

pub use const_fold::{build_constant_map, ConstFoldError, ConstantMap};
pub use ir::{
    ActionIR, AvailableLanguage, DurationIR, EligiusIR, EngineDescriptor, EventActionIR, IrMetadata, OperationIR, TimelineActionIR, TimelineIR,
    TimelineTypeIR,
};
pub use optimizer::optimize;
pub use transform::{transform_library, transform_program, TransformContext};
