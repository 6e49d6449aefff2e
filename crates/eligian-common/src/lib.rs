//! Common types shared across the Eligian compiler pipeline.
//!
//! This crate provides foundational types used by every later stage:
//! - [`span::Span`] — byte-offset source ranges attached to AST/IR nodes
//! - [`position`] — line/column conversion for diagnostics rendering
//! - [`diagnostics`] — the fixed diagnostic taxonomy (spec §7)
//! - [`error`] — the two stage-aborting error kinds (`ParseError`, `EmitError`)
//! - [`limits`] — centralized compiler thresholds

pub mod diagnostics;
pub mod error;
pub mod limits;
pub mod position;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity, TransformErrorKind, ValidationErrorKind};
pub use error::{EmitError, ParseError};
pub use position::{LineMap, Position, SourceLocation};
pub use span::{Span, Spanned};
