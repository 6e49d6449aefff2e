//! The two error kinds that abort a pipeline stage outright rather than
//! being accumulated as diagnostics: [`ParseError`] (spec §4.1, §7) and
//! [`EmitError`] (spec §4.9, §7). Everything else in the taxonomy
//! ([`crate::diagnostics::DiagnosticCode`]) is collected, not propagated.

use crate::position::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{location:?}: expected {expected:?}, found {actual:?}")]
pub struct ParseError {
    pub location: SourceLocation,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl ParseError {
    #[must_use]
    pub fn new(location: SourceLocation, expected: Option<String>, actual: Option<String>) -> Self {
        Self { location, expected, actual }
    }
}

/// Unrepresentable IR reached the emitter (spec §4.9: "should not occur
/// after successful transformation").
#[derive(Debug, Clone, Error)]
#[error("cannot emit: {reason}")]
pub struct EmitError {
    pub reason: String,
    pub location: SourceLocation,
}

impl EmitError {
    #[must_use]
    pub fn new(reason: impl Into<String>, location: SourceLocation) -> Self {
        Self { reason: reason.into(), location }
    }
}
