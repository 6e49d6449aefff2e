//! The diagnostic taxonomy and the `Diagnostic` type every later pipeline
//! stage accumulates into, built around Eligian's fixed error kinds rather
//! than a generated message-code table.

use crate::position::SourceLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
            Severity::Message => "message",
        };
        f.write_str(s)
    }
}

/// `ValidationError.kind` (spec §7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    UndefinedReference,
    DuplicateDefinition,
    InvalidScope,
    MissingRequiredField,
    TimelineRequired,
    UniqueEventIds,
    ValidTimeRange,
    NonNegativeTimes,
    ValidActionType,
    TargetRequired,
    ValidSelector,
    ActionNotDefined,
    ParameterArityMismatch,
}

/// `TransformError.kind` (spec §7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformErrorKind {
    UnknownNode,
    InvalidTimeline,
    InvalidEvent,
    InvalidAction,
    InvalidExpression,
    InvalidImport,
    ValidationError,
}

/// The full fixed diagnostic code taxonomy. Each variant maps to a stable
/// short string (`code_str`) used both in rendered diagnostics and in the
/// JSON `code` field of the LSP-shaped query layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    Parse,
    Validation(ValidationErrorKind),
    Type,
    Transform(TransformErrorKind),
    Optimization,
    Emit,
    HtmlImport,
    CssImport,
    CssParse,
    MediaImport,
    FileNotFound,
    Permission,
    Read,
    Security,
    /// Custom name collides with a built-in operation name (spec §3 invariant 3).
    ActionNameBuiltinConflict,
    /// Extra named code for circular constant dependencies (spec §4.6).
    CircularDependency,
}

impl DiagnosticCode {
    #[must_use]
    pub fn code_str(&self) -> &'static str {
        use TransformErrorKind as T;
        use ValidationErrorKind as V;
        match self {
            DiagnosticCode::Parse => "parse_error",
            DiagnosticCode::Validation(V::UndefinedReference) => "undefined_reference",
            DiagnosticCode::Validation(V::DuplicateDefinition) => "duplicate_definition",
            DiagnosticCode::Validation(V::InvalidScope) => "invalid_scope",
            DiagnosticCode::Validation(V::MissingRequiredField) => "missing_required_field",
            DiagnosticCode::Validation(V::TimelineRequired) => "timeline_required",
            DiagnosticCode::Validation(V::UniqueEventIds) => "unique_event_ids",
            DiagnosticCode::Validation(V::ValidTimeRange) => "valid_time_range",
            DiagnosticCode::Validation(V::NonNegativeTimes) => "non_negative_times",
            DiagnosticCode::Validation(V::ValidActionType) => "valid_action_type",
            DiagnosticCode::Validation(V::TargetRequired) => "target_required",
            DiagnosticCode::Validation(V::ValidSelector) => "valid_selector",
            DiagnosticCode::Validation(V::ActionNotDefined) => "action_not_defined",
            DiagnosticCode::Validation(V::ParameterArityMismatch) => "parameter_arity_mismatch",
            DiagnosticCode::Type => "type_error",
            DiagnosticCode::Transform(T::UnknownNode) => "transform_unknown_node",
            DiagnosticCode::Transform(T::InvalidTimeline) => "transform_invalid_timeline",
            DiagnosticCode::Transform(T::InvalidEvent) => "transform_invalid_event",
            DiagnosticCode::Transform(T::InvalidAction) => "transform_invalid_action",
            DiagnosticCode::Transform(T::InvalidExpression) => "transform_invalid_expression",
            DiagnosticCode::Transform(T::InvalidImport) => "transform_invalid_import",
            DiagnosticCode::Transform(T::ValidationError) => "transform_validation_error",
            DiagnosticCode::Optimization => "optimization_error",
            DiagnosticCode::Emit => "emit_error",
            DiagnosticCode::HtmlImport => "html_import_error",
            DiagnosticCode::CssImport => "css_import_error",
            DiagnosticCode::CssParse => "css_parse_error",
            DiagnosticCode::MediaImport => "media_import_error",
            DiagnosticCode::FileNotFound => "file_not_found",
            DiagnosticCode::Permission => "permission_error",
            DiagnosticCode::Read => "read_error",
            DiagnosticCode::Security => "security_error",
            DiagnosticCode::ActionNameBuiltinConflict => "action_name_builtin_conflict",
            DiagnosticCode::CircularDependency => "circular_dependency",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_str())
    }
}

/// A single diagnostic, rich enough to render the stderr block in spec §7
/// (`file:line:col: message` + snippet + hint) and to carry the `data`
/// quick-fix payload an external editor consumes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub file: String,
    pub location: SourceLocation,
    pub message: String,
    pub hint: Option<String>,
    pub data: Option<Value>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        file: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            file: file.into(),
            location,
            message: message.into(),
            hint: None,
            data: None,
        }
    }

    #[must_use]
    pub fn error(
        code: DiagnosticCode,
        file: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, file, location, message)
    }

    #[must_use]
    pub fn warning(
        code: DiagnosticCode,
        file: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, file, location, message)
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_str_is_stable() {
        assert_eq!(
            DiagnosticCode::Validation(ValidationErrorKind::UndefinedReference).code_str(),
            "undefined_reference"
        );
        assert_eq!(DiagnosticCode::CircularDependency.code_str(), "circular_dependency");
    }

    #[test]
    fn builder_sets_hint_and_data() {
        let loc = SourceLocation::new(1, 1, Some(4));
        let diag = Diagnostic::error(DiagnosticCode::Type, "a.eligian", loc, "boom")
            .with_hint("try this")
            .with_data(serde_json::json!({"foo": 1}));
        assert_eq!(diag.hint.as_deref(), Some("try this"));
        assert!(diag.data.is_some());
        assert!(diag.is_error());
    }
}
