//! Timeline presence, time-range, and selector rules (spec §3 invariants
//! 5/7/8, §4.5).

use crate::context::ValidationContext;
use eligian_common::{Diagnostic, DiagnosticCode, ValidationErrorKind};
use eligian_parser::ast::{Program, TimelineDecl, TimelineEvent};

#[must_use]
pub fn check_timeline_presence(ctx: &ValidationContext, program: &Program) -> Vec<Diagnostic> {
    if program.timelines().next().is_some() {
        return Vec::new();
    }
    vec![Diagnostic::error(
        DiagnosticCode::Validation(ValidationErrorKind::TimelineRequired),
        &ctx.doc.uri,
        ctx.location(program.span),
        "a program must declare at least one timeline".to_string(),
    )]
}

#[must_use]
pub fn check_timeline(ctx: &ValidationContext, timeline: &TimelineDecl) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if timeline.selector.trim().is_empty() {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::Validation(ValidationErrorKind::TargetRequired),
            &ctx.doc.uri,
            ctx.location(timeline.span),
            format!("timeline '{}' has an empty selector", timeline.name),
        ));
    }

    for event in &timeline.events {
        diagnostics.extend(check_event_times(ctx, event));
    }

    diagnostics
}

fn check_event_times(ctx: &ValidationContext, event: &TimelineEvent) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let times = match event {
        TimelineEvent::Timed { start, end, .. } => vec![*start, *end],
        TimelineEvent::Sequence { duration, .. } | TimelineEvent::Stagger { delay: duration, .. } => vec![*duration],
    };

    for time in &times {
        if time.seconds < 0.0 {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::NonNegativeTimes),
                &ctx.doc.uri,
                ctx.location(time.span),
                format!("time value {} must not be negative", time.seconds),
            ));
        }
    }

    if let TimelineEvent::Timed { start, end, .. } = event {
        if start.seconds > end.seconds {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::Validation(ValidationErrorKind::ValidTimeRange),
                &ctx.doc.uri,
                ctx.location(event.span()),
                format!("start time {} must not be after end time {}", start.seconds, end.seconds),
            ));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use eligian_assets::AssetRegistries;
    use eligian_workspace::{Document, IndexManager};

    fn program_from(src: &str) -> (Document, Program) {
        let mut doc = Document::new("main.eligian", src.to_string());
        let ast = eligian_parser::parse(src).unwrap();
        let program = match &ast {
            eligian_parser::Document::Program(p) => p.clone(),
            eligian_parser::Document::Library(_) => panic!("expected program"),
        };
        doc.ast = Some(ast);
        (doc, program)
    }

    #[test]
    fn flags_missing_timeline() {
        let (doc, program) = program_from("action foo() { log(1); }");
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let diagnostics = check_timeline_presence(&ctx, &program);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::TimelineRequired)));
    }

    #[test]
    fn flags_inverted_time_range() {
        let (doc, program) = program_from("timeline \"t\" in \"#s\" using raf { at 5s..1s { } }");
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let timeline = program.timelines().next().unwrap();
        let diagnostics = check_timeline(&ctx, timeline);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::ValidTimeRange)));
    }

    #[test]
    fn flags_empty_selector() {
        let (doc, program) = program_from("timeline \"t\" in \"\" using raf { at 0s..1s { } }");
        let index = IndexManager::new();
        let assets = AssetRegistries::new();
        let ctx = ValidationContext::new(&doc, &index, &assets);
        let timeline = program.timelines().next().unwrap();
        let diagnostics = check_timeline(&ctx, timeline);
        assert!(diagnostics.iter().any(|d| d.code == DiagnosticCode::Validation(ValidationErrorKind::TargetRequired)));
    }
}
