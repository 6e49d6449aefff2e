//! Optimizer passes over the IR (spec §4.8). Cannot fail.

use crate::ir::EligiusIR;

/// Pass 1: drop timeline actions where `end <= start` or `start < 0` (these
/// are reported as diagnostics earlier, but emission still prunes them).
/// Pass 2 (merging adjacent identical operations) is reserved, currently a
/// no-op.
pub fn optimize(mut ir: EligiusIR) -> EligiusIR {
    for timeline in &mut ir.timelines {
        timeline.timeline_actions.retain(|action| action.duration.start >= 0.0 && action.duration.end > action.duration.start);
    }
    ir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ActionIR, DurationIR, EngineDescriptor, IrMetadata, TimelineActionIR, TimelineIR, TimelineTypeIR};
    use eligian_common::position::SourceLocation;
    use uuid::Uuid;

    fn sample_ir(actions: Vec<TimelineActionIR>) -> EligiusIR {
        EligiusIR {
            id: Uuid::new_v4(),
            engine: EngineDescriptor::default(),
            container_selector: None,
            language: None,
            layout_template: None,
            available_languages: vec![],
            labels: vec![],
            init_actions: Vec::<ActionIR>::new(),
            actions: vec![],
            event_actions: vec![],
            timelines: vec![TimelineIR {
                id: Uuid::new_v4(),
                timeline_type: TimelineTypeIR::Raf,
                uri: None,
                duration: 10.0,
                loops: false,
                selector: "#s".to_string(),
                timeline_actions: actions,
            }],
            timeline_flow: None,
            timeline_provider_settings: None,
            metadata: IrMetadata {
                dsl_version: "1".to_string(),
                compiler_version: "1".to_string(),
                compiled_at: "now".to_string(),
                source_file: None,
            },
            source_location: SourceLocation::default(),
        }
    }

    fn action(start: f64, end: f64) -> TimelineActionIR {
        TimelineActionIR {
            id: Uuid::new_v4(),
            name: "a".to_string(),
            duration: DurationIR { start, end },
            start_operations: vec![],
            end_operations: None,
        }
    }

    #[test]
    fn drops_negative_start_and_zero_length_ranges() {
        let ir = sample_ir(vec![action(-1.0, 5.0), action(2.0, 2.0), action(1.0, 3.0)]);
        let optimized = optimize(ir);
        assert_eq!(optimized.timelines[0].timeline_actions.len(), 1);
        assert_eq!(optimized.timelines[0].timeline_actions[0].duration.start, 1.0);
    }
}
