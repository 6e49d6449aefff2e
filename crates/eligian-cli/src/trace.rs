//! Per-stage timing for `--trace` (spec §9 supplemented features). Printed
//! to stderr only; never folded into the emitted JSON.

use std::time::{Duration, Instant};

pub struct Tracer {
    start: Instant,
    spans: Vec<(String, Duration)>,
}

impl Tracer {
    #[must_use]
    pub fn new() -> Self {
        Self { start: Instant::now(), spans: Vec::new() }
    }

    /// Times `f` and records it under `name`.
    pub fn record<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = f();
        self.spans.push((name.to_string(), started.elapsed()));
        result
    }

    /// Prints one line per recorded span plus the total wall-clock time,
    /// to stderr (spec: trace output never touches the emitted JSON).
    pub fn print_summary(&self) {
        for (name, duration) in &self.spans {
            eprintln!("  {name:<12} {:>8.2}ms", duration.as_secs_f64() * 1000.0);
        }
        eprintln!("  {:<12} {:>8.2}ms", "total", self.start.elapsed().as_secs_f64() * 1000.0);
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_span_per_call() {
        let mut tracer = Tracer::new();
        tracer.record("parse", || std::thread::sleep(Duration::from_millis(1)));
        tracer.record("emit", || {});
        assert_eq!(tracer.spans.len(), 2);
        assert_eq!(tracer.spans[0].0, "parse");
    }
}
