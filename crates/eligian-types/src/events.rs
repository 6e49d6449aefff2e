//! The known Eligius runtime event registry (spec §4.5: "Event name ∈ known
//! events"; spec §8: "argument arity for events").

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct EventSignature {
    pub name: &'static str,
    /// Number of positional arguments the runtime provides to the handler.
    pub provided_args: usize,
}

pub static EVENTS: Lazy<FxHashMap<&'static str, EventSignature>> = Lazy::new(|| {
    let entries = [
        ("before-request-video-url", 3),
        ("request-video-url", 3),
        ("video-url-requested", 1),
        ("before-play", 0),
        ("play", 0),
        ("before-pause", 0),
        ("pause", 0),
        ("before-seeked", 1),
        ("seeked", 1),
        ("playback-rate-changed", 1),
        ("time-update", 1),
        ("duration-set", 1),
        ("container-requested", 1),
        ("resize", 2),
        ("before-action-started", 1),
        ("action-started", 1),
        ("before-action-ended", 1),
        ("action-ended", 1),
    ];
    entries.into_iter().map(|(name, provided_args)| (name, EventSignature { name, provided_args })).collect()
});

#[must_use]
pub fn lookup(name: &str) -> Option<&'static EventSignature> {
    EVENTS.get(name)
}

#[must_use]
pub fn all_names() -> impl Iterator<Item = &'static str> {
    EVENTS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_event_has_expected_arg_count() {
        assert_eq!(lookup("before-request-video-url").unwrap().provided_args, 3);
    }

    #[test]
    fn unknown_event_is_none() {
        assert!(lookup("not-a-real-event").is_none());
    }
}
