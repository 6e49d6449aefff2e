//! "Did you mean" suggestions (spec §1, §4.3, §4.5, §8 property 7).

use eligian_common::limits::DID_YOU_MEAN_MAX_DISTANCE;

/// Return the closest candidate to `target` within [`DID_YOU_MEAN_MAX_DISTANCE`]
/// edits, breaking ties by whichever candidate is seen first.
#[must_use]
pub fn suggest<'a>(candidates: impl IntoIterator<Item = &'a str>, target: &str) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::levenshtein(candidate, target)))
        .filter(|(_, distance)| *distance <= DID_YOU_MEAN_MAX_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_closest_match_within_threshold() {
        let candidates = ["welcome-title", "welcome-subtitle", "footer-text"];
        assert_eq!(suggest(candidates, "wellcome-title"), Some("welcome-title"));
    }

    #[test]
    fn returns_none_beyond_threshold() {
        let candidates = ["button-text"];
        assert_eq!(suggest(candidates, "completely-unrelated-key"), None);
    }
}
