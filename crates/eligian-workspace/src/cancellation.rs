//! Cooperative cancellation for builds a newer edit has superseded (spec §5:
//! "the workspace maintains a queue of dirty documents; builds are
//! serialized per document"). A build checks its token between I/O-bound
//! steps (loading each library import) rather than relying on the caller to
//! never start one it doesn't want.
//!
//! Single-threaded by the same cooperative model as the rest of the
//! workspace (spec §5): no `Arc`/atomics, just a shared flag. The flag can
//! still be flipped from outside the recursive build call that holds it,
//! e.g. a `--watch` loop cancelling a build already in flight when a newer
//! file-change event arrives before that build finishes walking its
//! imports.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
