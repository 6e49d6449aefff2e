//! Centralized compiler limits and thresholds.
//!
//! Collecting these in one place keeps magic numbers out of the individual
//! pipeline stages and gives a single place to tune them.

/// Maximum Levenshtein edit distance for a "did you mean" suggestion to be
/// offered.
pub const DID_YOU_MEAN_MAX_DISTANCE: usize = 2;

/// HTML imports larger than this produce a warning, not an error (spec §4.6,
/// §5: "files > 1 MiB produce a warning, not an error").
pub const HTML_IMPORT_WARN_BYTES: u64 = 1024 * 1024;

/// Guard against runaway nested-library-import graphs (spec §5: "Library
/// import graphs are bounded by file-system reachability"). This is a
/// backstop against accidental self-referential import chains that the
/// cycle check doesn't otherwise catch (e.g. very long, non-cyclic chains).
pub const MAX_IMPORT_DEPTH: usize = 64;

/// Guard against runaway recursion when evaluating constant expressions or
/// walking deeply nested control-flow trees. Mirrors the teacher's use of
/// `stacker` to grow the stack for deep recursive walks rather than failing
/// outright; this bound is the last-resort cutoff once that growth runs out.
pub const MAX_EXPRESSION_RECURSION_DEPTH: usize = 256;

/// Stack size requested by [`stacker::maybe_grow`] call sites before a deep
/// recursive walk (constant folding, validator AST traversal).
pub const RECURSION_RED_ZONE_BYTES: usize = 64 * 1024;
pub const RECURSION_STACK_GROWTH_BYTES: usize = 1024 * 1024;
