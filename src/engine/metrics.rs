//! Assignment search metrics.
//!
//! The solver is worst-case exponential in the number of entries it pairs.
//! These counters make that cost observable without bounding it:
//!
//! - [`solve`](super::solve) for normal operation.
//! - [`solve_with_metrics`](super::solve_with_metrics) for profiling a slow
//!   fixture or checking that memoization kicks in.
//!
//! Every solve also emits a `trace`-level `tracing` event carrying the same
//! numbers.

use super::solver::Assignment;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct SearchMetrics {
    /// Candidate pairings tried (backtracking steps, augmenting-path probes or
    /// table cells, depending on the search).
    pub explored: usize,
    /// Sub-searches skipped because the same `(depth, used actuals)` state had
    /// already failed.
    pub memo_hits: usize,
    /// Whether the best-effort maximum pairing had to be computed because no
    /// assignment with the required coverage exists.
    pub fallback: bool,
    /// Wall time for the whole solve.
    pub elapsed: Duration,
}

/// Solver output bundled with its metrics.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub assignment: Assignment,
    pub metrics: SearchMetrics,
}
