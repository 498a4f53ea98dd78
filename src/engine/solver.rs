//! Multiset assignment solver.
//!
//! Pairs matcher entries `M[0..n]` with actual elements `A[0..m]` such that
//! every pair is compatible (the matcher matched that element) and no entry on
//! either side is used twice.
//!
//! ```text
//! Coverage::Complete  every M and every A paired   (equals, in_any_order, set_equals)
//! Coverage::Partial   every M paired, A may be left (embeds, set_embeds)
//!
//! Order::Any          any pairing                   (unordered collections)
//! Order::Preserved    i < i'  =>  j < j'            (embeds over a sequence)
//! ```
//!
//! ## Search
//!
//! - `Order::Any`: backtracking over matcher entries sorted by ascending number
//!   of compatible actuals (ties by index); candidates are tried in ascending
//!   actual index. Failed `(depth, used actuals)` states are memoized (see
//!   `memo.rs`). The search is complete: if an assignment with the required
//!   coverage exists it is found.
//! - `Order::Preserved`: dynamic programming over `(matcher, actual)` suffixes,
//!   which yields a maximum monotone pairing directly.
//!
//! When the required coverage cannot be met, a best-effort maximum pairing is
//! returned instead (augmenting paths, matchers in index order), so callers can
//! still report paired elements next to the leftovers.
//!
//! ## Determinism
//!
//! Among several valid assignments the solver reports the first one reached by
//! the fixed visiting order above. The result depends only on the compatibility
//! relation, never on hashing or timing.
//!
//! ## Cost
//!
//! There is no iteration cap. `Order::Any` with coverage required is
//! exponential in the worst case; fixture-sized collections stay fast thanks to
//! the fewest-candidates-first ordering and the memo.

use super::memo::{FailedStates, UsedSet};
use super::metrics::{SearchMetrics, SolveResult};
use std::time::Instant;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Both sides fully paired.
    Complete,
    /// Matcher side fully paired; leftover actual elements allowed.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Any,
    Preserved,
}

/// Pairing between matcher entries and actual elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// `(matcher index, actual index)`, sorted by matcher index.
    pub pairs: Vec<(usize, usize)>,
    pub unmatched_expected: Vec<usize>,
    pub unmatched_actual: Vec<usize>,
    /// Whether the pairing meets the requested coverage.
    pub satisfied: bool,
}

impl Assignment {
    fn from_pairs(n: usize, m: usize, mut pairs: Vec<(usize, usize)>, coverage: Coverage) -> Self {
        pairs.sort_unstable();
        let mut expected_used = vec![false; n];
        let mut actual_used = vec![false; m];
        for &(i, j) in &pairs {
            expected_used[i] = true;
            actual_used[j] = true;
        }
        let unmatched_expected: Vec<usize> = (0..n).filter(|&i| !expected_used[i]).collect();
        let unmatched_actual: Vec<usize> = (0..m).filter(|&j| !actual_used[j]).collect();
        let satisfied = unmatched_expected.is_empty()
            && match coverage {
                Coverage::Complete => unmatched_actual.is_empty(),
                Coverage::Partial => true,
            };
        Assignment { pairs, unmatched_expected, unmatched_actual, satisfied }
    }

    /// Actual index paired with matcher `expected`, if any.
    pub fn actual_for(&self, expected: usize) -> Option<usize> {
        self.pairs.iter().find(|(i, _)| *i == expected).map(|(_, j)| *j)
    }

    /// Matcher index paired with actual `actual`, if any.
    pub fn expected_for(&self, actual: usize) -> Option<usize> {
        self.pairs.iter().find(|(_, j)| *j == actual).map(|(i, _)| *i)
    }
}

/// Solve for `n` matcher entries and `m` actual elements.
///
/// `compatible(i, j)` is asked exactly once per `(i, j)`.
///
/// # Example
/// ```
/// use matchwise::engine::{Coverage, Order, solve};
///
/// // matcher 0 accepts actual 0 or 1, matcher 1 accepts only actual 0
/// let table = [[true, true], [true, false]];
/// let a = solve(2, 2, |i, j| table[i][j], Coverage::Complete, Order::Any);
///
/// assert!(a.satisfied);
/// assert_eq!(a.pairs, vec![(0, 1), (1, 0)]);
/// ```
pub fn solve<F>(n: usize, m: usize, compatible: F, coverage: Coverage, order: Order) -> Assignment
where
    F: FnMut(usize, usize) -> bool,
{
    solve_with_metrics(n, m, compatible, coverage, order).assignment
}

/// Like [`solve`], also returning search counters.
pub fn solve_with_metrics<F>(n: usize, m: usize, mut compatible: F, coverage: Coverage, order: Order) -> SolveResult
where
    F: FnMut(usize, usize) -> bool,
{
    let start = Instant::now();
    let table: Vec<Vec<bool>> = (0..n).map(|i| (0..m).map(|j| compatible(i, j)).collect()).collect();
    let mut metrics = SearchMetrics::default();

    let pairs = match order {
        Order::Any => search_any(&table, m, coverage, &mut metrics),
        Order::Preserved => search_preserved(&table, m, &mut metrics),
    };

    let assignment = Assignment::from_pairs(n, m, pairs, coverage);
    metrics.elapsed = start.elapsed();

    trace!(
        event = "solve",
        expected = n,
        actual = m,
        ?coverage,
        ?order,
        satisfied = assignment.satisfied,
        explored = metrics.explored,
        memo_hits = metrics.memo_hits,
        fallback = metrics.fallback,
    );

    SolveResult { assignment, metrics }
}

// --- Unordered search ----------------------------------------------------------

fn search_any(table: &[Vec<bool>], m: usize, coverage: Coverage, metrics: &mut SearchMetrics) -> Vec<(usize, usize)> {
    let n = table.len();
    let candidates: Vec<Vec<usize>> =
        table.iter().map(|row| row.iter().enumerate().filter(|(_, ok)| **ok).map(|(j, _)| j).collect()).collect();

    let size_ok = match coverage {
        Coverage::Complete => n == m,
        Coverage::Partial => n <= m,
    };

    if size_ok && candidates.iter().all(|c| !c.is_empty()) {
        let mut visit: Vec<usize> = (0..n).collect();
        visit.sort_by_key(|&i| (candidates[i].len(), i));

        let mut search = Backtrack {
            candidates: &candidates,
            visit: &visit,
            used: UsedSet::new(m),
            chosen: vec![None; n],
            failed: FailedStates::default(),
            metrics: &mut *metrics,
        };
        if search.run(0) {
            return search.chosen.iter().enumerate().filter_map(|(i, j)| j.map(|j| (i, j))).collect();
        }
    }

    debug!(event = "solve_fallback", expected = n, actual = m, ?coverage);
    metrics.fallback = true;
    max_pairing(&candidates, m, metrics)
}

struct Backtrack<'a> {
    candidates: &'a [Vec<usize>],
    visit: &'a [usize],
    used: UsedSet,
    chosen: Vec<Option<usize>>,
    failed: FailedStates,
    metrics: &'a mut SearchMetrics,
}

impl Backtrack<'_> {
    fn run(&mut self, depth: usize) -> bool {
        if depth == self.visit.len() {
            return true;
        }
        if self.failed.contains(depth, &self.used) {
            self.metrics.memo_hits += 1;
            return false;
        }

        let i = self.visit[depth];
        let candidates = self.candidates;
        for &j in &candidates[i] {
            if self.used.contains(j) {
                continue;
            }
            self.metrics.explored += 1;
            self.used.insert(j);
            self.chosen[i] = Some(j);
            if self.run(depth + 1) {
                return true;
            }
            self.used.remove(j);
            self.chosen[i] = None;
        }

        self.failed.insert(depth, &self.used);
        false
    }
}

/// Maximum-cardinality pairing via augmenting paths.
fn max_pairing(candidates: &[Vec<usize>], m: usize, metrics: &mut SearchMetrics) -> Vec<(usize, usize)> {
    let mut owner: Vec<Option<usize>> = vec![None; m];
    for i in 0..candidates.len() {
        let mut seen = vec![false; m];
        augment(i, candidates, &mut owner, &mut seen, metrics);
    }
    owner.iter().enumerate().filter_map(|(j, i)| i.map(|i| (i, j))).collect()
}

fn augment(
    i: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    seen: &mut [bool],
    metrics: &mut SearchMetrics,
) -> bool {
    for &j in &candidates[i] {
        if seen[j] {
            continue;
        }
        seen[j] = true;
        metrics.explored += 1;
        let free = match owner[j] {
            None => true,
            Some(k) => augment(k, candidates, owner, seen, metrics),
        };
        if free {
            owner[j] = Some(i);
            return true;
        }
    }
    false
}

// --- Order-preserving search ---------------------------------------------------

fn search_preserved(table: &[Vec<bool>], m: usize, metrics: &mut SearchMetrics) -> Vec<(usize, usize)> {
    let n = table.len();
    // best[i][j]: largest monotone pairing of matchers i.. with actuals j..
    let mut best = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            metrics.explored += 1;
            let mut b = best[i + 1][j].max(best[i][j + 1]);
            if table[i][j] {
                b = b.max(1 + best[i + 1][j + 1]);
            }
            best[i][j] = b;
        }
    }

    let mut pairs = Vec::with_capacity(best[0][0]);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if table[i][j] && best[i][j] == 1 + best[i + 1][j + 1] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if best[i][j + 1] == best[i][j] {
            j += 1;
        } else {
            i += 1;
        }
    }

    if pairs.len() < n {
        metrics.fallback = true;
    }
    pairs
}
