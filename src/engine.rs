//! Matching engine: the container routines every structural matcher is built on.
//!
//! Matchers (see `matchers.rs`) decide *which* routine applies to an actual
//! value; the routines here do the traversal, recurse through
//! [`Scope::resolve`](crate::Scope::resolve) for every child, and assemble the
//! child outcomes into a diff.
//!
//! ## How the parts work together
//!
//! ```text
//! evaluate(spec, actual)                      (api.rs)
//!     │  Scope::resolve                       (classify.rs)
//!     v
//! Matcher::attempt_match                      (matchers.rs)
//!     │
//!     ├─ map        -> match_map              (maps.rs)
//!     ├─ sequence   -> match_positional       (sequences.rs)
//!     │             -> match_subsequence ──┐
//!     └─ set / any  -> match_unordered ────┤  (unordered.rs)
//!                                          v
//!                                 solve / solve_with_metrics
//!                                   (solver.rs, memo.rs, metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `maps.rs`: key-by-key matching with extra keys rejected or ignored.
//! - `sequences.rs`: positional matching (with a rejected or ignored tail) and
//!   order-preserving subsequence matching.
//! - `unordered.rs`: evaluates the full entry × element outcome table and turns
//!   the solver's assignment into a slot-keyed diff.
//! - `solver.rs`: the multiset assignment search.
//! - `memo.rs`: failed-state keys for the backtracking search.
//! - `metrics.rs`: counters and timing for a solve.
//!
//! ## Invariants
//!
//! - No routine stops at the first failing child; every child is evaluated so
//!   the diff covers the whole actual value.
//! - Routines only call matchers through [`crate::AttemptMatch`], never by
//!   variant, so user-defined matchers compose with the built-in ones.
//!
//! The routines are public so user-defined container matchers can reuse them.

#[path = "engine/maps.rs"]
mod maps;
#[path = "engine/memo.rs"]
mod memo;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/sequences.rs"]
mod sequences;
#[path = "engine/solver.rs"]
mod solver;
#[path = "engine/unordered.rs"]
mod unordered;

pub use maps::{Extras, match_map};
pub use metrics::{SearchMetrics, SolveResult};
pub use sequences::{Tail, match_positional, match_subsequence};
pub use solver::{Assignment, Coverage, Order, solve, solve_with_metrics};
pub use unordered::match_unordered;
