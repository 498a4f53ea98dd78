//! Ordered sequence matching.
//!
//! Two strategies:
//!
//! - [`match_positional`]: element `i` of the expectation against element `i`
//!   of the actual sequence (`equals`, `prefix`).
//! - [`match_subsequence`]: the expectation, in order, against some
//!   subsequence of the actual value with gaps allowed (`embeds`). Delegates to
//!   the solver with `Order::Preserved`.
//!
//! Both produce a `Body::Seq` whose first `actual.len()` entries line up with
//! the actual elements. Expected entries that could not be placed are appended
//! after them as `Missing` nodes.

use super::solver::{Coverage, Order, solve};
use super::unordered::outcome_table;
use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome};
use crate::spec::Spec;
use crate::value::Value;

/// How actual elements past the end of the expectation are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// Equals: trailing elements are `Unexpected`.
    Reject,
    /// Prefix: trailing elements are kept as passing leaves.
    Ignore,
}

pub fn match_positional(expected: &[Spec], actual: &[Value], tail: Tail, scope: &Scope<'_>) -> Outcome {
    let mut children: Vec<DiffNode> = expected
        .iter()
        .zip(actual)
        .map(|(spec, value)| scope.resolve(spec).attempt_match(value, scope).into_diff())
        .collect();

    children.extend(expected.iter().skip(actual.len()).map(|spec| DiffNode::missing(spec.clone())));
    children.extend(actual.iter().skip(expected.len()).map(|value| match tail {
        Tail::Reject => DiffNode::unexpected(value),
        Tail::Ignore => DiffNode::ok(value),
    }));

    Outcome::from(DiffNode::seq(children))
}

pub fn match_subsequence(expected: &[Spec], actual: &[Value], scope: &Scope<'_>) -> Outcome {
    let table = outcome_table(expected, actual, scope);
    let assignment = solve(expected.len(), actual.len(), |i, j| table[i][j].passed(), Coverage::Partial, Order::Preserved);

    let mut children = Vec::with_capacity(actual.len() + assignment.unmatched_expected.len());
    for (j, value) in actual.iter().enumerate() {
        let node = match assignment.expected_for(j) {
            Some(i) => table[i][j].diff().clone(),
            None => DiffNode::ok(value),
        };
        children.push(node);
    }
    children.extend(assignment.unmatched_expected.iter().map(|&i| DiffNode::missing(expected[i].clone())));

    Outcome::from(DiffNode::seq(children))
}
