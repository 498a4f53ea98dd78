//! Unordered collection matching.
//!
//! Every expected entry is evaluated against every actual element up front
//! (the outcome table). The table feeds the solver's compatibility relation and
//! supplies the diff of each chosen pair, so nothing is evaluated twice.
//!
//! ```text
//!            actual 0   actual 1   actual 2
//! entry 0      ok         -          ok
//! entry 1      ok         -          ok
//! entry 2      -          ok         -
//!                    │
//!                 solve()
//!                    │
//! Slot::Paired{0,0}  Slot::Paired{1,2}  Slot::Paired{2,1}
//! ```

use super::solver::{Coverage, Order, solve};
use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome, Slot};
use crate::spec::Spec;
use crate::value::Value;
use std::collections::BTreeMap;

/// `table[i][j]` is the outcome of expected entry `i` against actual element `j`.
pub(crate) fn outcome_table(expected: &[Spec], actual: &[Value], scope: &Scope<'_>) -> Vec<Vec<Outcome>> {
    expected
        .iter()
        .map(|spec| {
            let matcher = scope.resolve(spec);
            actual.iter().map(|value| matcher.attempt_match(value, scope)).collect()
        })
        .collect()
}

pub fn match_unordered(expected: &[Spec], actual: &[Value], coverage: Coverage, scope: &Scope<'_>) -> Outcome {
    let table = outcome_table(expected, actual, scope);
    let assignment = solve(expected.len(), actual.len(), |i, j| table[i][j].passed(), coverage, Order::Any);

    let mut children = BTreeMap::new();
    for &(i, j) in &assignment.pairs {
        children.insert(Slot::Paired { expected: i, actual: j }, table[i][j].diff().clone());
    }
    for &i in &assignment.unmatched_expected {
        children.insert(Slot::Missing { expected: i }, DiffNode::missing(expected[i].clone()));
    }
    for &j in &assignment.unmatched_actual {
        let node = match coverage {
            Coverage::Complete => DiffNode::unexpected(&actual[j]),
            Coverage::Partial => DiffNode::ok(&actual[j]),
        };
        children.insert(Slot::Extra { actual: j }, node);
    }

    Outcome::from(DiffNode::unordered(children))
}
