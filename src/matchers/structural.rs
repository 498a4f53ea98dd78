//! `equals` and `embeds`: the two matchers raw maps, sequences and scalars
//! classify into. Both dispatch on the expected shape and hand containers to
//! the engine.
//!
//! ```text
//! expected   equals                       embeds
//! map        match_map(Reject)            match_map(Ignore)
//! seq        match_positional(Reject)     match_subsequence
//! set        match_unordered(Complete)    match_unordered(Partial)
//! regex      substring search             substring search
//! scalar     equality                     equality
//! matcher    delegate                     delegate
//! ```

use super::combinators::wrapped_accepts_missing;
use super::leaf::regex_outcome;
use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome, Reason};
use crate::engine::{Coverage, Extras, Tail, match_map, match_positional, match_subsequence, match_unordered};
use crate::matcher::AttemptMatch;
use crate::spec::Spec;
use crate::value::Value;

#[derive(Debug)]
pub struct Equals(pub Spec);

#[derive(Debug)]
pub struct Embeds(pub Spec);

impl AttemptMatch for Equals {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match (&self.0, actual) {
            (Spec::Matcher(m), _) => m.attempt_match(actual, scope),
            (Spec::Map(expected), Value::Map(entries)) => match_map(expected, entries, Extras::Reject, scope),
            (Spec::Seq(expected), Value::Seq(elements)) => match_positional(expected, elements, Tail::Reject, scope),
            (Spec::Set(expected), Value::Set(members)) => {
                match_unordered(expected, members, Coverage::Complete, scope)
            }
            (Spec::Regex(re), _) => regex_outcome(re, actual),
            (spec, _) => scalar_outcome(spec, actual),
        }
    }

    fn accepts_missing(&self) -> bool {
        wrapped_accepts_missing(&self.0)
    }
}

impl AttemptMatch for Embeds {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match (&self.0, actual) {
            (Spec::Matcher(m), _) => m.attempt_match(actual, scope),
            (Spec::Map(expected), Value::Map(entries)) => match_map(expected, entries, Extras::Ignore, scope),
            (Spec::Seq(expected), Value::Seq(elements)) => match_subsequence(expected, elements, scope),
            (Spec::Set(expected), Value::Set(members) | Value::Seq(members)) => {
                match_unordered(expected, members, Coverage::Partial, scope)
            }
            (Spec::Regex(re), _) => regex_outcome(re, actual),
            (spec, _) => scalar_outcome(spec, actual),
        }
    }

    fn accepts_missing(&self) -> bool {
        wrapped_accepts_missing(&self.0)
    }
}

/// Leaf comparison. Containers reaching here met an actual of another shape.
fn scalar_outcome(spec: &Spec, actual: &Value) -> Outcome {
    match spec.scalar_eq(actual) {
        Some(true) => Outcome::ok(actual),
        Some(false) => Outcome::from(DiffNode::mismatch(spec.clone(), actual, Reason::NotEqual)),
        None => Outcome::from(DiffNode::mismatch(spec.clone(), actual, Reason::WrongShape)),
    }
}
