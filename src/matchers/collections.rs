//! Collection matchers that take their element expectations as a list.

use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome, Reason};
use crate::engine::{Coverage, Tail, match_positional, match_unordered};
use crate::matcher::{AttemptMatch, Matcher};
use crate::spec::Spec;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Prefix(pub Vec<Spec>);

#[derive(Debug, Clone)]
pub struct InAnyOrder(pub Vec<Spec>);

#[derive(Debug, Clone)]
pub struct SetEquals(pub Vec<Spec>);

#[derive(Debug, Clone)]
pub struct SetEmbeds(pub Vec<Spec>);

#[derive(Debug, Clone)]
pub struct SeqOf(pub Spec);

fn rejected<M: AttemptMatch + Clone + 'static>(this: &M, actual: &Value, reason: Reason) -> Outcome {
    Outcome::from(DiffNode::mismatch(Matcher::new(this.clone()), actual, reason))
}

impl AttemptMatch for Prefix {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match actual {
            Value::Seq(elements) => match_positional(&self.0, elements, Tail::Ignore, scope),
            _ => rejected(self, actual, Reason::WrongShape),
        }
    }
}

impl AttemptMatch for InAnyOrder {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match actual {
            Value::Seq(elements) => match_unordered(&self.0, elements, Coverage::Complete, scope),
            _ => rejected(self, actual, Reason::WrongShape),
        }
    }
}

impl AttemptMatch for SetEquals {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match actual {
            Value::Set(members) | Value::Seq(members) => match_unordered(&self.0, members, Coverage::Complete, scope),
            _ => rejected(self, actual, Reason::WrongShape),
        }
    }
}

impl AttemptMatch for SetEmbeds {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match actual {
            Value::Set(members) | Value::Seq(members) => match_unordered(&self.0, members, Coverage::Partial, scope),
            _ => rejected(self, actual, Reason::WrongShape),
        }
    }
}

impl AttemptMatch for SeqOf {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match actual {
            Value::Seq(elements) if elements.is_empty() => rejected(self, actual, Reason::Empty),
            Value::Seq(elements) => {
                let matcher = scope.resolve(&self.0);
                let children = elements.iter().map(|v| matcher.attempt_match(v, scope).into_diff()).collect();
                Outcome::from(DiffNode::seq(children))
            }
            _ => rejected(self, actual, Reason::WrongShape),
        }
    }
}
