//! Matchers built from other expectations.

use crate::classify::{OverrideTable, Scope};
use crate::diff::{DiffNode, Outcome, Reason};
use crate::matcher::{AttemptMatch, Matcher};
use crate::spec::Spec;
use crate::value::Value;

/// Evaluates `inner` in a child scope where `table` shadows the outer tables.
#[derive(Debug, Clone)]
pub struct MatchWith {
    pub table: OverrideTable,
    pub inner: Spec,
}

impl AttemptMatch for MatchWith {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        let scope = scope.with(&self.table);
        scope.resolve(&self.inner).attempt_match(actual, &scope)
    }

    fn accepts_missing(&self) -> bool {
        wrapped_accepts_missing(&self.inner)
    }
}

/// Inverts the inner verdict. A passing value yields a single `Negated` leaf.
/// A predicate fault inside the inner expectation is not a failure to invert:
/// the inner outcome, fault included, is returned as the mismatch.
#[derive(Debug, Clone)]
pub struct Negation(pub Spec);

impl AttemptMatch for Negation {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        let inner = scope.resolve(&self.0).attempt_match(actual, scope);
        if inner.passed() {
            Outcome::from(DiffNode::mismatch(Matcher::new(self.clone()), actual, Reason::Negated))
        } else if has_fault(&inner) {
            inner
        } else {
            Outcome::ok(actual)
        }
    }
}

fn has_fault(outcome: &Outcome) -> bool {
    outcome.diff().mismatches().iter().any(|(_, node)| matches!(node.reason(), Some(Reason::PredicateFault(_))))
}

/// Every alternative is evaluated; the first passing one supplies the diff.
#[derive(Debug, Clone)]
pub struct AnyOf(pub Vec<Spec>);

impl AttemptMatch for AnyOf {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        let outcomes: Vec<Outcome> = self.0.iter().map(|s| scope.resolve(s).attempt_match(actual, scope)).collect();
        match outcomes.into_iter().find(Outcome::passed) {
            Some(outcome) => outcome,
            None => Outcome::from(DiffNode::mismatch(Matcher::new(self.clone()), actual, Reason::NoAlternative)),
        }
    }

    fn accepts_missing(&self) -> bool {
        self.0.iter().any(wrapped_accepts_missing)
    }
}

/// Every alternative is evaluated; the first failing one supplies the diff.
#[derive(Debug, Clone)]
pub struct AllOf(pub Vec<Spec>);

impl AttemptMatch for AllOf {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        let mut outcomes = self.0.iter().map(|s| scope.resolve(s).attempt_match(actual, scope)).collect::<Vec<_>>();
        match outcomes.iter().position(|o| !o.passed()) {
            Some(i) => outcomes.swap_remove(i),
            None => outcomes.into_iter().next().unwrap_or_else(|| Outcome::ok(actual)),
        }
    }

    fn accepts_missing(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(wrapped_accepts_missing)
    }
}

/// Raw specs never accept a missing key; only wrapped matchers can.
pub(super) fn wrapped_accepts_missing(spec: &Spec) -> bool {
    matches!(spec, Spec::Matcher(m) if m.accepts_missing())
}
