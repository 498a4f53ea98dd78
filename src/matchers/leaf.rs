//! Leaf matchers: they inspect one actual value and never recurse.
//!
//! ## Predicate faults
//!
//! A predicate can fail in two ways: it returns an error (`pred_fallible`) or
//! it panics. Both are faults, distinct from returning `false`. Under
//! [`FaultPolicy::Isolate`] a fault becomes a `Mismatch` leaf with
//! [`Reason::PredicateFault`] and the rest of the structure is still evaluated.
//! Under [`FaultPolicy::Propagate`] the panic is resumed (or a new one raised
//! for an error), ending the evaluation.
//!
//! Catching a panic does not silence the process panic hook, so the panic
//! message is still printed unless the caller installs its own hook.

use crate::api::FaultPolicy;
use crate::classify::Scope;
use crate::diff::{DiffNode, Outcome, Reason};
use crate::matcher::{AttemptMatch, Matcher};
use crate::value::Value;
use regex::Regex;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

// --- Regex ---------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RegexMatch(pub Regex);

impl AttemptMatch for RegexMatch {
    fn attempt_match(&self, actual: &Value, _scope: &Scope<'_>) -> Outcome {
        regex_outcome(&self.0, actual)
    }
}

pub(super) fn regex_outcome(re: &Regex, actual: &Value) -> Outcome {
    match actual.as_str() {
        Some(text) if re.is_match(text) => Outcome::ok(actual),
        Some(_) => Outcome::from(DiffNode::mismatch(re, actual, Reason::NoRegexMatch)),
        None => Outcome::from(DiffNode::mismatch(re, actual, Reason::WrongShape)),
    }
}

// --- Absent --------------------------------------------------------------------

/// Satisfied by a missing map key. Any present value is `Unexpected`.
#[derive(Debug, Clone, Copy)]
pub struct Absent;

impl AttemptMatch for Absent {
    fn attempt_match(&self, actual: &Value, _scope: &Scope<'_>) -> Outcome {
        Outcome::from(DiffNode::unexpected(actual))
    }

    fn accepts_missing(&self) -> bool {
        true
    }
}

// --- WithinDelta ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithinDelta {
    pub center: f64,
    pub delta: f64,
}

impl AttemptMatch for WithinDelta {
    fn attempt_match(&self, actual: &Value, _scope: &Scope<'_>) -> Outcome {
        let Some(n) = actual.as_f64() else {
            return Outcome::from(DiffNode::mismatch(Matcher::new(*self), actual, Reason::WrongShape));
        };
        let distance = (n - self.center).abs();
        // NaN never compares <=, so NaN actuals fall through to a mismatch.
        if distance <= self.delta {
            Outcome::ok(actual)
        } else {
            Outcome::from(DiffNode::mismatch(Matcher::new(*self), actual, Reason::OutsideDelta { distance }))
        }
    }
}

// --- Predicate -----------------------------------------------------------------

type PredicateFn = dyn Fn(&Value) -> Result<bool, String> + Send + Sync;

/// Named user predicate. The name is what diffs and `Debug` show.
#[derive(Clone)]
pub struct Predicate {
    name: Cow<'static, str>,
    f: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        Predicate { name: name.into(), f: Arc::new(f) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn fault(&self, message: String, panic: Option<Box<dyn Any + Send>>, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match scope.options().fault_policy {
            FaultPolicy::Isolate => {
                debug!(event = "predicate_fault", predicate = %self.name, %message);
                let expected = Matcher::new(self.clone());
                Outcome::from(DiffNode::mismatch(expected, actual, Reason::PredicateFault(message)))
            }
            FaultPolicy::Propagate => match panic {
                Some(payload) => panic::resume_unwind(payload),
                None => panic!("predicate {} raised an error: {message}", self.name),
            },
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

impl AttemptMatch for Predicate {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.f)(actual))) {
            Ok(Ok(true)) => Outcome::ok(actual),
            Ok(Ok(false)) => {
                Outcome::from(DiffNode::mismatch(Matcher::new(self.clone()), actual, Reason::PredicateFalse))
            }
            Ok(Err(message)) => self.fault(message, None, actual, scope),
            Err(payload) => self.fault(panic_message(payload.as_ref()), Some(payload), actual, scope),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
