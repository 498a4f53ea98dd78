//! The matcher capability.
//!
//! Every matcher, built-in or user-defined, is an [`AttemptMatch`]
//! implementation behind a shared [`Matcher`] handle. The engine routines only
//! ever call through this trait, so adding a variant never touches dispatch.

use crate::classify::Scope;
use crate::diff::Outcome;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Check one actual value against an expectation.
///
/// Implementations must be pure: the same `(self, actual, scope)` always
/// produces the same [`Outcome`]. Nested raw specs are turned into matchers
/// with [`Scope::resolve`], and the same `scope` is handed down so that
/// `match_with` overrides keep applying to descendants.
///
/// `Debug` output is what renderers show as the expectation for a failing leaf.
///
/// # Example
/// ```
/// use matchwise::{AttemptMatch, DiffNode, Matcher, Outcome, Reason, Scope, Value, evaluate};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl AttemptMatch for Even {
///     fn attempt_match(&self, actual: &Value, _scope: &Scope<'_>) -> Outcome {
///         match actual {
///             Value::Int(i) if i % 2 == 0 => Outcome::ok(actual),
///             _ => Outcome::from(DiffNode::mismatch(Matcher::new(Even), actual, Reason::PredicateFalse)),
///         }
///     }
/// }
///
/// assert!(evaluate(Matcher::new(Even), &Value::Int(4)).passed());
/// assert!(!evaluate(Matcher::new(Even), &Value::Int(5)).passed());
/// ```
pub trait AttemptMatch: fmt::Debug + Send + Sync {
    fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome;

    /// Whether a map key that is missing from the actual value satisfies this
    /// matcher. Only `absent` says yes.
    fn accepts_missing(&self) -> bool {
        false
    }
}

/// Shared, immutable handle to a matcher.
///
/// Cloning is cheap and handles can be evaluated from several threads at once.
#[derive(Clone)]
pub struct Matcher(Arc<dyn AttemptMatch>);

impl Matcher {
    pub fn new<M: AttemptMatch + 'static>(matcher: M) -> Self {
        Matcher(Arc::new(matcher))
    }

    pub fn attempt_match(&self, actual: &Value, scope: &Scope<'_>) -> Outcome {
        self.0.attempt_match(actual, scope)
    }

    pub fn accepts_missing(&self) -> bool {
        self.0.accepts_missing()
    }

    /// Identity comparison: true when both handles point at the same matcher.
    pub fn same(&self, other: &Matcher) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::equals;

    #[test]
    fn handles_compare_by_identity() {
        let a = equals(1);
        let b = a.clone();
        let c = equals(1);
        assert!(a.same(&b));
        assert!(!a.same(&c));
    }

    #[test]
    fn debug_delegates_to_variant() {
        assert_eq!(format!("{:?}", equals(1)), "Equals(Int(1))");
    }

    #[test]
    fn handle_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }
}
