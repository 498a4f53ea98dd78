use crate::classify::Scope;
use crate::diff::Outcome;
use crate::spec::Spec;
use crate::value::Value;

/// What to do when a user predicate fails to produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Record a `Mismatch` leaf with [`crate::Reason::PredicateFault`] and keep
    /// evaluating the rest of the structure. A fault under `mismatch` still
    /// fails; it is never inverted into a pass.
    #[default]
    Isolate,
    /// Re-raise: resume the predicate's panic, or panic with its error.
    Propagate,
}

/// Options that affect evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub fault_policy: FaultPolicy,
}

impl Options {
    pub const DEFAULT: Options = Options { fault_policy: FaultPolicy::Isolate };
}

impl Default for Options {
    fn default() -> Self {
        Options::DEFAULT
    }
}

/// Check `actual` against `expected` with default [`Options`].
///
/// Raw values in `expected` are classified first: maps embed, regexes search,
/// everything else must be equal.
///
/// # Example
/// ```
/// use matchwise::{Value, evaluate, matchers::equals};
/// use serde_json::json;
///
/// let actual = Value::from(json!({"name": "Alfredo", "surname": "da Rocha Viana"}));
///
/// assert!(evaluate(json!({"name": "Alfredo"}), &actual).passed());
/// assert!(!evaluate(equals(json!({"name": "Alfredo"})), &actual).passed());
/// ```
pub fn evaluate(expected: impl Into<Spec>, actual: &Value) -> Outcome {
    evaluate_with(expected, actual, &Options::default())
}

/// Check `actual` against `expected` using the provided `options`.
pub fn evaluate_with(expected: impl Into<Spec>, actual: &Value, options: &Options) -> Outcome {
    let scope = Scope::new(options);
    let expected = expected.into();
    scope.resolve(&expected).attempt_match(actual, &scope)
}

/// Shorthand for `evaluate(expected, actual).passed()`.
pub fn matches(expected: impl Into<Spec>, actual: &Value) -> bool {
    evaluate(expected, actual).passed()
}
