//! Matching the error a computation raises.
//!
//! Three results are kept apart:
//!
//! ```text
//! f() -> Ok(_)                          Thrown::NotRaised
//! f() -> Err(e), e is the expected type Thrown::Raised(evaluate(expected, payload))
//! f() -> Err(e), any other type         Err(e), returned unchanged
//! ```
//!
//! Errors travel as [`anyhow::Error`]; the expected type is found with
//! `downcast_ref`, so it is still recognised under added `context`.

use crate::api::evaluate;
use crate::diff::Outcome;
use crate::spec::Spec;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// An error type that exposes structured data to match against.
pub trait ErrorPayload {
    fn payload(&self) -> Value;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Thrown {
    /// The expected error was raised; the outcome is its payload match.
    Raised(Outcome),
    /// The computation finished without an error.
    NotRaised,
}

impl Thrown {
    pub fn passed(&self) -> bool {
        matches!(self, Thrown::Raised(outcome) if outcome.passed())
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Thrown::Raised(outcome) => Some(outcome),
            Thrown::NotRaised => None,
        }
    }
}

/// Run `f` and match the payload of the `C` error it raises against `expected`.
///
/// # Example
/// ```
/// use matchwise::{ErrorPayload, Thrown, Value, thrown_match};
/// use serde_json::json;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("quota exceeded")]
/// struct QuotaExceeded { limit: i64 }
///
/// impl ErrorPayload for QuotaExceeded {
///     fn payload(&self) -> Value {
///         Value::from(json!({"limit": self.limit}))
///     }
/// }
///
/// let thrown = thrown_match::<QuotaExceeded, ()>(json!({"limit": 10}), || {
///     Err(QuotaExceeded { limit: 10 }.into())
/// })
/// .unwrap();
/// assert!(thrown.passed());
///
/// let quiet = thrown_match::<QuotaExceeded, i32>(json!({}), || Ok(1)).unwrap();
/// assert_eq!(quiet, Thrown::NotRaised);
/// ```
pub fn thrown_match<C, T>(expected: impl Into<Spec>, f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<Thrown>
where
    C: ErrorPayload + fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    let err = match f() {
        Ok(_) => {
            debug!(event = "thrown_match", raised = false);
            return Ok(Thrown::NotRaised);
        }
        Err(err) => err,
    };
    match err.downcast_ref::<C>() {
        Some(typed) => {
            let outcome = evaluate(expected, &typed.payload());
            debug!(event = "thrown_match", raised = true, passed = outcome.passed());
            Ok(Thrown::Raised(outcome))
        }
        None => {
            debug!(event = "thrown_match", raised = true, error = %err, "unexpected error type, propagating");
            Err(err)
        }
    }
}

/// Like [`thrown_match`] with no type constraint: any error qualifies and
/// its payload is [`error_payload`].
pub fn thrown_match_any<T>(expected: impl Into<Spec>, f: impl FnOnce() -> anyhow::Result<T>) -> Thrown {
    match f() {
        Ok(_) => Thrown::NotRaised,
        Err(err) => Thrown::Raised(evaluate(expected, &error_payload(&err))),
    }
}

/// `{"message": <top-level message>, "causes": [<source messages>...]}`
pub fn error_payload(err: &anyhow::Error) -> Value {
    let causes = err.chain().skip(1).map(|cause| Value::Str(cause.to_string())).collect();
    let mut map = BTreeMap::new();
    map.insert("message".to_string(), Value::Str(err.to_string()));
    map.insert("causes".to_string(), Value::Seq(causes));
    Value::Map(map)
}
