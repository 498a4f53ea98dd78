//! Structural matching for nested data, with a diff that mirrors the actual value.
//!
//! ```
//! use matchwise::{Value, evaluate, matchers::{in_any_order, pred}};
//! use serde_json::json;
//!
//! let actual = Value::from(json!({"id": 7, "tags": ["b", "a"], "extra": true}));
//! let is_positive = pred("is_positive", |v: &Value| v.as_f64().is_some_and(|n| n > 0.0));
//!
//! let expected = matchwise::Spec::map([
//!     ("id", matchwise::Spec::from(is_positive)),
//!     ("tags", in_any_order(["a", "b"]).into()),
//! ]);
//! assert!(evaluate(expected, &actual).passed());
//! ```
//!
//! ## How the parts work together
//!
//! ```text
//! Spec (raw values + matchers)      Value (actual data)
//!          │                                │
//!          └──────────> evaluate <──────────┘             api.rs
//!                          │
//!                 Scope::resolve ── classify / OverrideTable   classify.rs
//!                          │
//!                 AttemptMatch::attempt_match               matcher.rs, matchers.rs
//!                          │
//!               engine routines + solver                    engine.rs
//!                          │
//!                       Outcome { verdict, DiffNode }       diff.rs
//! ```
//!
//! ## Extension points
//!
//! - Implement [`AttemptMatch`] to add a matcher; wrap it with [`Matcher::new`].
//! - Build an [`OverrideTable`] and use [`match_with`] to change how raw
//!   values are classified inside a subtree.
//! - The [`engine`] routines are public for container matchers of your own.

#[macro_use]
mod macros;
mod api;
mod classify;
mod diff;
pub mod engine;
mod error;
mod matcher;
pub mod matchers;
mod spec;
mod thrown;
mod value;

pub use api::{FaultPolicy, Options, evaluate, evaluate_with, matches};
pub use classify::{DefaultKind, OverrideTable, Scope, classify};
pub use diff::{Body, DiffNode, Outcome, Path, PathSegment, Reason, Slot, Status, Verdict};
pub use error::MatchError;
pub use matcher::{AttemptMatch, Matcher};
pub use matchers::{
    absent, all_of, any_of, embeds, equals, in_any_order, match_equals, match_roughly, match_with, mismatch, pred,
    pred_fallible, prefix, regex, seq_of, set_embeds, set_equals, within_delta,
};
pub use spec::{Shape, ShapeMask, Spec};
pub use thrown::{ErrorPayload, Thrown, error_payload, thrown_match, thrown_match_any};
pub use value::Value;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use ::regex::Regex;
}
