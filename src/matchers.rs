//! Built-in matchers and their builders.
//!
//! ```text
//! structural.rs    equals, embeds              (dispatch on the expected shape)
//! collections.rs   prefix, in_any_order, set_equals, set_embeds, seq_of
//! leaf.rs          regex, absent, within_delta, pred
//! combinators.rs   match_with, mismatch, any_of, all_of
//! ```
//!
//! Each builder returns a [`Matcher`] handle. Builders that can be misused
//! (`regex`, `within_delta`, `match_roughly`) validate their arguments and
//! return [`MatchError`] up front, so evaluation itself never errors.
//!
//! Custom variants need nothing from this module: implement
//! [`crate::AttemptMatch`] and wrap the value with [`Matcher::new`].

#[path = "matchers/collections.rs"]
mod collections;
#[path = "matchers/combinators.rs"]
mod combinators;
#[path = "matchers/leaf.rs"]
mod leaf;
#[path = "matchers/structural.rs"]
mod structural;
#[cfg(test)]
#[path = "matchers/tests.rs"]
mod tests;

pub use collections::{InAnyOrder, Prefix, SeqOf, SetEmbeds, SetEquals};
pub use combinators::{AllOf, AnyOf, MatchWith, Negation};
pub use leaf::{Absent, Predicate, RegexMatch, WithinDelta};
pub use structural::{Embeds, Equals};

use crate::classify::OverrideTable;
use crate::error::MatchError;
use crate::matcher::Matcher;
use crate::spec::{ShapeMask, Spec};
use crate::value::Value;
use ::regex::Regex;
use std::borrow::Cow;
use std::fmt::Display;

fn specs<I, S>(items: I) -> Vec<Spec>
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    items.into_iter().map(Into::into).collect()
}

// --- Structural ----------------------------------------------------------------

/// Exact match: maps need the same key set, sequences the same length and
/// order, sets a complete pairing. Nested raw values are still classified
/// (a nested map embeds); use [`match_equals`] to make the whole tree exact.
pub fn equals<S: Into<Spec>>(expected: S) -> Matcher {
    Matcher::new(Equals(expected.into()))
}

/// Subset match: extra map keys are ignored, sequences match an in-order
/// subsequence, sets a partial pairing.
pub fn embeds<S: Into<Spec>>(expected: S) -> Matcher {
    Matcher::new(Embeds(expected.into()))
}

// --- Collections ---------------------------------------------------------------

/// The first `expected.len()` elements match in order; later elements are ignored.
pub fn prefix<I, S>(expected: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(Prefix(specs(expected)))
}

/// A sequence whose elements pair one-to-one with `expected`, in any order.
pub fn in_any_order<I, S>(expected: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(InAnyOrder(specs(expected)))
}

/// Like [`in_any_order`] for sets. Entries are kept as a list, so two
/// identical predicates still need two distinct members.
pub fn set_equals<I, S>(expected: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(SetEquals(specs(expected)))
}

/// Every entry pairs with a distinct member; extra members are fine.
pub fn set_embeds<I, S>(expected: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(SetEmbeds(specs(expected)))
}

/// A non-empty sequence whose every element matches `expected`.
pub fn seq_of<S: Into<Spec>>(expected: S) -> Matcher {
    Matcher::new(SeqOf(expected.into()))
}

// --- Leaves --------------------------------------------------------------------

/// Text containing a match for `pattern` anywhere (not anchored).
pub fn regex(pattern: &str) -> Result<Matcher, MatchError> {
    Ok(from_regex(Regex::new(pattern)?))
}

pub fn from_regex(re: Regex) -> Matcher {
    Matcher::new(RegexMatch(re))
}

/// Map value only: the key must not be present.
pub fn absent() -> Matcher {
    Matcher::new(Absent)
}

/// A number no further than `delta` from `center` (inclusive).
///
/// # Example
/// ```
/// use matchwise::{Value, evaluate, matchers::within_delta};
///
/// let near_ten = within_delta(10, 2.0).unwrap();
/// assert!(evaluate(near_ten.clone(), &Value::Int(12)).passed());
/// assert!(!evaluate(near_ten, &Value::Int(13)).passed());
///
/// assert!(within_delta("ten", 2.0).is_err());
/// ```
pub fn within_delta<S: Into<Spec>>(center: S, delta: f64) -> Result<Matcher, MatchError> {
    let center = center.into();
    let center = match center.as_f64() {
        Some(c) if c.is_finite() => c,
        Some(_) => return Err(MatchError::NonNumericCenter { found: "non-finite number" }),
        None => return Err(MatchError::NonNumericCenter { found: center.shape().map_or("matcher", |s| s.name()) }),
    };
    check_delta(delta)?;
    Ok(Matcher::new(WithinDelta { center, delta }))
}

fn check_delta(delta: f64) -> Result<(), MatchError> {
    if delta.is_finite() && delta >= 0.0 { Ok(()) } else { Err(MatchError::InvalidDelta(delta)) }
}

/// Predicate over the actual value. Panics inside `f` are caught and reported
/// per the evaluation's [`crate::FaultPolicy`].
pub fn pred<F>(name: impl Into<Cow<'static, str>>, f: F) -> Matcher
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Matcher::new(Predicate::new(name, move |v: &Value| Ok(f(v))))
}

/// Predicate that can fail. An `Err` is a fault, not a `false`.
pub fn pred_fallible<F, E>(name: impl Into<Cow<'static, str>>, f: F) -> Matcher
where
    F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
    E: Display,
{
    Matcher::new(Predicate::new(name, move |v: &Value| f(v).map_err(|e| e.to_string())))
}

// --- Combinators ---------------------------------------------------------------

/// Evaluate `spec` with `table` consulted before the default classification,
/// for the whole subtree.
pub fn match_with<S: Into<Spec>>(table: OverrideTable, spec: S) -> Matcher {
    Matcher::new(MatchWith { table, inner: spec.into() })
}

/// Matches when `spec` does not.
pub fn mismatch<S: Into<Spec>>(spec: S) -> Matcher {
    Matcher::new(Negation(spec.into()))
}

/// Matches when at least one alternative does.
pub fn any_of<I, S>(alternatives: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(AnyOf(specs(alternatives)))
}

/// Matches when every alternative does.
pub fn all_of<I, S>(alternatives: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Spec>,
{
    Matcher::new(AllOf(specs(alternatives)))
}

/// `spec` with every raw map in the tree matched exactly.
///
/// # Example
/// ```
/// use matchwise::{Value, evaluate, matchers::match_equals};
/// use serde_json::json;
///
/// let actual = Value::from(json!({"user": {"name": "Ana", "admin": true}}));
/// assert!(evaluate(json!({"user": {"name": "Ana"}}), &actual).passed());
/// assert!(!evaluate(match_equals(json!({"user": {"name": "Ana"}})), &actual).passed());
/// ```
pub fn match_equals<S: Into<Spec>>(spec: S) -> Matcher {
    match_with(OverrideTable::new().on(ShapeMask::MAP, equals), spec)
}

/// `spec` with every raw number in the tree compared within `delta`.
pub fn match_roughly<S: Into<Spec>>(delta: f64, spec: S) -> Result<Matcher, MatchError> {
    check_delta(delta)?;
    let table = OverrideTable::new().on(ShapeMask::NUMBER, move |s: Spec| match s.as_f64() {
        Some(center) => Matcher::new(WithinDelta { center, delta }),
        None => equals(s),
    });
    Ok(match_with(table, spec))
}
