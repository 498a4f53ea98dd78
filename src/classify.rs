//! Default dispatch for raw expected values, and scoped overrides.
//!
//! The classifier answers one question: which matcher applies to a raw
//! (unwrapped) [`Spec`]? The default rule, in priority order:
//!
//! ```text
//! regex                         -> Regex   (substring search)
//! map                           -> Embeds  (extra actual keys tolerated)
//! scalar / sequence / set       -> Equals
//! ```
//!
//! `match_with` pushes an [`OverrideTable`] onto the [`Scope`] for the
//! subtree it wraps. Resolution walks the scope chain innermost-first, takes
//! the first entry whose mask covers the spec's shape, and only falls back to
//! the default rule when no table answers. Wrapped matchers bypass all of this.
//!
//! ## Invariants
//!
//! - [`DefaultKind::for_shape`] is a total, pure function of [`Shape`].
//! - A `Scope` never outlives the tables it borrows; overrides end where the
//!   `match_with` that introduced them ends.

use crate::api::Options;
use crate::matcher::Matcher;
use crate::matchers;
use crate::spec::{Shape, ShapeMask, Spec};
use std::fmt;
use std::sync::Arc;

/// Matcher family chosen for a raw spec when no override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKind {
    Equals,
    Regex,
    Embeds,
}

impl DefaultKind {
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Regex => DefaultKind::Regex,
            Shape::Map => DefaultKind::Embeds,
            Shape::Null | Shape::Bool | Shape::Number | Shape::Text | Shape::Seq | Shape::Set => DefaultKind::Equals,
        }
    }
}

/// Default kind of a raw spec; `None` for a wrapped matcher.
pub fn classify(spec: &Spec) -> Option<DefaultKind> {
    spec.shape().map(DefaultKind::for_shape)
}

/// Build the default matcher for `spec`.
pub(crate) fn default_matcher(spec: Spec) -> Matcher {
    match (classify(&spec), spec) {
        (None, Spec::Matcher(m)) => m,
        (Some(DefaultKind::Regex), Spec::Regex(re)) => matchers::from_regex(re),
        (Some(DefaultKind::Embeds), spec) => matchers::embeds(spec),
        (_, spec) => matchers::equals(spec),
    }
}

// --- Override tables -----------------------------------------------------------

pub type Constructor = Arc<dyn Fn(Spec) -> Matcher + Send + Sync>;

/// Ordered `(shape mask, matcher constructor)` pairs consulted before the
/// default rule inside a `match_with`.
///
/// # Example
/// ```
/// use matchwise::{OverrideTable, ShapeMask, Value, evaluate, match_with, matchers::equals};
/// use serde_json::json;
///
/// let exact_maps = OverrideTable::new().on(ShapeMask::MAP, equals);
/// let spec = match_with(exact_maps, json!({"user": {"name": "Ana"}}));
///
/// let actual = Value::from(json!({"user": {"name": "Ana", "admin": true}}));
/// assert!(!evaluate(spec, &actual).passed());
/// ```
#[derive(Clone, Default)]
pub struct OverrideTable {
    entries: Vec<(ShapeMask, Constructor)>,
}

impl OverrideTable {
    pub fn new() -> Self {
        OverrideTable::default()
    }

    /// Append an entry. Earlier entries win when masks overlap.
    pub fn on<F>(mut self, mask: ShapeMask, constructor: F) -> Self
    where
        F: Fn(Spec) -> Matcher + Send + Sync + 'static,
    {
        self.entries.push((mask, Arc::new(constructor)));
        self
    }

    pub fn lookup(&self, shape: Shape) -> Option<&Constructor> {
        self.entries.iter().find(|(mask, _)| mask.covers(shape)).map(|(_, ctor)| ctor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OverrideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|(mask, _)| mask)).finish()
    }
}

// --- Scope ---------------------------------------------------------------------

static DEFAULT_OPTIONS: Options = Options::DEFAULT;

/// Evaluation context handed to every [`crate::AttemptMatch::attempt_match`].
///
/// Holds the chain of active override tables and the caller's [`Options`].
/// Scopes are cheap borrowed values; [`Scope::with`] creates a child that
/// lives only as long as the evaluation of one subtree.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    table: Option<&'a OverrideTable>,
    parent: Option<&'a Scope<'a>>,
    options: &'a Options,
}

impl<'a> Scope<'a> {
    /// Root scope: no overrides.
    pub fn new(options: &'a Options) -> Self {
        Scope { table: None, parent: None, options }
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Child scope where `table` shadows every table already in effect.
    pub fn with<'b>(&'b self, table: &'b OverrideTable) -> Scope<'b> {
        Scope { table: Some(table), parent: Some(self), options: self.options }
    }

    /// Number of override tables in effect.
    pub fn depth(&self) -> usize {
        self.tables().count()
    }

    /// Turn `spec` into the matcher that applies to it here.
    pub fn resolve(&self, spec: &Spec) -> Matcher {
        if let Spec::Matcher(m) = spec {
            return m.clone();
        }
        if let Some(shape) = spec.shape() {
            if let Some(ctor) = self.tables().find_map(|table| table.lookup(shape)) {
                tracing::trace!(event = "override", shape = %shape, depth = self.depth());
                return ctor(spec.clone());
            }
        }
        default_matcher(spec.clone())
    }

    fn tables(&self) -> impl Iterator<Item = &'a OverrideTable> {
        std::iter::successors(Some(*self), |scope| scope.parent.copied()).filter_map(|scope| scope.table)
    }
}

impl Default for Scope<'static> {
    fn default() -> Self {
        Scope::new(&DEFAULT_OPTIONS)
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("depth", &self.depth()).field("options", self.options).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn default_rule_by_shape() {
        let cases: Vec<(Shape, DefaultKind)> = vec![
            (Shape::Null, DefaultKind::Equals),
            (Shape::Bool, DefaultKind::Equals),
            (Shape::Number, DefaultKind::Equals),
            (Shape::Text, DefaultKind::Equals),
            (Shape::Seq, DefaultKind::Equals),
            (Shape::Set, DefaultKind::Equals),
            (Shape::Map, DefaultKind::Embeds),
            (Shape::Regex, DefaultKind::Regex),
        ];
        for (shape, kind) in cases {
            assert_eq!(DefaultKind::for_shape(shape), kind, "{shape}");
        }
    }

    #[test]
    fn wrapped_matchers_bypass_classification() {
        assert_eq!(classify(&Spec::from(matchers::absent())), None);
        assert_eq!(classify(&Spec::from(Regex::new("x").unwrap())), Some(DefaultKind::Regex));
        assert_eq!(classify(&Spec::from(json!({"a": 1}))), Some(DefaultKind::Embeds));
    }

    #[test]
    fn resolve_returns_wrapped_matcher_unchanged() {
        let m = matchers::absent();
        let scope = Scope::default();
        assert!(scope.resolve(&Spec::from(m.clone())).same(&m));
    }

    #[test]
    fn innermost_table_wins() {
        let outer = OverrideTable::new().on(ShapeMask::NUMBER, |_| matchers::absent());
        let inner = OverrideTable::new().on(ShapeMask::NUMBER, matchers::equals);
        let root = Scope::default();
        let mid = root.with(&outer);
        let leaf = mid.with(&inner);
        assert_eq!(leaf.depth(), 2);

        let one = Value::Int(1);
        assert!(leaf.resolve(&Spec::Int(1)).attempt_match(&one, &leaf).passed());
        assert!(!mid.resolve(&Spec::Int(1)).attempt_match(&one, &mid).passed());
        assert!(root.resolve(&Spec::Int(1)).attempt_match(&one, &root).passed());
    }

    #[test]
    fn unmatched_shapes_fall_back_to_default() {
        let table = OverrideTable::new().on(ShapeMask::SEQ, |_| matchers::absent());
        let root = Scope::default();
        let scope = root.with(&table);
        let actual = Value::from(json!({"a": 1, "b": 2}));
        assert!(scope.resolve(&Spec::from(json!({"a": 1}))).attempt_match(&actual, &scope).passed());
    }
}
