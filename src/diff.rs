//! Outcomes and diff trees.
//!
//! Every evaluation returns an [`Outcome`]: a verdict plus a [`DiffNode`] that
//! mirrors the actual value. Containers keep every child, passing or not, so a
//! renderer can print the whole actual value with failures highlighted in place.
//!
//! ```text
//! actual: {"name": "Alfredo", "tags": ["a", "b"]}
//!
//! Map (Mismatch)
//! ├─ "name" -> Leaf Ok        actual="Alfredo"
//! └─ "tags" -> Seq (Mismatch)
//!             ├─ 0 -> Leaf Ok          actual="a"
//!             └─ 1 -> Leaf Mismatch    expected="c" actual="b" reason=NotEqual
//! ```
//!
//! ## Invariants
//!
//! - A container is `Ok` iff all of its children are `Ok`.
//! - Passing siblings are never dropped. Keys or elements a matcher chooses to
//!   ignore are kept as `Ok` leaves holding the actual value.
//! - A satisfied `absent` key is the only expected entry that leaves no node,
//!   because the actual value has nothing at that key.

use crate::spec::Spec;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

// --- Verdict / status ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Match,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Mismatch,
    /// Expected entry with no counterpart in the actual value.
    Missing,
    /// Actual entry the matcher does not allow.
    Unexpected,
}

/// Why a leaf did not match.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    NotEqual,
    /// The actual value has a shape the matcher cannot apply to.
    WrongShape,
    NoRegexMatch,
    OutsideDelta { distance: f64 },
    PredicateFalse,
    /// The predicate returned an error or panicked.
    PredicateFault(String),
    /// A `mismatch` matcher whose inner expectation matched.
    Negated,
    /// None of the `any_of` alternatives matched.
    NoAlternative,
    /// `seq_of` requires at least one element.
    Empty,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::NotEqual => write!(f, "values differ"),
            Reason::WrongShape => write!(f, "value has the wrong shape"),
            Reason::NoRegexMatch => write!(f, "pattern not found"),
            Reason::OutsideDelta { distance } => write!(f, "off by {distance}"),
            Reason::PredicateFalse => write!(f, "predicate returned false"),
            Reason::PredicateFault(msg) => write!(f, "predicate raised an error: {msg}"),
            Reason::Negated => write!(f, "value matched but was expected not to"),
            Reason::NoAlternative => write!(f, "no alternative matched"),
            Reason::Empty => write!(f, "sequence is empty"),
        }
    }
}

/// Key of an entry in an unordered container diff.
///
/// `expected` indexes the matcher entries, `actual` the actual elements, both
/// in their stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Paired { expected: usize, actual: usize },
    Missing { expected: usize },
    Extra { actual: usize },
}

// --- DiffNode -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Leaf { expected: Option<Spec>, actual: Option<Value>, reason: Option<Reason> },
    Map(BTreeMap<String, DiffNode>),
    Seq(Vec<DiffNode>),
    Unordered(BTreeMap<Slot, DiffNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffNode {
    status: Status,
    body: Body,
}

impl DiffNode {
    /// Passing leaf holding the actual value.
    pub fn ok(actual: &Value) -> Self {
        DiffNode {
            status: Status::Ok,
            body: Body::Leaf { expected: None, actual: Some(actual.clone()), reason: None },
        }
    }

    pub fn mismatch(expected: impl Into<Spec>, actual: &Value, reason: Reason) -> Self {
        DiffNode {
            status: Status::Mismatch,
            body: Body::Leaf { expected: Some(expected.into()), actual: Some(actual.clone()), reason: Some(reason) },
        }
    }

    pub fn missing(expected: impl Into<Spec>) -> Self {
        DiffNode {
            status: Status::Missing,
            body: Body::Leaf { expected: Some(expected.into()), actual: None, reason: None },
        }
    }

    pub fn unexpected(actual: &Value) -> Self {
        DiffNode {
            status: Status::Unexpected,
            body: Body::Leaf { expected: None, actual: Some(actual.clone()), reason: None },
        }
    }

    pub fn map(children: BTreeMap<String, DiffNode>) -> Self {
        let status = fold_status(children.values());
        DiffNode { status, body: Body::Map(children) }
    }

    pub fn seq(children: Vec<DiffNode>) -> Self {
        let status = fold_status(children.iter());
        DiffNode { status, body: Body::Seq(children) }
    }

    pub fn unordered(children: BTreeMap<Slot, DiffNode>) -> Self {
        let status = fold_status(children.values());
        DiffNode { status, body: Body::Unordered(children) }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Expected spec of a leaf.
    pub fn expected(&self) -> Option<&Spec> {
        match &self.body {
            Body::Leaf { expected, .. } => expected.as_ref(),
            _ => None,
        }
    }

    /// Actual value of a leaf.
    pub fn actual(&self) -> Option<&Value> {
        match &self.body {
            Body::Leaf { actual, .. } => actual.as_ref(),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&Reason> {
        match &self.body {
            Body::Leaf { reason, .. } => reason.as_ref(),
            _ => None,
        }
    }

    /// Step into a container child.
    pub fn child(&self, segment: &PathSegment) -> Option<&DiffNode> {
        match (&self.body, segment) {
            (Body::Map(children), PathSegment::Key(key)) => children.get(key),
            (Body::Seq(children), PathSegment::Index(idx)) => children.get(*idx),
            (Body::Unordered(children), PathSegment::Slot(slot)) => children.get(slot),
            _ => None,
        }
    }

    /// Follow `path` from this node.
    pub fn at(&self, path: &[PathSegment]) -> Option<&DiffNode> {
        path.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// Every non-`Ok` leaf with its path, in key / index / slot order.
    pub fn mismatches(&self) -> Vec<(Path, &DiffNode)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect_mismatches(&mut path, &mut out);
        out
    }

    fn collect_mismatches<'a>(&'a self, path: &mut Path, out: &mut Vec<(Path, &'a DiffNode)>) {
        if self.is_ok() {
            return;
        }
        match &self.body {
            Body::Leaf { .. } => out.push((path.clone(), self)),
            Body::Map(children) => {
                for (key, child) in children {
                    path.push(PathSegment::Key(key.clone()));
                    child.collect_mismatches(path, out);
                    path.pop();
                }
            }
            Body::Seq(children) => {
                for (idx, child) in children.iter().enumerate() {
                    path.push(PathSegment::Index(idx));
                    child.collect_mismatches(path, out);
                    path.pop();
                }
            }
            Body::Unordered(children) => {
                for (slot, child) in children {
                    path.push(PathSegment::Slot(*slot));
                    child.collect_mismatches(path, out);
                    path.pop();
                }
            }
        }
    }
}

fn fold_status<'a>(mut children: impl Iterator<Item = &'a DiffNode>) -> Status {
    if children.all(DiffNode::is_ok) { Status::Ok } else { Status::Mismatch }
}

/// One step into a diff tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
    Slot(Slot),
}

pub type Path = Vec<PathSegment>;

// --- Outcome ------------------------------------------------------------------

/// Result of evaluating one matcher against one actual value.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    verdict: Verdict,
    diff: DiffNode,
}

impl Outcome {
    /// Passing outcome whose diff is a single `Ok` leaf.
    pub fn ok(actual: &Value) -> Self {
        Outcome::from(DiffNode::ok(actual))
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Match
    }

    pub fn diff(&self) -> &DiffNode {
        &self.diff
    }

    pub fn into_diff(self) -> DiffNode {
        self.diff
    }

    /// `(passed, diff)`, the shape render adapters and test shims consume.
    pub fn into_parts(self) -> (bool, DiffNode) {
        (self.passed(), self.diff)
    }
}

impl From<DiffNode> for Outcome {
    fn from(diff: DiffNode) -> Self {
        let verdict = if diff.is_ok() { Verdict::Match } else { Verdict::Mismatch };
        Outcome { verdict, diff }
    }
}
