//! Actual values.
//!
//! A [`Value`] is the data under test: scalars, ordered sequences, unordered
//! collections and string-keyed maps. Matching only ever reads a `Value`; it is
//! never rewritten during evaluation.
//!
//! ## Invariants
//!
//! - `Set` holds no two equal members. [`Value::set`] and the `serde_json`
//!   conversion enforce this; constructing `Value::Set` by hand with duplicates
//!   is allowed; equality then compares the members as a multiset, so
//!   repeated members must be repeated the same number of times on both sides.
//! - Equality is strict: `Int(1) != Float(1.0)`, and `Set` equality ignores
//!   member order.

use crate::spec::Shape;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Ordered sequence.
    Seq(Vec<Value>),
    /// Unordered collection of distinct members.
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build an unordered collection, dropping repeated members (first one wins).
    pub fn set<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut out: Vec<Value> = Vec::new();
        for member in members {
            let member = member.into();
            if !out.contains(&member) {
                out.push(member);
            }
        }
        Value::Set(out)
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Int(_) | Value::Float(_) => Shape::Number,
            Value::Str(_) => Shape::Text,
            Value::Seq(_) => Shape::Seq,
            Value::Set(_) => Shape::Set,
            Value::Map(_) => Shape::Map,
        }
    }

    /// Numeric view used by tolerance matching. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a sequence or set, in stored order.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => same_members(a, b),
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Order-insensitive multiset comparison: each member of `a` is paired off
/// with a distinct equal member of `b`.
pub(crate) fn same_members<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut taken = vec![false; b.len()];
    a.iter().all(|x| match (0..b.len()).find(|&j| !taken[j] && b[j] == *x) {
        Some(j) => {
            taken[j] = true;
            true
        }
        None => false,
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Seq(items) => write_items(f, "[", items, "]"),
            Value::Set(items) => write_items(f, "#{", items, "}"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

// --- Conversions -------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_into_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i64::from(i))
            }
        })*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}
