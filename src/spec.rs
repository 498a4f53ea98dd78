//! Expected values.
//!
//! A [`Spec`] is what the caller writes down as the expectation. It mirrors
//! [`Value`] and adds two things an actual value never contains: a regular
//! expression and an explicitly wrapped [`Matcher`]. Everything that is not
//! wrapped is "raw" and is turned into a matcher by the classifier
//! (`classify.rs`) at the point where it is evaluated.
//!
//! ```text
//! Spec ──┬─ Matcher(m)           -> used as is
//!        └─ raw (scalar / regex / map / seq / set)
//!                                -> Scope::resolve -> default or overridden matcher
//! ```

use crate::matcher::Matcher;
use crate::value::{Value, same_members};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Spec {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Substring search against textual actual values.
    Regex(Regex),
    Seq(Vec<Spec>),
    /// Unordered collection. Members considered equal are collapsed, see [`Spec::set`].
    Set(Vec<Spec>),
    Map(BTreeMap<String, Spec>),
    Matcher(Matcher),
}

impl Spec {
    /// Build an unordered collection the way a native set would: equal members
    /// collapse into one. Two references to the same matcher are equal, so use
    /// `set_equals` when duplicates must be kept.
    pub fn set<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Spec>,
    {
        let mut out: Vec<Spec> = Vec::new();
        for member in members {
            let member = member.into();
            if !out.contains(&member) {
                out.push(member);
            }
        }
        Spec::Set(out)
    }

    /// Build a map from `(key, spec)` pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Spec>,
    {
        Spec::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Shape of a raw spec; `None` for a wrapped matcher.
    pub fn shape(&self) -> Option<Shape> {
        Some(match self {
            Spec::Null => Shape::Null,
            Spec::Bool(_) => Shape::Bool,
            Spec::Int(_) | Spec::Float(_) => Shape::Number,
            Spec::Str(_) => Shape::Text,
            Spec::Regex(_) => Shape::Regex,
            Spec::Seq(_) => Shape::Seq,
            Spec::Set(_) => Shape::Set,
            Spec::Map(_) => Shape::Map,
            Spec::Matcher(_) => return None,
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Spec::Int(i) => Some(*i as f64),
            Spec::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Compare a raw scalar spec with an actual value. `None` when the spec is
    /// not a scalar.
    pub(crate) fn scalar_eq(&self, actual: &Value) -> Option<bool> {
        let eq = match (self, actual) {
            (Spec::Null, Value::Null) => true,
            (Spec::Bool(a), Value::Bool(b)) => a == b,
            (Spec::Int(a), Value::Int(b)) => a == b,
            (Spec::Float(a), Value::Float(b)) => a == b,
            (Spec::Str(a), Value::Str(b)) => a == b,
            (Spec::Null | Spec::Bool(_) | Spec::Int(_) | Spec::Float(_) | Spec::Str(_), _) => false,
            _ => return None,
        };
        Some(eq)
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Spec::Null, Spec::Null) => true,
            (Spec::Bool(a), Spec::Bool(b)) => a == b,
            (Spec::Int(a), Spec::Int(b)) => a == b,
            (Spec::Float(a), Spec::Float(b)) => a == b,
            (Spec::Str(a), Spec::Str(b)) => a == b,
            (Spec::Regex(a), Spec::Regex(b)) => a.as_str() == b.as_str(),
            (Spec::Seq(a), Spec::Seq(b)) => a == b,
            (Spec::Set(a), Spec::Set(b)) => same_members(a, b),
            (Spec::Map(a), Spec::Map(b)) => a == b,
            (Spec::Matcher(a), Spec::Matcher(b)) => a.same(b),
            _ => false,
        }
    }
}

// --- Shapes ------------------------------------------------------------------

/// Closed enumeration of value shapes the classifier and override tables work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Number,
    Text,
    Regex,
    Map,
    Seq,
    Set,
}

impl Shape {
    pub fn mask(self) -> ShapeMask {
        match self {
            Shape::Null => ShapeMask::NULL,
            Shape::Bool => ShapeMask::BOOL,
            Shape::Number => ShapeMask::NUMBER,
            Shape::Text => ShapeMask::TEXT,
            Shape::Regex => ShapeMask::REGEX,
            Shape::Map => ShapeMask::MAP,
            Shape::Seq => ShapeMask::SEQ,
            Shape::Set => ShapeMask::SET,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "bool",
            Shape::Number => "number",
            Shape::Text => "text",
            Shape::Regex => "regex",
            Shape::Map => "map",
            Shape::Seq => "sequence",
            Shape::Set => "set",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of shapes. Override tables key their entries by mask so one entry
    /// can cover e.g. every scalar.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShapeMask: u8 {
        const NULL   = 1 << 0;
        const BOOL   = 1 << 1;
        const NUMBER = 1 << 2;
        const TEXT   = 1 << 3;
        const REGEX  = 1 << 4;
        const MAP    = 1 << 5;
        const SEQ    = 1 << 6;
        const SET    = 1 << 7;

        const SCALAR     = Self::NULL.bits() | Self::BOOL.bits() | Self::NUMBER.bits() | Self::TEXT.bits();
        const COLLECTION = Self::SEQ.bits() | Self::SET.bits();
        const ANY        = 0xFF;
    }
}

impl ShapeMask {
    pub fn covers(self, shape: Shape) -> bool {
        self.contains(shape.mask())
    }
}

// --- Conversions -------------------------------------------------------------

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Spec::Null,
            Value::Bool(b) => Spec::Bool(b),
            Value::Int(i) => Spec::Int(i),
            Value::Float(x) => Spec::Float(x),
            Value::Str(s) => Spec::Str(s),
            Value::Seq(items) => Spec::Seq(items.into_iter().map(Spec::from).collect()),
            Value::Set(items) => Spec::Set(items.into_iter().map(Spec::from).collect()),
            Value::Map(map) => Spec::Map(map.into_iter().map(|(k, v)| (k, Spec::from(v))).collect()),
        }
    }
}

impl From<&Value> for Spec {
    fn from(value: &Value) -> Self {
        Spec::from(value.clone())
    }
}

impl From<Matcher> for Spec {
    fn from(m: Matcher) -> Self {
        Spec::Matcher(m)
    }
}

impl From<Regex> for Spec {
    fn from(re: Regex) -> Self {
        Spec::Regex(re)
    }
}

impl From<&Regex> for Spec {
    fn from(re: &Regex) -> Self {
        Spec::Regex(re.clone())
    }
}

impl From<bool> for Spec {
    fn from(b: bool) -> Self {
        Spec::Bool(b)
    }
}

macro_rules! int_into_spec {
    ($($t:ty),*) => {
        $(impl From<$t> for Spec {
            fn from(i: $t) -> Self {
                Spec::Int(i64::from(i))
            }
        })*
    };
}

int_into_spec!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Spec {
    fn from(x: f64) -> Self {
        Spec::Float(x)
    }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Self {
        Spec::Str(s.to_string())
    }
}

impl From<String> for Spec {
    fn from(s: String) -> Self {
        Spec::Str(s)
    }
}

impl<T: Into<Spec>> From<Vec<T>> for Spec {
    fn from(items: Vec<T>) -> Self {
        Spec::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Spec>> From<BTreeMap<String, T>> for Spec {
    fn from(map: BTreeMap<String, T>) -> Self {
        Spec::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Spec {
    fn from(json: serde_json::Value) -> Self {
        Spec::from(Value::from(json))
    }
}
