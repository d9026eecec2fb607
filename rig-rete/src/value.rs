//! Binding values and contexts.
//!
//! The core does not need an open-ended value type: a binding context only
//! ever carries the scalar identifiers (ids, names, flags) a matcher
//! extracted from a fact, never a fact itself. This mirrors `bingo-rete`'s
//! `FactValue` enum, narrowed to what a binding actually needs.

use std::collections::BTreeMap;

/// A bound value inside a binding [`Context`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// A binding context: variable name → bound value.
///
/// `BTreeMap` gives key-sorted, order-independent `Eq`/`Hash` for free, which
/// is exactly what a memory key built from set-and-map content needs.
pub type Context = BTreeMap<String, Value>;
