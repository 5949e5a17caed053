//! Request parameters and the loosely-typed call input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Form/query encoding: lists expand to one entry per element.
    fn encoded(&self) -> Vec<String> {
        match self {
            ParamValue::Str(s) => vec![s.clone()],
            ParamValue::Bool(b) => vec![b.to_string()],
            ParamValue::Int(i) => vec![i.to_string()],
            ParamValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::List(v.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(v: [&str; N]) -> Self {
        ParamValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Parameter mapping sent with a request. Keys are kept sorted so the
/// encoded body is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert only when `key` is vacant. Returns whether the value was written.
    pub fn insert_if_absent(&mut self, key: &str, value: impl Into<ParamValue>) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten into `(key, value)` pairs for form or query encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .flat_map(|(k, v)| v.encoded().into_iter().map(move |s| (k.clone(), s)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What the caller hands to an endpoint method.
///
/// Most call sites pass a string (a URL or a piece of text) or a [`Params`]
/// mapping; both convert via `From`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Input {
    #[default]
    Empty,
    Value(String),
    Params(Params),
    ValueWithParams(String, Params),
}

impl Input {
    /// Split into the positional value and the parameter mapping.
    pub fn into_parts(self) -> (Option<String>, Params) {
        match self {
            Input::Empty => (None, Params::new()),
            Input::Value(v) => (Some(v), Params::new()),
            Input::Params(p) => (None, p),
            Input::ValueWithParams(v, p) => (Some(v), p),
        }
    }
}

impl From<&str> for Input {
    fn from(v: &str) -> Self {
        Input::Value(v.to_string())
    }
}

impl From<String> for Input {
    fn from(v: String) -> Self {
        Input::Value(v)
    }
}

impl From<&String> for Input {
    fn from(v: &String) -> Self {
        Input::Value(v.clone())
    }
}

impl From<Params> for Input {
    fn from(p: Params) -> Self {
        Input::Params(p)
    }
}

impl<S: Into<String>> From<(S, Params)> for Input {
    fn from((v, p): (S, Params)) -> Self {
        Input::ValueWithParams(v.into(), p)
    }
}

impl From<()> for Input {
    fn from(_: ()) -> Self {
        Input::Empty
    }
}
