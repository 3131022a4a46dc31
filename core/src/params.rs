//! Ordered parameter bag fed to the query-string and form-body serializers.

use std::borrow::Cow;

/// A scalar parameter value.
///
/// `Undefined` and `Null` are kept distinct from `Text("")` because the two
/// serialization paths treat them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// True for values the query-string path drops: undefined, null,
    /// `false`, zero, NaN and the empty string.
    pub fn is_absent_or_empty(&self) -> bool {
        match self {
            ParamValue::Undefined | ParamValue::Null => true,
            ParamValue::Bool(b) => !b,
            ParamValue::Int(n) => *n == 0,
            ParamValue::Float(f) => *f == 0.0 || f.is_nan(),
            ParamValue::Text(s) => s.is_empty(),
        }
    }

    /// True only for undefined and null.
    pub fn is_unset(&self) -> bool {
        matches!(self, ParamValue::Undefined | ParamValue::Null)
    }

    /// Textual form placed on the wire, before percent-encoding.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            ParamValue::Undefined | ParamValue::Null => Cow::Borrowed(""),
            ParamValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            ParamValue::Int(n) => Cow::Owned(n.to_string()),
            ParamValue::Float(f) if f.is_infinite() => {
                Cow::Borrowed(if f.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            ParamValue::Float(f) => Cow::Owned(render_float(*f)),
            ParamValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// Number-to-text the way a browser renders it: exponent form with an
/// explicit sign from 1e21 up and below 1e-6, plain decimals in between.
fn render_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) || f.is_nan() {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Undefined, Into::into)
    }
}

/// Insertion-ordered mapping from keys to `ParamValue`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBag {
    entries: Vec<(String, ParamValue)>,
}

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Substitute `default` for `key` when its value is absent or empty,
    /// appending the key if it was never set.
    pub fn with_default(mut self, key: &str, default: impl Into<ParamValue>) -> Self {
        let missing = self.get(key).is_none_or(ParamValue::is_absent_or_empty);
        if missing {
            self.insert(key, default);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = ParamBag::new();
        bag.extend(iter);
        bag
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for ParamBag {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
