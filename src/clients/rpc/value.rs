//! XML-RPC values.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;

/// `strftime` format of `dateTime.iso8601` values.
pub const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// A value carried by an XML-RPC call or response.
///
/// Converts to and from [`serde_json::Value`] so endpoint methods can keep
/// working with JSON-shaped payloads.
///
/// # Example
///
/// ```rust
/// use magento_api::clients::RpcValue;
/// use serde_json::json;
///
/// let value = RpcValue::from(json!({"qty": 5, "is_in_stock": true}));
/// assert_eq!(value.get("qty"), Some(&RpcValue::Int(5)));
/// assert_eq!(value.to_json(), json!({"qty": 5, "is_in_stock": true}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RpcValue {
    /// `<nil/>`, sent for absent optional arguments.
    Nil,
    /// `<boolean>`
    Bool(bool),
    /// `<int>`, `<i4>` or `<i8>`
    Int(i64),
    /// `<double>`
    Double(f64),
    /// `<string>`, or an untyped `<value>`
    String(String),
    /// `<dateTime.iso8601>`
    DateTime(NaiveDateTime),
    /// `<base64>`
    Base64(Vec<u8>),
    /// `<array>`
    Array(Vec<RpcValue>),
    /// `<struct>`
    Struct(BTreeMap<String, RpcValue>),
}

impl RpcValue {
    /// Returns the value as an integer.
    ///
    /// Magento's RPC API often answers numbers as strings, so numeric strings
    /// are accepted too.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::String(s) => s.trim().parse().ok(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Double(d) if d.fract() == 0.0 => Some(*d as i64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members if this is a struct.
    #[must_use]
    pub const fn as_struct(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Struct(members) => Some(members),
            _ => None,
        }
    }

    /// Returns a struct member by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_struct().and_then(|members| members.get(key))
    }

    /// Returns the truthiness of the value.
    ///
    /// `Nil`, `false`, zero, empty strings, empty arrays and empty structs
    /// are false; everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Double(d) => *d != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::DateTime(_) => true,
            Self::Base64(bytes) => !bytes.is_empty(),
            Self::Array(items) => !items.is_empty(),
            Self::Struct(members) => !members.is_empty(),
        }
    }

    /// Converts the value into JSON.
    ///
    /// Date-times become `dateTime.iso8601` strings and binary data becomes
    /// a base64 string. Non-finite doubles become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Nil => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Double(d) => serde_json::Number::from_f64(*d).map_or(Value::Null, Value::Number),
            Self::String(s) => Value::String(s.clone()),
            Self::DateTime(dt) => Value::String(dt.format(DATETIME_FORMAT).to_string()),
            Self::Base64(bytes) => Value::String(STANDARD.encode(bytes)),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Struct(members) => Value::Object(
                members
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for RpcValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Nil,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Double(n.as_f64().unwrap_or_default()), Self::Int),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(members) => Self::Struct(
                members
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&RpcValue> for serde_json::Value {
    fn from(value: &RpcValue) -> Self {
        value.to_json()
    }
}

impl From<RpcValue> for serde_json::Value {
    fn from(value: RpcValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for RpcValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for RpcValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for RpcValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for RpcValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for RpcValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::String(value.to_string()), Self::Int)
    }
}

impl From<f64> for RpcValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for RpcValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RpcValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDateTime> for RpcValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Vec<Self>> for RpcValue {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<String, Self>> for RpcValue {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Struct(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for RpcValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
