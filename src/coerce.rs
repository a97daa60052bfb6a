//! Lossy conversions between XML-RPC values and native Rust types.
//!
//! The conversion table is deliberately asymmetric: `Nil` converts to `0`,
//! `0.0`, `false` and the empty string, while collections and binary data
//! never convert to scalars at all. The asymmetries are part of the protocol
//! surface that calling code relies on; the tests pin every cell.

use crate::value::Value;

use log::warn;
use url::Url;

use std::collections::HashMap;

/// Conversion from an XML-RPC value into a native type.
///
/// The set of implementations is closed; every lossy conversion rule lives
/// in this module, where it can be audited in one place. The opposite
/// direction uses the `From<T> for Value` impls.
pub trait FromValue: Sized {
    /// Converts `value` into `Self`, or `None` when the value cannot
    /// represent one.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::String(ref s) | Value::DateTime(ref s) => Some(s.clone()),
            Value::Bool(b) => Some(if b { "true" } else { "false" }.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Double(d) => Some(d.to_string()),
            Value::Nil => Some(String::new()),
            Value::Array(_) | Value::Struct(_) | Value::Base64(_) => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::String(ref s) => s.parse().ok(),
            Value::Bool(b) => Some(i64::from(b)),
            Value::Int(i) => Some(i),
            Value::Double(d) => Some(d as i64),
            Value::Nil => Some(0),
            Value::DateTime(_) | Value::Base64(_) | Value::Array(_) | Value::Struct(_) => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::String(ref s) => s.parse().ok(),
            Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(i as f64),
            Value::Double(d) => Some(d),
            Value::Nil => Some(0.0),
            Value::DateTime(_) | Value::Base64(_) | Value::Array(_) | Value::Struct(_) => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            // Strings never fail; anything outside the truthy set is false.
            Value::String(ref s) => Some(matches!(
                s.to_lowercase().as_str(),
                "yes" | "true" | "1" | "да"
            )),
            Value::Bool(b) => Some(b),
            Value::Int(i) => Some(i != 0),
            Value::Double(d) => Some(d != 0.0),
            Value::Nil => Some(false),
            Value::DateTime(_) | Value::Base64(_) | Value::Array(_) | Value::Struct(_) => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    /// Element-wise conversion; fails when any element fails.
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Array(ref elements) => elements.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    /// Member-wise conversion; members whose value does not convert are
    /// skipped with a warning.
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Struct(ref members) => {
                let mut converted = HashMap::with_capacity(members.len());
                for (key, member) in members {
                    match T::from_value(member) {
                        Some(native) => {
                            converted.insert(key.clone(), native);
                        }
                        None => warn!("skipping unconvertible struct member {}: {}", key, member),
                    }
                }
                Some(converted)
            }
            _ => None,
        }
    }
}

impl FromValue for Url {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::String(ref s) => Url::parse(s).ok(),
            _ => None,
        }
    }
}

impl From<Url> for Value {
    fn from(url: Url) -> Self {
        Value::String(url.to_string())
    }
}

/// The components of a wire timestamp, `YYYYMMDDTHH:MM:SS`.
///
/// The wire format carries no timezone, so the components are not
/// interpreted as a calendar date; they are only split out of (and rendered
/// back into) the fixed 17-character layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateComponents {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateComponents {
    /// Parses the fixed `YYYYMMDDTHH:MM:SS` layout. Any other length or
    /// shape fails.
    pub fn parse(s: &str) -> Option<DateComponents> {
        if !s.is_ascii() || s.len() != 17 {
            return None;
        }
        let bytes = s.as_bytes();
        if bytes[8] != b'T' || bytes[11] != b':' || bytes[14] != b':' {
            return None;
        }

        Some(DateComponents {
            year: s[0..4].parse().ok()?,
            month: s[4..6].parse().ok()?,
            day: s[6..8].parse().ok()?,
            hour: s[9..11].parse().ok()?,
            minute: s[12..14].parse().ok()?,
            second: s[15..17].parse().ok()?,
        })
    }
}

impl FromValue for DateComponents {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::DateTime(ref s) => DateComponents::parse(s),
            _ => None,
        }
    }
}

impl From<DateComponents> for Value {
    fn from(c: DateComponents) -> Self {
        Value::DateTime(format!(
            "{:04}{:02}{:02}T{:02}:{:02}:{:02}",
            c.year, c.month, c.day, c.hour, c.minute, c.second
        ))
    }
}
