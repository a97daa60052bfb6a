//! Fault responses.

use crate::coerce::FromValue;
use crate::value::Value;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A `<fault>` response, indicating that a call failed.
///
/// In XML-RPC an error has an integer code and a reason string. The meaning
/// of the code is not specified by the protocol and depends on the service
/// you are implementing/using.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    code: i64,
    reason: String,
}

impl Fault {
    /// Creates a new `Fault` from an error code and a reason.
    pub fn new<S: Into<String>>(code: i64, reason: S) -> Fault {
        Fault {
            code,
            reason: reason.into(),
        }
    }

    /// Creates a new `Fault` from an error code alone, with the default
    /// reason `"Call failed with code: N"`.
    pub fn with_code(code: i64) -> Fault {
        Fault {
            code,
            reason: format!("Call failed with code: {}", code),
        }
    }

    /// Returns the fault code.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Returns the reason the call failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Creates a `Fault` from a `Value`.
    ///
    /// The `Value` must be a `Struct` with an integer `faultCode` member. A
    /// `faultString` member is optional; when it is missing (or does not
    /// convert to a string) the default reason is substituted.
    ///
    /// Returns `None` if the value isn't a valid `Fault`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Struct(ref members) => {
                let code = match members.get("faultCode") {
                    Some(&Value::Int(code)) => code,
                    _ => return None,
                };

                Some(match members.get("faultString").and_then(String::from_value) {
                    Some(reason) => Fault::new(code, reason),
                    None => Fault::with_code(code),
                })
            }
            _ => None,
        }
    }

    /// Turns this `Fault` into an equivalent `Value`.
    ///
    /// The returned value can be parsed back into a `Fault` using
    /// `Fault::from_value` or returned as a `<fault>` error response by
    /// serializing it into a `<fault></fault>` tag.
    pub fn to_value(&self) -> Value {
        let mut members = HashMap::new();
        members.insert("faultCode".to_string(), Value::Int(self.code));
        members.insert("faultString".to_string(), Value::String(self.reason.clone()));

        Value::Struct(members)
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason, self.code)
    }
}

impl Error for Fault {}
