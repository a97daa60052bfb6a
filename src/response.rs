//! Method response representation.

use crate::fault::Fault;
use crate::utils::escape_xml;
use crate::value::Value;

use std::fmt::Display;
use std::io::{self, Write};

/// An XML-RPC response: either a [`Fault`] or a single result value.
///
/// Exactly one response corresponds to exactly one `<methodResponse>`
/// document.
///
/// [`Fault`]: struct.Fault.html
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// The call failed; the server returned a `<fault>`.
    Fault(Fault),
    /// The call succeeded and produced this value.
    Value(Value),
}

impl Response {
    /// Creates a fault response from an arbitrary error, with code 500 and
    /// the error's message as the reason.
    ///
    /// Careful to not expose secret data through the error's message; it is
    /// preferable to manually create the fault.
    pub fn from_error<E: Display>(error: E) -> Response {
        Response::Fault(Fault::new(500, error.to_string()))
    }

    /// Returns the result value, or `None` for faults.
    pub fn value(&self) -> Option<&Value> {
        match *self {
            Response::Value(ref value) => Some(value),
            Response::Fault(_) => None,
        }
    }

    /// Returns the fault, or `None` for successful responses.
    pub fn fault(&self) -> Option<&Fault> {
        match *self {
            Response::Fault(ref fault) => Some(fault),
            Response::Value(_) => None,
        }
    }

    /// Formats this `Response` as a UTF-8 encoded XML document.
    ///
    /// # Errors
    ///
    /// Any errors reported by the writer will be propagated to the caller.
    /// If the writer never returns an error, neither will this method.
    pub fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        write!(fmt, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        match *self {
            Response::Value(ref value) => {
                write!(fmt, "<methodResponse><params><param>")?;
                value.write_as_xml(fmt)?;
                write!(fmt, "</param></params></methodResponse>")
            }
            Response::Fault(ref fault) => {
                write!(fmt, "<methodResponse><fault><value><struct>")?;
                write!(
                    fmt,
                    "<member><name>faultCode</name><value><int>{}</int></value></member>",
                    fault.code()
                )?;
                write!(
                    fmt,
                    "<member><name>faultString</name><value><string>{}</string></value></member>",
                    escape_xml(fault.reason())
                )?;
                write!(fmt, "</struct></value></fault></methodResponse>")
            }
        }
    }

    /// Formats this `Response` as an XML document string.
    pub fn xml_string(&self) -> String {
        let mut buf = Vec::new();
        // This unwrap never panics since writing into a `Vec<u8>` cannot
        // fail.
        self.write_as_xml(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl From<Fault> for Response {
    fn from(fault: Fault) -> Self {
        Response::Fault(fault)
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Response::Value(value)
    }
}
