//! Method call representation.

use crate::utils::escape_xml;
use crate::value::{Value, NIL};

use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::ops::Index;

/// A call to a remote procedure: a method name plus positional parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub(crate) method_name: String,
    pub(crate) params: Vec<Value>,
}

impl Call {
    /// Creates a new call to a method named `name`.
    ///
    /// By default, no parameters are passed. Use the `arg` method to append
    /// parameters.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Call {
            method_name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter to be passed to the current list of parameters.
    pub fn arg<T: Into<Value>>(mut self, value: T) -> Self {
        self.params.push(value.into());
        self
    }

    /// Returns the name of the called method.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Returns the call parameters, in call order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Formats this `Call` as a UTF-8 encoded XML document.
    ///
    /// # Errors
    ///
    /// Any errors reported by the writer will be propagated to the caller.
    /// If the writer never returns an error, neither will this method.
    pub fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        write!(fmt, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        write!(
            fmt,
            "<methodCall><methodName>{}</methodName><params>",
            escape_xml(&self.method_name)
        )?;
        for value in &self.params {
            write!(fmt, "<param>")?;
            value.write_as_xml(fmt)?;
            write!(fmt, "</param>")?;
        }
        write!(fmt, "</params></methodCall>")
    }

    /// Formats this `Call` as an XML document string.
    pub fn xml_string(&self) -> String {
        let mut buf = Vec::new();
        // This unwrap never panics since writing into a `Vec<u8>` cannot
        // fail.
        self.write_as_xml(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Index<usize> for Call {
    type Output = Value;

    /// Accesses a call parameter by position; `Nil` when out of range.
    fn index(&self, index: usize) -> &Value {
        self.params.get(index).unwrap_or(&NIL)
    }
}

impl Display for Call {
    /// Renders the call like an invocation, `method(param, param)`.
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}(", self.method_name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{}", param)?;
        }
        write!(fmt, ")")
    }
}
