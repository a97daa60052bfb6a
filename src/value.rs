//! Contains the different types of values understood by XML-RPC.

use crate::coerce::FromValue;
use crate::utils::escape_xml;

use base64::encode;

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::ops::Index;

/// Sentinel handed out by the indexing operations when nothing matches.
pub(crate) static NIL: Value = Value::Nil;

/// The possible XML-RPC values.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `<i4>` or `<int>`, a 64-bit signed integer.
    Int(i64),
    /// `<boolean>`, 0 == `false`, 1 == `true`.
    Bool(bool),
    /// `<string>`, plain (XML-escaped on the wire) text.
    String(String),
    /// `<double>`
    Double(f64),
    /// `<dateTime.iso8601>`, the raw 17-character `YYYYMMDDTHH:MM:SS` wire
    /// string.
    ///
    /// The wire format does not specify a timezone, so the codec carries the
    /// text verbatim instead of interpreting it as a calendar date. Use
    /// [`DateComponents`] to split it up.
    ///
    /// [`DateComponents`]: struct.DateComponents.html
    DateTime(String),
    /// `<base64>`, binary data, base64-encoded on the wire.
    Base64(Vec<u8>),

    /// `<struct>`, a mapping of named values.
    ///
    /// Keys are unique (the last write wins while parsing) and member order
    /// is not preserved; positional access sorts the keys first, see the
    /// `Index<usize>` impl.
    Struct(HashMap<String, Value>),
    /// `<array>`, a list of arbitrary (heterogeneous) values. Order is
    /// significant and preserved.
    Array(Vec<Value>),

    /// The empty value: `<value/>` on the wire, or `<nil/>` when the peer
    /// supports the [nil extension][ext].
    ///
    /// [ext]: https://web.archive.org/web/20050911054235/http://ontosys.com/xml-rpc/extensions.php
    Nil,
}

impl Value {
    /// Returns the number of elements this value holds.
    ///
    /// `0` for `Nil`, `1` for every scalar, and the element/member count for
    /// arrays and structs. Matches the indexing scheme of the `Index<usize>`
    /// impl.
    pub fn count(&self) -> usize {
        match *self {
            Value::Nil => 0,
            Value::Int(_)
            | Value::Bool(_)
            | Value::String(_)
            | Value::Double(_)
            | Value::DateTime(_)
            | Value::Base64(_) => 1,
            Value::Struct(ref members) => members.len(),
            Value::Array(ref elements) => elements.len(),
        }
    }

    /// Lossy conversion into a string, per the central coercion table.
    ///
    /// Collections and binary data do not convert.
    pub fn string_value(&self) -> Option<String> {
        String::from_value(self)
    }

    /// Lossy conversion into an integer, per the central coercion table.
    pub fn int_value(&self) -> Option<i64> {
        i64::from_value(self)
    }

    /// Lossy conversion into a double, per the central coercion table.
    pub fn double_value(&self) -> Option<f64> {
        f64::from_value(self)
    }

    /// Lossy conversion into a boolean, per the central coercion table.
    pub fn bool_value(&self) -> Option<bool> {
        bool::from_value(self)
    }

    /// Formats this `Value` as an XML `<value>` element.
    ///
    /// `Nil` is written as the `<value/>` shorthand; see
    /// [`write_as_xml_with_nil`](#method.write_as_xml_with_nil) for peers
    /// that understand the nil extension.
    pub fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        self.write_value(fmt, false)
    }

    /// Formats this `Value` as an XML `<value>` element, writing `Nil` as an
    /// explicit `<value><null/></value>`.
    pub fn write_as_xml_with_nil<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        self.write_value(fmt, true)
    }

    fn write_value<W: Write>(&self, fmt: &mut W, explicit_nil: bool) -> io::Result<()> {
        match *self {
            Value::Int(i) => {
                write!(fmt, "<value><i4>{}</i4></value>", i)?;
            }
            Value::Bool(b) => {
                write!(
                    fmt,
                    "<value><boolean>{}</boolean></value>",
                    if b { "1" } else { "0" }
                )?;
            }
            Value::String(ref s) => {
                write!(fmt, "<value><string>{}</string></value>", escape_xml(s))?;
            }
            Value::Double(d) => {
                write!(fmt, "<value><double>{}</double></value>", d)?;
            }
            Value::DateTime(ref s) => {
                write!(fmt, "<value><dateTime.iso8601>{}</dateTime.iso8601></value>", s)?;
            }
            Value::Base64(ref data) => {
                write!(fmt, "<value><base64>{}</base64></value>", encode(data))?;
            }
            Value::Struct(ref members) => {
                write!(fmt, "<value><struct>")?;
                for (name, value) in members {
                    write!(fmt, "<member><name>{}</name>", escape_xml(name))?;
                    value.write_value(fmt, explicit_nil)?;
                    write!(fmt, "</member>")?;
                }
                write!(fmt, "</struct></value>")?;
            }
            Value::Array(ref elements) => {
                write!(fmt, "<value><array><data>")?;
                for value in elements {
                    value.write_value(fmt, explicit_nil)?;
                }
                write!(fmt, "</data></array></value>")?;
            }
            Value::Nil => {
                if explicit_nil {
                    write!(fmt, "<value><null/></value>")?;
                } else {
                    write!(fmt, "<value/>")?;
                }
            }
        }

        Ok(())
    }

    /// Formats this `Value` as a standalone `<value>` element string.
    pub fn xml_string(&self) -> String {
        let mut buf = Vec::new();
        // This unwrap never panics since writing into a `Vec<u8>` cannot
        // fail.
        self.write_as_xml(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Accesses a value by position.
    ///
    /// Arrays index naturally and yield `Nil` out of bounds. Structs are
    /// indexed in lexicographically sorted key order, which re-sorts the
    /// keys on every access (O(n log n) per call; callers iterating a
    /// struct by position should cache the result). Scalars are their own
    /// element `0`. Everything else is `Nil`.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::Array(ref elements) => elements.get(index).unwrap_or(&NIL),
            Value::Struct(ref members) => {
                let mut keys: Vec<_> = members.keys().collect();
                keys.sort();
                keys.get(index)
                    .and_then(|key| members.get(key.as_str()))
                    .unwrap_or(&NIL)
            }
            _ if index == 0 => self,
            _ => &NIL,
        }
    }
}

impl<'a> Index<&'a str> for Value {
    type Output = Value;

    /// Accesses a struct member by name; `Nil` for missing members and for
    /// every other kind of value.
    fn index(&self, key: &str) -> &Value {
        match *self {
            Value::Struct(ref members) => members.get(key).unwrap_or(&NIL),
            _ => &NIL,
        }
    }
}

impl Display for Value {
    /// A human-readable rendition for diagnostics; not the wire format.
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Nil => write!(fmt, "<null>"),
            Value::String(ref s) => write!(fmt, "\"{}\"", s),
            Value::Bool(b) => write!(fmt, "{}", if b { "YES" } else { "NO" }),
            Value::Int(i) => write!(fmt, "{}", i),
            Value::Double(d) => write!(fmt, "{}", d),
            Value::DateTime(ref s) => write!(fmt, "{}", s),
            Value::Base64(ref data) => write!(fmt, "<data: #{}>", data.len()),
            Value::Array(ref elements) => {
                write!(fmt, "[ ")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{}", element)?;
                }
                write!(fmt, " ]")
            }
            Value::Struct(ref members) => {
                // Sorted so the rendition is deterministic.
                let mut keys: Vec<_> = members.keys().collect();
                keys.sort();
                write!(fmt, "{{ ")?;
                for key in keys {
                    write!(fmt, "{} = {}; ", key, members[key])?;
                }
                write!(fmt, "}}")
            }
        }
    }
}

impl From<i32> for Value {
    fn from(other: i32) -> Self {
        Value::Int(other.into())
    }
}

impl From<i64> for Value {
    fn from(other: i64) -> Self {
        Value::Int(other)
    }
}

impl From<bool> for Value {
    fn from(other: bool) -> Self {
        Value::Bool(other)
    }
}

impl From<String> for Value {
    fn from(other: String) -> Self {
        Value::String(other)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(other: &'a str) -> Self {
        Value::String(other.to_string())
    }
}

impl From<f64> for Value {
    fn from(other: f64) -> Self {
        Value::Double(other)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(other: Vec<T>) -> Self {
        Value::Array(other.into_iter().map(T::into).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(other: HashMap<String, T>) -> Self {
        Value::Struct(other.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}
