//! Defines the error type reported by the parser.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use xml::common::TextPosition;
use xml::reader::Error as XmlError;

/// Describes the possible errors that can occur when parsing a document.
///
/// A parse either yields a complete `Call`/`Response` or one of these; the
/// parser never panics and never returns partial output.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// Error while parsing (malformed?) XML.
    XmlError(XmlError),

    /// Found an unexpected tag, attribute, etc.
    UnexpectedXml {
        /// A short description of the kind of data that was expected.
        expected: String,
        /// The position of the unexpected data inside the XML document.
        position: TextPosition,
    },
}

impl From<XmlError> for ParseError {
    fn from(e: XmlError) -> Self {
        ParseError::XmlError(e)
    }
}

impl Display for ParseError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::XmlError(ref err) => write!(fmt, "malformed XML: {}", err),
            ParseError::UnexpectedXml {
                ref expected,
                ref position,
            } => {
                write!(fmt, "unexpected XML at {} (expected {})", position, expected)
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ParseError::XmlError(ref err) => Some(err),
            ParseError::UnexpectedXml { .. } => None,
        }
    }
}
