//! An XML-RPC wire protocol codec in Rust.
//!
//! The `xmlrpc-codec` crate implements the codec half of the
//! [XML-RPC spec][spec]: a value model for everything the protocol can
//! express, a serializer producing canonical XML documents, an event-driven
//! parser reconstructing calls and responses from complete documents, the
//! `system.multicall` batching convention, and lossy conversions between
//! values and native types.
//!
//! Transport is deliberately not part of this crate. Hand the output of
//! [`Call::xml_string`] to any HTTP client and feed the returned body to
//! [`parse_response`]; the codec only ever sees complete in-memory
//! documents.
//!
//! [spec]: http://xmlrpc.scripting.com/spec.html
//! [`Call::xml_string`]: struct.Call.html#method.xml_string
//! [`parse_response`]: fn.parse_response.html

mod call;
mod coerce;
mod error;
mod fault;
mod multicall;
mod parser;
mod response;
mod utils;
mod value;

pub use crate::call::Call;
pub use crate::coerce::{DateComponents, FromValue};
pub use crate::error::ParseError;
pub use crate::fault::Fault;
pub use crate::parser::{parse_call, parse_response, ParseResult};
pub use crate::response::Response;
pub use crate::value::Value;
