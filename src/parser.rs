//! XML-RPC document parser.
//!
//! The parser is an event-driven state machine: the XML tokenizer delivers a
//! flat stream of tag-open/tag-close/character events, and two explicit
//! stacks (in-progress value slots and pending member names) reconstruct
//! arbitrarily deep array/struct nesting without recursion and without an
//! intermediate tree.

use crate::call::Call;
use crate::error::ParseError;
use crate::fault::Fault;
use crate::response::Response;
use crate::value::Value;

use log::warn;
use xml::common::Position;
use xml::name::OwnedName;
use xml::reader::{EventReader, XmlEvent};
use xml::ParserConfig;

use std::collections::HashMap;
use std::io::Read;

pub type ParseResult<T> = Result<T, ParseError>;

/// The tags the wire grammar recognizes.
///
/// Synonymous tags collapse to one kind: `<i4>`/`<int>`, `<double>`/`<float>`
/// and `<null>`/`<nil>`. Anything else is a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    MethodCall,
    MethodResponse,
    MethodName,
    Params,
    Param,
    Fault,
    Value,
    Array,
    Data,
    Struct,
    Member,
    Name,
    String,
    Int,
    Double,
    Boolean,
    Base64,
    DateTime,
    Null,
}

impl Tag {
    fn from_name(name: &str) -> Option<Tag> {
        match name {
            "methodCall" => Some(Tag::MethodCall),
            "methodResponse" => Some(Tag::MethodResponse),
            "methodName" => Some(Tag::MethodName),
            "params" => Some(Tag::Params),
            "param" => Some(Tag::Param),
            "fault" => Some(Tag::Fault),
            "value" => Some(Tag::Value),
            "array" => Some(Tag::Array),
            "data" => Some(Tag::Data),
            "struct" => Some(Tag::Struct),
            "member" => Some(Tag::Member),
            "name" => Some(Tag::Name),
            "string" => Some(Tag::String),
            "i4" | "int" => Some(Tag::Int),
            "double" | "float" => Some(Tag::Double),
            "boolean" => Some(Tag::Boolean),
            "base64" => Some(Tag::Base64),
            "dateTime.iso8601" => Some(Tag::DateTime),
            "null" | "nil" => Some(Tag::Null),
            _ => None,
        }
    }
}

pub struct Parser<'a, R: Read + 'a> {
    reader: EventReader<&'a mut R>,

    call: Option<Call>,
    response: Option<Response>,

    /// In-progress value slots, one pushed per open `<value>`. `None` marks
    /// a slot no type tag has filled yet.
    values: Vec<Option<Value>>,
    /// Pending `<member>` names, innermost last.
    names: Vec<String>,
    /// Character data accumulator; collects only while a capturing tag is
    /// open.
    cdata: Option<String>,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Parser {
            reader: EventReader::new_with_config(
                reader,
                ParserConfig {
                    cdata_to_characters: true,
                    ..Default::default()
                },
            ),
            call: None,
            response: None,
            values: Vec::new(),
            names: Vec::new(),
            cdata: None,
        }
    }

    /// Consumes the document and returns the `<methodCall>` it contained.
    pub fn parse_call(mut self) -> ParseResult<Call> {
        self.run()?;
        match self.call.take() {
            Some(call) => Ok(call),
            None => self.expected("a <methodCall> document"),
        }
    }

    /// Consumes the document and returns the `<methodResponse>` it
    /// contained.
    pub fn parse_response(mut self) -> ParseResult<Response> {
        self.run()?;
        match self.response.take() {
            Some(response) => Ok(response),
            None => self.expected("a <methodResponse> document"),
        }
    }

    /// Pumps the tokenizer until the end of the document, feeding every tag
    /// event through the state machine.
    fn run(&mut self) -> ParseResult<()> {
        loop {
            match self.reader.next()? {
                XmlEvent::StartDocument { .. }
                | XmlEvent::ProcessingInstruction { .. }
                | XmlEvent::Comment(_) => {}
                XmlEvent::StartElement {
                    ref name,
                    ref attributes,
                    ..
                } => {
                    if !attributes.is_empty() {
                        return self.expected(format!("tag <{}> without attributes", name));
                    }
                    let tag = self.recognize(name)?;
                    self.open(tag)?;
                }
                XmlEvent::EndElement { ref name } => {
                    let tag = self.recognize(name)?;
                    self.close(tag)?;
                }
                XmlEvent::Characters(ref s) | XmlEvent::CData(ref s) | XmlEvent::Whitespace(ref s) => {
                    if let Some(ref mut cdata) = self.cdata {
                        cdata.push_str(s);
                    }
                }
                XmlEvent::EndDocument => return Ok(()),
            }
        }
    }

    /// Maps a tag name onto the closed `Tag` set; unknown, prefixed or
    /// namespaced names are a parse failure.
    fn recognize(&self, name: &OwnedName) -> ParseResult<Tag> {
        if name.prefix.is_some() || name.namespace.is_some() {
            return self.expected(format!("tag <{}> without a namespace", name));
        }
        match Tag::from_name(&name.local_name) {
            Some(tag) => Ok(tag),
            None => self.expected(format!("a recognized XML-RPC tag, got <{}>", name.local_name)),
        }
    }

    /// Builds and returns an `Err(UnexpectedXml)`.
    fn expected<T, E: ToString>(&self, expected: E) -> ParseResult<T> {
        Err(ParseError::UnexpectedXml {
            expected: expected.to_string(),
            position: self.reader.position(),
        })
    }

    fn begin_cdata(&mut self) {
        self.cdata = Some(String::new());
    }

    fn take_cdata(&mut self) -> Option<String> {
        self.cdata.take()
    }

    /// Replaces the innermost in-progress value.
    fn set_current(&mut self, value: Value) -> ParseResult<()> {
        match self.values.last_mut() {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => self.expected("an enclosing <value>"),
        }
    }

    fn open(&mut self, tag: Tag) -> ParseResult<()> {
        match tag {
            Tag::MethodCall => {
                self.call = Some(Call::new(""));
            }
            Tag::MethodResponse => {
                self.values.clear();
                self.names.clear();
            }
            Tag::MethodName | Tag::Name => self.begin_cdata(),
            Tag::Value => {
                self.values.push(None);
                // Collect characters for the untyped-value-is-a-string
                // fallback.
                self.begin_cdata();
            }
            Tag::String
            | Tag::Int
            | Tag::Double
            | Tag::Boolean
            | Tag::Base64
            | Tag::DateTime => self.begin_cdata(),
            Tag::Array => {
                self.cdata = None;
                self.set_current(Value::Array(Vec::new()))?;
            }
            Tag::Struct => {
                self.cdata = None;
                self.set_current(Value::Struct(HashMap::new()))?;
            }
            Tag::Param => {
                // One value per parameter; drop whatever a broken document
                // may have left behind.
                self.values.clear();
            }
            Tag::Params | Tag::Fault | Tag::Member | Tag::Data | Tag::Null => {}
        }
        Ok(())
    }

    fn close(&mut self, tag: Tag) -> ParseResult<()> {
        match tag {
            Tag::MethodCall | Tag::Params | Tag::Data => {}

            Tag::MethodResponse => {
                if self.response.is_none() {
                    match self.values.pop().flatten() {
                        Some(value) => self.response = Some(Response::Value(value)),
                        None => {
                            warn!("response carried no value, substituting <null>");
                            self.response = Some(Response::Value(Value::Nil));
                        }
                    }
                }
            }

            Tag::MethodName => {
                let name = self.take_cdata().unwrap_or_default();
                if let Some(ref mut call) = self.call {
                    call.method_name = name;
                }
            }

            Tag::Name => {
                let name = self.take_cdata().unwrap_or_default();
                self.names.push(name);
            }

            Tag::Value => {
                let len = self.values.len();
                if len == 0 {
                    return self.expected("a matching <value> open tag");
                }
                if self.values[len - 1].is_none() {
                    // An untyped <value> holds a plain string.
                    let s = self.take_cdata().unwrap_or_default();
                    self.values[len - 1] = Some(Value::String(s));
                }
                // A value completed directly inside an array's <data> is an
                // element of that array.
                if len > 1 && matches!(self.values[len - 2], Some(Value::Array(_))) {
                    let element = self.values.pop().flatten();
                    if let (Some(element), Some(Some(Value::Array(elements)))) =
                        (element, self.values.last_mut())
                    {
                        elements.push(element);
                    }
                }
            }

            Tag::Member => {
                let value = match self.values.pop().flatten() {
                    Some(value) => value,
                    None => return self.expected("a <member> value"),
                };
                let name = match self.names.pop() {
                    Some(name) => name,
                    None => return self.expected("a <member> name"),
                };
                match self.values.last_mut() {
                    Some(Some(Value::Struct(members))) => {
                        // Last write wins on duplicate keys.
                        members.insert(name, value);
                    }
                    _ => return self.expected("an enclosing <struct>"),
                }
            }

            Tag::Param => {
                if self.call.is_some() {
                    let value = match self.values.pop().flatten() {
                        Some(value) => value,
                        None => return self.expected("a <param> value"),
                    };
                    self.values.clear();
                    if let Some(ref mut call) = self.call {
                        call.params.push(value);
                    }
                }
                // Inside a response the lone value stays on the stack for
                // </methodResponse>.
            }

            Tag::Fault => {
                let value = match self.values.pop().flatten() {
                    Some(value) => value,
                    None => {
                        warn!("<fault> carried no value");
                        self.response =
                            Some(Response::Fault(Fault::new(-1337, "parse error")));
                        return Ok(());
                    }
                };
                self.values.clear();

                if !matches!(value, Value::Struct(_)) {
                    warn!("<fault> value is not a struct: {}", value);
                    self.response = Some(Response::Fault(Fault::new(
                        -1338,
                        "parse error, fault value",
                    )));
                    return Ok(());
                }
                match Fault::from_value(&value) {
                    Some(fault) => self.response = Some(Response::Fault(fault)),
                    None => {
                        warn!("<fault> struct has no integer faultCode: {}", value);
                        self.response = Some(Response::Fault(Fault::new(
                            -1339,
                            format!("parse error, fault value {}", value),
                        )));
                    }
                }
            }

            Tag::String => {
                let s = self.take_cdata().unwrap_or_default();
                self.set_current(Value::String(s))?;
            }
            Tag::Int => {
                let s = self.take_cdata().unwrap_or_default();
                self.set_current(Value::Int(s.parse().unwrap_or(0)))?;
            }
            Tag::Double => {
                let s = self.take_cdata().unwrap_or_default();
                self.set_current(Value::Double(s.parse().unwrap_or(0.0)))?;
            }
            Tag::Boolean => {
                // True unless the body is absent, empty, or exactly "0".
                let truthy = match self.take_cdata() {
                    Some(s) => !s.is_empty() && s != "0",
                    None => false,
                };
                self.set_current(Value::Bool(truthy))?;
            }
            Tag::Base64 => {
                let s = self.take_cdata().unwrap_or_default();
                self.set_current(Value::Base64(base64::decode(&s).unwrap_or_default()))?;
            }
            Tag::DateTime => {
                // Stored verbatim; the wire format's timezone is
                // unspecified, so no date parsing happens here.
                let s = self.take_cdata().unwrap_or_default();
                self.set_current(Value::DateTime(s))?;
            }
            Tag::Null => self.set_current(Value::Nil)?,

            Tag::Array | Tag::Struct => {}
        }
        Ok(())
    }
}

/// Parses a `<methodCall>` document from an XML reader.
///
/// Malformed XML and structurally unexpected tag nesting yield an error,
/// never a panic and never partial output.
pub fn parse_call<R: Read>(reader: &mut R) -> ParseResult<Call> {
    Parser::new(reader).parse_call()
}

/// Parses a `<methodResponse>` document from an XML reader.
///
/// Malformed XML and structurally unexpected tag nesting yield an error,
/// with one exception: a malformed `<fault>` still produces a `Fault`
/// carrying a reserved negative code, so the response as a whole stays
/// usable.
pub fn parse_response<R: Read>(reader: &mut R) -> ParseResult<Response> {
    Parser::new(reader).parse_response()
}
