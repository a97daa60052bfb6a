use std::borrow::Cow;

use xml::escape::escape_str_attribute;

/// Escape a string for use as XML character data.
///
/// XML-RPC escapes the full entity set (`&`, `<`, `>`, `'`, `"`) in string
/// content, member names, method names and fault reasons alike, so the
/// attribute-mode escaper is the right one even though the protocol never
/// uses attributes.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    escape_str_attribute(s)
}
