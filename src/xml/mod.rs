//! Minimal XML element tree.
//!
//! Response bodies are parsed into an [`XmlElement`] tree that callers can
//! navigate and edit, then serialize back with [`XmlElement::to_xml_string`].
//! Comments, processing instructions and the DOCTYPE are not kept.

pub mod parser;

pub use parser::parse;

use std::fmt;

/// A node inside an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name, including any namespace prefix.
    pub name: String,

    /// Attributes in document order. Values are entity-decoded.
    pub attributes: Vec<(String, String)>,

    /// Child elements and text, in document order. Adjacent text is merged.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style text appender.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Iterates over direct child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// All direct child elements with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Serializes the element and its subtree without added whitespace.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_into(out),
                XmlNode::Text(text) => escape_into(text, false, out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

fn escape_into(raw: &str, attribute: bool, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            _ => out.push(ch),
        }
    }
}

/// Errors raised while reading an XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The document contains no element.
    Empty,

    /// Input ended inside a construct.
    UnexpectedEof(&'static str),

    /// An end tag does not close the innermost open element.
    MismatchedTag {
        offset: usize,
        expected: String,
        found: String,
    },

    /// Any other well-formedness violation.
    Syntax { offset: usize, message: String },
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Empty => write!(f, "document has no root element"),
            XmlError::UnexpectedEof(what) => write!(f, "unexpected end of input: {}", what),
            XmlError::MismatchedTag {
                offset,
                expected,
                found,
            } => write!(
                f,
                "mismatched end tag at byte {}: expected </{}>, found </{}>",
                offset, expected, found
            ),
            XmlError::Syntax { offset, message } => {
                write!(f, "syntax error at byte {}: {}", offset, message)
            }
        }
    }
}

impl std::error::Error for XmlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let element = XmlElement::new("a")
            .with_attribute("q", "say \"hi\" & <bye>")
            .with_text("1 < 2 & 3 > 2");

        assert_eq!(
            element.to_xml_string(),
            r#"<a q="say &quot;hi&quot; &amp; &lt;bye&gt;">1 &lt; 2 &amp; 3 &gt; 2</a>"#
        );
    }

    #[test]
    fn test_empty_element_is_self_closing() {
        let element = XmlElement::new("br").with_attribute("class", "x");
        assert_eq!(element.to_xml_string(), r#"<br class="x" />"#);
    }

    #[test]
    fn test_parse_then_serialize_preserves_structure() {
        let source = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title type="text">News &amp; notes</title><entry id="1"/><entry id="2">two</entry></feed>"#;
        let root = parse(source).unwrap();
        assert_eq!(
            root.to_xml_string(),
            r#"<feed xmlns="http://www.w3.org/2005/Atom"><title type="text">News &amp; notes</title><entry id="1" /><entry id="2">two</entry></feed>"#
        );
    }

    #[test]
    fn test_navigation_helpers() {
        let root = parse("<list><item>a</item><skip/><item>b</item>tail</list>").unwrap();

        let items: Vec<String> = root.find_all("item").map(|e| e.text()).collect();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(root.elements().count(), 3);
        assert_eq!(root.text(), "tail");
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_edit_in_place() {
        let mut root = parse(r#"<config><mode value="old"/></config>"#).unwrap();
        root.find_mut("mode").unwrap().set_attribute("value", "new");
        root.set_attribute("version", "2");

        assert_eq!(
            root.to_string(),
            r#"<config version="2"><mode value="new" /></config>"#
        );
    }

    #[test]
    fn test_error_display() {
        let err = XmlError::MismatchedTag {
            offset: 7,
            expected: "a".to_string(),
            found: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mismatched end tag at byte 7: expected </a>, found </b>"
        );
        assert_eq!(XmlError::Empty.to_string(), "document has no root element");
    }
}
