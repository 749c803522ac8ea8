//! Hand-rolled XML reader producing an [`XmlElement`] tree.
//!
//! The reader walks the input once, keeping a stack of open elements instead
//! of recursing. The returned tree is still dropped, compared and serialized
//! recursively, so nesting is capped at [`MAX_DEPTH`] elements and deeper
//! documents are rejected with a syntax error.
//! It checks well-formedness (single root, matching end tags, quoted
//! attributes, known entities) but does not validate against a DTD.

use super::{XmlElement, XmlError, XmlNode};

/// Maximum element nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 1024;

/// Parses a complete XML document and returns its root element.
pub fn parse(input: &str) -> Result<XmlElement, XmlError> {
    Reader::new(input).document()
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        let pos = if input.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Self { input, pos }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, len: usize) {
        self.pos += len;
    }

    fn syntax(&self, message: impl Into<String>) -> XmlError {
        XmlError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn expect(&mut self, token: &str) -> Result<(), XmlError> {
        if self.starts_with(token) {
            self.bump(token.len());
            Ok(())
        } else {
            Err(self.syntax(format!("expected '{}'", token)))
        }
    }

    /// Consumes everything up to and including `terminator`.
    fn skip_past(&mut self, terminator: &str, what: &'static str) -> Result<&'a str, XmlError> {
        match self.rest().find(terminator) {
            Some(idx) => {
                let skipped = &self.rest()[..idx];
                self.bump(idx + terminator.len());
                Ok(skipped)
            }
            None => Err(XmlError::UnexpectedEof(what)),
        }
    }

    fn document(mut self) -> Result<XmlElement, XmlError> {
        self.skip_misc()?;
        if self.at_end() {
            return Err(XmlError::Empty);
        }
        if !self.starts_with("<") {
            return Err(self.syntax("expected root element"));
        }

        let mut stack: Vec<XmlElement> = Vec::new();
        let root = loop {
            if stack.is_empty() {
                let (element, self_closing) = self.start_tag()?;
                if self_closing {
                    break element;
                }
                stack.push(element);
                continue;
            }

            if self.at_end() {
                return Err(XmlError::UnexpectedEof("unclosed element"));
            }

            if self.starts_with("</") {
                self.bump(2);
                let name = self.name()?;
                self.skip_whitespace();
                self.expect(">")?;

                // stack is non-empty here
                let Some(element) = stack.pop() else {
                    return Err(self.syntax("unexpected end tag"));
                };
                if element.name != name {
                    return Err(XmlError::MismatchedTag {
                        offset: self.pos,
                        expected: element.name,
                        found: name.to_string(),
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => break element,
                }
            } else if self.starts_with("<!--") {
                self.bump(4);
                self.skip_past("-->", "unterminated comment")?;
            } else if self.starts_with("<![CDATA[") {
                self.bump(9);
                let data = self.skip_past("]]>", "unterminated CDATA section")?;
                push_text(&mut stack, data.to_string());
            } else if self.starts_with("<?") {
                self.bump(2);
                self.skip_past("?>", "unterminated processing instruction")?;
            } else if self.starts_with("<!") {
                return Err(self.syntax("declaration inside element content"));
            } else if self.starts_with("<") {
                if stack.len() >= MAX_DEPTH {
                    return Err(self.syntax(format!("nesting deeper than {} elements", MAX_DEPTH)));
                }
                let (element, self_closing) = self.start_tag()?;
                if self_closing {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Element(element));
                    }
                } else {
                    stack.push(element);
                }
            } else {
                let end = self.rest().find('<').unwrap_or(self.rest().len());
                let raw = &self.rest()[..end];
                let text = decode_entities(raw, self.pos)?;
                self.bump(end);
                push_text(&mut stack, text);
            }
        };

        self.skip_misc()?;
        if !self.at_end() {
            return Err(self.syntax("unexpected content after root element"));
        }
        Ok(root)
    }

    /// Skips whitespace, the XML declaration, processing instructions,
    /// comments and DOCTYPE outside the root element.
    fn skip_misc(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.bump(2);
                self.skip_past("?>", "unterminated processing instruction")?;
            } else if self.starts_with("<!--") {
                self.bump(4);
                self.skip_past("-->", "unterminated comment")?;
            } else if self.starts_with("<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_doctype(&mut self) -> Result<(), XmlError> {
        let mut depth = 0usize;
        for (idx, ch) in self.rest().char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => {
                    self.bump(idx + 1);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(XmlError::UnexpectedEof("unterminated DOCTYPE"))
    }

    fn name(&mut self) -> Result<&'a str, XmlError> {
        let rest = self.rest();
        let mut end = 0;
        for (idx, ch) in rest.char_indices() {
            let valid = if idx == 0 {
                is_name_start(ch)
            } else {
                is_name_char(ch)
            };
            if !valid {
                break;
            }
            end = idx + ch.len_utf8();
        }
        if end == 0 {
            return Err(self.syntax("expected a name"));
        }
        self.bump(end);
        Ok(&rest[..end])
    }

    /// Parses `<name attr="v" ...>` or `<name .../>`.
    fn start_tag(&mut self) -> Result<(XmlElement, bool), XmlError> {
        self.expect("<")?;
        let mut element = XmlElement::new(self.name()?);

        loop {
            let had_space = self.peek().map_or(false, char::is_whitespace);
            self.skip_whitespace();

            if self.starts_with("/>") {
                self.bump(2);
                return Ok((element, true));
            }
            if self.starts_with(">") {
                self.bump(1);
                return Ok((element, false));
            }
            if self.at_end() {
                return Err(XmlError::UnexpectedEof("unterminated start tag"));
            }
            if !had_space {
                return Err(self.syntax("expected whitespace before attribute"));
            }

            let name = self.name()?;
            if element.attribute(name).is_some() {
                return Err(self.syntax(format!("duplicate attribute '{}'", name)));
            }
            self.skip_whitespace();
            self.expect("=")?;
            self.skip_whitespace();

            let quote = match self.peek() {
                Some(q @ ('"' | '\'')) => q,
                _ => return Err(self.syntax("attribute value must be quoted")),
            };
            self.bump(1);
            let value_start = self.pos;
            let Some(len) = self.rest().find(quote) else {
                return Err(XmlError::UnexpectedEof("unterminated attribute value"));
            };
            let raw = &self.rest()[..len];
            if raw.contains('<') {
                return Err(self.syntax("'<' in attribute value"));
            }
            let value = decode_entities(raw, value_start)?;
            self.bump(len + 1);

            element.attributes.push((name.to_string(), value));
        }
    }
}

fn push_text(stack: &mut [XmlElement], text: String) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if text.is_empty() {
        return;
    }
    match parent.children.last_mut() {
        Some(XmlNode::Text(existing)) => existing.push_str(&text),
        _ => parent.children.push(XmlNode::Text(text)),
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_numeric() || matches!(ch, '-' | '.' | '\u{b7}')
}

/// Replaces predefined and numeric character references.
fn decode_entities(raw: &str, offset: usize) -> Result<String, XmlError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let entity_offset = offset + (raw.len() - rest.len()) + amp;
        let Some(semi) = after.find(';') else {
            return Err(XmlError::Syntax {
                offset: entity_offset,
                message: "unterminated entity reference".to_string(),
            });
        };
        let entity = &after[..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        match decoded {
            Some(ch) => out.push(ch),
            None => {
                return Err(XmlError::Syntax {
                    offset: entity_offset,
                    message: format!("unknown entity '&{};'", entity),
                })
            }
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
