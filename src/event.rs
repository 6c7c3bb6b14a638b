
//! Markup events and their attributes.
//!
//! Everything this crate emits is assembled from these events, so every opening tag it
//! writes has a matching closing tag that can be checked with `validate`.

use std::rc;
use std::fmt;

use crate::text;

/// A single piece of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Encoded text content.
    Data {
        /// The encoded content.
        content: text::EncodedText,
    },
    /// Trusted markup produced by a host renderer, emitted as-is.
    RawData {
        /// The markup, taken verbatim.
        content: text::EncodedText,
    },
    /// An element start.
    OpeningTag {
        /// The element name.
        tag: text::Identifier,
        /// The element attributes.
        attributes: Attributes,
    },
    /// An element end.
    ClosingTag {
        /// The element name.
        tag: text::Identifier,
    },
    /// An element without content or end tag, like `input`.
    VoidTag {
        /// The element name.
        tag: text::Identifier,
        /// The element attributes.
        attributes: Attributes,
    },
}

impl Event {

    pub(crate) fn opening_tag_name(&self) -> Option<&text::Identifier> {
        match *self {
            Event::OpeningTag { ref tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub(crate) fn closing_tag_name(&self) -> Option<&text::Identifier> {
        match *self {
            Event::ClosingTag { ref tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Attributes of opening and void tags.
    pub fn attributes(&self) -> Option<&Attributes> {
        match *self {
            Event::OpeningTag { ref attributes, .. }
            | Event::VoidTag { ref attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}

pub(crate) fn void(tag: text::Identifier, attributes: Attributes) -> Event {
    Event::VoidTag { tag, attributes }
}

pub(crate) fn open(tag: text::Identifier, attributes: Attributes) -> Event {
    Event::OpeningTag { tag, attributes }
}

pub(crate) fn close(tag: text::Identifier) -> Event {
    Event::ClosingTag { tag }
}

pub(crate) fn data(content: text::EncodedText) -> Event {
    Event::Data { content }
}

pub(crate) fn raw_data(content: text::EncodedText) -> Event {
    Event::RawData { content }
}

impl fmt::Display for Event {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::Data { ref content, .. } =>
                fmt::Display::fmt(content, fmt),
            Event::RawData { ref content, .. } =>
                fmt::Display::fmt(content, fmt),
            Event::OpeningTag { ref tag, ref attributes, .. }
            | Event::VoidTag { ref tag, ref attributes, .. } =>
                write!(fmt, "<{}>", TagDisplay { tag, attributes }),
            Event::ClosingTag { ref tag, ..} =>
                write!(fmt, "</{}>", tag),
        }
    }
}

struct TagDisplay<'t, 'a> {
    tag: &'t text::Identifier,
    attributes: &'a Attributes,
}

impl<'t, 'a> fmt::Display for TagDisplay<'t, 'a> {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.tag, fmt)?;
        if !self.attributes.items.is_empty() {
            write!(fmt, " ")?;
            fmt::Display::fmt(self.attributes, fmt)?;
        }
        Ok(())
    }
}

/// A sequence of attributes, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    items: rc::Rc<Vec<Attribute>>,
}

impl Attributes {

    /// An empty attribute list.
    pub fn new() -> Attributes {
        Attributes::default()
    }

    /// Append a value to an existing attribute, using the separator between the old and
    /// the new value. The attribute is added at the end when it isn't present yet.
    pub fn add_to_attribute(
        self,
        name: text::Identifier,
        new_value: text::Value,
        separator: text::Value,
    ) -> Attributes {
        let mut attributes = Vec::with_capacity(self.items.len() + 1);
        let mut found = false;
        for attribute in self.items.iter() {
            if !found && attribute.name == name {
                found = true;
                attributes.push(Attribute::new(
                    attribute.name.clone(),
                    Some(match attribute.value.clone() {
                        Some(ref value) if value.is_empty() => new_value.clone(),
                        Some(value) => value.join(separator.clone()).join(new_value.clone()),
                        None => new_value.clone(),
                    }),
                ));
            } else {
                attributes.push(attribute.clone());
            }
        }
        if !found {
            attributes.push(Attribute::new(name, Some(new_value)));
        }
        Attributes::from_vec(attributes)
    }

    /// Set an attribute, replacing an existing one in place or appending a new one.
    pub fn set_attribute(self, name: text::Identifier, value: Option<text::Value>)
    -> Attributes {
        let mut attributes = Vec::with_capacity(self.items.len() + 1);
        let mut value = Some(value);
        for attribute in self.items.iter() {
            if attribute.name == name {
                if let Some(value) = value.take() {
                    attributes.push(Attribute::new(name.clone(), value));
                }
            } else {
                attributes.push(attribute.clone());
            }
        }
        if let Some(value) = value {
            attributes.push(Attribute::new(name, value));
        }
        Attributes::from_vec(attributes)
    }

    /// Append an attribute without looking for an existing one.
    pub fn add_attribute(self, name: text::Identifier, value: Option<text::Value>)
    -> Attributes {
        let mut attributes = (*self.items).clone();
        attributes.push(Attribute::new(name, value));
        Attributes::from_vec(attributes)
    }

    /// The encoded value of the first attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.iter()
            .find(|attribute| attribute.name.is_eq(name))
            .and_then(|attribute| attribute.value.as_ref())
            .map(text::Value::as_encoded_str)
    }

    /// Whether a `class` attribute lists the class.
    pub fn has_class(&self, name: &str) -> bool {
        self.items.iter().any(|attribute| attribute.has_class(name))
    }

    fn from_vec(attributes: Vec<Attribute>) -> Attributes {
        Attributes {
            items: rc::Rc::new(attributes),
        }
    }
}

impl fmt::Display for Attributes {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for attribute in self.items.iter() {
            if first {
                first = false;
            } else {
                write!(fmt, " ")?;
            }
            fmt::Display::fmt(attribute, fmt)?;
        }
        Ok(())
    }
}

/// A single attribute with an optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: text::Identifier,
    value: Option<text::Value>,
}

impl Attribute {

    pub(crate) fn new(name: text::Identifier, value: Option<text::Value>) -> Attribute {
        Attribute { name, value }
    }

    pub(crate) fn has_class(&self, name: &str) -> bool {
        if !self.name.is_eq("class") {
            return false;
        }
        match self.value {
            Some(ref value) => value.as_encoded_str()
                .split_whitespace()
                .any(|class| text::identifier_eq(name, class)),
            None => false,
        }
    }
}

impl fmt::Display for Attribute {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.name, fmt)?;
        if let Some(ref value) = self.value {
            write!(fmt, "=\"")?;
            fmt::Display::fmt(value, fmt)?;
            write!(fmt, "\"")?;
        }
        Ok(())
    }
}

/// Why a sequence of events doesn't form well-nested markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// A closing tag didn't match the innermost open element.
    #[error("Unexpected closing tag for '{tag_name}'")]
    UnexpectedClosingTag {
        /// The name of the unexpected closing tag.
        tag_name: String,
    },
    /// An element was still open at the end of the events.
    #[error("Missing closing tag for '{tag_name}'")]
    MissingClosingTag {
        /// The name of the element left open.
        tag_name: String,
    },
}

/// Checks that all opening and closing tags are properly nested.
///
/// Raw and text content is opaque to this check.
pub(crate) fn validate<'e, I>(events: I) -> Result<(), MalformedReason>
where I: IntoIterator<Item=&'e Event> {
    let mut stack: Vec<&text::Identifier> = Vec::new();
    for event in events {
        if let Some(tag) = event.opening_tag_name() {
            stack.push(tag);
        } else if let Some(tag) = event.closing_tag_name() {
            match stack.pop() {
                Some(open) if open == tag => (),
                _ => return Err(MalformedReason::UnexpectedClosingTag {
                    tag_name: tag.to_string(),
                }),
            }
        }
    }
    match stack.pop() {
        Some(open) => Err(MalformedReason::MissingClosingTag {
            tag_name: open.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::text::{ IntoIdentifier, IntoValue };

    use super::*;

    fn ident(name: &'static str) -> text::Identifier {
        name.into_identifier().unwrap()
    }

    #[test]
    fn add_to_attribute_merges_with_separator() {
        let attributes = Attributes::new()
            .add_attribute(ident("href"), Some("#".into_value()))
            .add_attribute(ident("class"), Some("add_task".into_value()))
            .add_to_attribute(ident("class"), "add_nested_fields".into_value(), " ".into_value());
        assert_eq!(attributes.to_string(), r##"href="#" class="add_task add_nested_fields""##);
        assert!(attributes.has_class("add_nested_fields"));
        assert!(attributes.has_class("ADD_TASK"));
    }

    #[test]
    fn add_to_attribute_appends_when_absent() {
        let attributes = Attributes::new()
            .add_to_attribute(ident("class"), "fields".into_value(), " ".into_value());
        assert_eq!(attributes.to_string(), r#"class="fields""#);
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let attributes = Attributes::new()
            .add_attribute(ident("href"), Some("#".into_value()))
            .add_attribute(ident("title"), Some("old".into_value()))
            .set_attribute(ident("href"), Some("/tasks/new".into_value()));
        assert_eq!(attributes.to_string(), r#"href="/tasks/new" title="old""#);
        assert_eq!(attributes.get("HREF"), Some("/tasks/new"));
    }

    #[test]
    fn attribute_values_are_encoded() {
        let attributes = Attributes::new()
            .add_attribute(ident("title"), Some("\"quoted\" & more".into_value()));
        assert_eq!(attributes.to_string(), r#"title="&quot;quoted&quot; &amp; more""#);
    }

    #[test]
    fn display_tags() {
        let attributes = Attributes::new()
            .add_attribute(ident("style"), Some("display: none".into_value()));
        assert_eq!(open(ident("div"), attributes).to_string(), r#"<div style="display: none">"#);
        assert_eq!(open(ident("div"), Attributes::new()).to_string(), "<div>");
        assert_eq!(close(ident("div")).to_string(), "</div>");
        assert_eq!(void(ident("input"), Attributes::new()).to_string(), "<input>");
    }

    #[test]
    fn validate_nesting() {
        let balanced = vec![
            open(ident("table"), Attributes::new()),
            open(ident("tbody"), Attributes::new()),
            raw_data(text::EncodedText::from_raw("<td>")),
            close(ident("tbody")),
            close(ident("TABLE")),
        ];
        assert_eq!(validate(&balanced), Ok(()));

        let crossed = vec![
            open(ident("table"), Attributes::new()),
            open(ident("tbody"), Attributes::new()),
            close(ident("table")),
        ];
        assert_eq!(
            validate(&crossed),
            Err(MalformedReason::UnexpectedClosingTag { tag_name: "table".into() }),
        );

        let unclosed = vec![open(ident("ul"), Attributes::new())];
        assert_eq!(
            validate(&unclosed),
            Err(MalformedReason::MissingClosingTag { tag_name: "ul".into() }),
        );
    }
}
