
//! Assembled markup.

use std::fmt;

use crate::event;
use crate::text;

/// An ordered sequence of markup events.
///
/// Text added with `text` is encoded, markup added with `raw` is trusted and emitted
/// verbatim. Converting a `&str` or `String` into `Markup` gives encoded text, which is
/// how link labels are passed.
///
/// # Examples
///
/// ```
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use nested_fields::{ Markup };
/// use nested_fields::event::{ Attributes };
///
/// let mut markup = Markup::new();
/// markup.open("li", Attributes::new())?;
/// markup.text("Tom & Jerry");
/// markup.close("li")?;
///
/// assert_eq!(markup.to_string(), "<li>Tom &amp; Jerry</li>");
/// # Ok(()) }
/// # fn main() { run().unwrap() }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    events: Vec<event::Event>,
}

impl Markup {

    /// Empty markup.
    pub fn new() -> Markup {
        Markup::default()
    }

    /// Markup holding trusted, already rendered content.
    pub fn from_raw<T>(value: T) -> Markup where T: AsRef<str> {
        let mut markup = Markup::new();
        markup.raw(value);
        markup
    }

    /// Markup holding encoded text.
    pub fn from_text<T>(value: T) -> Markup where T: AsRef<str> {
        let mut markup = Markup::new();
        markup.text(value);
        markup
    }

    /// Start an element.
    pub fn open<T>(&mut self, tag: T, attributes: event::Attributes)
    -> Result<&mut Markup, text::IdentifierError>
    where T: text::IntoIdentifier {
        self.events.push(event::open(tag.into_identifier()?, attributes));
        Ok(self)
    }

    /// End an element.
    pub fn close<T>(&mut self, tag: T) -> Result<&mut Markup, text::IdentifierError>
    where T: text::IntoIdentifier {
        self.events.push(event::close(tag.into_identifier()?));
        Ok(self)
    }

    /// Add an element without content, like `input`.
    pub fn void<T>(&mut self, tag: T, attributes: event::Attributes)
    -> Result<&mut Markup, text::IdentifierError>
    where T: text::IntoIdentifier {
        self.events.push(event::void(tag.into_identifier()?, attributes));
        Ok(self)
    }

    /// Add text, encoding it.
    pub fn text<T>(&mut self, value: T) -> &mut Markup where T: AsRef<str> {
        let value = value.as_ref();
        if !value.is_empty() {
            self.events.push(event::data(text::EncodedText::from_unencoded_str(value)));
        }
        self
    }

    /// Add trusted markup without encoding it.
    pub fn raw<T>(&mut self, value: T) -> &mut Markup where T: AsRef<str> {
        let value = value.as_ref();
        if !value.is_empty() {
            self.events.push(event::raw_data(text::EncodedText::from_raw(value)));
        }
        self
    }

    /// Add all events of another markup sequence.
    pub fn append(&mut self, other: Markup) -> &mut Markup {
        self.events.extend(other.events);
        self
    }

    /// Whether any events were added.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The events in order.
    pub fn events(&self) -> &[event::Event] {
        &self.events
    }

    /// Check that every opened element is closed again in reverse order.
    pub fn validate(&self) -> Result<(), event::MalformedReason> {
        event::validate(&self.events)
    }
}

impl fmt::Display for Markup {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for event in self.events.iter() {
            fmt::Display::fmt(event, fmt)?;
        }
        Ok(())
    }
}

impl<'s> From<&'s str> for Markup {

    fn from(value: &'s str) -> Markup {
        Markup::from_text(value)
    }
}

impl From<String> for Markup {

    fn from(value: String) -> Markup {
        Markup::from_text(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::event::{ Attributes };
    use crate::text::{ IdentifierError };

    use super::Markup;

    #[test]
    fn text_is_encoded_and_raw_is_not() {
        let mut markup = Markup::new();
        markup.text("<b>").raw("<b>");
        assert_eq!(markup.to_string(), "&lt;b&gt;<b>");
    }

    #[test]
    fn labels_convert_as_text() {
        let label: Markup = "Add \"Task\"".into();
        assert_eq!(label.to_string(), "Add &quot;Task&quot;");
    }

    #[test]
    fn empty_content_adds_no_events() {
        let mut markup = Markup::new();
        markup.text("").raw("");
        assert!(markup.is_empty());
    }

    #[test]
    fn append_and_validate() {
        let mut inner = Markup::new();
        inner.open("li", Attributes::new()).unwrap();
        inner.raw("<input name=\"x\">");
        inner.close("li").unwrap();

        let mut outer = Markup::new();
        outer.open("ul", Attributes::new()).unwrap();
        outer.append(inner);
        outer.close("ul").unwrap();

        assert_eq!(outer.to_string(), "<ul><li><input name=\"x\"></li></ul>");
        assert_eq!(outer.events().len(), 5);
        assert_eq!(outer.validate(), Ok(()));
    }

    #[test]
    fn invalid_tag_names_are_rejected() {
        let mut markup = Markup::new();
        assert_eq!(
            markup.open("bad tag".to_string(), Attributes::new()).map(|_| ()),
            Err(IdentifierError::Whitespace {
                identifier: "bad tag".into(),
                whitespace: ' ',
            }),
        );
        assert!(markup.is_empty());
    }
}
