
//! Form level configuration.

use serde::{ Deserialize };

use crate::wrapper;

/// Settings shared by every nested association of one form.
///
/// Hosts usually keep these in their configuration files, so the type can be
/// deserialized. Missing keys keep their defaults.
///
/// # Examples
///
/// ```
/// use nested_fields::{ Options };
///
/// let options = Options::default()
///     .default_href("#")
///     .destroy_field("_remove");
///
/// assert_eq!(options.default_href, "#");
/// assert_eq!(options.default_enclosing_tag.to_string(), "div");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Link target used when a link doesn't specify its own `href`.
    pub default_href: String,
    /// Name of the hidden field flagging a child record for deletion.
    pub destroy_field: String,
    /// Enclosing tag used when fields or links don't specify one.
    pub default_enclosing_tag: wrapper::EnclosingTag,
}

impl Options {

    /// Set the link target used when a link has none.
    pub fn default_href<T>(mut self, href: T) -> Self where T: Into<String> {
        self.default_href = href.into();
        self
    }

    /// Set the name of the hidden destroy field.
    pub fn destroy_field<T>(mut self, field: T) -> Self where T: Into<String> {
        self.destroy_field = field.into();
        self
    }

    /// Set the enclosing tag used when none is given.
    pub fn default_enclosing_tag(mut self, tag: wrapper::EnclosingTag) -> Self {
        self.default_enclosing_tag = tag;
        self
    }
}

impl Default for Options {

    fn default() -> Options {
        Options {
            default_href: "javascript:void(0)".into(),
            destroy_field: "_destroy".into(),
            default_enclosing_tag: wrapper::EnclosingTag::div(),
        }
    }
}
