
//! The clickable add and remove links.
//!
//! Client-side script finds these links by their class names, so the classes are always
//! present, no matter which classes the caller adds.

use crate::error::{ Error };
use crate::event;
use crate::markup::{ Markup };
use crate::options::{ Options };
use crate::text::{ self, IntoIdentifier, IntoValue };
use crate::wrapper;

/// Class marking links that insert a new child from its blueprint.
pub const ADD_CLASS: &str = "add_nested_fields";

/// Class marking links that remove a child row.
pub const REMOVE_CLASS: &str = "remove_nested_fields";

/// Per-link settings.
///
/// # Examples
///
/// ```
/// use nested_fields::{ LinkOptions, EnclosingTag };
///
/// let options = LinkOptions::default()
///     .class("add_task")
///     .href("/tasks/new")
///     .enclosing_tag("tr".parse::<EnclosingTag>().unwrap())
///     .attribute("title", "Add another task");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    class: Option<String>,
    href: Option<String>,
    enclosing_tag: Option<wrapper::EnclosingTag>,
    attributes: Vec<(String, String)>,
}

impl LinkOptions {

    /// Classes placed before the link's own class.
    pub fn class<T>(mut self, class: T) -> Self where T: Into<String> {
        self.class = Some(class.into());
        self
    }

    /// Link target, replacing the configured default.
    pub fn href<T>(mut self, href: T) -> Self where T: Into<String> {
        self.href = Some(href.into());
        self
    }

    /// Enclosing tag of the rows an add link inserts.
    pub fn enclosing_tag(mut self, tag: wrapper::EnclosingTag) -> Self {
        self.enclosing_tag = Some(tag);
        self
    }

    /// Any further attribute, emitted after the standard ones.
    pub fn attribute<N, V>(mut self, name: N, value: V) -> Self
    where N: Into<String>, V: Into<String> {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub(crate) fn enclosing_tag_or<'a>(&'a self, default: &'a wrapper::EnclosingTag)
    -> &'a wrapper::EnclosingTag {
        self.enclosing_tag.as_ref().unwrap_or(default)
    }
}

/// `<a href="…" data-association="{association}" class="… add_nested_fields">{label}</a>`
pub(crate) fn build_add_link(
    label: Markup,
    association: &text::Identifier,
    options: &LinkOptions,
    form_options: &Options,
) -> Result<Markup, Error> {
    let attributes = event::Attributes::new()
        .add_attribute("href".into_identifier()?, Some(href(options, form_options)))
        .add_attribute(
            "data-association".into_identifier()?,
            Some(association.to_string().into_value()),
        );
    build_link(label, attributes, ADD_CLASS, &["data-association"], options)
}

/// `<a href="…" class="… remove_nested_fields">{label}</a>`
pub(crate) fn build_remove_link(
    label: Markup,
    options: &LinkOptions,
    form_options: &Options,
) -> Result<Markup, Error> {
    let attributes = event::Attributes::new()
        .add_attribute("href".into_identifier()?, Some(href(options, form_options)));
    build_link(label, attributes, REMOVE_CLASS, &[], options)
}

fn href(options: &LinkOptions, form_options: &Options) -> text::Value {
    options.href
        .as_ref()
        .unwrap_or(&form_options.default_href)
        .into_value()
}

fn build_link(
    label: Markup,
    attributes: event::Attributes,
    forced_class: &'static str,
    reserved: &[&str],
    options: &LinkOptions,
) -> Result<Markup, Error> {
    let class = "class".into_identifier()?;
    let separator = " ".into_value();

    let mut attributes = match options.class {
        Some(ref caller) if !caller.trim().is_empty() => attributes
            .add_attribute(class.clone(), Some(caller.into_value()))
            .add_to_attribute(class.clone(), forced_class.into_value(), separator.clone()),
        _ => attributes.add_attribute(class.clone(), Some(forced_class.into_value())),
    };

    for &(ref name, ref value) in &options.attributes {
        let name: text::Identifier = name.parse()?;
        if reserved.iter().any(|reserved| name.is_eq(reserved)) {
            return Err(Error::ReservedAttribute { name: name.to_string() });
        }
        attributes = if name == class {
            attributes.add_to_attribute(name, value.into_value(), separator.clone())
        } else {
            attributes.set_attribute(name, Some(value.into_value()))
        };
    }

    let mut markup = Markup::new();
    markup.open("a", attributes)?;
    markup.append(label);
    markup.close("a")?;
    Ok(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> text::Identifier {
        "tasks".parse().unwrap()
    }

    #[test]
    fn add_link_defaults() {
        let link = build_add_link(
            "Add Task".into(),
            &tasks(),
            &LinkOptions::default(),
            &Options::default(),
        ).unwrap();
        assert_eq!(
            link.to_string(),
            r#"<a href="javascript:void(0)" data-association="tasks" class="add_nested_fields">Add Task</a>"#,
        );
        let attributes = link.events()[0].attributes().unwrap();
        assert!(attributes.has_class(ADD_CLASS));
        assert_eq!(attributes.get("data-association"), Some("tasks"));
        assert_eq!(attributes.get("href"), Some("javascript:void(0)"));
    }

    #[test]
    fn add_link_merges_caller_class_and_href() {
        let link = build_add_link(
            "Add Task".into(),
            &tasks(),
            &LinkOptions::default().class("add_task").href("/tasks/new"),
            &Options::default(),
        ).unwrap();
        assert_eq!(
            link.to_string(),
            concat!(
                r#"<a href="/tasks/new" data-association="tasks" "#,
                r#"class="add_task add_nested_fields">Add Task</a>"#,
            ),
        );
    }

    #[test]
    fn configured_default_href() {
        let link = build_remove_link(
            "Remove".into(),
            &LinkOptions::default(),
            &Options::default().default_href("#"),
        ).unwrap();
        assert_eq!(link.to_string(), r##"<a href="#" class="remove_nested_fields">Remove</a>"##);
    }

    #[test]
    fn extra_attributes_follow_and_cannot_drop_class() {
        let link = build_remove_link(
            "Remove".into(),
            &LinkOptions::default()
                .attribute("title", "Remove \"this\"")
                .attribute("class", "danger"),
            &Options::default(),
        ).unwrap();
        assert_eq!(
            link.to_string(),
            concat!(
                r#"<a href="javascript:void(0)" class="remove_nested_fields danger" "#,
                r#"title="Remove &quot;this&quot;">Remove</a>"#,
            ),
        );
    }

    #[test]
    fn add_link_keeps_its_association() {
        let result = build_add_link(
            "Add Task".into(),
            &tasks(),
            &LinkOptions::default().attribute("Data-Association", "people"),
            &Options::default(),
        );
        match result {
            Err(Error::ReservedAttribute { name }) => assert_eq!(name, "Data-Association"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn blank_caller_class_is_ignored() {
        let link = build_remove_link(
            "Remove".into(),
            &LinkOptions::default().class("  "),
            &Options::default(),
        ).unwrap();
        assert_eq!(
            link.to_string(),
            r#"<a href="javascript:void(0)" class="remove_nested_fields">Remove</a>"#,
        );
    }

    #[test]
    fn labels_can_be_markup() {
        let link = build_remove_link(
            Markup::from_raw("<i class=\"icon-trash\"></i>"),
            &LinkOptions::default(),
            &Options::default(),
        ).unwrap();
        assert_eq!(
            link.to_string(),
            r#"<a href="javascript:void(0)" class="remove_nested_fields"><i class="icon-trash"></i></a>"#,
        );
    }

    #[test]
    fn invalid_attribute_names_fail() {
        let result = build_remove_link(
            "Remove".into(),
            &LinkOptions::default().attribute("on click", "x"),
            &Options::default(),
        );
        assert!(matches!(result, Err(Error::Identifier(_))));
    }
}
