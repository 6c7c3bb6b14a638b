
//! The per-child form object handed to render callbacks.

use std::fmt;
use std::rc;

use crate::error::{ Error };
use crate::event;
use crate::link;
use crate::markup::{ Markup };
use crate::options::{ Options };
use crate::text::{ self, IntoIdentifier, IntoValue };
use crate::wrapper;

/// A child record as far as nested fields are concerned.
pub trait Record {

    /// Whether the record is already flagged for deletion on the next submit.
    fn marked_for_destruction(&self) -> bool { false }
}

/// The index a child's fields are rendered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildIndex {
    /// Position of an existing child.
    Position(usize),
    /// Placeholder replaced by client-side script when a blueprint is cloned.
    Token(String),
}

impl ChildIndex {

    /// The blueprint placeholder, `new_{association}`.
    pub fn blueprint(association: &text::Identifier) -> ChildIndex {
        ChildIndex::Token(format!("new_{}", association))
    }
}

impl fmt::Display for ChildIndex {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ChildIndex::Position(position) => fmt::Display::fmt(&position, fmt),
            ChildIndex::Token(ref token) => fmt::Display::fmt(token, fmt),
        }
    }
}

/// Everything shared by the fields of one association.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) parent: String,
    pub(crate) association: text::Identifier,
    pub(crate) enclosing_tag: wrapper::EnclosingTag,
    pub(crate) options: rc::Rc<Options>,
}

/// Form object for a single child record.
///
/// Field names follow the nested attributes convention
/// `parent[association_attributes][index][field]`.
pub struct ChildFields<'c, C> {
    scope: &'c Scope,
    index: ChildIndex,
    record: &'c C,
    object_name: String,
}

impl<'c, C> ChildFields<'c, C> where C: Record {

    pub(crate) fn new(scope: &'c Scope, index: ChildIndex, record: &'c C) -> ChildFields<'c, C> {
        let object_name = format!("{}[{}_attributes][{}]",
            scope.parent,
            scope.association,
            index,
        );
        ChildFields { scope, index, record, object_name }
    }

    /// The child record.
    pub fn record(&self) -> &C { self.record }

    /// The index this child is rendered under.
    pub fn index(&self) -> &ChildIndex { &self.index }

    /// The association the child belongs to.
    pub fn association(&self) -> &text::Identifier { &self.scope.association }

    /// The enclosing tag the child's fields are wrapped in.
    pub fn enclosing_tag(&self) -> &wrapper::EnclosingTag { &self.scope.enclosing_tag }

    /// Prefix for all field names of this child.
    pub fn object_name(&self) -> &str { &self.object_name }

    /// Name attribute for one of the child's fields.
    pub fn field_name(&self, field: &str) -> String {
        format!("{}[{}]", self.object_name, field)
    }

    /// Id attribute for one of the child's fields.
    pub fn field_id(&self, field: &str) -> String {
        format!("{}_{}", sanitized_object_name(&self.object_name), field)
    }

    /// A hidden input for one of the child's fields.
    pub fn hidden_field<V>(&self, field: &str, value: V) -> Result<Markup, Error>
    where V: IntoValue {
        let attributes = event::Attributes::new()
            .add_attribute("id".into_identifier()?, Some(self.field_id(field).into_value()))
            .add_attribute("name".into_identifier()?, Some(self.field_name(field).into_value()))
            .add_attribute("type".into_identifier()?, Some("hidden".into_value()))
            .add_attribute("value".into_identifier()?, Some(value.into_value()));
        let mut markup = Markup::new();
        markup.void("input", attributes)?;
        Ok(markup)
    }

    /// A link removing this child on the client, preceded by its hidden destroy field.
    ///
    /// ```
    /// # fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// use nested_fields::{ NestedForm, Reflection, Record, Error, LinkOptions };
    /// use nested_fields::text::{ Identifier };
    ///
    /// struct Task;
    /// impl Record for Task {}
    ///
    /// struct Project;
    /// impl Reflection for Project {
    ///     type Child = Task;
    ///     fn build_child(&self, _: &Identifier) -> Result<Task, Error> { Ok(Task) }
    /// }
    ///
    /// let project = Project;
    /// let mut form = NestedForm::new("project", &project);
    /// let rows = form.fields_for("tasks", &[Task], Default::default(), |fields| {
    ///     fields.link_to_remove("Remove", LinkOptions::default())
    /// })?;
    ///
    /// assert_eq!(rows.to_string(), concat!(
    ///     r#"<div class="fields">"#,
    ///     r#"<input id="project_tasks_attributes_0__destroy" "#,
    ///     r#"name="project[tasks_attributes][0][_destroy]" type="hidden" value="false">"#,
    ///     r#"<a href="javascript:void(0)" class="remove_nested_fields">Remove</a>"#,
    ///     r#"</div>"#,
    /// ));
    /// # Ok(()) }
    /// # fn main() { run().unwrap() }
    /// ```
    pub fn link_to_remove<L>(&self, label: L, options: link::LinkOptions) -> Result<Markup, Error>
    where L: Into<Markup> {
        let mut markup = self.hidden_field(
            &self.scope.options.destroy_field,
            self.record.marked_for_destruction(),
        )?;
        markup.append(link::build_remove_link(label.into(), &options, &self.scope.options)?);
        Ok(markup)
    }
}

/// Turns `parent[children_attributes][0]` into `parent_children_attributes_0`.
fn sanitized_object_name(object_name: &str) -> String {
    let joined = object_name.replace("][", "_");
    let mut sanitized: String = joined.chars()
        .map(|chr| match chr {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | ':' | '.' => chr,
            _ => '_',
        })
        .collect();
    if sanitized.ends_with('_') {
        sanitized.pop();
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use std::rc;

    use crate::link::{ LinkOptions };
    use crate::options::{ Options };

    use super::*;

    struct Task {
        doomed: bool,
    }

    impl Record for Task {
        fn marked_for_destruction(&self) -> bool { self.doomed }
    }

    fn scope() -> Scope {
        Scope {
            parent: "project".into(),
            association: "tasks".parse().unwrap(),
            enclosing_tag: wrapper::EnclosingTag::div(),
            options: rc::Rc::new(Options::default()),
        }
    }

    #[test]
    fn names_for_existing_children() {
        let scope = scope();
        let task = Task { doomed: false };
        let fields = ChildFields::new(&scope, ChildIndex::Position(3), &task);
        assert_eq!(fields.object_name(), "project[tasks_attributes][3]");
        assert_eq!(fields.field_name("name"), "project[tasks_attributes][3][name]");
        assert_eq!(fields.field_id("name"), "project_tasks_attributes_3_name");
    }

    #[test]
    fn names_for_blueprint_children() {
        let scope = scope();
        let task = Task { doomed: false };
        let index = ChildIndex::blueprint(&scope.association);
        let fields = ChildFields::new(&scope, index, &task);
        assert_eq!(fields.index(), &ChildIndex::Token("new_tasks".into()));
        assert_eq!(fields.field_name("name"), "project[tasks_attributes][new_tasks][name]");
        assert_eq!(fields.field_id("name"), "project_tasks_attributes_new_tasks_name");
    }

    #[test]
    fn sanitizes_nested_parents() {
        assert_eq!(
            sanitized_object_name("company[projects_attributes][1][tasks_attributes][0]"),
            "company_projects_attributes_1_tasks_attributes_0",
        );
    }

    #[test]
    fn remove_link_follows_destroy_field() {
        let scope = scope();
        let task = Task { doomed: false };
        let fields = ChildFields::new(&scope, ChildIndex::Position(0), &task);
        let markup = fields.link_to_remove("Remove", LinkOptions::default()).unwrap();
        assert_eq!(markup.to_string(), concat!(
            r#"<input id="project_tasks_attributes_0__destroy" "#,
            r#"name="project[tasks_attributes][0][_destroy]" type="hidden" value="false">"#,
            r#"<a href="javascript:void(0)" class="remove_nested_fields">Remove</a>"#,
        ));
    }

    #[test]
    fn remove_link_for_doomed_record() {
        let scope = scope();
        let task = Task { doomed: true };
        let fields = ChildFields::new(&scope, ChildIndex::Position(0), &task);
        let markup = fields
            .link_to_remove("Remove", LinkOptions::default().class("remove_task").href("#"))
            .unwrap();
        assert_eq!(markup.to_string(), concat!(
            r#"<input id="project_tasks_attributes_0__destroy" "#,
            r#"name="project[tasks_attributes][0][_destroy]" type="hidden" value="true">"#,
            r##"<a href="#" class="remove_task remove_nested_fields">Remove</a>"##,
        ));
    }
}
