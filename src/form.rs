
//! The per-render form context.
//!
//! A `NestedForm` lives for a single rendering pass of one parent form. It owns the
//! render callback of every association and the queue of deferred blueprints, and it
//! reaches the host application only through the injected `Reflection` and
//! `PartialRenderer` collaborators.

use std::rc;

use tracing::{ debug };

use crate::blueprint::{ self, RenderFn };
use crate::child::{ ChildFields, ChildIndex, Record, Scope };
use crate::deferred::{ DeferredEmitter };
use crate::error::{ Error };
use crate::link::{ self, LinkOptions };
use crate::markup::{ Markup };
use crate::options::{ Options };
use crate::text::{ self, IntoIdentifier };
use crate::wrapper;

/// Access to the host's association metadata.
pub trait Reflection {

    /// The record type on the many side of the associations.
    type Child: Record;

    /// Build a new, never persisted child for the association.
    fn build_child(&self, association: &text::Identifier) -> Result<Self::Child, Error>;
}

/// The host's partial rendering facility.
pub trait PartialRenderer<C> {

    /// Render the named partial for a child.
    fn render_partial(&self, partial: &str, fields: &ChildFields<'_, C>) -> Result<Markup, Error>;
}

/// A shared render callback.
pub type RenderCallback<'f, C> = rc::Rc<RenderFn<'f, C>>;

/// Settings for rendering the live rows of an association.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsOptions {
    enclosing_tag: Option<wrapper::EnclosingTag>,
}

impl FieldsOptions {

    /// Element each row is wrapped in.
    pub fn enclosing_tag(mut self, tag: wrapper::EnclosingTag) -> Self {
        self.enclosing_tag = Some(tag);
        self
    }
}

/// Form context for one parent record.
///
/// # Examples
///
/// ```
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use nested_fields::{ NestedForm, Reflection, Record, Error, LinkOptions, Markup };
/// use nested_fields::text::{ Identifier };
///
/// struct Task { name: String }
/// impl Record for Task {}
///
/// struct Project;
/// impl Reflection for Project {
///     type Child = Task;
///     fn build_child(&self, _: &Identifier) -> Result<Task, Error> {
///         Ok(Task { name: String::new() })
///     }
/// }
///
/// let tasks = vec![Task { name: "Write docs".into() }];
/// let project = Project;
///
/// let page = NestedForm::new("project", &project).render(|form| {
///     let mut body = form.fields_for("tasks", &tasks, Default::default(), |fields| {
///         let mut row = Markup::new();
///         row.raw(format!(r#"<input name="{}">"#, fields.field_name("name")));
///         row.text(&fields.record().name);
///         Ok(row)
///     })?;
///     body.append(form.link_to_add("Add Task", "tasks", LinkOptions::default())?);
///     Ok(body)
/// })?;
///
/// assert_eq!(page.to_string(), concat!(
///     r#"<div class="fields"><input name="project[tasks_attributes][0][name]">Write docs</div>"#,
///     r#"<a href="javascript:void(0)" data-association="tasks" class="add_nested_fields">Add Task</a>"#,
///     r#"<div style="display: none" id="tasks_fields_blueprint">"#,
///     r#"<div class="fields"><input name="project[tasks_attributes][new_tasks][name]"></div>"#,
///     r#"</div>"#,
/// ));
/// # Ok(()) }
/// # fn main() { run().unwrap() }
/// ```
pub struct NestedForm<'f, R> where R: Reflection {
    object_name: String,
    reflection: &'f R,
    partials: Option<&'f dyn PartialRenderer<R::Child>>,
    options: rc::Rc<Options>,
    fields: Vec<(text::Identifier, RenderCallback<'f, R::Child>)>,
    emitter: DeferredEmitter<'f>,
}

impl<'f, R> NestedForm<'f, R>
where
    R: Reflection,
    R::Child: 'f,
{
    /// A fresh context for the parent form named `object_name`.
    pub fn new<N>(object_name: N, reflection: &'f R) -> NestedForm<'f, R>
    where N: Into<String> {
        NestedForm {
            object_name: object_name.into(),
            reflection,
            partials: None,
            options: rc::Rc::new(Options::default()),
            fields: Vec::new(),
            emitter: DeferredEmitter::new(),
        }
    }

    /// Use the host's partial renderer for associations without an explicit callback.
    pub fn with_partials(mut self, partials: &'f dyn PartialRenderer<R::Child>) -> Self {
        self.partials = Some(partials);
        self
    }

    /// Replace the default options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = rc::Rc::new(options);
        self
    }

    /// The parent form's object name.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// The options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Associations with a queued blueprint, in output order.
    pub fn pending_blueprints(&self) -> Vec<&text::Identifier> {
        self.emitter.pending()
    }

    /// Render the live rows of an association and remember the callback for its blueprint.
    ///
    /// Rendering fields for the same association again replaces the remembered callback.
    pub fn fields_for<A, F>(
        &mut self,
        association: A,
        children: &[R::Child],
        options: FieldsOptions,
        render: F,
    ) -> Result<Markup, Error>
    where
        A: IntoIdentifier,
        F: Fn(&ChildFields<'_, R::Child>) -> Result<Markup, Error> + 'f,
    {
        let association = association.into_identifier()?;
        let callback: RenderCallback<'f, R::Child> = rc::Rc::new(render);
        self.register_callback(association.clone(), callback.clone());

        let scope = self.scope(association, options.enclosing_tag);
        let mut output = Markup::new();
        for (position, child) in children.iter().enumerate() {
            output.append(blueprint::render_nested_model(
                &scope,
                ChildIndex::Position(position),
                child,
                &*callback,
            )?);
        }
        Ok(output)
    }

    /// Like `fields_for`, rendering each child with the `{singular}_fields` partial.
    pub fn fields_for_partial<A>(
        &mut self,
        association: A,
        children: &[R::Child],
        options: FieldsOptions,
    ) -> Result<Markup, Error>
    where A: IntoIdentifier {
        let association = association.into_identifier()?;
        let partials = match self.partials {
            Some(partials) => partials,
            None => return Err(Error::missing_render_callback(&association)),
        };
        let partial = partial_name(&association);
        self.fields_for(association, children, options, move |fields| {
            partials.render_partial(&partial, fields)
        })
    }

    /// A link inserting a new row for the association.
    ///
    /// The blueprint the link clones is queued and emitted when the form is finished.
    /// Requesting another add link for the same association replaces the queued
    /// blueprint. Fails when no fields were rendered for the association yet.
    pub fn link_to_add<L, A>(&mut self, label: L, association: A, options: LinkOptions)
    -> Result<Markup, Error>
    where
        L: Into<Markup>,
        A: IntoIdentifier,
    {
        let association = association.into_identifier()?;
        let callback = match self.callback(&association) {
            Some(callback) => callback,
            None => return Err(Error::missing_render_callback(&association)),
        };
        let tag = options.enclosing_tag_or(&self.options.default_enclosing_tag).clone();
        let chain = tag.wrapper_chain();
        let link = link::build_add_link(label.into(), &association, &options, &self.options)?;

        let scope = self.scope(association.clone(), Some(tag));
        let reflection = self.reflection;
        self.emitter.register(association, Box::new(move || {
            let record = reflection.build_child(&scope.association)?;
            blueprint::compose_blueprint(&scope, &chain, &record, &*callback)
        }));

        Ok(link)
    }

    /// Append the queued blueprints after the form body.
    pub fn finish(self, body: Markup) -> Result<Markup, Error> {
        let mut output = body;
        output.append(self.emitter.flush()?);
        Ok(output)
    }

    /// Render the form body and append the queued blueprints after it.
    pub fn render<F>(mut self, body: F) -> Result<Markup, Error>
    where F: FnOnce(&mut NestedForm<'f, R>) -> Result<Markup, Error> {
        let body = body(&mut self)?;
        self.finish(body)
    }

    fn scope(&self, association: text::Identifier, tag: Option<wrapper::EnclosingTag>) -> Scope {
        Scope {
            parent: self.object_name.clone(),
            association,
            enclosing_tag: tag.unwrap_or_else(|| self.options.default_enclosing_tag.clone()),
            options: self.options.clone(),
        }
    }

    fn callback(&self, association: &text::Identifier) -> Option<RenderCallback<'f, R::Child>> {
        self.fields.iter()
            .find(|(name, _)| name.is_exactly(association))
            .map(|(_, callback)| callback.clone())
    }

    fn register_callback(
        &mut self,
        association: text::Identifier,
        callback: RenderCallback<'f, R::Child>,
    ) {
        match self.fields.iter_mut().find(|(name, _)| name.is_exactly(&association)) {
            Some(entry) => {
                debug!(association = %association, "replacing render callback");
                entry.1 = callback;
            },
            None => {
                debug!(association = %association, "registering render callback");
                self.fields.push((association, callback));
            },
        }
    }
}

/// Render a complete nested form: the body first, then every queued blueprint.
pub fn nested_form<'f, R, N, F>(object_name: N, reflection: &'f R, body: F)
-> Result<Markup, Error>
where
    R: Reflection,
    R::Child: 'f,
    N: Into<String>,
    F: FnOnce(&mut NestedForm<'f, R>) -> Result<Markup, Error>,
{
    NestedForm::new(object_name, reflection).render(body)
}

/// `tasks` gives `task_fields`, `categories` gives `category_fields`.
fn partial_name(association: &text::Identifier) -> String {
    format!("{}_fields", singularize(association))
}

fn singularize(word: &str) -> String {
    const SIBILANT_PLURALS: &[&str] = &["sses", "shes", "ches", "xes", "zes"];

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in SIBILANT_PLURALS {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].into();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        return word[..word.len() - 1].into();
    }
    word.into()
}
