#![warn(missing_docs)]

//! Add and remove links plus hidden blueprints for nested child-record forms.
//!
//! A form for a parent record can render sub-forms for its children. This library wraps
//! each child row, generates the links client-side script uses to add and remove rows,
//! and emits a hidden blueprint row for every association an add link was requested for.
//!
//! Client-side script is expected to clone `#{association}_fields_blueprint` when an
//! `.add_nested_fields` link is clicked, replacing `new_{association}` with a unique
//! index, and to set the hidden destroy field and hide the row when a
//! `.remove_nested_fields` link is clicked.
//!
//! # Blueprints
//!
//! Blueprints are rendered with the same callback as the live rows of their association,
//! but only after the form body is complete, and they are appended after it. Rows placed
//! in table cells or list items get the wrapper elements that make them valid markup:
//!
//! | enclosing tag | blueprint wrapper        |
//! |---------------|--------------------------|
//! | `dd`, `dt`    | `dl`                     |
//! | `li`          | `ul`                     |
//! | `td`, `th`    | `table`, `tbody`, `tr`   |
//! | `tr`          | `table`, `tbody`         |
//! | anything else | `div`                    |
//!
//! # Example
//!
//! ```
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use nested_fields::{ nested_form, Reflection, Record, Error, LinkOptions, FieldsOptions };
//! use nested_fields::{ EnclosingTag, Markup };
//! use nested_fields::text::{ Identifier };
//!
//! struct Task;
//! impl Record for Task {}
//!
//! struct Project;
//! impl Reflection for Project {
//!     type Child = Task;
//!     fn build_child(&self, association: &Identifier) -> Result<Task, Error> {
//!         match &**association {
//!             "tasks" => Ok(Task),
//!             _ => Err(Error::unknown_association(association)),
//!         }
//!     }
//! }
//!
//! let td: EnclosingTag = "td".parse()?;
//! let output = nested_form("project", &Project, |form| {
//!     let mut body = form.fields_for(
//!         "tasks",
//!         &[],
//!         FieldsOptions::default().enclosing_tag(td.clone()),
//!         |fields| Ok(Markup::from_raw(format!(r#"<input name="{}">"#, fields.field_name("name")))),
//!     )?;
//!     body.append(form.link_to_add("Add Task", "tasks", LinkOptions::default().enclosing_tag(td.clone()))?);
//!     Ok(body)
//! })?;
//!
//! assert!(output.to_string().ends_with(concat!(
//!     r#"<table style="display: none"><tbody><tr id="tasks_fields_blueprint">"#,
//!     r#"<td class="fields"><input name="project[tasks_attributes][new_tasks][name]"></td>"#,
//!     r#"</tr></tbody></table>"#,
//! )));
//! # Ok(())
//! # }
//! # fn main() { example().unwrap() }
//! ```

#[cfg(test)]
macro_rules! assert_markup {
    ($markup:expr, $expected:expr $(,)*) => {{
        let markup = &$markup;
        assert_eq!(markup.to_string(), $expected);
        assert_eq!(markup.validate(), Ok(()));
    }}
}

mod child;
mod form;
mod options;
mod error;
pub mod blueprint;
pub mod deferred;
pub mod event;
pub mod link;
pub mod markup;
pub mod text;
pub mod wrapper;

pub use child::{
    ChildFields,
    ChildIndex,
    Record,
};

pub use deferred::{
    DeferredEmitter,
    DeferredTask,
};

pub use error::{
    Error,
    HostError,
};

pub use form::{
    nested_form,
    FieldsOptions,
    NestedForm,
    PartialRenderer,
    Reflection,
    RenderCallback,
};

pub use link::{
    LinkOptions,
};

pub use markup::{
    Markup,
};

pub use options::{
    Options,
};

pub use wrapper::{
    EnclosingTag,
    WrapperChain,
    WrapperElement,
    resolve_wrapper_chain,
};
