
//! Hidden blueprints and live row wrappers.
//!
//! Every live child row is wrapped in `<{tag} class="fields">`. The blueprint is one
//! freshly built child rendered the same way under the `new_{association}` index, placed
//! inside the hidden wrapper chain for the tag so client-side script can clone it.

use crate::child::{ self, ChildFields, ChildIndex, Record };
use crate::error::{ Error };
use crate::event;
use crate::markup::{ Markup };
use crate::text::{ self, IntoIdentifier, IntoValue };
use crate::wrapper;

/// Renders the fields of one child.
pub type RenderFn<'f, C> =
    dyn for<'a, 'c> Fn(&'a ChildFields<'c, C>) -> Result<Markup, Error> + 'f;

/// Id of the element holding an association's blueprint.
pub fn blueprint_id(association: &text::Identifier) -> String {
    format!("{}_fields_blueprint", association)
}

/// Wrap one rendered child in `<{tag} class="fields">…</{tag}>`.
pub fn wrap_live_child(tag: &wrapper::EnclosingTag, child: Markup) -> Result<Markup, Error> {
    let attributes = event::Attributes::new()
        .add_attribute("class".into_identifier()?, Some("fields".into_value()));
    let mut markup = Markup::new();
    markup.open(tag.tag(), attributes)?;
    markup.append(child);
    markup.close(tag.tag())?;
    Ok(markup)
}

/// Render a child's fields and wrap them for the enclosing tag.
///
/// Fields that leave elements open or close foreign ones are rejected instead of being
/// wrapped into broken markup.
pub(crate) fn render_nested_model<C>(
    scope: &child::Scope,
    index: ChildIndex,
    record: &C,
    render: &RenderFn<C>,
) -> Result<Markup, Error>
where C: Record {
    let fields = ChildFields::new(scope, index, record);
    let rendered = render(&fields)?;
    rendered.validate()?;
    wrap_live_child(&scope.enclosing_tag, rendered)
}

/// Open the chain, render the blueprint child, close the chain in reverse.
///
/// The first element gets `style="display: none"`, the last one gets the blueprint id.
pub(crate) fn compose_blueprint<C>(
    scope: &child::Scope,
    chain: &wrapper::WrapperChain,
    record: &C,
    render: &RenderFn<C>,
) -> Result<Markup, Error>
where C: Record {
    let style = "style".into_identifier()?;
    let id = "id".into_identifier()?;

    let mut markup = Markup::new();
    for element in chain.elements() {
        let mut attributes = event::Attributes::new();
        if element.hides() {
            attributes = attributes.add_attribute(style.clone(), Some("display: none".into_value()));
        }
        if element.carries_id() {
            attributes = attributes.add_attribute(
                id.clone(),
                Some(blueprint_id(&scope.association).into_value()),
            );
        }
        markup.open(element.tag(), attributes)?;
    }

    markup.append(render_nested_model(
        scope,
        ChildIndex::blueprint(&scope.association),
        record,
        render,
    )?);

    for element in chain.elements().iter().rev() {
        markup.close(element.tag())?;
    }
    Ok(markup)
}
