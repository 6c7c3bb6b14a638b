
//! Structural wrappers for nested rows.
//!
//! A row element like `tr` can't stand on its own in a document, so the hidden blueprint
//! for it has to be placed inside the ancestors that make it valid markup.

use std::fmt;
use std::str;

use serde::{ Deserialize, Deserializer };

use crate::text;

/// The element each nested child row is wrapped in.
///
/// Any valid tag name is accepted. Only `dd`, `dt`, `li`, `td`, `th` and `tr` receive
/// special wrapper chains, everything else is placed in a `div`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingTag {
    tag: text::Identifier,
}

impl EnclosingTag {

    /// The default enclosing tag, `div`.
    pub fn div() -> EnclosingTag {
        EnclosingTag {
            tag: text::Identifier::from_static_str("div").expect("valid static tag"),
        }
    }

    /// Construct from any valid tag name.
    pub fn new<T>(tag: T) -> Result<EnclosingTag, text::IdentifierError>
    where T: text::IntoIdentifier {
        Ok(EnclosingTag { tag: tag.into_identifier()? })
    }

    /// The tag name, as it was given.
    pub fn tag(&self) -> &text::Identifier {
        &self.tag
    }

    /// Resolve the chain of elements the blueprint for this tag is placed in.
    pub fn wrapper_chain(&self) -> WrapperChain {
        resolve_wrapper_chain(self)
    }
}

impl Default for EnclosingTag {

    fn default() -> EnclosingTag {
        EnclosingTag::div()
    }
}

impl fmt::Display for EnclosingTag {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.tag, fmt)
    }
}

impl str::FromStr for EnclosingTag {

    type Err = text::IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(EnclosingTag { tag: value.parse()? })
    }
}

impl<'de> Deserialize<'de> for EnclosingTag {

    fn deserialize<D>(deserializer: D) -> Result<EnclosingTag, D::Error>
    where D: Deserializer<'de> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// One element of a wrapper chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperElement {
    tag: &'static str,
    hide: bool,
    carries_id: bool,
}

impl WrapperElement {

    /// The element name.
    pub fn tag(&self) -> &'static str { self.tag }

    /// Whether this element hides the blueprint.
    pub fn hides(&self) -> bool { self.hide }

    /// Whether this element carries the blueprint id.
    pub fn carries_id(&self) -> bool { self.carries_id }
}

/// The elements surrounding a blueprint, outermost first.
///
/// Never empty. The first element hides the blueprint and the last element carries its
/// id, which is the same element for single element chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperChain {
    elements: Vec<WrapperElement>,
}

impl WrapperChain {

    fn from_tags(tags: &[&'static str]) -> WrapperChain {
        let last = tags.len().saturating_sub(1);
        let mut elements: Vec<WrapperElement> = tags.iter()
            .enumerate()
            .map(|(index, &tag)| WrapperElement {
                tag,
                hide: index == 0,
                carries_id: index == last,
            })
            .collect();
        if elements.is_empty() {
            elements.push(WrapperElement { tag: "div", hide: true, carries_id: true });
        }
        WrapperChain { elements }
    }

    /// Elements from the outermost to the innermost.
    pub fn elements(&self) -> &[WrapperElement] {
        &self.elements
    }

    /// Element names from the outermost to the innermost.
    pub fn tags(&self) -> Vec<&'static str> {
        self.elements.iter().map(WrapperElement::tag).collect()
    }

    /// Number of elements in the chain.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`, a chain holds at least one element.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Map an enclosing tag to the elements its blueprint has to be wrapped in.
///
/// Matching is exact and ASCII case-insensitive. Unknown tags never fail, they get the
/// default `div` chain.
pub fn resolve_wrapper_chain(tag: &EnclosingTag) -> WrapperChain {
    let name = tag.tag();
    let tags: &[&'static str] =
        if name.is_eq("dd") || name.is_eq("dt") {
            &["dl"]
        } else if name.is_eq("li") {
            &["ul"]
        } else if name.is_eq("td") || name.is_eq("th") {
            &["table", "tbody", "tr"]
        } else if name.is_eq("tr") {
            &["table", "tbody"]
        } else {
            &["div"]
        };
    WrapperChain::from_tags(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_for(tag: &str) -> Vec<&'static str> {
        tag.parse::<EnclosingTag>().unwrap().wrapper_chain().tags()
    }

    #[test]
    fn definition_list_tags() {
        assert_eq!(chain_for("dd"), vec!["dl"]);
        assert_eq!(chain_for("dt"), vec!["dl"]);
    }

    #[test]
    fn list_item() {
        assert_eq!(chain_for("li"), vec!["ul"]);
    }

    #[test]
    fn table_cells() {
        assert_eq!(chain_for("td"), vec!["table", "tbody", "tr"]);
        assert_eq!(chain_for("th"), vec!["table", "tbody", "tr"]);
    }

    #[test]
    fn table_row() {
        assert_eq!(chain_for("tr"), vec!["table", "tbody"]);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(chain_for("TR"), vec!["table", "tbody"]);
        assert_eq!(chain_for("Li"), vec!["ul"]);
    }

    #[test]
    fn unknown_and_default_tags() {
        assert_eq!(chain_for("span"), vec!["div"]);
        assert_eq!(chain_for("div"), vec!["div"]);
        assert_eq!(chain_for("tbody"), vec!["div"]);
        assert_eq!(EnclosingTag::default().wrapper_chain().tags(), vec!["div"]);
    }

    #[test]
    fn no_partial_matching() {
        assert_eq!(chain_for("tdx"), vec!["div"]);
        assert_eq!(chain_for("t"), vec!["div"]);
    }

    #[test]
    fn flags_on_first_and_last() {
        for tag in &["div", "dd", "li", "td", "tr"] {
            let chain = tag.parse::<EnclosingTag>().unwrap().wrapper_chain();
            let elements = chain.elements();
            assert!(!chain.is_empty());
            assert!(elements[0].hides());
            assert!(elements[elements.len() - 1].carries_id());
            for element in &elements[1..] {
                assert!(!element.hides());
            }
            for element in &elements[..elements.len() - 1] {
                assert!(!element.carries_id());
            }
        }
    }

    #[test]
    fn single_element_carries_both_flags() {
        let chain = EnclosingTag::div().wrapper_chain();
        assert_eq!(chain.len(), 1);
        assert!(chain.elements()[0].hides());
        assert!(chain.elements()[0].carries_id());
    }

    #[test]
    fn keeps_spelling() {
        let tag: EnclosingTag = "TR".parse().unwrap();
        assert_eq!(tag.to_string(), "TR");
    }
}
