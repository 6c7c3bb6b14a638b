
use std::ops;
use std::str;
use std::fmt;

use tendril::StrTendril;

use crate::text;

pub(crate) fn identifier_eq(left: &str, right: &str) -> bool {
    left.is_ascii() && right.is_ascii() && left.eq_ignore_ascii_case(right)
}

/// An encapsulated, validated identifier.
///
/// Used for tag names, attribute names and association names. Two identifiers are equal
/// when they match ASCII case-insensitively, but an identifier always displays the way it
/// was spelled.
///
/// # Examples
///
/// ```
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use nested_fields::text::{ Identifier };
///
/// let identifier: Identifier = "tasks".parse()?;
/// assert_eq!(identifier, "TASKS".parse::<Identifier>()?);
///
/// // Allowing for static str optimization
/// let identifier = Identifier::from_static_str("tasks")?;
/// assert_eq!(identifier.to_string(), "tasks");
/// # Ok(()) }
/// # fn main() { run().unwrap() }
/// ```
#[derive(Debug, Clone, Eq)]
pub struct Identifier {
    value: text::Deferred<StrTendril>,
}

impl Identifier {

    /// Constructor allowing static str optimization.
    pub fn from_static_str(value: &'static str) -> Result<Identifier, IdentifierError> {
        Ok(Identifier {
            value: text::Deferred::StaticStr(validate(value)?),
        })
    }

    /// Exact, case-sensitive comparison.
    ///
    /// Association names are keys and DOM id fragments, so `Tasks` and `tasks` differ.
    pub fn is_exactly(&self, other: &Identifier) -> bool {
        *self.value == *other.value
    }

    pub(crate) fn is_eq(&self, value: &str) -> bool {
        identifier_eq(self, value)
    }
}

/// Details about identifier invalidity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// An identifier cannot be zero-length.
    #[error("Value is empty")]
    Empty,
    /// The value contained non-ASCII characters.
    #[error("Identifier '{identifier}' contains non-ASCII characters")]
    NotAscii {
        /// The rejected value.
        identifier: String,
    },
    /// The value contained whitespace.
    #[error("Identifier '{identifier}' contains whitespace character '{}'",
        .whitespace.escape_default())]
    Whitespace {
        /// The rejected value.
        identifier: String,
        /// The detected whitespace character.
        whitespace: char,
    },
    /// The value contained a prohibited ASCII character.
    #[error("Identifier '{identifier}' contains forbidden character '{}'",
        .forbidden.escape_default())]
    Forbidden {
        /// The rejected value.
        identifier: String,
        /// The detected forbidden character.
        forbidden: char,
    },
}

pub(crate) fn validate(value: &str) -> Result<&str, IdentifierError> {

    const FORBIDDEN: &[char] = &['=', '"', '/', '>', '<', '&', ',', ';', '\''];

    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !value.is_ascii() {
        return Err(IdentifierError::NotAscii {
            identifier: value.into(),
        });
    }
    if let Some(whitespace) = value.chars().find(|c| c.is_whitespace()) {
        return Err(IdentifierError::Whitespace {
            identifier: value.into(),
            whitespace,
        });
    }
    if let Some(forbidden) = value.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(IdentifierError::Forbidden {
            identifier: value.into(),
            forbidden,
        });
    }

    Ok(value)
}

impl str::FromStr for Identifier {

    type Err = IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate(value)
            .map(|value| Identifier { value: text::Deferred::Actual(value.into()) })
    }
}

impl ops::Deref for Identifier {

    type Target = str;

    fn deref(&self) -> &str { &self.value }
}

impl PartialEq for Identifier {

    fn eq(&self, other: &Identifier) -> bool {
        identifier_eq(&self.value, &other.value)
    }
}

impl fmt::Display for Identifier {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, fmt)
    }
}

/// Allow conversion into an identifier.
pub trait IntoIdentifier {

    /// Try to convert the value into an identifier.
    fn into_identifier(self) -> Result<Identifier, IdentifierError>;
}

impl<'a> IntoIdentifier for &'a str {

    fn into_identifier(self) -> Result<Identifier, IdentifierError> { self.parse() }
}

impl IntoIdentifier for String {

    fn into_identifier(self) -> Result<Identifier, IdentifierError> { self.parse() }
}

impl<'a> IntoIdentifier for &'a Identifier {

    fn into_identifier(self) -> Result<Identifier, IdentifierError> { Ok(self.clone()) }
}

impl IntoIdentifier for Identifier {

    fn into_identifier(self) -> Result<Identifier, IdentifierError> { Ok(self) }
}

#[cfg(test)]
mod tests {
    use super::{ Identifier, IdentifierError, IntoIdentifier };

    #[test]
    fn case_insensitive_equality() {
        let lower: Identifier = "td".parse().unwrap();
        let upper: Identifier = "TD".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_string(), "TD");
        assert!(lower.is_eq("Td"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!("".parse::<Identifier>(), Err(IdentifierError::Empty));
        assert_eq!(
            "my tasks".parse::<Identifier>(),
            Err(IdentifierError::Whitespace {
                identifier: "my tasks".into(),
                whitespace: ' ',
            }),
        );
        assert_eq!(
            "tasks\"".parse::<Identifier>(),
            Err(IdentifierError::Forbidden {
                identifier: "tasks\"".into(),
                forbidden: '"',
            }),
        );
        assert!(matches!(
            "täsks".parse::<Identifier>(),
            Err(IdentifierError::NotAscii { .. })
        ));
    }

    #[test]
    fn exact_comparison_keeps_case() {
        let lower: Identifier = "tasks".parse().unwrap();
        let upper: Identifier = "Tasks".parse().unwrap();
        assert!(!lower.is_exactly(&upper));
        assert!(lower.is_exactly(&Identifier::from_static_str("tasks").unwrap()));
    }

    #[test]
    fn runtime_str_converts() {
        let name = String::from("milestones");
        let borrowed: &str = &name;
        let identifier = borrowed.into_identifier().unwrap();
        assert_eq!(identifier.to_string(), "milestones");
        assert!(matches!(
            "two words".into_identifier(),
            Err(IdentifierError::Whitespace { .. })
        ));
    }

    #[test]
    fn accepts_attribute_style_names() {
        assert!("data-association".parse::<Identifier>().is_ok());
        assert!("new_tasks".parse::<Identifier>().is_ok());
    }
}
