
//! Errors raised while assembling nested form markup.

use std::error;

use crate::event;
use crate::text;

/// Boxed error produced by a host collaborator.
pub type HostError = Box<dyn error::Error + Send + Sync>;

/// Everything that can go wrong while rendering nested fields.
///
/// Unknown enclosing tags are not an error, they fall back to `div`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An add link was requested for an association whose fields were never rendered.
    ///
    /// The blueprint is rendered with the same callback as the live rows, so the fields
    /// for the association have to be rendered before its add link.
    #[error("No fields were rendered for association '{association}' before its add link")]
    MissingRenderCallback {
        /// The association the add link was requested for.
        association: String,
    },
    /// The reflection collaborator doesn't know the association.
    #[error("Unknown association '{association}'")]
    UnknownAssociation {
        /// The requested association.
        association: String,
    },
    /// An extra link attribute would replace one client-side script relies on.
    #[error("Link attribute '{name}' is set by the link itself")]
    ReservedAttribute {
        /// The rejected attribute name.
        name: String,
    },
    /// A tag, attribute or association name was invalid.
    #[error("Invalid identifier")]
    Identifier(#[from] text::IdentifierError),
    /// Assembled markup was not properly nested.
    #[error("Malformed markup")]
    Malformed(#[from] event::MalformedReason),
    /// A host renderer or reflection failed.
    #[error("Host renderer failed for association '{association}'")]
    Host {
        /// The association being rendered.
        association: String,
        /// The host error.
        #[source]
        source: HostError,
    },
}

impl Error {

    /// Wrap an error raised by host code while rendering an association.
    pub fn host<E>(association: &str, error: E) -> Error
    where E: Into<HostError> {
        Error::Host {
            association: association.into(),
            source: error.into(),
        }
    }

    /// The reflection collaborator doesn't know the association.
    pub fn unknown_association(association: &text::Identifier) -> Error {
        Error::UnknownAssociation {
            association: association.to_string(),
        }
    }

    pub(crate) fn missing_render_callback(association: &text::Identifier) -> Error {
        Error::MissingRenderCallback {
            association: association.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::Error;

    #[test]
    fn host_errors_keep_their_source() {
        let error = Error::host("tasks", "database went away");
        assert_eq!(error.to_string(), "Host renderer failed for association 'tasks'");
        assert_eq!(error.source().map(|source| source.to_string()),
            Some("database went away".to_string()));
    }

    #[test]
    fn identifier_errors_convert() {
        let error: Error = "".parse::<crate::text::Identifier>().unwrap_err().into();
        assert!(matches!(error, Error::Identifier(_)));
        assert_eq!(error.source().map(|source| source.to_string()),
            Some("Value is empty".to_string()));
    }
}
