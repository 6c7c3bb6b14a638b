
//! Validated names and encoded text.

mod deferred;
mod identifier;
mod encoded;
mod value;

pub(crate) use self::deferred::{
    Deferred,
};

pub(crate) use self::identifier::{
    identifier_eq,
};

pub use self::identifier::{
    Identifier,
    IdentifierError,
    IntoIdentifier,
};

pub use self::encoded::{
    EncodedText,
};

pub use self::value::{
    Value,
    IntoValue,
};
