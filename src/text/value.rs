
use std::fmt;

use crate::text;

/// An encoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    text: text::EncodedText,
}

impl fmt::Display for Value {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.text, fmt)
    }
}

impl Value {

    /// Construct by encoding the provided value.
    pub fn from_unencoded_str(value: &str) -> Value {
        Value {
            text: text::EncodedText::from_unencoded_str(value),
        }
    }

    /// Construct from a static value, only copying when encoding is necessary.
    pub fn from_unencoded_static_str(value: &'static str) -> Value {
        Value {
            text: text::EncodedText::from_unencoded_static_str(value),
        }
    }

    /// Gives the encoded value.
    pub fn as_encoded_str(&self) -> &str {
        self.text.as_encoded_str()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn join(self, other: Value) -> Value {
        Value {
            text: self.text.join(other.text),
        }
    }
}

/// Allow conversion into an attribute value.
pub trait IntoValue {

    /// Convert into an encoded value.
    fn into_value(self) -> Value;
}

impl IntoValue for Value {

    fn into_value(self) -> Value { self }
}

impl IntoValue for String {

    fn into_value(self) -> Value {
        Value::from_unencoded_str(&self)
    }
}

impl<'a> IntoValue for &'a String {

    fn into_value(self) -> Value {
        Value::from_unencoded_str(self)
    }
}

impl IntoValue for &'static str {

    fn into_value(self) -> Value {
        Value::from_unencoded_static_str(self)
    }
}

impl IntoValue for text::Identifier {

    fn into_value(self) -> Value {
        Value::from_unencoded_str(&self)
    }
}

macro_rules! impl_value_decimal {
    ($name:ty) => {
        impl IntoValue for $name {
            fn into_value(self) -> Value {
                Value::from_unencoded_str(&self.to_string())
            }
        }
    }
}

impl_value_decimal!(usize);
impl_value_decimal!(bool);
