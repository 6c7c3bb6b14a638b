
use std::fmt;

use tendril::StrTendril;

use crate::text;

const ENCODE_CHARS: &[char] = &['&', '<', '>', '"'];

fn encode_char(chr: char) -> Option<&'static str> {
    match chr {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Encodes the input, giving `None` when nothing had to be replaced.
fn encode_str_optional(mut input: &str) -> Option<StrTendril> {
    input.find(ENCODE_CHARS)?;
    let mut tendril = StrTendril::new();
    'parts: while !input.is_empty() {
        let len = match input.find(ENCODE_CHARS) {
            Some(pos) => pos,
            None => input.len(),
        };
        tendril.push_slice(&input[..len]);
        input = &input[len..];
        let chr = match input.chars().next() {
            None => break 'parts,
            Some(chr) => chr,
        };
        match encode_char(chr) {
            Some(encoded) => tendril.push_slice(encoded),
            None => tendril.push_char(chr),
        }
        input = &input[chr.len_utf8()..];
    }
    Some(tendril)
}

/// Text that is safe to place into markup or a quoted attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    value: text::Deferred<StrTendril>,
}

impl EncodedText {

    pub(crate) fn from_unencoded_static_str(value: &'static str) -> EncodedText {
        EncodedText {
            value: encode_str_optional(value)
                .map(text::Deferred::Actual)
                .unwrap_or(text::Deferred::StaticStr(value)),
        }
    }

    pub(crate) fn from_unencoded_str(value: &str) -> EncodedText {
        EncodedText {
            value: text::Deferred::Actual(
                encode_str_optional(value).unwrap_or_else(|| value.into())
            ),
        }
    }

    /// Trusted content that is taken as-is.
    pub(crate) fn from_raw(value: &str) -> EncodedText {
        EncodedText {
            value: text::Deferred::Actual(value.into()),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn join(self, other: EncodedText) -> EncodedText {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut tendril = self.value.into_actual();
        tendril.push_slice(&other.value);
        EncodedText {
            value: text::Deferred::Actual(tendril),
        }
    }

    /// Gives an encoded string slice.
    pub fn as_encoded_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EncodedText {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, fmt)
    }
}
