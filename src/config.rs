use serde::{Deserialize, Serialize};

use crate::error::CodingError;

/// Construction parameters for a coding session.
///
/// The alphabet is the contiguous character range `alphabet_start .. alphabet_start + alphabet_chars`.
/// `group_size` characters are combined into one coding symbol, so the tree may eventually hold
/// `alphabet_chars ^ group_size` distinct symbols.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Number of raw characters combined into one coding symbol.
    pub group_size: usize,

    /// First character of the alphabet.
    pub alphabet_start: char,

    /// Number of contiguous characters in the alphabet.
    pub alphabet_chars: u32,

    /// Character used to fill the last group when the text length is not a multiple of `group_size`.
    pub pad: char,
}

impl Default for CodecConfig {
    /// Tab through `'}'`: every printable ASCII character plus tab, newline and carriage return.
    fn default() -> Self {
        Self {
            group_size: 1,
            alphabet_start: '\t',
            alphabet_chars: 117,
            pad: '\n',
        }
    }
}

impl CodecConfig {
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Checks the parameters and returns the number of distinct symbols they describe.
    pub fn alphabet_size(&self) -> Result<u64, CodingError> {
        if self.group_size == 0 {
            return Err(invalid("group size must be at least 1"));
        }
        if self.alphabet_chars == 0 {
            return Err(invalid("the alphabet must contain at least one character"));
        }

        let first = self.alphabet_start as u32;
        let last = first
            .checked_add(self.alphabet_chars - 1)
            .filter(|&last| last <= char::MAX as u32)
            .ok_or_else(|| invalid(format!("{} characters from {:?} run past the last code point", self.alphabet_chars, self.alphabet_start)))?;
        if first <= 0xDFFF && last >= 0xD800 {
            return Err(invalid(format!(
                "the range U+{first:04X}..=U+{last:04X} crosses the surrogate gap and cannot be represented as text"
            )));
        }

        let pad = self.pad as u32;
        if pad < first || pad > last {
            return Err(invalid(format!("pad character {:?} is not part of the alphabet", self.pad)));
        }

        let exponent = u32::try_from(self.group_size).map_err(|_| invalid("group size is too large"))?;
        u64::from(self.alphabet_chars)
            .checked_pow(exponent)
            .ok_or_else(|| invalid(format!("{}^{} symbols do not fit in 64 bits", self.alphabet_chars, self.group_size)))
    }

    pub fn validate(&self) -> Result<(), CodingError> {
        self.alphabet_size().map(|_| ())
    }
}

fn invalid(message: impl Into<String>) -> CodingError {
    CodingError::InvalidConfiguration(message.into())
}
