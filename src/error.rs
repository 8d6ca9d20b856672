use thiserror::Error;

/// Errors raised by the coding core.
///
/// Every operation is a deterministic function of the tree state and its input, so none of these
/// are worth retrying: the same call on the same state fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// A node weight was set below zero. Unreachable through encode/decode; seeing it means the
    /// adaptation logic is broken.
    #[error("invalid weight {weight}: node weights cannot be negative")]
    InvalidWeight { weight: i64 },

    /// The bit string handed to the decoder is malformed or cut short.
    #[error("invalid bit sequence at bit {position}: {fault}")]
    InvalidSequence { position: usize, fault: SequenceFault },

    /// The alphabet or grouping parameters cannot describe a usable symbol space.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A character of the input text lies outside the configured alphabet.
    #[error("character {symbol:?} is not part of the configured alphabet")]
    SymbolOutOfAlphabet { symbol: char },

    /// A symbol group does not hold exactly `group_size` characters.
    #[error("symbol group has {found} character(s), expected {expected}")]
    GroupLength { expected: usize, found: usize },
}

/// What exactly went wrong inside a bit sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceFault {
    #[error("expected '0' or '1', found {0:?}")]
    NotABit(char),

    #[error("needed {needed} more bit(s) but only {available} remain")]
    Truncated { needed: u32, available: usize },

    #[error("new-symbol code {rank} is outside the alphabet")]
    RankOutOfRange { rank: u64 },

    #[error("symbol {0:?} was introduced a second time")]
    AlreadyTransmitted(String),
}

impl CodingError {
    pub(crate) fn sequence(position: usize, fault: SequenceFault) -> Self {
        Self::InvalidSequence { position, fault }
    }
}
