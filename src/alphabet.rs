use core::iter;

use crate::config::CodecConfig;
use crate::error::CodingError;
use crate::phased::PhasedCode;

/// The symbol space of a session: which characters exist, how they are grouped into coding
/// symbols, and how a symbol's rank maps to a phased code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    start: u32,
    chars: u32,
    group_size: usize,
    pad: char,
    size: u64,
    code: PhasedCode,
}

impl Alphabet {
    pub fn new(config: &CodecConfig) -> Result<Self, CodingError> {
        let size = config.alphabet_size()?;
        Ok(Self {
            start: config.alphabet_start as u32,
            chars: config.alphabet_chars,
            group_size: config.group_size,
            pad: config.pad,
            size,
            code: PhasedCode::new(size),
        })
    }

    /// Number of distinct coding symbols, `alphabet_chars ^ group_size`.
    pub const fn size(&self) -> u64 {
        self.size
    }

    pub const fn group_size(&self) -> usize {
        self.group_size
    }

    pub const fn pad(&self) -> char {
        self.pad
    }

    pub const fn phased_code(&self) -> &PhasedCode {
        &self.code
    }

    pub fn contains(&self, c: char) -> bool {
        (c as u32).checked_sub(self.start).is_some_and(|digit| digit < self.chars)
    }

    /// Position of `group` among all symbols: its characters read as a base-`alphabet_chars`
    /// number, first character most significant.
    pub fn rank(&self, group: &str) -> Result<u64, CodingError> {
        let found = group.chars().count();
        if found != self.group_size {
            return Err(CodingError::GroupLength { expected: self.group_size, found });
        }

        group.chars().try_fold(0u64, |rank, symbol| {
            if !self.contains(symbol) {
                return Err(CodingError::SymbolOutOfAlphabet { symbol });
            }
            Ok(rank * u64::from(self.chars) + u64::from(symbol as u32 - self.start))
        })
    }

    /// Inverse of [`rank`](Self::rank). `None` when `rank` is not below [`size`](Self::size).
    pub fn unrank(&self, mut rank: u64) -> Option<String> {
        if rank >= self.size {
            return None;
        }

        let base = u64::from(self.chars);
        let mut place = self.size / base;
        let mut group = String::with_capacity(self.group_size);
        for _ in 0..self.group_size {
            let digit = u32::try_from(rank / place).ok()?;
            rank %= place;
            group.push(char::from_u32(self.start + digit)?);
            place /= base;
        }
        Some(group)
    }

    /// Cuts `text` into coding symbols, padding the last one with the pad character.
    pub fn split_groups(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.group_size)
            .map(|chunk| {
                let mut group: String = chunk.iter().collect();
                group.extend(iter::repeat_n(self.pad(), self.group_size - chunk.len()));
                group
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let config = CodecConfig::default();
        let size = u64::from(config.alphabet_chars);
        Self {
            start: config.alphabet_start as u32,
            chars: config.alphabet_chars,
            group_size: config.group_size,
            pad: config.pad,
            size,
            code: PhasedCode::new(size),
        }
    }
}
