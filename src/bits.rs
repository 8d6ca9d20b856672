//! The textual bit stream: one `'0'` or `'1'` character per bit, most significant bit first.

use crate::error::{CodingError, SequenceFault};

/// Appends the low `width` bits of `value` to `out`, most significant first.
pub fn push_bits(out: &mut String, value: u64, width: u32) {
    out.reserve(width as usize);
    for bit_pos in (0..width).rev() {
        let bit = (value >> bit_pos) & 1;
        out.push(if bit == 1 { '1' } else { '0' });
    }
}

/// Cursor over a bit string.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self { source, position: 0 }
    }

    /// Number of bits consumed so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    pub const fn is_exhausted(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Reads one bit: `true` for `'1'`, `false` for `'0'`.
    pub fn next_bit(&mut self) -> Result<bool, CodingError> {
        let bit = match self.source.as_bytes().get(self.position) {
            Some(b'0') => false,
            Some(b'1') => true,
            Some(_) => {
                // everything before `position` is ASCII, so this is a char boundary
                let found = self.source[self.position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(CodingError::sequence(self.position, SequenceFault::NotABit(found)));
            }
            None => {
                return Err(CodingError::sequence(self.position, SequenceFault::Truncated { needed: 1, available: 0 }));
            }
        };
        self.position += 1;
        Ok(bit)
    }

    /// Reads `width` bits as an unsigned integer, most significant bit first.
    ///
    /// Fails without consuming anything when fewer than `width` bits remain.
    pub fn read_uint(&mut self, width: u32) -> Result<u64, CodingError> {
        let available = self.remaining();
        if available < width as usize {
            return Err(CodingError::sequence(self.position, SequenceFault::Truncated { needed: width, available }));
        }

        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | u64::from(self.next_bit()?);
        }
        Ok(value)
    }
}
