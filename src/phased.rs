use crate::bits::{BitReader, push_bits};
use crate::error::CodingError;

/// Phased-in binary code for the ranks `0..size`.
///
/// With `size = 2^exponent + remainder`, the first `2 * remainder` ranks get `exponent + 1` bits and
/// the rest get `exponent` bits, so an alphabet whose size is not a power of two does not pay
/// `ceil(log2(size))` bits for every new symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasedCode {
    exponent: u32,
    remainder: u64,
}

impl PhasedCode {
    /// `size` must be at least 1.
    pub const fn new(size: u64) -> Self {
        let exponent = if size == 0 { 0 } else { size.ilog2() };
        let remainder = size.saturating_sub(1 << exponent);
        Self { exponent, remainder }
    }

    /// `floor(log2(size))`
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// `size - 2^exponent`
    pub const fn remainder(&self) -> u64 {
        self.remainder
    }

    /// Number of bits [`write`](Self::write) emits for `rank`.
    pub const fn code_len(&self, rank: u64) -> u32 {
        if rank >= 2 * self.remainder { self.exponent } else { self.exponent + 1 }
    }

    pub fn write(&self, rank: u64, out: &mut String) {
        let width = self.code_len(rank);
        let value = if width == self.exponent { rank - self.remainder } else { rank };
        push_bits(out, value, width);
    }

    /// Reads one code. A leading `exponent`-bit value below `remainder` is the prefix of a long
    /// code, in which case exactly one more bit is consumed.
    pub fn read(&self, reader: &mut BitReader<'_>) -> Result<u64, CodingError> {
        let value = reader.read_uint(self.exponent)?;
        if value < self.remainder {
            let low = u64::from(reader.next_bit()?);
            Ok((value << 1) | low)
        } else {
            Ok(value + self.remainder)
        }
    }
}
