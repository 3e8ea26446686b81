//! The decoder-only specialization of the arithmetic coder core.

use super::Interval;
use crate::cdf::Cdf;
use crate::error::{CrateError, Result};

/// Reads the next bit from `input` at `(byte_index, bit_index)`,
/// MSB-first, advancing the cursor. Reads past end-of-stream yield zero
/// bits, which lets the decoder finish cleanly after the encoder's
/// single-bit terminator.
fn read_bit(input: &[u8], byte_index: &mut usize, bit_index: &mut u8) -> u64 {
    if *byte_index >= input.len() {
        return 0;
    }
    let bit = (input[*byte_index] >> (7 - *bit_index)) & 1;
    *bit_index = (*bit_index + 1) % 8;
    if *bit_index == 0 {
        *byte_index += 1;
    }
    bit as u64
}

/// Decodes a byte-aligned, MSB-first arithmetic-coded bitstream one
/// symbol at a time.
#[derive(Debug)]
pub struct BitDecoder<'a> {
    interval: Interval,
    input: &'a [u8],
    byte_index: usize,
    bit_index: u8,
    /// The 64-bit window into the bitstream.
    code: u64,
}

impl<'a> BitDecoder<'a> {
    /// Constructs a decoder over `input`, priming `code` with the first
    /// 64 bits (zero-padded past end-of-stream).
    pub fn new(input: &'a [u8]) -> Self {
        let mut byte_index = 0;
        let mut bit_index = 0;
        let mut code = 0u64;
        for _ in 0..64 {
            code = (code << 1) | read_bit(input, &mut byte_index, &mut bit_index);
        }
        Self { interval: Interval::new(), input, byte_index, bit_index, code }
    }

    /// Decodes the next symbol under the given CDF.
    ///
    /// Returns [`CrateError::CorruptedBitstream`] if the search does not
    /// land on a valid symbol, which cannot happen against a well-formed
    /// bitstream and a CDF with the `max(1, ...)` floor.
    pub fn decode_symbol(&mut self, cdf: &Cdf) -> Result<u32> {
        let total = cdf.total() as u128;
        let range = (self.interval.high - self.interval.low) as u128 + 1;
        let offset = (self.code - self.interval.low) as u128;
        let value = (((offset + 1) * total - 1) / range) as u64;

        let symbol = cdf.upper_bound(value).ok_or(CrateError::CorruptedBitstream)?;

        let interval = &mut self.interval;
        let input = self.input;
        let byte_index = &mut self.byte_index;
        let bit_index = &mut self.bit_index;
        let code = &mut self.code;

        interval.advance(
            cdf,
            symbol,
            |_bit| {
                *code = ((*code << 1) & Interval::MASK) | read_bit(input, byte_index, bit_index);
            },
            || {
                *code = (*code & Interval::HALF)
                    | ((*code << 1) & (Interval::MASK >> 1))
                    | read_bit(input, byte_index, bit_index);
            },
        );

        Ok(symbol)
    }
}
