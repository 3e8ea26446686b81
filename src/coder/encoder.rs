//! The encoder-only specialization of the arithmetic coder core.

use super::Interval;
use crate::cdf::Cdf;

/// Appends `bit` as the next bit into `output`, MSB-first within each
/// byte. A new zero byte is pushed whenever the current one fills.
fn append_bit(output: &mut Vec<u8>, bit_index: &mut u8, bit: u64) {
    if *bit_index == 8 {
        output.push(0);
        *bit_index = 0;
    }
    *output.last_mut().unwrap() |= ((bit & 1) as u8) << (7 - *bit_index);
    *bit_index += 1;
}

/// Packs a sequence of (CDF, symbol) pairs into a byte-aligned,
/// MSB-first bitstream.
///
/// Holds only the small `Interval` state plus the output buffer; nothing
/// about this type is shared across calls or threads.
#[derive(Debug, Default)]
pub struct BitEncoder {
    interval: Interval,
    output: Vec<u8>,
    bit_index: u8,
    /// Number of pending complemented bits whose value is known only
    /// once the next E1/E2 shift emits a concrete bit.
    num_underflow: u32,
}

impl BitEncoder {
    pub fn new() -> Self {
        Self { interval: Interval::new(), output: Vec::new(), bit_index: 8, num_underflow: 0 }
    }

    /// Encodes one symbol under the given CDF.
    pub fn encode_symbol(&mut self, cdf: &Cdf, symbol: u32) {
        let interval = &mut self.interval;
        let output = &mut self.output;
        let bit_index = &mut self.bit_index;
        let num_underflow = &mut self.num_underflow;

        interval.advance(
            cdf,
            symbol,
            |bit| {
                append_bit(output, bit_index, bit);
                for _ in 0..*num_underflow {
                    append_bit(output, bit_index, bit ^ 1);
                }
                *num_underflow = 0;
            },
            || *num_underflow += 1,
        );
    }

    /// Finalizes the stream and returns the packed bytes.
    ///
    /// By the time the last symbol has been encoded, `low` lies in the
    /// lower half of the state space and `high` in the upper half, so
    /// any code point in `[low, high]` identifies the message. A single
    /// `1` bit resolves the ambiguity and, combined with the decoder's
    /// zero-padding-past-EOF behavior, guarantees the decoder's `code`
    /// register lands strictly inside the final interval.
    pub fn finish(mut self) -> Vec<u8> {
        let output = &mut self.output;
        let bit_index = &mut self.bit_index;
        append_bit(output, bit_index, 1);
        self.output
    }
}
