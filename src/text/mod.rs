//! Bijective byte↔text mapping so arbitrary (possibly non-UTF-8) byte
//! sequences can be handed to a tokenizer that expects valid text.
//!
//! Raw bytes `0x00..0xFF` are aliased to the Private-Use-Area code points
//! `U+E000..U+E0FF`. A code point already in that range that shows up in
//! otherwise-valid UTF-8 input is *re-escaped* the same way, byte by
//! byte, so the two cases stay distinguishable on the way back.

mod chunks;

pub use chunks::{Utf8Chunk, Utf8Chunks};

const PUA_START: u32 = 0xE000;
const PUA_END: u32 = 0xE0FF;

/// Converts arbitrary bytes to valid UTF-8 text, escaping invalid byte
/// runs and re-escaping any code point that would otherwise collide with
/// the escape range.
pub fn bytes_to_utf8(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len());

    for chunk in Utf8Chunks::new(data) {
        // `chunk.valid` is guaranteed valid UTF-8 by construction.
        let valid = std::str::from_utf8(chunk.valid).expect("Utf8Chunks only yields valid UTF-8");
        for ch in valid.chars() {
            let cp = ch as u32;
            if (PUA_START..=PUA_END).contains(&cp) {
                let mut buf = [0u8; 4];
                for &byte in ch.encode_utf8(&mut buf).as_bytes() {
                    output.push(escape_byte(byte));
                }
            } else {
                output.push(ch);
            }
        }
        for &byte in chunk.invalid {
            output.push(escape_byte(byte));
        }
    }

    output
}

/// Recovers the original bytes from text produced by [`bytes_to_utf8`].
/// A round-trip through `bytes_to_utf8` then `utf8_to_bytes` is the
/// identity for every byte sequence.
pub fn utf8_to_bytes(text: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        let cp = ch as u32;
        if (PUA_START..=PUA_END).contains(&cp) {
            output.push((cp - PUA_START) as u8);
        } else {
            output.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
    }

    output
}

fn escape_byte(byte: u8) -> char {
    char::from_u32(PUA_START + byte as u32).expect("PUA_START + u8 is always a valid scalar value")
}
