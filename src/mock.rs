//! A tiny, self-contained [`ModelOracle`]/[`Tokenizer`] pair used by the
//! CLI front-end and the integration tests to exercise the crate without
//! a real language-model runtime (spec §1: the concrete model runtime is
//! a peripheral concern).
//!
//! The tokenizer's vocabulary is exactly the set of characters
//! [`crate::text::bytes_to_utf8`] can ever produce for ASCII-or-invalid
//! byte input: the 128 ASCII code points plus the 256 Private-Use-Area
//! escape code points, plus reserved `BOS`/`EOS` ids. It does not attempt
//! to tokenize arbitrary valid multi-byte UTF-8 passthrough text (a real
//! subword tokenizer's vocabulary would); the byte↔text codec itself is
//! still exercised against the full byte range independently in
//! `tests/text_codec_tests.rs`.
//!
//! The oracle is a static unigram frequency table, not an autoregressive
//! model: it ignores the context it's given entirely. That is enough to
//! demonstrate a real compression ratio on ASCII text (skewed letter
//! frequencies compress below their raw size) while staying a pure,
//! deterministic function, which is all the symmetry invariant requires.

use crate::error::Result;
use crate::model::{ModelOracle, Tokenizer};

const ASCII_VOCAB: u32 = 128;
const PUA_VOCAB: u32 = 256;
/// Large but finite so `Cdf::from_logits`'s non-finite check (spec §7,
/// `ModelError`) never rejects a vector solely because of the BOS slot;
/// the softmax still drives its probability to the `max(1, ...)` floor.
const BOS_LOGIT: f32 = -1e30;
pub const VOCAB_SIZE: usize = (ASCII_VOCAB + PUA_VOCAB + 2) as usize;
pub const EOS_TOKEN_ID: u32 = ASCII_VOCAB + PUA_VOCAB;
pub const BOS_TOKEN_ID: u32 = ASCII_VOCAB + PUA_VOCAB + 1;

/// Approximate relative frequencies for the printable ASCII range,
/// biased toward English letters and spaces so the mock oracle actually
/// compresses ordinary text instead of just carrying it losslessly.
fn ascii_weight(byte: u8) -> f32 {
    match byte {
        b' ' => 18.0,
        b'e' | b'E' => 12.0,
        b't' | b'T' | b'a' | b'A' | b'o' | b'O' | b'i' | b'I' | b'n' | b'N' => 8.0,
        b's' | b'S' | b'h' | b'H' | b'r' | b'R' | b'd' | b'D' | b'l' | b'L' => 6.0,
        b'u'..=b'z' | b'U'..=b'Z' => 3.0,
        b'.' | b',' | b'\n' => 2.0,
        0x20..=0x7E => 1.0,
        _ => 0.2,
    }
}

/// Tokenizer over the ASCII+PUA alphabet described in the module docs.
pub struct MockTokenizer;

impl Tokenizer for MockTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        text.chars()
            .map(|ch| {
                let cp = ch as u32;
                if cp < ASCII_VOCAB {
                    cp
                } else if (0xE000..0xE000 + PUA_VOCAB).contains(&cp) {
                    ASCII_VOCAB + (cp - 0xE000)
                } else {
                    panic!(
                        "MockTokenizer only supports ASCII-or-invalid byte input (char {ch:?} is outside its vocabulary)"
                    )
                }
            })
            .collect()
    }

    fn decode(&self, token_ids: &[u32]) -> String {
        token_ids
            .iter()
            .map(|&id| {
                if id < ASCII_VOCAB {
                    char::from(id as u8)
                } else if id < ASCII_VOCAB + PUA_VOCAB {
                    char::from_u32(0xE000 + (id - ASCII_VOCAB)).expect("valid PUA scalar value")
                } else {
                    panic!("MockTokenizer cannot decode the BOS/EOS ids as text")
                }
            })
            .collect()
    }
}

/// Static unigram oracle over [`MockTokenizer`]'s vocabulary.
pub struct MockOracle;

impl ModelOracle for MockOracle {
    fn logits(&self, _token_ids: &[u32]) -> Result<Vec<f32>> {
        let mut logits = Vec::with_capacity(VOCAB_SIZE);
        for byte in 0..ASCII_VOCAB as u16 {
            logits.push(ascii_weight(byte as u8).ln());
        }
        for _ in 0..PUA_VOCAB {
            logits.push(0.2f32.ln());
        }
        logits.push(0.2f32.ln()); // EOS
        logits.push(BOS_LOGIT); // BOS is never a prediction target
        Ok(logits)
    }

    fn vocab_size(&self) -> usize {
        VOCAB_SIZE
    }

    fn bos_token_id(&self) -> u32 {
        BOS_TOKEN_ID
    }

    fn eos_token_id(&self) -> Option<u32> {
        Some(EOS_TOKEN_ID)
    }

    fn max_context_length(&self) -> usize {
        1024
    }
}
