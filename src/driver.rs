//! Orchestrates the model oracle, the arithmetic coder, and the
//! byte↔text codec into the compress/decompress loops of spec §4.5.
//!
//! The single most important contract in this module is symmetry: the
//! token sequence used to condition the model at step `i` must be
//! byte-identical between [`Compressor::compress`] and
//! [`Compressor::decompress`]. Both loops build the model input the same
//! way — `[BOS] ++ last window_overlap tokens ++ left-truncate to
//! max_context` — so symmetry holds as long as the two calls share
//! `window_overlap`, the same model and tokenizer, and deterministic
//! inference.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::trace;

use crate::cdf::Cdf;
use crate::coder::decoder::BitDecoder;
use crate::coder::encoder::BitEncoder;
use crate::error::{CrateError, Result};
use crate::model::{ModelOracle, Tokenizer};
use crate::text::{bytes_to_utf8, utf8_to_bytes};

/// A cooperative cancellation flag, polled once between coding steps.
/// Models the source's process-wide `SIGINT` handler (spec §9) without
/// reaching for global signal state: the caller decides when and how
/// `cancel()` gets called (a real `SIGINT` handler, a timeout, a UI
/// button), this type just carries the flag across the call boundary.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives compression and decompression for a single `(model,
/// tokenizer, window_overlap)` configuration. Holds no state beyond
/// that configuration; nothing here survives across calls.
pub struct Compressor<'a, M: ModelOracle, T: Tokenizer> {
    model: &'a M,
    tokenizer: &'a T,
    window_overlap: usize,
    eos_token_id: u32,
}

impl<'a, M: ModelOracle, T: Tokenizer> Compressor<'a, M, T> {
    /// Validates `window_overlap` and the presence of an EOS/SEP token
    /// up front, since both are fatal configuration errors rather than
    /// recoverable conditions (spec §7).
    pub fn new(model: &'a M, tokenizer: &'a T, window_overlap: usize) -> Result<Self> {
        let max_context = model.max_context_length();
        if window_overlap >= max_context {
            return Err(CrateError::WindowOverlapOutOfRange { overlap: window_overlap, max_context });
        }
        let eos_token_id = model.eos_token_id().ok_or(CrateError::MissingEosToken)?;

        Ok(Self { model, tokenizer, window_overlap, eos_token_id })
    }

    /// Builds the model input for the tokens seen so far: `[BOS] ++`
    /// the trailing `window_overlap` tokens of `tokens[..upto]`,
    /// left-truncated to `max_context` tokens if that's still too long.
    fn context_window(&self, tokens: &[u32], upto: usize) -> Vec<u32> {
        let start = upto.saturating_sub(self.window_overlap);
        let mut window = Vec::with_capacity(1 + (upto - start));
        window.push(self.model.bos_token_id());
        window.extend_from_slice(&tokens[start..upto]);

        let max_context = self.model.max_context_length();
        if window.len() >= max_context {
            let cut = window.len() - max_context;
            window.drain(..cut);
        }
        window
    }

    fn cdf_for(&self, context: &[u32]) -> Result<Cdf> {
        let logits = self.model.logits(context).map_err(|e| CrateError::ModelFailure(e.to_string()))?;
        Cdf::from_logits(&logits)
    }

    /// Compresses `input` into a packed, byte-aligned bitstream.
    ///
    /// `cancel` is polled once per coding step; if set, the driver jumps
    /// straight to encoding `EOS`, producing a valid, self-terminating
    /// truncated artifact rather than an unfinished one.
    pub fn compress(&self, input: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>> {
        let text = bytes_to_utf8(input);
        let mut tokens = self.tokenizer.encode(&text);
        tokens.push(self.eos_token_id);

        let mut encoder = BitEncoder::new();
        let mut i = 0usize;

        while i < tokens.len() {
            let context = self.context_window(&tokens, i);
            let cdf = self.cdf_for(&context)?;

            if cancel.is_cancelled() && i < tokens.len() - 1 {
                i = tokens.len() - 1;
            }

            let symbol = tokens[i];
            trace!("encoding token {symbol} at step {i}/{}", tokens.len());
            encoder.encode_symbol(&cdf, symbol);
            i += 1;
        }

        Ok(encoder.finish())
    }

    /// Decompresses a bitstream produced by [`Compressor::compress`]
    /// with the same `window_overlap`, model, and tokenizer.
    ///
    /// `cancel` is polled once per coding step; if set, decompression
    /// stops and whatever output has been produced so far is discarded,
    /// per spec §5's cancellation semantics.
    pub fn decompress(&self, compressed: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>> {
        let mut decoder = BitDecoder::new(compressed);
        let mut seen_tokens: Vec<u32> = Vec::new();
        let mut output = Vec::new();
        let adds_leading_space = self.tokenizer.adds_leading_space_artifact();

        loop {
            if cancel.is_cancelled() {
                return Ok(Vec::new());
            }

            let context = self.context_window(&seen_tokens, seen_tokens.len());
            let cdf = self.cdf_for(&context)?;
            let token = decoder.decode_symbol(&cdf)?;

            if token == self.eos_token_id {
                break;
            }

            seen_tokens.push(token);

            let mut text = self.tokenizer.decode(&[token]);
            if seen_tokens.len() == 1 && adds_leading_space {
                if let Some(stripped) = text.strip_prefix(' ') {
                    text = stripped.to_string();
                }
            }

            output.extend_from_slice(&utf8_to_bytes(&text));
        }

        Ok(output)
    }
}
