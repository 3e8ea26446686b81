//! Errors shared by every component of the coder/driver pipeline.

use thiserror::Error;

/// Errors that can surface while compressing or decompressing.
///
/// Configuration errors are fatal at construction time; model and decode
/// errors are surfaced directly to the caller with no retry. There is no
/// recoverable-partial-output case: compression and decompression are
/// atomic per call, and any error discards whatever output was produced
/// so far.
#[derive(Debug, Error)]
pub enum CrateError {
    /// The tokenizer exposes neither an EOS nor a SEP token, so there is
    /// no symbol the driver can use to terminate the stream.
    #[error("tokenizer exposes neither an EOS nor a SEP token")]
    MissingEosToken,

    /// `window_overlap` must fall in `[0, max_context_length)`.
    #[error("window_overlap {overlap} is out of range [0, {max_context})")]
    WindowOverlapOutOfRange { overlap: usize, max_context: usize },

    /// The model oracle returned a non-finite logit.
    #[error("model oracle returned a non-finite logit vector")]
    NonFiniteLogits,

    /// The model oracle failed outright.
    #[error("model oracle failed: {0}")]
    ModelFailure(String),

    /// The decoder's upper-bound search ran off the end of the CDF. This
    /// cannot happen against a well-formed bitstream and a CDF built with
    /// the `max(1, ...)` floor; observing it means the bitstream is
    /// corrupted.
    #[error("corrupted bitstream: symbol search exceeded vocabulary size")]
    CorruptedBitstream,
}

pub type Result<T> = std::result::Result<T, CrateError>;
