//! The abstract boundary between this crate and a concrete language
//! model runtime. Weight loading, GPU offload, and matrix compute are
//! all peripheral to this crate (spec §1) and live entirely on the other
//! side of these traits.

use crate::error::Result;

/// A pure function from a token-id prefix to the next-token logit
/// vector. Must be deterministic across calls with identical inputs —
/// bit-exact for the vector, or at minimum bit-exact after the
/// integer-CDF quantization in [`crate::cdf::Cdf`] — since the symmetry
/// invariant depends on the compressor and decompressor observing the
/// same distribution at the same step.
pub trait ModelOracle {
    /// Returns pre-softmax scores for the token following `token_ids`.
    /// `token_ids` is never empty: the driver always prepends `BOS`.
    fn logits(&self, token_ids: &[u32]) -> Result<Vec<f32>>;

    /// Size of the vocabulary; every logit vector has this length.
    fn vocab_size(&self) -> usize;

    /// Beginning-of-stream token id, prepended to every model query.
    fn bos_token_id(&self) -> u32;

    /// End-of-stream token id, or the separator token id if the
    /// tokenizer declares no EOS. `None` if the tokenizer has neither,
    /// which the driver treats as a fatal configuration error at
    /// construction time (spec §7, `ConfigurationError`).
    fn eos_token_id(&self) -> Option<u32>;

    /// Maximum number of tokens the model can condition on at once.
    fn max_context_length(&self) -> usize;
}

/// The tokenizer paired with a [`ModelOracle`].
pub trait Tokenizer {
    /// Encodes `text` to token ids. Must not add any special tokens;
    /// the driver manages `BOS`/`EOS` placement itself.
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Decodes `token_ids` back to text. Must not perform any whitespace
    /// cleanup beyond what the underlying vocabulary already encodes.
    fn decode(&self, token_ids: &[u32]) -> String;

    /// Whether this tokenizer injects a leading-space artifact: encoding
    /// a single space and decoding it back yields two spaces. Probed by
    /// round-tripping a single space once; the result only matters for
    /// the very first token emitted during decompression (spec §4.5,
    /// §9 Open Question).
    fn adds_leading_space_artifact(&self) -> bool {
        let tokens = self.encode(" ");
        self.decode(&tokens) == "  "
    }
}
