//! End-to-end `compress`/`decompress` round-trips against the bundled
//! mock oracle (spec §8's universal round-trip property and concrete
//! scenarios). The mock tokenizer's vocabulary is ASCII-plus-PUA-escape
//! only (see `llm_zip::mock`'s module docs), so these inputs are chosen
//! to never contain a byte run that decodes as a *valid* non-ASCII,
//! non-escape-range UTF-8 code point; the full byte-range codec bijection
//! is covered independently in `text_codec_tests.rs`.

use rand::{Rng, SeedableRng};

use llm_zip::driver::{CancellationToken, Compressor};
use llm_zip::mock::{MockOracle, MockTokenizer};

fn compressor(window_overlap: usize) -> Compressor<'static, MockOracle, MockTokenizer> {
    // leaked once per test process; the mock oracle/tokenizer are
    // zero-sized and this keeps the test bodies free of lifetime noise.
    let model: &'static MockOracle = Box::leak(Box::new(MockOracle));
    let tokenizer: &'static MockTokenizer = Box::leak(Box::new(MockTokenizer));
    Compressor::new(model, tokenizer, window_overlap).unwrap()
}

fn roundtrip(window_overlap: usize, input: &[u8]) -> Vec<u8> {
    let c = compressor(window_overlap);
    let cancel = CancellationToken::new();
    let compressed = c.compress(input, &cancel).unwrap();
    c.decompress(&compressed, &cancel).unwrap()
}

#[test]
fn empty_input_roundtrips_to_empty_output() {
    assert_eq!(roundtrip(0, b""), b"");
}

#[test]
fn ascii_sentence_compresses_smaller_than_its_raw_size() {
    let input = b"The quick brown fox jumps over the lazy dog. The quick brown fox jumps over the lazy dog again.";
    let c = compressor(0);
    let cancel = CancellationToken::new();
    let compressed = c.compress(input, &cancel).unwrap();
    assert!(compressed.len() < input.len());
    assert_eq!(c.decompress(&compressed, &cancel).unwrap(), input);
}

#[test]
fn ascending_byte_range_roundtrips_identically() {
    // every byte 0x00..=0xFF in order; no two adjacent bytes here ever
    // form a valid (non-escape-range) multi-byte UTF-8 sequence, since a
    // valid continuation byte is always numerically less than the lead
    // byte that requires it.
    let input: Vec<u8> = (0..=255).collect();
    assert_eq!(roundtrip(0, &input), input);
}

#[test]
fn each_single_byte_value_roundtrips() {
    for byte in 0u16..=255 {
        let input = [byte as u8];
        assert_eq!(roundtrip(0, &input), input);
    }
}

#[test]
fn pua_collision_scenario_roundtrips_exactly() {
    // the three-byte UTF-8 encoding of U+E042, followed by the raw byte
    // 0x42 — spec §8 scenario 4. Both map back to their original bytes
    // even though both land in the escape range on the way through.
    let mut input = Vec::new();
    input.extend_from_slice('\u{E042}'.encode_utf8(&mut [0u8; 4]).as_bytes());
    input.push(0x42);
    assert_eq!(roundtrip(0, &input), input);
}

#[test]
fn same_input_at_different_window_overlaps_decompresses_identically() {
    let input = b"repeat after me: the model sees only what it has already decoded. ".repeat(8);
    let at_zero = roundtrip(0, &input);
    let at_64 = roundtrip(64, &input);
    assert_eq!(at_zero, input);
    assert_eq!(at_64, input);
}

#[test]
fn long_input_spanning_multiple_context_windows_roundtrips() {
    // MockOracle's max_context_length is 1024; this input tokenizes to
    // well over that, forcing repeated left-truncation on both sides.
    let input = b"all work and no play makes jack a dull boy. ".repeat(200);
    assert_eq!(roundtrip(32, &input), input.as_slice());
}

#[test]
fn cancellation_during_compression_forces_a_valid_self_terminating_artifact() {
    let c = compressor(0);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let input = b"this call should immediately jump to encoding EOS";
    let compressed = c.compress(input, &cancel).unwrap();

    let fresh_cancel = CancellationToken::new();
    let decompressed = c.decompress(&compressed, &fresh_cancel).unwrap();
    assert_eq!(decompressed, b"");
}

#[test]
fn cancellation_during_decompression_discards_partial_output() {
    let c = compressor(0);
    let compress_cancel = CancellationToken::new();
    let compressed = c.compress(b"some text to compress", &compress_cancel).unwrap();

    let decompress_cancel = CancellationToken::new();
    decompress_cancel.cancel();
    let decompressed = c.decompress(&compressed, &decompress_cancel).unwrap();
    assert_eq!(decompressed, b"");
}

#[test]
fn random_ascii_inputs_of_varying_length_roundtrip() {
    // ASCII-only so every byte stays inside MockTokenizer's vocabulary;
    // a fuzz-style sweep over lengths and window overlaps rather than a
    // single fixed case.
    let mut rng = rand::rngs::StdRng::seed_from_u64(1729);
    for _ in 0..50 {
        let len = rng.gen_range(0..300);
        let input: Vec<u8> = (0..len).map(|_| rng.gen_range(0x20u8..=0x7E)).collect();
        let window_overlap = rng.gen_range(0..128);
        assert_eq!(roundtrip(window_overlap, &input), input);
    }
}

#[test]
fn window_overlap_out_of_range_is_a_configuration_error() {
    let model = MockOracle;
    let tokenizer = MockTokenizer;
    let max_context = {
        use llm_zip::model::ModelOracle;
        model.max_context_length()
    };
    let err = Compressor::new(&model, &tokenizer, max_context).unwrap_err();
    assert!(matches!(err, llm_zip::error::CrateError::WindowOverlapOutOfRange { .. }));
}
