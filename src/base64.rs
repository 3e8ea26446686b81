//! Optional, consumer-side base64 framing for transports that require
//! printable characters (spec §6). Not used by the coder or driver
//! directly; a CLI front-end reaches for this when asked to emit or
//! ingest base64.

use base64::Engine;

const STANDARD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Decodes `input` as standard base64, tolerating whitespace or line
/// wrapping in human-pasted artifacts: any byte outside the standard
/// alphabet is silently stripped, then the remainder is padded with `A`
/// to a multiple of 4 before decoding.
pub fn robust_b64decode(input: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    let mut filtered: Vec<u8> = input.iter().copied().filter(|b| STANDARD_ALPHABET.contains(b)).collect();
    let padding = (4 - filtered.len() % 4) % 4;
    filtered.extend(std::iter::repeat(b'A').take(padding));
    base64::engine::general_purpose::STANDARD.decode(filtered)
}

/// Encodes `input` as standard base64.
pub fn b64encode(input: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_newlines_and_pads_missing_padding() {
        let encoded = b64encode(b"hello, world");
        let mangled: String = encoded.chars().collect::<Vec<_>>().chunks(4).map(|c| c.iter().collect::<String>()).collect::<Vec<_>>().join("\n");
        let mangled_without_padding = mangled.trim_end_matches('=').to_string();
        let decoded = robust_b64decode(mangled_without_padding.as_bytes()).unwrap();
        assert_eq!(decoded, b"hello, world");
    }

    #[test]
    fn roundtrips_arbitrary_bytes() {
        let data: Vec<u8> = (0..=255).collect();
        let encoded = b64encode(&data);
        assert_eq!(robust_b64decode(encoded.as_bytes()).unwrap(), data);
    }
}
