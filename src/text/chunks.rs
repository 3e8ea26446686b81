//! Splits a byte slice into alternating valid-UTF-8 and invalid-byte
//! runs, using the canonical UTF-8 validation ranges (ASCII; two-, three-
//! and four-byte sequences with their restricted second-byte ranges that
//! exclude overlong encodings and surrogates).

/// One scan step: a (possibly empty) run of valid UTF-8 followed by a
/// (possibly empty) run of bytes that could not be interpreted as UTF-8
/// starting at that position.
#[derive(Debug, PartialEq, Eq)]
pub struct Utf8Chunk<'a> {
    pub valid: &'a [u8],
    pub invalid: &'a [u8],
}

/// Iterator over the chunks of `source`. Each call to `next` consumes
/// one run of valid bytes immediately followed by one run of invalid
/// bytes (either may be empty only at the very end of input); iteration
/// ends once `source` is exhausted.
pub struct Utf8Chunks<'a> {
    source: &'a [u8],
}

impl<'a> Utf8Chunks<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self { source }
    }
}

fn safe_get(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

const CONT_TAG: u8 = 0x80;
const CONT_MASK: u8 = 0xC0;

fn is_continuation(byte: u8) -> bool {
    byte & CONT_MASK == CONT_TAG
}

impl<'a> Iterator for Utf8Chunks<'a> {
    type Item = Utf8Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }

        let mut i = 0;
        let mut valid_up_to = 0;

        'scan: while i < self.source.len() {
            let byte = self.source[i];
            i += 1;

            match byte {
                0x00..=0x7F => {}
                0xC2..=0xDF => {
                    if !is_continuation(safe_get(self.source, i)) {
                        break 'scan;
                    }
                    i += 1;
                }
                0xE0..=0xEF => {
                    let next = safe_get(self.source, i);
                    let second_byte_ok = match byte {
                        0xE0 => (0xA0..=0xBF).contains(&next),
                        0xE1..=0xEC => (0x80..=0xBF).contains(&next),
                        0xED => (0x80..=0x9F).contains(&next),
                        0xEE..=0xEF => (0x80..=0xBF).contains(&next),
                        _ => unreachable!(),
                    };
                    if !second_byte_ok {
                        break 'scan;
                    }
                    i += 1;
                    if !is_continuation(safe_get(self.source, i)) {
                        break 'scan;
                    }
                    i += 1;
                }
                0xF0..=0xF4 => {
                    let next = safe_get(self.source, i);
                    let second_byte_ok = match byte {
                        0xF0 => (0x90..=0xBF).contains(&next),
                        0xF1..=0xF3 => (0x80..=0xBF).contains(&next),
                        0xF4 => (0x80..=0x8F).contains(&next),
                        _ => unreachable!(),
                    };
                    if !second_byte_ok {
                        break 'scan;
                    }
                    i += 1;
                    if !is_continuation(safe_get(self.source, i)) {
                        break 'scan;
                    }
                    i += 1;
                    if !is_continuation(safe_get(self.source, i)) {
                        break 'scan;
                    }
                    i += 1;
                }
                _ => break 'scan,
            }

            valid_up_to = i;
        }

        let (inspected, remaining) = self.source.split_at(i);
        self.source = remaining;

        let (valid, invalid) = inspected.split_at(valid_up_to);
        Some(Utf8Chunk { valid, invalid })
    }
}
