//! Base-85 text codec
//!
//! Z85-style positional encoding: every 4 input bytes become 5 symbols from a
//! fixed 85-character alphabet, big-endian. A short final group of `r` bytes
//! is encoded into `r + 1` symbols, so any byte sequence round-trips without
//! out-of-band length information. Used to carry binary identifiers (inbox
//! ids) as URL-friendly text.

use crate::error::{Error, Result};

/// Fixed 85-symbol alphabet (digits, letters, punctuation)
const ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// Sentinel for bytes outside the alphabet
const INVALID: u8 = 0xff;

const REVERSE: [u8; 128] = build_reverse();

const fn build_reverse() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Encode bytes as base-85 text
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(4) * 5);
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let mut num = u32::from_be_bytes(word);

        let mut group = [0u8; 5];
        for slot in group.iter_mut().rev() {
            *slot = ALPHABET[(num % 85) as usize];
            num /= 85;
        }

        let keep = if chunk.len() == 4 { 5 } else { chunk.len() + 1 };
        for &symbol in &group[..keep] {
            out.push(symbol as char);
        }
    }
    out
}

/// Decode base-85 text back to bytes
///
/// Missing positions in a short final group are treated as the highest
/// alphabet symbol, mirroring the truncation done by [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let symbols = text.as_bytes();
    if symbols.len() % 5 == 1 {
        return Err(Error::InvalidBase85("impossible group length"));
    }

    let mut out = Vec::with_capacity(symbols.len() / 5 * 4 + 4);
    for group in symbols.chunks(5) {
        let mut value: u64 = 0;
        for slot in 0..5 {
            let digit = match group.get(slot) {
                Some(&symbol) => {
                    let digit = REVERSE
                        .get(symbol as usize)
                        .copied()
                        .filter(|&d| d != INVALID)
                        .ok_or(Error::InvalidBase85("symbol outside alphabet"))?;
                    u64::from(digit)
                }
                None => 84,
            };
            value = value * 85 + digit;
        }
        if value > u64::from(u32::MAX) {
            return Err(Error::InvalidBase85("group exceeds 32 bits"));
        }

        let word = (value as u32).to_be_bytes();
        let keep = if group.len() == 5 { 4 } else { group.len() - 1 };
        out.extend_from_slice(&word[..keep]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vector() {
        // Classic Z85 test vector
        let data = [0x86, 0x4f, 0xd2, 0x6f, 0xb5, 0x59, 0xf7, 0x5b];
        assert_eq!(encode(&data), "HelloWorld");
        assert_eq!(decode("HelloWorld").unwrap(), data);
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_short_groups() {
        for len in 0..16 {
            let data: Vec<u8> = (0..len).map(|i| i as u8 * 17).collect();
            let text = encode(&data);
            let expected_len = data.len() / 4 * 5
                + match data.len() % 4 {
                    0 => 0,
                    r => r + 1,
                };
            assert_eq!(text.len(), expected_len);
            assert_eq!(decode(&text).unwrap(), data);
        }
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&data)).unwrap(), data);
    }

    #[test]
    fn test_rejects_foreign_symbols() {
        assert!(matches!(decode("ab~de"), Err(Error::InvalidBase85(_))));
        assert!(matches!(decode("ab de"), Err(Error::InvalidBase85(_))));
        // Multi-byte characters never land in the alphabet
        assert!(matches!(decode("abcdé"), Err(Error::InvalidBase85(_))));
    }

    #[test]
    fn test_rejects_impossible_group_length() {
        assert!(matches!(decode("abcdefX"), Err(Error::InvalidBase85(_))));
        assert!(matches!(decode("X"), Err(Error::InvalidBase85(_))));
    }

    #[test]
    fn test_rejects_overflow_group() {
        // "#####" decodes above u32::MAX and cannot come from encode
        assert!(matches!(decode("#####"), Err(Error::InvalidBase85(_))));
    }
}
