//! Key Fingerprints
//!
//! Derives a short, human-comparable symbol sequence from a public key:
//! SHA3-256 of the key, the first `6n` bits split into `n` six-bit chunks
//! (most significant bit first), each chunk mapped through a fixed 64-symbol
//! alphabet. Two people compare the symbols out-of-band (read aloud or side
//! by side) to detect a substituted key.

use sha3::{Digest, Sha3_256};

use crate::error::{Error, Result};

/// Default number of symbols in a fingerprint
pub const DEFAULT_FINGERPRINT_LENGTH: usize = 8;

/// Maximum symbols a 256-bit digest can supply at 6 bits each
pub const MAX_FINGERPRINT_LENGTH: usize = 42;

/// Fixed 64-entry symbol alphabet
///
/// Pictographs chosen for mutual visual distinguishability; order is part of
/// the fingerprint format and must not change.
pub const SYMBOLS: [&str; 64] = [
    "🙂", "😡", "💩", "🤡", "🦷", "🐵", "🌈", "☁️", "🍎", "🎤", "✈️", "⛱️", "💿", "💎", "⌛️",
    "☎️", "💡", "🧲", "🚽", "🔒", "🧡", "🐎", "🌍", "👍", "🤢", "👏", "👻", "👀", "🕸️", "🦋",
    "🦄", "🌵", "🚬", "🧊", "🧩", "🎈", "🍕", "🎃", "🌽", "🥚", "🥕", "🔑", "🧻", "🚀", "🎯",
    "📦", "📸", "🧠", "🎮", "🪜", "🚗", "🪞", "🛴", "🧽", "🪀", "🧨", "🧃", "🪐", "🪥", "🖍️",
    "🐠", "🐶", "🐱", "🐭",
];

/// Compute the fingerprint of a key as `length` symbols
///
/// Deterministic for a given key and length. Fails with
/// [`Error::FingerprintLength`] when the digest cannot supply `6 * length`
/// bits.
pub fn fingerprint(key: &[u8], length: usize) -> Result<String> {
    if length > MAX_FINGERPRINT_LENGTH {
        return Err(Error::FingerprintLength {
            requested: length,
            max: MAX_FINGERPRINT_LENGTH,
        });
    }
    let digest = Sha3_256::digest(key);
    let mut out = String::with_capacity(length * 4);
    for chunk in six_bit_chunks(&digest, length) {
        out.push_str(SYMBOLS[chunk as usize]);
    }
    Ok(out)
}

/// Split the first `count * 6` bits of `bytes` into six-bit values, MSB first
fn six_bit_chunks(bytes: &[u8], count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            let bit = i * 6;
            let byte = bit / 8;
            let offset = bit % 8;
            if offset <= 2 {
                (bytes[byte] >> (2 - offset)) & 0x3f
            } else {
                let wide = (u16::from(bytes[byte]) << 8) | u16::from(bytes[byte + 1]);
                ((wide >> (10 - offset)) & 0x3f) as u8
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_bit_chunks_msb_first() {
        let bytes = [0b1111_1111, 0b0000_1111, 0b1111_0000];
        assert_eq!(six_bit_chunks(&bytes, 4), vec![0b111111, 0b110000, 0b111111, 0b110000]);
    }

    #[test]
    fn test_six_bit_chunks_single_byte_span() {
        let bytes = [0b1010_1100, 0b0000_0000];
        assert_eq!(six_bit_chunks(&bytes, 1), vec![0b101011]);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let key = [0x5au8; 1568];
        let a = fingerprint(&key, DEFAULT_FINGERPRINT_LENGTH).unwrap();
        let b = fingerprint(&key, DEFAULT_FINGERPRINT_LENGTH).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_fingerprint_differs_between_keys() {
        let a = fingerprint(&[1u8; 64], 8).unwrap();
        let b = fingerprint(&[2u8; 64], 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_prefix_property() {
        // A shorter fingerprint is a prefix of a longer one for the same key
        let key = b"some public key";
        let short = fingerprint(key, 4).unwrap();
        let long = fingerprint(key, 8).unwrap();
        assert!(long.starts_with(&short));
    }

    #[test]
    fn test_fingerprint_length_limit() {
        assert!(fingerprint(b"key", MAX_FINGERPRINT_LENGTH).is_ok());
        assert_eq!(
            fingerprint(b"key", MAX_FINGERPRINT_LENGTH + 1),
            Err(Error::FingerprintLength {
                requested: MAX_FINGERPRINT_LENGTH + 1,
                max: MAX_FINGERPRINT_LENGTH,
            })
        );
    }

    #[test]
    fn test_alphabet_is_distinct() {
        for (i, a) in SYMBOLS.iter().enumerate() {
            for b in SYMBOLS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
