//! Binary framing primitives
//!
//! Length-prefixed frames (protobuf-style varints), fixed-block zero padding,
//! and the base-85 text codec used to move binary identifiers as text.
//!
//! Padded frames always carry the varint length prefix *inside* the padded
//! region, so the true payload is recovered by reading the frame first and
//! then skipping the remainder of the block. Padding is never stripped before
//! the frame has been read.

pub mod base85;

use crate::error::{Error, Result};

/// Byte used to fill padded regions
const PAD_BYTE: u8 = 0;

/// Longest accepted varint encoding of a 64-bit value
const MAX_VARINT_LEN: usize = 10;

/// Encode a value as a little-endian base-128 varint
///
/// Seven data bits per byte, high bit set while more bytes follow.
pub fn encode_varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(2);
    while value > 0x7f {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Decode a varint from the front of `buf`
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`Error::TruncatedVarint`] if the continuation bit is still set when the
/// buffer runs out.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_VARINT_LEN || (i == MAX_VARINT_LEN - 1 && byte > 0x01) {
            return Err(Error::MalformedBlob("varint exceeds 64 bits"));
        }
        value |= u64::from(byte & 0x7f) << (i * 7);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::TruncatedVarint)
}

/// Prefix `data` with its varint-encoded byte length
pub fn frame(data: &[u8]) -> Vec<u8> {
    let mut out = encode_varint(data.len() as u64);
    out.extend_from_slice(data);
    out
}

/// Split a frame off the front of `buf`
///
/// Returns the framed payload and the remaining bytes. Fails with
/// [`Error::TruncatedFrame`] if fewer bytes remain than the prefix declares.
pub fn unframe(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    let (data, end) = read_frame(buf)?;
    Ok((data, &buf[end..]))
}

/// Right-pad `data` with zero bytes to the next multiple of `block_size`
///
/// A `block_size` of zero disables padding and returns the data unchanged.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    if block_size == 0 {
        return data.to_vec();
    }
    let padded_len = data.len().div_ceil(block_size) * block_size;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(data);
    out.resize(padded_len, PAD_BYTE);
    out
}

/// Strip trailing zero bytes
///
/// Only safe on buffers whose true payload never ends in a zero byte; framed
/// buffers recover their exact payload through the length prefix instead.
pub fn depad(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|&b| b != PAD_BYTE)
        .map_or(0, |i| i + 1);
    &data[..end]
}

/// Frame `data` and pad the result to the next `block_size` boundary
pub fn frame_padded(data: &[u8], block_size: usize) -> Vec<u8> {
    pad(&frame(data), block_size)
}

/// Split a padded frame off the front of `buf`
///
/// Reads the frame, then skips the zero padding up to the next `block_size`
/// boundary. The final section of a blob may omit its trailing padding; the
/// skip is clamped to the buffer end.
pub fn read_padded_frame(buf: &[u8], block_size: usize) -> Result<(&[u8], &[u8])> {
    let (data, end) = read_frame(buf)?;
    let section_end = if block_size == 0 {
        end
    } else {
        (end.div_ceil(block_size) * block_size).min(buf.len())
    };
    Ok((data, &buf[section_end..]))
}

/// Shared frame parser: payload slice and frame end offset
fn read_frame(buf: &[u8]) -> Result<(&[u8], usize)> {
    let (declared, consumed) = decode_varint(buf)?;
    let declared =
        usize::try_from(declared).map_err(|_| Error::MalformedBlob("frame length overflow"))?;
    let end = consumed
        .checked_add(declared)
        .ok_or(Error::MalformedBlob("frame length overflow"))?;
    if buf.len() < end {
        return Err(Error::TruncatedFrame {
            declared,
            available: buf.len() - consumed,
        });
    }
    Ok((&buf[consumed..end], end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_known_values() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(1), vec![0x01]);
        assert_eq!(encode_varint(127), vec![0x7f]);
        assert_eq!(encode_varint(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint(300), vec![0xac, 0x02]);
    }

    #[test]
    fn test_varint_decode_consumes_prefix_only() {
        let (value, consumed) = decode_varint(&[0xac, 0x02, 0xff, 0xff]).unwrap();
        assert_eq!(value, 300);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_varint_truncated() {
        assert_eq!(decode_varint(&[]), Err(Error::TruncatedVarint));
        assert_eq!(decode_varint(&[0x80]), Err(Error::TruncatedVarint));
        assert_eq!(decode_varint(&[0xff, 0xff]), Err(Error::TruncatedVarint));
    }

    #[test]
    fn test_varint_overlong_rejected() {
        // Eleven continuation bytes can never be a 64-bit value
        let overlong = [0x80u8; 11];
        assert!(matches!(
            decode_varint(&overlong),
            Err(Error::MalformedBlob(_))
        ));

        // Ten bytes whose final byte overflows bit 63
        let mut wide = [0xffu8; 10];
        wide[9] = 0x02;
        assert!(matches!(decode_varint(&wide), Err(Error::MalformedBlob(_))));
    }

    #[test]
    fn test_varint_max_value() {
        let encoded = encode_varint(u64::MAX);
        assert_eq!(encoded.len(), 10);
        let (value, consumed) = decode_varint(&encoded).unwrap();
        assert_eq!(value, u64::MAX);
        assert_eq!(consumed, 10);
    }

    #[test]
    fn test_frame_roundtrip() {
        let data = b"hello frame";
        let framed = frame(data);
        let (payload, rest) = unframe(&framed).unwrap();
        assert_eq!(payload, data);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_frame_empty() {
        let framed = frame(b"");
        assert_eq!(framed, vec![0x00]);
        let (payload, rest) = unframe(&framed).unwrap();
        assert!(payload.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_unframe_keeps_remainder() {
        let mut buf = frame(b"first");
        buf.extend_from_slice(b"second");
        let (payload, rest) = unframe(&buf).unwrap();
        assert_eq!(payload, b"first");
        assert_eq!(rest, b"second");
    }

    #[test]
    fn test_unframe_truncated() {
        let mut framed = frame(&[7u8; 50]);
        framed.truncate(20);
        assert_eq!(
            unframe(&framed),
            Err(Error::TruncatedFrame {
                declared: 50,
                available: 19
            })
        );
    }

    #[test]
    fn test_pad_to_block() {
        assert_eq!(pad(b"abc", 8).len(), 8);
        assert_eq!(pad(&[1u8; 8], 8).len(), 8);
        assert_eq!(pad(&[1u8; 9], 8).len(), 16);
        assert_eq!(pad(b"", 8).len(), 0);
    }

    #[test]
    fn test_pad_disabled() {
        assert_eq!(pad(b"abc", 0), b"abc");
    }

    #[test]
    fn test_depad_strips_trailing_zeros() {
        assert_eq!(depad(&pad(b"abc", 8)), b"abc");
        assert_eq!(depad(&[0, 0, 0]), &[] as &[u8]);
        assert_eq!(depad(b"abc"), b"abc");
        // Lossy on zero-suffixed payloads; framed buffers avoid this
        assert_eq!(depad(&[1, 2, 0]), &[1, 2]);
    }

    #[test]
    fn test_padded_frame_roundtrip() {
        for block in [0usize, 1, 4, 16, 128] {
            let data = b"some payload bytes";
            let buf = frame_padded(data, block);
            if block > 0 {
                assert_eq!(buf.len() % block, 0);
            }
            let (payload, rest) = read_padded_frame(&buf, block).unwrap();
            assert_eq!(payload, data);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn test_padded_frame_sequence() {
        // Two padded sections back to back, as laid out in an encrypted blob
        let block = 16;
        let mut buf = frame_padded(b"first section", block);
        buf.extend_from_slice(&frame_padded(b"second", block));

        let (first, rest) = read_padded_frame(&buf, block).unwrap();
        assert_eq!(first, b"first section");
        let (second, rest) = read_padded_frame(rest, block).unwrap();
        assert_eq!(second, b"second");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_padded_frame_zero_suffixed_payload() {
        // Payload ending in zero bytes survives because the frame length wins
        let block = 8;
        let data = [9u8, 0, 0, 0];
        let buf = frame_padded(&data, block);
        let (payload, _) = read_padded_frame(&buf, block).unwrap();
        assert_eq!(payload, data);
    }

    #[test]
    fn test_padded_frame_missing_final_padding() {
        // A sender that skips the last section's padding still parses
        let data = b"tail";
        let buf = frame(data);
        let (payload, rest) = read_padded_frame(&buf, 64).unwrap();
        assert_eq!(payload, data);
        assert!(rest.is_empty());
    }
}
