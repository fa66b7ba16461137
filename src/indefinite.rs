import_stdlib!();

use crate::error::{CborError, Result};
use crate::head::{decode_head, write_break, write_indefinite_head, HeadArg, MajorType};

/// Writes an indefinite-length byte string as a single chunk: this crate's encoder always
/// produces exactly one chunk between the opener and the break (spec.md §9), even though the
/// decoder below accepts any number of chunks a peer might have written.
pub fn write_indefinite_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_indefinite_head(buf, MajorType::ByteString);
    crate::primitive::write_bytes(buf, bytes);
    write_break(buf);
}

/// Writes an indefinite-length text string as a single chunk.
pub fn write_indefinite_text(buf: &mut Vec<u8>, text: &str) {
    write_indefinite_head(buf, MajorType::Text);
    crate::primitive::write_text(buf, text);
    write_break(buf);
}

/// Writes an indefinite-length map: opener, each key/value pair in order, then break. Unlike
/// byte/text strings, maps and arrays have no "chunk" concept to pick a discretionary split for
/// — every pair is its own item either way — so this is just the definite-length map writer's
/// header swapped for the indefinite opener, provided here for symmetry with
/// [`write_indefinite_bytes`]/[`write_indefinite_text`] so callers don't have to hand-roll
/// `write_indefinite_head(Map)` + pairs + `write_break` themselves.
pub fn write_indefinite_map<K: crate::codec::Encode, V: crate::codec::Encode>(
    buf: &mut Vec<u8>,
    pairs: &[(K, V)],
) {
    write_indefinite_head(buf, MajorType::Map);
    for (key, value) in pairs {
        key.encode(buf);
        value.encode(buf);
    }
    write_break(buf);
}

/// Reads an indefinite-length byte string: the opener must already have been consumed by the
/// caller (its presence is how the caller chose to call this function at all). Reads
/// definite-length byte-string chunks until a break, concatenating their content. A chunk that
/// is not itself a definite-length byte string — wrong major type, or itself indefinite — is
/// `CborError::NoMatchForBstrOnBuffer`.
pub fn read_indefinite_bytes(data: &[u8]) -> Result<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let (head, head_len) = decode_head(&data[pos..])?;
        if head.major == MajorType::Simple && head.arg == HeadArg::Break {
            pos += head_len;
            break;
        }
        if head.major != MajorType::ByteString || head.is_indefinite() {
            return Err(CborError::NoMatchForBstrOnBuffer);
        }
        let (chunk, consumed) = crate::primitive::read_bytes(&data[pos..])?;
        out.extend_from_slice(chunk);
        pos += consumed;
        let _ = head_len;
    }
    Ok((out, pos))
}

/// Reads an indefinite-length text string, chunk by chunk, the same way
/// [`read_indefinite_bytes`] does for byte strings. A non-matching chunk is
/// `CborError::NoMatchForTstrOnBuffer`.
pub fn read_indefinite_text(data: &[u8]) -> Result<(String, usize)> {
    let mut out = String::new();
    let mut pos = 0usize;
    loop {
        let (head, head_len) = decode_head(&data[pos..])?;
        if head.major == MajorType::Simple && head.arg == HeadArg::Break {
            pos += head_len;
            break;
        }
        if head.major != MajorType::Text || head.is_indefinite() {
            return Err(CborError::NoMatchForTstrOnBuffer);
        }
        let (chunk, consumed) = crate::primitive::read_text(&data[pos..])?;
        out.push_str(chunk);
        pos += consumed;
    }
    Ok((out, pos))
}

/// A decoded container length: either a known definite count, or "indefinite, read until
/// break". Returned by [`read_array_header`] and [`read_map_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// A definite-length container's element (for maps: pair) count.
    Definite(usize),
    /// An indefinite-length container: the caller must read elements until it sees a break.
    Indefinite,
}

/// Reads an array head (definite or indefinite) from the front of `data`.
pub fn read_array_header(data: &[u8]) -> Result<(Length, usize)> {
    let (head, consumed) = decode_head(data)?;
    if head.major != MajorType::Array {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Array, found: head.major });
    }
    read_length(head.arg, consumed)
}

/// Reads a map head (definite or indefinite) from the front of `data`. The definite count is
/// the number of key/value *pairs*, matching RFC 8949 (not the number of raw items).
pub fn read_map_header(data: &[u8]) -> Result<(Length, usize)> {
    let (head, consumed) = decode_head(data)?;
    if head.major != MajorType::Map {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Map, found: head.major });
    }
    read_length(head.arg, consumed)
}

fn read_length(arg: HeadArg, consumed: usize) -> Result<(Length, usize)> {
    match arg {
        HeadArg::Value(v) => Ok((Length::Definite(v as usize), consumed)),
        HeadArg::Indefinite => Ok((Length::Indefinite, consumed)),
        HeadArg::Break => Err(CborError::WrongType),
    }
}

/// True if the next head in `data` is a break byte. Does not consume it; callers that confirm
/// `true` should still call `decode_head` themselves to advance past it, matching the point in
/// the input where an odd-indefinite-map error (an unpaired key at the break) is detected:
/// at the break, not eagerly after the key (spec.md §9).
pub fn peek_is_break(data: &[u8]) -> Result<bool> {
    let (head, _) = decode_head(data)?;
    Ok(head.major == MajorType::Simple && head.arg == HeadArg::Break)
}
