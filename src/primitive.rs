import_stdlib!();

use crate::error::{CborError, Result};
use crate::head::{decode_head, write_head, HeadArg, MajorType};

const SIMPLE_FALSE: u64 = 20;
const SIMPLE_TRUE: u64 = 21;
const SIMPLE_NULL: u64 = 22;
const SIMPLE_UNDEFINED: u64 = 23;
const SIMPLE_ONE_BYTE: u64 = 24;

/// A decoded major-type-7 simple value that is not a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simple {
    /// `false`.
    False,
    /// `true`.
    True,
    /// `null`.
    Null,
    /// `undefined`.
    Undefined,
    /// Any other simple value in `[0, 19] ∪ [32, 255]`.
    Value(u8),
}

/// Writes `false` or `true` as a major-7 simple value.
pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    write_head(buf, MajorType::Simple, if value { SIMPLE_TRUE } else { SIMPLE_FALSE });
}

/// Writes `null`.
pub fn write_null(buf: &mut Vec<u8>) {
    write_head(buf, MajorType::Simple, SIMPLE_NULL);
}

/// Writes `undefined`.
pub fn write_undefined(buf: &mut Vec<u8>) {
    write_head(buf, MajorType::Simple, SIMPLE_UNDEFINED);
}

/// Reads one simple value (not a float) from the front of `data`.
pub fn read_simple(data: &[u8]) -> Result<(Simple, usize)> {
    let (head, consumed) = decode_head(data)?;
    if head.major != MajorType::Simple {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Simple, found: head.major });
    }
    let v = match head.arg {
        HeadArg::Value(v) => v,
        _ => return Err(CborError::WrongType),
    };
    let simple = match v {
        SIMPLE_FALSE => Simple::False,
        SIMPLE_TRUE => Simple::True,
        SIMPLE_NULL => Simple::Null,
        SIMPLE_UNDEFINED => Simple::Undefined,
        SIMPLE_ONE_BYTE | 25 | 26 | 27 => return Err(CborError::WrongType),
        other => Simple::Value(other as u8),
    };
    Ok((simple, consumed))
}

/// Writes a definite-length byte string head followed by its raw content.
pub fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_head(buf, MajorType::ByteString, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Writes a definite-length UTF-8 text string head followed by its raw bytes. The string is
/// written as-is; no normalization or transcoding is performed.
pub fn write_text(buf: &mut Vec<u8>, text: &str) {
    write_head(buf, MajorType::Text, text.len() as u64);
    buf.extend_from_slice(text.as_bytes());
}

/// Reads a definite-length byte string from the front of `data`, returning the raw slice and
/// total bytes consumed (head + payload).
pub fn read_bytes(data: &[u8]) -> Result<(&[u8], usize)> {
    let (head, head_len) = decode_head(data)?;
    if head.major != MajorType::ByteString {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::ByteString, found: head.major });
    }
    let len = head.value()? as usize;
    let end = head_len.checked_add(len).ok_or(CborError::Incomplete)?;
    if data.len() < end {
        return Err(CborError::Incomplete);
    }
    Ok((&data[head_len..end], end))
}

/// Reads a definite-length text string's raw bytes from the front of `data`, without validating
/// UTF-8. Returns the raw slice and total bytes consumed. Validation only happens when the
/// caller decodes into a `String` sink (see `codec.rs`), which is where "requesting validation"
/// actually happens in this design: a raw-byte sink never pays for it.
pub fn read_text_bytes(data: &[u8]) -> Result<(&[u8], usize)> {
    let (head, head_len) = decode_head(data)?;
    if head.major != MajorType::Text {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Text, found: head.major });
    }
    let len = head.value()? as usize;
    let end = head_len.checked_add(len).ok_or(CborError::Incomplete)?;
    if data.len() < end {
        return Err(CborError::Incomplete);
    }
    Ok((&data[head_len..end], end))
}

/// Reads a definite-length text string from the front of `data`, validating UTF-8.
pub fn read_text(data: &[u8]) -> Result<(&str, usize)> {
    let (bytes, consumed) = read_text_bytes(data)?;
    let s = str::from_utf8(bytes)?;
    Ok((s, consumed))
}
