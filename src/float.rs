import_stdlib!();

use half::f16;

use crate::error::{CborError, Result};
use crate::head::{decode_head, write_simple_prefix, HeadArg, MajorType};

const HALF_AI: u8 = 25;
const SINGLE_AI: u8 = 26;
const DOUBLE_AI: u8 = 27;

const CANONICAL_NAN_HALF: u16 = 0x7e00;
const CANONICAL_NAN_SINGLE: u32 = 0x7fc0_0000;
const CANONICAL_NAN_DOUBLE: u64 = 0x7ff8_0000_0000_0000;

/// A decoded CBOR float, tagged with the width it was written at. Width is never inferred
/// from magnitude on encode (spec.md §4.B, §9): a `f32` is always written at single width, a
/// `f64` always at double width, and half width is only ever produced by encoding an
/// `half::f16` value directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatValue {
    /// IEEE 754 binary16.
    Half(f16),
    /// IEEE 754 binary32.
    Single(f32),
    /// IEEE 754 binary64.
    Double(f64),
}

impl FloatValue {
    /// Widens to `f64`, which can exactly represent any half or single value.
    pub fn as_f64(self) -> f64 {
        match self {
            FloatValue::Half(v) => v.to_f64(),
            FloatValue::Single(v) => v as f64,
            FloatValue::Double(v) => v,
        }
    }
}

/// Writes `value` as a canonical half-precision float: `0xf9` followed by 2 big-endian bytes.
/// NaN is always written with the canonical quiet-NaN payload (`0x7e00`), regardless of the
/// input's own NaN payload bits.
pub fn write_f16(buf: &mut Vec<u8>, value: f16) {
    write_simple_prefix(buf, HALF_AI);
    let bits = if value.is_nan() { CANONICAL_NAN_HALF } else { value.to_bits() };
    buf.extend_from_slice(&bits.to_be_bytes());
}

/// Writes `value` as a canonical single-precision float: `0xfa` followed by 4 big-endian bytes.
/// NaN is always written with the canonical quiet-NaN payload (`0x7fc00000`).
pub fn write_f32(buf: &mut Vec<u8>, value: f32) {
    write_simple_prefix(buf, SINGLE_AI);
    let bits = if value.is_nan() { CANONICAL_NAN_SINGLE } else { value.to_bits() };
    buf.extend_from_slice(&bits.to_be_bytes());
}

/// Writes `value` as a canonical double-precision float: `0xfb` followed by 8 big-endian bytes.
/// NaN is always written with the canonical quiet-NaN payload (`0x7ff8000000000000`).
pub fn write_f64(buf: &mut Vec<u8>, value: f64) {
    write_simple_prefix(buf, DOUBLE_AI);
    let bits = if value.is_nan() { CANONICAL_NAN_DOUBLE } else { value.to_bits() };
    buf.extend_from_slice(&bits.to_be_bytes());
}

/// Reads one float item (half, single, or double width, selected by the head's
/// additional-info) from the front of `data`. Returns the value and the number of bytes
/// consumed.
pub fn read_float(data: &[u8]) -> Result<(FloatValue, usize)> {
    let (head, head_len) = decode_head(data)?;
    if head.major != MajorType::Simple {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Simple, found: head.major });
    }
    let arg = match head.arg {
        HeadArg::Value(v) => v,
        _ => return Err(CborError::WrongType),
    };
    match head_len {
        3 => Ok((FloatValue::Half(f16::from_bits(arg as u16)), head_len)),
        5 => Ok((FloatValue::Single(f32::from_bits(arg as u32)), head_len)),
        9 => Ok((FloatValue::Double(f64::from_bits(arg)), head_len)),
        _ => Err(CborError::WrongType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_precision_wire_fixtures() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 3.14159f32);
        assert_eq!(hex::encode(&buf), "fa40490fd0");

        let mut buf = Vec::new();
        write_f32(&mut buf, -3.14159f32);
        assert_eq!(hex::encode(&buf), "fac0490fd0");

        let mut buf = Vec::new();
        write_f32(&mut buf, 0.0f32);
        assert_eq!(hex::encode(&buf), "fa00000000");

        let mut buf = Vec::new();
        write_f32(&mut buf, f32::INFINITY);
        assert_eq!(hex::encode(&buf), "fa7f800000");

        let mut buf = Vec::new();
        write_f32(&mut buf, f32::NAN);
        assert_eq!(hex::encode(&buf), "fa7fc00000");
    }

    #[test]
    fn double_precision_wire_fixture() {
        let mut buf = Vec::new();
        write_f64(&mut buf, core::f64::consts::PI);
        assert_eq!(hex::encode(&buf), "fb400921fb54442d18");
    }

    #[test]
    fn float_round_trips_by_width() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 1.5f32);
        let (v, len) = read_float(&buf).unwrap();
        assert_eq!(len, buf.len());
        assert_eq!(v, FloatValue::Single(1.5));

        let mut buf = Vec::new();
        write_f64(&mut buf, 1.5f64);
        let (v, _) = read_float(&buf).unwrap();
        assert_eq!(v, FloatValue::Double(1.5));

        let mut buf = Vec::new();
        write_f16(&mut buf, f16::from_f32(1.5));
        let (v, _) = read_float(&buf).unwrap();
        assert_eq!(v, FloatValue::Half(f16::from_f32(1.5)));
    }
}
