import_stdlib!();

use crate::error::{CborError, Result};

/// The top-3-bit classifier of a CBOR item (RFC 8949 §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    /// Major type 0: unsigned integer.
    Unsigned,
    /// Major type 1: negative integer (argument encodes `-1-n`).
    Negative,
    /// Major type 2: byte string.
    ByteString,
    /// Major type 3: UTF-8 text string.
    Text,
    /// Major type 4: array.
    Array,
    /// Major type 5: map.
    Map,
    /// Major type 6: tag.
    Tag,
    /// Major type 7: simple value / float / break.
    Simple,
}

impl MajorType {
    pub(crate) fn to_bits(self) -> u8 {
        match self {
            MajorType::Unsigned => 0,
            MajorType::Negative => 1,
            MajorType::ByteString => 2,
            MajorType::Text => 3,
            MajorType::Array => 4,
            MajorType::Map => 5,
            MajorType::Tag => 6,
            MajorType::Simple => 7,
        }
    }

    pub(crate) fn from_bits(bits: u8) -> MajorType {
        match bits {
            0 => MajorType::Unsigned,
            1 => MajorType::Negative,
            2 => MajorType::ByteString,
            3 => MajorType::Text,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            7 => MajorType::Simple,
            _ => unreachable!("major type is a 3-bit field"),
        }
    }
}

/// The argument half of a decoded head: either a concrete value, an indefinite-length marker
/// (additional-info 31 on a string/array/map/tag-ineligible major type), or — for major type 7
/// only — the break byte (`0xFF`) that terminates an indefinite-length container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadArg {
    /// A concrete argument value (the count, length, tag number, or simple/float selector).
    Value(u64),
    /// Additional-info 31 on a byte string, text string, array, or map head.
    Indefinite,
    /// Additional-info 31 on a major-type-7 head: the break byte.
    Break,
}

/// A decoded CBOR head: major type plus argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    /// The major type.
    pub major: MajorType,
    /// The argument.
    pub arg: HeadArg,
}

impl Head {
    /// Returns the argument as a concrete value, or `CborError::WrongType` if this head is an
    /// indefinite-length opener or a break.
    pub fn value(&self) -> Result<u64> {
        match self.arg {
            HeadArg::Value(v) => Ok(v),
            HeadArg::Indefinite | HeadArg::Break => Err(CborError::WrongType),
        }
    }

    /// True if this head is the break byte (`0xFF`, major type 7, additional-info 31).
    pub fn is_break(&self) -> bool {
        matches!((self.major, self.arg), (MajorType::Simple, HeadArg::Break))
    }

    /// True if this head opens an indefinite-length byte string, text string, array, or map.
    pub fn is_indefinite(&self) -> bool {
        matches!(self.arg, HeadArg::Indefinite)
    }
}

/// Writes the minimal head encoding for `(major, arg)`: the smallest of the inline (`<=23`),
/// 1-byte, 2-byte, 4-byte, or 8-byte argument forms. Never emits a non-minimal head.
pub fn write_head(buf: &mut Vec<u8>, major: MajorType, arg: u64) {
    let mt = major.to_bits() << 5;
    if arg <= 23 {
        buf.push(mt | arg as u8);
    } else if arg <= u8::MAX as u64 {
        buf.push(mt | 24);
        buf.push(arg as u8);
    } else if arg <= u16::MAX as u64 {
        buf.push(mt | 25);
        buf.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= u32::MAX as u64 {
        buf.push(mt | 26);
        buf.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&arg.to_be_bytes());
    }
}

/// Writes the indefinite-length opener for `major` (additional-info 31). Only meaningful for
/// `ByteString`, `Text`, `Array`, and `Map`.
pub fn write_indefinite_head(buf: &mut Vec<u8>, major: MajorType) {
    buf.push((major.to_bits() << 5) | 0x1F);
}

/// Writes the break byte (`0xFF`) that terminates an indefinite-length container.
pub fn write_break(buf: &mut Vec<u8>) {
    buf.push(0xFF);
}

/// Writes a raw single-byte head for a major-7 simple/float selector whose width has already
/// been decided by the caller (used by `float.rs`, which needs to pick between the
/// `0xf9`/`0xfa`/`0xfb` prefixes directly rather than through the minimal-head ladder above,
/// since float width is chosen by input type, not by argument magnitude).
pub fn write_simple_prefix(buf: &mut Vec<u8>, additional_info: u8) {
    buf.push((MajorType::Simple.to_bits() << 5) | additional_info);
}

/// Reads one head from the front of `data`. Returns the decoded head and the number of bytes
/// consumed (1, 2, 3, 5, or 9). Returns `CborError::Incomplete` if `data` is too short to
/// contain a full head, and `CborError::BadAdditionalInfo` for the reserved additional-info
/// values (28, 29, 30 always; 31 on major types 0, 1, and 6, which have no indefinite form).
pub fn decode_head(data: &[u8]) -> Result<(Head, usize)> {
    let byte = *data.first().ok_or(CborError::Incomplete)?;
    let major = MajorType::from_bits(byte >> 5);
    let ai = byte & 0x1F;

    let (arg, consumed) = match ai {
        0..=23 => (HeadArg::Value(ai as u64), 1),
        24 => {
            let b = data.get(1).ok_or(CborError::Incomplete)?;
            (HeadArg::Value(*b as u64), 2)
        }
        25 => {
            if data.len() < 3 {
                return Err(CborError::Incomplete);
            }
            let v = u16::from_be_bytes([data[1], data[2]]);
            (HeadArg::Value(v as u64), 3)
        }
        26 => {
            if data.len() < 5 {
                return Err(CborError::Incomplete);
            }
            let v = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);
            (HeadArg::Value(v as u64), 5)
        }
        27 => {
            if data.len() < 9 {
                return Err(CborError::Incomplete);
            }
            let v = u64::from_be_bytes([
                data[1], data[2], data[3], data[4], data[5], data[6], data[7], data[8],
            ]);
            (HeadArg::Value(v), 9)
        }
        28..=30 => return Err(CborError::BadAdditionalInfo(ai)),
        31 => match major {
            MajorType::ByteString | MajorType::Text | MajorType::Array | MajorType::Map => {
                (HeadArg::Indefinite, 1)
            }
            MajorType::Simple => (HeadArg::Break, 1),
            MajorType::Unsigned | MajorType::Negative | MajorType::Tag => {
                return Err(CborError::BadAdditionalInfo(31));
            }
        },
        _ => unreachable!("additional info is a 5-bit field"),
    };

    Ok((Head { major, arg }, consumed))
}
