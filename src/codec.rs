import_stdlib!();

use half::f16;

use crate::error::{CborError, Result};
use crate::float::{read_float, write_f16, write_f32, write_f64, FloatValue};
use crate::head::{decode_head, write_head, HeadArg, MajorType};
use crate::indefinite::{peek_is_break, read_array_header, read_map_header, Length};
use crate::primitive::{read_bytes, read_simple, read_text, write_bytes, write_bool, write_null, write_text, Simple};
use crate::tag::{Tag, TaggedValue};

/// Writes `self` as one complete CBOR item, appended to `buf`.
///
/// This is the crate's core dispatch surface (component C): there is no intermediate document
/// tree to build first. A type's `Encode` impl writes its wire bytes directly.
pub trait Encode {
    /// Appends the CBOR encoding of `self` to `buf`.
    fn encode(&self, buf: &mut Vec<u8>);
}

/// Reads one complete CBOR item of type `Self` from the front of `data`, returning the value
/// and the number of bytes consumed. Returns `CborError::Incomplete` if `data` is a valid
/// prefix of such an item but doesn't yet contain all of it.
pub trait Decode: Sized {
    /// Decodes one item from the front of `data`.
    fn decode(data: &[u8]) -> Result<(Self, usize)>;
}

/// Encodes `value` into a freshly allocated buffer.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    value.encode(&mut buf);
    buf
}

/// Decodes one item of type `T` from the start of `data`. Trailing bytes after the item are
/// ignored; callers that need to assert the whole buffer was consumed should compare the
/// returned length against `data.len()` themselves.
pub fn from_slice<T: Decode>(data: &[u8]) -> Result<T> {
    let (value, _) = T::decode(data)?;
    Ok(value)
}

macro_rules! impl_unsigned {
    ($t:ty) => {
        impl Encode for $t {
            fn encode(&self, buf: &mut Vec<u8>) {
                write_head(buf, MajorType::Unsigned, *self as u64);
            }
        }
        impl Decode for $t {
            fn decode(data: &[u8]) -> Result<(Self, usize)> {
                let (head, consumed) = decode_head(data)?;
                if head.major != MajorType::Unsigned {
                    return Err(CborError::UnexpectedMajorType { expected: MajorType::Unsigned, found: head.major });
                }
                let v = head.value()?;
                let narrowed = <$t>::try_from(v).map_err(|_| CborError::IntegerOutOfRange)?;
                Ok((narrowed, consumed))
            }
        }
    };
}

impl_unsigned!(u8);
impl_unsigned!(u16);
impl_unsigned!(u32);
impl_unsigned!(u64);
impl_unsigned!(usize);

macro_rules! impl_signed {
    ($t:ty) => {
        impl Encode for $t {
            fn encode(&self, buf: &mut Vec<u8>) {
                let v = *self as i128;
                if v >= 0 {
                    write_head(buf, MajorType::Unsigned, v as u64);
                } else {
                    write_head(buf, MajorType::Negative, (-1 - v) as u64);
                }
            }
        }
        impl Decode for $t {
            fn decode(data: &[u8]) -> Result<(Self, usize)> {
                let (head, consumed) = decode_head(data)?;
                let v: i128 = match head.major {
                    MajorType::Unsigned => head.value()? as i128,
                    MajorType::Negative => -1 - head.value()? as i128,
                    found => return Err(CborError::UnexpectedMajorType { expected: MajorType::Unsigned, found }),
                };
                let narrowed = <$t>::try_from(v).map_err(|_| CborError::IntegerOutOfRange)?;
                Ok((narrowed, consumed))
            }
        }
    };
}

impl_signed!(i8);
impl_signed!(i16);
impl_signed!(i32);
impl_signed!(i64);
impl_signed!(isize);

impl Encode for f16 {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_f16(buf, *self);
    }
}

impl Decode for f16 {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        match read_float(data)? {
            (FloatValue::Half(v), consumed) => Ok((v, consumed)),
            _ => Err(CborError::WrongType),
        }
    }
}

impl Encode for f32 {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_f32(buf, *self);
    }
}

impl Decode for f32 {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        match read_float(data)? {
            (FloatValue::Single(v), consumed) => Ok((v, consumed)),
            _ => Err(CborError::WrongType),
        }
    }
}

impl Encode for f64 {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_f64(buf, *self);
    }
}

impl Decode for f64 {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        match read_float(data)? {
            (FloatValue::Double(v), consumed) => Ok((v, consumed)),
            _ => Err(CborError::WrongType),
        }
    }
}

/// Decodes a float of any width into [`FloatValue`], rather than requiring a caller to know in
/// advance which width a peer wrote. Encoding dispatches to whichever width the value already
/// carries.
impl Encode for FloatValue {
    fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            FloatValue::Half(v) => write_f16(buf, *v),
            FloatValue::Single(v) => write_f32(buf, *v),
            FloatValue::Double(v) => write_f64(buf, *v),
        }
    }
}

impl Decode for FloatValue {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        read_float(data)
    }
}

impl Encode for bool {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_bool(buf, *self);
    }
}

impl Decode for bool {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (simple, consumed) = read_simple(data)?;
        match simple {
            Simple::True => Ok((true, consumed)),
            Simple::False => Ok((false, consumed)),
            _ => Err(CborError::WrongType),
        }
    }
}

impl Encode for str {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_text(buf, self);
    }
}

impl Encode for String {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_text(buf, self.as_str());
    }
}

impl Decode for String {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (s, consumed) = read_text(data)?;
        Ok((s.to_string(), consumed))
    }
}

/// A CBOR byte string (major type 2). A newtype rather than a blanket `Vec<u8>` impl, since
/// `Vec<u8>` also needs to mean "array of small integers" for generic `Vec<T>` code — the two
/// meanings only disagree on the wire, and Rust's coherence rules mean only one of them can own
/// `Vec<u8>` directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytes(pub Vec<u8>);

impl Encode for Bytes {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_bytes(buf, &self.0);
    }
}

impl Decode for Bytes {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (bytes, consumed) = read_bytes(data)?;
        Ok((Bytes(bytes.to_vec()), consumed))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

/// `None` encodes as `null`; `Some(v)` encodes as `v` itself, with no wrapper (component A
/// "optional values"). Decoding peeks the next head: `null` consumes it and yields `None`,
/// anything else is decoded as `T`.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            Some(v) => v.encode(buf),
            None => write_null(buf),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, consumed) = decode_head(data)?;
        if head.major == MajorType::Simple && head.arg == HeadArg::Value(22) {
            return Ok((None, consumed));
        }
        let (value, consumed) = T::decode(data)?;
        Ok((Some(value), consumed))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_head(buf, MajorType::Array, self.len() as u64);
        for item in self {
            item.encode(buf);
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (len, mut pos) = read_array_header(data)?;
        let mut out = Vec::new();
        match len {
            Length::Definite(n) => {
                for _ in 0..n {
                    let (item, consumed) = T::decode(&data[pos..])?;
                    out.push(item);
                    pos += consumed;
                }
            }
            Length::Indefinite => loop {
                if peek_is_break(&data[pos..])? {
                    let (_, consumed) = decode_head(&data[pos..])?;
                    pos += consumed;
                    break;
                }
                let (item, consumed) = T::decode(&data[pos..])?;
                out.push(item);
                pos += consumed;
            },
        }
        Ok((out, pos))
    }
}

impl<K: Encode + Ord, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_head(buf, MajorType::Map, self.len() as u64);
        for (k, v) in self {
            k.encode(buf);
            v.encode(buf);
        }
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (len, mut pos) = read_map_header(data)?;
        let mut out = BTreeMap::new();
        match len {
            Length::Definite(n) => {
                for _ in 0..n {
                    let (key, consumed) = K::decode(&data[pos..])?;
                    pos += consumed;
                    let (value, consumed) = V::decode(&data[pos..])?;
                    pos += consumed;
                    out.insert(key, value);
                }
            }
            Length::Indefinite => loop {
                // The odd-count error (an unpaired key right before the break) is only
                // detected here, at the break check, not eagerly after the key.
                if peek_is_break(&data[pos..])? {
                    let (_, consumed) = decode_head(&data[pos..])?;
                    pos += consumed;
                    break;
                }
                let (key, consumed) = K::decode(&data[pos..])?;
                pos += consumed;
                if peek_is_break(&data[pos..])? {
                    return Err(CborError::UnexpectedGroupSize { expected: 2, found: 1 });
                }
                let (value, consumed) = V::decode(&data[pos..])?;
                pos += consumed;
                out.insert(key, value);
            },
        }
        Ok((out, pos))
    }
}

macro_rules! impl_tuple {
    ($len:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode(&self, buf: &mut Vec<u8>) {
                write_head(buf, MajorType::Array, $len);
                $(self.$idx.encode(buf);)+
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(data: &[u8]) -> Result<(Self, usize)> {
                let (len, mut pos) = read_array_header(data)?;
                match len {
                    Length::Definite(n) if n == $len as usize => {}
                    Length::Definite(n) => {
                        return Err(CborError::UnexpectedGroupSize { expected: $len as usize, found: n });
                    }
                    Length::Indefinite => {
                        return Err(CborError::UnexpectedGroupSize { expected: $len as usize, found: usize::MAX });
                    }
                }
                $(
                    let ($name, consumed) = $name::decode(&data[pos..])?;
                    pos += consumed;
                )+
                Ok((($($name,)+), pos))
            }
        }
    };
}

impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);

/// A tag plus its wrapped value (component F), for tags whose type isn't registered via
/// [`crate::tag::Tagged`].
impl<T: Encode> Encode for TaggedValue<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_head(buf, MajorType::Tag, self.tag.value());
        self.value.encode(buf);
    }
}

impl<T: Decode> Decode for TaggedValue<T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, consumed) = decode_head(data)?;
        if head.major != MajorType::Tag {
            return Err(CborError::UnexpectedMajorType { expected: MajorType::Tag, found: head.major });
        }
        let tag = Tag(head.value()?);
        let (value, inner_consumed) = T::decode(&data[consumed..])?;
        Ok((TaggedValue { tag, value }, consumed + inner_consumed))
    }
}
