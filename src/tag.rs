import_stdlib!();

use crate::error::{CborError, Result};
use crate::head::{decode_head, write_head, MajorType};

/// A CBOR tag number (major type 6 argument). Tag assignment in this crate is compile-time
/// only (component F): a type opts in by implementing [`Tagged`] with a `const TAG`, there is
/// no runtime tag registry or name lookup to go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u64);

impl Tag {
    /// Creates a tag from its numeric value.
    pub const fn new(value: u64) -> Self {
        Tag(value)
    }

    /// The numeric tag value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Tag {
    fn from(value: u64) -> Self {
        Tag(value)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag(value as u64)
    }
}

impl From<usize> for Tag {
    fn from(value: usize) -> Self {
        Tag(value as u64)
    }
}

/// Associates a Rust type with the single CBOR tag it is always encoded/decoded under.
///
/// Unlike a dynamic tag store keyed at runtime, `Tagged::TAG` is a compile-time constant: the
/// mapping from type to tag number is part of the type itself, resolved by the compiler, not
/// looked up in a table. `tag_of::<T>()` (below) is the crate's one entry point for reading it
/// back out.
pub trait Tagged {
    /// The tag this type is always wrapped in.
    const TAG: u64;

    /// Convenience accessor for `Self::TAG` as a [`Tag`].
    fn tag() -> Tag {
        Tag(Self::TAG)
    }
}

/// Returns the compile-time tag registered for `T`.
pub fn tag_of<T: Tagged>() -> Tag {
    T::tag()
}

/// A [`Tagged`] aggregate that describes its own wire body (the schema from spec.md §3.3). This
/// is the "access hook" of component F: implementing `encode_body`/`decode_body` is the whole
/// contract a user type needs to satisfy to get correct tagged encode/decode, in the same spirit
/// as the teacher's `CBORTaggedEncodable`/`CBORTaggedDecodable` hooks, minus the dynamic tags
/// store. Wiring `Encode`/`Decode` themselves is left to [`encode_tagged`]/[`decode_tagged`] (or
/// the [`tagged_codec!`](crate::tagged_codec) macro) — see the note there for why this isn't a
/// blanket impl over `TaggedBody`.
pub trait TaggedBody: Tagged + Sized {
    /// Writes this value's body (everything after the tag head) to `buf`.
    fn encode_body(&self, buf: &mut Vec<u8>);

    /// Reads this value's body (everything after the tag head) from the front of `data`.
    fn decode_body(data: &[u8]) -> Result<(Self, usize)>;
}

/// Writes the tag head for `T::TAG` followed by `value`'s body.
///
/// This is a free function rather than a blanket `impl<T: TaggedBody> Encode for T`: `Encode`
/// and `Decode` are local traits that already have concrete impls for `u8`, `bool`, `Vec<T>`,
/// `Option<T>`, the tuples, `TaggedValue<T>`, and friends (see `codec.rs`). Rust's coherence
/// checker treats `impl<T: TaggedBody> Encode for T` as overlapping every one of those impls —
/// it doesn't reason that e.g. `u8: TaggedBody` is unsatisfiable, so a blanket impl here would
/// make the whole crate fail to compile with conflicting-implementation errors. A `TaggedBody`
/// type instead gets `Encode`/`Decode` through its own concrete impl, built from this helper (or
/// from the [`tagged_codec!`](crate::tagged_codec) macro, which writes that impl for you).
pub fn encode_tagged<T: TaggedBody>(value: &T, buf: &mut Vec<u8>) {
    write_head(buf, MajorType::Tag, T::TAG);
    value.encode_body(buf);
}

/// Reads the tag head (checked against `T::TAG`) followed by `T`'s body. See [`encode_tagged`]
/// for why this is a free function rather than a blanket `Decode` impl.
pub fn decode_tagged<T: TaggedBody>(data: &[u8]) -> Result<(T, usize)> {
    let (head, consumed) = decode_head(data)?;
    if head.major != MajorType::Tag {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Tag, found: head.major });
    }
    let found = head.value()?;
    if found != T::TAG {
        return Err(CborError::WrongTag { expected: Tag(T::TAG), found: Tag(found) });
    }
    let (value, body_consumed) = T::decode_body(&data[consumed..])?;
    Ok((value, consumed + body_consumed))
}

/// Decodes a [`TaggedBody`] type's body directly, without requiring (or consuming) the tag
/// head — the Rust equivalent of the source API's `decode_without_tag` (spec.md §4.F, §6).
pub fn decode_without_tag<T: TaggedBody>(data: &[u8]) -> Result<(T, usize)> {
    T::decode_body(data)
}

/// Implements [`Encode`](crate::codec::Encode)/[`Decode`](crate::codec::Decode) for a
/// [`TaggedBody`] type by delegating to [`encode_tagged`]/[`decode_tagged`] — the one-line
/// equivalent of writing those two impls out by hand for each tagged type.
#[macro_export]
macro_rules! tagged_codec {
    ($t:ty) => {
        impl $crate::codec::Encode for $t {
            fn encode(&self, buf: &mut Vec<u8>) {
                $crate::tag::encode_tagged(self, buf);
            }
        }

        impl $crate::codec::Decode for $t {
            fn decode(data: &[u8]) -> $crate::error::Result<(Self, usize)> {
                $crate::tag::decode_tagged(data)
            }
        }
    };
}

/// Wraps a value together with the CBOR tag it should be (or was) encoded under.
///
/// `TaggedValue<T>` is how this crate represents "tag 6 wrapping an inner item" at the type
/// level for types that don't want to implement [`Tagged`] themselves (e.g. because the same
/// inner type is reused under more than one tag in different contexts). Types that implement
/// [`TaggedBody`] get their tag head written/read through [`encode_tagged`]/[`decode_tagged`]
/// (wired up via [`tagged_codec!`](crate::tagged_codec)) and don't need this wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedValue<T> {
    /// The tag this value is wrapped under.
    pub tag: Tag,
    /// The wrapped value.
    pub value: T,
}

impl<T> TaggedValue<T> {
    /// Wraps `value` under `tag`.
    pub fn new(tag: impl Into<Tag>, value: T) -> Self {
        TaggedValue { tag: tag.into(), value }
    }

    /// Unwraps, discarding the tag.
    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    impl Tagged for Marker {
        const TAG: u64 = 1004;
    }

    #[test]
    fn tag_of_reads_the_compile_time_constant() {
        assert_eq!(tag_of::<Marker>(), Tag(1004));
        assert_eq!(Marker::tag().value(), 1004);
    }

    #[test]
    fn tagged_value_wraps_and_unwraps() {
        let tv = TaggedValue::new(100u64, "hello");
        assert_eq!(tv.tag, Tag(100));
        assert_eq!(tv.into_inner(), "hello");
    }

    #[test]
    fn tagged_body_writes_the_tag_head_from_the_fixed_test_corpus() {
        // spec.md §6: a tagged aggregate with tag 700 starts with `d902bc`.
        use crate::codec::{to_vec, Decode, Encode};

        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Simple700 {
            value: u32,
        }
        impl Tagged for Simple700 {
            const TAG: u64 = 700;
        }
        impl TaggedBody for Simple700 {
            fn encode_body(&self, buf: &mut Vec<u8>) {
                self.value.encode(buf);
            }
            fn decode_body(data: &[u8]) -> Result<(Self, usize)> {
                let (value, consumed) = u32::decode(data)?;
                Ok((Simple700 { value }, consumed))
            }
        }
        crate::tagged_codec!(Simple700);

        let original = Simple700 { value: 42 };
        let buf = to_vec(&original);
        assert!(hex::encode(&buf).starts_with("d902bc"));

        let decoded: Simple700 = crate::codec::from_slice(&buf).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_without_tag_skips_the_tag_step() {
        use crate::codec::{to_vec, Decode, Encode};

        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Tagged900(u32);
        impl Tagged for Tagged900 {
            const TAG: u64 = 900;
        }
        impl TaggedBody for Tagged900 {
            fn encode_body(&self, buf: &mut Vec<u8>) {
                self.0.encode(buf);
            }
            fn decode_body(data: &[u8]) -> Result<(Self, usize)> {
                let (v, consumed) = u32::decode(data)?;
                Ok((Tagged900(v), consumed))
            }
        }
        crate::tagged_codec!(Tagged900);

        let buf = to_vec(&Tagged900(5));
        // Skip past the tag head by hand and decode the body directly.
        let (head, head_len) = decode_head(&buf).unwrap();
        assert_eq!(head.value().unwrap(), 900);
        let (value, _): (Tagged900, usize) = decode_without_tag(&buf[head_len..]).unwrap();
        assert_eq!(value, Tagged900(5));
    }

    #[test]
    fn wrong_tag_is_rejected() {
        use crate::codec::{to_vec, Decode, Encode};

        #[derive(Debug, Clone, PartialEq, Eq)]
        struct WantsTag1(u32);
        impl Tagged for WantsTag1 {
            const TAG: u64 = 1;
        }
        impl TaggedBody for WantsTag1 {
            fn encode_body(&self, buf: &mut Vec<u8>) {
                self.0.encode(buf);
            }
            fn decode_body(data: &[u8]) -> Result<(Self, usize)> {
                let (v, consumed) = u32::decode(data)?;
                Ok((WantsTag1(v), consumed))
            }
        }
        crate::tagged_codec!(WantsTag1);

        #[derive(Debug, Clone, PartialEq, Eq)]
        struct WantsTag2(u32);
        impl Tagged for WantsTag2 {
            const TAG: u64 = 2;
        }
        impl TaggedBody for WantsTag2 {
            fn encode_body(&self, buf: &mut Vec<u8>) {
                self.0.encode(buf);
            }
            fn decode_body(data: &[u8]) -> Result<(Self, usize)> {
                let (v, consumed) = u32::decode(data)?;
                Ok((WantsTag2(v), consumed))
            }
        }
        crate::tagged_codec!(WantsTag2);

        let buf = to_vec(&WantsTag1(7));
        let result: Result<WantsTag2> = crate::codec::from_slice(&buf);
        assert_eq!(result, Err(CborError::WrongTag { expected: Tag(2), found: Tag(1) }));
    }
}
