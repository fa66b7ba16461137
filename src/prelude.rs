//! Re-exports the types and functions most callers need in one `use`.

pub use crate::codec::{from_slice, to_vec, Bytes, Decode, Encode};
pub use crate::error::{CborError, Result};
pub use crate::float::FloatValue;
pub use crate::head::{Head, HeadArg, MajorType};
pub use crate::indefinite::Length;
pub use crate::integer::{CborNegExt, Integer, Negative, Positive};
pub use crate::primitive::Simple;
pub use crate::schema::{
    AsArray, AsIndefiniteArray, AsIndefiniteMap, AsIndefiniteText, AsMap, AsMaybeIndefiniteArray,
    AsMaybeIndefiniteMap, AsMaybeIndefiniteText,
};
pub use crate::stream::{
    IndefiniteArrayCursor, StreamDecode2, StreamDecode3, StreamDecodeWrappedArray2,
};
pub use crate::tag::{decode_without_tag, decode_tagged, encode_tagged, tag_of, Tag, Tagged, TaggedBody, TaggedValue};
pub use crate::tagged_codec;
pub use crate::variant::{Variant2, Variant3};
