import_stdlib!();

use crate::tag::Tag;
use crate::head::MajorType;

/// The status of an encode or decode operation.
///
/// Every fallible operation in this crate returns `Result<T, CborError>`. A successful
/// operation is `Ok`; every other outcome is one of the variants below. `CborError::Incomplete`
/// is special: it means the input was a valid *prefix* of a well-formed item and the caller
/// should retry after appending more bytes (see [`crate::stream`] for the resumable decode
/// driver built on top of that property).
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum CborError {
    /// The input ended before a complete item (or its current argument) could be decoded.
    /// Safe to retry once more bytes are appended to the buffer.
    #[error("input truncated: incomplete item")]
    Incomplete,

    /// A fixed-capacity sink (a `[T; N]` array, or a schema's `as_array{N}`/`as_map{N}`
    /// marker) disagreed with the length actually present on the wire.
    #[error("expected a group of size {expected}, found {found}")]
    UnexpectedGroupSize {
        /// The length the sink required.
        expected: usize,
        /// The length actually encoded on the wire.
        found: usize,
    },

    /// An indefinite-length byte string contained a chunk that was not itself a definite-length
    /// byte string (wrong major type, or itself indefinite).
    #[error("indefinite byte string chunk did not match (wrong major type or nested indefinite)")]
    NoMatchForBstrOnBuffer,

    /// An indefinite-length text string contained a chunk that was not itself a definite-length
    /// text string (wrong major type, or itself indefinite).
    #[error("indefinite text string chunk did not match (wrong major type or nested indefinite)")]
    NoMatchForTstrOnBuffer,

    /// The major type found on the wire was not one the caller's sink could accept.
    #[error("unexpected major type: expected {expected:?}, found {found:?}")]
    UnexpectedMajorType {
        /// The major type the sink expected.
        expected: MajorType,
        /// The major type actually found.
        found: MajorType,
    },

    /// Additional-info 28, 29, or 30 was encountered; these values are reserved by RFC 8949 and
    /// are never legal in a well-formed head.
    #[error("reserved additional-info value {0} in CBOR head")]
    BadAdditionalInfo(u8),

    /// A tagged type's registered tag did not match the tag found on the wire.
    #[error("expected CBOR tag {expected}, found tag {found}")]
    WrongTag {
        /// The tag the decoding type is registered under.
        expected: Tag,
        /// The tag actually found on the wire.
        found: Tag,
    },

    /// None of a sum type's declared alternatives matched the wire item.
    #[error("no variant alternative matched the wire item")]
    VariantExhausted,

    /// A text string sink that requested UTF-8 validation found invalid UTF-8.
    #[error("invalid UTF-8 in CBOR text string: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),

    /// The decoded item was not of the type the caller asked for.
    #[error("decoded CBOR value was not the expected type")]
    WrongType,

    /// A decoded integer's magnitude does not fit in the target Rust integer type.
    #[error("decoded integer does not fit in the target type")]
    IntegerOutOfRange,

    /// Custom error message, for user-defined schema hooks.
    #[error("{0}")]
    Custom(String),
}

impl CborError {
    /// True for [`CborError::Incomplete`], the only status worth retrying on.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CborError::Incomplete)
    }
}

impl From<&str> for CborError {
    fn from(message: &str) -> Self {
        CborError::Custom(message.to_string())
    }
}

impl From<String> for CborError {
    fn from(message: String) -> Self {
        CborError::Custom(message)
    }
}

/// The result type returned by every encode/decode operation in this crate.
pub type Result<T> = StdResult<T, CborError>;
