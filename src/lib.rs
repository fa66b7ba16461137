#![cfg_attr(not(feature = "std"), no_std)]
#![warn(rust_2018_idioms)]

//! # cbor-tags: a type-driven CBOR codec
//!
//! `cbor_tags` is a [CBOR](https://cbor.io) ([RFC 8949](https://www.rfc-editor.org/rfc/rfc8949))
//! encoder/decoder built around one idea: the wire shape of a value is determined entirely by
//! its Rust type, with no intermediate document tree standing between a value and its bytes.
//! Encoding a `u32` writes a CBOR unsigned integer; encoding a `Vec<T>` writes a CBOR array of
//! `T`'s encoding; decoding asks a type directly to read itself off the front of a byte slice.
//!
//! This is a deliberately different design point from a symbolic `CBOR` enum you pattern-match
//! against after the fact — there is no such enum here, and no dynamic lookup of "what kind of
//! item is this" beyond peeking one head to resolve a [`Variant2`]/[`Variant3`] alternative or
//! an [`Option`].
//!
//! # Getting started
//!
//! ```toml
//! [dependencies]
//! cbor-tags = "0.1"
//! ```
//!
//! ```
//! use cbor_tags::prelude::*;
//!
//! let buf = to_vec(&vec![1000u32, 2000, 3000]);
//! assert_eq!(hex::encode(&buf), "831903e81907d0190bb8");
//!
//! let decoded: Vec<u32> = from_slice(&buf).unwrap();
//! assert_eq!(decoded, vec![1000, 2000, 3000]);
//! ```
//!
//! # Layout
//!
//! - [`integer`]: the `Positive`/`Negative`/`Integer` arithmetic domain spanning CBOR's full
//!   65-bit integer range.
//! - [`head`]: the 1-byte-plus-argument CBOR "head" that introduces every item, and its
//!   minimal-width encode/decode.
//! - [`float`]: half/single/double float payloads, with canonical NaN on encode.
//! - [`primitive`]: byte string, text string, and simple-value (`bool`/`null`/`undefined`)
//!   payloads.
//! - [`indefinite`]: indefinite-length byte/text string chunking and indefinite array/map
//!   headers.
//! - [`codec`]: the [`Encode`]/[`Decode`] traits and their implementations for the primitive
//!   and standard-library types this crate ships support for.
//! - [`schema`]: the `as_array{N}`/`as_map{N}`/`as_indefinite`/`as_maybe_indefinite` aggregate
//!   schema markers a user type's hand-written `Encode`/`Decode` impl composes.
//! - [`tag`]: the compile-time tag registry ([`Tagged`], [`TaggedBody`]), the `TaggedValue<T>`
//!   ad hoc wrapper, and the [`tagged_codec!`] macro a [`TaggedBody`] type uses to pick up its
//!   `Encode`/`Decode` impl.
//! - [`variant`]: ordered-alternative sum types ([`Variant2`], [`Variant3`]).
//! - [`stream`]: the resumable, rollback-safe streaming decode engine.
//! - [`error`]: the [`CborError`] status-code enum every fallible operation returns.

#[macro_use]
mod stdlib;

pub mod error;
pub mod head;
pub mod integer;
pub mod float;
pub mod primitive;
pub mod indefinite;
pub mod codec;
pub mod schema;
pub mod tag;
pub mod variant;
pub mod stream;

pub mod prelude;

pub use codec::{from_slice, to_vec, Decode, Encode};
pub use error::{CborError, Result};
pub use integer::{CborNegExt, Integer, Negative, Positive};
pub use tag::{decode_tagged, decode_without_tag, encode_tagged, tag_of, Tag, Tagged, TaggedBody, TaggedValue};
pub use variant::{Variant2, Variant3};
