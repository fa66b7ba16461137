import_stdlib!();

use crate::codec::{Decode, Encode};
use crate::error::{CborError, Result};
use crate::head::{decode_head, write_break, write_head, write_indefinite_head, HeadArg, MajorType};
use crate::indefinite::{peek_is_break, Length};

/// A fixed-size, definite-length array schema marker (`as_array{N}`): wraps exactly `N` items
/// and rejects any wire array whose count doesn't match `N`, definite or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsArray<const N: usize, T>(pub [T; N]);

impl<const N: usize, T: Encode> Encode for AsArray<N, T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_head(buf, MajorType::Array, N as u64);
        for item in &self.0 {
            item.encode(buf);
        }
    }
}

impl<const N: usize, T: Decode> Decode for AsArray<N, T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, mut pos) = decode_head(data)?;
        if head.major != MajorType::Array {
            return Err(CborError::UnexpectedMajorType { expected: MajorType::Array, found: head.major });
        }
        let len = head.value()? as usize;
        if len != N {
            return Err(CborError::UnexpectedGroupSize { expected: N, found: len });
        }
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            let (item, consumed) = T::decode(&data[pos..])?;
            items.push(item);
            pos += consumed;
        }
        let array: [T; N] = match items.try_into() {
            Ok(a) => a,
            Err(_) => return Err(CborError::WrongType),
        };
        Ok((AsArray(array), pos))
    }
}

/// A fixed-size, definite-length map schema marker (`as_map{N}`): wraps exactly `N` key/value
/// pairs and rejects any wire map whose pair count doesn't match `N`, definite or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsMap<const N: usize, K, V>(pub [(K, V); N]);

impl<const N: usize, K: Encode, V: Encode> Encode for AsMap<N, K, V> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_head(buf, MajorType::Map, N as u64);
        for (k, v) in &self.0 {
            k.encode(buf);
            v.encode(buf);
        }
    }
}

impl<const N: usize, K: Decode, V: Decode> Decode for AsMap<N, K, V> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, mut pos) = decode_head(data)?;
        if head.major != MajorType::Map {
            return Err(CborError::UnexpectedMajorType { expected: MajorType::Map, found: head.major });
        }
        let len = head.value()? as usize;
        if len != N {
            return Err(CborError::UnexpectedGroupSize { expected: N, found: len });
        }
        let mut pairs = Vec::with_capacity(N);
        for _ in 0..N {
            let (key, consumed) = K::decode(&data[pos..])?;
            pos += consumed;
            let (value, consumed) = V::decode(&data[pos..])?;
            pos += consumed;
            pairs.push((key, value));
        }
        let array: [(K, V); N] = match pairs.try_into() {
            Ok(a) => a,
            Err(_) => return Err(CborError::WrongType),
        };
        Ok((AsMap(array), pos))
    }
}

/// Forces indefinite-length encoding for a wrapped array (`as_indefinite{v}`). Decoding
/// rejects a definite-length wire array: this marker is for schemas that specifically need to
/// assert the indefinite form was used, as opposed to [`AsMaybeIndefiniteArray`] which tolerates
/// either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsIndefiniteArray<T>(pub Vec<T>);

impl<T: Encode> Encode for AsIndefiniteArray<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_indefinite_head(buf, MajorType::Array);
        for item in &self.0 {
            item.encode(buf);
        }
        write_break(buf);
    }
}

impl<T: Decode> Decode for AsIndefiniteArray<T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, mut pos) = decode_head(data)?;
        if head.major != MajorType::Array || !head.is_indefinite() {
            return Err(CborError::WrongType);
        }
        let mut items = Vec::new();
        loop {
            if peek_is_break(&data[pos..])? {
                let (_, consumed) = decode_head(&data[pos..])?;
                pos += consumed;
                break;
            }
            let (item, consumed) = T::decode(&data[pos..])?;
            items.push(item);
            pos += consumed;
        }
        Ok((AsIndefiniteArray(items), pos))
    }
}

/// Tolerates either definite- or indefinite-length arrays on decode (`as_maybe_indefinite{v}`),
/// always writing the definite form on encode. This is the schema-level name for the behavior
/// [`Vec<T>`](crate::codec) already has by default; this wrapper exists so a schema can name the
/// tolerance explicitly even when the underlying field type is something other than `Vec<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsMaybeIndefiniteArray<T>(pub Vec<T>);

impl<T: Encode> Encode for AsMaybeIndefiniteArray<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.0.encode(buf);
    }
}

impl<T: Decode> Decode for AsMaybeIndefiniteArray<T> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (items, consumed) = Vec::<T>::decode(data)?;
        Ok((AsMaybeIndefiniteArray(items), consumed))
    }
}

/// Forces indefinite-length encoding for a wrapped map (`as_indefinite{v}`), the map analogue of
/// [`AsIndefiniteArray`]. Decoding rejects a definite-length wire map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsIndefiniteMap<K, V>(pub Vec<(K, V)>);

impl<K: Encode, V: Encode> Encode for AsIndefiniteMap<K, V> {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_indefinite_head(buf, MajorType::Map);
        for (key, value) in &self.0 {
            key.encode(buf);
            value.encode(buf);
        }
        write_break(buf);
    }
}

impl<K: Decode, V: Decode> Decode for AsIndefiniteMap<K, V> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, mut pos) = decode_head(data)?;
        if head.major != MajorType::Map || !head.is_indefinite() {
            return Err(CborError::WrongType);
        }
        let mut pairs = Vec::new();
        loop {
            if peek_is_break(&data[pos..])? {
                let (_, consumed) = decode_head(&data[pos..])?;
                pos += consumed;
                break;
            }
            let (key, consumed) = K::decode(&data[pos..])?;
            pos += consumed;
            // As with the `BTreeMap` indefinite decode path, an unpaired key is only
            // detectable once no value follows it and a break arrives instead.
            if peek_is_break(&data[pos..])? {
                return Err(CborError::UnexpectedGroupSize { expected: 2, found: 1 });
            }
            let (value, consumed) = V::decode(&data[pos..])?;
            pos += consumed;
            pairs.push((key, value));
        }
        Ok((AsIndefiniteMap(pairs), pos))
    }
}

/// Tolerates either definite- or indefinite-length maps on decode (`as_maybe_indefinite{v}`),
/// always writing the definite form on encode. This is the schema-level name for the behavior
/// [`BTreeMap<K, V>`](crate::codec) already has by default; this wrapper exists so a schema can
/// name the tolerance explicitly even when the underlying field type is something other than a
/// `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsMaybeIndefiniteMap<K: Ord, V>(pub BTreeMap<K, V>);

impl<K: Encode + Ord, V: Encode> Encode for AsMaybeIndefiniteMap<K, V> {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.0.encode(buf);
    }
}

impl<K: Decode + Ord, V: Decode> Decode for AsMaybeIndefiniteMap<K, V> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (map, consumed) = BTreeMap::<K, V>::decode(data)?;
        Ok((AsMaybeIndefiniteMap(map), consumed))
    }
}

/// Forces indefinite-length encoding for a wrapped text string (`as_indefinite{v}`). Decoding
/// rejects a definite-length wire text string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsIndefiniteText(pub String);

impl Encode for AsIndefiniteText {
    fn encode(&self, buf: &mut Vec<u8>) {
        crate::indefinite::write_indefinite_text(buf, &self.0);
    }
}

impl Decode for AsIndefiniteText {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, pos) = decode_head(data)?;
        if head.major != MajorType::Text || !head.is_indefinite() {
            return Err(CborError::WrongType);
        }
        let (text, consumed) = crate::indefinite::read_indefinite_text(&data[pos..])?;
        Ok((AsIndefiniteText(text), pos + consumed))
    }
}

/// Tolerates either definite- or indefinite-length text strings on decode
/// (`as_maybe_indefinite{v}`), always writing the definite form on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsMaybeIndefiniteText(pub String);

impl Encode for AsMaybeIndefiniteText {
    fn encode(&self, buf: &mut Vec<u8>) {
        crate::primitive::write_text(buf, &self.0);
    }
}

impl Decode for AsMaybeIndefiniteText {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (head, head_len) = decode_head(data)?;
        if head.major != MajorType::Text {
            return Err(CborError::UnexpectedMajorType { expected: MajorType::Text, found: head.major });
        }
        if head.is_indefinite() {
            let (text, consumed) = crate::indefinite::read_indefinite_text(&data[head_len..])?;
            Ok((AsMaybeIndefiniteText(text), head_len + consumed))
        } else {
            let (text, consumed) = crate::primitive::read_text(data)?;
            Ok((AsMaybeIndefiniteText(text.to_string()), consumed))
        }
    }
}

/// Reads a definite or indefinite array header and returns its [`Length`], for schema code that
/// wants to branch on the form actually present rather than delegate straight to a [`Vec`] or
/// [`AsArray`]/[`AsIndefiniteArray`] wrapper.
pub fn array_length(data: &[u8]) -> Result<(Length, usize)> {
    let (head, consumed) = decode_head(data)?;
    if head.major != MajorType::Array {
        return Err(CborError::UnexpectedMajorType { expected: MajorType::Array, found: head.major });
    }
    match head.arg {
        HeadArg::Value(v) => Ok((Length::Definite(v as usize), consumed)),
        HeadArg::Indefinite => Ok((Length::Indefinite, consumed)),
        HeadArg::Break => Err(CborError::WrongType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_slice, to_vec};

    #[test]
    fn as_array_rejects_wrong_length() {
        let v = vec![1u8, 2, 3];
        let buf = to_vec(&v);
        let result: Result<AsArray<2, u8>> = from_slice(&buf);
        assert!(matches!(result, Err(CborError::UnexpectedGroupSize { expected: 2, found: 3 })));
    }

    #[test]
    fn as_array_round_trip() {
        let original = AsArray([1u32, 2, 3]);
        let buf = to_vec(&original);
        let decoded: AsArray<3, u32> = from_slice(&buf).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn as_map_round_trip() {
        let original = AsMap([(1u8, "a".to_string()), (2u8, "b".to_string())]);
        let buf = to_vec(&original);
        let decoded: AsMap<2, u8, String> = from_slice(&buf).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn as_indefinite_array_round_trip_and_rejects_definite() {
        let original = AsIndefiniteArray(vec![1u8, 2, 3]);
        let buf = to_vec(&original);
        let decoded: AsIndefiniteArray<u8> = from_slice(&buf).unwrap();
        assert_eq!(decoded, original);

        let definite_buf = to_vec(&vec![1u8, 2, 3]);
        let result: Result<AsIndefiniteArray<u8>> = from_slice(&definite_buf);
        assert!(result.is_err());
    }

    #[test]
    fn as_maybe_indefinite_array_accepts_both_forms() {
        let mut indefinite_buf = Vec::new();
        write_indefinite_head(&mut indefinite_buf, MajorType::Array);
        1u8.encode(&mut indefinite_buf);
        write_break(&mut indefinite_buf);

        let decoded: AsMaybeIndefiniteArray<u8> = from_slice(&indefinite_buf).unwrap();
        assert_eq!(decoded.0, vec![1u8]);

        let definite_buf = to_vec(&vec![1u8]);
        let decoded: AsMaybeIndefiniteArray<u8> = from_slice(&definite_buf).unwrap();
        assert_eq!(decoded.0, vec![1u8]);
    }

    #[test]
    fn as_indefinite_map_round_trip_and_rejects_definite() {
        let original = AsIndefiniteMap(vec![(1u8, "a".to_string()), (2u8, "b".to_string())]);
        let buf = to_vec(&original);
        assert!(crate::head::decode_head(&buf).unwrap().0.is_indefinite());
        let decoded: AsIndefiniteMap<u8, String> = from_slice(&buf).unwrap();
        assert_eq!(decoded, original);

        let definite_buf = to_vec(&AsMap([(1u8, "a".to_string()), (2u8, "b".to_string())]));
        let result: Result<AsIndefiniteMap<u8, String>> = from_slice(&definite_buf);
        assert!(result.is_err());
    }

    #[test]
    fn as_indefinite_map_rejects_odd_pair_count() {
        let mut buf = Vec::new();
        write_indefinite_head(&mut buf, MajorType::Map);
        1u8.encode(&mut buf);
        write_break(&mut buf);

        let result: Result<AsIndefiniteMap<u8, String>> = from_slice(&buf);
        assert!(matches!(result, Err(CborError::UnexpectedGroupSize { expected: 2, found: 1 })));
    }

    #[test]
    fn as_maybe_indefinite_map_accepts_both_forms() {
        let mut indefinite_buf = Vec::new();
        write_indefinite_head(&mut indefinite_buf, MajorType::Map);
        1u8.encode(&mut indefinite_buf);
        "a".to_string().encode(&mut indefinite_buf);
        write_break(&mut indefinite_buf);

        let decoded: AsMaybeIndefiniteMap<u8, String> = from_slice(&indefinite_buf).unwrap();
        assert_eq!(decoded.0.get(&1u8), Some(&"a".to_string()));

        let mut expected = BTreeMap::new();
        expected.insert(1u8, "a".to_string());
        let definite_buf = to_vec(&expected);
        let decoded: AsMaybeIndefiniteMap<u8, String> = from_slice(&definite_buf).unwrap();
        assert_eq!(decoded.0, expected);

        // Encoding always produces the definite form.
        assert!(!crate::head::decode_head(&to_vec(&decoded)).unwrap().0.is_indefinite());
    }

    #[test]
    fn as_indefinite_text_round_trip_and_rejects_definite() {
        let original = AsIndefiniteText("hi".to_string());
        let buf = to_vec(&original);
        assert!(crate::head::decode_head(&buf).unwrap().0.is_indefinite());
        let decoded: AsIndefiniteText = from_slice(&buf).unwrap();
        assert_eq!(decoded, original);

        let definite_buf = to_vec(&"hi".to_string());
        let result: Result<AsIndefiniteText> = from_slice(&definite_buf);
        assert!(result.is_err());
    }

    #[test]
    fn as_maybe_indefinite_text_accepts_both_forms() {
        let mut indefinite_buf = Vec::new();
        crate::indefinite::write_indefinite_text(&mut indefinite_buf, "hi");

        let decoded: AsMaybeIndefiniteText = from_slice(&indefinite_buf).unwrap();
        assert_eq!(decoded.0, "hi");

        let definite_buf = to_vec(&"hi".to_string());
        let decoded: AsMaybeIndefiniteText = from_slice(&definite_buf).unwrap();
        assert_eq!(decoded.0, "hi");

        // Encoding always produces the definite form.
        assert!(!crate::head::decode_head(&to_vec(&decoded)).unwrap().0.is_indefinite());
    }
}
