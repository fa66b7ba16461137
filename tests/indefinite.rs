//! Integration coverage for indefinite-length handling (component D), mirroring the original
//! `cbor_tags` test suite's indefinite byte-string and incomplete-container scenarios.

use cbor_tags::prelude::*;
use hex_literal::hex;

/// Scenario 3: `5F 42 01 02 41 03 FF` decodes to `[01, 02, 03]` with success.
#[test]
fn indefinite_byte_string_concatenates_chunks() {
    let data = hex!("5F4201024103FF");
    let (head, head_len) = cbor_tags::head::decode_head(&data).unwrap();
    assert!(head.is_indefinite());
    let (bytes, consumed) = cbor_tags::indefinite::read_indefinite_bytes(&data[head_len..]).unwrap();
    assert_eq!(bytes, vec![0x01, 0x02, 0x03]);
    assert_eq!(head_len + consumed, data.len());
}

/// Scenario 4: `9F 01 02` (no break) decodes into a partial `[1, 2]` but reports incomplete.
#[test]
fn indefinite_array_without_break_reports_incomplete_with_partial_state() {
    let data = hex!("9F0102");
    let mut cursor = IndefiniteArrayCursor::<u32>::new();
    let result = cursor.resume(&data);
    assert_eq!(result, Err(CborError::Incomplete));
    assert_eq!(cursor.items(), &[1, 2]);
    assert!(!cursor.is_complete());
}

#[test]
fn as_indefinite_array_round_trips_through_the_schema_marker() {
    let original = AsIndefiniteArray(vec![10u8, 20, 30]);
    let buf = to_vec(&original);
    assert_eq!(buf[0], 0x9F); // indefinite array opener
    assert_eq!(*buf.last().unwrap(), 0xFF); // break

    let decoded: AsIndefiniteArray<u8> = from_slice(&buf).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn as_maybe_indefinite_accepts_either_form_but_encodes_definite() {
    let original = AsMaybeIndefiniteArray(vec![1u8, 2, 3]);
    let buf = to_vec(&original);
    assert_eq!(buf[0] >> 5, 4); // array major type
    assert_ne!(buf[0] & 0x1F, 31); // not indefinite

    let mut indefinite_buf = Vec::new();
    cbor_tags::head::write_indefinite_head(&mut indefinite_buf, cbor_tags::head::MajorType::Array);
    1u8.encode(&mut indefinite_buf);
    2u8.encode(&mut indefinite_buf);
    3u8.encode(&mut indefinite_buf);
    cbor_tags::head::write_break(&mut indefinite_buf);

    let decoded: AsMaybeIndefiniteArray<u8> = from_slice(&indefinite_buf).unwrap();
    assert_eq!(decoded.0, vec![1, 2, 3]);
}

#[test]
fn as_indefinite_map_round_trips_through_the_schema_marker() {
    let original = AsIndefiniteMap(vec![(1u8, "a".to_string()), (2u8, "b".to_string())]);
    let buf = to_vec(&original);
    assert_eq!(buf[0], 0xBF); // indefinite map opener
    assert_eq!(*buf.last().unwrap(), 0xFF); // break

    let decoded: AsIndefiniteMap<u8, String> = from_slice(&buf).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn write_indefinite_map_round_trips_into_a_btreemap() {
    use std::collections::BTreeMap;

    let mut buf = Vec::new();
    cbor_tags::indefinite::write_indefinite_map(&mut buf, &[(1u32, "one".to_string()), (2u32, "two".to_string())]);

    let decoded: BTreeMap<u32, String> = from_slice(&buf).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(1u32, "one".to_string());
    expected.insert(2u32, "two".to_string());
    assert_eq!(decoded, expected);
}

#[test]
fn nested_indefinite_chunk_inside_indefinite_byte_string_is_rejected() {
    let mut buf = Vec::new();
    cbor_tags::head::write_indefinite_head(&mut buf, cbor_tags::head::MajorType::ByteString);
    cbor_tags::head::write_indefinite_head(&mut buf, cbor_tags::head::MajorType::ByteString);
    cbor_tags::head::write_break(&mut buf);
    cbor_tags::head::write_break(&mut buf);

    let (_, head_len) = cbor_tags::head::decode_head(&buf).unwrap();
    let result = cbor_tags::indefinite::read_indefinite_bytes(&buf[head_len..]);
    assert_eq!(result, Err(CborError::NoMatchForBstrOnBuffer));
}

#[test]
fn odd_indefinite_map_fails_at_the_break_not_eagerly() {
    use std::collections::BTreeMap;

    let mut buf = Vec::new();
    cbor_tags::head::write_indefinite_head(&mut buf, cbor_tags::head::MajorType::Map);
    1u32.encode(&mut buf);
    2u32.encode(&mut buf);
    3u32.encode(&mut buf); // unpaired key
    cbor_tags::head::write_break(&mut buf);

    let result: Result<BTreeMap<u32, u32>> = from_slice(&buf);
    assert!(matches!(result, Err(CborError::UnexpectedGroupSize { .. })));
}
