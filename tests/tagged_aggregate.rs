//! Integration coverage for a tagged aggregate built from the schema markers (component C, F),
//! matching spec.md §8 scenario 5: a user type tagged 700 with schema
//! `(as_array{2}, vec<int>, map<int,string>)`.

use cbor_tags::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Catalog {
    numbers: Vec<i32>,
    labels: BTreeMap<i32, String>,
}

impl Tagged for Catalog {
    const TAG: u64 = 700;
}

impl TaggedBody for Catalog {
    fn encode_body(&self, buf: &mut Vec<u8>) {
        cbor_tags::head::write_head(buf, cbor_tags::head::MajorType::Array, 2);
        self.numbers.encode(buf);
        self.labels.encode(buf);
    }

    fn decode_body(data: &[u8]) -> Result<(Self, usize)> {
        let (len, mut pos) = cbor_tags::indefinite::read_array_header(data)?;
        match len {
            cbor_tags::indefinite::Length::Definite(2) => {}
            cbor_tags::indefinite::Length::Definite(n) => {
                return Err(CborError::UnexpectedGroupSize { expected: 2, found: n });
            }
            cbor_tags::indefinite::Length::Indefinite => {
                return Err(CborError::UnexpectedGroupSize { expected: 2, found: usize::MAX });
            }
        }
        let (numbers, consumed) = Vec::<i32>::decode(&data[pos..])?;
        pos += consumed;
        let (labels, consumed) = BTreeMap::<i32, String>::decode(&data[pos..])?;
        pos += consumed;
        Ok((Catalog { numbers, labels }, pos))
    }
}

tagged_codec!(Catalog);

#[test]
fn tagged_aggregate_starts_with_the_fixed_tag_head_and_round_trips() {
    let mut labels = BTreeMap::new();
    labels.insert(1, "one".to_string());
    labels.insert(2, "two".to_string());

    let original = Catalog { numbers: vec![1, 2, 3], labels };

    let buf = to_vec(&original);
    // spec.md §6: a tagged aggregate with tag 700 starts with `d902bc`.
    assert!(hex::encode(&buf).starts_with("d902bc"));

    let decoded: Catalog = from_slice(&buf).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn decode_without_tag_reads_the_body_directly() {
    let original = Catalog { numbers: vec![42], labels: BTreeMap::new() };
    let buf = to_vec(&original);

    let (_, head_len) = cbor_tags::head::decode_head(&buf).unwrap();
    let (decoded, _): (Catalog, usize) = decode_without_tag(&buf[head_len..]).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn wrong_group_size_is_rejected() {
    let mut buf = Vec::new();
    cbor_tags::head::write_head(&mut buf, cbor_tags::head::MajorType::Tag, Catalog::TAG);
    cbor_tags::head::write_head(&mut buf, cbor_tags::head::MajorType::Array, 3);
    vec![1i32].encode(&mut buf);

    let result: Result<Catalog> = from_slice(&buf);
    assert!(matches!(result, Err(CborError::UnexpectedGroupSize { expected: 2, .. })));
}
