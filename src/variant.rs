import_stdlib!();

use crate::codec::{Decode, Encode};
use crate::error::{CborError, Result};

/// A sum type over two alternatives, resolved by trying `A` first and `B` second.
///
/// Resolution is ordered, first-match-wins: decoding tries `A::decode` against the wire item,
/// and only falls through to `B::decode` if that attempt fails for a reason *other than*
/// truncation. This is a deliberate, documented wart (spec.md §9): if `A` and `B` can both
/// decode the same wire shape (most commonly, an integer-carrying alternative declared before
/// an enum that also happens to encode as an integer), the second alternative becomes
/// unreachable. This crate does not attempt to detect or warn about that — declaration order is
/// the whole contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant2<A, B> {
    /// The first alternative matched.
    A(A),
    /// The second alternative matched.
    B(B),
}

/// A sum type over three alternatives. See [`Variant2`] for the resolution rule; here the order
/// is `A`, then `B`, then `C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant3<A, B, C> {
    /// The first alternative matched.
    A(A),
    /// The second alternative matched.
    B(B),
    /// The third alternative matched.
    C(C),
}

impl<A: Encode, B: Encode> Encode for Variant2<A, B> {
    fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            Variant2::A(v) => v.encode(buf),
            Variant2::B(v) => v.encode(buf),
        }
    }
}

impl<A: Decode, B: Decode> Decode for Variant2<A, B> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        match A::decode(data) {
            Ok((v, n)) => return Ok((Variant2::A(v), n)),
            Err(e) if e.is_incomplete() => return Err(e),
            Err(_) => {}
        }
        match B::decode(data) {
            Ok((v, n)) => Ok((Variant2::B(v), n)),
            Err(e) if e.is_incomplete() => Err(e),
            Err(_) => Err(CborError::VariantExhausted),
        }
    }
}

impl<A: Encode, B: Encode, C: Encode> Encode for Variant3<A, B, C> {
    fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            Variant3::A(v) => v.encode(buf),
            Variant3::B(v) => v.encode(buf),
            Variant3::C(v) => v.encode(buf),
        }
    }
}

impl<A: Decode, B: Decode, C: Decode> Decode for Variant3<A, B, C> {
    fn decode(data: &[u8]) -> Result<(Self, usize)> {
        match A::decode(data) {
            Ok((v, n)) => return Ok((Variant3::A(v), n)),
            Err(e) if e.is_incomplete() => return Err(e),
            Err(_) => {}
        }
        match B::decode(data) {
            Ok((v, n)) => return Ok((Variant3::B(v), n)),
            Err(e) if e.is_incomplete() => return Err(e),
            Err(_) => {}
        }
        match C::decode(data) {
            Ok((v, n)) => Ok((Variant3::C(v), n)),
            Err(e) if e.is_incomplete() => Err(e),
            Err(_) => Err(CborError::VariantExhausted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::to_vec;

    #[test]
    fn first_match_wins_on_disjoint_shapes() {
        let buf = to_vec(&true);
        let v: Variant2<bool, u32> = crate::codec::from_slice(&buf).unwrap();
        assert_eq!(v, Variant2::A(true));

        let buf = to_vec(&7u32);
        let v: Variant2<bool, u32> = crate::codec::from_slice(&buf).unwrap();
        assert_eq!(v, Variant2::B(7));
    }

    #[test]
    fn integer_before_enum_shadows_it() {
        // Both alternatives can decode an unsigned integer; declaring u32 first means the
        // second alternative is never reached for any wire value u32 can hold.
        let buf = to_vec(&7u32);
        let v: Variant2<u32, u8> = crate::codec::from_slice(&buf).unwrap();
        assert_eq!(v, Variant2::A(7));
    }

    #[test]
    fn exhausted_when_nothing_matches() {
        let buf = to_vec(&"hello".to_string());
        let result: Result<(Variant2<bool, u32>, usize)> = Decode::decode(&buf);
        assert_eq!(result, Err(CborError::VariantExhausted));
    }

    #[test]
    fn incomplete_propagates_instead_of_falling_through() {
        // A truncated u32 head looks incomplete to both alternatives; the caller should see
        // Incomplete, not a false VariantExhausted.
        let mut buf = Vec::new();
        1000u32.encode(&mut buf);
        buf.truncate(buf.len() - 1);
        let result: Result<(Variant2<u32, bool>, usize)> = Decode::decode(&buf);
        assert_eq!(result, Err(CborError::Incomplete));
    }
}
