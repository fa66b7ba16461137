import_stdlib!();

use crate::codec::Decode;
use crate::error::{CborError, Result};
use crate::head::{decode_head, MajorType};
use crate::indefinite::{peek_is_break, read_array_header, Length};

/// One argument slot of a resumable multi-argument decode (component E).
///
/// `Pending` is the "not yet decoded" state; `Done(value)` is permanent once reached — a slot
/// never regresses from `Done` back to `Pending`, which is how completed arguments survive a
/// later argument's `Incomplete` across repeated [`resume`](StreamDecode2::resume) calls.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<T> {
    Pending,
    Done(T),
}

impl<T> Slot<T> {
    fn is_done(&self) -> bool {
        matches!(self, Slot::Done(_))
    }

    fn as_ref(&self) -> Option<&T> {
        match self {
            Slot::Done(v) => Some(v),
            Slot::Pending => None,
        }
    }
}

/// A resumable decode of two independent, unwrapped top-level CBOR items (spec.md §4.E, §8
/// "stream decode rollback").
///
/// Each call to [`resume`](Self::resume) is handed the *entire* buffer decoded so far (the
/// underlying buffer is append-only between resumes, per spec.md §4.E.4) and attempts to make
/// progress on the first argument that hasn't completed yet. An argument either completes —
/// the internal cursor advances past it and its value is stored permanently — or it fails,
/// in which case the cursor is left exactly where it was on entry (nothing was consumed, since
/// the cursor is only ever advanced *after* a successful decode). `CborError::Incomplete` is
/// the only error worth retrying; any other error is terminal for this operation.
#[derive(Debug)]
pub struct StreamDecode2<A, B> {
    cursor: usize,
    a: Slot<A>,
    b: Slot<B>,
}

impl<A: Decode, B: Decode> Default for StreamDecode2<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Decode, B: Decode> StreamDecode2<A, B> {
    /// Starts a new resumable decode with no arguments yet consumed.
    pub fn new() -> Self {
        StreamDecode2 { cursor: 0, a: Slot::Pending, b: Slot::Pending }
    }

    /// Attempts to decode as many of the remaining arguments as `buf` currently allows.
    /// Returns `Ok(())` once every argument is complete; returns `Err` (typically
    /// `CborError::Incomplete`) otherwise, leaving already-completed arguments untouched.
    pub fn resume(&mut self, buf: &[u8]) -> Result<()> {
        if !self.a.is_done() {
            let (value, consumed) = A::decode(&buf[self.cursor..])?;
            self.a = Slot::Done(value);
            self.cursor += consumed;
        }
        if !self.b.is_done() {
            let (value, consumed) = B::decode(&buf[self.cursor..])?;
            self.b = Slot::Done(value);
            self.cursor += consumed;
        }
        Ok(())
    }

    /// True once both arguments have completed.
    pub fn is_complete(&self) -> bool {
        self.a.is_done() && self.b.is_done()
    }

    /// The first argument's decoded value, if it has completed — readable as soon as it
    /// completes, independent of whether the whole operation has (spec.md §8 scenario 6).
    pub fn value_a(&self) -> Option<&A> {
        self.a.as_ref()
    }

    /// The second argument's decoded value, if it has completed.
    pub fn value_b(&self) -> Option<&B> {
        self.b.as_ref()
    }

    /// Consumes the operation, returning both values if it has completed.
    pub fn into_values(self) -> Option<(A, B)> {
        match (self.a, self.b) {
            (Slot::Done(a), Slot::Done(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// A resumable decode of three independent, unwrapped top-level CBOR items. See
/// [`StreamDecode2`] for the resolution contract.
#[derive(Debug)]
pub struct StreamDecode3<A, B, C> {
    cursor: usize,
    a: Slot<A>,
    b: Slot<B>,
    c: Slot<C>,
}

impl<A: Decode, B: Decode, C: Decode> Default for StreamDecode3<A, B, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Decode, B: Decode, C: Decode> StreamDecode3<A, B, C> {
    /// Starts a new resumable decode with no arguments yet consumed.
    pub fn new() -> Self {
        StreamDecode3 { cursor: 0, a: Slot::Pending, b: Slot::Pending, c: Slot::Pending }
    }

    /// See [`StreamDecode2::resume`].
    pub fn resume(&mut self, buf: &[u8]) -> Result<()> {
        if !self.a.is_done() {
            let (value, consumed) = A::decode(&buf[self.cursor..])?;
            self.a = Slot::Done(value);
            self.cursor += consumed;
        }
        if !self.b.is_done() {
            let (value, consumed) = B::decode(&buf[self.cursor..])?;
            self.b = Slot::Done(value);
            self.cursor += consumed;
        }
        if !self.c.is_done() {
            let (value, consumed) = C::decode(&buf[self.cursor..])?;
            self.c = Slot::Done(value);
            self.cursor += consumed;
        }
        Ok(())
    }

    /// True once all three arguments have completed.
    pub fn is_complete(&self) -> bool {
        self.a.is_done() && self.b.is_done() && self.c.is_done()
    }

    /// The first argument's decoded value, if it has completed.
    pub fn value_a(&self) -> Option<&A> {
        self.a.as_ref()
    }

    /// The second argument's decoded value, if it has completed.
    pub fn value_b(&self) -> Option<&B> {
        self.b.as_ref()
    }

    /// The third argument's decoded value, if it has completed.
    pub fn value_c(&self) -> Option<&C> {
        self.c.as_ref()
    }

    /// Consumes the operation, returning all three values if it has completed.
    pub fn into_values(self) -> Option<(A, B, C)> {
        match (self.a, self.b, self.c) {
            (Slot::Done(a), Slot::Done(b), Slot::Done(c)) => Some((a, b, c)),
            _ => None,
        }
    }
}

/// A resumable decode of two arguments that are, as a pair, framed by a single wrapping CBOR
/// array of length 2 (the source API's `wrap_as_array(a, b)`, spec.md §8 scenario 6), rather
/// than being two independent top-level items. The array header itself is the first thing
/// decoded and is subject to the same rollback-on-incomplete rule as every other argument: a
/// truncated header byte leaves the whole operation at its starting cursor.
#[derive(Debug)]
pub struct StreamDecodeWrappedArray2<A, B> {
    header_len: Option<usize>,
    cursor: usize,
    a: Slot<A>,
    b: Slot<B>,
}

impl<A: Decode, B: Decode> Default for StreamDecodeWrappedArray2<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Decode, B: Decode> StreamDecodeWrappedArray2<A, B> {
    /// Starts a new resumable wrapped-array decode.
    pub fn new() -> Self {
        StreamDecodeWrappedArray2 { header_len: None, cursor: 0, a: Slot::Pending, b: Slot::Pending }
    }

    /// See [`StreamDecode2::resume`]. The array-length check (exactly 2) happens as soon as the
    /// header is available; a wire array of the wrong length is a terminal
    /// `CborError::UnexpectedGroupSize`, not a retryable condition.
    pub fn resume(&mut self, buf: &[u8]) -> Result<()> {
        if self.header_len.is_none() {
            let (len, consumed) = read_array_header(&buf[self.cursor..])?;
            match len {
                Length::Definite(2) => {}
                Length::Definite(n) => {
                    return Err(CborError::UnexpectedGroupSize { expected: 2, found: n });
                }
                Length::Indefinite => {
                    return Err(CborError::UnexpectedGroupSize { expected: 2, found: usize::MAX });
                }
            }
            self.header_len = Some(consumed);
            self.cursor += consumed;
        }
        if !self.a.is_done() {
            let (value, consumed) = A::decode(&buf[self.cursor..])?;
            self.a = Slot::Done(value);
            self.cursor += consumed;
        }
        if !self.b.is_done() {
            let (value, consumed) = B::decode(&buf[self.cursor..])?;
            self.b = Slot::Done(value);
            self.cursor += consumed;
        }
        Ok(())
    }

    /// True once both arguments have completed.
    pub fn is_complete(&self) -> bool {
        self.a.is_done() && self.b.is_done()
    }

    /// The first argument's decoded value, if it has completed.
    pub fn value_a(&self) -> Option<&A> {
        self.a.as_ref()
    }

    /// The second argument's decoded value, if it has completed.
    pub fn value_b(&self) -> Option<&B> {
        self.b.as_ref()
    }

    /// Consumes the operation, returning both values if it has completed.
    pub fn into_values(self) -> Option<(A, B)> {
        match (self.a, self.b) {
            (Slot::Done(a), Slot::Done(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// A resumable decode of an indefinite-length array whose already-decoded elements remain
/// visible through [`items`](Self::items) even while [`resume`](Self::resume) is still
/// returning `CborError::Incomplete` (spec.md §8 scenario 4: `9F 01 02` with no break decodes
/// `[1, 2]` but reports incomplete). A plain `Vec<T>` decode can't expose this — its `Result`
/// either returns a complete `Vec` or no `Vec` at all — so this cursor exists specifically to
/// carry partial container state across resumes, the way the source API's out-parameter style
/// does implicitly.
#[derive(Debug)]
pub struct IndefiniteArrayCursor<T> {
    header_consumed: bool,
    cursor: usize,
    items: Vec<T>,
    done: bool,
}

impl<T: Decode> Default for IndefiniteArrayCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Decode> IndefiniteArrayCursor<T> {
    /// Starts a new resumable indefinite-array decode.
    pub fn new() -> Self {
        IndefiniteArrayCursor { header_consumed: false, cursor: 0, items: Vec::new(), done: false }
    }

    /// Advances as far as `buf` currently allows. Returns `Ok(())` once the break byte has been
    /// seen; otherwise returns `CborError::Incomplete` (or a decode error from an element),
    /// leaving every element already read in place.
    pub fn resume(&mut self, buf: &[u8]) -> Result<()> {
        if !self.header_consumed {
            let (head, consumed) = decode_head(&buf[self.cursor..])?;
            if head.major != MajorType::Array || !head.is_indefinite() {
                return Err(CborError::WrongType);
            }
            self.header_consumed = true;
            self.cursor += consumed;
        }
        loop {
            if self.done {
                return Ok(());
            }
            if peek_is_break(&buf[self.cursor..])? {
                let (_, consumed) = decode_head(&buf[self.cursor..])?;
                self.cursor += consumed;
                self.done = true;
                return Ok(());
            }
            let (item, consumed) = T::decode(&buf[self.cursor..])?;
            self.items.push(item);
            self.cursor += consumed;
        }
    }

    /// The elements decoded so far, whether or not the container is complete.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// True once the break byte has been consumed.
    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Consumes the cursor, returning the elements read so far regardless of completion.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
