// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Value byte sources for cell construction.
//!
//! A cell value can arrive as a contiguous slice, as a chunked sequence
//! of slices, or as a length-prefixed run inside a wire buffer. All
//! three normalize to identical encoded bytes; callers pick whichever
//! kind avoids a copy on their path. Sources are consumed by the cell
//! factories and never retained afterward.

use super::error::CellError;

/// A read-only run of bytes supplied to a cell factory.
#[derive(Debug, Clone, Copy)]
pub enum ValueSource<'a> {
    /// A single contiguous run.
    Contiguous(&'a [u8]),
    /// An ordered sequence of fragments, logically concatenated.
    Chunked(&'a [&'a [u8]]),
    /// A length-prefixed run parsed out of a wire buffer.
    Wire(WireValue<'a>),
}

impl ValueSource<'_> {
    /// Total length of the value in bytes.
    pub fn len(&self) -> usize {
        match self {
            ValueSource::Contiguous(bytes) => bytes.len(),
            ValueSource::Chunked(fragments) => fragments.iter().map(|f| f.len()).sum(),
            ValueSource::Wire(wire) => wire.as_bytes().len(),
        }
    }

    /// Returns true if the value has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the value bytes to `out`, in order.
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            ValueSource::Contiguous(bytes) => out.extend_from_slice(bytes),
            ValueSource::Chunked(fragments) => {
                for fragment in *fragments {
                    out.extend_from_slice(fragment);
                }
            }
            ValueSource::Wire(wire) => out.extend_from_slice(wire.as_bytes()),
        }
    }
}

impl<'a> From<&'a [u8]> for ValueSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ValueSource::Contiguous(bytes)
    }
}

impl<'a> From<&'a [&'a [u8]]> for ValueSource<'a> {
    fn from(fragments: &'a [&'a [u8]]) -> Self {
        ValueSource::Chunked(fragments)
    }
}

impl<'a> From<WireValue<'a>> for ValueSource<'a> {
    fn from(wire: WireValue<'a>) -> Self {
        ValueSource::Wire(wire)
    }
}

/// A length-prefixed value run inside a larger wire buffer.
///
/// Format: `[len: u32 BE][len value bytes]`. Parsing validates the
/// length prefix against the buffer before deriving any offset.
#[derive(Debug, Clone, Copy)]
pub struct WireValue<'a> {
    bytes: &'a [u8],
}

impl<'a> WireValue<'a> {
    /// Parses a value run from the front of `buf`, returning the view
    /// and the unconsumed remainder of the buffer.
    pub fn parse(buf: &'a [u8]) -> Result<(Self, &'a [u8]), CellError> {
        if buf.len() < 4 {
            return Err(CellError::Truncated {
                needed: 4,
                got: buf.len(),
            });
        }
        let claimed = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        let available = buf.len() - 4;
        if claimed > available {
            return Err(CellError::TruncatedWireValue { claimed, available });
        }
        let bytes = &buf[4..4 + claimed];
        Ok((Self { bytes }, &buf[4 + claimed..]))
    }

    /// The value bytes, without the length prefix.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_len_and_bytes() {
        let source = ValueSource::from(&b"hello"[..]);
        assert_eq!(source.len(), 5);
        assert!(!source.is_empty());

        let mut out = Vec::new();
        source.write_to(&mut out);
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_chunked_concatenates_in_order() {
        let fragments: &[&[u8]] = &[b"he", b"l", b"", b"lo"];
        let source = ValueSource::from(fragments);
        assert_eq!(source.len(), 5);

        let mut out = Vec::new();
        source.write_to(&mut out);
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_empty_sources() {
        assert!(ValueSource::from(&b""[..]).is_empty());

        let no_fragments: &[&[u8]] = &[];
        assert!(ValueSource::from(no_fragments).is_empty());
    }

    #[test]
    fn test_wire_parse_roundtrip() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&5u32.to_be_bytes());
        buf.extend_from_slice(b"hello");
        buf.extend_from_slice(b"rest");

        let (wire, rest) = WireValue::parse(&buf).unwrap();
        assert_eq!(wire.as_bytes(), b"hello");
        assert_eq!(rest, b"rest");
    }

    #[test]
    fn test_wire_parse_empty_value() {
        let buf = 0u32.to_be_bytes();
        let (wire, rest) = WireValue::parse(&buf).unwrap();
        assert!(wire.as_bytes().is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_wire_parse_short_prefix() {
        let result = WireValue::parse(&[0, 0, 1]);
        assert!(matches!(result, Err(CellError::Truncated { .. })));
    }

    #[test]
    fn test_wire_parse_claims_too_much() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&10u32.to_be_bytes());
        buf.extend_from_slice(b"abc");

        let result = WireValue::parse(&buf);
        assert!(matches!(
            result,
            Err(CellError::TruncatedWireValue {
                claimed: 10,
                available: 3
            })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn chunked_matches_contiguous(
            bytes in prop::collection::vec(any::<u8>(), 0..200),
            split_points in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
        ) {
            let mut cuts: Vec<usize> = split_points.iter().map(|i| i.index(bytes.len() + 1)).collect();
            cuts.push(0);
            cuts.push(bytes.len());
            cuts.sort_unstable();
            cuts.dedup();

            let fragments: Vec<&[u8]> =
                cuts.windows(2).map(|w| &bytes[w[0]..w[1]]).collect();

            let contiguous = ValueSource::from(bytes.as_slice());
            let chunked = ValueSource::from(fragments.as_slice());
            prop_assert_eq!(contiguous.len(), chunked.len());

            let mut from_contiguous = Vec::new();
            contiguous.write_to(&mut from_contiguous);
            let mut from_chunked = Vec::new();
            chunked.write_to(&mut from_chunked);
            prop_assert_eq!(from_contiguous, from_chunked);
        }

        #[test]
        fn wire_roundtrip(
            bytes in prop::collection::vec(any::<u8>(), 0..200),
            trailer in prop::collection::vec(any::<u8>(), 0..50),
        ) {
            let mut buf = Vec::new();
            buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            buf.extend_from_slice(&bytes);
            buf.extend_from_slice(&trailer);

            let (wire, rest) = WireValue::parse(&buf).unwrap();
            prop_assert_eq!(wire.as_bytes(), bytes.as_slice());
            prop_assert_eq!(rest, trailer.as_slice());
        }
    }
}
