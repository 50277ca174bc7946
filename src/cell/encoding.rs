// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Cell binary encoding.
//!
//! Format: `[flags: u8][timestamp: i64 BE][tag-dependent payload]`
//!
//! - dead: `[deletion_time: u64 BE]` (17 bytes total)
//! - counter update: `[delta: i64 BE]` (17 bytes total)
//! - live, expiring: `[expiry: u64 BE][ttl: u64 BE][value bytes]`
//! - live, plain: `[value bytes]`
//!
//! Big-endian fixed-width fields keep the layout identical on every
//! cluster member. The validator checks the flag byte and the exact or
//! minimum length for the tag before any derived offset is trusted.

use super::error::CellError;
use super::source::ValueSource;
use super::{GcSeconds, TtlSeconds, WriteTimestamp};

/// Set when the cell is live; clear for tombstones.
pub(crate) const FLAG_LIVE: u8 = 0x01;
/// Set when a live cell carries an expiry/ttl pair.
pub(crate) const FLAG_HAS_TTL: u8 = 0x02;
/// Set when a live cell is a counter update.
pub(crate) const FLAG_COUNTER_UPDATE: u8 = 0x04;

const FLAG_MASK: u8 = FLAG_LIVE | FLAG_HAS_TTL | FLAG_COUNTER_UPDATE;

pub(crate) const TIMESTAMP_OFFSET: usize = 1;
/// Offset of the first tag-dependent field (deletion time, delta,
/// expiry, or value).
pub(crate) const PAYLOAD_OFFSET: usize = 9;
pub(crate) const TTL_OFFSET: usize = 17;
/// Offset of the value bytes in an expiring live cell.
pub(crate) const EXPIRING_VALUE_OFFSET: usize = 25;

const DEAD_SIZE: usize = 17;
const COUNTER_SIZE: usize = 17;

fn header(flags: u8, timestamp: WriteTimestamp, capacity: usize) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(capacity);
    encoded.push(flags);
    encoded.extend_from_slice(&timestamp.to_be_bytes());
    encoded
}

pub(crate) fn encode_dead(timestamp: WriteTimestamp, deletion_time: GcSeconds) -> Vec<u8> {
    let mut encoded = header(0, timestamp, DEAD_SIZE);
    encoded.extend_from_slice(&deletion_time.to_be_bytes());
    encoded
}

pub(crate) fn encode_live(timestamp: WriteTimestamp, value: &ValueSource<'_>) -> Vec<u8> {
    let mut encoded = header(FLAG_LIVE, timestamp, PAYLOAD_OFFSET + value.len());
    value.write_to(&mut encoded);
    encoded
}

pub(crate) fn encode_live_expiring(
    timestamp: WriteTimestamp,
    value: &ValueSource<'_>,
    expiry: GcSeconds,
    ttl: TtlSeconds,
) -> Vec<u8> {
    let mut encoded = header(
        FLAG_LIVE | FLAG_HAS_TTL,
        timestamp,
        EXPIRING_VALUE_OFFSET + value.len(),
    );
    encoded.extend_from_slice(&expiry.to_be_bytes());
    encoded.extend_from_slice(&ttl.to_be_bytes());
    value.write_to(&mut encoded);
    encoded
}

pub(crate) fn encode_counter_update(timestamp: WriteTimestamp, delta: i64) -> Vec<u8> {
    let mut encoded = header(FLAG_LIVE | FLAG_COUNTER_UPDATE, timestamp, COUNTER_SIZE);
    encoded.extend_from_slice(&delta.to_be_bytes());
    encoded
}

/// Validates the structure of an encoded cell.
///
/// Checks the flag byte and the buffer length for the tag it announces,
/// so accessors can read fixed offsets without further bounds checks.
pub(crate) fn validate(data: &[u8]) -> Result<(), CellError> {
    if data.len() < PAYLOAD_OFFSET {
        return Err(CellError::Truncated {
            needed: PAYLOAD_OFFSET,
            got: data.len(),
        });
    }
    let flags = data[0];
    if flags & !FLAG_MASK != 0 {
        return Err(CellError::CorruptEncoding(format!(
            "unknown flag bits 0x{flags:02x}"
        )));
    }
    let live = flags & FLAG_LIVE != 0;
    let has_ttl = flags & FLAG_HAS_TTL != 0;
    let counter = flags & FLAG_COUNTER_UPDATE != 0;

    if !live {
        if has_ttl || counter {
            return Err(CellError::CorruptEncoding(format!(
                "tombstone with live-only flag bits 0x{flags:02x}"
            )));
        }
        if data.len() != DEAD_SIZE {
            return Err(CellError::CorruptEncoding(format!(
                "tombstone must be {DEAD_SIZE} bytes, got {}",
                data.len()
            )));
        }
        return Ok(());
    }
    if counter {
        if has_ttl {
            return Err(CellError::CorruptEncoding(
                "counter update with ttl flag".to_string(),
            ));
        }
        if data.len() != COUNTER_SIZE {
            return Err(CellError::CorruptEncoding(format!(
                "counter update must be {COUNTER_SIZE} bytes, got {}",
                data.len()
            )));
        }
        return Ok(());
    }
    if has_ttl && data.len() < EXPIRING_VALUE_OFFSET {
        return Err(CellError::Truncated {
            needed: EXPIRING_VALUE_OFFSET,
            got: data.len(),
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn read_i64(data: &[u8], offset: usize) -> i64 {
    i64::from_be_bytes(data[offset..offset + 8].try_into().unwrap())
}

#[inline]
pub(crate) fn read_u64(data: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes(data[offset..offset + 8].try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_layout() {
        let encoded = encode_dead(42, 1000);
        assert_eq!(encoded.len(), DEAD_SIZE);
        assert_eq!(encoded[0], 0);
        assert_eq!(read_i64(&encoded, TIMESTAMP_OFFSET), 42);
        assert_eq!(read_u64(&encoded, PAYLOAD_OFFSET), 1000);
        validate(&encoded).unwrap();
    }

    #[test]
    fn test_live_layout() {
        let encoded = encode_live(-7, &ValueSource::from(&b"xyz"[..]));
        assert_eq!(encoded.len(), PAYLOAD_OFFSET + 3);
        assert_eq!(encoded[0], FLAG_LIVE);
        assert_eq!(read_i64(&encoded, TIMESTAMP_OFFSET), -7);
        assert_eq!(&encoded[PAYLOAD_OFFSET..], b"xyz");
        validate(&encoded).unwrap();
    }

    #[test]
    fn test_expiring_layout() {
        let encoded = encode_live_expiring(5, &ValueSource::from(&b"v"[..]), 100, 10);
        assert_eq!(encoded.len(), EXPIRING_VALUE_OFFSET + 1);
        assert_eq!(encoded[0], FLAG_LIVE | FLAG_HAS_TTL);
        assert_eq!(read_u64(&encoded, PAYLOAD_OFFSET), 100);
        assert_eq!(read_u64(&encoded, TTL_OFFSET), 10);
        assert_eq!(&encoded[EXPIRING_VALUE_OFFSET..], b"v");
        validate(&encoded).unwrap();
    }

    #[test]
    fn test_counter_layout() {
        let encoded = encode_counter_update(5, -3);
        assert_eq!(encoded.len(), COUNTER_SIZE);
        assert_eq!(encoded[0], FLAG_LIVE | FLAG_COUNTER_UPDATE);
        assert_eq!(read_i64(&encoded, PAYLOAD_OFFSET), -3);
        validate(&encoded).unwrap();
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        assert!(matches!(
            validate(&[FLAG_LIVE, 0, 0]),
            Err(CellError::Truncated { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_flags() {
        let mut encoded = encode_live(1, &ValueSource::from(&b"x"[..]));
        encoded[0] |= 0x80;
        assert!(matches!(
            validate(&encoded),
            Err(CellError::CorruptEncoding(_))
        ));
    }

    #[test]
    fn test_validate_rejects_tombstone_with_ttl_flag() {
        let mut encoded = encode_dead(1, 100);
        encoded[0] = FLAG_HAS_TTL;
        assert!(matches!(
            validate(&encoded),
            Err(CellError::CorruptEncoding(_))
        ));
    }

    #[test]
    fn test_validate_rejects_counter_with_ttl_flag() {
        let mut encoded = encode_counter_update(1, 5);
        encoded[0] |= FLAG_HAS_TTL;
        assert!(matches!(
            validate(&encoded),
            Err(CellError::CorruptEncoding(_))
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_tombstone_size() {
        let mut encoded = encode_dead(1, 100);
        encoded.push(0);
        assert!(matches!(
            validate(&encoded),
            Err(CellError::CorruptEncoding(_))
        ));
    }

    #[test]
    fn test_validate_rejects_truncated_expiring_cell() {
        let encoded = encode_live_expiring(1, &ValueSource::from(&b""[..]), 100, 10);
        assert!(matches!(
            validate(&encoded[..20]),
            Err(CellError::Truncated { .. })
        ));
    }
}
