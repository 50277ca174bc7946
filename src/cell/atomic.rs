// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Atomic cell values and views.
//!
//! [`AtomicCell`] owns one encoded buffer; [`AtomicCellView`] borrows
//! one. Both expose the same accessors over the encoding, so storage
//! layers can work on borrowed wire or cache memory without copying and
//! only materialize an owned cell when they need to keep it.
//!
//! Tag-specific accessors (`value`, `deletion_time`, `ttl`, ...) must
//! only be called after checking the tag; calling them on the wrong tag
//! is a contract violation and panics.

use tracing::warn;

use super::encoding::{
    self, EXPIRING_VALUE_OFFSET, FLAG_COUNTER_UPDATE, FLAG_HAS_TTL, FLAG_LIVE, PAYLOAD_OFFSET,
    TIMESTAMP_OFFSET, TTL_OFFSET,
};
use super::error::CellError;
use super::source::ValueSource;
use super::{GcSeconds, TtlSeconds, WriteTimestamp};

/// An immutable cell owning its encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicCell {
    data: Vec<u8>,
}

impl AtomicCell {
    /// Creates a tombstone recording a deletion at `deletion_time`.
    pub fn make_dead(timestamp: WriteTimestamp, deletion_time: GcSeconds) -> Self {
        Self {
            data: encoding::encode_dead(timestamp, deletion_time),
        }
    }

    /// Creates a live cell from any value source.
    ///
    /// The encoded bytes are identical regardless of the source kind.
    pub fn make_live<'a>(timestamp: WriteTimestamp, value: impl Into<ValueSource<'a>>) -> Self {
        Self {
            data: encoding::encode_live(timestamp, &value.into()),
        }
    }

    /// Creates an expiring live cell.
    ///
    /// `expiry` is the absolute expiration point; `ttl` is the duration
    /// originally requested at write time. The pair travels together,
    /// which is what makes a ttl without an expiry unrepresentable.
    pub fn make_live_expiring<'a>(
        timestamp: WriteTimestamp,
        value: impl Into<ValueSource<'a>>,
        expiry: GcSeconds,
        ttl: TtlSeconds,
    ) -> Self {
        Self {
            data: encoding::encode_live_expiring(timestamp, &value.into(), expiry, ttl),
        }
    }

    /// Reserves a live cell with `size` value bytes to be filled in
    /// place, for decode-into-cell paths that want to skip a staging
    /// copy. The returned handle is the only owner until
    /// [`UninitializedCell::freeze`] produces the immutable cell.
    pub fn make_live_uninitialized(timestamp: WriteTimestamp, size: usize) -> UninitializedCell {
        let mut data = encoding::encode_live(timestamp, &ValueSource::Contiguous(&[]));
        data.resize(PAYLOAD_OFFSET + size, 0);
        UninitializedCell { data }
    }

    /// Creates a live counter-update cell carrying a signed delta.
    pub fn make_live_counter_update(timestamp: WriteTimestamp, delta: i64) -> Self {
        Self {
            data: encoding::encode_counter_update(timestamp, delta),
        }
    }

    /// Duplicates a view into a new owned cell with identical bytes.
    pub fn from_view(view: AtomicCellView<'_>) -> Self {
        Self {
            data: view.data.to_vec(),
        }
    }

    /// Takes ownership of already-encoded bytes, validating them first.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CellError> {
        if let Err(err) = encoding::validate(&data) {
            warn!(len = data.len(), error = %err, "Rejecting corrupt cell encoding");
            return Err(err);
        }
        Ok(Self { data })
    }

    /// Borrows this cell as a view.
    #[inline]
    pub fn view(&self) -> AtomicCellView<'_> {
        AtomicCellView { data: &self.data }
    }

    /// The encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the cell, returning its encoded bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Heap bytes owned by this cell outside its fixed inline footprint.
    #[inline]
    pub fn external_memory_usage(&self) -> usize {
        self.data.capacity()
    }

    /// The write timestamp.
    #[inline]
    pub fn timestamp(&self) -> WriteTimestamp {
        self.view().timestamp()
    }

    /// Returns true if the cell is live.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.view().is_live()
    }
}

/// A two-phase construction handle for a live cell.
///
/// Holds zero-initialized value storage; the caller fills it through
/// [`value_mut`](Self::value_mut) and then freezes. Freezing is the only
/// way to obtain the cell, so no other owner can observe a partially
/// filled value.
#[derive(Debug)]
pub struct UninitializedCell {
    data: Vec<u8>,
}

impl UninitializedCell {
    /// The value region to fill.
    #[inline]
    pub fn value_mut(&mut self) -> &mut [u8] {
        &mut self.data[PAYLOAD_OFFSET..]
    }

    /// Ends the fill window, producing the immutable cell.
    #[inline]
    pub fn freeze(self) -> AtomicCell {
        AtomicCell { data: self.data }
    }
}

/// A borrowed, read-only view over an encoded cell.
///
/// Carries no ownership: the view must not outlive the buffer it was
/// created over, and the borrow checker holds callers to that.
#[derive(Debug, Clone, Copy)]
pub struct AtomicCellView<'a> {
    data: &'a [u8],
}

impl<'a> AtomicCellView<'a> {
    /// Borrows a view over an owned cell.
    #[inline]
    pub fn new(cell: &'a AtomicCell) -> Self {
        cell.view()
    }

    /// Decodes a view over externally supplied encoded bytes.
    ///
    /// Validates the flag byte and length before trusting any offset;
    /// never reads past the supplied buffer.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, CellError> {
        if let Err(err) = encoding::validate(data) {
            warn!(len = data.len(), error = %err, "Rejecting corrupt cell encoding");
            return Err(err);
        }
        Ok(Self { data })
    }

    #[inline]
    fn flags(&self) -> u8 {
        self.data[0]
    }

    /// The write timestamp.
    #[inline]
    pub fn timestamp(&self) -> WriteTimestamp {
        encoding::read_i64(self.data, TIMESTAMP_OFFSET)
    }

    /// Returns true if the cell is live (including counter updates).
    #[inline]
    pub fn is_live(&self) -> bool {
        self.flags() & FLAG_LIVE != 0
    }

    /// Returns true if the cell is a tombstone.
    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.is_live()
    }

    /// Returns true if the cell is a live counter update.
    #[inline]
    pub fn is_counter_update(&self) -> bool {
        self.flags() & FLAG_COUNTER_UPDATE != 0
    }

    /// Returns true if the cell is live and carries an expiry/ttl pair.
    #[inline]
    pub fn is_live_and_has_ttl(&self) -> bool {
        self.flags() & FLAG_HAS_TTL != 0
    }

    /// The value bytes of a plain live cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is dead or a counter update.
    #[inline]
    pub fn value(&self) -> &'a [u8] {
        assert!(
            self.is_live() && !self.is_counter_update(),
            "value() called on a cell without a value payload"
        );
        if self.is_live_and_has_ttl() {
            &self.data[EXPIRING_VALUE_OFFSET..]
        } else {
            &self.data[PAYLOAD_OFFSET..]
        }
    }

    /// The signed delta of a counter-update cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not a counter update.
    #[inline]
    pub fn counter_update_value(&self) -> i64 {
        assert!(
            self.is_counter_update(),
            "counter_update_value() called on a non-counter cell"
        );
        encoding::read_i64(self.data, PAYLOAD_OFFSET)
    }

    /// The deletion time of a tombstone.
    ///
    /// # Panics
    ///
    /// Panics if the cell is live.
    #[inline]
    pub fn deletion_time(&self) -> GcSeconds {
        assert!(self.is_dead(), "deletion_time() called on a live cell");
        encoding::read_u64(self.data, PAYLOAD_OFFSET)
    }

    /// The absolute expiration point of an expiring live cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no expiry/ttl pair.
    #[inline]
    pub fn expiry(&self) -> GcSeconds {
        assert!(
            self.is_live_and_has_ttl(),
            "expiry() called on a cell without a ttl"
        );
        encoding::read_u64(self.data, PAYLOAD_OFFSET)
    }

    /// The requested time-to-live of an expiring live cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no expiry/ttl pair.
    #[inline]
    pub fn ttl(&self) -> TtlSeconds {
        assert!(
            self.is_live_and_has_ttl(),
            "ttl() called on a cell without a ttl"
        );
        encoding::read_u64(self.data, TTL_OFFSET)
    }

    /// The comparable payload of a live cell: the value bytes for a
    /// plain cell, the serialized delta for a counter update.
    #[inline]
    pub(crate) fn payload_bytes(&self) -> &'a [u8] {
        debug_assert!(self.is_live());
        if self.is_counter_update() {
            &self.data[PAYLOAD_OFFSET..]
        } else if self.is_live_and_has_ttl() {
            &self.data[EXPIRING_VALUE_OFFSET..]
        } else {
            &self.data[PAYLOAD_OFFSET..]
        }
    }

    /// Structural equality over the same fields the merge comparator
    /// inspects. Used by caches and tests, not by merge.
    pub fn cell_equals(&self, other: &AtomicCellView<'_>) -> bool {
        if self.timestamp() != other.timestamp() {
            return false;
        }
        if self.is_live() != other.is_live() {
            return false;
        }
        if self.is_live() {
            if self.is_counter_update() != other.is_counter_update() {
                return false;
            }
            if self.is_counter_update() {
                return self.counter_update_value() == other.counter_update_value();
            }
            if self.is_live_and_has_ttl() != other.is_live_and_has_ttl() {
                return false;
            }
            if self.is_live_and_has_ttl()
                && (self.ttl() != other.ttl() || self.expiry() != other.expiry())
            {
                return false;
            }
            return self.value() == other.value();
        }
        self.deletion_time() == other.deletion_time()
    }

    /// Duplicates this view into an owned cell.
    #[inline]
    pub fn to_owned_cell(&self) -> AtomicCell {
        AtomicCell::from_view(*self)
    }

    /// The encoded bytes this view was created over.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}
