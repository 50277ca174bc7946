// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Scalar-or-collection cell storage.
//!
//! Row storage keeps one [`AtomicCellOrCollection`] per column position.
//! It holds either an encoded atomic cell or an opaque collection
//! mutation blob, or nothing at all, and never inspects the collection
//! contents. Which of the two it holds is decided by the column's type
//! descriptor, not recorded in the storage itself.

use crate::types::{CellValueType, CollectionMutationView};

use super::atomic::{AtomicCell, AtomicCellView};
use super::error::CellError;

/// Owned storage for one column position: an encoded atomic cell, an
/// opaque collection mutation, or empty.
///
/// The empty state (no value at this position) is the empty buffer,
/// distinct from any live or dead cell. An empty collection blob is
/// therefore indistinguishable from the empty state; collection codecs
/// never produce empty mutations.
#[derive(Debug, Clone, Default)]
pub struct AtomicCellOrCollection {
    data: Vec<u8>,
}

impl AtomicCellOrCollection {
    /// The empty state. Allocates nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Wraps an atomic cell, taking over its encoded buffer.
    pub fn from_cell(cell: AtomicCell) -> Self {
        Self {
            data: cell.into_bytes(),
        }
    }

    /// Duplicates a borrowed cell view into owned storage.
    pub fn from_view(view: AtomicCellView<'_>) -> Self {
        Self {
            data: view.as_bytes().to_vec(),
        }
    }

    /// Wraps an opaque collection mutation blob.
    pub fn from_collection_mutation(blob: Vec<u8>) -> Self {
        Self { data: blob }
    }

    /// Returns true if there is no value at this position.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.data.is_empty()
    }

    /// Deep-duplicates the underlying storage. The empty state copies
    /// to empty without allocating.
    pub fn copy(&self) -> Self {
        if self.data.is_empty() {
            return Self::none();
        }
        Self {
            data: self.data.clone(),
        }
    }

    /// Decodes the stored bytes as an atomic cell view.
    ///
    /// Callers must have checked the column type is atomic; the result
    /// is a corrupt-encoding error otherwise.
    pub fn as_atomic_cell(&self) -> Result<AtomicCellView<'_>, CellError> {
        AtomicCellView::from_bytes(&self.data)
    }

    /// Views the stored bytes as an opaque collection mutation.
    pub fn as_collection_mutation(&self) -> CollectionMutationView<'_> {
        CollectionMutationView { data: &self.data }
    }

    /// Structural equality, driven by the column type.
    ///
    /// Atomic values compare field-wise, mirroring the merge
    /// comparator's fields. Collection blobs compare byte-wise, so two
    /// different encodings of a semantically identical collection are
    /// not equal; that limitation is part of the contract.
    pub fn equals(&self, ty: &dyn CellValueType, other: &AtomicCellOrCollection) -> bool {
        if self.data.is_empty() || other.data.is_empty() {
            return self.data.is_empty() && other.data.is_empty();
        }
        if ty.is_atomic() {
            match (self.as_atomic_cell(), other.as_atomic_cell()) {
                (Ok(a), Ok(b)) => a.cell_equals(&b),
                // Corrupt storage compares raw.
                _ => self.data == other.data,
            }
        } else {
            self.as_collection_mutation().data == other.as_collection_mutation().data
        }
    }

    /// Heap bytes owned by this storage outside its fixed inline
    /// footprint, for the row's memory budget.
    #[inline]
    pub fn external_memory_usage(&self) -> usize {
        self.data.capacity()
    }

    /// The raw stored bytes.
    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
