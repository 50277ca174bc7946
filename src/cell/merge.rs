// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Cell reconciliation.
//!
//! Replicas accept concurrent writes without coordination, so conflicting
//! versions of the same cell must be resolved identically everywhere.
//! [`compare_for_merge`] defines a strict total order over cell views;
//! the greater cell survives a merge. Read, compaction, and repair paths
//! all reduce candidate sets through this one function, which is what
//! makes the replicas converge.

use std::cmp::Ordering;

use super::atomic::AtomicCellView;

/// Compares two candidate versions of the same logical cell.
///
/// Returns `Greater` if `left` wins, `Less` if `right` wins, `Equal` if
/// the cells are interchangeable. Pure and allocation-free; safe to call
/// concurrently from any number of threads.
///
/// Decision sequence, first applicable rule wins:
///
/// 1. Higher timestamp wins outright.
/// 2. At equal timestamps, live beats dead.
/// 3. Both live: lexicographically greater payload bytes win.
/// 4. Equal payloads: an expiring cell beats a non-expiring one.
/// 5. Both expiring: later expiry wins; at equal expiry the smaller ttl
///    wins (it was written later for the same expiry and must be
///    retained until purge).
/// 6. Both dead: later deletion time wins.
/// 7. Otherwise equal.
pub fn compare_for_merge(left: AtomicCellView<'_>, right: AtomicCellView<'_>) -> Ordering {
    if left.timestamp() != right.timestamp() {
        return left.timestamp().cmp(&right.timestamp());
    }
    if left.is_live() != right.is_live() {
        // A live write at the same timestamp takes precedence over the
        // tombstone. Intentional; see the resurrection note in DESIGN.md.
        return if left.is_live() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if left.is_live() {
        // Unsigned lexicographic compare. For counter updates the
        // payload is the serialized delta.
        let c = left.payload_bytes().cmp(right.payload_bytes());
        if c != Ordering::Equal {
            return c;
        }
        if left.is_live_and_has_ttl() != right.is_live_and_has_ttl() {
            // Prefer expiring cells.
            return if left.is_live_and_has_ttl() {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        if left.is_live_and_has_ttl() {
            if left.expiry() != right.expiry() {
                return left.expiry().cmp(&right.expiry());
            }
            // Prefer the cell that was written later, so it survives
            // longer after it expires, until purged.
            return right.ttl().cmp(&left.ttl());
        }
        Ordering::Equal
    } else {
        // Both are deleted.
        left.deletion_time().cmp(&right.deletion_time())
    }
}

/// Returns the surviving view of a candidate pair. Ties keep `left`;
/// tied cells are byte-identical, so the choice is immaterial.
#[inline]
pub fn reconcile<'a>(left: AtomicCellView<'a>, right: AtomicCellView<'a>) -> AtomicCellView<'a> {
    match compare_for_merge(left, right) {
        Ordering::Less => right,
        _ => left,
    }
}

/// Reduces any number of candidate versions to the single survivor.
///
/// A left fold over [`reconcile`]; the winner does not depend on the
/// order candidates are supplied in. Returns `None` for an empty set.
pub fn merge_candidates<'a, I>(candidates: I) -> Option<AtomicCellView<'a>>
where
    I: IntoIterator<Item = AtomicCellView<'a>>,
{
    candidates.into_iter().reduce(reconcile)
}
