// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Atomic cell representation and reconciliation.
//!
//! A cell is the smallest versioned unit of a column's value at one
//! row position. Replicas accept concurrent writes without coordination,
//! so every read, compaction, and repair path must be able to take two
//! candidate versions of the same cell and deterministically pick a
//! single winner. This module provides the compact encoded cell, the
//! strict total order that selects the winner, and the supporting
//! equality and memory-accounting primitives.
//!
//! # Key Concepts
//!
//! A cell is exactly one of three things:
//!
//! - **Live**: a write timestamp plus a byte value, optionally expiring
//!   (an `expiry`/`ttl` pair, always present together).
//! - **Dead**: a tombstone, a write timestamp plus the deletion time.
//! - **Counter update**: a live signed 64-bit delta, combined with other
//!   shard contributions outside this crate.
//!
//! Cells are immutable once constructed. Reconciliation compares two
//! read-only views and never mutates either side, so it is safe to call
//! concurrently from any number of threads.
//!
//! # Example
//!
//! ```
//! use cadmiumdb::cell::{compare_for_merge, AtomicCell};
//! use std::cmp::Ordering;
//!
//! let older = AtomicCell::make_live(5, &b"abc"[..]);
//! let newer = AtomicCell::make_live(9, &b"zzz"[..]);
//!
//! // The higher write timestamp wins outright.
//! assert_eq!(compare_for_merge(older.view(), newer.view()), Ordering::Less);
//! ```

mod atomic;
mod encoding;
mod error;
mod merge;
mod printer;
mod source;
mod wrapper;

pub use atomic::{AtomicCell, AtomicCellView, UninitializedCell};
pub use error::CellError;
pub use merge::{compare_for_merge, merge_candidates, reconcile};
pub use printer::{CellOrCollectionPrinter, CellPrinter};
pub use source::{ValueSource, WireValue};
pub use wrapper::AtomicCellOrCollection;

/// Writer-assigned logical write time.
///
/// Only the relative order of timestamps matters to this crate; the write
/// path assigns them (typically microseconds since the Unix epoch) and
/// guarantees per-writer monotonicity, not global ordering.
pub type WriteTimestamp = i64;

/// Absolute time in seconds since the Unix epoch, as kept by the
/// garbage-collection clock. Used for tombstone deletion times and live
/// cell expiry points.
pub type GcSeconds = u64;

/// Requested time-to-live duration, in seconds.
pub type TtlSeconds = u64;
