// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! CadmiumDB cell core: value representation and conflict reconciliation
//! for a distributed column-family storage engine.
//!
//! This crate provides the smallest versioned unit of data (the atomic
//! cell) together with the deterministic merge algorithm that lets every
//! replica independently pick the same surviving version of a cell,
//! regardless of the order concurrent writes arrive in.

pub mod cell;
pub mod types;

pub use cell::{
    compare_for_merge, merge_candidates, reconcile, AtomicCell, AtomicCellOrCollection,
    AtomicCellView, CellError, CellOrCollectionPrinter, CellPrinter, GcSeconds, TtlSeconds,
    UninitializedCell, ValueSource, WireValue, WriteTimestamp,
};
pub use types::{
    CellValueType, CollectionMutationCodec, CollectionMutationView, CounterShard,
    CounterShardView,
};
