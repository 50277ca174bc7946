// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Minimal value-type capabilities consumed by the cell core.
//!
//! The full column-type hierarchy lives outside this crate. The cell
//! core asks a type descriptor exactly three yes/no questions, plus
//! best-effort rendering for diagnostics, and stays ignorant of
//! everything else about the type.

/// Capability queries on a column's value type.
///
/// Implemented by the external type-descriptor hierarchy; the cell core
/// depends only on these answers.
pub trait CellValueType {
    /// Returns true if values of this type are single atomic cells.
    fn is_atomic(&self) -> bool;

    /// Returns true if values of this type span multiple cells
    /// (collections), stored as opaque mutation blobs.
    fn is_multi_cell(&self) -> bool;

    /// Returns true if this is a counter type.
    fn is_counter(&self) -> bool;

    /// Renders a decoded value for diagnostics. Not called on any merge
    /// or read hot path.
    fn render_value(&self, raw: &[u8]) -> String;
}

/// One shard's contribution to a counter cell, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterShard {
    /// Identifier of the shard (owning replica).
    pub id: u64,
    /// Shard-local logical clock.
    pub clock: i64,
    /// The shard's accumulated contribution.
    pub value: i64,
}

impl std::fmt::Display for CounterShard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.id, self.clock, self.value)
    }
}

/// Enumerates the per-shard contributions inside a counter cell's value
/// blob. Implemented by the external counter codec; used only for
/// diagnostics.
pub trait CounterShardView {
    /// Decodes the shard list from a counter cell's raw value bytes.
    fn shards(&self, raw: &[u8]) -> Vec<CounterShard>;
}

/// Interprets the opaque mutation blob of a collection-typed column.
/// Implemented by the external collection codec.
pub trait CollectionMutationCodec {
    /// Renders the blob for diagnostics.
    fn render(&self, blob: &[u8]) -> String;
}

/// A borrowed view over a collection mutation blob.
///
/// The cell core never interprets the contents; it can copy and
/// byte-compare them, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionMutationView<'a> {
    /// The opaque encoded mutation.
    pub data: &'a [u8],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_shard_display() {
        let shard = CounterShard {
            id: 1,
            clock: 2,
            value: -3,
        };
        assert_eq!(shard.to_string(), "{1, 2, -3}");
    }
}
