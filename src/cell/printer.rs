// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic rendering for cells.
//!
//! Best-effort, human-readable output for logging and debugging. This
//! module is allowed to allocate and format freely; it is never invoked
//! on a per-row read or merge path and nothing in the reconciliation
//! path depends on it.

use std::fmt;

use crate::types::{CellValueType, CollectionMutationCodec, CounterShardView};

use super::atomic::{AtomicCell, AtomicCellView};
use super::wrapper::AtomicCellOrCollection;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn fmt_live_frame(
    f: &mut fmt::Formatter<'_>,
    body: &str,
    cell: &AtomicCellView<'_>,
) -> fmt::Result {
    if cell.is_live_and_has_ttl() {
        write!(
            f,
            "atomic_cell{{{body},ts={},expiry={},ttl={}}}",
            cell.timestamp(),
            cell.expiry(),
            cell.ttl()
        )
    } else {
        write!(
            f,
            "atomic_cell{{{body},ts={},expiry=-1,ttl=0}}",
            cell.timestamp()
        )
    }
}

fn fmt_dead_frame(f: &mut fmt::Formatter<'_>, cell: &AtomicCellView<'_>) -> fmt::Result {
    write!(
        f,
        "atomic_cell{{DEAD,ts={},deletion_time={}}}",
        cell.timestamp(),
        cell.deletion_time()
    )
}

/// Type-unaware rendering: values print as hex.
impl fmt::Display for AtomicCellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_live() {
            let body = if self.is_counter_update() {
                format!("counter_update_value={}", self.counter_update_value())
            } else {
                to_hex(self.value())
            };
            fmt_live_frame(f, &body, self)
        } else {
            fmt_dead_frame(f, self)
        }
    }
}

impl fmt::Display for AtomicCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

/// Type-aware cell rendering.
///
/// Scalar values are rendered by the type descriptor. Counter cells
/// render as the raw delta for updates, or as the per-shard contribution
/// list when a shard view is attached.
pub struct CellPrinter<'a> {
    ty: &'a dyn CellValueType,
    cell: AtomicCellView<'a>,
    shard_view: Option<&'a dyn CounterShardView>,
}

impl<'a> CellPrinter<'a> {
    pub fn new(ty: &'a dyn CellValueType, cell: AtomicCellView<'a>) -> Self {
        Self {
            ty,
            cell,
            shard_view: None,
        }
    }

    /// Attaches a counter-shard view for rendering non-update counter
    /// cells.
    pub fn with_shard_view(mut self, shard_view: &'a dyn CounterShardView) -> Self {
        self.shard_view = Some(shard_view);
        self
    }
}

impl fmt::Display for CellPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.cell.is_live() {
            return fmt_dead_frame(f, &self.cell);
        }
        let body = if self.ty.is_counter() {
            if self.cell.is_counter_update() {
                format!("counter_update_value={}", self.cell.counter_update_value())
            } else if let Some(shard_view) = self.shard_view {
                let shards = shard_view.shards(self.cell.value());
                let rendered: Vec<String> = shards.iter().map(ToString::to_string).collect();
                format!("shards: {}", rendered.join(", "))
            } else {
                to_hex(self.cell.value())
            }
        } else {
            self.ty.render_value(self.cell.value())
        };
        fmt_live_frame(f, &body, &self.cell)
    }
}

/// Rendering for a whole column position, scalar or collection.
pub struct CellOrCollectionPrinter<'a> {
    ty: &'a dyn CellValueType,
    cell: &'a AtomicCellOrCollection,
    codec: Option<&'a dyn CollectionMutationCodec>,
    shard_view: Option<&'a dyn CounterShardView>,
}

impl<'a> CellOrCollectionPrinter<'a> {
    pub fn new(ty: &'a dyn CellValueType, cell: &'a AtomicCellOrCollection) -> Self {
        Self {
            ty,
            cell,
            codec: None,
            shard_view: None,
        }
    }

    /// Attaches a collection codec for rendering multi-cell blobs.
    pub fn with_codec(mut self, codec: &'a dyn CollectionMutationCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Attaches a counter-shard view, forwarded to the cell printer.
    pub fn with_shard_view(mut self, shard_view: &'a dyn CounterShardView) -> Self {
        self.shard_view = Some(shard_view);
        self
    }
}

impl fmt::Display for CellOrCollectionPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cell.is_none() {
            return write!(f, "{{ null atomic_cell_or_collection }}");
        }
        if self.ty.is_multi_cell() {
            let blob = self.cell.as_collection_mutation();
            let rendered = match self.codec {
                Some(codec) => codec.render(blob.data),
                None => to_hex(blob.data),
            };
            return write!(f, "{{ collection {rendered} }}");
        }
        match self.cell.as_atomic_cell() {
            Ok(view) => {
                let mut printer = CellPrinter::new(self.ty, view);
                if let Some(shard_view) = self.shard_view {
                    printer = printer.with_shard_view(shard_view);
                }
                write!(f, "{{ {printer} }}")
            }
            Err(_) => write!(f, "{{ corrupt atomic_cell }}"),
        }
    }
}
