// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Cell error types.

/// Errors that can occur when decoding an encoded cell.
#[derive(Debug, thiserror::Error)]
pub enum CellError {
    #[error("truncated cell encoding: need at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("corrupt cell encoding: {0}")]
    CorruptEncoding(String),

    #[error("truncated wire value: length prefix claims {claimed} bytes, buffer has {available}")]
    TruncatedWireValue { claimed: usize, available: usize },
}
