// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for dataset generation and transformation.

use thiserror::Error;

/// Errors raised by the extract and transform stages.
///
/// Parse failures abort the whole batch: downstream aggregates assume every
/// loaded fact is valid, so a bad row is never skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EtlError {
    /// Generator parameters are out of range.
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// The dataset could not be written.
    #[error("Failed to write dataset to {target}: {reason}")]
    Generation { target: String, reason: String },

    /// The dataset could not be opened or read.
    #[error("Failed to read dataset {source_name}: {reason}")]
    Read { source_name: String, reason: String },

    /// The dataset header lacks required columns.
    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// A row could not be parsed or violates a session invariant.
    #[error("Row {row}, field {field}: {reason}")]
    Parse {
        /// 1-based row number, excluding the header.
        row: usize,
        field: String,
        reason: String,
    },
}
