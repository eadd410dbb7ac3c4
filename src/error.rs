// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the ledger engine and the model constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid record: {field} {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    #[error("invalid setting: {field} {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid sort key '{0}' (use date-desc|date-asc|amount-desc|amount-asc|category-asc)")]
    InvalidSortKey(String),

    #[error("unknown category '{0}'")]
    InvalidCategory(String),

    #[error("unknown granularity '{0}' (use month|quarter|year)")]
    InvalidGranularity(String),

    #[error("unknown currency '{0}' (use INR|USD|EUR|GBP|CAD|AUD)")]
    InvalidCurrency(String),
}

impl LedgerError {
    pub fn invalid_record(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised by `LedgerStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt value in column '{column}': {value}")]
    Corrupt { column: &'static str, value: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
