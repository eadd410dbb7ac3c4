// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod utils;
pub mod commands;

pub use error::{LedgerError, StoreError};
pub use models::{Category, Currency, ExpenseRecord, FilterSpec, Settings, SortKey};
pub use store::{LedgerStore, MemoryStore};
