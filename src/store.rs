// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{ExpenseRecord, Settings};

/// Durable home of the expense list and user settings.
///
/// Record order is meaningful: the newest addition sits at the front, which is
/// the order listings fall back to for ties.
pub trait LedgerStore {
    fn load_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Replaces the whole list.
    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> Result<(), StoreError>;

    fn load_settings(&self) -> Result<Settings, StoreError>;

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError>;

    fn add_expense(&mut self, record: ExpenseRecord) -> Result<(), StoreError> {
        record.validate()?;
        let mut records = self.load_expenses()?;
        records.insert(0, record);
        crate::engine::validate(&records)?;
        self.save_expenses(&records)
    }

    /// Returns whether a record with `id` existed.
    fn delete_expense(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load_expenses()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_expenses(&records)?;
        Ok(true)
    }

    /// Drops every record and resets settings to their defaults.
    fn clear(&mut self) -> Result<(), StoreError> {
        self.save_expenses(&[])?;
        self.save_settings(&Settings::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ExpenseRecord>,
    settings: Settings,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records,
            settings: Settings::default(),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> Result<(), StoreError> {
        crate::engine::validate(records)?;
        self.records = records.to_vec();
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        settings.validate()?;
        self.settings = settings.clone();
        Ok(())
    }
}
