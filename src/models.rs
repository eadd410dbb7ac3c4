// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LedgerError;

/// Spending categories offered by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodDining,
    Transportation,
    BillsUtilities,
    Subscriptions,
    RentHousing,
    Entertainment,
    Healthcare,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::FoodDining,
        Category::Transportation,
        Category::BillsUtilities,
        Category::Subscriptions,
        Category::RentHousing,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Other,
    ];

    /// Label shown to users and written to storage.
    pub fn label(self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::BillsUtilities => "Bills & Utilities",
            Category::Subscriptions => "Subscriptions",
            Category::RentHousing => "Rent & Housing",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Lenient lookup for persisted data: unknown labels land in `Other`.
    pub fn from_label_lossy(s: &str) -> Category {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(label = s, "unknown category label, filing under Other");
            Category::Other
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::InvalidCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from_label_lossy(&s))
    }
}

/// Parses a category filter; the "All Categories" sentinel (or "all") disables it.
pub fn parse_category_filter(s: &str) -> Result<Option<Category>, LedgerError> {
    let t = s.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("all") || t.eq_ignore_ascii_case("all categories") {
        return Ok(None);
    }
    t.parse().map(Some)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD | Currency::CAD | Currency::AUD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            _ => Err(LedgerError::InvalidCurrency(s.to_string())),
        }
    }
}

/// Symbol for a currency code; unknown codes fall back to the rupee sign.
pub fn currency_symbol(code: &str) -> &'static str {
    code.parse::<Currency>()
        .map(Currency::symbol)
        .unwrap_or(Currency::INR.symbol())
}

pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub currency: Currency,
    pub monthly_budget: Decimal,
    pub default_category: Category,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            monthly_budget: Decimal::from(2000),
            default_category: Category::Other,
            notifications: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.monthly_budget < Decimal::ZERO {
            return Err(LedgerError::InvalidSetting {
                field: "monthlyBudget",
                reason: format!("must be non-negative, got {}", self.monthly_budget),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    #[serde(with = "record_date")]
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ExpenseRecord {
    /// Builds a validated record with a freshly minted id.
    pub fn new(
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDateTime,
        location: Option<String>,
    ) -> Result<Self, LedgerError> {
        Self::with_id(
            uuid::Uuid::new_v4().to_string(),
            amount,
            category,
            description,
            date,
            location,
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDateTime,
        location: Option<String>,
    ) -> Result<Self, LedgerError> {
        let rec = Self {
            id: id.into(),
            amount,
            category,
            description: description.into(),
            date,
            location: location.filter(|l| !l.trim().is_empty()),
        };
        rec.validate()?;
        Ok(rec)
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.id.trim().is_empty() {
            return Err(LedgerError::invalid_record("id", "must not be empty"));
        }
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::invalid_record(
                "amount",
                format!("must be non-negative, got {}", self.amount),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::invalid_record("description", "must not be empty"));
        }
        Ok(())
    }

    /// Local calendar day of the expense.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

mod record_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&crate::utils::format_datetime(d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        crate::utils::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    CategoryAsc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::AmountDesc => "amount-desc",
            SortKey::AmountAsc => "amount-asc",
            SortKey::CategoryAsc => "category-asc",
        }
    }

    /// Unknown keys fall back to `date-desc` so a listing always renders.
    pub fn parse_or_default(s: &str) -> SortKey {
        s.parse().unwrap_or_else(|err: LedgerError| {
            tracing::warn!(%err, "falling back to date-desc");
            SortKey::DateDesc
        })
    }
}

impl FromStr for SortKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" => Ok(SortKey::DateDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "amount-desc" => Ok(SortKey::AmountDesc),
            "amount-asc" => Ok(SortKey::AmountAsc),
            "category-asc" | "category" => Ok(SortKey::CategoryAsc),
            _ => Err(LedgerError::InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `engine::filter`. Absent fields pass everything through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub sort: SortKey,
}

impl FilterSpec {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort = key;
        self
    }
}
