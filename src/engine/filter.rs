// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use regex::{Regex, RegexBuilder};

use crate::models::{ExpenseRecord, FilterSpec};

/// Keeps the records matching every active predicate of `spec`, in input order.
/// `spec.sort` is ignored here; see [`filter_and_sort`].
pub fn filter(records: &[ExpenseRecord], spec: &FilterSpec) -> Vec<ExpenseRecord> {
    let search = spec
        .search
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(Search::new);

    let out: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| search.as_ref().is_none_or(|s| s.matches(r)))
        .filter(|r| spec.category.is_none_or(|c| r.category == c))
        .filter(|r| spec.start.is_none_or(|start| r.day() >= start))
        .filter(|r| spec.end.is_none_or(|end| r.day() <= end))
        .cloned()
        .collect();

    tracing::debug!(input = records.len(), kept = out.len(), "filtered records");
    out
}

pub fn filter_and_sort(records: &[ExpenseRecord], spec: &FilterSpec) -> Vec<ExpenseRecord> {
    super::sort::sort(&filter(records, spec), spec.sort)
}

/// Literal, case-insensitive substring match.
enum Search {
    Pattern(Regex),
    // terms too large for the regex engine
    Lowercase(String),
}

impl Search {
    fn new(term: &str) -> Self {
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Search::Pattern(re),
            Err(err) => {
                tracing::warn!(%err, len = term.len(), "search term not compiled, comparing lowercase text");
                Search::Lowercase(term.to_lowercase())
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Search::Pattern(re) => re.is_match(text),
            Search::Lowercase(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }

    fn matches(&self, r: &ExpenseRecord) -> bool {
        self.is_match(&r.description)
            || self.is_match(r.category.label())
            || r.location.as_deref().is_some_and(|l| self.is_match(l))
    }
}
