// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod expenses;
pub mod reports;
pub mod settings;
pub mod importer;
pub mod exporter;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::models::{parse_category_filter, FilterSpec, SortKey};
use crate::utils::parse_date;

pub(crate) fn required<'a>(sub: &'a ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing required argument '{}'", name))
}

/// Builds a `FilterSpec` from the shared --search/--category/--from/--to/--sort flags.
pub fn filter_spec(sub: &ArgMatches) -> Result<FilterSpec> {
    let mut spec = FilterSpec::default();
    if let Some(term) = sub.get_one::<String>("search") {
        spec.search = Some(term.clone());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        spec.category = parse_category_filter(cat)?;
    }
    if let Some(from) = sub.get_one::<String>("from") {
        spec.start = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        spec.end = Some(parse_date(to)?);
    }
    Ok(match sub.get_one::<String>("sort") {
        Some(key) => spec.sorted_by(SortKey::parse_or_default(key)),
        None => spec,
    })
}
