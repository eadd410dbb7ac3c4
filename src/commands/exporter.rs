// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::filter_spec;
use crate::engine;
use crate::export::{self, Backup, DetailedReport};
use crate::store::LedgerStore;
use crate::utils::today;

pub fn handle(store: &dyn LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        Some(("backup", sub)) => export_backup(store, sub),
        Some(("report", sub)) => export_report(store, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches, default_name: String) -> PathBuf {
    sub.get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_name))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let f = File::create(path).with_context(|| format!("Create {}", path.display()))?;
    Ok(BufWriter::new(f))
}

fn export_transactions(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    if fmt != "csv" && fmt != "json" {
        anyhow::bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let spec = filter_spec(sub)?;
    let records = engine::filter_and_sort(&store.load_expenses()?, &spec);
    let default_name = if fmt == "csv" {
        export::csv_file_name(today())
    } else {
        format!("expenses-{}.json", today())
    };
    let out = out_path(sub, default_name);

    let w = create(&out)?;
    if fmt == "csv" {
        export::write_csv(&records, w)?;
    } else {
        export::write_json(&records, w)?;
    }
    tracing::info!(path = %out.display(), count = records.len(), format = %fmt, "exported transactions");
    println!("Exported {} transactions to {}", records.len(), out.display());
    Ok(())
}

fn export_backup(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub, export::backup_file_name(today()));
    let backup = Backup::new(store.load_expenses()?, store.load_settings()?);
    backup.write(create(&out)?)?;
    println!("Backup written to {}", out.display());
    Ok(())
}

fn export_report(store: &dyn LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub, export::report_file_name(today()));
    let report = DetailedReport::build(store.load_expenses()?, store.load_settings()?);
    report.write(create(&out)?)?;
    println!("Detailed report written to {}", out.display());
    Ok(())
}
