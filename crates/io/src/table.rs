//! CSV tables: the annual result table and the summary views.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use municlim_stats::{BinCount, GroupMean, Record};

use crate::error::IoError;

/// One row of the annual result table.
///
/// A missing annual value serializes as an empty CSV field, never as a
/// sentinel number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRecord {
    /// Municipality code.
    pub code: String,
    /// Municipality name.
    pub name: String,
    /// State/region code.
    pub state: String,
    /// Mean annual temperature in degrees Celsius, or `None` when no
    /// valid cell overlapped the municipality in any month.
    pub annual_mean_c: Option<f64>,
}

/// Writes the per-municipality annual table.
pub fn write_annual_csv(path: &Path, records: &[AnnualRecord]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "wrote annual table");
    Ok(())
}

/// Reads the per-municipality annual table back.
///
/// # Errors
///
/// Fails on missing files or rows that do not match the expected header.
pub fn read_annual_csv(path: &Path) -> Result<Vec<AnnualRecord>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Writes a ranking table (hottest or coldest municipalities).
pub fn write_ranking_csv(path: &Path, records: &[Record]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["code", "name", "state", "annual_mean_c"])?;
    for r in records {
        writer.write_record([
            r.code.as_str(),
            r.name.as_str(),
            r.state.as_str(),
            &format!("{}", r.value),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the per-state mean table, preserving input order.
pub fn write_group_means_csv(path: &Path, groups: &[GroupMean]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["state", "mean_annual_c", "municipalities"])?;
    for g in groups {
        writer.write_record([
            g.state.as_str(),
            &format!("{}", g.mean_value),
            &g.count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the temperature-band histogram, preserving bin order.
pub fn write_bin_counts_csv(path: &Path, bins: &[BinCount]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["band", "municipalities"])?;
    for b in bins {
        writer.write_record([b.label.as_str(), &b.count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
