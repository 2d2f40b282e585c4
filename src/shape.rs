use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One record as returned by the worksheet, keyed by column header.
pub type RawRow = BTreeMap<String, String>;

/// The sheet lays its rows out as: summary, blank separator, sub-header, then
/// one row per day. Five rows is the minimum that still contains a daily row.
pub const MIN_RAW_ROWS: usize = 5;

/// Index of the first daily row within the raw rows.
pub const DAILY_START: usize = 3;

/// The summary/daily split served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedData {
    pub summary: BTreeMap<String, String>,
    pub daily: Vec<BTreeMap<String, String>>,
}

/// Shape the raw worksheet rows into the summary/daily split.
///
/// `raw_rows[0]` is the reporting-period summary; blank summary cells read as
/// `"-"`. Rows from [`DAILY_START`] onward are the per-day breakdown in
/// source order; blank daily cells read as `""`. Pure, no partial results:
/// too few rows fails the whole call.
pub fn shape(raw_rows: &[RawRow], header_keys: &[String]) -> Result<ShapedData, FetchError> {
    if raw_rows.len() < MIN_RAW_ROWS {
        return Err(FetchError::DataIncomplete(raw_rows.len()));
    }

    let summary = header_keys
        .iter()
        .map(|header| {
            let value = raw_rows[0]
                .get(header)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| "-".to_string());
            (header.clone(), value)
        })
        .collect();

    let daily = raw_rows[DAILY_START..]
        .iter()
        .map(|row| {
            header_keys
                .iter()
                .map(|header| (header.clone(), row.get(header).cloned().unwrap_or_default()))
                .collect()
        })
        .collect();

    Ok(ShapedData { summary, daily })
}
