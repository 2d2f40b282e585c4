//! Line-chart data for a tab's daily records.

use std::collections::BTreeMap;

use serde::Serialize;

use super::CategorySpec;

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    pub border: &'static str,
    pub fill: &'static str,
    pub points: Vec<f64>,
}

/// Coerce a formatted cell into a chartable number.
///
/// Thousands separators are stripped before parsing; anything that still
/// fails to parse charts as zero. Lossy on purpose, and chart-only: the
/// displayed string value of the same cell is never touched.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Build chart data from the tab's chart series specs. The x axis is the
/// daily label column, falling back to `"Day"` for unlabeled records.
pub fn build(spec: &CategorySpec, daily: &[BTreeMap<String, String>]) -> ChartData {
    let labels = daily
        .iter()
        .map(|record| {
            record
                .get(spec.label_field)
                .filter(|label| !label.is_empty())
                .cloned()
                .unwrap_or_else(|| "Day".to_string())
        })
        .collect();

    let series = spec
        .chart
        .iter()
        .map(|series| ChartSeries {
            label: series.label,
            border: series.border,
            fill: series.fill,
            points: daily
                .iter()
                .map(|record| {
                    coerce_number(record.get(series.key).map(String::as_str).unwrap_or(""))
                })
                .collect(),
        })
        .collect();

    ChartData { labels, series }
}
