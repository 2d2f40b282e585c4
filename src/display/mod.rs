//! Turns the `{summary, daily}` split into what the dashboard widgets render:
//! KPI cards, the daily breakdown list, and line-chart data.
//!
//! Each tab is a row in one declarative category table carrying its field
//! keys, labels, colors, and chart wiring. Only the performance tab is wired
//! to live data; the other tabs always render their placeholders.

pub mod chart;
pub mod fetch;
pub mod state;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::shape::ShapedData;

/// The dashboard's tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Transactional,
    Picos,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Performance,
        Category::Transactional,
        Category::Picos,
    ];

    pub fn spec(self) -> &'static CategorySpec {
        match self {
            Category::Performance => &PERFORMANCE,
            Category::Transactional => &TRANSACTIONAL,
            Category::Picos => &PICOS,
        }
    }
}

/// One KPI field: the sheet column it reads and how its card renders.
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// One charted series: the sheet column it coerces and its line styling.
pub struct ChartSeriesSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub border: &'static str,
    pub fill: &'static str,
}

/// Everything the renderer needs to know about one tab.
pub struct CategorySpec {
    pub label: &'static str,
    /// Column that names each daily record (the accordion title / chart x axis).
    pub label_field: &'static str,
    pub fields: &'static [FieldSpec],
    pub chart: &'static [ChartSeriesSpec],
    /// Whether this tab reads fetched data at all.
    pub live: bool,
}

/// Daily-record label values that mark a stray sub-header row, not data.
pub const HEADER_LABELS: &[&str] = &["วันที่"];

static PERFORMANCE: CategorySpec = CategorySpec {
    label: "Performance",
    label_field: "สรุปข้อมูล",
    fields: &[
        FieldSpec {
            key: "GMV (฿)",
            label: "GMV (฿)",
            color: "blue",
        },
        FieldSpec {
            key: "รายได้รวม (พร้อมเงินสนับสนุนสินค้าจากแพลตฟอร์ม)",
            label: "รายได้รวม (฿)",
            color: "green",
        },
        FieldSpec {
            key: "สินค้าที่ขายได้",
            label: "สินค้าที่ขายได้",
            color: "purple",
        },
        FieldSpec {
            key: "ลูกค้า",
            label: "ลูกค้า",
            color: "orange",
        },
        FieldSpec {
            key: "คำสั่งซื้อ",
            label: "คำสั่งซื้อ",
            color: "red",
        },
        FieldSpec {
            key: "อัตราคอนเวอร์ชั่น",
            label: "อัตราคอนเวอร์ชั่น",
            color: "teal",
        },
    ],
    chart: &[
        ChartSeriesSpec {
            key: "GMV (฿)",
            label: "GMV (฿)",
            border: "rgb(54, 162, 235)",
            fill: "rgba(54, 162, 235, 0.2)",
        },
        ChartSeriesSpec {
            key: "รายได้รวม (พร้อมเงินสนับสนุนสินค้าจากแพลตฟอร์ม)",
            label: "รายได้รวม (฿)",
            border: "rgb(75, 192, 192)",
            fill: "rgba(75, 192, 192, 0.2)",
        },
    ],
    live: true,
};

static TRANSACTIONAL: CategorySpec = CategorySpec {
    label: "Transactional",
    label_field: "วันที่",
    fields: &[
        FieldSpec {
            key: "All Orders",
            label: "All Orders",
            color: "blue",
        },
        FieldSpec {
            key: "Completed Orders",
            label: "Completed Orders",
            color: "green",
        },
        FieldSpec {
            key: "Settlement Report",
            label: "Settlement Report",
            color: "purple",
        },
    ],
    chart: &[],
    live: false,
};

static PICOS: CategorySpec = CategorySpec {
    label: "PICOS",
    label_field: "วันที่",
    fields: &[
        FieldSpec {
            key: "Product Reviews",
            label: "Product Reviews",
            color: "blue",
        },
        FieldSpec {
            key: "Stock",
            label: "Stock",
            color: "green",
        },
        FieldSpec {
            key: "Assortment & Pricing",
            label: "Assortment & Pricing",
            color: "purple",
        },
    ],
    chart: &[],
    live: false,
};

pub const PLACEHOLDER_DAYS: usize = 7;

/// Static fallback data per tab, derived from the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    performance: ShapedData,
    transactional: ShapedData,
    picos: ShapedData,
}

impl PlaceholderSet {
    pub fn from_specs() -> Self {
        PlaceholderSet {
            performance: placeholder_data(Category::Performance.spec()),
            transactional: placeholder_data(Category::Transactional.spec()),
            picos: placeholder_data(Category::Picos.spec()),
        }
    }

    pub fn get(&self, category: Category) -> &ShapedData {
        match category {
            Category::Performance => &self.performance,
            Category::Transactional => &self.transactional,
            Category::Picos => &self.picos,
        }
    }
}

pub static PLACEHOLDERS: Lazy<PlaceholderSet> = Lazy::new(PlaceholderSet::from_specs);

/// Summary of dashes plus seven daily entries labeled `Day 1`..`Day 7`.
fn placeholder_data(spec: &CategorySpec) -> ShapedData {
    let summary = spec
        .fields
        .iter()
        .map(|f| (f.key.to_string(), "-".to_string()))
        .collect();

    let daily = (1..=PLACEHOLDER_DAYS)
        .map(|day| {
            let mut record: BTreeMap<String, String> = spec
                .fields
                .iter()
                .map(|f| (f.key.to_string(), "-".to_string()))
                .collect();
            record.insert(spec.label_field.to_string(), format!("Day {day}"));
            record
        })
        .collect();

    ShapedData { summary, daily }
}

/// One KPI card, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub value: String,
}

/// Everything one tab renders.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayModel {
    pub category: Category,
    pub summary: Vec<KpiCard>,
    pub daily: Vec<BTreeMap<String, String>>,
    pub chart: Option<chart::ChartData>,
}

/// Adapt fetched data (or its absence) into one tab's display model.
///
/// A live tab selects its summary keys from the fetched summary, dash for
/// anything missing, and falls back to placeholder daily entries when the
/// fetched daily list is empty. Tabs not wired to live data return their
/// placeholders verbatim regardless of what was fetched.
pub fn adapt(
    category: Category,
    fetched: Option<&ShapedData>,
    placeholders: &PlaceholderSet,
) -> DisplayModel {
    let spec = category.spec();
    let fallback = placeholders.get(category);

    let (summary_source, daily) = match fetched {
        Some(data) if spec.live => {
            let daily = if data.daily.is_empty() {
                fallback.daily.clone()
            } else {
                data.daily.clone()
            };
            (Some(&data.summary), daily)
        }
        _ => (None, fallback.daily.clone()),
    };

    let summary = spec
        .fields
        .iter()
        .map(|field| KpiCard {
            key: field.key,
            label: field.label,
            color: field.color,
            value: summary_source
                .and_then(|summary| summary.get(field.key))
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let chart = if spec.chart.is_empty() || daily.is_empty() {
        None
    } else {
        Some(chart::build(spec, &daily))
    };

    DisplayModel {
        category,
        summary,
        daily,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped(summary: &[(&str, &str)], daily: Vec<Vec<(&str, &str)>>) -> ShapedData {
        ShapedData {
            summary: summary
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            daily: daily
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn placeholders_carry_seven_labeled_days() {
        for category in Category::ALL {
            let data = PLACEHOLDERS.get(category);
            assert_eq!(data.daily.len(), PLACEHOLDER_DAYS);
            for (i, record) in data.daily.iter().enumerate() {
                let label = record.get(category.spec().label_field).unwrap();
                assert_eq!(label, &format!("Day {}", i + 1));
            }
            assert!(data.summary.values().all(|v| v == "-"));
        }
    }

    #[test]
    fn empty_fetched_daily_falls_back_to_placeholders() {
        let fetched = shaped(&[], vec![]);
        let model = adapt(Category::Performance, Some(&fetched), &PLACEHOLDERS);
        assert_eq!(model.daily, PLACEHOLDERS.get(Category::Performance).daily);
    }

    #[test]
    fn live_summary_selects_fields_with_dash_fallback() {
        let fetched = shaped(
            &[("GMV (฿)", "1,234.50"), ("ignored", "x")],
            vec![vec![("สรุปข้อมูล", "1 ม.ค."), ("GMV (฿)", "100")]],
        );
        let model = adapt(Category::Performance, Some(&fetched), &PLACEHOLDERS);

        assert_eq!(model.summary.len(), 6);
        assert_eq!(model.summary[0].key, "GMV (฿)");
        assert_eq!(model.summary[0].value, "1,234.50");
        // Every other performance field is absent from the fetch.
        assert!(model.summary[1..].iter().all(|card| card.value == "-"));
        // Unknown keys never become cards.
        assert!(model.summary.iter().all(|card| card.key != "ignored"));
    }

    #[test]
    fn non_live_tabs_ignore_fetched_data() {
        let fetched = shaped(
            &[("All Orders", "999")],
            vec![vec![("วันที่", "1 ม.ค."), ("All Orders", "5")]],
        );
        for category in [Category::Transactional, Category::Picos] {
            let model = adapt(category, Some(&fetched), &PLACEHOLDERS);
            let fallback = PLACEHOLDERS.get(category);
            assert_eq!(model.daily, fallback.daily);
            assert!(model.summary.iter().all(|card| card.value == "-"));
            assert!(model.chart.is_none());
        }
    }

    #[test]
    fn chart_only_renders_for_charted_tabs() {
        let fetched = shaped(
            &[],
            vec![vec![("สรุปข้อมูล", "1 ม.ค."), ("GMV (฿)", "10")]],
        );
        let model = adapt(Category::Performance, Some(&fetched), &PLACEHOLDERS);
        let chart = model.chart.expect("performance should chart");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points, vec![10.0]);

        let model = adapt(Category::Picos, Some(&fetched), &PLACEHOLDERS);
        assert!(model.chart.is_none());
    }

    #[test]
    fn no_fetch_renders_performance_placeholders() {
        let model = adapt(Category::Performance, None, &PLACEHOLDERS);
        assert_eq!(model.daily, PLACEHOLDERS.get(Category::Performance).daily);
        assert!(model.summary.iter().all(|card| card.value == "-"));
        // Placeholder dashes chart as a flat zero line.
        let chart = model.chart.expect("placeholder daily still charts");
        assert!(chart.series[0].points.iter().all(|p| *p == 0.0));
    }
}
