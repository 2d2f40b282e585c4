//! Client side of the data endpoint: fetch, validate, filter.

use std::collections::BTreeMap;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Category, HEADER_LABELS};
use crate::error::FetchError;
use crate::shape::ShapedData;

/// GET the dashboard endpoint and validate the payload.
///
/// Non-2xx responses surface the server's `{error}` string. One attempt
/// only; the caller decides what an error means for the page.
pub async fn fetch_dashboard(client: &Client, base_url: &str) -> Result<ShapedData, FetchError> {
    let url = format!("{}/api/getData", base_url.trim_end_matches('/'));
    debug!(%url, "fetching dashboard data");

    let resp = client.get(&url).send().await?;
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| {
                body.get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("request failed with {status}"));
        return Err(FetchError::SourceUnavailable(message));
    }

    let body: Value = serde_json::from_str(&text)
        .map_err(|e| FetchError::MalformedResponse(format!("response is not JSON: {e}")))?;
    parse_payload(body)
}

/// Validate `{summary: object, daily: array}` and drop daily records that
/// are really the sheet's sub-header.
pub fn parse_payload(body: Value) -> Result<ShapedData, FetchError> {
    let summary_ok = body.get("summary").map_or(false, Value::is_object);
    let daily_ok = body.get("daily").map_or(false, Value::is_array);
    if !summary_ok || !daily_ok {
        return Err(FetchError::MalformedResponse(
            "payload is missing the summary/daily shape".to_string(),
        ));
    }

    let mut data: ShapedData = serde_json::from_value(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    data.daily = filter_daily(data.daily);
    Ok(data)
}

/// Keep only daily records with a real label. A record labeled with a known
/// header value is a sub-header row that slipped past the shaping offset.
pub fn filter_daily(daily: Vec<BTreeMap<String, String>>) -> Vec<BTreeMap<String, String>> {
    let label_field = Category::Performance.spec().label_field;
    daily
        .into_iter()
        .filter(|record| match record.get(label_field) {
            Some(label) if !label.is_empty() => {
                let label = label.to_lowercase();
                !HEADER_LABELS.iter().any(|h| label == h.to_lowercase())
            }
            _ => false,
        })
        .collect()
}
