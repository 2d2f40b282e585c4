//! Read access to the reporting spreadsheet.
//!
//! The document and tab are fixed; this module's whole contract is "fetch the
//! header list plus ordered rows for that tab". Everything else about the
//! sheet (layout, row meaning) belongs to [`crate::shape`].

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::auth::ServiceAccount;
use crate::error::FetchError;
use crate::shape::RawRow;

pub const SPREADSHEET_ID: &str = "1f1TDwwXtv2KQBU7suDGL4rLZMOyMtDzytz1OnFf67zQ";
pub const WORKSHEET_NAME: &str = "ข้อมูลสรุป";

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

/// Header list plus ordered records for one worksheet.
pub struct WorksheetData {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Fetch the configured worksheet: authenticate, confirm the tab exists,
/// then pull its cell grid.
pub async fn fetch_worksheet(client: &Client) -> Result<WorksheetData, FetchError> {
    let account = ServiceAccount::from_env()?;
    let token = account.access_token(client).await?;

    let titles = worksheet_titles(client, &token).await?;
    if !titles.iter().any(|t| t == WORKSHEET_NAME) {
        return Err(FetchError::WorksheetNotFound(WORKSHEET_NAME.to_string()));
    }

    let grid = worksheet_values(client, &token).await?;
    let data = into_worksheet_data(grid);
    info!(
        headers = data.headers.len(),
        rows = data.rows.len(),
        "fetched worksheet"
    );
    Ok(data)
}

/// Titles of every tab in the document.
async fn worksheet_titles(client: &Client, token: &str) -> Result<Vec<String>, FetchError> {
    let url = sheets_url(SPREADSHEET_ID, None)?;
    debug!(%url, "loading spreadsheet metadata");

    let resp = client
        .get(url)
        .bearer_auth(token)
        .query(&[("fields", "sheets.properties.title")])
        .send()
        .await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::SourceUnavailable(format!(
            "spreadsheet metadata returned {status}: {body}"
        )));
    }

    let meta: SpreadsheetMeta = resp
        .json()
        .await
        .map_err(|e| FetchError::SourceUnavailable(format!("metadata unreadable: {e}")))?;
    Ok(meta
        .sheets
        .into_iter()
        .map(|s| s.properties.title)
        .collect())
}

/// The worksheet's cell grid, formatted values only.
async fn worksheet_values(client: &Client, token: &str) -> Result<Vec<Vec<Value>>, FetchError> {
    let url = sheets_url(SPREADSHEET_ID, Some(WORKSHEET_NAME))?;
    debug!(%url, "loading worksheet values");

    let resp = client.get(url).bearer_auth(token).send().await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::SourceUnavailable(format!(
            "worksheet values returned {status}: {body}"
        )));
    }

    let range: ValueRange = resp
        .json()
        .await
        .map_err(|e| FetchError::SourceUnavailable(format!("value range unreadable: {e}")))?;
    Ok(range.values)
}

fn sheets_url(spreadsheet_id: &str, range: Option<&str>) -> Result<Url, FetchError> {
    let base = Url::parse(SHEETS_BASE)
        .map_err(|e| FetchError::SourceUnavailable(format!("bad sheets base url: {e}")))?;
    let path = match range {
        // Url::join percent-encodes the non-ASCII worksheet title.
        Some(range) => format!("{spreadsheet_id}/values/{range}"),
        None => spreadsheet_id.to_string(),
    };
    base.join(&path)
        .map_err(|e| FetchError::SourceUnavailable(format!("bad sheets url: {e}")))
}

/// First grid row is the header list; every later row becomes a record keyed
/// by header. Short rows read as empty cells.
fn into_worksheet_data(grid: Vec<Vec<Value>>) -> WorksheetData {
    let mut iter = grid.into_iter();
    let headers: Vec<String> = iter
        .next()
        .unwrap_or_default()
        .iter()
        .map(cell_text)
        .collect();

    let rows = iter
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    (header.clone(), cells.get(i).map(cell_text).unwrap_or_default())
                })
                .collect()
        })
        .collect();

    WorksheetData { headers, rows }
}

/// Formatted values come back as JSON strings; anything else is rendered.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}
