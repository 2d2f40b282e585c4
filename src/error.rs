use thiserror::Error;

/// Failures on the sheet → dashboard data path.
///
/// Everything here is caught at the request boundary and reported as a single
/// user-facing message; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Auth or network failure reaching the spreadsheet source.
    #[error("cannot reach the spreadsheet source: {0}")]
    SourceUnavailable(String),

    /// The named worksheet tab is absent from the document.
    #[error("worksheet '{0}' not found")]
    WorksheetNotFound(String),

    /// The sheet has fewer rows than the fixed layout requires.
    #[error("sheet data incomplete: {0} rows, need at least 5")]
    DataIncomplete(usize),

    /// A response was readable but missing the expected `summary`/`daily` shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::SourceUnavailable(err.to_string())
    }
}
