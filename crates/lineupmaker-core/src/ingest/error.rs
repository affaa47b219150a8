use reqwest::StatusCode;
use thiserror::Error;

/// Why a roster sheet could not be loaded.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Roster sheet requires sign-in; publish it to the web as CSV")]
    Unauthorized,

    #[error("Roster sheet is not shared publicly: {0}")]
    NotShared(String),

    #[error("No roster sheet at that address: {0}")]
    NotFound(String),

    #[error("Sheet host is rate limiting requests")]
    RateLimited,

    #[error("Sheet host failed: {0}")]
    ServerError(String),

    #[error("Could not reach the sheet host: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Sheet host sent something other than CSV: {0}")]
    NotCsv(String),

    #[error("Roster sheet is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read roster file: {0}")]
    Io(#[from] std::io::Error),
}

/// Longest slice of a response body kept in an error message.
const MAX_BODY_EXCERPT: usize = 200;

impl IngestError {
    fn excerpt(body: &str) -> String {
        let body = body.trim();
        if body.chars().count() <= MAX_BODY_EXCERPT {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_BODY_EXCERPT).collect();
            format!("{}... ({} bytes)", cut, body.len())
        }
    }

    /// Classify a failed sheet download by its HTTP status.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => IngestError::Unauthorized,
            StatusCode::FORBIDDEN => IngestError::NotShared(Self::excerpt(body)),
            StatusCode::NOT_FOUND | StatusCode::GONE => IngestError::NotFound(Self::excerpt(body)),
            StatusCode::TOO_MANY_REQUESTS => IngestError::RateLimited,
            s if s.is_server_error() => IngestError::ServerError(format!("{}: {}", s, Self::excerpt(body))),
            s => IngestError::NotCsv(format!("status {}: {}", s, Self::excerpt(body))),
        }
    }

    /// A successful download that is an HTML page (usually a sign-in or
    /// "file not published" screen) rather than sheet data.
    pub fn check_content_type(content_type: Option<&str>) -> Result<(), Self> {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().starts_with("text/html") => {
                Err(IngestError::NotCsv(ct.to_string()))
            }
            _ => Ok(()),
        }
    }
}
