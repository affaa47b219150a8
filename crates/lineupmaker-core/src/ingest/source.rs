use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::Person;

use super::{parse_roster_csv, IngestError, RosterClient};

/// Where a roster comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    /// A published sheet exported as CSV.
    Url(String),
    /// An uploaded CSV file.
    File(PathBuf),
}

impl RosterSource {
    pub async fn load(&self, client: &RosterClient) -> Result<Vec<Person>> {
        match self {
            RosterSource::Url(url) => client.fetch_roster(url).await,
            RosterSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(IngestError::from)
                    .with_context(|| format!("Failed to read roster file {}", path.display()))?;
                let people = parse_roster_csv(bytes.as_slice())
                    .with_context(|| format!("Failed to parse roster file {}", path.display()))?;
                Ok(people)
            }
        }
    }
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSource::Url(url) => write!(f, "{}", url),
            RosterSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
