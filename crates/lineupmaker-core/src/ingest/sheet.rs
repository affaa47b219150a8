use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{Gender, Person};

use super::IngestError;

/// One sheet row. Header names are matched case-insensitively.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    weight: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default, alias = "is_steer", alias = "issteer")]
    steer: Option<String>,
    #[serde(default, alias = "is_caller", alias = "iscaller")]
    caller: Option<String>,
}

impl RosterRow {
    /// `line` is the sheet line number, for log messages.
    fn into_person(self, line: usize) -> Option<Person> {
        let name = self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;

        let weight = match parse_weight(self.weight.as_deref()) {
            Some(w) => w,
            None => {
                warn!(line, name = %name, raw = ?self.weight, "Unreadable weight, using 0");
                0.0
            }
        };

        Some(
            Person::new(name, weight, Gender::parse(self.gender.as_deref()))
                .with_steer(is_truthy(self.steer.as_deref()))
                .with_caller(is_truthy(self.caller.as_deref())),
        )
    }
}

/// Parse a weight cell, tolerating a trailing unit such as "150 lbs".
fn parse_weight(raw: Option<&str>) -> Option<f64> {
    let cleaned = raw?
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic() || c.is_whitespace() || c == '.');
    cleaned.parse::<f64>().ok().filter(|w| w.is_finite())
}

fn is_truthy(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("true" | "yes" | "y" | "1" | "x")
    )
}

/// Read people from a roster sheet exported as CSV with a header row.
///
/// Rows without a name are skipped; so are rows the CSV reader cannot decode.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<Person>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
    rdr.set_headers(headers);

    let mut people = Vec::new();
    let mut skipped = 0usize;

    // Line 1 is the header
    for (i, result) in rdr.deserialize::<RosterRow>().enumerate() {
        let line = i + 2;
        match result {
            Ok(row) => match row.into_person(line) {
                Some(person) => people.push(person),
                None => skipped += 1,
            },
            Err(e) => {
                warn!(line, error = %e, "Skipping unreadable roster row");
                skipped += 1;
            }
        }
    }

    debug!(count = people.len(), skipped, "Parsed roster sheet");
    Ok(people)
}

pub fn parse_roster_str(text: &str) -> Result<Vec<Person>, IngestError> {
    parse_roster_csv(text.as_bytes())
}
