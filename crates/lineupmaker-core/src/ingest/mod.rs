//! Roster ingestion: CSV parsing, fetching a published sheet or reading an
//! uploaded file, and the background refresh task.

pub mod client;
pub mod error;
pub mod poller;
pub mod sheet;
pub mod source;

pub use client::RosterClient;
pub use sheet::{parse_roster_csv, parse_roster_str};
pub use error::IngestError;
pub use poller::{RosterPoller, RosterUpdate};
pub use source::RosterSource;
