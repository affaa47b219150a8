//! Lineup Maker core - seating paddlers into dragon boat heats.
//!
//! People come from a roster sheet, get seated into per-heat lineups for each
//! named boat, and the finished heats are exported as a tab-delimited
//! mastersheet. Seating rules depend on the boat type: open boats take anyone,
//! women's boats take only women, and mixed boats cap each gender.
//!
//! UI frontends drive everything through [`LineupApp`].

pub mod app;
pub mod config;
pub mod error;
pub mod heats;
pub mod ingest;
pub mod lineup;
pub mod models;
pub mod registry;
pub mod roster;
pub mod utils;

pub use app::{BoatInputChange, LineupApp};
pub use config::Config;
pub use error::{LineupError, Result};
pub use heats::{BoatHeats, Location, MoveCommand};
pub use ingest::{IngestError, RosterSource};
pub use lineup::{Lineup, SeatingRules};
pub use models::{BoatType, Gender, Person};
pub use registry::{BoatInput, BoatRegistry};
pub use roster::Roster;
