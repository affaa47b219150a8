//! Heats for a boat and the move protocol between heats and the roster.
//!
//! `BoatHeats::move_person` is the single entry point the UI uses to change
//! seating. It works on a copy and hands back the next state, so a caller can
//! swap it in with one assignment.

pub mod boat_heats;
pub mod location;

pub use boat_heats::BoatHeats;
pub use location::{Location, MoveCommand};
