//! Data models for lineup entities.
//!
//! - `Person`: one paddler with weight, gender, race times and role flags
//! - `Gender`: used by the Womens and Mixed seating rules
//! - `BoatType`: the division a boat races in (Open, Womens, Mixed)

pub mod boat;
pub mod person;

pub use boat::BoatType;
pub use person::{compare_by_name, compare_by_weight, Gender, Person, RaceTimes};
