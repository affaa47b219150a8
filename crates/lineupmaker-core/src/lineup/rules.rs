use tracing::debug;

use crate::models::{BoatType, Gender, Person};

/// Maximum paddlers of each gender on the benches of a Mixed boat.
pub const MIXED_GENDER_CAP: usize = 10;

/// Seating eligibility for a lineup, selected by boat type.
///
/// Row 0 (caller and steer) is exempt from every rule and never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatingRules {
    Open,
    Womens,
    Mixed { male_count: usize, female_count: usize },
}

impl SeatingRules {
    pub fn for_boat(boat_type: BoatType) -> Self {
        match boat_type {
            BoatType::Open => SeatingRules::Open,
            BoatType::Womens => SeatingRules::Womens,
            BoatType::Mixed => SeatingRules::Mixed {
                male_count: 0,
                female_count: 0,
            },
        }
    }

    pub fn boat_type(&self) -> BoatType {
        match self {
            SeatingRules::Open => BoatType::Open,
            SeatingRules::Womens => BoatType::Womens,
            SeatingRules::Mixed { .. } => BoatType::Mixed,
        }
    }

    /// Whether `person` may sit in `row` given the current counts.
    pub fn admits(&self, row: usize, person: &Person) -> bool {
        if row == 0 {
            return true;
        }
        match self {
            SeatingRules::Open => true,
            SeatingRules::Womens => {
                if person.gender != Gender::Female {
                    debug!(name = %person.name, "Refused: only women on this boat");
                    return false;
                }
                true
            }
            SeatingRules::Mixed {
                male_count,
                female_count,
            } => match person.gender {
                Gender::Male if *male_count >= MIXED_GENDER_CAP => {
                    debug!(name = %person.name, male_count, "Refused: men already at cap");
                    false
                }
                Gender::Female if *female_count >= MIXED_GENDER_CAP => {
                    debug!(name = %person.name, female_count, "Refused: women already at cap");
                    false
                }
                _ => true,
            },
        }
    }

    /// Update counters after a placement succeeded.
    pub(crate) fn record_added(&mut self, row: usize, person: &Person) {
        if row == 0 {
            return;
        }
        if let SeatingRules::Mixed {
            male_count,
            female_count,
        } = self
        {
            match person.gender {
                Gender::Male => *male_count += 1,
                Gender::Female => *female_count += 1,
                Gender::Unspecified => {}
            }
        }
    }

    /// Update counters after an occupant left the grid.
    pub(crate) fn record_removed(&mut self, row: usize, person: &Person) {
        if row == 0 {
            return;
        }
        if let SeatingRules::Mixed {
            male_count,
            female_count,
        } = self
        {
            match person.gender {
                Gender::Male => *male_count = male_count.saturating_sub(1),
                Gender::Female => *female_count = female_count.saturating_sub(1),
                Gender::Unspecified => {}
            }
        }
    }

    pub fn male_count(&self) -> usize {
        match self {
            SeatingRules::Mixed { male_count, .. } => *male_count,
            _ => 0,
        }
    }

    pub fn female_count(&self) -> usize {
        match self {
            SeatingRules::Mixed { female_count, .. } => *female_count,
            _ => 0,
        }
    }
}
