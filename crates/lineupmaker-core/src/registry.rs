//! Named boats and their heats.
//!
//! The boat list is edited as a list of `BoatInput` rows. `BoatRegistry::sync`
//! turns those rows into `BoatHeats`, keeping existing seating where a boat's
//! name and type are unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::heats::{BoatHeats, MoveCommand};
use crate::models::BoatType;
use crate::roster::Roster;

/// One editable row of the boat list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatInput {
    pub name: String,
    pub boat_type: BoatType,
}

impl BoatInput {
    pub fn new(name: impl Into<String>, boat_type: BoatType) -> Self {
        Self {
            name: name.into(),
            boat_type,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoatRegistry {
    /// In boat list order
    boats: Vec<BoatHeats>,
}

impl BoatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the boats from the edited input rows.
    ///
    /// Blank names are skipped and a repeated name keeps its first row. A boat
    /// whose type changed gets fresh, empty heats; boats no longer listed are
    /// dropped.
    pub fn sync(&mut self, inputs: &[BoatInput], heats_per_boat: usize) {
        let mut previous = std::mem::take(&mut self.boats);
        let mut next: Vec<BoatHeats> = Vec::with_capacity(inputs.len());

        for input in inputs {
            let name = input.name.trim();
            if name.is_empty() || next.iter().any(|b| b.boat_name() == name) {
                continue;
            }

            let kept = previous
                .iter()
                .position(|b| b.boat_name() == name && b.boat_type() == input.boat_type)
                .map(|i| previous.swap_remove(i));

            next.push(kept.unwrap_or_else(|| BoatHeats::new(name, heats_per_boat, input.boat_type)));
        }

        for dropped in &previous {
            debug!(boat = %dropped.boat_name(), boat_type = %dropped.boat_type(), "Dropped heats");
        }
        self.boats = next;
    }

    pub fn get(&self, name: &str) -> Option<&BoatHeats> {
        self.boats.iter().find(|b| b.boat_name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.boats.iter().map(|b| b.boat_name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoatHeats> {
        self.boats.iter()
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Swap in a new state for the boat of the same name.
    /// Returns false if no such boat is listed.
    pub fn replace(&mut self, next: BoatHeats) -> bool {
        match self.boats.iter_mut().find(|b| b.boat_name() == next.boat_name()) {
            Some(slot) => {
                *slot = next;
                true
            }
            None => false,
        }
    }

    /// Run a move against one boat and adopt the result.
    /// Returns whether the boat's seating changed.
    pub fn apply_move(&mut self, boat_name: &str, command: &MoveCommand, roster: &Roster) -> Result<bool> {
        let Some(heats) = self.get(boat_name) else {
            warn!(boat = %boat_name, "Move for unknown boat ignored");
            return Ok(false);
        };

        match heats.move_person(command, roster)? {
            Some(next) => Ok(self.replace(next)),
            None => Ok(false),
        }
    }

    /// How many seats each person holds across every boat and heat.
    pub fn person_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for person in self
            .boats
            .iter()
            .flat_map(|b| b.lineups())
            .flat_map(|l| l.people())
        {
            *counts.entry(person.name.clone()).or_insert(0) += 1;
        }
        counts
    }
}
