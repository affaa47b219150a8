//! Seating grid for one heat.
//!
//! A `Lineup` is an R x 2 grid. Row 0 holds the caller (left) and the steer
//! (right) and never counts towards side weights. Rows 1..R are the paired
//! benches. The seating rules for the boat type live inside the lineup as a
//! `SeatingRules` value, so Open, Womens and Mixed boats share one type.

pub mod rules;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LineupError, Result};
use crate::models::{BoatType, Person};
use crate::utils::format_weight;

pub use rules::{SeatingRules, MIXED_GENDER_CAP};

/// Rows in a standard dragon boat lineup: caller/steer plus 10 benches.
pub const LINEUP_ROWS: usize = 11;

/// Left and right.
pub const LINEUP_COLS: usize = 2;

/// Column index of the left side.
pub const LEFT: usize = 0;

/// Column index of the right side.
pub const RIGHT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    cells: Vec<[Option<Person>; LINEUP_COLS]>,
    /// Name -> seat, mirrors the occupied cells
    occupants: HashMap<String, Seat>,
    left_weight: f64,
    right_weight: f64,
    rules: SeatingRules,
}

impl Default for Lineup {
    fn default() -> Self {
        Self::new(BoatType::Open)
    }
}

impl Lineup {
    pub fn new(boat_type: BoatType) -> Self {
        Self::with_rows(LINEUP_ROWS, boat_type)
    }

    /// Build a lineup with a non-standard number of rows (at least one).
    pub fn with_rows(rows: usize, boat_type: BoatType) -> Self {
        Self {
            cells: vec![[None, None]; rows.max(1)],
            occupants: HashMap::new(),
            left_weight: 0.0,
            right_weight: 0.0,
            rules: SeatingRules::for_boat(boat_type),
        }
    }

    // ===== Mutation =====

    /// Seat `person` at (row, col).
    ///
    /// Returns `Ok(false)` without touching the grid when the person is
    /// already in this lineup, the seat is taken, or the seating rules refuse.
    pub fn add_person(&mut self, row: usize, col: usize, person: Person) -> Result<bool> {
        self.check_bounds(row, col)?;

        if self.occupants.contains_key(&person.name) {
            debug!(name = %person.name, "Cannot add: already in lineup");
            return Ok(false);
        }
        if self.cells[row][col].is_some() {
            debug!(name = %person.name, row, col, "Cannot add: seat taken");
            return Ok(false);
        }
        if !self.rules.admits(row, &person) {
            return Ok(false);
        }

        debug!(name = %person.name, row, col, "Added to lineup");
        self.rules.record_added(row, &person);
        self.occupants
            .insert(person.name.clone(), Seat { row, col });
        self.cells[row][col] = Some(person);
        self.recompute_weights();
        Ok(true)
    }

    /// Clear (row, col), returning whoever sat there.
    pub fn remove_person(&mut self, row: usize, col: usize) -> Result<Option<Person>> {
        self.check_bounds(row, col)?;

        let Some(person) = self.cells[row][col].take() else {
            debug!(row, col, "No person to remove");
            return Ok(None);
        };

        debug!(name = %person.name, row, col, "Removed from lineup");
        self.occupants.remove(&person.name);
        self.rules.record_removed(row, &person);
        self.recompute_weights();
        Ok(Some(person))
    }

    /// Exchange the occupants of two seats; either may be empty.
    ///
    /// Goes through remove/add so the seating rules see every placement. If a
    /// placement is refused the lineup is left exactly as it was and
    /// `Ok(false)` is returned.
    pub fn swap_person(&mut self, row1: usize, col1: usize, row2: usize, col2: usize) -> Result<bool> {
        self.check_bounds(row1, col1)?;
        self.check_bounds(row2, col2)?;

        if (row1, col1) == (row2, col2) {
            return Ok(true);
        }

        let before = self.clone();
        let first = self.remove_person(row1, col1)?;
        let second = self.remove_person(row2, col2)?;

        let mut placed = true;
        if let Some(person) = first {
            placed = self.add_person(row2, col2, person)?;
        }
        if placed {
            if let Some(person) = second {
                placed = self.add_person(row1, col1, person)?;
            }
        }

        if !placed {
            debug!(row1, col1, row2, col2, "Swap refused, restoring lineup");
            *self = before;
            return Ok(false);
        }

        debug!(row1, col1, row2, col2, "Swapped seats");
        Ok(true)
    }

    // ===== Queries =====

    /// Occupant of (row, col), or `None` when vacant or off the grid.
    pub fn person_at(&self, row: usize, col: usize) -> Option<&Person> {
        self.cells.get(row).and_then(|r| r.get(col)).and_then(|c| c.as_ref())
    }

    /// Like `person_at`, but an off-grid coordinate is an error.
    pub fn occupant(&self, row: usize, col: usize) -> Result<Option<&Person>> {
        self.check_bounds(row, col)?;
        Ok(self.cells[row][col].as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occupants.contains_key(name)
    }

    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        self.occupants.get(name).copied()
    }

    /// Everyone seated, in no particular order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.cells.iter().flatten().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn left_weight(&self) -> f64 {
        self.left_weight
    }

    pub fn right_weight(&self) -> f64 {
        self.right_weight
    }

    /// Left minus right. Positive means the boat lists to the left.
    pub fn weight_difference(&self) -> f64 {
        self.left_weight - self.right_weight
    }

    pub fn boat_type(&self) -> BoatType {
        self.rules.boat_type()
    }

    pub fn rules(&self) -> &SeatingRules {
        &self.rules
    }

    pub fn male_count(&self) -> usize {
        self.rules.male_count()
    }

    pub fn female_count(&self) -> usize {
        self.rules.female_count()
    }

    // ===== Export =====

    /// Tab-delimited rows for the mastersheet: caller, header, benches, steer.
    pub fn to_mastersheet_rows(&self) -> Vec<String> {
        let name = |row: usize, col: usize| self.person_at(row, col).map_or("", |p| p.name.as_str());

        let mut rows = Vec::with_capacity(self.rows() + 2);
        rows.push(format!("Caller\t{}\t", name(0, LEFT)));
        rows.push("Row\tLeft\tRight".to_string());
        for i in 1..self.rows() {
            rows.push(format!("{}\t{}\t{}", i, name(i, LEFT), name(i, RIGHT)));
        }
        rows.push(format!("Steer\t\t{}", name(0, RIGHT)));
        rows
    }

    // ===== Internals =====

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.cells.len() || col >= LINEUP_COLS {
            return Err(LineupError::InvalidCoordinate { row, col });
        }
        Ok(())
    }

    /// Side totals are summed from the benches so they always match the grid.
    fn recompute_weights(&mut self) {
        let side = |col: usize| -> f64 {
            self.cells
                .iter()
                .skip(1)
                .filter_map(|r| r[col].as_ref())
                .map(|p| p.weight)
                .sum()
        };
        let left = side(LEFT);
        let right = side(RIGHT);
        self.left_weight = left;
        self.right_weight = right;
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} lineup", self.boat_type())?;
        for (i, row) in self.cells.iter().enumerate() {
            let left = row[LEFT].as_ref().map_or("-", |p| p.name.as_str());
            let right = row[RIGHT].as_ref().map_or("-", |p| p.name.as_str());
            writeln!(f, "Row {}: {} | {}", i, left, right)?;
        }
        write!(
            f,
            "Left weight: {}, Right weight: {}",
            format_weight(self.left_weight),
            format_weight(self.right_weight)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
