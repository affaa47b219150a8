use tracing::{debug, info};

use crate::error::{LineupError, Result};
use crate::lineup::Lineup;
use crate::models::BoatType;
use crate::roster::{Roster, ROSTER_COLUMNS};

use super::location::{Location, MoveCommand};

/// All heats for one named boat. Heat `i` is `lineups[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoatHeats {
    boat_name: String,
    boat_type: BoatType,
    lineups: Vec<Lineup>,
}

impl BoatHeats {
    pub fn new(boat_name: impl Into<String>, num_heats: usize, boat_type: BoatType) -> Self {
        let boat_name = boat_name.into();
        info!(boat = %boat_name, %boat_type, num_heats, "Created heats for boat");
        Self {
            boat_name,
            boat_type,
            lineups: (0..num_heats).map(|_| Lineup::new(boat_type)).collect(),
        }
    }

    pub fn boat_name(&self) -> &str {
        &self.boat_name
    }

    pub fn boat_type(&self) -> BoatType {
        self.boat_type
    }

    pub fn num_heats(&self) -> usize {
        self.lineups.len()
    }

    pub fn lineup(&self, heat: usize) -> Option<&Lineup> {
        self.lineups.get(heat)
    }

    pub fn lineups(&self) -> &[Lineup] {
        &self.lineups
    }

    /// Replace the lineup of an existing heat. The lineup must follow this
    /// boat's seating rules and have as many rows as the heat it replaces,
    /// so every heat lines up in the mastersheet.
    pub fn set_lineup(&mut self, heat: usize, lineup: Lineup) -> Result<()> {
        if lineup.boat_type() != self.boat_type {
            return Err(LineupError::BoatTypeMismatch {
                expected: self.boat_type,
                found: lineup.boat_type(),
            });
        }
        let slot = self.lineup_mut(heat)?;
        if lineup.rows() != slot.rows() {
            return Err(LineupError::ShapeMismatch {
                expected: slot.rows(),
                found: lineup.rows(),
            });
        }
        *slot = lineup;
        Ok(())
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Apply a drag-and-drop move to a copy of these heats.
    ///
    /// Returns `Some(next)` for the caller to adopt when anything changed, and
    /// `None` when the move was a no-op or a placement was refused. Moves are
    /// all-or-nothing: a refused placement never leaves anyone unseated.
    /// `self` is never modified. The roster is read only; it always lists
    /// everyone, seated or not.
    pub fn move_person(&self, command: &MoveCommand, roster: &Roster) -> Result<Option<BoatHeats>> {
        let mut next = self.clone();
        let changed = next.apply_move(command, roster)?;
        if !changed {
            debug!(boat = %self.boat_name, ?command, "Move left heats unchanged");
        }
        Ok(changed.then_some(next))
    }

    fn apply_move(&mut self, command: &MoveCommand, roster: &Roster) -> Result<bool> {
        match (command.from, command.to) {
            (
                Location::Heat { heat_idx: from_heat, row: from_row, col: from_col },
                Location::Heat { heat_idx: to_heat, row: to_row, col: to_col },
            ) if from_heat == to_heat => {
                let lineup = self.lineup_mut(from_heat)?;
                let occupied = lineup.occupant(from_row, from_col)?.is_some()
                    || lineup.occupant(to_row, to_col)?.is_some();
                if !occupied || (from_row, from_col) == (to_row, to_col) {
                    return Ok(false);
                }
                lineup.swap_person(from_row, from_col, to_row, to_col)
            }

            (
                Location::Heat { heat_idx: from_heat, row: from_row, col: from_col },
                Location::Heat { heat_idx: to_heat, row: to_row, col: to_col },
            ) => self.move_across_heats((from_heat, from_row, from_col), (to_heat, to_row, to_col)),

            (Location::Roster { row, col }, Location::Heat { heat_idx, row: to_row, col: to_col }) => {
                if col >= ROSTER_COLUMNS {
                    return Err(LineupError::InvalidCoordinate { row, col });
                }
                let lineup = self.lineup_mut(heat_idx)?;
                lineup.occupant(to_row, to_col)?;

                let Some(person) = roster.at_cell(row, col) else {
                    debug!(row, col, "No roster person at cell");
                    return Ok(false);
                };

                if let Some(displaced) = lineup.remove_person(to_row, to_col)? {
                    debug!(name = %displaced.name, "Displaced by roster move");
                }
                lineup.add_person(to_row, to_col, person.clone())
            }

            (Location::Heat { heat_idx, row, col }, Location::Roster { .. }) => {
                let lineup = self.lineup_mut(heat_idx)?;
                Ok(lineup.remove_person(row, col)?.is_some())
            }

            (Location::Roster { .. }, Location::Roster { .. }) => Ok(false),
        }
    }

    /// Swap two seats in different heats, or move into an empty seat.
    fn move_across_heats(
        &mut self,
        (from_heat, from_row, from_col): (usize, usize, usize),
        (to_heat, to_row, to_col): (usize, usize, usize),
    ) -> Result<bool> {
        // Validate both ends before touching either lineup
        self.lineup(from_heat)
            .ok_or(LineupError::UnknownHeat(from_heat))?
            .occupant(from_row, from_col)?;
        self.lineup(to_heat)
            .ok_or(LineupError::UnknownHeat(to_heat))?
            .occupant(to_row, to_col)?;

        let from_person = self.lineups[from_heat].remove_person(from_row, from_col)?;
        let to_person = self.lineups[to_heat].remove_person(to_row, to_col)?;

        if from_person.is_none() && to_person.is_none() {
            return Ok(false);
        }

        if let Some(person) = from_person {
            if !self.lineups[to_heat].add_person(to_row, to_col, person)? {
                return Ok(false);
            }
        }
        if let Some(person) = to_person {
            if !self.lineups[from_heat].add_person(from_row, from_col, person)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn lineup_mut(&mut self, heat: usize) -> Result<&mut Lineup> {
        self.lineups.get_mut(heat).ok_or(LineupError::UnknownHeat(heat))
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// All heats side by side as one tab-delimited sheet, ready to paste.
    pub fn mastersheet_str(&self) -> String {
        let Some(first) = self.lineups.first() else {
            return String::new();
        };

        let mut title = String::new();
        let mut rows = vec![String::new(); first.rows() + 2];

        for (i, lineup) in self.lineups.iter().enumerate() {
            title.push_str(&format!("{} Heat {}\t\t\t\t", self.boat_type, i + 1));
            for (line, cell) in rows.iter_mut().zip(lineup.to_mastersheet_rows()) {
                line.push_str(&cell);
                line.push_str("\t\t");
            }
        }

        format!("{}\n{}", title, rows.join("\n"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::{LEFT, LINEUP_ROWS, RIGHT};
    use crate::models::{Gender, Person};

    fn alice() -> Person {
        Person::new("Alice", 150.0, Gender::Female)
    }

    fn bob() -> Person {
        Person::new("Bob", 180.0, Gender::Male)
    }

    fn roster() -> Roster {
        Roster::from_people([bob(), alice()], crate::models::compare_by_weight)
    }

    fn mv(heats: &BoatHeats, from: Location, to: Location, roster: &Roster) -> Option<BoatHeats> {
        heats.move_person(&MoveCommand::new(from, to), roster).unwrap()
    }

    fn name_at(heats: &BoatHeats, heat: usize, row: usize, col: usize) -> Option<&str> {
        heats.lineup(heat).and_then(|l| l.person_at(row, col)).map(|p| p.name.as_str())
    }

    #[test]
    fn test_new_builds_matching_lineups() {
        let heats = BoatHeats::new("Dragons", 3, BoatType::Mixed);
        assert_eq!(heats.num_heats(), 3);
        assert!(heats.lineups().iter().all(|l| l.boat_type() == BoatType::Mixed));
        assert!(heats.lineup(3).is_none());
    }

    #[test]
    fn test_roster_scenario() {
        let roster = roster();
        assert_eq!(roster.all()[0].name, "Alice");
        assert_eq!(roster.all()[1].name, "Bob");

        let heats = BoatHeats::new("Dragons", 3, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 1, LEFT), &roster).unwrap();
        assert_eq!(heats.lineup(0).unwrap().left_weight(), 150.0);

        let heats = mv(&heats, Location::roster(0, 1), Location::heat(0, 1, RIGHT), &roster).unwrap();
        assert_eq!(heats.lineup(0).unwrap().right_weight(), 180.0);

        let heats = mv(&heats, Location::heat(0, 1, LEFT), Location::heat(0, 1, RIGHT), &roster).unwrap();
        let lineup = heats.lineup(0).unwrap();
        assert_eq!(lineup.left_weight(), 180.0);
        assert_eq!(lineup.right_weight(), 150.0);

        // The roster is never consumed by moves
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_move_leaves_original_untouched() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let next = mv(&heats, Location::roster(0, 0), Location::heat(1, 3, LEFT), &roster).unwrap();

        assert_eq!(name_at(&next, 1, 3, LEFT), Some("Alice"));
        assert_eq!(name_at(&heats, 1, 3, LEFT), None);
        assert_eq!(heats.lineup(1).unwrap().left_weight(), 0.0);
    }

    #[test]
    fn test_same_heat_empty_cells_noop() {
        let heats = BoatHeats::new("Dragons", 1, BoatType::Open);
        assert!(mv(&heats, Location::heat(0, 1, 0), Location::heat(0, 2, 1), &Roster::default()).is_none());
    }

    #[test]
    fn test_cross_heat_swap() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 1, LEFT), &roster).unwrap();
        let heats = mv(&heats, Location::roster(0, 1), Location::heat(1, 2, RIGHT), &roster).unwrap();

        let heats = mv(&heats, Location::heat(0, 1, LEFT), Location::heat(1, 2, RIGHT), &roster).unwrap();
        assert_eq!(name_at(&heats, 0, 1, LEFT), Some("Bob"));
        assert_eq!(name_at(&heats, 1, 2, RIGHT), Some("Alice"));
        assert_eq!(heats.lineup(0).unwrap().left_weight(), 180.0);
        assert_eq!(heats.lineup(1).unwrap().right_weight(), 150.0);
    }

    #[test]
    fn test_cross_heat_move_into_empty_either_direction() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(1, 4, LEFT), &roster).unwrap();

        // Dragging the empty end onto the occupied one pulls the person across
        let heats = mv(&heats, Location::heat(0, 2, RIGHT), Location::heat(1, 4, LEFT), &roster).unwrap();
        assert_eq!(name_at(&heats, 0, 2, RIGHT), Some("Alice"));
        assert!(!heats.lineup(1).unwrap().contains("Alice"));

        let heats = mv(&heats, Location::heat(0, 2, RIGHT), Location::heat(1, 0, LEFT), &roster).unwrap();
        assert_eq!(name_at(&heats, 1, 0, LEFT), Some("Alice"));
        assert_eq!(heats.lineup(0).unwrap().occupied_count(), 0);

        assert!(mv(&heats, Location::heat(0, 5, 0), Location::heat(1, 5, 0), &roster).is_none());
    }

    #[test]
    fn test_cross_heat_refused_rolls_back() {
        let roster = roster();
        let heats = BoatHeats::new("Ladies", 2, BoatType::Womens);
        // Bob may steer in heat 0 but cannot sit on a bench in heat 1
        let heats = mv(&heats, Location::roster(0, 1), Location::heat(0, 0, RIGHT), &roster).unwrap();
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(1, 1, LEFT), &roster).unwrap();

        assert!(mv(&heats, Location::heat(0, 0, RIGHT), Location::heat(1, 1, LEFT), &roster).is_none());
        assert!(mv(&heats, Location::heat(0, 0, RIGHT), Location::heat(1, 3, LEFT), &roster).is_none());
        assert_eq!(name_at(&heats, 0, 0, RIGHT), Some("Bob"));
        assert_eq!(name_at(&heats, 1, 1, LEFT), Some("Alice"));
    }

    #[test]
    fn test_cross_heat_duplicate_refused() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 1, LEFT), &roster).unwrap();
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(1, 1, LEFT), &roster).unwrap();

        // Alice already sits in heat 1, so moving heat 0's Alice there is refused
        assert!(mv(&heats, Location::heat(0, 1, LEFT), Location::heat(1, 5, RIGHT), &roster).is_none());
    }

    #[test]
    fn test_seated_person_is_unchanged_copy() {
        let roster = Roster::from_people(
            [Person::new("Cara", 140.0, Gender::Female)
                .with_caller(true)
                .with_race_times(150.0, 148.5)],
            crate::models::compare_by_weight,
        );
        let heats = BoatHeats::new("Dragons", 2, BoatType::Womens);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 3, LEFT), &roster).unwrap();
        let heats = mv(&heats, Location::heat(0, 3, LEFT), Location::heat(1, 0, LEFT), &roster).unwrap();

        let seated = heats.lineup(1).unwrap().person_at(0, LEFT).unwrap();
        assert_eq!(seated, &roster.all()[0]);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_to_heat_replaces_occupant() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 1, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 1, LEFT), &roster).unwrap();
        let heats = mv(&heats, Location::roster(0, 1), Location::heat(0, 1, LEFT), &roster).unwrap();

        let lineup = heats.lineup(0).unwrap();
        assert_eq!(name_at(&heats, 0, 1, LEFT), Some("Bob"));
        assert!(!lineup.contains("Alice"));
        assert_eq!(lineup.left_weight(), 180.0);
    }

    #[test]
    fn test_roster_to_heat_refused_keeps_occupant() {
        let roster = roster();
        let heats = BoatHeats::new("Ladies", 1, BoatType::Womens);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(0, 1, LEFT), &roster).unwrap();

        assert!(mv(&heats, Location::roster(0, 1), Location::heat(0, 1, LEFT), &roster).is_none());
        assert_eq!(name_at(&heats, 0, 1, LEFT), Some("Alice"));
    }

    #[test]
    fn test_roster_to_heat_empty_cell_noop() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 1, BoatType::Open);
        assert!(mv(&heats, Location::roster(4, 0), Location::heat(0, 1, LEFT), &roster).is_none());
    }

    #[test]
    fn test_heat_to_roster_unseats() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 1, BoatType::Open);
        let heats = mv(&heats, Location::roster(0, 1), Location::heat(0, 2, RIGHT), &roster).unwrap();

        let heats = mv(&heats, Location::heat(0, 2, RIGHT), Location::roster(0, 0), &roster).unwrap();
        assert_eq!(heats.lineup(0).unwrap().occupied_count(), 0);
        assert_eq!(heats.lineup(0).unwrap().right_weight(), 0.0);
        assert!(roster.find("Bob").is_some());

        assert!(mv(&heats, Location::heat(0, 2, RIGHT), Location::roster(0, 0), &roster).is_none());
    }

    #[test]
    fn test_roster_to_roster_noop() {
        let heats = BoatHeats::new("Dragons", 1, BoatType::Open);
        assert!(mv(&heats, Location::roster(0, 0), Location::roster(0, 1), &roster()).is_none());
    }

    #[test]
    fn test_invalid_coordinates_are_errors() {
        let roster = roster();
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let bad_row = MoveCommand::new(Location::roster(0, 0), Location::heat(0, LINEUP_ROWS, 0));
        assert_eq!(
            heats.move_person(&bad_row, &roster),
            Err(LineupError::InvalidCoordinate { row: LINEUP_ROWS, col: 0 })
        );

        let bad_heat = MoveCommand::new(Location::heat(0, 1, 0), Location::heat(7, 1, 0));
        assert_eq!(heats.move_person(&bad_heat, &roster), Err(LineupError::UnknownHeat(7)));

        let bad_col = MoveCommand::new(Location::heat(1, 1, 0), Location::heat(1, 1, 3));
        assert!(heats.move_person(&bad_col, &roster).is_err());

        // The roster grid is two columns wide
        let bad_roster_col = MoveCommand::new(Location::roster(0, 2), Location::heat(0, 1, 0));
        assert_eq!(
            heats.move_person(&bad_roster_col, &roster),
            Err(LineupError::InvalidCoordinate { row: 0, col: 2 })
        );
        // A row past the end of the roster is just an empty cell
        let past_end = MoveCommand::new(Location::roster(40, 1), Location::heat(0, 1, 0));
        assert_eq!(heats.move_person(&past_end, &roster), Ok(None));
    }

    #[test]
    fn test_set_lineup_checks_type_and_index() {
        let mut heats = BoatHeats::new("Dragons", 2, BoatType::Mixed);
        assert_eq!(
            heats.set_lineup(0, Lineup::new(BoatType::Open)),
            Err(LineupError::BoatTypeMismatch { expected: BoatType::Mixed, found: BoatType::Open })
        );
        assert_eq!(heats.set_lineup(2, Lineup::new(BoatType::Mixed)), Err(LineupError::UnknownHeat(2)));

        let mut lineup = Lineup::new(BoatType::Mixed);
        lineup.add_person(1, LEFT, alice()).unwrap();
        heats.set_lineup(1, lineup).unwrap();
        assert_eq!(name_at(&heats, 1, 1, LEFT), Some("Alice"));
    }

    #[test]
    fn test_set_lineup_rejects_other_row_count() {
        let mut heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let mut short = Lineup::with_rows(4, BoatType::Open);
        short.add_person(1, LEFT, alice()).unwrap();
        assert_eq!(
            heats.set_lineup(0, short),
            Err(LineupError::ShapeMismatch { expected: LINEUP_ROWS, found: 4 })
        );
        assert_eq!(heats.lineup(0).unwrap().occupied_count(), 0);

        // Every heat keeps the same shape, so a seat in the last row still exports
        let mut full = Lineup::new(BoatType::Open);
        full.add_person(LINEUP_ROWS - 1, RIGHT, bob()).unwrap();
        full.add_person(0, RIGHT, Person::new("Stu", 190.0, Gender::Male)).unwrap();
        heats.set_lineup(1, full).unwrap();
        assert!(heats.lineups().iter().all(|l| l.rows() == LINEUP_ROWS));

        let sheet = heats.mastersheet_str();
        assert!(sheet.contains("Bob"));
        assert!(sheet.contains("Stu"));
        assert_eq!(sheet.lines().count(), 1 + LINEUP_ROWS + 2);
    }

    // -------------------------------------------------------------------------
    // Mastersheet
    // -------------------------------------------------------------------------

    #[test]
    fn test_mastersheet_two_empty_heats() {
        let heats = BoatHeats::new("Dragons", 2, BoatType::Open);
        let sheet = heats.mastersheet_str();
        let lines: Vec<&str> = sheet.split('\n').collect();

        assert_eq!(lines[0], "Open Heat 1\t\t\t\tOpen Heat 2\t\t\t\t");
        assert_eq!(lines[0].matches("Heat").count(), 2);
        assert_eq!(lines.len(), 1 + LINEUP_ROWS + 2);
        assert_eq!(lines[1], "Caller\t\t\t\tCaller\t\t\t\t");
        assert_eq!(lines[2], "Row\tLeft\tRight\t\tRow\tLeft\tRight\t\t");
        assert_eq!(lines[LINEUP_ROWS + 2], "Steer\t\t\t\tSteer\t\t\t\t");
    }

    #[test]
    fn test_mastersheet_names_per_heat() {
        let roster = roster();
        let heats = BoatHeats::new("Mix", 2, BoatType::Mixed);
        let heats = mv(&heats, Location::roster(0, 0), Location::heat(1, 1, LEFT), &roster).unwrap();
        let heats = mv(&heats, Location::roster(0, 1), Location::heat(0, 0, RIGHT), &roster).unwrap();

        let sheet = heats.mastersheet_str();
        let lines: Vec<&str> = sheet.split('\n').collect();
        assert!(lines[0].starts_with("Mixed Heat 1\t"));
        assert_eq!(lines[3], "1\t\t\t\t1\tAlice\t\t\t");
        assert_eq!(lines[LINEUP_ROWS + 2], "Steer\t\tBob\t\tSteer\t\t\t\t");
    }

    #[test]
    fn test_mastersheet_no_heats() {
        assert_eq!(BoatHeats::new("Empty", 0, BoatType::Open).mastersheet_str(), "");
    }
}
