//! The pool of people available to seat, kept in a fixed order.

use std::cmp::Ordering;

use crate::models::{compare_by_weight, Person};
use crate::utils::contains_ignore_case;

/// Columns in the roster's grid view; a roster cell is `row * 2 + col`.
pub const ROSTER_COLUMNS: usize = 2;

/// Ordering policy for a roster.
pub type PersonComparator = fn(&Person, &Person) -> Ordering;

/// People sorted by a comparator chosen at construction.
///
/// Insertion is stable: people that compare equal keep the order they were
/// added in. The roster does not reject duplicate names.
#[derive(Debug, Clone)]
pub struct Roster {
    people: Vec<Person>,
    compare: PersonComparator,
}

impl Default for Roster {
    fn default() -> Self {
        Self::by_weight()
    }
}

impl Roster {
    pub fn new(compare: PersonComparator) -> Self {
        Self {
            people: Vec::new(),
            compare,
        }
    }

    /// Lightest first.
    pub fn by_weight() -> Self {
        Self::new(compare_by_weight)
    }

    pub fn from_people(people: impl IntoIterator<Item = Person>, compare: PersonComparator) -> Self {
        let mut roster = Self::new(compare);
        roster.extend(people);
        roster
    }

    pub fn insert(&mut self, person: Person) {
        let compare = self.compare;
        // After every element that sorts at or before the newcomer
        let idx = self
            .people
            .partition_point(|existing| compare(existing, &person) != Ordering::Greater);
        self.people.insert(idx, person);
    }

    pub fn extend(&mut self, people: impl IntoIterator<Item = Person>) {
        for person in people {
            self.insert(person);
        }
    }

    pub fn all(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    /// People whose name contains `query`, ignoring case, in roster order.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Person> + 'a {
        self.people.iter().filter(move |p| contains_ignore_case(&p.name, query))
    }

    /// Person shown at (row, col) of the two-column roster grid.
    pub fn at_cell(&self, row: usize, col: usize) -> Option<&Person> {
        if col >= ROSTER_COLUMNS {
            return None;
        }
        row.checked_mul(ROSTER_COLUMNS)
            .and_then(|base| base.checked_add(col))
            .and_then(|idx| self.people.get(idx))
    }

    /// The roster laid out two per row for display; the last row may be short.
    pub fn grid(&self) -> Vec<[Option<&Person>; ROSTER_COLUMNS]> {
        self.people
            .chunks(ROSTER_COLUMNS)
            .map(|chunk| [chunk.first(), chunk.get(1)])
            .collect()
    }
}
