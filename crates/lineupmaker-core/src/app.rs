//! Application state for the lineup maker.
//!
//! `LineupApp` owns the roster, the boats and their heats, the editable boat
//! list, and the background roster refresh. A UI holds one `LineupApp`, calls
//! `check_background_tasks` from its event loop, and routes every seating
//! change through `move_person`.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::heats::{BoatHeats, MoveCommand};
use crate::ingest::{RosterClient, RosterPoller, RosterUpdate};
use crate::models::{compare_by_weight, BoatType, Person};
use crate::registry::{BoatInput, BoatRegistry};
use crate::roster::Roster;
use crate::utils::{format_age_minutes, truncate_string};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the roster update channel.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Longest failure text shown in the status message.
const MAX_STATUS_LENGTH: usize = 120;

/// An edit to one row of the boat list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoatInputChange {
    Name(String),
    Type(BoatType),
}

pub struct LineupApp {
    pub config: Config,
    roster: Roster,
    boats: BoatRegistry,
    /// Always ends in exactly one blank row for adding a boat
    boat_inputs: Vec<BoatInput>,
    active_boat: Option<String>,

    // Background roster refresh
    roster_rx: mpsc::Receiver<RosterUpdate>,
    roster_tx: mpsc::Sender<RosterUpdate>,
    poller: Option<RosterPoller>,
    roster_loaded_at: Option<DateTime<Utc>>,

    pub status_message: Option<String>,
}

impl LineupApp {
    pub fn new(config: Config) -> Self {
        let (roster_tx, roster_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        debug!(heats_per_boat = config.heats_per_boat, "LineupApp created");

        Self {
            config,
            roster: Roster::by_weight(),
            boats: BoatRegistry::new(),
            boat_inputs: vec![BoatInput::default()],
            active_boat: None,
            roster_rx,
            roster_tx,
            poller: None,
            roster_loaded_at: None,
            status_message: None,
        }
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Start polling the configured roster source, replacing any running poller.
    /// Must be called from within a tokio runtime.
    pub fn start_roster_refresh(&mut self) -> Result<()> {
        let Some(source) = self.config.roster_source() else {
            warn!("No roster source configured");
            self.status_message = Some("No roster source configured".to_string());
            return Ok(());
        };

        self.stop_roster_refresh();
        let client = RosterClient::new()?;
        self.poller = Some(RosterPoller::spawn(
            source,
            client,
            self.config.refresh_interval(),
            self.roster_tx.clone(),
        ));
        self.status_message = Some("Loading roster...".to_string());
        Ok(())
    }

    pub fn stop_roster_refresh(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
            debug!("Roster refresh stopped");
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    /// Apply every roster update the background task has sent so far.
    pub fn check_background_tasks(&mut self) {
        let mut updates = Vec::new();
        while let Ok(update) = self.roster_rx.try_recv() {
            updates.push(update);
        }

        for update in updates {
            match update {
                RosterUpdate::Loaded(people) => self.replace_roster(people),
                RosterUpdate::Failed(msg) => {
                    warn!(error = %msg, "Roster refresh failed");
                    self.status_message = Some(format!(
                        "Roster refresh failed: {}",
                        truncate_string(&msg, MAX_STATUS_LENGTH)
                    ));
                }
            }
        }
    }

    /// Swap in a freshly loaded roster. Seated people are left where they are.
    pub fn replace_roster(&mut self, people: Vec<Person>) {
        self.roster = Roster::from_people(people, compare_by_weight);
        self.roster_loaded_at = Some(Utc::now());
        info!(count = self.roster.len(), "Roster replaced");
        self.status_message = Some(format!("Loaded {} people", self.roster.len()));
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// How long ago the roster was loaded, e.g. "5m ago".
    pub fn roster_age(&self) -> Option<String> {
        self.roster_loaded_at
            .map(|at| format_age_minutes((Utc::now() - at).num_minutes()))
    }

    // ========================================================================
    // Boats
    // ========================================================================

    pub fn boat_inputs(&self) -> &[BoatInput] {
        &self.boat_inputs
    }

    pub fn boats(&self) -> &BoatRegistry {
        &self.boats
    }

    /// Edit one row of the boat list and rebuild the boats.
    /// Returns false if `index` is past the end of the list.
    pub fn update_boat_input(&mut self, index: usize, change: BoatInputChange) -> bool {
        if index >= self.boat_inputs.len() {
            warn!(index, rows = self.boat_inputs.len(), "Boat row out of range");
            return false;
        }

        let input = &mut self.boat_inputs[index];
        match change {
            BoatInputChange::Name(name) => input.name = name,
            BoatInputChange::Type(boat_type) => input.boat_type = boat_type,
        }

        self.normalize_boat_inputs();
        self.boats.sync(&self.boat_inputs, self.config.heats_per_boat);

        let active_gone = self
            .active_boat
            .as_deref()
            .is_some_and(|name| !self.boats.contains(name));
        if active_gone {
            if let Some(name) = self.active_boat.take() {
                debug!(boat = %name, "Active boat removed");
            }
        }
        true
    }

    /// Keep exactly one trailing blank row.
    fn normalize_boat_inputs(&mut self) {
        while self.boat_inputs.len() > 1
            && self.boat_inputs[self.boat_inputs.len() - 1].is_blank()
            && self.boat_inputs[self.boat_inputs.len() - 2].is_blank()
        {
            self.boat_inputs.pop();
        }
        if self.boat_inputs.last().map_or(true, |row| !row.is_blank()) {
            self.boat_inputs.push(BoatInput::default());
        }
    }

    pub fn select_boat(&mut self, name: &str) -> bool {
        if self.boats.contains(name) {
            self.active_boat = Some(name.to_string());
            true
        } else {
            warn!(boat = %name, "Cannot select unknown boat");
            false
        }
    }

    pub fn active_boat(&self) -> Option<&str> {
        self.active_boat.as_deref()
    }

    pub fn active_heats(&self) -> Option<&BoatHeats> {
        self.active_boat.as_deref().and_then(|name| self.boats.get(name))
    }

    // ========================================================================
    // Seating
    // ========================================================================

    /// Apply a move to the active boat. Returns whether seating changed.
    pub fn move_person(&mut self, command: &MoveCommand) -> crate::error::Result<bool> {
        let Some(boat) = self.active_boat.as_deref() else {
            debug!("Move ignored, no active boat");
            return Ok(false);
        };
        self.boats.apply_move(boat, command, &self.roster)
    }

    /// Mastersheet text for the active boat, ready to paste into a sheet.
    pub fn active_mastersheet(&self) -> Option<String> {
        self.active_heats().map(|heats| heats.mastersheet_str())
    }

    pub fn person_counts(&self) -> BTreeMap<String, usize> {
        self.boats.person_counts()
    }
}

impl Drop for LineupApp {
    fn drop(&mut self) {
        self.stop_roster_refresh();
    }
}
