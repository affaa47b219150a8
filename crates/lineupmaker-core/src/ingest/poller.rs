//! Background roster refresh.
//!
//! The poller owns one tokio task that reloads the roster source on a fixed
//! interval and reports each outcome over an mpsc channel. Fetches are awaited
//! inside the loop, so at most one load is in flight at a time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::models::Person;

use super::{RosterClient, RosterSource};

/// Outcome of one roster load, sent back to the owning app.
#[derive(Debug)]
pub enum RosterUpdate {
    Loaded(Vec<Person>),
    Failed(String),
}

pub struct RosterPoller {
    handle: JoinHandle<()>,
}

impl RosterPoller {
    /// Start polling `source`. The first load runs immediately.
    ///
    /// A zero `every` loads once and ends the task.
    pub fn spawn(
        source: RosterSource,
        client: RosterClient,
        every: Duration,
        tx: mpsc::Sender<RosterUpdate>,
    ) -> Self {
        info!(source = %source, every_secs = every.as_secs(), "Starting roster refresh");

        let handle = tokio::spawn(async move {
            if every.is_zero() {
                Self::load_once(&source, &client, &tx).await;
                return;
            }

            let mut timer = interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                timer.tick().await;
                if !Self::load_once(&source, &client, &tx).await {
                    debug!("Roster channel closed, stopping refresh");
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Load the source and send the outcome. Returns false once the receiver is gone.
    async fn load_once(
        source: &RosterSource,
        client: &RosterClient,
        tx: &mpsc::Sender<RosterUpdate>,
    ) -> bool {
        let update = match source.load(client).await {
            Ok(people) => {
                debug!(source = %source, count = people.len(), "Roster loaded");
                RosterUpdate::Loaded(people)
            }
            Err(e) => {
                let msg = format!("{:#}", e);
                error!(source = %source, error = %msg, "Roster refresh failed");
                RosterUpdate::Failed(msg)
            }
        };

        if let Err(e) = tx.send(update).await {
            error!(error = %e, "Failed to send roster update - channel closed");
            return false;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for RosterPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
