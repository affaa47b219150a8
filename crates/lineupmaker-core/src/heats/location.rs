use serde::{Deserialize, Serialize};

/// A cell the UI can drag from or drop onto.
///
/// Serialized the way the drag payload carries it:
/// `{"type":"heat","heatIdx":0,"row":1,"col":0}` or `{"type":"roster","row":0,"col":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Location {
    #[serde(rename_all = "camelCase")]
    Heat { heat_idx: usize, row: usize, col: usize },
    Roster { row: usize, col: usize },
}

impl Location {
    pub fn heat(heat_idx: usize, row: usize, col: usize) -> Self {
        Location::Heat { heat_idx, row, col }
    }

    pub fn roster(row: usize, col: usize) -> Self {
        Location::Roster { row, col }
    }

    pub fn heat_idx(&self) -> Option<usize> {
        match self {
            Location::Heat { heat_idx, .. } => Some(*heat_idx),
            Location::Roster { .. } => None,
        }
    }
}

/// One drag-and-drop gesture: the only mutation the UI may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct MoveCommand {
    pub from: Location,
    pub to: Location,
}

impl MoveCommand {
    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }
}
