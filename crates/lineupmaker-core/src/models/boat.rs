use serde::{Deserialize, Serialize};

/// Division a boat races in. Decides which seating rules its lineups enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum BoatType {
    #[default]
    Open,
    Womens,
    Mixed,
}

impl BoatType {
    /// Parse the boat type picker value. Unknown or empty values are Open.
    pub fn from_str(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("womens") | Some("women") | Some("women's") => BoatType::Womens,
            Some("mixed") => BoatType::Mixed,
            _ => BoatType::Open,
        }
    }

    pub fn all() -> [BoatType; 3] {
        [BoatType::Open, BoatType::Womens, BoatType::Mixed]
    }
}

impl std::fmt::Display for BoatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoatType::Open => write!(f, "Open"),
            BoatType::Womens => write!(f, "Womens"),
            BoatType::Mixed => write!(f, "Mixed"),
        }
    }
}
