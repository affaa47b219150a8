use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// Lenient parse of a sheet cell. Anything unrecognised is `Unspecified`.
    pub fn parse(s: Option<&str>) -> Self {
        let Some(raw) = s else {
            return Gender::Unspecified;
        };
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "men" => Gender::Male,
            "female" | "f" | "woman" | "women" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// OC1 400m times in seconds, first and second attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct RaceTimes(pub f64, pub f64);

impl RaceTimes {
    /// Best non-zero time, if any was recorded
    pub fn best(&self) -> Option<f64> {
        [self.0, self.1]
            .into_iter()
            .filter(|t| *t > 0.0)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// One paddler. Lineups key membership on `name`.
///
/// Treated as a value: lineups and the roster hold their own copies and never
/// change a person after seating. Build variants with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub race_times: RaceTimes,
    #[serde(default)]
    pub is_steer: bool,
    #[serde(default)]
    pub is_caller: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, weight: f64, gender: Gender) -> Self {
        Self {
            name: name.into(),
            weight,
            gender,
            race_times: RaceTimes::default(),
            is_steer: false,
            is_caller: false,
        }
    }

    pub fn with_race_times(mut self, first: f64, second: f64) -> Self {
        self.race_times = RaceTimes(first, second);
        self
    }

    pub fn with_steer(mut self, is_steer: bool) -> Self {
        self.is_steer = is_steer;
        self
    }

    pub fn with_caller(mut self, is_caller: bool) -> Self {
        self.is_caller = is_caller;
        self
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    pub fn is_male(&self) -> bool {
        self.gender == Gender::Male
    }

    /// Short role tag for display: "C", "S", "C/S" or empty
    pub fn role_tag(&self) -> &'static str {
        match (self.is_caller, self.is_steer) {
            (true, true) => "C/S",
            (true, false) => "C",
            (false, true) => "S",
            (false, false) => "",
        }
    }
}

/// Comparator used to keep a roster ordered lightest first.
pub fn compare_by_weight(a: &Person, b: &Person) -> Ordering {
    a.weight.total_cmp(&b.weight)
}

/// Alphabetical comparator, case-insensitive.
pub fn compare_by_name(a: &Person, b: &Person) -> Ordering {
    crate::utils::cmp_ignore_case(&a.name, &b.name)
}
