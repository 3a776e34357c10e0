use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// # session within a round
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum SessionKind {
    Race,
    Qualifying,
    Sprint,
}

impl SessionKind {
    /// the short session code, `R`, `Q` or `S`
    pub fn code(&self) -> &'static str {
        match self {
            SessionKind::Race => "R",
            SessionKind::Qualifying => "Q",
            SessionKind::Sprint => "S",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Sprint => "Sprint",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SessionKind {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "R" | "Race" => Ok(SessionKind::Race),
            "Q" | "Qualifying" => Ok(SessionKind::Qualifying),
            "S" | "Sprint" => Ok(SessionKind::Sprint),
            other => Err(format!("unknown session code `{}`", other)),
        }
    }
}

/// # one classified row of a race or sprint
/// `position` is `None` for rows the provider did not classify.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SessionResult {
    pub position: Option<u32>,
    pub driver_number: String,
    pub driver_id: String,
    pub full_name: String,
    pub abbreviation: String,
    pub team_name: String,
    pub time: Option<String>,
    pub status: String,
    pub fastest_lap_time: Option<Duration>,
}

/// # one row of a qualifying classification
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct QualifyingResult {
    pub position: Option<u32>,
    pub driver_number: String,
    pub full_name: String,
    pub abbreviation: String,
    pub team_name: String,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}
