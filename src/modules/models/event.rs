use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # format of a race weekend
/// only conventional and sprint weekends count towards the championship.
/// the live provider only tells conventional and sprint weekends apart, so sprint shootout,
/// sprint qualifying and testing only show up when loaded from a snapshot.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    Conventional,
    Sprint,
    SprintShootout,
    SprintQualifying,
    Testing,
    #[serde(other)]
    Other,
}

impl EventFormat {
    pub fn is_scored(&self) -> bool {
        matches!(self, EventFormat::Conventional | EventFormat::Sprint)
    }
}

/// # a single round of a season
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Event {
    pub round: u32,
    pub name: String,
    pub country: String,
    pub location: String,
    pub date: NaiveDate,
    pub format: EventFormat,
}

impl Event {
    pub fn find_round(schedule: &[Event], round: u32) -> Option<&Event> {
        schedule.iter().find(|event| event.round == round)
    }

    pub fn scored_rounds(schedule: &[Event]) -> impl Iterator<Item = &Event> {
        schedule.iter().filter(|event| event.format.is_scored())
    }
}

/// sprint weekends of the 2024 season, `(round, event)`.
pub const SPRINT_ROUNDS_2024: [(u32, &str); 6] = [
    (4, "China"),
    (6, "Miami"),
    (11, "Austria"),
    (18, "Austin"),
    (21, "Brazil"),
    (23, "Qatar"),
];
