use std::collections::HashSet;

use chrono::NaiveDate;
use log::info;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::general::Helpers;
use crate::modules::helpers::time::TimeHelpers;
use crate::modules::models::event::{Event, EventFormat};
use crate::modules::models::lap::LapTiming;
use crate::modules::models::session::{QualifyingResult, SessionKind, SessionResult};

/// the api caps page sizes at 100, which is more than a race has laps or entrants.
const PAGE_LIMIT: u32 = 100;

/// # client for the ergast compatible jolpica api
/// schedules, classifications, lap timings and pit stops.
pub struct ErgastApi {
    client: reqwest::Client,
    base_url: String,
}

impl ErgastApi {
    pub fn new(client: reqwest::Client, base_url: &str) -> ErgastApi {
        ErgastApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_races(&self, path: &str) -> CustomResult<Vec<ErgastRace>> {
        let url = format!("{}/{}.json?limit={}", self.base_url, path, PAGE_LIMIT);
        let response: WebResponse = Helpers::fetch_json(&self.client, &url).await?;

        Ok(response.data.race_table.races)
    }

    pub async fn get_schedule(&self, season: i32) -> CustomResult<Vec<Event>> {
        info!(target:"ergast_api:get_schedule", "Getting schedule for {} from api", season);

        self.get_races(&season.to_string())
            .await?
            .iter()
            .map(ErgastRace::to_event)
            .collect()
    }

    /// # get a race or sprint classification
    /// `None` when the api knows no classification for the session.
    pub async fn get_results(&self, season: i32, round: u32, session: SessionKind) -> CustomResult<Option<Vec<SessionResult>>> {
        info!(target:"ergast_api:get_results", "Getting {} results for {} round {} from api", session, season, round);

        let endpoint = match session {
            SessionKind::Race => "results",
            SessionKind::Sprint => "sprint",
            SessionKind::Qualifying => {
                return Err(Error::upstream("qualifying has no race classification, use the qualifying results"));
            }
        };

        let races = self.get_races(&format!("{}/{}/{}", season, round, endpoint)).await?;
        let race = match races.into_iter().next() {
            Some(race) => race,
            None => return Ok(None),
        };

        let rows = match session {
            SessionKind::Sprint => race.sprint_results,
            _ => race.results,
        };
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(rows.iter().map(ErgastResult::to_session_result).collect()))
    }

    pub async fn get_qualifying(&self, season: i32, round: u32) -> CustomResult<Option<Vec<QualifyingResult>>> {
        info!(target:"ergast_api:get_qualifying", "Getting qualifying for {} round {} from api", season, round);

        let races = self.get_races(&format!("{}/{}/qualifying", season, round)).await?;
        let rows = races
            .into_iter()
            .next()
            .map(|race| race.qualifying_results)
            .unwrap_or_default();
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(rows.iter().map(ErgastQualifying::to_qualifying_result).collect()))
    }

    /// # lap timings of a single driver
    /// a lap is flagged as an in lap when the driver stopped at the end of it.
    pub async fn get_lap_timings(&self, season: i32, round: u32, driver_id: &str) -> CustomResult<Vec<LapTiming>> {
        info!(target:"ergast_api:get_lap_timings", "Getting laps of {} for {} round {} from api", driver_id, season, round);

        let laps = self
            .get_races(&format!("{}/{}/drivers/{}/laps", season, round, driver_id))
            .await?
            .into_iter()
            .next()
            .map(|race| race.laps)
            .unwrap_or_default();
        if laps.is_empty() {
            return Ok(Vec::new());
        }

        let pit_laps: HashSet<u32> = self
            .get_races(&format!("{}/{}/drivers/{}/pitstops", season, round, driver_id))
            .await?
            .into_iter()
            .next()
            .map(|race| race.pit_stops)
            .unwrap_or_default()
            .iter()
            .filter_map(|stop| stop.lap.parse().ok())
            .collect();

        Ok(ErgastLap::to_lap_timings(&laps, driver_id, &pit_laps))
    }
}

#[derive(Deserialize, Debug)]
struct WebResponse {
    #[serde(rename = "MRData")]
    data: MrData,
}

#[derive(Deserialize, Debug)]
struct MrData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Deserialize, Debug)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<ErgastRace>,
}

#[derive(Deserialize, Debug)]
pub struct ErgastRace {
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: ErgastCircuit,
    pub date: String,
    #[serde(rename = "Sprint")]
    pub sprint: Option<IgnoredAny>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ErgastResult>,
    #[serde(rename = "SprintResults", default)]
    pub sprint_results: Vec<ErgastResult>,
    #[serde(rename = "QualifyingResults", default)]
    pub qualifying_results: Vec<ErgastQualifying>,
    #[serde(rename = "Laps", default)]
    pub laps: Vec<ErgastLap>,
    #[serde(rename = "PitStops", default)]
    pub pit_stops: Vec<ErgastPitStop>,
}

impl ErgastRace {
    pub fn to_event(&self) -> CustomResult<Event> {
        let round = self
            .round
            .parse::<u32>()
            .map_err(|_| Error::upstream(format!("invalid round number `{}`", self.round)))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| Error::upstream(format!("invalid date `{}` for round {}", self.date, round)))?;

        Ok(Event {
            round,
            name: self.race_name.clone(),
            country: self.circuit.location.country.clone(),
            location: self.circuit.location.locality.clone(),
            date,
            format: if self.sprint.is_some() {
                EventFormat::Sprint
            } else {
                EventFormat::Conventional
            },
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct ErgastCircuit {
    #[serde(rename = "Location")]
    pub location: ErgastLocation,
}

#[derive(Deserialize, Debug)]
pub struct ErgastLocation {
    pub locality: String,
    pub country: String,
}

#[derive(Deserialize, Debug)]
pub struct ErgastDriver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    pub code: Option<String>,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

impl ErgastDriver {
    fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// older seasons have no driver codes, fall back to the start of the family name
    fn abbreviation(&self) -> String {
        match &self.code {
            Some(code) => code.clone(),
            None => self.family_name.chars().take(3).collect::<String>().to_uppercase(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ErgastConstructor {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct ErgastTime {
    pub time: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ErgastFastestLap {
    #[serde(rename = "Time")]
    pub time: Option<ErgastTime>,
}

#[derive(Deserialize, Debug)]
pub struct ErgastResult {
    pub number: String,
    pub position: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: ErgastDriver,
    #[serde(rename = "Constructor")]
    pub constructor: ErgastConstructor,
    pub status: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<ErgastTime>,
    #[serde(rename = "FastestLap")]
    pub fastest_lap: Option<ErgastFastestLap>,
}

impl ErgastResult {
    pub fn to_session_result(&self) -> SessionResult {
        SessionResult {
            position: self.position.as_deref().and_then(|p| p.parse().ok()),
            driver_number: self.number.clone(),
            driver_id: self.driver.driver_id.clone(),
            full_name: self.driver.full_name(),
            abbreviation: self.driver.abbreviation(),
            team_name: self.constructor.name.clone(),
            time: self.time.as_ref().and_then(|t| t.time.clone()),
            status: self.status.clone().unwrap_or_default(),
            fastest_lap_time: self
                .fastest_lap
                .as_ref()
                .and_then(|lap| lap.time.as_ref())
                .and_then(|time| time.time.as_deref())
                .and_then(TimeHelpers::parse_lap_time),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ErgastQualifying {
    pub number: String,
    pub position: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: ErgastDriver,
    #[serde(rename = "Constructor")]
    pub constructor: ErgastConstructor,
    #[serde(rename = "Q1")]
    pub q1: Option<String>,
    #[serde(rename = "Q2")]
    pub q2: Option<String>,
    #[serde(rename = "Q3")]
    pub q3: Option<String>,
}

impl ErgastQualifying {
    pub fn to_qualifying_result(&self) -> QualifyingResult {
        QualifyingResult {
            position: self.position.as_deref().and_then(|p| p.parse().ok()),
            driver_number: self.number.clone(),
            full_name: self.driver.full_name(),
            abbreviation: self.driver.abbreviation(),
            team_name: self.constructor.name.clone(),
            q1: self.q1.clone().filter(|t| !t.is_empty()),
            q2: self.q2.clone().filter(|t| !t.is_empty()),
            q3: self.q3.clone().filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ErgastTiming {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    pub position: Option<String>,
    pub time: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ErgastLap {
    pub number: String,
    #[serde(rename = "Timings", default)]
    pub timings: Vec<ErgastTiming>,
}

impl ErgastLap {
    fn to_lap_timings(laps: &[ErgastLap], driver_id: &str, pit_laps: &HashSet<u32>) -> Vec<LapTiming> {
        laps.iter()
            .filter_map(|lap| {
                let lap_number = lap.number.parse::<u32>().ok()?;
                let timing = lap.timings.iter().find(|t| t.driver_id == driver_id)?;

                Some(LapTiming {
                    lap_number,
                    lap_time: timing.time.as_deref().and_then(TimeHelpers::parse_lap_time),
                    position: timing.position.as_deref().and_then(|p| p.parse().ok()),
                    pit_in: pit_laps.contains(&lap_number),
                })
            })
            .collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct ErgastPitStop {
    pub lap: String,
}
