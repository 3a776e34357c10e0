use std::path::Path;

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::errors::{CustomResult, Error, FileDecodeSnafu, FileReadSnafu};
use crate::modules::models::driver::Driver;
use crate::modules::models::event::Event;
use crate::modules::models::lap::{LapTiming, SectorTiming, TyreLap};
use crate::modules::models::race_control::RaceControlMessage;
use crate::modules::models::session::{QualifyingResult, SessionKind, SessionResult};
use crate::modules::models::weather::WeatherSample;
use crate::modules::provider::DataProvider;

/// # state of a recorded table
/// lets a snapshot describe sessions the upstream had no data for, or failed on.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Recorded<T> {
    Available(T),
    Unavailable,
    Failing(String),
}

impl<T: Clone> Recorded<T> {
    fn fetch(&self) -> CustomResult<Option<T>> {
        match self {
            Recorded::Available(data) => Ok(Some(data.clone())),
            Recorded::Unavailable => Ok(None),
            Recorded::Failing(message) => Err(Error::upstream(message.clone())),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct DriverLaps {
    pub driver_number: String,
    #[serde(default)]
    pub timings: Vec<LapTiming>,
    #[serde(default)]
    pub sectors: Vec<SectorTiming>,
    #[serde(default)]
    pub tyres: Vec<TyreLap>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SessionSnapshot {
    pub session: SessionKind,
    pub results: Recorded<Vec<SessionResult>>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RoundSnapshot {
    pub round: u32,
    #[serde(default)]
    pub sessions: Vec<SessionSnapshot>,
    #[serde(default)]
    pub qualifying: Option<Vec<QualifyingResult>>,
    #[serde(default)]
    pub laps: Vec<DriverLaps>,
    #[serde(default)]
    pub weather: Vec<WeatherSample>,
    #[serde(default)]
    pub race_control: Vec<RaceControlMessage>,
    #[serde(default)]
    pub coordinates: Vec<(f64, f64)>,
}

impl RoundSnapshot {
    fn new(round: u32) -> RoundSnapshot {
        RoundSnapshot {
            round,
            sessions: Vec::new(),
            qualifying: None,
            laps: Vec::new(),
            weather: Vec::new(),
            race_control: Vec::new(),
            coordinates: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SeasonSnapshot {
    pub season: i32,
    pub schedule: Recorded<Vec<Event>>,
    #[serde(default)]
    pub rounds: Vec<RoundSnapshot>,
}

/// # frozen provider data
/// the format of the file behind `SNAPSHOT_PATH`.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct Snapshot {
    pub seasons: Vec<SeasonSnapshot>,
}

/// # provider serving frozen data
/// everything missing from the snapshot is reported as "no data",
/// a season without a schedule fails like an unknown season upstream.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    snapshot: Snapshot,
}

impl MemoryProvider {
    pub fn new() -> MemoryProvider {
        MemoryProvider::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> MemoryProvider {
        MemoryProvider { snapshot }
    }

    /// # load a snapshot file
    ///
    /// ## Arguments
    /// * `path` - json file containing a `Snapshot`
    pub fn load(path: &Path) -> CustomResult<MemoryProvider> {
        let content = std::fs::read_to_string(path).context(FileReadSnafu { path })?;
        let snapshot: Snapshot = serde_json::from_str(&content).context(FileDecodeSnafu { path })?;

        info!(target:"memory_provider:load", "loaded snapshot with {} seasons from {}", snapshot.seasons.len(), path.display());
        Ok(MemoryProvider::from_snapshot(snapshot))
    }

    pub fn with_schedule(mut self, season: i32, schedule: Vec<Event>) -> MemoryProvider {
        self.season_mut(season).schedule = Recorded::Available(schedule);
        self
    }

    pub fn with_failing_schedule(mut self, season: i32, message: &str) -> MemoryProvider {
        self.season_mut(season).schedule = Recorded::Failing(message.to_string());
        self
    }

    pub fn with_session(mut self, season: i32, round: u32, session: SessionKind, results: Recorded<Vec<SessionResult>>) -> MemoryProvider {
        let round = self.round_mut(season, round);
        round.sessions.retain(|recorded| recorded.session != session);
        round.sessions.push(SessionSnapshot { session, results });
        self
    }

    pub fn with_qualifying(mut self, season: i32, round: u32, results: Vec<QualifyingResult>) -> MemoryProvider {
        self.round_mut(season, round).qualifying = Some(results);
        self
    }

    pub fn with_driver_laps(mut self, season: i32, round: u32, laps: DriverLaps) -> MemoryProvider {
        let round = self.round_mut(season, round);
        round.laps.retain(|recorded| recorded.driver_number != laps.driver_number);
        round.laps.push(laps);
        self
    }

    pub fn with_weather(mut self, season: i32, round: u32, weather: Vec<WeatherSample>) -> MemoryProvider {
        self.round_mut(season, round).weather = weather;
        self
    }

    pub fn with_race_control(mut self, season: i32, round: u32, messages: Vec<RaceControlMessage>) -> MemoryProvider {
        self.round_mut(season, round).race_control = messages;
        self
    }

    pub fn with_coordinates(mut self, season: i32, round: u32, coordinates: Vec<(f64, f64)>) -> MemoryProvider {
        self.round_mut(season, round).coordinates = coordinates;
        self
    }

    fn season_mut(&mut self, season: i32) -> &mut SeasonSnapshot {
        let index = match self.snapshot.seasons.iter().position(|s| s.season == season) {
            Some(index) => index,
            None => {
                self.snapshot.seasons.push(SeasonSnapshot {
                    season,
                    schedule: Recorded::Unavailable,
                    rounds: Vec::new(),
                });
                self.snapshot.seasons.len() - 1
            }
        };

        &mut self.snapshot.seasons[index]
    }

    fn round_mut(&mut self, season: i32, round: u32) -> &mut RoundSnapshot {
        let season = self.season_mut(season);
        let index = match season.rounds.iter().position(|r| r.round == round) {
            Some(index) => index,
            None => {
                season.rounds.push(RoundSnapshot::new(round));
                season.rounds.len() - 1
            }
        };

        &mut season.rounds[index]
    }

    fn round(&self, season: i32, round: u32) -> Option<&RoundSnapshot> {
        self.snapshot
            .seasons
            .iter()
            .find(|s| s.season == season)
            .and_then(|s| s.rounds.iter().find(|r| r.round == round))
    }

    /// resolve a driver identifier through the race classification, falling back to the raw number
    fn driver_laps(&self, season: i32, round: u32, driver: &str) -> Option<&DriverLaps> {
        let round = self.round(season, round)?;

        let number = round
            .sessions
            .iter()
            .find(|s| s.session == SessionKind::Race)
            .and_then(|s| match &s.results {
                Recorded::Available(results) => Driver::find(results, driver).map(|d| d.number),
                _ => None,
            })
            .unwrap_or_else(|| driver.to_string());

        round.laps.iter().find(|laps| laps.driver_number == number)
    }
}

#[async_trait]
impl DataProvider for MemoryProvider {
    async fn event_schedule(&self, season: i32) -> CustomResult<Vec<Event>> {
        let schedule = self
            .snapshot
            .seasons
            .iter()
            .find(|s| s.season == season)
            .map(|s| s.schedule.fetch())
            .unwrap_or(Ok(None))?;

        match schedule {
            Some(schedule) => Ok(schedule),
            None => Err(Error::upstream(format!("no schedule recorded for season {}", season))),
        }
    }

    async fn session_results(&self, season: i32, round: u32, session: SessionKind) -> CustomResult<Option<Vec<SessionResult>>> {
        match self
            .round(season, round)
            .and_then(|r| r.sessions.iter().find(|s| s.session == session))
        {
            Some(recorded) => recorded.results.fetch(),
            None => Ok(None),
        }
    }

    async fn qualifying_results(&self, season: i32, round: u32) -> CustomResult<Option<Vec<QualifyingResult>>> {
        Ok(self.round(season, round).and_then(|r| r.qualifying.clone()))
    }

    async fn lap_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<LapTiming>> {
        Ok(self
            .driver_laps(season, round, driver)
            .map(|laps| laps.timings.clone())
            .unwrap_or_default())
    }

    async fn sector_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<SectorTiming>> {
        Ok(self
            .driver_laps(season, round, driver)
            .map(|laps| laps.sectors.clone())
            .unwrap_or_default())
    }

    async fn tyre_laps(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<TyreLap>> {
        Ok(self
            .driver_laps(season, round, driver)
            .map(|laps| laps.tyres.clone())
            .unwrap_or_default())
    }

    async fn weather(&self, season: i32, round: u32) -> CustomResult<Vec<WeatherSample>> {
        Ok(self.round(season, round).map(|r| r.weather.clone()).unwrap_or_default())
    }

    async fn race_control_messages(&self, season: i32, round: u32) -> CustomResult<Vec<RaceControlMessage>> {
        Ok(self.round(season, round).map(|r| r.race_control.clone()).unwrap_or_default())
    }

    async fn circuit_coordinates(&self, season: i32, round: u32) -> CustomResult<Vec<(f64, f64)>> {
        Ok(self.round(season, round).map(|r| r.coordinates.clone()).unwrap_or_default())
    }
}
