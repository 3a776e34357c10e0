use async_trait::async_trait;
use log::{info, warn};

use crate::config::Config;
use crate::errors::{CustomResult, Error};
use crate::modules::ergast_api::ErgastApi;
use crate::modules::models::driver::Driver;
use crate::modules::models::event::Event;
use crate::modules::models::lap::{LapTiming, SectorTiming, Stint, TyreLap};
use crate::modules::models::race_control::RaceControlMessage;
use crate::modules::models::session::{QualifyingResult, SessionKind, SessionResult};
use crate::modules::models::weather::WeatherSample;
use crate::modules::openf1_api::{OpenF1Api, OpenF1Lap};
use crate::modules::provider::DataProvider;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// # provider backed by the public apis
/// classifications and lap timings come from jolpica, telemetry like data from openf1.
pub struct LiveProvider {
    ergast: ErgastApi,
    openf1: OpenF1Api,
}

impl LiveProvider {
    pub fn new(config: &Config) -> CustomResult<LiveProvider> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| Error::upstream(format!("could not build http client: {}", error)))?;

        Ok(LiveProvider {
            ergast: ErgastApi::new(client.clone(), &config.ergast_base_url),
            openf1: OpenF1Api::new(client, &config.openf1_base_url),
        })
    }

    /// # resolve a driver from a request against the race classification
    async fn resolve_driver(&self, season: i32, round: u32, identifier: &str) -> CustomResult<Driver> {
        let results = self
            .ergast
            .get_results(season, round, SessionKind::Race)
            .await?
            .unwrap_or_default();

        match Driver::find(&results, identifier) {
            Some(driver) => Ok(driver),
            None => Err(Error::not_found(format!("driver {}", identifier))),
        }
    }

    async fn race_session_key(&self, season: i32, round: u32) -> CustomResult<u64> {
        let schedule = self.ergast.get_schedule(season).await?;
        let event = match Event::find_round(&schedule, round) {
            Some(event) => event,
            None => return Err(Error::not_found(format!("round {} of {}", round, season))),
        };

        self.openf1.get_race_session_key(season, event.date).await
    }
}

#[async_trait]
impl DataProvider for LiveProvider {
    async fn event_schedule(&self, season: i32) -> CustomResult<Vec<Event>> {
        self.ergast.get_schedule(season).await
    }

    async fn session_results(&self, season: i32, round: u32, session: SessionKind) -> CustomResult<Option<Vec<SessionResult>>> {
        self.ergast.get_results(season, round, session).await
    }

    async fn qualifying_results(&self, season: i32, round: u32) -> CustomResult<Option<Vec<QualifyingResult>>> {
        self.ergast.get_qualifying(season, round).await
    }

    async fn lap_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<LapTiming>> {
        let driver = self.resolve_driver(season, round, driver).await?;
        self.ergast.get_lap_timings(season, round, &driver.driver_id).await
    }

    async fn sector_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<SectorTiming>> {
        let driver = self.resolve_driver(season, round, driver).await?;
        let session_key = self.race_session_key(season, round).await?;

        let laps = self.openf1.get_laps(session_key, &driver.number).await?;
        Ok(laps.iter().map(OpenF1Lap::to_sector_timing).collect())
    }

    async fn tyre_laps(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<TyreLap>> {
        let driver = self.resolve_driver(season, round, driver).await?;
        let session_key = self.race_session_key(season, round).await?;

        let stints = self.openf1.get_stints(session_key, &driver.number).await?;
        Ok(Stint::laps(&stints))
    }

    async fn weather(&self, season: i32, round: u32) -> CustomResult<Vec<WeatherSample>> {
        let session_key = self.race_session_key(season, round).await?;
        self.openf1.get_weather(session_key).await
    }

    async fn race_control_messages(&self, season: i32, round: u32) -> CustomResult<Vec<RaceControlMessage>> {
        let session_key = self.race_session_key(season, round).await?;
        self.openf1.get_race_control(session_key).await
    }

    /// traces the fastest timed lap of the race winner
    async fn circuit_coordinates(&self, season: i32, round: u32) -> CustomResult<Vec<(f64, f64)>> {
        let results = self
            .ergast
            .get_results(season, round, SessionKind::Race)
            .await?
            .unwrap_or_default();
        let driver = match results.iter().find(|row| row.position == Some(1)).or(results.first()) {
            Some(row) => Driver::from_result(row),
            None => return Ok(Vec::new()),
        };

        let session_key = self.race_session_key(season, round).await?;
        let laps = self.openf1.get_laps(session_key, &driver.number).await?;
        let (from, to) = match OpenF1Lap::fastest_window(&laps) {
            Some(window) => window,
            None => {
                warn!(target:"live_provider:circuit_coordinates", "no timed lap for {} in {} round {}", driver.abbreviation, season, round);
                return Ok(Vec::new());
            }
        };

        info!(target:"live_provider:circuit_coordinates", "tracing {} round {} from the lap of {}", season, round, driver.abbreviation);
        self.openf1.get_locations(session_key, &driver.number, from, to).await
    }
}
