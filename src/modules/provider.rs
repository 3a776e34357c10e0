use async_trait::async_trait;

use crate::errors::CustomResult;
use crate::modules::models::event::Event;
use crate::modules::models::lap::{LapTiming, SectorTiming, TyreLap};
use crate::modules::models::race_control::RaceControlMessage;
use crate::modules::models::session::{QualifyingResult, SessionKind, SessionResult};
use crate::modules::models::weather::WeatherSample;

/// # source of season, session and timing data
///
/// result tables come back as `Ok(None)` when the provider has no data for a session,
/// `Err` is reserved for failures while fetching.
/// per driver calls take the identifier as given in the request (abbreviation, number or id).
#[async_trait]
pub trait DataProvider: Send + Sync + 'static {
    async fn event_schedule(&self, season: i32) -> CustomResult<Vec<Event>>;

    async fn session_results(
        &self,
        season: i32,
        round: u32,
        session: SessionKind,
    ) -> CustomResult<Option<Vec<SessionResult>>>;

    async fn qualifying_results(&self, season: i32, round: u32) -> CustomResult<Option<Vec<QualifyingResult>>>;

    async fn lap_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<LapTiming>>;

    async fn sector_timings(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<SectorTiming>>;

    async fn tyre_laps(&self, season: i32, round: u32, driver: &str) -> CustomResult<Vec<TyreLap>>;

    async fn weather(&self, season: i32, round: u32) -> CustomResult<Vec<WeatherSample>>;

    async fn race_control_messages(&self, season: i32, round: u32) -> CustomResult<Vec<RaceControlMessage>>;

    /// x/y coordinates tracing one lap of the circuit
    async fn circuit_coordinates(&self, season: i32, round: u32) -> CustomResult<Vec<(f64, f64)>>;
}
