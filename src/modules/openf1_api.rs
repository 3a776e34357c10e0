use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDate};
use log::info;
use serde::Deserialize;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::general::Helpers;
use crate::modules::helpers::time::TimeHelpers;
use crate::modules::models::lap::{SectorTiming, Stint};
use crate::modules::models::race_control::RaceControlMessage;
use crate::modules::models::weather::WeatherSample;

/// # client for the openf1 api
/// sector times, stints, weather, race control and car positions.
/// everything is keyed on a session key, see `get_race_session_key`.
pub struct OpenF1Api {
    client: reqwest::Client,
    base_url: String,
}

impl OpenF1Api {
    pub fn new(client: reqwest::Client, base_url: &str) -> OpenF1Api {
        OpenF1Api {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// # find the race session held on a date
    /// session start times are utc, so the closest session within a day of `race_date` wins.
    pub async fn get_race_session_key(&self, season: i32, race_date: NaiveDate) -> CustomResult<u64> {
        let url = format!("{}/sessions?year={}&session_name=Race", self.base_url, season);
        let sessions: Vec<OpenF1Session> = Helpers::fetch_json(&self.client, &url).await?;

        match OpenF1Session::closest_to(&sessions, race_date) {
            Some(session) => Ok(session.session_key),
            None => Err(Error::not_found(format!("race session on {}", race_date))),
        }
    }

    pub async fn get_laps(&self, session_key: u64, driver_number: &str) -> CustomResult<Vec<OpenF1Lap>> {
        info!(target:"openf1_api:get_laps", "Getting laps of {} in session {} from api", driver_number, session_key);

        let url = format!("{}/laps?session_key={}&driver_number={}", self.base_url, session_key, driver_number);
        let mut laps: Vec<OpenF1Lap> = Helpers::fetch_json(&self.client, &url).await?;
        laps.sort_by_key(|lap| lap.lap_number);

        Ok(laps)
    }

    pub async fn get_stints(&self, session_key: u64, driver_number: &str) -> CustomResult<Vec<Stint>> {
        info!(target:"openf1_api:get_stints", "Getting stints of {} in session {} from api", driver_number, session_key);

        let url = format!("{}/stints?session_key={}&driver_number={}", self.base_url, session_key, driver_number);
        let stints: Vec<OpenF1Stint> = Helpers::fetch_json(&self.client, &url).await?;

        Ok(stints.iter().filter_map(OpenF1Stint::to_stint).collect())
    }

    pub async fn get_weather(&self, session_key: u64) -> CustomResult<Vec<WeatherSample>> {
        info!(target:"openf1_api:get_weather", "Getting weather of session {} from api", session_key);

        let url = format!("{}/weather?session_key={}", self.base_url, session_key);
        let samples: Vec<OpenF1Weather> = Helpers::fetch_json(&self.client, &url).await?;

        Ok(samples.into_iter().map(OpenF1Weather::into_sample).collect())
    }

    pub async fn get_race_control(&self, session_key: u64) -> CustomResult<Vec<RaceControlMessage>> {
        info!(target:"openf1_api:get_race_control", "Getting race control messages of session {} from api", session_key);

        let url = format!("{}/race_control?session_key={}", self.base_url, session_key);
        let messages: Vec<OpenF1RaceControl> = Helpers::fetch_json(&self.client, &url).await?;

        Ok(messages
            .into_iter()
            .map(|message| RaceControlMessage {
                time: message.date,
                category: message.category,
                message: message.message,
            })
            .collect())
    }

    /// # car positions of a driver between two instants
    pub async fn get_locations(
        &self,
        session_key: u64,
        driver_number: &str,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
    ) -> CustomResult<Vec<(f64, f64)>> {
        info!(target:"openf1_api:get_locations", "Getting locations of {} in session {} from api", driver_number, session_key);

        let url = self.location_url(session_key, driver_number, from, to);
        let locations: Vec<OpenF1Location> = Helpers::fetch_json(&self.client, &url).await?;

        Ok(locations.into_iter().map(|location| (location.x, location.y)).collect())
    }

    fn location_url(&self, session_key: u64, driver_number: &str, from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> String {
        // naive utc timestamps, a `+00:00` offset would be read as a space in the query
        let format = "%Y-%m-%dT%H:%M:%S%.3f";
        format!(
            "{}/location?session_key={}&driver_number={}&date>{}&date<{}",
            self.base_url,
            session_key,
            driver_number,
            from.naive_utc().format(format),
            to.naive_utc().format(format),
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OpenF1Session {
    pub session_key: u64,
    pub date_start: String,
}

impl OpenF1Session {
    fn start_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.date_start)
            .ok()
            .map(|start| start.naive_utc().date())
    }

    fn closest_to(sessions: &[OpenF1Session], date: NaiveDate) -> Option<&OpenF1Session> {
        sessions
            .iter()
            .filter_map(|session| {
                let start = session.start_date()?;
                let distance = (start - date).num_days().abs();
                (distance <= 1).then_some((distance, session))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, session)| session)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OpenF1Lap {
    pub lap_number: u32,
    pub date_start: Option<String>,
    pub lap_duration: Option<f64>,
    pub duration_sector_1: Option<f64>,
    pub duration_sector_2: Option<f64>,
    pub duration_sector_3: Option<f64>,
}

impl OpenF1Lap {
    pub fn to_sector_timing(&self) -> SectorTiming {
        SectorTiming {
            lap_number: self.lap_number,
            sector1: TimeHelpers::from_seconds(self.duration_sector_1),
            sector2: TimeHelpers::from_seconds(self.duration_sector_2),
            sector3: TimeHelpers::from_seconds(self.duration_sector_3),
        }
    }

    /// # time window of the fastest lap that has a start time
    pub fn fastest_window(laps: &[OpenF1Lap]) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        laps.iter()
            .filter_map(|lap| {
                let duration = TimeHelpers::from_seconds(lap.lap_duration)?;
                let start = DateTime::parse_from_rfc3339(lap.date_start.as_deref()?).ok()?;
                Some((duration, start))
            })
            .min_by_key(|(duration, _)| *duration)
            .and_then(|(duration, start)| {
                let length = ChronoDuration::from_std(duration).ok()?;
                Some((start, start + length))
            })
    }
}

#[derive(Deserialize, Debug)]
struct OpenF1Stint {
    stint_number: u32,
    lap_start: Option<u32>,
    lap_end: Option<u32>,
    compound: Option<String>,
    tyre_age_at_start: Option<u32>,
}

impl OpenF1Stint {
    fn to_stint(&self) -> Option<Stint> {
        Some(Stint {
            stint_number: self.stint_number,
            lap_start: self.lap_start?,
            lap_end: self.lap_end?,
            compound: self.compound.clone(),
            tyre_age_at_start: self.tyre_age_at_start.unwrap_or(0),
        })
    }
}

#[derive(Deserialize, Debug)]
struct OpenF1Weather {
    date: String,
    air_temperature: f64,
    track_temperature: f64,
    humidity: f64,
    rainfall: f64,
    wind_speed: f64,
    wind_direction: f64,
}

impl OpenF1Weather {
    fn into_sample(self) -> WeatherSample {
        WeatherSample {
            time: self.date,
            air_temp: self.air_temperature,
            track_temp: self.track_temperature,
            humidity: self.humidity,
            rainfall: self.rainfall,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
        }
    }
}

#[derive(Deserialize, Debug)]
struct OpenF1RaceControl {
    date: String,
    category: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct OpenF1Location {
    x: f64,
    y: f64,
}
