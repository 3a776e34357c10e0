use rocket::http::ContentType;
use rocket::{get, State};
use serde::Serialize;

use crate::errors::{CustomResult, Error};
use crate::macros::json_response::json_response;
use crate::macros::provider_error_handler::{provider_handle_error, provider_require_table};
use crate::modules::models::event::Event;
use crate::modules::models::lap::{LapTiming, SectorTiming, TyreLap};
use crate::modules::models::race_control::RaceControlMessage;
use crate::modules::models::session::{QualifyingResult, SessionKind, SessionResult};
use crate::modules::models::weather::WeatherSample;
use crate::modules::helpers::time::TimeHelpers;
use crate::modules::track_map::render_track_map;
use crate::AppState;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[get("/races/<season>")]
pub async fn get_schedule(season: i32, state: &State<AppState>) -> CustomResult<ApiSchedule> {
    let races = provider_handle_error!(
        state.provider.event_schedule(season).await,
        "routes/api/races:get_schedule",
        format!("schedule of {}", season)
    );

    Ok(ApiSchedule { season, races })
}

#[get("/races/<season>/<round>")]
pub async fn get_race(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiRace> {
    let schedule = provider_handle_error!(
        state.provider.event_schedule(season).await,
        "routes/api/races:get_race",
        format!("schedule of {}", season)
    );

    match Event::find_round(&schedule, round) {
        Some(race) => Ok(ApiRace { season, race: race.clone() }),
        None => Err(Error::not_found(format!("round {} of {}", round, season))),
    }
}

#[get("/races/<season>/<round>/results")]
pub async fn get_results(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiResults> {
    let results = provider_require_table!(
        state.provider.session_results(season, round, SessionKind::Race).await,
        "routes/api/races:get_results",
        "race results"
    );

    Ok(ApiResults {
        season,
        round,
        results: results.iter().map(ApiResult::new).collect(),
    })
}

#[get("/races/<season>/<round>/qualifying")]
pub async fn get_qualifying(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiQualifying> {
    let results = provider_require_table!(
        state.provider.qualifying_results(season, round).await,
        "routes/api/races:get_qualifying",
        "qualifying results"
    );

    Ok(ApiQualifying {
        season,
        round,
        results: results.iter().map(ApiQualifyingResult::new).collect(),
    })
}

#[get("/races/<season>/<round>/drivers")]
pub async fn get_round_drivers(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiRoundDrivers> {
    let results = provider_require_table!(
        state.provider.session_results(season, round, SessionKind::Race).await,
        "routes/api/races:get_round_drivers",
        "race drivers"
    );

    Ok(ApiRoundDrivers {
        season,
        round,
        drivers: results.iter().map(ApiDriver::new).collect(),
    })
}

#[get("/races/<season>/<round>/lap-times/<driver>")]
pub async fn get_lap_times(season: i32, round: u32, driver: &str, state: &State<AppState>) -> CustomResult<ApiLapTimes> {
    let laps = provider_handle_error!(
        state.provider.lap_timings(season, round, driver).await,
        "routes/api/races:get_lap_times",
        format!("lap times of {}", driver)
    );
    if laps.is_empty() {
        return Err(Error::not_found(format!("lap times of {}", driver)));
    }

    Ok(ApiLapTimes {
        season,
        round,
        driver: driver.to_string(),
        lap_times: laps.iter().map(ApiLapTime::new).collect(),
    })
}

#[get("/races/<season>/<round>/sector-times/<driver>")]
pub async fn get_sector_times(season: i32, round: u32, driver: &str, state: &State<AppState>) -> CustomResult<ApiSectorTimes> {
    let sectors = provider_handle_error!(
        state.provider.sector_timings(season, round, driver).await,
        "routes/api/races:get_sector_times",
        format!("sector times of {}", driver)
    );
    if sectors.is_empty() {
        return Err(Error::not_found(format!("sector times of {}", driver)));
    }

    Ok(ApiSectorTimes {
        season,
        round,
        driver: driver.to_string(),
        sector_times: sectors.iter().map(ApiSectorTime::new).collect(),
    })
}

#[get("/races/<season>/<round>/tyres/<driver>")]
pub async fn get_tyres(season: i32, round: u32, driver: &str, state: &State<AppState>) -> CustomResult<ApiTyres> {
    let tyre_data = provider_handle_error!(
        state.provider.tyre_laps(season, round, driver).await,
        "routes/api/races:get_tyres",
        format!("tyre data of {}", driver)
    );
    if tyre_data.is_empty() {
        return Err(Error::not_found(format!("tyre data of {}", driver)));
    }

    Ok(ApiTyres {
        season,
        round,
        driver: driver.to_string(),
        tyre_data,
    })
}

#[get("/races/<season>/<round>/weather")]
pub async fn get_weather(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiWeather> {
    let weather = provider_handle_error!(
        state.provider.weather(season, round).await,
        "routes/api/races:get_weather",
        "weather"
    );
    if weather.is_empty() {
        return Err(Error::not_found("weather"));
    }

    Ok(ApiWeather { season, round, weather })
}

#[get("/races/<season>/<round>/events")]
pub async fn get_events(season: i32, round: u32, state: &State<AppState>) -> CustomResult<ApiEvents> {
    let events = provider_handle_error!(
        state.provider.race_control_messages(season, round).await,
        "routes/api/races:get_events",
        "race control messages"
    );
    if events.is_empty() {
        return Err(Error::not_found("race control messages"));
    }

    Ok(ApiEvents { season, round, events })
}

#[get("/track-map/<season>/<round>")]
pub async fn get_track_map(season: i32, round: u32, state: &State<AppState>) -> CustomResult<(ContentType, Vec<u8>)> {
    let coordinates = provider_handle_error!(
        state.provider.circuit_coordinates(season, round).await,
        "routes/api/races:get_track_map",
        "circuit coordinates"
    );

    let image = render_track_map(&coordinates)?;
    Ok((ContentType::PNG, image))
}

/**************************************************************************************************/
/**************** RESPONSES ***********************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Debug, Clone)]
pub struct ApiSchedule {
    pub season: i32,
    pub races: Vec<Event>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiRace {
    pub season: i32,
    pub race: Event,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiResults {
    pub season: i32,
    pub round: u32,
    pub results: Vec<ApiResult>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiResult {
    pub position: Option<u32>,
    pub driver: String,
    pub abbreviation: String,
    pub team: String,
    pub time: Option<String>,
    pub status: String,
}

impl ApiResult {
    pub fn new(result: &SessionResult) -> ApiResult {
        ApiResult {
            position: result.position,
            driver: result.full_name.clone(),
            abbreviation: result.abbreviation.clone(),
            team: result.team_name.clone(),
            time: result.time.clone(),
            status: result.status.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiQualifying {
    pub season: i32,
    pub round: u32,
    pub results: Vec<ApiQualifyingResult>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiQualifyingResult {
    pub position: Option<u32>,
    pub driver: String,
    pub abbreviation: String,
    pub team: String,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

impl ApiQualifyingResult {
    pub fn new(result: &QualifyingResult) -> ApiQualifyingResult {
        ApiQualifyingResult {
            position: result.position,
            driver: result.full_name.clone(),
            abbreviation: result.abbreviation.clone(),
            team: result.team_name.clone(),
            q1: result.q1.clone(),
            q2: result.q2.clone(),
            q3: result.q3.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiRoundDrivers {
    pub season: i32,
    pub round: u32,
    pub drivers: Vec<ApiDriver>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiDriver {
    pub number: String,
    pub name: String,
    pub abbreviation: String,
    pub team: String,
}

impl ApiDriver {
    pub fn new(result: &SessionResult) -> ApiDriver {
        ApiDriver {
            number: result.driver_number.clone(),
            name: result.full_name.clone(),
            abbreviation: result.abbreviation.clone(),
            team: result.team_name.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiLapTimes {
    pub season: i32,
    pub round: u32,
    pub driver: String,
    pub lap_times: Vec<ApiLapTime>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiLapTime {
    pub lap_number: u32,
    pub lap_time: Option<String>,
    pub position: Option<u32>,
    pub pit: bool,
}

impl ApiLapTime {
    pub fn new(lap: &LapTiming) -> ApiLapTime {
        ApiLapTime {
            lap_number: lap.lap_number,
            lap_time: TimeHelpers::format_optional(lap.lap_time),
            position: lap.position,
            pit: lap.pit_in,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiSectorTimes {
    pub season: i32,
    pub round: u32,
    pub driver: String,
    pub sector_times: Vec<ApiSectorTime>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiSectorTime {
    pub lap_number: u32,
    pub sector1: Option<String>,
    pub sector2: Option<String>,
    pub sector3: Option<String>,
}

impl ApiSectorTime {
    pub fn new(sectors: &SectorTiming) -> ApiSectorTime {
        ApiSectorTime {
            lap_number: sectors.lap_number,
            sector1: TimeHelpers::format_optional(sectors.sector1),
            sector2: TimeHelpers::format_optional(sectors.sector2),
            sector3: TimeHelpers::format_optional(sectors.sector3),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiTyres {
    pub season: i32,
    pub round: u32,
    pub driver: String,
    pub tyre_data: Vec<TyreLap>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiWeather {
    pub season: i32,
    pub round: u32,
    pub weather: Vec<WeatherSample>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiEvents {
    pub season: i32,
    pub round: u32,
    pub events: Vec<RaceControlMessage>,
}

json_response!(
    ApiSchedule,
    ApiRace,
    ApiResults,
    ApiQualifying,
    ApiRoundDrivers,
    ApiLapTimes,
    ApiSectorTimes,
    ApiTyres,
    ApiWeather,
    ApiEvents,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn lap_times_are_rendered_as_clock_times() {
        let lap = LapTiming {
            lap_number: 12,
            lap_time: Some(Duration::from_millis(92_345)),
            position: Some(3),
            pit_in: true,
        };

        let api_lap = ApiLapTime::new(&lap);

        assert_eq!(api_lap.lap_time.as_deref(), Some("1:32.345"));
        assert!(api_lap.pit);
    }

    #[test]
    fn missing_sectors_stay_empty() {
        let sectors = SectorTiming {
            lap_number: 1,
            sector1: None,
            sector2: Some(Duration::from_millis(31_020)),
            sector3: None,
        };

        let api_sectors = ApiSectorTime::new(&sectors);

        assert_eq!(api_sectors.sector1, None);
        assert_eq!(api_sectors.sector2.as_deref(), Some("0:31.020"));
    }
}
