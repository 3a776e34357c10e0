use rocket::{get, State};
use serde::Serialize;

use crate::errors::CustomResult;
use crate::macros::json_response::json_response;
use crate::macros::provider_error_handler::provider_handle_error;
use crate::modules::models::standings::{StandingsEntry, StandingsKind};
use crate::modules::standings::StandingsAggregator;
use crate::AppState;

#[get("/standings/drivers/<season>")]
pub async fn get_driver_standings(season: i32, state: &State<AppState>) -> CustomResult<ApiDriverStandings> {
    let aggregator = StandingsAggregator::new(state.provider.as_ref(), &state.scoring);
    let standings = provider_handle_error!(
        aggregator.aggregate(season, StandingsKind::Drivers).await,
        "routes/api/standings:get_driver_standings",
        format!("driver standings of {}", season)
    );

    Ok(ApiDriverStandings {
        season,
        driver_standings: standings.entries.iter().map(ApiDriverStanding::new).collect(),
        no_data_rounds: standings.no_data_rounds,
    })
}

#[get("/standings/constructors/<season>")]
pub async fn get_constructor_standings(season: i32, state: &State<AppState>) -> CustomResult<ApiConstructorStandings> {
    let aggregator = StandingsAggregator::new(state.provider.as_ref(), &state.scoring);
    let standings = provider_handle_error!(
        aggregator.aggregate(season, StandingsKind::Constructors).await,
        "routes/api/standings:get_constructor_standings",
        format!("constructor standings of {}", season)
    );

    Ok(ApiConstructorStandings {
        season,
        constructor_standings: standings.entries.iter().map(ApiConstructorStanding::new).collect(),
        no_data_rounds: standings.no_data_rounds,
    })
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiDriverStandings {
    pub season: i32,
    pub driver_standings: Vec<ApiDriverStanding>,
    pub no_data_rounds: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiDriverStanding {
    pub driver_id: String,
    pub name: String,
    pub points: u32,
}

impl ApiDriverStanding {
    pub fn new(entry: &StandingsEntry) -> ApiDriverStanding {
        ApiDriverStanding {
            driver_id: entry.key.clone(),
            name: entry.name.clone(),
            points: entry.points,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiConstructorStandings {
    pub season: i32,
    pub constructor_standings: Vec<ApiConstructorStanding>,
    pub no_data_rounds: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiConstructorStanding {
    pub team: String,
    pub points: u32,
}

impl ApiConstructorStanding {
    pub fn new(entry: &StandingsEntry) -> ApiConstructorStanding {
        ApiConstructorStanding {
            team: entry.name.clone(),
            points: entry.points,
        }
    }
}

json_response!(ApiDriverStandings, ApiConstructorStandings);
