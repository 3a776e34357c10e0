use log::warn;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;

use crate::errors::{CustomResult, Error};
use crate::macros::json_response::json_response;
use crate::macros::provider_error_handler::provider_handle_error;
use crate::modules::drivers_file::read_drivers_file;
use crate::modules::helpers::general::Helpers;
use crate::modules::models::event::Event;
use crate::modules::models::session::SessionKind;
use crate::AppState;

/// contents of the season's drivers file as stored on disk
#[get("/drivers/<season>")]
pub async fn get_drivers_file(season: i32, state: &State<AppState>) -> CustomResult<Json<serde_json::Value>> {
    let path = state.config.drivers_file_for(season);
    let drivers = provider_handle_error!(
        read_drivers_file(&path).await,
        "routes/api/drivers:get_drivers_file",
        format!("drivers file {}", path.display())
    );

    Ok(Json(drivers))
}

/// # every team that took part in a scored race of the season
/// rounds that fail to load are skipped.
#[get("/constructors/<season>")]
pub async fn get_constructors(season: i32, state: &State<AppState>) -> CustomResult<ApiConstructors> {
    let schedule = provider_handle_error!(
        state.provider.event_schedule(season).await,
        "routes/api/drivers:get_constructors",
        format!("schedule of {}", season)
    );

    let mut teams = vec![];
    for event in Event::scored_rounds(&schedule) {
        match state.provider.session_results(season, event.round, SessionKind::Race).await {
            Ok(Some(results)) => teams.extend(results.into_iter().map(|result| result.team_name)),
            Ok(None) => {}
            Err(error) => {
                warn!(target:"routes/api/drivers:get_constructors", "skipping {} round {}. (error: {})", season, event.round, error);
            }
        }
    }

    let constructors = Helpers::sorted_union(teams);
    if constructors.is_empty() {
        return Err(Error::not_found(format!("constructors of {}", season)));
    }

    Ok(ApiConstructors { season, constructors })
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiConstructors {
    pub season: i32,
    pub constructors: Vec<String>,
}

json_response!(ApiConstructors);
