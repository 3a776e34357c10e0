use log::{info, warn};
use rocket::{get, State};
use serde::Serialize;

use crate::errors::CustomResult;
use crate::macros::json_response::json_response;
use crate::macros::provider_error_handler::provider_handle_error;
use crate::modules::models::event::{EventFormat, SPRINT_ROUNDS_2024};
use crate::modules::models::session::{SessionKind, SessionResult};
use crate::modules::models::standings::PointsTable;
use crate::modules::scrape::ScrapedSprintResult;
use crate::AppState;

#[get("/sprints/<season>")]
pub async fn get_sprints(season: i32, state: &State<AppState>) -> CustomResult<ApiSprints> {
    let schedule = provider_handle_error!(
        state.provider.event_schedule(season).await,
        "routes/api/sprints:get_sprints",
        format!("schedule of {}", season)
    );

    let mut sprints = vec![];
    for event in schedule.iter().filter(|event| event.format == EventFormat::Sprint) {
        info!(target:"routes/api/sprints:get_sprints", "sprint round {} ({})", event.round, event.name);

        let sprint = match state.provider.session_results(season, event.round, SessionKind::Sprint).await {
            Ok(Some(results)) => ApiSprint::listed(event.round, &event.name, &results, &state.scoring.sprint),
            Ok(None) => ApiSprint::failed(event.round, &event.name, "no sprint session data"),
            Err(error) => {
                warn!(target:"routes/api/sprints:get_sprints", "failed loading sprint of {} round {}. (error: {})", season, event.round, error);
                ApiSprint::failed(event.round, &event.name, "no sprint session data")
            }
        };
        sprints.push(sprint);
    }

    Ok(ApiSprints { season, sprints })
}

/// sprint rounds of 2024, without consulting the schedule
#[get("/sprints/2024")]
pub async fn get_sprints_2024(state: &State<AppState>) -> ApiSprints {
    let season = 2024;

    let mut sprints = vec![];
    for (round, name) in SPRINT_ROUNDS_2024 {
        let sprint = match state.provider.session_results(season, round, SessionKind::Sprint).await {
            Ok(results) => ApiSprint::listed(round, name, &results.unwrap_or_default(), &state.scoring.sprint),
            Err(error) => {
                warn!(target:"routes/api/sprints:get_sprints_2024", "failed loading sprint of round {}. (error: {})", round, error);
                ApiSprint::failed(round, name, &error.to_string())
            }
        };
        sprints.push(sprint);
    }

    ApiSprints { season, sprints }
}

#[get("/scrape-sprints/<season>")]
pub async fn scrape_sprints(season: i32, state: &State<AppState>) -> CustomResult<ApiScrapedSprints> {
    let sprint_results = provider_handle_error!(
        state.scraper.sprint_results(season).await,
        "routes/api/sprints:scrape_sprints",
        format!("scraped sprint results of {}", season)
    );

    Ok(ApiScrapedSprints { season, sprint_results })
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiSprints {
    pub season: i32,
    pub sprints: Vec<ApiSprint>,
}

/// # one sprint round
/// holds either the listed results or the reason there are none.
#[derive(Serialize, Debug, Clone)]
pub struct ApiSprint {
    pub round: u32,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_results: Option<Vec<ApiSprintResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiSprint {
    /// lists the rows that score in a sprint
    pub fn listed(round: u32, event: &str, results: &[SessionResult], points: &PointsTable) -> ApiSprint {
        let listed_positions = points.scoring_positions();
        let sprint_results = results
            .iter()
            .filter_map(|result| match result.position {
                Some(position) if (1..=listed_positions).contains(&position) => Some(ApiSprintResult {
                    position,
                    driver: result.full_name.clone(),
                    abbreviation: result.abbreviation.clone(),
                    team: result.team_name.clone(),
                }),
                _ => None,
            })
            .collect();

        ApiSprint {
            round,
            event: event.to_string(),
            sprint_code: Some(SessionKind::Sprint.code().to_string()),
            sprint_results: Some(sprint_results),
            error: None,
        }
    }

    pub fn failed(round: u32, event: &str, error: &str) -> ApiSprint {
        ApiSprint {
            round,
            event: event.to_string(),
            sprint_code: None,
            sprint_results: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiSprintResult {
    pub position: u32,
    pub driver: String,
    pub abbreviation: String,
    pub team: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiScrapedSprints {
    pub season: i32,
    pub sprint_results: Vec<ScrapedSprintResult>,
}

json_response!(ApiSprints, ApiScrapedSprints);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::models::standings::ScoringRules;

    fn row(position: Option<u32>, name: &str) -> SessionResult {
        SessionResult {
            position,
            driver_number: "1".to_string(),
            driver_id: name.to_lowercase(),
            full_name: name.to_string(),
            abbreviation: name[..3].to_uppercase(),
            team_name: "Team".to_string(),
            time: None,
            status: "Finished".to_string(),
            fastest_lap_time: None,
        }
    }

    #[test]
    fn only_the_top_eight_are_listed() {
        let results: Vec<SessionResult> = (1..=10)
            .map(|position| row(Some(position), "Driver"))
            .chain(std::iter::once(row(None, "Retired")))
            .collect();

        let sprint = ApiSprint::listed(6, "Miami", &results, &ScoringRules::default().sprint);

        let positions: Vec<u32> = sprint.sprint_results.unwrap().iter().map(|r| r.position).collect();
        assert_eq!(positions, (1..=8).collect::<Vec<u32>>());
        assert_eq!(sprint.sprint_code.as_deref(), Some("S"));
    }

    #[test]
    fn listing_follows_the_points_table() {
        let results: Vec<SessionResult> = (1..=5).map(|position| row(Some(position), "Driver")).collect();

        let sprint = ApiSprint::listed(4, "China", &results, &PointsTable(vec![3, 2, 1]));

        assert_eq!(sprint.sprint_results.unwrap().len(), 3);
    }

    #[test]
    fn failed_rounds_only_carry_the_error() {
        let value = serde_json::to_value(ApiSprint::failed(4, "China", "no sprint session data")).unwrap();

        assert_eq!(value, serde_json::json!({"round": 4, "event": "China", "error": "no sprint session data"}));
    }
}
