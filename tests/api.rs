use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use formula_one_api::config::Config;
use formula_one_api::errors::{CustomResult, Error};
use formula_one_api::modules::memory_provider::{DriverLaps, MemoryProvider, Recorded};
use formula_one_api::modules::models::event::{Event, EventFormat};
use formula_one_api::modules::models::lap::{LapTiming, SectorTiming, TyreLap};
use formula_one_api::modules::models::race_control::RaceControlMessage;
use formula_one_api::modules::models::session::{QualifyingResult, SessionKind, SessionResult};
use formula_one_api::modules::models::weather::WeatherSample;
use formula_one_api::modules::models::standings::ScoringRules;
use formula_one_api::modules::scrape::{ScrapedSprintResult, SprintScraper};
use formula_one_api::{build_rocket, AppState};

struct StubScraper;

#[async_trait]
impl SprintScraper for StubScraper {
    async fn sprint_results(&self, season: i32) -> CustomResult<Vec<ScrapedSprintResult>> {
        if season != 2023 {
            return Err(Error::not_found("sprint tab"));
        }

        Ok(vec![ScrapedSprintResult {
            position: "1".to_string(),
            driver: "Lewis Hamilton HAM".to_string(),
            team: "Mercedes".to_string(),
            time: "30:01.500".to_string(),
            points: "8".to_string(),
        }])
    }
}

fn event(round: u32, name: &str, format: EventFormat) -> Event {
    Event {
        round,
        name: name.to_string(),
        country: name.to_string(),
        location: name.to_string(),
        date: NaiveDate::from_ymd_opt(2023, 3, round * 7).unwrap(),
        format,
    }
}

fn row(position: Option<u32>, number: &str, name: &str, team: &str, fastest_lap: Option<u64>) -> SessionResult {
    SessionResult {
        position,
        driver_number: number.to_string(),
        driver_id: name.split(' ').last().unwrap().to_lowercase(),
        full_name: name.to_string(),
        abbreviation: name.split(' ').last().unwrap()[..3].to_uppercase(),
        team_name: team.to_string(),
        time: position.map(|_| "1:30:00.000".to_string()),
        status: "Finished".to_string(),
        fastest_lap_time: fastest_lap.map(Duration::from_secs),
    }
}

/// three driver season:
/// round 1 race with the fastest lap for the runner up, no sprint recorded,
/// round 2 sprint weekend with an unavailable race,
/// round 3 sprint weekend where the sprint fails and the race is missing.
fn provider() -> MemoryProvider {
    MemoryProvider::new()
        .with_schedule(
            2023,
            vec![
                event(1, "Bahrain", EventFormat::Conventional),
                event(2, "Azerbaijan", EventFormat::Sprint),
                event(3, "Austria", EventFormat::Sprint),
            ],
        )
        .with_session(
            2023,
            1,
            SessionKind::Race,
            Recorded::Available(vec![
                row(Some(1), "1", "Max Verstappen", "Red Bull", Some(95)),
                row(Some(2), "44", "Lewis Hamilton", "Mercedes", Some(94)),
                row(Some(3), "14", "Fernando Alonso", "Aston Martin", None),
                row(None, "18", "Lance Stroll", "Aston Martin", None),
            ]),
        )
        .with_session(2023, 2, SessionKind::Race, Recorded::Unavailable)
        .with_session(
            2023,
            2,
            SessionKind::Sprint,
            Recorded::Available(vec![
                row(Some(1), "44", "Lewis Hamilton", "Mercedes", None),
                row(Some(2), "1", "Max Verstappen", "Red Bull", None),
                row(Some(3), "14", "Fernando Alonso", "Aston Martin", None),
            ]),
        )
        .with_session(2023, 3, SessionKind::Sprint, Recorded::Failing("session not loaded".to_string()))
        .with_driver_laps(
            2023,
            1,
            DriverLaps {
                driver_number: "1".to_string(),
                timings: vec![LapTiming {
                    lap_number: 1,
                    lap_time: Some(Duration::from_secs(95)),
                    position: Some(1),
                    pit_in: false,
                }],
                sectors: vec![SectorTiming {
                    lap_number: 1,
                    sector1: Some(Duration::from_secs(30)),
                    sector2: Some(Duration::from_millis(35_250)),
                    sector3: None,
                }],
                tyres: vec![
                    TyreLap {
                        lap_number: 1,
                        compound: Some("SOFT".to_string()),
                        stint: 1,
                        fresh: true,
                    },
                    TyreLap {
                        lap_number: 2,
                        compound: Some("SOFT".to_string()),
                        stint: 1,
                        fresh: true,
                    },
                ],
            },
        )
        .with_qualifying(
            2023,
            1,
            vec![
                QualifyingResult {
                    position: Some(1),
                    driver_number: "1".to_string(),
                    full_name: "Max Verstappen".to_string(),
                    abbreviation: "VER".to_string(),
                    team_name: "Red Bull".to_string(),
                    q1: Some("1:30.000".to_string()),
                    q2: Some("1:29.500".to_string()),
                    q3: Some("1:29.708".to_string()),
                },
                QualifyingResult {
                    position: Some(16),
                    driver_number: "18".to_string(),
                    full_name: "Lance Stroll".to_string(),
                    abbreviation: "STR".to_string(),
                    team_name: "Aston Martin".to_string(),
                    q1: Some("1:31.200".to_string()),
                    q2: None,
                    q3: None,
                },
            ],
        )
        .with_weather(
            2023,
            1,
            vec![WeatherSample {
                time: "2023-03-05T15:00:00+00:00".to_string(),
                air_temp: 27.5,
                track_temp: 33.0,
                humidity: 19.0,
                rainfall: 0.0,
                wind_speed: 1.2,
                wind_direction: 232.0,
            }],
        )
        .with_race_control(
            2023,
            1,
            vec![
                RaceControlMessage {
                    time: "2023-03-05T15:03:00+00:00".to_string(),
                    category: Some("Flag".to_string()),
                    message: Some("GREEN LIGHT - PIT EXIT OPEN".to_string()),
                },
                RaceControlMessage {
                    time: "2023-03-05T15:10:00+00:00".to_string(),
                    category: None,
                    message: None,
                },
            ],
        )
        .with_coordinates(2023, 1, vec![(0.0, 0.0), (120.0, 10.0), (90.0, 80.0), (-10.0, 60.0)])
        .with_session(2024, 6, SessionKind::Sprint, Recorded::Failing("session not loaded".to_string()))
}

async fn client(drivers_dir: PathBuf) -> Client {
    let state = AppState {
        provider: Box::new(provider()),
        scraper: Box::new(StubScraper),
        scoring: ScoringRules::default(),
        config: Config {
            drivers_dir,
            static_dir: PathBuf::from("does-not-exist"),
            ..Config::default()
        },
    };

    Client::tracked(build_rocket(state)).await.expect("valid rocket instance")
}

async fn get_json(client: &Client, uri: &str) -> (Status, Option<Value>) {
    let response = client.get(uri.to_string()).dispatch().await;
    let status = response.status();
    (status, response.into_json::<Value>().await)
}

#[tokio::test]
async fn index_welcomes() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/").await;

    assert_eq!(status, Status::Ok);
    assert!(body.unwrap()["message"].is_string());
}

#[tokio::test]
async fn schedule_and_race_detail() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023").await;
    assert_eq!(status, Status::Ok);
    let body = body.unwrap();
    assert_eq!(body["races"].as_array().unwrap().len(), 3);
    assert_eq!(body["races"][1]["format"], "sprint");

    let (status, body) = get_json(&client, "/races/2023/1").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body.unwrap()["race"]["date"], "2023-03-07");

    let (status, _) = get_json(&client, "/races/2023/9").await;
    assert_eq!(status, Status::NotFound);

    let (status, _) = get_json(&client, "/races/1999").await;
    assert_eq!(status, Status::InternalServerError);
}

#[tokio::test]
async fn results_and_rosters() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023/1/results").await;
    assert_eq!(status, Status::Ok);
    let body = body.unwrap();
    assert_eq!(
        body["results"][0],
        json!({
            "position": 1,
            "driver": "Max Verstappen",
            "abbreviation": "VER",
            "team": "Red Bull",
            "time": "1:30:00.000",
            "status": "Finished"
        })
    );
    assert_eq!(body["results"][3]["position"], Value::Null);

    let (status, body) = get_json(&client, "/races/2023/1/drivers").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body.unwrap()["drivers"][1]["number"], "44");

    let (status, _) = get_json(&client, "/races/2023/2/results").await;
    assert_eq!(status, Status::NotFound);

    let (status, _) = get_json(&client, "/races/2023/2/qualifying").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn qualifying_keeps_missing_segments_empty() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023/1/qualifying").await;

    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap()["results"],
        json!([
            {"position": 1, "driver": "Max Verstappen", "abbreviation": "VER", "team": "Red Bull",
             "q1": "1:30.000", "q2": "1:29.500", "q3": "1:29.708"},
            {"position": 16, "driver": "Lance Stroll", "abbreviation": "STR", "team": "Aston Martin",
             "q1": "1:31.200", "q2": null, "q3": null}
        ])
    );
}

#[tokio::test]
async fn sector_times_and_tyres_per_driver() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023/1/sector-times/VER").await;
    assert_eq!(status, Status::Ok);
    let body = body.unwrap();
    assert_eq!(body["driver"], "VER");
    assert_eq!(
        body["sector_times"],
        json!([{"lap_number": 1, "sector1": "0:30.000", "sector2": "0:35.250", "sector3": null}])
    );

    // provider driver id
    let (status, body) = get_json(&client, "/races/2023/1/tyres/verstappen").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap()["tyre_data"],
        json!([
            {"lap_number": 1, "compound": "SOFT", "stint": 1, "fresh": true},
            {"lap_number": 2, "compound": "SOFT", "stint": 1, "fresh": true}
        ])
    );

    let (status, _) = get_json(&client, "/races/2023/1/tyres/44").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn weather_and_race_control_events() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023/1/weather").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap(),
        json!({
            "season": 2023,
            "round": 1,
            "weather": [{
                "time": "2023-03-05T15:00:00+00:00",
                "air_temp": 27.5,
                "track_temp": 33.0,
                "humidity": 19.0,
                "rainfall": 0.0,
                "wind_speed": 1.2,
                "wind_direction": 232.0
            }]
        })
    );

    let (status, body) = get_json(&client, "/races/2023/1/events").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap()["events"],
        json!([
            {"time": "2023-03-05T15:03:00+00:00", "category": "Flag", "message": "GREEN LIGHT - PIT EXIT OPEN"},
            {"time": "2023-03-05T15:10:00+00:00", "category": null, "message": null}
        ])
    );

    let (status, _) = get_json(&client, "/races/2023/2/events").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn constructors_are_a_sorted_union() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/constructors/2023").await;

    assert_eq!(status, Status::Ok);
    assert_eq!(body.unwrap()["constructors"], json!(["Aston Martin", "Mercedes", "Red Bull"]));
}

#[tokio::test]
async fn lap_times_resolve_the_driver() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/races/2023/1/lap-times/ver").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap()["lap_times"],
        json!([{"lap_number": 1, "lap_time": "1:35.000", "position": 1, "pit": false}])
    );

    let (status, _) = get_json(&client, "/races/2023/1/lap-times/XYZ").await;
    assert_eq!(status, Status::NotFound);

    let (status, _) = get_json(&client, "/races/2023/2/weather").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn driver_standings() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/standings/drivers/2023").await;

    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap(),
        json!({
            "season": 2023,
            "driver_standings": [
                {"driver_id": "1", "name": "Max Verstappen", "points": 32},
                {"driver_id": "44", "name": "Lewis Hamilton", "points": 27},
                {"driver_id": "14", "name": "Fernando Alonso", "points": 21}
            ],
            "no_data_rounds": ["Sprint-1", "Race-2", "Race-3", "Sprint-3"]
        })
    );
}

#[tokio::test]
async fn constructor_standings_credit_the_bonus_to_the_team() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/standings/constructors/2023").await;

    assert_eq!(status, Status::Ok);
    assert_eq!(
        body.unwrap()["constructor_standings"],
        json!([
            {"team": "Red Bull", "points": 32},
            {"team": "Mercedes", "points": 27},
            {"team": "Aston Martin", "points": 21}
        ])
    );

    let (status, _) = get_json(&client, "/standings/constructors/1999").await;
    assert_eq!(status, Status::InternalServerError);
}

#[tokio::test]
async fn sprint_listings() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/sprints/2023").await;
    assert_eq!(status, Status::Ok);
    let sprints = body.unwrap()["sprints"].clone();
    assert_eq!(sprints[0]["round"], 2);
    assert_eq!(sprints[0]["sprint_code"], "S");
    assert_eq!(sprints[0]["sprint_results"][0]["abbreviation"], "HAM");
    assert_eq!(sprints[1]["round"], 3);
    assert!(sprints[1]["error"].is_string());
    assert_eq!(sprints[1].get("sprint_results"), None);

    let (status, body) = get_json(&client, "/sprints/2024").await;
    assert_eq!(status, Status::Ok);
    let sprints = body.unwrap()["sprints"].clone();
    assert_eq!(sprints.as_array().unwrap().len(), 6);
    assert_eq!(sprints[0], json!({"round": 4, "event": "China", "sprint_code": "S", "sprint_results": []}));
    assert_eq!(sprints[1]["error"], "session not loaded");
}

#[tokio::test]
async fn scraped_sprints() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/scrape-sprints/2023").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body.unwrap()["sprint_results"][0]["points"], "8");

    let (status, _) = get_json(&client, "/scrape-sprints/2022").await;
    assert_eq!(status, Status::NotFound);
}

#[tokio::test]
async fn drivers_file_is_passed_through() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("drivers_2023.json"), r#"[{"number": "1", "name": "Max Verstappen"}]"#).unwrap();
    std::fs::write(dir.path().join("drivers_2021.json"), "not json").unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let (status, body) = get_json(&client, "/drivers/2023").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body.unwrap(), json!([{"number": "1", "name": "Max Verstappen"}]));

    let (status, _) = get_json(&client, "/drivers/2022").await;
    assert_eq!(status, Status::NotFound);

    let (status, _) = get_json(&client, "/drivers/2021").await;
    assert_eq!(status, Status::InternalServerError);
}

#[tokio::test]
async fn track_map_is_a_png() {
    let dir = TempDir::new().unwrap();
    let client = client(dir.path().to_path_buf()).await;

    let response = client.get("/track-map/2023/1").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::PNG));
    let image = response.into_bytes().await.unwrap();
    assert_eq!(&image[..4], &[0x89, b'P', b'N', b'G']);

    let response = client.get("/track-map/2023/2").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}
