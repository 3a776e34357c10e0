use rocket::fs::FileServer;
use rocket::{routes, Build, Rocket};

use crate::config::Config;
use crate::modules::models::standings::ScoringRules;
use crate::modules::provider::DataProvider;
use crate::modules::scrape::SprintScraper;

pub mod macros {
    pub mod json_response;
    pub mod provider_error_handler;
}

pub mod config;
pub mod errors;
pub mod modules;
pub mod routes {
    pub mod index;
    pub mod api {
        pub mod drivers;
        pub mod races;
        pub mod sprints;
        pub mod standings;
    }
}

/// # everything a request handler needs
/// managed by rocket and shared read only between requests.
pub struct AppState {
    pub provider: Box<dyn DataProvider>,
    pub scraper: Box<dyn SprintScraper>,
    pub scoring: ScoringRules,
    pub config: Config,
}

/// # assemble the web server
/// static files are only served when the configured directory exists.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    use crate::routes::{api, index};

    let static_dir = state.config.static_dir.clone();

    let rocket = rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![
                index::index,
                // races
                api::races::get_schedule,
                api::races::get_race,
                api::races::get_results,
                api::races::get_qualifying,
                api::races::get_round_drivers,
                api::races::get_lap_times,
                api::races::get_sector_times,
                api::races::get_tyres,
                api::races::get_weather,
                api::races::get_events,
                api::races::get_track_map,
                // drivers and constructors
                api::drivers::get_drivers_file,
                api::drivers::get_constructors,
                // standings
                api::standings::get_driver_standings,
                api::standings::get_constructor_standings,
                // sprints
                api::sprints::get_sprints,
                api::sprints::get_sprints_2024,
                api::sprints::scrape_sprints,
            ],
        );

    if static_dir.is_dir() {
        rocket.mount("/static", FileServer::from(static_dir))
    } else {
        log::warn!(target:"lib:build_rocket", "static directory {} does not exist, not serving static files", static_dir.display());
        rocket
    }
}
