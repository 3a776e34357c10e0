use log::info;
use rocket::{launch, Build, Rocket};

use formula_one_api::config::Config;
use formula_one_api::modules::helpers::logging::setup_logging;
use formula_one_api::modules::live_provider::LiveProvider;
use formula_one_api::modules::memory_provider::MemoryProvider;
use formula_one_api::modules::models::standings::ScoringRules;
use formula_one_api::modules::provider::DataProvider;
use formula_one_api::modules::scrape::ChromeSprintScraper;
use formula_one_api::{build_rocket, AppState};

#[launch]
fn rocket() -> Rocket<Build> {
    let config = Config::from_env().expect("Invalid configuration");
    setup_logging(config.logging_level, &config.log_file).expect("Failed to setup logging");

    // a snapshot replaces the public apis, useful when working offline
    let provider: Box<dyn DataProvider> = match &config.snapshot_path {
        Some(path) => {
            info!(target:"main:rocket", "serving data from snapshot {}", path.display());
            Box::new(MemoryProvider::load(path).expect("Failed to load snapshot"))
        }
        None => Box::new(LiveProvider::new(&config).expect("Failed to create the http client")),
    };

    let state = AppState {
        provider,
        scraper: Box::new(ChromeSprintScraper::new(&config)),
        scoring: ScoringRules::default(),
        config,
    };

    build_rocket(state)
}
