use std::env;

use log::{error, info};

use formula_one_api::config::Config;
use formula_one_api::modules::drivers_file::DriversFile;
use formula_one_api::modules::helpers::logging::setup_logging;
use formula_one_api::modules::live_provider::LiveProvider;
use formula_one_api::modules::memory_provider::MemoryProvider;
use formula_one_api::modules::provider::DataProvider;

/// writes `drivers_{season}.json` for every season given on the command line
#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Invalid configuration");
    setup_logging(config.logging_level, &config.log_file).expect("failed to setup logging");

    let provider: Box<dyn DataProvider> = match &config.snapshot_path {
        Some(path) => Box::new(MemoryProvider::load(path).expect("failed to load snapshot")),
        None => Box::new(LiveProvider::new(&config).expect("failed to create the http client")),
    };

    let seasons: Vec<i32> = env::args()
        .skip(1)
        .filter_map(|arg| match arg.parse() {
            Ok(season) => Some(season),
            Err(_) => {
                error!(target:"build_drivers_file", "not a season: {}", arg);
                None
            }
        })
        .collect();
    if seasons.is_empty() {
        error!(target:"build_drivers_file", "usage: build_drivers_file <season>...");
        return;
    }

    for season in seasons {
        let path = config.drivers_file_for(season);
        match DriversFile::collect(provider.as_ref(), season).await {
            Ok(file) => match file.write(&path) {
                Ok(_) => {
                    info!(target:"build_drivers_file", "wrote {} drivers to {}", file.drivers.len(), path.display());
                }
                Err(error) => {
                    error!(target:"build_drivers_file", "failed writing {}. (error: {})", path.display(), error);
                }
            },
            Err(error) => {
                error!(target:"build_drivers_file", "failed collecting drivers of {}. (error: {})", season, error);
            }
        }
    }
}
