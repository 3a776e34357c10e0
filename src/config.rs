use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;
use log::LevelFilter;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::logging::parse_level;

/// # runtime configuration
/// read from the environment, a `.env` file is loaded first when present.
#[derive(Debug, Clone)]
pub struct Config {
    pub ergast_base_url: String,
    pub openf1_base_url: String,
    /// directory holding the `drivers_{season}.json` files
    pub drivers_dir: PathBuf,
    pub static_dir: PathBuf,
    /// results page to scrape, `{season}` is replaced by the season
    pub results_page_url: String,
    pub page_load_delay: Duration,
    pub sprint_tab_delay: Duration,
    /// serve frozen data from this snapshot instead of the live apis
    pub snapshot_path: Option<PathBuf>,
    pub logging_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ergast_base_url: "https://api.jolpi.ca/ergast/f1".to_string(),
            openf1_base_url: "https://api.openf1.org/v1".to_string(),
            drivers_dir: PathBuf::from("."),
            static_dir: PathBuf::from("static"),
            results_page_url: "https://www.formula1.com/en/results.html/{season}/races.html".to_string(),
            page_load_delay: Duration::from_millis(3000),
            sprint_tab_delay: Duration::from_millis(2000),
            snapshot_path: None,
            logging_level: LevelFilter::Info,
            log_file: PathBuf::from("program.log"),
        }
    }
}

impl Config {
    pub fn from_env() -> CustomResult<Config> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// # build a config from a key lookup
    /// missing keys keep their default.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> CustomResult<Config> {
        let defaults = Config::default();

        Ok(Config {
            ergast_base_url: lookup("ERGAST_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ergast_base_url),
            openf1_base_url: lookup("OPENF1_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openf1_base_url),
            drivers_dir: lookup("DRIVERS_DIR").map(PathBuf::from).unwrap_or(defaults.drivers_dir),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            results_page_url: lookup("RESULTS_PAGE_URL").unwrap_or(defaults.results_page_url),
            page_load_delay: read_millis(&lookup, "SCRAPE_PAGE_LOAD_DELAY_MS")?.unwrap_or(defaults.page_load_delay),
            sprint_tab_delay: read_millis(&lookup, "SCRAPE_TAB_DELAY_MS")?.unwrap_or(defaults.sprint_tab_delay),
            snapshot_path: lookup("SNAPSHOT_PATH").filter(|path| !path.is_empty()).map(PathBuf::from),
            logging_level: lookup("LOGGING_LEVEL")
                .map(|level| parse_level(&level))
                .unwrap_or(defaults.logging_level),
            log_file: lookup("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.log_file),
        })
    }

    pub fn results_page_for(&self, season: i32) -> String {
        self.results_page_url.replace("{season}", &season.to_string())
    }

    pub fn drivers_file_for(&self, season: i32) -> PathBuf {
        self.drivers_dir.join(format!("drivers_{}.json", season))
    }
}

fn read_millis<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> CustomResult<Option<Duration>> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(millis) => Ok(Some(Duration::from_millis(millis))),
            Err(error) => Err(Error::ConfigError {
                key: key.to_string(),
                message: error.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.ergast_base_url, "https://api.jolpi.ca/ergast/f1");
        assert_eq!(config.page_load_delay, Duration::from_secs(3));
        assert!(config.snapshot_path.is_none());
        assert_eq!(config.drivers_file_for(2023), PathBuf::from("./drivers_2023.json"));
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("OPENF1_BASE_URL", "http://localhost:9000/v1/"),
            ("SCRAPE_TAB_DELAY_MS", "150"),
            ("LOGGING_LEVEL", "DEBUG"),
            ("SNAPSHOT_PATH", "frozen.json"),
        ]))
        .unwrap();

        assert_eq!(config.openf1_base_url, "http://localhost:9000/v1");
        assert_eq!(config.sprint_tab_delay, Duration::from_millis(150));
        assert_eq!(config.logging_level, LevelFilter::Debug);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("frozen.json")));
        assert_eq!(config.results_page_for(2022), "https://www.formula1.com/en/results.html/2022/races.html");
    }

    #[test]
    fn invalid_delays_are_rejected() {
        let error = Config::from_lookup(lookup(&[("SCRAPE_PAGE_LOAD_DELAY_MS", "soon")])).unwrap_err();
        assert!(error.to_string().starts_with("invalid value for SCRAPE_PAGE_LOAD_DELAY_MS"));
    }
}
