use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::errors::{CustomResult, Error, FileDecodeSnafu, FileReadSnafu, FileWriteSnafu};
use crate::modules::models::driver::Driver;
use crate::modules::models::event::Event;
use crate::modules::models::session::SessionKind;
use crate::modules::provider::DataProvider;

/// # read a season's drivers file
/// the content is passed on untouched, it only has to be valid json.
pub async fn read_drivers_file(path: &Path) -> CustomResult<serde_json::Value> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(Error::not_found(format!("drivers file {}", path.display())));
        }
        Err(error) => return Err(error).context(FileReadSnafu { path }),
    };

    serde_json::from_str(&content).context(FileDecodeSnafu { path })
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct DriversFileEntry {
    pub number: String,
    pub name: String,
    pub abbreviation: String,
    pub team: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct DriversFile {
    pub season: i32,
    pub drivers: Vec<DriversFileEntry>,
}

impl DriversFile {
    /// # collect every driver that started a scored race of the season
    /// drivers are keyed on number, the latest round decides name and team.
    /// rounds without data are skipped.
    pub async fn collect(provider: &dyn DataProvider, season: i32) -> CustomResult<DriversFile> {
        let schedule = provider.event_schedule(season).await?;
        let mut drivers: BTreeMap<String, Driver> = BTreeMap::new();

        for event in Event::scored_rounds(&schedule) {
            match provider.session_results(season, event.round, SessionKind::Race).await {
                Ok(Some(results)) => {
                    for result in &results {
                        drivers.insert(result.driver_number.clone(), Driver::from_result(result));
                    }
                }
                Ok(None) => {
                    info!(target:"drivers_file:collect", "no race data for {} round {}", season, event.round);
                }
                Err(error) => {
                    warn!(target:"drivers_file:collect", "failed loading race of {} round {}. (error: {})", season, event.round, error);
                }
            }
        }

        let mut drivers: Vec<DriversFileEntry> = drivers
            .into_values()
            .map(|driver| DriversFileEntry {
                number: driver.number,
                name: driver.full_name,
                abbreviation: driver.abbreviation,
                team: driver.team_name,
            })
            .collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DriversFile { season, drivers })
    }

    pub fn write(&self, path: &Path) -> CustomResult<()> {
        let content = serde_json::to_string_pretty(self).map_err(|error| Error::upstream(error.to_string()))?;
        std::fs::write(path, content).context(FileWriteSnafu { path })
    }
}
