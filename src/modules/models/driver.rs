use serde::{Deserialize, Serialize};

use crate::modules::models::session::SessionResult;

/// # entrant of a round
/// built from a race classification, used to resolve the driver given in a url.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Driver {
    pub number: String,
    pub driver_id: String,
    pub full_name: String,
    pub abbreviation: String,
    pub team_name: String,
}

impl Driver {
    pub fn from_result(result: &SessionResult) -> Driver {
        Driver {
            number: result.driver_number.clone(),
            driver_id: result.driver_id.clone(),
            full_name: result.full_name.clone(),
            abbreviation: result.abbreviation.clone(),
            team_name: result.team_name.clone(),
        }
    }

    /// # check if a driver matches the identifier from a request
    /// accepts the abbreviation (`VER`), the car number (`1`) or the provider id (`max_verstappen`).
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.abbreviation.eq_ignore_ascii_case(identifier)
            || self.number == identifier
            || self.driver_id.eq_ignore_ascii_case(identifier)
    }

    /// # find a driver in a classification
    ///
    /// ## Arguments
    /// * `results` - the race classification
    /// * `identifier` - abbreviation, number or provider id
    ///
    /// ## Returns
    /// * `Option<Driver>` - the first matching driver
    pub fn find(results: &[SessionResult], identifier: &str) -> Option<Driver> {
        results
            .iter()
            .map(Driver::from_result)
            .find(|driver| driver.matches(identifier))
    }
}
