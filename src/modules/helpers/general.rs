use std::collections::BTreeSet;

use log::debug;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::errors::{CustomResult, UpstreamDecodeSnafu, UpstreamRequestSnafu, UpstreamStatusSnafu};

pub struct Helpers {}

impl Helpers {
    /// # get a json document
    ///
    /// ## Arguments
    /// * `client` - the http client to use
    /// * `url` - the full url including the query
    ///
    /// ## Returns
    /// * `T` - the decoded body, non 2xx answers are errors
    pub async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> CustomResult<T> {
        debug!(target:"helpers/general:fetch_json", "GET {}", url);

        let response = client.get(url).send().await.context(UpstreamRequestSnafu { url })?;
        let status = response.status();
        if !status.is_success() {
            return UpstreamStatusSnafu { url, status: status.as_u16() }.fail();
        }

        let body = response.text().await.context(UpstreamRequestSnafu { url })?;
        serde_json::from_str(&body).context(UpstreamDecodeSnafu { url })
    }

    /// # sorted union of all values without duplicates
    pub fn sorted_union<T: Ord + Clone, I: IntoIterator<Item = T>>(values: I) -> Vec<T> {
        values
            .into_iter()
            .collect::<BTreeSet<T>>()
            .into_iter()
            .collect()
    }
}
