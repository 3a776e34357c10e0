use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use log::{info, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{CustomResult, Error};

static ROWS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.resultsarchive-table tbody tr").expect("row selector is valid")
});
static CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("cell selector is valid"));

const SPRINT_TAB_XPATH: &str = "//a[contains(text(), 'Sprint')]";

/// # row of the scraped sprint table
/// cells are kept as shown on the page.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct ScrapedSprintResult {
    pub position: String,
    pub driver: String,
    pub team: String,
    pub time: String,
    pub points: String,
}

/// # fallback source for sprint results
#[async_trait]
pub trait SprintScraper: Send + Sync + 'static {
    async fn sprint_results(&self, season: i32) -> CustomResult<Vec<ScrapedSprintResult>>;
}

/// # extract the sprint rows from a results page
/// rows without cells (headers, spacers) and rows missing columns are skipped.
pub fn parse_results_table(html: &str) -> Vec<ScrapedSprintResult> {
    let document = Html::parse_document(html);

    document
        .select(&ROWS)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&CELLS).map(cell_text).collect();
            if cells.len() < 8 {
                return None;
            }

            Some(ScrapedSprintResult {
                position: cells[1].clone(),
                driver: cells[3].clone(),
                team: cells[4].clone(),
                time: cells[6].clone(),
                points: cells[7].clone(),
            })
        })
        .collect()
}

/// visible text of a cell with the whitespace collapsed
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(|text| text.split_whitespace())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// # scraper driving a headless chrome
/// the browser lives for a single scrape and is shut down when it is dropped,
/// whichever way the scrape ends.
pub struct ChromeSprintScraper {
    config: Config,
}

impl ChromeSprintScraper {
    pub fn new(config: &Config) -> ChromeSprintScraper {
        ChromeSprintScraper { config: config.clone() }
    }

    fn scrape_page(url: &str, page_load_delay: Duration, sprint_tab_delay: Duration) -> CustomResult<String> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|error| scrape_error("could not configure the browser", error))?;
        let browser = Browser::new(options).map_err(|error| scrape_error("could not start the browser", error))?;
        let tab = browser.new_tab().map_err(|error| scrape_error("could not open a tab", error))?;

        tab.navigate_to(url)
            .map_err(|error| scrape_error("could not open the results page", error))?;
        tab.wait_until_navigated()
            .map_err(|error| scrape_error("results page did not load", error))?;
        thread::sleep(page_load_delay);

        let sprint_tab = match tab.find_element_by_xpath(SPRINT_TAB_XPATH) {
            Ok(element) => element,
            Err(error) => {
                warn!(target:"scrape:scrape_page", "no sprint tab on {}. (error: {})", url, error);
                return Err(Error::not_found("sprint tab"));
            }
        };
        sprint_tab
            .click()
            .map_err(|error| scrape_error("could not open the sprint tab", error))?;
        thread::sleep(sprint_tab_delay);

        tab.get_content()
            .map_err(|error| scrape_error("could not read the sprint results", error))
    }
}

fn scrape_error(what: &str, error: impl std::fmt::Display) -> Error {
    Error::ScrapeError {
        message: format!("{}: {}", what, error),
    }
}

#[async_trait]
impl SprintScraper for ChromeSprintScraper {
    async fn sprint_results(&self, season: i32) -> CustomResult<Vec<ScrapedSprintResult>> {
        let url = self.config.results_page_for(season);
        info!(target:"scrape:sprint_results", "scraping sprint results from {}", url);

        let (page_load_delay, sprint_tab_delay) = (self.config.page_load_delay, self.config.sprint_tab_delay);
        let html = tokio::task::spawn_blocking(move || ChromeSprintScraper::scrape_page(&url, page_load_delay, sprint_tab_delay))
            .await
            .map_err(|error| scrape_error("browser task failed", error))??;

        Ok(parse_results_table(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
        <table class="resultsarchive-table">
            <thead><tr><th></th><th>Pos</th><th>No</th><th>Driver</th><th>Car</th><th>Laps</th><th>Time</th><th>Pts</th></tr></thead>
            <tbody>
                <tr>
                    <td class="limiter"></td><td>1</td><td>1</td>
                    <td><span>Max</span> <span>Verstappen</span> <span>VER</span></td>
                    <td>Red Bull Racing Honda RBPT</td><td>17</td><td>30:15.460</td><td>8</td>
                </tr>
                <tr>
                    <td class="limiter"></td><td>2</td><td>4</td>
                    <td><span>Lando</span>
                        <span>Norris</span></td>
                    <td>McLaren Mercedes</td><td>17</td><td>+2.154s</td><td>7</td>
                </tr>
                <tr></tr>
                <tr><td>truncated</td></tr>
            </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn sprint_rows_are_read_by_column() {
        let rows = parse_results_table(PAGE);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ScrapedSprintResult {
                position: "1".to_string(),
                driver: "Max Verstappen VER".to_string(),
                team: "Red Bull Racing Honda RBPT".to_string(),
                time: "30:15.460".to_string(),
                points: "8".to_string(),
            }
        );
        assert_eq!(rows[1].driver, "Lando Norris");
        assert_eq!(rows[1].time, "+2.154s");
    }

    #[test]
    fn scraper_targets_the_configured_results_page() {
        let config = Config {
            results_page_url: "http://localhost:8080/results/{season}".to_string(),
            ..Config::default()
        };

        let scraper = ChromeSprintScraper::new(&config);

        assert_eq!(scraper.config.results_page_for(2023), "http://localhost:8080/results/2023");
    }

    #[test]
    fn pages_without_the_table_yield_nothing() {
        assert!(parse_results_table("<html><body><p>No results</p></body></html>").is_empty());
    }
}
