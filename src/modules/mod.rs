pub mod provider;
pub mod live_provider;
pub mod memory_provider;
pub mod ergast_api;
pub mod openf1_api;

pub mod standings;
pub mod scrape;
pub mod track_map;
pub mod drivers_file;

pub mod models {
    pub mod event;
    pub mod session;
    pub mod driver;
    pub mod lap;
    pub mod weather;
    pub mod race_control;

    pub mod standings;
}

pub mod helpers {
    pub mod time;
    pub mod logging;
    pub mod general;
}
