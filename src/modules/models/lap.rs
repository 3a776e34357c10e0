use std::time::Duration;

use serde::{Deserialize, Serialize};

/// # lap time and running position of one driver
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct LapTiming {
    pub lap_number: u32,
    pub lap_time: Option<Duration>,
    pub position: Option<u32>,
    pub pit_in: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SectorTiming {
    pub lap_number: u32,
    pub sector1: Option<Duration>,
    pub sector2: Option<Duration>,
    pub sector3: Option<Duration>,
}

/// # tyre fitted on a lap
/// `fresh` is true when the set was new at the start of the stint.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct TyreLap {
    pub lap_number: u32,
    pub compound: Option<String>,
    pub stint: u32,
    pub fresh: bool,
}

/// # a stint as reported by a provider
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Stint {
    pub stint_number: u32,
    pub lap_start: u32,
    pub lap_end: u32,
    pub compound: Option<String>,
    pub tyre_age_at_start: u32,
}

impl Stint {
    /// # expand stints into one row per lap
    /// overlapping stints are resolved in favour of the later stint.
    pub fn laps(stints: &[Stint]) -> Vec<TyreLap> {
        let mut sorted: Vec<&Stint> = stints.iter().collect();
        sorted.sort_by_key(|stint| stint.stint_number);

        let mut laps: Vec<TyreLap> = Vec::new();
        for stint in sorted {
            laps.retain(|lap| lap.lap_number < stint.lap_start);
            for lap_number in stint.lap_start..=stint.lap_end {
                laps.push(TyreLap {
                    lap_number,
                    compound: stint.compound.clone(),
                    stint: stint.stint_number,
                    fresh: stint.tyre_age_at_start == 0,
                });
            }
        }

        laps
    }
}
