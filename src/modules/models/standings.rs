use serde::{Deserialize, Serialize};

/// # points awarded per finishing position
/// index 0 holds the points for P1, positions past the end score nothing.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct PointsTable(pub Vec<u32>);

impl PointsTable {
    pub fn points_for(&self, position: u32) -> u32 {
        if position == 0 {
            return 0;
        }

        self.0.get(position as usize - 1).copied().unwrap_or(0)
    }

    /// last position that still scores
    pub fn scoring_positions(&self) -> u32 {
        self.0.len() as u32
    }
}

/// # championship scoring
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct ScoringRules {
    pub race: PointsTable,
    pub sprint: PointsTable,
    pub fastest_lap_bonus: u32,
    /// the fastest lap holder only gets the bonus when finishing at or above this position
    pub fastest_lap_cutoff: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            race: PointsTable(vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1]),
            sprint: PointsTable(vec![8, 7, 6, 5, 4, 3, 2, 1]),
            fastest_lap_bonus: 1,
            fastest_lap_cutoff: 10,
        }
    }
}

/// # what the standings are keyed on
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StandingsKind {
    /// keyed on driver number, labelled with the full name
    Drivers,
    /// keyed and labelled on team name
    Constructors,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct StandingsEntry {
    pub key: String,
    pub name: String,
    pub points: u32,
}

/// # outcome of aggregating a season
/// `no_data_rounds` holds `Race-{round}` and `Sprint-{round}` labels for sessions without data.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct SeasonStandings {
    pub entries: Vec<StandingsEntry>,
    pub no_data_rounds: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_outside_the_table_score_nothing() {
        let rules = ScoringRules::default();

        assert_eq!(rules.race.points_for(1), 25);
        assert_eq!(rules.race.points_for(10), 1);
        assert_eq!(rules.race.points_for(11), 0);
        assert_eq!(rules.race.points_for(0), 0);
        assert_eq!(rules.sprint.points_for(1), 8);
        assert_eq!(rules.sprint.points_for(9), 0);
        assert_eq!(rules.sprint.scoring_positions(), 8);
    }
}
