use std::cmp::Reverse;
use std::collections::HashMap;

use log::{debug, info, warn};

use crate::errors::CustomResult;
use crate::modules::models::event::Event;
use crate::modules::models::session::{SessionKind, SessionResult};
use crate::modules::models::standings::{ScoringRules, SeasonStandings, StandingsEntry, StandingsKind};
use crate::modules::provider::DataProvider;

/// # running points totals
/// remembers the order in which entrants first scored, ties are ranked on that order.
#[derive(Default)]
struct Tally {
    order: Vec<String>,
    totals: HashMap<String, (String, u32)>,
}

impl Tally {
    fn credit(&mut self, key: &str, name: &str, points: u32) {
        if points == 0 {
            return;
        }

        match self.totals.get_mut(key) {
            Some((label, total)) => {
                *label = name.to_string();
                *total += points;
            }
            None => {
                self.order.push(key.to_string());
                self.totals.insert(key.to_string(), (name.to_string(), points));
            }
        }
    }

    fn into_entries(mut self) -> Vec<StandingsEntry> {
        let mut entries: Vec<StandingsEntry> = self
            .order
            .iter()
            .filter_map(|key| {
                let (name, points) = self.totals.remove(key)?;
                Some(StandingsEntry {
                    key: key.clone(),
                    name,
                    points,
                })
            })
            .collect();

        // stable, so equal totals keep first scoring order
        entries.sort_by_key(|entry| Reverse(entry.points));
        entries
    }
}

/// # the row holding the fastest lap of a session
/// the first row in classification order wins when times are equal.
pub fn fastest_lap_holder(rows: &[SessionResult]) -> Option<&SessionResult> {
    rows.iter()
        .filter_map(|row| row.fastest_lap_time.map(|time| (time, row)))
        .min_by_key(|(time, _)| *time)
        .map(|(_, row)| row)
}

/// # points scored per row of a race
/// unclassified rows score nothing, rows without points are left out.
pub fn race_points<'a>(rows: &'a [SessionResult], rules: &ScoringRules) -> Vec<(&'a SessionResult, u32)> {
    let holder = fastest_lap_holder(rows).map(|row| row.driver_number.as_str());

    rows.iter()
        .filter_map(|row| {
            let position = row.position?;
            let mut points = rules.race.points_for(position);
            if holder == Some(row.driver_number.as_str()) && position >= 1 && position <= rules.fastest_lap_cutoff {
                points += rules.fastest_lap_bonus;
            }

            (points > 0).then_some((row, points))
        })
        .collect()
}

/// # points scored per row of a sprint
/// there is no fastest lap bonus in sprints.
pub fn sprint_points<'a>(rows: &'a [SessionResult], rules: &ScoringRules) -> Vec<(&'a SessionResult, u32)> {
    rows.iter()
        .filter_map(|row| {
            let points = rules.sprint.points_for(row.position?);
            (points > 0).then_some((row, points))
        })
        .collect()
}

/// # aggregates season standings from per round classifications
pub struct StandingsAggregator<'a> {
    provider: &'a dyn DataProvider,
    rules: &'a ScoringRules,
}

impl<'a> StandingsAggregator<'a> {
    pub fn new(provider: &'a dyn DataProvider, rules: &'a ScoringRules) -> StandingsAggregator<'a> {
        StandingsAggregator { provider, rules }
    }

    /// # compute the standings of a season
    /// only a failing schedule fails the whole season, sessions without data are
    /// recorded in `no_data_rounds` and skipped.
    ///
    /// ## Arguments
    /// * `season` - the season to aggregate
    /// * `kind` - aggregate per driver or per constructor
    pub async fn aggregate(&self, season: i32, kind: StandingsKind) -> CustomResult<SeasonStandings> {
        let schedule = self.provider.event_schedule(season).await?;

        let mut tally = Tally::default();
        let mut no_data_rounds: Vec<String> = Vec::new();

        for event in Event::scored_rounds(&schedule) {
            for session in [SessionKind::Race, SessionKind::Sprint] {
                let rows = match self.provider.session_results(season, event.round, session).await {
                    Ok(Some(rows)) => rows,
                    Ok(None) => {
                        warn!(target:"standings:aggregate", "no {} data for {} round {}", session, season, event.round);
                        no_data_rounds.push(format!("{}-{}", session, event.round));
                        continue;
                    }
                    Err(error) => {
                        warn!(target:"standings:aggregate", "failed loading {} of {} round {}. (error: {})", session, season, event.round, error);
                        no_data_rounds.push(format!("{}-{}", session, event.round));
                        continue;
                    }
                };

                let awarded = match session {
                    SessionKind::Sprint => sprint_points(&rows, self.rules),
                    _ => race_points(&rows, self.rules),
                };

                debug!(
                    target:"standings:aggregate",
                    "{} round {} ({}) points: {:?}",
                    season,
                    event.round,
                    session,
                    awarded
                        .iter()
                        .map(|(row, points)| (row.full_name.as_str(), row.position, *points))
                        .collect::<Vec<_>>()
                );

                for (row, points) in awarded {
                    match kind {
                        StandingsKind::Drivers => tally.credit(&row.driver_number, &row.full_name, points),
                        StandingsKind::Constructors => tally.credit(&row.team_name, &row.team_name, points),
                    }
                }
            }
        }

        let entries = tally.into_entries();
        info!(target:"standings:aggregate", "{:?} standings for {}: {} entries, {} sessions without data", kind, season, entries.len(), no_data_rounds.len());

        Ok(SeasonStandings {
            entries,
            no_data_rounds,
        })
    }
}
