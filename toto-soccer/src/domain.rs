use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }
}

/// A single historical fixture with its full-time result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u16,
    pub away_goals: u16,
}
impl MatchRecord {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u16,
        away_goals: u16,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn goals(&self, side: Side) -> u16 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }
}

/// Goals scored and conceded by one team over the fixtures it played in one venue role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalTally {
    pub matches: u32,
    pub scored: u64,
    pub conceded: u64,
}
impl GoalTally {
    fn add(&mut self, scored: u16, conceded: u16) {
        self.matches += 1;
        self.scored += scored as u64;
        self.conceded += conceded as u64;
    }

    pub fn mean_scored(&self) -> f64 {
        self.scored as f64 / self.matches as f64
    }

    pub fn mean_conceded(&self) -> f64 {
        self.conceded as f64 / self.matches as f64
    }
}

/// Mean goals per fixture across the whole dataset, by the side that scored them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeagueAverages {
    pub home_goals: f64,
    pub away_goals: f64,
}
impl LeagueAverages {
    pub fn goals(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct VenueTallies {
    home: Option<GoalTally>,
    away: Option<GoalTally>,
}
impl VenueTallies {
    fn get(&self, side: Side) -> Option<&GoalTally> {
        match side {
            Side::Home => self.home.as_ref(),
            Side::Away => self.away.as_ref(),
        }
    }

    fn get_or_default(&mut self, side: Side) -> &mut GoalTally {
        match side {
            Side::Home => self.home.get_or_insert_with(GoalTally::default),
            Side::Away => self.away.get_or_insert_with(GoalTally::default),
        }
    }
}

/// An immutable collection of historical fixtures, indexed by team and venue role on construction.
#[derive(Clone, Debug, Default)]
pub struct MatchDataset {
    records: Vec<MatchRecord>,
    tallies: FxHashMap<String, VenueTallies>,
    home_goals: u64,
    away_goals: u64,
}
impl MatchDataset {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let mut tallies = FxHashMap::<String, VenueTallies>::default();
        let (mut home_goals, mut away_goals) = (0, 0);
        for record in &records {
            home_goals += record.home_goals as u64;
            away_goals += record.away_goals as u64;
            for side in [Side::Home, Side::Away] {
                tallies
                    .entry(record.team(side).to_string())
                    .or_default()
                    .get_or_default(side)
                    .add(record.goals(side), record.goals(side.flip()));
            }
        }
        Self {
            records,
            tallies,
            home_goals,
            away_goals,
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `None` if the dataset is empty.
    pub fn league_averages(&self) -> Option<LeagueAverages> {
        if self.is_empty() {
            return None;
        }
        let matches = self.records.len() as f64;
        Some(LeagueAverages {
            home_goals: self.home_goals as f64 / matches,
            away_goals: self.away_goals as f64 / matches,
        })
    }

    /// `None` if the team has not played any fixture in the given role.
    pub fn tally(&self, team: &str, side: Side) -> Option<&GoalTally> {
        self.tallies.get(team).and_then(|venues| venues.get(side))
    }

    /// Sorted names of the teams that appear as the home side in at least one fixture.
    pub fn teams(&self) -> Vec<String> {
        let mut teams = self
            .tallies
            .iter()
            .filter(|(_, venues)| venues.home.is_some())
            .map(|(team, _)| team.clone())
            .collect::<Vec<_>>();
        teams.sort();
        teams
    }
}

impl From<Vec<MatchRecord>> for MatchDataset {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self::new(records)
    }
}
