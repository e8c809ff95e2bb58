//! Match probability estimation from historical results.
//!
//! Each team's attacking and defensive strengths are measured relative to the league averages
//! for the venue role it will play. The expected goals of each side are combined into a grid of
//! independent Poisson scorelines, which is then partitioned into home win, draw and away win.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use toto::factorial::{Lookup, MAX_N};
use toto::linear::matrix::Matrix;
use toto::market::FairPrice;
use toto::probs::SliceExt;

use crate::domain::{LeagueAverages, MatchDataset, Score, Side};
use crate::scoregrid;
use crate::scoregrid::{Outcome, MAX_GOALS};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("no match data available")]
    InsufficientData,

    #[error("no {side} fixtures recorded for {team}")]
    UnknownTeam { team: String, side: Side },

    #[error("expected {side} goals of {rate} is not a positive finite rate")]
    DegenerateRate { side: Side, rate: f64 },
}

/// Strength ratios of a team in one venue role, relative to the league average for that role.
/// A `defence` above 1 means the team concedes more than an average side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStrength {
    pub attack: f64,
    pub defence: f64,
}
impl TeamStrength {
    pub fn measure(
        dataset: &MatchDataset,
        averages: &LeagueAverages,
        team: &str,
        side: Side,
    ) -> Result<Self, EstimateError> {
        let tally = dataset
            .tally(team, side)
            .ok_or_else(|| EstimateError::UnknownTeam {
                team: team.to_string(),
                side,
            })?;
        Ok(Self {
            attack: tally.mean_scored() / averages.goals(side),
            defence: tally.mean_conceded() / averages.goals(side.flip()),
        })
    }
}

/// Expected goals for each side of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expectation {
    pub home_goals: f64,
    pub away_goals: f64,
}
impl Expectation {
    pub fn derive(home: &TeamStrength, away: &TeamStrength, averages: &LeagueAverages) -> Self {
        Self {
            home_goals: home.attack * away.defence * averages.home_goals,
            away_goals: away.attack * home.defence * averages.away_goals,
        }
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        for (side, rate) in [(Side::Home, self.home_goals), (Side::Away, self.away_goals)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(EstimateError::DegenerateRate { side, rate });
            }
        }
        Ok(())
    }
}

/// Probabilities of the three full-time results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}
impl HeadToHead {
    pub const OUTCOMES: [Outcome; 3] = [
        Outcome::Win(Side::Home),
        Outcome::Draw,
        Outcome::Win(Side::Away),
    ];

    pub fn gather(scoregrid: &Matrix<f64>) -> Self {
        Self {
            home_win: Outcome::Win(Side::Home).gather(scoregrid),
            draw: Outcome::Draw.gather(scoregrid),
            away_win: Outcome::Win(Side::Away).gather(scoregrid),
        }
    }

    pub fn probability(&self, outcome: &Outcome) -> Option<f64> {
        match outcome {
            Outcome::Win(Side::Home) => Some(self.home_win),
            Outcome::Draw => Some(self.draw),
            Outcome::Win(Side::Away) => Some(self.away_win),
            Outcome::CorrectScore(_) => None,
        }
    }

    pub fn probs(&self) -> [f64; 3] {
        [self.home_win, self.draw, self.away_win]
    }

    pub fn booksum(&self) -> f64 {
        self.probs().sum()
    }

    /// Fair prices in the order of [`HeadToHead::OUTCOMES`].
    pub fn fair_prices(&self) -> [FairPrice; 3] {
        self.probs().map(FairPrice::from_probability)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub home_team: String,
    pub away_team: String,
    pub home_strength: TeamStrength,
    pub away_strength: TeamStrength,
    pub expectation: Expectation,
    pub head_to_head: HeadToHead,
    pub fair_prices: [FairPrice; 3],
    pub most_likely_score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_goals: u8,
}
impl Config {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.max_goals == 0 || self.max_goals > MAX_N {
            return Err(InvalidConfig::MaxGoalsOutOfRange(self.max_goals));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_goals: MAX_GOALS,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("max goals must be between 1 and {max}, got {0}", max = MAX_N)]
    MaxGoalsOutOfRange(u8),
}

pub struct Estimator {
    config: Config,
    factorial: Lookup,
}
impl Estimator {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn estimate(
        &self,
        home_team: &str,
        away_team: &str,
        dataset: &MatchDataset,
    ) -> Result<Estimate, EstimateError> {
        let averages = dataset
            .league_averages()
            .ok_or(EstimateError::InsufficientData)?;
        let home_strength = TeamStrength::measure(dataset, &averages, home_team, Side::Home)?;
        let away_strength = TeamStrength::measure(dataset, &averages, away_team, Side::Away)?;
        debug!(
            "averages: {averages:?}, {home_team}: {home_strength:?}, {away_team}: {away_strength:?}"
        );

        let expectation = Expectation::derive(&home_strength, &away_strength, &averages);
        expectation.validate()?;
        debug!("expectation: {expectation:?}");

        let dim = self.config.max_goals as usize + 1;
        let mut scoregrid = Matrix::allocate(dim, dim);
        scoregrid::from_univariate_poisson(
            expectation.home_goals,
            expectation.away_goals,
            &self.factorial,
            &mut scoregrid,
        );
        trace!("scoregrid:\n{}", scoregrid.verbose());

        let head_to_head = HeadToHead::gather(&scoregrid);
        debug!(
            "{head_to_head:?}, truncated tail: {:.3e}",
            1.0 - scoregrid.flatten().sum()
        );
        Ok(Estimate {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_strength,
            away_strength,
            expectation,
            fair_prices: head_to_head.fair_prices(),
            head_to_head,
            most_likely_score: scoregrid::most_likely(&scoregrid),
        })
    }
}

impl TryFrom<Config> for Estimator {
    type Error = InvalidConfig;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self {
            config,
            factorial: Lookup::default(),
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            config: Config::default(),
            factorial: Lookup::default(),
        }
    }
}

/// Home win, draw and away win probabilities for a fixture, using the default grid size.
pub fn estimate(
    home_team: &str,
    away_team: &str,
    dataset: &MatchDataset,
) -> Result<HeadToHead, EstimateError> {
    Estimator::default()
        .estimate(home_team, away_team, dataset)
        .map(|estimate| estimate.head_to_head)
}
