//! A scoregrid is a matrix of joint scoreline probabilities: rows index home goals and columns
//! index away goals. A grid of `n` rows and columns covers scores up to `n - 1` goals a side.

use serde::Serialize;
use toto::factorial::Factorial;
use toto::linear::matrix::Matrix;
use toto::poisson;
use toto::probs::SliceExt;

use crate::domain::{Score, Side};

/// Goals a side beyond which the grid is truncated by default.
pub const MAX_GOALS: u8 = 9;

/// Populates `scoregrid` assuming the home and away goal counts are independent Poisson
/// variables. Mass beyond the edges of the grid is discarded, not redistributed.
pub fn from_univariate_poisson(
    home_rate: f64,
    away_rate: f64,
    factorial: &impl Factorial,
    scoregrid: &mut Matrix<f64>,
) {
    let mut home_probs = vec![0.0; scoregrid.rows()];
    poisson::fill_univariate(home_rate, factorial, &mut home_probs);
    let mut away_probs = vec![0.0; scoregrid.cols()];
    poisson::fill_univariate(away_rate, factorial, &mut away_probs);
    home_probs.outer(&away_probs, scoregrid);
}

/// The most probable scoreline in the grid. Ties resolve to the lowest home, then away, score.
/// `None` when no cell carries any probability.
pub fn most_likely(scoregrid: &Matrix<f64>) -> Option<Score> {
    let mut best: Option<(usize, usize, f64)> = None;
    for row in 0..scoregrid.rows() {
        for col in 0..scoregrid.cols() {
            let prob = scoregrid[(row, col)];
            if prob > best.map_or(0.0, |(_, _, best_prob)| best_prob) {
                best = Some((row, col, prob));
            }
        }
    }
    best.map(|(row, col, _)| Score::new(row as u8, col as u8))
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Side),
    Draw,
    CorrectScore(Score),
}
impl Outcome {
    pub fn gather(&self, scoregrid: &Matrix<f64>) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::CorrectScore(score) => Self::gather_correct_score(score, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..usize::min(row, scoregrid.cols()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..usize::min(col, scoregrid.rows()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for index in 0..usize::min(scoregrid.rows(), scoregrid.cols()) {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &Matrix<f64>) -> f64 {
        let (row, col) = (score.home as usize, score.away as usize);
        if row < scoregrid.rows() && col < scoregrid.cols() {
            scoregrid[(row, col)]
        } else {
            0.0
        }
    }
}
