//! Fair (zero-margin) prices derived from outcome probabilities.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("no fair price for an outcome with probability {probability}")]
pub struct UndefinedOdds {
    pub probability: f64,
}

/// Decimal price of an outcome with the given `probability`: its reciprocal.
pub fn fair_price(probability: f64) -> Result<f64, UndefinedOdds> {
    let price = 1.0 / probability;
    if probability > 0.0 && price.is_finite() {
        Ok(price)
    } else {
        Err(UndefinedOdds { probability })
    }
}

/// A fair price that renders to two decimal places, or as `N/A` when undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub struct FairPrice(pub Result<f64, UndefinedOdds>);

impl FairPrice {
    pub const UNAVAILABLE: &'static str = "N/A";

    pub fn from_probability(probability: f64) -> Self {
        Self(fair_price(probability))
    }

    pub fn decimal(&self) -> Option<f64> {
        self.0.as_ref().ok().copied()
    }
}

impl From<FairPrice> for Option<f64> {
    fn from(price: FairPrice) -> Self {
        price.decimal()
    }
}

impl Display for FairPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Ok(price) => write!(f, "{price:.2}"),
            Err(_) => write!(f, "{}", Self::UNAVAILABLE),
        }
    }
}

/// A probability rendered as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(pub f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}
