//! Numeric building blocks for pricing football fixtures: factorials, the Poisson mass function,
//! dense matrices, probability helpers, a minimal CSV reader and fair-price derivation.

pub mod csv;
pub mod factorial;
pub mod linear;
pub mod market;
pub mod poisson;
pub mod probs;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
