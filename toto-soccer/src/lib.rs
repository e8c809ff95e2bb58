pub mod data;
pub mod domain;
pub mod model;
pub mod print;
pub mod scoregrid;
pub mod selection;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
