//!
//! CTC (Connectionist Temporal Classification) forward-backward
//!
//! Computes `P(l|y)` of a target label `l` given per-timestep emission
//! distributions `y`, and the gradient `dlnP/dy`.
//!
pub mod alphabet;
pub mod backward;
pub mod check;
pub mod emission;
pub mod error;
pub mod forward;
pub mod gradient;
pub mod label;
pub mod mocks;
pub mod output;
pub mod params;
pub mod prelude;
pub mod table;

#[macro_use]
extern crate approx;
