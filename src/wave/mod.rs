//! Order/corridor wave selection.
//!
//! A thin client of the [`csp`](crate::csp) engine. Given a demand matrix
//! (orders x items), a capacity matrix (corridors x items) and bounds on
//! the collected units, it models one `{0, 1}` variable per order and per
//! corridor, enumerates every feasible wave, and reports the one with the
//! highest productivity (units collected per corridor used).
//!
//! # Key Components
//!
//! - **Instance**: [`WaveInstance`] — validated problem data and its CSP model
//! - **Predicates**: [`DemandRange`], [`ItemCapacity`]
//! - **Objective**: [`productivity`], [`select_best`], [`TieBreak`]
//! - **Runner**: [`WaveRunner`] — enumerates [`Wave`]s and picks the best

mod config;
mod constraints;
mod instance;
mod objective;
mod runner;

pub use config::WaveConfig;
pub use constraints::{DemandRange, ItemCapacity};
pub use instance::{WaveError, WaveInstance};
pub use objective::{productivity, select_best, TieBreak};
pub use runner::{Wave, WaveResult, WaveRunner};
