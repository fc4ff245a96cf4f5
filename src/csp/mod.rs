//! Constraint Satisfaction Problem (CSP) engine.
//!
//! Provides a domain-agnostic model of variables with finite domains and
//! n-ary constraints, plus an exhaustive backtracking search that lazily
//! enumerates every satisfying assignment.
//!
//! # Key Components
//!
//! - **Variables**: [`Variable`], [`Domain`] — named slots and their candidate values
//! - **Constraints**: [`Constraint`], [`Predicate`] — a scope plus a pure test
//! - **Model**: [`CspModel`] — immutable container with [`CspModel::is_consistent`]
//! - **Search**: [`Solutions`] — lazy depth-first enumeration
//! - **Runner**: [`CspRunner`] — eager collection with statistics
//!
//! # Design
//!
//! Consistency is checked directly: a constraint is evaluated as soon as
//! every variable in its scope is bound. There is no propagation and no
//! domain pruning. Variables are chosen by minimum remaining values with
//! ties broken by declaration order, and values are tried in ascending
//! order, so enumeration order is reproducible.
//!
//! # References
//!
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! ch. 6 "Constraint Satisfaction Problems"

mod assignment;
mod config;
mod constraint;
mod error;
mod model;
mod runner;
mod search;
mod variables;

pub use assignment::Assignment;
pub use config::SearchConfig;
pub use constraint::{Constraint, FnPredicate, Predicate};
pub use error::ModelError;
pub use model::{CspModel, CspModelBuilder};
pub use runner::{CspResult, CspRunner};
pub use search::{SearchStats, SearchStatus, Solutions};
pub use variables::{Domain, Variable};
