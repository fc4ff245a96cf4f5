//! Exhaustive constraint satisfaction with backtracking search.
//!
//! Provides:
//!
//! - **CSP engine**: variables with finite domains, n-ary constraints
//!   given as pure predicates, a consistency check for partial
//!   assignments, and a lazy depth-first search that enumerates every
//!   satisfying assignment in a reproducible order.
//! - **Wave selection**: a client of the engine that picks orders and
//!   corridors so that collected units stay within bounds and every item's
//!   demand is covered, then reports the most productive selection.
//!
//! # Architecture
//!
//! The engine in [`csp`] has no knowledge of orders or corridors; it works
//! purely on variable names, domains, and predicates. Everything
//! problem-specific lives in [`wave`].

pub mod csp;
pub mod wave;
