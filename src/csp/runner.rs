//! Eager search driver.

use std::fmt::Debug;
use std::time::Instant;

use super::assignment::Assignment;
use super::config::SearchConfig;
use super::model::CspModel;
use super::search::{SearchStats, SearchStatus};

/// Result of an eager CSP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspResult<V> {
    /// Solutions in enumeration order.
    pub solutions: Vec<Assignment<V>>,
    /// Final search status (`Exhausted` or `LimitReached`).
    pub status: SearchStatus,
    /// Search counters.
    pub stats: SearchStats,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl<V> CspResult<V> {
    /// Whether at least one solution was found.
    pub fn is_solution_found(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// Whether the whole search space was explored.
    pub fn is_exhaustive(&self) -> bool {
        self.status == SearchStatus::Exhausted
    }
}

/// Drains a [`Solutions`](super::Solutions) iterator into a [`CspResult`].
pub struct CspRunner;

impl CspRunner {
    /// Runs the search to completion (or to the configured limit).
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_csp::csp::{CspModel, CspRunner, Domain, SearchConfig};
    ///
    /// let model = CspModel::builder()
    ///     .variable("x", Domain::new(1..=3))
    ///     .build()
    ///     .unwrap();
    ///
    /// let result = CspRunner::run(&model, &SearchConfig::default());
    /// assert_eq!(result.solutions.len(), 3);
    /// assert!(result.is_exhaustive());
    /// ```
    pub fn run<V: Ord + Clone + Debug>(
        model: &CspModel<V>,
        config: &SearchConfig,
    ) -> CspResult<V> {
        let start_time = Instant::now();

        let mut search = model.search(config.clone());
        let solutions: Vec<Assignment<V>> = search.by_ref().collect();

        CspResult {
            solutions,
            status: search.status(),
            stats: search.stats(),
            solve_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    /// Counts solutions without keeping them.
    pub fn count<V: Ord + Clone + Debug>(model: &CspModel<V>) -> usize {
        model.solutions().count()
    }
}
