//! Search configuration.

/// Configuration for the backtracking search.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::SearchConfig;
///
/// let config = SearchConfig::default().with_solution_limit(10);
/// assert_eq!(config.solution_limit, Some(10));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Stop after emitting this many solutions (None for exhaustive).
    pub solution_limit: Option<usize>,
}

impl SearchConfig {
    /// Creates an exhaustive search configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the search after `n` solutions.
    pub fn with_solution_limit(mut self, n: usize) -> Self {
        self.solution_limit = Some(n);
        self
    }

    /// Removes the solution limit.
    pub fn exhaustive(mut self) -> Self {
        self.solution_limit = None;
        self
    }
}
