//! Wave selection configuration.

use super::objective::TieBreak;

/// Configuration for [`WaveRunner`](super::WaveRunner).
///
/// # Examples
///
/// ```
/// use wave_csp::wave::{TieBreak, WaveConfig};
///
/// let config = WaveConfig::default()
///     .with_tie_break(TieBreak::Last)
///     .with_solution_limit(100);
/// assert_eq!(config.tie_break, TieBreak::Last);
/// assert_eq!(config.solution_limit, Some(100));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveConfig {
    /// Which of several equally productive waves is reported as best.
    pub tie_break: TieBreak,
    /// Stop after this many feasible waves (None for all).
    pub solution_limit: Option<usize>,
}

impl WaveConfig {
    /// Sets the tie-breaking policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Limits the number of feasible waves enumerated.
    pub fn with_solution_limit(mut self, n: usize) -> Self {
        self.solution_limit = Some(n);
        self
    }
}
