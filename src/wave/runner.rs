//! Wave enumeration and selection.

use std::fmt;
use std::time::Instant;

use log::{info, warn};

use super::config::WaveConfig;
use super::instance::{WaveError, WaveInstance};
use super::objective::{productivity, select_best};
use crate::csp::{Assignment, SearchConfig, SearchStats, SearchStatus};

/// One feasible selection of orders and corridors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave {
    /// 1-based position in enumeration order.
    pub index: usize,
    /// Selected orders (1-based).
    pub orders: Vec<usize>,
    /// Selected corridors (1-based).
    pub corridors: Vec<usize>,
    /// Units collected from the selected orders.
    pub total_units: u64,
    /// Number of selected corridors.
    pub corridor_count: usize,
    /// Productivity (see [`productivity`]).
    pub objective: f64,
}

impl Wave {
    fn from_assignment(
        instance: &WaveInstance,
        totals: &[u64],
        index: usize,
        solution: &Assignment<u32>,
    ) -> Self {
        let selected = |name: String| solution.get(&name) == Some(&1);

        let orders: Vec<usize> = (0..instance.order_count())
            .filter(|&o| selected(instance.order_variable(o)))
            .collect();
        let corridors: Vec<usize> = (0..instance.corridor_count())
            .filter(|&a| selected(instance.corridor_variable(a)))
            .collect();
        let total_units = orders.iter().map(|&o| totals[o]).sum();
        let corridor_count = corridors.len();

        Self {
            index,
            orders: orders.into_iter().map(|o| o + 1).collect(),
            corridors: corridors.into_iter().map(|a| a + 1).collect(),
            total_units,
            corridor_count,
            objective: productivity(total_units, corridor_count),
        }
    }
}

fn join_or_none(prefix: &str, ids: &[usize]) -> String {
    if ids.is_empty() {
        return "none".to_owned();
    }
    ids.iter()
        .map(|id| format!("{prefix}{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wave {}:", self.index)?;
        writeln!(f, "  Selected orders    : {}", join_or_none("Order", &self.orders))?;
        writeln!(f, "  Selected corridors : {}", join_or_none("Corridor", &self.corridors))?;
        writeln!(f, "  Total units        : {}", self.total_units)?;
        writeln!(f, "  Corridors used     : {}", self.corridor_count)?;
        writeln!(f, "  Objective          : {:.2}", self.objective)?;
        write!(f, "{}", "-".repeat(50))
    }
}

/// Result of a wave selection run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveResult {
    /// Every feasible wave, in enumeration order.
    pub waves: Vec<Wave>,
    /// The most productive wave, if any wave is feasible.
    pub best: Option<Wave>,
    /// Final search status.
    pub status: SearchStatus,
    /// Search counters.
    pub stats: SearchStats,
    /// Wall-clock time in milliseconds.
    pub solve_time_ms: u64,
}

impl WaveResult {
    /// Whether at least one feasible wave exists.
    pub fn is_feasible(&self) -> bool {
        self.best.is_some()
    }
}

impl fmt::Display for WaveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Feasible waves found:")?;
        for wave in &self.waves {
            writeln!(f, "{wave}")?;
        }
        match &self.best {
            Some(best) => {
                writeln!(f)?;
                writeln!(f, "Best wave found:")?;
                write!(f, "{best}")
            }
            None => write!(f, "No feasible wave found."),
        }
    }
}

/// Enumerates the feasible waves of an instance and picks the most productive.
pub struct WaveRunner;

impl WaveRunner {
    /// Runs wave selection.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::Model`] if the instance's model cannot be built.
    /// An instance with no feasible wave is not an error: the result has
    /// no waves and `best` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_csp::wave::{WaveConfig, WaveInstance, WaveRunner};
    ///
    /// let result = WaveRunner::run(&WaveInstance::reference(), &WaveConfig::default()).unwrap();
    /// let best = result.best.unwrap();
    /// assert_eq!(best.objective, 5.0);
    /// assert_eq!(best.orders, vec![2, 3]);
    /// assert_eq!(best.corridors, vec![5]);
    /// ```
    pub fn run(instance: &WaveInstance, config: &WaveConfig) -> Result<WaveResult, WaveError> {
        let start_time = Instant::now();

        let model = instance.build_model()?;
        let totals = instance.order_totals();
        let search_config = SearchConfig {
            solution_limit: config.solution_limit,
        };

        let mut search = model.search(search_config);
        let waves: Vec<Wave> = search
            .by_ref()
            .enumerate()
            .map(|(i, solution)| Wave::from_assignment(instance, &totals, i + 1, &solution))
            .collect();

        let best = select_best(&waves, |w| w.objective, config.tie_break).map(|(_, w)| w.clone());
        match &best {
            Some(best) => info!(
                "{} feasible waves, best is wave {} with objective {:.2}",
                waves.len(),
                best.index,
                best.objective
            ),
            None => warn!("no feasible wave for this instance"),
        }

        Ok(WaveResult {
            waves,
            best,
            status: search.status(),
            stats: search.stats(),
            solve_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
