//! Wave feasibility predicates.
//!
//! Both predicates read `{0, 1}` selection values and keep their problem
//! data as plain fields, so each constraint instance is self-contained.

use crate::csp::Predicate;

/// Total units of the selected orders must lie in `[lower, upper]`.
///
/// Scope: the order variables, in order.
#[derive(Debug, Clone)]
pub struct DemandRange {
    order_totals: Vec<u64>,
    lower: u64,
    upper: u64,
}

impl DemandRange {
    pub fn new(order_totals: Vec<u64>, lower: u64, upper: u64) -> Self {
        Self {
            order_totals,
            lower,
            upper,
        }
    }

    /// Units collected by a selection.
    pub fn collected(&self, selection: &[u32]) -> u64 {
        weighted_sum(&self.order_totals, selection)
    }
}

impl Predicate<u32> for DemandRange {
    fn name(&self) -> &str {
        "demand_range"
    }

    fn test(&self, values: &[u32]) -> bool {
        (self.lower..=self.upper).contains(&self.collected(values))
    }
}

/// Demand for one item over the selected orders must not exceed the
/// capacity of the selected corridors.
///
/// Scope: every order variable followed by every corridor variable.
#[derive(Debug, Clone)]
pub struct ItemCapacity {
    name: String,
    /// Units of this item per order.
    demand: Vec<u64>,
    /// Units of this item per corridor.
    capacity: Vec<u64>,
}

impl ItemCapacity {
    /// Creates the capacity check for item `item` (zero-based).
    pub fn new(item: usize, demand: Vec<u64>, capacity: Vec<u64>) -> Self {
        Self {
            name: format!("item{}_capacity", item + 1),
            demand,
            capacity,
        }
    }
}

fn weighted_sum(weights: &[u64], selection: &[u32]) -> u64 {
    weights
        .iter()
        .zip(selection)
        .map(|(&w, &chosen)| w * u64::from(chosen))
        .sum()
}

impl Predicate<u32> for ItemCapacity {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, values: &[u32]) -> bool {
        let (orders, corridors) = values.split_at(self.demand.len().min(values.len()));
        weighted_sum(&self.demand, orders) <= weighted_sum(&self.capacity, corridors)
    }
}
