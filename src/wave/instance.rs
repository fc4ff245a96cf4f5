//! Order/corridor problem data.

use rand::Rng;

use super::constraints::{DemandRange, ItemCapacity};
use crate::csp::{Constraint, CspModel, Domain, ModelError, Variable};

/// Errors raised while validating a [`WaveInstance`] or building its model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaveError {
    #[error("instance has no orders")]
    NoOrders,

    #[error("instance has no corridors")]
    NoCorridors,

    #[error("order {order} lists {found} items, expected {expected}")]
    RaggedOrder {
        order: usize,
        found: usize,
        expected: usize,
    },

    #[error("corridor {corridor} lists {found} items, expected {expected}")]
    RaggedCorridor {
        corridor: usize,
        found: usize,
        expected: usize,
    },

    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds { lower: u64, upper: u64 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A wave selection instance.
///
/// Row `o` of `orders` is the demand of order `o` per item; row `a` of
/// `corridors` is the capacity of corridor `a` per item. A wave is
/// feasible when the units of its selected orders lie in
/// `[lower_bound, upper_bound]` and, for every item, the selected orders
/// demand no more than the selected corridors supply.
///
/// # Examples
///
/// ```
/// use wave_csp::wave::WaveInstance;
///
/// let instance = WaveInstance::new(
///     vec![vec![2, 0], vec![0, 1]],
///     vec![vec![1, 1], vec![2, 0]],
///     1,
///     3,
/// )
/// .unwrap();
/// assert_eq!(instance.item_count(), 2);
/// assert_eq!(instance.order_totals(), vec![2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WaveInstance {
    orders: Vec<Vec<u32>>,
    corridors: Vec<Vec<u32>>,
    lower_bound: u64,
    upper_bound: u64,
}

/// Deserialization goes through [`WaveInstance::new`], so malformed data
/// is rejected with the same [`WaveError`] as in code.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WaveInstance {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct RawInstance {
            orders: Vec<Vec<u32>>,
            corridors: Vec<Vec<u32>>,
            lower_bound: u64,
            upper_bound: u64,
        }

        let raw = RawInstance::deserialize(deserializer)?;
        Self::new(raw.orders, raw.corridors, raw.lower_bound, raw.upper_bound)
            .map_err(serde::de::Error::custom)
    }
}

impl WaveInstance {
    /// Validates and creates an instance.
    ///
    /// # Errors
    ///
    /// Returns a [`WaveError`] if there are no orders or corridors, if a
    /// row's item count differs from the first order's, or if
    /// `lower_bound > upper_bound`.
    pub fn new(
        orders: Vec<Vec<u32>>,
        corridors: Vec<Vec<u32>>,
        lower_bound: u64,
        upper_bound: u64,
    ) -> Result<Self, WaveError> {
        let expected = orders.first().ok_or(WaveError::NoOrders)?.len();
        if corridors.is_empty() {
            return Err(WaveError::NoCorridors);
        }
        if let Some((order, row)) = orders.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(WaveError::RaggedOrder {
                order: order + 1,
                found: row.len(),
                expected,
            });
        }
        if let Some((corridor, row)) = corridors
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(WaveError::RaggedCorridor {
                corridor: corridor + 1,
                found: row.len(),
                expected,
            });
        }
        if lower_bound > upper_bound {
            return Err(WaveError::InvertedBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            orders,
            corridors,
            lower_bound,
            upper_bound,
        })
    }

    /// The five orders by five corridors instance with bounds `[5, 12]`.
    pub fn reference() -> Self {
        Self {
            orders: vec![
                vec![3, 0, 1, 0, 0],
                vec![0, 1, 0, 1, 0],
                vec![0, 0, 1, 0, 2],
                vec![1, 0, 2, 1, 1],
                vec![0, 1, 0, 0, 0],
            ],
            corridors: vec![
                vec![2, 1, 1, 0, 1],
                vec![2, 1, 2, 0, 1],
                vec![0, 2, 0, 1, 2],
                vec![2, 1, 0, 1, 1],
                vec![0, 1, 2, 1, 2],
            ],
            lower_bound: 5,
            upper_bound: 12,
        }
    }

    /// Generates a random instance with quantities in `0..=max_quantity`.
    ///
    /// Bounds are set to a quarter and three quarters of the total units
    /// over all orders. Counts of zero are raised to one.
    pub fn random<R: Rng>(
        rng: &mut R,
        order_count: usize,
        corridor_count: usize,
        item_count: usize,
        max_quantity: u32,
    ) -> Self {
        let mut matrix = |rows: usize| -> Vec<Vec<u32>> {
            (0..rows.max(1))
                .map(|_| {
                    (0..item_count)
                        .map(|_| rng.random_range(0..=max_quantity))
                        .collect()
                })
                .collect()
        };
        let orders = matrix(order_count);
        let corridors = matrix(corridor_count);

        let total: u64 = orders.iter().flatten().map(|&q| u64::from(q)).sum();
        Self {
            orders,
            corridors,
            lower_bound: total / 4,
            upper_bound: total * 3 / 4,
        }
    }

    /// Demand matrix (order x item).
    pub fn orders(&self) -> &[Vec<u32>] {
        &self.orders
    }

    /// Capacity matrix (corridor x item).
    pub fn corridors(&self) -> &[Vec<u32>] {
        &self.corridors
    }

    /// Minimum total units a wave must collect.
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Maximum total units a wave may collect.
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    pub fn item_count(&self) -> usize {
        self.orders[0].len()
    }

    /// Total units of each order.
    pub fn order_totals(&self) -> Vec<u64> {
        self.orders
            .iter()
            .map(|row| row.iter().map(|&q| u64::from(q)).sum())
            .collect()
    }

    /// Model variable name of order `o` (zero-based).
    pub fn order_variable(&self, o: usize) -> String {
        format!("Order{}", o + 1)
    }

    /// Model variable name of corridor `a` (zero-based).
    pub fn corridor_variable(&self, a: usize) -> String {
        format!("Corridor{}", a + 1)
    }

    /// Builds the CSP model of this instance.
    ///
    /// Variables are the orders then the corridors, each over `{0, 1}`.
    /// Constraints are one [`DemandRange`] over the orders, then one
    /// [`ItemCapacity`] per item over all variables.
    pub fn build_model(&self) -> Result<CspModel<u32>, WaveError> {
        let order_vars: Vec<String> = (0..self.order_count())
            .map(|o| self.order_variable(o))
            .collect();
        let corridor_vars: Vec<String> = (0..self.corridor_count())
            .map(|a| self.corridor_variable(a))
            .collect();
        let all_vars: Vec<String> = order_vars.iter().chain(&corridor_vars).cloned().collect();

        let mut builder = CspModel::builder();
        for name in &all_vars {
            builder.add_variable(Variable::new(name.clone(), Domain::binary()));
        }

        builder.add_constraint(Constraint::new(
            order_vars,
            DemandRange::new(self.order_totals(), self.lower_bound, self.upper_bound),
        ));
        for item in 0..self.item_count() {
            let demand = self.orders.iter().map(|row| u64::from(row[item])).collect();
            let capacity = self
                .corridors
                .iter()
                .map(|row| u64::from(row[item]))
                .collect();
            builder.add_constraint(Constraint::new(
                all_vars.clone(),
                ItemCapacity::new(item, demand, capacity),
            ));
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reference_shape() {
        let instance = WaveInstance::reference();
        assert_eq!(instance.order_count(), 5);
        assert_eq!(instance.corridor_count(), 5);
        assert_eq!(instance.item_count(), 5);
        assert_eq!(instance.order_totals(), vec![4, 2, 3, 5, 1]);
        assert_eq!((instance.lower_bound(), instance.upper_bound()), (5, 12));
    }

    #[test]
    fn test_no_orders() {
        let err = WaveInstance::new(vec![], vec![vec![1]], 0, 1).unwrap_err();
        assert_eq!(err, WaveError::NoOrders);
    }

    #[test]
    fn test_no_corridors() {
        let err = WaveInstance::new(vec![vec![1]], vec![], 0, 1).unwrap_err();
        assert_eq!(err, WaveError::NoCorridors);
    }

    #[test]
    fn test_ragged_rows() {
        let err = WaveInstance::new(vec![vec![1, 2], vec![1]], vec![vec![1, 1]], 0, 3).unwrap_err();
        assert_eq!(
            err,
            WaveError::RaggedOrder {
                order: 2,
                found: 1,
                expected: 2
            }
        );

        let err = WaveInstance::new(vec![vec![1, 2]], vec![vec![1, 1, 1]], 0, 3).unwrap_err();
        assert!(matches!(err, WaveError::RaggedCorridor { corridor: 1, .. }));
    }

    #[test]
    fn test_inverted_bounds() {
        let err = WaveInstance::new(vec![vec![1]], vec![vec![1]], 4, 2).unwrap_err();
        assert_eq!(err.to_string(), "lower bound 4 exceeds upper bound 2");
    }

    #[test]
    fn test_build_model() {
        let model = WaveInstance::reference().build_model().unwrap();
        assert_eq!(model.variable_count(), 10);
        assert_eq!(model.constraint_count(), 6);
        assert_eq!(model.variables()[0].name, "Order1");
        assert_eq!(model.variables()[5].name, "Corridor1");
        assert_eq!(model.constraints()[0].arity(), 5);
        assert_eq!(model.constraints()[0].name(), "demand_range");
        assert_eq!(model.constraints()[1].arity(), 10);
        assert_eq!(model.constraints()[5].name(), "item5_capacity");
    }

    #[test]
    fn test_random_instance_is_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let instance = WaveInstance::random(&mut rng, 4, 3, 6, 3);
        assert_eq!(instance.order_count(), 4);
        assert_eq!(instance.corridor_count(), 3);
        assert_eq!(instance.item_count(), 6);
        assert!(instance.lower_bound() <= instance.upper_bound());
        assert!(instance.orders().iter().flatten().all(|&q| q <= 3));

        let again = WaveInstance::random(&mut StdRng::seed_from_u64(7), 4, 3, 6, 3);
        assert_eq!(instance, again);
    }
}
