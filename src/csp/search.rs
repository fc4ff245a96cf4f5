//! Lazy backtracking search.
//!
//! # Algorithm
//!
//! 1. Start from the empty assignment
//! 2. Pick the unbound variable with the smallest domain (ties: declaration order)
//! 3. Bind it to each domain value in ascending order:
//!    a. If the constraints it completes all hold, descend
//!    b. Otherwise try the next value
//! 4. When every variable is bound, yield the assignment and resume at step 3
//! 5. When a variable's values run out, unbind it and return to its parent
//!
//! The recursion is kept as an explicit stack of frames, so the iterator
//! suspends at each solution and resumes exactly where it left off.

use std::fmt::Debug;
use std::iter::FusedIterator;

use log::{debug, trace};

use super::assignment::Assignment;
use super::config::SearchConfig;
use super::model::CspModel;

/// Lifecycle of a [`Solutions`] iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// `next()` has not been called yet.
    NotStarted,
    /// Search is suspended between solutions.
    Running,
    /// The whole search space has been explored.
    Exhausted,
    /// Stopped after the configured solution limit.
    LimitReached,
}

/// Counters collected during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Variable bindings tried.
    pub nodes: u64,
    /// Predicate evaluations.
    pub checks: u64,
    /// Variables whose values were exhausted.
    pub backtracks: u64,
    /// Complete assignments emitted.
    pub solutions: u64,
}

/// One level of the depth-first search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Variable bound at this level.
    var: usize,
    /// Index of the next untried domain value.
    next: usize,
}

/// Lazy iterator over every complete assignment consistent with a model.
///
/// Created by [`CspModel::solutions`] or [`CspModel::search`]. Each call
/// creates an independent search from the empty assignment, so the
/// enumeration is restartable and always produced in the same order.
/// Dropping the iterator discards the remaining search.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::{Constraint, CspModel, Domain, SearchStatus};
///
/// let model = CspModel::builder()
///     .variable("A", Domain::binary())
///     .variable("B", Domain::binary())
///     .constraint(Constraint::from_fn("one_of", ["A", "B"], |v: &[u32]| v[0] + v[1] == 1))
///     .build()
///     .unwrap();
///
/// let mut solutions = model.solutions();
/// assert_eq!(solutions.status(), SearchStatus::NotStarted);
///
/// let first = solutions.next().unwrap();
/// assert_eq!((first.get("A"), first.get("B")), (Some(&0), Some(&1)));
/// let second = solutions.next().unwrap();
/// assert_eq!((second.get("A"), second.get("B")), (Some(&1), Some(&0)));
///
/// assert!(solutions.next().is_none());
/// assert_eq!(solutions.status(), SearchStatus::Exhausted);
/// ```
#[derive(Debug)]
pub struct Solutions<'m, V> {
    model: &'m CspModel<V>,
    config: SearchConfig,
    /// Variable indices in MRV order. Domains are never pruned, so the
    /// order is fixed for the whole search.
    order: Vec<usize>,
    /// Current binding per variable index; undone on backtrack.
    buffer: Vec<Option<V>>,
    stack: Vec<Frame>,
    scratch: Vec<V>,
    status: SearchStatus,
    stats: SearchStats,
}

impl<'m, V: Ord + Clone + Debug> Solutions<'m, V> {
    pub(crate) fn new(model: &'m CspModel<V>, config: SearchConfig) -> Self {
        let variables = model.variables();
        let mut order: Vec<usize> = (0..variables.len()).collect();
        // Stable sort keeps declaration order among equal domain sizes.
        order.sort_by_key(|&i| variables[i].domain_size());

        Self {
            model,
            config,
            order,
            buffer: vec![None; variables.len()],
            stack: Vec::with_capacity(variables.len()),
            scratch: Vec::new(),
            status: SearchStatus::NotStarted,
            stats: SearchStats::default(),
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Counters collected so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of variables currently bound.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn start(&mut self) {
        self.status = SearchStatus::Running;
        debug!(
            "starting backtracking search over {} variables, {} constraints",
            self.model.variable_count(),
            self.model.constraint_count()
        );

        if self.config.solution_limit == Some(0) {
            self.halt(SearchStatus::LimitReached);
        } else if !self.model.check_nullary(&mut self.stats.checks) {
            self.halt(SearchStatus::Exhausted);
        }
    }

    /// Variable to bind at the current depth, or `None` if all are bound.
    fn next_variable(&self) -> Option<usize> {
        self.order.get(self.stack.len()).copied()
    }

    fn emit(&mut self) -> Assignment<V> {
        self.stats.solutions += 1;
        let solution: Assignment<V> = self
            .model
            .variables()
            .iter()
            .zip(&self.buffer)
            .filter_map(|(var, value)| value.clone().map(|v| (var.name.clone(), v)))
            .collect();
        trace!("solution {}: {:?}", self.stats.solutions, solution);

        if let Some(limit) = self.config.solution_limit {
            if self.stats.solutions >= limit as u64 {
                self.halt(SearchStatus::LimitReached);
            }
        }
        solution
    }

    fn halt(&mut self, status: SearchStatus) {
        self.status = status;
        self.stack.clear();
        self.buffer.iter_mut().for_each(|slot| *slot = None);
        debug!("search {:?}: {:?}", status, self.stats);
    }
}

impl<V: Ord + Clone + Debug> Iterator for Solutions<'_, V> {
    type Item = Assignment<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status == SearchStatus::NotStarted {
            self.start();
            if self.status != SearchStatus::Running {
                return None;
            }
            match self.next_variable() {
                Some(var) => self.stack.push(Frame { var, next: 0 }),
                // No variables: the empty assignment is the only complete one.
                None => return Some(self.emit()),
            }
        }
        if self.status != SearchStatus::Running {
            return None;
        }

        let model = self.model;
        while let Some(frame) = self.stack.last_mut() {
            let var = frame.var;
            let values = model.variables()[var].domain.values();
            self.buffer[var] = None;

            if frame.next == values.len() {
                let _ = self.stack.pop();
                self.stats.backtracks += 1;
                continue;
            }

            let value = values[frame.next].clone();
            frame.next += 1;
            self.buffer[var] = Some(value);
            self.stats.nodes += 1;

            if !model.check_bound(var, &self.buffer, &mut self.scratch, &mut self.stats.checks) {
                continue;
            }

            match self.next_variable() {
                Some(child) => self.stack.push(Frame {
                    var: child,
                    next: 0,
                }),
                None => return Some(self.emit()),
            }
        }

        self.halt(SearchStatus::Exhausted);
        None
    }
}

impl<V: Ord + Clone + Debug> FusedIterator for Solutions<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{Constraint, Domain};
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    fn exactly_one() -> CspModel<u32> {
        CspModel::builder()
            .variable("A", Domain::binary())
            .variable("B", Domain::binary())
            .constraint(Constraint::from_fn("exactly_one", ["A", "B"], |v: &[u32]| {
                v[0] + v[1] == 1
            }))
            .build()
            .unwrap()
    }

    /// Every complete assignment of `model` that passes `is_consistent`.
    fn brute_force<V: Ord + Clone + Debug>(model: &CspModel<V>) -> Vec<Assignment<V>> {
        let mut all = vec![Assignment::new()];
        for var in model.variables() {
            all = all
                .into_iter()
                .flat_map(|partial| {
                    var.domain
                        .values()
                        .iter()
                        .map(move |value| partial.clone().with(var.name.clone(), value.clone()))
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        all.into_iter().filter(|a| model.is_consistent(a)).collect()
    }

    #[test]
    fn test_exactly_one_scenario() {
        let model = exactly_one();
        let solutions: Vec<_> = model.solutions().collect();
        assert_eq!(
            solutions,
            vec![
                Assignment::new().with("A", 0).with("B", 1),
                Assignment::new().with("A", 1).with("B", 0),
            ]
        );
    }

    #[test]
    fn test_unsatisfiable_single_value() {
        let model = CspModel::builder()
            .variable("X", Domain::fixed(0u32))
            .constraint(Constraint::from_fn("never", ["X"], |_: &[u32]| false))
            .build()
            .unwrap();

        let mut solutions = model.solutions();
        assert!(solutions.next().is_none());
        assert_eq!(solutions.status(), SearchStatus::Exhausted);
        assert_eq!(solutions.stats().solutions, 0);
        assert_eq!(solutions.stats().nodes, 1);
    }

    #[test]
    fn test_exhausted_is_distinct_from_not_started() {
        let model = exactly_one();
        let mut solutions = model.search(SearchConfig::default());
        assert_eq!(solutions.status(), SearchStatus::NotStarted);
        assert_eq!(solutions.by_ref().count(), 2);
        assert_eq!(solutions.status(), SearchStatus::Exhausted);
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_no_variables() {
        let model = CspModel::<u32>::builder().build().unwrap();
        let solutions: Vec<_> = model.solutions().collect();
        assert_eq!(solutions, vec![Assignment::new()]);
    }

    #[test]
    fn test_failing_nullary_constraint() {
        let model = CspModel::builder()
            .variable("A", Domain::binary())
            .constraint(Constraint::from_fn("off", Vec::<String>::new(), |_: &[u32]| false))
            .build()
            .unwrap();

        let mut solutions = model.solutions();
        assert!(solutions.next().is_none());
        assert_eq!(solutions.stats().nodes, 0);
        assert_eq!(solutions.status(), SearchStatus::Exhausted);
    }

    #[test]
    fn test_mrv_picks_smallest_domain_first() {
        // C has the smallest domain, so it is bound first and varies slowest.
        let model = CspModel::builder()
            .variable("A", Domain::new([0, 1, 2]))
            .variable("B", Domain::new([0, 1, 2]))
            .variable("C", Domain::new([0, 1]))
            .build()
            .unwrap();

        let firsts: Vec<(i32, i32, i32)> = model
            .solutions()
            .take(4)
            .map(|s| {
                let value = |name: &str| s.get(name).copied().unwrap();
                (value("A"), value("B"), value("C"))
            })
            .collect();
        assert_eq!(firsts, vec![(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0)]);
        assert_eq!(model.solutions().count(), 18);
    }

    #[test]
    fn test_ties_follow_declaration_order() {
        let model = CspModel::builder()
            .variable("Z", Domain::binary())
            .variable("Y", Domain::binary())
            .build()
            .unwrap();

        let order: Vec<(u32, u32)> = model
            .solutions()
            .map(|s| (*s.get("Z").unwrap(), *s.get("Y").unwrap()))
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_pruning_on_partial_assignment() {
        // A = 1 violates the unary constraint, so its subtree is never entered.
        let model = CspModel::builder()
            .variable("A", Domain::binary())
            .variable("B", Domain::binary())
            .constraint(Constraint::from_fn("a_is_zero", ["A"], |v: &[u32]| v[0] == 0))
            .build()
            .unwrap();

        let mut solutions = model.solutions();
        assert_eq!(solutions.by_ref().count(), 2);
        // A=0, B=0, B=1, A=1
        assert_eq!(solutions.stats().nodes, 4);
    }

    #[test]
    fn test_string_domains() {
        let model = CspModel::builder()
            .variable("left", Domain::new(["red", "green", "blue"]))
            .variable("right", Domain::new(["red", "green", "blue"]))
            .constraint(Constraint::from_fn("differ", ["left", "right"], |v: &[&str]| {
                v[0] != v[1]
            }))
            .build()
            .unwrap();

        let solutions: Vec<_> = model.solutions().collect();
        assert_eq!(solutions.len(), 6);
        assert_eq!(solutions[0].get("left"), Some(&"blue"));
        assert_eq!(solutions[0].get("right"), Some(&"green"));
    }

    #[test]
    fn test_solution_limit() {
        let model = CspModel::builder()
            .variable("A", Domain::new(0..4))
            .variable("B", Domain::new(0..4))
            .build()
            .unwrap();

        let mut solutions = model.search(SearchConfig::default().with_solution_limit(3));
        assert_eq!(solutions.by_ref().count(), 3);
        assert_eq!(solutions.status(), SearchStatus::LimitReached);

        let mut none = model.search(SearchConfig::default().with_solution_limit(0));
        assert!(none.next().is_none());
        assert_eq!(none.status(), SearchStatus::LimitReached);
    }

    #[test]
    fn test_early_termination_does_not_explore_rest() {
        let model = CspModel::builder()
            .variable("A", Domain::new(0..10))
            .variable("B", Domain::new(0..10))
            .variable("C", Domain::new(0..10))
            .build()
            .unwrap();

        let mut solutions = model.solutions();
        let first: Vec<_> = solutions.by_ref().take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(solutions.status(), SearchStatus::Running);
        assert_eq!(solutions.stats().solutions, 2);
        assert!(solutions.stats().nodes < 10);
        drop(solutions);
    }

    #[test]
    fn test_restartable() {
        let model = exactly_one();
        let first: Vec<_> = model.solutions().collect();
        let second: Vec<_> = model.solutions().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_cross_branch_leakage() {
        // A constraint over (A, C) must only ever see the value of A bound
        // on the current branch.
        let model = CspModel::builder()
            .variable("A", Domain::new([0, 1]))
            .variable("B", Domain::new([0, 1]))
            .variable("C", Domain::new([0, 1]))
            .constraint(Constraint::from_fn("c_equals_a", ["A", "C"], |v: &[i32]| v[0] == v[1]))
            .build()
            .unwrap();

        for s in model.solutions() {
            assert_eq!(s.get("A"), s.get("C"));
        }
        assert_eq!(model.solutions().count(), 4);
    }

    #[test]
    fn test_depth_tracks_bound_variables() {
        let model = exactly_one();
        let mut solutions = model.solutions();
        assert_eq!(solutions.depth(), 0);

        assert!(solutions.next().is_some());
        assert_eq!(solutions.depth(), 2);

        assert_eq!(solutions.by_ref().count(), 1);
        assert_eq!(solutions.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "malformed predicate")]
    fn test_predicate_panic_reaches_caller() {
        let model = CspModel::builder()
            .variable("A", Domain::binary())
            .variable("B", Domain::binary())
            .constraint(Constraint::from_fn("broken", ["A", "B"], |v: &[u32]| {
                if v[0] == 1 {
                    panic!("malformed predicate");
                }
                true
            }))
            .build()
            .unwrap();

        let _ = model.solutions().count();
    }

    #[derive(Debug, Clone)]
    enum Shape {
        SumAtMost(i32),
        SumNot(i32),
        Distinct,
        Ascending,
    }

    fn shape() -> impl Strategy<Value = Shape> {
        prop_oneof![
            (0..6i32).prop_map(Shape::SumAtMost),
            (0..6i32).prop_map(Shape::SumNot),
            Just(Shape::Distinct),
            Just(Shape::Ascending),
        ]
    }

    fn random_model() -> impl Strategy<Value = CspModel<i32>> {
        prop::collection::vec(1usize..=3, 1..=5)
            .prop_flat_map(|sizes| {
                let n = sizes.len();
                let constraint = (prop::collection::vec(0..n, 0..=3), shape());
                (Just(sizes), prop::collection::vec(constraint, 0..=4))
            })
            .prop_map(|(sizes, constraints)| {
                let mut builder = CspModel::builder();
                for (i, size) in sizes.iter().enumerate() {
                    builder.add_variable(crate::csp::Variable::new(
                        format!("v{i}"),
                        Domain::new(0..*size as i32),
                    ));
                }
                for (scope, shape) in constraints {
                    let names: Vec<String> = scope.iter().map(|i| format!("v{i}")).collect();
                    let c = match shape {
                        Shape::SumAtMost(k) => {
                            Constraint::from_fn("sum_at_most", names, move |v: &[i32]| {
                                v.iter().sum::<i32>() <= k
                            })
                        }
                        Shape::SumNot(k) => {
                            Constraint::from_fn("sum_not", names, move |v: &[i32]| {
                                v.iter().sum::<i32>() != k
                            })
                        }
                        Shape::Distinct => Constraint::from_fn("distinct", names, |v: &[i32]| {
                            v.iter().collect::<HashSet<_>>().len() == v.len()
                        }),
                        Shape::Ascending => Constraint::from_fn("ascending", names, |v: &[i32]| {
                            v.windows(2).all(|w| w[0] <= w[1])
                        }),
                    };
                    builder.add_constraint(c);
                }
                builder.build().unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(model in random_model()) {
            let found: Vec<_> = model.solutions().collect();
            let expected: BTreeSet<_> = brute_force(&model).into_iter().collect();

            for s in &found {
                prop_assert!(model.is_complete(s));
                prop_assert!(model.is_consistent(s));
            }
            let unique: BTreeSet<_> = found.iter().cloned().collect();
            prop_assert_eq!(unique.len(), found.len());
            prop_assert_eq!(unique, expected);
        }

        #[test]
        fn prop_deterministic(model in random_model()) {
            let first: Vec<_> = model.solutions().collect();
            let second: Vec<_> = model.solutions().collect();
            prop_assert_eq!(first, second);
        }
    }
}
