//! CSP model definition.

use std::collections::HashMap;
use std::fmt::Debug;

use log::{debug, warn};

use super::assignment::Assignment;
use super::config::SearchConfig;
use super::constraint::Constraint;
use super::error::ModelError;
use super::search::Solutions;
use super::variables::{Domain, Variable};

/// An immutable constraint satisfaction model.
///
/// Holds the declared variables (in declaration order), their domains,
/// and the constraint list. Scopes are resolved to variable indices when
/// the model is built, so a malformed model can never reach the search.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::{Assignment, Constraint, CspModel, Domain};
///
/// let model = CspModel::builder()
///     .variable("A", Domain::binary())
///     .variable("B", Domain::binary())
///     .constraint(Constraint::from_fn("one_of", ["A", "B"], |v: &[u32]| v[0] + v[1] == 1))
///     .build()
///     .unwrap();
///
/// assert!(model.is_consistent(&Assignment::new().with("A", 1)));
/// assert!(!model.is_consistent(&Assignment::new().with("A", 1).with("B", 1)));
/// assert_eq!(model.solutions().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CspModel<V> {
    variables: Vec<Variable<V>>,
    index: HashMap<String, usize>,
    constraints: Vec<Constraint<V>>,
    /// Scope of each constraint as variable indices.
    scopes: Vec<Vec<usize>>,
    /// For each variable, the constraints whose scope mentions it.
    watchers: Vec<Vec<usize>>,
    /// Constraints with an empty scope.
    nullary: Vec<usize>,
}

impl<V: Ord + Clone + Debug> CspModel<V> {
    /// Starts building a model.
    pub fn builder() -> CspModelBuilder<V> {
        CspModelBuilder::new()
    }

    /// Whether `assignment` satisfies every constraint whose scope it fully covers.
    ///
    /// Constraints are checked in declaration order and the check stops at
    /// the first failing predicate. Constraints with unbound scope
    /// variables are skipped. Bindings for names the model does not
    /// declare are ignored.
    pub fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        let mut values = Vec::new();
        for constraint in &self.constraints {
            values.clear();
            let covered = constraint.scope().iter().all(|name| match assignment.get(name) {
                Some(value) => {
                    values.push(value.clone());
                    true
                }
                None => false,
            });
            if covered && !constraint.test(&values) {
                return false;
            }
        }
        true
    }

    /// Whether `assignment` binds every declared variable.
    pub fn is_complete(&self, assignment: &Assignment<V>) -> bool {
        self.variables.iter().all(|v| assignment.contains(&v.name))
    }

    /// Lazily enumerates every complete consistent assignment with the default configuration.
    pub fn solutions(&self) -> Solutions<'_, V> {
        Solutions::new(self, SearchConfig::default())
    }

    /// Lazily enumerates complete consistent assignments with the given configuration.
    pub fn search(&self, config: SearchConfig) -> Solutions<'_, V> {
        Solutions::new(self, config)
    }

    /// Declared variables, in declaration order.
    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    /// Constraints, in declaration order.
    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    /// Domain of the named variable.
    pub fn domain(&self, name: &str) -> Option<&Domain<V>> {
        self.index.get(name).map(|&i| &self.variables[i].domain)
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Whether every constraint with an empty scope holds.
    pub(crate) fn check_nullary(&self, checks: &mut u64) -> bool {
        self.nullary.iter().all(|&c| {
            *checks += 1;
            self.constraints[c].test(&[])
        })
    }

    /// Checks the constraints that `var` participates in against an
    /// indexed assignment buffer.
    ///
    /// Only constraints whose scope is fully bound are evaluated. When
    /// the buffer without `var` was already consistent, the result equals
    /// [`is_consistent`](Self::is_consistent) on the extended assignment.
    pub(crate) fn check_bound(
        &self,
        var: usize,
        buffer: &[Option<V>],
        scratch: &mut Vec<V>,
        checks: &mut u64,
    ) -> bool {
        for &c in &self.watchers[var] {
            scratch.clear();
            let covered = self.scopes[c].iter().all(|&i| match &buffer[i] {
                Some(value) => {
                    scratch.push(value.clone());
                    true
                }
                None => false,
            });
            if !covered {
                continue;
            }
            *checks += 1;
            if !self.constraints[c].test(scratch.as_slice()) {
                return false;
            }
        }
        true
    }
}

/// Collects variables and constraints, then validates them into a [`CspModel`].
#[derive(Debug, Clone)]
pub struct CspModelBuilder<V> {
    variables: Vec<Variable<V>>,
    constraints: Vec<Constraint<V>>,
}

impl<V: Ord + Clone + Debug> CspModelBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Declares a variable. Declaration order is the MRV tie-break order.
    pub fn add_variable(&mut self, var: Variable<V>) {
        self.variables.push(var);
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint<V>) {
        self.constraints.push(constraint);
    }

    /// Convenience: declare a variable by name and domain.
    pub fn variable(mut self, name: impl Into<String>, domain: Domain<V>) -> Self {
        self.add_variable(Variable::new(name, domain));
        self
    }

    /// Convenience: add a constraint.
    pub fn constraint(mut self, constraint: Constraint<V>) -> Self {
        self.add_constraint(constraint);
        self
    }

    /// Validates the declarations and freezes them into a model.
    ///
    /// # Errors
    ///
    /// - [`ModelError::DuplicateVariable`] if a name is declared twice
    /// - [`ModelError::EmptyDomain`] if a variable has no candidate values
    /// - [`ModelError::UnknownVariable`] if a constraint scope names an
    ///   undeclared variable
    pub fn build(self) -> Result<CspModel<V>, ModelError> {
        let mut index = HashMap::with_capacity(self.variables.len());
        for (i, var) in self.variables.iter().enumerate() {
            if var.domain.is_empty() {
                return Err(ModelError::EmptyDomain(var.name.clone()));
            }
            if index.insert(var.name.clone(), i).is_some() {
                return Err(ModelError::DuplicateVariable(var.name.clone()));
            }
        }

        let mut scopes = Vec::with_capacity(self.constraints.len());
        let mut watchers = vec![Vec::new(); self.variables.len()];
        let mut nullary = Vec::new();
        for (c, constraint) in self.constraints.iter().enumerate() {
            let mut scope = Vec::with_capacity(constraint.arity());
            for name in constraint.scope() {
                match index.get(name) {
                    Some(&i) => scope.push(i),
                    None => {
                        return Err(ModelError::UnknownVariable {
                            constraint: constraint.name().to_owned(),
                            variable: name.clone(),
                        })
                    }
                }
            }
            if scope.is_empty() {
                nullary.push(c);
            }
            for &i in &scope {
                // A variable repeated within one scope registers once.
                let list: &mut Vec<usize> = &mut watchers[i];
                if list.last() != Some(&c) {
                    list.push(c);
                }
            }
            scopes.push(scope);
        }

        if self.variables.is_empty() {
            warn!("CSP model built without any variables");
        }
        debug!(
            "built CSP model: {} variables, {} constraints",
            self.variables.len(),
            self.constraints.len()
        );

        Ok(CspModel {
            variables: self.variables,
            index,
            constraints: self.constraints,
            scopes,
            watchers,
            nullary,
        })
    }
}

impl<V: Ord + Clone + Debug> Default for CspModelBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
