//! Constraint predicates and scoped constraints.

use std::fmt;
use std::sync::Arc;

/// A pure test over the values of a constraint's scope.
///
/// `values` holds one value per scoped variable, in scope order. The
/// search may call the same predicate many times with the same values on
/// different branches, so implementations must not depend on external
/// mutable state.
///
/// Parameters a predicate needs (bounds, coefficients, an item index) are
/// stored as plain fields of the implementing type.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::Predicate;
///
/// struct SumEquals(i64);
///
/// impl Predicate<i64> for SumEquals {
///     fn name(&self) -> &str { "sum_equals" }
///     fn test(&self, values: &[i64]) -> bool {
///         values.iter().sum::<i64>() == self.0
///     }
/// }
///
/// assert!(SumEquals(3).test(&[1, 2]));
/// ```
pub trait Predicate<V>: Send + Sync {
    /// Returns the name of this predicate, used in logs and debug output.
    fn name(&self) -> &str;

    /// Returns `true` when the values satisfy the predicate.
    fn test(&self, values: &[V]) -> bool;
}

/// A [`Predicate`] backed by a closure.
pub struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> FnPredicate<F> {
    /// Wraps `f` under the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<V, F> Predicate<V> for FnPredicate<F>
where
    F: Fn(&[V]) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, values: &[V]) -> bool {
        (self.f)(values)
    }
}

/// A constraint: an ordered scope of variable names plus a predicate.
///
/// A variable may appear in the scopes of many constraints. Constraints
/// are cheap to clone; the predicate is shared.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::Constraint;
///
/// let c = Constraint::from_fn("exactly_one", ["A", "B"], |v: &[u32]| v[0] + v[1] == 1);
/// assert_eq!(c.arity(), 2);
/// assert!(c.test(&[0, 1]));
/// assert!(!c.test(&[1, 1]));
/// ```
pub struct Constraint<V> {
    scope: Vec<String>,
    predicate: Arc<dyn Predicate<V>>,
}

impl<V: 'static> Constraint<V> {
    /// Creates a constraint over `scope` checked by `predicate`.
    pub fn new<S, P>(scope: impl IntoIterator<Item = S>, predicate: P) -> Self
    where
        S: Into<String>,
        P: Predicate<V> + 'static,
    {
        Self {
            scope: scope.into_iter().map(Into::into).collect(),
            predicate: Arc::new(predicate),
        }
    }

    /// Creates a constraint from a closure.
    pub fn from_fn<S, F>(name: impl Into<String>, scope: impl IntoIterator<Item = S>, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&[V]) -> bool + Send + Sync + 'static,
    {
        Self::new(scope, FnPredicate::new(name, f))
    }
}

impl<V> Constraint<V> {
    /// Variable names in scope order.
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Number of scoped variables.
    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    /// Predicate name.
    pub fn name(&self) -> &str {
        self.predicate.name()
    }

    /// Evaluates the predicate on values given in scope order.
    pub fn test(&self, values: &[V]) -> bool {
        self.predicate.test(values)
    }
}

impl<V> Clone for Constraint<V> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<V> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name())
            .field("scope", &self.scope)
            .finish()
    }
}
