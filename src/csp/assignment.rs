//! Variable assignments.

use std::collections::BTreeMap;

/// A binding of some or all of a model's variables to values.
///
/// Keys are unique and ordered by name, so two assignments are equal
/// exactly when they bind the same variables to the same values.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::Assignment;
///
/// let mut a = Assignment::new();
/// a.bind("x", 1);
/// a.bind("y", 0);
/// assert_eq!(a.get("x"), Some(&1));
/// assert_eq!(a.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment<V> {
    bindings: BTreeMap<String, V>,
}

impl<V> Assignment<V> {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Binds `variable` to `value`, replacing any previous binding.
    pub fn bind(&mut self, variable: impl Into<String>, value: V) -> Option<V> {
        self.bindings.insert(variable.into(), value)
    }

    /// Builder-style [`bind`](Self::bind).
    pub fn with(mut self, variable: impl Into<String>, value: V) -> Self {
        let _ = self.bind(variable, value);
        self
    }

    /// Removes the binding for `variable`.
    pub fn unbind(&mut self, variable: &str) -> Option<V> {
        self.bindings.remove(variable)
    }

    /// Value bound to `variable`, if any.
    pub fn get(&self, variable: &str) -> Option<&V> {
        self.bindings.get(variable)
    }

    /// Whether `variable` is bound.
    pub fn contains(&self, variable: &str) -> bool {
        self.bindings.contains_key(variable)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for Assignment<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Assignment<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_replaces() {
        let mut a = Assignment::new();
        assert_eq!(a.bind("x", 1), None);
        assert_eq!(a.bind("x", 2), Some(1));
        assert_eq!(a.len(), 1);
        assert_eq!(a.get("x"), Some(&2));
    }

    #[test]
    fn test_unbind() {
        let mut a = Assignment::new().with("x", 1).with("y", 2);
        assert_eq!(a.unbind("x"), Some(1));
        assert!(!a.contains("x"));
        assert!(a.contains("y"));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Assignment::new().with("a", 0).with("b", 1);
        let b: Assignment<i32> = [("b", 1), ("a", 0)].into_iter().collect();
        assert_eq!(a, b);
        let names: Vec<&str> = b.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
