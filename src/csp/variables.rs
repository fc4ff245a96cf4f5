//! CSP variable and domain types.

use std::collections::BTreeSet;
use std::fmt::Debug;

/// A finite, non-empty set of candidate values for one variable.
///
/// Values are deduplicated and kept in ascending order. That order is the
/// value ordering used by the search, so enumeration is reproducible.
///
/// # Examples
///
/// ```
/// use wave_csp::csp::Domain;
///
/// let d = Domain::new([3, 1, 2, 1]);
/// assert_eq!(d.values(), &[1, 2, 3]);
/// assert_eq!(d.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Domain<V> {
    values: Vec<V>,
}

impl<V: Ord + Clone> Domain<V> {
    /// Creates a domain from any collection of values.
    ///
    /// An empty collection produces an empty domain; the model builder
    /// rejects it.
    pub fn new(values: impl IntoIterator<Item = V>) -> Self {
        let set: BTreeSet<V> = values.into_iter().collect();
        Self {
            values: set.into_iter().collect(),
        }
    }

    /// Creates a single-value domain.
    pub fn fixed(value: V) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Values in ascending order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Number of candidate values.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether the domain has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `value` is a member of this domain.
    pub fn contains(&self, value: &V) -> bool {
        self.values.binary_search(value).is_ok()
    }
}

impl Domain<u32> {
    /// The `{0, 1}` domain used for selection variables.
    pub fn binary() -> Self {
        Self { values: vec![0, 1] }
    }
}

/// Deserialization goes through [`Domain::new`], so incoming values are
/// sorted and deduplicated like any other domain.
#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for Domain<V>
where
    V: Ord + Clone + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct RawDomain<V> {
            values: Vec<V>,
        }

        let raw = RawDomain::<V>::deserialize(deserializer)?;
        Ok(Domain::new(raw.values))
    }
}

/// A named decision variable with its domain.
///
/// The name is the variable's identity within a model.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "V: Ord + Clone + serde::Deserialize<'de>"))
)]
pub struct Variable<V> {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Candidate values.
    pub domain: Domain<V>,
}

impl<V: Ord + Clone + Debug> Variable<V> {
    /// Creates a new variable over the given domain.
    pub fn new(name: impl Into<String>, domain: Domain<V>) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    /// Domain size.
    pub fn domain_size(&self) -> usize {
        self.domain.size()
    }

    /// Whether this variable has exactly one candidate value.
    pub fn is_fixed(&self) -> bool {
        self.domain.size() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_sorted_and_deduplicated() {
        let d = Domain::new(vec![5, 2, 9, 2, 5]);
        assert_eq!(d.values(), &[2, 5, 9]);
        assert_eq!(d.size(), 3);
        assert!(d.contains(&9));
        assert!(!d.contains(&3));
    }

    #[test]
    fn test_empty_domain() {
        let d: Domain<i32> = Domain::new(Vec::new());
        assert!(d.is_empty());
        assert_eq!(d.size(), 0);
    }

    #[test]
    fn test_string_domain_is_lexicographic() {
        let d = Domain::new(["red", "green", "blue"]);
        assert_eq!(d.values(), &["blue", "green", "red"]);
    }

    #[test]
    fn test_variable() {
        let v = Variable::new("x", Domain::binary());
        assert_eq!(v.name, "x");
        assert_eq!(v.domain_size(), 2);
        assert!(!v.is_fixed());

        let f = Variable::new("y", Domain::fixed(7));
        assert!(f.is_fixed());
        assert_eq!(f.domain.values(), &[7]);
    }
}
