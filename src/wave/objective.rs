//! Wave objective and best-solution selection.

/// Productivity of a wave: collected units per corridor used.
///
/// A wave that uses no corridor scores `-1.0`, so every wave has a
/// comparable objective.
///
/// # Examples
///
/// ```
/// use wave_csp::wave::productivity;
///
/// assert_eq!(productivity(10, 2), 5.0);
/// assert_eq!(productivity(3, 0), -1.0);
/// ```
pub fn productivity(total_units: u64, corridors_used: usize) -> f64 {
    if corridors_used == 0 {
        -1.0
    } else {
        total_units as f64 / corridors_used as f64
    }
}

/// Which of several equally good solutions to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Keep the first maximal solution in enumeration order.
    #[default]
    First,
    /// Keep the last maximal solution in enumeration order.
    Last,
}

/// Returns the position and value of the item with the highest objective.
///
/// Returns `None` for an empty sequence.
///
/// # Examples
///
/// ```
/// use wave_csp::wave::{select_best, TieBreak};
///
/// let scores = [1.0, 3.0, 2.0, 3.0];
/// assert_eq!(select_best(scores, |s| *s, TieBreak::First), Some((1, 3.0)));
/// assert_eq!(select_best(scores, |s| *s, TieBreak::Last), Some((3, 3.0)));
/// ```
pub fn select_best<T, F>(
    items: impl IntoIterator<Item = T>,
    objective: F,
    tie_break: TieBreak,
) -> Option<(usize, T)>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(usize, T, f64)> = None;
    for (i, item) in items.into_iter().enumerate() {
        let value = objective(&item);
        let replace = match &best {
            None => true,
            Some((_, _, best_value)) => match tie_break {
                TieBreak::First => value > *best_value,
                TieBreak::Last => value >= *best_value,
            },
        };
        if replace {
            best = Some((i, item, value));
        }
    }
    best.map(|(i, item, _)| (i, item))
}
