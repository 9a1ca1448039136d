//! Single-column sorting and the three-state sort cycle.
//!
//! Only one sort rule is active at a time. Clicking a column header walks the
//! cycle `Ascending → Descending → Unsorted`; the third click restores the
//! filtered-but-unsorted order, which is how users "unsort" a list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Host-supplied comparator for one sort key.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Direction of the active sort rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    /// No sort applied; items keep their filtered order.
    #[default]
    Unsorted,
}

/// The active sort rule: which key, in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Descending,
        }
    }

    /// Returns `true` when a key is selected and its direction is not `Unsorted`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.key.is_some() && self.direction != SortDirection::Unsorted
    }

    /// The indicator a column header should show for `key`.
    #[must_use]
    pub fn indicator_for(&self, key: &str) -> SortIndicator {
        if self.key.as_deref() != Some(key) {
            return SortIndicator::None;
        }
        match self.direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
            SortDirection::Unsorted => SortIndicator::None,
        }
    }
}

/// Per-column sort icon: none, up arrow, or down arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    None,
    Ascending,
    Descending,
}

impl fmt::Display for SortIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Self::None => "↕",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        };
        f.write_str(glyph)
    }
}

/// A sortable column declared by the host.
pub struct SortOption<T> {
    pub key: String,
    pub label: String,
    pub compare: Comparator<T>,
}

impl<T> SortOption<T> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            compare: Box::new(compare),
        }
    }
}

impl<T> fmt::Debug for SortOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortOption")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Advances the sort cycle for a click on `requested_key`.
///
/// - A column other than the active one starts at `Ascending`, whatever
///   direction the previous column had.
/// - The active column cycles `Ascending → Descending → Unsorted → Ascending`.
///
/// # Example
///
/// ```
/// use sift::query::{cycle_sort_direction, SortDirection, SortState};
///
/// let first = cycle_sort_direction(&SortState::default(), "name");
/// assert_eq!(first, SortState::ascending("name"));
/// let second = cycle_sort_direction(&first, "name");
/// assert_eq!(second.direction, SortDirection::Descending);
/// let third = cycle_sort_direction(&second, "name");
/// assert_eq!(third.direction, SortDirection::Unsorted);
/// ```
#[must_use]
pub fn cycle_sort_direction(current: &SortState, requested_key: &str) -> SortState {
    if current.key.as_deref() != Some(requested_key) {
        return SortState::ascending(requested_key);
    }
    let direction = match current.direction {
        SortDirection::Ascending => SortDirection::Descending,
        SortDirection::Descending => SortDirection::Unsorted,
        SortDirection::Unsorted => SortDirection::Ascending,
    };
    SortState {
        key: Some(requested_key.to_string()),
        direction,
    }
}

/// Sorts `items` with `compare` in the given direction.
///
/// `Unsorted` returns the input untouched. The sort is stable, so equal
/// elements keep their relative order in both directions.
pub fn apply_sort<'a, T, F>(
    mut items: Vec<&'a T>,
    compare: &F,
    direction: SortDirection,
) -> Vec<&'a T>
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    match direction {
        SortDirection::Unsorted => {}
        SortDirection::Ascending => items.sort_by(|a, b| compare(*a, *b)),
        SortDirection::Descending => items.sort_by(|a, b| compare(*a, *b).reverse()),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::{apply_sort, cycle_sort_direction, SortDirection, SortIndicator, SortState};

    fn by_len(a: &&str, b: &&str) -> std::cmp::Ordering {
        a.len().cmp(&b.len())
    }

    #[test]
    fn new_column_starts_ascending() {
        let state = cycle_sort_direction(&SortState::default(), "title");
        assert_eq!(state, SortState::ascending("title"));
    }

    #[test]
    fn same_column_cycles_three_states() {
        let mut state = SortState::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            state = cycle_sort_direction(&state, "title");
            seen.push(state.direction);
        }
        assert_eq!(
            seen,
            vec![
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Unsorted,
                SortDirection::Ascending,
            ]
        );
    }

    #[test]
    fn switching_column_restarts_at_ascending() {
        let descending = SortState::descending("title");
        assert_eq!(
            cycle_sort_direction(&descending, "company"),
            SortState::ascending("company")
        );
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let items = ["ccc", "a", "bb"];
        let refs: Vec<&&str> = items.iter().collect();
        let out = apply_sort(refs.clone(), &by_len, SortDirection::Unsorted);
        assert_eq!(out, refs);
    }

    #[test]
    fn descending_reverses_comparator() {
        let items = ["ccc", "a", "bb"];
        let out = apply_sort(items.iter().collect(), &by_len, SortDirection::Descending);
        assert_eq!(out, vec![&"ccc", &"bb", &"a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let items = ["xx", "a", "yy", "b", "zz"];
        let asc = apply_sort(items.iter().collect(), &by_len, SortDirection::Ascending);
        assert_eq!(asc, vec![&"a", &"b", &"xx", &"yy", &"zz"]);
        let desc = apply_sort(items.iter().collect(), &by_len, SortDirection::Descending);
        assert_eq!(desc, vec![&"xx", &"yy", &"zz", &"a", &"b"]);
    }

    #[test]
    fn indicator_reflects_active_column_only() {
        let state = SortState::descending("salary");
        assert_eq!(state.indicator_for("salary"), SortIndicator::Descending);
        assert_eq!(state.indicator_for("title"), SortIndicator::None);
        assert!(!SortState::default().is_active());
    }
}
