//! Variant, key, and selection types for the combobox state machine.
//!
//! A [`Combobox`](super::Combobox) runs one of three variants. The variant
//! decides how text input filters the option list and what a commit does:
//!
//! - **`TypeAhead`**: single value; committing writes the label into the input
//!   and closes the popup.
//! - **`MultiSelect`**: ordered set of values rendered as tokens; committing
//!   toggles membership and keeps the popup open.
//! - **`Dropdown`**: single value picked from a trigger button; no text filter.
//!
//! # Example
//!
//! ```rust
//! use sift::select::{Selection, Variant};
//!
//! let selection: Selection<&str> = Selection::empty_for(Variant::MultiSelect);
//! assert!(selection.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Which interaction model the combobox follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    TypeAhead,
    MultiSelect,
    Dropdown,
}

impl Variant {
    /// Default minimum input length before the option list is filtered.
    #[must_use]
    pub const fn default_min_chars(self) -> usize {
        match self {
            Self::TypeAhead => 1,
            Self::MultiSelect | Self::Dropdown => 0,
        }
    }

    #[must_use]
    pub const fn default_placeholder(self) -> &'static str {
        match self {
            Self::TypeAhead => "Start typing...",
            Self::MultiSelect => "Search and select...",
            Self::Dropdown => "Select an option",
        }
    }

    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::MultiSelect)
    }
}

/// Keys the state machine reacts to. Everything else is plain text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Only meaningful on an empty multi-select input, where it removes the
    /// most recently added token.
    Backspace,
}

/// How option labels are matched against the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match: every whitespace-separated token must match.
    Fuzzy,
}

/// Committed value(s), reported to the host on every commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<V> {
    Single(Option<V>),
    /// Ordered by insertion; never holds duplicates.
    Multi(Vec<V>),
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl<V: PartialEq> Selection<V> {
    #[must_use]
    pub fn empty_for(variant: Variant) -> Self {
        if variant.is_multi() {
            Self::Multi(Vec::new())
        } else {
            Self::Single(None)
        }
    }

    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        match self {
            Self::Single(current) => current.as_ref() == Some(value),
            Self::Multi(values) => values.contains(value),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(current) => current.is_none(),
            Self::Multi(values) => values.is_empty(),
        }
    }

    /// Whether this selection has the shape `variant` expects.
    #[must_use]
    pub fn fits(&self, variant: Variant) -> bool {
        matches!(
            (self, variant.is_multi()),
            (Self::Multi(_), true) | (Self::Single(_), false)
        )
    }

    /// Drops repeated values, keeping each one at its first position.
    #[must_use]
    pub fn deduplicated(self) -> Self {
        match self {
            Self::Multi(values) => {
                let mut unique: Vec<V> = Vec::with_capacity(values.len());
                for value in values {
                    if !unique.contains(&value) {
                        unique.push(value);
                    }
                }
                Self::Multi(unique)
            }
            single @ Self::Single(_) => single,
        }
    }

    /// Values in display order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        let slice: &[V] = match self {
            Self::Single(Some(value)) => std::slice::from_ref(value),
            Self::Single(None) => &[],
            Self::Multi(values) => values,
        };
        slice.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, Variant};

    #[test]
    fn empty_selection_shape_follows_variant() {
        assert_eq!(Selection::<u8>::empty_for(Variant::MultiSelect), Selection::Multi(vec![]));
        assert_eq!(Selection::<u8>::empty_for(Variant::Dropdown), Selection::Single(None));
        assert!(Selection::<u8>::empty_for(Variant::TypeAhead).fits(Variant::TypeAhead));
        assert!(!Selection::<u8>::Multi(vec![]).fits(Variant::Dropdown));
    }

    #[test]
    fn deduplicated_keeps_first_occurrences() {
        let multi = Selection::Multi(vec![3, 1, 3, 2, 1]).deduplicated();
        assert_eq!(multi, Selection::Multi(vec![3, 1, 2]));
        assert_eq!(Selection::Single(Some(7)).deduplicated(), Selection::Single(Some(7)));
    }

    #[test]
    fn values_iterate_in_order() {
        let multi = Selection::Multi(vec!["b", "a"]);
        assert_eq!(multi.values().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(multi.contains(&"a"));
        assert_eq!(Selection::Single(Some(3)).values().count(), 1);
        assert_eq!(Selection::<u8>::Single(None).values().count(), 0);
    }

    #[test]
    fn default_min_chars_per_variant() {
        assert_eq!(Variant::TypeAhead.default_min_chars(), 1);
        assert_eq!(Variant::MultiSelect.default_min_chars(), 0);
    }
}
