//! Selectable option model shared by every combobox variant.

use serde::{Deserialize, Serialize};

/// An entry in a combobox or dropdown option list.
///
/// `value` identifies the option and is what gets committed; `label` is what
/// the user sees and what type-ahead filtering matches against. Disabled
/// options stay visible and reachable by keyboard highlight, but committing
/// one is a no-op.
///
/// # Examples
///
/// ```
/// use sift::SelectOption;
///
/// let rust = SelectOption::new("rust", "Rust");
/// let cobol = SelectOption::new("cobol", "COBOL").disabled();
///
/// assert!(rust.matches("RU"));
/// assert!(cobol.disabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl<V> SelectOption<V> {
    #[must_use]
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks this option as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Case-insensitive substring match of `query` against the label.
    ///
    /// An empty query matches every option.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::SelectOption;

    #[test]
    fn matches_ignores_case() {
        let option = SelectOption::new("ts", "TypeScript");
        assert!(option.matches("script"));
        assert!(option.matches("TYPE"));
        assert!(!option.matches("java"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(SelectOption::new(1, "Anything").matches(""));
    }

    #[test]
    fn deserializes_without_disabled_field() {
        let option: SelectOption<String> =
            serde_json::from_str(r#"{"value":"remote","label":"Remote"}"#).unwrap();
        assert_eq!(option, SelectOption::new("remote".to_string(), "Remote"));
    }
}
