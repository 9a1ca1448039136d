//! Text filtering over a host-owned dataset.
//!
//! The host supplies a predicate `(item, query) -> bool`. Filtering never
//! reorders: the result is always a subsequence of the input in its original
//! relative order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Host-supplied text filter.
pub type Predicate<T> = Box<dyn Fn(&T, &str) -> bool>;

/// Returns the items for which `predicate(item, query)` holds.
///
/// With an empty `query` or no predicate, every item is returned in its
/// original order.
///
/// # Example
///
/// ```
/// use sift::query::apply_filter;
///
/// let titles = ["Rust Engineer", "Go Developer", "Senior Rust Dev"];
/// let matches = apply_filter(&titles, Some(&|t: &&str, q: &str| t.contains(q)), "Rust");
/// assert_eq!(matches, vec![&"Rust Engineer", &"Senior Rust Dev"]);
/// ```
pub fn apply_filter<'a, T, F>(items: &'a [T], predicate: Option<&F>, query: &str) -> Vec<&'a T>
where
    F: Fn(&T, &str) -> bool + ?Sized,
{
    match predicate {
        Some(predicate) if !query.is_empty() => {
            let filtered: Vec<&T> = items.iter().filter(|item| predicate(*item, query)).collect();
            tracing::trace!(
                total = items.len(),
                filtered = filtered.len(),
                "filter applied"
            );
            filtered
        }
        _ => items.iter().collect(),
    }
}

/// Case-insensitive substring predicate over one projected text field.
///
/// # Example
///
/// ```
/// use sift::query::predicate;
///
/// struct Job { title: String }
/// let matches = predicate::contains(|job: &Job| job.title.clone());
/// assert!(matches(&Job { title: "Rust Engineer".into() }, "rust"));
/// ```
pub mod predicate {
    use super::{FuzzyMatcher, Predicate, SkimMatcherV2};

    /// Matches when the projected field contains the query, ignoring case.
    pub fn contains<T, F>(field: F) -> Predicate<T>
    where
        T: 'static,
        F: Fn(&T) -> String + 'static,
    {
        Box::new(move |item: &T, query: &str| {
            field(item)
                .to_lowercase()
                .contains(&query.to_lowercase())
        })
    }

    /// Matches when any projected field contains the query, ignoring case.
    ///
    /// Used for searches spanning several columns, such as a job title, its
    /// company, and its skill tags.
    pub fn any_of<T, F>(fields: F) -> Predicate<T>
    where
        T: 'static,
        F: Fn(&T) -> Vec<String> + 'static,
    {
        Box::new(move |item: &T, query: &str| {
            let needle = query.to_lowercase();
            fields(item)
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
    }

    /// Fuzzy predicate: every whitespace-separated query token must fuzzy-match
    /// the projected field.
    pub fn fuzzy<T, F>(field: F) -> Predicate<T>
    where
        T: 'static,
        F: Fn(&T) -> String + 'static,
    {
        let matcher = SkimMatcherV2::default();
        Box::new(move |item: &T, query: &str| {
            let haystack = field(item).to_lowercase();
            query
                .split_whitespace()
                .map(str::to_lowercase)
                .all(|token| matcher.fuzzy_match(&haystack, &token).is_some())
        })
    }
}
