//! Query engine: filter → sort → paginate as a pure reducer.
//!
//! [`QueryEngine`] holds the host's configuration (predicate, sort options,
//! page size). [`QueryState`] holds what the user has asked for (query text,
//! sort rule, page). User intents are folded into a new state by
//! [`QueryEngine::recompute`], and [`QueryEngine::view`] derives the visible
//! page without ever mutating the dataset.
//!
//! # Example
//!
//! ```
//! use sift::query::{predicate, PageSize, QueryEngine, QueryIntent, QueryState};
//!
//! let names = vec!["Mallory", "Alice", "Trent", "Bob", "Carol", "Dave"];
//! let engine = QueryEngine::builder()
//!     .predicate(predicate::contains(|n: &&str| n.to_string()))
//!     .sort_option("name", "Name", |a: &&str, b: &&str| a.cmp(b))
//!     .page_size(PageSize::new(2)?)
//!     .build()?;
//!
//! let state = QueryState::default();
//! let state = engine.recompute(&names, &state, &QueryIntent::ToggleSort("name".into()))?;
//! let view = engine.view(&names, &state);
//! assert_eq!(view.items, vec![&"Alice", &"Bob"]);
//! assert_eq!(view.total_pages, 3);
//! # Ok::<(), sift::SiftError>(())
//! ```

use super::filter::{apply_filter, Predicate};
use super::pager::{page_window, PagerNav, DEFAULT_SIBLING_COUNT};
use super::paginate::{clamp_page, paginate, total_pages, PageSize};
use super::sort::{apply_sort, cycle_sort_direction, SortOption, SortState};
use crate::domain::{Result, SiftError};
use crate::ui::viewmodel::{ColumnHeader, PageView, PagerView, EMPTY_MESSAGE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// What the user has asked for: query text, sort rule, and 1-indexed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub query: String,
    pub sort: SortState,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: SortState::default(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Clears the query text and sort rule and returns to page 1.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Whether a "clear filters" affordance has anything to clear.
    #[must_use]
    pub fn has_refinements(&self) -> bool {
        !self.query.is_empty() || self.sort.key.is_some()
    }
}

/// User intents consumed by [`QueryEngine::recompute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryIntent {
    /// Replaces the filter text. Resets to page 1.
    SetQuery(String),
    /// Column header click: advances the sort cycle for the key. Resets to page 1.
    ToggleSort(String),
    /// Jumps to a page, clamped into range.
    GoToPage(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    /// Explicit "clear filters": query, sort, and page all reset.
    ClearAll,
}

/// Filter/sort/paginate configuration for one list.
pub struct QueryEngine<T> {
    predicate: Option<Predicate<T>>,
    sort_options: Vec<SortOption<T>>,
    page_size: PageSize,
    sibling_count: usize,
}

impl<T> fmt::Debug for QueryEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEngine")
            .field("has_predicate", &self.predicate.is_some())
            .field("sort_options", &self.sort_options)
            .field("page_size", &self.page_size)
            .field("sibling_count", &self.sibling_count)
            .finish()
    }
}

impl<T> QueryEngine<T> {
    #[must_use]
    pub fn builder() -> QueryEngineBuilder<T> {
        QueryEngineBuilder::default()
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub const fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    #[must_use]
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    #[must_use]
    pub fn sort_options(&self) -> &[SortOption<T>] {
        &self.sort_options
    }

    fn sort_option(&self, key: &str) -> Option<&SortOption<T>> {
        self.sort_options.iter().find(|option| option.key == key)
    }

    /// Initial state, optionally pre-sorted ascending on `default_sort`.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::UnknownSortKey`] if `default_sort` names no sort option.
    pub fn initial_state(&self, default_sort: Option<&str>) -> Result<QueryState> {
        let mut state = QueryState::default();
        if let Some(key) = default_sort {
            if self.sort_option(key).is_none() {
                return Err(SiftError::UnknownSortKey(key.to_string()));
            }
            state.sort = SortState::ascending(key);
        }
        Ok(state)
    }

    /// Filters then sorts `items`; the result is every visible item across all pages.
    pub fn filtered_sorted<'a>(&self, items: &'a [T], state: &QueryState) -> Vec<&'a T> {
        let filtered = apply_filter(items, self.predicate.as_deref(), &state.query);
        match state.sort.key.as_deref().and_then(|key| self.sort_option(key)) {
            Some(option) => apply_sort(filtered, &*option.compare, state.sort.direction),
            None => filtered,
        }
    }

    fn filtered_count(&self, items: &[T], query: &str) -> usize {
        match self.predicate.as_deref() {
            Some(predicate) if !query.is_empty() => {
                items.iter().filter(|item| predicate(*item, query)).count()
            }
            _ => items.len(),
        }
    }

    /// Folds one intent into a new state. Pure: neither `state` nor `items`
    /// is modified.
    ///
    /// Filter, sort, and clear intents reset to page 1; page intents are
    /// clamped into `[1, max(total_pages, 1)]` for the current filter.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::UnknownSortKey`] when `ToggleSort` names a key with
    /// no sort option.
    pub fn recompute(
        &self,
        items: &[T],
        state: &QueryState,
        intent: &QueryIntent,
    ) -> Result<QueryState> {
        let _span =
            tracing::debug_span!("query_recompute", intent = ?intent, page = state.page).entered();

        let mut next = state.clone();
        match intent {
            QueryIntent::SetQuery(query) => {
                next.query.clone_from(query);
                next.page = 1;
            }
            QueryIntent::ToggleSort(key) => {
                if self.sort_option(key).is_none() {
                    tracing::debug!(key = %key, "sort requested for unknown key");
                    return Err(SiftError::UnknownSortKey(key.clone()));
                }
                next.sort = cycle_sort_direction(&state.sort, key);
                next.page = 1;
            }
            QueryIntent::ClearAll => next.reset_all(),
            QueryIntent::GoToPage(page) => {
                next.page = clamp_page(*page, self.total_pages_for(items, &state.query));
            }
            QueryIntent::FirstPage => next.page = 1,
            QueryIntent::PreviousPage => {
                let total = self.total_pages_for(items, &state.query);
                next.page = clamp_page(state.page.saturating_sub(1), total);
            }
            QueryIntent::NextPage => {
                let total = self.total_pages_for(items, &state.query);
                next.page = clamp_page(state.page.saturating_add(1), total);
            }
            QueryIntent::LastPage => {
                next.page = self.total_pages_for(items, &state.query).max(1);
            }
        }

        tracing::debug!(
            query = %next.query,
            sort_key = ?next.sort.key,
            direction = ?next.sort.direction,
            page = next.page,
            "query state recomputed"
        );
        Ok(next)
    }

    fn total_pages_for(&self, items: &[T], query: &str) -> usize {
        total_pages(self.filtered_count(items, query), self.page_size)
    }

    /// Clamps `state.page` after the dataset changed underneath it.
    pub fn clamp_state(&self, items: &[T], state: &mut QueryState) {
        state.page = clamp_page(state.page, self.total_pages_for(items, &state.query));
    }

    /// Derives the renderable page for `state`.
    ///
    /// A page past the end is clamped for display; the dataset is borrowed,
    /// never copied or reordered.
    pub fn view<'a>(&self, items: &'a [T], state: &QueryState) -> PageView<'a, T> {
        let _span = tracing::debug_span!("query_view", dataset = items.len()).entered();

        let visible = self.filtered_sorted(items, state);
        let total_filtered = visible.len();
        let pages = total_pages(total_filtered, self.page_size);
        let current_page = clamp_page(state.page, pages);
        let page_items = paginate(&visible, current_page, self.page_size).to_vec();

        let columns = self
            .sort_options
            .iter()
            .map(|option| ColumnHeader {
                key: option.key.clone(),
                label: option.label.clone(),
                indicator: state.sort.indicator_for(&option.key),
            })
            .collect();

        let pager = PagerView {
            markers: page_window(current_page, pages, self.sibling_count),
            nav: PagerNav::new(current_page, pages),
            visible: pages > 1,
        };

        tracing::debug!(
            total_filtered,
            total_pages = pages,
            current_page,
            shown = page_items.len(),
            "page view computed"
        );

        PageView {
            summary: format!("Showing {} of {} items", page_items.len(), total_filtered),
            empty_message: page_items.is_empty().then(|| EMPTY_MESSAGE.to_string()),
            items: page_items,
            total_filtered,
            total_pages: pages,
            current_page,
            columns,
            pager,
            show_clear: state.has_refinements(),
        }
    }
}

/// Builder validating a [`QueryEngine`] configuration at setup time.
pub struct QueryEngineBuilder<T> {
    predicate: Option<Predicate<T>>,
    sort_options: Vec<SortOption<T>>,
    page_size: PageSize,
    sibling_count: usize,
}

impl<T> Default for QueryEngineBuilder<T> {
    fn default() -> Self {
        Self {
            predicate: None,
            sort_options: Vec::new(),
            page_size: PageSize::default(),
            sibling_count: DEFAULT_SIBLING_COUNT,
        }
    }
}

impl<T> QueryEngineBuilder<T> {
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate<T>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[must_use]
    pub fn sort_option<F>(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        compare: F,
    ) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.sort_options.push(SortOption::new(key, label, compare));
        self
    }

    #[must_use]
    pub fn sort_options(mut self, options: impl IntoIterator<Item = SortOption<T>>) -> Self {
        self.sort_options.extend(options);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    /// # Errors
    ///
    /// Returns [`SiftError::DuplicateSortKey`] when two sort options share a key.
    pub fn build(self) -> Result<QueryEngine<T>> {
        let mut seen = HashSet::new();
        for option in &self.sort_options {
            if !seen.insert(option.key.as_str()) {
                return Err(SiftError::DuplicateSortKey(option.key.clone()));
            }
        }
        tracing::debug!(
            sort_options = self.sort_options.len(),
            page_size = self.page_size.get(),
            sibling_count = self.sibling_count,
            "query engine configured"
        );
        Ok(QueryEngine {
            predicate: self.predicate,
            sort_options: self.sort_options,
            page_size: self.page_size,
            sibling_count: self.sibling_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryEngine, QueryIntent, QueryState};
    use crate::domain::SiftError;
    use crate::query::filter::predicate;
    use crate::query::{PageMarker, PageSize, SortDirection, SortIndicator};

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        name: &'static str,
        age: u32,
    }

    fn users() -> Vec<User> {
        [
            ("Mallory", 41),
            ("alice", 30),
            ("Trent", 25),
            ("Bob", 52),
            ("Carol", 30),
            ("Dave", 19),
            ("Eve", 33),
            ("Frank", 47),
            ("Grace", 28),
            ("Heidi", 36),
            ("Ivan", 30),
            ("Judy", 22),
        ]
        .into_iter()
        .map(|(name, age)| User { name, age })
        .collect()
    }

    fn engine(page_size: usize) -> QueryEngine<User> {
        QueryEngine::builder()
            .predicate(predicate::contains(|u: &User| u.name.to_string()))
            .sort_option("name", "Name", |a: &User, b: &User| {
                a.name.to_lowercase().cmp(&b.name.to_lowercase())
            })
            .sort_option("age", "Age", |a: &User, b: &User| a.age.cmp(&b.age))
            .page_size(PageSize::new(page_size).unwrap())
            .build()
            .unwrap()
    }

    fn names<'a>(items: &[&'a User]) -> Vec<&'a str> {
        items.iter().map(|u| u.name).collect()
    }

    #[test]
    fn twelve_users_sorted_by_name_page_one() {
        let data = users();
        let engine = engine(5);
        let state = engine
            .recompute(&data, &QueryState::default(), &QueryIntent::ToggleSort("name".into()))
            .unwrap();
        let view = engine.view(&data, &state);

        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page, 1);
        assert_eq!(names(&view.items), vec!["alice", "Bob", "Carol", "Dave", "Eve"]);
    }

    #[test]
    fn third_toggle_restores_unsorted_order() {
        let data = users();
        let engine = engine(100);
        let unsorted = engine.view(&data, &QueryState::default()).items;

        let mut state = QueryState::default();
        for _ in 0..3 {
            state = engine
                .recompute(&data, &state, &QueryIntent::ToggleSort("age".into()))
                .unwrap();
        }
        assert_eq!(state.sort.direction, SortDirection::Unsorted);
        assert_eq!(engine.view(&data, &state).items, unsorted);
    }

    #[test]
    fn unsorted_column_keeps_key_and_clear_affordance() {
        let data = users();
        let engine = engine(100);

        let mut state = QueryState::default();
        for _ in 0..3 {
            state = engine
                .recompute(&data, &state, &QueryIntent::ToggleSort("age".into()))
                .unwrap();
        }
        assert_eq!(state.sort.key.as_deref(), Some("age"));
        assert!(!state.sort.is_active());

        let view = engine.view(&data, &state);
        assert!(view.show_clear);
        assert!(view.columns.iter().all(|c| c.indicator == SortIndicator::None));

        let again = engine
            .recompute(&data, &state, &QueryIntent::ToggleSort("age".into()))
            .unwrap();
        assert_eq!(again.sort.direction, SortDirection::Ascending);
        let cleared = engine
            .recompute(&data, &state, &QueryIntent::ClearAll)
            .unwrap();
        assert!(!cleared.has_refinements());
    }

    #[test]
    fn query_and_sort_changes_reset_page() {
        let data = users();
        let engine = engine(5);
        let on_page_three = engine
            .recompute(&data, &QueryState::default(), &QueryIntent::GoToPage(3))
            .unwrap();
        assert_eq!(on_page_three.page, 3);

        let queried = engine
            .recompute(&data, &on_page_three, &QueryIntent::SetQuery("a".into()))
            .unwrap();
        assert_eq!(queried.page, 1);

        let sorted = engine
            .recompute(&data, &on_page_three, &QueryIntent::ToggleSort("age".into()))
            .unwrap();
        assert_eq!(sorted.page, 1);
    }

    #[test]
    fn page_intents_clamp_to_filtered_range() {
        let data = users();
        let engine = engine(5);
        let state = QueryState::default();

        let far = engine.recompute(&data, &state, &QueryIntent::GoToPage(99)).unwrap();
        assert_eq!(far.page, 3);
        let zero = engine.recompute(&data, &state, &QueryIntent::GoToPage(0)).unwrap();
        assert_eq!(zero.page, 1);

        let last = engine.recompute(&data, &state, &QueryIntent::LastPage).unwrap();
        assert_eq!(last.page, 3);
        let next = engine.recompute(&data, &last, &QueryIntent::NextPage).unwrap();
        assert_eq!(next.page, 3);
        let previous = engine.recompute(&data, &last, &QueryIntent::PreviousPage).unwrap();
        assert_eq!(previous.page, 2);
        let first = engine.recompute(&data, &last, &QueryIntent::FirstPage).unwrap();
        assert_eq!(first.page, 1);
    }

    #[test]
    fn clear_all_resets_everything() {
        let data = users();
        let engine = engine(5);
        let state = QueryState {
            query: "a".into(),
            sort: crate::query::SortState::descending("age"),
            page: 2,
        };
        let cleared = engine.recompute(&data, &state, &QueryIntent::ClearAll).unwrap();
        assert_eq!(cleared, QueryState::default());
        assert!(!cleared.has_refinements());
    }

    #[test]
    fn unknown_sort_key_fails_fast() {
        let data = users();
        let engine = engine(5);
        let err = engine
            .recompute(&data, &QueryState::default(), &QueryIntent::ToggleSort("salary".into()))
            .unwrap_err();
        assert!(matches!(err, SiftError::UnknownSortKey(key) if key == "salary"));
        assert!(engine.initial_state(Some("salary")).is_err());
        assert_eq!(engine.initial_state(Some("age")).unwrap().sort.key.as_deref(), Some("age"));
    }

    #[test]
    fn duplicate_sort_keys_rejected_at_build() {
        let result = QueryEngine::<User>::builder()
            .sort_option("age", "Age", |a: &User, b: &User| a.age.cmp(&b.age))
            .sort_option("age", "Age again", |a: &User, b: &User| b.age.cmp(&a.age))
            .build();
        assert!(matches!(result, Err(SiftError::DuplicateSortKey(_))));
    }

    #[test]
    fn view_clamps_stale_page_and_reports_metadata() {
        let data = users();
        let engine = engine(5);
        let state = QueryState {
            query: "ve".into(),
            page: 3,
            ..QueryState::default()
        };
        let view = engine.view(&data, &state);
        assert_eq!(names(&view.items), vec!["Dave", "Eve"]);
        assert_eq!(view.total_filtered, 2);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(!view.pager.visible);
        assert_eq!(view.summary, "Showing 2 of 2 items");
        assert!(view.show_clear);
    }

    #[test]
    fn empty_dataset_degrades_to_empty_view() {
        let data: Vec<User> = Vec::new();
        let engine = engine(5);
        let view = engine.view(&data, &QueryState::default());
        assert!(view.items.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.pager.markers.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No items found"));
        let state = engine
            .recompute(&data, &QueryState::default(), &QueryIntent::NextPage)
            .unwrap();
        assert_eq!(state.page, 1);
    }

    #[test]
    fn column_indicators_follow_sort_state() {
        let data = users();
        let engine = engine(5);
        let state = engine
            .recompute(&data, &QueryState::default(), &QueryIntent::ToggleSort("age".into()))
            .unwrap();
        let state = engine
            .recompute(&data, &state, &QueryIntent::ToggleSort("age".into()))
            .unwrap();
        let view = engine.view(&data, &state);
        let indicators: Vec<_> = view
            .columns
            .iter()
            .map(|c| (c.key.as_str(), c.indicator))
            .collect();
        assert_eq!(
            indicators,
            vec![("name", SortIndicator::None), ("age", SortIndicator::Descending)]
        );
        assert_eq!(view.items[0].name, "Bob");
        assert_eq!(
            view.pager.markers,
            vec![PageMarker::Page(1), PageMarker::Page(2), PageMarker::Page(3)]
        );
    }
}
