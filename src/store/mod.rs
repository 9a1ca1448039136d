//! Explicit list store: one owner for a dataset and its query state.
//!
//! Call sites never splice the dataset directly. Every change, whether a user
//! intent or a dataset mutation, goes through [`ListStore`], which keeps the
//! query state consistent with the data (the current page is clamped whenever
//! the filtered set shrinks) and reports what changed as [`ListEvent`]s.
//!
//! # Example
//!
//! ```rust
//! use sift::query::{predicate, PageSize, QueryEngine, QueryIntent};
//! use sift::store::{ListEvent, ListStore};
//!
//! let engine = QueryEngine::builder()
//!     .predicate(predicate::contains(|n: &String| n.clone()))
//!     .page_size(PageSize::new(2)?)
//!     .build()?;
//! let mut store = ListStore::new(engine, vec!["ada".to_string(), "grace".into(), "linus".into()]);
//!
//! let (render, events) = store.dispatch(&QueryIntent::NextPage)?;
//! assert!(render);
//! assert_eq!(events, vec![ListEvent::PageChanged(2)]);
//!
//! store.retain(|name| name != "linus");
//! assert_eq!(store.state().page, 1);
//! # Ok::<(), sift::SiftError>(())
//! ```

use crate::domain::Result;
use crate::query::{QueryEngine, QueryIntent, QueryState, SortDirection};
use crate::ui::viewmodel::PageView;

/// What changed after a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    QueryChanged(String),
    SortChanged {
        key: Option<String>,
        direction: SortDirection,
    },
    PageChanged(usize),
    /// Query, sort, and page were all reset.
    Cleared,
    /// Items were inserted, removed, or edited. Carries the new item count.
    DatasetChanged(usize),
}

/// Owns a dataset, the engine that queries it, and the user's query state.
#[derive(Debug)]
pub struct ListStore<T> {
    engine: QueryEngine<T>,
    items: Vec<T>,
    state: QueryState,
}

impl<T> ListStore<T> {
    #[must_use]
    pub fn new(engine: QueryEngine<T>, items: Vec<T>) -> Self {
        Self {
            engine,
            items,
            state: QueryState::default(),
        }
    }

    /// Starts sorted ascending on `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::UnknownSortKey`](crate::SiftError::UnknownSortKey)
    /// if no sort option declares `key`.
    pub fn with_default_sort(mut self, key: &str) -> Result<Self> {
        self.state = self.engine.initial_state(Some(key))?;
        Ok(self)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub const fn engine(&self) -> &QueryEngine<T> {
        &self.engine
    }

    /// Applies a user intent. Returns `(needs_render, events)`.
    ///
    /// # Errors
    ///
    /// Propagates [`QueryEngine::recompute`] errors; the state is left
    /// untouched when one occurs.
    pub fn dispatch(&mut self, intent: &QueryIntent) -> Result<(bool, Vec<ListEvent>)> {
        let _span = tracing::debug_span!("list_dispatch", intent = ?intent).entered();

        let next = self.engine.recompute(&self.items, &self.state, intent)?;
        let events = if matches!(intent, QueryIntent::ClearAll) && self.state.has_refinements() {
            vec![ListEvent::Cleared]
        } else {
            diff(&self.state, &next)
        };
        self.state = next;

        if events.is_empty() {
            tracing::trace!("query state unchanged, skipping render");
        }
        Ok((!events.is_empty(), events))
    }

    /// Appends an item.
    pub fn insert(&mut self, item: T) -> Vec<ListEvent> {
        self.items.push(item);
        self.dataset_changed()
    }

    /// Keeps only items for which `keep` holds.
    pub fn retain<F>(&mut self, keep: F) -> Vec<ListEvent>
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(keep);
        if self.items.len() == before {
            return vec![];
        }
        self.dataset_changed()
    }

    /// Applies `edit` to each item matching `select`. Returns the number edited
    /// alongside the events.
    pub fn update_where<P, F>(&mut self, mut select: P, mut edit: F) -> (usize, Vec<ListEvent>)
    where
        P: FnMut(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut edited = 0;
        for item in self.items.iter_mut().filter(|item| select(&**item)) {
            edit(item);
            edited += 1;
        }
        if edited == 0 {
            return (0, vec![]);
        }
        (edited, self.dataset_changed())
    }

    /// Replaces the whole dataset.
    pub fn replace_all(&mut self, items: Vec<T>) -> Vec<ListEvent> {
        self.items = items;
        self.dataset_changed()
    }

    fn dataset_changed(&mut self) -> Vec<ListEvent> {
        let previous_page = self.state.page;
        self.engine.clamp_state(&self.items, &mut self.state);

        tracing::debug!(
            items = self.items.len(),
            page = self.state.page,
            "dataset changed"
        );

        let mut events = vec![ListEvent::DatasetChanged(self.items.len())];
        if self.state.page != previous_page {
            events.push(ListEvent::PageChanged(self.state.page));
        }
        events
    }

    /// The current page, ready to render.
    #[must_use]
    pub fn view(&self) -> PageView<'_, T> {
        self.engine.view(&self.items, &self.state)
    }
}

fn diff(before: &QueryState, after: &QueryState) -> Vec<ListEvent> {
    let mut events = vec![];
    if before.query != after.query {
        events.push(ListEvent::QueryChanged(after.query.clone()));
    }
    if before.sort != after.sort {
        events.push(ListEvent::SortChanged {
            key: after.sort.key.clone(),
            direction: after.sort.direction,
        });
    }
    if before.page != after.page {
        events.push(ListEvent::PageChanged(after.page));
    }
    events
}
