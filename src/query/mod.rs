//! Filter, sort, and paginate a host-owned dataset.
//!
//! The pipeline is always filter → sort → slice, recomputed from the full
//! dataset on each call. See [`QueryEngine`] for the entry point.

pub mod engine;
pub mod filter;
pub mod pager;
pub mod paginate;
pub mod sort;

pub use engine::{QueryEngine, QueryEngineBuilder, QueryIntent, QueryState};
pub use filter::{apply_filter, predicate, Predicate};
pub use pager::{page_window, PageMarker, PagerNav, DEFAULT_SIBLING_COUNT};
pub use paginate::{clamp_page, paginate, total_pages, PageSize, DEFAULT_PAGE_SIZE};
pub use sort::{
    apply_sort, cycle_sort_direction, Comparator, SortDirection, SortIndicator, SortOption,
    SortState,
};
