//! View model types representing renderable list and combobox state.
//!
//! View models are immutable snapshots computed from engine state:
//! [`QueryEngine::view`](crate::query::QueryEngine::view) produces a
//! [`PageView`] and [`Combobox::compute_view`](crate::select::Combobox::compute_view)
//! produces a [`ComboboxView`]. They hold no logic, only display-ready data such
//! as sort indicators, pager markers, and match highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use sift::ui::viewmodel::{OptionRow, Token};
//!
//! let row = OptionRow {
//!     label: "Svelte".to_string(),
//!     is_highlighted: true,
//!     is_selected: false,
//!     is_disabled: false,
//!     highlight_ranges: vec![(1, 4)],
//! };
//! let token = Token { label: "React".to_string() };
//! assert_eq!(row.highlight_ranges, vec![(1, 4)]);
//! assert_eq!(token.label, "React");
//! ```

use crate::query::{PageMarker, PagerNav, SortIndicator};
use crate::select::Variant;

/// Message shown in place of an empty page.
pub const EMPTY_MESSAGE: &str = "No items found";

/// One page of a queried list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    /// Items on the current page, borrowed from the dataset.
    pub items: Vec<&'a T>,

    /// Items passing the filter, across all pages.
    pub total_filtered: usize,

    /// `ceil(total_filtered / page_size)`; zero when nothing matches.
    pub total_pages: usize,

    /// Requested page clamped into `[1, max(total_pages, 1)]`.
    pub current_page: usize,

    /// One header per sort option, in declaration order.
    pub columns: Vec<ColumnHeader>,

    pub pager: PagerView,

    /// "Showing X of Y items".
    pub summary: String,

    /// Whether a query or sort is active and a clear button should show.
    pub show_clear: bool,

    /// Set when the page has no items.
    pub empty_message: Option<String>,
}

/// A sortable column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
    pub indicator: SortIndicator,
}

/// Pager controls for a [`PageView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub markers: Vec<PageMarker>,
    pub nav: PagerNav,
    /// Pagers are hidden for a single page.
    pub visible: bool,
}

/// Display state of one combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxView {
    pub variant: Variant,
    pub input_text: String,

    /// `None` when the placeholder must not show (multi-select with tokens).
    pub placeholder: Option<String>,

    pub is_open: bool,

    /// Open with at least one row to show.
    pub popup_visible: bool,

    /// Filtered options, in option order.
    pub rows: Vec<OptionRow>,

    /// Multi-select tokens, in the order they were added.
    pub tokens: Vec<Token>,

    /// Dropdown trigger text: the selected label or the placeholder.
    pub trigger_label: Option<String>,

    /// Type-ahead clear button, shown while the input has text.
    pub show_clear: bool,

    pub disabled: bool,
}

/// One row of a combobox popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    pub is_highlighted: bool,
    pub is_selected: bool,
    pub is_disabled: bool,

    /// Matched character ranges `(start, end)`, exclusive end, in char indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A selected value in a multi-select, rendered with a remove button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub label: String,
}
