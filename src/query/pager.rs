//! Page-number windowing for pager controls.
//!
//! Long page ranges are compacted into `head … middle … tail` form around the
//! current page so a pager never renders more than a handful of buttons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of pages shown on each side of the current page.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// One slot in a pager: a page button or an ellipsis gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Which of the first/previous/next/last pager buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagerNav {
    pub can_first: bool,
    pub can_previous: bool,
    pub can_next: bool,
    pub can_last: bool,
}

impl PagerNav {
    #[must_use]
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let not_first = current_page > 1;
        let not_last = current_page < total_pages;
        Self {
            can_first: not_first,
            can_previous: not_first,
            can_next: not_last,
            can_last: not_last,
        }
    }
}

/// Computes the pager markers for `current_page` out of `total_pages`.
///
/// 1. `left = max(current - siblings, 1)`, `right = min(current + siblings, total)`.
/// 2. Left dots when `left > 2`; right dots when `right < total - 1`.
/// 3. No dots: every page. Right dots only: the first `3 + 2 * siblings`
///    pages, then an ellipsis and the last page. Left dots only: page 1, an
///    ellipsis, then the trailing `3 + 2 * siblings` pages. Both: page 1,
///    ellipsis, `left..=right`, ellipsis, last page.
///
/// The trailing run of the left-dots case never starts below page 2, and the
/// ellipsis is dropped when it would hide nothing, so pages are never
/// duplicated and two ellipses are never adjacent.
///
/// # Example
///
/// ```
/// use sift::query::{page_window, PageMarker::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_window(10, 20, 1),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
#[must_use]
pub fn page_window(
    current_page: usize,
    total_pages: usize,
    sibling_count: usize,
) -> Vec<PageMarker> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total_pages);
    let left_sibling = current.saturating_sub(sibling_count).max(1);
    let right_sibling = current.saturating_add(sibling_count).min(total_pages);

    let show_left_dots = left_sibling > 2;
    let show_right_dots = right_sibling + 1 < total_pages;
    let edge_range = sibling_count.saturating_mul(2).saturating_add(3);

    let mut markers = Vec::new();
    match (show_left_dots, show_right_dots) {
        (false, false) => {
            markers.extend((1..=total_pages).map(PageMarker::Page));
        }
        (false, true) => {
            markers.extend((1..=edge_range.min(total_pages)).map(PageMarker::Page));
            if total_pages > edge_range {
                markers.push(PageMarker::Ellipsis);
                markers.push(PageMarker::Page(total_pages));
            }
        }
        (true, false) => {
            let start = (total_pages + 1).saturating_sub(edge_range).max(2);
            markers.push(PageMarker::Page(1));
            if start > 2 {
                markers.push(PageMarker::Ellipsis);
            }
            markers.extend((start..=total_pages).map(PageMarker::Page));
        }
        (true, true) => {
            markers.push(PageMarker::Page(1));
            markers.push(PageMarker::Ellipsis);
            markers.extend((left_sibling..=right_sibling).map(PageMarker::Page));
            markers.push(PageMarker::Ellipsis);
            markers.push(PageMarker::Page(total_pages));
        }
    }

    tracing::trace!(
        current_page = current,
        total_pages,
        sibling_count,
        markers = markers.len(),
        "page window computed"
    );
    markers
}
