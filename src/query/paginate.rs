//! Page slicing and page-count arithmetic.

use crate::domain::{Result, SiftError};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of items per page; never zero.
///
/// A zero page size is a host configuration mistake, so it is rejected when
/// the value is constructed rather than surfacing later as a division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// # Errors
    ///
    /// Returns [`SiftError::InvalidPageSize`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(SiftError::InvalidPageSize(size))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = SiftError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// `ceil(count / page_size)`; zero for an empty set.
#[must_use]
pub fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.get())
}

/// Clamps a 1-indexed page into `[1, max(total_pages, 1)]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Returns the 1-indexed `page` of `items`: the slice
/// `[(page - 1) * size, page * size)`, cut short at the end of the input.
///
/// Page 0 and pages past the end yield an empty slice; this never panics.
///
/// # Example
///
/// ```
/// use sift::query::{paginate, PageSize};
///
/// let items: Vec<u32> = (1..=12).collect();
/// let size = PageSize::new(5)?;
/// assert_eq!(paginate(&items, 3, size), &[11, 12]);
/// assert!(paginate(&items, 4, size).is_empty());
/// # Ok::<(), sift::SiftError>(())
/// ```
#[must_use]
pub fn paginate<U>(items: &[U], page: usize, page_size: PageSize) -> &[U] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let size = page_size.get();
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
