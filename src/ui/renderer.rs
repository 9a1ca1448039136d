//! Plain-text rendering of view models.
//!
//! The renderer is a pure function of a view model and returns a `String`, so
//! the demo binary and tests share one code path.
//!
//! # Example
//!
//! ```rust
//! use sift::query::{QueryEngine, QueryState};
//! use sift::ui::render_page;
//!
//! let engine = QueryEngine::builder().build()?;
//! let items = vec!["alpha", "beta"];
//! let view = engine.view(&items, &QueryState::default());
//! let text = render_page(&view, |item| (*item).to_string());
//! assert!(text.contains("Showing 2 of 2 items"));
//! # Ok::<(), sift::SiftError>(())
//! ```

use crate::query::PageMarker;
use crate::select::Variant;
use crate::ui::helpers::{highlight_text, truncate};
use crate::ui::viewmodel::{ComboboxView, PageView, PagerView};
use std::fmt::Write as _;

const COLUMN_WIDTH: usize = 24;

/// Renders a page: sortable headers, one line per item, the summary, and the
/// pager when there is more than one page.
pub fn render_page<T, F>(view: &PageView<'_, T>, format_row: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut out = String::new();

    if !view.columns.is_empty() {
        let headers: Vec<String> = view
            .columns
            .iter()
            .map(|column| {
                let title = format!("{} {}", column.label, column.indicator);
                format!("{title:<width$}", width = COLUMN_WIDTH)
            })
            .collect();
        let _ = writeln!(out, "{}", headers.join(" ").trim_end());
    }

    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "  {message}");
    }
    for item in &view.items {
        let _ = writeln!(out, "  {}", format_row(*item));
    }

    let _ = write!(out, "{}", view.summary);
    if view.show_clear {
        out.push_str("  [clear]");
    }
    out.push('\n');

    if view.pager.visible {
        let _ = writeln!(out, "{}", render_pager(&view.pager, view.current_page));
    }
    out
}

/// Renders pager controls, e.g. `« ‹ 1 ... 9 [10] 11 ... 20 › »`.
///
/// Disabled navigation buttons are replaced with blanks.
#[must_use]
pub fn render_pager(pager: &PagerView, current_page: usize) -> String {
    let nav = |enabled: bool, glyph: &'static str| if enabled { glyph } else { " " };

    let markers: Vec<String> = pager
        .markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == current_page => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect();

    format!(
        "{} {} {} {} {}",
        nav(pager.nav.can_first, "«"),
        nav(pager.nav.can_previous, "‹"),
        markers.join(" "),
        nav(pager.nav.can_next, "›"),
        nav(pager.nav.can_last, "»"),
    )
}

/// Renders a combobox: tokens, the input line or dropdown trigger, and the
/// popup rows when visible.
///
/// Rows are prefixed with `>` when highlighted, `*` when selected, and
/// suffixed with `(disabled)`; matched text is bracketed.
#[must_use]
pub fn render_combobox(view: &ComboboxView) -> String {
    let mut out = String::new();

    if !view.tokens.is_empty() {
        let tokens: Vec<String> = view
            .tokens
            .iter()
            .map(|token| format!("[{} ✕]", token.label))
            .collect();
        let _ = writeln!(out, "{}", tokens.join(" "));
    }

    let field = match (&view.trigger_label, view.variant) {
        (Some(label), Variant::Dropdown) => format!("{} ▾", truncate(label, COLUMN_WIDTH)),
        _ if view.input_text.is_empty() => view.placeholder.clone().unwrap_or_default(),
        _ => view.input_text.clone(),
    };
    let _ = write!(out, "{field}");
    if view.show_clear {
        out.push_str("  ✕");
    }
    if view.disabled {
        out.push_str("  (disabled)");
    }
    out.push('\n');

    if view.popup_visible {
        for row in &view.rows {
            let marker = match (row.is_highlighted, row.is_selected) {
                (true, _) => '>',
                (false, true) => '*',
                (false, false) => ' ',
            };
            let _ = write!(out, "{marker} {}", highlight_text(&row.label, &row.highlight_ranges));
            if row.is_highlighted && row.is_selected {
                out.push_str(" *");
            }
            if row.is_disabled {
                out.push_str(" (disabled)");
            }
            out.push('\n');
        }
    }
    out
}
