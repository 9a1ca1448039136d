//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! QueryEngine::view  ──→ PageView     ─┐
//!                                      ├─→ render_* ─→ String
//! Combobox::compute_view → ComboboxView ┘
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: immutable, display-ready snapshots
//! - [`renderer`]: text rendering for the demo host and tests
//! - [`helpers`]: highlight and truncation utilities

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_combobox, render_page, render_pager};
pub use viewmodel::{ColumnHeader, ComboboxView, OptionRow, PageView, PagerView, Token};
