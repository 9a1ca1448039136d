//! Selection widgets: type-ahead, multi-select, and dropdown.
//!
//! The interaction model is a small state machine driven by discrete events:
//!
//! ```text
//! SelectEvent → handle_event → Combobox mutations → (needs_render, SelectAction*)
//!                                   │
//!                                   └── open/close ──→ DismissRegistry subscription
//! ```
//!
//! # Modules
//!
//! - [`actions`]: notifications returned to the host (commits, input echoes)
//! - [`dismiss`]: outside-click listener registry and scoped subscriptions
//! - [`handler`]: the event handler and transition rules
//! - [`modes`]: variant, key, match mode, and selection types
//! - [`state`]: the [`Combobox`] state container and its view model

pub mod actions;
pub mod dismiss;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::SelectAction;
pub use dismiss::{DismissRegistry, ListenerId, Subscription};
pub use handler::{handle_event, SelectEvent};
pub use modes::{Key, MatchMode, Selection, Variant};
pub use state::{Combobox, ComboboxConfig};
