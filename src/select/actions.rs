//! Notifications the combobox hands back to its host after each event.
//!
//! [`handle_event`](super::handle_event) returns these alongside a "needs
//! render" flag, the same `(bool, Vec<_>)` shape the list store uses. Hosts
//! treat them as callbacks: a `Committed` action is `onChange`, an
//! `InputChanged` action is `onInputChange`.

use super::modes::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction<V> {
    /// The selection changed through user interaction. Carries the full
    /// selection so hosts can run the widget as a controlled component.
    Committed(Selection<V>),

    /// The user edited the input text.
    InputChanged(String),

    /// The popup opened; the host should start routing outside clicks.
    Opened,

    /// The popup closed.
    Closed,
}
