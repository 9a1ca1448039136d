//! Event handling and state transitions for the combobox.
//!
//! [`handle_event`] is the whole state machine: it applies one [`SelectEvent`]
//! to a [`Combobox`] and returns whether the widget needs re-rendering plus the
//! [`SelectAction`]s the host should react to.
//!
//! # Event Types
//!
//! - **Input**: `InputChanged`, `FocusGained`, `Key`
//! - **Pointer**: `OptionClicked`, `RemoveToken`, `Clear`, `TriggerClicked`,
//!   `OutsidePointerDown`
//! - **Host control**: `SetOptions`, `SetSelection`
//!
//! Edge cases such as Enter with nothing highlighted, Backspace with no
//! tokens, or Arrow Up on the first row are silent no-ops and return
//! `(false, vec![])`. A disabled widget ignores every user event; host control
//! events still apply.
//!
//! # Example
//!
//! ```rust
//! use sift::domain::SelectOption;
//! use sift::select::{handle_event, Combobox, Key, SelectAction, SelectEvent, Selection};
//!
//! let mut combo = Combobox::multi_select(vec![
//!     SelectOption::new(1, "One"),
//!     SelectOption::new(2, "Two"),
//! ]);
//! handle_event(&mut combo, &SelectEvent::FocusGained);
//! handle_event(&mut combo, &SelectEvent::Key(Key::ArrowDown));
//! let (render, actions) = handle_event(&mut combo, &SelectEvent::Key(Key::Enter));
//!
//! assert!(render);
//! assert_eq!(actions, vec![SelectAction::Committed(Selection::Multi(vec![1]))]);
//! assert!(combo.is_open());
//! ```

use super::actions::SelectAction;
use super::modes::{Key, Selection, Variant};
use super::state::Combobox;
use crate::domain::SelectOption;
use std::fmt::Debug;

/// Everything that can happen to a combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent<V> {
    /// The user edited the input; carries the full new text.
    InputChanged(String),
    /// The input gained focus.
    FocusGained,
    Key(Key),
    /// A pointer-down landed outside this widget.
    OutsidePointerDown,
    /// An option row was clicked; the index is a row of the filtered list.
    OptionClicked(usize),
    /// The ✕ on a multi-select token was clicked.
    RemoveToken(V),
    /// The type-ahead clear button was clicked.
    Clear,
    /// The dropdown trigger button was clicked.
    TriggerClicked,
    /// The host replaced the option list.
    SetOptions(Vec<SelectOption<V>>),
    /// The host set the value (controlled usage). Never echoed as `Committed`.
    SetSelection(Selection<V>),
}

impl<V> SelectEvent<V> {
    const fn is_host_control(&self) -> bool {
        matches!(self, Self::SetOptions(_) | Self::SetSelection(_))
    }
}

/// Applies `event` to `combobox`.
///
/// Returns `(needs_render, actions)`.
#[allow(clippy::too_many_lines)]
pub fn handle_event<V>(
    combobox: &mut Combobox<V>,
    event: &SelectEvent<V>,
) -> (bool, Vec<SelectAction<V>>)
where
    V: Clone + PartialEq + Debug,
{
    let _span = tracing::debug_span!(
        "select_event",
        variant = ?combobox.variant(),
        event_type = ?event,
        open = combobox.is_open()
    )
    .entered();

    if combobox.is_disabled() && !event.is_host_control() {
        tracing::trace!("event ignored: widget disabled");
        return (false, vec![]);
    }

    match event {
        SelectEvent::InputChanged(text) => {
            if combobox.variant() == Variant::Dropdown {
                return (false, vec![]);
            }
            combobox.set_input_text(text);
            combobox.reset_highlight();

            let mut actions = vec![SelectAction::InputChanged(text.clone())];
            let should_open = match combobox.variant() {
                Variant::MultiSelect => true,
                Variant::TypeAhead | Variant::Dropdown => combobox.meets_min_chars(),
            };
            if should_open {
                if combobox.open() {
                    actions.push(SelectAction::Opened);
                }
            } else if combobox.close() {
                actions.push(SelectAction::Closed);
            }

            tracing::trace!(input = %text, filtered = combobox.filtered_len(), "input changed");
            (true, actions)
        }
        SelectEvent::FocusGained => {
            if combobox.variant() == Variant::Dropdown || !combobox.meets_min_chars() {
                return (false, vec![]);
            }
            opened(combobox)
        }
        SelectEvent::Key(key) => handle_key(combobox, *key),
        SelectEvent::OutsidePointerDown => closed(combobox),
        SelectEvent::OptionClicked(row) => {
            if !combobox.is_open() {
                return (false, vec![]);
            }
            commit(combobox, *row)
        }
        SelectEvent::RemoveToken(value) => combobox.remove_token(value).map_or_else(
            || (false, vec![]),
            |selection| {
                tracing::debug!(value = ?value, "token removed via button");
                (true, vec![SelectAction::Committed(selection)])
            },
        ),
        SelectEvent::Clear => {
            let (input_changed, selection_changed) = combobox.clear();
            let mut actions = vec![];
            if input_changed {
                actions.push(SelectAction::InputChanged(String::new()));
            }
            if selection_changed {
                actions.push(SelectAction::Committed(combobox.selection().clone()));
            }
            (input_changed || selection_changed, actions)
        }
        SelectEvent::TriggerClicked => {
            if combobox.variant() != Variant::Dropdown {
                return (false, vec![]);
            }
            if combobox.is_open() {
                closed(combobox)
            } else {
                opened(combobox)
            }
        }
        SelectEvent::SetOptions(options) => {
            combobox.set_options(options.clone());
            (true, vec![])
        }
        SelectEvent::SetSelection(selection) => (combobox.set_selection(selection.clone()), vec![]),
    }
}

fn handle_key<V>(combobox: &mut Combobox<V>, key: Key) -> (bool, Vec<SelectAction<V>>)
where
    V: Clone + PartialEq + Debug,
{
    match key {
        Key::ArrowDown => {
            if combobox.is_open() {
                (combobox.move_highlight_down(), vec![])
            } else {
                opened(combobox)
            }
        }
        Key::ArrowUp => {
            if !combobox.is_open() {
                return (false, vec![]);
            }
            (combobox.move_highlight_up(), vec![])
        }
        Key::Enter => match (combobox.is_open(), combobox.highlighted()) {
            (true, Some(row)) => commit(combobox, row),
            _ => (false, vec![]),
        },
        Key::Escape => closed(combobox),
        Key::Backspace => {
            if combobox.variant() != Variant::MultiSelect || !combobox.input_text().is_empty() {
                return (false, vec![]);
            }
            combobox.remove_last_token().map_or_else(
                || (false, vec![]),
                |selection| {
                    tracing::debug!("last token removed by backspace");
                    (true, vec![SelectAction::Committed(selection)])
                },
            )
        }
    }
}

fn commit<V>(combobox: &mut Combobox<V>, row: usize) -> (bool, Vec<SelectAction<V>>)
where
    V: Clone + PartialEq + Debug,
{
    let was_open = combobox.is_open();
    let Some(selection) = combobox.commit(row) else {
        return (false, vec![]);
    };
    tracing::debug!(selection = ?selection, "selection committed");

    let mut actions = vec![SelectAction::Committed(selection)];
    if was_open && !combobox.is_open() {
        actions.push(SelectAction::Closed);
    }
    (true, actions)
}

fn opened<V: Clone + PartialEq>(combobox: &mut Combobox<V>) -> (bool, Vec<SelectAction<V>>) {
    if combobox.open() {
        (true, vec![SelectAction::Opened])
    } else {
        (false, vec![])
    }
}

fn closed<V: Clone + PartialEq>(combobox: &mut Combobox<V>) -> (bool, Vec<SelectAction<V>>) {
    if combobox.close() {
        (true, vec![SelectAction::Closed])
    } else {
        (false, vec![])
    }
}
