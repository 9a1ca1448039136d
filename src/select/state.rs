//! Combobox state and view model computation.
//!
//! [`Combobox`] is the single source of truth for one selection widget: its
//! options, the input text, whether the popup is open, which filtered row is
//! highlighted, and the committed selection. Derived state (the filtered index
//! list) is recomputed whenever the input or the options change, the same way
//! the list store recomputes its visible page.
//!
//! The popup is either closed, or open with an optional highlighted row. Closing
//! always clears the highlight, so `Closed` carries no index.
//!
//! # Example
//!
//! ```rust
//! use sift::domain::SelectOption;
//! use sift::select::{handle_event, Combobox, Key, SelectEvent, Selection};
//!
//! let mut combo = Combobox::type_ahead(vec![
//!     SelectOption::new("rust", "Rust"),
//!     SelectOption::new("ruby", "Ruby"),
//! ]);
//! handle_event(&mut combo, &SelectEvent::InputChanged("ru".into()));
//! handle_event(&mut combo, &SelectEvent::Key(Key::ArrowDown));
//! handle_event(&mut combo, &SelectEvent::Key(Key::Enter));
//!
//! assert_eq!(combo.selection(), &Selection::Single(Some("rust")));
//! assert_eq!(combo.input_text(), "Rust");
//! assert!(!combo.is_open());
//! ```

use super::dismiss::{DismissRegistry, ListenerId, Subscription};
use super::modes::{MatchMode, Selection, Variant};
use crate::domain::SelectOption;
use crate::ui::viewmodel::{ComboboxView, OptionRow, Token};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Host-configurable knobs for one combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxConfig {
    /// Minimum input length, in characters, before filtering kicks in.
    pub min_chars: usize,
    pub placeholder: String,
    pub match_mode: MatchMode,
}

impl ComboboxConfig {
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            min_chars: variant.default_min_chars(),
            placeholder: variant.default_placeholder().to_string(),
            match_mode: MatchMode::default(),
        }
    }
}

/// State of one type-ahead, multi-select, or dropdown widget.
#[derive(Debug)]
pub struct Combobox<V> {
    variant: Variant,
    options: Vec<SelectOption<V>>,
    /// Indices into `options`, in option order.
    filtered: Vec<usize>,
    input_text: String,
    is_open: bool,
    /// Row within `filtered`; `None` means nothing highlighted.
    highlighted: Option<usize>,
    selection: Selection<V>,
    config: ComboboxConfig,
    disabled: bool,
    registry: Option<DismissRegistry>,
    subscription: Option<Subscription>,
}

impl<V: Clone + PartialEq> Combobox<V> {
    #[must_use]
    pub fn new(variant: Variant, options: Vec<SelectOption<V>>, config: ComboboxConfig) -> Self {
        let mut combobox = Self {
            variant,
            options,
            filtered: Vec::new(),
            input_text: String::new(),
            is_open: false,
            highlighted: None,
            selection: Selection::empty_for(variant),
            config,
            disabled: false,
            registry: None,
            subscription: None,
        };
        combobox.recompute_filter();
        combobox
    }

    #[must_use]
    pub fn type_ahead(options: Vec<SelectOption<V>>) -> Self {
        Self::new(Variant::TypeAhead, options, ComboboxConfig::for_variant(Variant::TypeAhead))
    }

    #[must_use]
    pub fn multi_select(options: Vec<SelectOption<V>>) -> Self {
        Self::new(Variant::MultiSelect, options, ComboboxConfig::for_variant(Variant::MultiSelect))
    }

    #[must_use]
    pub fn dropdown(options: Vec<SelectOption<V>>) -> Self {
        Self::new(Variant::Dropdown, options, ComboboxConfig::for_variant(Variant::Dropdown))
    }

    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.config.min_chars = min_chars;
        self.recompute_filter();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.config.match_mode = match_mode;
        self.recompute_filter();
        self
    }

    /// Starts from a controlled value. Mismatched shapes are ignored.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection<V>) -> Self {
        self.set_selection(selection);
        self
    }

    /// Routes outside pointer-downs through `registry` while the popup is open.
    #[must_use]
    pub fn with_dismiss_registry(mut self, registry: &DismissRegistry) -> Self {
        self.registry = Some(registry.clone());
        if self.is_open {
            self.subscription = Some(registry.subscribe());
        }
        self
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection<V> {
        &self.selection
    }

    #[must_use]
    pub const fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Listener currently registered for outside clicks, if open and attached.
    #[must_use]
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.subscription.as_ref().map(Subscription::id)
    }

    /// Options passing the current filter, in option order.
    pub fn filtered_options(&self) -> impl Iterator<Item = &SelectOption<V>> {
        self.filtered.iter().filter_map(move |&index| self.options.get(index))
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn highlighted_option(&self) -> Option<&SelectOption<V>> {
        self.filtered_option(self.highlighted?)
    }

    pub(crate) fn filtered_option(&self, row: usize) -> Option<&SelectOption<V>> {
        self.filtered.get(row).and_then(|&index| self.options.get(index))
    }

    fn input_len(&self) -> usize {
        self.input_text.chars().count()
    }

    /// Whether the input is long enough to open on focus or typing.
    #[must_use]
    pub fn meets_min_chars(&self) -> bool {
        self.input_len() >= self.config.min_chars
    }

    /// Rebuilds the filtered index list from the input text.
    ///
    /// - Dropdown: every option.
    /// - Below `min_chars`: nothing for type-ahead, everything for multi-select.
    /// - Otherwise: options whose label matches under the configured mode.
    pub fn recompute_filter(&mut self) {
        let total = self.options.len();
        let all = || (0..total).collect::<Vec<_>>();
        self.filtered = match self.variant {
            Variant::Dropdown => all(),
            Variant::TypeAhead if !self.meets_min_chars() => Vec::new(),
            Variant::MultiSelect if !self.meets_min_chars() => all(),
            Variant::TypeAhead | Variant::MultiSelect => match self.config.match_mode {
                MatchMode::Substring => self
                    .options
                    .iter()
                    .enumerate()
                    .filter(|(_, option)| option.matches(&self.input_text))
                    .map(|(index, _)| index)
                    .collect(),
                MatchMode::Fuzzy => {
                    let matcher = SkimMatcherV2::default();
                    let tokens: Vec<String> =
                        self.input_text.split_whitespace().map(str::to_lowercase).collect();
                    self.options
                        .iter()
                        .enumerate()
                        .filter(|(_, option)| {
                            let label = option.label.to_lowercase();
                            tokens.iter().all(|token| matcher.fuzzy_match(&label, token).is_some())
                        })
                        .map(|(index, _)| index)
                        .collect()
                }
            },
        };

        if self.highlighted.is_some_and(|row| row >= self.filtered.len()) {
            self.highlighted = None;
        }

        tracing::trace!(
            variant = ?self.variant,
            options = self.options.len(),
            filtered = self.filtered.len(),
            "option filter recomputed"
        );
    }

    /// Opens the popup. Returns `true` if it was closed.
    pub fn open(&mut self) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        if let Some(registry) = &self.registry {
            self.subscription = Some(registry.subscribe());
        }
        true
    }

    /// Closes the popup, clears the highlight, and releases the outside-click
    /// listener. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        self.highlighted = None;
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        std::mem::replace(&mut self.is_open, false)
    }

    /// Moves the highlight one row down, clamped to the last filtered row.
    pub fn move_highlight_down(&mut self) -> bool {
        let Some(last) = self.filtered.len().checked_sub(1) else {
            return false;
        };
        let next = self.highlighted.map_or(0, |row| (row + 1).min(last));
        std::mem::replace(&mut self.highlighted, Some(next)) != Some(next)
    }

    /// Moves the highlight one row up, clamped at the first row. No-op
    /// without a highlight.
    pub fn move_highlight_up(&mut self) -> bool {
        let Some(row) = self.highlighted else {
            return false;
        };
        let previous = row.saturating_sub(1);
        self.highlighted = Some(previous);
        previous != row
    }

    pub(crate) fn reset_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Replaces the input text and refilters. A changed text clears the
    /// highlight, since rows no longer line up with the previous list.
    pub(crate) fn set_input_text(&mut self, text: &str) {
        if self.input_text == text {
            return;
        }
        text.clone_into(&mut self.input_text);
        self.highlighted = None;
        self.recompute_filter();
    }

    /// Commits the option at filtered `row`.
    ///
    /// Single-value variants replace the value and close; type-ahead also
    /// writes the label into the input. Multi-select toggles membership and
    /// stays open. Disabled options and out-of-range rows are no-ops, signalled
    /// by `None`.
    pub fn commit(&mut self, row: usize) -> Option<Selection<V>> {
        let option = self.filtered_option(row)?;
        if option.disabled {
            tracing::debug!(label = %option.label, "commit refused on disabled option");
            return None;
        }
        let value = option.value.clone();
        let label = option.label.clone();

        match &mut self.selection {
            Selection::Multi(values) => {
                if let Some(position) = values.iter().position(|v| *v == value) {
                    values.remove(position);
                    tracing::debug!(label = %label, "token removed");
                } else {
                    values.push(value);
                    tracing::debug!(label = %label, "token added");
                }
            }
            Selection::Single(current) => {
                *current = Some(value);
                tracing::debug!(label = %label, "value selected");
                if self.variant == Variant::TypeAhead {
                    self.set_input_text(&label);
                }
                self.close();
            }
        }
        Some(self.selection.clone())
    }

    /// Removes the most recently added token. Returns the new selection, or
    /// `None` when there was nothing to remove.
    pub fn remove_last_token(&mut self) -> Option<Selection<V>> {
        let Selection::Multi(values) = &mut self.selection else {
            return None;
        };
        values.pop()?;
        Some(self.selection.clone())
    }

    /// Removes `value` from a multi-selection.
    pub fn remove_token(&mut self, value: &V) -> Option<Selection<V>> {
        let Selection::Multi(values) = &mut self.selection else {
            return None;
        };
        let position = values.iter().position(|v| v == value)?;
        values.remove(position);
        Some(self.selection.clone())
    }

    /// Empties the input and the selection. Returns whether each changed.
    pub fn clear(&mut self) -> (bool, bool) {
        let input_changed = !self.input_text.is_empty();
        let selection_changed = !self.selection.is_empty();
        if input_changed {
            self.set_input_text("");
            self.highlighted = None;
        }
        if selection_changed {
            self.selection = Selection::empty_for(self.variant);
        }
        (input_changed, selection_changed)
    }

    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        self.options = options;
        self.highlighted = None;
        self.recompute_filter();
    }

    /// Applies a host-controlled value. Returns `false` when the shape does not
    /// fit the variant.
    ///
    /// A type-ahead with an empty input shows the selected option's label.
    /// Repeated multi-select values collapse to their first occurrence.
    pub fn set_selection(&mut self, selection: Selection<V>) -> bool {
        if !selection.fits(self.variant) {
            tracing::debug!(
                variant = ?self.variant,
                "controlled selection ignored: shape mismatch"
            );
            return false;
        }
        self.selection = selection.deduplicated();
        if self.variant == Variant::TypeAhead && self.input_text.is_empty() {
            let label = self
                .selection
                .values()
                .next()
                .and_then(|value| self.label_for(value))
                .map(str::to_string);
            if let Some(label) = label {
                self.set_input_text(&label);
            }
        }
        true
    }

    /// Enables or disables the widget. Disabling closes the popup.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        self.disabled = disabled;
        disabled && self.close()
    }

    fn label_for(&self, value: &V) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == *value)
            .map(|option| option.label.as_str())
    }

    /// Computes the renderable view: input, rows with match highlights, tokens,
    /// and trigger text.
    #[must_use]
    pub fn compute_view(&self) -> ComboboxView {
        let matcher = (self.config.match_mode == MatchMode::Fuzzy).then(SkimMatcherV2::default);

        let rows: Vec<OptionRow> = self
            .filtered_options()
            .enumerate()
            .map(|(row, option)| OptionRow {
                label: option.label.clone(),
                is_highlighted: self.highlighted == Some(row),
                is_selected: self.selection.contains(&option.value),
                is_disabled: option.disabled,
                highlight_ranges: self.highlight_ranges(&option.label, matcher.as_ref()),
            })
            .collect();

        let tokens: Vec<Token> = match &self.selection {
            Selection::Multi(values) => values
                .iter()
                .filter_map(|value| self.label_for(value))
                .map(|label| Token { label: label.to_string() })
                .collect(),
            Selection::Single(_) => Vec::new(),
        };

        let placeholder = match self.variant {
            Variant::MultiSelect if !tokens.is_empty() => None,
            _ => Some(self.config.placeholder.clone()),
        };

        let trigger_label = (self.variant == Variant::Dropdown).then(|| {
            self.selection
                .values()
                .next()
                .and_then(|value| self.label_for(value))
                .map_or_else(|| self.config.placeholder.clone(), str::to_string)
        });

        ComboboxView {
            variant: self.variant,
            input_text: self.input_text.clone(),
            placeholder,
            is_open: self.is_open,
            popup_visible: self.is_open && !rows.is_empty(),
            rows,
            tokens,
            trigger_label,
            show_clear: self.variant == Variant::TypeAhead && !self.input_text.is_empty(),
            disabled: self.disabled,
        }
    }

    /// Character ranges of `label` matched by the input text, coalesced into
    /// `(start, end)` runs with exclusive ends.
    fn highlight_ranges(
        &self,
        label: &str,
        matcher: Option<&SkimMatcherV2>,
    ) -> Vec<(usize, usize)> {
        if self.input_text.is_empty() || self.variant == Variant::Dropdown {
            return Vec::new();
        }
        let indices = match matcher {
            Some(m) => m
                .fuzzy_indices(label, &self.input_text)
                .map(|(_score, indices)| indices)
                .unwrap_or_default(),
            None => substring_indices(label, &self.input_text),
        };
        coalesce_ranges(&indices)
    }
}

/// Char indices of the first case-insensitive occurrence of `needle`.
fn substring_indices(haystack: &str, needle: &str) -> Vec<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let pattern: Vec<char> = needle.chars().collect();
    if pattern.is_empty() || pattern.len() > hay.len() {
        return Vec::new();
    }
    let same = |a: char, b: char| a.to_lowercase().eq(b.to_lowercase());
    (0..=hay.len() - pattern.len())
        .find(|&start| pattern.iter().enumerate().all(|(i, &c)| same(hay[start + i], c)))
        .map(|start| (start..start + pattern.len()).collect())
        .unwrap_or_default()
}

/// Folds sorted indices into contiguous `(start, end)` runs.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for &idx in indices {
        run = match run {
            None => Some((idx, idx)),
            Some((start, prev)) if idx == prev + 1 => Some((start, idx)),
            Some((start, prev)) => {
                ranges.push((start, prev + 1));
                Some((idx, idx))
            }
        };
    }
    if let Some((start, prev)) = run {
        ranges.push((start, prev + 1));
    }
    ranges
}
