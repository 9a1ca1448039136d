//! Sift: searchable, sortable, paginated list views and combobox state machines.
//!
//! Sift is the interaction core behind a job-board style UI:
//! - Filter → sort → paginate over a host-owned dataset, as a pure reducer
//! - Compact pager windows (`1 … 9 10 11 … 20`)
//! - Type-ahead, multi-select, and dropdown widgets as explicit state machines
//! - Outside-click dismissal through scoped subscriptions
//!
//! Nothing here renders pixels or performs I/O on its own; hosts feed events
//! in and draw the view models that come out.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Demo host (main.rs)                                │  ← JSON dataset CLI
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────┐   ┌─────────────────────┐
//! │  Store (store/)           │   │  Select (select/)   │
//! │  - ListStore dispatch     │   │  - Combobox state   │
//! │  - Dataset mutation       │   │  - handle_event     │
//! └───────────────────────────┘   │  - DismissRegistry  │
//!                │                └─────────────────────┘
//! ┌───────────────────────────┐              │
//! │  Query (query/)           │              │
//! │  - filter / sort / page   │              │
//! │  - recompute reducer      │              │
//! │  - pager windowing        │              │
//! └───────────────────────────┘              │
//!                │                           │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI (ui/): view models + plain-text renderer        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): SiftError, SelectOption          │
//! │  Observability (observability/): tracing setup      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: error type and the option model
//! - [`query`]: the query engine and its building blocks
//! - [`store`]: the explicit list store routing all mutation
//! - [`select`]: combobox state machine and outside-click registry
//! - [`ui`]: view models and text rendering
//! - [`observability`]: `tracing-subscriber` initialization
//!
//! # Configuration
//!
//! Hosts configure defaults through [`Config`], either from a key/value map or
//! a TOML file:
//!
//! ```toml
//! page_size = 25
//! sibling_count = 1
//! type_ahead_min_chars = 2
//! multi_select_min_chars = 0
//! match_mode = "fuzzy"
//! trace_level = "sift=debug"
//! ```
//!
//! # Examples
//!
//! ## Query a list
//!
//! ```rust
//! use sift::query::{predicate, QueryIntent};
//! use sift::store::ListStore;
//! use sift::{initialize, Config};
//!
//! let engines = initialize(&Config::default());
//! let engine = engines
//!     .query_builder()
//!     .predicate(predicate::contains(|title: &String| title.clone()))
//!     .sort_option("title", "Title", |a: &String, b: &String| a.cmp(b))
//!     .build()?;
//!
//! let mut store = ListStore::new(engine, vec!["Rust Engineer".to_string(), "Go Developer".into()]);
//! store.dispatch(&QueryIntent::SetQuery("rust".into()))?;
//! assert_eq!(store.view().items.len(), 1);
//! # Ok::<(), sift::SiftError>(())
//! ```
//!
//! ## Drive a type-ahead
//!
//! ```rust
//! use sift::select::{handle_event, Key, SelectEvent, Selection};
//! use sift::{initialize, Config, SelectOption};
//!
//! let engines = initialize(&Config::default());
//! let mut skills = engines.type_ahead(vec![
//!     SelectOption::new("react", "React"),
//!     SelectOption::new("rust", "Rust"),
//! ]);
//! handle_event(&mut skills, &SelectEvent::InputChanged("rus".into()));
//! handle_event(&mut skills, &SelectEvent::Key(Key::ArrowDown));
//! handle_event(&mut skills, &SelectEvent::Key(Key::Enter));
//! assert_eq!(skills.selection(), &Selection::Single(Some("rust")));
//! ```

pub mod domain;
pub mod observability;
pub mod query;
pub mod select;
pub mod store;
pub mod ui;

pub use domain::{Result, SelectOption, SiftError};
pub use query::{PageSize, QueryEngine, QueryIntent, QueryState};
pub use select::{handle_event, Combobox, SelectAction, SelectEvent};
pub use store::{ListEvent, ListStore};

use query::{QueryEngineBuilder, DEFAULT_SIBLING_COUNT};
use select::{ComboboxConfig, MatchMode, Variant};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Engine defaults shared by every list and widget a host creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Items per page. Default: 10
    pub page_size: PageSize,

    /// Pages shown on each side of the current page in pagers. Default: 1
    pub sibling_count: usize,

    /// Characters typed before a type-ahead filters and opens. Default: 1
    pub type_ahead_min_chars: usize,

    /// Characters typed before a multi-select filters. Default: 0
    pub multi_select_min_chars: usize,

    /// Label matching for combobox filtering. Default: substring
    pub match_mode: MatchMode,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            sibling_count: DEFAULT_SIBLING_COUNT,
            type_ahead_min_chars: Variant::TypeAhead.default_min_chars(),
            multi_select_min_chars: Variant::MultiSelect.default_min_chars(),
            match_mode: MatchMode::default(),
            trace_level: None,
        }
    }
}

/// On-disk shape of [`Config`]; validated by [`Config::from_toml_str`].
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    page_size: usize,
    sibling_count: usize,
    type_ahead_min_chars: usize,
    multi_select_min_chars: usize,
    match_mode: MatchMode,
    trace_level: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = Config::default();
        Self {
            page_size: defaults.page_size.get(),
            sibling_count: defaults.sibling_count,
            type_ahead_min_chars: defaults.type_ahead_min_chars,
            multi_select_min_chars: defaults.multi_select_min_chars,
            match_mode: defaults.match_mode,
            trace_level: defaults.trace_level,
        }
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = SiftError;

    fn try_from(file: ConfigFile) -> Result<Self> {
        Ok(Self {
            page_size: PageSize::new(file.page_size)?,
            sibling_count: file.sibling_count,
            type_ahead_min_chars: file.type_ahead_min_chars,
            multi_select_min_chars: file.multi_select_min_chars,
            match_mode: file.match_mode,
            trace_level: file.trace_level,
        })
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// Missing keys keep their defaults. Present keys must parse.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`: positive integer
    /// - `sibling_count`, `type_ahead_min_chars`, `multi_select_min_chars`: integer
    /// - `match_mode`: `substring` or `fuzzy`
    /// - `trace_level`: any string
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] for unparseable values and
    /// [`SiftError::InvalidPageSize`] for a zero page size.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use sift::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("match_mode".to_string(), "fuzzy".to_string());
    ///
    /// let config = Config::from_map(&map)?;
    /// assert_eq!(config.page_size.get(), 25);
    /// # Ok::<(), sift::SiftError>(())
    /// ```
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let page_size = match map.get("page_size") {
            Some(raw) => PageSize::new(parse_count(raw, "page_size")?)?,
            None => defaults.page_size,
        };
        let count = |key: &str, default: usize| -> Result<usize> {
            map.get(key).map_or(Ok(default), |raw| parse_count(raw, key))
        };
        let match_mode = match map.get("match_mode").map(|s| s.trim().to_lowercase()).as_deref() {
            None => defaults.match_mode,
            Some("substring") => MatchMode::Substring,
            Some("fuzzy") => MatchMode::Fuzzy,
            Some(other) => {
                return Err(SiftError::Config(format!(
                    "match_mode must be 'substring' or 'fuzzy', got '{other}'"
                )))
            }
        };

        let config = Self {
            page_size,
            sibling_count: count("sibling_count", defaults.sibling_count)?,
            type_ahead_min_chars: count("type_ahead_min_chars", defaults.type_ahead_min_chars)?,
            multi_select_min_chars: count(
                "multi_select_min_chars",
                defaults.multi_select_min_chars,
            )?,
            match_mode,
            trace_level: map.get("trace_level").cloned(),
        };
        tracing::debug!(config = ?config, "configuration parsed from map");
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys keep their defaults;
    /// unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Toml`] for malformed TOML and
    /// [`SiftError::InvalidPageSize`] for a zero page size.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        Self::try_from(file)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "configuration loaded from file");
        Ok(config)
    }

    fn combobox_config(&self, variant: Variant) -> ComboboxConfig {
        let mut config = ComboboxConfig::for_variant(variant);
        config.match_mode = self.match_mode;
        config.min_chars = match variant {
            Variant::TypeAhead => self.type_ahead_min_chars,
            Variant::MultiSelect => self.multi_select_min_chars,
            Variant::Dropdown => 0,
        };
        config
    }
}

fn parse_count(raw: &str, key: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| {
            SiftError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))
        })
}

/// Factory for engines and widgets preconfigured from a [`Config`].
#[derive(Debug, Clone)]
pub struct Engines {
    config: Config,
}

impl Engines {
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// A query engine builder with the configured page size and sibling count.
    #[must_use]
    pub fn query_builder<T>(&self) -> QueryEngineBuilder<T> {
        QueryEngine::builder()
            .page_size(self.config.page_size)
            .sibling_count(self.config.sibling_count)
    }

    #[must_use]
    pub fn type_ahead<V: Clone + PartialEq>(&self, options: Vec<SelectOption<V>>) -> Combobox<V> {
        self.combobox(Variant::TypeAhead, options)
    }

    #[must_use]
    pub fn multi_select<V: Clone + PartialEq>(&self, options: Vec<SelectOption<V>>) -> Combobox<V> {
        self.combobox(Variant::MultiSelect, options)
    }

    #[must_use]
    pub fn dropdown<V: Clone + PartialEq>(&self, options: Vec<SelectOption<V>>) -> Combobox<V> {
        self.combobox(Variant::Dropdown, options)
    }

    #[must_use]
    pub fn combobox<V: Clone + PartialEq>(
        &self,
        variant: Variant,
        options: Vec<SelectOption<V>>,
    ) -> Combobox<V> {
        Combobox::new(variant, options, self.config.combobox_config(variant))
    }
}

/// Prepares engine defaults from configuration.
///
/// Does not install a tracing subscriber; hosts call
/// [`observability::init_tracing`] first if they want log output.
///
/// # Example
///
/// ```rust
/// use sift::{initialize, Config};
///
/// let engines = initialize(&Config::default());
/// assert_eq!(engines.config().page_size.get(), 10);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> Engines {
    tracing::debug!(
        page_size = config.page_size.get(),
        sibling_count = config.sibling_count,
        match_mode = ?config.match_mode,
        "initializing sift engines"
    );
    Engines {
        config: config.clone(),
    }
}
