//! Structured logging setup.
//!
//! Every reducer and event handler in the crate opens a `tracing` span and
//! emits `debug`/`trace` events. This module installs the subscriber that
//! prints them.
//!
//! # Configuration
//!
//! The filter is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use sift::observability::init_tracing;
//! use sift::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("engine initialized");
//! ```

mod init;

pub use init::{filter_directive, init_tracing};
