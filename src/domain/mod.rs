//! Domain layer for the sift engine.
//!
//! Core types shared by the query engine and the selection state machine,
//! independent of any rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`option`]: Selectable option model
//!
//! # Examples
//!
//! ```
//! use sift::domain::{Result, SelectOption};
//!
//! fn remote_option() -> Result<SelectOption<&'static str>> {
//!     Ok(SelectOption::new("remote", "Remote"))
//! }
//! ```

pub mod error;
pub mod option;

pub use error::{Result, SiftError};
pub use option::SelectOption;
