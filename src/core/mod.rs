//! Core infrastructure module for Confusion Stats.
//!
//! This module provides the foundational pieces shared across the library:
//! the crate-wide error type and `Result` alias. Statistics code never
//! panics on user input; everything that can fail at a construction boundary
//! is reported through [`error::ConfusionError`].
//!
//! # Usage
//!
//! Most users will interact with the core module through the main library
//! interface, but the components can also be used directly:
//!
//! ```rust
//! use confusion_stats::core::error::{ConfusionError, Result};
//!
//! fn check(classes: usize) -> Result<()> {
//!     if classes == 0 {
//!         return Err(ConfusionError::invalid_input("need at least one class"));
//!     }
//!     Ok(())
//! }
//! # check(3).unwrap();
//! ```

// Public module declarations
pub mod error;

// Re-export commonly used items for convenience
pub use error::{ConfusionError, Result};

/// Version information for the core module
pub const CORE_MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");
