//! # Confusion Stats
//!
//! Multi-class confusion-matrix analysis for classifier evaluation: build a
//! K×K contingency table from paired ground-truth/predicted label sequences
//! (or a pre-aggregated matrix) and derive agreement statistics — overall
//! accuracy, per-class precision/recall/F-score through one-vs-rest binary
//! views, Cohen's Kappa with three variance estimators, Pearson chi-square,
//! and geometric agreement.
//!
//! ## Quick Start
//!
//! ```rust
//! use confusion_stats::ContingencyTable;
//!
//! # fn main() -> confusion_stats::Result<()> {
//! // Ground truth and classifier output, as dense class indices
//! let expected  = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2];
//! let predicted = [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];
//!
//! let table = ContingencyTable::from_labels(&expected, &predicted)?;
//!
//! assert_eq!(table.classes(), 3);
//! assert_eq!(table.samples(), 12.0);
//! println!("accuracy: {:.4}", table.overall_agreement());
//! println!("kappa:    {:.4}", table.kappa());
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with pre-aggregated matrices
//!
//! ```rust
//! use confusion_stats::{ContingencyTable, delta_method_kappa_variance};
//! use ndarray::array;
//!
//! # fn main() -> confusion_stats::Result<()> {
//! let table = ContingencyTable::from_counts(&array![
//!     [29, 6, 5],
//!     [8, 20, 7],
//!     [1, 2, 22],
//! ])?;
//!
//! println!("kappa:          {:.4}", table.kappa());
//! println!("standard error: {:.4}", table.standard_error());
//! println!("delta variance: {:.6}", delta_method_kappa_variance(&table));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules:
//!
//! - [`core`]: Error handling and shared infrastructure
//! - [`table`]: Contingency-table construction and marginal totals
//! - [`agreement`]: Accuracy, per-class views, chi-square, geometric agreement
//! - [`kappa`]: Cohen's Kappa and its variance estimators
//!
//! ## Numeric edge cases
//!
//! The statistics deliberately distinguish malformed input from mathematically
//! undefined results. Malformed input (mismatched sequence lengths, labels
//! outside `[0, classes)`, non-square matrices) is rejected with a
//! [`ConfusionError`]. Degenerate but well-formed tables produce `NaN` through
//! ordinary IEEE semantics — a class with no predictions has `NaN` precision,
//! a table with an empty row or column has `NaN` chi-square — with one
//! documented exception: [`geometric agreement`](ContingencyTable::geometric_agreement)
//! degenerates to `0` instead of `NaN`.

#![doc(html_root_url = "https://docs.rs/confusion-stats/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Contingency table construction
pub mod table;

// Agreement statistics and per-class decomposition
pub mod agreement;

// Cohen's Kappa and variance estimators
pub mod kappa;

// Re-export core functionality for convenience
pub use crate::core::error::{ConfusionError, Result};

// Re-export the analysis types
pub use crate::agreement::{AgreementSummary, PerClassMatrix};
pub use crate::kappa::delta_method_kappa_variance;
pub use crate::table::ContingencyTable;

/// Initialize the library's logging backend.
///
/// Wires `env_logger` so that the `log` statements emitted during table
/// construction become visible, honoring `RUST_LOG`. Safe to call more than
/// once; subsequent calls are no-ops. Applications that install their own
/// `log` backend can skip this entirely.
pub fn init() {
    let _ = env_logger::try_init();
}
