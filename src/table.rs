//! Contingency-table construction for multi-class classifier evaluation.
//!
//! A [`ContingencyTable`] is the K×K cross-tabulation of ground-truth class
//! against predicted class: `counts[[i, j]]` is the number of samples whose
//! true class is `i` and predicted class is `j` (row = truth, column =
//! prediction). The table is built once — from raw label pairs, from a
//! pre-aggregated count matrix, or from a proportion matrix plus an explicit
//! sample count — and is immutable afterwards. Marginal totals and
//! proportions are computed eagerly at construction; every downstream
//! statistic in [`crate::agreement`] and [`crate::kappa`] is a pure function
//! of this snapshot.
//!
//! # Examples
//!
//! ```rust
//! use confusion_stats::ContingencyTable;
//!
//! # fn main() -> confusion_stats::Result<()> {
//! let table = ContingencyTable::from_labels(&[0, 0, 1, 1], &[0, 1, 1, 1])?;
//! assert_eq!(table.classes(), 2);
//! assert_eq!(table.samples(), 4.0);
//! assert_eq!(table.row_totals().to_vec(), vec![2.0, 2.0]);
//! assert_eq!(table.column_totals().to_vec(), vec![1.0, 3.0]);
//! # Ok(())
//! # }
//! ```

use crate::core::error::{ConfusionError, Result};
use ndarray::{Array1, Array2, Axis};
use num_traits::ToPrimitive;
use serde::Serialize;

/// Tolerance used when sanity-checking that a supplied proportion matrix
/// sums to one.
const PROPORTION_SUM_TOLERANCE: f64 = 1e-6;

/// K×K contingency matrix of true class (rows) against predicted class
/// (columns), with eagerly derived marginal totals and proportions.
///
/// Immutable once constructed: accessors hand out shared references to the
/// internal arrays, so cached derived state can never be invalidated by a
/// caller. The cell grid holds integer-valued counts when built from labels
/// or a count matrix, and `proportion * samples` values when built from a
/// proportion matrix; either way the cells sum to [`samples`](Self::samples)
/// (within floating tolerance in the proportion case).
#[derive(Debug, Clone, Serialize)]
pub struct ContingencyTable {
    classes: usize,
    samples: f64,
    counts: Array2<f64>,
    proportions: Array2<f64>,
    row_totals: Array1<f64>,
    column_totals: Array1<f64>,
    row_proportions: Array1<f64>,
    column_proportions: Array1<f64>,
}

impl ContingencyTable {
    /// Build a table from paired label sequences, inferring the number of
    /// classes as `max(expected, predicted) + 1`.
    ///
    /// Labels are dense zero-based class indices. Mapping arbitrary string or
    /// object labels onto such indices is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfusionError::DimensionMismatch`] when the sequences
    /// differ in length, [`ConfusionError::LabelOutOfRange`] for negative
    /// labels, and [`ConfusionError::InvalidInput`] for empty sequences.
    pub fn from_labels<T>(expected: &[T], predicted: &[T]) -> Result<Self>
    where
        T: ToPrimitive + Copy,
    {
        let mut highest: i64 = -1;
        for value in expected.iter().chain(predicted.iter()) {
            if let Some(v) = value.to_i64() {
                highest = highest.max(v);
            }
        }
        // Negative or non-integer labels fall through to the range checks
        // in with_classes.
        let classes = (highest + 1).max(0) as usize;
        Self::with_classes(classes, expected, predicted)
    }

    /// Build a table from paired label sequences with an explicit class count.
    ///
    /// The tally is a single O(N) pass incrementing `counts[[expected[n],
    /// predicted[n]]]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfusionError::LabelOutOfRange`] when any label falls
    /// outside `[0, classes)`, [`ConfusionError::DimensionMismatch`] when the
    /// sequences differ in length, and [`ConfusionError::InvalidInput`] when
    /// `classes` is zero or the sequences are empty.
    pub fn with_classes<T>(classes: usize, expected: &[T], predicted: &[T]) -> Result<Self>
    where
        T: ToPrimitive + Copy,
    {
        if expected.len() != predicted.len() {
            return Err(ConfusionError::dimension_mismatch(
                format!("expected labels: {}", expected.len()),
                format!("predicted labels: {}", predicted.len()),
            ));
        }
        if classes == 0 {
            return Err(ConfusionError::invalid_input(
                "number of classes must be at least 1",
            ));
        }
        if expected.is_empty() {
            return Err(ConfusionError::invalid_input("empty label sequences"));
        }

        let mut counts = Array2::<f64>::zeros((classes, classes));
        for (&truth, &prediction) in expected.iter().zip(predicted.iter()) {
            let i = codify(truth, classes)?;
            let j = codify(prediction, classes)?;
            counts[[i, j]] += 1.0;
        }

        let samples = expected.len() as f64;
        log::debug!(
            "contingency table tallied from labels: {} classes, {} samples",
            classes,
            expected.len()
        );
        Ok(Self::from_count_grid(counts, samples))
    }

    /// Build a table from a pre-aggregated K×K count matrix.
    ///
    /// The class count is the matrix dimension and the sample count is the
    /// sum of all cells. Integer and floating matrices are both accepted;
    /// cells must be non-negative and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfusionError::DimensionMismatch`] when the matrix is not
    /// square and [`ConfusionError::InvalidInput`] when it is empty or holds
    /// a negative or non-finite cell.
    pub fn from_counts<T>(matrix: &Array2<T>) -> Result<Self>
    where
        T: ToPrimitive + Copy,
    {
        let counts = square_grid(matrix, "count")?;
        let samples = counts.sum();
        log::debug!(
            "contingency table built from counts: {} classes, {} samples",
            counts.nrows(),
            samples
        );
        Ok(Self::from_count_grid(counts, samples))
    }

    /// Build a table from a K×K proportion matrix plus an explicit total
    /// sample count.
    ///
    /// The supplied grid is taken verbatim as the proportion matrix — row and
    /// column proportions derive from it directly, not from a re-normalized
    /// count grid — while the stored cell grid is scaled back up to
    /// `proportion * samples` so the cells still sum to the sample count.
    /// The sample count cannot be recovered from proportions and must be
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfusionError::DimensionMismatch`] when the matrix is not
    /// square and [`ConfusionError::InvalidInput`] when it is empty, holds a
    /// negative or non-finite cell, or `samples` is zero.
    pub fn from_proportions(proportions: &Array2<f64>, samples: usize) -> Result<Self> {
        let proportions = square_grid(proportions, "proportion")?;
        if samples == 0 {
            return Err(ConfusionError::invalid_input(
                "sample count must be at least 1 for a proportion matrix",
            ));
        }

        let total = proportions.sum();
        if (total - 1.0).abs() > PROPORTION_SUM_TOLERANCE {
            log::warn!("proportion matrix sums to {total}, expected 1");
        }

        let samples = samples as f64;
        let counts = &proportions * samples;
        let row_totals = counts.sum_axis(Axis(1));
        let column_totals = counts.sum_axis(Axis(0));
        let row_proportions = proportions.sum_axis(Axis(1));
        let column_proportions = proportions.sum_axis(Axis(0));

        log::debug!(
            "contingency table built from proportions: {} classes, {} samples",
            proportions.nrows(),
            samples
        );
        Ok(ContingencyTable {
            classes: proportions.nrows(),
            samples,
            counts,
            proportions,
            row_totals,
            column_totals,
            row_proportions,
            column_proportions,
        })
    }

    /// Assemble a table whose fundamental grid is raw counts; proportions and
    /// marginals are derived by normalizing against the sample count.
    fn from_count_grid(counts: Array2<f64>, samples: f64) -> Self {
        let row_totals = counts.sum_axis(Axis(1));
        let column_totals = counts.sum_axis(Axis(0));
        let proportions = &counts / samples;
        let row_proportions = &row_totals / samples;
        let column_proportions = &column_totals / samples;

        ContingencyTable {
            classes: counts.nrows(),
            samples,
            counts,
            proportions,
            row_totals,
            column_totals,
            row_proportions,
            column_proportions,
        }
    }

    /// Number of distinct classes K.
    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Total number of samples. The sum of all cells equals this value,
    /// within floating tolerance for proportion-based construction.
    pub fn samples(&self) -> f64 {
        self.samples
    }

    /// The K×K cell grid (row = truth, column = prediction).
    pub fn matrix(&self) -> &Array2<f64> {
        &self.counts
    }

    /// The K×K proportion matrix, `counts / samples`.
    pub fn proportions(&self) -> &Array2<f64> {
        &self.proportions
    }

    /// Row sums of the cell grid: samples per ground-truth class.
    pub fn row_totals(&self) -> &Array1<f64> {
        &self.row_totals
    }

    /// Column sums of the cell grid: samples per predicted class.
    pub fn column_totals(&self) -> &Array1<f64> {
        &self.column_totals
    }

    /// Marginal proportion of each ground-truth class, `p_i.`.
    pub fn row_proportions(&self) -> &Array1<f64> {
        &self.row_proportions
    }

    /// Marginal proportion of each predicted class, `p_.j`.
    pub fn column_proportions(&self) -> &Array1<f64> {
        &self.column_proportions
    }
}

/// Convert a label value into a dense class index, rejecting values outside
/// `[0, classes)`.
fn codify<T: ToPrimitive + Copy>(value: T, classes: usize) -> Result<usize> {
    let v = value
        .to_i64()
        .ok_or_else(|| ConfusionError::invalid_input("label is not representable as an integer"))?;
    if v < 0 || v as u64 >= classes as u64 {
        return Err(ConfusionError::label_out_of_range(v, classes));
    }
    Ok(v as usize)
}

/// Validate a square, non-empty grid of non-negative finite values and
/// convert it to `f64`.
fn square_grid<T: ToPrimitive + Copy>(matrix: &Array2<T>, kind: &str) -> Result<Array2<f64>> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(ConfusionError::dimension_mismatch(
            format!("square {kind} matrix"),
            format!("({rows}, {cols})"),
        ));
    }
    if rows == 0 {
        return Err(ConfusionError::invalid_input(format!(
            "empty {kind} matrix"
        )));
    }

    let mut grid = Array2::<f64>::zeros((rows, cols));
    for ((i, j), value) in matrix.indexed_iter() {
        let v = value.to_f64().ok_or_else(|| {
            ConfusionError::invalid_input(format!("{kind} cell ({i}, {j}) is not numeric"))
        })?;
        if !v.is_finite() || v < 0.0 {
            return Err(ConfusionError::invalid_input(format!(
                "{kind} cell ({i}, {j}) = {v} must be non-negative and finite"
            )));
        }
        grid[[i, j]] = v;
    }
    Ok(grid)
}
