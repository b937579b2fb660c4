//! Agreement statistics derived from a [`ContingencyTable`] snapshot.
//!
//! Everything in this module is a pure function of the immutable table:
//! overall agreement, row/column error counts, per-class precision and
//! recall, the one-vs-rest [`PerClassMatrix`] decomposition, Pearson
//! chi-square, and geometric agreement.
//!
//! Degenerate denominators follow IEEE semantics: a class with an empty
//! column has `NaN` precision, a table with an empty row or column has `NaN`
//! chi-square. The single exception is [`geometric
//! agreement`](ContingencyTable::geometric_agreement), which degenerates to
//! `0` when any diagonal cell is empty.

use crate::table::ContingencyTable;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One-vs-rest 2×2 reduction of the full table for a single class.
///
/// Treats the class as "positive" and every other class as "negative":
/// the true positives are the diagonal cell, the false positives the rest of
/// the class column, the false negatives the rest of the class row, and the
/// true negatives everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerClassMatrix {
    true_positives: f64,
    true_negatives: f64,
    false_positives: f64,
    false_negatives: f64,
}

impl PerClassMatrix {
    /// Samples of this class predicted as this class.
    pub fn true_positives(&self) -> f64 {
        self.true_positives
    }

    /// Samples of other classes predicted as other classes.
    pub fn true_negatives(&self) -> f64 {
        self.true_negatives
    }

    /// Samples of other classes predicted as this class.
    pub fn false_positives(&self) -> f64 {
        self.false_positives
    }

    /// Samples of this class predicted as another class.
    pub fn false_negatives(&self) -> f64 {
        self.false_negatives
    }

    /// Samples whose ground truth is this class (the table row total).
    pub fn samples(&self) -> f64 {
        self.true_positives + self.false_negatives
    }

    /// All four quadrants combined; always equals the full table's sample
    /// count.
    pub fn total(&self) -> f64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Misclassified samples involving this class, `FP + FN`.
    pub fn errors(&self) -> f64 {
        self.false_positives + self.false_negatives
    }

    /// `TP / (TP + FP)`; `NaN` when the class was never predicted.
    pub fn precision(&self) -> f64 {
        self.true_positives / (self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`; `NaN` when the class never occurs in the ground
    /// truth.
    pub fn recall(&self) -> f64 {
        self.true_positives / (self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall; `NaN` propagates from either.
    pub fn f_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        2.0 * p * r / (p + r)
    }
}

/// Snapshot of every scalar statistic the library derives from one table.
///
/// Convenience bundle for callers that want a single serializable value
/// rather than a handful of accessor calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementSummary {
    /// Number of distinct classes K
    pub classes: usize,
    /// Total sample count
    pub samples: f64,
    /// Overall agreement (accuracy)
    pub overall_agreement: f64,
    /// Chance agreement given the marginals
    pub chance_agreement: f64,
    /// Cohen's Kappa
    pub kappa: f64,
    /// General asymptotic Kappa variance
    pub variance: f64,
    /// Kappa variance under the null hypothesis of no association
    pub variance_under_null: f64,
    /// Delta-method Kappa variance
    pub delta_method_variance: f64,
    /// Standard error of Kappa, `sqrt(variance)`
    pub standard_error: f64,
    /// Geometric mean of the diagonal cells
    pub geometric_agreement: f64,
    /// Pearson chi-square statistic
    pub chi_square: f64,
}

impl ContingencyTable {
    /// Overall agreement: the fraction of samples on the diagonal,
    /// `trace(counts) / samples`.
    pub fn overall_agreement(&self) -> f64 {
        self.matrix().diag().sum() / self.samples()
    }

    /// Alias for [`overall_agreement`](Self::overall_agreement).
    pub fn accuracy(&self) -> f64 {
        self.overall_agreement()
    }

    /// Misclassified samples per ground-truth class,
    /// `rowTotal[i] - counts[[i, i]]`.
    pub fn row_errors(&self) -> Array1<f64> {
        self.row_totals() - &self.matrix().diag()
    }

    /// Misclassified samples per predicted class,
    /// `columnTotal[j] - counts[[j, j]]`.
    pub fn column_errors(&self) -> Array1<f64> {
        self.column_totals() - &self.matrix().diag()
    }

    /// Per-class precision: the diagonal normalized by column totals.
    /// `NaN` for a class that was never predicted.
    pub fn precision(&self) -> Array1<f64> {
        &self.matrix().diag() / self.column_totals()
    }

    /// Per-class recall: the diagonal normalized by row totals.
    /// `NaN` for a class absent from the ground truth.
    pub fn recall(&self) -> Array1<f64> {
        &self.matrix().diag() / self.row_totals()
    }

    /// One-vs-rest binary view for a single class.
    pub fn per_class_matrix(&self, class: usize) -> PerClassMatrix {
        let tp = self.matrix()[[class, class]];
        let fp = self.column_totals()[class] - tp;
        let fn_ = self.row_totals()[class] - tp;
        let tn = self.samples() - tp - fp - fn_;
        PerClassMatrix {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// One-vs-rest binary views for every class, in class-index order.
    pub fn per_class_matrices(&self) -> Vec<PerClassMatrix> {
        (0..self.classes()).map(|c| self.per_class_matrix(c)).collect()
    }

    /// Geometric mean of the diagonal cells, `exp(mean(ln d_i))`.
    ///
    /// For a 2×2 table this reproduces the classical `sqrt(d0 * d1)`
    /// agreement measure. Any empty diagonal cell drives the statistic to
    /// `0` rather than `NaN`; this 0-fallback is deliberate and asymmetric
    /// with [`chi_square`](Self::chi_square).
    pub fn geometric_agreement(&self) -> f64 {
        let log_sum: f64 = self.matrix().diag().iter().map(|&d| d.ln()).sum();
        (log_sum / self.classes() as f64).exp()
    }

    /// Pearson chi-square statistic over the table,
    /// `sum (O_ij - E_ij)^2 / E_ij` with `E_ij = rowTotal[i] *
    /// columnTotal[j] / samples`.
    ///
    /// `NaN` when any expected cell is zero (an empty row or column total);
    /// the undefined term is never skipped and never raised as an error.
    pub fn chi_square(&self) -> f64 {
        let n = self.samples();
        let mut sum = 0.0;
        for i in 0..self.classes() {
            for j in 0..self.classes() {
                let expected = self.row_totals()[i] * self.column_totals()[j] / n;
                let observed = self.matrix()[[i, j]];
                let deviation = observed - expected;
                sum += deviation * deviation / expected;
            }
        }
        sum
    }

    /// Bundle every scalar statistic into a serializable [`AgreementSummary`].
    pub fn summary(&self) -> AgreementSummary {
        AgreementSummary {
            classes: self.classes(),
            samples: self.samples(),
            overall_agreement: self.overall_agreement(),
            chance_agreement: self.chance_agreement(),
            kappa: self.kappa(),
            variance: self.variance(),
            variance_under_null: self.variance_under_null(),
            delta_method_variance: crate::kappa::delta_method_kappa_variance(self),
            standard_error: self.standard_error(),
            geometric_agreement: self.geometric_agreement(),
            chi_square: self.chi_square(),
        }
    }
}
