//! Cohen's Kappa and its variance estimators.
//!
//! Three independent closed-form estimators of the Kappa sampling variance
//! are provided, all reading the same immutable [`ContingencyTable`]
//! snapshot:
//!
//! - [`variance`](ContingencyTable::variance): the general large-sample
//!   asymptotic variance of Fleiss, Cohen and Everitt (1969), in the form
//!   given by Fleiss, *Statistical Methods for Rates and Proportions*.
//! - [`variance_under_null`](ContingencyTable::variance_under_null): the
//!   asymptotic variance under the null hypothesis of no association, a
//!   function of the marginal proportions only.
//! - [`delta_method_kappa_variance`]: Congalton's delta-method
//!   approximation, a first-order Taylor expansion around the marginal
//!   totals. A free function, callable without touching the other
//!   estimators.
//!
//! None of these raise: a degenerate table (chance agreement of 1) yields
//! `NaN` through ordinary IEEE division, and every formula handles K = 2
//! through arbitrary K without a binary special case.

use crate::table::ContingencyTable;

impl ContingencyTable {
    /// Expected agreement if the two classifications were independent given
    /// the marginals: `sum_i p_i. * p_.i`.
    pub fn chance_agreement(&self) -> f64 {
        self.row_proportions()
            .iter()
            .zip(self.column_proportions().iter())
            .map(|(&r, &c)| r * c)
            .sum()
    }

    /// Cohen's Kappa, `(po - pc) / (1 - pc)`.
    ///
    /// `NaN` when chance agreement is 1 (all mass concentrated in a single
    /// diagonal cell); this is a reportable degenerate value, not an error.
    pub fn kappa(&self) -> f64 {
        let po = self.overall_agreement();
        let pc = self.chance_agreement();
        (po - pc) / (1.0 - pc)
    }

    /// General asymptotic (large-sample) variance of Kappa, after Fleiss,
    /// Cohen and Everitt (1969).
    pub fn variance(&self) -> f64 {
        let n = self.samples();
        let k = self.classes();
        let p = self.proportions();
        let rp = self.row_proportions();
        let cp = self.column_proportions();
        let pc = self.chance_agreement();
        let kappa = self.kappa();

        let mut a = 0.0;
        for i in 0..k {
            let term = 1.0 - (rp[i] + cp[i]) * (1.0 - kappa);
            a += p[[i, i]] * term * term;
        }

        let mut b = 0.0;
        for i in 0..k {
            for j in 0..k {
                if i != j {
                    let term = cp[i] + rp[j];
                    b += p[[i, j]] * term * term;
                }
            }
        }
        b *= (1.0 - kappa) * (1.0 - kappa);

        let c = kappa - pc * (1.0 - kappa);

        (a + b - c * c) / ((1.0 - pc) * (1.0 - pc) * n)
    }

    /// Asymptotic variance of Kappa under the null hypothesis of no
    /// association between the two classifications.
    pub fn variance_under_null(&self) -> f64 {
        let n = self.samples();
        let pc = self.chance_agreement();

        let cross: f64 = self
            .row_proportions()
            .iter()
            .zip(self.column_proportions().iter())
            .map(|(&r, &c)| r * c * (r + c))
            .sum();

        (pc + pc * pc - cross) / ((1.0 - pc) * (1.0 - pc) * n)
    }

    /// Standard error of Kappa, the square root of the general asymptotic
    /// [`variance`](Self::variance).
    pub fn standard_error(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Congalton's delta-method approximation of the Kappa variance.
///
/// A first-order Taylor expansion of Kappa around the marginal totals, built
/// from four moments of the proportion matrix:
/// `t1 = po`, `t2 = pc`, `t3 = sum_i p_ii * (p_i. + p_.i)` and
/// `t4 = sum_ij p_ij * (p_i. + p_.j)^2`.
///
/// # Examples
///
/// ```rust
/// use confusion_stats::{ContingencyTable, delta_method_kappa_variance};
/// use ndarray::array;
///
/// # fn main() -> confusion_stats::Result<()> {
/// let table = ContingencyTable::from_counts(&array![[44, 5, 1], [7, 20, 3], [9, 5, 6]])?;
/// let variance = delta_method_kappa_variance(&table);
/// assert!(variance > 0.0);
/// # Ok(())
/// # }
/// ```
pub fn delta_method_kappa_variance(table: &ContingencyTable) -> f64 {
    let n = table.samples();
    let k = table.classes();
    let p = table.proportions();
    let rp = table.row_proportions();
    let cp = table.column_proportions();

    let t1 = table.overall_agreement();
    let t2 = table.chance_agreement();

    let mut t3 = 0.0;
    for i in 0..k {
        t3 += p[[i, i]] * (rp[i] + cp[i]);
    }

    let mut t4 = 0.0;
    for i in 0..k {
        for j in 0..k {
            let term = rp[i] + cp[j];
            t4 += p[[i, j]] * term * term;
        }
    }

    let d = 1.0 - t2;
    let first = t1 * (1.0 - t1) / (d * d);
    let second = 2.0 * (1.0 - t1) * (2.0 * t1 * t2 - t3) / (d * d * d);
    let third = (1.0 - t1) * (1.0 - t1) * (t4 - 4.0 * t2 * t2) / (d * d * d * d);

    (first + second + third) / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_kappa_screening_table() {
        let table = ContingencyTable::from_counts(&array![[24, 14], [8, 24]]).unwrap();

        assert_abs_diff_eq!(table.overall_agreement(), 0.6857143, epsilon = 1e-5);
        assert_abs_diff_eq!(table.chance_agreement(), 0.4963265, epsilon = 1e-5);
        assert_abs_diff_eq!(table.kappa(), 0.376013, epsilon = 1e-5);
        assert_abs_diff_eq!(table.standard_error(), 0.1087717, epsilon = 1e-5);
    }

    #[test]
    fn test_kappa_three_classes() {
        let table = ContingencyTable::from_counts(&array![[29, 6, 5], [8, 20, 7], [1, 2, 22]])
            .unwrap();
        assert_abs_diff_eq!(table.kappa(), 0.563, epsilon = 1e-3);
    }

    #[test]
    fn test_kappa_perfect_agreement_single_cell_is_nan() {
        // All mass in one diagonal cell: chance agreement is 1, Kappa 0/0.
        let table = ContingencyTable::from_counts(&array![[10, 0], [0, 0]]).unwrap();
        assert_abs_diff_eq!(table.chance_agreement(), 1.0, epsilon = 1e-12);
        assert!(table.kappa().is_nan());
        assert!(table.variance().is_nan());
    }

    #[test]
    fn test_variance_estimators_differ() {
        let table = ContingencyTable::from_counts(&array![[44, 5, 1], [7, 20, 3], [9, 5, 6]])
            .unwrap();

        let general = table.variance();
        let null = table.variance_under_null();
        let delta = delta_method_kappa_variance(&table);

        assert!(general.is_finite());
        assert!(null.is_finite());
        assert!(delta.is_finite());
        assert_abs_diff_eq!(null.sqrt(), 0.073509316753225237, epsilon = 1e-10);
        assert_abs_diff_eq!(delta.sqrt(), 0.073534791185213152, epsilon = 1e-10);
        assert_abs_diff_eq!(general.sqrt(), 0.072, epsilon = 5e-4);
    }
}
