//! Integration tests for contingency-table construction and the agreement
//! statistics derived from it.

use approx::assert_abs_diff_eq;
use confusion_stats::{ConfusionError, ContingencyTable};
use ndarray::{array, Array2};

#[test]
fn test_construction_from_label_pairs() {
    let expected = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2];
    let predicted = [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];

    let table = ContingencyTable::with_classes(3, &expected, &predicted).unwrap();

    assert_eq!(table.classes(), 3);
    assert_eq!(table.samples(), 12.0);
    assert_eq!(
        table.matrix(),
        &array![[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 4.0, 0.0]]
    );

    // Inference picks the same class count when it is omitted.
    let inferred = ContingencyTable::from_labels(&expected, &predicted).unwrap();
    assert_eq!(inferred.classes(), 3);
    assert_eq!(inferred.matrix(), table.matrix());
}

#[test]
fn test_construction_from_count_matrix() {
    let table = ContingencyTable::from_counts(&array![
        [4, 0, 0],
        [0, 4, 4],
        [0, 0, 0],
    ])
    .unwrap();

    assert_eq!(table.classes(), 3);
    assert_eq!(table.samples(), 12.0);
    assert_eq!(table.geometric_agreement(), 0.0);
}

#[test]
fn test_row_and_column_totals() {
    let table = ContingencyTable::from_counts(&array![
        [1, 2, 3],
        [4, 5, 6],
        [7, 8, 9],
    ])
    .unwrap();

    assert_eq!(table.row_totals().to_vec(), vec![6.0, 15.0, 24.0]);
    assert_eq!(table.column_totals().to_vec(), vec![12.0, 15.0, 18.0]);
    assert_eq!(table.row_totals().sum(), table.column_totals().sum());
    assert_eq!(table.row_totals().sum(), table.samples());
}

#[test]
fn test_per_class_matrices_partition_the_samples() {
    let expected = [0, 0, 0, 1, 1, 1, 1, 1, 2, 4, 4, 3, 2, 2];
    let predicted = [0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1];

    let table = ContingencyTable::from_labels(&expected, &predicted).unwrap();
    assert_eq!(table.classes(), 5);
    assert_eq!(table.samples(), 14.0);

    let views = table.per_class_matrices();
    assert_eq!(views.len(), 5);
    for (class, view) in views.iter().enumerate() {
        assert_eq!(view.total(), 14.0, "class {class} decomposition");
        assert_eq!(view.samples(), table.row_totals()[class]);
        assert_eq!(view.true_positives(), table.matrix()[[class, class]]);
    }
}

#[test]
fn test_per_class_view_matches_manual_reduction() {
    // A/B/C OCR example: expected AABCABB, predicted ABCCACB.
    let expected = [0, 0, 1, 2, 0, 1, 1];
    let predicted = [0, 1, 2, 2, 0, 2, 1];

    let table = ContingencyTable::from_labels(&expected, &predicted).unwrap();
    let view = table.per_class_matrix(1);

    assert_eq!(view.true_positives(), 1.0);
    assert_eq!(view.false_positives(), 1.0);
    assert_eq!(view.false_negatives(), 2.0);
    assert_eq!(view.true_negatives(), 3.0);
    assert_eq!(view.errors(), 3.0);
    assert_abs_diff_eq!(view.precision(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(view.recall(), 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(view.f_score(), 0.4, epsilon = 1e-12);
}

#[test]
fn test_precision_and_recall_vectors() {
    let expected = [0, 0, 1, 2, 0, 1, 1];
    let predicted = [0, 1, 2, 2, 0, 2, 1];
    let table = ContingencyTable::from_labels(&expected, &predicted).unwrap();

    let precision = table.precision();
    let recall = table.recall();
    assert_abs_diff_eq!(precision[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(precision[1], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(precision[2], 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(recall[0], 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(recall[1], 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(recall[2], 1.0, epsilon = 1e-12);

    assert_eq!(table.row_errors().to_vec(), vec![1.0, 2.0, 0.0]);
    assert_eq!(table.column_errors().to_vec(), vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_geometric_agreement_worked_examples() {
    let table = ContingencyTable::from_counts(&array![[29, 6, 5], [8, 20, 7], [1, 2, 22]])
        .unwrap();
    assert_abs_diff_eq!(
        table.geometric_agreement(),
        23.367749664961245,
        epsilon = 1e-10
    );

    let screening = ContingencyTable::from_counts(&array![[24, 14], [8, 24]]).unwrap();
    assert_abs_diff_eq!(screening.geometric_agreement(), 24.0, epsilon = 1e-5);

    let skewed = ContingencyTable::from_counts(&array![[462, 241], [28, 59]]).unwrap();
    assert_abs_diff_eq!(
        skewed.geometric_agreement(),
        (462.0f64 * 59.0).sqrt(),
        epsilon = 1e-10
    );
}

#[test]
fn test_chi_square_worked_example() {
    let table = ContingencyTable::from_counts(&array![
        [10, 9, 5, 7, 8],
        [1, 2, 0, 1, 2],
        [0, 0, 1, 0, 1],
        [1, 0, 0, 3, 0],
        [0, 2, 0, 0, 2],
    ])
    .unwrap();
    assert_abs_diff_eq!(table.chi_square(), 19.43, epsilon = 0.01);
    assert!(!table.chi_square().is_nan());
}

#[test]
fn test_degenerate_marginal_policy() {
    // One class never occurs as truth: chi-square is undefined (NaN), the
    // geometric agreement falls back to 0, and overall agreement stays
    // finite. The NaN-vs-0 asymmetry is deliberate.
    let table = ContingencyTable::from_counts(&array![
        [4, 0, 0],
        [0, 4, 4],
        [0, 0, 0],
    ])
    .unwrap();

    assert!(table.chi_square().is_nan());
    assert_eq!(table.geometric_agreement(), 0.0);
    assert_abs_diff_eq!(
        table.overall_agreement(),
        table.matrix().diag().sum() / table.samples(),
        epsilon = 0.0
    );
}

#[test]
fn test_malformed_input_is_an_error_not_nan() {
    let err = ContingencyTable::from_labels(&[0, 1], &[0, 1, 1]).unwrap_err();
    assert!(matches!(err, ConfusionError::DimensionMismatch { .. }));

    let err = ContingencyTable::with_classes(3, &[0, 3], &[0, 1]).unwrap_err();
    assert!(matches!(err, ConfusionError::LabelOutOfRange { label: 3, classes: 3 }));

    let err = ContingencyTable::from_counts(&Array2::<u32>::zeros((3, 2))).unwrap_err();
    assert!(matches!(err, ConfusionError::DimensionMismatch { .. }));
}

#[test]
fn test_accessors_idempotent() {
    let table = ContingencyTable::from_counts(&array![[29, 6, 5], [8, 20, 7], [1, 2, 22]])
        .unwrap();

    assert_eq!(table.overall_agreement(), table.overall_agreement());
    assert_eq!(table.chance_agreement(), table.chance_agreement());
    assert_eq!(table.kappa(), table.kappa());
    assert_eq!(table.variance(), table.variance());
    assert_eq!(table.chi_square(), table.chi_square());
    assert_eq!(table.geometric_agreement(), table.geometric_agreement());
}
