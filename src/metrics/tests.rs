use super::*;

const ACTUAL: [&str; 6] = ["valid", "valid", "valid", "invalid", "invalid", "invalid"];
const PREDICTED: [&str; 6] = ["valid", "valid", "invalid", "invalid", "invalid", "valid"];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_accuracy() {
    assert!(close(accuracy(&ACTUAL, &PREDICTED).unwrap(), 4.0 / 6.0));
    assert_eq!(accuracy(&["a"], &["a"]).unwrap(), 1.0);
    assert_eq!(accuracy(&["a"], &["b"]).unwrap(), 0.0);
}

#[test]
fn test_accuracy_rejects_bad_input() {
    assert!(matches!(
        accuracy(&["a", "b"], &["a"]),
        Err(MetricsError::LengthMismatch {
            actual: 2,
            predicted: 1
        })
    ));
    let empty: [&str; 0] = [];
    assert!(matches!(accuracy(&empty, &empty), Err(MetricsError::Empty)));
}

#[test]
fn test_confusion_matrix_rows_are_actual() {
    let matrix = ConfusionMatrix::from_predictions(&ACTUAL, &PREDICTED).unwrap();
    assert_eq!(matrix.labels(), &["invalid", "valid"]);
    assert_eq!(matrix.counts(), &[vec![2usize, 1], vec![1, 2]]);
    assert_eq!(matrix.get("valid", "invalid"), Some(1));
    assert_eq!(matrix.get("valid", "missing"), None);
    assert_eq!(matrix.total(), 6);
    assert_eq!(matrix.correct(), 4);
    assert_eq!(matrix.max_count(), 2);
}

#[test]
fn test_confusion_matrix_includes_predicted_only_labels() {
    let matrix = ConfusionMatrix::from_predictions(&["a", "a"], &["a", "b"]).unwrap();
    assert_eq!(matrix.labels(), &["a", "b"]);
    assert_eq!(matrix.row_total(1), 0);
    assert_eq!(matrix.column_total(1), 1);
}

#[test]
fn test_report_per_class_values() {
    let actual = ["a", "a", "a", "b"];
    let predicted = ["a", "a", "b", "b"];
    let report = ClassificationReport::from_predictions(&actual, &predicted).unwrap();

    let a = report.class("a").unwrap();
    assert!(close(a.precision, 1.0));
    assert!(close(a.recall, 2.0 / 3.0));
    assert!(close(a.f1, 0.8));
    assert_eq!(a.support, 3);

    let b = report.class("b").unwrap();
    assert!(close(b.precision, 0.5));
    assert!(close(b.recall, 1.0));
    assert!(close(b.f1, 2.0 / 3.0));
    assert_eq!(b.support, 1);

    assert!(close(report.accuracy(), 0.75));
    assert!(close(report.macro_avg().precision, 0.75));
    assert!(close(report.weighted_avg().recall, 0.75));
    assert!(close(report.weighted_avg().f1, (0.8 * 3.0 + 2.0 / 3.0) / 4.0));
    assert_eq!(report.support(), 4);
}

#[test]
fn test_report_zero_division_is_zero() {
    let report = ClassificationReport::from_predictions(&["a", "a"], &["a", "b"]).unwrap();
    let b = report.class("b").unwrap();
    assert_eq!(b.precision, 0.0);
    assert_eq!(b.recall, 0.0);
    assert_eq!(b.f1, 0.0);
    assert_eq!(b.support, 0);
}

#[test]
fn test_report_accuracy_matches_accuracy_fn() {
    let report = ClassificationReport::from_predictions(&ACTUAL, &PREDICTED).unwrap();
    assert!(close(report.accuracy(), accuracy(&ACTUAL, &PREDICTED).unwrap()));
}

#[test]
fn test_report_display_layout() {
    let report = ClassificationReport::from_predictions(&ACTUAL, &PREDICTED).unwrap();
    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].contains("precision"));
    assert!(lines[0].contains("f1-score"));
    assert!(lines[2].trim_start().starts_with("invalid"));
    assert!(lines[3].trim_start().starts_with("valid"));
    assert!(text.contains("accuracy"));
    assert!(text.contains("macro avg"));
    assert!(text.contains("weighted avg"));
    assert!(lines.iter().any(|l| l.contains("0.67")));
}
