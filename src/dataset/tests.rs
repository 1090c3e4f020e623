use super::*;
use std::collections::HashSet;

const SAMPLE: &str = "\
Unnamed: 0,f0,f1,status
0,0.5,1.0,valid
1,-0.25,2.0,invalid
2,1e-3,3.5,valid
";

mod loader_tests {
    use super::*;

    #[test]
    fn test_drops_unnamed_columns_and_reads_labels() {
        let dataset = VectorizedDataset::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.feature_names(), &["f0".to_string(), "f1".to_string()]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.features()[1], vec![-0.25, 2.0]);
        assert_eq!(dataset.features()[2][0], 0.001);
        assert_eq!(dataset.labels(), &["valid", "invalid", "valid"]);
        assert_eq!(dataset.classes(), vec!["invalid".to_string(), "valid".to_string()]);
    }

    #[test]
    fn test_blank_index_header_is_dropped() {
        // A dataframe's `to_csv` leaves the index column's header empty.
        let csv = ",f0,f1,status\n0,0.5,1.0,valid\n1,-0.25,2.0,invalid\n";
        let dataset = VectorizedDataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.feature_names(), &["f0".to_string(), "f1".to_string()]);
        assert_eq!(dataset.features()[1], vec![-0.25, 2.0]);
    }

    #[test]
    fn test_whitespace_header_is_dropped() {
        let csv = "  ,f0,status\n7,1.5,valid\n";
        let dataset = VectorizedDataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.n_features(), 1);
        assert_eq!(dataset.features()[0], vec![1.5]);
    }

    #[test]
    fn test_label_column_may_sit_anywhere() {
        let csv = "status,a,b\n1,0.1,0.2\n0,0.3,0.4\n";
        let dataset = VectorizedDataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.labels(), &["1", "0"]);
    }

    #[test]
    fn test_missing_label_column() {
        let csv = "a,b\n1,2\n";
        let err = VectorizedDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingLabelColumn { .. }));
    }

    #[test]
    fn test_only_label_column() {
        let csv = "Unnamed: 0,status\n0,valid\n";
        let err = VectorizedDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::NoFeatures));
    }

    #[test]
    fn test_non_numeric_feature() {
        let csv = "a,status\n1.0,valid\nabc,invalid\n";
        match VectorizedDataset::from_reader(csv.as_bytes()).unwrap_err() {
            DatasetError::NonNumeric { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "a");
                assert_eq!(value, "abc");
            }
            other => panic!("expected NonNumeric, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cell_is_rejected() {
        let csv = "a,status\n,valid\n";
        assert!(matches!(
            VectorizedDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_ragged_row() {
        let csv = "a,b,status\n1,2,valid\n3,invalid\n";
        assert!(matches!(
            VectorizedDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_header_only() {
        let csv = "a,status\n";
        assert!(matches!(
            VectorizedDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VectorizedDataset::from_path(&dir.path().join("vectorised.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::ReadFailed { .. }));
    }

    #[test]
    fn test_subset_keeps_requested_order() {
        let dataset = VectorizedDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let subset = dataset.subset(&[2, 0]);
        assert_eq!(subset.labels(), &["valid", "valid"]);
        assert_eq!(subset.features()[0], vec![0.001, 3.5]);
        assert_eq!(subset.feature_names(), dataset.feature_names());
    }

    #[test]
    fn test_new_rejects_mismatched_parts() {
        let result = VectorizedDataset::new(
            vec!["a".into()],
            vec![vec![1.0], vec![2.0, 3.0]],
            vec!["x".into(), "y".into()],
        );
        assert!(matches!(result, Err(DatasetError::RaggedRow { row: 1, .. })));
    }
}

mod split_tests {
    use super::*;

    #[test]
    fn test_split_sizes_round_test_side_up() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_split_is_a_partition() {
        let split = train_test_split(50, 0.2, 7).unwrap();
        let all: HashSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all.len(), 50);
        assert!(all.iter().all(|&i| i < 50));
    }

    #[test]
    fn test_split_is_reproducible() {
        assert_eq!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn test_split_too_small() {
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(DatasetError::SplitTooSmall { .. })
        ));
        assert!(matches!(
            train_test_split(0, 0.2, 42),
            Err(DatasetError::SplitTooSmall { .. })
        ));
        assert!(train_test_split(2, 0.2, 42).is_ok());
    }
}

mod label_tests {
    use super::*;

    #[test]
    fn test_encoder_round_trip() {
        let labels: Vec<String> =
            ["valid", "invalid", "valid"].iter().map(|s| s.to_string()).collect();
        let encoder = LabelEncoder::fit(&labels);

        assert_eq!(encoder.n_classes(), 2);
        assert_eq!(encoder.encode_all(&labels), Some(vec![1, 0, 1]));
        assert_eq!(encoder.decode(0), "invalid");
        assert_eq!(encoder.encode("unknown"), None);
    }
}
