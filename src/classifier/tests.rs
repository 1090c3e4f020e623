use super::*;

/// Two well-separated square clusters: class 0 near the origin, class 1 near (5, 5).
fn two_clusters() -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (dx, dy) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
        x.push(vec![dx, dy]);
        y.push(0);
        x.push(vec![5.0 + dx, 5.0 + dy]);
        y.push(1);
    }
    (x, y)
}

/// Three corner clusters: bottom-left, top-right and top-left.
fn three_clusters() -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (dx, dy) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
        x.push(vec![dx, dy]);
        y.push(0);
        x.push(vec![5.0 + dx, 5.0 + dy]);
        y.push(1);
        x.push(vec![dx, 5.0 + dy]);
        y.push(2);
    }
    (x, y)
}

fn all_models() -> Vec<Box<dyn Classifier>> {
    ClassifierKind::ALL.iter().map(|kind| kind.build(42)).collect()
}

mod weight_tests {
    use super::*;

    #[test]
    fn test_balanced_weights_inverse_to_frequency() {
        let weights = balanced_class_weights(&[0, 0, 0, 1], 2);
        assert!((weights[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((weights[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_absent_class_gets_zero_weight() {
        let weights = balanced_class_weights(&[0, 2, 2], 3);
        assert_eq!(weights[1], 0.0);
        // Two present classes, not three.
        assert!((weights[0] - 1.5).abs() < 1e-12);
        assert!((weights[2] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_weights_sum_to_sample_count() {
        let y = [0, 1, 1, 2, 2, 2, 2];
        let total: f64 = balanced_sample_weights(&y, 3).iter().sum();
        assert!((total - y.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn test_resample_equalises_class_totals() {
        let y = [0, 1, 1, 1, 1, 1, 2, 2];
        let rows = balanced_resample(&y, 4);
        assert_eq!(rows.len(), 15);

        let mut totals = [0usize; 4];
        for &row in &rows {
            totals[y[row]] += 1;
        }
        assert_eq!(totals, [5, 5, 5, 0]);
    }

    #[test]
    fn test_resample_cycles_rows_evenly() {
        let y = [0, 0, 1, 1, 1, 1, 1];
        let rows = balanced_resample(&y, 2);
        assert_eq!(&rows[..5], &[0, 1, 0, 1, 0]);
        assert_eq!(&rows[5..], &[2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_resample_of_balanced_labels_is_identity() {
        let y = [1, 0, 0, 1];
        let mut rows = balanced_resample(&y, 2);
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }
}

mod multiclass_tests {
    use super::*;
    use crate::classifier::multiclass::{OneVsOne, first_max};

    #[test]
    fn test_one_machine_per_present_pair() {
        let y = [0, 1, 3, 3, 1];
        let mut pairs = Vec::new();
        let ovo = OneVsOne::fit_with(&y, 4, |low, high, rows| {
            pairs.push((low, high, rows.to_vec()));
            Ok(())
        })
        .unwrap();

        assert_eq!(ovo.n_machines(), 3);
        assert_eq!(
            pairs,
            vec![
                (0, 1, vec![0, 1, 4]),
                (0, 3, vec![0, 2, 3]),
                (1, 3, vec![1, 2, 3, 4]),
            ]
        );
    }

    #[test]
    fn test_single_present_class_is_rejected() {
        let result = OneVsOne::fit_with(&[2, 2], 3, |_, _, _| Ok(()));
        assert!(matches!(result, Err(ClassifierError::SingleClass { found: 1 })));
    }

    #[test]
    fn test_votes_pick_pairwise_winner() {
        // Machines (0,1), (0,2), (1,2); each answers "high wins" for every sample.
        let ovo = OneVsOne::fit_with(&[0, 1, 2], 3, |low, high, _| Ok((low, high))).unwrap();
        let predicted = ovo
            .predict_with(2, |&(low, high)| match (low, high) {
                (0, 1) => Ok(vec![true, false]),
                (0, 2) => Ok(vec![true, false]),
                _ => Ok(vec![false, true]),
            })
            .unwrap();
        // Sample 0: 1, 2, 1 -> class 1. Sample 1: 0, 0, 2 -> class 0.
        assert_eq!(predicted, vec![1, 0]);
    }

    #[test]
    fn test_vote_ties_go_to_lowest_class() {
        assert_eq!(first_max(&[1, 1, 1]), 0);
        assert_eq!(first_max(&[0, 2, 2]), 1);
        assert_eq!(first_max(&[0, 0, 3]), 2);
    }
}

mod kind_tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!(ClassifierKind::parse("svm"), Some(ClassifierKind::Svm));
        assert_eq!(
            ClassifierKind::parse(" Logistic_Regression "),
            Some(ClassifierKind::LogisticRegression)
        );
        assert_eq!(
            ClassifierKind::parse("random_forest"),
            Some(ClassifierKind::RandomForest)
        );
        assert_eq!(ClassifierKind::parse("xgboost"), None);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for kind in ClassifierKind::ALL {
            assert_eq!(ClassifierKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (idx, kind) in ClassifierKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), idx);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ClassifierKind::Svm.to_string(), "SVM");
        assert_eq!(ClassifierKind::LogisticRegression.to_string(), "Logistic Regression");
        assert_eq!(ClassifierKind::RandomForest.to_string(), "Random Forest");
    }

    #[test]
    fn test_build_reports_its_kind() {
        for kind in ClassifierKind::ALL {
            assert_eq!(kind.build(1).kind(), kind);
        }
    }
}

mod model_tests {
    use super::*;

    #[test]
    fn test_binary_clusters_are_separated() {
        let (x, y) = two_clusters();
        for mut model in all_models() {
            model.fit(&x, &y, 2).unwrap();
            assert_eq!(model.predict(&x).unwrap(), y, "{} training fit", model.name());
            assert_eq!(
                model.predict(&[vec![0.5, 0.5], vec![5.5, 5.5]]).unwrap(),
                vec![0, 1],
                "{} held-out points",
                model.name()
            );
        }
    }

    #[test]
    fn test_three_class_clusters_are_separated() {
        let (x, y) = three_clusters();
        for mut model in all_models() {
            model.fit(&x, &y, 3).unwrap();
            assert_eq!(model.predict(&x).unwrap(), y, "{} training fit", model.name());
            assert_eq!(
                model.predict(&[vec![0.5, 5.5]]).unwrap(),
                vec![2],
                "{} held-out point",
                model.name()
            );
        }
    }

    #[test]
    fn test_labels_absent_from_training_are_never_predicted() {
        let (x, y) = two_clusters();
        // Encoder knows three classes; training data only has two.
        for mut model in all_models() {
            model.fit(&x, &y, 3).unwrap();
            assert!(model.predict(&x).unwrap().iter().all(|&p| p < 2));
        }
    }

    #[test]
    fn test_margin_models_need_two_classes() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 0];

        let mut svm = SvmClassifier::default();
        assert!(matches!(
            svm.fit(&x, &y, 2),
            Err(ClassifierError::SingleClass { found: 1 })
        ));

        let mut logistic = LogisticRegression::default();
        assert!(matches!(
            logistic.fit(&x, &y, 2),
            Err(ClassifierError::SingleClass { found: 1 })
        ));
    }

    #[test]
    fn test_forest_tolerates_single_class() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![1, 1, 1];
        let mut forest = RandomForest::default();
        forest.fit(&x, &y, 2).unwrap();
        assert_eq!(forest.predict(&[vec![7.0]]).unwrap(), vec![1]);
    }

    #[test]
    fn test_predict_before_fit() {
        for model in all_models() {
            assert!(matches!(
                model.predict(&[vec![0.0, 0.0]]),
                Err(ClassifierError::NotFitted { .. })
            ));
        }
    }

    #[test]
    fn test_input_shape_errors() {
        let (x, y) = two_clusters();
        for mut model in all_models() {
            assert!(matches!(
                model.fit(&[], &[], 2),
                Err(ClassifierError::EmptyTrainingSet)
            ));
            assert!(matches!(
                model.fit(&x, &y[..3], 2),
                Err(ClassifierError::LengthMismatch { .. })
            ));

            model.fit(&x, &y, 2).unwrap();
            assert!(matches!(
                model.predict(&[vec![1.0, 2.0, 3.0]]),
                Err(ClassifierError::DimensionMismatch {
                    expected: 2,
                    got: 3
                })
            ));
        }
    }

    #[test]
    fn test_out_of_range_label() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 5];
        for mut model in all_models() {
            assert!(matches!(
                model.fit(&x, &y, 2),
                Err(ClassifierError::LabelOutOfRange { label: 5, .. })
            ));
        }
    }
}

mod svm_tests {
    use super::*;
    use crate::classifier::svm::{DENSE_KERNEL_ROW_LIMIT, dense_kernel_bytes, scale_gamma};

    #[test]
    fn test_scale_gamma_uses_overall_variance() {
        let x = vec![vec![0.0, 2.0], vec![2.0, 0.0]];
        assert!((scale_gamma(&x, 2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_gamma_constant_input() {
        let x = vec![vec![3.0, 3.0], vec![3.0, 3.0]];
        assert_eq!(scale_gamma(&x, 2), 1.0);
    }

    #[test]
    fn test_fitted_state() {
        let (x, y) = two_clusters();
        let mut svm = SvmClassifier::default();
        assert_eq!(svm.fitted_gamma(), None);
        assert_eq!(svm.n_support(), 0);
        assert_eq!(svm.n_machines(), 0);

        svm.fit(&x, &y, 2).unwrap();
        assert!(svm.fitted_gamma().is_some_and(|g| g > 0.0));
        assert_eq!(svm.n_machines(), 1);
        let n_support = svm.n_support();
        assert!(n_support >= 2 && n_support <= x.len());
    }

    #[test]
    fn test_one_machine_per_class_pair() {
        let (x, y) = three_clusters();
        let mut svm = SvmClassifier::default();
        svm.fit(&x, &y, 3).unwrap();
        assert_eq!(svm.n_machines(), 3);
    }

    #[test]
    fn test_fixed_gamma() {
        let (x, y) = two_clusters();
        let mut svm = SvmClassifier::new(SvmConfig {
            gamma: Gamma::Value(0.25),
            ..SvmConfig::default()
        });
        svm.fit(&x, &y, 2).unwrap();
        assert_eq!(svm.fitted_gamma(), Some(0.25));
        assert_eq!(svm.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_dense_kernel_size() {
        assert_eq!(dense_kernel_bytes(1_000), 8_000_000);
        assert_eq!(dense_kernel_bytes(DENSE_KERNEL_ROW_LIMIT), 800_000_000);
        assert_eq!(dense_kernel_bytes(usize::MAX), usize::MAX);
    }
}

mod logistic_tests {
    use super::*;

    /// `rows` samples with one feature spread over `[0, scale)`, labelled by
    /// whether it passes the midpoint, plus a constant nuisance feature.
    fn threshold_data(rows: usize, scale: f64) -> (Vec<Vec<f64>>, Vec<usize>) {
        (0..rows)
            .map(|i| {
                let value = (i as f64 + 0.5) * scale / rows as f64;
                (vec![value, scale / 2.0], usize::from(value > scale / 2.0))
            })
            .unzip()
    }

    fn training_accuracy(model: &LogisticRegression, x: &[Vec<f64>], y: &[usize]) -> f64 {
        let predicted = model.predict(x).unwrap();
        predicted.iter().zip(y).filter(|(p, t)| p == t).count() as f64 / y.len() as f64
    }

    #[test]
    fn test_converges_on_unscaled_features() {
        for scale in [1.0, 100.0, 1000.0] {
            let (x, y) = threshold_data(400, scale);
            let mut model = LogisticRegression::default();
            model.fit(&x, &y, 2).unwrap();
            let accuracy = training_accuracy(&model, &x, &y);
            assert!(accuracy >= 0.97, "scale {scale}: accuracy {accuracy}");
        }
    }

    #[test]
    fn test_imbalanced_minority_is_still_predicted() {
        // 90 negatives, 10 positives at the top of the range.
        let x: Vec<Vec<f64>> = (0..100).map(|i| vec![i as f64 * 3.0]).collect();
        let y: Vec<usize> = (0..100).map(|i| usize::from(i >= 90)).collect();
        let mut model = LogisticRegression::default();
        model.fit(&x, &y, 2).unwrap();
        assert_eq!(model.predict(&[vec![290.0], vec![10.0]]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_model_family_follows_class_count() {
        let (x, y) = two_clusters();
        let mut binary = LogisticRegression::default();
        assert_eq!(binary.is_multinomial(), None);
        binary.fit(&x, &y, 2).unwrap();
        assert_eq!(binary.is_multinomial(), Some(false));

        let (x, y) = three_clusters();
        let mut multi = LogisticRegression::default();
        multi.fit(&x, &y, 3).unwrap();
        assert_eq!(multi.is_multinomial(), Some(true));
    }
}

mod forest_tests {
    use super::*;

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = three_clusters();
        let samples = vec![vec![2.5, 2.5], vec![3.0, 1.0], vec![1.5, 3.5]];

        let mut a = RandomForest::default();
        let mut b = RandomForest::default();
        a.fit(&x, &y, 3).unwrap();
        b.fit(&x, &y, 3).unwrap();

        assert_eq!(a.vote_shares(&samples).unwrap(), b.vote_shares(&samples).unwrap());
    }

    #[test]
    fn test_vote_shares_are_normalised() {
        let (x, y) = three_clusters();
        let mut forest = RandomForest::new(ForestConfig {
            n_estimators: 10,
            ..ForestConfig::default()
        });
        forest.fit(&x, &y, 3).unwrap();
        assert_eq!(forest.n_trees(), 10);

        let shares = forest.vote_shares(&[vec![2.0, 3.0]]).unwrap();
        assert_eq!(shares[0].len(), 3);
        assert!((shares[0].iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_bootstrap_every_tree_agrees() {
        let (x, y) = two_clusters();
        let mut forest = RandomForest::new(ForestConfig {
            n_estimators: 5,
            bootstrap: false,
            ..ForestConfig::default()
        });
        forest.fit(&x, &y, 2).unwrap();
        let shares = forest.vote_shares(&x).unwrap();
        assert!(shares.iter().all(|s| s.iter().any(|&v| v == 1.0)));
    }

    #[test]
    fn test_unscaled_features() {
        let x: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64 * 50.0, 7.0]).collect();
        let y: Vec<usize> = (0..60).map(|i| usize::from(i >= 30)).collect();
        let mut forest = RandomForest::default();
        forest.fit(&x, &y, 2).unwrap();
        assert_eq!(forest.predict(&x).unwrap(), y);
    }
}
