use std::path::Path;

use tracing::{debug, info};

use crate::classifier::{Classifier, ClassifierError, ClassifierKind};
use crate::config::Config;
use crate::constants::PREDICTION_COLUMN;
use crate::dataset::{LabelEncoder, VectorizedDataset, train_test_split};
use crate::metrics::{ClassificationReport, ConfusionMatrix};
use crate::render::{confusion_title, write_confusion_matrix_png};

use super::error::TrainingError;

/// Held-out scores for one trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    pub kind: ClassifierKind,
    pub accuracy: f64,
    pub report: ClassificationReport,
}

/// Outcome of a full training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub total_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// One entry per model, in [`ClassifierKind::ALL`] order.
    pub evaluations: Vec<ModelEvaluation>,
    pub selected_model: ClassifierKind,
    /// Test-split confusion matrix of the selected model.
    pub confusion: ConfusionMatrix,
    /// Selected model's predictions over every input row, in file order.
    pub predictions: Vec<String>,
}

impl TrainingSummary {
    pub fn evaluation(&self, kind: ClassifierKind) -> Option<&ModelEvaluation> {
        self.evaluations.iter().find(|e| e.kind == kind)
    }
}

/// Loads the configured dataset and runs [`train_and_evaluate`], then writes the
/// heatmap and prediction file.
pub fn run_training(config: &Config) -> Result<TrainingSummary, TrainingError> {
    info!(
        input = %config.vectorised_path.display(),
        test_size = config.test_size,
        seed = config.random_seed,
        selected = %config.selected_model,
        "Starting classifier training"
    );

    let dataset = VectorizedDataset::from_path(&config.vectorised_path)?;
    let summary = train_and_evaluate(&dataset, config)?;

    write_confusion_matrix_png(
        &summary.confusion,
        &confusion_title(summary.selected_model.display_name()),
        &config.confusion_matrix_path,
    )?;
    info!(path = %config.confusion_matrix_path.display(), "Confusion matrix rendered");

    write_predictions(&config.predictions_path, &summary.predictions)?;
    info!(
        path = %config.predictions_path.display(),
        rows = summary.predictions.len(),
        "Predictions written"
    );

    Ok(summary)
}

/// Splits `dataset`, trains every model on the training side and scores it on
/// the test side. Nothing is written to disk.
pub fn train_and_evaluate(
    dataset: &VectorizedDataset,
    config: &Config,
) -> Result<TrainingSummary, TrainingError> {
    let encoder = LabelEncoder::fit(dataset.labels());
    let encoded = encode(&encoder, dataset.labels())?;
    let split = train_test_split(dataset.len(), config.test_size, config.random_seed)?;

    let features = dataset.features();
    let x_train: Vec<Vec<f64>> = split.train.iter().map(|&i| features[i].clone()).collect();
    let y_train: Vec<usize> = split.train.iter().map(|&i| encoded[i]).collect();
    let x_test: Vec<Vec<f64>> = split.test.iter().map(|&i| features[i].clone()).collect();
    let y_test: Vec<&str> = split.test.iter().map(|&i| dataset.labels()[i].as_str()).collect();

    let mut evaluations = Vec::with_capacity(ClassifierKind::ALL.len());
    let mut trained: Vec<(Box<dyn Classifier>, Vec<String>)> =
        Vec::with_capacity(ClassifierKind::ALL.len());

    for kind in ClassifierKind::ALL {
        let classifier_err = |source: ClassifierError| TrainingError::Classifier {
            model: kind.display_name(),
            source,
        };

        debug!(model = %kind, rows = x_train.len(), "Fitting model");
        let mut model = kind.build(config.random_seed);
        model.fit(&x_train, &y_train, encoder.n_classes()).map_err(classifier_err)?;

        let predicted = decode(&encoder, &model.predict(&x_test).map_err(classifier_err)?);
        let report = ClassificationReport::from_predictions(&y_test, &predicted)?;
        info!(model = %kind, accuracy = report.accuracy(), "Model evaluated");

        evaluations.push(ModelEvaluation {
            kind,
            accuracy: report.accuracy(),
            report,
        });
        trained.push((model, predicted));
    }

    let (model, test_predictions) = trained.swap_remove(config.selected_model.index());

    let confusion = ConfusionMatrix::from_predictions(&y_test, &test_predictions)?;
    let full = model.predict(dataset.features()).map_err(|source| TrainingError::Classifier {
        model: config.selected_model.display_name(),
        source,
    })?;

    Ok(TrainingSummary {
        total_rows: dataset.len(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        evaluations,
        selected_model: config.selected_model,
        confusion,
        predictions: decode(&encoder, &full),
    })
}

/// Writes a single-column `prediction` CSV, one row per prediction.
pub fn write_predictions(path: &Path, predictions: &[String]) -> Result<(), TrainingError> {
    let write_err = |source: csv::Error| TrainingError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record([PREDICTION_COLUMN]).map_err(write_err)?;
    for prediction in predictions {
        writer.write_record([prediction.as_str()]).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;
    Ok(())
}

fn encode(encoder: &LabelEncoder, labels: &[String]) -> Result<Vec<usize>, TrainingError> {
    labels
        .iter()
        .map(|label| {
            encoder.encode(label).ok_or_else(|| TrainingError::UnknownLabel {
                label: label.clone(),
            })
        })
        .collect()
}

fn decode(encoder: &LabelEncoder, classes: &[usize]) -> Vec<String> {
    classes.iter().map(|&c| encoder.decode(c).to_string()).collect()
}
