use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::constants::{LABEL_COLUMN, UNNAMED_COLUMN_PREFIX};

use super::error::DatasetError;

/// Numeric feature table with one string label per row.
///
/// Rows have no identity beyond their position; every accessor preserves file order.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizedDataset {
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl VectorizedDataset {
    /// Builds a dataset from parts. Every row must have `feature_names.len()` values.
    pub fn new(
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<String>,
    ) -> Result<Self, DatasetError> {
        if feature_names.is_empty() {
            return Err(DatasetError::NoFeatures);
        }
        if let Some((row, values)) = features
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != feature_names.len())
        {
            return Err(DatasetError::RaggedRow {
                row,
                expected: feature_names.len(),
                got: values.len(),
            });
        }
        if features.len() != labels.len() {
            return Err(DatasetError::RaggedRow {
                row: features.len().min(labels.len()),
                expected: features.len(),
                got: labels.len(),
            });
        }

        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    /// Loads a CSV whose header names the columns.
    ///
    /// Index columns (blank headers or ones starting with `Unnamed`) are dropped,
    /// `status` becomes the label and every other column must hold numbers.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| DatasetError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::from_csv(reader).map_err(|e| match e {
            DatasetError::ReadFailed { source, .. } => DatasetError::ReadFailed {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            features = dataset.n_features(),
            classes = dataset.classes().len(),
            "Loaded vectorised dataset"
        );
        Ok(dataset)
    }

    /// Same as [`from_path`](Self::from_path) for any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, DatasetError> {
        let reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let read_err = |source: csv::Error| DatasetError::ReadFailed {
            path: Default::default(),
            source,
        };

        let headers = reader.headers().map_err(read_err)?.clone();

        let mut label_idx = None;
        let mut feature_cols: Vec<(usize, String)> = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            if is_unnamed_column(name) {
                debug!(column = name, "Dropping index column");
            } else if name == LABEL_COLUMN {
                label_idx = Some(idx);
            } else {
                feature_cols.push((idx, name.to_string()));
            }
        }

        let label_idx = label_idx.ok_or_else(|| DatasetError::MissingLabelColumn {
            column: LABEL_COLUMN.to_string(),
        })?;
        if feature_cols.is_empty() {
            return Err(DatasetError::NoFeatures);
        }

        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(read_err)?;
            if record.len() != headers.len() {
                return Err(DatasetError::RaggedRow {
                    row,
                    expected: headers.len(),
                    got: record.len(),
                });
            }

            let values = feature_cols
                .iter()
                .map(|(idx, name)| {
                    let raw = &record[*idx];
                    raw.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| DatasetError::NonNumeric {
                            row,
                            column: name.clone(),
                            value: raw.to_string(),
                        })
                })
                .collect::<Result<Vec<f64>, _>>()?;

            features.push(values);
            labels.push(record[label_idx].to_string());
        }

        if features.is_empty() {
            return Err(DatasetError::Empty);
        }

        let feature_names = feature_cols.into_iter().map(|(_, name)| name).collect();
        Self::new(feature_names, features, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct labels in sorted order.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = self.labels.clone();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Copies the given rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}

/// Index columns: a blank header (what a dataframe writes for its index) or one a
/// dataframe reader already renamed to `Unnamed: N`.
fn is_unnamed_column(name: &str) -> bool {
    name.trim().is_empty() || name.starts_with(UNNAMED_COLUMN_PREFIX)
}
