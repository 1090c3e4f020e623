//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use cryptosights::config::Config;
use cryptosights::embedding::{Embedder, EmbeddingError};

/// Config with every input and output redirected into `dir`.
pub fn config_in(dir: &Path) -> Config {
    Config {
        query_logs_path: dir.join("query_logs.json"),
        validation_output_path: dir.join("validation_results.csv"),
        vectorised_path: dir.join("vectorised.csv"),
        confusion_matrix_path: dir.join("confusion_matrix.png"),
        predictions_path: dir.join("predictions.csv"),
        ..Config::default()
    }
}

pub fn write_file(path: &Path, body: &str) -> PathBuf {
    std::fs::write(path, body).unwrap();
    path.to_path_buf()
}

/// Reads a CSV into header plus rows of owned strings.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

/// Writes a `vectorised.csv` the way a dataframe's `to_csv` does: a leading index
/// column with a blank header, `n_features` features and a trailing `status` label.
/// Rows cycle through `labels`; each label owns a well-separated cluster so every
/// model can fit the data exactly.
pub fn write_clustered_dataset(path: &Path, rows: usize, n_features: usize, labels: &[&str]) {
    let mut writer = csv::Writer::from_path(path).unwrap();

    let mut header = vec![String::new()];
    header.extend((0..n_features).map(|f| f.to_string()));
    header.push("status".into());
    writer.write_record(&header).unwrap();

    for row in 0..rows {
        let class = row % labels.len();
        let mut record = vec![row.to_string()];
        for f in 0..n_features {
            let centre = if f % labels.len() == class { 4.0 } else { 0.0 };
            let jitter = ((row * 7 + f * 3) % 10) as f64 * 0.05;
            record.push(format!("{}", centre + jitter));
        }
        record.push(labels[class].to_string());
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
}

/// Embeds by synonym group: texts mentioning any word of a group share that
/// group's axis.
pub struct KeywordEmbedder {
    groups: Vec<Vec<&'static str>>,
}

impl KeywordEmbedder {
    pub fn new(groups: &[&[&'static str]]) -> Self {
        Self {
            groups: groups.iter().map(|g| g.to_vec()).collect(),
        }
    }
}

impl Embedder for KeywordEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                let mut v: Vec<f32> = self
                    .groups
                    .iter()
                    .map(|g| if g.iter().any(|w| lower.contains(w)) { 1.0 } else { 0.0 })
                    .collect();
                // Unmatched texts point along a private axis.
                v.push(if v.iter().all(|x| *x == 0.0) { 1.0 } else { 0.0 });
                v
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.groups.len() + 1
    }
}
