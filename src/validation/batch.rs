use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::embedding::Embedder;

use super::error::ValidationError;
use super::heuristic::Validator;
use super::types::{QueryLogEntry, ValidationResult};

/// Header row of the validation output.
pub const OUTPUT_HEADER: [&str; 4] = ["coin", "query", "status", "answers"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counts for one batch run.
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let valid = results.iter().filter(|r| r.status.is_valid()).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }
}

/// Reads the query-log JSON array.
pub fn load_query_logs(path: &Path) -> Result<Vec<QueryLogEntry>, ValidationError> {
    let file = File::open(path).map_err(|source| ValidationError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<QueryLogEntry> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ValidationError::MalformedLogs {
                path: path.to_path_buf(),
                source,
            }
        })?;

    debug!(path = %path.display(), entries = entries.len(), "Loaded query logs");
    Ok(entries)
}

/// Validates every entry, preserving input order.
pub fn validate_entries<E: Embedder>(
    validator: &Validator<E>,
    entries: Vec<QueryLogEntry>,
) -> Result<Vec<ValidationResult>, ValidationError> {
    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let status = validator.validate(&entry)?;
        results.push(ValidationResult::new(entry, status));
    }
    Ok(results)
}

/// Writes results as CSV with the answers column flattened to the first answer's text.
pub fn write_validation_results(
    path: &Path,
    results: &[ValidationResult],
) -> Result<(), ValidationError> {
    let write_err = |source: csv::Error| ValidationError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(OUTPUT_HEADER).map_err(write_err)?;

    for result in results {
        writer
            .write_record([
                result.coin.as_str(),
                result.query.as_str(),
                result.status.as_str(),
                result.answers_cell().as_str(),
            ])
            .map_err(write_err)?;
    }

    writer.flush().map_err(|e| write_err(e.into()))?;
    Ok(())
}

/// Loads the configured query logs, validates them, and writes the result table.
pub fn run_validation<E: Embedder>(
    config: &Config,
    validator: &Validator<E>,
) -> Result<ValidationSummary, ValidationError> {
    info!(
        input = %config.query_logs_path.display(),
        threshold = validator.threshold(),
        "Starting query validation"
    );

    let entries = load_query_logs(&config.query_logs_path)?;
    let results = validate_entries(validator, entries)?;
    write_validation_results(&config.validation_output_path, &results)?;

    let summary = ValidationSummary::from_results(&results);
    info!(
        output = %config.validation_output_path.display(),
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        "Validation results written"
    );

    Ok(summary)
}
