//! Query-log validity checking.
//!
//! [`Validator`] decides one entry at a time; [`run_validation`] drives a whole
//! query-log file through it and writes `coin,query,status,answers` rows in input
//! order. The answers column keeps only the first answer's text.

pub mod batch;
pub mod error;
pub mod heuristic;
pub mod types;


pub use batch::{
    OUTPUT_HEADER, ValidationSummary, load_query_logs, run_validation, validate_entries,
    write_validation_results,
};
pub use error::ValidationError;
pub use heuristic::Validator;
pub use types::{
    Answer, DecisionRule, EntryAssessment, QueryLogEntry, ValidationResult, ValidationStatus,
};
