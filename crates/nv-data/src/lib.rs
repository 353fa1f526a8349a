//! Data loading and indexing for the health tour
//!
//! This crate owns the tabular side of the application: the record
//! model, CSV parsing, the country-indexed dataset, and the small
//! config file that points at the input data.

pub mod config;
pub mod index;
pub mod record;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use config::DataConfig;
pub use index::{DatasetIndex, Series};
pub use record::{RawRecord, Record, REFERENCE_COUNTRY};
pub use sources::{CsvSource, RecordSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
