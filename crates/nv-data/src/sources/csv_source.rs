//! CSV data source

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{debug, info};

use super::RecordSource;
use crate::config::DataConfig;
use crate::record::{RawRecord, Record};
use crate::DataError;

/// CSV data source for loading the tour dataset
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Field delimiter
    delimiter: u8,
    /// Display name for logs and events
    name: String,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        Self {
            path,
            delimiter: b',',
            name,
        }
    }

    /// Create a source from a data config
    pub fn from_config(config: &DataConfig) -> Self {
        let mut source = Self::new(config.path.clone());
        source.delimiter = config.delimiter_byte();
        source
    }

    /// Parse records from any CSV reader.
    ///
    /// The header row is required; rows with missing columns or values
    /// that fail coercion abort the whole parse.
    pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Record>, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<RawRecord>() {
            let raw = result?;
            records.push(Record::from_raw(&raw)?);
        }
        debug!("Parsed {} CSV records", records.len());
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    async fn load(&self) -> Result<Vec<Record>, DataError> {
        let path = self.path.clone();
        let delimiter = self.delimiter;
        info!("Loading dataset from {}", path.display());

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            Self::read_records(BufReader::new(file), delimiter)
        })
        .await?
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
