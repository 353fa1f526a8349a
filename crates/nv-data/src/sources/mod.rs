//! Data sources that produce records for indexing

mod csv_source;

pub use csv_source::CsvSource;

use async_trait::async_trait;

use crate::record::Record;
use crate::DataError;

/// Trait for sources of dataset records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every record this source provides
    async fn load(&self) -> Result<Vec<Record>, DataError>;

    /// Get the source name for logs and events
    fn source_name(&self) -> &str;
}
