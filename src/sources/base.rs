use crate::models::record::{RawRecord, RecordFilter};
use crate::errors::Result;
use async_trait::async_trait;

/// Base trait for stock record sources
#[async_trait]
pub trait RecordSource {
    /// Name used in logs and error messages
    fn source_name(&self) -> &str;

    /// Fetch records in source order (newest first), optionally filtered
    /// by equality on a single field
    async fn fetch_records(&self, filter: Option<&RecordFilter>) -> Result<Vec<RawRecord>>;
}
