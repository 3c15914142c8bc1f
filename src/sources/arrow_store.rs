use crate::models::record::{apply_filter, RawRecord, RecordFilter};
use crate::errors::Result;
use crate::sources::base::RecordSource;
use crate::util::arrow_utils;
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

/// Arrow 文件存储的记录集合，每个字段一列字符串
pub struct ArrowStoreSource {
    path: PathBuf,
    name: String,
}

impl ArrowStoreSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("arrow:{}", path.display());
        Self { path, name }
    }

    /// 覆盖写入整个集合
    pub fn save(&self, records: &[RawRecord], fields: &[String]) -> Result<()> {
        arrow_utils::save_records_to_arrow(records, fields, &self.path)
    }
}

#[async_trait]
impl RecordSource for ArrowStoreSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn fetch_records(&self, filter: Option<&RecordFilter>) -> Result<Vec<RawRecord>> {
        let data = tokio::fs::read(&self.path).await?;
        let records = arrow_utils::read_records_from_memory(&data)?;
        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(apply_filter(records, filter))
    }
}
