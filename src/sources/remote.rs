use crate::models::record::{apply_filter, RawRecord, RecordFilter};
use crate::errors::{Result, IndexChartError};
use crate::sources::base::RecordSource;
use crate::sources::csv_file::parse_csv;
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::time::Duration;

/// 通过 HTTP 下载的 CSV 数据源
pub struct RemoteCsvSource {
    client: Client,
    url: String,
    headers: Option<Vec<String>>,
}

impl RemoteCsvSource {
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_client(client, url))
    }

    /// 使用调用方配置好的客户端
    pub fn with_client(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            headers: None,
        }
    }

    /// 跳过下载内容的第一行，使用给定列名
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

#[async_trait]
impl RecordSource for RemoteCsvSource {
    fn source_name(&self) -> &str {
        &self.url
    }

    async fn fetch_records(&self, filter: Option<&RecordFilter>) -> Result<Vec<RawRecord>> {
        info!("Downloading records from: {}", self.url);

        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(IndexChartError::DataUnavailable(format!(
                "Failed to download {}: HTTP status {}", self.url, resp.status()
            )));
        }

        let bytes = resp.bytes().await?;
        let records = parse_csv(&bytes, self.headers.as_deref())?;
        info!("Downloaded {} records", records.len());
        Ok(apply_filter(records, filter))
    }
}
