use crate::models::record::{apply_filter, RawRecord, RecordFilter};
use crate::errors::Result;
use crate::sources::base::RecordSource;
use async_trait::async_trait;
use csv::ReaderBuilder;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Investing.com 导出文件的列名
pub const INVESTING_COM_HEADERS: [&str; 7] = ["Date", "Price", "Open", "High", "Low", "Vol", "Change %"];

/// 本地 CSV 文件数据源
pub struct CsvFileSource {
    path: PathBuf,
    headers: Option<Vec<String>>,
    name: String,
}

impl CsvFileSource {
    /// 使用文件自带的表头
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("csv:{}", path.display());
        Self { path, headers: None, name }
    }

    /// 跳过文件表头，改用 Investing.com 列名
    pub fn investing_com<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path).with_headers(INVESTING_COM_HEADERS.iter().map(|h| h.to_string()).collect())
    }

    /// 跳过文件第一行，使用给定列名
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// 解析 CSV 内容为记录；空单元格按缺失字段处理
pub fn parse_csv(data: &[u8], headers: Option<&[String]>) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns: Vec<String> = match headers {
        Some(headers) => headers.to_vec(),
        None => reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect(),
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        let record = RawRecord::from_pairs(
            columns
                .iter()
                .zip(row.iter())
                .filter(|(_, value)| !value.is_empty())
                .map(|(column, value)| (column.as_str(), value)),
        );
        records.push(record);
    }

    debug!("Parsed {} CSV rows with columns {:?}", records.len(), columns);
    Ok(records)
}

#[async_trait]
impl RecordSource for CsvFileSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn fetch_records(&self, filter: Option<&RecordFilter>) -> Result<Vec<RawRecord>> {
        let data = tokio::fs::read(&self.path).await?;
        let records = parse_csv(&data, self.headers.as_deref())?;
        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(apply_filter(records, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\"Date\",\"Price\",\"Open\",\"High\",\"Low\",\"Vol.\",\"Change %\"\n\
\"01/03/2022\",\"44,596.07\",\"44,596.07\",\"44,744.87\",\"44,356.97\",\"106.92M\",\"-0.04%\"\n\
\"12/31/2021\",\"44,596.07\",\"44,265.25\",\"44,624.58\",\"44,241.57\",\"125.40M\",\"0.75%\"\n\
\n";

    #[test]
    fn test_parse_with_file_headers() {
        let records = parse_csv(SAMPLE.as_bytes(), None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Date"), Some("01/03/2022"));
        assert_eq!(records[0].get("Vol."), Some("106.92M"));
    }

    #[test]
    fn test_parse_with_header_override() {
        let headers: Vec<String> = INVESTING_COM_HEADERS.iter().map(|h| h.to_string()).collect();
        let records = parse_csv(SAMPLE.as_bytes(), Some(&headers)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Vol"), Some("125.40M"));
        assert_eq!(records[1].get("Change %"), Some("0.75%"));
    }

    #[test]
    fn test_short_rows_leave_fields_missing() {
        let data = "Date,Price,Open\n1/2/2020,\"1,000\"\n1/1/2020,,5\n";
        let records = parse_csv(data.as_bytes(), None).unwrap();
        assert_eq!(records[0].get("Open"), None);
        assert_eq!(records[1].get("Price"), None);
        assert_eq!(records[1].get("Open"), Some("5"));
    }
}
