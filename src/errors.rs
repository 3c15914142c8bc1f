use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexChartError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    ArrowError(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IndexChartError {
    /// 是否属于数据源读取失败
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            IndexChartError::IoError(_)
                | IndexChartError::CsvError(_)
                | IndexChartError::RequestError(_)
                | IndexChartError::ArrowError(_)
                | IndexChartError::DataUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, IndexChartError>;

// 用于从字符串创建错误
impl From<String> for IndexChartError {
    fn from(s: String) -> Self {
        IndexChartError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for IndexChartError {
    fn from(s: &str) -> Self {
        IndexChartError::Unknown(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failures_are_data_unavailable() {
        let io = IndexChartError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(io.is_data_unavailable());
        assert!(IndexChartError::DataUnavailable("csv: gone".into()).is_data_unavailable());
        assert!(IndexChartError::ArrowError("bad batch".into()).is_data_unavailable());
    }

    #[test]
    fn test_other_errors_are_not_data_unavailable() {
        assert!(!IndexChartError::ConfigError("no path".into()).is_data_unavailable());
        assert!(!IndexChartError::from("boom").is_data_unavailable());
    }
}
