use crate::errors::{Result, IndexChartError};
use crate::models::chart::{AxisId, ValueFormat};
use crate::models::series::{ParseRule, SeriesSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Karachi 100 Historical Data";
pub const DEFAULT_CSV_PATH: &str = "dataset/Karachi 100 Historical Data.csv";
pub const DEFAULT_STORE_PATH: &str = "data/k100.arrow";

/// 记录来源
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    CsvFile { path: PathBuf },
    ArrowStore { path: PathBuf },
    Remote { url: String },
}

impl SourceKind {
    /// 按命令行参数选择数据源；未给路径时使用该类数据源的默认文件
    pub fn from_args(kind: &str, path: Option<&str>, url: Option<&str>) -> Result<Self> {
        match kind.to_lowercase().as_str() {
            "csv" => Ok(SourceKind::CsvFile {
                path: PathBuf::from(path.unwrap_or(DEFAULT_CSV_PATH)),
            }),
            "arrow" => Ok(SourceKind::ArrowStore {
                path: PathBuf::from(path.unwrap_or(DEFAULT_STORE_PATH)),
            }),
            "remote" => url
                .map(|url| SourceKind::Remote { url: url.to_string() })
                .ok_or_else(|| IndexChartError::ConfigError("--url is required for the remote source".to_string())),
            other => Err(IndexChartError::ConfigError(format!("Unknown source: {}", other))),
        }
    }
}

/// 历史走势视图的字段清单，增删跟踪字段只需修改配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub series: Vec<SeriesSpec>,
}

impl ViewConfig {
    /// CSV 文件数据源：包含成交量，共 6 条序列
    pub fn file_history() -> Self {
        Self {
            series: vec![
                SeriesSpec::price("Price"),
                SeriesSpec::price("Open"),
                SeriesSpec::price("High"),
                SeriesSpec::price("Low"),
                SeriesSpec::price("Vol")
                    .with_label("Volume (Millions)")
                    .with_rule(ParseRule::unit("M"))
                    .with_axis(AxisId::Y1)
                    .with_format(ValueFormat::Millions),
                Self::change_spec(),
            ],
        }
    }

    /// Arrow 存储数据源：没有成交量，共 5 条序列
    pub fn store_history() -> Self {
        Self {
            series: vec![
                SeriesSpec::price("Price"),
                SeriesSpec::price("Open"),
                SeriesSpec::price("High"),
                SeriesSpec::price("Low"),
                Self::change_spec(),
            ],
        }
    }

    fn change_spec() -> SeriesSpec {
        SeriesSpec::price("Change %")
            .with_rule(ParseRule::PercentSuffixed)
            .with_axis(AxisId::Y2)
            .with_format(ValueFormat::Percent)
    }

    pub fn fields(&self) -> Vec<String> {
        self.series.iter().map(|s| s.field.clone()).collect()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        if config.series.is_empty() {
            return Err(IndexChartError::ConfigError("view config has no series".to_string()));
        }

        // 提示框格式按名称索引，名称必须唯一
        let mut labels = HashSet::new();
        for spec in &config.series {
            if !labels.insert(spec.label.as_str()) {
                return Err(IndexChartError::ConfigError(format!(
                    "duplicate series label in view config: {}", spec.label
                )));
            }
        }
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// 季节性视图的字段配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityConfig {
    pub date_field: String,
    pub change_field: String,
    pub label: String,
    pub symbol_field: String,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            date_field: "Date".to_string(),
            change_field: "Change %".to_string(),
            label: "Average Change %".to_string(),
            symbol_field: "Symbol".to_string(),
        }
    }
}

pub struct Config {
    pub title: String,
    pub source: SourceKind,
    /// 未显式设置时按数据源选择预设清单
    pub history_view: Option<ViewConfig>,
    pub seasonality: SeasonalityConfig,
    pub date_field: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            source: SourceKind::CsvFile {
                path: PathBuf::from(DEFAULT_CSV_PATH),
            },
            history_view: None,
            seasonality: SeasonalityConfig::default(),
            date_field: "Date".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    pub fn with_history_view(mut self, view: ViewConfig) -> Self {
        self.history_view = Some(view);
        self
    }

    /// 实际使用的历史视图清单：显式设置优先，否则取数据源对应的预设
    pub fn history_view(&self) -> ViewConfig {
        match (&self.history_view, &self.source) {
            (Some(view), _) => view.clone(),
            (None, SourceKind::ArrowStore { .. }) => ViewConfig::store_history(),
            (None, _) => ViewConfig::file_history(),
        }
    }

    pub fn with_seasonality(mut self, seasonality: SeasonalityConfig) -> Self {
        self.seasonality = seasonality;
        self
    }

    pub fn with_date_field(mut self, field: &str) -> Self {
        self.date_field = field.to_string();
        self
    }

    /// 按指数代码筛选时使用的字段
    pub fn symbol_field(&self) -> &str {
        &self.seasonality.symbol_field
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
