use crate::config::{Config, SourceKind};
use crate::errors::{Result, IndexChartError};
use crate::models::chart::ChartDefinition;
use crate::models::record::{RawRecord, RecordFilter};
use crate::models::series::MonthlyAverage;
use crate::services::{chart_builder, transformer};
use crate::sources::arrow_store::ArrowStoreSource;
use crate::sources::base::RecordSource;
use crate::sources::csv_file::{CsvFileSource, INVESTING_COM_HEADERS};
use crate::sources::remote::RemoteCsvSource;
use log::{info, warn};
use std::sync::Arc;

/// 图表服务：读取记录、转换序列、组装图表配置。
///
/// 每次请求都重新读取数据源，不缓存任何中间结果。
pub struct ChartService {
    config: Config,
    source: Arc<dyn RecordSource + Send + Sync>,
}

impl ChartService {
    pub fn new(config: Config, source: Arc<dyn RecordSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    /// 按配置中的数据源类型创建服务
    pub fn from_config(config: Config) -> Result<Self> {
        let source: Arc<dyn RecordSource + Send + Sync> = match &config.source {
            SourceKind::CsvFile { path } => Arc::new(CsvFileSource::investing_com(path)),
            SourceKind::ArrowStore { path } => Arc::new(ArrowStoreSource::new(path)),
            SourceKind::Remote { url } => Arc::new(
                RemoteCsvSource::new(url)?
                    .with_headers(INVESTING_COM_HEADERS.iter().map(|h| h.to_string()).collect()),
            ),
        };
        Ok(Self::new(config, source))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn symbol_filter(&self, symbol: Option<&str>) -> Option<RecordFilter> {
        symbol.map(|s| RecordFilter::new(self.config.symbol_field(), s))
    }

    // 数据源失败统一报告为 DataUnavailable，不生成部分图表
    async fn fetch(&self, filter: Option<&RecordFilter>) -> Result<Vec<RawRecord>> {
        let records = self
            .source
            .fetch_records(filter)
            .await
            .map_err(|e| IndexChartError::DataUnavailable(format!("{}: {}", self.source.source_name(), e)))?;

        if records.is_empty() {
            warn!("No records returned from {}", self.source.source_name());
        }
        Ok(records)
    }

    /// 多序列历史走势图
    pub async fn history_chart(&self, symbol: Option<&str>) -> Result<ChartDefinition> {
        let filter = self.symbol_filter(symbol);
        let records = self.fetch(filter.as_ref()).await?;

        let view = self.config.history_view();
        let extracted = transformer::extract_series(&records, &self.config.date_field, &view.series);
        info!("History view: {} points, {} series", extracted.len(), extracted.series.len());

        Ok(chart_builder::build_history_chart(&self.config.title, &extracted, &view.series))
    }

    /// 按月平均涨跌幅，固定 12 项
    pub async fn seasonality(&self, symbol: Option<&str>) -> Result<Vec<MonthlyAverage>> {
        let filter = self.symbol_filter(symbol);
        let records = self.fetch(None).await?;

        let season = &self.config.seasonality;
        Ok(transformer::compute_monthly_seasonality(
            &records,
            &season.date_field,
            &season.change_field,
            filter.as_ref(),
        ))
    }

    /// 季节性图
    pub async fn seasonality_chart(&self, symbol: Option<&str>) -> Result<ChartDefinition> {
        let months = self.seasonality(symbol).await?;
        Ok(self.seasonality_chart_for(&months))
    }

    /// 用已计算的月度平均值组装季节性图
    pub fn seasonality_chart_for(&self, months: &[MonthlyAverage]) -> ChartDefinition {
        let title = format!("{} - Monthly Seasonality", self.config.title);
        chart_builder::build_seasonality_chart(&title, &self.config.seasonality.label, months)
    }
}
