// 公开导出的模块，供外部使用
pub mod models;
pub mod sources;
pub mod services;
pub mod errors;
pub mod config;

// 解析工具主要供内部使用
#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::record::{RawRecord, RecordFilter};
pub use models::series::{ParseRule, SeriesSpec, NumericSeries, ExtractedSeries, MonthlyAverage};
pub use models::chart::{ChartDefinition, AxisId, ValueFormat};
pub use sources::base::RecordSource;
pub use services::chart_service::ChartService;
pub use config::{Config, SourceKind, ViewConfig, SeasonalityConfig};
pub use errors::{Result, IndexChartError};
