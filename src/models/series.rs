use serde::{Deserialize, Serialize};
use crate::models::chart::{AxisId, ValueFormat};

/// 字段值的解析规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseRule {
    /// 直接按浮点数解析
    PlainNumber,
    /// 去掉千分位逗号，例如 "1,234.56"
    ThousandsGrouped,
    /// 去掉末尾百分号，例如 "-0.45%"
    PercentSuffixed,
    /// 去掉配置的单位后缀，例如 "12.3M"；数值不做换算
    UnitSuffixed { unit: String },
}

impl ParseRule {
    pub fn unit(unit: impl Into<String>) -> Self {
        ParseRule::UnitSuffixed { unit: unit.into() }
    }
}

/// 视图清单中的一项：从哪个字段取值、如何解析、如何展示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub field: String,
    pub label: String,
    pub rule: ParseRule,
    #[serde(default)]
    pub axis: AxisId,
    #[serde(default)]
    pub format: ValueFormat,
}

impl SeriesSpec {
    /// 价格类序列：千分位解析，主坐标轴
    pub fn price(field: &str) -> Self {
        Self {
            field: field.to_string(),
            label: field.to_string(),
            rule: ParseRule::ThousandsGrouped,
            axis: AxisId::Y,
            format: ValueFormat::Grouped,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_rule(mut self, rule: ParseRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_axis(mut self, axis: AxisId) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }
}

/// 按时间升序排列的数值序列，无法解析的值记为 0.0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSeries {
    pub field: String,
    pub values: Vec<f64>,
}

impl NumericSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 同一批记录抽取出的全部序列，与标签逐位对齐
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedSeries {
    pub labels: Vec<String>,
    pub series: Vec<NumericSeries>,
}

impl ExtractedSeries {
    pub fn get(&self, field: &str) -> Option<&NumericSeries> {
        self.series.iter().find(|s| s.field == field)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// 某个自然月在所有年份上的平均涨跌幅
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub name: String,
    pub average: f64,
    pub count: usize,
}
