//! 前端图表库使用的图表配置结构。
//!
//! 序列化后的字段名和层级是与前端约定的格式，修改时需保持兼容。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
}

/// 坐标轴编号：y 为主轴，y1/y2 为右侧副轴
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    #[default]
    Y,
    Y1,
    Y2,
}

/// 提示框中数值的展示方式，在构建数据集时显式指定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// 千分位分组，最多三位小数
    #[default]
    Grouped,
    /// 两位小数加 "M"
    Millions,
    /// 两位小数加 "%"
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Millions => format!("{:.2}M", value),
            ValueFormat::Percent => format!("{:.2}%", value),
            ValueFormat::Grouped => format_grouped(value),
        }
    }
}

fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && rounded.chars().any(|c| c != '0' && c != '.');
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChartDefinitionRepr")]
pub struct ChartDefinition {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

// 反序列化时数据集的格式从 options.plugins.tooltip.formats 还原
#[derive(Deserialize)]
struct ChartDefinitionRepr {
    #[serde(rename = "type")]
    chart_type: ChartType,
    data: ChartData,
    options: ChartOptions,
}

impl From<ChartDefinitionRepr> for ChartDefinition {
    fn from(repr: ChartDefinitionRepr) -> Self {
        let ChartDefinitionRepr { chart_type, mut data, options } = repr;
        for dataset in &mut data.datasets {
            if let Some(format) = options.plugins.tooltip.formats.get(&dataset.label) {
                dataset.format = *format;
            }
        }

        Self {
            chart_type,
            data,
            options,
        }
    }
}

impl ChartDefinition {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.data.datasets.iter().find(|d| d.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub tension: f64,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: AxisId,
    /// 输出在 options.plugins.tooltip.formats 中
    #[serde(skip)]
    pub format: ValueFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub interaction: Interaction,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            mode: "index".to_string(),
            intersect: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub title: Title,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

/// 按数据集名称索引的提示框格式
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub formats: BTreeMap<String, ValueFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub y: Axis,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub y1: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub y2: Option<Axis>,
}

impl Scales {
    pub fn get(&self, id: AxisId) -> Option<&Axis> {
        match id {
            AxisId::Y => Some(&self.y),
            AxisId::Y1 => self.y1.as_ref(),
            AxisId::Y2 => self.y2.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: String,
    pub display: bool,
    pub position: AxisPosition,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub grid: Option<Grid>,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offset: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_format() {
        assert_eq!(ValueFormat::Millions.format(12.3), "12.30M");
        assert_eq!(ValueFormat::Percent.format(-0.45), "-0.45%");
        assert_eq!(ValueFormat::Grouped.format(1234.56), "1,234.56");
        assert_eq!(ValueFormat::Grouped.format(41234.0), "41,234");
        assert_eq!(ValueFormat::Grouped.format(-1234567.1239), "-1,234,567.124");
        assert_eq!(ValueFormat::Grouped.format(999.9999), "1,000");
        assert_eq!(ValueFormat::Grouped.format(-0.0001), "0");
    }

    #[test]
    fn test_json_round_trip_keeps_formats() {
        let json = r#"{
            "type": "line",
            "data": {
                "labels": ["12/31/2021"],
                "datasets": [
                    {"label": "Price", "data": [44596.07], "borderColor": "rgb(75, 192, 192)", "tension": 0.1, "yAxisID": "y"},
                    {"label": "Change %", "data": [0.75], "borderColor": "rgb(201, 203, 207)", "tension": 0.1, "yAxisID": "y2"}
                ]
            },
            "options": {
                "responsive": true,
                "interaction": {"mode": "index", "intersect": false},
                "plugins": {
                    "title": {"display": true, "text": "K100"},
                    "tooltip": {"formats": {"Price": "grouped", "Change %": "percent"}}
                },
                "scales": {
                    "y": {"type": "linear", "display": true, "position": "left", "title": {"display": true, "text": "Price"}},
                    "y2": {"type": "linear", "display": true, "position": "right", "grid": {"drawOnChartArea": false},
                           "title": {"display": true, "text": "Change %"}, "offset": true}
                }
            }
        }"#;

        let chart: ChartDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(chart.dataset("Change %").unwrap().format, ValueFormat::Percent);
        assert_eq!(chart.dataset("Price").unwrap().format, ValueFormat::Grouped);

        let back: ChartDefinition = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
        assert_eq!(back, chart);
    }

    #[test]
    fn test_axis_id_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AxisId::Y1).unwrap(), "\"y1\"");
        assert_eq!(serde_json::from_str::<AxisId>("\"y2\"").unwrap(), AxisId::Y2);
    }
}
