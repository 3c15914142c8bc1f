use std::collections::BTreeMap;

use crate::models::chart::{
    Axis, AxisId, AxisPosition, ChartData, ChartDefinition, ChartOptions, ChartType, Dataset, Grid,
    Interaction, Plugins, Scales, Title, Tooltip, ValueFormat,
};
use crate::models::series::{ExtractedSeries, MonthlyAverage, NumericSeries, SeriesSpec};

/// 折线平滑系数
pub const LINE_TENSION: f64 = 0.1;

/// 数据集颜色，按顺序循环使用
pub const PALETTE: [&str; 6] = [
    "rgb(75, 192, 192)",
    "rgb(54, 162, 235)",
    "rgb(255, 99, 132)",
    "rgb(153, 102, 255)",
    "rgb(255, 159, 64)",
    "rgb(201, 203, 207)",
];

/// 构建一个数据集所需的输入
#[derive(Debug, Clone, Copy)]
pub struct DatasetInput<'a> {
    pub label: &'a str,
    pub series: &'a [f64],
    pub axis: AxisId,
    pub format: ValueFormat,
}

impl<'a> DatasetInput<'a> {
    pub fn new(label: &'a str, series: &'a NumericSeries, axis: AxisId, format: ValueFormat) -> Self {
        Self {
            label,
            series: &series.values,
            axis,
            format,
        }
    }
}

/// 组装图表配置，不做任何数值计算，也不修改输入
pub fn build_chart(title: &str, labels: &[String], inputs: &[DatasetInput<'_>]) -> ChartDefinition {
    let datasets: Vec<Dataset> = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| Dataset {
            label: input.label.to_string(),
            data: input.series.to_vec(),
            border_color: PALETTE[i % PALETTE.len()].to_string(),
            tension: LINE_TENSION,
            y_axis_id: input.axis,
            format: input.format,
        })
        .collect();

    let formats: BTreeMap<String, ValueFormat> = datasets
        .iter()
        .map(|d| (d.label.clone(), d.format))
        .collect();

    let primary_title = axis_title(inputs, AxisId::Y).unwrap_or_else(|| title.to_string());
    let scales = Scales {
        y: Axis {
            axis_type: "linear".to_string(),
            display: true,
            position: AxisPosition::Left,
            grid: None,
            title: Title::new(&primary_title),
            offset: None,
        },
        y1: axis_title(inputs, AxisId::Y1).map(|t| secondary_axis(&t, false)),
        y2: axis_title(inputs, AxisId::Y2).map(|t| secondary_axis(&t, true)),
    };

    ChartDefinition {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: labels.to_vec(),
            datasets,
        },
        options: ChartOptions {
            responsive: true,
            interaction: Interaction::default(),
            plugins: Plugins {
                title: Title::new(title),
                tooltip: Tooltip { formats },
            },
            scales,
        },
    }
}

// 坐标轴标题取绑定到该轴的数据集名称；没有数据集时不生成该轴
fn axis_title(inputs: &[DatasetInput<'_>], axis: AxisId) -> Option<String> {
    let labels: Vec<&str> = inputs
        .iter()
        .filter(|input| input.axis == axis)
        .map(|input| input.label)
        .collect();

    (!labels.is_empty()).then(|| labels.join("/"))
}

fn secondary_axis(title: &str, offset: bool) -> Axis {
    Axis {
        axis_type: "linear".to_string(),
        display: true,
        position: AxisPosition::Right,
        grid: Some(Grid { draw_on_chart_area: false }),
        title: Title::new(title),
        offset: offset.then_some(true),
    }
}

/// 历史走势图：每个清单项一个数据集
pub fn build_history_chart(title: &str, extracted: &ExtractedSeries, specs: &[SeriesSpec]) -> ChartDefinition {
    let inputs: Vec<DatasetInput<'_>> = specs
        .iter()
        .filter_map(|spec| {
            extracted
                .get(&spec.field)
                .map(|series| DatasetInput::new(&spec.label, series, spec.axis, spec.format))
        })
        .collect();

    build_chart(title, &extracted.labels, &inputs)
}

/// 季节性图：12 个月份标签，一条平均涨跌幅序列
pub fn build_seasonality_chart(title: &str, label: &str, months: &[MonthlyAverage]) -> ChartDefinition {
    let labels: Vec<String> = months.iter().map(|m| m.name.clone()).collect();
    let values: Vec<f64> = months.iter().map(|m| m.average).collect();

    let input = DatasetInput {
        label,
        series: &values,
        axis: AxisId::Y,
        format: ValueFormat::Percent,
    };

    build_chart(title, &labels, &[input])
}
