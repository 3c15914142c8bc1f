use crate::errors::Result;
use crate::models::chart::ChartDefinition;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

// 提示框回调按 formats 中的格式渲染数值
const TOOLTIP_SCRIPT: &str = r#"
const formats = config.options.plugins.tooltip.formats || {};
config.options.plugins.tooltip.callbacks = {
    label: function(context) {
        const name = context.dataset.label || '';
        const kind = formats[name] || 'grouped';
        let value;
        if (kind === 'millions') {
            value = context.raw.toFixed(2) + 'M';
        } else if (kind === 'percent') {
            value = context.raw.toFixed(2) + '%';
        } else {
            value = context.raw.toLocaleString();
        }
        return name ? name + ': ' + value : value;
    }
};
new Chart(document.getElementById('chart'), config);
"#;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 生成嵌入图表配置的独立 HTML 页面
pub fn render_html(title: &str, chart: &ChartDefinition) -> Result<String> {
    // 防止配置中的字符串提前结束 script 标签
    let config_json = chart.to_json()?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{cdn}"></script>
</head>
<body>
    <h1>{title}</h1>
    <canvas id="chart" width="800" height="600"></canvas>
    <script>
const config = {config};
{script}
    </script>
</body>
</html>
"#,
        title = escape_html(title),
        cdn = CHART_JS_CDN,
        config = config_json,
        script = TOOLTIP_SCRIPT,
    ))
}
