//! 将原始记录转换为可绘图的数值序列。
//!
//! 两种视图对缺失字段的处理不同：历史走势视图把缺失或无法解析的值记为 0.0，
//! 保证所有序列与标签逐位对齐；季节性视图在分组前直接剔除不完整的记录。

use chrono::Month;
use log::debug;

use crate::models::record::{RawRecord, RecordFilter};
use crate::models::series::{ExtractedSeries, MonthlyAverage, NumericSeries, ParseRule, SeriesSpec};
use crate::util;

/// 按字段清单抽取序列。输入按日期从新到旧排列，输出统一反转为从旧到新。
pub fn extract_series(records: &[RawRecord], label_field: &str, specs: &[SeriesSpec]) -> ExtractedSeries {
    let labels: Vec<String> = records
        .iter()
        .rev()
        .map(|r| r.get(label_field).unwrap_or_default().trim().to_string())
        .collect();

    let series = specs
        .iter()
        .map(|spec| {
            let mut degraded = 0usize;
            let values: Vec<f64> = records
                .iter()
                .rev()
                .map(|r| match r.get(&spec.field).and_then(|raw| util::parse_value(raw, &spec.rule)) {
                    Some(v) => v,
                    None => {
                        degraded += 1;
                        0.0
                    }
                })
                .collect();

            if degraded > 0 {
                debug!("Series {}: {} of {} values missing or unparseable, zero-filled",
                       spec.field, degraded, values.len());
            }

            NumericSeries {
                field: spec.field.clone(),
                values,
            }
        })
        .collect();

    ExtractedSeries { labels, series }
}

/// 按自然月汇总涨跌幅平均值，不区分年份；结果固定为 1 月到 12 月共 12 项。
///
/// 日期必须是 `月/日/年` 格式，仅校验月份。
pub fn compute_monthly_seasonality(
    records: &[RawRecord],
    date_field: &str,
    change_field: &str,
    filter: Option<&RecordFilter>,
) -> Vec<MonthlyAverage> {
    let mut sums = [0.0f64; 12];
    let mut counts = [0usize; 12];
    let mut excluded = 0usize;

    let candidates = records
        .iter()
        .filter(|r| filter.map_or(true, |f| f.matches(r)));

    for record in candidates {
        let (Some(date), Some(change)) = (record.get_non_empty(date_field), record.get_non_empty(change_field)) else {
            excluded += 1;
            continue;
        };

        let parsed = util::parse_month(date)
            .zip(util::parse_value(change, &ParseRule::PercentSuffixed));
        match parsed {
            Some((month, value)) => {
                sums[(month - 1) as usize] += value;
                counts[(month - 1) as usize] += 1;
            }
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!("Seasonality excluded {} incomplete or malformed records", excluded);
    }

    (1..=12u32)
        .map(|month| {
            let idx = (month - 1) as usize;
            let average = if counts[idx] > 0 {
                util::round2(sums[idx] / counts[idx] as f64)
            } else {
                0.0
            };
            let name = Month::try_from(month as u8)
                .map(|m| m.name().to_string())
                .unwrap_or_default();

            MonthlyAverage {
                month,
                name,
                average,
                count: counts[idx],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord::from_pairs(pairs.iter().copied())
    }

    fn sample_records() -> Vec<RawRecord> {
        vec![
            record(&[("Date", "01/03/2022"), ("Price", "44,596.07"), ("Open", "44,596.07"),
                     ("High", "44,744.87"), ("Low", "44,356.97"), ("Vol", "106.92M"), ("Change %", "-0.04%")]),
            record(&[("Date", "12/31/2021"), ("Price", "44,596.07"),
                     ("High", "44,624.58"), ("Low", "44,241.57"), ("Vol", "125.40M"), ("Change %", "0.75%")]),
            record(&[("Date", "12/30/2021"), ("Price", "44,265.25"), ("Open", "44,100.00"),
                     ("High", "44,300.10"), ("Low", "43,900.40"), ("Vol", "-"), ("Change %", "0.39%")]),
        ]
    }

    #[test]
    fn test_extract_series_reverses_and_aligns() {
        let records = sample_records();
        let view = ViewConfig::file_history();
        let extracted = extract_series(&records, "Date", &view.series);

        assert_eq!(extracted.labels, vec!["12/30/2021", "12/31/2021", "01/03/2022"]);
        assert_eq!(extracted.series.len(), 6);
        for series in &extracted.series {
            assert_eq!(series.len(), extracted.labels.len());
        }

        let price = extracted.get("Price").unwrap();
        assert_eq!(price.values, vec![44265.25, 44596.07, 44596.07]);
        let vol = extracted.get("Vol").unwrap();
        assert_eq!(vol.values, vec![0.0, 125.40, 106.92]);
        let change = extracted.get("Change %").unwrap();
        assert_eq!(change.values, vec![0.39, 0.75, -0.04]);
    }

    #[test]
    fn test_missing_field_is_zero_filled_not_dropped() {
        let records = sample_records();
        let extracted = extract_series(&records, "Date", &ViewConfig::store_history().series);

        let open = extracted.get("Open").unwrap();
        assert_eq!(open.values, vec![44100.0, 0.0, 44596.07]);
        assert_eq!(extracted.len(), 3);
    }

    #[test]
    fn test_reversal_round_trip() {
        let records = sample_records();
        let extracted = extract_series(&records, "Date", &ViewConfig::file_history().series);

        let mut labels = extracted.labels.clone();
        labels.reverse();
        let original: Vec<String> = records.iter().map(|r| r.get("Date").unwrap().to_string()).collect();
        assert_eq!(labels, original);
    }

    #[test]
    fn test_extract_empty_records() {
        let extracted = extract_series(&[], "Date", &ViewConfig::file_history().series);
        assert!(extracted.is_empty());
        assert_eq!(extracted.series.len(), 6);
        assert!(extracted.series.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_seasonality_groups_across_years() {
        let records = vec![
            record(&[("Date", "1/15/2020"), ("Change %", "2.00%")]),
            record(&[("Date", "1/20/2021"), ("Change %", "4.00%")]),
            record(&[("Date", "2/1/2020"), ("Change %", "-1.00%")]),
        ];

        let months = compute_monthly_seasonality(&records, "Date", "Change %", None);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].name, "January");
        assert_eq!(months[0].average, 3.00);
        assert_eq!(months[0].count, 2);
        assert_eq!(months[1].name, "February");
        assert_eq!(months[1].average, -1.00);
        assert!(months[2..].iter().all(|m| m.average == 0.0 && m.count == 0));
        assert_eq!(months[11].name, "December");
        let order: Vec<u32> = months.iter().map(|m| m.month).collect();
        assert_eq!(order, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_seasonality_excludes_incomplete_records() {
        let records = sample_records();
        let mut with_gap = records.clone();
        with_gap.push(record(&[("Date", "3/2/2021"), ("Price", "40,000.00"), ("Open", "39,000.00")]));
        with_gap.push(record(&[("Date", "3/3/2021"), ("Change %", "")]));
        with_gap.push(record(&[("Date", "13/3/2021"), ("Change %", "5%")]));
        with_gap.push(record(&[("Date", "3/4/2021"), ("Change %", "n/a")]));

        let months = compute_monthly_seasonality(&with_gap, "Date", "Change %", None);
        assert_eq!(months[2].count, 0);
        assert_eq!(months[0].count, 1);
        assert_eq!(months[11].count, 2);
        assert_eq!(months[11].average, 0.57);

        // 同一批数据在历史视图中仍保留全部记录
        let extracted = extract_series(&with_gap, "Date", &ViewConfig::store_history().series);
        assert_eq!(extracted.len(), with_gap.len());
    }

    #[test]
    fn test_seasonality_filter() {
        let records = vec![
            record(&[("Symbol", "KSE100"), ("Date", "5/1/2020"), ("Change %", "1.50%")]),
            record(&[("Symbol", "KSE30"), ("Date", "5/2/2020"), ("Change %", "9.00%")]),
        ];

        let kse100 = RecordFilter::new("Symbol", "KSE100");
        let months = compute_monthly_seasonality(&records, "Date", "Change %", Some(&kse100));
        assert_eq!(months[4].average, 1.5);

        let unknown = RecordFilter::new("Symbol", "NOPE");
        let months = compute_monthly_seasonality(&records, "Date", "Change %", Some(&unknown));
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.average == 0.0));
    }
}
