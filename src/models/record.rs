use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一行原始行情数据，字段名到字符串值的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 (字段, 值) 列表构建
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// 字段存在且去除空白后非空
    pub fn get_non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 单字段等值过滤条件，例如按指数代码筛选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub field: String,
    pub value: String,
}

impl RecordFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// 缺少该字段的记录不匹配
    pub fn matches(&self, record: &RawRecord) -> bool {
        record.get(&self.field).map(str::trim) == Some(self.value.as_str())
    }
}

/// 按可选过滤条件筛选记录，保持原有顺序
pub fn apply_filter(records: Vec<RawRecord>, filter: Option<&RecordFilter>) -> Vec<RawRecord> {
    match filter {
        Some(filter) => records.into_iter().filter(|r| filter.matches(r)).collect(),
        None => records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_non_empty_skips_blank_values() {
        let record = RawRecord::from_pairs([("Date", "1/15/2020"), ("Vol", "  ")]);
        assert_eq!(record.get_non_empty("Date"), Some("1/15/2020"));
        assert_eq!(record.get_non_empty("Vol"), None);
        assert_eq!(record.get_non_empty("Open"), None);
    }

    #[test]
    fn test_filter_requires_field() {
        let filter = RecordFilter::new("Symbol", "KSE100");
        let records = vec![
            RawRecord::from_pairs([("Symbol", "KSE100"), ("Price", "1")]),
            RawRecord::from_pairs([("Symbol", "KSE30"), ("Price", "2")]),
            RawRecord::from_pairs([("Price", "3")]),
        ];

        let kept = apply_filter(records, Some(&filter));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].get("Price"), Some("1"));
    }
}
