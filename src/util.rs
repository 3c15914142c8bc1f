use log::debug;
use crate::models::series::ParseRule;

// 数值解析：失败或非有限值时返回 None，由调用方决定默认值
pub fn parse_value(raw: &str, rule: &ParseRule) -> Option<f64> {
    let trimmed = raw.trim();
    let cleaned = match rule {
        ParseRule::PlainNumber => trimmed.to_string(),
        ParseRule::ThousandsGrouped => trimmed.replace(',', ""),
        ParseRule::PercentSuffixed => trimmed
            .strip_suffix('%')
            .unwrap_or(trimmed)
            .trim_end()
            .replace(',', ""),
        ParseRule::UnitSuffixed { unit } => trimmed
            .strip_suffix(unit.as_str())
            .unwrap_or(trimmed)
            .trim_end()
            .replace(',', ""),
    };

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// 解析失败时退化为 0.0，保证序列长度不变
pub fn parse_or_zero(raw: &str, rule: &ParseRule) -> f64 {
    parse_value(raw, rule).unwrap_or_else(|| {
        debug!("Unparseable value {:?} under {:?}, using 0.0", raw, rule);
        0.0
    })
}

// 从 "月/日/年" 格式的日期中取月份；月份不在 1-12 时返回 None
// 日和年不做校验，非美式日期格式不受支持
pub fn parse_month(date_str: &str) -> Option<u32> {
    let parts: Vec<&str> = date_str.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let month = parts[0].trim().parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some(month)
}

// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Arrow数据转换工具
pub mod arrow_utils {
    use crate::errors::{Result, IndexChartError};
    use crate::models::record::RawRecord;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::array::{ArrayRef, StringBuilder};
    use arrow::record_batch::RecordBatch;
    use arrow::ipc::reader::FileReader;
    use arrow::ipc::writer::FileWriter;
    use arrow_array::{Array, StringArray};
    use log::info;
    use std::fs::File;
    use std::io::{Read, Seek};
    use std::path::Path;
    use std::sync::Arc;

    fn arrow_err(e: impl std::fmt::Display) -> IndexChartError {
        IndexChartError::ArrowError(e.to_string())
    }

    // 将记录转换为Arrow记录批次，每个字段一列，缺失字段为 null
    pub fn records_to_record_batch(records: &[RawRecord], fields: &[String]) -> Result<RecordBatch> {
        let schema = Schema::new(
            fields
                .iter()
                .map(|name| Field::new(name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        );

        let columns: Vec<ArrayRef> = fields
            .iter()
            .map(|name| {
                let mut builder = StringBuilder::new();
                for record in records {
                    builder.append_option(record.get(name));
                }
                Arc::new(builder.finish()) as ArrayRef
            })
            .collect();

        RecordBatch::try_new(Arc::new(schema), columns).map_err(arrow_err)
    }

    // 从Arrow记录批次还原记录
    pub fn record_batch_to_records(batch: &RecordBatch) -> Result<Vec<RawRecord>> {
        let schema = batch.schema();
        let mut columns = Vec::with_capacity(batch.num_columns());
        for (i, field) in schema.fields().iter().enumerate() {
            let array = batch
                .column(i)
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| arrow_err(format!("Column {} is not a string column", field.name())))?;
            columns.push((field.name().clone(), array));
        }

        let mut records = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            let mut record = RawRecord::new();
            for (name, array) in &columns {
                if !array.is_null(row) {
                    record.insert(name.as_str(), array.value(row));
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    fn read_records<R: Read + Seek>(reader: R) -> Result<Vec<RawRecord>> {
        let reader = FileReader::try_new(reader, None).map_err(arrow_err)?;

        let mut records = Vec::new();
        for batch in reader {
            let batch = batch.map_err(arrow_err)?;
            records.extend(record_batch_to_records(&batch)?);
        }

        Ok(records)
    }

    // 从内存中读取Arrow数据
    pub fn read_records_from_memory(data: &[u8]) -> Result<Vec<RawRecord>> {
        read_records(std::io::Cursor::new(data))
    }

    // 将记录保存到Arrow文件
    pub fn save_records_to_arrow<P: AsRef<Path>>(records: &[RawRecord], fields: &[String], path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Saving {} records ({} fields) to {}", records.len(), fields.len(), path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let batch = records_to_record_batch(records, fields)?;
        let file = File::create(path)?;

        let mut writer = FileWriter::try_new(file, &batch.schema()).map_err(arrow_err)?;
        writer.write(&batch).map_err(arrow_err)?;
        writer.finish().map_err(arrow_err)?;

        Ok(())
    }
}
