use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::error::DatasetError;

use super::model::{Dataset, MetadataValue, RawRecord};

/// Columns every source table must carry. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "enslaver",
    "data_source",
    "enslaved_name",
    "enslaved_age",
    "enslaved_genagedesc",
];

/// Positions of the required columns, in `REQUIRED_COLUMNS` order.
type ColumnIndex = [usize; 5];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the record table from a file and run the cleaning pass.
/// Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the required columns
/// * `.json`    – `[{ "enslaver": ..., "enslaved_age": ..., ... }, ...]`
/// * `.parquet` – flat table with the required columns (`df.to_parquet()`)
/// * `.xlsx`    – first worksheet, header in the first row (`pd.read_excel` defaults)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => load_excel(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    };

    Ok(Dataset::from_raw(rows))
}

fn raw_record(cells: [MetadataValue; 5]) -> RawRecord {
    let [enslaver, data_source, enslaved_name, enslaved_age, enslaved_genagedesc] = cells;
    RawRecord {
        enslaver,
        data_source,
        enslaved_name,
        enslaved_age,
        enslaved_genagedesc,
    }
}

fn locate_columns<F>(format: &'static str, mut position: F) -> Result<ColumnIndex>
where
    F: FnMut(&str) -> Option<usize>,
{
    let mut index = [0usize; 5];
    for (slot, column) in index.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = position(column).ok_or(DatasetError::MissingColumn { format, column })?;
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every cell is read as text; empty cells are null. Ages are parsed later
/// by the cleaning pass.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index = locate_columns("CSV", |name| headers.iter().position(|h| h.trim() == name))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = index.map(|i| text_cell(record.get(i).unwrap_or("")));
        rows.push(raw_record(cells));
    }

    Ok(rows)
}

fn text_cell(s: &str) -> MetadataValue {
    if s.is_empty() {
        MetadataValue::Null
    } else {
        MetadataValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "enslaver": "John Smith",
///     "data_source": "Troy Records",
///     "enslaved_name": "Mary",
///     "enslaved_age": 24,
///     "enslaved_genagedesc": "Female"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(DatasetError::NotAnObject { row: i })?;
        locate_columns("JSON", |name| obj.contains_key(name).then_some(0))?;

        let cells = REQUIRED_COLUMNS
            .map(|name| obj.get(name).map_or(MetadataValue::Null, json_to_metadata));
        rows.push(raw_record(cells));
    }

    Ok(rows)
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`); columns may be
/// strings, integers, floats or booleans.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let index = locate_columns("Parquet", |name| schema.index_of(name).ok())?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = index.map(|i| batch.column(i).clone());
        for row in 0..batch.num_rows() {
            let cells = columns.each_ref().map(|col| extract_metadata_value(col, row));
            rows.push(raw_record(cells));
        }
    }

    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_metadata_value(col: &ArrayRef, row: usize) -> MetadataValue {
    if col.is_null(row) {
        return MetadataValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map_or(MetadataValue::Null, |s| MetadataValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map_or(MetadataValue::Null, |s| MetadataValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map_or(MetadataValue::Null, |a| MetadataValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map_or(MetadataValue::Null, |a| MetadataValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map_or(MetadataValue::Null, |a| MetadataValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map_or(MetadataValue::Null, |a| MetadataValue::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map_or(MetadataValue::Null, |a| MetadataValue::Bool(a.value(row))),
        other => {
            log::warn!("unsupported parquet column type {other:?}; reading as null");
            MetadataValue::Null
        }
    }
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of a workbook. The first row names the columns;
/// blank cells are null.
fn load_excel(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::NoWorksheet)?
        .context("reading first worksheet")?;

    let mut sheet_rows = sheet.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| excel_to_metadata(cell).into_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let index = locate_columns("Excel", |name| headers.iter().position(|h| h.trim() == name))?;

    let mut rows = Vec::new();
    for row in sheet_rows {
        let cells = index.map(|i| row.get(i).map_or(MetadataValue::Null, excel_to_metadata));
        rows.push(raw_record(cells));
    }

    Ok(rows)
}

fn excel_to_metadata(cell: &Data) -> MetadataValue {
    match cell {
        Data::String(s) => MetadataValue::String(s.clone()),
        Data::Int(i) => MetadataValue::Integer(*i),
        Data::Float(f) => MetadataValue::Float(*f),
        Data::Bool(b) => MetadataValue::Bool(*b),
        Data::Empty => MetadataValue::Null,
        // `#N/A`, `#VALUE!` and friends read as missing, like pandas' NaN.
        Data::Error(e) => {
            log::debug!("spreadsheet error cell {e:?}; reading as null");
            MetadataValue::Null
        }
        other => MetadataValue::String(other.to_string()),
    }
}
