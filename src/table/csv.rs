//! CSV serialization of the result table.
//!
//! Layout: a header row whose first cell is empty (the index column), then one row per record,
//! prefixed with its 0-based row index. Missing values are empty cells, so every row has as many
//! cells as the header.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExtractionResult;
use crate::types::{DataSet, Value};

/// File name used when the caller does not choose one.
pub const DEFAULT_OUTPUT_FILE: &str = "results.csv";

/// Write `dataset` as CSV to `path`, replacing any existing file.
pub fn write_csv(dataset: &DataSet, path: impl AsRef<Path>) -> ExtractionResult<()> {
    let file = File::create(path)?;
    write_csv_to_writer(dataset, file)
}

/// Write `dataset` as CSV to an arbitrary writer.
pub fn write_csv_to_writer<W: Write>(dataset: &DataSet, writer: W) -> ExtractionResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(std::iter::once("").chain(dataset.schema.field_names()))?;
    for (idx, row) in dataset.rows.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
        record.push(idx.to_string());
        record.extend(row.iter().map(render_cell));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Text of a single cell.
///
/// Floats always carry a fractional part (`1.0`), booleans are `True`/`False`, nested JSON is
/// written compactly.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => render_float(*v),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Utf8(s) => s.clone(),
        Value::Json(v) => v.to_string(),
    }
}

fn render_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};
    use serde_json::json;

    fn sample() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("seed", DataType::Categorical(Box::new(DataType::Int64))),
            Field::new("fitness", DataType::Float64),
            Field::new("genotype", DataType::Json),
            Field::new("note", DataType::Utf8),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![
                    Value::Int64(1),
                    Value::Float64(2.0),
                    Value::Json(json!([{"transformer": "IfTrueTransformer", "seed": 5}])),
                    Value::Utf8("a, b".to_string()),
                ],
                vec![Value::Int64(2), Value::Float64(0.25), Value::Json(json!([])), Value::Null],
            ],
        )
    }

    fn to_string(ds: &DataSet) -> String {
        let mut buf = Vec::new();
        write_csv_to_writer(ds, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_index_column_and_header() {
        let out = to_string(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], ",seed,fitness,genotype,note");
        assert_eq!(
            lines[1],
            r#"0,1,2.0,"[{""transformer"":""IfTrueTransformer"",""seed"":5}]","a, b""#
        );
        assert_eq!(lines[2], "1,2,0.25,[],");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn renders_cells() {
        assert_eq!(render_cell(&Value::Null), "");
        assert_eq!(render_cell(&Value::Bool(true)), "True");
        assert_eq!(render_cell(&Value::Float64(-3.0)), "-3.0");
        assert_eq!(render_cell(&Value::Float64(0.1)), "0.1");
        assert_eq!(render_cell(&Value::Int64(-7)), "-7");
    }

    #[test]
    fn large_integral_floats_keep_a_fractional_digit() {
        assert_eq!(render_cell(&Value::Float64(1e15)), "1000000000000000.0");
        assert_eq!(render_cell(&Value::Float64(1e16)), "10000000000000000.0");
        assert_eq!(render_cell(&Value::Float64(-1e20)), "-100000000000000000000.0");
        assert_eq!(render_cell(&Value::Float64(1.5e17)), "150000000000000000.0");
    }

    #[test]
    fn empty_table_writes_header_only() {
        let out = to_string(&DataSet::new(Schema::default(), Vec::new()));
        assert_eq!(out.lines().count(), 1);
    }
}
