//! Table assembly.
//!
//! Records are assembled into a [`DataSet`] whose columns are the union of all record keys, in
//! first-seen order. Rows keep the record order; keys a record lacks become [`Value::Null`].
//!
//! Column types are inferred from the JSON values of the column (nulls ignored):
//!
//! - only integers: [`DataType::Int64`]
//! - numbers with at least one float (or an integer beyond `i64`): [`DataType::Float64`]
//! - only booleans: [`DataType::Bool`]
//! - only strings, or no values at all: [`DataType::Utf8`]
//! - anything else (arrays, objects, mixed kinds): [`DataType::Json`]
//!
//! Serialization lives in [`csv`].

pub mod csv;

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::extraction::DataPoint;
use crate::extraction::record::{ALGORITHM_FIELD, EXPERIMENT_FIELD, SEED_FIELD};
use crate::types::{DataSet, DataType, Field, Schema, Value};

pub use self::csv::{DEFAULT_OUTPUT_FILE, write_csv, write_csv_to_writer};

/// Columns declared categorical in the result table.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [ALGORITHM_FIELD, EXPERIMENT_FIELD, SEED_FIELD];

/// Assemble records into a typed [`DataSet`]. No columns are categorical yet.
pub fn assemble(points: &[DataPoint]) -> DataSet {
    let mut names: Vec<&str> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for point in points {
        for key in point.fields().keys() {
            if !seen.contains_key(key.as_str()) {
                seen.insert(key.as_str(), names.len());
                names.push(key.as_str());
            }
        }
    }

    let fields: Vec<Field> = names
        .iter()
        .map(|name| Field::new(*name, infer_type(points.iter().filter_map(|p| p.get(name)))))
        .collect();

    let rows = points
        .iter()
        .map(|point| {
            fields
                .iter()
                .map(|field| match point.get(&field.name) {
                    Some(v) => convert_json_value(&field.data_type, v),
                    None => Value::Null,
                })
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), rows)
}

/// Assemble records and declare `algorithm`, `experiment` and `seed` categorical.
pub fn build_result_table(points: &[DataPoint]) -> DataSet {
    let mut ds = assemble(points);
    for column in CATEGORICAL_COLUMNS {
        ds.categorize(column);
    }
    ds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Bool,
    Str,
    Other,
}

fn kind_of(v: &JsonValue) -> Option<Kind> {
    match v {
        JsonValue::Null => None,
        JsonValue::Bool(_) => Some(Kind::Bool),
        JsonValue::Number(n) if n.is_i64() => Some(Kind::Int),
        JsonValue::Number(_) => Some(Kind::Float),
        JsonValue::String(_) => Some(Kind::Str),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(Kind::Other),
    }
}

fn infer_type<'a>(values: impl Iterator<Item = &'a JsonValue>) -> DataType {
    let mut acc: Option<Kind> = None;
    for kind in values.filter_map(kind_of) {
        acc = Some(match (acc, kind) {
            (None, k) => k,
            (Some(a), k) if a == k => a,
            (Some(Kind::Int), Kind::Float) | (Some(Kind::Float), Kind::Int) => Kind::Float,
            _ => Kind::Other,
        });
        if acc == Some(Kind::Other) {
            break;
        }
    }

    match acc {
        Some(Kind::Int) => DataType::Int64,
        Some(Kind::Float) => DataType::Float64,
        Some(Kind::Bool) => DataType::Bool,
        Some(Kind::Str) | None => DataType::Utf8,
        Some(Kind::Other) => DataType::Json,
    }
}

fn convert_json_value(data_type: &DataType, v: &JsonValue) -> Value {
    if v.is_null() {
        return Value::Null;
    }

    match (data_type, v) {
        (DataType::Int64, JsonValue::Number(n)) => {
            n.as_i64().map(Value::Int64).unwrap_or(Value::Null)
        }
        (DataType::Float64, JsonValue::Number(n)) => {
            n.as_f64().map(Value::Float64).unwrap_or(Value::Null)
        }
        (DataType::Bool, JsonValue::Bool(b)) => Value::Bool(*b),
        (DataType::Utf8, JsonValue::String(s)) => Value::Utf8(s.clone()),
        _ => Value::Json(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(v: JsonValue) -> DataPoint {
        match v {
            JsonValue::Object(map) => DataPoint::from_fields(map),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let ds = assemble(&[point(json!({"a": 1, "b": "x"})), point(json!({"c": true, "a": 2}))]);
        let names: Vec<&str> = ds.schema.field_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Utf8("x".to_string()), Value::Null]);
        assert_eq!(ds.rows[1], vec![Value::Int64(2), Value::Null, Value::Bool(true)]);
    }

    #[test]
    fn types_are_inferred_per_column() {
        let ds = assemble(&[
            point(json!({"i": 1, "f": 1, "s": "a", "n": null, "g": [], "m": 1})),
            point(json!({
                "i": null,
                "f": 2.5,
                "s": "b",
                "n": null,
                "g": [{"transformer": "x"}],
                "m": "one"
            })),
        ]);
        let ty = |name: &str| ds.schema.field(name).unwrap().data_type.clone();
        assert_eq!(ty("i"), DataType::Int64);
        assert_eq!(ty("f"), DataType::Float64);
        assert_eq!(ty("s"), DataType::Utf8);
        assert_eq!(ty("n"), DataType::Utf8);
        assert_eq!(ty("g"), DataType::Json);
        assert_eq!(ty("m"), DataType::Json);

        assert_eq!(ds.get(0, "f"), Some(&Value::Float64(1.0)));
        assert_eq!(ds.get(1, "i"), Some(&Value::Null));
        assert_eq!(ds.get(0, "m"), Some(&Value::Json(json!(1))));
        assert_eq!(ds.get(1, "g"), Some(&Value::Json(json!([{"transformer": "x"}]))));
    }

    #[test]
    fn empty_input_builds_empty_table() {
        let ds = build_result_table(&[]);
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 0);
    }

    #[test]
    fn result_table_marks_three_columns_categorical() {
        let ds = build_result_table(&[point(json!({
            "seed": 1, "experiment": "expA", "algorithm": "genetic", "generation": 0
        }))]);
        assert_eq!(
            ds.schema.field("seed").unwrap().data_type,
            DataType::Categorical(Box::new(DataType::Int64))
        );
        assert_eq!(
            ds.schema.field("experiment").unwrap().data_type,
            DataType::Categorical(Box::new(DataType::Utf8))
        );
        assert!(ds.schema.field("algorithm").unwrap().data_type.is_categorical());
        assert_eq!(ds.schema.field("generation").unwrap().data_type, DataType::Int64);
    }
}
