//! Core data model types for the result table.
//!
//! Every extracted record becomes one row of an in-memory [`DataSet`]. The [`Schema`] is not
//! supplied up front: it is the union of all record keys, typed by inspecting the values.

use std::cmp::Ordering;

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Nested or mixed JSON (arrays, objects, columns mixing kinds).
    Json,
    /// Bounded-domain column. Values keep the representation of the inner type.
    Categorical(Box<DataType>),
}

impl DataType {
    /// Returns true for [`DataType::Categorical`] columns.
    pub fn is_categorical(&self) -> bool {
        matches!(self, DataType::Categorical(_))
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`DataSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns a field by name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value (absent key or explicit JSON `null`).
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Raw JSON for nested or mixed columns.
    Json(serde_json::Value),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int64(_) | Value::Float64(_) => 2,
            Value::Utf8(_) => 3,
            Value::Json(_) => 4,
        }
    }

    /// Total order used to sort category domains.
    ///
    /// Numbers compare numerically (ints and floats together), strings lexically, JSON by its
    /// compact text. Values of different kinds are ordered null < bool < number < string < json.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.total_cmp(b),
            (Value::Int64(a), Value::Float64(b)) => (*a as f64).total_cmp(b),
            (Value::Float64(a), Value::Int64(b)) => a.total_cmp(&(*b as f64)),
            (Value::Utf8(a), Value::Utf8(b)) => a.cmp(b),
            (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

static NULL: Value = Value::Null;

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of a column, in row order. `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or(&NULL)))
    }

    /// Look up a single cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Declare `column` as a bounded-domain categorical column.
    ///
    /// Values are left untouched; only the field type changes. Returns `false` (and does nothing)
    /// when the column does not exist, which is the normal case for an empty table.
    pub fn categorize(&mut self, column: &str) -> bool {
        let Some(idx) = self.schema.index_of(column) else {
            return false;
        };
        let field = &mut self.schema.fields[idx];
        if !field.data_type.is_categorical() {
            let inner = std::mem::replace(&mut field.data_type, DataType::Utf8);
            field.data_type = DataType::Categorical(Box::new(inner));
        }
        true
    }

    /// The category domain of a categorical column: its distinct non-null values, sorted.
    ///
    /// `None` if the column does not exist or is not categorical.
    pub fn categories(&self, column: &str) -> Option<Vec<Value>> {
        let field = self.schema.field(column)?;
        if !field.data_type.is_categorical() {
            return None;
        }

        let mut domain: Vec<Value> = Vec::new();
        for value in self.column(column)? {
            if value.is_null() || domain.contains(value) {
                continue;
            }
            domain.push(value.clone());
        }
        domain.sort_by(Value::total_cmp);
        Some(domain)
    }
}
