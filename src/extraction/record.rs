//! One result file in, one flat record out.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{ExtractionError, ExtractionResult};

use super::genotype::Genotype;
use super::path::{PathLayout, path_str};

/// Field every result file must carry.
pub const GENOTYPE_FIELD: &str = "genotype";
pub const PATH_FIELD: &str = "path";
pub const SEED_FIELD: &str = "seed";
pub const EXPERIMENT_FIELD: &str = "experiment";
pub const TRANSFORMATIONS_FIELD: &str = "TRANSFORMATIONS";
pub const GENERATION_FIELD: &str = "generation";
pub const ALGORITHM_FIELD: &str = "algorithm";

/// A flattened result record: the file's own fields plus everything derived from it.
///
/// Keys keep the order of the source file; derived keys that are new are appended in the order
/// `path`, `seed`, `experiment`, `TRANSFORMATIONS`, `generation`, `algorithm`, then one count per
/// transformer kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPoint {
    fields: Map<String, JsonValue>,
}

impl DataPoint {
    /// Wrap an already-flat JSON object.
    pub fn from_fields(fields: Map<String, JsonValue>) -> Self {
        Self { fields }
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }

    /// All fields, in key order.
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    /// Unwrap into the underlying JSON object, e.g. to serialize the record on its own.
    pub fn into_fields(self) -> Map<String, JsonValue> {
        self.fields
    }
}

/// Read the result file at `path` (somewhere below the layout's root) and flatten it into a
/// [`DataPoint`].
///
/// The file is read fully and closed before extraction starts.
pub fn extract_record(layout: &PathLayout, path: &Path) -> ExtractionResult<DataPoint> {
    let text = fs::read_to_string(path)?;
    extract_record_from_str(layout, path_str(path)?, &text)
}

/// Flatten in-memory result file content found at `path`.
pub fn extract_record_from_str(
    layout: &PathLayout,
    path: &str,
    content: &str,
) -> ExtractionResult<DataPoint> {
    let JsonValue::Object(mut fields) = serde_json::from_str::<JsonValue>(content)? else {
        return Err(ExtractionError::SchemaMismatch {
            message: format!("result file '{path}' is not a json object"),
        });
    };

    let genotype = fields
        .get(GENOTYPE_FIELD)
        .ok_or_else(|| ExtractionError::SchemaMismatch {
            message: format!("result file '{path}' missing required field '{GENOTYPE_FIELD}'"),
        })
        .and_then(Genotype::from_json)?;

    let meta = layout.decompose(path)?;
    let tally = genotype.tally();

    fields.insert(PATH_FIELD.to_string(), path.into());
    fields.insert(SEED_FIELD.to_string(), meta.seed.into());
    fields.insert(EXPERIMENT_FIELD.to_string(), meta.experiment.into());
    fields.insert(TRANSFORMATIONS_FIELD.to_string(), tally.total.into());
    fields.insert(GENERATION_FIELD.to_string(), meta.generation.into());
    fields.insert(ALGORITHM_FIELD.to_string(), meta.algorithm.as_str().into());
    for (kind, count) in tally.iter() {
        fields.insert(kind.name().to_string(), count.into());
    }

    Ok(DataPoint::from_fields(fields))
}
