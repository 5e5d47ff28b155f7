//! Record extraction.
//!
//! Turns one result file into one flat [`DataPoint`]:
//!
//! - [`path`]: seed / experiment / generation / algorithm from the file's location
//! - [`genotype`]: the two genotype shapes and transformer counting
//! - [`record`]: reading, validation and merging of the derived fields

pub mod genotype;
pub mod path;
pub mod record;

pub use genotype::{Genotype, GenotypeEntry, TransformerKind, TransformerTally, known_transformers};
pub use path::{Algorithm, PathLayout, PathMetadata};
pub use record::{DataPoint, extract_record, extract_record_from_str};
