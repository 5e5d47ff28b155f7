//! `gp-results` flattens the result files of a genetic-programming experiment into a single table.
//!
//! An experiment writes one JSON file per evaluated genotype into a directory tree laid out as
//! `{root}/{experiment}/seed-{N}/gen{M}/{file}.json`. This crate walks such a tree, turns every
//! file into one record and writes all records as a CSV file for downstream analysis.
//!
//! ## Pipeline
//!
//! 1. [`discovery::find_json_files`]: every file below the root whose name contains `.json`
//! 2. [`extraction::extract_record`]: the file's own fields plus
//!    - `path`, `seed`, `experiment`, `generation`, `algorithm` derived from the location
//!    - `TRANSFORMATIONS`, the total number of applied transformers
//!    - one count column per known transformer kind ([`extraction::TransformerKind`])
//! 3. [`table::build_result_table`]: union of all keys as typed columns, with `algorithm`,
//!    `experiment` and `seed` declared categorical; [`table::write_csv`] serializes it
//!
//! [`pipeline::make_table`] and [`pipeline::make_csv`] run all three stages.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gp_results::observability::StdOutObserver;
//! use gp_results::pipeline::{make_csv, ExtractionOptions};
//! use gp_results::table::DEFAULT_OUTPUT_FILE;
//!
//! # fn main() -> Result<(), gp_results::ExtractionError> {
//! let opts = ExtractionOptions {
//!     observer: Some(Arc::new(StdOutObserver)),
//!     ..Default::default()
//! };
//! let table = make_csv("experiments/", DEFAULT_OUTPUT_FILE, &opts)?;
//! println!("rows={}", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! Flattening a single file without touching the filesystem:
//!
//! ```rust
//! use gp_results::extraction::{PathLayout, extract_record_from_str};
//! use serde_json::json;
//!
//! let layout = PathLayout::new("/data/exp1").unwrap();
//! let dp = extract_record_from_str(
//!     &layout,
//!     "/data/exp1/random-search/seed-3/gen1/x.json",
//!     r#"{"genotype": [{"transformer": "IfTrueTransformer", "seed": 4}]}"#,
//! )
//! .unwrap();
//! assert_eq!(dp.get("experiment"), Some(&json!("random-search")));
//! assert_eq!(dp.get("algorithm"), Some(&json!("random")));
//! assert_eq!(dp.get("TRANSFORMATIONS"), Some(&json!(1)));
//! assert_eq!(dp.get("IfTrueTransformer"), Some(&json!(1)));
//! ```
//!
//! ## Modules
//!
//! - [`discovery`]: result file discovery
//! - [`extraction`]: path decomposition, genotype counting, record flattening
//! - [`table`]: table assembly and CSV output
//! - [`pipeline`]: end-to-end runs and their options
//! - [`observability`]: status reporting
//! - [`types`]: in-memory table types
//! - [`error`]: error type shared across the crate

pub mod discovery;
pub mod error;
pub mod extraction;
pub mod observability;
pub mod pipeline;
pub mod table;
pub mod types;

pub use error::{ExtractionError, ExtractionResult};
pub use extraction::known_transformers;
