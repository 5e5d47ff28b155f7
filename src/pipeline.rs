//! End-to-end extraction runs.
//!
//! [`make_table`] discovers every result file below a root directory, flattens each one into a
//! record and assembles the result table. [`make_csv`] additionally writes it out. The run is
//! single-threaded and all-or-nothing: the first file that fails to read, parse or match the path
//! layout aborts it.
//!
//! If an [`RunObserver`] is configured it receives the discovery count, one event per record, the
//! failure (if any) and the written output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::discovery::find_json_files;
use crate::error::{ExtractionError, ExtractionResult};
use crate::extraction::{DataPoint, PathLayout, extract_record};
use crate::observability::{RunContext, RunObserver, Severity};
use crate::table::{CATEGORICAL_COLUMNS, assemble, write_csv};
use crate::types::DataSet;

/// Options controlling an extraction run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ExtractionOptions {
    /// Optional observer for status lines/alerts.
    pub observer: Option<Arc<dyn RunObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
    /// Columns declared categorical after assembly. Missing columns are skipped.
    pub categorical_columns: Vec<String>,
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("categorical_columns", &self.categorical_columns)
            .finish()
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
            categorical_columns: CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ExtractionOptions {
    fn report_failure(&self, ctx: &RunContext, path: Option<&Path>, error: &ExtractionError) {
        let Some(obs) = &self.observer else {
            return;
        };
        let severity = error.severity();
        obs.on_failure(ctx, path, severity, error);
        if severity >= self.alert_at_or_above {
            obs.on_alert(ctx, path, severity, error);
        }
    }
}

/// Discover, extract and assemble the result table for `root`.
///
/// # Examples
///
/// ```no_run
/// use gp_results::pipeline::{make_table, ExtractionOptions};
///
/// # fn main() -> Result<(), gp_results::ExtractionError> {
/// let table = make_table("experiments/", &ExtractionOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn make_table(
    root: impl AsRef<Path>,
    options: &ExtractionOptions,
) -> ExtractionResult<DataSet> {
    let root = root.as_ref();
    let ctx = RunContext {
        root: root.to_path_buf(),
    };

    let points = collect_records(root, &ctx, options)?;

    let mut table = assemble(&points);
    for column in &options.categorical_columns {
        table.categorize(column);
    }
    Ok(table)
}

/// [`make_table`], then write the table as CSV to `output`.
///
/// Returns the table that was written.
pub fn make_csv(
    root: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ExtractionOptions,
) -> ExtractionResult<DataSet> {
    let root = root.as_ref();
    let output = output.as_ref();
    let table = make_table(root, options)?;

    let ctx = RunContext {
        root: root.to_path_buf(),
    };
    match write_csv(&table, output) {
        Ok(()) => {
            if let Some(obs) = &options.observer {
                obs.on_written(&ctx, output, table.row_count());
            }
            Ok(table)
        }
        Err(e) => {
            options.report_failure(&ctx, Some(output), &e);
            Err(e)
        }
    }
}

fn collect_records(
    root: &Path,
    ctx: &RunContext,
    options: &ExtractionOptions,
) -> ExtractionResult<Vec<DataPoint>> {
    let files: Vec<PathBuf> =
        find_json_files(root).inspect_err(|e| options.report_failure(ctx, None, e))?;

    if let Some(obs) = &options.observer {
        obs.on_discovered(ctx, files.len());
    }

    let layout =
        PathLayout::from_root(root).inspect_err(|e| options.report_failure(ctx, None, e))?;

    let mut points = Vec::with_capacity(files.len());
    for file in &files {
        let point = extract_record(&layout, file)
            .inspect_err(|e| options.report_failure(ctx, Some(file.as_path()), e))?;
        if let Some(obs) = &options.observer {
            obs.on_record(ctx, file);
        }
        points.push(point);
    }
    Ok(points)
}
