//! Status reporting for extraction runs.
//!
//! The pipeline reports progress to an optional [`RunObserver`]. The CLI wires a
//! [`StdOutObserver`] so the user sees how many result files were found and where the table was
//! written; library callers can record events, log to a file, or fan out with
//! [`CompositeObserver`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractionError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the run failed on bad data).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about an extraction run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root directory the run walks.
    pub root: PathBuf,
}

/// Observer interface for extraction runs.
///
/// Every callback has an empty default so implementors only override what they need.
pub trait RunObserver: Send + Sync {
    /// Called once discovery has finished.
    fn on_discovered(&self, _ctx: &RunContext, _files: usize) {}

    /// Called after each file has been turned into a record.
    fn on_record(&self, _ctx: &RunContext, _path: &Path) {}

    /// Called when the run fails. `path` is the file being processed, if any.
    fn on_failure(
        &self,
        _ctx: &RunContext,
        _path: Option<&Path>,
        _severity: Severity,
        _error: &ExtractionError,
    ) {}

    /// Called when a failure meets the configured alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        self.on_failure(ctx, path, severity, error)
    }

    /// Called after the result table has been written.
    fn on_written(&self, _ctx: &RunContext, _output: &Path, _rows: usize) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn RunObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl RunObserver for CompositeObserver {
    fn on_discovered(&self, ctx: &RunContext, files: usize) {
        for o in &self.observers {
            o.on_discovered(ctx, files);
        }
    }

    fn on_record(&self, ctx: &RunContext, path: &Path) {
        for o in &self.observers {
            o.on_record(ctx, path);
        }
    }

    fn on_failure(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        for o in &self.observers {
            o.on_failure(ctx, path, severity, error);
        }
    }

    fn on_alert(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        for o in &self.observers {
            o.on_alert(ctx, path, severity, error);
        }
    }

    fn on_written(&self, ctx: &RunContext, output: &Path, rows: usize) {
        for o in &self.observers {
            o.on_written(ctx, output, rows);
        }
    }
}

/// Human-readable status lines on stdout.
///
/// Per-record events are not printed; result trees hold thousands of files.
#[derive(Debug, Default)]
pub struct StdOutObserver;

impl RunObserver for StdOutObserver {
    fn on_discovered(&self, ctx: &RunContext, files: usize) {
        println!("found {files} .json-files in {}", ctx.root.display());
    }

    fn on_failure(
        &self,
        _ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        match path {
            Some(p) => eprintln!("[{severity:?}] {}: {error}", p.display()),
            None => eprintln!("[{severity:?}] {error}"),
        }
    }

    fn on_written(&self, _ctx: &RunContext, output: &Path, rows: usize) {
        println!("wrote {rows} rows to {}", output.display());
    }
}

/// Logs every event to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl RunObserver for StdErrObserver {
    fn on_discovered(&self, ctx: &RunContext, files: usize) {
        eprintln!("[extract][discovered] root={} files={files}", ctx.root.display());
    }

    fn on_record(&self, _ctx: &RunContext, path: &Path) {
        eprintln!("[extract][record] path={}", path.display());
    }

    fn on_failure(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        eprintln!(
            "[extract][{:?}] root={} path={} err={}",
            severity,
            ctx.root.display(),
            display_opt(path),
            error
        );
    }

    fn on_alert(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        eprintln!(
            "[ALERT][extract][{:?}] root={} path={} err={}",
            severity,
            ctx.root.display(),
            display_opt(path),
            error
        );
    }

    fn on_written(&self, _ctx: &RunContext, output: &Path, rows: usize) {
        eprintln!("[extract][written] output={} rows={rows}", output.display());
    }
}

/// Appends run events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl RunObserver for FileObserver {
    fn on_discovered(&self, ctx: &RunContext, files: usize) {
        self.append_line(&format!(
            "{} discovered root={} files={files}",
            unix_ts(),
            ctx.root.display()
        ));
    }

    fn on_record(&self, _ctx: &RunContext, path: &Path) {
        self.append_line(&format!("{} record path={}", unix_ts(), path.display()));
    }

    fn on_failure(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        self.append_line(&format!(
            "{} fail severity={:?} root={} path={} err={}",
            unix_ts(),
            severity,
            ctx.root.display(),
            display_opt(path),
            error
        ));
    }

    fn on_alert(
        &self,
        ctx: &RunContext,
        path: Option<&Path>,
        severity: Severity,
        error: &ExtractionError,
    ) {
        self.append_line(&format!(
            "{} ALERT severity={:?} root={} path={} err={}",
            unix_ts(),
            severity,
            ctx.root.display(),
            display_opt(path),
            error
        ));
    }

    fn on_written(&self, _ctx: &RunContext, output: &Path, rows: usize) {
        self.append_line(&format!(
            "{} written output={} rows={rows}",
            unix_ts(),
            output.display()
        ));
    }
}

fn display_opt(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "-".to_string())
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
