//! Result file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ExtractionResult;

/// Marker every result file name contains.
pub const JSON_MARKER: &str = ".json";

/// Return true if the file *name* contains `.json` anywhere.
///
/// This is a substring test, not an extension check: `not.json.txt` matches, `data.JSON` does not.
pub fn is_result_file_name(name: &str) -> bool {
    name.contains(JSON_MARKER)
}

/// Recursively find result files under `root`, at any depth.
///
/// Paths are returned in traversal order, with the entries of each directory visited sorted by
/// file name. Fails if `root` does not exist or a directory cannot be read.
pub fn find_json_files(root: impl AsRef<Path>) -> ExtractionResult<Vec<PathBuf>> {
    let mut json_files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_result_file_name(&entry.file_name().to_string_lossy()) {
            json_files.push(entry.into_path());
        }
    }

    Ok(json_files)
}
