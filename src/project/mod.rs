//! Filesystem access for the parser entry points and the include
//! resolver: reading a DSL file into lines, and collecting the files
//! beneath a directory in a stable order.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::base::SourceLines;

/// Read a UTF-8 DSL file into raw source lines.
pub fn load_lines(path: &Path) -> Result<Vec<String>, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
    Ok(SourceLines::from_source(&source).into_vec())
}

/// Collect every regular file beneath `dir`, recursively, sorted by path
/// so that parse order is stable across platforms.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("Could not read {}: {}", dir.display(), e))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
