//! The `!include` resolver.
//!
//! An include names a file or a directory, resolved relative to the file
//! being parsed (or the working directory for in-memory fragments). The
//! engine re-enters its own line loop on the included content, so line
//! numbers in errors are local to each included file. Included lines are
//! recorded in the preserved source in place of the directive itself.
//!
//! Include cycles are not detected; a file that includes itself recurses
//! until the process gives up.

use std::path::{Path, PathBuf};

use crate::project;

use super::error::ParseFailure;
use super::tokens::TokenLine;
use super::{Binding, DslParser};

const GRAMMAR: &str = "!include <file|directory>";

pub(crate) fn parse_include_directive(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if p.is_restricted() {
        return Ok(None);
    }
    let target = line.require(1, GRAMMAR)?;
    line.at_most(2, GRAMMAR)?;

    if target.starts_with("http://") || target.starts_with("https://") {
        return Err(ParseFailure::Io(format!(
            "Remote includes are not supported: {target}"
        )));
    }

    let path = resolve(p.current_file(), target);
    if !path.exists() {
        return Err(ParseFailure::Io(format!(
            "{} could not be found",
            path.display()
        )));
    }

    if path.is_dir() {
        let files = project::collect_files(&path).map_err(ParseFailure::Io)?;
        for file in files {
            include_file(p, &file)?;
        }
    } else {
        include_file(p, &path)?;
    }
    Ok(None)
}

/// Resolve `target` against the directory of the including file.
fn resolve(current_file: Option<&Path>, target: &str) -> PathBuf {
    match current_file.and_then(Path::parent) {
        Some(dir) => dir.join(target),
        None => PathBuf::from(target),
    }
}

fn include_file(p: &mut DslParser, path: &Path) -> Result<(), ParseFailure> {
    tracing::debug!(file = %path.display(), "including");
    let lines = project::load_lines(path).map_err(ParseFailure::Io)?;
    p.push_file(path.to_path_buf());
    let result = p.run(&lines);
    p.pop_file();
    result.map_err(|e| ParseFailure::Nested(Box::new(e)))
}
