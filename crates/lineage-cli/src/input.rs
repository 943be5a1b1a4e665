//! Reading the list of names to resolve

use crate::error::{CliError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Read one name per line from `path`
///
/// Lines are trimmed and blank lines skipped. Repeated names are kept.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::FileNotFound(path.display().to_string()),
        ErrorKind::PermissionDenied => CliError::config(format!(
            "No permission to read input file '{}'",
            path.display()
        )),
        _ => CliError::Io(e),
    })?;

    Ok(parse_names(&content))
}

pub fn parse_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
