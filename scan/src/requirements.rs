//! Requirement table parsing.
//!
//! Requirements are read from any text document containing two-column pipe
//! tables, typically markdown:
//!
//! ```text
//! | Tag      | Description               |
//! |----------|---------------------------|
//! | checkout | Users must be able to pay |
//! ```
//!
//! Lines that are not table rows are ignored, so prose and headings may
//! surround the table.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use spec_map_core::Requirement;
use tracing::debug;

use crate::error::{Result, ScanError};

static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*([^\s|]+)\s*\|\s*([\w\s]+)\|").expect("static regex must compile")
});

/// Parses one line, returning a requirement if it is a non-header table row.
pub fn parse_requirement_row(line: &str) -> Option<Requirement> {
    let caps = ROW_RE.captures(line)?;
    let tag = caps[1].trim();
    let description = caps[2].trim();
    if description.is_empty() {
        return None;
    }

    if tag.eq_ignore_ascii_case("tag") || description.eq_ignore_ascii_case("description") {
        debug!(line, "skipping requirement table header");
        return None;
    }

    Some(Requirement::new(tag, description))
}

/// Parses every requirement row in `text`, in line order.
///
/// # Examples
///
/// ```
/// use spec_map_scan::requirements::parse_requirements;
///
/// let table = "\
/// # Requirements
///
/// | Tag | Description |
/// |-----|-------------|
/// | checkout | Users must be able to pay |
/// | login | Users can sign in |
/// ";
///
/// let reqs = parse_requirements(table);
/// assert_eq!(reqs.len(), 2);
/// assert_eq!(reqs[0].tag, "checkout");
/// assert_eq!(reqs[1].description, "Users can sign in");
/// ```
pub fn parse_requirements(text: &str) -> Vec<Requirement> {
    text.lines().filter_map(parse_requirement_row).collect()
}

/// Reads requirements from `path` line by line.
pub fn read_requirements(path: impl AsRef<Path>) -> Result<Vec<Requirement>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| ScanError::io(path, err))?;

    let mut requirements = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| ScanError::io(path, err))?;
        if let Some(requirement) = parse_requirement_row(&line) {
            requirements.push(requirement);
        }
    }

    debug!(
        file = %path.display(),
        count = requirements.len(),
        "parsed requirement table"
    );
    Ok(requirements)
}
