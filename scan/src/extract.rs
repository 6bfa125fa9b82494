//! Test description extraction from source text.
//!
//! Extraction is pattern based: the scanner looks for a call token such as
//! `patrolTest(` followed by a quoted string literal and captures the
//! literal. Nothing about the host language is parsed beyond that.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};
use spec_map_core::TestCase;
use tracing::debug;

use crate::error::{Result, ScanError};

/// Test function scanned for when nothing else is configured.
pub const DEFAULT_TEST_FUNCTION: &str = "patrolTest";

// A literal runs up to the next quote of the same kind and stays on one line,
// so an unterminated call never produces a partial match.
const LITERAL_PATTERN: &str = r#"\(\s*(?:'([^'\n]+)'|"([^"\n]+)")"#;

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{DEFAULT_TEST_FUNCTION}{LITERAL_PATTERN}"))
        .expect("static regex must compile")
});

/// Finds test description literals in source text.
///
/// # Examples
///
/// ```
/// use spec_map_scan::extract::DescriptionExtractor;
///
/// let source = r#"
/// void main() {
///   patrolTest('checkout: user can pay', ($) async {});
///   patrolTest("no tag here", ($) async {});
/// }
/// "#;
///
/// let extractor = DescriptionExtractor::default();
/// let found: Vec<_> = extractor
///     .extract(source, "app_test.dart")
///     .map(|case| case.description)
///     .collect();
/// assert_eq!(found, ["checkout: user can pay", "no tag here"]);
/// ```
#[derive(Debug, Clone)]
pub struct DescriptionExtractor {
    pattern: Regex,
}

impl Default for DescriptionExtractor {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl DescriptionExtractor {
    /// Builds an extractor matching calls to any of `functions`.
    ///
    /// Names are matched literally and case-sensitively.
    pub fn new<S: AsRef<str>>(functions: &[S]) -> Result<Self> {
        let names: Vec<String> = functions
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(regex::escape)
            .collect();
        if names.is_empty() {
            return Err(ScanError::NoTestFunctions);
        }

        let pattern = Regex::new(&format!("(?:{}){LITERAL_PATTERN}", names.join("|")))?;
        Ok(Self { pattern })
    }

    /// Lazily yields one [`TestCase`] per match in `text`, in textual order.
    ///
    /// Calling this again on the same text starts over from the beginning.
    pub fn extract<'r, 't>(&'r self, text: &'t str, source_file: &'t str) -> TestCases<'r, 't> {
        TestCases {
            captures: self.pattern.captures_iter(text),
            source_file,
        }
    }

    /// Reads `files` in order and extracts every test case from them.
    ///
    /// The first unreadable file aborts the scan.
    pub fn read_files<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<TestCase>> {
        let mut cases = Vec::new();
        for file in files {
            let path = file.as_ref();
            let bytes = fs::read(path).map_err(|err| ScanError::io(path, err))?;
            let text = String::from_utf8_lossy(&bytes);
            let source_file = path.display().to_string();

            let before = cases.len();
            cases.extend(self.extract(&text, &source_file));
            debug!(
                file = %source_file,
                matches = cases.len() - before,
                "scanned test file"
            );
        }
        Ok(cases)
    }
}

/// Iterator over the test cases found in one text blob.
pub struct TestCases<'r, 't> {
    captures: CaptureMatches<'r, 't>,
    source_file: &'t str,
}

impl Iterator for TestCases<'_, '_> {
    type Item = TestCase;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.captures.by_ref() {
            if let Some(literal) = caps.get(1).or_else(|| caps.get(2)) {
                return Some(TestCase::new(literal.as_str(), self.source_file));
            }
        }
        None
    }
}
