//! Test specification scanning and requirement reconciliation.
//!
//! This crate turns test sources into a traceability map. Test descriptions
//! such as `patrolTest('checkout: user can pay', ...)` are extracted, split
//! into a tag (`checkout`) and a body (`user can pay`), grouped by tag and
//! reconciled against a requirement table.
//!
//! # Main entry points
//!
//! - [`build_report`] — run the whole pipeline for a [`ScanConfig`].
//! - [`extract::DescriptionExtractor`] — find description literals in text.
//! - [`tag::split_description`] — split one description into tag and body.
//! - [`requirements::parse_requirements`] — read a requirement table.
//! - [`aggregate::aggregate`] — group specifications by tag.
//! - [`report::Report::reconcile`] — order sections against requirements.
//! - [`output::format_report`] — render text, markdown or JSON.
//!
//! # Example
//!
//! ```
//! use spec_map_core::Requirement;
//! use spec_map_scan::{aggregate::aggregate, extract::DescriptionExtractor};
//! use spec_map_scan::output::{OutputFormat, format_report};
//! use spec_map_scan::report::Report;
//! use spec_map_scan::tag::TagMode;
//!
//! let source = "patrolTest('checkout: user can pay', ($) async {});";
//! let cases: Vec<_> = DescriptionExtractor::default()
//!     .extract(source, "app_test.dart")
//!     .collect();
//! let set = aggregate(&cases, TagMode::Prefix).unwrap();
//! let report = Report::reconcile(&set, &[Requirement::new("checkout", "Users must be able to pay")]);
//!
//! let text = format_report(&report, OutputFormat::Text).unwrap();
//! assert_eq!(
//!     text,
//!     "checkout: Users must be able to pay\n  - user can pay (app_test.dart)\n\n"
//! );
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod report;
pub mod requirements;
pub mod tag;

use tracing::info;

pub use config::{ConfigFile, ScanConfig};
pub use error::{Result, ScanError};
use extract::DescriptionExtractor;
use report::Report;

/// Scans the configured test files and reconciles them with the requirement
/// table, if one is configured.
///
/// Files are read in order and the first failure aborts the run, so a report
/// is only returned when every input was read.
///
/// # Examples
///
/// ```no_run
/// use spec_map_scan::{ScanConfig, build_report};
/// use spec_map_scan::output::{OutputFormat, format_report};
///
/// let config = ScanConfig {
///     test_files: vec!["integration_test/app_test.dart".into()],
///     requirements_file: Some("docs/requirements.md".into()),
///     ..ScanConfig::default()
/// };
/// let report = build_report(&config).unwrap();
/// print!("{}", format_report(&report, OutputFormat::Text).unwrap());
/// ```
pub fn build_report(config: &ScanConfig) -> Result<Report> {
    let extractor = DescriptionExtractor::new(&config.test_functions)?;
    let test_cases = extractor.read_files(&config.test_files)?;

    let requirements = match &config.requirements_file {
        Some(path) => requirements::read_requirements(path)?,
        None => Vec::new(),
    };

    let set = aggregate::aggregate(&test_cases, config.tag_mode)?;
    let mut report = Report::reconcile(&set, &requirements);
    report.summary.files_scanned = config.test_files.len();
    report.summary.test_cases = test_cases.len();

    let summary = &report.summary;
    info!(
        files = summary.files_scanned,
        test_cases = summary.test_cases,
        tags = summary.tags,
        untagged = summary.untagged,
        requirements = summary.requirements,
        uncovered = summary.uncovered_requirements,
        orphan_tags = summary.orphan_tags,
        "built specification map"
    );
    Ok(report)
}
