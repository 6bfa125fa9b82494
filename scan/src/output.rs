//! Output formatting and storage for reconciled reports.

use std::fs;
use std::path::Path;

use spec_map_core::Specification;
use tracing::info;

use crate::error::{Result, ScanError};
use crate::report::{Report, ReportSection, SectionHeading};

/// Title line of the stored markdown document.
pub const MARKDOWN_TITLE: &str = "# Specifications Map (generated)";

const NO_SPECIFICATIONS: &str = "(no specifications found)";

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Plain console listing.
    #[default]
    Text,
    Markdown,
    Json,
}

/// Formats a report in the requested output format.
pub fn format_report(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report_to_text(report)),
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Renders the console listing. Every section ends with a blank line and an
/// empty section prints a placeholder instead of being left out.
pub fn report_to_text(report: &Report) -> String {
    let mut out = String::new();
    for section in &report.sections {
        out.push_str(&format!("{}\n", section.heading));
        if section.specifications.is_empty() {
            out.push_str(&format!("  {NO_SPECIFICATIONS}\n"));
        }
        for spec in &section.specifications {
            out.push_str(&format!("  - {}\n", text_item(spec)));
        }
        out.push('\n');
    }
    out
}

/// Renders the markdown document written by `--store`.
pub fn report_to_markdown(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(MARKDOWN_TITLE);
    out.push_str("\n\n");

    for section in &report.sections {
        out.push_str(&markdown_heading(section));
        if section.specifications.is_empty() {
            out.push_str(&format!("    {NO_SPECIFICATIONS}\n"));
        }
        for spec in &section.specifications {
            out.push_str(&format!(
                "    - {} *({})*\n",
                spec.description, spec.source_file
            ));
        }
    }
    out
}

fn markdown_heading(section: &ReportSection) -> String {
    match &section.heading {
        SectionHeading::Requirement { tag, description } => {
            format!("- **{tag}: {description}**\n")
        }
        SectionHeading::Orphan { tag } => {
            format!("- **{tag}:**(no requirement description available)\n")
        }
        SectionHeading::Untagged => "- **(untagged specifications)**\n".to_string(),
    }
}

fn text_item(spec: &Specification) -> String {
    format!("{} ({})", spec.description, spec.source_file)
}

/// Writes the markdown rendering of `report` to `path`.
///
/// Missing parent directories are created and an existing file is replaced.
pub fn store_markdown(path: impl AsRef<Path>, report: &Report) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ScanError::io(parent, err))?;
    }
    fs::write(path, report_to_markdown(report)).map_err(|err| ScanError::io(path, err))?;
    info!(path = %path.display(), "stored specification map");
    Ok(())
}
