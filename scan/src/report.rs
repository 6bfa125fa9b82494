//! Reconciling aggregated specifications with the requirement table.
//!
//! The reconciled [`Report`] fixes section order once so that every output
//! format renders the same sections in the same sequence.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use spec_map_core::{Requirement, Specification, SpecificationSet};

/// Heading of one report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionHeading {
    /// A row of the requirement table.
    Requirement { tag: String, description: String },
    /// A tag used by tests but missing from the requirement table.
    Orphan { tag: String },
    /// Specifications without any tag.
    Untagged,
}

impl std::fmt::Display for SectionHeading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Requirement { tag, description } => write!(f, "{tag}: {description}"),
            Self::Orphan { tag } => write!(f, "{tag}: (no requirement description available)"),
            Self::Untagged => write!(f, "(untagged specifications)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: SectionHeading,
    pub specifications: Vec<Specification>,
}

/// Counts describing one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub test_cases: usize,
    pub tags: usize,
    pub untagged: usize,
    pub requirements: usize,
    /// Requirements without a single specification.
    pub uncovered_requirements: usize,
    /// Tags without a requirement.
    pub orphan_tags: usize,
}

/// Reconciled specification map, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ScanSummary,
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Orders sections as: requirements in table order, then tags that have
    /// no requirement in first-seen order, then untagged specifications when
    /// there are any.
    ///
    /// # Examples
    ///
    /// ```
    /// use spec_map_core::{Requirement, Specification, SpecificationSet};
    /// use spec_map_scan::report::{Report, SectionHeading};
    ///
    /// let mut set = SpecificationSet::new();
    /// set.tagged.push("T3", Specification::new("orphaned", "a.dart"));
    /// set.tagged.push("T2", Specification::new("covered", "a.dart"));
    /// let requirements = [Requirement::new("T1", "First"), Requirement::new("T2", "Second")];
    ///
    /// let report = Report::reconcile(&set, &requirements);
    /// let headings: Vec<String> = report.sections.iter().map(|s| s.heading.to_string()).collect();
    /// assert_eq!(
    ///     headings,
    ///     ["T1: First", "T2: Second", "T3: (no requirement description available)"]
    /// );
    /// ```
    pub fn reconcile(set: &SpecificationSet, requirements: &[Requirement]) -> Self {
        let mut sections = Vec::new();
        let mut summary = ScanSummary {
            tags: set.tagged.len(),
            untagged: set.untagged.len(),
            requirements: requirements.len(),
            ..ScanSummary::default()
        };

        for requirement in requirements {
            let specifications = set
                .tagged
                .get(&requirement.tag)
                .map(<[_]>::to_vec)
                .unwrap_or_default();
            if specifications.is_empty() {
                summary.uncovered_requirements += 1;
            }
            sections.push(ReportSection {
                heading: SectionHeading::Requirement {
                    tag: requirement.tag.clone(),
                    description: requirement.description.clone(),
                },
                specifications,
            });
        }

        let required: HashSet<&str> = requirements.iter().map(|r| r.tag.as_str()).collect();
        for (tag, specs) in set.tagged.iter() {
            if required.contains(tag) {
                continue;
            }
            summary.orphan_tags += 1;
            sections.push(ReportSection {
                heading: SectionHeading::Orphan {
                    tag: tag.to_string(),
                },
                specifications: specs.to_vec(),
            });
        }

        if !set.untagged.is_empty() {
            sections.push(ReportSection {
                heading: SectionHeading::Untagged,
                specifications: set.untagged.clone(),
            });
        }

        Self { summary, sections }
    }
}
