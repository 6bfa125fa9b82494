//! Splitting a test description into its tag and body.
//!
//! A tag is a run of non-whitespace characters followed by a colon, e.g.
//! `checkout` in `"checkout: user can pay"`. The body is what remains once the
//! tag and its separator are removed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use spec_map_core::{Specification, TestCase};

use crate::error::{Result, ScanError};

/// How tags are detected inside a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// Only a token at the very start of the description is a tag.
    #[default]
    Prefix,
    /// Every `token:` anywhere in the description is a tag.
    Scan,
}

impl std::fmt::Display for TagMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Scan => write!(f, "scan"),
        }
    }
}

/// Result of splitting one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDescription {
    /// Detected tags in order of appearance; empty for untagged descriptions.
    pub tags: Vec<String>,
    pub specification: Specification,
}

impl SplitDescription {
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}

static PREFIX_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s:]+):\s*").expect("static regex must compile"));
static SCAN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+):").expect("static regex must compile"));
static SCAN_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*([^:]*)$").expect("static regex must compile"));

/// Splits `test_case` into its tags and a [`Specification`].
///
/// # Examples
///
/// ```
/// use spec_map_core::TestCase;
/// use spec_map_scan::tag::{TagMode, split_description};
///
/// let case = TestCase::new("checkout: user can pay", "app_test.dart");
/// let split = split_description(&case, TagMode::Prefix).unwrap();
/// assert_eq!(split.tags, ["checkout"]);
/// assert_eq!(split.specification.description, "user can pay");
///
/// let case = TestCase::new("no tag here", "app_test.dart");
/// let split = split_description(&case, TagMode::Prefix).unwrap();
/// assert!(!split.is_tagged());
/// assert_eq!(split.specification.description, "no tag here");
/// ```
///
/// # Errors
///
/// Returns [`ScanError::Internal`] if a tagged description yields no body,
/// which indicates a defect in the tag patterns rather than bad input.
pub fn split_description(test_case: &TestCase, mode: TagMode) -> Result<SplitDescription> {
    let description = test_case.description.as_str();
    let (tags, body) = match mode {
        TagMode::Prefix => split_prefix(description),
        TagMode::Scan => split_scan(description)?,
    };

    Ok(SplitDescription {
        tags,
        specification: Specification::new(body, test_case.source_file.as_str()),
    })
}

fn split_prefix(description: &str) -> (Vec<String>, &str) {
    match PREFIX_TAG_RE.captures(description) {
        Some(caps) => {
            let tag = caps[1].to_string();
            let body_start = caps.get(0).map_or(description.len(), |m| m.end());
            (vec![tag], &description[body_start..])
        }
        None => (Vec::new(), description),
    }
}

fn split_scan(description: &str) -> Result<(Vec<String>, &str)> {
    let tags: Vec<String> = SCAN_TAG_RE
        .captures_iter(description)
        .map(|caps| caps[1].to_string())
        .collect();
    if tags.is_empty() {
        return Ok((tags, description));
    }

    let body = SCAN_BODY_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ScanError::Internal(format!("no body found in {description:?}")))?;
    Ok((tags, body.as_str()))
}
