//! Type definitions for the specification map data model.
//!
//! Every type here is built once per run and then only read. The types are
//! designed for serialization with [`serde`] so a reconciled map can be
//! emitted as JSON as well as rendered as text.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// A raw test description found in a test source file.
///
/// # Examples
///
/// ```
/// use spec_map_core::TestCase;
///
/// let case = TestCase::new("checkout: user can pay", "integration_test/app_test.dart");
/// assert_eq!(case.description, "checkout: user can pay");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// The literal string argument of the test call.
    pub description: String,
    /// Path of the file the description was found in.
    pub source_file: String,
}

impl TestCase {
    pub fn new(description: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            source_file: source_file.into(),
        }
    }
}

/// The tag-stripped body of a test description, paired with its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub description: String,
    pub source_file: String,
}

impl Specification {
    pub fn new(description: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            source_file: source_file.into(),
        }
    }
}

/// One row of the requirement table.
///
/// Requirements keep the order they were parsed in and are never
/// deduplicated; that order drives report ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub tag: String,
    pub description: String,
}

impl Requirement {
    pub fn new(tag: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            description: description.into(),
        }
    }
}

/// Mapping from tag to the specifications carrying it.
///
/// Tags iterate in the order they were first seen and each bucket keeps
/// specifications in encounter order, so two runs over the same input always
/// produce the same map.
///
/// # Examples
///
/// ```
/// use spec_map_core::{Specification, SpecificationMap};
///
/// let mut map = SpecificationMap::new();
/// map.push("login", Specification::new("user can sign in", "a.dart"));
/// map.push("checkout", Specification::new("user can pay", "a.dart"));
/// map.push("login", Specification::new("user can sign out", "b.dart"));
///
/// let tags: Vec<&str> = map.tags().collect();
/// assert_eq!(tags, ["login", "checkout"]);
/// assert_eq!(map.get("login").map(<[_]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecificationMap {
    buckets: IndexMap<String, Vec<Specification>>,
}

impl SpecificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `spec` to the bucket for `tag`, creating the bucket at the end
    /// of the tag order if it does not exist yet.
    pub fn push(&mut self, tag: &str, spec: Specification) {
        match self.buckets.entry(tag.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(spec),
            Entry::Vacant(entry) => {
                entry.insert(vec![spec]);
            }
        }
    }

    /// Returns the specifications recorded for `tag`, if any.
    pub fn get(&self, tag: &str) -> Option<&[Specification]> {
        self.buckets.get(tag).map(Vec::as_slice)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.buckets.contains_key(tag)
    }

    /// Tags in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// `(tag, specifications)` pairs in first-seen tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Specification])> {
        self.buckets
            .iter()
            .map(|(tag, specs)| (tag.as_str(), specs.as_slice()))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total bucket entries; a specification filed under several tags counts
    /// once per tag.
    pub fn occurrence_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Aggregated specifications: the tagged map plus everything without a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationSet {
    pub tagged: SpecificationMap,
    pub untagged: Vec<Specification>,
}

impl SpecificationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no specification was recorded at all.
    pub fn is_empty(&self) -> bool {
        self.tagged.is_empty() && self.untagged.is_empty()
    }
}
