//! Grouping split descriptions by tag.

use spec_map_core::{SpecificationSet, TestCase};

use crate::error::Result;
use crate::tag::{TagMode, split_description};

/// Folds `test_cases` into a [`SpecificationSet`].
///
/// Each specification is appended to the bucket of every tag detected in its
/// description, or to the untagged list when there is none. Buckets and tags
/// keep encounter order, so the result depends only on the input sequence.
///
/// # Examples
///
/// ```
/// use spec_map_core::TestCase;
/// use spec_map_scan::aggregate::aggregate;
/// use spec_map_scan::tag::TagMode;
///
/// let cases = [
///     TestCase::new("checkout: user can pay", "app_test.dart"),
///     TestCase::new("no tag here", "app_test.dart"),
/// ];
/// let set = aggregate(&cases, TagMode::Prefix).unwrap();
/// assert_eq!(set.tagged.get("checkout").unwrap()[0].description, "user can pay");
/// assert_eq!(set.untagged[0].description, "no tag here");
/// ```
pub fn aggregate<'a, I>(test_cases: I, mode: TagMode) -> Result<SpecificationSet>
where
    I: IntoIterator<Item = &'a TestCase>,
{
    let mut set = SpecificationSet::new();
    for test_case in test_cases {
        let split = split_description(test_case, mode)?;
        if split.tags.is_empty() {
            set.untagged.push(split.specification);
            continue;
        }
        for tag in &split.tags {
            set.tagged.push(tag, split.specification.clone());
        }
    }
    Ok(set)
}
