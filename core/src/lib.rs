//! Core types for test specification maps.
//!
//! This crate defines the data model shared by the scanner and the CLI:
//!
//! - [`TestCase`] — a raw description literal found in a test source file.
//! - [`Specification`] — a description with its tag stripped, plus its file.
//! - [`Requirement`] — one `(tag, description)` row of a requirement table.
//! - [`SpecificationMap`] — tag to specifications, in first-seen tag order.
//! - [`SpecificationSet`] — the tagged map plus the untagged specifications.
//!
//! # Example
//!
//! ```
//! use spec_map_core::*;
//!
//! let mut set = SpecificationSet::new();
//! set.tagged.push("checkout", Specification::new("user can pay", "app_test.dart"));
//! set.untagged.push(Specification::new("no tag here", "app_test.dart"));
//!
//! assert_eq!(set.tagged.len(), 1);
//! assert_eq!(set.untagged.len(), 1);
//! ```

mod types;

pub use types::*;
