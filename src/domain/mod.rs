//! Domain logic - version values and tag parsing, independent of git operations

pub mod changes;
pub mod registry;
pub mod tag;
pub mod version;

pub use changes::LocalChanges;
pub use registry::{most_recent_of_kind, HeadVersions, VersionRegistry};
pub use tag::{is_version_tag, parse_version_tag, TagObject, TagRecord, VersionTag};
pub use version::{Provenance, Version, VersionBump, VersionKind, FIRST_TEST_VERSION};
