//! Git operations abstraction layer
//!
//! The version checks need a handful of facts about the repository: its tags,
//! the HEAD commit, and whether anything is uncommitted. This module puts those
//! queries behind the [Repository] trait.
//!
//! - [repository::Git2Repository]: the real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use tag_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head_commit_id()?;
//! for tag in repo.list_tags()? {
//!     if tag.commit_id == head {
//!         println!("HEAD is tagged {}", tag.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{TagObject, TagRecord};
use crate::error::Result;

/// Repository metadata needed to validate and stamp a build
///
/// Every call is a single request with no partial results. Failures are
/// returned as [crate::error::TagVersionError] and are never confused with
/// a rule violation.
pub trait Repository {
    /// All tags, sorted by ref name
    ///
    /// Each record carries the commit the tag ultimately resolves to. For
    /// annotated tags that is the pointed-at commit, not the tag object.
    fn list_tags(&self) -> Result<Vec<TagRecord>>;

    /// Full SHA-1 of the HEAD commit
    fn head_commit_id(&self) -> Result<String>;

    /// Patch text of unstaged changes (index to working tree). Empty when clean.
    fn working_tree_diff(&self) -> Result<String>;

    /// Patch text of staged changes (HEAD to index). Empty when clean.
    fn index_diff(&self) -> Result<String>;

    /// Names of all tags, version-shaped or not, that resolve to HEAD
    fn tags_pointing_at_head(&self) -> Result<Vec<String>>;

    /// What `refs/tags/<tag_name>` points at directly
    ///
    /// # Returns
    /// * `Ok(TagObject::Commit)` - lightweight tag
    /// * `Ok(TagObject::Tag)` - annotated tag
    /// * `Err` - if the tag doesn't exist or there's a Git error
    fn ref_object_type(&self, tag_name: &str) -> Result<TagObject>;
}
