use crate::error::Result;
use crate::git::Repository;

/// Uncommitted modifications in the working tree and in the index.
///
/// Holds the raw diff text. A diff that is empty after trimming counts as clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalChanges {
    pub working_tree_diff: String,
    pub index_diff: String,
}

impl LocalChanges {
    pub fn new(working_tree_diff: impl Into<String>, index_diff: impl Into<String>) -> Self {
        LocalChanges {
            working_tree_diff: working_tree_diff.into(),
            index_diff: index_diff.into(),
        }
    }

    /// Ask the repository for both diffs
    pub fn collect<R: Repository + ?Sized>(repo: &R) -> Result<Self> {
        Ok(LocalChanges {
            working_tree_diff: repo.working_tree_diff()?,
            index_diff: repo.index_diff()?,
        })
    }

    pub fn has_working_tree_changes(&self) -> bool {
        !self.working_tree_diff.trim().is_empty()
    }

    pub fn has_index_changes(&self) -> bool {
        !self.index_diff.trim().is_empty()
    }

    /// Either kind of change
    pub fn is_dirty(&self) -> bool {
        self.has_working_tree_changes() || self.has_index_changes()
    }
}
