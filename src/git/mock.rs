use crate::domain::{TagObject, TagRecord};
use crate::error::{Result, TagVersionError};
use crate::git::Repository;
use std::collections::BTreeMap;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: BTreeMap<String, TagRecord>,
    head: String,
    working_tree_diff: String,
    index_diff: String,
    ref_object_type_fails: bool,
    tags_pointing_at_head_fails: bool,
}

impl MockRepository {
    /// Create a mock repository whose HEAD is `head`
    pub fn new(head: impl Into<String>) -> Self {
        MockRepository {
            tags: BTreeMap::new(),
            head: head.into(),
            working_tree_diff: String::new(),
            index_diff: String::new(),
            ref_object_type_fails: false,
            tags_pointing_at_head_fails: false,
        }
    }

    /// Add an annotated tag resolving to `commit_id`
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.insert(TagRecord::new(name, commit_id, TagObject::Tag));
    }

    /// Add a lightweight tag resolving to `commit_id`
    pub fn add_lightweight_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.insert(TagRecord::new(name, commit_id, TagObject::Commit));
    }

    fn insert(&mut self, record: TagRecord) {
        self.tags.insert(record.name.clone(), record);
    }

    /// Move HEAD to another commit
    pub fn set_head(&mut self, commit_id: impl Into<String>) {
        self.head = commit_id.into();
    }

    pub fn set_working_tree_diff(&mut self, diff: impl Into<String>) {
        self.working_tree_diff = diff.into();
    }

    pub fn set_index_diff(&mut self, diff: impl Into<String>) {
        self.index_diff = diff.into();
    }

    /// Make every `ref_object_type` call fail
    pub fn fail_ref_object_type(&mut self) {
        self.ref_object_type_fails = true;
    }

    /// Make every `tags_pointing_at_head` call fail
    pub fn fail_tags_pointing_at_head(&mut self) {
        self.tags_pointing_at_head_fails = true;
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        Ok(self.tags.values().cloned().collect())
    }

    fn head_commit_id(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn working_tree_diff(&self) -> Result<String> {
        Ok(self.working_tree_diff.clone())
    }

    fn index_diff(&self) -> Result<String> {
        Ok(self.index_diff.clone())
    }

    fn tags_pointing_at_head(&self) -> Result<Vec<String>> {
        if self.tags_pointing_at_head_fails {
            return Err(TagVersionError::tag("Cannot list tags pointing at HEAD"));
        }
        Ok(self
            .tags
            .values()
            .filter(|t| t.commit_id == self.head)
            .map(|t| t.name.clone())
            .collect())
    }

    fn ref_object_type(&self, tag_name: &str) -> Result<TagObject> {
        if self.ref_object_type_fails {
            return Err(TagVersionError::tag(format!(
                "Cannot read object type of tag '{}'",
                tag_name
            )));
        }
        self.tags
            .get(tag_name)
            .map(|t| t.object.clone())
            .ok_or_else(|| TagVersionError::tag(format!("Cannot find tag '{}'", tag_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags_sorted_by_name() {
        let mut repo = MockRepository::new("c2");
        repo.add_tag("10006000/V2_00_00", "c2");
        repo.add_tag("10006000/V1_00_00", "c1");

        let names: Vec<_> = repo.list_tags().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["10006000/V1_00_00", "10006000/V2_00_00"]);
    }

    #[test]
    fn test_mock_repository_points_at_head() {
        let mut repo = MockRepository::new("c2");
        repo.add_tag("10006000/V1_00_00", "c1");
        repo.add_lightweight_tag("SomeTag", "c2");

        assert_eq!(repo.tags_pointing_at_head().unwrap(), vec!["SomeTag"]);
        assert_eq!(repo.ref_object_type("SomeTag").unwrap(), TagObject::Commit);
        assert!(repo.ref_object_type("missing").is_err());
    }

    #[test]
    fn test_mock_repository_failure_switches() {
        let mut repo = MockRepository::new("c1");
        repo.add_tag("10006000/V1_00_00", "c1");
        repo.fail_ref_object_type();
        repo.fail_tags_pointing_at_head();

        assert!(repo.ref_object_type("10006000/V1_00_00").is_err());
        assert!(repo.tags_pointing_at_head().is_err());
        assert_eq!(repo.list_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_mock_repository_diffs() {
        let mut repo = MockRepository::new("c1");
        assert!(repo.working_tree_diff().unwrap().is_empty());
        repo.set_index_diff("+x");
        assert_eq!(repo.index_diff().unwrap(), "+x");
    }
}
