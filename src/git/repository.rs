use crate::domain::{TagObject, TagRecord};
use crate::error::{Result, TagVersionError};
use git2::{Diff, DiffFormat, ObjectType, ReferenceType, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        Ok(head.peel_to_commit()?)
    }

    /// Tag ref names without the `refs/tags/` prefix, sorted by ref name
    fn tag_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(|s| s.to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn find_tag_reference(&self, tag_name: &str) -> Result<git2::Reference<'_>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        self.repo.find_reference(&reference_name).map_err(|e| {
            TagVersionError::tag(format!("Cannot find tag '{}': {}", tag_name, e))
        })
    }

    /// The direct ref behind a tag name. Symbolic tag refs are followed,
    /// `None` when one dangles.
    fn direct_tag_reference(&self, tag_name: &str) -> Result<Option<git2::Reference<'_>>> {
        let reference = self.find_tag_reference(tag_name)?;
        if reference.kind() == Some(ReferenceType::Symbolic) {
            return Ok(reference.resolve().ok());
        }
        Ok(Some(reference))
    }

    fn tag_record(&self, tag_name: &str) -> Result<Option<TagRecord>> {
        let Some(reference) = self.direct_tag_reference(tag_name)? else {
            return Ok(None);
        };
        let target = reference
            .target()
            .ok_or_else(|| TagVersionError::tag(format!("Tag '{}' has no target", tag_name)))?;
        let object = self.repo.find_object(target, None)?;

        // Annotated tags are peeled through the tag object to whatever it tags.
        let peeled = reference
            .peel(ObjectType::Any)
            .map_err(|e| TagVersionError::tag(format!("Cannot peel tag '{}': {}", tag_name, e)))?;

        let creator_timestamp = match object.kind() {
            Some(ObjectType::Tag) => object
                .as_tag()
                .and_then(|tag| tag.tagger())
                .map(|sig| sig.when().seconds()),
            _ => peeled.as_commit().map(|commit| commit.time().seconds()),
        };

        Ok(Some(TagRecord {
            name: tag_name.to_string(),
            commit_id: peeled.id().to_string(),
            creator_timestamp,
            object: object_kind(object.kind()),
        }))
    }
}

fn object_kind(kind: Option<ObjectType>) -> TagObject {
    match kind {
        Some(ObjectType::Commit) => TagObject::Commit,
        Some(ObjectType::Tag) => TagObject::Tag,
        Some(other) => TagObject::Other(other.str().to_string()),
        None => TagObject::Other("unknown".to_string()),
    }
}

/// Render a diff as patch text, like `git diff` prints it
fn patch_text(diff: &Diff<'_>) -> Result<String> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;

    Ok(text)
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        let mut records = Vec::new();
        for name in self.tag_names()? {
            if let Some(record) = self.tag_record(&name)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn head_commit_id(&self) -> Result<String> {
        Ok(self.head_commit()?.id().to_string())
    }

    fn working_tree_diff(&self) -> Result<String> {
        let diff = self.repo.diff_index_to_workdir(None, None)?;
        patch_text(&diff)
    }

    fn index_diff(&self) -> Result<String> {
        let tree = self.head_commit()?.tree()?;
        let diff = self.repo.diff_tree_to_index(Some(&tree), None, None)?;
        patch_text(&diff)
    }

    fn tags_pointing_at_head(&self) -> Result<Vec<String>> {
        let head = self.head_commit()?.id();
        let mut names = Vec::new();

        for name in self.tag_names()? {
            let reference = self.find_tag_reference(&name)?;
            if let Ok(object) = reference.peel(ObjectType::Any) {
                if object.id() == head {
                    names.push(name);
                }
            }
        }

        Ok(names)
    }

    fn ref_object_type(&self, tag_name: &str) -> Result<TagObject> {
        let target = self
            .direct_tag_reference(tag_name)?
            .and_then(|reference| reference.target())
            .ok_or_else(|| TagVersionError::tag(format!("Tag '{}' has no target", tag_name)))?;
        let object = self.repo.find_object(target, None)?;

        Ok(object_kind(object.kind()))
    }
}
