// Shared fixture: a throwaway git repository driven through git2.
#![allow(dead_code)]

use git2::{build::CheckoutBuilder, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Initialize a repository with a single empty commit
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        let test_repo = TestRepo { dir, repo };
        test_repo.commit_empty();
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Header location inside the temp dir (outside the git index)
    pub fn target_file(&self) -> PathBuf {
        self.dir.path().join("SwPackageVersion.h")
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Could not create signature")
    }

    /// Commit whatever is in the index on top of HEAD
    pub fn commit_empty(&self) -> String {
        let sig = Self::signature();
        let mut index = self.repo.index().expect("Could not get index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "...", &tree, &parents)
            .expect("Could not create commit")
            .to_string()
    }

    pub fn head_sha1(&self) -> String {
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Could not resolve HEAD")
            .id()
            .to_string()
    }

    /// `git tag -a -m "..." <name>`
    pub fn tag_annotated(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .tag(name, head.as_object(), &Self::signature(), "...", false)
            .expect("Could not create annotated tag");
    }

    /// `git tag <name>`
    pub fn tag_lightweight(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create lightweight tag");
    }

    /// `git checkout <tag>` (detached HEAD)
    pub fn checkout_tag(&self, name: &str) {
        let commit = self
            .repo
            .revparse_single(&format!("refs/tags/{}", name))
            .and_then(|obj| obj.peel_to_commit())
            .expect("Could not resolve tag");
        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
            .expect("Could not check out tree");
        self.repo
            .set_head_detached(commit.id())
            .expect("Could not detach HEAD");
    }

    /// `git branch <name>`
    pub fn branch(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .branch(name, &head, false)
            .expect("Could not create branch");
    }

    /// `git checkout <branch>`
    pub fn checkout_branch(&self, name: &str) {
        let refname = format!("refs/heads/{}", name);
        let commit = self
            .repo
            .find_reference(&refname)
            .and_then(|r| r.peel_to_commit())
            .expect("Could not resolve branch");
        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
            .expect("Could not check out tree");
        self.repo.set_head(&refname).expect("Could not set HEAD");
    }

    /// Append a line to a file in the working tree
    pub fn append(&self, file: &str, content: &str) {
        let path = self.dir.path().join(file);
        let mut existing = fs::read_to_string(&path).unwrap_or_default();
        existing.push_str(content);
        fs::write(path, existing).expect("Could not write file");
    }

    /// `git add <file>`
    pub fn stage(&self, file: &str) {
        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(file))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
    }
}
