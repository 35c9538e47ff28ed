use thiserror::Error;

use crate::domain::{Version, VersionKind};

/// Unified error type for tag-version operations
///
/// These are failures of the environment (repository access, configuration,
/// file I/O), never verdicts about the version tags themselves. See
/// [VersionTagError] for those.
#[derive(Error, Debug)]
pub enum TagVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-version
pub type Result<T> = std::result::Result<T, TagVersionError>;

impl TagVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TagVersionError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TagVersionError::Tag(msg.into())
    }
}

/// A version tag on HEAD that breaks the versioning rules.
///
/// Each variant maps to the process exit code reported by [VersionTagError::code].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VersionTagError {
    #[error("The version {version} has already been used")]
    AlreadyUsed { version: Version },

    #[error("HEAD is tagged but has local changes. This is not allowed.")]
    LocalChanges,

    #[error("HEAD is tagged but has staged changes. This is not allowed.")]
    StagedChanges,

    #[error("HEAD seems to be tagged with multiple versions. At least the tag {tag} and {first_tag} have different versions.")]
    MultipleVersions { tag: String, first_tag: String },

    #[error("You assigned a lightweight tag ({tag}) to HEAD, you should use annotated tags (git tag -a)")]
    LightweightTag { tag: String },

    #[error("You skipped a {kind} version, the next version should be either {}.", either(.valid_next))]
    SkippedVersion {
        kind: VersionKind,
        valid_next: Vec<Version>,
    },
}

impl VersionTagError {
    /// Exit code for this violation (1 to 5)
    pub fn code(&self) -> u8 {
        match self {
            VersionTagError::AlreadyUsed { .. } => 1,
            VersionTagError::LocalChanges | VersionTagError::StagedChanges => 2,
            VersionTagError::MultipleVersions { .. } => 3,
            VersionTagError::LightweightTag { .. } => 4,
            VersionTagError::SkippedVersion { .. } => 5,
        }
    }
}

/// "a or b" for two versions, "a, b, or c" for more.
fn either(versions: &[Version]) -> String {
    match versions {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}, or {}", head.join(", "), last)
        }
    }
}
