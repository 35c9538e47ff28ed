use crate::domain::{
    is_version_tag, most_recent_of_kind, HeadVersions, LocalChanges, TagObject, Version,
    VersionBump, VersionKind, VersionRegistry,
};
use crate::error::{Result, TagVersionError, VersionTagError};
use crate::git::Repository;
use crate::warning::Warning;

/// Outcome of validating HEAD's version tags
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// `Err` holds the first violation found; later checks did not run
    pub result: std::result::Result<(), VersionTagError>,
    /// Warnings collected before the pipeline finished or stopped
    pub warnings: Vec<Warning>,
}

impl Validation {
    /// 0 on success, otherwise the violation's code
    pub fn code(&self) -> u8 {
        match &self.result {
            Ok(()) => 0,
            Err(violation) => violation.code(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error_message(&self) -> Option<String> {
        self.result.as_ref().err().map(ToString::to_string)
    }
}

/// Why the check pipeline stopped early
enum Halt {
    Violation(VersionTagError),
    Repository(TagVersionError),
}

impl From<VersionTagError> for Halt {
    fn from(err: VersionTagError) -> Self {
        Halt::Violation(err)
    }
}

impl From<TagVersionError> for Halt {
    fn from(err: TagVersionError) -> Self {
        Halt::Repository(err)
    }
}

/// Runs the versioning checks against the tags on HEAD
///
/// Checks run in a fixed order and the first violation wins:
///
/// 1. HEAD's version was already used on another commit (code 1)
/// 2. HEAD's version skips a version (code 5), or is older than the most
///    recent one (warning)
/// 3. A version tag on HEAD is lightweight (code 4)
/// 4. HEAD carries two different versions (code 3)
/// 5. The working tree or index has uncommitted changes (code 2)
/// 6. HEAD also has non-version tags (warning)
///
/// Checks 1 and 2 look at the primary head version only. Multiple versions
/// on HEAD are rejected later by check 4, so a duplicate or skipped first
/// tag reports code 1 or 5 rather than 3.
pub struct RuleEngine<'a, R: Repository + ?Sized> {
    repo: &'a R,
    first_test_version: u32,
}

impl<'a, R: Repository + ?Sized> RuleEngine<'a, R> {
    pub fn new(repo: &'a R, first_test_version: u32) -> Self {
        RuleEngine {
            repo,
            first_test_version,
        }
    }

    /// Validate HEAD. A HEAD without version tags always passes silently.
    ///
    /// # Returns
    /// * `Ok(Validation)` - the verdict, with any warnings
    /// * `Err` - if the repository could not be queried
    pub fn validate(&self, registry: &VersionRegistry, changes: &LocalChanges) -> Result<Validation> {
        let mut warnings = Vec::new();

        let Some(head) = registry.head() else {
            return Ok(Validation {
                result: Ok(()),
                warnings,
            });
        };

        let result = match self.run_checks(head, registry.historical(), changes, &mut warnings) {
            Ok(()) => Ok(()),
            Err(Halt::Violation(violation)) => Err(violation),
            Err(Halt::Repository(err)) => return Err(err),
        };

        Ok(Validation { result, warnings })
    }

    fn run_checks(
        &self,
        head: &HeadVersions,
        historical: &[Version],
        changes: &LocalChanges,
        warnings: &mut Vec<Warning>,
    ) -> std::result::Result<(), Halt> {
        let primary = head.primary();

        check_version_unused(primary, historical)?;
        if let Some(warning) = check_no_skipped_version(primary, historical, self.first_test_version)? {
            warnings.push(warning);
        }
        self.check_annotated(head)?;
        check_single_version(head)?;
        check_clean(changes)?;
        if let Some(warning) = self.check_stray_tags()? {
            warnings.push(warning);
        }

        Ok(())
    }

    fn check_annotated(&self, head: &HeadVersions) -> std::result::Result<(), Halt> {
        for version in head.iter() {
            let Some(tag_name) = version.tag_name() else {
                continue;
            };
            if self.repo.ref_object_type(tag_name)? == TagObject::Commit {
                return Err(VersionTagError::LightweightTag {
                    tag: tag_name.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_stray_tags(&self) -> Result<Option<Warning>> {
        let stray: Vec<String> = self
            .repo
            .tags_pointing_at_head()?
            .into_iter()
            .filter(|name| !is_version_tag(name))
            .collect();

        if stray.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Warning::NonVersionTags { tags: stray }))
        }
    }
}

/// Fails if `head` equals any historical version by number
pub fn check_version_unused(
    head: &Version,
    historical: &[Version],
) -> std::result::Result<(), VersionTagError> {
    if historical.iter().any(|v| v == head) {
        return Err(VersionTagError::AlreadyUsed {
            version: head.clone(),
        });
    }
    Ok(())
}

/// Valid successors of `most_recent`. Test versions may not roll major.
pub fn valid_successors(most_recent: &Version, kind: VersionKind) -> Vec<Version> {
    let bumps: &[VersionBump] = match kind {
        VersionKind::Release => &[VersionBump::Major, VersionBump::Minor, VersionBump::Build],
        VersionKind::Test => &[VersionBump::Minor, VersionBump::Build],
    };
    bumps.iter().map(|bump| most_recent.bump(*bump)).collect()
}

/// Compares `head` with the newest historical version of the same kind.
///
/// Returns a warning when `head` is not newer (an older commit is checked
/// out), and fails when it is newer but not a direct successor. With no
/// history of that kind the baseline is 0.00.00.
pub fn check_no_skipped_version(
    head: &Version,
    historical: &[Version],
    first_test_version: u32,
) -> std::result::Result<Option<Warning>, VersionTagError> {
    let kind = head.kind(first_test_version);
    let most_recent = most_recent_of_kind(historical, kind, first_test_version)
        .cloned()
        .unwrap_or_else(Version::zero);

    if *head <= most_recent {
        return Ok(Some(Warning::EarlierCheckout {
            head: head.clone(),
            most_recent,
        }));
    }

    let valid_next = valid_successors(&most_recent, kind);
    if !valid_next.contains(head) {
        return Err(VersionTagError::SkippedVersion { kind, valid_next });
    }

    Ok(None)
}

/// Fails if any head version differs from the primary one
pub fn check_single_version(head: &HeadVersions) -> std::result::Result<(), VersionTagError> {
    let primary = head.primary();
    if let Some(other) = head.iter().find(|v| *v != primary) {
        return Err(VersionTagError::MultipleVersions {
            tag: other.tag_name().unwrap_or_default().to_string(),
            first_tag: primary.tag_name().unwrap_or_default().to_string(),
        });
    }
    Ok(())
}

/// Fails on unstaged changes first, then on staged changes
pub fn check_clean(changes: &LocalChanges) -> std::result::Result<(), VersionTagError> {
    if changes.has_working_tree_changes() {
        return Err(VersionTagError::LocalChanges);
    }
    if changes.has_index_changes() {
        return Err(VersionTagError::StagedChanges);
    }
    Ok(())
}
