//! Main workflow orchestration logic
//!
//! Collects tag data from the repository, validates HEAD, and on success
//! writes the version header. Kept free of clap so it can be driven from
//! tests or other tools.

use std::path::PathBuf;

use crate::analyzer::RuleEngine;
use crate::config::Config;
use crate::domain::{LocalChanges, VersionRegistry};
use crate::error::{Result, VersionTagError};
use crate::git::Repository;
use crate::output::{self, BuildStamp};
use crate::warning::Warning;

/// Arguments for the stamping workflow
#[derive(Debug, Clone, PartialEq)]
pub struct StampArgs {
    /// Where to write the generated header
    pub output: PathBuf,

    /// List this many recent versions of each kind after the summary
    pub history: Option<usize>,
}

/// Result of a stamping run that reached a verdict
#[derive(Debug, Clone, PartialEq)]
pub struct StampOutcome {
    /// Set when HEAD's tags broke a rule; nothing was written
    pub error: Option<VersionTagError>,

    pub warnings: Vec<Warning>,

    /// Console summary, present on success
    pub summary: Option<String>,

    /// Recent version listing, present on success when requested
    pub history: Option<String>,
}

impl StampOutcome {
    /// Process exit code: 0 on success, 1 to 5 for a violation
    pub fn code(&self) -> u8 {
        self.error.as_ref().map_or(0, VersionTagError::code)
    }
}

/// Stamping workflow
///
/// 1. Read all tags and the HEAD commit
/// 2. Build the version registry
/// 3. Read working tree and index changes
/// 4. Validate HEAD's version tags
/// 5. On success write the header and render the summary
///
/// # Returns
///
/// * `Ok(StampOutcome)` - validation finished, successfully or not
/// * `Err` - the repository could not be queried or the header not written
pub fn run_stamp<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &StampArgs,
) -> Result<StampOutcome> {
    let records = repo.list_tags()?;
    let head_commit_id = repo.head_commit_id()?;
    let registry = VersionRegistry::build(&records, &head_commit_id, &config.product_numbers);
    let changes = LocalChanges::collect(repo)?;

    let validation = RuleEngine::new(repo, config.first_test_version).validate(&registry, &changes)?;

    if let Err(violation) = validation.result {
        return Ok(StampOutcome {
            error: Some(violation),
            warnings: validation.warnings,
            summary: None,
            history: None,
        });
    }

    let stamp = BuildStamp::new(
        registry.head_version(),
        &head_commit_id,
        &changes,
        &config.placeholder,
    );
    output::write_header(&args.output, &stamp)?;

    let history = args
        .history
        .map(|count| output::render_history(&registry, count, config.first_test_version));

    Ok(StampOutcome {
        error: None,
        warnings: validation.warnings,
        summary: Some(stamp.render_summary()),
        history,
    })
}
