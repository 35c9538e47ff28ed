//! Generated header, console summary and version history.
//!
//! Nothing here runs unless validation passed.

use crate::config::PlaceholderConfig;
use crate::domain::{LocalChanges, Version, VersionKind, VersionRegistry};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Length of the abbreviated commit id
pub const SHORT_ID_LEN: usize = 12;

const BANNER: &str = "############################################################";

const HEADER_COMMENT: &str = "\
//--------------------------------------------------------------------------------------------------
// Notes:
// This file is autogenerated by tag-version invoked during building.
// Do not edit this file as changes will be overwritten during building.
//--------------------------------------------------------------------------------------------------
";

fn short_id(commit_id: &str) -> &str {
    commit_id.get(..SHORT_ID_LEN).unwrap_or(commit_id)
}

/// What gets stamped into the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStamp {
    pub major: u32,
    pub minor: u32,
    /// Abbreviated commit id, or `+` and the full id when there are local changes
    pub revision_hash: String,
    pub short_commit_id: String,
    /// Dotted version for the summary line
    pub version_label: String,
}

impl BuildStamp {
    /// Stamp from HEAD's primary version, or the placeholder for untagged builds
    pub fn new(
        head_version: Option<&Version>,
        head_commit_id: &str,
        changes: &LocalChanges,
        placeholder: &PlaceholderConfig,
    ) -> Self {
        let (major, minor, version_label) = match head_version {
            Some(version) => (version.major(), version.minor(), version.to_string()),
            None => (
                placeholder.major,
                placeholder.minor,
                format!("{}.{:02}.00", placeholder.major, placeholder.minor),
            ),
        };

        let revision_hash = if changes.is_dirty() {
            format!("+{}", head_commit_id)
        } else {
            short_id(head_commit_id).to_string()
        };

        BuildStamp {
            major,
            minor,
            revision_hash,
            short_commit_id: short_id(head_commit_id).to_string(),
            version_label,
        }
    }

    /// The C header text. The last line has no trailing newline.
    pub fn render_header(&self) -> String {
        let mut content = String::from(HEADER_COMMENT);
        content.push_str("#ifndef _SWPACKAGEVERSION_H_\n");
        content.push_str("#define _SWPACKAGEVERSION_H_\n");
        content.push_str(&format!("#define SW_VER_MAJOR {}\n", self.major));
        content.push_str(&format!("#define SW_VER_MINOR {}\n", self.minor));
        content.push_str(&format!("#define SW_REVISIONHASH \"{}\"\n", self.revision_hash));
        content.push_str("#endif");
        content
    }

    /// Four-line console summary
    pub fn render_summary(&self) -> String {
        format!(
            "{}\nSoftware version info.\nBuilding commit {}, tagged with version {}.\n{}",
            BANNER, self.short_commit_id, self.version_label, BANNER
        )
    }
}

/// Write the header to `path`, replacing any previous contents
pub fn write_header<P: AsRef<Path>>(path: P, stamp: &BuildStamp) -> Result<()> {
    fs::write(path, stamp.render_header())?;
    Ok(())
}

/// List the newest `count` versions of each kind, newest first
pub fn render_history(registry: &VersionRegistry, count: usize, first_test_version: u32) -> String {
    let mut lines = Vec::new();

    for (kind, title) in [
        (VersionKind::Release, "Recent release versions:"),
        (VersionKind::Test, "Recent test versions:"),
    ] {
        lines.push(title.to_string());
        let versions = registry.recent(kind, first_test_version, count);
        if versions.is_empty() {
            lines.push("  (none)".to_string());
        }
        for version in versions {
            lines.push(format!(
                "  {:<9} {:<20} {}",
                version.to_string(),
                version.tag_name().unwrap_or_default(),
                short_id(version.commit_id().unwrap_or_default())
            ));
        }
    }

    lines.join("\n")
}
