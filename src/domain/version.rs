use crate::error::{Result, TagVersionError};
use std::cmp::Ordering;
use std::fmt;

/// Order keys at or above this value belong to the test lineage (major 90 and up).
pub const FIRST_TEST_VERSION: u32 = 900_000;

/// Largest minor or build number that fits the flattened order key.
pub const MAX_COMPONENT: u32 = 99;

/// Where a version came from. Never takes part in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// Unix timestamp of the tag (tagger date) or tagged commit
    pub creator_date: Option<i64>,
    /// Software article number, e.g. 10006000
    pub product_number: Option<u32>,
    /// Commit the tag resolves to
    pub commit_id: Option<String>,
    /// Tag name without the `refs/tags/` prefix
    pub tag_name: Option<String>,
}

/// A major.minor.build version as stamped into firmware headers.
///
/// Minor and build are kept within [0, 99] so that the flattened
/// order key `major*10000 + minor*100 + build` stays collision free.
/// Equality and ordering look at the numbers only, so two tags that
/// carry the same numbers are the same version.
#[derive(Debug, Clone)]
pub struct Version {
    major: u32,
    minor: u32,
    build: u32,
    provenance: Provenance,
}

/// Which component to roll when computing a successor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Build,
}

/// Release and test versions are validated as separate lineages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Release,
    Test,
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKind::Release => write!(f, "release"),
            VersionKind::Test => write!(f, "test"),
        }
    }
}

impl Version {
    /// Create a new version, rejecting minor or build numbers above 99
    pub fn new(major: u32, minor: u32, build: u32) -> Result<Self> {
        if minor > MAX_COMPONENT {
            return Err(TagVersionError::version(format!(
                "Minor version {} is out of range 0-{}",
                minor, MAX_COMPONENT
            )));
        }
        if build > MAX_COMPONENT {
            return Err(TagVersionError::version(format!(
                "Build number {} is out of range 0-{}",
                build, MAX_COMPONENT
            )));
        }

        Ok(Version {
            major,
            minor,
            build,
            provenance: Provenance::default(),
        })
    }

    /// 0.00.00, the baseline of a lineage with no versions yet
    pub fn zero() -> Self {
        Version::from_order_key(0)
    }

    /// Decompose a flattened order key back into its three components.
    ///
    /// Keys only come from `order_key` plus a bump, so the major fits a
    /// `u32` except after bumping `u32::MAX`, where it saturates.
    fn from_order_key(key: u64) -> Self {
        Version {
            major: u32::try_from(key / 10_000).unwrap_or(u32::MAX),
            minor: (key % 10_000 / 100) as u32,
            build: (key % 100) as u32,
            provenance: Provenance::default(),
        }
    }

    /// Attach provenance to this version
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> u32 {
        self.build
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.provenance.tag_name.as_deref()
    }

    pub fn commit_id(&self) -> Option<&str> {
        self.provenance.commit_id.as_deref()
    }

    /// The flattened key used for every comparison
    pub fn order_key(&self) -> u64 {
        u64::from(self.major) * 10_000 + u64::from(self.minor) * 100 + u64::from(self.build)
    }

    /// Classify against the given test threshold
    pub fn kind(&self, first_test_version: u32) -> VersionKind {
        if self.order_key() < u64::from(first_test_version) {
            VersionKind::Release
        } else {
            VersionKind::Test
        }
    }

    /// Next version after rolling one component.
    ///
    /// The arithmetic happens on the order key, so carries propagate:
    /// rolling the build of 1.99.99 gives 2.00.00. The successor carries
    /// no provenance.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        let key = self.order_key();
        let next = match bump_type {
            VersionBump::Major => key + 10_000 - key % 10_000,
            VersionBump::Minor => key + 100 - key % 100,
            VersionBump::Build => key + 1,
        };
        Version::from_order_key(next)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}.{:02}", self.major, self.minor, self.build)
    }
}
