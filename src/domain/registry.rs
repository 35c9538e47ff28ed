use super::tag::{parse_version_tag, TagRecord};
use super::version::{Provenance, Version, VersionKind};

/// Versions tagged on HEAD, in tag-name order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadVersions(Vec<Version>);

impl HeadVersions {
    /// Returns `None` for an empty list so "no version on HEAD" stays distinct.
    pub fn new(versions: Vec<Version>) -> Option<Self> {
        if versions.is_empty() {
            None
        } else {
            Some(HeadVersions(versions))
        }
    }

    /// The first version by tag name. The already-used and skip checks only
    /// look at this one.
    pub fn primary(&self) -> &Version {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Version> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Highest version of the given kind in `versions`
pub fn most_recent_of_kind(
    versions: &[Version],
    kind: VersionKind,
    first_test_version: u32,
) -> Option<&Version> {
    versions
        .iter()
        .filter(|v| v.kind(first_test_version) == kind)
        .max()
}

/// All versions found in the repository's tags, split by whether they sit on HEAD
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionRegistry {
    historical: Vec<Version>,
    head: Option<HeadVersions>,
}

impl VersionRegistry {
    /// Build the registry from tag records already sorted by ref name.
    ///
    /// Tags that are not version-shaped or whose product number is not in
    /// `product_numbers` are dropped. Survivors keep their relative order
    /// in both partitions.
    pub fn build(records: &[TagRecord], head_commit_id: &str, product_numbers: &[u32]) -> Self {
        let mut historical = Vec::new();
        let mut head = Vec::new();

        for record in records {
            let Some(parsed) = parse_version_tag(&record.name) else {
                continue;
            };
            if !product_numbers.contains(&parsed.product_number) {
                continue;
            }
            // Parsed minor and build are two digits, so this only fails on a
            // pattern change.
            let Ok(version) = Version::new(parsed.major, parsed.minor, parsed.build) else {
                continue;
            };
            let version = version.with_provenance(Provenance {
                creator_date: record.creator_timestamp,
                product_number: Some(parsed.product_number),
                commit_id: Some(record.commit_id.clone()),
                tag_name: Some(record.name.clone()),
            });

            if record.commit_id == head_commit_id {
                head.push(version);
            } else {
                historical.push(version);
            }
        }

        VersionRegistry {
            historical,
            head: HeadVersions::new(head),
        }
    }

    /// Versions on commits other than HEAD
    pub fn historical(&self) -> &[Version] {
        &self.historical
    }

    /// Versions on HEAD, or `None` if HEAD carries no recognized version tag
    pub fn head(&self) -> Option<&HeadVersions> {
        self.head.as_ref()
    }

    /// Shortcut for the primary head version
    pub fn head_version(&self) -> Option<&Version> {
        self.head.as_ref().map(HeadVersions::primary)
    }

    /// Up to `count` versions of `kind` from both partitions, newest first
    pub fn recent(&self, kind: VersionKind, first_test_version: u32, count: usize) -> Vec<&Version> {
        let head = self.head.iter().flat_map(HeadVersions::iter);
        let mut versions: Vec<&Version> = self
            .historical
            .iter()
            .chain(head)
            .filter(|v| v.kind(first_test_version) == kind)
            .collect();
        versions.sort_by(|a, b| b.cmp(a));
        versions.truncate(count);
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tag::TagObject;
    use crate::domain::version::FIRST_TEST_VERSION;

    const PRODUCTS: &[u32] = &[10006000, 10006001, 10006010, 10006020, 10006030];

    fn record(name: &str, commit: &str) -> TagRecord {
        TagRecord::new(name, commit, TagObject::Tag)
    }

    fn v(major: u32, minor: u32, build: u32) -> Version {
        Version::new(major, minor, build).unwrap()
    }

    #[test]
    fn test_build_filters_and_partitions() {
        let records = vec![
            record("10006000/V1_00_00", "c1"),
            record("10006000/V2_00_00", "c3"),
            record("10006001/V3_00", "head"),
            record("10009999/V4_00_00", "c4"),
            record("SomeTag", "head"),
        ];

        let registry = VersionRegistry::build(&records, "head", PRODUCTS);

        assert_eq!(registry.historical(), &[v(1, 0, 0), v(2, 0, 0)]);
        let head = registry.head().unwrap();
        assert_eq!(head.len(), 1);
        assert_eq!(head.primary(), &v(3, 0, 0));
        assert_eq!(head.primary().tag_name(), Some("10006001/V3_00"));
        assert_eq!(head.primary().provenance().product_number, Some(10006001));
        assert_eq!(head.primary().commit_id(), Some("head"));
    }

    #[test]
    fn test_no_version_on_head_is_none() {
        let records = vec![record("10006000/V1_00_00", "c1"), record("SomeTag", "head")];
        let registry = VersionRegistry::build(&records, "head", PRODUCTS);
        assert!(registry.head().is_none());
        assert!(registry.head_version().is_none());
        assert_eq!(registry.historical().len(), 1);
    }

    #[test]
    fn test_head_versions_keep_tag_order() {
        let records = vec![
            record("10006000/V1_00_00", "head"),
            record("10006020/V1_00_00", "head"),
            record("10006030/V2_00_00", "head"),
        ];
        let registry = VersionRegistry::build(&records, "head", PRODUCTS);
        let names: Vec<_> = registry.head().unwrap().iter().filter_map(Version::tag_name).collect();
        assert_eq!(names, ["10006000/V1_00_00", "10006020/V1_00_00", "10006030/V2_00_00"]);
        assert!(registry.historical().is_empty());
    }

    #[test]
    fn test_duplicate_numbers_are_kept() {
        let records = vec![record("10006000/V1_00_00", "c1"), record("10006001/V1_00_00", "c2")];
        let registry = VersionRegistry::build(&records, "head", PRODUCTS);
        assert_eq!(registry.historical().len(), 2);
    }

    #[test]
    fn test_most_recent_per_kind() {
        let records = vec![
            record("10006000/V1_05_00", "c1"),
            record("10006000/V2_00_00", "c2"),
            record("10006000/V91_00_00", "c3"),
            record("10006000/V91_00_20", "c4"),
        ];
        let registry = VersionRegistry::build(&records, "head", PRODUCTS);
        let historical = registry.historical();
        assert_eq!(
            most_recent_of_kind(historical, VersionKind::Release, FIRST_TEST_VERSION),
            Some(&v(2, 0, 0))
        );
        assert_eq!(
            most_recent_of_kind(historical, VersionKind::Test, FIRST_TEST_VERSION),
            Some(&v(91, 0, 20))
        );
        assert_eq!(
            most_recent_of_kind(&historical[..2], VersionKind::Test, FIRST_TEST_VERSION),
            None
        );
    }

    #[test]
    fn test_recent_includes_head_newest_first() {
        let records = vec![
            record("10006000/V1_00_00", "c1"),
            record("10006000/V1_01_00", "c2"),
            record("10006000/V1_02_00", "head"),
            record("10006000/V91_00_00", "c3"),
        ];
        let registry = VersionRegistry::build(&records, "head", PRODUCTS);
        let recent = registry.recent(VersionKind::Release, FIRST_TEST_VERSION, 2);
        assert_eq!(recent, vec![&v(1, 2, 0), &v(1, 1, 0)]);
    }
}
