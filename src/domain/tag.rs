use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Product code, then `/V<major>_<minor>[_<build>]`, e.g. `10006000/V1_23_45`.
///
/// Only the start is anchored; trailing text after a complete match is ignored.
const VERSION_TAG_PATTERN: &str = r"^(1000[0-9]{4})/V([1-9]?[0-9])_([0-9]{2})(?:_([0-9]{2}))?";

fn version_tag_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_TAG_PATTERN).ok()).as_ref()
}

/// The fields of a version-shaped tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTag {
    pub product_number: u32,
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

/// Parse a tag name such as `10006000/V1_23_45`.
///
/// Returns `None` when the name is not version-shaped. The product number is
/// not checked against any allow-list here.
///
/// # Example
/// ```
/// # use tag_version::domain::tag::parse_version_tag;
/// let tag = parse_version_tag("10006000/V1_00").unwrap();
/// assert_eq!((tag.product_number, tag.major, tag.minor, tag.build), (10006000, 1, 0, 0));
/// assert!(parse_version_tag("v1.0.0").is_none());
/// ```
pub fn parse_version_tag(tag_name: &str) -> Option<VersionTag> {
    let caps = version_tag_regex()?.captures(tag_name)?;

    let product_number = caps.get(1)?.as_str().parse().ok()?;
    let major = caps.get(2)?.as_str().parse().ok()?;
    let minor = caps.get(3)?.as_str().parse().ok()?;
    let build = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    Some(VersionTag {
        product_number,
        major,
        minor,
        build,
    })
}

/// Whether a tag name is version-shaped
pub fn is_version_tag(tag_name: &str) -> bool {
    parse_version_tag(tag_name).is_some()
}

/// What a tag ref points at directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagObject {
    /// Lightweight tag: the ref names a commit
    Commit,
    /// Annotated tag: the ref names a tag object
    Tag,
    /// Tree or blob
    Other(String),
}

impl fmt::Display for TagObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagObject::Commit => write!(f, "commit"),
            TagObject::Tag => write!(f, "tag"),
            TagObject::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// One tag as reported by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag name without `refs/tags/`
    pub name: String,
    /// Commit the tag resolves to after peeling annotated tags
    pub commit_id: String,
    /// Tagger time for annotated tags, commit time for lightweight ones
    pub creator_timestamp: Option<i64>,
    pub object: TagObject,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>, object: TagObject) -> Self {
        TagRecord {
            name: name.into(),
            commit_id: commit_id.into(),
            creator_timestamp: None,
            object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str) -> Option<(u32, u32, u32, u32)> {
        parse_version_tag(name).map(|t| (t.product_number, t.major, t.minor, t.build))
    }

    #[test]
    fn test_version_tag_pattern_compiles() {
        assert!(version_tag_regex().is_some());
    }

    #[test]
    fn test_parse_full_tag() {
        assert_eq!(parsed("10006000/V1_23_45"), Some((10006000, 1, 23, 45)));
        assert_eq!(parsed("10009999/V3_14_15"), Some((10009999, 3, 14, 15)));
    }

    #[test]
    fn test_parse_missing_build_defaults_to_zero() {
        assert_eq!(parsed("10006000/V1_00"), Some((10006000, 1, 0, 0)));
    }

    #[test]
    fn test_parse_two_digit_major() {
        assert_eq!(parsed("10006000/V13_00_00"), Some((10006000, 13, 0, 0)));
        assert_eq!(parsed("10006000/V91_00_00"), Some((10006000, 91, 0, 0)));
    }

    #[test]
    fn test_parse_unrecognized_product_still_parses() {
        assert_eq!(parsed("10001234/V1_00_00"), Some((10001234, 1, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_non_version_tags() {
        assert_eq!(parsed("SomeTag"), None);
        assert_eq!(parsed("v1.0.0"), None);
        assert_eq!(parsed("20006000/V1_00_00"), None);
        assert_eq!(parsed("1000600/V1_00_00"), None);
        assert_eq!(parsed("10006000/V1_0"), None);
        assert_eq!(parsed("10006000/V01_00"), None);
        assert_eq!(parsed("10006000/v1_00_00"), None);
        assert_eq!(parsed("release/10006000/V1_00_00"), None);
    }

    #[test]
    fn test_is_version_tag() {
        assert!(is_version_tag("10006000/V2_01"));
        assert!(!is_version_tag("nightly"));
    }

    #[test]
    fn test_tag_object_display() {
        assert_eq!(TagObject::Commit.to_string(), "commit");
        assert_eq!(TagObject::Tag.to_string(), "tag");
        assert_eq!(TagObject::Other("tree".to_string()).to_string(), "tree");
    }
}
