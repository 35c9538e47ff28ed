use crate::domain::Version;
use std::fmt;

/// Non-fatal findings about the tags on HEAD.
/// The build proceeds, but these should be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// HEAD's version is not newer than the most recent one of its kind,
    /// usually because an older commit is checked out
    EarlierCheckout { head: Version, most_recent: Version },
    /// HEAD also carries tags that are not version-shaped
    NonVersionTags { tags: Vec<String> },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EarlierCheckout { head, most_recent } => write!(
                f,
                "HEAD is tagged with version {} but the most recent version is {}. \
                 Was this the intention (you might have checked out an earlier commit)?",
                head, most_recent
            ),
            Warning::NonVersionTags { tags } => write!(
                f,
                "HEAD was tagged with both version and non-version tags. Was this the intent? \
                 The non-version tags are: {}",
                tags.join(", ")
            ),
        }
    }
}
