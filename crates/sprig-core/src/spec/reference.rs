//! Reference variants: the three ways a spec can name what to fetch.

/// A parsed reference suffix.
///
/// The variant decides whether resolution needs a remote query at all:
/// `Direct` resolves to itself, the other two require one API call each.
/// New reference kinds are added here plus one match arm in the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    /// Literal branch, tag, or commit identifier (`@v1.2.3`).
    Direct(String),
    /// Pull request number (`#123`); the head branch and its owner must be
    /// looked up, and the owner may turn out to be a fork.
    PullRequest(u64),
    /// Sentinel for the tag of the most recent release (`@*release`).
    LatestRelease,
}

impl RefKind {
    /// Check if this reference is a literal name or commit.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct(_))
    }

    /// Check if this reference is a pull request number.
    pub fn is_pull_request(&self) -> bool {
        matches!(self, Self::PullRequest(_))
    }

    /// Check if this reference is the latest-release sentinel.
    pub fn is_latest_release(&self) -> bool {
        matches!(self, Self::LatestRelease)
    }

    /// Get the literal value if this is a direct reference.
    pub fn as_direct(&self) -> Option<&str> {
        match self {
            Self::Direct(value) => Some(value),
            _ => None,
        }
    }

    /// Get the number if this is a pull request reference.
    pub fn as_pull_request(&self) -> Option<u64> {
        match self {
            Self::PullRequest(number) => Some(*number),
            _ => None,
        }
    }
}
