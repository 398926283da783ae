//! Spec grammar parser.

use std::fmt;

use crate::error::Error;

use super::reference::RefKind;

/// Branch name assumed when a spec carries no reference suffix.
pub const DEFAULT_BRANCH: &str = "master";

/// A parsed repo address.
///
/// Grammar (suffix-anchored, fail-fast):
///
/// ```text
/// spec   := [ username "/" ] repo [ "/" subdir ] [ suffix ]
/// suffix := "@*release" | "@" ref | "#" pull_number
/// ```
///
/// Optional captures that are empty are omitted (`None`), never stored as
/// empty strings, so downstream code tests presence, not emptiness.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository owner, when embedded in the address.
    pub username: Option<String>,
    /// Repository name. Always present and non-empty.
    pub repo: String,
    /// Subdirectory within the repository.
    pub subdir: Option<String>,
    /// Parsed reference suffix, if any.
    pub reference: Option<RefKind>,
}

impl RepoSpec {
    /// Create a spec with just a repository name.
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            username: None,
            repo: repo.into(),
            subdir: None,
            reference: None,
        }
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the subdirectory path.
    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    /// Set the reference suffix.
    pub fn with_reference(mut self, reference: RefKind) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Parse a spec string.
    ///
    /// The whole input must match the grammar; any non-matching remainder
    /// rejects the entire spec, there are no partial results.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidSpec {
            spec: spec.to_string(),
        };

        // Neither `@` nor `#` is legal in the repo or subdir, but both are
        // legal in the username. The suffix therefore starts at the first
        // sigil after the first `/` (greedy username); only a
        // single-segment spec searches from the start.
        let search_from = spec.find('/').map_or(0, |idx| idx + 1);
        let (body, reference) = match spec[search_from..].find(['@', '#']) {
            Some(idx) => {
                let (body, suffix) = spec.split_at(search_from + idx);
                (body, Some(parse_suffix(suffix).ok_or_else(invalid)?))
            }
            None => (spec, None),
        };

        // One trailing slash after the subdir is tolerated.
        let body = body.strip_suffix('/').unwrap_or(body);
        if body.is_empty() {
            return Err(invalid());
        }

        let segments: Vec<&str> = body.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid());
        }

        let (username, repo, subdir) = match segments.as_slice() {
            [repo] => (None, *repo, None),
            [username, repo] => (Some(*username), *repo, None),
            [username, repo, subdir @ ..] => (Some(*username), *repo, Some(subdir.join("/"))),
            [] => return Err(invalid()),
        };

        Ok(Self {
            username: username.map(str::to_string),
            repo: repo.to_string(),
            subdir,
            reference,
        })
    }

    /// The reference variant to resolve, falling back to a branch name when
    /// the spec carries no suffix.
    pub fn reference_or(&self, default_branch: &str) -> RefKind {
        self.reference
            .clone()
            .unwrap_or_else(|| RefKind::Direct(default_branch.to_string()))
    }
}

/// Parse the reference suffix, sigil included.
///
/// `@` is ambiguous between a release request and a literal ref; the
/// `*release` literal is tried first, and any other value starting with
/// `*` is rejected rather than treated as a ref.
fn parse_suffix(suffix: &str) -> Option<RefKind> {
    if let Some(value) = suffix.strip_prefix('@') {
        if value == "*release" {
            Some(RefKind::LatestRelease)
        } else if value.is_empty() || value.starts_with('*') {
            None
        } else {
            Some(RefKind::Direct(value.to_string()))
        }
    } else if let Some(digits) = suffix.strip_prefix('#') {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(RefKind::PullRequest)
    } else {
        None
    }
}

/// Canonical formatter; `parse` is its left-inverse.
impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(username) = &self.username {
            write!(f, "{username}/")?;
        }
        write!(f, "{}", self.repo)?;
        if let Some(subdir) = &self.subdir {
            write!(f, "/{subdir}")?;
        }
        match &self.reference {
            Some(RefKind::Direct(value)) => write!(f, "@{value}"),
            Some(RefKind::PullRequest(number)) => write!(f, "#{number}"),
            Some(RefKind::LatestRelease) => write!(f, "@*release"),
            None => Ok(()),
        }
    }
}
