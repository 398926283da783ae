//! Crate-level error taxonomy.

use crate::resolve::RemoteQueryError;

/// Errors surfaced by spec parsing and reference resolution.
///
/// Remote failures are wrapped into resolution-level variants rather than
/// leaked raw, so callers see the same taxonomy regardless of which
/// transport layer misbehaved. Every error is fatal to the resolution of
/// the spec that produced it; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The address string does not match the spec grammar.
    #[error("invalid repo spec `{spec}`; expected [username/]repo[/subdir][@ref|@*release|#pull]")]
    InvalidSpec {
        /// The rejected input string.
        spec: String,
    },

    /// No username was embedded in the spec and none was supplied.
    #[error("unknown username for `{repo}`; write the spec as `username/{repo}`")]
    UnknownUsername {
        /// Repository name from the spec, for the suggested fix.
        repo: String,
    },

    /// The pull request could not be found, or its metadata was incomplete.
    #[error("pull request #{number} not found in {owner}/{repo}")]
    PullRequestNotFound {
        owner: String,
        repo: String,
        number: u64,
        /// Absent when the response arrived but lacked the expected fields.
        #[source]
        source: Option<RemoteQueryError>,
    },

    /// The releases query failed outright.
    #[error("repository {owner}/{repo} not found")]
    RepositoryNotFound {
        owner: String,
        repo: String,
        #[source]
        source: RemoteQueryError,
    },

    /// The repository exists but has published no releases.
    #[error("no releases found for {owner}/{repo}")]
    NoReleasesFound { owner: String, repo: String },

    /// The configured API host cannot form a valid URL.
    #[error("invalid API host `{host}`")]
    InvalidHost { host: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
