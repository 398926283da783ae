//! Reference resolution pipeline.
//!
//! Control flow for one spec: parse -> variant dispatch (at most one
//! remote query) -> assemble. Resolutions hold no shared mutable state,
//! so callers may run any number of them concurrently.

mod descriptor;
mod remote;
mod resolver;

pub use descriptor::{DescriptorMetadata, ResolvedDescriptor, assemble};
pub use remote::{
    DEFAULT_HOST, GitHubApi, HeadUser, PullRequestHead, PullRequestInfo, Release, RemoteQuery,
    RemoteQueryError,
};
pub use resolver::{ResolvedRef, resolve_reference};

use crate::error::Error;
use crate::spec::{DEFAULT_BRANCH, RepoSpec};

/// Caller-supplied fallbacks shared across a resolution run.
///
/// Everything here loses to values embedded in the spec string itself.
#[derive(Debug, Clone, Default)]
pub struct ResolveDefaults {
    /// Fallback owner for specs that embed none. Deprecated; embed the
    /// username in the spec instead.
    pub username: Option<String>,
    /// Fallback reference for specs without a suffix. Library default is
    /// [`DEFAULT_BRANCH`].
    pub reference: Option<String>,
    /// Fallback subdirectory for specs without one.
    pub subdir: Option<String>,
    /// Repository API host. Library default is [`DEFAULT_HOST`].
    pub host: Option<String>,
    /// Opaque auth token, passed through to the descriptor.
    pub auth_token: Option<String>,
    /// Known commit SHA, recorded in descriptor metadata only.
    pub sha: Option<String>,
}

/// Resolve one spec string into a fetchable descriptor.
pub async fn resolve_spec<Q: RemoteQuery>(
    input: &str,
    defaults: &ResolveDefaults,
    query: &Q,
) -> Result<ResolvedDescriptor, Error> {
    let spec = RepoSpec::parse(input)?;

    // The owner must be known before resolution: pull-request lookup
    // queries by owner, and only afterwards may a fork override it.
    let owner = match (&spec.username, &defaults.username) {
        (Some(embedded), _) => embedded.clone(),
        (None, Some(supplied)) => {
            tracing::warn!(
                username = %supplied,
                "passing `username` separately is deprecated; write the spec as `{supplied}/{}`",
                spec.repo
            );
            supplied.clone()
        }
        (None, None) => {
            return Err(Error::UnknownUsername {
                repo: spec.repo.clone(),
            });
        }
    };

    let kind = spec.reference_or(defaults.reference.as_deref().unwrap_or(DEFAULT_BRANCH));
    let resolved = resolve_reference(&kind, &owner, &spec.repo, query).await?;

    Ok(assemble(&spec, resolved, defaults))
}

/// Resolve a batch of specs against shared defaults.
///
/// Returns one result per input, preserving input order. Each spec
/// resolves independently; a failure in one never aborts the rest.
pub async fn resolve_specs<Q: RemoteQuery, S: AsRef<str>>(
    inputs: &[S],
    defaults: &ResolveDefaults,
    query: &Q,
) -> Vec<Result<ResolvedDescriptor, Error>> {
    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        results.push(resolve_spec(input.as_ref(), defaults, query).await);
    }
    results
}
