//! Reference resolution: variant dispatch over the parsed suffix.

use crate::error::Error;
use crate::spec::RefKind;

use super::remote::RemoteQuery;

/// Outcome of resolving a reference: a concrete ref plus the owner to
/// fetch from. The owner can differ from the input when a pull request's
/// head lives in a fork; that fork is where the right source is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    /// Concrete branch, tag, or commit identifier.
    pub reference: String,
    /// Owner of the repository to fetch from.
    pub owner: String,
}

/// Resolve a reference variant to a concrete ref.
///
/// `Direct` never issues a remote query; the other variants issue exactly
/// one. Every failure is fatal to this resolution and is never retried.
pub async fn resolve_reference<Q: RemoteQuery>(
    kind: &RefKind,
    owner: &str,
    repo: &str,
    query: &Q,
) -> Result<ResolvedRef, Error> {
    match kind {
        RefKind::Direct(value) => Ok(ResolvedRef {
            reference: value.clone(),
            owner: owner.to_string(),
        }),
        RefKind::PullRequest(number) => resolve_pull_request(owner, repo, *number, query).await,
        RefKind::LatestRelease => resolve_latest_release(owner, repo, query).await,
    }
}

async fn resolve_pull_request<Q: RemoteQuery>(
    owner: &str,
    repo: &str,
    number: u64,
    query: &Q,
) -> Result<ResolvedRef, Error> {
    let not_found = |source| Error::PullRequestNotFound {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
        source,
    };

    let info = query
        .pull_request(owner, repo, number)
        .await
        .map_err(|err| not_found(Some(err)))?;

    // An incomplete payload is indistinguishable from a substituted error
    // page, so it fails exactly like a transport error.
    let head = info.head.ok_or_else(|| not_found(None))?;
    let reference = head.branch.ok_or_else(|| not_found(None))?;
    let fork_owner = head
        .user
        .and_then(|user| user.login)
        .ok_or_else(|| not_found(None))?;

    tracing::debug!(%owner, %repo, number, head = %reference, fork = %fork_owner, "resolved pull request");

    Ok(ResolvedRef {
        reference,
        owner: fork_owner,
    })
}

async fn resolve_latest_release<Q: RemoteQuery>(
    owner: &str,
    repo: &str,
    query: &Q,
) -> Result<ResolvedRef, Error> {
    let releases = query
        .list_releases(owner, repo)
        .await
        .map_err(|source| Error::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
            source,
        })?;

    // The server orders the list most-recent first; take the head as-is.
    let latest = releases
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoReleasesFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })?;

    tracing::debug!(%owner, %repo, tag = %latest.tag_name, "resolved latest release");

    Ok(ResolvedRef {
        reference: latest.tag_name,
        owner: owner.to_string(),
    })
}
