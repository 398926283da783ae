//! The fully-resolved descriptor handed to download/install collaborators.

use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::spec::RepoSpec;

use super::remote::DEFAULT_HOST;
use super::resolver::ResolvedRef;
use super::ResolveDefaults;

/// A fully-specified, fetchable artifact descriptor.
///
/// `reference` is always a concrete, literal ref by the time this record
/// exists; pull numbers and release sentinels never survive resolution.
/// Never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDescriptor {
    /// Repository API host, e.g. `api.github.com`.
    pub host: String,
    /// Repository owner. Non-empty.
    pub username: String,
    /// Repository name. Non-empty.
    pub repo: String,
    /// Subdirectory to install from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,
    /// Concrete branch, tag, or commit identifier.
    pub reference: String,
    /// Known commit SHA, opaque to resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Opaque token for the download transport. Never serialized.
    #[serde(skip)]
    pub auth_token: Option<String>,
}

/// Merge parser output, resolver output, and caller-supplied defaults.
///
/// Precedence, highest first: values embedded in the spec string, then
/// caller-supplied defaults, then library defaults. The username arrives
/// through [`ResolvedRef`], which already reflects both the embedded-vs-
/// supplied choice and any pull-request fork override.
pub fn assemble(
    spec: &RepoSpec,
    resolved: ResolvedRef,
    defaults: &ResolveDefaults,
) -> ResolvedDescriptor {
    ResolvedDescriptor {
        host: defaults
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        username: resolved.owner,
        repo: spec.repo.clone(),
        subdir: spec.subdir.clone().or_else(|| defaults.subdir.clone()),
        reference: resolved.reference,
        sha: defaults.sha.clone(),
        auth_token: defaults.auth_token.clone(),
    }
}

impl ResolvedDescriptor {
    /// Build the zipball retrieval URL for this descriptor.
    ///
    /// The ref is percent-encoded as a single path segment, so branch
    /// names containing `/` stay one segment.
    pub fn download_url(&self) -> Result<Url, Error> {
        let invalid_host = || Error::InvalidHost {
            host: self.host.clone(),
        };

        let mut url =
            Url::parse(&format!("https://{}", self.host)).map_err(|_| invalid_host())?;
        url.path_segments_mut()
            .map_err(|()| invalid_host())?
            .extend(["repos", &self.username, &self.repo, "zipball", &self.reference]);

        Ok(url)
    }

    /// Reproduction record for this resolution, carrying both the current
    /// and the legacy field-naming conventions for older consumers.
    pub fn metadata(&self) -> DescriptorMetadata {
        DescriptorMetadata {
            remote_type: "github",
            remote_host: self.host.clone(),
            remote_repo: self.repo.clone(),
            remote_username: self.username.clone(),
            remote_ref: self.reference.clone(),
            remote_sha: self.sha.clone(),
            remote_subdir: self.subdir.clone(),
            github_repo: self.repo.clone(),
            github_username: self.username.clone(),
            github_ref: self.reference.clone(),
            github_sha1: self.sha.clone(),
            github_subdir: self.subdir.clone(),
        }
    }
}

/// Serialized metadata for lockfiles and package descriptions.
///
/// The `Github*` fields duplicate the `Remote*` ones under the legacy
/// naming convention; consumers predating the generic host support still
/// read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorMetadata {
    #[serde(rename = "RemoteType")]
    pub remote_type: &'static str,
    #[serde(rename = "RemoteHost")]
    pub remote_host: String,
    #[serde(rename = "RemoteRepo")]
    pub remote_repo: String,
    #[serde(rename = "RemoteUsername")]
    pub remote_username: String,
    #[serde(rename = "RemoteRef")]
    pub remote_ref: String,
    #[serde(rename = "RemoteSha", skip_serializing_if = "Option::is_none")]
    pub remote_sha: Option<String>,
    #[serde(rename = "RemoteSubdir", skip_serializing_if = "Option::is_none")]
    pub remote_subdir: Option<String>,
    #[serde(rename = "GithubRepo")]
    pub github_repo: String,
    #[serde(rename = "GithubUsername")]
    pub github_username: String,
    #[serde(rename = "GithubRef")]
    pub github_ref: String,
    #[serde(rename = "GithubSHA1", skip_serializing_if = "Option::is_none")]
    pub github_sha1: Option<String>,
    #[serde(rename = "GithubSubdir", skip_serializing_if = "Option::is_none")]
    pub github_subdir: Option<String>,
}
