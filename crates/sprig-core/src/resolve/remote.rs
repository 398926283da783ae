//! Remote query capability and its GitHub reference implementation.

use serde::Deserialize;

/// Repository API host used when the caller supplies none.
pub const DEFAULT_HOST: &str = "api.github.com";

const USER_AGENT: &str = "sprig/0.1.0";
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Failure of a remote query, before it is mapped into the crate taxonomy.
///
/// Callers of the resolver never see this type bare; it only travels as the
/// `#[source]` of a resolution error.
#[derive(Debug, thiserror::Error)]
pub enum RemoteQueryError {
    /// Connection, TLS, or request construction failure.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success status without a parseable API message.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Well-formed API error payload (a `message` field), any status.
    #[error("API error from {url}: {message}")]
    Api { url: String, message: String },

    /// Response body that does not match the expected shape.
    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

/// Pull request metadata, reduced to the fields resolution needs.
///
/// Every field is optional: a broken transport can substitute a generic
/// error page for the real payload, so a missing field is a resolver-level
/// error rather than a deserialization panic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestInfo {
    /// Head of the pull request: the branch to fetch, possibly in a fork.
    pub head: Option<PullRequestHead>,
}

/// The `head` object of a pull request payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestHead {
    /// Branch name of the head.
    #[serde(rename = "ref")]
    pub branch: Option<String>,
    /// Account owning the head branch.
    pub user: Option<HeadUser>,
}

/// Owner of a pull request head branch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadUser {
    pub login: Option<String>,
}

/// One release entry. The server orders the releases list most-recent
/// first; the resolver relies on that and never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

/// The two queries reference resolution may need from a repository API.
///
/// Implementations must distinguish transport/protocol failures (`Err`)
/// from well-formed empty results (e.g. an empty releases list).
pub trait RemoteQuery {
    /// Fetch pull request metadata by number.
    async fn pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestInfo, RemoteQueryError>;

    /// List releases for a repository, most-recent first, possibly empty.
    async fn list_releases(&self, owner: &str, repo: &str)
    -> Result<Vec<Release>, RemoteQueryError>;
}

/// [`RemoteQuery`] over the GitHub v3 REST API.
#[derive(Debug, Clone)]
pub struct GitHubApi {
    client: reqwest::Client,
    host: String,
    auth_token: Option<String>,
}

impl GitHubApi {
    /// Create a client for the given API host (e.g. `api.github.com`),
    /// optionally authenticating every request with an opaque token.
    pub fn new(
        host: impl Into<String>,
        auth_token: Option<String>,
    ) -> Result<Self, RemoteQueryError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(RemoteQueryError::Transport)?;

        Ok(Self {
            client,
            host: host.into(),
            auth_token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("https://{}/{}", self.host, path)
    }

    /// Issue one GET and validate the response shape.
    ///
    /// A 200 status alone is never trusted: a body carrying a `message`
    /// field is an API error page regardless of status code.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, RemoteQueryError> {
        tracing::debug!(%url, "remote query");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON);
        if let Some(token) = &self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(RemoteQueryError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(RemoteQueryError::Transport)?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|err| RemoteQueryError::Malformed {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return Err(RemoteQueryError::Api {
                url: url.to_string(),
                message: message.to_string(),
            });
        }

        if !status.is_success() {
            return Err(RemoteQueryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(value)
    }
}

impl RemoteQuery for GitHubApi {
    async fn pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestInfo, RemoteQueryError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/pulls/{number}"));
        let value = self.get_json(&url).await?;
        serde_json::from_value(value).map_err(|err| RemoteQueryError::Malformed {
            url,
            reason: err.to_string(),
        })
    }

    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Release>, RemoteQueryError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/releases"));
        let value = self.get_json(&url).await?;
        serde_json::from_value(value).map_err(|err| RemoteQueryError::Malformed {
            url,
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(host: &str) -> GitHubApi {
        GitHubApi::new(host, None).unwrap()
    }

    #[test]
    fn pull_request_endpoint() {
        let url = api("api.github.com").endpoint("repos/jimhester/covr/pulls/47");
        assert_eq!(url, "https://api.github.com/repos/jimhester/covr/pulls/47");
    }

    #[test]
    fn releases_endpoint_on_custom_host() {
        let url = api("github.example.com/api/v3").endpoint("repos/org/repo/releases");
        assert_eq!(
            url,
            "https://github.example.com/api/v3/repos/org/repo/releases"
        );
    }

    #[test]
    fn pull_request_payload_tolerates_missing_fields() {
        let info: PullRequestInfo = serde_json::from_value(serde_json::json!({
            "head": { "ref": "feature-x" }
        }))
        .unwrap();

        let head = info.head.unwrap();
        assert_eq!(head.branch.as_deref(), Some("feature-x"));
        assert!(head.user.is_none());
    }

    #[test]
    fn release_payload_requires_tag_name() {
        let result: Result<Vec<Release>, _> =
            serde_json::from_value(serde_json::json!([{ "name": "untagged" }]));
        assert!(result.is_err());
    }
}
