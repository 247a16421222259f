// GitHub REST v3 issues client.
//
// Parses a repository URL into an owner/repo pair and lists the
// repository's issues with pagination. The v3 media type is attached as a
// default header on every request.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Issue, PageRequest, RepositoryMetadata, RepositoryRef};
use crate::transport::TransportConfig;

/// Upstream error bodies look like `{"message": "Not Found", ...}`.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the public issue-tracking API.
pub struct IssuesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IssuesClient {
    /// Create a new issues client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `https://api.github.com`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        Ok(Self {
            http: transport.build_client_with_headers(headers)?,
            base_url,
        })
    }

    /// The API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL parsing ──────────────────────────────────────────────────

    /// Parse a repository URL into a [`RepositoryRef`].
    ///
    /// The input is trimmed and one trailing slash is stripped; the owner
    /// and repo are the two path segments following the host. Anything
    /// after them is ignored. The scheme is optional.
    pub fn parse_repository_url(url: &str) -> Result<RepositoryRef, Error> {
        let cleaned = url.trim();
        let cleaned = cleaned.strip_suffix('/').unwrap_or(cleaned);

        let without_scheme = cleaned
            .split_once("://")
            .map_or(cleaned, |(_, rest)| rest);

        let mut segments = without_scheme.split('/');
        let _host = segments.next().filter(|s| !s.is_empty()).ok_or(Error::RepoUrl)?;
        let owner = segments
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(Error::RepoUrl)?;
        let repo = segments
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(Error::RepoUrl)?;

        Ok(RepositoryRef {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            url: cleaned.to_owned(),
        })
    }

    // ── Issue operations ─────────────────────────────────────────────

    /// List one page of the repository's issues, open and closed,
    /// most recently updated first.
    pub async fn get_repository_issues(
        &self,
        repository: &RepositoryRef,
        pagination: PageRequest,
    ) -> Result<Vec<Issue>, Error> {
        let url = self.repo_url(repository, Some("issues"))?;
        debug!("GET {} (page {})", url, pagination.page);

        let resp = self
            .http
            .get(url)
            .query(&[
                ("page", pagination.page.to_string()),
                ("per_page", pagination.per_page.to_string()),
                ("state", "all".to_owned()),
                ("sort", "updated".to_owned()),
                ("direction", "desc".to_owned()),
            ])
            .send()
            .await
            .map_err(transport_failure)?;

        parse_json(resp).await
    }

    /// Check that a repository exists and is publicly visible.
    pub async fn check_repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<RepositoryMetadata, Error> {
        let url = self.repo_url(repository, None)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport_failure)?;

        parse_json(resp).await
    }

    /// Build `{base}/repos/{owner}/{repo}[/{suffix}]`.
    fn repo_url(&self, repository: &RepositoryRef, suffix: Option<&str>) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = match suffix {
            Some(s) => format!("{base}/repos/{}/{}/{s}", repository.owner, repository.repo),
            None => format!("{base}/repos/{}/{}", repository.owner, repository.repo),
        };
        Url::parse(&full).map_err(Error::InvalidUrl)
    }
}

/// Deserialize a successful response, or extract the upstream error
/// message (falling back to the bare status line).
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(transport_failure)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(Error::Http {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview = body.get(..body.len().min(200)).unwrap_or(&body);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
        }
    })
}

fn transport_failure(err: reqwest::Error) -> Error {
    debug!(error = %err, "issues transport failure");
    Error::Http {
        status: 0,
        message: format!("connection failed: {err}"),
    }
}
