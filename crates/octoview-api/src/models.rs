// Wire types for both API surfaces.
//
// Identity types follow the Strapi local-auth shapes; issue types mirror
// the GitHub REST v3 issue listing. Passwords are `SecretString` so they
// never appear in debug output or logs.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// ── Identity ────────────────────────────────────────────────────────

/// Login form payload: email-or-username plus password.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub identifier: String,
    pub password: SecretString,
}

/// Registration form payload.
#[derive(Debug, Clone)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Successful login/register response: the user record and a JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: User,
}

/// The identity backend's user record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub blocked: Option<bool>,
}

// ── Issues ──────────────────────────────────────────────────────────

/// A repository reference derived from a URL.
///
/// Only constructed by
/// [`IssuesClient::parse_repository_url`](crate::IssuesClient::parse_repository_url);
/// `url` is the cleaned input (trimmed, no trailing slash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
    pub url: String,
}

/// Issue lifecycle state as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueAuthor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Immutable issue record mirroring the upstream API shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: IssueAuthor,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: u64,
    pub html_url: String,
}

/// Repository existence/visibility metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub open_issues_count: u64,
}

/// Pagination parameters for the issue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}
