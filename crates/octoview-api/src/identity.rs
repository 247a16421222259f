// Identity backend HTTP client (Strapi-style local auth).
//
// Wraps `reqwest::Client` with URL construction against the backend's
// `/api` root and failure mapping through the MessageCatalog. Every error
// leaving this module carries a user-facing message.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::catalog::MessageCatalog;
use crate::error::Error;
use crate::models::{AuthResponse, LoginCredentials, RegisterData, User};
use crate::transport::TransportConfig;

/// The backend wraps failures as `{"error": {"message": "..."}}`.
#[derive(serde::Deserialize)]
struct BackendErrorBody {
    error: Option<BackendErrorInner>,
}

#[derive(serde::Deserialize)]
struct BackendErrorInner {
    message: Option<String>,
}

/// HTTP client for the identity backend.
///
/// `base_url` is the API root (e.g. `http://localhost:1337/api`); auth
/// endpoints hang off it at `auth/local` and `auth/local/register`.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Url,
    catalog: MessageCatalog,
}

impl IdentityClient {
    /// Create a new identity client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        transport: &TransportConfig,
        catalog: MessageCatalog,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            catalog,
        })
    }

    /// Create an identity client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, catalog: MessageCatalog) -> Self {
        Self {
            http,
            base_url,
            catalog,
        }
    }

    /// The backend API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The active message catalog.
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Build a full URL for a backend path under the API root.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Auth operations ──────────────────────────────────────────────

    /// Authenticate with an identifier (email or username) and password.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, Error> {
        let url = self.api_url("auth/local")?;
        debug!("POST {}", url);

        let body = json!({
            "identifier": credentials.identifier,
            "password": credentials.password.expose_secret(),
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;

        self.parse_json(resp).await
    }

    /// Register a new account.
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, Error> {
        let url = self.api_url("auth/local/register")?;
        debug!("POST {}", url);

        let body = json!({
            "username": data.username,
            "email": data.email,
            "password": data.password.expose_secret(),
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;

        self.parse_json(resp).await
    }

    /// Pre-submission hint: does an account with this email already exist?
    pub async fn check_email_exists(&self, email: &str) -> Result<bool, Error> {
        let url = self.api_url("users")?;
        debug!("GET {} (email filter)", url);

        let resp = self
            .http
            .get(url)
            .query(&[("filters[email][$eq]", email)])
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;

        let users: Vec<User> = self.parse_json(resp).await?;
        Ok(!users.is_empty())
    }

    /// Pre-submission hint: is this username already taken?
    pub async fn check_username_exists(&self, username: &str) -> Result<bool, Error> {
        let url = self.api_url("users")?;
        debug!("GET {} (username filter)", url);

        let resp = self
            .http
            .get(url)
            .query(&[("filters[username][$eq]", username)])
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;

        let users: Vec<User> = self.parse_json(resp).await?;
        Ok(!users.is_empty())
    }

    /// Fetch the user the given bearer token belongs to.
    pub async fn get_me(&self, token: &SecretString) -> Result<User, Error> {
        let url = self.api_url("users/me")?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| self.transport_failure(&e))?;

        self.parse_json(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Deserialize a successful response, or map the failure to a
    /// user-facing error.
    async fn parse_json<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_failure(&e))?;

        if !status.is_success() {
            return Err(self.map_failure(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview = body.get(..body.len().min(200)).unwrap_or(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
            }
        })
    }

    /// Map an HTTP failure to a user-facing error.
    ///
    /// A backend-reported message becomes `Error::Domain` (resolved through
    /// the catalog); anything else falls back by status class.
    fn map_failure(&self, status: u16, body: &str) -> Error {
        if let Ok(wrapper) = serde_json::from_str::<BackendErrorBody>(body) {
            if let Some(inner) = wrapper.error {
                return Error::Domain {
                    message: self.catalog.resolve(inner.message.as_deref(), status),
                };
            }
        }
        Error::Http {
            status,
            message: self.catalog.resolve(None, status),
        }
    }

    /// The request never produced a response: connectivity failure.
    fn transport_failure(&self, err: &reqwest::Error) -> Error {
        debug!(error = %err, "identity transport failure");
        Error::Http {
            status: 0,
            message: self.catalog.resolve(None, 0),
        }
    }
}
