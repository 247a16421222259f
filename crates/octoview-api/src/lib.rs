//! HTTP service clients for octoview.
//!
//! Two independent API surfaces, wrapped the same way:
//!
//! - **[`IdentityClient`]** — Strapi-style identity backend: local
//!   login/register, existence pre-checks, and fetching the current user
//!   with a bearer token. Failures are mapped to user-facing messages at
//!   this boundary through a configurable [`MessageCatalog`].
//!
//! - **[`IssuesClient`]** — GitHub REST v3 issue listing for a public
//!   repository, plus URL parsing into an owner/repo pair and a repository
//!   existence check.
//!
//! `octoview-core` layers reactive view-state stores on top of these
//! clients; nothing in this crate holds state beyond the HTTP client and
//! its base URL.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod issues;
pub mod models;
pub mod transport;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::MessageCatalog;
pub use error::Error;
pub use identity::IdentityClient;
pub use issues::IssuesClient;
pub use models::{
    AuthResponse, Issue, IssueAuthor, IssueState, Label, LoginCredentials, PageRequest,
    RegisterData, RepositoryMetadata, RepositoryRef, User,
};
pub use transport::TransportConfig;
