//! Reactive view-state layer between `octoview-api` and UI consumers.
//!
//! This crate owns the stores that presentation components subscribe to:
//!
//! - **[`AuthStore`]** — authentication view-state. Validates form input
//!   client-side (no network call on a violated rule), drives the identity
//!   client, persists the session token through a [`TokenStore`], and
//!   patches its `watch`-observable state from results.
//!
//! - **[`IssueStore`]** — repository issue listing view-state. Parses a
//!   repository URL, pages through the issue list, and patches state.
//!
//! - **[`AppContext`]** — explicit dependency-injection container holding
//!   the two store instances. Constructed once at startup and passed to
//!   whichever component needs it; no global lookups.
//!
//! Both stores use latest-wins semantics: every action captures a
//! generation number and a completion only patches state while its
//! generation is still the newest, so a superseded in-flight request can
//! never clobber a later one.

pub mod context;
pub mod dismiss;
pub mod pager;
pub mod store;
pub mod token;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use context::AppContext;
pub use dismiss::DismissGuard;
pub use pager::Pager;
pub use store::auth::{AuthState, AuthStore};
pub use store::issues::{IssueListState, IssueStore};
pub use token::{KeyringTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore, TokenStoreError};
pub use validate::ValidationError;
