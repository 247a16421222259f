// Explicit dependency injection for store consumers.
//
// Constructed once at process start and passed to whichever component or
// handler needs it; stores are never looked up through globals.

use std::sync::Arc;

use octoview_api::{IdentityClient, IssuesClient};

use crate::store::auth::AuthStore;
use crate::store::issues::IssueStore;
use crate::token::TokenStore;

/// Holds the two store instances for the life of the application.
///
/// Cheaply cloneable; clones share the same stores.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<AuthStore>,
    pub issues: Arc<IssueStore>,
}

impl AppContext {
    pub fn new(
        identity: IdentityClient,
        issues: IssuesClient,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthStore::new(identity, tokens)),
            issues: Arc::new(IssueStore::new(issues)),
        }
    }
}
