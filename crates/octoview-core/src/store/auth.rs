// Authentication view-state store.
//
// Per-action state machine: dispatch raises the loading flag and clears
// both messages; a violated validation rule rejects before any network
// call; the service result patches state. Each dispatch captures a
// generation number and stale completions are discarded, so a newer
// submission always wins over a superseded in-flight one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use octoview_api::{AuthResponse, IdentityClient, LoginCredentials, RegisterData, User};

use crate::dismiss::{self, DismissGuard};
use crate::token::TokenStore;
use crate::validate::{validate_login, validate_registration};

/// Authentication view-state. In steady state at most one of
/// `error`/`success` is set; both are cleared when a new action starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

pub struct AuthStore {
    client: IdentityClient,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<AuthState>,
    generation: AtomicU64,
}

impl AuthStore {
    pub fn new(client: IdentityClient, tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            client,
            tokens,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Current state snapshot (cheap clone).
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Sign in. Validation order: identifier-required,
    /// identifier-min-length, password-required, password-min-length.
    pub async fn login(&self, credentials: LoginCredentials) {
        let seq = self.begin_action();

        if let Err(e) = validate_login(&credentials) {
            self.reject(seq, e.to_string());
            return;
        }

        match self.client.login(&credentials).await {
            Ok(resp) => {
                let welcome = format!("Welcome back, {}!", resp.user.username);
                self.fulfill(seq, resp, welcome);
            }
            Err(e) => self.reject(seq, e.to_string()),
        }
    }

    /// Create an account. Validation order: username-required,
    /// username-min-length, username-charset, email-required, email-format,
    /// password-required, password-min-length.
    pub async fn register(&self, data: RegisterData) {
        let seq = self.begin_action();

        if let Err(e) = validate_registration(&data) {
            self.reject(seq, e.to_string());
            return;
        }

        match self.client.register(&data).await {
            Ok(resp) => {
                let welcome = format!("Account created! Welcome, {}!", resp.user.username);
                self.fulfill(seq, resp, welcome);
            }
            Err(e) => self.reject(seq, e.to_string()),
        }
    }

    /// Restore the signed-in user from the persisted token.
    ///
    /// The token is read from durable storage at the point of use; an
    /// absent token is a no-op (logged out).
    pub async fn fetch_current_user(&self) {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "token load failed");
                return;
            }
        };

        let seq = self.begin_action();
        let secret = SecretString::from(token.clone());

        match self.client.get_me(&secret).await {
            Ok(user) => self.patch_if_current(seq, move |s| {
                s.user = Some(user);
                s.token = Some(token);
                s.is_loading = false;
            }),
            Err(e) => self.reject(seq, e.to_string()),
        }
    }

    /// Clear the stored token and reset to the initial state. No network
    /// call is made.
    pub fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "token clear failed");
        }
        // Invalidate any in-flight request's pending patch.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| *s = AuthState::default());
        debug!("logged out");
    }

    /// Null out only the error message.
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    /// Null out only the success message.
    pub fn clear_success(&self) {
        self.state.send_modify(|s| s.success = None);
    }

    /// Timed auto-dismiss of the success banner. The pending clear is
    /// cancelled when the returned guard is dropped.
    pub fn dismiss_success_after(&self, delay: Duration) -> DismissGuard {
        let state = self.state.clone();
        dismiss::after(delay, move || {
            state.send_modify(|s| s.success = None);
        })
    }

    // ── Internal transitions ─────────────────────────────────────────

    /// Idle → Pending: bump the generation, raise the loading flag, and
    /// clear both messages.
    fn begin_action(&self) -> u64 {
        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
            s.success = None;
        });
        seq
    }

    /// Pending → Fulfilled: persist the token and patch the signed-in state.
    fn fulfill(&self, seq: u64, resp: AuthResponse, success: String) {
        if !self.is_current(seq) {
            debug!(seq, "discarding stale auth result");
            return;
        }
        if let Err(e) = self.tokens.save(&resp.jwt) {
            warn!(error = %e, "token save failed");
        }
        self.state.send_modify(move |s| {
            s.user = Some(resp.user);
            s.token = Some(resp.jwt);
            s.is_loading = false;
            s.success = Some(success);
        });
    }

    /// Pending → Rejected: surface the message and drop the loading flag.
    fn reject(&self, seq: u64, message: String) {
        self.patch_if_current(seq, move |s| {
            s.error = Some(message);
            s.is_loading = false;
        });
    }

    fn is_current(&self, seq: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == seq
    }

    /// Apply a patch only while `seq` is still the latest issued action.
    fn patch_if_current(&self, seq: u64, patch: impl FnOnce(&mut AuthState)) {
        if self.is_current(seq) {
            self.state.send_modify(patch);
        } else {
            debug!(seq, "discarding stale state patch");
        }
    }
}
