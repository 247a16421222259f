// Durable single-key token storage.
//
// The persisted token is the only state shared across application
// restarts. Implementations read at the point of use; nothing is cached
// in memory, so a logout in one context is visible to the next read in
// the same storage scope.

use std::sync::RwLock;

use thiserror::Error;

/// Fixed storage key for the bearer token. An absent key means logged out.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage backend error: {0}")]
    Backend(String),
}

/// Thin accessors over a single fixed storage key.
pub trait TokenStore: Send + Sync {
    /// Persist the token, replacing any previous value.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Read the stored token. `None` means logged out.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

// ── OS keyring backend ──────────────────────────────────────────────

/// Token storage backed by the operating system keyring.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, TokenStoreError> {
        keyring::Entry::new(&self.service, TOKEN_KEY)
            .map_err(|e| TokenStoreError::Backend(e.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.entry()?
            .set_password(token)
            .map_err(|e| TokenStoreError::Backend(e.to_string()))
    }

    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TokenStoreError::Backend(e.to_string())),
        }
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(TokenStoreError::Backend(e.to_string())),
        }
    }
}

// ── In-memory backend ───────────────────────────────────────────────

/// In-memory token storage for tests and headless embedding.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| TokenStoreError::Backend("token lock poisoned".to_owned()))?;
        *slot = Some(token.to_owned());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let slot = self
            .token
            .read()
            .map_err(|_| TokenStoreError::Backend("token lock poisoned".to_owned()))?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| TokenStoreError::Backend("token lock poisoned".to_owned()))?;
        *slot = None;
        Ok(())
    }
}
