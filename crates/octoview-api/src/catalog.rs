// User-facing message resolution for identity backend failures.
//
// The backend reports business-rule violations as exact message strings;
// the catalog maps the known ones to friendlier text and falls back per
// HTTP status class for everything else. The table is data, not logic:
// deployments can extend or replace entries from configuration, and an
// unknown backend message passes through unchanged rather than being
// swallowed.

use std::collections::HashMap;

/// Mapping table from backend error strings to user-facing messages,
/// plus per-status-class fallbacks when no backend message is available.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
    /// Request never reached the server (status 0).
    pub connectivity: String,
    /// HTTP 400 without a recognizable backend message.
    pub bad_request: String,
    /// HTTP 500 without a recognizable backend message.
    pub server_error: String,
    /// Any other failure.
    pub generic: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let overrides = [
            (
                "Invalid identifier or password",
                "Invalid email/username or password",
            ),
            (
                "Email or Username are already taken",
                "That email or username is already in use",
            ),
            (
                "Your account email is not confirmed",
                "You must confirm your email before signing in",
            ),
            (
                "Your account has been blocked by an administrator",
                "Your account has been blocked by an administrator",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        Self {
            overrides,
            connectivity: "Cannot reach the authentication server. Check that it is running."
                .to_owned(),
            bad_request: "Invalid input. Check the information you entered.".to_owned(),
            server_error: "Internal server error. Try again later.".to_owned(),
            generic: "An unexpected error occurred".to_owned(),
        }
    }
}

impl MessageCatalog {
    /// Add or replace a single backend-message mapping.
    pub fn with_override(
        mut self,
        backend_message: impl Into<String>,
        user_facing: impl Into<String>,
    ) -> Self {
        self.overrides
            .insert(backend_message.into(), user_facing.into());
        self
    }

    /// Merge mappings, e.g. from a configuration file.
    pub fn extend_overrides(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.overrides.extend(entries);
    }

    /// Resolve a user-facing message.
    ///
    /// A backend message wins: mapped if known, passed through verbatim if
    /// not. Without one, the status class picks the fallback.
    pub fn resolve(&self, backend_message: Option<&str>, status: u16) -> String {
        if let Some(message) = backend_message {
            return self
                .overrides
                .get(message)
                .cloned()
                .unwrap_or_else(|| message.to_owned());
        }
        match status {
            0 => self.connectivity.clone(),
            400 => self.bad_request.clone(),
            500 => self.server_error.clone(),
            _ => self.generic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_backend_message_is_mapped() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.resolve(Some("Invalid identifier or password"), 400),
            "Invalid email/username or password"
        );
    }

    #[test]
    fn unknown_backend_message_passes_through() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.resolve(Some("Quota exceeded for plan"), 400),
            "Quota exceeded for plan"
        );
    }

    #[test]
    fn status_class_fallbacks() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.resolve(None, 0), catalog.connectivity);
        assert_eq!(catalog.resolve(None, 400), catalog.bad_request);
        assert_eq!(catalog.resolve(None, 500), catalog.server_error);
        assert_eq!(catalog.resolve(None, 418), catalog.generic);
    }

    #[test]
    fn overrides_are_configurable() {
        let catalog = MessageCatalog::default()
            .with_override("Invalid identifier or password", "Wrong login");
        assert_eq!(
            catalog.resolve(Some("Invalid identifier or password"), 400),
            "Wrong login"
        );
    }
}
