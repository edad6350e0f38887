//! Account credentials derived from the host username

use std::fmt;

use crate::config::AccountConfig;

/// Identifier and secret used for automatic sign-in and sign-up
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for DerivedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DerivedCredentials {
    /// `"{lowercased username}@{domain}"` plus the configured secret
    ///
    /// Returns `None` when no secret is configured.
    pub fn derive(username: &str, account: &AccountConfig) -> Option<Self> {
        let secret = account.secret.as_deref().filter(|s| !s.is_empty())?;
        Some(Self {
            email: format!(
                "{}@{}",
                username.trim().to_lowercase(),
                account.domain.trim()
            ),
            password: secret.to_string(),
        })
    }
}
