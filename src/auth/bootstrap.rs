//! Session bootstrap
//!
//! Runs once at startup and settles on exactly one access state:
//!
//! 1. Outside the host shell: local/demo, no gating.
//! 2. Inside it, the gate either denies (terminal) or lets the user through.
//! 3. For an allowed user, acquire a session, stopping at the first success:
//!    reuse the persisted session, sign in with derived credentials, sign up
//!    with the same credentials. "Already registered" on sign-up means the
//!    configured secret is wrong.
//!
//! Acquisition is bounded by the configured timeout.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::error::AuthError;
use crate::models::Session;
use crate::remote::{AuthService, RemoteBackend};
use crate::storage::SessionStore;

use super::credentials::DerivedCredentials;
use super::gate::{AccessGate, GateDecision, HostContext};

/// Why the run is local-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalReason {
    /// Not inside the host shell
    Demo,
    RemoteUnconfigured,
    NoCredentials,
    TimedOut,
    ServiceUnavailable(String),
    IncorrectCredentials,
    SignedOut,
}

impl fmt::Display for LocalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => write!(f, "demo mode"),
            Self::RemoteUnconfigured => write!(f, "no remote backend configured"),
            Self::NoCredentials => write!(f, "no account secret configured"),
            Self::TimedOut => write!(f, "session bootstrap timed out"),
            Self::ServiceUnavailable(msg) => write!(f, "auth service unavailable ({})", msg),
            Self::IncorrectCredentials => {
                write!(f, "account exists but the configured credentials were rejected")
            }
            Self::SignedOut => write!(f, "signed out"),
        }
    }
}

/// The single outcome of the bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    Remote(Session),
    LocalOnly(LocalReason),
    Denied { allowed: String, found: String },
}

impl AccessState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Remote(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::LocalOnly(LocalReason::Demo))
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(session) => write!(f, "signed in ({})", session.user_id()),
            Self::LocalOnly(reason) => write!(f, "local only: {}", reason),
            Self::Denied { allowed, found } => {
                write!(f, "Access restricted. Allowed: @{}, Found: @{}", allowed, found)
            }
        }
    }
}

/// Settles the access state for one run
pub struct SessionBootstrap<'a> {
    config: &'a AppConfig,
    backend: Option<&'a dyn RemoteBackend>,
    sessions: &'a SessionStore,
}

impl<'a> SessionBootstrap<'a> {
    pub fn new(
        config: &'a AppConfig,
        backend: Option<&'a dyn RemoteBackend>,
        sessions: &'a SessionStore,
    ) -> Self {
        Self {
            config,
            backend,
            sessions,
        }
    }

    /// Run with the configured timeout
    pub async fn run(&self, host: &HostContext) -> AccessState {
        self.run_with_timeout(host, self.config.bootstrap_timeout())
            .await
    }

    #[instrument(skip(self, host), fields(in_host = host.in_host_shell))]
    pub async fn run_with_timeout(&self, host: &HostContext, limit: Duration) -> AccessState {
        let gate = AccessGate::new(self.config.allowed_identity.clone());
        let username = match gate.check(host) {
            GateDecision::Unrestricted => return AccessState::LocalOnly(LocalReason::Demo),
            GateDecision::Denied { allowed, found } => {
                warn!(%allowed, %found, "host user rejected by access gate");
                return AccessState::Denied { allowed, found };
            }
            GateDecision::Allowed { username } => username,
        };

        let Some(backend) = self.backend else {
            return AccessState::LocalOnly(LocalReason::RemoteUnconfigured);
        };

        let auth = backend.auth();
        match tokio::time::timeout(limit, self.acquire(auth.as_ref(), &username)).await {
            Ok(state) => state,
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "session bootstrap timed out");
                AccessState::LocalOnly(LocalReason::TimedOut)
            }
        }
    }

    async fn acquire(&self, auth: &dyn AuthService, username: &str) -> AccessState {
        if let Some(session) = self.reuse_stored(auth).await {
            info!(user_id = %session.user_id(), "reusing stored session");
            return AccessState::Remote(session);
        }

        let Some(creds) = DerivedCredentials::derive(username, &self.config.account) else {
            return AccessState::LocalOnly(LocalReason::NoCredentials);
        };

        match auth.sign_in(&creds.email, &creds.password).await {
            Ok(session) => return self.established(session),
            Err(e) => info!(error = %e, "sign-in failed, trying sign-up"),
        }

        match auth.sign_up(&creds.email, &creds.password).await {
            Ok(session) => self.established(session),
            Err(AuthError::AlreadyRegistered) => {
                warn!("account already registered with different credentials");
                AccessState::LocalOnly(LocalReason::IncorrectCredentials)
            }
            Err(e) => {
                warn!(error = %e, "sign-up failed");
                AccessState::LocalOnly(LocalReason::ServiceUnavailable(e.to_string()))
            }
        }
    }

    async fn reuse_stored(&self, auth: &dyn AuthService) -> Option<Session> {
        let stored = self.sessions.load()?;

        if stored.is_expired_at(Utc::now()) {
            self.discard_stored();
            return None;
        }

        match auth.get_user(&stored.access_token).await {
            Ok(user) => Some(Session { user, ..stored }),
            Err(AuthError::SessionRejected) => {
                self.discard_stored();
                None
            }
            Err(e) => {
                warn!(error = %e, "could not validate stored session");
                None
            }
        }
    }

    fn established(&self, session: Session) -> AccessState {
        info!(user_id = %session.user_id(), "session established");
        if let Err(e) = self.sessions.save(&session) {
            warn!(error = %e, "failed to persist session");
        }
        AccessState::Remote(session)
    }

    fn discard_stored(&self) {
        if let Err(e) = self.sessions.discard() {
            warn!(error = %e, "failed to discard stored session");
        }
    }
}
