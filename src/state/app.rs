//! The application state container
//!
//! One `AppState` exists per run. It owns the four collections, the access
//! state settled by the bootstrap and the handles needed to persist
//! changes: the data service when signed in, otherwise the local snapshots.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::auth::{prepare_host, AccessState, Haptic, HostContext, HostShell, LocalReason, SessionBootstrap};
use crate::config::{AppConfig, NomadPaths};
use crate::error::{FinanceError, FinanceResult};
use crate::models::expense::sort_newest_first;
use crate::models::settings::{DEFAULT_USER_NAME, DEMO_USER_NAME};
use crate::models::{Asset, Expense, Income, Ledger, Session, Settings};
use crate::remote::{AuthService, DataService, RemoteBackend};
use crate::storage::{demo_ledger, LocalStore, SessionStore};

pub struct AppState {
    ledger: Ledger,
    access: AccessState,
    host: HostContext,
    auth: Option<Arc<dyn AuthService>>,
    data: Option<Arc<dyn DataService>>,
    local: LocalStore,
    sessions: SessionStore,
    shell: Arc<dyn HostShell>,
    persist_locally: bool,
    session_tx: watch::Sender<Option<Session>>,
}

impl AppState {
    /// Assemble a state for an already-settled access state, with an empty ledger
    pub fn new(
        paths: &NomadPaths,
        host: HostContext,
        access: AccessState,
        backend: Option<&dyn RemoteBackend>,
        shell: Arc<dyn HostShell>,
        local_fallback: bool,
    ) -> Self {
        let session = access.session().cloned();
        let (auth, data) = match (backend, &session) {
            (Some(backend), Some(session)) => (Some(backend.auth()), Some(backend.data(session))),
            _ => (None, None),
        };
        let persist_locally = local_fallback && session.is_none() && !access.is_denied();
        let (session_tx, _) = watch::channel(session);

        Self {
            ledger: Ledger::default(),
            access,
            host,
            auth,
            data,
            local: LocalStore::new(paths.clone()),
            sessions: SessionStore::new(paths.session_file()),
            shell,
            persist_locally,
            session_tx,
        }
    }

    /// Bootstrap the session and load the data for this run
    #[instrument(skip_all, fields(in_host = host.in_host_shell))]
    pub async fn start(
        config: &AppConfig,
        paths: &NomadPaths,
        host: HostContext,
        backend: Option<&dyn RemoteBackend>,
        shell: Arc<dyn HostShell>,
    ) -> FinanceResult<Self> {
        prepare_host(shell.as_ref(), &host);

        let sessions = SessionStore::new(paths.session_file());
        let access = SessionBootstrap::new(config, backend, &sessions)
            .run(&host)
            .await;
        info!(access = %access, "access settled");

        let mut state = Self::new(paths, host, access, backend, shell, config.local_fallback);
        state.load(config.demo_data, Local::now().date_naive()).await?;
        Ok(state)
    }

    /// Fill the ledger according to the access state
    ///
    /// A failed remote fetch keeps the session with an empty ledger.
    pub async fn load(&mut self, seed_demo: bool, today: NaiveDate) -> FinanceResult<()> {
        let access = self.access.clone();
        match access {
            AccessState::Denied { .. } => Ok(()),
            AccessState::Remote(_) => {
                if let Err(e) = self.refresh().await {
                    warn!(error = %e, "remote fetch failed, continuing with an empty ledger");
                    self.ledger = Ledger::empty_for(self.default_user_name());
                }
                Ok(())
            }
            AccessState::LocalOnly(LocalReason::Demo) if !self.local.has_data() && seed_demo => {
                self.ledger = demo_ledger(today);
                if self.persist_locally {
                    self.local.save_ledger(&self.ledger)?;
                }
                info!("seeded demo data");
                Ok(())
            }
            AccessState::LocalOnly(reason) => {
                let name = if reason == LocalReason::Demo {
                    DEMO_USER_NAME.to_string()
                } else {
                    self.default_user_name()
                };
                self.ledger = self.local.load_ledger(Settings::named(name));
                Ok(())
            }
        }
    }

    /// Re-fetch every collection from the data service
    ///
    /// A user with no settings row gets defaults, named after the host user.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> FinanceResult<()> {
        let data = self
            .data
            .clone()
            .ok_or_else(|| FinanceError::NotAuthorized("no remote session".into()))?;

        let mut expenses = data.fetch_expenses().await?;
        sort_newest_first(&mut expenses);
        let incomes = data.fetch_incomes().await?;
        let assets = data.fetch_assets().await?;

        let settings = match data.fetch_settings().await? {
            Some(settings) => settings,
            None => {
                let settings = Settings::named(self.default_user_name());
                data.upsert_settings(&settings).await?;
                info!("initialised settings for new user");
                settings
            }
        };

        self.ledger = Ledger {
            expenses,
            incomes,
            assets,
            settings,
        };
        Ok(())
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// Sign out: end the remote session, forget the stored token, clear data
    #[instrument(skip(self))]
    pub async fn sign_out(&mut self) -> FinanceResult<()> {
        self.haptic(Haptic::LIGHT);

        if let (Some(auth), Some(session)) = (self.auth.clone(), self.access.session()) {
            if let Err(e) = auth.sign_out(&session.access_token).await {
                warn!(error = %e, "remote sign-out failed");
            }
        }
        self.sessions.discard()?;

        self.ledger.clear();
        self.data = None;
        self.auth = None;
        if !self.access.is_denied() {
            self.access = AccessState::LocalOnly(LocalReason::SignedOut);
        }
        self.persist_locally = false;
        self.session_tx.send_replace(None);
        info!("signed out");
        Ok(())
    }

    /// Fail unless the gate let this run through
    pub fn ensure_authorized(&self) -> FinanceResult<()> {
        match &self.access {
            AccessState::Denied { allowed, found } => Err(FinanceError::AccessDenied {
                allowed: allowed.clone(),
                found: found.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    pub fn incomes(&self) -> &[Income] {
        &self.ledger.incomes
    }

    pub fn assets(&self) -> &[Asset] {
        &self.ledger.assets
    }

    pub fn settings(&self) -> &Settings {
        &self.ledger.settings
    }

    pub fn access(&self) -> &AccessState {
        &self.access
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn is_remote(&self) -> bool {
        self.data.is_some()
    }

    /// True when changes are written to the local snapshots
    pub fn persists_locally(&self) -> bool {
        self.persist_locally
    }

    pub fn local_store(&self) -> &LocalStore {
        &self.local
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub(crate) fn data(&self) -> Option<Arc<dyn DataService>> {
        self.data.clone()
    }

    pub(crate) fn haptic(&self, feedback: Haptic) {
        if self.host.in_host_shell {
            self.shell.haptic(feedback);
        }
    }

    pub(crate) fn persist_expenses(&self) -> FinanceResult<()> {
        if self.persist_locally {
            self.local.save_expenses(&self.ledger.expenses)?;
        }
        Ok(())
    }

    pub(crate) fn persist_incomes(&self) -> FinanceResult<()> {
        if self.persist_locally {
            self.local.save_incomes(&self.ledger.incomes)?;
        }
        Ok(())
    }

    pub(crate) fn persist_assets(&self) -> FinanceResult<()> {
        if self.persist_locally {
            self.local.save_assets(&self.ledger.assets)?;
        }
        Ok(())
    }

    pub(crate) fn persist_settings(&self) -> FinanceResult<()> {
        if self.persist_locally {
            self.local.save_settings(&self.ledger.settings)?;
        }
        Ok(())
    }

    pub(crate) fn persist_ledger(&self) -> FinanceResult<()> {
        if self.persist_locally {
            self.local.save_ledger(&self.ledger)?;
        }
        Ok(())
    }

    fn default_user_name(&self) -> String {
        self.host
            .first_name
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::host::tests::RecordingHost;
    use crate::auth::NoopHost;
    use crate::remote::memory::MemoryRemote;
    use crate::services::SettingsService;
    use tempfile::TempDir;

    pub(crate) fn paths(dir: &TempDir) -> NomadPaths {
        NomadPaths::with_base_dir(dir.path().to_path_buf())
    }

    /// A local-only state outside the host shell, persisting to `dir`
    pub(crate) fn local_state(dir: &TempDir) -> AppState {
        AppState::new(
            &paths(dir),
            HostContext::standalone(),
            AccessState::LocalOnly(LocalReason::Demo),
            None,
            Arc::new(NoopHost),
            true,
        )
    }

    /// A signed-in state backed by `remote`
    pub(crate) fn remote_state(dir: &TempDir, remote: &MemoryRemote) -> AppState {
        let session = remote.issue_session();
        AppState::new(
            &paths(dir),
            HostContext::hosted(Some("sam".into())).with_first_name(Some("Sam".into())),
            AccessState::Remote(session),
            Some(remote),
            Arc::new(NoopHost),
            true,
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn test_demo_seed_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut state = local_state(&dir);
        state.load(true, today()).await.unwrap();

        assert_eq!(state.expenses().len(), 4);
        assert_eq!(state.settings().user_name, "Demo User");
        assert!(state.local_store().has_data());

        // Second run reads the snapshots instead of reseeding
        let mut again = local_state(&dir);
        again.load(true, today()).await.unwrap();
        assert_eq!(again.ledger(), state.ledger());
    }

    #[tokio::test]
    async fn test_demo_seed_disabled() {
        let dir = TempDir::new().unwrap();
        let mut state = local_state(&dir);
        state.load(false, today()).await.unwrap();
        assert!(state.ledger().is_empty());
        assert_eq!(state.settings().user_name, "Demo User");
    }

    #[tokio::test]
    async fn test_refresh_initialises_missing_settings() {
        let dir = TempDir::new().unwrap();
        let remote = MemoryRemote::new();
        let mut state = remote_state(&dir, &remote);
        state.load(true, today()).await.unwrap();

        assert!(state.is_remote());
        assert!(!state.persists_locally());
        assert_eq!(state.settings().user_name, "Sam");
        assert_eq!(remote.settings().unwrap().user_name, "Sam");
        assert!(!state.local_store().has_data());
    }

    #[tokio::test]
    async fn test_denied_state() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(
            &paths(&dir),
            HostContext::hosted(Some("samuel".into())),
            AccessState::Denied {
                allowed: "sam".into(),
                found: "samuel".into(),
            },
            None,
            Arc::new(NoopHost),
            true,
        );
        state.load(true, today()).await.unwrap();

        assert!(state.ledger().is_empty());
        assert!(!state.persists_locally());
        let err = state.ensure_authorized().unwrap_err();
        assert!(matches!(err, FinanceError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_sign_out_publishes_and_clears() {
        let dir = TempDir::new().unwrap();
        let remote = MemoryRemote::new();
        let shell = Arc::new(RecordingHost::default());
        let session = remote.issue_session();
        let mut state = AppState::new(
            &paths(&dir),
            HostContext::hosted(Some("sam".into())),
            AccessState::Remote(session.clone()),
            Some(&remote),
            shell.clone(),
            true,
        );
        state.load(true, today()).await.unwrap();

        let mut rx = state.subscribe();
        assert_eq!(*rx.borrow(), Some(session));

        state.sign_out().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
        assert!(!state.is_remote());
        assert_eq!(state.access(), &AccessState::LocalOnly(LocalReason::SignedOut));
        assert_eq!(state.settings(), &Settings::default());
        assert!(remote.calls().contains(&"sign_out".to_string()));
        assert_eq!(shell.calls(), vec!["impact:Light"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_the_session() {
        let dir = TempDir::new().unwrap();
        let remote = MemoryRemote::new();
        remote.fail_reads(true);
        let mut state = remote_state(&dir, &remote);
        state.load(true, today()).await.unwrap();

        assert!(state.is_remote());
        assert!(state.ledger().is_empty());
        assert_eq!(state.settings().user_name, "Sam");

        state.sign_out().await.unwrap();
        assert_eq!(state.access(), &AccessState::LocalOnly(LocalReason::SignedOut));
    }

    #[tokio::test]
    async fn test_start_survives_failed_fetch() {
        let dir = TempDir::new().unwrap();
        let remote = MemoryRemote::new().with_account("sam@telegram.nomad.app", "s3cret");
        remote.fail_reads(true);
        let mut config = AppConfig::default();
        config.allowed_identity = Some("sam".into());
        config.account.secret = Some("s3cret".into());

        let state = AppState::start(
            &config,
            &paths(&dir),
            HostContext::hosted(Some("sam".into())),
            Some(&remote),
            Arc::new(NoopHost),
        )
        .await
        .unwrap();

        assert!(matches!(state.access(), AccessState::Remote(_)));
        assert!(state.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_can_be_reset() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        paths.ensure_directories().unwrap();
        std::fs::write(paths.expenses_file(), "garbage").unwrap();

        let mut state = local_state(&dir);
        state.load(true, today()).await.unwrap();
        assert!(state.expenses().is_empty());

        SettingsService::new(&mut state).reset().await.unwrap();
        let raw = std::fs::read_to_string(paths.expenses_file()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[tokio::test]
    async fn test_start_outside_host() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::default();
        let state = AppState::start(
            &config,
            &paths(&dir),
            HostContext::standalone(),
            None,
            Arc::new(NoopHost),
        )
        .await
        .unwrap();

        assert!(state.access().is_demo());
        assert!(!state.ledger().is_empty());
    }
}
