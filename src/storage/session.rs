//! Persisted session token
//!
//! The last session issued by the identity service is kept in `session.json`
//! so the next start can try it before deriving credentials again.

use std::path::PathBuf;

use crate::error::FinanceError;
use crate::models::Session;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored session
    ///
    /// An unreadable file is treated as no session; it is dropped on the next save.
    pub fn load(&self) -> Option<Session> {
        match read_json_optional(&self.path) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session file");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), FinanceError> {
        write_json_atomic(&self.path, session)
    }

    pub fn discard(&self) -> Result<(), FinanceError> {
        remove_if_exists(&self.path)
    }
}
