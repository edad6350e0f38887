//! Storage layer for NomadFinance
//!
//! Local fallback persistence: JSON snapshots with atomic writes, the
//! persisted session token, and the demo seed.

pub mod demo;
pub mod file_io;
pub mod local;
pub mod session;

pub use demo::demo_ledger;
pub use file_io::{read_json, write_json_atomic};
pub use local::LocalStore;
pub use session::SessionStore;
