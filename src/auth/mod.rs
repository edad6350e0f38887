//! Access gate, session bootstrap and host shell integration

pub mod bootstrap;
pub mod credentials;
pub mod gate;
pub mod host;

pub use bootstrap::{AccessState, LocalReason, SessionBootstrap};
pub use credentials::DerivedCredentials;
pub use gate::{AccessGate, GateDecision, HostContext};
pub use host::{prepare_host, Haptic, HostShell, NoopHost, TracingHost};
