//! Host shell integration
//!
//! Every call is best-effort: a host that does not support something simply
//! ignores it, and nothing here can fail.

use std::fmt;

use tracing::debug;

use super::gate::HostContext;

/// Minimum host version with fullscreen support
pub const FULLSCREEN_MIN_VERSION: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
    Rigid,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Error,
    Success,
    Warning,
}

/// Haptic feedback kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Impact(ImpactStyle),
    Notification(NotificationType),
}

impl Haptic {
    pub const SUCCESS: Haptic = Haptic::Notification(NotificationType::Success);
    pub const ERROR: Haptic = Haptic::Notification(NotificationType::Error);
    pub const WARNING: Haptic = Haptic::Notification(NotificationType::Warning);
    pub const LIGHT: Haptic = Haptic::Impact(ImpactStyle::Light);
    pub const MEDIUM: Haptic = Haptic::Impact(ImpactStyle::Medium);
}

impl fmt::Display for Haptic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impact(style) => write!(f, "impact:{:?}", style),
            Self::Notification(kind) => write!(f, "notification:{:?}", kind),
        }
    }
}

/// Calls into the host shell
pub trait HostShell: Send + Sync {
    fn ready(&self) {}
    fn expand(&self) {}
    fn request_fullscreen(&self) {}
    fn set_header_color(&self, _color: &str) {}
    fn set_background_color(&self, _color: &str) {}
    fn haptic(&self, _feedback: Haptic) {}
}

/// Host with no capabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl HostShell for NoopHost {}

/// Host calls recorded as tracing events
#[derive(Debug, Clone, Default)]
pub struct TracingHost;

impl HostShell for TracingHost {
    fn ready(&self) {
        debug!("host: ready");
    }

    fn expand(&self) {
        debug!("host: expand");
    }

    fn request_fullscreen(&self) {
        debug!("host: request fullscreen");
    }

    fn set_header_color(&self, color: &str) {
        debug!(color, "host: header color");
    }

    fn set_background_color(&self, color: &str) {
        debug!(color, "host: background color");
    }

    fn haptic(&self, feedback: Haptic) {
        debug!(%feedback, "host: haptic");
    }
}

/// Startup sequence for a run inside the host shell
///
/// Fullscreen is requested only when the reported version is at least 8.0.
pub fn prepare_host(shell: &dyn HostShell, host: &HostContext) {
    if !host.in_host_shell {
        return;
    }
    shell.ready();
    shell.expand();
    if host
        .version_number()
        .map_or(false, |v| v >= FULLSCREEN_MIN_VERSION)
    {
        shell.request_fullscreen();
    }
    shell.set_header_color("#ffffff");
    shell.set_background_color("#ffffff");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every call for assertions
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        pub calls: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl HostShell for RecordingHost {
        fn ready(&self) {
            self.push("ready");
        }
        fn expand(&self) {
            self.push("expand");
        }
        fn request_fullscreen(&self) {
            self.push("fullscreen");
        }
        fn haptic(&self, feedback: Haptic) {
            self.push(feedback.to_string());
        }
    }

    fn hosted(version: &str) -> HostContext {
        HostContext::hosted(Some("sam".into())).with_platform_version(Some(version.into()))
    }

    #[test]
    fn test_fullscreen_requires_version_8() {
        let shell = RecordingHost::default();
        prepare_host(&shell, &hosted("6.0"));
        assert_eq!(shell.calls(), vec!["ready", "expand"]);

        let shell = RecordingHost::default();
        prepare_host(&shell, &hosted("8.0"));
        assert_eq!(shell.calls(), vec!["ready", "expand", "fullscreen"]);
    }

    #[test]
    fn test_standalone_makes_no_calls() {
        let shell = RecordingHost::default();
        prepare_host(&shell, &HostContext::standalone());
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_haptic_display() {
        assert_eq!(Haptic::SUCCESS.to_string(), "notification:Success");
        assert_eq!(Haptic::MEDIUM.to_string(), "impact:Medium");
    }
}
