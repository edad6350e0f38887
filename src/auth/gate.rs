//! Access gate for runs inside the host shell
//!
//! Outside the host shell nothing is gated. Inside it, exactly one
//! configured username may pass; comparison ignores case.

/// What the host shell reported about the current run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub in_host_shell: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub platform_version: Option<String>,
}

impl HostContext {
    /// A plain run with no host shell
    pub fn standalone() -> Self {
        Self::default()
    }

    /// A run inside the host shell for the given user
    pub fn hosted(username: Option<String>) -> Self {
        Self {
            in_host_shell: true,
            username: username.map(|u| u.trim().trim_start_matches('@').to_string()),
            ..Self::default()
        }
    }

    pub fn with_first_name(mut self, first_name: Option<String>) -> Self {
        self.first_name = first_name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_platform_version(mut self, version: Option<String>) -> Self {
        self.platform_version = version;
        self
    }

    /// Host platform version as a number, if it parses
    pub fn version_number(&self) -> Option<f64> {
        self.platform_version
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// Outcome of the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not in the host shell; local/demo run
    Unrestricted,
    /// The host user is the allowed identity
    Allowed { username: String },
    /// Terminal; carries both identities for display
    Denied { allowed: String, found: String },
}

const UNSET: &str = "unset";

/// Compares the host user to the single allowed identity
#[derive(Debug, Clone)]
pub struct AccessGate {
    allowed: Option<String>,
}

impl AccessGate {
    pub fn new(allowed: Option<String>) -> Self {
        Self {
            allowed: allowed
                .map(|a| a.trim().trim_start_matches('@').to_string())
                .filter(|a| !a.is_empty()),
        }
    }

    pub fn check(&self, host: &HostContext) -> GateDecision {
        if !host.in_host_shell {
            return GateDecision::Unrestricted;
        }

        let found = host.username.as_deref().filter(|u| !u.is_empty());
        match (self.allowed.as_deref(), found) {
            (Some(allowed), Some(found)) if allowed.to_lowercase() == found.to_lowercase() => {
                GateDecision::Allowed {
                    username: found.to_string(),
                }
            }
            (allowed, found) => GateDecision::Denied {
                allowed: allowed.unwrap_or(UNSET).to_string(),
                found: found.unwrap_or(UNSET).to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(Some("sam".into()))
    }

    #[test]
    fn test_standalone_is_unrestricted() {
        assert_eq!(gate().check(&HostContext::standalone()), GateDecision::Unrestricted);
        assert_eq!(
            AccessGate::new(None).check(&HostContext::standalone()),
            GateDecision::Unrestricted
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(
            gate().check(&HostContext::hosted(Some("SAM".into()))),
            GateDecision::Allowed {
                username: "SAM".into()
            }
        );
        assert!(matches!(
            AccessGate::new(Some("@Sam".into())).check(&HostContext::hosted(Some("sam".into()))),
            GateDecision::Allowed { .. }
        ));
    }

    #[test]
    fn test_other_user_denied() {
        assert_eq!(
            gate().check(&HostContext::hosted(Some("samuel".into()))),
            GateDecision::Denied {
                allowed: "sam".into(),
                found: "samuel".into()
            }
        );
    }

    #[test]
    fn test_missing_identities_denied() {
        assert!(matches!(
            gate().check(&HostContext::hosted(None)),
            GateDecision::Denied { found, .. } if found == "unset"
        ));
        assert!(matches!(
            AccessGate::new(None).check(&HostContext::hosted(Some("sam".into()))),
            GateDecision::Denied { allowed, .. } if allowed == "unset"
        ));
    }

    #[test]
    fn test_version_number() {
        let host = HostContext::hosted(Some("sam".into())).with_platform_version(Some("8.0".into()));
        assert_eq!(host.version_number(), Some(8.0));
        let old = host.with_platform_version(Some("six".into()));
        assert_eq!(old.version_number(), None);
    }
}
