//! Status and settings display formatting

use crate::auth::{AccessState, HostContext};
use crate::models::{Currency, Settings};

/// Format the current access mode and host
pub fn format_status(access: &AccessState, host: &HostContext, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Hello, {}\n", settings.user_name));
    output.push_str(&format!("Access:  {}\n", access));
    if host.in_host_shell {
        output.push_str(&format!(
            "Host:    @{}\n",
            host.username.as_deref().unwrap_or("unset")
        ));
    } else {
        output.push_str("Host:    standalone\n");
    }
    if access.is_demo() {
        output.push_str("Data is kept on this machine only.\n");
    }

    output
}

/// Format the settings record
pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:          {}\n", settings.user_name));
    output.push_str(&format!("Exchange rate: {}\n", settings.rate()));
    output.push_str(&format!(
        "Savings goal:  {}\n",
        settings.savings_goal_usd.format_in(Currency::Usd)
    ));
    output.push_str(&format!(
        "Recurring:     {}\n",
        if settings.recurring_enabled { "on" } else { "off" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LocalReason;

    #[test]
    fn test_denied_status_names_both_identities() {
        let access = AccessState::Denied {
            allowed: "sam".into(),
            found: "eve".into(),
        };
        let text = format_status(
            &access,
            &HostContext::hosted(Some("eve".into())),
            &Settings::default(),
        );
        assert!(text.contains("Allowed: @sam"));
        assert!(text.contains("Found: @eve"));
    }

    #[test]
    fn test_settings() {
        let text = format_settings(&Settings::default());
        assert!(text.contains("1 USD = 180 ETB"));
        assert!(text.contains("$2000.00"));
        assert!(text.contains("Recurring:     on"));
        let status = format_status(
            &AccessState::LocalOnly(LocalReason::Demo),
            &HostContext::standalone(),
            &Settings::default(),
        );
        assert!(status.contains("standalone"));
    }
}
