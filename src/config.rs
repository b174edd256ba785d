use std::env;

use crate::domain::action::CredentialOverrides;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_api_token: Option<String>,
}

/// Fully resolved credentials for one request. Only constructed when every
/// member is present after merging request overrides onto the defaults.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jira_base_url: non_empty_var("JIRA_BASE_URL"),
            jira_email: non_empty_var("JIRA_EMAIL"),
            jira_api_token: non_empty_var("JIRA_API_TOKEN"),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.jira_base_url.is_some() && self.jira_email.is_some() && self.jira_api_token.is_some()
    }

    /// Request-supplied values win over environment defaults, member by
    /// member. A `None` result means the mock path, not an error.
    pub fn resolve_credentials(
        &self,
        overrides: Option<&CredentialOverrides>,
    ) -> Option<JiraCredentials> {
        let base_url = pick(overrides.and_then(|o| o.base_url.as_deref()), &self.jira_base_url)?;
        let email = pick(overrides.and_then(|o| o.email.as_deref()), &self.jira_email)?;
        let api_token = pick(
            overrides.and_then(|o| o.api_token.as_deref()),
            &self.jira_api_token,
        )?;

        Some(JiraCredentials {
            base_url,
            email,
            api_token,
        })
    }
}

fn pick(override_value: Option<&str>, default: &Option<String>) -> Option<String> {
    match override_value {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => default.clone(),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
