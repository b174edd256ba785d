use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::field_mapping::FieldMappings;

/// The closed action vocabulary. Anything else fails deserialization and is
/// rejected by the HTTP layer before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Action {
    #[serde(rename = "fetchByKeys")]
    FetchByKeys,
    #[serde(rename = "fetchByJQL")]
    FetchByJql,
    #[serde(rename = "updateFields")]
    UpdateFields,
    #[serde(rename = "testConnection")]
    TestConnection,
    #[serde(rename = "getFields")]
    GetFields,
    #[serde(rename = "getProjects")]
    GetProjects,
    #[serde(rename = "getSprints")]
    GetSprints,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::FetchByKeys => "fetchByKeys",
            Action::FetchByJql => "fetchByJQL",
            Action::UpdateFields => "updateFields",
            Action::TestConnection => "testConnection",
            Action::GetFields => "getFields",
            Action::GetProjects => "getProjects",
            Action::GetSprints => "getSprints",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub action: Action,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub jql: Option<String>,
    #[serde(default)]
    pub ticket_key: Option<String>,
    #[serde(default)]
    pub updates: Option<Map<String, Value>>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub jira_config: Option<CredentialOverrides>,
    #[serde(default)]
    pub field_mappings: Option<FieldMappings>,
}

impl GatewayRequest {
    /// Human-readable hint of what the caller asked for, woven into mock
    /// ticket summaries.
    pub fn context_hint(&self) -> String {
        if !self.keys.is_empty() {
            return self.keys.join(",");
        }
        if let Some(jql) = self.jql.as_deref()
            && !jql.trim().is_empty()
        {
            return jql.trim().to_string();
        }
        self.action.as_str().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialOverrides {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}
