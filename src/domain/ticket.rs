use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A ticket as the callers see it: stable key plus a field object whose
/// members are decided by the projection, not by this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub key: String,
    pub fields: Value,
}

/// Wire shape of a Jira search response, reduced to what the gateway relays.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub issues: Vec<Ticket>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Field catalog partitioned by the `custom` flag Jira sets on each entry.
#[derive(Debug, Serialize)]
pub struct FieldCatalog {
    pub custom: Vec<FieldDescriptor>,
    pub system: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    pub fn partition(fields: Vec<FieldDescriptor>) -> Self {
        let (custom, system) = fields.into_iter().partition(|field| field.custom);
        Self { custom, system }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_catalog_by_custom_flag() {
        let fields = vec![
            FieldDescriptor {
                id: "summary".to_string(),
                name: "Summary".to_string(),
                custom: false,
                schema: None,
            },
            FieldDescriptor {
                id: "customfield_10001".to_string(),
                name: "Business Value".to_string(),
                custom: true,
                schema: None,
            },
        ];

        let catalog = FieldCatalog::partition(fields);
        assert_eq!(catalog.custom.len(), 1);
        assert_eq!(catalog.system.len(), 1);
        assert_eq!(catalog.custom[0].id, "customfield_10001");
    }
}
