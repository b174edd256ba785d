use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Caller-supplied grouping of Jira field references by purpose. The groups
/// are maps of logical name to entry; BTreeMap keeps iteration order stable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldMappings {
    #[serde(default)]
    pub calculation: BTreeMap<String, MappingEntry>,
    #[serde(default)]
    pub display: BTreeMap<String, MappingEntry>,
    #[serde(default)]
    pub export: BTreeMap<String, MappingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub jira_field: String,
}

impl MappingEntry {
    fn contributes(&self) -> bool {
        self.enabled && !self.jira_field.trim().is_empty()
    }
}

impl FieldMappings {
    /// Field IDs the calculation and display groups ask for, in group order.
    pub fn projection_fields(&self) -> impl Iterator<Item = &str> {
        self.calculation
            .values()
            .chain(self.display.values())
            .filter(|entry| entry.contributes())
            .map(|entry| entry.jira_field.as_str())
    }

    /// Translate update pairs keyed by logical name into a remote patch body
    /// keyed by Jira field ID. Pairs without an enabled export entry drop.
    pub fn export_updates(&self, updates: &Map<String, Value>) -> Map<String, Value> {
        let mut mapped = Map::new();
        for (name, value) in updates {
            if let Some(entry) = self.export.get(name)
                && entry.contributes()
            {
                mapped.insert(entry.jira_field.clone(), value.clone());
            }
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(enabled: bool, jira_field: &str) -> MappingEntry {
        MappingEntry {
            enabled,
            jira_field: jira_field.to_string(),
        }
    }

    #[test]
    fn export_drops_unmapped_and_disabled_pairs() {
        let mappings = FieldMappings {
            export: BTreeMap::from([
                ("businessValue".to_string(), entry(true, "customfield_10001")),
                ("jobSize".to_string(), entry(false, "customfield_10005")),
            ]),
            ..FieldMappings::default()
        };

        let updates = json!({
            "businessValue": 42,
            "jobSize": 5,
            "unknownField": "dropped",
        });
        let updates = updates.as_object().cloned().unwrap();

        let mapped = mappings.export_updates(&updates);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get("customfield_10001"), Some(&json!(42)));
    }

    #[test]
    fn entries_without_field_id_do_not_contribute() {
        let mappings = FieldMappings {
            calculation: BTreeMap::from([("broken".to_string(), entry(true, "  "))]),
            ..FieldMappings::default()
        };
        assert_eq!(mappings.projection_fields().count(), 0);
    }
}
