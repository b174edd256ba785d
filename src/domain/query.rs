use crate::domain::field_mapping::FieldMappings;

/// Fields every search asks for regardless of mapping configuration.
pub const CORE_FIELDS: [&str; 6] = [
    "key",
    "summary",
    "status",
    "issuetype",
    "created",
    "priority",
];

/// Query used when the caller supplies no JQL of their own.
pub const DEFAULT_JQL: &str = "project is not EMPTY ORDER BY priority DESC";

/// `key in (A,B)` — order preserved, no whitespace inside the parentheses.
pub fn jql_for_keys(keys: &[String]) -> String {
    format!("key in ({})", keys.join(","))
}

pub fn effective_jql(jql: Option<&str>) -> String {
    match jql {
        Some(query) if !query.trim().is_empty() => query.trim().to_string(),
        _ => DEFAULT_JQL.to_string(),
    }
}

/// Union of the core set and every enabled calculation/display mapping
/// entry, deduplicated.
pub fn projected_fields(mappings: Option<&FieldMappings>) -> Vec<String> {
    let mut fields: Vec<String> = CORE_FIELDS.iter().map(|field| field.to_string()).collect();
    if let Some(mappings) = mappings {
        for field in mappings.projection_fields() {
            if !fields.iter().any(|existing| existing == field) {
                fields.push(field.to_string());
            }
        }
    }
    fields
}
