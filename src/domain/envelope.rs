use serde::Serialize;

use crate::domain::ticket::{FieldCatalog, ProjectSummary, RemoteUser, Sprint, Ticket};

/// The single response shape for every action. Callers discriminate real
/// from synthetic data via `mock`; payload members appear per action.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Ticket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldCatalog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprints: Option<Vec<Sprint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<RemoteUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Base envelope for data served by the live backend.
    pub fn live() -> Self {
        Self {
            success: true,
            mock: false,
            issues: None,
            total: None,
            fields: None,
            projects: None,
            sprints: None,
            user: None,
            error: None,
            message: None,
        }
    }

    /// Base envelope for synthesized data.
    pub fn synthetic() -> Self {
        Self {
            mock: true,
            ..Self::live()
        }
    }
}
