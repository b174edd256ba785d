use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::ticket::{FieldDescriptor, ProjectSummary, RemoteUser, SearchResult, Sprint};
use crate::error::AppResult;

/// The remote operations the gateway translates actions into. One
/// implementation talks to Jira; tests substitute their own.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn search(&self, jql: &str, fields: &[String]) -> AppResult<SearchResult>;
    async fn update_issue(&self, key: &str, fields: &Map<String, Value>) -> AppResult<()>;
    async fn current_user(&self) -> AppResult<RemoteUser>;
    async fn list_fields(&self) -> AppResult<Vec<FieldDescriptor>>;
    async fn list_projects(&self) -> AppResult<Vec<ProjectSummary>>;
    /// First board attached to the project, if any.
    async fn first_board(&self, project_id: &str) -> AppResult<Option<u64>>;
    async fn board_sprints(&self, board_id: u64) -> AppResult<Vec<Sprint>>;
}
