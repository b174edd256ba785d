pub mod jira;
pub mod mock;
