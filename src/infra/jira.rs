use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::JiraCredentials;
use crate::domain::ticket::{FieldDescriptor, ProjectSummary, RemoteUser, SearchResult, Sprint};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const SEARCH_PAGE_SIZE: u32 = 100;

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(http: Client, credentials: JiraCredentials) -> Self {
        Self {
            http,
            base_url: credentials.base_url,
            email: credentials.email,
            api_token: credentials.api_token,
        }
    }

    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.api_token);
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.endpoint(path))
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
    }

    async fn send(request: reqwest::RequestBuilder, what: &str) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Transport(format!("failed to call Jira {what}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status}: {body}"
            )));
        }
        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
        response.json::<T>().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira {what} response: {err}"))
        })
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn search(&self, jql: &str, fields: &[String]) -> AppResult<SearchResult> {
        let body = SearchRequest {
            jql,
            fields,
            max_results: SEARCH_PAGE_SIZE,
        };
        let request = self
            .http
            .post(self.endpoint("/rest/api/3/search"))
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body);

        let response = Self::send(request, "search").await?;
        Self::parse(response, "search").await
    }

    async fn update_issue(&self, key: &str, fields: &Map<String, Value>) -> AppResult<()> {
        let request = self
            .http
            .put(self.endpoint(&format!("/rest/api/3/issue/{key}")))
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&UpdateRequest { fields });

        Self::send(request, "issue update").await?;
        Ok(())
    }

    async fn current_user(&self) -> AppResult<RemoteUser> {
        let response = Self::send(self.get("/rest/api/3/myself"), "identity lookup").await?;
        Self::parse(response, "identity").await
    }

    async fn list_fields(&self) -> AppResult<Vec<FieldDescriptor>> {
        let response = Self::send(self.get("/rest/api/3/field"), "field catalog").await?;
        Self::parse(response, "field catalog").await
    }

    async fn list_projects(&self) -> AppResult<Vec<ProjectSummary>> {
        let response = Self::send(self.get("/rest/api/3/project"), "project list").await?;
        Self::parse(response, "project list").await
    }

    async fn first_board(&self, project_id: &str) -> AppResult<Option<u64>> {
        let request = self
            .get("/rest/agile/1.0/board")
            .query(&[("projectKeyOrId", project_id)]);
        let response = Self::send(request, "board lookup").await?;
        let boards: BoardList = Self::parse(response, "board list").await?;
        Ok(boards.values.first().map(|board| board.id))
    }

    async fn board_sprints(&self, board_id: u64) -> AppResult<Vec<Sprint>> {
        let request = self.get(&format!("/rest/agile/1.0/board/{board_id}/sprint"));
        let response = Self::send(request, "sprint list").await?;
        let sprints: SprintList = Self::parse(response, "sprint list").await?;
        Ok(sprints.values)
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    jql: &'a str,
    fields: &'a [String],
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    fields: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct BoardList {
    #[serde(default)]
    values: Vec<BoardRef>,
}

#[derive(Deserialize)]
struct BoardRef {
    id: u64,
}

#[derive(Deserialize)]
struct SprintList {
    #[serde(default)]
    values: Vec<Sprint>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> JiraClient {
        JiraClient::new(
            Client::new(),
            JiraCredentials {
                base_url: server.uri(),
                email: "tester@example.com".to_string(),
                api_token: "secret".to_string(),
            },
        )
    }

    #[test]
    fn builds_basic_auth_token() {
        let jira = JiraClient::new(
            Client::new(),
            JiraCredentials {
                base_url: "https://demo.atlassian.net/".to_string(),
                email: "tester@example.com".to_string(),
                api_token: "secret".to_string(),
            },
        );
        // tester@example.com:secret
        assert_eq!(
            jira.auth_header(),
            "Basic dGVzdGVyQGV4YW1wbGUuY29tOnNlY3JldA=="
        );
        assert_eq!(
            jira.endpoint("/rest/api/3/myself"),
            "https://demo.atlassian.net/rest/api/3/myself"
        );
    }

    #[tokio::test]
    async fn search_sends_jql_and_projection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/search"))
            .and(basic_auth("tester@example.com", "secret"))
            .and(body_partial_json(json!({
                "jql": "key in (DEMO-1,DEMO-2)",
                "fields": ["key", "summary", "status", "issuetype", "created", "priority"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issues": [
                    {"key": "DEMO-1", "fields": {"summary": "First"}},
                    {"key": "DEMO-2", "fields": {"summary": "Second"}},
                ],
                "total": 2,
            })))
            .mount(&server)
            .await;

        let fields: Vec<String> = ["key", "summary", "status", "issuetype", "created", "priority"]
            .iter()
            .map(|field| field.to_string())
            .collect();
        let result = client(&server)
            .search("key in (DEMO-1,DEMO-2)", &fields)
            .await
            .unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.issues[0].key, "DEMO-1");
    }

    #[tokio::test]
    async fn search_failure_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("index unavailable"))
            .mount(&server)
            .await;

        let error = client(&server).search("project = DEMO", &[]).await.unwrap_err();
        let text = error.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("index unavailable"));
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/api/3/issue/DEMO-7"))
            .and(body_partial_json(json!({
                "fields": {"customfield_10001": 42},
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut fields = Map::new();
        fields.insert("customfield_10001".to_string(), json!(42));
        client(&server).update_issue("DEMO-7", &fields).await.unwrap();
    }

    #[tokio::test]
    async fn current_user_parses_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/myself"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountId": "abc123",
                "displayName": "Test User",
                "emailAddress": "tester@example.com",
            })))
            .mount(&server)
            .await;

        let user = client(&server).current_user().await.unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn first_board_is_none_when_project_has_no_boards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/board"))
            .and(query_param("projectKeyOrId", "DEMO"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"values": []})))
            .mount(&server)
            .await;

        let board = client(&server).first_board("DEMO").await.unwrap();
        assert_eq!(board, None);
    }

    #[tokio::test]
    async fn board_sprints_unwraps_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/board/42/sprint"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [
                    {"id": 1, "name": "Sprint 1", "state": "closed"},
                    {"id": 2, "name": "Sprint 2", "state": "active", "startDate": "2026-08-01"},
                ],
            })))
            .mount(&server)
            .await;

        let sprints = client(&server).board_sprints(42).await.unwrap();
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[1].state, "active");
    }
}
