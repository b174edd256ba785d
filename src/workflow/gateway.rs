use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::action::{Action, GatewayRequest};
use crate::domain::envelope::ResponseEnvelope;
use crate::domain::field_mapping::FieldMappings;
use crate::domain::query::{effective_jql, jql_for_keys, projected_fields};
use crate::domain::ticket::FieldCatalog;
use crate::error::{AppError, AppResult};
use crate::infra::jira::JiraClient;
use crate::infra::mock::Synthesizer;
use crate::services::IssueTrackerService;

/// Translate one gateway request into a response envelope.
///
/// Missing credentials and remote failures degrade to synthesized data under
/// a successful envelope; only a locally-malformed request is an `Err`, which
/// the HTTP layer maps to 400.
pub async fn handle(ctx: &AppContext, request: GatewayRequest) -> AppResult<ResponseEnvelope> {
    validate(&request)?;
    info!(action = request.action.as_str(), "dispatching gateway action");

    let mut synthesizer = Synthesizer::from_entropy();
    match ctx.config.resolve_credentials(request.jira_config.as_ref()) {
        Some(credentials) => {
            let client = JiraClient::new(ctx.http.clone(), credentials);
            Ok(dispatch(&client, &mut synthesizer, &request).await)
        }
        None => Ok(degraded(&mut synthesizer, &request, None)),
    }
}

fn validate(request: &GatewayRequest) -> AppResult<()> {
    match request.action {
        Action::FetchByKeys if request.keys.is_empty() => Err(AppError::InvalidRequest(
            "fetchByKeys requires a non-empty keys list".to_string(),
        )),
        Action::UpdateFields if request.ticket_key.is_none() => Err(AppError::InvalidRequest(
            "updateFields requires a ticketKey".to_string(),
        )),
        Action::GetSprints if request.project_id.is_none() => Err(AppError::InvalidRequest(
            "getSprints requires a projectId".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Run the action against the live backend; any remote failure falls back to
/// the synthesizer with the error preserved in the envelope.
pub async fn dispatch(
    tracker: &dyn IssueTrackerService,
    synthesizer: &mut Synthesizer,
    request: &GatewayRequest,
) -> ResponseEnvelope {
    match run_action(tracker, request).await {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(
                action = request.action.as_str(),
                error = %error,
                "remote call failed; answering with mock data"
            );
            degraded(synthesizer, request, Some(error))
        }
    }
}

async fn run_action(
    tracker: &dyn IssueTrackerService,
    request: &GatewayRequest,
) -> AppResult<ResponseEnvelope> {
    match request.action {
        Action::FetchByKeys => {
            let jql = jql_for_keys(&request.keys);
            search(tracker, &jql, request.field_mappings.as_ref()).await
        }
        Action::FetchByJql => {
            let jql = effective_jql(request.jql.as_deref());
            search(tracker, &jql, request.field_mappings.as_ref()).await
        }
        Action::UpdateFields => {
            // Validated before dispatch.
            let key = request.ticket_key.as_deref().unwrap_or_default();
            let updates = request.updates.clone().unwrap_or_default();
            let mapped = request
                .field_mappings
                .as_ref()
                .map(|mappings| mappings.export_updates(&updates))
                .unwrap_or_default();

            if mapped.is_empty() {
                return Ok(ResponseEnvelope {
                    message: Some(format!("no mapped fields to update on {key}")),
                    ..ResponseEnvelope::live()
                });
            }

            tracker.update_issue(key, &mapped).await?;
            Ok(ResponseEnvelope {
                message: Some(format!("updated {} field(s) on {key}", mapped.len())),
                ..ResponseEnvelope::live()
            })
        }
        Action::TestConnection => {
            let user = tracker.current_user().await?;
            Ok(ResponseEnvelope {
                user: Some(user),
                message: Some("connection verified".to_string()),
                ..ResponseEnvelope::live()
            })
        }
        Action::GetFields => {
            let fields = tracker.list_fields().await?;
            Ok(ResponseEnvelope {
                fields: Some(FieldCatalog::partition(fields)),
                ..ResponseEnvelope::live()
            })
        }
        Action::GetProjects => {
            let projects = tracker.list_projects().await?;
            Ok(ResponseEnvelope {
                projects: Some(projects),
                ..ResponseEnvelope::live()
            })
        }
        Action::GetSprints => {
            let project_id = request.project_id.as_deref().unwrap_or_default();
            let sprints = match tracker.first_board(project_id).await? {
                Some(board_id) => tracker.board_sprints(board_id).await?,
                None => Vec::new(),
            };
            Ok(ResponseEnvelope {
                sprints: Some(sprints),
                ..ResponseEnvelope::live()
            })
        }
    }
}

async fn search(
    tracker: &dyn IssueTrackerService,
    jql: &str,
    mappings: Option<&FieldMappings>,
) -> AppResult<ResponseEnvelope> {
    let fields = projected_fields(mappings);
    let result = tracker.search(jql, &fields).await?;
    Ok(ResponseEnvelope {
        total: Some(result.total),
        issues: Some(result.issues),
        ..ResponseEnvelope::live()
    })
}

/// Build the synthesized counterpart of the requested action's payload.
/// `error` is `Some` for remote failures and `None` when credentials never
/// resolved in the first place.
pub fn degraded(
    synthesizer: &mut Synthesizer,
    request: &GatewayRequest,
    error: Option<AppError>,
) -> ResponseEnvelope {
    let message = if error.is_some() {
        "remote call failed; returning mock data"
    } else {
        "Jira credentials not configured; returning mock data"
    };
    let base = ResponseEnvelope {
        error: error.map(|err| err.to_string()),
        message: Some(message.to_string()),
        ..ResponseEnvelope::synthetic()
    };

    match request.action {
        Action::FetchByKeys | Action::FetchByJql => {
            let issues = synthesizer.tickets(&request.context_hint());
            ResponseEnvelope {
                total: Some(issues.len() as u64),
                issues: Some(issues),
                ..base
            }
        }
        Action::UpdateFields => {
            let key = request.ticket_key.as_deref().unwrap_or_default();
            ResponseEnvelope {
                message: Some(format!("simulated update of {key}")),
                ..base
            }
        }
        Action::TestConnection => ResponseEnvelope {
            user: Some(synthesizer.user()),
            ..base
        },
        Action::GetFields => ResponseEnvelope {
            fields: Some(synthesizer.field_catalog()),
            ..base
        },
        Action::GetProjects => ResponseEnvelope {
            projects: Some(synthesizer.projects()),
            ..base
        },
        Action::GetSprints => ResponseEnvelope {
            sprints: Some(synthesizer.sprints()),
            ..base
        },
    }
}
