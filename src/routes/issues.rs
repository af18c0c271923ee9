use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Issue, IssueFilter, IssueUpdate, NewIssue};
use crate::state::SharedState;
use crate::store::StoreError;

// Every logical outcome, error or not, answers HTTP 200 with the result
// discriminated in the body. Existing clients key off body shape only.

#[derive(Deserialize)]
pub struct ListParams {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub open: Option<String>,
    pub status_text: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateIssue {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateIssue {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

#[derive(Deserialize)]
pub struct DeleteIssue {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Issue>> {
    let filter = IssueFilter {
        project,
        issue_title: non_empty(params.issue_title),
        issue_text: non_empty(params.issue_text),
        created_on: non_empty(params.created_on),
        updated_on: non_empty(params.updated_on),
        created_by: non_empty(params.created_by),
        assigned_to: non_empty(params.assigned_to),
        open: non_empty(params.open),
        status_text: non_empty(params.status_text),
    };

    // List has no error path: a failed lookup renders the same as no matches.
    let mut issues = match state.store.find(&filter).await {
        Ok(issues) => issues,
        Err(err) => {
            tracing::warn!("issue lookup failed: {err}");
            Vec::new()
        }
    };

    // Reads report updated_on as the moment of the request; the stored value
    // stays untouched.
    let now = Utc::now();
    for issue in &mut issues {
        issue.updated_on = now;
    }

    Json(issues)
}

pub async fn create(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    Json(req): Json<CreateIssue>,
) -> Result<Response, AppError> {
    let (Some(issue_title), Some(issue_text), Some(created_by)) = (
        non_empty(req.issue_title),
        non_empty(req.issue_text),
        non_empty(req.created_by),
    ) else {
        return Ok(Json(json!({ "error": "required field(s) missing" })).into_response());
    };

    let now = Utc::now();
    let issue = state
        .store
        .insert(NewIssue {
            project,
            issue_title,
            issue_text,
            created_on: now,
            updated_on: now,
            created_by,
            assigned_to: req.assigned_to.unwrap_or_default(),
            open: true,
            status_text: req.status_text.unwrap_or_default(),
        })
        .await?;

    Ok(Json(issue).into_response())
}

pub async fn update(
    State(state): State<SharedState>,
    Json(req): Json<UpdateIssue>,
) -> Json<serde_json::Value> {
    let Some(id) = req.id.filter(|id| !id.is_empty()) else {
        return Json(json!({ "error": "missing _id" }));
    };

    let update = IssueUpdate {
        issue_title: non_empty(req.issue_title),
        issue_text: non_empty(req.issue_text),
        created_by: non_empty(req.created_by),
        assigned_to: non_empty(req.assigned_to),
        status_text: non_empty(req.status_text),
        // Only a truthy `open` counts as an update field; an explicit
        // `open: false` is ignored, per the wire contract.
        open: req.open.filter(|open| *open),
        updated_on: Utc::now(),
    };

    if update.is_empty() {
        return Json(json!({ "error": "no update field(s) sent", "_id": id }));
    }

    // An unparseable id takes the same path as an unknown one.
    let updated = match Uuid::parse_str(&id) {
        Ok(uuid) => state.store.update_by_id(uuid, update).await,
        Err(_) => Err(StoreError::NotFound),
    };

    match updated {
        Ok(issue) => Json(json!({ "result": "successfully updated", "_id": issue.id })),
        Err(_) => Json(json!({ "error": "could not update", "_id": id })),
    }
}

pub async fn delete(
    State(state): State<SharedState>,
    Json(req): Json<DeleteIssue>,
) -> Json<serde_json::Value> {
    let Some(id) = req.id.filter(|id| !id.is_empty()) else {
        return Json(json!({ "error": "missing _id" }));
    };

    let deleted = match Uuid::parse_str(&id) {
        Ok(uuid) => state.store.delete_by_id(uuid).await,
        Err(_) => Err(StoreError::NotFound),
    };

    match deleted {
        Ok(issue) => Json(json!({ "result": "successfully deleted", "_id": issue.id })),
        Err(_) => Json(json!({ "error": "could not delete", "_id": id })),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
