use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked work item scoped to a project. The identifier travels as `_id`
/// on the wire, for compatibility with existing clients.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

/// A fully-defaulted issue ready for insertion. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

/// Partial update: only `Some` fields are written. `updated_on` is always
/// written.
#[derive(Debug, Clone)]
pub struct IssueUpdate {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub updated_on: DateTime<Utc>,
}

impl IssueUpdate {
    /// True when no field beyond `updated_on` would be written.
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }
}

/// Equality filters, AND-combined. Values are the literal strings supplied by
/// the client; timestamp and boolean fields are matched against their text
/// rendering, with no coercion.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub project: String,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub open: Option<String>,
    pub status_text: Option<String>,
}

impl IssueFilter {
    pub fn for_project(project: impl Into<String>) -> Self {
        IssueFilter {
            project: project.into(),
            ..Default::default()
        }
    }
}
