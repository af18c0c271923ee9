use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Issue, IssueFilter, IssueUpdate, NewIssue};

use super::{IssueStore, StoreError};

/// Vec-backed store used by the test harness in place of Postgres. Filters
/// match the same way the SQL store does: literal text comparison, with
/// timestamps and booleans rendered to strings.
#[derive(Default)]
pub struct MemoryStore {
    issues: RwLock<Vec<Issue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup, bypassing the filter path. Lets tests assert what is
    /// actually persisted.
    pub fn get(&self, id: Uuid) -> Option<Issue> {
        self.issues
            .read()
            .unwrap()
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
    }
}

fn matches(issue: &Issue, filter: &IssueFilter) -> bool {
    fn field_eq(actual: &str, wanted: &Option<String>) -> bool {
        wanted.as_ref().is_none_or(|w| actual == w)
    }

    issue.project == filter.project
        && field_eq(&issue.issue_title, &filter.issue_title)
        && field_eq(&issue.issue_text, &filter.issue_text)
        && field_eq(&issue.created_on.to_rfc3339(), &filter.created_on)
        && field_eq(&issue.updated_on.to_rfc3339(), &filter.updated_on)
        && field_eq(&issue.created_by, &filter.created_by)
        && field_eq(&issue.assigned_to, &filter.assigned_to)
        && field_eq(&issue.open.to_string(), &filter.open)
        && field_eq(&issue.status_text, &filter.status_text)
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let issues = self.issues.read().unwrap();
        Ok(issues
            .iter()
            .filter(|issue| matches(issue, filter))
            .cloned()
            .collect())
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue, StoreError> {
        let created = Issue {
            id: Uuid::now_v7(),
            project: issue.project,
            issue_title: issue.issue_title,
            issue_text: issue.issue_text,
            created_on: issue.created_on,
            updated_on: issue.updated_on,
            created_by: issue.created_by,
            assigned_to: issue.assigned_to,
            open: issue.open,
            status_text: issue.status_text,
        };
        self.issues.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_by_id(&self, id: Uuid, update: IssueUpdate) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().unwrap();
        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(v) = update.issue_title {
            issue.issue_title = v;
        }
        if let Some(v) = update.issue_text {
            issue.issue_text = v;
        }
        if let Some(v) = update.created_by {
            issue.created_by = v;
        }
        if let Some(v) = update.assigned_to {
            issue.assigned_to = v;
        }
        if let Some(v) = update.status_text {
            issue.status_text = v;
        }
        if let Some(v) = update.open {
            issue.open = v;
        }
        issue.updated_on = update.updated_on;

        Ok(issue.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Issue, StoreError> {
        let mut issues = self.issues.write().unwrap();
        let pos = issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(issues.remove(pos))
    }
}
