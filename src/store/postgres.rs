use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Issue, IssueFilter, IssueUpdate, NewIssue};

use super::{IssueStore, StoreError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl IssueStore for PgStore {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM issues WHERE project = ");
        query.push_bind(&filter.project);

        if let Some(v) = &filter.issue_title {
            query.push(" AND issue_title = ").push_bind(v);
        }
        if let Some(v) = &filter.issue_text {
            query.push(" AND issue_text = ").push_bind(v);
        }
        // Timestamp and boolean filters compare against the column's text
        // rendering: the supplied value is matched literally, never parsed.
        if let Some(v) = &filter.created_on {
            query.push(" AND created_on::text = ").push_bind(v);
        }
        if let Some(v) = &filter.updated_on {
            query.push(" AND updated_on::text = ").push_bind(v);
        }
        if let Some(v) = &filter.created_by {
            query.push(" AND created_by = ").push_bind(v);
        }
        if let Some(v) = &filter.assigned_to {
            query.push(" AND assigned_to = ").push_bind(v);
        }
        if let Some(v) = &filter.open {
            query.push(" AND open::text = ").push_bind(v);
        }
        if let Some(v) = &filter.status_text {
            query.push(" AND status_text = ").push_bind(v);
        }

        query.push(" ORDER BY created_on");

        let issues = query
            .build_query_as::<Issue>()
            .fetch_all(&self.pool)
            .await?;
        Ok(issues)
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue, StoreError> {
        let created = sqlx::query_as::<_, Issue>(
            "INSERT INTO issues
                 (id, project, issue_title, issue_text, created_on, updated_on,
                  created_by, assigned_to, open, status_text)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&issue.project)
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(issue.created_on)
        .bind(issue.updated_on)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(issue.open)
        .bind(&issue.status_text)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_by_id(&self, id: Uuid, update: IssueUpdate) -> Result<Issue, StoreError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE issues SET updated_on = ");
        query.push_bind(update.updated_on);

        if let Some(v) = update.issue_title {
            query.push(", issue_title = ").push_bind(v);
        }
        if let Some(v) = update.issue_text {
            query.push(", issue_text = ").push_bind(v);
        }
        if let Some(v) = update.created_by {
            query.push(", created_by = ").push_bind(v);
        }
        if let Some(v) = update.assigned_to {
            query.push(", assigned_to = ").push_bind(v);
        }
        if let Some(v) = update.status_text {
            query.push(", status_text = ").push_bind(v);
        }
        if let Some(v) = update.open {
            query.push(", open = ").push_bind(v);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<Issue>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Issue, StoreError> {
        sqlx::query_as::<_, Issue>("DELETE FROM issues WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }
}
