pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Issue, IssueFilter, IssueUpdate, NewIssue};

#[derive(Debug)]
pub enum StoreError {
    /// No document with the requested id.
    NotFound,
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "not found"),
            StoreError::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Document-collection interface the handlers are written against. One
/// production implementation ([`PgStore`]) and one in-memory substitute for
/// tests ([`MemoryStore`]).
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Exact-match, AND-combined lookup.
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Insert, assigning a fresh id. Returns the persisted record.
    async fn insert(&self, issue: NewIssue) -> Result<Issue, StoreError>;

    /// Partial update by id. Returns the updated record, or `NotFound`.
    async fn update_by_id(&self, id: Uuid, update: IssueUpdate) -> Result<Issue, StoreError>;

    /// Delete by id. Returns the deleted record, or `NotFound`.
    async fn delete_by_id(&self, id: Uuid) -> Result<Issue, StoreError>;
}
