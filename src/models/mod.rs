pub mod issue;

pub use issue::{Issue, IssueFilter, IssueUpdate, NewIssue};
