//! The in-memory issue store.
//!
//! One `IssueStore` instance owns the whole collection for the lifetime of
//! the process: empty at startup, gone at shutdown. Handlers share it behind
//! an `Arc<RwLock<_>>` so each operation runs as an atomic unit against the
//! collection.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{CreateIssue, Issue, IssuePatch};
use crate::query::{self, ListPage, ListQuery};

pub type SharedStore = Arc<RwLock<IssueStore>>;

#[derive(Debug, Default)]
pub struct IssueStore {
    issues: Vec<Issue>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// New empty store wrapped for sharing across request handlers.
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Creates an issue from a validated draft: fresh UUID, both timestamps
    /// set to now, appended to the collection in insertion order.
    pub fn create(&mut self, draft: CreateIssue) -> Issue {
        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee,
            created_at: now,
            updated_at: now,
        };
        self.issues.push(issue.clone());
        issue
    }

    pub fn get(&self, id: &str) -> ApiResult<Issue> {
        self.issues
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Applies a validated patch to an existing issue. The NotFound check
    /// happens before any mutation, and `updated_at` is bumped on every
    /// successful update even when no visible field changed.
    pub fn update(&mut self, id: &str, patch: &IssuePatch) -> ApiResult<Issue> {
        let issue = self
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        patch.apply_to(issue);
        issue.updated_at = Utc::now();
        Ok(issue.clone())
    }

    /// Runs the search/filter/sort/paginate pipeline over the collection.
    pub fn list(&self, query: &ListQuery) -> ListPage {
        query::run(&self.issues, query)
    }
}
