use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const ASSIGNEE_MAX_LEN: usize = 100;

/// A tracked issue. `id`, `created_at` and `updated_at` are owned by the
/// store; clients never supply them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Issue workflow status. The progression open -> in-progress -> closed is
/// suggested but never enforced; any transition is accepted.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl Status {
    /// Fixed sort rank: open=1 < in-progress=2 < closed=3.
    pub fn rank(self) -> u8 {
        match self {
            Self::Open => 1,
            Self::InProgress => 2,
            Self::Closed => 3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Fixed sort rank: low=1 < medium=2 < high=3 < critical=4.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

/// Payload for POST /issues. Only `title` is required; `status` and
/// `priority` fall back to their defaults when absent.
#[derive(Debug, Deserialize, Clone)]
pub struct CreateIssue {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl CreateIssue {
    pub fn validate(&self) -> ApiResult<()> {
        validate_title(&self.title)?;
        validate_optional(self.description.as_deref(), "description", DESCRIPTION_MAX_LEN)?;
        validate_optional(self.assignee.as_deref(), "assignee", ASSIGNEE_MAX_LEN)
    }
}

/// Sparse patch for PUT /issues/{id}.
///
/// A field that is absent from the request body is left untouched; a field
/// that is present is applied, including an explicit `null` on the nullable
/// fields (`description`, `assignee`), which clears them. The nullable
/// fields use a double `Option` so the two cases stay distinguishable after
/// deserialization: outer `None` = absent, `Some(None)` = explicit null.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IssuePatch {
    pub title: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
}

impl IssuePatch {
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_optional(description.as_deref(), "description", DESCRIPTION_MAX_LEN)?;
        }
        if let Some(assignee) = &self.assignee {
            validate_optional(assignee.as_deref(), "assignee", ASSIGNEE_MAX_LEN)?;
        }
        Ok(())
    }

    /// Merges the patch into `issue`, overwriting only the fields that were
    /// present in the request. Does not touch `id`, `created_at` or
    /// `updated_at`; the store bumps `updated_at` itself.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(title) = &self.title {
            issue.title = title.clone();
        }
        if let Some(description) = &self.description {
            issue.description = description.clone();
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = &self.assignee {
            issue.assignee = assignee.clone();
        }
    }
}

// Plain `Option<Option<T>>` collapses `null` into the outer `None`; routing
// through `Option<T>` first keeps `null` as `Some(None)` while a missing
// field still takes the struct-level default of `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> ApiResult<()> {
    let len = title.chars().count();
    if len == 0 {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    if len > TITLE_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "title must be at most {} characters, got {}",
            TITLE_MAX_LEN, len
        )));
    }
    Ok(())
}

fn validate_optional(value: Option<&str>, field: &str, max_len: usize) -> ApiResult<()> {
    if let Some(value) = value {
        let len = value.chars().count();
        if len > max_len {
            return Err(ApiError::Validation(format!(
                "{} must be at most {} characters, got {}",
                field, max_len, len
            )));
        }
    }
    Ok(())
}
