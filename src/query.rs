//! The list-issues query pipeline: search, filter, sort, paginate — always
//! applied in that order over a snapshot of the collection.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{Issue, Priority, Status};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters accepted by GET /issues.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            priority: None,
            assignee: None,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Range checks on the pagination parameters. Everything else either
    /// deserializes into a closed enum or is free-form text.
    pub fn validate(&self) -> ApiResult<()> {
        if self.page < 1 {
            return Err(ApiError::Validation("page must be at least 1".to_string()));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(ApiError::Validation(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

/// Field to sort the result set by.
///
/// Deserialization is deliberately lenient: an unrecognized `sort_by` value
/// falls back to `updated_at` instead of rejecting the request.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Status,
    Priority,
    Assignee,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "status" => Self::Status,
            "priority" => Self::Priority,
            "assignee" => Self::Assignee,
            "created_at" => Self::CreatedAt,
            _ => Self::UpdatedAt,
        }
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// One page of results plus the pre-pagination totals.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub issues: Vec<Issue>,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Runs the full pipeline over a snapshot of the collection. The input
/// slice is in insertion order, which is what the stable sort preserves for
/// records comparing equal on the sort key.
pub fn run(issues: &[Issue], query: &ListQuery) -> ListPage {
    let mut matched: Vec<&Issue> = issues
        .iter()
        .filter(|issue| matches_search(issue, query.search.as_deref()))
        .filter(|issue| matches_filters(issue, query))
        .collect();

    sort(&mut matched, query.sort_by, query.sort_order);

    let total_count = matched.len();
    let page_size = query.page_size as usize;
    let total_pages = total_count.div_ceil(page_size);

    let start = (query.page as usize - 1) * page_size;
    let page: Vec<Issue> = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    ListPage {
        issues: page,
        total_count,
        total_pages,
    }
}

/// Case-insensitive substring match against title, description and assignee.
/// No search term keeps every record.
fn matches_search(issue: &Issue, search: Option<&str>) -> bool {
    let Some(term) = search else {
        return true;
    };
    let term = term.to_lowercase();

    issue.title.to_lowercase().contains(&term)
        || issue
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
        || issue
            .assignee
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&term))
}

/// Conjunctive field filters: status and priority match exactly, assignee is
/// a case-insensitive substring match.
fn matches_filters(issue: &Issue, query: &ListQuery) -> bool {
    if let Some(status) = query.status {
        if issue.status != status {
            return false;
        }
    }
    if let Some(priority) = query.priority {
        if issue.priority != priority {
            return false;
        }
    }
    if let Some(assignee) = &query.assignee {
        let needle = assignee.to_lowercase();
        let matched = issue
            .assignee
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&needle));
        if !matched {
            return false;
        }
    }
    true
}

fn sort(issues: &mut [&Issue], key: SortKey, order: SortOrder) {
    // sort_by is stable, and reversing the comparator (rather than the
    // sorted slice) keeps insertion order for equal keys in both directions.
    issues.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Issue, b: &Issue, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        // Absent assignee sorts as the empty string, i.e. first ascending.
        SortKey::Assignee => a
            .assignee
            .as_deref()
            .unwrap_or("")
            .cmp(b.assignee.as_deref().unwrap_or("")),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}
