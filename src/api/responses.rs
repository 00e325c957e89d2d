//! Response DTOs for the HTTP surface. Pagination keys are camelCase for
//! compatibility with existing frontend clients; everything else stays
//! snake_case.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Issue, Priority, Status};
use crate::query::{SortKey, SortOrder};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub issues: Vec<Issue>,
    pub pagination: Pagination,
    pub filters_applied: FiltersApplied,
    pub sorting: Sorting,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Echo of the search/filter parameters the query was run with; absent
/// filters are serialized as null.
#[derive(Debug, Serialize)]
pub struct FiltersApplied {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Sorting {
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
    pub total_issues: usize,
}

/// Banner served at GET / with the endpoint map.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health_check: &'static str,
    pub all_issues: &'static str,
    pub single_issue: &'static str,
    pub create_issue: &'static str,
    pub update_issue: &'static str,
}
