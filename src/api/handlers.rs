//! HTTP handlers for the issue endpoints.
//!
//! Each handler validates at the boundary, takes the store lock for the
//! duration of a single store operation, and maps failures through
//! `ApiError`'s response conversion. The store itself never sees an invalid
//! shape.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::api::responses::{
    Endpoints, FiltersApplied, HealthResponse, ListResponse, Pagination, ServiceInfo, Sorting,
};
use crate::error::ApiError;
use crate::models::{CreateIssue, Issue, IssuePatch};
use crate::query::ListQuery;
use crate::store::SharedStore;

/// GET / - service banner with the endpoint map.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Issue Tracker API - issue management over HTTP",
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        endpoints: Endpoints {
            health_check: "/health",
            all_issues: "/issues",
            single_issue: "/issues/{id}",
            create_issue: "POST /issues",
            update_issue: "PUT /issues/{id}",
        },
    })
}

/// GET /health - liveness plus the current collection size.
pub async fn health_check(State(store): State<SharedStore>) -> Json<HealthResponse> {
    let total_issues = store.read().unwrap().len();
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        database: "in-memory",
        total_issues,
    })
}

/// GET /issues - search, filter, sort and paginate the collection.
pub async fn list_issues(
    State(store): State<SharedStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    query.validate()?;

    let page = store.read().unwrap().list(&query);

    Ok(Json(ListResponse {
        issues: page.issues,
        pagination: Pagination {
            page: query.page,
            page_size: query.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
        },
        filters_applied: FiltersApplied {
            search: query.search,
            status: query.status,
            priority: query.priority,
            assignee: query.assignee,
        },
        sorting: Sorting {
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        },
    }))
}

/// GET /issues/{id} - full record, 404 when the id is unknown.
pub async fn get_issue(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Issue>, ApiError> {
    let issue = store.read().unwrap().get(&id)?;
    Ok(Json(issue))
}

/// POST /issues - create a new issue, 201 with the stored record.
pub async fn create_issue(
    State(store): State<SharedStore>,
    Json(draft): Json<CreateIssue>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    draft.validate()?;

    let issue = store.write().unwrap().create(draft);
    tracing::info!(id = %issue.id, "issue created");

    Ok((StatusCode::CREATED, Json(issue)))
}

/// PUT /issues/{id} - partial update; only fields present in the body are
/// applied, 404 when the id is unknown.
pub async fn update_issue(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(patch): Json<IssuePatch>,
) -> Result<Json<Issue>, ApiError> {
    patch.validate()?;

    let issue = store.write().unwrap().update(&id, &patch)?;
    tracing::info!(id = %issue.id, "issue updated");

    Ok(Json(issue))
}
