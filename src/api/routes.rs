//! Route configuration for the Issue Tracker API.
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | / | `service_info` | Service banner and endpoint map |
//! | GET | /health | `health_check` | Health check |
//! | GET | /issues | `list_issues` | Search/filter/sort/paginate issues |
//! | GET | /issues/{id} | `get_issue` | Get a single issue |
//! | POST | /issues | `create_issue` | Create a new issue |
//! | PUT | /issues/{id} | `update_issue` | Partially update an issue |

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::handlers::{
    create_issue, get_issue, health_check, list_issues, service_info, update_issue,
};
use crate::store::SharedStore;

// Local frontend dev servers the API is expected to serve.
const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:4200",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8080",
];

fn cors_layer() -> CorsLayer {
    let origins = ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok());

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the router over a shared store instance.
pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/issues", get(list_issues))
        .route("/issues", post(create_issue))
        .route("/issues/{id}", get(get_issue))
        .route("/issues/{id}", put(update_issue))
        .layer(cors_layer())
        .with_state(store)
}
