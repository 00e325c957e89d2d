// Module declarations
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;

// Re-export commonly used items
pub use api::create_router;
pub use error::{ApiError, ApiResult};
pub use models::{CreateIssue, Issue, IssuePatch, Priority, Status};
pub use query::{ListQuery, SortKey, SortOrder};
pub use store::{IssueStore, SharedStore};
