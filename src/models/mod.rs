pub mod issue;

pub use issue::{CreateIssue, Issue, IssuePatch, Priority, Status};
