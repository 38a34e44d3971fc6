//! # Ky'ra - Internship Tracker
//!
//! Role-based tracking of internships, projects, feedback and assistant
//! queries for students, colleges, mentors, MSMEs and government viewers.
//!
//! Ky'ra provides:
//! - SQLite-backed storage with idempotent schema creation
//! - One data-access operation per entity (lookup, upsert, insert)
//! - Role-keyed metric aggregation
//! - An explicit session context for the presentation layer
//! - A terminal CLI and a small JSON HTTP surface

pub mod model;
pub mod storage;
pub mod metrics;
pub mod assistant;
pub mod session;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Role, User, UserProfile, Internship, Project, StudentSummary, QueryRecord, FeedbackEntry};
pub use storage::SqliteStore;
pub use metrics::{Metrics, MetricsEngine};
pub use assistant::{query_kyra_api, Assistant, EchoAssistant};
pub use session::Session;

/// Result type alias for Ky'ra operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Ky'ra operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Outcome of a write operation.
///
/// Writes never surface storage errors to callers: a failed insert is
/// logged and reported as `Failed` with no further detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Saved,
    Failed,
}

impl WriteOutcome {
    pub fn is_saved(self) -> bool {
        matches!(self, WriteOutcome::Saved)
    }

    /// Collapse an internal result into an outcome, logging the error
    pub(crate) fn from_result<T>(op: &str, result: Result<T>) -> Self {
        match result {
            Ok(_) => WriteOutcome::Saved,
            Err(e) => {
                tracing::warn!("{} failed: {}", op, e);
                WriteOutcome::Failed
            }
        }
    }
}

impl From<WriteOutcome> for bool {
    fn from(outcome: WriteOutcome) -> bool {
        outcome.is_saved()
    }
}
