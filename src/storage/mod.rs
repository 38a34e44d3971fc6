//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - users(id, name, email, role, org)
//! - projects(project_id, student_id, title, description, status)
//! - queries(query_id, user_id, prompt, response, timestamp)
//! - metrics(metric_id, role, metric_name, value)
//! - internships(internship_id, student_id, company_name, duration, feedback, msme_digitalized)
//! - feedback(feedback_id, student_id, rating, comments)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
