//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, WriteOutcome};
use crate::model::{
    display_name_from_email, FeedbackEntry, Internship, Project, QueryRecord, StudentSummary,
    User, UserProfile,
};
use super::schema;

/// Org recorded for users created implicitly
pub const DEFAULT_ORG: &str = "Unknown";

/// SQLite-backed storage for the tracker.
///
/// Wraps a single connection. Every statement runs in autocommit mode, so
/// each insert is durable as soon as the call returns.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened database {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create any missing tables. Existing tables are left untouched.
    pub fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Names of the user tables currently in the database, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    // ========== User Operations ==========

    /// Look up a user by exact email, with their internships and projects.
    ///
    /// Returns `None` when no user matches. Storage failures are logged and
    /// also reported as `None`.
    pub fn fetch_user(&self, email: &str) -> Option<UserProfile> {
        match self.load_profile(email) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("fetch_user({}) failed: {}", email, e);
                None
            }
        }
    }

    /// Return the user for `email`, creating it first if needed.
    ///
    /// A new user's name is derived from the email's local part. An
    /// existing user is returned as stored, whatever `role` was passed.
    pub fn ensure_user(&self, email: &str, role: &str, org: &str) -> Option<UserProfile> {
        if let Some(profile) = self.fetch_user(email) {
            return Some(profile);
        }

        let name = display_name_from_email(email);
        if let Err(e) = self.insert_user(&name, email, role, org) {
            tracing::warn!("ensure_user({}) insert failed: {}", email, e);
        }
        self.fetch_user(email)
    }

    /// Id of the user with `email`, if any
    pub fn find_user_id(&self, email: &str) -> Option<i64> {
        match self.user_id_by_email(email) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("find_user_id({}) failed: {}", email, e);
                None
            }
        }
    }

    /// Every user with the student role, in insertion order
    pub fn list_students(&self) -> Result<Vec<StudentSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, email FROM users WHERE role = ?1 ORDER BY id"
        )?;

        let students = stmt
            .query_map(["student"], |row| {
                Ok(StudentSummary {
                    name: row.get(0)?,
                    email: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(students)
    }

    fn load_profile(&self, email: &str) -> Result<Option<UserProfile>> {
        let Some(user) = self.get_user_by_email(email)? else {
            return Ok(None);
        };

        let internships = self.internships_for(user.id)?;
        let projects = self.projects_for(user.id)?;

        Ok(Some(UserProfile {
            user,
            internships,
            projects,
        }))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                "SELECT id, name, email, role, org FROM users WHERE email = ?1",
                [email],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        role: row.get(3)?,
                        org: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn user_id_by_email(&self, email: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM users WHERE email = ?1", [email], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    fn insert_user(&self, name: &str, email: &str, role: &str, org: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO users (name, email, role, org) VALUES (?1, ?2, ?3, ?4)",
            params![name, email, role, org],
        )?;
        tracing::info!("Created user {} ({})", email, role);
        Ok(self.conn.last_insert_rowid())
    }

    fn internships_for(&self, student_id: i64) -> Result<Vec<Internship>> {
        let mut stmt = self.conn.prepare(
            "SELECT company_name, duration, feedback, msme_digitalized FROM internships WHERE student_id = ?1 ORDER BY internship_id"
        )?;

        let internships = stmt
            .query_map([student_id], |row| {
                Ok(Internship {
                    company_name: row.get(0)?,
                    duration: row.get(1)?,
                    feedback: row.get(2)?,
                    msme_digitalized: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(internships)
    }

    fn projects_for(&self, student_id: i64) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT project_id, student_id, title, description, status FROM projects WHERE student_id = ?1 ORDER BY project_id"
        )?;

        let projects = stmt
            .query_map([student_id], |row| self.row_to_project(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(projects)
    }

    // ========== Record Inserts ==========

    /// Record an internship for the student with `email`.
    ///
    /// An unseen email first gets a student user with org "Unknown".
    pub fn log_internship(
        &self,
        email: &str,
        company: &str,
        duration: &str,
        feedback: Option<&str>,
        msme_digitalized: i64,
    ) -> WriteOutcome {
        WriteOutcome::from_result(
            "log_internship",
            self.insert_internship(email, company, duration, feedback, msme_digitalized),
        )
    }

    /// Record a project. `student_id` is `None` for college and MSME uploads.
    pub fn log_project(
        &self,
        student_id: Option<i64>,
        title: &str,
        description: Option<&str>,
        status: &str,
    ) -> WriteOutcome {
        let result = self.conn.execute(
            "INSERT INTO projects (student_id, title, description, status) VALUES (?1, ?2, ?3, ?4)",
            params![student_id, title, description, status],
        );
        WriteOutcome::from_result("log_project", result.map_err(Into::into))
    }

    /// Append an assistant interaction, stamped with the current UTC time
    pub fn log_query(&self, user_id: i64, prompt: &str, response: &str) -> WriteOutcome {
        let timestamp = utc_timestamp();
        let result = self.conn.execute(
            "INSERT INTO queries (user_id, prompt, response, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, prompt, response, timestamp],
        );
        WriteOutcome::from_result("log_query", result.map_err(Into::into))
    }

    /// Record feedback about a student. `rating` is stored as given.
    pub fn log_feedback(&self, student_id: i64, rating: i64, comments: Option<&str>) -> WriteOutcome {
        let result = self.conn.execute(
            "INSERT INTO feedback (student_id, rating, comments) VALUES (?1, ?2, ?3)",
            params![student_id, rating, comments],
        );
        WriteOutcome::from_result("log_feedback", result.map_err(Into::into))
    }

    fn insert_internship(
        &self,
        email: &str,
        company: &str,
        duration: &str,
        feedback: Option<&str>,
        msme_digitalized: i64,
    ) -> Result<()> {
        let student_id = match self.user_id_by_email(email)? {
            Some(id) => id,
            None => {
                let name = display_name_from_email(email);
                self.insert_user(&name, email, "student", DEFAULT_ORG)?
            }
        };

        self.conn.execute(
            r#"
            INSERT INTO internships (student_id, company_name, duration, feedback, msme_digitalized)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![student_id, company, duration, feedback, msme_digitalized],
        )?;
        tracing::debug!("Logged internship at {} for {}", company, email);
        Ok(())
    }

    // ========== Listings ==========

    /// Every project, including those with no student
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT project_id, student_id, title, description, status FROM projects ORDER BY project_id"
        )?;

        let projects = stmt
            .query_map([], |row| self.row_to_project(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(projects)
    }

    /// Assistant interactions logged for a user, oldest first
    pub fn queries_for(&self, user_id: i64) -> Result<Vec<QueryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT query_id, user_id, prompt, response, timestamp FROM queries WHERE user_id = ?1 ORDER BY query_id"
        )?;

        let queries = stmt
            .query_map([user_id], |row| {
                Ok(QueryRecord {
                    query_id: row.get(0)?,
                    user_id: row.get(1)?,
                    prompt: row.get(2)?,
                    response: row.get(3)?,
                    timestamp: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(queries)
    }

    /// Feedback rows about a student, oldest first
    pub fn feedback_for(&self, student_id: i64) -> Result<Vec<FeedbackEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT feedback_id, student_id, rating, comments FROM feedback WHERE student_id = ?1 ORDER BY feedback_id"
        )?;

        let entries = stmt
            .query_map([student_id], |row| {
                Ok(FeedbackEntry {
                    feedback_id: row.get(0)?,
                    student_id: row.get(1)?,
                    rating: row.get(2)?,
                    comments: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    /// Helper to convert a row to a Project
    fn row_to_project(&self, row: &rusqlite::Row) -> rusqlite::Result<Project> {
        Ok(Project {
            project_id: row.get(0)?,
            student_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: row.get(4)?,
        })
    }

    // ========== Aggregates ==========

    fn scalar(&self, sql: &str, params: impl rusqlite::Params) -> Result<i64> {
        let value: Option<i64> = self.conn.query_row(sql, params, |row| row.get(0))?;
        Ok(value.unwrap_or(0))
    }

    /// Count all internships
    pub fn count_internships(&self) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM internships", [])
    }

    /// Sum of `msme_digitalized` across all internships, 0 when empty
    pub fn sum_msme_digitalized(&self) -> Result<i64> {
        self.scalar("SELECT SUM(msme_digitalized) FROM internships", [])
    }

    /// Count users whose stored role equals `role`
    pub fn count_users_with_role(&self, role: &str) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM users WHERE role = ?1", [role])
    }

    /// Count all users
    pub fn count_users(&self) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM users", [])
    }

    /// Count all projects
    pub fn count_projects(&self) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM projects", [])
    }

    /// Count distinct students attached to at least one project
    pub fn count_matched_students(&self) -> Result<i64> {
        self.scalar(
            "SELECT COUNT(DISTINCT student_id) FROM projects WHERE student_id IS NOT NULL",
            [],
        )
    }

    /// Count all feedback rows
    pub fn count_feedback(&self) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM feedback", [])
    }

    /// Count all logged assistant queries
    pub fn count_queries(&self) -> Result<i64> {
        self.scalar("SELECT COUNT(*) FROM queries", [])
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            users: self.count_users()?,
            internships: self.count_internships()?,
            projects: self.count_projects()?,
            feedback: self.count_feedback()?,
            queries: self.count_queries()?,
        })
    }

    /// Raw connection, for callers that need an ad hoc statement
    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Current UTC time as ISO-8601 with microseconds and no offset
fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub users: i64,
    pub internships: i64,
    pub projects: i64,
    pub feedback: i64,
    pub queries: i64,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Internships: {}", self.internships)?;
        writeln!(f, "  Projects: {}", self.projects)?;
        writeln!(f, "  Feedback: {}", self.feedback)?;
        writeln!(f, "  Queries: {}", self.queries)
    }
}
