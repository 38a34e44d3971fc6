//! Database schema definitions

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    role TEXT NOT NULL,
    org TEXT
)
"#;

/// SQL to create the projects table
/// `student_id` is NULL for college and MSME uploads
pub const CREATE_PROJECTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    project_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT,
    FOREIGN KEY (student_id) REFERENCES users (id)
)
"#;

/// SQL to create the queries table (assistant interaction log)
pub const CREATE_QUERIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS queries (
    query_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    prompt TEXT,
    response TEXT,
    timestamp TEXT,
    FOREIGN KEY (user_id) REFERENCES users (id)
)
"#;

/// SQL to create the metrics table. Nothing reads or writes it.
pub const CREATE_METRICS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS metrics (
    metric_id INTEGER PRIMARY KEY AUTOINCREMENT,
    role TEXT,
    metric_name TEXT,
    value INTEGER
)
"#;

/// SQL to create the internships table
pub const CREATE_INTERNSHIPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS internships (
    internship_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER,
    company_name TEXT NOT NULL,
    duration TEXT NOT NULL,
    feedback TEXT,
    msme_digitalized INTEGER DEFAULT 0,
    FOREIGN KEY (student_id) REFERENCES users (id)
)
"#;

/// SQL to create the feedback table
pub const CREATE_FEEDBACK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
    feedback_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER,
    rating INTEGER,
    comments TEXT,
    FOREIGN KEY (student_id) REFERENCES users (id)
)
"#;

/// Names of every table the schema creates
pub const TABLE_NAMES: &[&str] = &[
    "users",
    "projects",
    "queries",
    "metrics",
    "internships",
    "feedback",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_USERS_TABLE,
        CREATE_PROJECTS_TABLE,
        CREATE_QUERIES_TABLE,
        CREATE_METRICS_TABLE,
        CREATE_INTERNSHIPS_TABLE,
        CREATE_FEEDBACK_TABLE,
    ]
}
