//! Ky'ra CLI - role-based internship tracking from the terminal

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use kyra::config::{self, KyraConfig};
use kyra::storage::SqliteStore;
use kyra::Role;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "kyra")]
#[command(version)]
#[command(about = "Ky'ra - track internships, projects and feedback by role")]
#[command(long_about = r#"
Ky'ra guides the internship journey for students, colleges, mentors,
MSMEs and government viewers.

Example usage:
  kyra login --email alice@college.edu --role student
  kyra log-internship --email alice@college.edu --company Acme --duration "3 months"
  kyra metrics --role college
  kyra serve --port 8501
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and, optionally, a config file
    Init {
        /// Write kyra.toml with the resolved settings
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Log in by email and role (creates the user on first visit)
    Login {
        #[arg(short, long)]
        email: String,

        /// student, college, mentor, msme or government
        #[arg(short, long)]
        role: Role,
    },

    /// Show the dashboard for a logged-in user
    Dashboard {
        #[arg(short, long)]
        email: String,
    },

    /// Show the metrics a role sees
    Metrics {
        /// Role name; unrecognized roles report no metrics
        #[arg(short, long)]
        role: String,
    },

    /// Log an internship for a student
    LogInternship {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        company: String,

        /// Free text, e.g. "3 months"
        #[arg(long)]
        duration: String,

        #[arg(long)]
        feedback: Option<String>,

        /// MSMEs digitalized during the internship
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(i64).range(0..))]
        msmes: i64,
    },

    /// Submit an upskilling project as a student
    Upskill {
        #[arg(short, long)]
        email: String,

        /// Enrolled course
        #[arg(long)]
        course: String,

        /// Learning hours completed
        #[arg(long, default_value = "0")]
        hours: u32,

        /// Project title
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Upload an open project (college) or project need (MSME)
    UploadProject {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Rate your own experience as a student
    Feedback {
        #[arg(short, long)]
        email: String,

        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        rating: i64,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Give feedback on a student as a mentor
    MentorFeedback {
        #[arg(long)]
        student_email: String,

        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        rating: i64,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Ask Ky'ra a question
    Ask {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        prompt: String,
    },

    /// List every student (college view)
    Students,

    /// List every project
    Projects,

    /// Regional impact chart (government view)
    Impact,

    /// Show row counts per table
    Stats,

    /// Serve the JSON API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

/// Print a JSON envelope for a successful command
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "command": command,
            "ok": true,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = config.database_path(cli.database.as_deref());

    config::ensure_db_dir(&database)?;
    let store = SqliteStore::open(&database)?;
    tracing::debug!("Using database {:?}", database);

    match cli.command {
        Commands::Init { write_config, force } => {
            if write_config {
                let path = cli.config.clone().unwrap_or_else(config::default_config_path);
                let resolved = KyraConfig {
                    database: Some(database.to_string_lossy().to_string()),
                    port: Some(config.port(None)),
                };
                config::write_config(&path, &resolved, force)?;
            }
            commands::run_init(&store, &database, output_mode)
        }
        Commands::Login { email, role } => commands::run_login(&store, &email, role, output_mode),
        Commands::Dashboard { email } => commands::run_dashboard(&store, &email, output_mode),
        Commands::Metrics { role } => commands::run_metrics(&store, &role, output_mode),
        Commands::LogInternship { email, company, duration, feedback, msmes } => {
            commands::run_log_internship(&store, &email, &company, &duration, feedback.as_deref(), msmes, output_mode)
        }
        Commands::Upskill { email, course, hours, title, description } => {
            commands::run_upskill(&store, &email, &course, hours, &title, description.as_deref(), output_mode)
        }
        Commands::UploadProject { title, description } => {
            commands::run_upload_project(&store, &title, description.as_deref(), output_mode)
        }
        Commands::Feedback { email, rating, comments } => {
            commands::run_feedback(&store, &email, rating, comments.as_deref(), output_mode)
        }
        Commands::MentorFeedback { student_email, rating, comments } => {
            commands::run_mentor_feedback(&store, &student_email, rating, comments.as_deref(), output_mode)
        }
        Commands::Ask { email, prompt } => commands::run_ask(&store, &email, &prompt, output_mode),
        Commands::Students => commands::run_students(&store, output_mode),
        Commands::Projects => commands::run_projects(&store, output_mode),
        Commands::Impact => commands::run_impact(&store, output_mode),
        Commands::Stats => commands::run_stats(&store, &database, output_mode),
        Commands::Serve { port } => {
            let port = config.port(port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(kyra::server::start_server(port, store))
        }
    }
}
