use std::path::Path;
use crate::{OutputMode, emit_success};
use kyra::assistant::{self, EchoAssistant};
use kyra::metrics::Metrics;
use kyra::model::{capitalize, Role, UserProfile};
use kyra::session::Session;
use kyra::storage::SqliteStore;
use kyra::ui::{self, Icons, Spinner};
use kyra::WriteOutcome;

const REQUIRED_FIELDS: &str = "Please fill in all required fields.";

fn require(fields: &[&str]) -> anyhow::Result<()> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        anyhow::bail!(REQUIRED_FIELDS);
    }
    Ok(())
}

fn lookup(store: &SqliteStore, email: &str) -> anyhow::Result<UserProfile> {
    store
        .fetch_user(email)
        .ok_or_else(|| anyhow::anyhow!("No user with email {} - log in first", email))
}

fn report_write(output_mode: OutputMode, command: &str, outcome: WriteOutcome, saved_message: &str) -> anyhow::Result<()> {
    if output_mode.is_human() {
        match outcome {
            WriteOutcome::Saved => ui::success(saved_message),
            WriteOutcome::Failed => ui::error("Could not save. Please try again."),
        }
    } else {
        emit_success(output_mode, command, serde_json::json!({ "success": outcome.is_saved() }))?;
    }
    Ok(())
}

fn print_metrics(metrics: &Metrics) {
    if metrics.is_empty() {
        println!("  {}", ui::dim("No metrics for this role."));
    } else {
        println!("{}", ui::metrics_table(metrics));
    }
}

fn print_progress(user: &UserProfile) {
    ui::header(Icons::STATS, "Your Progress");
    println!("You're doing great! Let's continue.");
    if user.internships.is_empty() {
        println!("  {}", ui::dim("No internships logged yet."));
    }
    for internship in &user.internships {
        println!();
        println!("  {}", internship.company_name);
        ui::summary_row("Duration:", &internship.duration);
        ui::summary_row("Feedback:", internship.feedback.as_deref().filter(|f| !f.is_empty()).unwrap_or("N/A"));
        ui::summary_row("MSMEs Digitalized:", &internship.msme_digitalized.to_string());
    }
}

pub fn run_init(store: &SqliteStore, database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    store.initialize_schema()?;
    let tables = store.table_names()?;
    if output_mode.is_human() {
        ui::success(&format!("Database ready at {}", database.display()));
        ui::info("Tables", &tables.join(", "));
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "database": database.display().to_string(),
            "tables": tables,
        }))?;
    }
    Ok(())
}

pub fn run_login(store: &SqliteStore, email: &str, role: Role, output_mode: OutputMode) -> anyhow::Result<()> {
    require(&[email])?;
    let session = Spinner::run("Verifying your profile...", || Session::login(store, email.trim(), role))?;
    let metrics = store.fetch_metrics(session.user.role());

    if output_mode.is_human() {
        ui::banner("Welcome to Ky'ra", "Ky'ra is here to guide your internship journey. Let's begin.");
        ui::section("Choose Your Journey");
        for r in Role::all() {
            ui::summary_row(&format!("{}:", r.label()), r.description());
        }
        print_dashboard(&session, &metrics);
    } else {
        emit_success(output_mode, "login", serde_json::json!({
            "session": session,
            "menu": session.menu(),
            "metrics": metrics,
        }))?;
    }
    Ok(())
}

fn print_dashboard(session: &Session, metrics: &Metrics) {
    let role = capitalize(session.user.role());
    ui::section(&format!("Hi, {}!", session.user.name()));
    ui::summary_row("Role:", &role);
    ui::summary_row("Navigate:", &session.menu().join(" | "));

    ui::header(Icons::STAR, &format!("Ky'ra: Your {} Journey", role));
    println!("How can Ky'ra help you today, {}?", session.user.name());
    print_metrics(metrics);
}

pub fn run_dashboard(store: &SqliteStore, email: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let session = Session::resume(store, email)?;
    let metrics = store.fetch_metrics(session.user.role());

    if output_mode.is_human() {
        print_dashboard(&session, &metrics);
        if session.role() == Some(Role::Student) {
            print_progress(&session.user);
        }
    } else {
        emit_success(output_mode, "dashboard", serde_json::json!({
            "session": session,
            "menu": session.menu(),
            "metrics": metrics,
        }))?;
    }
    Ok(())
}

pub fn run_metrics(store: &SqliteStore, role: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let metrics = store.fetch_metrics(role);
    if output_mode.is_human() {
        ui::header(Icons::STATS, &format!("Metrics for {}", role));
        print_metrics(&metrics);
    } else {
        emit_success(output_mode, "metrics", serde_json::to_value(&metrics)?)?;
    }
    Ok(())
}

pub fn run_log_internship(
    store: &SqliteStore,
    email: &str,
    company: &str,
    duration: &str,
    feedback: Option<&str>,
    msmes: i64,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    require(&[email, company, duration])?;
    // Unseen emails get their user created by the insert itself
    let session = Session::resume(store, email).ok();
    let outcome = Spinner::run("Saving your internship...", || {
        store.log_internship(email, company, duration, feedback, msmes)
    });
    report_write(output_mode, "log-internship", outcome, &format!("Internship logged successfully! {}", Icons::PARTY))?;

    if outcome.is_saved() && output_mode.is_human() {
        let session = match session {
            Some(session) => session.refreshed(store),
            None => Session::resume(store, email)?,
        };
        print_progress(&session.user);
    }
    Ok(())
}

pub fn run_upskill(
    store: &SqliteStore,
    email: &str,
    course: &str,
    hours: u32,
    title: &str,
    description: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    require(&[course, title])?;
    let user = lookup(store, email)?;
    tracing::debug!("{} completed {} hours of {}", user.email(), hours, course);

    let outcome = store.log_project(Some(user.id()), title, description, "Submitted");
    report_write(output_mode, "upskill", outcome, "Project submitted successfully!")
}

pub fn run_upload_project(
    store: &SqliteStore,
    title: &str,
    description: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let outcome = store.log_project(None, title, description, "Open");
    report_write(output_mode, "upload-project", outcome, "Project uploaded successfully!")
}

pub fn run_feedback(
    store: &SqliteStore,
    email: &str,
    rating: i64,
    comments: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let user = lookup(store, email)?;
    let outcome = Spinner::run("Submitting feedback...", || store.log_feedback(user.id(), rating, comments));
    report_write(output_mode, "feedback", outcome, &format!("Thanks for your feedback! {}", Icons::STAR))
}

pub fn run_mentor_feedback(
    store: &SqliteStore,
    student_email: &str,
    rating: i64,
    comments: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let Some(student_id) = store.find_user_id(student_email) else {
        anyhow::bail!("Student not found.");
    };
    let outcome = store.log_feedback(student_id, rating, comments);
    report_write(output_mode, "mentor-feedback", outcome, "Feedback submitted!")
}

pub fn run_ask(store: &SqliteStore, email: &str, prompt: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let user = lookup(store, email)?;
    let (response, logged) = Spinner::run("Ky'ra is thinking...", || {
        assistant::ask(store, &EchoAssistant, user.id(), prompt)
    });

    if output_mode.is_human() {
        ui::header(Icons::ROBOT, "Ask Ky'ra");
        ui::success(&response);
        if !logged.is_saved() {
            ui::warn("This conversation could not be saved.");
        }
    } else {
        emit_success(output_mode, "ask", serde_json::json!({
            "response": response,
            "logged": logged.is_saved(),
        }))?;
    }
    Ok(())
}

pub fn run_students(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let students = store.list_students()?;
    if output_mode.is_human() {
        ui::header(Icons::SCHOOL, "Student Performance");
        if students.is_empty() {
            println!("  {}", ui::dim("No students yet."));
        } else {
            println!("{}", ui::students_table(&students));
        }
    } else {
        emit_success(output_mode, "students", serde_json::to_value(&students)?)?;
    }
    Ok(())
}

pub fn run_projects(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let projects = store.list_projects()?;
    if output_mode.is_human() {
        ui::header(Icons::BOOKS, "Projects");
        if projects.is_empty() {
            println!("  {}", ui::dim("No projects yet."));
        } else {
            println!("{}", ui::projects_table(&projects));
        }
    } else {
        emit_success(output_mode, "projects", serde_json::to_value(&projects)?)?;
    }
    Ok(())
}

pub fn run_impact(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let metrics = store.fetch_metrics(Role::Government.as_str());
    let colleges = metrics.get("colleges_onboarded").unwrap_or(0);
    let engagement = metrics.get("total_engagement").unwrap_or(0);

    if output_mode.is_human() {
        ui::header(Icons::GLOBE, "Regional Impact");
        println!("View the impact of internships across regions.");
        let max = colleges.max(engagement);
        ui::bar("Colleges", colleges, max);
        ui::bar("Engagement", engagement, max);
    } else {
        emit_success(output_mode, "impact", serde_json::json!({
            "Colleges": colleges,
            "Engagement": engagement,
        }))?;
    }
    Ok(())
}

pub fn run_stats(store: &SqliteStore, database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = store.stats()?;
    if output_mode.is_human() {
        ui::header(Icons::DATABASE, &format!("Ky'ra Statistics ({})", database.display()));
        println!("{}", stats);
    } else {
        emit_success(output_mode, "stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}
