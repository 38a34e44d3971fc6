use tabled::{settings::Style, Table, Tabled};
use crate::metrics::Metrics;
use crate::model::{Project, StudentSummary};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: i64,
}

#[derive(Tabled)]
struct StudentRow<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Email")]
    email: &'a str,
}

#[derive(Tabled)]
struct ProjectRow<'a> {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Status")]
    status: &'a str,
    #[tabled(rename = "Student")]
    student: String,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Metric cards as a table, titled like "Total Internships"
pub fn metrics_table(metrics: &Metrics) -> String {
    let rows: Vec<MetricRow> = metrics
        .iter()
        .map(|(key, value)| MetricRow {
            metric: Metrics::title(key),
            value,
        })
        .collect();
    render(&rows)
}

pub fn students_table(students: &[StudentSummary]) -> String {
    let rows: Vec<StudentRow> = students
        .iter()
        .map(|s| StudentRow {
            name: &s.name,
            email: &s.email,
        })
        .collect();
    render(&rows)
}

pub fn projects_table(projects: &[Project]) -> String {
    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            id: p.project_id,
            title: &p.title,
            status: p.status.as_deref().unwrap_or("-"),
            student: p.student_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    render(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    #[test]
    fn test_metrics_table_uses_titles() {
        let store = SqliteStore::open_in_memory().unwrap();
        let table = metrics_table(&store.fetch_metrics("government"));
        assert!(table.contains("Colleges Onboarded"));
        assert!(table.contains("Total Engagement"));
    }

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(metrics_table(&Metrics::new()).is_empty());
        assert!(students_table(&[]).is_empty());
        assert!(projects_table(&[]).is_empty());
    }

    #[test]
    fn test_projects_table_marks_unowned() {
        let projects = vec![Project {
            project_id: 7,
            student_id: None,
            title: "Inventory app".into(),
            description: None,
            status: Some("Open".into()),
        }];
        let table = projects_table(&projects);
        assert!(table.contains("Inventory app"));
        assert!(table.contains("Open"));
    }
}
