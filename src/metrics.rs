//! Role metrics
//!
//! Each role sees a small set of named counts. All of them are global
//! aggregates over the whole database: a student's `total_internships` is
//! every internship ever logged, not just their own.

use serde::ser::{Serialize, SerializeMap, Serializer};
use crate::Result;
use crate::model::{capitalize, Role};
use crate::storage::SqliteStore;

/// Ordered mapping of metric name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    entries: Vec<(&'static str, i64)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, name: &'static str, value: i64) -> Self {
        self.entries.push((name, value));
        self
    }

    /// Value of a metric, if this role reports it
    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Metric names in report order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.entries.iter().copied()
    }

    /// Human title for a metric key: `total_internships` -> `Total Internships`
    pub fn title(key: &str) -> String {
        key.split('_')
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Computes role metrics from the store
pub struct MetricsEngine<'a> {
    store: &'a SqliteStore,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Metrics for a role given as stored text.
    ///
    /// The text must match a stored role exactly. Unrecognized roles and storage failures both yield an empty mapping.
    pub fn fetch_metrics(&self, role: &str) -> Metrics {
        let Some(role) = Role::from_stored(role) else {
            tracing::debug!("No metrics for unrecognized role {:?}", role);
            return Metrics::new();
        };

        match self.for_role(role) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::warn!("fetch_metrics({}) failed: {}", role, e);
                Metrics::new()
            }
        }
    }

    /// Metrics for a typed role, propagating storage errors
    pub fn for_role(&self, role: Role) -> Result<Metrics> {
        let store = self.store;
        let metrics = match role {
            Role::Student => {
                let total_internships = store.count_internships()?;
                Metrics::new()
                    .with("total_internships", total_internships)
                    .with("total_msmes", store.sum_msme_digitalized()?)
                    .with("certifications_issued", total_internships)
            }
            Role::College => Metrics::new()
                .with("students_participating", store.count_users_with_role(Role::Student.as_str())?)
                .with("projects_submitted", store.count_projects()?),
            Role::Mentor => {
                let feedback = store.count_feedback()?;
                Metrics::new()
                    .with("sessions_conducted", feedback)
                    .with("feedback_logged", feedback)
            }
            Role::Msme => Metrics::new()
                .with("projects_received", store.count_projects()?)
                .with("students_matched", store.count_matched_students()?),
            Role::Government => Metrics::new()
                .with("colleges_onboarded", store.count_users_with_role(Role::College.as_str())?)
                .with("total_engagement", store.count_internships()?),
        };
        Ok(metrics)
    }
}

impl SqliteStore {
    /// Shorthand for [`MetricsEngine::fetch_metrics`]
    pub fn fetch_metrics(&self, role: &str) -> Metrics {
        MetricsEngine::new(self).fetch_metrics(role)
    }
}
