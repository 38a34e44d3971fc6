//! Domain types - users, roles and the records they own
//!
//! Every viewer of the tracker has one of five roles:
//! - `Student`: logs internships, submits projects, rates the experience
//! - `College`: follows student participation, uploads projects
//! - `Mentor`: gives feedback on students
//! - `Msme`: posts project needs
//! - `Government`: views aggregate engagement

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role a user logs in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    College,
    Mentor,
    Msme,
    Government,
}

impl Role {
    /// Lowercase form stored in the `users.role` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::College => "college",
            Role::Mentor => "mentor",
            Role::Msme => "msme",
            Role::Government => "government",
        }
    }

    /// Display label used on the login screen
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::College => "College",
            Role::Mentor => "Mentor",
            Role::Msme => "MSME",
            Role::Government => "Government",
        }
    }

    /// One-line "choose your journey" blurb
    pub fn description(&self) -> &'static str {
        match self {
            Role::Student => "Track your learning and internships.",
            Role::College => "Monitor student progress.",
            Role::Mentor => "Guide your mentees.",
            Role::Msme => "Digitalize your business.",
            Role::Government => "View regional impact.",
        }
    }

    /// Exact match against the stored lowercase form.
    ///
    /// Stored text is compared as-is: `"Student"` or `" msme"` in the
    /// `users.role` column is not a recognized role.
    pub fn from_stored(role: &str) -> Option<Role> {
        Role::all().iter().copied().find(|r| r.as_str() == role)
    }

    /// Get all roles, in login-screen order
    pub fn all() -> &'static [Role] {
        &[
            Role::Student,
            Role::College,
            Role::Mentor,
            Role::Msme,
            Role::Government,
        ]
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "college" => Ok(Role::College),
            "mentor" => Ok(Role::Mentor),
            "msme" => Ok(Role::Msme),
            "government" => Ok(Role::Government),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `users` table.
///
/// `role` keeps the stored text so rows written by other tools with an
/// unexpected role still load; use [`User::parsed_role`] for the typed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub org: Option<String>,
}

impl User {
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_stored(&self.role)
    }
}

/// An internship as shown on a student's progress page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    pub company_name: String,
    pub duration: String,
    pub feedback: Option<String>,
    pub msme_digitalized: i64,
}

/// A project, either a student submission or an open upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub student_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Composite snapshot returned by a user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub internships: Vec<Internship>,
    pub projects: Vec<Project>,
}

impl UserProfile {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn role(&self) -> &str {
        &self.user.role
    }
}

/// Name and email of a student, for the college performance listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub name: String,
    pub email: String,
}

/// A logged assistant interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query_id: i64,
    pub user_id: Option<i64>,
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub timestamp: Option<String>,
}

/// A feedback row. `rating` is whatever the caller stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub feedback_id: i64,
    pub student_id: Option<i64>,
    pub rating: Option<i64>,
    pub comments: Option<String>,
}

/// Uppercase the first character and lowercase the rest.
///
/// Only the first char of an expanding uppercase stays upper, so `"ßx"`
/// becomes `"Ssx"`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            upper
                .next()
                .into_iter()
                .chain(upper.flat_map(char::to_lowercase))
                .chain(chars.flat_map(char::to_lowercase))
                .collect()
        }
        None => String::new(),
    }
}

/// Derive a display name from an email's local part.
///
/// The text before the first `@` is capitalized, so `"aLICE@x.com"`
/// becomes `"Alice"`.
pub fn display_name_from_email(email: &str) -> String {
    capitalize(email.split('@').next().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("MSME".parse::<Role>().unwrap(), Role::Msme);
        assert_eq!(" government ".parse::<Role>().unwrap(), Role::Government);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_round_trips_through_storage_form() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn test_stored_role_is_exact() {
        assert_eq!(Role::from_stored("student"), Some(Role::Student));
        assert_eq!(Role::from_stored("msme"), Some(Role::Msme));
        assert_eq!(Role::from_stored("Student"), None);
        assert_eq!(Role::from_stored(" college "), None);
        assert_eq!(Role::from_stored(""), None);
    }

    #[test]
    fn test_parsed_role_uses_stored_form() {
        let mut user = User {
            id: 1,
            name: "S".into(),
            email: "s@x.com".into(),
            role: "student".into(),
            org: None,
        };
        assert_eq!(user.parsed_role(), Some(Role::Student));
        user.role = "Student".into();
        assert_eq!(user.parsed_role(), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("student"), "Student");
        assert_eq!(capitalize("mSME"), "Msme");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ßtraße"), "Sstraße");
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("alice@x.com"), "Alice");
        assert_eq!(display_name_from_email("bOB.smith@uni.edu"), "Bob.smith");
        assert_eq!(display_name_from_email("no-at-sign"), "No-at-sign");
        assert_eq!(display_name_from_email("@x.com"), "");
        assert_eq!(display_name_from_email("ßtraße@x.com"), "Sstraße");
    }

    #[test]
    fn test_profile_serializes_flat() {
        let profile = UserProfile {
            user: User {
                id: 1,
                name: "Alice".into(),
                email: "alice@x.com".into(),
                role: "student".into(),
                org: Some("Unknown".into()),
            },
            internships: vec![],
            projects: vec![],
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["role"], "student");
        assert!(json["internships"].as_array().unwrap().is_empty());
    }
}
