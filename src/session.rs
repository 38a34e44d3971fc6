//! Session context
//!
//! The logged-in user, carried as an immutable value through the
//! presentation layer. Which page is showing follows from the CLI
//! subcommand or HTTP endpoint being served.

use serde::Serialize;
use crate::{Error, Result};
use crate::model::{Role, UserProfile};
use crate::storage::SqliteStore;
use crate::storage::sqlite::DEFAULT_ORG;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: UserProfile,
}

impl Session {
    /// Log in by email and role, creating the user on first visit.
    ///
    /// No credential is checked. An existing user keeps their stored role.
    pub fn login(store: &SqliteStore, email: &str, role: Role) -> Result<Self> {
        let user = store
            .ensure_user(email, role.as_str(), DEFAULT_ORG)
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;

        tracing::info!("{} logged in as {}", user.email(), user.role());
        Ok(Self { user })
    }

    /// Resume a session for an existing user
    pub fn resume(store: &SqliteStore, email: &str) -> Result<Self> {
        let user = store
            .fetch_user(email)
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        Ok(Self { user })
    }

    /// Re-read the user snapshot, e.g. after logging a record
    pub fn refreshed(&self, store: &SqliteStore) -> Self {
        match store.fetch_user(self.user.email()) {
            Some(user) => Self { user },
            None => self.clone(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.user.parsed_role()
    }

    /// Navigation entries for this session's role
    pub fn menu(&self) -> &'static [&'static str] {
        menu_for(self.role())
    }
}

/// Navigation entries per role. Unknown roles only get "Your Progress".
pub fn menu_for(role: Option<Role>) -> &'static [&'static str] {
    match role {
        Some(Role::Student) => &["Your Progress", "Log Internship", "Upskilling", "Opportunities", "Feedback"],
        Some(Role::College) => &["Student Performance", "Upload Projects"],
        Some(Role::Mentor) => &["Guide Students", "Assign Tasks", "Feedback"],
        Some(Role::Msme) => &["Project Needs", "Review Interns", "Digitalization Dashboard"],
        Some(Role::Government) => &["Regional Impact"],
        None => &["Your Progress"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_creates_user_with_lowercase_role() {
        let store = SqliteStore::open_in_memory().unwrap();
        let role: Role = "MSME".parse().unwrap();

        let session = Session::login(&store, "shop@x.com", role).unwrap();
        assert_eq!(session.user.role(), "msme");
        assert_eq!(session.user.name(), "Shop");
        assert_eq!(session.menu()[0], "Project Needs");
    }

    #[test]
    fn test_resume_unknown_user_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            Session::resume(&store, "ghost@x.com"),
            Err(Error::UserNotFound(_))
        ));
    }

    #[test]
    fn test_refreshed_sees_new_internship() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = Session::login(&store, "a@x.com", Role::Student).unwrap();
        store.log_internship("a@x.com", "Acme", "2 months", None, 1);

        assert!(session.user.internships.is_empty());
        assert_eq!(session.refreshed(&store).user.internships.len(), 1);
    }

    #[test]
    fn test_menus() {
        assert_eq!(menu_for(Some(Role::Student)).len(), 5);
        assert_eq!(menu_for(Some(Role::Government)), &["Regional Impact"]);
        assert_eq!(menu_for(None), &["Your Progress"]);
    }
}
