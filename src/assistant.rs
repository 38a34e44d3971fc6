//! Ky'ra assistant
//!
//! No model is called. The assistant answers every prompt with a fixed
//! template; callers log each exchange through `SqliteStore::log_query`.

use crate::WriteOutcome;
use crate::storage::SqliteStore;

/// Something that can answer a user prompt
pub trait Assistant: Send + Sync {
    fn respond(&self, prompt: &str) -> String;
}

/// Echoes the prompt back inside the fixed response template
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoAssistant;

impl Assistant for EchoAssistant {
    fn respond(&self, prompt: &str) -> String {
        query_kyra_api(prompt)
    }
}

pub fn query_kyra_api(prompt: &str) -> String {
    format!("Ky'ra response to: {}", prompt)
}

/// Answer `prompt` for `user_id` and log the exchange.
///
/// The response is returned even when logging fails.
pub fn ask(
    store: &SqliteStore,
    assistant: &dyn Assistant,
    user_id: i64,
    prompt: &str,
) -> (String, WriteOutcome) {
    let response = assistant.respond(prompt);
    let logged = store.log_query(user_id, prompt, &response);
    (response, logged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_embeds_prompt() {
        assert_eq!(query_kyra_api("find me a mentor"), "Ky'ra response to: find me a mentor");
        assert_eq!(query_kyra_api(""), "Ky'ra response to: ");
    }

    #[test]
    fn test_ask_logs_exchange() {
        let store = SqliteStore::open_in_memory().unwrap();
        let user = store.ensure_user("ivy@x.com", "student", "Unknown").unwrap();

        let (response, logged) = ask(&store, &EchoAssistant, user.id(), "next steps?");
        assert_eq!(response, "Ky'ra response to: next steps?");
        assert!(logged.is_saved());

        let queries = store.queries_for(user.id()).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].response.as_deref(), Some(response.as_str()));
    }
}
