use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::assistant::{Assistant, EchoAssistant};
use crate::storage::SqliteStore;

pub mod routes;

/// Server state. The one store connection is shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SqliteStore>>,
    pub assistant: Arc<dyn Assistant>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            assistant: Arc::new(EchoAssistant),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/login", post(routes::login))
        .route("/users", get(routes::get_user))
        .route("/metrics", get(routes::get_metrics))
        .route("/internships", post(routes::log_internship))
        .route("/projects", get(routes::list_projects).post(routes::log_project))
        .route("/feedback", post(routes::log_feedback))
        .route("/ask", post(routes::ask))
        .route("/students", get(routes::list_students))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: SqliteStore) -> anyhow::Result<()> {
    let app = app(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Ky'ra running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
