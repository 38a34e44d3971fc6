use axum::{
    extract::{Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::assistant;
use crate::model::{Project, Role, StudentSummary, UserProfile};
use crate::metrics::Metrics;
use crate::server::AppState;
use crate::session::Session;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: message.into() }))
}

#[derive(Serialize)]
pub struct WriteResponse {
    pub success: bool,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub session: Session,
    pub menu: &'static [&'static str],
    pub metrics: Metrics,
}

#[derive(Deserialize)]
pub struct EmailParams {
    pub email: String,
}

#[derive(Deserialize)]
pub struct RoleParams {
    pub role: String,
}

#[derive(Deserialize)]
pub struct InternshipRequest {
    pub email: String,
    pub company_name: String,
    pub duration: String,
    pub feedback: Option<String>,
    #[serde(default)]
    pub msme_digitalized: i64,
}

#[derive(Deserialize)]
pub struct ProjectRequest {
    pub student_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub student_id: Option<i64>,
    pub student_email: Option<String>,
    pub rating: i64,
    pub comments: Option<String>,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub user_id: i64,
    pub prompt: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub response: String,
    pub logged: bool,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let role: Role = req.role.parse()
        .map_err(|e: crate::Error| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    if req.email.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Email is required."));
    }

    let store = state.store.lock().await;
    let session = Session::login(&store, req.email.trim(), role)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let metrics = store.fetch_metrics(session.user.role());

    Ok(Json(LoginResponse {
        menu: session.menu(),
        session,
        metrics,
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> ApiResult<UserProfile> {
    let store = state.store.lock().await;
    store.fetch_user(&params.email)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No user with email {}", params.email)))
}

pub async fn get_metrics(
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
) -> Json<Metrics> {
    let store = state.store.lock().await;
    Json(store.fetch_metrics(&params.role))
}

pub async fn log_internship(
    State(state): State<AppState>,
    Json(req): Json<InternshipRequest>,
) -> ApiResult<WriteResponse> {
    if req.company_name.trim().is_empty() || req.duration.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Please fill in all required fields."));
    }

    let store = state.store.lock().await;
    let outcome = store.log_internship(
        &req.email,
        &req.company_name,
        &req.duration,
        req.feedback.as_deref(),
        req.msme_digitalized,
    );
    Ok(Json(WriteResponse { success: outcome.is_saved() }))
}

pub async fn log_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<WriteResponse> {
    let store = state.store.lock().await;
    let status = req.status.as_deref().unwrap_or("Open");
    let outcome = store.log_project(req.student_id, &req.title, req.description.as_deref(), status);
    Ok(Json(WriteResponse { success: outcome.is_saved() }))
}

pub async fn log_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<WriteResponse> {
    if !(1..=5).contains(&req.rating) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5."));
    }

    let store = state.store.lock().await;
    let student_id = match (req.student_id, req.student_email.as_deref()) {
        (Some(id), _) => id,
        (None, Some(email)) => store.find_user_id(email)
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Student not found."))?,
        (None, None) => {
            return Err(api_error(StatusCode::BAD_REQUEST, "student_id or student_email is required."));
        }
    };

    let outcome = store.log_feedback(student_id, req.rating, req.comments.as_deref());
    Ok(Json(WriteResponse { success: outcome.is_saved() }))
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<AskResponse> {
    let store = state.store.lock().await;
    let (response, logged) = assistant::ask(&store, state.assistant.as_ref(), req.user_id, &req.prompt);
    Ok(Json(AskResponse { response, logged: logged.is_saved() }))
}

pub async fn list_students(State(state): State<AppState>) -> ApiResult<Vec<StudentSummary>> {
    let store = state.store.lock().await;
    store.list_students()
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let store = state.store.lock().await;
    store.list_projects()
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use crate::server::app;
    use crate::storage::SqliteStore;

    fn test_app() -> axum::Router {
        app(AppState::new(SqliteStore::open_in_memory().unwrap()))
    }

    async fn call(app: axum::Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_login_returns_session_menu_and_metrics() {
        let app = test_app();
        let (status, body) = call(
            app,
            "POST",
            "/login",
            Some(serde_json::json!({"email": "alice@x.com", "role": "Student"})),
        ).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Alice");
        assert_eq!(body["user"]["role"], "student");
        assert_eq!(body["menu"][0], "Your Progress");
        assert_eq!(body["metrics"]["total_internships"], 0);
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_role() {
        let (status, _) = call(
            test_app(),
            "POST",
            "/login",
            Some(serde_json::json!({"email": "a@x.com", "role": "admin"})),
        ).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_trims_email() {
        let app = test_app();
        let (status, body) = call(
            app.clone(),
            "POST",
            "/login",
            Some(serde_json::json!({"email": "  ann@x.com ", "role": "mentor"})),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ann@x.com");

        let (status, _) = call(
            app,
            "POST",
            "/login",
            Some(serde_json::json!({"email": "   ", "role": "mentor"})),
        ).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internship_then_user_lookup() {
        let app = test_app();
        let (status, body) = call(
            app.clone(),
            "POST",
            "/internships",
            Some(serde_json::json!({
                "email": "bob@x.com",
                "company_name": "Acme",
                "duration": "3 months",
                "msme_digitalized": 2
            })),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = call(app.clone(), "GET", "/users?email=bob@x.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["internships"][0]["company_name"], "Acme");

        let (_, metrics) = call(app, "GET", "/metrics?role=student", None).await;
        assert_eq!(metrics["total_msmes"], 2);
    }

    #[tokio::test]
    async fn test_internship_requires_company_and_duration() {
        let (status, body) = call(
            test_app(),
            "POST",
            "/internships",
            Some(serde_json::json!({"email": "b@x.com", "company_name": "", "duration": "1 month"})),
        ).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please fill in all required fields.");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (status, _) = call(test_app(), "GET", "/users?email=ghost@x.com", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_role_metrics_are_empty() {
        let (status, body) = call(test_app(), "GET", "/metrics?role=unknown_role", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_unowned_projects_listed() {
        let app = test_app();
        for title in ["Inventory app", "Website"] {
            let (_, body) = call(
                app.clone(),
                "POST",
                "/projects",
                Some(serde_json::json!({"title": title})),
            ).await;
            assert_eq!(body["success"], true);
        }

        let (_, body) = call(app, "GET", "/projects", None).await;
        let projects = body.as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["status"], "Open");
        assert!(projects[1]["student_id"].is_null());
    }

    #[tokio::test]
    async fn test_mentor_feedback_by_email() {
        let app = test_app();
        call(
            app.clone(),
            "POST",
            "/login",
            Some(serde_json::json!({"email": "stu@x.com", "role": "student"})),
        ).await;

        let (status, body) = call(
            app.clone(),
            "POST",
            "/feedback",
            Some(serde_json::json!({"student_email": "stu@x.com", "rating": 4, "comments": "good"})),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = call(
            app.clone(),
            "POST",
            "/feedback",
            Some(serde_json::json!({"student_email": "nobody@x.com", "rating": 4})),
        ).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Student not found.");

        let (_, metrics) = call(app, "GET", "/metrics?role=mentor", None).await;
        assert_eq!(metrics["feedback_logged"], 1);
    }

    #[tokio::test]
    async fn test_ask_echoes_prompt() {
        let (status, body) = call(
            test_app(),
            "POST",
            "/ask",
            Some(serde_json::json!({"user_id": 1, "prompt": "hello"})),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Ky'ra response to: hello");
        assert_eq!(body["logged"], true);
    }

    #[tokio::test]
    async fn test_students_listing() {
        let app = test_app();
        for (email, role) in [("s@x.com", "student"), ("c@x.com", "college")] {
            call(
                app.clone(),
                "POST",
                "/login",
                Some(serde_json::json!({"email": email, "role": role})),
            ).await;
        }

        let (_, body) = call(app, "GET", "/students", None).await;
        assert_eq!(body, serde_json::json!([{"name": "S", "email": "s@x.com"}]));
    }
}
