//! HTTP server: feedback forms, admin dashboard and exports

use super::{
    auth::{session_token, SessionSigner},
    forms::submission_from_form,
    pages,
};
use crate::error::FeedbackError;
use crate::feedback::{FeedbackService, REQUIRED_FIELDS_MESSAGE};
use crate::reports::{
    export_filename, export_kind, satisfaction_chart, sentiment_chart, DashboardStats,
    ExportFormat,
};
use crate::types::FeedbackKind;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE},
        request::Parts,
        StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Message shown when a submission fails for a reason other than validation
pub const SUBMIT_ERROR_MESSAGE: &str =
    "An error occurred while submitting your feedback. Please try again.";

/// Message shown on a wrong admin password
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: FeedbackService,
    pub signer: Arc<SessionSigner>,
    admin_password: Arc<str>,
}

impl AppState {
    pub fn new(service: FeedbackService, signer: SessionSigner, admin_password: &str) -> Self {
        Self {
            service,
            signer: Arc::new(signer),
            admin_password: Arc::from(admin_password),
        }
    }
}

/// Feedback HTTP server
pub struct FeedbackServer {
    addr: SocketAddr,
    state: AppState,
}

impl FeedbackServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = build_router(self.state);
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Feedback server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
                info!("Shutdown signal received");
            })
            .await?;
        Ok(())
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public pages
        .route("/", get(index_handler))
        .route(
            "/student_feedback",
            get(student_form_handler).post(student_submit_handler),
        )
        .route(
            "/teacher_feedback",
            get(teacher_form_handler).post(teacher_submit_handler),
        )
        .route("/thankyou_student/:name", get(thankyou_student_handler))
        .route("/thankyou_teacher/:name", get(thankyou_teacher_handler))
        // Admin
        .route("/admin", get(login_page_handler).post(login_handler))
        .route("/admin/logout", get(logout_handler))
        .route("/admin/dashboard", get(dashboard_handler))
        .route("/admin/stats", get(stats_handler))
        .route("/admin/charts/:chart", get(chart_handler))
        .route("/admin/download/:kind/:format", get(download_handler))
        // Health check
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        let status = match &self {
            FeedbackError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FeedbackError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Extractor that only succeeds with a valid admin session
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session_token(&parts.headers) {
            Some(token) if state.signer.verify(token) => Ok(AdminSession),
            _ => {
                debug!("Unauthenticated admin request to {}", parts.uri.path());
                Err(Redirect::to("/admin"))
            }
        }
    }
}

async fn index_handler() -> Html<String> {
    Html(pages::index())
}

async fn student_form_handler() -> Html<String> {
    Html(pages::feedback_form(FeedbackKind::Student, None))
}

async fn teacher_form_handler() -> Html<String> {
    Html(pages::feedback_form(FeedbackKind::Teacher, None))
}

async fn student_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    submit(&state, FeedbackKind::Student, &form).await
}

async fn teacher_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    submit(&state, FeedbackKind::Teacher, &form).await
}

/// Create a record and redirect to the confirmation page, or re-show the form
async fn submit(state: &AppState, kind: FeedbackKind, form: &HashMap<String, String>) -> Response {
    let submission = submission_from_form(kind, form);

    match state.service.create(kind, &submission).await {
        Ok(record) => {
            let location = format!(
                "/thankyou_{}/{}",
                kind.as_str(),
                urlencoding::encode(&record.respondent.name)
            );
            Redirect::to(&location).into_response()
        }
        Err(e) if e.is_validation() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::feedback_form(kind, Some(REQUIRED_FIELDS_MESSAGE))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to store {} feedback: {}", kind, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::feedback_form(kind, Some(SUBMIT_ERROR_MESSAGE))),
            )
                .into_response()
        }
    }
}

async fn thankyou_student_handler(Path(name): Path<String>) -> Html<String> {
    Html(pages::thank_you(FeedbackKind::Student, &name))
}

async fn thankyou_teacher_handler(Path(name): Path<String>) -> Html<String> {
    Html(pages::thank_you(FeedbackKind::Teacher, &name))
}

async fn login_page_handler() -> Html<String> {
    Html(pages::admin_login(None))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    admin_password: String,
}

async fn login_handler(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if !state
        .signer
        .password_matches(&form.admin_password, &state.admin_password)
    {
        warn!("Failed admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Html(pages::admin_login(Some(INVALID_PASSWORD_MESSAGE))),
        )
            .into_response();
    }

    match state.signer.issue() {
        Ok(token) => {
            info!("Admin logged in");
            (
                [(SET_COOKIE, state.signer.session_cookie(&token))],
                Redirect::to("/admin/dashboard"),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn logout_handler() -> Response {
    (
        [(SET_COOKIE, SessionSigner::clear_cookie())],
        Redirect::to("/admin"),
    )
        .into_response()
}

async fn dashboard_handler(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Html<String>, FeedbackError> {
    let stats = DashboardStats::collect(state.service.store().as_ref()).await?;

    let sentiment = sentiment_chart(&stats.sentiment_distribution)?.map(|png| STANDARD.encode(png));
    let satisfaction =
        satisfaction_chart(&stats.satisfaction_distribution)?.map(|png| STANDARD.encode(png));

    Ok(Html(pages::dashboard(
        &stats,
        sentiment.as_deref(),
        satisfaction.as_deref(),
    )))
}

async fn stats_handler(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, FeedbackError> {
    let stats = DashboardStats::collect(state.service.store().as_ref()).await?;
    Ok(Json(stats))
}

/// Raw PNG for one dashboard chart; 204 when there is nothing to plot
async fn chart_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(chart): Path<String>,
) -> Result<Response, FeedbackError> {
    let stats = DashboardStats::collect(state.service.store().as_ref()).await?;

    let png = match chart.as_str() {
        "sentiment.png" => sentiment_chart(&stats.sentiment_distribution)?,
        "satisfaction.png" => satisfaction_chart(&stats.satisfaction_distribution)?,
        _ => return Ok(StatusCode::NOT_FOUND.into_response()),
    };

    Ok(match png {
        Some(bytes) => ([(CONTENT_TYPE, "image/png")], bytes).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn download_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((kind, format)): Path<(String, String)>,
) -> Result<Response, FeedbackError> {
    let (Ok(kind), Ok(format)) = (kind.parse::<FeedbackKind>(), format.parse::<ExportFormat>()) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let bytes = export_kind(state.service.store().as_ref(), kind, format).await?;
    let filename = export_filename(kind, format, &chrono::Local::now().naive_local());
    info!("Exported {} feedback as {}", kind, format.extension());

    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        bytes,
    )
        .into_response())
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
