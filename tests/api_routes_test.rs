//! HTTP route tests driven through the router with `oneshot`

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use async_trait::async_trait;
use common::{
    create_test_app, create_test_app_with_store, form_body, sample_submission, ADMIN_PASSWORD,
};
use edufeedback_core::{
    api::server::SUBMIT_ERROR_MESSAGE, FeedbackError, FeedbackId, FeedbackKind, FeedbackRecord,
    FeedbackStore, NewFeedback, Result, SentimentLabel,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

/// Store whose writes always fail, counting the attempts
#[derive(Default)]
struct FailingStore {
    inserts: AtomicUsize,
}

#[async_trait]
impl FeedbackStore for FailingStore {
    async fn insert(&self, _feedback: &NewFeedback) -> Result<FeedbackRecord> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(FeedbackError::Database("disk I/O error".to_string()))
    }

    async fn get(&self, _id: FeedbackId) -> Result<Option<FeedbackRecord>> {
        Ok(None)
    }

    async fn list_all(&self, _kind: FeedbackKind) -> Result<Vec<FeedbackRecord>> {
        Ok(Vec::new())
    }

    async fn count(&self, _kind: FeedbackKind) -> Result<usize> {
        Ok(0)
    }

    async fn sentiment_labels(&self) -> Result<Vec<SentimentLabel>> {
        Ok(Vec::new())
    }

    async fn closed_answer_values(
        &self,
        _kind: FeedbackKind,
        _question: usize,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

/// Log in and return the `name=value` cookie pair
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form("/admin", format!("admin_password={}", ADMIN_PASSWORD)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin/dashboard");

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_public_pages_render() {
    let (app, _, _dir) = create_test_app().await;

    for uri in ["/", "/student_feedback", "/teacher_feedback", "/admin", "/health"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }

    let response = app.clone().oneshot(get("/teacher_feedback")).await.unwrap();
    let html = body_string(response).await;
    assert!(html.contains("name=\"teacher_subject\""));
}

#[tokio::test]
async fn test_student_submission_redirects_to_thank_you() {
    let (app, service, _dir) = create_test_app().await;
    let submission = sample_submission(
        FeedbackKind::Student,
        "Ada Lovelace",
        "This course was excellent and very helpful",
    );

    let response = app
        .clone()
        .oneshot(post_form(
            "/student_feedback",
            form_body(FeedbackKind::Student, &submission),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/thankyou_student/Ada%20Lovelace");
    assert_eq!(service.count(FeedbackKind::Student).await.unwrap(), 1);

    let response = app
        .oneshot(get("/thankyou_student/Ada%20Lovelace"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Thank you, Ada Lovelace!"));
}

#[tokio::test]
async fn test_storage_failure_reshows_form_with_generic_message() {
    let store = Arc::new(FailingStore::default());
    let (app, _) = create_test_app_with_store(store.clone());
    let submission = sample_submission(FeedbackKind::Student, "Ada", "Great lessons");

    let response = app
        .oneshot(post_form(
            "/student_feedback",
            form_body(FeedbackKind::Student, &submission),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(LOCATION).is_none());
    let html = body_string(response).await;
    assert!(html.contains(SUBMIT_ERROR_MESSAGE));
    assert!(html.contains("name=\"student_name\""));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_teacher_blank_email_reshows_form() {
    let (app, service, _dir) = create_test_app().await;
    let mut submission = sample_submission(FeedbackKind::Teacher, "Grace", "fine");
    submission.respondent.email = String::new();

    let response = app
        .oneshot(post_form(
            "/teacher_feedback",
            form_body(FeedbackKind::Teacher, &submission),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("All fields are required!"));
    assert_eq!(service.count(FeedbackKind::Teacher).await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_routes_require_login() {
    let (app, _, _dir) = create_test_app().await;

    for uri in [
        "/admin/dashboard",
        "/admin/stats",
        "/admin/charts/sentiment.png",
        "/admin/download/students/csv",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", uri);
        assert_eq!(response.headers()[LOCATION], "/admin");
    }

    let response = app
        .oneshot(get_with_cookie("/admin/dashboard", "feedback_admin=1.deadbeef"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let (app, _, _dir) = create_test_app().await;
    let response = app
        .oneshot(post_form("/admin", "admin_password=nope".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_string(response).await.contains("Invalid password"));
}

#[tokio::test]
async fn test_dashboard_and_stats_after_login() {
    let (app, service, _dir) = create_test_app().await;
    service
        .create(
            FeedbackKind::Student,
            &sample_submission(FeedbackKind::Student, "Ada", "excellent"),
        )
        .await
        .unwrap();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("data:image/png;base64,"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin/stats", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(stats["student_count"], 1);
    assert_eq!(stats["teacher_count"], 0);
    assert_eq!(stats["sentiment_distribution"]["positive"], 1);

    let response = app
        .oneshot(get_with_cookie("/admin/charts/satisfaction.png", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_charts_empty_and_unknown() {
    let (app, _, _dir) = create_test_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin/charts/sentiment.png", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get_with_cookie("/admin/charts/other.png", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_downloads() {
    let (app, service, _dir) = create_test_app().await;
    service
        .create(
            FeedbackKind::Teacher,
            &sample_submission(FeedbackKind::Teacher, "Grace", "great students"),
        )
        .await
        .unwrap();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin/download/teachers/csv", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/csv");
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=teacher_feedback_"));
    assert!(disposition.ends_with(".csv"));
    let csv_text = body_string(response).await;
    assert!(csv_text.starts_with("ID,Name,Subject,Email,Phone,Effectiveness,"));
    assert!(csv_text.contains("Grace"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin/download/students/json", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value, serde_json::json!([]));

    let response = app
        .oneshot(get_with_cookie("/admin/download/parents/csv", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _, _dir) = create_test_app().await;
    let response = app.oneshot(get("/admin/logout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin");
    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("feedback_admin=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
