//! Common test utilities and helpers

#![allow(dead_code)]

use edufeedback_core::{
    api::{build_router, AppState, SessionSigner},
    ConnectionMode, FeedbackKind, FeedbackService, FeedbackStore, FeedbackSubmission,
    LibsqlStorage, RespondentInfo,
};
use axum::Router;
use std::sync::Arc;
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "test-admin";

/// Create a LibSQL storage backed by a unique file in a temp dir
///
/// The database is removed when the returned `TempDir` is dropped, so keep
/// it bound for the whole test.
pub async fn create_test_storage() -> (LibsqlStorage, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir
        .path()
        .join(format!("edufeedback_test_{}.db", uuid::Uuid::new_v4()));
    let storage = LibsqlStorage::new_with_validation(
        ConnectionMode::Local(path.to_string_lossy().into_owned()),
        true,
    )
    .await
    .expect("Failed to create test storage");
    (storage, dir)
}

pub async fn create_test_service() -> (FeedbackService, TempDir) {
    let (storage, dir) = create_test_storage().await;
    (FeedbackService::new(Arc::new(storage)), dir)
}

/// Router over any store
pub fn create_test_app_with_store(store: Arc<dyn FeedbackStore>) -> (Router, FeedbackService) {
    let service = FeedbackService::new(store);
    let signer = SessionSigner::new(b"integration-test-key".to_vec(), 3600);
    let state = AppState::new(service.clone(), signer, ADMIN_PASSWORD);
    (build_router(state), service)
}

/// Router over a fresh database, plus the service for inspecting it
pub async fn create_test_app() -> (Router, FeedbackService, TempDir) {
    let (storage, dir) = create_test_storage().await;
    let (router, service) = create_test_app_with_store(Arc::new(storage));
    (router, service, dir)
}

/// Complete submission with every open answer set to `open_text`
pub fn sample_submission(kind: FeedbackKind, name: &str, open_text: &str) -> FeedbackSubmission {
    let group = match kind {
        FeedbackKind::Student => "Grade 10",
        FeedbackKind::Teacher => "Biology",
    };
    FeedbackSubmission {
        respondent: RespondentInfo {
            name: name.to_string(),
            group: group.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "555-0100".to_string(),
        },
        closed_answers: std::array::from_fn(|i| {
            if i == 0 {
                "Satisfied".to_string()
            } else {
                "Yes".to_string()
            }
        }),
        open_answers: std::array::from_fn(|_| open_text.to_string()),
    }
}

/// URL-encoded form body for a kind's feedback form
pub fn form_body(kind: FeedbackKind, submission: &FeedbackSubmission) -> String {
    let prefix = kind.as_str();
    let group_field = match kind {
        FeedbackKind::Student => "class",
        FeedbackKind::Teacher => "subject",
    };

    let mut pairs = vec![
        (format!("{}_name", prefix), submission.respondent.name.clone()),
        (format!("{}_{}", prefix, group_field), submission.respondent.group.clone()),
        (format!("{}_email", prefix), submission.respondent.email.clone()),
        (format!("{}_phone", prefix), submission.respondent.phone.clone()),
    ];
    for (i, answer) in submission.closed_answers.iter().enumerate() {
        pairs.push((format!("q{}", i + 1), answer.clone()));
    }
    for (i, answer) in submission.open_answers.iter().enumerate() {
        pairs.push((format!("open_q{}", i + 1), answer.clone()));
    }

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
