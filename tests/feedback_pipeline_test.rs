//! End-to-end tests for submission → storage → reporting

mod common;

use common::{create_test_service, sample_submission};
use edufeedback_core::{
    reports::{
        closed_answer_distribution, export_kind, sentiment_distribution, DashboardStats,
        labels::{closed_keys, OPEN_KEYS},
        ExportFormat,
    },
    FeedbackKind, FeedbackSubmission, RespondentInfo, SentimentLabel,
};

#[tokio::test]
async fn test_positive_student_submission_round_trip() {
    let (service, _dir) = create_test_service().await;
    let before = service.count(FeedbackKind::Student).await.unwrap();

    let submission = sample_submission(
        FeedbackKind::Student,
        "Ada Lovelace",
        "This course was excellent and very helpful",
    );
    let record = service.create(FeedbackKind::Student, &submission).await.unwrap();

    let sentiment = record.sentiment.expect("stored record has sentiment");
    assert_eq!(sentiment.label, SentimentLabel::Positive);
    assert!(sentiment.polarity > 0.1);
    assert_eq!(service.count(FeedbackKind::Student).await.unwrap(), before + 1);

    let csv_bytes = export_kind(service.store().as_ref(), FeedbackKind::Student, ExportFormat::Csv)
        .await
        .unwrap();
    let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], record.id.to_string());
    assert_eq!(&rows[0][1], "Ada Lovelace");
    assert_eq!(&rows[0][27], "positive");
}

#[tokio::test]
async fn test_blank_name_writes_nothing() {
    let (service, _dir) = create_test_service().await;
    let before = service.count(FeedbackKind::Student).await.unwrap();

    let submission = sample_submission(FeedbackKind::Student, "  ", "great class");
    let err = service
        .create(FeedbackKind::Student, &submission)
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(service.count(FeedbackKind::Student).await.unwrap(), before);
}

#[tokio::test]
async fn test_ids_increase_within_kind() {
    let (service, _dir) = create_test_service().await;
    let mut last = None;
    for i in 0..5 {
        let record = service
            .create(
                FeedbackKind::Teacher,
                &sample_submission(FeedbackKind::Teacher, &format!("Teacher {}", i), ""),
            )
            .await
            .unwrap();
        if let Some(previous) = last {
            assert!(record.id > previous);
        }
        last = Some(record.id);
    }

    let listed = service.list_all(FeedbackKind::Teacher).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(listed.len(), 5);
}

#[tokio::test]
async fn test_distribution_sums_to_total_records() {
    let (service, _dir) = create_test_service().await;
    let store = service.store().as_ref();

    let texts = [
        "excellent and helpful",
        "boring and confusing",
        "we met on mondays",
        "great support",
    ];
    for (i, text) in texts.iter().enumerate() {
        service
            .create(
                FeedbackKind::Student,
                &sample_submission(FeedbackKind::Student, &format!("Student {}", i), text),
            )
            .await
            .unwrap();
    }
    for i in 0..3 {
        service
            .create(
                FeedbackKind::Teacher,
                &sample_submission(FeedbackKind::Teacher, &format!("Teacher {}", i), "terrible audio"),
            )
            .await
            .unwrap();
    }

    let distribution = sentiment_distribution(store).await.unwrap();
    assert_eq!(distribution.values().sum::<usize>(), 7);
    assert_eq!(distribution.get("positive"), Some(&2));
    assert_eq!(distribution.get("negative"), Some(&4));
    assert_eq!(distribution.get("neutral"), Some(&1));

    let satisfaction = closed_answer_distribution(store, FeedbackKind::Student, "satisfaction")
        .await
        .unwrap();
    assert_eq!(satisfaction.get("Satisfied"), Some(&4));

    let stats = DashboardStats::collect(store).await.unwrap();
    assert_eq!(stats.student_count, 4);
    assert_eq!(stats.teacher_count, 3);
    assert_eq!(stats.total(), 7);
}

#[tokio::test]
async fn test_json_export_matches_stored_records() {
    let (service, _dir) = create_test_service().await;
    let submission = FeedbackSubmission {
        respondent: RespondentInfo {
            name: "  <b>Grace</b> Hopper ".to_string(),
            group: "Computer Science; Year 2".to_string(),
            email: "grace@example.com".to_string(),
            phone: "\"555-0199\"".to_string(),
        },
        closed_answers: std::array::from_fn(|i| match i {
            0 => "<em>Very Effective</em>".to_string(),
            _ => format!("choice {}", i + 1),
        }),
        open_answers: std::array::from_fn(|i| match i {
            0 => "Students were <i>engaged</i> and curious".to_string(),
            9 => "More lab time, it's worth it".to_string(),
            _ => format!("open answer {}", i + 1),
        }),
    };

    let record = service
        .create(FeedbackKind::Teacher, &submission)
        .await
        .unwrap();
    assert_eq!(record.respondent.name, "Grace Hopper");
    assert_eq!(record.respondent.group, "Computer Science Year 2");
    assert_eq!(record.respondent.phone, "555-0199");
    assert_eq!(record.closed_answers[0], "Very Effective");
    assert_eq!(record.open_answers[0], "Students were engaged and curious");
    assert_eq!(record.open_answers[9], "More lab time, its worth it");

    let bytes = export_kind(service.store().as_ref(), FeedbackKind::Teacher, ExportFormat::Json)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let exported = value
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"] == record.id.0)
        .unwrap();

    let personal = &exported["personal_info"];
    assert_eq!(personal["name"], record.respondent.name.as_str());
    assert_eq!(personal["subject"], record.respondent.group.as_str());
    assert_eq!(personal["email"], record.respondent.email.as_str());
    assert_eq!(personal["phone"], record.respondent.phone.as_str());

    let closed = exported["closed_questions"].as_object().unwrap();
    assert_eq!(closed.len(), record.closed_answers.len());
    for (key, answer) in closed_keys(FeedbackKind::Teacher)
        .iter()
        .zip(record.closed_answers.iter())
    {
        assert_eq!(closed[*key], answer.as_str(), "closed question {}", key);
    }

    let open = exported["open_questions"].as_object().unwrap();
    assert_eq!(open.len(), record.open_answers.len());
    for (key, answer) in OPEN_KEYS.iter().zip(record.open_answers.iter()) {
        assert_eq!(open[*key], answer.as_str(), "open question {}", key);
    }

    let sentiment = record.sentiment.unwrap();
    let analysis = &exported["sentiment_analysis"];
    assert_eq!(analysis["label"], sentiment.label.as_str());
    let polarity = analysis["polarity"].as_f64().unwrap();
    assert!((polarity - sentiment.polarity).abs() < 1e-9);
    let subjectivity = analysis["subjectivity"].as_f64().unwrap();
    assert!((subjectivity - sentiment.subjectivity).abs() < 1e-9);

    let created_at = record.created_at.unwrap().to_rfc3339();
    assert_eq!(exported["created_at"], created_at.as_str());
}

#[tokio::test]
async fn test_empty_store_reports() {
    let (service, _dir) = create_test_service().await;
    let store = service.store().as_ref();

    assert!(sentiment_distribution(store).await.unwrap().is_empty());

    let csv_bytes = export_kind(store, FeedbackKind::Student, ExportFormat::Csv)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(csv_bytes).unwrap().lines().count(), 1);

    let json_bytes = export_kind(store, FeedbackKind::Teacher, ExportFormat::Json)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();
    assert_eq!(value.as_array().map(|a| a.len()), Some(0));
}
