//! Counts and distributions over stored feedback

use crate::error::Result;
use crate::reports::labels::closed_question_number;
use crate::storage::FeedbackStore;
use crate::types::FeedbackKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label → count over both kinds combined
///
/// Only labels that occur are present; rows without sentiment are ignored.
pub async fn sentiment_distribution(store: &dyn FeedbackStore) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();
    for label in store.sentiment_labels().await? {
        *counts.entry(label.as_str().to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Raw stored value → count for one closed question of a kind
///
/// Values are bucketed exactly as stored, so `Yes` and `yes` are distinct.
pub async fn closed_answer_distribution(
    store: &dyn FeedbackStore,
    kind: FeedbackKind,
    field: &str,
) -> Result<BTreeMap<String, usize>> {
    let question = closed_question_number(kind, field)?;
    let mut counts = BTreeMap::new();
    for value in store.closed_answer_values(kind, question).await? {
        *counts.entry(value).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Everything the admin dashboard shows, minus the rendered charts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub student_count: usize,
    pub teacher_count: usize,
    pub sentiment_distribution: BTreeMap<String, usize>,
    pub satisfaction_distribution: BTreeMap<String, usize>,
}

impl DashboardStats {
    /// Snapshot the store
    pub async fn collect(store: &dyn FeedbackStore) -> Result<Self> {
        Ok(Self {
            student_count: store.count(FeedbackKind::Student).await?,
            teacher_count: store.count(FeedbackKind::Teacher).await?,
            sentiment_distribution: sentiment_distribution(store).await?,
            satisfaction_distribution: closed_answer_distribution(
                store,
                FeedbackKind::Student,
                "satisfaction",
            )
            .await?,
        })
    }

    pub fn total(&self) -> usize {
        self.student_count + self.teacher_count
    }
}
