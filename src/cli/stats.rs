//! Feedback statistics command

use edufeedback_core::{error::Result, reports::DashboardStats};
use std::collections::BTreeMap;

use super::helpers::open_storage;

fn print_distribution(title: &str, distribution: &BTreeMap<String, usize>) {
    println!("{}:", title);
    if distribution.is_empty() {
        println!("  (no data)");
        return;
    }
    for (value, count) in distribution {
        println!("  {:<24} {}", value, count);
    }
}

/// Handle stats command
pub async fn handle(json: bool, db_path: String) -> Result<()> {
    let storage = open_storage(&db_path, false).await?;
    let stats = DashboardStats::collect(&storage).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Students: {}", stats.student_count);
    println!("Teachers: {}", stats.teacher_count);
    println!("Total:    {}", stats.total());
    println!();
    print_distribution("Sentiment", &stats.sentiment_distribution);
    println!();
    print_distribution("Student satisfaction", &stats.satisfaction_distribution);
    Ok(())
}
