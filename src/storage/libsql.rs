//! LibSQL storage backend implementation
//!
//! Persists feedback records in a single `feedback` table keyed by an
//! autoincrement id. The schema is embedded in the binary and applied on open.

use crate::error::{FeedbackError, Result};
use crate::storage::FeedbackStore;
use crate::types::{
    FeedbackId, FeedbackKind, FeedbackRecord, NewFeedback, RespondentInfo, Sentiment,
    SentimentLabel, CLOSED_QUESTION_COUNT, OPEN_QUESTION_COUNT,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{params, params_from_iter, Builder, Connection, Database, Row, Value};
use tracing::{debug, info};

/// Embedded migrations, applied in order
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_initial_schema.sql",
        include_str!("../../migrations/libsql/001_initial_schema.sql"),
    ),
    (
        "002_add_indexes.sql",
        include_str!("../../migrations/libsql/002_add_indexes.sql"),
    ),
];

/// Column list shared by every SELECT so `row_to_record` can index by position
const SELECT_COLUMNS: &str = "id, kind, \
    respondent_name, respondent_group, respondent_email, respondent_phone, \
    q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, \
    open_q1, open_q2, open_q3, open_q4, open_q5, \
    open_q6, open_q7, open_q8, open_q9, open_q10, \
    sentiment_polarity, sentiment_subjectivity, sentiment_label, created_at";

const CLOSED_OFFSET: i32 = 6;
const OPEN_OFFSET: i32 = CLOSED_OFFSET + CLOSED_QUESTION_COUNT as i32;
const SENTIMENT_OFFSET: i32 = OPEN_OFFSET + OPEN_QUESTION_COUNT as i32;

/// Split a migration file into statements on trailing semicolons
fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();

        // Skip comment-only and empty lines when not building a statement
        if current.is_empty() && (trimmed.is_empty() || trimmed.starts_with("--")) {
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        if trimmed.ends_with(';') {
            statements.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        statements.push(current);
    }

    statements
}

/// Database connection mode
#[derive(Debug, Clone)]
pub enum ConnectionMode {
    /// Local file-based database
    Local(String),
    /// In-memory database (for testing)
    InMemory,
}

/// LibSQL storage backend
///
/// Holds one connection for its lifetime. libSQL gives every `:memory:`
/// connection its own database, so a single shared connection is what keeps
/// the in-memory mode coherent.
pub struct LibsqlStorage {
    _db: Database,
    conn: Connection,
}

impl LibsqlStorage {
    /// Open (and optionally create) a database, then run migrations
    pub async fn new_with_validation(mode: ConnectionMode, create_if_missing: bool) -> Result<Self> {
        info!(
            "Connecting to LibSQL database: {:?} (create_if_missing: {})",
            mode, create_if_missing
        );

        let db = match mode {
            ConnectionMode::Local(ref path) => {
                let file = std::path::Path::new(path);
                if !file.exists() {
                    if !create_if_missing {
                        return Err(FeedbackError::Database(format!(
                            "Database file not found at '{}'. Run 'edufeedback init' first or check your configuration.",
                            path
                        )));
                    }
                    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent).map_err(|e| {
                            FeedbackError::Database(format!(
                                "Failed to create database directory {}: {}",
                                parent.display(),
                                e
                            ))
                        })?;
                    }
                }

                Builder::new_local(path).build().await.map_err(|e| {
                    FeedbackError::Database(format!("Failed to create local database: {}", e))
                })?
            }
            ConnectionMode::InMemory => Builder::new_local(":memory:").build().await.map_err(|e| {
                FeedbackError::Database(format!("Failed to create in-memory database: {}", e))
            })?,
        };

        let conn = db
            .connect()
            .map_err(|e| FeedbackError::Database(format!("Failed to get connection: {}", e)))?;

        info!("LibSQL database connection established");

        let storage = Self { _db: db, conn };
        storage.verify_database_health().await?;
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Open an existing local database
    pub async fn new(mode: ConnectionMode) -> Result<Self> {
        Self::new_with_validation(mode, false).await
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        Self::new_with_validation(ConnectionMode::InMemory, true).await
    }

    /// Create from string path: ":memory:" or a local file
    pub async fn from_path(database_url: &str, create_if_missing: bool) -> Result<Self> {
        let mode = if database_url == ":memory:" {
            ConnectionMode::InMemory
        } else {
            ConnectionMode::Local(database_url.to_string())
        };
        Self::new_with_validation(mode, create_if_missing).await
    }

    /// Verify database health before operations
    async fn verify_database_health(&self) -> Result<()> {
        self.conn.query("SELECT 1", params![]).await.map_err(|e| {
            FeedbackError::Database(format!(
                "Database corruption detected or invalid database file: {}",
                e
            ))
        })?;

        debug!("Database health check passed");
        Ok(())
    }

    /// Apply embedded migrations that have not run yet
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS _migrations_applied (
                    migration_name TEXT PRIMARY KEY,
                    applied_at INTEGER NOT NULL
                )",
                params![],
            )
            .await
            .map_err(|e| {
                FeedbackError::Migration(format!("Failed to create migrations table: {}", e))
            })?;

        for (name, sql) in MIGRATIONS {
            let mut rows = self
                .conn
                .query(
                    "SELECT COUNT(*) FROM _migrations_applied WHERE migration_name = ?",
                    params![*name],
                )
                .await?;

            let already_applied = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };
            drop(rows);

            if already_applied > 0 {
                debug!("Skipping already applied migration: {}", name);
                continue;
            }

            let statements = parse_sql_statements(sql);
            debug!("Parsed {} statements from {}", statements.len(), name);
            for (i, statement) in statements.iter().enumerate() {
                self.conn.execute(statement, params![]).await.map_err(|e| {
                    FeedbackError::Migration(format!(
                        "Failed to execute statement #{} in {}: {}",
                        i + 1,
                        name,
                        e
                    ))
                })?;
            }

            self.conn
                .execute(
                    "INSERT INTO _migrations_applied (migration_name, applied_at) VALUES (?, ?)",
                    params![*name, Utc::now().timestamp()],
                )
                .await
                .map_err(|e| FeedbackError::Migration(format!("Failed to record migration: {}", e)))?;

            info!("Executed migration: {}", name);
        }

        info!("Database migrations completed");
        Ok(())
    }

    /// Convert a row selected with `SELECT_COLUMNS` into a record
    fn row_to_record(row: &Row) -> Result<FeedbackRecord> {
        let id: i64 = row.get(0)?;
        let kind_str: String = row.get(1)?;
        let kind = kind_str
            .parse::<FeedbackKind>()
            .map_err(FeedbackError::InvalidValue)?;

        let respondent = RespondentInfo {
            name: row.get(2)?,
            group: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
        };

        let mut closed_answers: [String; CLOSED_QUESTION_COUNT] = Default::default();
        for (i, answer) in closed_answers.iter_mut().enumerate() {
            *answer = row.get(CLOSED_OFFSET + i as i32)?;
        }

        let mut open_answers: [String; OPEN_QUESTION_COUNT] = Default::default();
        for (i, answer) in open_answers.iter_mut().enumerate() {
            *answer = row.get(OPEN_OFFSET + i as i32)?;
        }

        let polarity: Option<f64> = row.get(SENTIMENT_OFFSET)?;
        let subjectivity: Option<f64> = row.get(SENTIMENT_OFFSET + 1)?;
        let label: Option<String> = row.get(SENTIMENT_OFFSET + 2)?;
        let sentiment = match (polarity, subjectivity, label) {
            (Some(polarity), Some(subjectivity), Some(label)) => Some(Sentiment {
                polarity,
                subjectivity,
                label: label.parse().map_err(FeedbackError::InvalidValue)?,
            }),
            _ => None,
        };

        let created_at_str: String = row.get(SENTIMENT_OFFSET + 3)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .ok();

        Ok(FeedbackRecord {
            id: FeedbackId(id),
            kind,
            respondent,
            closed_answers,
            open_answers,
            sentiment,
            created_at,
        })
    }

    /// Run a SELECT with `SELECT_COLUMNS` and collect every row
    async fn query_records(&self, sql: &str, values: Vec<Value>) -> Result<Vec<FeedbackRecord>> {
        let mut rows = self.conn.query(sql, params_from_iter(values)).await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }
}

#[async_trait]
impl FeedbackStore for LibsqlStorage {
    async fn insert(&self, feedback: &NewFeedback) -> Result<FeedbackRecord> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut values: Vec<Value> = Vec::with_capacity(30);
        values.push(Value::Text(feedback.kind.as_str().to_string()));
        for (_, value) in feedback.respondent.fields() {
            values.push(Value::Text(value.to_string()));
        }
        for answer in feedback.closed_answers.iter().chain(feedback.open_answers.iter()) {
            values.push(Value::Text(answer.clone()));
        }
        values.push(Value::Real(feedback.sentiment.polarity));
        values.push(Value::Real(feedback.sentiment.subjectivity));
        values.push(Value::Text(feedback.sentiment.label.as_str().to_string()));
        values.push(Value::Text(created_at));

        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "INSERT INTO feedback ({}) VALUES ({}) RETURNING id",
            SELECT_COLUMNS.trim_start_matches("id, "),
            placeholders
        );

        let mut rows = self.conn.query(&sql, params_from_iter(values)).await?;
        let id: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => {
                return Err(FeedbackError::Database(
                    "INSERT returned no id".to_string(),
                ))
            }
        };
        // Drain so the statement completes before the follow-up read
        while rows.next().await?.is_some() {}
        drop(rows);

        debug!("Inserted {} feedback record {}", feedback.kind, id);

        self.get(FeedbackId(id)).await?.ok_or_else(|| {
            FeedbackError::Database(format!("Inserted record {} could not be read back", id))
        })
    }

    async fn get(&self, id: FeedbackId) -> Result<Option<FeedbackRecord>> {
        let sql = format!("SELECT {} FROM feedback WHERE id = ?", SELECT_COLUMNS);
        let mut records = self
            .query_records(&sql, vec![Value::Integer(id.0)])
            .await?;
        Ok(records.pop())
    }

    async fn list_all(&self, kind: FeedbackKind) -> Result<Vec<FeedbackRecord>> {
        let sql = format!(
            "SELECT {} FROM feedback WHERE kind = ? ORDER BY id ASC",
            SELECT_COLUMNS
        );
        self.query_records(&sql, vec![Value::Text(kind.as_str().to_string())]).await
    }

    async fn count(&self, kind: FeedbackKind) -> Result<usize> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM feedback WHERE kind = ?",
                params![kind.as_str()],
            )
            .await?;

        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        Ok(count.max(0) as usize)
    }

    async fn sentiment_labels(&self) -> Result<Vec<SentimentLabel>> {
        let mut rows = self
            .conn
            .query(
                "SELECT sentiment_label FROM feedback WHERE sentiment_label IS NOT NULL ORDER BY id ASC",
                params![],
            )
            .await?;

        let mut labels = Vec::new();
        while let Some(row) = rows.next().await? {
            let label: String = row.get(0)?;
            labels.push(label.parse::<SentimentLabel>().map_err(FeedbackError::InvalidValue)?);
        }
        Ok(labels)
    }

    async fn closed_answer_values(
        &self,
        kind: FeedbackKind,
        question: usize,
    ) -> Result<Vec<String>> {
        if !(1..=CLOSED_QUESTION_COUNT).contains(&question) {
            return Err(FeedbackError::Validation(format!(
                "closed question must be between 1 and {}, got {}",
                CLOSED_QUESTION_COUNT, question
            )));
        }

        // Column name comes from a range-checked integer, never from input text
        let sql = format!(
            "SELECT q{} FROM feedback WHERE kind = ? ORDER BY id ASC",
            question
        );
        let mut rows = self.conn.query(&sql, params![kind.as_str()]).await?;

        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            values.push(row.get::<String>(0)?);
        }
        Ok(values)
    }
}
