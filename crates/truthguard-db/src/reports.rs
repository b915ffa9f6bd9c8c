//! Report repository implementation.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use truthguard_core::{Report, ReportRepository, Result, StatsSnapshot, TruthLabel};

/// PostgreSQL implementation of [`ReportRepository`].
///
/// Identifier assignment rides on `BIGSERIAL`, so concurrent creates each
/// get a unique monotonic id without any application-side locking.
#[derive(Clone)]
pub struct PgReportRepository {
    pool: Pool<Postgres>,
}

impl PgReportRepository {
    /// Create a new PgReportRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Report.
fn map_row_to_report(row: sqlx::postgres::PgRow) -> Result<Report> {
    let label: String = row.get("label");
    Ok(Report {
        id: row.get("id"),
        text: row.get("text"),
        label: TruthLabel::from_str(&label)?,
        confidence: row.get("confidence"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn create(&self, text: &str, label: TruthLabel, confidence: u8) -> Result<Report> {
        let row = sqlx::query(
            r#"
            INSERT INTO reports (text, label, confidence)
            VALUES ($1, $2, $3)
            RETURNING id, text, label, confidence, created_at
            "#,
        )
        .bind(text)
        .bind(label.as_str())
        .bind(confidence as i32)
        .fetch_one(&self.pool)
        .await?;

        let report = map_row_to_report(row)?;
        debug!(
            subsystem = "db",
            component = "reports",
            op = "create",
            report_id = report.id,
            label = %report.label,
            "Report created"
        );
        Ok(report)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>> {
        let rows = sqlx::query(
            r#"
            SELECT id, text, label, confidence, created_at
            FROM reports
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_row_to_report).collect()
    }

    async fn counts_by_label(&self) -> Result<StatsSnapshot> {
        let rows = sqlx::query(
            r#"
            SELECT label, COUNT(*) AS count
            FROM reports
            GROUP BY label
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut stats = StatsSnapshot::default();
        for row in rows {
            let label: String = row.get("label");
            let count: i64 = row.get("count");
            stats.total_reports += count;
            match TruthLabel::from_str(&label)? {
                TruthLabel::Real => stats.real_count += count,
                TruthLabel::Suspicious => stats.suspicious_count += count,
                TruthLabel::Fake => stats.fake_count += count,
            }
        }
        Ok(stats)
    }
}
