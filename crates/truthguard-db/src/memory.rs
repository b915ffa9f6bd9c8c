//! In-process report repository for tests.
//!
//! Always compiled (not `#[cfg(test)]`) so integration tests in dependent
//! crates can wire the API pipeline against it without a live Postgres.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use truthguard_core::{Report, ReportRepository, Result, StatsSnapshot, TruthLabel};

/// In-memory implementation of [`ReportRepository`].
///
/// Writes take the write lock and ids come from an atomic counter, so
/// concurrent creates are never lost and each gets a unique monotonic id.
/// Reads see every previously committed write (read-after-write within
/// this process), matching the Postgres repository's visible behavior.
#[derive(Clone, Default)]
pub struct MemoryReportRepository {
    reports: Arc<RwLock<Vec<Report>>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryReportRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl ReportRepository for MemoryReportRepository {
    async fn create(&self, text: &str, label: TruthLabel, confidence: u8) -> Result<Report> {
        let report = Report {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            text: text.to_string(),
            label,
            confidence: confidence as i32,
            created_at: Utc::now(),
        };
        self.reports.write().await.push(report.clone());
        Ok(report)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>> {
        let reports = self.reports.read().await;
        // Insertion order is id order; newest first means reverse.
        Ok(reports
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn counts_by_label(&self) -> Result<StatsSnapshot> {
        let reports = self.reports.read().await;
        let mut stats = StatsSnapshot::default();
        for report in reports.iter() {
            stats.total_reports += 1;
            match report.label {
                TruthLabel::Real => stats.real_count += 1,
                TruthLabel::Suspicious => stats.suspicious_count += 1,
                TruthLabel::Fake => stats.fake_count += 1,
            }
        }
        Ok(stats)
    }
}
