// Persistence seam for reports. The engine constructs report records but
// the host application owns where they live; the in-memory store backs
// tests and embedded use.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{NewReport, Report, ReportId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report and return its assigned id
    async fn save_report(&self, report: NewReport) -> Result<ReportId, StoreError>;

    /// Most recent reports, newest first
    async fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save_report(&self, report: NewReport) -> Result<ReportId, StoreError> {
        let mut reports = self.reports.lock().await;
        let id = reports.len() as ReportId + 1;
        reports.push(Report {
            id,
            submitter_id: report.submitter_id,
            url: report.url,
            domain: report.domain,
            verdict: report.verdict,
            source: report.source,
            evidence: report.evidence,
            created_at: report.created_at,
        });
        Ok(id)
    }

    async fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.lock().await;
        Ok(reports.iter().rev().take(limit).cloned().collect())
    }
}
