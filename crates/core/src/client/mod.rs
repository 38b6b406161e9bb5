pub mod error;
pub mod http;

pub use error::ReportError;
pub use http::HttpReportClient;

use crate::domain::catalog::{DocumentRecord, QuarterCatalog};
use crate::domain::report::{GenerationRequest, Report};

/// Seam over the report-generation service so the session driver can be
/// exercised against an in-memory fake.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    async fn generate_report(&self, request: &GenerationRequest) -> Result<Report, ReportError>;

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ReportError>;
}

/// Fetch the quarter catalog once. Any failure degrades to an empty catalog
/// (free-text quarter entry) and is logged rather than surfaced.
pub async fn load_quarter_catalog(service: &dyn ReportService) -> QuarterCatalog {
    match service.list_documents().await {
        Ok(docs) => QuarterCatalog::from_documents(&docs),
        Err(err) => {
            tracing::warn!(error = %err, "quarter catalog fetch failed; continuing without it");
            QuarterCatalog::default()
        }
    }
}
