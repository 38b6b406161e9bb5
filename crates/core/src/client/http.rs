use crate::client::{ReportError, ReportService};
use crate::config::Settings;
use crate::domain::catalog::DocumentRecord;
use crate::domain::report::{GenerationRequest, Report};
use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;

/// HTTP client for the report-generation service.
///
/// The generation call carries no timeout: a slow pipeline run simply holds
/// the session in the loading state, and staleness is handled by the session
/// (newest submission wins), not by cancellation.
#[derive(Debug, Clone)]
pub struct HttpReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpReportClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build report http client")?;
        Ok(Self {
            http,
            base_url: settings.api_base_url().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl ReportService for HttpReportClient {
    async fn generate_report(&self, request: &GenerationRequest) -> Result<Report, ReportError> {
        let url = self.endpoint("report");
        tracing::debug!(%url, ticker = %request.ticker, quarter = %request.quarter, "submitting report request");

        let res = self.http.post(url).json(request).send().await?;
        let status = res.status();
        let body = res.text().await?;
        decode_report_response(status, &body)
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ReportError> {
        let url = self.endpoint("documents");
        tracing::debug!(%url, "fetching document listing");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;
        decode_documents_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

fn decode_report_response(status: StatusCode, body: &str) -> Result<Report, ReportError> {
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty());
        return Err(ReportError::Server { status, detail });
    }

    let envelope =
        serde_json::from_str::<ReportEnvelope>(body).map_err(|_| ReportError::InvalidFormat)?;
    let payload = envelope.data.ok_or(ReportError::InvalidFormat)?;
    serde_json::from_value(payload).map_err(|_| ReportError::InvalidFormat)
}

fn decode_documents_response(
    status: StatusCode,
    body: &str,
) -> Result<Vec<DocumentRecord>, ReportError> {
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty());
        return Err(ReportError::Server { status, detail });
    }

    serde_json::from_str(body).map_err(|_| ReportError::InvalidFormat)
}
