use std::fmt;

pub const GENERIC_FAILURE_MESSAGE: &str = "Report generation failed";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid response format";

/// Failure modes of a call to the report service.
///
/// `Server` carries the structured `detail` field from the error body when
/// the service provided one. `InvalidFormat` covers a 2xx response whose body
/// lacks the expected report envelope; that is an error, not an empty report.
#[derive(Debug)]
pub enum ReportError {
    Transport(reqwest::Error),
    Server {
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
    InvalidFormat,
}

impl ReportError {
    /// The message shown to the user for this failure. Server-provided
    /// detail is passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(err) => format!("Request failed: {err}"),
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Server { detail: None, .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::InvalidFormat => INVALID_FORMAT_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Server { status, detail } => match detail {
                Some(detail) => write!(f, "server error (status={status}): {detail}"),
                None => write!(f, "server error (status={status})"),
            },
            Self::InvalidFormat => write!(f, "response body missing report envelope"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
