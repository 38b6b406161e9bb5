use serde::{Deserialize, Serialize};

/// Sentinel the generation pipeline emits when it could not locate a
/// comparable quote in the previous-quarter transcript. Never shown to users.
pub const UNKNOWN_EVIDENCE: &str = "unknown";

/// Body of `POST /report`. Ticker and quarters are upper-cased on
/// construction so the rendered header matches the server's cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub ticker: String,
    pub quarter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_quarter: Option<String>,
}

impl GenerationRequest {
    pub fn new(ticker: &str, quarter: &str, prev_quarter: Option<&str>) -> Self {
        Self {
            ticker: ticker.trim().to_ascii_uppercase(),
            quarter: quarter.trim().to_ascii_uppercase(),
            prev_quarter: prev_quarter
                .map(|q| q.trim().to_ascii_uppercase())
                .filter(|q| !q.is_empty()),
        }
    }

    /// A previous quarter equal to the current one is discouraged but not
    /// forbidden; the caller decides whether to warn.
    pub fn compares_same_quarter(&self) -> bool {
        self.prev_quarter.as_deref() == Some(self.quarter.as_str())
    }
}

/// The report document as returned by the generation service. Every section
/// is optional; unknown fields are ignored. A report is never mutated after
/// it is received — a new submission replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub quarter: String,
    #[serde(default)]
    pub prev_quarter: Option<String>,
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub guidance: Vec<GuidanceClaim>,
    #[serde(default)]
    pub growth_drivers: Vec<EvidencedClaim>,
    #[serde(default)]
    pub risks: Vec<RiskClaim>,
    #[serde(default)]
    pub margin_dynamics: Vec<EvidencedClaim>,
    #[serde(default)]
    pub qa_pressure_points: Vec<QaPressurePoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub high_level: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceClaim {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub direction_vs_prev: String,
    #[serde(default)]
    pub evidence_current: Option<String>,
    #[serde(default)]
    pub evidence_prev: Option<String>,
}

impl GuidanceClaim {
    /// Previous-quarter evidence, suppressing the `"unknown"` sentinel.
    pub fn comparable_prev_evidence(&self) -> Option<&str> {
        self.evidence_prev
            .as_deref()
            .filter(|e| !e.is_empty() && *e != UNKNOWN_EVIDENCE)
    }
}

/// Growth-driver and margin-dynamics items share this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidencedClaim {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskClaim {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub evidence_current: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QaPressurePoint {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub analyst_name: Option<String>,
    #[serde(default)]
    pub evidence_question: Option<String>,
    #[serde(default)]
    pub evidence_answer: Option<String>,
}

/// Closed set of report sections the viewer knows how to disclose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionId {
    Summary,
    Guidance,
    GrowthDrivers,
    Risks,
    MarginDynamics,
    QaPressurePoints,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Summary,
        SectionId::Guidance,
        SectionId::GrowthDrivers,
        SectionId::Risks,
        SectionId::MarginDynamics,
        SectionId::QaPressurePoints,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Summary => "Summary",
            SectionId::Guidance => "Guidance",
            SectionId::GrowthDrivers => "Growth Drivers",
            SectionId::Risks => "Risks",
            SectionId::MarginDynamics => "Margin Dynamics",
            SectionId::QaPressurePoints => "Q&A Pressure Points",
        }
    }

    /// Wire-style key, also accepted by [`SectionId::parse`].
    pub fn key(self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::Guidance => "guidance",
            SectionId::GrowthDrivers => "growth_drivers",
            SectionId::Risks => "risks",
            SectionId::MarginDynamics => "margin_dynamics",
            SectionId::QaPressurePoints => "qa_pressure_points",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                _ => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL
            .into_iter()
            .find(|section| section.key() == normalized)
    }
}
