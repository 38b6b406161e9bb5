//! Plain-text view of a report document.
//!
//! Pure function of `(Report, DisclosureSet)`. Sections render only when
//! their source field is present and non-empty; collapsed sections render
//! just their header line. Evidence text is emitted verbatim.

use crate::domain::report::{
    EvidencedClaim, GuidanceClaim, QaPressurePoint, Report, RiskClaim, SectionId, Summary,
};
use crate::session::DisclosureSet;
use std::fmt::{self, Write};

pub const SUMMARY_PLACEHOLDER: &str = "Summary not available";

pub fn render_report(report: &Report, disclosure: &DisclosureSet) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_into(&mut out, report, disclosure);
    out
}

fn render_into(out: &mut String, report: &Report, disclosure: &DisclosureSet) -> fmt::Result {
    writeln!(out, "{} — {}", report.ticker, report.quarter)?;
    if let Some(prev) = report.prev_quarter.as_deref() {
        writeln!(out, "Comparison with {prev}")?;
    }

    if let Some(summary) = &report.summary {
        render_summary(out, disclosure, summary)?;
    }
    render_list(
        out,
        disclosure,
        SectionId::Guidance,
        &report.guidance,
        guidance_item,
    )?;
    render_list(
        out,
        disclosure,
        SectionId::GrowthDrivers,
        &report.growth_drivers,
        evidenced_item,
    )?;
    render_list(out, disclosure, SectionId::Risks, &report.risks, risk_item)?;
    render_list(
        out,
        disclosure,
        SectionId::MarginDynamics,
        &report.margin_dynamics,
        evidenced_item,
    )?;
    render_list(
        out,
        disclosure,
        SectionId::QaPressurePoints,
        &report.qa_pressure_points,
        qa_item,
    )?;
    Ok(())
}

fn section_header(
    out: &mut String,
    expanded: bool,
    section: SectionId,
    count: Option<usize>,
) -> fmt::Result {
    let marker = if expanded { '-' } else { '+' };
    match count {
        Some(n) => writeln!(out, "[{marker}] {} ({n})", section.title()),
        None => writeln!(out, "[{marker}] {}", section.title()),
    }
}

fn render_summary(out: &mut String, disclosure: &DisclosureSet, summary: &Summary) -> fmt::Result {
    let expanded = disclosure.is_expanded(SectionId::Summary);
    section_header(out, expanded, SectionId::Summary, None)?;
    if !expanded {
        return Ok(());
    }

    // The one place absence gets a placeholder instead of silence.
    match nonempty(&summary.high_level) {
        Some(text) => writeln!(out, "  {text}")?,
        None => writeln!(out, "  {SUMMARY_PLACEHOLDER}")?,
    }
    if let Some(tone) = nonempty(&summary.tone) {
        writeln!(out, "  Tone: {tone}")?;
    }
    Ok(())
}

fn render_list<T>(
    out: &mut String,
    disclosure: &DisclosureSet,
    section: SectionId,
    items: &[T],
    item_fn: fn(&mut String, &T) -> fmt::Result,
) -> fmt::Result {
    // Empty and absent lists both suppress the section entirely.
    if items.is_empty() {
        return Ok(());
    }
    let expanded = disclosure.is_expanded(section);
    section_header(out, expanded, section, Some(items.len()))?;
    if expanded {
        for item in items {
            item_fn(out, item)?;
        }
    }
    Ok(())
}

fn guidance_item(out: &mut String, item: &GuidanceClaim) -> fmt::Result {
    write!(out, "  - {}", item.claim)?;
    if !item.direction_vs_prev.is_empty() {
        write!(out, " [{}]", item.direction_vs_prev)?;
    }
    writeln!(out)?;
    if let Some(evidence) = nonempty(&item.evidence_current) {
        writeln!(out, "      current: \"{evidence}\"")?;
    }
    if let Some(evidence) = item.comparable_prev_evidence() {
        writeln!(out, "      previous: \"{evidence}\"")?;
    }
    Ok(())
}

fn evidenced_item(out: &mut String, item: &EvidencedClaim) -> fmt::Result {
    writeln!(out, "  - {}", item.claim)?;
    if let Some(evidence) = nonempty(&item.evidence) {
        writeln!(out, "      \"{evidence}\"")?;
    }
    Ok(())
}

fn risk_item(out: &mut String, item: &RiskClaim) -> fmt::Result {
    if item.is_new {
        writeln!(out, "  - {} [NEW]", item.claim)?;
    } else {
        writeln!(out, "  - {}", item.claim)?;
    }
    if let Some(evidence) = nonempty(&item.evidence_current) {
        writeln!(out, "      \"{evidence}\"")?;
    }
    Ok(())
}

fn qa_item(out: &mut String, item: &QaPressurePoint) -> fmt::Result {
    match nonempty(&item.analyst_name) {
        Some(analyst) => writeln!(out, "  - {} — {analyst}", item.theme)?,
        None => writeln!(out, "  - {}", item.theme)?,
    }
    if let Some(question) = nonempty(&item.evidence_question) {
        writeln!(out, "      Q: \"{question}\"")?;
    }
    if let Some(answer) = nonempty(&item.evidence_answer) {
        writeln!(out, "      A: \"{answer}\"")?;
    }
    Ok(())
}

fn nonempty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_from(value: serde_json::Value) -> Report {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn summary_only_report_renders_no_other_sections() {
        let report = report_from(json!({
            "ticker": "GOOG",
            "quarter": "2025_Q3",
            "prev_quarter": "2025_Q2",
            "summary": {"high_level": "Revenue grew 15%", "tone": "confident"},
        }));

        let rendered = render_report(&report, &DisclosureSet::default());
        assert_eq!(
            rendered,
            "GOOG — 2025_Q3\n\
             Comparison with 2025_Q2\n\
             [-] Summary\n\
             \x20 Revenue grew 15%\n\
             \x20 Tone: confident\n"
        );
    }

    #[test]
    fn missing_high_level_renders_the_placeholder() {
        let report = report_from(json!({
            "ticker": "GOOG",
            "quarter": "2025_Q3",
            "summary": {"tone": "guarded"},
        }));

        let rendered = render_report(&report, &DisclosureSet::default());
        assert!(rendered.contains("Summary not available"));
        assert!(rendered.contains("Tone: guarded"));
    }

    #[test]
    fn empty_and_absent_risk_lists_both_render_nothing() {
        let absent = report_from(json!({"ticker": "GOOG", "quarter": "2025_Q3"}));
        let empty = report_from(json!({"ticker": "GOOG", "quarter": "2025_Q3", "risks": []}));

        let disclosure = DisclosureSet::expanded_all();
        let rendered_absent = render_report(&absent, &disclosure);
        let rendered_empty = render_report(&empty, &disclosure);
        assert_eq!(rendered_absent, rendered_empty);
        assert!(!rendered_absent.contains("Risks"));
    }

    #[test]
    fn collapsed_list_section_shows_header_and_count_only() {
        let report = report_from(json!({
            "ticker": "GOOG",
            "quarter": "2025_Q3",
            "risks": [
                {"claim": "Ad spend softness", "is_new": true, "evidence_current": "we saw pullbacks"},
                {"claim": "FX headwinds"},
            ],
        }));

        let rendered = render_report(&report, &DisclosureSet::default());
        assert!(rendered.contains("[+] Risks (2)"));
        assert!(!rendered.contains("Ad spend softness"));

        let mut disclosure = DisclosureSet::default();
        disclosure.toggle(SectionId::Risks);
        let rendered = render_report(&report, &disclosure);
        assert!(rendered.contains("[-] Risks (2)"));
        assert!(rendered.contains("  - Ad spend softness [NEW]\n"));
        assert!(rendered.contains("      \"we saw pullbacks\"\n"));
        // No badge and no evidence line for the second item.
        assert!(rendered.contains("  - FX headwinds\n"));
    }

    #[test]
    fn unknown_prev_evidence_is_omitted_verbatim_otherwise() {
        let report = report_from(json!({
            "ticker": "GOOG",
            "quarter": "2025_Q3",
            "guidance": [
                {
                    "claim": "FY guide raised",
                    "direction_vs_prev": "up",
                    "evidence_current": "we now expect 12%",
                    "evidence_prev": "unknown",
                },
                {
                    "claim": "Capex flat",
                    "direction_vs_prev": "flat",
                    "evidence_current": "capex unchanged",
                    "evidence_prev": "capex will stay at current levels",
                },
            ],
        }));

        let mut disclosure = DisclosureSet::default();
        disclosure.expand(SectionId::Guidance);
        let rendered = render_report(&report, &disclosure);

        assert!(rendered.contains("[-] Guidance (2)"));
        assert!(rendered.contains("  - FY guide raised [up]\n"));
        assert!(rendered.contains("      current: \"we now expect 12%\"\n"));
        assert!(!rendered.contains("unknown"));
        assert!(rendered.contains("      previous: \"capex will stay at current levels\"\n"));
    }

    #[test]
    fn qa_question_and_answer_are_independently_optional() {
        let report = report_from(json!({
            "ticker": "GOOG",
            "quarter": "2025_Q3",
            "qa_pressure_points": [
                {"theme": "AI monetization", "analyst_name": "J. Doe", "evidence_question": "how does AI convert?"},
                {"theme": "Cloud margins", "evidence_answer": "margins expanded again"},
            ],
        }));

        let mut disclosure = DisclosureSet::default();
        disclosure.expand(SectionId::QaPressurePoints);
        let rendered = render_report(&report, &disclosure);

        assert!(rendered.contains("[-] Q&A Pressure Points (2)"));
        assert!(rendered.contains("  - AI monetization — J. Doe\n"));
        assert!(rendered.contains("      Q: \"how does AI convert?\"\n"));
        assert!(rendered.contains("  - Cloud margins\n"));
        assert!(rendered.contains("      A: \"margins expanded again\"\n"));
    }

    #[test]
    fn growth_and_margin_sections_render_single_evidence_quotes() {
        let report = report_from(json!({
            "ticker": "MSFT",
            "quarter": "2025_Q1",
            "growth_drivers": [
                {"claim": "Copilot seat growth", "evidence": "seats doubled"},
            ],
            "margin_dynamics": [
                {"claim": "Opex discipline"},
            ],
        }));

        let rendered = render_report(&report, &DisclosureSet::expanded_all());
        assert!(rendered.contains("[-] Growth Drivers (1)"));
        assert!(rendered.contains("      \"seats doubled\"\n"));
        assert!(rendered.contains("[-] Margin Dynamics (1)"));
        assert!(rendered.contains("  - Opex discipline\n"));
    }
}
