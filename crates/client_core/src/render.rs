//! Display model for an analysis result. Everything here is a pure function of
//! the [`AnalysisResult`]; front ends only draw what [`ResultView`] holds.

use std::fmt::Write as _;

use shared::protocol::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Danger => "❌",
            Severity::Warning => "⚠",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
        }
    }
}

/// Substring match over the free-text verdict, checked in order:
/// "True", then "False"; anything else (including "Misleading") is a warning.
pub fn classify_verdict(verdict: &str) -> Severity {
    if verdict.contains("True") {
        Severity::Success
    } else if verdict.contains("False") {
        Severity::Danger
    } else {
        Severity::Warning
    }
}

pub fn confidence_percent(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub verdict: String,
    pub severity: Severity,
    pub confidence_percent: u8,
    pub explanation: String,
    pub corrective_information: Option<String>,
    pub sources: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            verdict: result.verdict.clone(),
            severity: classify_verdict(&result.verdict),
            confidence_percent: confidence_percent(result.confidence),
            explanation: result.explanation.clone(),
            corrective_information: result
                .corrective_information
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned(),
            sources: result.sources.clone(),
        }
    }

    pub fn confidence_label(&self) -> String {
        format!("{}% confidence", self.confidence_percent)
    }
}

pub fn render_text_report(view: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Verdict: {} ({})",
        view.severity.icon(),
        view.verdict,
        view.confidence_label()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.explanation);
    if let Some(corrective) = &view.corrective_information {
        let _ = writeln!(out);
        let _ = writeln!(out, "Corrective information:");
        let _ = writeln!(out, "{corrective}");
    }
    if !view.sources.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sources:");
        for (idx, source) in view.sources.iter().enumerate() {
            let _ = writeln!(out, "  {}. {source}", idx + 1);
        }
    }
    out
}
