// src/presentation.rs
//! Terminal rendering of the analyzer state

use std::fmt;

use crate::core::AnalyzerBackend;
use crate::session::{AnalyzerSession, RequestStatus};
use crate::types::{AnalysisResult, HistoryEntry};

const GAUGE_CELLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Strong,
    Good,
    Fair,
    Weak,
}

impl ScoreTier {
    /// Bucket a score: `[80,100]`, `[60,80)`, `[40,60)`, `[0,40)`
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Strong
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Excellent match",
            Self::Good => "Good match",
            Self::Fair => "Moderate match",
            Self::Weak => "Low match",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Strong => "🟢",
            Self::Good => "🔵",
            Self::Fair => "🟡",
            Self::Weak => "🔴",
        }
    }

    fn fill(&self) -> char {
        match self {
            Self::Strong => '█',
            Self::Good => '▓',
            Self::Fair => '▒',
            Self::Weak => '░',
        }
    }
}

/// Score as shown to the user, e.g. `73%` or `78.45%`
pub fn format_score(score: f64) -> String {
    format!("{}%", score)
}

/// Fixed-width bar filled in proportion to the score
pub fn gauge(score: f64) -> String {
    let tier = ScoreTier::from_score(score);
    let clamped = score.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * GAUGE_CELLS as f64).round() as usize;
    let mut bar = String::with_capacity(GAUGE_CELLS + 2);
    bar.push('[');
    bar.extend(std::iter::repeat(tier.fill()).take(filled));
    bar.extend(std::iter::repeat('·').take(GAUGE_CELLS - filled));
    bar.push(']');
    bar
}

/// Result card: score line, summary, then matched and missing skills
pub struct ResultCard<'a>(pub &'a AnalysisResult);

impl fmt::Display for ResultCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let tier = ScoreTier::from_score(result.match_score);

        writeln!(f, "Match Score")?;
        writeln!(
            f,
            "{} {} {} ({})",
            tier.marker(),
            format_score(result.match_score),
            gauge(result.match_score),
            tier.label()
        )?;
        if !result.summary.is_empty() {
            writeln!(f, "{}", result.summary)?;
        }

        writeln!(f)?;
        writeln!(f, "Matched Skills ({})", result.matched_keywords.len())?;
        for keyword in &result.matched_keywords {
            writeln!(f, "  ✓ {}", keyword)?;
        }

        writeln!(f)?;
        writeln!(f, "Missing Skills ({})", result.missing_keywords.len())?;
        for keyword in &result.missing_keywords {
            writeln!(f, "  ✗ {}", keyword)?;
        }
        Ok(())
    }
}

pub fn render_result(result: &AnalysisResult) -> String {
    ResultCard(result).to_string()
}

pub fn render_error(message: &str) -> String {
    format!("⚠️  {}\n", message)
}

pub fn render_placeholder() -> String {
    "Ready to Analyze\nUpload your resume and provide a job description to get a match analysis.\n"
        .to_string()
}

/// Everything the results area would show for the current session state
pub fn render_session<B: AnalyzerBackend>(session: &AnalyzerSession<B>) -> String {
    let mut out = String::new();

    match session.status() {
        RequestStatus::Generating => out.push_str("Generating job description...\n"),
        RequestStatus::Analyzing => out.push_str("Analyzing...\n"),
        RequestStatus::Idle => {}
    }

    if let Some(message) = session.error() {
        out.push_str(&render_error(message));
    }

    match session.result() {
        Some(result) => out.push_str(&render_result(result)),
        None if session.status() == RequestStatus::Idle => out.push_str(&render_placeholder()),
        None => {}
    }

    out
}

pub struct HistoryTable<'a>(pub &'a [HistoryEntry]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No analyses found.");
        }

        writeln!(
            f,
            "{:<26} {:<8} {:<18} {:<24}",
            "ID", "Score", "Date", "Resume"
        )?;
        writeln!(f, "{}", "-".repeat(78))?;
        for entry in self.0 {
            let tier = ScoreTier::from_score(entry.match_score);
            let date = entry
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<26} {} {:<6} {:<18} {:<24}",
                entry.id,
                tier.marker(),
                format_score(entry.match_score),
                date,
                entry.resume_filename.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    HistoryTable(entries).to_string()
}
