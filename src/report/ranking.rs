//! Waste ranking of dependency reports.
//!
//! A dependency's waste score is `100 - used_percent` by default. Custom
//! [`RemovalCandidateWeights`] blend in how much of its import surface is
//! unused (impact) and how trustworthy the attribution was (confidence).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{DependencyReport, RiskCode};

/// Confidence lost per risk cue kind.
const CONFIDENCE_PENALTIES: [(RiskCode, f64); 4] = [
    (RiskCode::AmbiguousNamespaceMapping, 40.0),
    (RiskCode::UndeclaredPackageUsage, 30.0),
    (RiskCode::WildcardImport, 20.0),
    (RiskCode::SideEffectImport, 20.0),
];

/// Weights for the composite waste score.
///
/// The defaults weigh usage only, which makes the composite score equal to
/// `100 - used_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalCandidateWeights {
    /// Weight of the unused share of imported symbols.
    pub usage: f64,
    /// Weight of the unused share of distinct import entries.
    pub impact: f64,
    /// Weight of attribution confidence.
    pub confidence: f64,
}

impl Default for RemovalCandidateWeights {
    fn default() -> Self {
        Self {
            usage: 1.0,
            impact: 0.0,
            confidence: 0.0,
        }
    }
}

impl RemovalCandidateWeights {
    /// Creates a new set of weights.
    pub fn new(usage: f64, impact: f64, confidence: f64) -> Self {
        Self {
            usage,
            impact,
            confidence,
        }
    }

    /// Returns true if every weight is finite and non-negative and the sum is positive.
    pub fn is_valid(&self) -> bool {
        let parts = [self.usage, self.impact, self.confidence];
        parts.iter().all(|w| w.is_finite() && *w >= 0.0) && parts.iter().sum::<f64>() > 0.0
    }

    /// Weights scaled to sum to 1. Invalid weights fall back to the defaults.
    pub fn normalized(&self) -> Self {
        let weights = if self.is_valid() { *self } else { Self::default() };
        let sum = weights.usage + weights.impact + weights.confidence;
        Self {
            usage: weights.usage / sum,
            impact: weights.impact / sum,
            confidence: weights.confidence / sum,
        }
    }
}

/// Composite waste score, or `None` when the dependency has no symbols.
pub fn waste_score(report: &DependencyReport, weights: &RemovalCandidateWeights) -> Option<f64> {
    if !report.has_symbols() {
        return None;
    }
    let usage_term = 100.0 - report.used_percent;
    let w = weights.normalized();
    if w.impact == 0.0 && w.confidence == 0.0 {
        return Some(usage_term);
    }
    Some(
        w.usage * usage_term
            + w.impact * impact_term(report)
            + w.confidence * confidence_term(report),
    )
}

/// Share of distinct import entries that are unused, 0-100.
fn impact_term(report: &DependencyReport) -> f64 {
    let used = report.used_imports.len();
    let unused = report.unused_imports.len();
    if used + unused == 0 {
        0.0
    } else {
        100.0 * unused as f64 / (used + unused) as f64
    }
}

/// 100 minus a penalty per raised risk cue kind, floored at 0.
fn confidence_term(report: &DependencyReport) -> f64 {
    let penalty: f64 = CONFIDENCE_PENALTIES
        .iter()
        .filter(|(code, _)| report.has_risk(*code))
        .map(|(_, penalty)| penalty)
        .sum();
    (100.0 - penalty).max(0.0)
}

/// Orders reports by waste and keeps the first `n`.
///
/// Reports with a known score come first, highest score first with ties
/// broken by name. Reports without symbols follow in name order. `n == 0`
/// or `n >= reports.len()` keeps every report.
///
/// # Example
///
/// ```rust
/// use usagescope::report::{rank_top_n, synthesize, RemovalCandidateWeights};
///
/// let (unused, _) = synthesize("serilog", &[], 20);
/// let ranked = rank_top_n(0, &[unused], &RemovalCandidateWeights::default());
/// assert_eq!(ranked.len(), 1);
/// ```
pub fn rank_top_n(
    n: usize,
    reports: &[DependencyReport],
    weights: &RemovalCandidateWeights,
) -> Vec<DependencyReport> {
    let mut scored: Vec<(Option<f64>, &DependencyReport)> = reports
        .iter()
        .map(|report| (waste_score(report, weights), report))
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| match (a_score, b_score) {
        (Some(x), Some(y)) => y.total_cmp(x).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });

    let keep = if n == 0 || n >= scored.len() { scored.len() } else { n };
    scored
        .into_iter()
        .take(keep)
        .map(|(_, report)| report.clone())
        .collect()
}
