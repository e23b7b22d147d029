//! Report types emitted per dependency.

use serde::Serialize;
use std::fmt;

use crate::model::Location;

/// Severity of a risk cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Priority of a recommendation. Shares the severity scale.
pub type Priority = Severity;

/// Kinds of risk attached to a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCode {
    AmbiguousNamespaceMapping,
    UndeclaredPackageUsage,
    WildcardImport,
    SideEffectImport,
}

impl RiskCode {
    /// Stable kebab-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCode::AmbiguousNamespaceMapping => "ambiguous-namespace-mapping",
            RiskCode::UndeclaredPackageUsage => "undeclared-package-usage",
            RiskCode::WildcardImport => "wildcard-import",
            RiskCode::SideEffectImport => "side-effect-import",
        }
    }
}

impl fmt::Display for RiskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk signal attached to a dependency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskCue {
    pub code: RiskCode,
    pub severity: Severity,
    pub message: String,
}

/// Kinds of recommendation, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCode {
    DeclareDependencyExplicitly,
    ReviewNamespaceMapping,
    RemoveUnusedDependency,
    AvoidWildcardImports,
    ReduceLowUsagePackageSurface,
}

impl RecommendationCode {
    /// Stable kebab-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCode::DeclareDependencyExplicitly => "declare-dependency-explicitly",
            RecommendationCode::ReviewNamespaceMapping => "review-namespace-mapping",
            RecommendationCode::RemoveUnusedDependency => "remove-unused-dependency",
            RecommendationCode::AvoidWildcardImports => "avoid-wildcard-imports",
            RecommendationCode::ReduceLowUsagePackageSurface => "reduce-low-usage-package-surface",
        }
    }
}

impl fmt::Display for RecommendationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action suggested for a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub code: RecommendationCode,
    pub priority: Priority,
    pub message: String,
    pub rationale: String,
}

/// Occurrence total for one imported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolUsage {
    pub name: String,
    pub count: usize,
}

/// A deduplicated import (`module:symbol`) with every place it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    pub module: String,
    pub symbol: String,
    pub locations: Vec<Location>,
}

impl ImportEntry {
    /// Deduplication key: `module:symbol`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.module, self.symbol)
    }

    /// Returns true for wildcard imports.
    pub fn is_wildcard(&self) -> bool {
        self.symbol == crate::model::WILDCARD_SYMBOL
    }
}

/// Aggregated usage for one dependency.
///
/// Built once per analysis run. `used_symbol_count` never exceeds
/// `total_symbol_count`, and `used_percent` is 0 when no symbols were seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyReport {
    /// Normalized dependency id.
    pub name: String,
    pub used_symbol_count: usize,
    pub total_symbol_count: usize,
    pub used_percent: f64,
    /// At most five entries, by count descending then name ascending.
    pub top_used_symbols: Vec<SymbolUsage>,
    pub used_imports: Vec<ImportEntry>,
    pub unused_imports: Vec<ImportEntry>,
    pub risk_cues: Vec<RiskCue>,
    pub recommendations: Vec<Recommendation>,
}

impl DependencyReport {
    /// Returns true if a risk cue with `code` was raised.
    pub fn has_risk(&self, code: RiskCode) -> bool {
        self.risk_cues.iter().any(|cue| cue.code == code)
    }

    /// Returns true if a recommendation with `code` was made.
    pub fn recommends(&self, code: RecommendationCode) -> bool {
        self.recommendations.iter().any(|rec| rec.code == code)
    }

    /// Returns true if any symbols were attributed to this dependency.
    pub fn has_symbols(&self) -> bool {
        self.total_symbol_count > 0
    }
}

/// Kinds of run-level warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    NoImportsFound,
    AmbiguousMapping,
    UndeclaredUsage,
    WildcardImport,
    SideEffectImport,
}

impl WarningKind {
    /// Stable kebab-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::NoImportsFound => "no-imports-found",
            WarningKind::AmbiguousMapping => "ambiguous-mapping",
            WarningKind::UndeclaredUsage => "undeclared-usage",
            WarningKind::WildcardImport => "wildcard-import",
            WarningKind::SideEffectImport => "side-effect-import",
        }
    }
}

/// A run-level warning raised while synthesizing a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub dependency: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&RiskCode::AmbiguousNamespaceMapping).unwrap(),
            "\"ambiguous-namespace-mapping\""
        );
        assert_eq!(
            serde_json::to_string(&RecommendationCode::ReduceLowUsagePackageSurface).unwrap(),
            "\"reduce-low-usage-package-surface\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_code_strings_match_serde() {
        for code in [
            RiskCode::AmbiguousNamespaceMapping,
            RiskCode::UndeclaredPackageUsage,
            RiskCode::WildcardImport,
            RiskCode::SideEffectImport,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json.trim_matches('"'), code.as_str());
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning {
            kind: WarningKind::NoImportsFound,
            dependency: "serilog".to_string(),
            message: "no imports found for serilog".to_string(),
        };
        assert_eq!(warning.to_string(), "[no-imports-found] no imports found for serilog");
    }

    #[test]
    fn test_import_entry_wildcard() {
        let entry = ImportEntry {
            module: "org.junit".to_string(),
            symbol: "*".to_string(),
            locations: vec![],
        };
        assert!(entry.is_wildcard());
        assert_eq!(entry.key(), "org.junit:*");
    }
}
