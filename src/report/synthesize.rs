//! Per-dependency report synthesis.
//!
//! Aggregates the resolved imports of every file snapshot into one
//! [`DependencyReport`], then derives risk cues and recommendations from it.
//! All intermediate collections are ordered so repeated runs over the same
//! snapshots produce identical reports.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::types::{
    DependencyReport, ImportEntry, Recommendation, RecommendationCode, RiskCode, RiskCue,
    Severity, SymbolUsage, Warning, WarningKind,
};
use crate::model::{normalize, FileUsageSnapshot, ImportBinding};

/// Maximum number of entries in `top_used_symbols`.
pub const TOP_SYMBOLS_LIMIT: usize = 5;

/// Running totals collected while walking the snapshots.
#[derive(Debug, Default)]
struct Tally {
    all_symbols: BTreeSet<String>,
    used_symbols: BTreeSet<String>,
    symbol_counts: BTreeMap<String, usize>,
    used: BTreeMap<String, ImportEntry>,
    unused: BTreeMap<String, ImportEntry>,
    wildcard_imports: usize,
    side_effect_imports: usize,
    ambiguous: usize,
    undeclared: usize,
}

impl Tally {
    fn record(&mut self, binding: &ImportBinding, snapshot: &FileUsageSnapshot) {
        if binding.is_side_effect() {
            self.side_effect_imports += 1;
            return;
        }

        self.all_symbols.insert(binding.symbol.clone());

        let occurrences = if binding.wildcard {
            self.wildcard_imports += 1;
            None
        } else {
            Some(snapshot.usage_of(&binding.local_alias))
        };
        let used = binding.wildcard || occurrences.is_some_and(|n| n > 0);

        let entries = if used { &mut self.used } else { &mut self.unused };
        merge_entry(entries, binding);

        if used {
            self.used_symbols.insert(binding.symbol.clone());
            match occurrences {
                Some(n) => *self.symbol_counts.entry(binding.symbol.clone()).or_insert(0) += n,
                // Wildcard occurrences are unknown; the first one counts once.
                None => {
                    self.symbol_counts.entry(binding.symbol.clone()).or_insert(1);
                }
            }
        }
    }
}

fn merge_entry(entries: &mut BTreeMap<String, ImportEntry>, binding: &ImportBinding) {
    entries
        .entry(binding.key())
        .or_insert_with(|| ImportEntry {
            module: binding.module.clone(),
            symbol: binding.symbol.clone(),
            locations: Vec::new(),
        })
        .locations
        .push(binding.location.clone());
}

fn finish_entries(entries: BTreeMap<String, ImportEntry>) -> Vec<ImportEntry> {
    entries
        .into_values()
        .map(|mut entry| {
            entry.locations.sort();
            entry.locations.dedup();
            entry
        })
        .collect()
}

/// Builds the usage report for `dependency` from every snapshot.
///
/// `threshold` is the usage percentage below which the
/// `reduce-low-usage-package-surface` recommendation is made. Returned
/// warnings carry one line per raised risk cue, plus one when no symbol
/// imports were found for the dependency.
///
/// # Example
///
/// ```rust
/// use usagescope::analysis::{count_usage, Attributor, Ecosystem};
/// use usagescope::model::{DeclaredDependencySet, FileUsageSnapshot, ImportBinding, Location, ResolvedImport};
/// use usagescope::report::synthesize;
///
/// let declared: DeclaredDependencySet = ["requests"].into_iter().collect();
/// let attributor = Attributor::new(Ecosystem::Python);
/// let text = "import requests\nrequests.get(url)\n";
/// let binding = ImportBinding::named("requests", "requests", "requests", Location::new("app.py", 1, 1));
///
/// let snapshot = FileUsageSnapshot {
///     path: "app.py".to_string(),
///     text: text.to_string(),
///     usage: count_usage(text, std::slice::from_ref(&binding)),
///     imports: vec![ResolvedImport {
///         attribution: attributor.attribute(&binding.module, &declared).unwrap(),
///         binding,
///     }],
/// };
///
/// let (report, warnings) = synthesize("requests", &[snapshot], 20);
/// assert_eq!(report.used_percent, 100.0);
/// assert!(warnings.is_empty());
/// ```
pub fn synthesize(
    dependency: &str,
    snapshots: &[FileUsageSnapshot],
    threshold: u8,
) -> (DependencyReport, Vec<Warning>) {
    let name = normalize(dependency);
    let mut tally = Tally::default();

    for snapshot in snapshots {
        for import in &snapshot.imports {
            if normalize(&import.attribution.dependency_id) != name {
                continue;
            }
            if import.attribution.ambiguous {
                tally.ambiguous += 1;
            }
            if import.attribution.undeclared {
                tally.undeclared += 1;
            }
            tally.record(&import.binding, snapshot);
        }
    }

    // A key used anywhere is used.
    let used_keys: BTreeSet<String> = tally.used.keys().cloned().collect();
    tally.unused.retain(|key, _| !used_keys.contains(key));

    let total_symbol_count = tally.all_symbols.len();
    let used_symbol_count = tally.used_symbols.len();
    let used_percent = if total_symbol_count == 0 {
        0.0
    } else {
        100.0 * used_symbol_count as f64 / total_symbol_count as f64
    };

    let mut top_used_symbols: Vec<SymbolUsage> = std::mem::take(&mut tally.symbol_counts)
        .into_iter()
        .map(|(name, count)| SymbolUsage { name, count })
        .collect();
    top_used_symbols.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    top_used_symbols.truncate(TOP_SYMBOLS_LIMIT);

    let mut warnings = Vec::new();
    if total_symbol_count == 0 {
        warnings.push(Warning {
            kind: WarningKind::NoImportsFound,
            dependency: name.clone(),
            message: format!("no imports found for dependency {}", name),
        });
    }

    let risk_cues = build_risk_cues(&name, &tally);
    for cue in &risk_cues {
        warnings.push(Warning {
            kind: warning_kind(cue.code),
            dependency: name.clone(),
            message: format!("{}: {}", name, cue.message),
        });
    }

    let mut report = DependencyReport {
        name,
        used_symbol_count,
        total_symbol_count,
        used_percent,
        top_used_symbols,
        used_imports: finish_entries(std::mem::take(&mut tally.used)),
        unused_imports: finish_entries(std::mem::take(&mut tally.unused)),
        risk_cues,
        recommendations: Vec::new(),
    };
    report.recommendations = build_recommendations(&report, &tally, threshold);

    debug!(
        dependency = %report.name,
        used = report.used_symbol_count,
        total = report.total_symbol_count,
        cues = report.risk_cues.len(),
        "synthesized dependency report"
    );

    (report, warnings)
}

fn build_risk_cues(name: &str, tally: &Tally) -> Vec<RiskCue> {
    let mut cues = Vec::new();

    if tally.wildcard_imports > 0 {
        cues.push(RiskCue {
            code: RiskCode::WildcardImport,
            severity: Severity::Medium,
            message: format!(
                "{} wildcard import(s) hide which symbols of {} are used",
                tally.wildcard_imports, name
            ),
        });
    }
    if tally.side_effect_imports > 0 {
        cues.push(RiskCue {
            code: RiskCode::SideEffectImport,
            severity: Severity::Medium,
            message: format!(
                "{} side-effect import(s) of {} bind no usable name",
                tally.side_effect_imports, name
            ),
        });
    }
    if tally.ambiguous > 0 {
        cues.push(RiskCue {
            code: RiskCode::AmbiguousNamespaceMapping,
            severity: Severity::Medium,
            message: format!(
                "{} import(s) tied between several declared dependencies and were mapped to {}",
                tally.ambiguous, name
            ),
        });
    }
    if tally.undeclared > 0 {
        cues.push(RiskCue {
            code: RiskCode::UndeclaredPackageUsage,
            severity: Severity::High,
            message: format!(
                "{} import(s) resolve to {} which no manifest declares",
                tally.undeclared, name
            ),
        });
    }

    cues
}

fn warning_kind(code: RiskCode) -> WarningKind {
    match code {
        RiskCode::AmbiguousNamespaceMapping => WarningKind::AmbiguousMapping,
        RiskCode::UndeclaredPackageUsage => WarningKind::UndeclaredUsage,
        RiskCode::WildcardImport => WarningKind::WildcardImport,
        RiskCode::SideEffectImport => WarningKind::SideEffectImport,
    }
}

fn build_recommendations(
    report: &DependencyReport,
    tally: &Tally,
    threshold: u8,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let name = &report.name;

    if tally.undeclared > 0 {
        recommendations.push(Recommendation {
            code: RecommendationCode::DeclareDependencyExplicitly,
            priority: Severity::High,
            message: format!("Declare {} in the project manifest", name),
            rationale: format!(
                "{} import(s) use a package that is not declared; \
                 it may only be available transitively",
                tally.undeclared
            ),
        });
    }
    if tally.ambiguous > 0 {
        recommendations.push(Recommendation {
            code: RecommendationCode::ReviewNamespaceMapping,
            priority: Severity::Medium,
            message: format!("Review which package provides the imports mapped to {}", name),
            rationale: format!(
                "{} import(s) matched several declared dependencies equally well",
                tally.ambiguous
            ),
        });
    }
    if report.used_imports.is_empty() && !report.unused_imports.is_empty() {
        recommendations.push(Recommendation {
            code: RecommendationCode::RemoveUnusedDependency,
            priority: Severity::High,
            message: format!("Remove {} or its unused imports", name),
            rationale: format!(
                "none of the {} imported symbol(s) are referenced outside their import statements",
                report.unused_imports.len()
            ),
        });
    }
    let has_wildcard = report
        .used_imports
        .iter()
        .chain(report.unused_imports.iter())
        .any(ImportEntry::is_wildcard);
    if has_wildcard {
        recommendations.push(Recommendation {
            code: RecommendationCode::AvoidWildcardImports,
            priority: Severity::Medium,
            message: format!("Import the symbols of {} by name", name),
            rationale: "wildcard imports always count as used, which hides dead surface"
                .to_string(),
        });
    }
    if report.total_symbol_count > 0 && report.used_percent < f64::from(threshold) {
        recommendations.push(Recommendation {
            code: RecommendationCode::ReduceLowUsagePackageSurface,
            priority: Severity::Low,
            message: format!("Only a small part of {} is used; consider a narrower package", name),
            rationale: format!(
                "{:.1}% of imported symbols are used, below the {}% threshold",
                report.used_percent, threshold
            ),
        });
    }

    recommendations
}
