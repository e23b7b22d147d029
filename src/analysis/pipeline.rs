//! End-to-end analysis of one scan.
//!
//! A [`ScanInput`] is what the language and manifest front ends hand over:
//! the ecosystem, the project's own module roots, the declared
//! dependencies and every source file with its extracted bindings. The
//! [`Analyzer`] resolves, counts, synthesizes and ranks it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::attribution::Attributor;
use super::ecosystem::Ecosystem;
use super::usage::count_usage;
use crate::config::AnalysisConfig;
use crate::model::{DeclaredDependencySet, FileUsageSnapshot, ImportBinding, ResolvedImport};
use crate::report::{
    rank_top_n, synthesize, DependencyReport, RecommendationCode, RemovalCandidateWeights,
    RiskCode, Warning,
};

/// Errors that can occur while loading a scan.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read scan file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse scan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scan loading.
pub type InputResult<T> = Result<T, InputError>;

/// One source file with the bindings its front end extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
    #[serde(default)]
    pub bindings: Vec<ImportBinding>,
}

/// Everything the front ends produced for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanInput {
    #[serde(default)]
    pub ecosystem: Ecosystem,
    /// The project's own module or namespace roots.
    #[serde(default)]
    pub local_prefixes: Vec<String>,
    #[serde(default)]
    pub declared: DeclaredDependencySet,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl ScanInput {
    /// Parses a scan from JSON.
    pub fn from_json_str(content: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads and parses a scan file.
    pub fn from_file(path: &Path) -> InputResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Run-level counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub dependencies: usize,
    pub declared: usize,
    pub files: usize,
    pub imports: usize,
    pub filtered_imports: usize,
    pub unused: usize,
    pub low_usage: usize,
    pub undeclared: usize,
    pub ambiguous: usize,
}

/// Result of analyzing one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub ecosystem: Ecosystem,
    pub usage_threshold: u8,
    pub weights: RemovalCandidateWeights,
    pub summary: AnalysisSummary,
    /// Every report, in dependency name order.
    pub reports: Vec<DependencyReport>,
    /// The top reports by waste score.
    pub ranked: Vec<DependencyReport>,
    pub warnings: Vec<Warning>,
}

/// Runs the attribution, usage, report and ranking stages.
///
/// # Example
///
/// ```rust
/// use usagescope::analysis::{Analyzer, ScanInput, SourceFile};
/// use usagescope::config::AnalysisConfig;
/// use usagescope::model::{ImportBinding, Location};
///
/// let mut scan = ScanInput::default();
/// scan.declared.insert("requests");
/// scan.files.push(SourceFile {
///     path: "app.py".to_string(),
///     text: "import requests\n".to_string(),
///     bindings: vec![ImportBinding::named("requests", "requests", "requests", Location::new("app.py", 1, 1))],
/// });
///
/// let outcome = Analyzer::new(AnalysisConfig::default()).analyze(&scan);
/// assert_eq!(outcome.summary.unused, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Creates an analyzer with `config`.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Builds the per-file snapshots for `scan`, in path order.
    ///
    /// Filtered imports are dropped. Returns the snapshots and the number of
    /// dropped imports.
    pub fn snapshots(&self, scan: &ScanInput) -> (Vec<FileUsageSnapshot>, usize) {
        let attributor =
            Attributor::new(scan.ecosystem).with_local_prefixes(&scan.local_prefixes);

        let mut files: Vec<&SourceFile> = scan.files.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut filtered = 0;
        let snapshots: Vec<FileUsageSnapshot> = files
            .into_iter()
            .map(|file| {
                let imports: Vec<ResolvedImport> = file
                    .bindings
                    .iter()
                    .filter_map(|binding| {
                        let attribution = attributor.attribute(&binding.module, &scan.declared);
                        if attribution.is_none() {
                            filtered += 1;
                        }
                        attribution.map(|attribution| ResolvedImport {
                            binding: binding.clone(),
                            attribution,
                        })
                    })
                    .collect();
                debug!(
                    file = %file.path,
                    bindings = file.bindings.len(),
                    resolved = imports.len(),
                    "built file snapshot"
                );
                FileUsageSnapshot {
                    path: file.path.clone(),
                    text: file.text.clone(),
                    usage: count_usage(&file.text, &file.bindings),
                    imports,
                }
            })
            .collect();

        (snapshots, filtered)
    }

    /// Analyzes `scan` and ranks its dependencies.
    pub fn analyze(&self, scan: &ScanInput) -> AnalysisOutcome {
        let (snapshots, filtered_imports) = self.snapshots(scan);

        let mut dependencies: BTreeSet<String> =
            scan.declared.dependencies().map(str::to_string).collect();
        for snapshot in &snapshots {
            for import in &snapshot.imports {
                dependencies.insert(import.attribution.dependency_id.clone());
            }
        }

        let mut reports = Vec::with_capacity(dependencies.len());
        let mut warnings = Vec::new();
        for dependency in &dependencies {
            let (report, report_warnings) =
                synthesize(dependency, &snapshots, self.config.usage_threshold);
            reports.push(report);
            warnings.extend(report_warnings);
        }

        let ranked = rank_top_n(self.config.top_n, &reports, &self.config.weights);

        let summary = AnalysisSummary {
            dependencies: reports.len(),
            declared: scan.declared.len(),
            files: snapshots.len(),
            imports: snapshots.iter().map(|s| s.imports.len()).sum(),
            filtered_imports,
            unused: count_recommending(&reports, RecommendationCode::RemoveUnusedDependency),
            low_usage: count_recommending(
                &reports,
                RecommendationCode::ReduceLowUsagePackageSurface,
            ),
            undeclared: count_with_risk(&reports, RiskCode::UndeclaredPackageUsage),
            ambiguous: count_with_risk(&reports, RiskCode::AmbiguousNamespaceMapping),
        };

        info!(
            ecosystem = %scan.ecosystem,
            dependencies = summary.dependencies,
            files = summary.files,
            unused = summary.unused,
            warnings = warnings.len(),
            "analysis complete"
        );

        AnalysisOutcome {
            ecosystem: scan.ecosystem,
            usage_threshold: self.config.usage_threshold,
            weights: self.config.weights,
            summary,
            reports,
            ranked,
            warnings,
        }
    }
}

fn count_recommending(reports: &[DependencyReport], code: RecommendationCode) -> usize {
    reports.iter().filter(|r| r.recommends(code)).count()
}

fn count_with_risk(reports: &[DependencyReport], code: RiskCode) -> usize {
    reports.iter().filter(|r| r.has_risk(code)).count()
}
