//! JSON export implementation.
//!
//! Exports the full analysis outcome in JSON format for machine-readable output.

use super::{AnalysisOutcome, Exporter};
use crate::analysis::AnalysisSummary;
use crate::report::{waste_score, DependencyReport, RemovalCandidateWeights, Warning};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// One ranked entry for JSON output.
#[derive(Serialize)]
struct JsonRankEntry<'a> {
    rank: usize,
    name: &'a str,
    used_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    waste_score: Option<f64>,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    tool: JsonTool,
    ecosystem: String,
    usage_threshold: u8,
    weights: &'a RemovalCandidateWeights,
    summary: &'a AnalysisSummary,
    ranking: Vec<JsonRankEntry<'a>>,
    dependencies: &'a [DependencyReport],
    warnings: &'a [Warning],
}

/// Tool info for JSON output.
#[derive(Serialize)]
struct JsonTool {
    name: &'static str,
    version: &'static str,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, outcome: &AnalysisOutcome, writer: &mut W) -> io::Result<()> {
        let ranking: Vec<JsonRankEntry> = outcome
            .ranked
            .iter()
            .enumerate()
            .map(|(i, report)| JsonRankEntry {
                rank: i + 1,
                name: &report.name,
                used_percent: report.used_percent,
                waste_score: waste_score(report, &outcome.weights),
            })
            .collect();

        let export = JsonExport {
            tool: JsonTool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            ecosystem: outcome.ecosystem.to_string(),
            usage_threshold: outcome.usage_threshold,
            weights: &outcome.weights,
            summary: &outcome.summary,
            ranking,
            dependencies: &outcome.reports,
            warnings: &outcome.warnings,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
