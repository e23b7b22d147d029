//! Export functionality for analysis results.
//!
//! This module provides exporters for writing an [`AnalysisOutcome`] in
//! various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::analysis::AnalysisOutcome;
use crate::report::{waste_score, DependencyReport, RemovalCandidateWeights};
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    #[default]
    Json,
    /// CSV format - spreadsheet-friendly ranking
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the outcome to the given writer.
    fn export<W: Write>(&self, outcome: &AnalysisOutcome, writer: &mut W) -> io::Result<()>;
}

/// Export an outcome in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    outcome: &AnalysisOutcome,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(outcome, writer),
        ExportFormat::Csv => csv::CsvExporter::default().export(outcome, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter::default().export(outcome, writer),
    }
}

/// Export an outcome to a string.
pub fn export_to_string(format: ExportFormat, outcome: &AnalysisOutcome) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, outcome, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Waste score rendered for display; `-` when unknown.
pub(crate) fn format_score(report: &DependencyReport, weights: &RemovalCandidateWeights) -> String {
    waste_score(report, weights).map_or_else(|| "-".to_string(), |score| format!("{:.1}", score))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::analysis::{AnalysisOutcome, Analyzer, Ecosystem, ScanInput, SourceFile};
    use crate::model::{ImportBinding, Location};

    /// A small C# project: Serilog is used, Polly only imported,
    /// Newtonsoft.Json declared but never imported.
    pub fn outcome() -> AnalysisOutcome {
        let mut scan = ScanInput {
            ecosystem: Ecosystem::DotNet,
            local_prefixes: vec!["Contoso".to_string()],
            ..ScanInput::default()
        };
        scan.declared.insert("Serilog");
        scan.declared.insert("Polly");
        scan.declared.insert("Newtonsoft.Json");

        let text = r#"using System;
using Serilog;
using Polly;
using Contoso.Orders;

Log.Information("start");
Log.Warning("careful");
"#;
        let loc = |line| Location::new("Program.cs", line, 1);
        scan.files.push(SourceFile {
            path: "Program.cs".to_string(),
            text: text.to_string(),
            bindings: vec![
                ImportBinding::wildcard("System", loc(1)),
                ImportBinding::named("Serilog", "Log", "Log", loc(2)),
                ImportBinding::named("Polly", "Policy", "Policy", loc(3)),
                ImportBinding::wildcard("Contoso.Orders", loc(4)),
            ],
        });

        Analyzer::default().analyze(&scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_export_to_string_every_format() {
        let outcome = fixtures::outcome();
        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown] {
            let output = export_to_string(format, &outcome).unwrap();
            assert!(output.contains("serilog"), "{} output missing serilog", format);
        }
    }

    #[test]
    fn test_fixture_shape() {
        let outcome = fixtures::outcome();
        let names: Vec<_> = outcome.reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["newtonsoft.json", "polly", "serilog"]);
        assert_eq!(outcome.summary.filtered_imports, 2);
        assert_eq!(outcome.summary.unused, 1);
    }
}
