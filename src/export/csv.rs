//! CSV export implementation.
//!
//! Exports the waste ranking in CSV format for spreadsheet use.

use super::{format_score, AnalysisOutcome, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, outcome: &AnalysisOutcome, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "rank,name,used,total,used_percent,waste_score,risks,recommendations"
        )?;

        for (i, report) in outcome.ranked.iter().enumerate() {
            let risks: Vec<&str> = report.risk_cues.iter().map(|c| c.code.as_str()).collect();
            let recommendations: Vec<&str> = report
                .recommendations
                .iter()
                .map(|r| r.code.as_str())
                .collect();

            writeln!(
                writer,
                "{},{},{},{},{:.1},{},{},{}",
                i + 1,
                Self::escape_field(&report.name),
                report.used_symbol_count,
                report.total_symbol_count,
                report.used_percent,
                format_score(report, &outcome.weights),
                Self::escape_field(&risks.join(";")),
                Self::escape_field(&recommendations.join(";")),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    fn export_lines() -> Vec<String> {
        let outcome = fixtures::outcome();
        let mut output = Vec::new();
        CsvExporter.export(&outcome, &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_csv_export_basic() {
        let lines = export_lines();

        // Header + 3 dependencies
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "rank,name,used,total,used_percent,waste_score,risks,recommendations"
        );
        assert_eq!(
            lines[1],
            "1,polly,0,1,0.0,100.0,,remove-unused-dependency;reduce-low-usage-package-surface"
        );
        assert_eq!(lines[2], "2,serilog,1,1,100.0,0.0,,");
    }

    #[test]
    fn test_csv_export_unknown_score() {
        let lines = export_lines();

        // No symbols: score unknown, ranked last
        assert_eq!(lines[3], "3,newtonsoft.json,0,0,0.0,-,,");
    }

    #[test]
    fn test_csv_export_respects_top_n() {
        let mut outcome = fixtures::outcome();
        outcome.ranked.truncate(1);

        let mut output = Vec::new();
        CsvExporter.export(&outcome, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();
        assert_eq!(csv_str.lines().count(), 2);
        assert!(!csv_str.contains("serilog"));
    }

    #[test]
    fn test_csv_escape_field() {
        // No escaping needed
        assert_eq!(CsvExporter::escape_field("simple"), "simple");

        // Contains comma
        assert_eq!(CsvExporter::escape_field("has,comma"), "\"has,comma\"");

        // Contains quotes
        assert_eq!(CsvExporter::escape_field("has\"quote"), "\"has\"\"quote\"");

        // Contains newline
        assert_eq!(
            CsvExporter::escape_field("has\nnewline"),
            "\"has\nnewline\""
        );
    }
}
