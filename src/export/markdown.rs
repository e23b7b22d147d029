//! Markdown export implementation.
//!
//! Exports the analysis outcome in Markdown format for documentation and reporting.

use super::{format_score, AnalysisOutcome, Exporter};
use crate::report::{DependencyReport, ImportEntry};
use std::io::{self, Write};

/// Markdown exporter implementation.
#[derive(Debug, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    fn write_entries<W: Write>(
        writer: &mut W,
        title: &str,
        entries: &[ImportEntry],
    ) -> io::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        writeln!(writer, "**{}:**", title)?;
        writeln!(writer)?;
        for entry in entries {
            let locations: Vec<String> = entry.locations.iter().map(|l| l.to_string()).collect();
            writeln!(writer, "- `{}` ({})", entry.key(), locations.join(", "))?;
        }
        writeln!(writer)
    }

    fn write_report<W: Write>(writer: &mut W, report: &DependencyReport) -> io::Result<()> {
        writeln!(writer, "### {}", report.name)?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} of {} imported symbols used ({:.1}%)",
            report.used_symbol_count, report.total_symbol_count, report.used_percent
        )?;
        writeln!(writer)?;

        if !report.top_used_symbols.is_empty() {
            writeln!(writer, "| Symbol | Uses |")?;
            writeln!(writer, "|--------|------|")?;
            for symbol in &report.top_used_symbols {
                writeln!(writer, "| {} | {} |", symbol.name, symbol.count)?;
            }
            writeln!(writer)?;
        }

        Self::write_entries(writer, "Used imports", &report.used_imports)?;
        Self::write_entries(writer, "Unused imports", &report.unused_imports)?;

        if !report.risk_cues.is_empty() {
            writeln!(writer, "**Risks:**")?;
            writeln!(writer)?;
            for cue in &report.risk_cues {
                writeln!(writer, "- `{}` ({}): {}", cue.code, cue.severity, cue.message)?;
            }
            writeln!(writer)?;
        }

        if !report.recommendations.is_empty() {
            writeln!(writer, "**Recommendations:**")?;
            writeln!(writer)?;
            for rec in &report.recommendations {
                writeln!(
                    writer,
                    "- `{}` ({}): {}. {}",
                    rec.code, rec.priority, rec.message, rec.rationale
                )?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, outcome: &AnalysisOutcome, writer: &mut W) -> io::Result<()> {
        let summary = &outcome.summary;

        // Title
        writeln!(writer, "# Dependency Usage Report")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "**Ecosystem:** {} | **Low-usage threshold:** {}%",
            outcome.ecosystem, outcome.usage_threshold
        )?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Dependencies | {} |", summary.dependencies)?;
        writeln!(writer, "| Declared | {} |", summary.declared)?;
        writeln!(writer, "| Source Files | {} |", summary.files)?;
        writeln!(writer, "| Attributed Imports | {} |", summary.imports)?;
        writeln!(writer, "| Filtered Imports | {} |", summary.filtered_imports)?;
        writeln!(writer, "| Unused | {} |", summary.unused)?;
        writeln!(writer, "| Low Usage | {} |", summary.low_usage)?;
        writeln!(writer, "| Undeclared | {} |", summary.undeclared)?;
        writeln!(writer, "| Ambiguous | {} |", summary.ambiguous)?;
        writeln!(writer)?;

        // Ranking
        if !outcome.ranked.is_empty() {
            writeln!(writer, "## Removal Candidates")?;
            writeln!(writer)?;
            writeln!(writer, "| Rank | Dependency | Used | Waste Score |")?;
            writeln!(writer, "|------|------------|------|-------------|")?;
            for (i, report) in outcome.ranked.iter().enumerate() {
                writeln!(
                    writer,
                    "| {} | {} | {}/{} | {} |",
                    i + 1,
                    report.name,
                    report.used_symbol_count,
                    report.total_symbol_count,
                    format_score(report, &outcome.weights)
                )?;
            }
            writeln!(writer)?;
        }

        // Per-dependency details
        if !outcome.reports.is_empty() {
            writeln!(writer, "## Dependencies")?;
            writeln!(writer)?;
            for report in &outcome.reports {
                Self::write_report(writer, report)?;
            }
        }

        // Warnings
        if !outcome.warnings.is_empty() {
            writeln!(writer, "## Warnings")?;
            writeln!(writer)?;
            for warning in &outcome.warnings {
                writeln!(writer, "- {}", warning)?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by usagescope*")?;

        Ok(())
    }
}
