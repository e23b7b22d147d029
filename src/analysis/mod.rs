//! Import attribution and usage analysis.
//!
//! This module maps the imports found in source files to the dependencies
//! declared in manifests and measures how much of each import is used.
//!
//! # Features
//!
//! - Filter standard-library and project-local imports per ecosystem
//! - Score import paths against declared dependencies, with ambiguity and
//!   undeclared-usage detection
//! - Count alias usage lexically, excluding the import statements themselves
//! - Run the whole pipeline over a scan and rank the results
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use usagescope::analysis::{Analyzer, ScanInput};
//! use usagescope::config::AnalysisConfig;
//!
//! let scan = ScanInput::from_file(Path::new("scan.json"))?;
//! let outcome = Analyzer::new(AnalysisConfig::default()).analyze(&scan);
//!
//! for report in &outcome.ranked {
//!     println!("{}: {:.1}% used", report.name, report.used_percent);
//! }
//! ```

pub mod attribution;
pub mod ecosystem;
pub mod pipeline;
pub mod usage;

// Re-export main types for convenience
pub use attribution::{attribute, Attributor};
pub use ecosystem::Ecosystem;
pub use pipeline::{
    AnalysisOutcome, AnalysisSummary, Analyzer, InputError, InputResult, ScanInput, SourceFile,
};
pub use usage::count_usage;
