//! Data model shared by every stage of the analysis.
//!
//! Language front ends produce [`ImportBinding`]s, manifest front ends
//! produce a [`DeclaredDependencySet`]. Everything downstream compares
//! dependency identifiers through [`normalize`].
//!
//! # Example
//!
//! ```rust
//! use usagescope::model::{DeclaredDependencySet, ImportBinding, Location};
//!
//! let declared: DeclaredDependencySet = ["Serilog", "Newtonsoft.Json"].into_iter().collect();
//! assert!(declared.contains("serilog"));
//!
//! let binding = ImportBinding::named("Serilog", "Log", "Log", Location::new("Program.cs", 1, 1));
//! assert_eq!(binding.key(), "Serilog:Log");
//! ```

mod types;

pub use types::{
    normalize, AttributionResult, DeclaredDependencySet, FileUsageSnapshot, ImportBinding,
    Location, ResolvedImport, WILDCARD_SYMBOL,
};
