//! Dependency usage reports and waste ranking.
//!
//! [`synthesize`] turns file snapshots into one [`DependencyReport`] per
//! dependency, with risk cues and recommendations. [`rank_top_n`] orders
//! the finished reports by how much of each dependency goes unused.
//!
//! Synthesis only reads its inputs, so reports for different dependencies
//! can be built independently. Ranking must run over the complete set.

pub mod ranking;
pub mod synthesize;
mod types;

pub use ranking::{rank_top_n, waste_score, RemovalCandidateWeights};
pub use synthesize::{synthesize, TOP_SYMBOLS_LIMIT};
pub use types::{
    DependencyReport, ImportEntry, Priority, Recommendation, RecommendationCode, RiskCode,
    RiskCue, Severity, SymbolUsage, Warning, WarningKind,
};
