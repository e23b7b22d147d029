//! usagescope - dependency usage analyzer with waste ranking
//!
//! This crate maps the imports of a project's source files to the
//! dependencies its manifests declare, measures how much of each dependency
//! is actually used, and ranks the dependencies that are the best removal
//! candidates.

pub mod analysis;
pub mod config;
pub mod export;
pub mod model;
pub mod report;
