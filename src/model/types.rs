//! Shared types for import attribution and usage reporting.
//!
//! This module defines the normalized data the language and manifest
//! front ends hand to the engine: import bindings, declared dependency
//! sets, attribution results and per-file usage snapshots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Symbol recorded for wildcard imports.
pub const WILDCARD_SYMBOL: &str = "*";

/// Canonicalizes a dependency identifier.
///
/// Trims surrounding whitespace and lower-cases. Every equality and prefix
/// comparison in the engine runs on this form.
///
/// # Example
///
/// ```rust
/// use usagescope::model::normalize;
///
/// assert_eq!(normalize("  Newtonsoft.Json "), "newtonsoft.json");
/// ```
pub fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Source position of an import statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the file, as reported by the front end.
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One observed import in one file.
///
/// Produced by a language front end (`using`, `import`, `open`,
/// `#include`, ...) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBinding {
    /// Namespace or package path as written in the source.
    pub module: String,
    /// Imported name, or `"*"` for wildcard imports.
    pub symbol: String,
    /// Identifier bound in scope. Empty for blank/side-effect imports.
    #[serde(default)]
    pub local_alias: String,
    /// Whether the import binds every exported name of the module.
    #[serde(default)]
    pub wildcard: bool,
    /// Where the import statement was found.
    pub location: Location,
}

impl ImportBinding {
    /// Creates a named import bound to `local_alias`.
    pub fn named(
        module: impl Into<String>,
        symbol: impl Into<String>,
        local_alias: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            local_alias: local_alias.into(),
            wildcard: false,
            location,
        }
    }

    /// Creates a wildcard import (`import pkg.*`, `using Namespace;`, Go dot import).
    pub fn wildcard(module: impl Into<String>, location: Location) -> Self {
        Self {
            module: module.into(),
            symbol: WILDCARD_SYMBOL.to_string(),
            local_alias: String::new(),
            wildcard: true,
            location,
        }
    }

    /// Creates a blank import kept only for its initialization side effects.
    pub fn side_effect(
        module: impl Into<String>,
        symbol: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            local_alias: String::new(),
            wildcard: false,
            location,
        }
    }

    /// Returns true if this binding is a blank/side-effect import.
    pub fn is_side_effect(&self) -> bool {
        !self.wildcard && self.local_alias.is_empty()
    }

    /// Deduplication key: `module:symbol`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.module, self.symbol)
    }
}

/// Normalized set of dependencies declared in the project's manifests.
///
/// Besides the dependency ids themselves, the set carries alias hints:
/// extra lookup keys that resolve to a declared id. A Maven
/// `group:artifact` coordinate is decomposed into several keys, and a Go
/// `replace` directive redirects one module path to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeclaredManifest")]
pub struct DeclaredDependencySet {
    dependencies: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

/// Wire form of a declared set, as written by manifest front ends.
///
/// Everything passes through the normalizing insert methods.
#[derive(Debug, Default, Deserialize)]
struct DeclaredManifest {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    maven: Vec<String>,
}

impl From<DeclaredManifest> for DeclaredDependencySet {
    fn from(manifest: DeclaredManifest) -> Self {
        let mut set: DeclaredDependencySet = manifest.dependencies.iter().collect();
        for (key, target) in &manifest.aliases {
            set.insert_alias(key, target);
        }
        for coordinate in &manifest.maven {
            set.insert_maven(coordinate);
        }
        set
    }
}

impl DeclaredDependencySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dependency id (normalized on insert).
    pub fn insert(&mut self, id: &str) {
        let id = normalize(id);
        if !id.is_empty() {
            self.dependencies.insert(id);
        }
    }

    /// Adds a lookup key that resolves to `target`.
    ///
    /// The target is declared as a dependency if it was not already.
    pub fn insert_alias(&mut self, key: &str, target: &str) {
        let key = normalize(key);
        let target = normalize(target);
        if key.is_empty() || target.is_empty() {
            return;
        }
        self.dependencies.insert(target.clone());
        if key != target {
            self.aliases.insert(key, target);
        }
    }

    /// Declares a Maven/Gradle coordinate.
    ///
    /// `com.google.guava:guava` is stored under its full coordinate, and the
    /// group and artifact become lookup keys for it. Coordinates without a
    /// `:` are inserted as plain ids.
    pub fn insert_maven(&mut self, coordinate: &str) {
        let coordinate = normalize(coordinate);
        let mut parts = coordinate.split(':');
        let (Some(group), Some(artifact)) = (parts.next(), parts.next()) else {
            self.insert(&coordinate);
            return;
        };
        let id = format!("{}:{}", group, artifact);
        self.insert(&id);
        self.insert_alias(group, &id);
        self.insert_alias(artifact, &id);
        self.insert_alias(&format!("{}.{}", group, artifact), &id);
    }

    /// Returns true if `id` is declared (compared normalized).
    pub fn contains(&self, id: &str) -> bool {
        self.dependencies.contains(&normalize(id))
    }

    /// Declared dependency ids in ascending order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    /// Alias hints as `(key, target)` pairs in ascending key order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declared dependencies.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DeclaredDependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id.as_ref());
        }
        set
    }
}

/// Outcome of resolving one import module against the declared set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Normalized dependency id (synthetic when `undeclared`).
    pub dependency_id: String,
    /// Two or more declared dependencies tied for the best score.
    pub ambiguous: bool,
    /// No declared dependency matched; the id was derived from the module.
    pub undeclared: bool,
}

/// An import binding together with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImport {
    pub binding: ImportBinding,
    pub attribution: AttributionResult,
}

/// Per-file input to report synthesis.
///
/// `usage` maps each local alias to its occurrence count in the file body,
/// import declarations excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUsageSnapshot {
    pub path: String,
    pub text: String,
    pub imports: Vec<ResolvedImport>,
    pub usage: BTreeMap<String, usize>,
}

impl FileUsageSnapshot {
    /// Occurrence count for `alias`, 0 when unknown.
    pub fn usage_of(&self, alias: &str) -> usize {
        self.usage.get(alias).copied().unwrap_or(0)
    }
}
