//! Attribution of import module paths to declared dependencies.
//!
//! An import such as `Newtonsoft.Json.Linq` or `github.com/spf13/cobra/doc`
//! is matched against the declared dependency set with a scored heuristic.
//! The best score wins; equal best scores are broken by id and flagged as
//! ambiguous. When nothing matches, a synthetic id is derived from the
//! module itself and flagged as undeclared.

use std::collections::BTreeMap;

use tracing::debug;

use super::ecosystem::{has_segment_prefix, Ecosystem};
use crate::model::{normalize, AttributionResult, DeclaredDependencySet};

/// Score for an exact match.
pub const SCORE_EXACT: u32 = 100;
/// Score when the module lives under the dependency (`dep.sub`).
pub const SCORE_MODULE_UNDER_DEPENDENCY: u32 = 90;
/// Score when the dependency lives under the module (`module.sub`).
pub const SCORE_DEPENDENCY_UNDER_MODULE: u32 = 75;
/// Score when the first path segments are equal.
pub const SCORE_FIRST_SEGMENT: u32 = 60;
/// Score when the last path segments are equal.
pub const SCORE_LAST_SEGMENT: u32 = 50;
/// Score when one string contains the other.
pub const SCORE_SUBSTRING: u32 = 40;

/// Characters that split a module path or dependency id into segments.
const SEGMENT_SEPARATORS: [char; 3] = ['.', '/', ':'];

/// Resolves import modules to declared dependencies for one ecosystem.
///
/// # Example
///
/// ```rust
/// use usagescope::analysis::{Attributor, Ecosystem};
/// use usagescope::model::DeclaredDependencySet;
///
/// let declared: DeclaredDependencySet = ["Serilog", "Newtonsoft.Json"].into_iter().collect();
/// let attributor = Attributor::new(Ecosystem::DotNet).with_local_prefixes(["Contoso.Shop"]);
///
/// let result = attributor.attribute("Newtonsoft.Json.Linq", &declared).unwrap();
/// assert_eq!(result.dependency_id, "newtonsoft.json");
///
/// // Standard library and project-local namespaces are filtered out.
/// assert!(attributor.attribute("System.Text", &declared).is_none());
/// assert!(attributor.attribute("Contoso.Shop.Orders", &declared).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attributor {
    ecosystem: Ecosystem,
    local_prefixes: Vec<String>,
}

impl Attributor {
    /// Creates an attributor for `ecosystem` with no project-local prefixes.
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            local_prefixes: Vec::new(),
        }
    }

    /// Sets the project's own module or namespace roots.
    ///
    /// Imports under any of these prefixes are treated as local and filtered.
    pub fn with_local_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| normalize(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        prefixes.sort();
        prefixes.dedup();
        self.local_prefixes = prefixes;
        self
    }

    /// Returns true if `module` is a standard-library or project-local import.
    pub fn is_filtered(&self, module: &str) -> bool {
        let module = normalize(module);
        module.is_empty()
            || self.ecosystem.is_relative(&module)
            || self.ecosystem.is_standard_library(&module)
            || self
                .local_prefixes
                .iter()
                .any(|prefix| self.is_at_or_under(&module, prefix))
    }

    /// Resolves `module` against `declared`.
    ///
    /// Returns `None` for filtered imports. Otherwise the best scoring
    /// declared dependency, or a synthetic undeclared id when no declared
    /// dependency scores above zero. The result depends only on the inputs.
    pub fn attribute(
        &self,
        module: &str,
        declared: &DeclaredDependencySet,
    ) -> Option<AttributionResult> {
        if self.is_filtered(module) {
            debug!(module, ecosystem = %self.ecosystem, "import filtered");
            return None;
        }
        let module = normalize(module);

        let mut best: BTreeMap<&str, u32> = BTreeMap::new();
        let candidates = declared
            .dependencies()
            .map(|id| (id, id))
            .chain(declared.aliases());
        for (key, target) in candidates {
            let score = self.score(&module, key);
            if score == 0 {
                continue;
            }
            let entry = best.entry(target).or_insert(0);
            *entry = (*entry).max(score);
        }

        let mut ranked: Vec<(&str, u32)> = best.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        match ranked.as_slice() {
            [] => {
                let dependency_id = fallback_id(&module);
                debug!(
                    module = %module,
                    dependency = %dependency_id,
                    "no declared dependency matched"
                );
                Some(AttributionResult {
                    dependency_id,
                    ambiguous: false,
                    undeclared: true,
                })
            }
            [(id, score), rest @ ..] => {
                // Only the runner-up is compared; lower-ranked ties do not matter.
                let ambiguous = rest.first().is_some_and(|(_, s)| s == score);
                if ambiguous {
                    debug!(module = %module, dependency = %id, score, "ambiguous attribution");
                }
                Some(AttributionResult {
                    dependency_id: (*id).to_string(),
                    ambiguous,
                    undeclared: false,
                })
            }
        }
    }

    /// Scores how well `module` matches `candidate`. Both must be normalized.
    pub fn score(&self, module: &str, candidate: &str) -> u32 {
        if module.is_empty() || candidate.is_empty() {
            return 0;
        }
        if module == candidate {
            return SCORE_EXACT;
        }
        if self.is_under(module, candidate) {
            return SCORE_MODULE_UNDER_DEPENDENCY;
        }
        if self.is_under(candidate, module) {
            return SCORE_DEPENDENCY_UNDER_MODULE;
        }
        if first_segment(module).is_some() && first_segment(module) == first_segment(candidate) {
            return SCORE_FIRST_SEGMENT;
        }
        if last_segment(module).is_some() && last_segment(module) == last_segment(candidate) {
            return SCORE_LAST_SEGMENT;
        }
        if module.contains(candidate) || candidate.contains(module) {
            return SCORE_SUBSTRING;
        }
        0
    }

    /// `path` equals `prefix` or continues it with a `.` or the ecosystem separator.
    fn is_at_or_under(&self, path: &str, prefix: &str) -> bool {
        has_segment_prefix(path, prefix, '.')
            || has_segment_prefix(path, prefix, self.ecosystem.separator())
    }

    /// Like [`Self::is_at_or_under`], but `path` must be strictly longer.
    fn is_under(&self, path: &str, prefix: &str) -> bool {
        path != prefix && self.is_at_or_under(path, prefix)
    }
}

/// Resolves `module` with the generic profile (no standard-library filter).
pub fn attribute(module: &str, declared: &DeclaredDependencySet) -> Option<AttributionResult> {
    Attributor::default().attribute(module, declared)
}

fn first_segment(path: &str) -> Option<&str> {
    path.split(SEGMENT_SEPARATORS).next().filter(|s| !s.is_empty())
}

fn last_segment(path: &str) -> Option<&str> {
    path.rsplit(SEGMENT_SEPARATORS).next().filter(|s| !s.is_empty())
}

/// Derives a dependency id from the first two segments of `module`.
fn fallback_id(module: &str) -> String {
    let trimmed = module.trim_matches(['.', '/']);
    let end = trimmed
        .match_indices(['.', '/'])
        .nth(1)
        .map_or(trimmed.len(), |(idx, _)| idx);
    normalize(&trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(ids: &[&str]) -> DeclaredDependencySet {
        ids.iter().collect()
    }

    #[test]
    fn test_exact_match() {
        let set = declared(&["Newtonsoft.Json", "Serilog"]);
        let result = attribute("Newtonsoft.Json", &set).unwrap();
        assert_eq!(result.dependency_id, "newtonsoft.json");
        assert!(!result.ambiguous);
        assert!(!result.undeclared);
    }

    #[test]
    fn test_exact_match_every_declared_entry() {
        let set = declared(&["acme.core", "acme.core.extensions", "serilog", "polly"]);
        for id in set.dependencies() {
            let result = attribute(id, &set).unwrap();
            assert_eq!(result.dependency_id, id);
            assert!(!result.ambiguous);
            assert!(!result.undeclared);
        }
    }

    #[test]
    fn test_first_segment_tie_is_ambiguous() {
        let set = declared(&["acme.baz", "acme.bar"]);
        let result = attribute("Acme.Foo", &set).unwrap();
        assert_eq!(result.dependency_id, "acme.bar");
        assert!(result.ambiguous);
        assert!(!result.undeclared);
    }

    #[test]
    fn test_fallback_derivation() {
        let result = attribute("Unknown.Vendor.Component", &DeclaredDependencySet::new()).unwrap();
        assert_eq!(result.dependency_id, "unknown.vendor");
        assert!(result.undeclared);
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_fallback_single_segment() {
        let result = attribute("Leftpad", &declared(&["serilog"])).unwrap();
        assert_eq!(result.dependency_id, "leftpad");
        assert!(result.undeclared);
    }

    #[test]
    fn test_fallback_slash_path() {
        let attributor = Attributor::new(Ecosystem::Go);
        let result = attributor
            .attribute("github.com/acme/widgets/v2", &DeclaredDependencySet::new())
            .unwrap();
        assert_eq!(result.dependency_id, "github.com");
        assert!(result.undeclared);
    }

    #[test]
    fn test_prefix_beats_segment_match() {
        let set = declared(&["newtonsoft.json", "newtonsoft.json.schema"]);
        let result = attribute("Newtonsoft.Json.Linq", &set).unwrap();
        assert_eq!(result.dependency_id, "newtonsoft.json");
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_score_table() {
        let a = Attributor::default();
        assert_eq!(a.score("acme.foo", "acme.foo"), SCORE_EXACT);
        assert_eq!(a.score("acme.foo.bar", "acme.foo"), SCORE_MODULE_UNDER_DEPENDENCY);
        assert_eq!(a.score("acme", "acme.foo"), SCORE_DEPENDENCY_UNDER_MODULE);
        assert_eq!(a.score("acme.foo", "acme.bar"), SCORE_FIRST_SEGMENT);
        assert_eq!(a.score("vendor.json", "other.json"), SCORE_LAST_SEGMENT);
        assert_eq!(a.score("xjsonx", "json"), SCORE_SUBSTRING);
        assert_eq!(a.score("alpha", "beta"), 0);
        assert_eq!(a.score("", "beta"), 0);
    }

    #[test]
    fn test_prefix_requires_separator() {
        let a = Attributor::default();
        // "acmetools" does not live under "acme".
        assert_eq!(a.score("acmetools.x", "acme"), SCORE_SUBSTRING);
    }

    #[test]
    fn test_go_module_paths() {
        let set = declared(&["github.com/spf13/cobra", "github.com/sirupsen/logrus"]);
        let attributor = Attributor::new(Ecosystem::Go).with_local_prefixes(["example.com/shop"]);

        let result = attributor.attribute("github.com/spf13/cobra/doc", &set).unwrap();
        assert_eq!(result.dependency_id, "github.com/spf13/cobra");
        assert!(!result.ambiguous);

        assert!(attributor.attribute("net/http", &set).is_none());
        assert!(attributor.attribute("example.com/shop/internal/db", &set).is_none());
        assert!(attributor.attribute("./local", &set).is_none());
    }

    #[test]
    fn test_go_replace_alias() {
        let mut set = DeclaredDependencySet::new();
        set.insert_alias("github.com/old/client", "github.com/new/client");
        let attributor = Attributor::new(Ecosystem::Go);

        let result = attributor.attribute("github.com/old/client/api", &set).unwrap();
        assert_eq!(result.dependency_id, "github.com/new/client");
        assert!(!result.undeclared);
    }

    #[test]
    fn test_maven_coordinate_hints() {
        let mut set = DeclaredDependencySet::new();
        set.insert_maven("com.google.guava:guava");
        set.insert_maven("org.slf4j:slf4j-api");
        let attributor = Attributor::new(Ecosystem::Jvm);

        let result = attributor.attribute("com.google.guava.collect", &set).unwrap();
        assert_eq!(result.dependency_id, "com.google.guava:guava");
        assert!(!result.ambiguous);

        assert!(attributor.attribute("java.util.List", &set).is_none());
    }

    #[test]
    fn test_dotnet_filters_system_namespaces() {
        let set = declared(&["serilog"]);
        let attributor = Attributor::new(Ecosystem::DotNet);
        assert!(attributor.attribute("System.Collections.Generic", &set).is_none());
        assert!(attributor.attribute("  ", &set).is_none());
        assert!(attributor.attribute("Serilog.Events", &set).is_some());
    }

    #[test]
    fn test_python_relative_and_stdlib() {
        let set = declared(&["requests"]);
        let attributor = Attributor::new(Ecosystem::Python).with_local_prefixes(["myapp"]);
        assert!(attributor.attribute(".models", &set).is_none());
        assert!(attributor.attribute("os.path", &set).is_none());
        assert!(attributor.attribute("myapp.views", &set).is_none());
        assert_eq!(
            attributor.attribute("requests.adapters", &set).unwrap().dependency_id,
            "requests"
        );
    }

    #[test]
    fn test_only_top_two_checked_for_ambiguity() {
        // A single winner followed by a lower-ranked tie is not ambiguous.
        let set = declared(&["acme.foo", "acme.bar", "acme.baz"]);
        let result = attribute("acme.foo.core", &set).unwrap();
        assert_eq!(result.dependency_id, "acme.foo");
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_attribution_is_deterministic() {
        let set = declared(&["acme.zeta", "acme.alpha", "acme.mid"]);
        let first = attribute("Acme.Widgets", &set);
        for _ in 0..10 {
            assert_eq!(attribute("Acme.Widgets", &set), first);
        }
        assert_eq!(first.unwrap().dependency_id, "acme.alpha");
    }

    #[test]
    fn test_local_prefixes_normalized() {
        let attributor = Attributor::new(Ecosystem::DotNet).with_local_prefixes([" Contoso ", ""]);
        assert!(attributor.is_filtered("contoso.billing"));
        assert!(!attributor.is_filtered("contosoft.billing"));
    }

    #[test]
    fn test_project_root_itself_is_filtered() {
        let set = declared(&["github.com/spf13/cobra", "Serilog"]);

        let go = Attributor::new(Ecosystem::Go).with_local_prefixes(["example.com/shop"]);
        assert_eq!(go.attribute("example.com/shop", &set), None);
        assert_eq!(go.attribute("example.com/shop/internal/db", &set), None);
        assert!(go.attribute("example.com/shopfront", &set).is_some());

        let dotnet = Attributor::new(Ecosystem::DotNet).with_local_prefixes(["Contoso"]);
        assert_eq!(dotnet.attribute("Contoso", &set), None);
        assert_eq!(dotnet.attribute("Contoso.Orders", &set), None);
    }
}
