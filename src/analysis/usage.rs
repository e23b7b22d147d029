//! Lexical usage counting for imported aliases.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::warn;

use crate::model::ImportBinding;

/// Counts how often each imported alias is used in `text`.
///
/// Every distinct, non-empty, non-wildcard local alias is matched on word
/// boundaries. The number of bindings that declare the alias is subtracted
/// so the import statement itself is not a use; the result never drops
/// below zero. Wildcard and side-effect bindings have no entry.
///
/// # Example
///
/// ```rust
/// use usagescope::analysis::count_usage;
/// use usagescope::model::{ImportBinding, Location};
///
/// let text = "import com.acme.Logger;\nLogger.info(\"a\");\nLogger.warn(\"b\");\n";
/// let bindings = vec![ImportBinding::named("com.acme", "Logger", "Logger", Location::new("App.java", 1, 1))];
///
/// let usage = count_usage(text, &bindings);
/// assert_eq!(usage["Logger"], 2);
/// ```
pub fn count_usage(text: &str, bindings: &[ImportBinding]) -> BTreeMap<String, usize> {
    let mut declarations: BTreeMap<&str, usize> = BTreeMap::new();
    for binding in bindings {
        if binding.wildcard || binding.local_alias.is_empty() {
            continue;
        }
        *declarations.entry(binding.local_alias.as_str()).or_insert(0) += 1;
    }

    let mut usage = BTreeMap::new();
    for (alias, declared) in declarations {
        let occurrences = count_word(text, alias);
        usage.insert(alias.to_string(), occurrences.saturating_sub(declared));
    }
    usage
}

/// Counts word-boundary occurrences of `word` in `text`.
fn count_word(text: &str, word: &str) -> usize {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(text).count(),
        Err(err) => {
            warn!(alias = word, error = %err, "could not build usage pattern");
            0
        }
    }
}
