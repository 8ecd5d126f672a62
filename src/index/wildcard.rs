//! Wildcard pattern preparation for `posting_list(token)` (§4.3).

use crate::permuterm::END_OF_WORD;

/// A wildcard pattern folded to a single `*` and split into its fixed prefix/suffix, ready
/// to be answered as a permuterm prefix search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    /// Rotated `suffix $ prefix` string to prefix-search the permuterm index with.
    pub prefix_query: String,
    prefix: String,
    suffix: String,
}

impl WildcardPattern {
    /// Fold multiple `*` into one (everything between the first and last, inclusive,
    /// collapses), then split into prefix/suffix around the remaining single `*`.
    pub fn prepare(pattern: &str) -> WildcardPattern {
        let folded = fold(pattern);
        let star = folded.find('*').expect("prepare() requires a wildcard pattern");
        let prefix = folded[..star].to_string();
        let suffix = folded[star + 1..].to_string();
        WildcardPattern {
            prefix_query: format!("{suffix}{END_OF_WORD}{prefix}"),
            prefix,
            suffix,
        }
    }

    /// Whether `candidate` (already stemmed) is compatible with this pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.len() >= self.prefix.len() + self.suffix.len()
            && candidate.starts_with(self.prefix.as_str())
            && candidate.ends_with(self.suffix.as_str())
    }
}

fn fold(pattern: &str) -> String {
    let first = pattern.find('*');
    let last = pattern.rfind('*');
    match (first, last) {
        (Some(first), Some(last)) if first != last => {
            format!("{}*{}", &pattern[..first], &pattern[last + 1..])
        }
        _ => pattern.to_string(),
    }
}
