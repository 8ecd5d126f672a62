//! Permuterm index: every rotation of `token ∥ END_OF_WORD` maps back to `token`, enabling
//! wildcard queries to be answered as prefix searches over an ordered map.

use std::collections::BTreeMap;

/// A single character guaranteed absent from the word alphabet (letters, digits,
/// underscore), used to mark the rotation boundary.
pub const END_OF_WORD: char = '$';

#[derive(Debug, Clone, Default)]
pub struct PermutermIndex {
    rotations: BTreeMap<String, String>,
}

impl PermutermIndex {
    pub fn new() -> Self {
        PermutermIndex::default()
    }

    /// Insert every rotation of `token ∥ END_OF_WORD` into the index, all mapping back to
    /// `token`. Inserts `|token| + 1` entries.
    pub fn insert(&mut self, token: &str) {
        let marked: Vec<char> = token.chars().chain(std::iter::once(END_OF_WORD)).collect();
        let n = marked.len();
        for start in 0..n {
            let rotation: String = marked[start..].iter().chain(marked[..start].iter()).collect();
            self.rotations.insert(rotation, token.to_string());
        }
    }

    /// Number of rotation entries currently indexed under `token` (for invariant testing).
    pub fn rotation_count_for(&self, token: &str) -> usize {
        self.rotations.values().filter(|v| v.as_str() == token).count()
    }

    /// All distinct original tokens whose rotation set begins with `prefix`.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (rotation, original) in self.rotations.range(prefix.to_string()..) {
            if !rotation.starts_with(prefix) {
                break;
            }
            if !out.contains(original) {
                out.push(original.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }
}
