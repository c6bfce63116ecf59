//! Suffix mining: find a fixed trailing literal on BO values whose removal
//! makes them members of the partner value set.

use indexmap::IndexMap;

use crate::config::DetectorConfig;
use crate::profile::ColumnValueSet;

use super::{BestCandidate, TransformDetector, TransformKind, Transformation};

/// Mines candidate suffixes of length `min_len..=max_len` characters.
pub struct SuffixDetector {
    min_len: usize,
    max_len: usize,
    accept: f64,
}

impl SuffixDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_len: config.min_affix_len,
            max_len: config.max_affix_len,
            accept: config.suffix_accept,
        }
    }
}

impl TransformDetector for SuffixDetector {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn detect(
        &self,
        bo_values: &ColumnValueSet,
        partner_values: &ColumnValueSet,
    ) -> Option<Transformation> {
        if bo_values.is_empty() || partner_values.is_empty() {
            return None;
        }

        let total = bo_values.len() as f64;
        let mut best = BestCandidate::new(self.accept);

        for len in self.min_len..=self.max_len {
            // Count, per distinct suffix literal, how many BO values become
            // partner members once the suffix is stripped.
            let mut matches: IndexMap<&str, usize> = IndexMap::new();
            for value in bo_values {
                let Some((stem, suffix)) = split_tail(value, len) else {
                    continue;
                };
                if partner_values.contains(stem) {
                    *matches.entry(suffix).or_insert(0) += 1;
                }
            }
            for (suffix, count) in matches {
                best.offer(suffix, count as f64 / total);
            }
        }

        best.take(TransformKind::RemoveSuffix)
    }
}

/// Split off the trailing `tail_chars` characters of `value`.
///
/// Returns `None` unless the value is strictly longer than the tail, so the
/// stem is never empty. Operates on character boundaries; the exports
/// routinely carry accented text.
fn split_tail(value: &str, tail_chars: usize) -> Option<(&str, &str)> {
    let total = value.chars().count();
    if total <= tail_chars {
        return None;
    }
    let (byte, _) = value.char_indices().nth(total - tail_chars)?;
    Some((&value[..byte], &value[byte..]))
}
