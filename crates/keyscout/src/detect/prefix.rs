//! Prefix mining: the mirror image of suffix mining, for exports that
//! prepend a fixed code to the shared key.

use indexmap::IndexMap;

use crate::config::DetectorConfig;
use crate::profile::ColumnValueSet;

use super::{BestCandidate, TransformDetector, TransformKind, Transformation};

/// Mines candidate prefixes of length `min_len..=max_len` characters.
///
/// Note the acceptance floor: prefixes need a 0.3 match fraction by default
/// where suffixes only need 0.1 (see `DetectorConfig`). The asymmetry is
/// deliberate and must survive refactors.
pub struct PrefixDetector {
    min_len: usize,
    max_len: usize,
    accept: f64,
}

impl PrefixDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_len: config.min_affix_len,
            max_len: config.max_affix_len,
            accept: config.prefix_accept,
        }
    }
}

impl TransformDetector for PrefixDetector {
    fn name(&self) -> &'static str {
        "prefix"
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
            let mut matches: IndexMap<&str, usize> = IndexMap::new();
            for value in bo_values {
                let Some((prefix, stem)) = split_head(value, len) else {
                    continue;
                };
                if partner_values.contains(stem) {
                    *matches.entry(prefix).or_insert(0) += 1;
                }
            }
            for (prefix, count) in matches {
                best.offer(prefix, count as f64 / total);
            }
        }

        best.take(TransformKind::RemovePrefix)
    }
}

/// Split off the leading `head_chars` characters of `value`.
///
/// Returns `None` unless the value is strictly longer than the head.
fn split_head(value: &str, head_chars: usize) -> Option<(&str, &str)> {
    if value.chars().count() <= head_chars {
        return None;
    }
    let (byte, _) = value.char_indices().nth(head_chars)?;
    Some((&value[..byte], &value[byte..]))
}
