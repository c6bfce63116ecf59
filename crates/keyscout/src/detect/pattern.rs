//! Trailing-pattern mining: catches partner codes that vary per value
//! (`TX1AB`, `TX2CD`) where no single suffix literal scores high enough.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::profile::ColumnValueSet;

use super::{BestCandidate, TransformDetector, TransformKind, Transformation};

/// Tries a fixed list of trailing-code regexes against BO values.
///
/// For every value matching a regex, the matched trailing text is stripped
/// and the remainder checked for partner membership; matches are aggregated
/// per distinct stripped literal, and the highest-scoring literal wins.
pub struct PatternDetector {
    patterns: Vec<Regex>,
    accept: f64,
}

impl PatternDetector {
    /// Compile the configured trailing patterns.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let patterns = config
            .trailing_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            accept: config.pattern_accept,
        })
    }
}

impl TransformDetector for PatternDetector {
    fn name(&self) -> &'static str {
        "pattern"
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

        for regex in &self.patterns {
            let mut matches: IndexMap<String, usize> = IndexMap::new();
            for value in bo_values {
                let Some(found) = regex.find(value) else { continue };
                let stem = &value[..found.start()];
                if partner_values.contains(stem) {
                    *matches.entry(found.as_str().to_string()).or_insert(0) += 1;
                }
            }
            for (code, count) in matches {
                best.offer(&code, count as f64 / total);
            }
        }

        best.take(TransformKind::RemovePattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PatternDetector {
        PatternDetector::new(&DetectorConfig::default()).unwrap()
    }

    fn value_set(values: &[&str]) -> ColumnValueSet {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_detects_two_letter_code() {
        let bo = value_set(&["500100AB", "500200AB", "500300AB"]);
        let partner = value_set(&["500100", "500200", "500300"]);

        let t = detector().detect(&bo, &partner).unwrap();
        assert_eq!(t.kind, TransformKind::RemovePattern);
        assert_eq!(t.pattern, "AB");
    }

    #[test]
    fn test_varying_codes_pick_most_frequent() {
        let bo = value_set(&["500100AB", "500200AB", "500300XY"]);
        let partner = value_set(&["500100", "500200", "500300"]);

        let t = detector().detect(&bo, &partner).unwrap();
        assert_eq!(t.pattern, "AB"); // 2/3 beats 1/3
    }

    #[test]
    fn test_two_digit_code() {
        let bo = value_set(&["REF-A01", "REF-B01"]);
        let partner = value_set(&["REF-A", "REF-B"]);

        let t = detector().detect(&bo, &partner).unwrap();
        assert_eq!(t.pattern, "01");
    }

    #[test]
    fn test_no_membership_no_transformation() {
        let bo = value_set(&["500100AB", "500200AB"]);
        let partner = value_set(&["900900", "900901"]);

        assert!(detector().detect(&bo, &partner).is_none());
    }

    #[test]
    fn test_whole_value_match_leaves_empty_stem() {
        // The stem "" is never a member of a value set, so a pattern that
        // swallows the whole value cannot fire.
        let bo = value_set(&["AB", "CD"]);
        let partner = value_set(&["AB", "CD"]);

        assert!(detector().detect(&bo, &partner).is_none());
    }
}
