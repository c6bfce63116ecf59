//! Pair scoring: compatibility signals for one (BO column, Partner column)
//! candidate pair.

use serde::{Deserialize, Serialize};

use crate::config::{FormatScores, KeywordTable, NameRuleScores, SignalWeights};
use crate::profile::{ColumnProfile, ColumnValueSet, FormatSignature};

/// The four independent signals computed for a candidate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalScores {
    /// Keyword-based column-name similarity.
    pub name_similarity: f64,
    /// Jaccard index of the two value sets.
    pub value_overlap: f64,
    /// Format compatibility of the two columns.
    pub format_compatibility: f64,
    /// Average distinct-value ratio; a key should nearly-uniquely identify
    /// a record.
    pub uniqueness: f64,
}

impl SignalScores {
    /// Combine the signals into a base confidence using the given weights.
    pub fn base_confidence(&self, weights: &SignalWeights) -> f64 {
        weights.name_similarity * self.name_similarity
            + weights.value_overlap * self.value_overlap
            + weights.format_compatibility * self.format_compatibility
            + weights.uniqueness * self.uniqueness
    }
}

/// Computes compatibility signals for a pair of profiled columns.
#[derive(Debug, Clone)]
pub struct PairScorer {
    keywords: KeywordTable,
    name_scores: NameRuleScores,
    format_scores: FormatScores,
}

impl PairScorer {
    /// Create a scorer from its configuration pieces.
    pub fn new(
        keywords: KeywordTable,
        name_scores: NameRuleScores,
        format_scores: FormatScores,
    ) -> Self {
        Self {
            keywords,
            name_scores,
            format_scores,
        }
    }

    /// Compute all four signals for a BO/Partner column pair.
    pub fn score(&self, bo: &ColumnProfile, partner: &ColumnProfile) -> SignalScores {
        SignalScores {
            name_similarity: self.name_similarity(&bo.name, &partner.name),
            value_overlap: Self::value_overlap(&bo.values, &partner.values),
            format_compatibility: self.format_compatibility(bo.format, partner.format),
            uniqueness: Self::uniqueness(bo, partner),
        }
    }

    /// Keyword ladder for column-name similarity; first matching rule wins.
    ///
    /// Matching is case-insensitive substring containment, so `"ID Client"`
    /// and `"external id"` both count as containing `"id"`.
    pub fn name_similarity(&self, bo_name: &str, partner_name: &str) -> f64 {
        let a = bo_name.to_lowercase();
        let b = partner_name.to_lowercase();
        let s = &self.name_scores;

        let both = |word: &str| a.contains(word) && b.contains(word);
        let either = |word: &str| a.contains(word) || b.contains(word);
        let both_any = |words: &[String]| {
            words.iter().any(|w| a.contains(w.as_str()))
                && words.iter().any(|w| b.contains(w.as_str()))
        };

        if a == b {
            s.exact
        } else if both_any(&self.keywords.key_markers) {
            s.both_key_marker
        } else if both("id") {
            s.both_id
        } else if both("transaction") {
            s.both_transaction
        } else if both_any(&self.keywords.amount) {
            s.both_amount
        } else if both_any(&self.keywords.phone) {
            s.both_phone
        } else if both("date") {
            s.both_date
        } else if both("operation") {
            s.both_operation
        } else if either("id") {
            s.either_id
        } else if either("ref") {
            s.either_ref
        } else if either("num") {
            s.either_num
        } else {
            s.fallback
        }
    }

    /// Jaccard index `|A∩B| / |A∪B|`; 0 when either set is empty.
    pub fn value_overlap(a: &ColumnValueSet, b: &ColumnValueSet) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let intersection = a.iter().filter(|v| b.contains(v.as_str())).count();
        let union = a.len() + b.len() - intersection;
        intersection as f64 / union as f64
    }

    /// Score how well the two column formats agree.
    pub fn format_compatibility(&self, a: FormatSignature, b: FormatSignature) -> f64 {
        let s = &self.format_scores;
        if a.numeric && b.numeric {
            s.numeric
        } else if a.date && b.date {
            s.date
        } else if a.phone && b.phone {
            s.phone
        } else if a.alphanumeric && b.alphanumeric {
            s.alphanumeric
        } else {
            s.fallback
        }
    }

    /// Average of the distinct-value ratios of both columns.
    pub fn uniqueness(bo: &ColumnProfile, partner: &ColumnProfile) -> f64 {
        let ratio = |profile: &ColumnProfile| {
            if profile.row_count == 0 {
                0.0
            } else {
                profile.values.len() as f64 / profile.row_count as f64
            }
        };
        (ratio(bo) + ratio(partner)) / 2.0
    }
}

impl Default for PairScorer {
    fn default() -> Self {
        Self::new(
            KeywordTable::default(),
            NameRuleScores::default(),
            FormatScores::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> PairScorer {
        PairScorer::default()
    }

    fn value_set(values: &[&str]) -> ColumnValueSet {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn profile(name: &str, values: &[&str], row_count: usize) -> ColumnProfile {
        let values = value_set(values);
        let format = crate::profile::ColumnProfiler::default().classify_format(&values);
        ColumnProfile {
            name: name.to_string(),
            values,
            format,
            row_count,
        }
    }

    #[test]
    fn test_name_exact_match() {
        assert_eq!(scorer().name_similarity("Numéro Trans GU", "numéro trans gu"), 1.0);
    }

    #[test]
    fn test_name_both_key_marker() {
        assert_eq!(scorer().name_similarity("Cle Rapprochement", "Partner Key"), 0.95);
    }

    #[test]
    fn test_name_both_id() {
        assert_eq!(scorer().name_similarity("ID Transaction", "External id"), 0.9);
    }

    #[test]
    fn test_name_both_amount() {
        assert_eq!(scorer().name_similarity("Montant", "Amount"), 0.9);
    }

    #[test]
    fn test_name_both_transaction() {
        assert_eq!(scorer().name_similarity("Transaction BO", "Ref transaction"), 0.9);
    }

    #[test]
    fn test_name_both_operation() {
        assert_eq!(scorer().name_similarity("Operation GU", "Type operation"), 0.8);
    }

    #[test]
    fn test_name_both_phone() {
        assert_eq!(scorer().name_similarity("Tel Client", "MSISDN"), 0.9);
    }

    #[test]
    fn test_name_both_date() {
        assert_eq!(scorer().name_similarity("Date Operation GU", "Settlement date"), 0.8);
    }

    #[test]
    fn test_name_either_id() {
        assert_eq!(scorer().name_similarity("ID Interne", "Code Partenaire"), 0.6);
    }

    #[test]
    fn test_name_either_ref() {
        assert_eq!(scorer().name_similarity("Reference", "Code"), 0.6);
    }

    #[test]
    fn test_name_either_num() {
        assert_eq!(scorer().name_similarity("Numero Piece", "Code"), 0.5);
    }

    #[test]
    fn test_name_fallback() {
        assert_eq!(scorer().name_similarity("Agence", "Code RECO"), 0.1);
    }

    #[test]
    fn test_name_ladder_priority_over_lone_rules() {
        // Both sides contain "id" so the shared-id rung wins over either-id.
        assert_eq!(scorer().name_similarity("id reference", "partner id"), 0.9);
    }

    #[test]
    fn test_overlap_jaccard() {
        let a = value_set(&["TX1", "TX2", "TX3", "TX4"]);
        let b = value_set(&["TX3", "TX4", "TX5", "TX6"]);
        // 2 shared over 6 total distinct
        let overlap = PairScorer::value_overlap(&a, &b);
        assert!((overlap - 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_identical_sets() {
        let a = value_set(&["TX1", "TX2"]);
        assert_eq!(PairScorer::value_overlap(&a, &a.clone()), 1.0);
    }

    #[test]
    fn test_overlap_empty_set_is_zero() {
        let a = value_set(&[]);
        let b = value_set(&["TX1"]);
        assert_eq!(PairScorer::value_overlap(&a, &b), 0.0);
    }

    #[test]
    fn test_format_compatibility_order() {
        let s = scorer();
        let numeric_phone = FormatSignature {
            numeric: true,
            phone: true,
            ..Default::default()
        };
        // numeric pairing takes precedence over the shared phone format
        assert_eq!(s.format_compatibility(numeric_phone, numeric_phone), 0.9);

        let alnum = FormatSignature {
            alphanumeric: true,
            ..Default::default()
        };
        assert_eq!(s.format_compatibility(alnum, alnum), 0.7);
        assert_eq!(s.format_compatibility(alnum, FormatSignature::default()), 0.3);
    }

    #[test]
    fn test_format_compatibility_phone_pair() {
        // A column of 9-15 digit values mixed with a few shorter ones can
        // classify as phone without classifying as numeric.
        let phone_only = FormatSignature {
            phone: true,
            ..Default::default()
        };
        assert_eq!(scorer().format_compatibility(phone_only, phone_only), 0.8);
    }

    #[test]
    fn test_uniqueness_average() {
        let bo = profile("a", &["1", "2", "3", "4"], 4); // 1.0
        let partner = profile("b", &["1", "2"], 4); // 0.5
        assert!((PairScorer::uniqueness(&bo, &partner) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_uniqueness_zero_rows() {
        let bo = profile("a", &[], 0);
        let partner = profile("b", &[], 0);
        assert_eq!(PairScorer::uniqueness(&bo, &partner), 0.0);
    }

    #[test]
    fn test_base_confidence_weighting() {
        let scores = SignalScores {
            name_similarity: 1.0,
            value_overlap: 0.5,
            format_compatibility: 0.9,
            uniqueness: 1.0,
        };
        let base = scores.base_confidence(&SignalWeights::default());
        assert!((base - (0.3 + 0.2 + 0.18 + 0.1)).abs() < 1e-9);
    }
}
