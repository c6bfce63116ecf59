//! Engine configuration.
//!
//! Every heuristic constant used by the engine lives here: signal weights,
//! keyword tables, acceptance thresholds, detector pattern lists. Scoring
//! behavior can be tuned without touching any control flow.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KeyscoutError, Result};

/// Weights combining the four pair signals into a base confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalWeights {
    /// Weight of the column-name similarity signal.
    pub name_similarity: f64,
    /// Weight of the Jaccard value-overlap signal.
    pub value_overlap: f64,
    /// Weight of the format-compatibility signal.
    pub format_compatibility: f64,
    /// Weight of the uniqueness signal.
    pub uniqueness: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            name_similarity: 0.3,
            value_overlap: 0.4,
            format_compatibility: 0.2,
            uniqueness: 0.1,
        }
    }
}

/// Keyword lists used by the name-similarity ladder.
///
/// All matching is case-insensitive substring containment. The exports this
/// engine was built for mix French and English headers, so both spellings
/// appear in the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    /// Marker words identifying an explicit key column.
    pub key_markers: Vec<String>,
    /// Amount keywords.
    pub amount: Vec<String>,
    /// Phone keywords.
    pub phone: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            key_markers: vec!["key".into(), "cle".into()],
            amount: vec!["montant".into(), "amount".into()],
            phone: vec!["phone".into(), "tel".into(), "msisdn".into()],
        }
    }
}

/// Scores returned by each rung of the name-similarity ladder.
///
/// Rungs are evaluated in the order they are declared; the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRuleScores {
    /// Exact (case-insensitive) name match.
    pub exact: f64,
    /// Both names carry a key marker word.
    pub both_key_marker: f64,
    /// Both names contain "id".
    pub both_id: f64,
    /// Both names contain "transaction".
    pub both_transaction: f64,
    /// Both names carry an amount keyword.
    pub both_amount: f64,
    /// Both names carry a phone keyword.
    pub both_phone: f64,
    /// Both names contain "date".
    pub both_date: f64,
    /// Both names contain "operation".
    pub both_operation: f64,
    /// Either name contains "id".
    pub either_id: f64,
    /// Either name contains "ref".
    pub either_ref: f64,
    /// Either name contains "num".
    pub either_num: f64,
    /// No rule matched.
    pub fallback: f64,
}

impl Default for NameRuleScores {
    fn default() -> Self {
        Self {
            exact: 1.0,
            both_key_marker: 0.95,
            both_id: 0.9,
            both_transaction: 0.9,
            both_amount: 0.9,
            both_phone: 0.9,
            both_date: 0.8,
            both_operation: 0.8,
            either_id: 0.6,
            either_ref: 0.6,
            either_num: 0.5,
            fallback: 0.1,
        }
    }
}

/// Minimum fraction of values that must match a pattern before a column is
/// classified under the corresponding format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatThresholds {
    pub numeric: f64,
    pub date: f64,
    pub phone: f64,
    pub alphanumeric: f64,
}

impl Default for FormatThresholds {
    fn default() -> Self {
        Self {
            numeric: 0.8,
            date: 0.5,
            phone: 0.7,
            alphanumeric: 0.8,
        }
    }
}

/// Compatibility scores awarded when both columns share a format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatScores {
    pub numeric: f64,
    pub date: f64,
    pub phone: f64,
    pub alphanumeric: f64,
    /// Score when no format is shared.
    pub fallback: f64,
}

impl Default for FormatScores {
    fn default() -> Self {
        Self {
            numeric: 0.9,
            date: 0.9,
            phone: 0.8,
            alphanumeric: 0.7,
            fallback: 0.3,
        }
    }
}

/// Signal thresholds above which a reason tag is attached to a suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonThresholds {
    pub name_similarity: f64,
    pub value_overlap: f64,
    pub format_compatibility: f64,
    pub uniqueness: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            name_similarity: 0.8,
            value_overlap: 0.3,
            format_compatibility: 0.7,
            uniqueness: 0.8,
        }
    }
}

/// Configuration for the transformation detector chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Shortest suffix/prefix length tried, in characters.
    pub min_affix_len: usize,
    /// Longest suffix/prefix length tried, in characters.
    pub max_affix_len: usize,
    /// Minimum match fraction for a suffix candidate.
    ///
    /// Intentionally lower than `prefix_accept`: trailing partner codes are
    /// far more common in the observed exports than leading ones, so the
    /// suffix detector is allowed to fire on weaker evidence.
    pub suffix_accept: f64,
    /// Minimum match fraction for a prefix candidate.
    pub prefix_accept: f64,
    /// Minimum match fraction for a trailing-pattern candidate.
    pub pattern_accept: f64,
    /// Regexes describing trailing code shapes tried by the pattern
    /// detector, in priority order.
    pub trailing_patterns: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_affix_len: 2,
            max_affix_len: 10,
            suffix_accept: 0.1,
            prefix_accept: 0.3,
            pattern_accept: 0.1,
            trailing_patterns: vec![
                r"[A-Za-z]{2}$".into(),
                r"[A-Za-z]{3}$".into(),
                r"[0-9]{2}$".into(),
                r"[A-Za-z0-9]{2,4}$".into(),
                r"[A-Za-z0-9]{1,5}$".into(),
            ],
        }
    }
}

/// Configuration for [`KeyAnalysisEngine`](crate::KeyAnalysisEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Signal weights for the base confidence.
    pub weights: SignalWeights,
    /// Keyword lists for name similarity.
    pub keywords: KeywordTable,
    /// Scores for the name-similarity ladder.
    pub name_scores: NameRuleScores,
    /// Column format classification thresholds.
    pub format_thresholds: FormatThresholds,
    /// Format compatibility scores.
    pub format_scores: FormatScores,
    /// Thresholds for reason tags.
    pub reason_thresholds: ReasonThresholds,
    /// Transformation detector settings.
    pub detector: DetectorConfig,
    /// Confidence bonus when a transformation is found.
    pub transformation_bonus: f64,
    /// Pairs scoring at or below this floor are discarded outright.
    pub candidate_floor: f64,
    /// Pairs must exceed this to be reported as suggestions.
    pub report_floor: f64,
    /// Maximum number of suggestions (and recommended keys) returned.
    pub max_suggestions: usize,
    /// Maximum sample values attached to each suggestion.
    pub max_sample_values: usize,
    /// Optional row cap: analyze only the first N rows of each dataset.
    pub max_rows: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            keywords: KeywordTable::default(),
            name_scores: NameRuleScores::default(),
            format_thresholds: FormatThresholds::default(),
            format_scores: FormatScores::default(),
            reason_thresholds: ReasonThresholds::default(),
            detector: DetectorConfig::default(),
            transformation_bonus: 0.3,
            candidate_floor: 0.3,
            report_floor: 0.5,
            max_suggestions: 5,
            max_sample_values: 3,
            max_rows: None,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot work with.
    ///
    /// The default configuration always validates.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let weights = [
            w.name_similarity,
            w.value_overlap,
            w.format_compatibility,
            w.uniqueness,
        ];
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(KeyscoutError::Config(
                "signal weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(KeyscoutError::Config(
                "at least one signal weight must be positive".into(),
            ));
        }
        if !self.transformation_bonus.is_finite() || self.transformation_bonus < 0.0 {
            return Err(KeyscoutError::Config(
                "transformation bonus must be finite and non-negative".into(),
            ));
        }
        if !self.candidate_floor.is_finite() || !self.report_floor.is_finite() {
            return Err(KeyscoutError::Config(
                "confidence floors must be finite".into(),
            ));
        }
        if self.max_suggestions == 0 {
            return Err(KeyscoutError::Config(
                "max_suggestions must be at least 1".into(),
            ));
        }
        if self.detector.min_affix_len == 0 {
            return Err(KeyscoutError::Config(
                "min_affix_len must be at least 1".into(),
            ));
        }
        if self.detector.min_affix_len > self.detector.max_affix_len {
            return Err(KeyscoutError::Config(format!(
                "min_affix_len {} exceeds max_affix_len {}",
                self.detector.min_affix_len, self.detector.max_affix_len
            )));
        }
        for pattern in &self.detector.trailing_patterns {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}
