//! Key analysis engine: enumerates candidate column pairs, scores them,
//! and assembles the ranked suggestion list handed to the review UI.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::detect::{DetectorChain, Transformation};
use crate::error::Result;
use crate::profile::{ColumnProfile, ColumnProfiler};
use crate::scoring::{PairScorer, SignalScores};

/// Structured rationale tags attached to a suggestion.
///
/// The engine never produces localized prose; the presentation layer
/// renders these tags into whatever language the operator works in.
/// [`ReasonTag::label`] provides a default English rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    /// Column names are very similar.
    NameSimilar,
    /// The two columns share a meaningful fraction of values.
    ValueOverlap,
    /// The two columns carry compatible value formats.
    FormatCompatible,
    /// Values are close to unique on both sides.
    HighUniqueness,
    /// A value transformation was found that aligns the two sides.
    TransformationFound,
    /// Nothing cleared a threshold; the pair is a weak match.
    WeakCorrespondence,
}

impl ReasonTag {
    /// Default English rendering of the tag.
    pub fn label(&self) -> &'static str {
        match self {
            ReasonTag::NameSimilar => "very similar column names",
            ReasonTag::ValueOverlap => "common values detected",
            ReasonTag::FormatCompatible => "compatible formats",
            ReasonTag::HighUniqueness => "highly unique values",
            ReasonTag::TransformationFound => "value transformation detected",
            ReasonTag::WeakCorrespondence => "weak correspondence",
        }
    }
}

/// One proposed reconciliation key pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySuggestion {
    /// Column name on the BO side.
    pub bo_column: String,
    /// Column name on the partner side.
    pub partner_column: String,
    /// Heuristic confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Why this pair was proposed.
    pub reasons: Vec<ReasonTag>,
    /// Up to a few values shared verbatim by both columns.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_values: Vec<String>,
    /// Transformation needed to align BO values with partner values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Transformation>,
}

impl KeySuggestion {
    /// Ranked label shown to the operator.
    pub fn key_label(&self) -> String {
        format!("{} ↔ {}", self.bo_column, self.partner_column)
    }

    /// Render the reason tags into a single human-readable sentence.
    ///
    /// The transformation tag renders as the concrete transformation
    /// description rather than its generic label.
    pub fn reason(&self) -> String {
        self.reasons
            .iter()
            .map(|tag| match (tag, &self.transformation) {
                (ReasonTag::TransformationFound, Some(t)) => t.describe(),
                _ => tag.label().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyAnalysisResult {
    /// Ranked, filtered suggestions (best first).
    pub suggestions: Vec<KeySuggestion>,
    /// Mean confidence of the returned suggestions, 0 when empty.
    pub overall_confidence: f64,
    /// `"<bo> ↔ <partner>"` labels for the suggestions, in rank order.
    pub recommended_keys: Vec<String>,
}

impl KeyAnalysisResult {
    /// Whether the analysis found nothing worth proposing.
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Discovers reconciliation key candidates between a BO ledger export and a
/// partner settlement export.
///
/// The engine is stateless between calls: every [`analyze`](Self::analyze)
/// computes everything fresh from its two arguments and touches nothing
/// else, so identical inputs always produce identical output.
pub struct KeyAnalysisEngine {
    config: EngineConfig,
    profiler: ColumnProfiler,
    scorer: PairScorer,
    detectors: DetectorChain,
}

impl KeyAnalysisEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
            .expect("default configuration is valid")
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let profiler = ColumnProfiler::new(config.format_thresholds.clone());
        let scorer = PairScorer::new(
            config.keywords.clone(),
            config.name_scores.clone(),
            config.format_scores.clone(),
        );
        let detectors = DetectorChain::from_config(&config.detector)?;

        Ok(Self {
            config,
            profiler,
            scorer,
            detectors,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Propose reconciliation keys for a BO/partner dataset pair.
    ///
    /// Total over its inputs: degenerate datasets degrade to an empty
    /// result, never an error. Every (BO column, partner column) pair from
    /// the cross product is scored; the pool is ranked by descending
    /// confidence with ties keeping BO-outer/partner-inner iteration order.
    pub fn analyze(&self, bo: &Dataset, partner: &Dataset) -> KeyAnalysisResult {
        // Profile each column once; pairs reuse the memoized profiles.
        let bo_profiles = self.profile_columns(bo);
        let partner_profiles = self.profile_columns(partner);

        let mut pool: Vec<KeySuggestion> = Vec::new();
        for bo_profile in &bo_profiles {
            for partner_profile in &partner_profiles {
                if let Some(suggestion) = self.score_pair(bo_profile, partner_profile) {
                    pool.push(suggestion);
                }
            }
        }

        // Stable sort keeps iteration order on equal confidences.
        pool.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let suggestions: Vec<KeySuggestion> = pool
            .into_iter()
            .filter(|s| s.confidence > self.config.report_floor)
            .take(self.config.max_suggestions)
            .collect();

        let overall_confidence = if suggestions.is_empty() {
            0.0
        } else {
            suggestions.iter().map(|s| s.confidence).sum::<f64>() / suggestions.len() as f64
        };

        let recommended_keys = suggestions.iter().map(KeySuggestion::key_label).collect();

        KeyAnalysisResult {
            suggestions,
            overall_confidence,
            recommended_keys,
        }
    }

    fn profile_columns(&self, dataset: &Dataset) -> Vec<ColumnProfile> {
        dataset
            .column_names()
            .iter()
            .map(|name| self.profiler.profile(dataset, name, self.config.max_rows))
            .collect()
    }

    /// Score one candidate pair; `None` when it stays at or below the
    /// candidate floor.
    fn score_pair(
        &self,
        bo: &ColumnProfile,
        partner: &ColumnProfile,
    ) -> Option<KeySuggestion> {
        let scores = self.scorer.score(bo, partner);
        let transformation = self.detectors.detect(&bo.values, &partner.values);

        let mut confidence = scores.base_confidence(&self.config.weights);
        if transformation.is_some() {
            confidence += self.config.transformation_bonus;
        }
        // The bonus can push past 1.0; clamp so consumers can rely on the
        // documented [0, 1] range.
        let confidence = confidence.min(1.0);

        if confidence <= self.config.candidate_floor {
            return None;
        }

        let reasons = self.build_reasons(&scores, transformation.is_some());
        let sample_values = bo
            .values
            .iter()
            .filter(|v| partner.values.contains(v.as_str()))
            .take(self.config.max_sample_values)
            .cloned()
            .collect();

        Some(KeySuggestion {
            bo_column: bo.name.clone(),
            partner_column: partner.name.clone(),
            confidence,
            reasons,
            sample_values,
            transformation,
        })
    }

    /// Attach a tag for every signal clearing its threshold, in a fixed
    /// order; a pair with no tag at all is a weak correspondence.
    fn build_reasons(&self, scores: &SignalScores, has_transformation: bool) -> Vec<ReasonTag> {
        let thresholds = &self.config.reason_thresholds;
        let mut reasons = Vec::new();

        if scores.name_similarity > thresholds.name_similarity {
            reasons.push(ReasonTag::NameSimilar);
        }
        if scores.value_overlap > thresholds.value_overlap {
            reasons.push(ReasonTag::ValueOverlap);
        }
        if scores.format_compatibility > thresholds.format_compatibility {
            reasons.push(ReasonTag::FormatCompatible);
        }
        if scores.uniqueness > thresholds.uniqueness {
            reasons.push(ReasonTag::HighUniqueness);
        }
        if has_transformation {
            reasons.push(ReasonTag::TransformationFound);
        }
        if reasons.is_empty() {
            reasons.push(ReasonTag::WeakCorrespondence);
        }

        reasons
    }
}

impl Default for KeyAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
