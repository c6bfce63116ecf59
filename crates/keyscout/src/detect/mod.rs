//! Transformation detection.
//!
//! When raw overlap between two key columns is low because one export
//! carries an extra fixed code the other lacks (`TX100_CM` vs `TX100`),
//! these detectors mine the BO value set for a minimal string-stripping
//! rule that would make a large fraction of its members match partner
//! values.
//!
//! Detection strategies share the [`TransformDetector`] trait and are
//! evaluated in a fixed order by [`DetectorChain`]; the first strategy that
//! produces any accepted candidate wins, with no blending across
//! strategies. Adding a fourth strategy is a pure extension.

mod pattern;
mod prefix;
mod suffix;

pub use pattern::PatternDetector;
pub use prefix::PrefixDetector;
pub use suffix::SuffixDetector;

use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::profile::ColumnValueSet;

/// The kind of string-stripping rule detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Strip a fixed trailing literal from BO values.
    RemoveSuffix,
    /// Strip a fixed leading literal from BO values.
    RemovePrefix,
    /// Strip a trailing code matched by a pattern from BO values.
    RemovePattern,
}

/// A string transformation that, applied to BO values, improves their
/// overlap with partner values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    /// What kind of stripping to apply.
    pub kind: TransformKind,
    /// The literal text stripped.
    pub pattern: String,
}

impl Transformation {
    /// Human-readable description, used in suggestion reasons.
    pub fn describe(&self) -> String {
        match self.kind {
            TransformKind::RemoveSuffix => {
                format!("remove suffix \"{}\" from BO values", self.pattern)
            }
            TransformKind::RemovePrefix => {
                format!("remove prefix \"{}\" from BO values", self.pattern)
            }
            TransformKind::RemovePattern => {
                format!("remove trailing code \"{}\" from BO values", self.pattern)
            }
        }
    }

    /// Apply the transformation to a single value.
    ///
    /// Returns the stripped value when the rule applies, `None` otherwise.
    pub fn apply<'a>(&self, value: &'a str) -> Option<&'a str> {
        match self.kind {
            TransformKind::RemoveSuffix | TransformKind::RemovePattern => {
                value.strip_suffix(self.pattern.as_str())
            }
            TransformKind::RemovePrefix => value.strip_prefix(self.pattern.as_str()),
        }
    }
}

/// A strategy that mines BO values for one family of transformations.
pub trait TransformDetector {
    /// Short strategy name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Find the best accepted transformation of this family, if any.
    fn detect(
        &self,
        bo_values: &ColumnValueSet,
        partner_values: &ColumnValueSet,
    ) -> Option<Transformation>;
}

/// Ordered chain of detection strategies.
pub struct DetectorChain {
    detectors: Vec<Box<dyn TransformDetector + Send + Sync>>,
}

impl DetectorChain {
    /// Build the standard chain: suffix, then prefix, then trailing-pattern
    /// mining.
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        Ok(Self {
            detectors: vec![
                Box::new(SuffixDetector::new(config)),
                Box::new(PrefixDetector::new(config)),
                Box::new(PatternDetector::new(config)?),
            ],
        })
    }

    /// Append an extra strategy, evaluated after the standard ones.
    pub fn push(&mut self, detector: impl TransformDetector + Send + Sync + 'static) {
        self.detectors.push(Box::new(detector));
    }

    /// Run the strategies in order; the first accepted candidate wins.
    pub fn detect(
        &self,
        bo_values: &ColumnValueSet,
        partner_values: &ColumnValueSet,
    ) -> Option<Transformation> {
        self.detectors
            .iter()
            .find_map(|d| d.detect(bo_values, partner_values))
    }
}

impl std::fmt::Debug for DetectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.detectors.iter().map(|d| d.name()))
            .finish()
    }
}

/// Best-candidate accumulator shared by the detectors.
///
/// Keeps the strictly highest-scoring candidate, so on ties the first one
/// offered wins. Detectors offer candidates in a deterministic order
/// (ascending length or pattern priority, BO insertion order within).
pub(crate) struct BestCandidate {
    accept: f64,
    best: Option<(String, f64)>,
}

impl BestCandidate {
    pub(crate) fn new(accept: f64) -> Self {
        Self { accept, best: None }
    }

    /// Offer a candidate with its match score.
    pub(crate) fn offer(&mut self, pattern: &str, score: f64) {
        if score <= self.accept {
            return;
        }
        let improves = match &self.best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if improves {
            self.best = Some((pattern.to_string(), score));
        }
    }

    pub(crate) fn take(self, kind: TransformKind) -> Option<Transformation> {
        self.best.map(|(pattern, _)| Transformation { kind, pattern })
    }
}
