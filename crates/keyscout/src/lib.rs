//! keyscout: reconciliation key discovery for tabular exports.
//!
//! A BO ledger export and a partner settlement export are two raw tables
//! with unrelated column names and inconsistent value encodings. Given
//! such a pair, keyscout proposes which BO column should be matched
//! against which partner column to reconcile records, and infers the value
//! transformation (suffix/prefix/pattern stripping) needed to make the two
//! sides comparable. It works purely from statistical inspection of the
//! data: no domain dictionary, no configuration of the exports.
//!
//! # Core principles
//!
//! - **Advisory**: the engine produces ranked, explained suggestions for an
//!   operator to confirm; it never runs the reconciliation itself.
//! - **Pure**: no I/O, no state between calls; identical inputs yield
//!   identical output.
//! - **Explainable**: every suggestion carries structured reason tags and
//!   sample values backing it up.
//!
//! # Example
//!
//! ```
//! use keyscout::{Dataset, KeyAnalysisEngine};
//!
//! # fn main() -> keyscout::Result<()> {
//! let bo = Dataset::from_json_str(
//!     r#"[{"ID Transaction": "TX100_CM", "Montant": 5000},
//!         {"ID Transaction": "TX101_CM", "Montant": 7500}]"#,
//! )?;
//! let partner = Dataset::from_json_str(
//!     r#"[{"External id": "TX100", "Amount": 5000},
//!         {"External id": "TX101", "Amount": 7500}]"#,
//! )?;
//!
//! let engine = KeyAnalysisEngine::new();
//! let result = engine.analyze(&bo, &partner);
//!
//! for suggestion in &result.suggestions {
//!     println!(
//!         "{} ({:.0}%): {}",
//!         suggestion.key_label(),
//!         suggestion.confidence * 100.0,
//!         suggestion.reason(),
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod detect;
pub mod engine;
pub mod error;
pub mod profile;
pub mod scoring;

pub use config::EngineConfig;
pub use dataset::{Dataset, Row};
pub use detect::{DetectorChain, TransformDetector, TransformKind, Transformation};
pub use engine::{KeyAnalysisEngine, KeyAnalysisResult, KeySuggestion, ReasonTag};
pub use error::{KeyscoutError, Result};
pub use profile::{ColumnProfile, ColumnProfiler, ColumnValueSet, FormatSignature};
pub use scoring::{PairScorer, SignalScores};
