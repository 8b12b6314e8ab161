//! GEO audit engine: scores an article against ten fixed content-quality
//! heuristics and produces a deterministic 0-10 score with per-criterion
//! evidence and remediation advice.
//!
//! The pipeline is one-directional: raw HTML is normalized exactly once into
//! a noise-stripped document ([`NormalizedDoc`]), the ten checks each read
//! that shared view, and the [`Auditor`] folds their verdicts into an
//! [`AuditResult`]. Evaluation never fails — malformed input degrades to
//! failed checks, never to an error.

pub mod audit;
pub mod checks;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod types;

pub use audit::{audit_all, AuditOptions, Auditor, Thresholds};
pub use error::AuditError;
pub use lexicon::{CompiledLexicon, Lexicon};
pub use normalize::NormalizedDoc;
pub use types::{Article, AuditResult, Criterion, CriterionReport, Evidence};
