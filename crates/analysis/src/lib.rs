//! CodeSense Analysis
//!
//! Rule-based text analysis for the CodeSense Desktop workspace: heuristic
//! language classification, structural profiling, code/instruction
//! segmentation, and lightweight improvement suggestions.
//!
//! Everything in this crate is pure and infallible: degenerate input
//! (empty strings, prose, unterminated fences) produces well-typed empty or
//! default results, never an error. Pattern tables are explicit data so the
//! threshold and tie-break rules stay in one place.
//!
//! ## Module Organization
//!
//! - `language` - `LanguageClassifier`, the indicator-vote language detector
//! - `structure` - `StructureProfile`, derived structural metrics
//! - `extractor` - `CodeInstructionExtractor`, the line-oriented segmenter
//! - `suggestions` - `CodeAnalyzer`, per-language improvement hints

pub mod extractor;
pub mod language;
pub mod structure;
pub mod suggestions;

// ── Classification ─────────────────────────────────────────────────────
pub use language::{Classification, Language, LanguageClassifier};

// ── Structure Metrics ──────────────────────────────────────────────────
pub use structure::StructureProfile;

// ── Segmentation ───────────────────────────────────────────────────────
pub use extractor::{CodeInstructionExtractor, Extraction};

// ── Suggestions ────────────────────────────────────────────────────────
pub use suggestions::{CodeAnalysis, CodeAnalyzer, Suggestion, SuggestionKind};
