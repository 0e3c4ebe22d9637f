//! CodeSense Core
//!
//! Foundational traits and shared data types for the CodeSense Desktop
//! workspace. This crate has zero dependencies on application-level code
//! (LLM providers, storage, the selection pipeline, etc.).
//!
//! ## Module Organization
//!
//! - `context` - Generation context types (`CodeContext`, `GenerationContext`)
//! - `events` - Progress event types (`ProgressEvent`, `ThinkingStep`)
//! - `settings` - Read-only settings lookup (`SettingsStore`)
//! - `clipboard` - Clipboard source abstraction (`ClipboardSource`)
//!
//! ## Design Principles
//!
//! 1. **Minimal dependencies** - serde, async-trait, tokio sync
//! 2. **Trait-based seams** - settings and clipboard are traits so hosts and
//!    tests can substitute implementations
//! 3. **Unidirectional dependency** - this crate depends on nothing else in
//!    the workspace

pub mod clipboard;
pub mod context;
pub mod events;
pub mod settings;

// ── Context Types ──────────────────────────────────────────────────────
pub use context::{CodeContext, ContentType, GenerationContext};

// ── Progress Events ────────────────────────────────────────────────────
pub use events::{ProgressEvent, ThinkingStep};

// ── Settings ───────────────────────────────────────────────────────────
pub use settings::{SettingsStore, StaticSettings};

// ── Clipboard ──────────────────────────────────────────────────────────
pub use clipboard::{ClipboardSource, MemoryClipboard};
