//! CodeSense Desktop - Rust Backend Library
//!
//! Backend core of the CodeSense desktop helper. It watches a
//! clipboard-like source for code the user copies, classifies and profiles
//! each sample, separates embedded code from natural-language instructions
//! in the user's request, and drives a two-phase (thinking then generating)
//! call to a pluggable text-generation backend, reporting progress over a
//! channel.
//!
//! Window presentation, shortcut registration, and OS automation live in
//! the host shell and reach this library only through the trait seams in
//! `codesense-core` (`ClipboardSource`, `SettingsStore`).

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use models::settings::{AssistantConfig, SettingsUpdate};
pub use services::agentic::{
    AgentPhase, AgenticMetadata, AgenticOrchestrator, AgenticRequest, AgenticResponse,
};
pub use services::selection::{
    MonitorConfig, SelectionAnalysis, SelectionEntry, SelectionMonitor, SelectionTracker,
    TextSample, HISTORY_CAPACITY,
};
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
