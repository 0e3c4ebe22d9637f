//! Agentic Services
//!
//! The two-phase generation orchestrator and its thinking-step synthesis.

pub mod orchestrator;
pub mod thinking;

pub use orchestrator::{
    AgentPhase, AgenticMetadata, AgenticOrchestrator, AgenticRequest, AgenticResponse,
    BackendFactory,
};
pub use thinking::{build_thinking_prompt, fallback_steps, parse_thinking_steps};
