//! Integration Tests Module
//!
//! Cross-crate integration tests for the CodeSense Desktop backend.
//! Tests cover the language classifier's threshold behavior, the
//! code/instruction extractor's scanning rules, the selection pipeline
//! (tracker + clipboard monitor), and the agentic orchestrator's
//! two-phase state machine.

// Language classifier threshold and tie-break tests
mod classifier_test;

// Code/instruction extraction scanning-rule tests
mod extractor_test;

// Selection tracker and clipboard monitor tests
mod selection_test;

// Agentic orchestrator state machine and fallback tests
mod agentic_test;
