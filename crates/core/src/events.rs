//! Progress Event Types
//!
//! Provider-agnostic progress events emitted by the agentic orchestrator
//! while a run moves through its thinking and generating phases. Consumers
//! receive these over a channel; the orchestrator never awaits a consumer.

use serde::{Deserialize, Serialize};

/// A single step of the synthesized reasoning sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingStep {
    /// 1-based position in the sequence
    pub step: u32,
    /// Human-readable description of the step
    pub message: String,
    /// Short tag naming what the step addresses
    pub focus: String,
}

impl ThinkingStep {
    /// Create a step with the given position, message, and focus tag.
    pub fn new(step: u32, message: impl Into<String>, focus: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            focus: focus.into(),
        }
    }
}

/// Progress event for one orchestration run.
///
/// Events arrive strictly ordered: a `Thinking` announcement at progress 0,
/// one `Thinking` event per revealed step with monotonically increasing
/// progress and the cumulative step prefix, then a `Generating` announcement
/// at progress 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// The run is synthesizing and revealing thinking steps
    Thinking {
        /// Current status message (the latest revealed step, or the
        /// phase announcement)
        message: String,
        /// Percentage of steps revealed so far, 0-100
        progress: u8,
        /// Steps revealed so far, in order
        steps: Vec<ThinkingStep>,
    },
    /// The run is producing the final generation
    Generating {
        /// Phase status message
        message: String,
        /// Generation progress, 0-100
        progress: u8,
    },
}

impl ProgressEvent {
    /// The progress percentage carried by the event.
    pub fn progress(&self) -> u8 {
        match self {
            ProgressEvent::Thinking { progress, .. } => *progress,
            ProgressEvent::Generating { progress, .. } => *progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thinking_step_new() {
        let step = ThinkingStep::new(1, "Analyzing code structure", "code analysis");
        assert_eq!(step.step, 1);
        assert_eq!(step.focus, "code analysis");
    }

    #[test]
    fn test_progress_event_serialization() {
        let event = ProgressEvent::Thinking {
            message: "Analyzing your code and request...".to_string(),
            progress: 0,
            steps: vec![],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"state\":\"thinking\""));
        assert!(json.contains("\"progress\":0"));

        let event = ProgressEvent::Generating {
            message: "Generating your solution...".to_string(),
            progress: 0,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"state\":\"generating\""));
    }

    #[test]
    fn test_progress_accessor() {
        let event = ProgressEvent::Generating {
            message: String::new(),
            progress: 42,
        };
        assert_eq!(event.progress(), 42);
    }
}
