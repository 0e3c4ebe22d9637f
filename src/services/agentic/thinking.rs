//! Thinking Step Synthesis
//!
//! Builds the structured prompt that asks the backend for 3-5 reasoning
//! steps, parses the reply into [`ThinkingStep`]s, and supplies the fixed
//! fallback sequence used whenever the backend reply is missing or
//! unparseable. The fallback needs no network access, so the thinking phase
//! can always proceed.

use serde::Deserialize;

use codesense_core::{GenerationContext, ThinkingStep};

/// Build the prompt requesting a parseable list of thinking steps.
pub fn build_thinking_prompt(context: &GenerationContext) -> String {
    format!(
        r#"You are an intelligent coding assistant analyzing a user's request.

Context:
- Language: {}
- Code Length: {} lines
- User Request: {}
- Code Context: {}

Please provide 3-5 thinking steps that show your analysis process. Each step should be:
1. Brief and clear
2. Show logical reasoning
3. Identify key aspects to address

Format as JSON array with objects containing: {{ "step": number, "message": "thinking step", "focus": "what this step addresses" }}"#,
        context.language, context.lines, context.user_request, context.code_preview
    )
}

/// The fixed fallback sequence: exactly four steps covering structure,
/// intent, improvement areas, and solution approach.
pub fn fallback_steps() -> Vec<ThinkingStep> {
    vec![
        ThinkingStep::new(1, "Analyzing code structure and language patterns", "code analysis"),
        ThinkingStep::new(2, "Understanding user intent and requirements", "requirement analysis"),
        ThinkingStep::new(3, "Identifying key areas for improvement", "optimization planning"),
        ThinkingStep::new(4, "Preparing optimal solution approach", "solution design"),
    ]
}

/// One step as the backend is asked to produce it.
#[derive(Debug, Deserialize)]
struct RawThinkingStep {
    message: String,
    #[serde(default)]
    focus: String,
}

/// Parse a backend reply into an ordered step sequence.
///
/// Tolerates prose or markdown fences around the JSON array by parsing the
/// outermost bracketed region. Returns `None` when no non-empty sequence of
/// steps can be recovered; the caller substitutes [`fallback_steps`].
pub fn parse_thinking_steps(raw: &str) -> Option<Vec<ThinkingStep>> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }

    let parsed: Vec<RawThinkingStep> = serde_json::from_str(&raw[start..=end]).ok()?;
    if parsed.is_empty() {
        return None;
    }

    Some(
        parsed
            .into_iter()
            .enumerate()
            .map(|(index, step)| ThinkingStep {
                step: index as u32 + 1,
                message: step.message,
                focus: step.focus,
            })
            .collect(),
    )
}
