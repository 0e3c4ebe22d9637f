//! Generation Context
//!
//! The enriched context assembled for one orchestration run: the original
//! code, the declared/detected language, the code blocks and instructions
//! extracted from the user's prompt, and derived fields (effective request,
//! preview, content type). Built once per run and consumed by the prompt
//! builders and the generation backend.

use serde::{Deserialize, Serialize};

/// Maximum characters included in the code preview
const PREVIEW_MAX_LEN: usize = 200;

/// Caller-declared facts about the code being worked on.
///
/// Typically derived from the selection tracker's most recent analysis, but
/// callers may also construct one directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeContext {
    /// Declared language, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Line count of the code
    #[serde(default)]
    pub lines: usize,
    /// Character count of the code
    #[serde(default)]
    pub characters: usize,
}

/// Coarse shape of the user's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// The prompt contained at least one embedded code block
    CodeAndInstructions,
    /// The prompt was natural language only
    InstructionsOnly,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::CodeAndInstructions => write!(f, "code_and_instructions"),
            ContentType::InstructionsOnly => write!(f, "instructions_only"),
        }
    }
}

/// Context assembled for a single orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationContext {
    /// The code the user is working on, verbatim
    pub original_code: String,
    /// Declared or detected language ("Unknown" when absent)
    pub language: String,
    /// Line count from the declared context
    pub lines: usize,
    /// Character count from the declared context
    pub characters: usize,
    /// Code blocks extracted from the prompt, in order of appearance
    pub code_blocks: Vec<String>,
    /// Natural-language fragments extracted from the prompt, in order
    pub instructions: Vec<String>,
    /// The effective user request: all instructions joined by a space
    pub user_request: String,
    /// First 200 characters of the code, with an ellipsis when truncated
    pub code_preview: String,
    /// Whether the prompt carried embedded code
    pub content_type: ContentType,
}

impl GenerationContext {
    /// Assemble a context from the original code, the caller-declared
    /// context, and the prompt extraction result.
    pub fn assemble(
        code: &str,
        declared: &CodeContext,
        code_blocks: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        let content_type = if code_blocks.is_empty() {
            ContentType::InstructionsOnly
        } else {
            ContentType::CodeAndInstructions
        };

        Self {
            original_code: code.to_string(),
            language: declared
                .language
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            lines: declared.lines,
            characters: declared.characters,
            user_request: instructions.join(" "),
            code_preview: preview(code),
            code_blocks,
            instructions,
            content_type,
        }
    }
}

/// Build a bounded preview of the code, safe on multi-byte boundaries.
fn preview(code: &str) -> String {
    if code.chars().count() <= PREVIEW_MAX_LEN {
        code.to_string()
    } else {
        let head: String = code.chars().take(PREVIEW_MAX_LEN).collect();
        format!("{}...", head)
    }
}
