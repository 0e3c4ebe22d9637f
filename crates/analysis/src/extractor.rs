//! Code / Instruction Extractor
//!
//! Splits a raw prompt into an ordered sequence of code blocks and an
//! ordered sequence of natural-language instructions, in a single forward
//! scan over the lines.
//!
//! Fenced regions (lines consisting of a ``` marker after trimming) toggle
//! code accumulation; the marker line itself is never captured. Outside a
//! fence, a line matching the single-line code heuristic is emitted
//! immediately as its own one-line code block, so unfenced code fragments
//! per line rather than accumulating.

use std::sync::OnceLock;

use regex::Regex;

/// Fence marker prefix for delimited code regions
const FENCE_MARKER: &str = "```";

/// Result of extracting a prompt: code blocks and instructions, each in
/// order of appearance and non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Contiguous runs of code, fenced content or single code-like lines
    pub code_blocks: Vec<String>,
    /// Contiguous runs of natural language found outside code regions
    pub instructions: Vec<String>,
}

impl Extraction {
    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.code_blocks.is_empty() && self.instructions.is_empty()
    }
}

/// Single-line code heuristics, compiled once.
fn line_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Leading declaration / control-flow / module keywords
            r"^\s*(function|class|const|let|var|if|for|while|switch|try|catch|import|export|return|console\.|require\(|import\s+)",
            // Assignment or key-value forms
            r"^\s*[a-zA-Z_$][a-zA-Z0-9_$]*\s*[=:]\s*",
            // Bracket-only lines
            r"^\s*[{}()\[\]<>]\s*$",
            // Call expressions
            r"^\s*[a-zA-Z_$][a-zA-Z0-9_$]*\s*\(",
            // Comment markers
            r"^\s*//|/\*|\*",
            // Member-call chains
            r"^\s*[a-zA-Z_$][a-zA-Z0-9_$]*\s*\.\s*[a-zA-Z_$][a-zA-Z0-9_$]*\s*\(",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Line-oriented segmenter separating code from instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeInstructionExtractor;

impl CodeInstructionExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Split the input into ordered code blocks and instructions.
    ///
    /// Never fails: empty input yields two empty sequences, and an
    /// unterminated fence flushes whatever accumulated instead of erroring.
    pub fn extract(&self, input: &str) -> Extraction {
        let mut code_blocks: Vec<String> = Vec::new();
        let mut instructions: Vec<String> = Vec::new();

        let mut in_code_block = false;
        let mut code_buffer = String::new();
        let mut instruction_buffer = String::new();

        for line in input.split('\n') {
            if line.trim().starts_with(FENCE_MARKER) {
                if in_code_block {
                    flush(&mut code_buffer, &mut code_blocks);
                    in_code_block = false;
                } else {
                    in_code_block = true;
                    flush(&mut instruction_buffer, &mut instructions);
                }
                continue;
            }

            if in_code_block {
                code_buffer.push_str(line);
                code_buffer.push('\n');
            } else if self.is_code_like(line) {
                flush(&mut instruction_buffer, &mut instructions);
                code_blocks.push(line.to_string());
            } else {
                instruction_buffer.push_str(line);
                instruction_buffer.push('\n');
            }
        }

        // Unterminated fence or trailing prose
        flush(&mut code_buffer, &mut code_blocks);
        flush(&mut instruction_buffer, &mut instructions);

        Extraction {
            code_blocks: code_blocks
                .into_iter()
                .filter(|b| !b.trim().is_empty())
                .collect(),
            instructions: instructions
                .into_iter()
                .filter(|i| !i.trim().is_empty())
                .collect(),
        }
    }

    /// Whether a single line looks like code.
    pub fn is_code_like(&self, line: &str) -> bool {
        let trimmed = line.trim();
        line_patterns().iter().any(|p| p.is_match(trimmed))
    }
}

/// Push the trimmed buffer content as a completed fragment, then clear it.
fn flush(buffer: &mut String, out: &mut Vec<String>) {
    if !buffer.trim().is_empty() {
        out.push(buffer.trim().to_string());
    }
    buffer.clear();
}
