//! Structure Profile
//!
//! Derived structural metrics of a text sample: size, indentation, nesting,
//! function/class occurrence, comment density, and a bounded complexity
//! score. The complexity score is a crude monotonic proxy (line count times
//! 0.1, capped), not a real cyclomatic measure.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Ceiling for the complexity score
const COMPLEXITY_CAP: f64 = 10.0;

/// Compiled structural patterns (initialized once).
struct StructurePatterns {
    nested_blocks: Regex,
    functions: Regex,
    classes: Regex,
    comment_markers: Regex,
    function_decls: Regex,
    class_decls: Regex,
}

fn patterns() -> &'static StructurePatterns {
    static PATTERNS: OnceLock<StructurePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| StructurePatterns {
        nested_blocks: compile(r"\{[^{}]*\{[^{}]*\}"),
        functions: compile(r"function\s+\w+|def\s+\w+"),
        classes: compile(r"class\s+\w+"),
        comment_markers: compile(r"//|/\*|\*"),
        function_decls: compile(r"function\s+\w+|def\s+\w+|public\s+static\s+void"),
        class_decls: compile(r"class\s+\w+|public\s+class"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static structure pattern")
}

/// Structural metrics computed from a single text sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureProfile {
    /// Total line count
    pub lines: usize,
    /// Total character count
    pub characters: usize,
    /// Mean leading-whitespace width over non-blank lines
    pub avg_indentation: f64,
    /// Whether a brace block nests inside another brace block
    pub has_nested_blocks: bool,
    /// Occurrences of function-like declarations
    pub function_count: usize,
    /// Occurrences of class declarations
    pub class_count: usize,
    /// Fraction of lines that start a comment
    pub comment_ratio: f64,
    /// Whether any comment marker appears
    pub has_comments: bool,
    /// Whether any function-like declaration appears
    pub has_functions: bool,
    /// Whether any class declaration appears
    pub has_classes: bool,
    /// Bounded complexity score: `min(lines * 0.1, 10.0)`
    pub complexity: f64,
}

impl StructureProfile {
    /// Measure a text sample. Never fails; an empty string produces an
    /// all-zero profile.
    pub fn measure(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let patterns = patterns();
        let lines: Vec<&str> = text.split('\n').collect();
        let line_count = lines.len();

        let comment_lines = lines
            .iter()
            .filter(|line| {
                let trimmed = line.trim();
                trimmed.starts_with("//") || trimmed.starts_with("/*")
            })
            .count();

        Self {
            lines: line_count,
            characters: text.len(),
            avg_indentation: average_indentation(&lines),
            has_nested_blocks: patterns.nested_blocks.is_match(text),
            function_count: patterns.functions.find_iter(text).count(),
            class_count: patterns.classes.find_iter(text).count(),
            comment_ratio: comment_lines as f64 / line_count as f64,
            has_comments: patterns.comment_markers.is_match(text),
            has_functions: patterns.function_decls.is_match(text),
            has_classes: patterns.class_decls.is_match(text),
            complexity: (line_count as f64 * 0.1).min(COMPLEXITY_CAP),
        }
    }
}

/// Mean leading-whitespace width over non-blank lines; 0.0 when every line
/// is blank.
fn average_indentation(lines: &[&str]) -> f64 {
    let widths: Vec<usize> = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .collect();

    if widths.is_empty() {
        0.0
    } else {
        widths.iter().sum::<usize>() as f64 / widths.len() as f64
    }
}
