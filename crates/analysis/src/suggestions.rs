//! Code Suggestions
//!
//! Lightweight per-language improvement hints layered on top of the
//! language classifier. Like the classifier these are string/regex
//! heuristics, useful as quick feedback on a captured snippet, not a linter.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::language::{Language, LanguageClassifier};

/// Maximum line width before the generic rules flag readability
const MAX_LINE_WIDTH: usize = 120;

/// Severity of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Stylistic or idiomatic improvement
    Improvement,
    /// Something that probably should not ship
    Warning,
}

/// A single suggestion anchored to a line of the analyzed code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Severity of the suggestion
    pub kind: SuggestionKind,
    /// Human-readable message
    pub message: String,
    /// 1-based line the suggestion refers to
    pub line: usize,
}

/// Result of analyzing a code sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeAnalysis {
    /// Detected language
    pub language: Language,
    /// Line count
    pub lines: usize,
    /// Character count
    pub characters: usize,
    /// Suggestions, in rule order
    pub suggestions: Vec<Suggestion>,
}

fn wildcard_import() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*import \*").expect("static pattern"))
}

/// Rule-based suggestion engine.
pub struct CodeAnalyzer {
    classifier: LanguageClassifier,
}

impl Default for CodeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeAnalyzer {
    /// Create an analyzer with its own classifier.
    pub fn new() -> Self {
        Self {
            classifier: LanguageClassifier::new(),
        }
    }

    /// Analyze a code sample: classify it and collect suggestions for the
    /// detected language, falling back to the generic rules.
    pub fn analyze(&self, code: &str) -> CodeAnalysis {
        let classification = self.classifier.classify(code);

        let suggestions = match classification.language {
            Language::JavaScript => javascript_rules(code),
            Language::Python => python_rules(code),
            Language::Java => java_rules(code),
            Language::Cpp => cpp_rules(code),
            _ => generic_rules(code),
        };

        CodeAnalysis {
            language: classification.language,
            lines: code.split('\n').count(),
            characters: code.len(),
            suggestions,
        }
    }
}

/// First 1-based line containing the needle, defaulting to 1.
fn line_of(code: &str, needle: &str) -> usize {
    code.split('\n')
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
        .unwrap_or(1)
}

fn javascript_rules(code: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if code.contains("var ") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Consider using const or let instead of var".to_string(),
            line: line_of(code, "var "),
        });
    }

    if code.contains("== ") || code.contains("!= ") {
        let line = code
            .split('\n')
            .position(|l| l.contains("== ") || l.contains("!= "))
            .map(|i| i + 1)
            .unwrap_or(1);
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Consider using strict equality (=== or !==) instead of loose equality"
                .to_string(),
            line,
        });
    }

    if code.contains("console.log") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Warning,
            message: "Remove console.log statements before production".to_string(),
            line: line_of(code, "console.log"),
        });
    }

    suggestions
}

fn python_rules(code: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if code.contains("print ") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Use print() function instead of print statement (Python 3)".to_string(),
            line: line_of(code, "print "),
        });
    }

    if let Some(index) = code
        .split('\n')
        .position(|line| wildcard_import().is_match(line))
    {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Avoid using wildcard imports (import *)".to_string(),
            line: index + 1,
        });
    }

    suggestions
}

fn java_rules(code: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if code.contains("System.out.println") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Consider using a proper logging framework instead of System.out.println"
                .to_string(),
            line: line_of(code, "System.out.println"),
        });
    }

    suggestions
}

fn cpp_rules(code: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if code.contains("using namespace std;") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Improvement,
            message: "Consider avoiding \"using namespace std;\" in header files".to_string(),
            line: line_of(code, "using namespace std;"),
        });
    }

    suggestions
}

fn generic_rules(code: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for (index, line) in code.split('\n').enumerate() {
        if line.len() > MAX_LINE_WIDTH {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Improvement,
                message: "Consider breaking long lines for better readability".to_string(),
                line: index + 1,
            });
        }

        if line.contains("TODO") || line.contains("FIXME") {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Warning,
                message: "TODO/FIXME comment found".to_string(),
                line: index + 1,
            });
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_var_and_console_log() {
        let analyzer = CodeAnalyzer::new();
        let code = "function run() {\n  var count = 0;\n  console.log(count);\n}";
        let analysis = analyzer.analyze(code);

        assert_eq!(analysis.language, Language::JavaScript);
        assert_eq!(analysis.suggestions.len(), 2);
        assert_eq!(analysis.suggestions[0].kind, SuggestionKind::Improvement);
        assert_eq!(analysis.suggestions[0].line, 2);
        assert_eq!(analysis.suggestions[1].kind, SuggestionKind::Warning);
        assert_eq!(analysis.suggestions[1].line, 3);
    }

    #[test]
    fn test_javascript_loose_equality() {
        let analyzer = CodeAnalyzer::new();
        let code = "const same = function check(a, b) {\n  return a == b;\n}";
        let analysis = analyzer.analyze(code);

        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.message.contains("strict equality")));
    }

    #[test]
    fn test_python_wildcard_import() {
        let analyzer = CodeAnalyzer::new();
        let code = "import *\ndef main():\n    print('ok')";
        let analysis = analyzer.analyze(code);

        assert_eq!(analysis.language, Language::Python);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.message.contains("wildcard") && s.line == 1));
    }

    #[test]
    fn test_generic_rules_for_unknown_language() {
        let analyzer = CodeAnalyzer::new();
        let long_line = "x".repeat(150);
        let code = format!("{}\nTODO clean this up", long_line);
        let analysis = analyzer.analyze(&code);

        assert_eq!(analysis.language, Language::Unknown);
        assert_eq!(analysis.suggestions.len(), 2);
        assert_eq!(analysis.suggestions[0].line, 1);
        assert_eq!(analysis.suggestions[1].kind, SuggestionKind::Warning);
    }

    #[test]
    fn test_clean_code_has_no_suggestions() {
        let analyzer = CodeAnalyzer::new();
        let code = "const total = items.length;\nexport function sum() {}";
        let analysis = analyzer.analyze(code);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_counts() {
        let analyzer = CodeAnalyzer::new();
        let analysis = analyzer.analyze("a\nb");
        assert_eq!(analysis.lines, 2);
        assert_eq!(analysis.characters, 3);
    }
}
