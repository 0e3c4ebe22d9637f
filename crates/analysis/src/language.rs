//! Language Classifier
//!
//! Heuristic, stateless language detection over raw text samples. Each
//! language carries a fixed ordered list of regex indicators (keyword forms,
//! idiomatic call patterns, file-extension hints, declaration syntax); a
//! language is a candidate once at least two indicators match, and the first
//! candidate in enumeration order wins. Ties are never broken by score.
//!
//! This is a deliberately cheap multi-pattern vote, not a grammar-based
//! detector; false negatives on short snippets are expected and acceptable.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum indicator matches before a language becomes a candidate
const MIN_INDICATOR_MATCHES: usize = 2;

/// Minimum text length before a clipboard blob is even considered code
const MIN_CONTENT_LEN: usize = 10;

/// Languages the classifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    Cpp,
    CSharp,
    TypeScript,
    Html,
    Css,
    Sql,
    Php,
    /// No language reached the indicator threshold
    Unknown,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::TypeScript => "typescript",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Php => "php",
            Language::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Result of classifying a text sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// The winning language, or `Unknown`
    pub language: Language,
    /// Number of indicator patterns that matched for the winner
    pub matches: usize,
}

impl Classification {
    /// Whether the sample was attributed to a concrete language.
    pub fn is_known(&self) -> bool {
        self.language != Language::Unknown
    }
}

/// Heuristic language classifier backed by per-language pattern tables.
pub struct LanguageClassifier {
    languages: Vec<(Language, Vec<Regex>)>,
    content_indicators: Vec<Regex>,
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageClassifier {
    /// Create a classifier with compiled pattern tables.
    ///
    /// The table order is the tie-break order: the first language whose
    /// match count reaches the threshold wins.
    pub fn new() -> Self {
        Self {
            languages: vec![
                (
                    Language::JavaScript,
                    Self::compile(&[
                        r"function\s+\w+\s*\(",
                        r"const\s+|let\s+|var\s+",
                        r"console\.log",
                        r"require\(|import\s+",
                        r"export\s+",
                        r"=>\s*\{",
                        r"\.js$",
                        r"document\.|window\.",
                    ]),
                ),
                (
                    Language::Python,
                    Self::compile(&[
                        r"def\s+\w+\s*\(",
                        r"import\s+",
                        r"from\s+\w+\s+import",
                        r"class\s+\w+",
                        r#"if\s+__name__\s*==\s*['"]__main__['"]"#,
                        r"\.py$",
                        r"print\s*\(",
                        r"self\.",
                    ]),
                ),
                (
                    Language::Java,
                    Self::compile(&[
                        r"public\s+class",
                        r"public\s+static\s+void\s+main",
                        r"import\s+java\.",
                        r"System\.out\.println",
                        r"\.java$",
                        r"private\s+|protected\s+|public\s+",
                    ]),
                ),
                (
                    Language::Cpp,
                    Self::compile(&[
                        r"#include\s+<[^>]+>",
                        r"int\s+main\s*\(",
                        r"std::",
                        r"cout\s*<<|cin\s*>>",
                        r"\.cpp$|\.h$",
                        r"namespace\s+",
                    ]),
                ),
                (
                    Language::CSharp,
                    Self::compile(&[
                        r"using\s+System",
                        r"namespace\s+",
                        r"public\s+class",
                        r"Console\.WriteLine",
                        r"\.cs$",
                        r"var\s+|string\s+|int\s+",
                    ]),
                ),
                (
                    Language::TypeScript,
                    Self::compile(&[
                        r"interface\s+\w+",
                        r"type\s+\w+",
                        r":\s*\w+[\[\]]?",
                        r"\.ts$",
                        r"import\s+type",
                        r"as\s+const",
                    ]),
                ),
                (
                    Language::Html,
                    Self::compile(&[
                        r"<!DOCTYPE\s+html>",
                        r"<html",
                        r"<head",
                        r"<body",
                        r"<div",
                        r"<script",
                        r"<style",
                        r"\.html$|\.htm$",
                    ]),
                ),
                (
                    Language::Css,
                    Self::compile(&[
                        r"\{[^}]*\}",
                        r":\s*[^;]+;",
                        r"@media",
                        r"@keyframes",
                        r"\.css$",
                        r"color:|background:|margin:|padding:",
                    ]),
                ),
                (
                    Language::Sql,
                    Self::compile(&[
                        r"SELECT\s+.+FROM",
                        r"INSERT\s+INTO",
                        r"UPDATE\s+\w+\s+SET",
                        r"DELETE\s+FROM",
                        r"CREATE\s+TABLE",
                        r"\.sql$",
                    ]),
                ),
                (
                    Language::Php,
                    Self::compile(&[
                        r"<\?php",
                        r"echo\s+",
                        r"function\s+\w+\s*\(",
                        r"\$\w+",
                        r"\.php$",
                        r"require_once|include_once",
                    ]),
                ),
            ],
            content_indicators: Self::compile(&[
                r"function\s+\w+",
                r"class\s+\w+",
                r"const\s+|let\s+|var\s+",
                r"import\s+|export\s+",
                r"def\s+\w+",
                r"public\s+class",
                r"#include",
                r"using\s+System",
                r"<!DOCTYPE",
                r"SELECT\s+.+FROM",
                r"<\?php",
                r"console\.log",
                r"print\s*\(",
                r"System\.out\.println",
                r"std::cout",
                r"Console\.WriteLine",
                r"echo\s+",
                r"\{[^}]*\}",
                r"\([^)]*\)",
                r"[;{}()\[\]<>]",
            ]),
        }
    }

    /// Classify a text sample.
    ///
    /// Degenerate input (empty string, nothing matching) never fails; it
    /// reports `Language::Unknown` with zero matches.
    pub fn classify(&self, text: &str) -> Classification {
        for (language, patterns) in &self.languages {
            let matches = patterns.iter().filter(|p| p.is_match(text)).count();
            if matches >= MIN_INDICATOR_MATCHES {
                return Classification {
                    language: *language,
                    matches,
                };
            }
        }

        Classification {
            language: Language::Unknown,
            matches: 0,
        }
    }

    /// Quick gate deciding whether a clipboard blob looks like code at all.
    ///
    /// Requires at least two distinct indicator matches, a deliberately
    /// higher bar than the per-line heuristic, so ordinary prose is not
    /// mistaken for code.
    pub fn is_code_content(&self, text: &str) -> bool {
        if text.len() < MIN_CONTENT_LEN {
            return false;
        }

        let matches = self
            .content_indicators
            .iter()
            .filter(|p| p.is_match(text))
            .count();
        matches >= MIN_INDICATOR_MATCHES
    }

    fn compile(raw: &[&str]) -> Vec<Regex> {
        raw.iter().filter_map(|p| Regex::new(p).ok()).collect()
    }
}
