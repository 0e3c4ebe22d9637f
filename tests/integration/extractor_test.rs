//! Extractor Integration Tests
//!
//! Pins the forward-scan segmentation rules: fence toggling, the
//! one-line-block rule for unfenced code-like lines, order preservation,
//! and graceful handling of degenerate input.

use codesense_analysis::CodeInstructionExtractor;

#[test]
fn test_empty_input_yields_two_empty_sequences() {
    let extractor = CodeInstructionExtractor::new();
    let result = extractor.extract("");
    assert!(result.code_blocks.is_empty());
    assert!(result.instructions.is_empty());
}

#[test]
fn test_pure_prose_yields_single_instruction() {
    let extractor = CodeInstructionExtractor::new();
    let text = "Could you review my approach?\nI want the behavior unchanged.";
    let result = extractor.extract(text);

    assert!(result.code_blocks.is_empty());
    assert_eq!(result.instructions, vec![text]);
}

#[test]
fn test_fenced_block_then_sentence() {
    let extractor = CodeInstructionExtractor::new();
    let result = extractor.extract("```js\ncode\n```\nPlease explain what this does.");

    assert_eq!(result.code_blocks, vec!["code"]);
    assert_eq!(result.instructions, vec!["Please explain what this does."]);
}

#[test]
fn test_unfenced_snippet_fragments_into_one_line_blocks() {
    // Every line of this unfenced snippet matches a single-line pattern
    // (keyword prefix, keyword prefix, bracket-only), so each becomes an
    // independent one-line block.
    let extractor = CodeInstructionExtractor::new();
    let result = extractor.extract("function calculateSum(a, b) {\n  return a + b;\n}");

    assert_eq!(
        result.code_blocks,
        vec!["function calculateSum(a, b) {", "  return a + b;", "}"]
    );
    assert!(result.instructions.is_empty());
}

#[test]
fn test_relative_order_is_reconstructible() {
    let extractor = CodeInstructionExtractor::new();
    let input = "Step one: look below\n```\nfirst()\n```\nStep two: compare with\n```\nsecond()\n```\nDone.";
    let result = extractor.extract(input);

    assert_eq!(result.code_blocks, vec!["first()", "second()"]);
    assert_eq!(
        result.instructions,
        vec!["Step one: look below", "Step two: compare with", "Done."]
    );

    // Interleaving blocks and instructions in order of appearance
    // reconstructs the source's relative ordering modulo fences/trimming.
    let rejoined = format!(
        "{}\n{}\n{}\n{}\n{}",
        result.instructions[0],
        result.code_blocks[0],
        result.instructions[1],
        result.code_blocks[1],
        result.instructions[2]
    );
    assert_eq!(
        rejoined,
        "Step one: look below\nfirst()\nStep two: compare with\nsecond()\nDone."
    );
}

#[test]
fn test_rejoined_prose_extracts_identically() {
    let extractor = CodeInstructionExtractor::new();
    let input = "First thought.\nSecond thought.";

    let first_pass = extractor.extract(input);
    let rejoined = first_pass.instructions.join("\n");
    let second_pass = extractor.extract(&rejoined);

    assert_eq!(first_pass.code_blocks, second_pass.code_blocks);
    assert_eq!(first_pass.instructions, second_pass.instructions);
}

#[test]
fn test_every_fragment_is_non_empty_after_trim() {
    let extractor = CodeInstructionExtractor::new();
    let input = "\n\n```\n\n\n```\n   \nwrap up\n```\ndangling fence";
    let result = extractor.extract(input);

    for block in &result.code_blocks {
        assert!(!block.trim().is_empty());
    }
    for instruction in &result.instructions {
        assert!(!instruction.trim().is_empty());
    }
    assert_eq!(result.code_blocks, vec!["dangling fence"]);
    assert_eq!(result.instructions, vec!["wrap up"]);
}
