//! Tests for indentation handling: INDENT/DEDENT synthesis, blank lines,
//! tab stops, bracket joining, and indentation errors.

use taipan_lexer::diagnostics::LexError;
use taipan_lexer::lexer::{ScanResult, Scanner, Token, TokenKind};
use taipan_source::types::FileID;

fn scan(source: &str) -> ScanResult {
    Scanner::new(source.as_bytes(), FileID::new(1)).scan()
}

fn kinds(result: &ScanResult) -> Vec<TokenKind> {
    result.tokens.iter().map(Token::kind).collect()
}

fn count(result: &ScanResult, kind: TokenKind) -> usize {
    result.tokens.iter().filter(|t| t.kind == kind).count()
}

#[test]
fn test_single_block() {
    let result = scan("def f():\n    return 1\n");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result), vec![
        TokenKind::Def,
        TokenKind::Identifier,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::Colon,
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::Return,
        TokenKind::Number,
        TokenKind::Newline,
        TokenKind::Dedent,
        TokenKind::EndOfFile,
    ]);
}

#[test]
fn test_nested_blocks() {
    let source = "def test():\n    x = 1\n    if True:\n        y = 2\n    z = 3\n";
    let result = scan(source);

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Indent), 2);
    assert_eq!(count(&result, TokenKind::Dedent), 2);
}

#[test]
fn test_multiple_dedents_at_once() {
    let source = "if a:\n    if b:\n        x\ny\n";
    let result = scan(source);

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    // Both levels close before `y`
    let y_index = result.tokens.iter().position(|t| t.lexeme == "y").unwrap();
    assert_eq!(kinds[y_index - 1], TokenKind::Dedent);
    assert_eq!(kinds[y_index - 2], TokenKind::Dedent);
}

#[test]
fn test_dedents_flushed_at_eof() {
    let result = scan("if a:\n    if b:\n        x\n");

    assert_eq!(count(&result, TokenKind::Indent), 2);
    assert_eq!(count(&result, TokenKind::Dedent), 2);
    assert_eq!(result.tokens.last().map(Token::kind), Some(TokenKind::EndOfFile));
}

#[test]
fn test_blank_lines_preserve_indent() {
    let result = scan("if a:\n    x = 1\n\n\n    y = 2\n");

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Indent), 1);
    assert_eq!(count(&result, TokenKind::Dedent), 1);
    // No NEWLINE tokens for the blank lines themselves
    assert_eq!(count(&result, TokenKind::Newline), 3);
}

#[test]
fn test_comment_lines_preserve_indent() {
    let result = scan("if a:\n    x = 1\n# back at the margin\n    y = 2\n");

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Indent), 1);
    assert_eq!(count(&result, TokenKind::Dedent), 1);
}

#[test]
fn test_tab_advances_to_next_stop() {
    // A tab after two spaces lands on column stop 8, same as a full tab
    let with_spaces = scan("if a:\n  \tx = 1\nif b:\n\ty = 2\n");

    assert!(with_spaces.errors.is_empty());
    assert_eq!(count(&with_spaces, TokenKind::Indent), 2);
    assert_eq!(count(&with_spaces, TokenKind::Dedent), 2);
}

#[test]
fn test_form_feed_resets_count() {
    // A form feed resets the running indent, so this line is at the margin
    let result = scan("x = 1\n    \u{c}y = 2\n");

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Indent), 0);
}

#[test]
fn test_inconsistent_dedent_is_reported() {
    let result = scan("if a:\n        x\n    y\n");

    assert!(matches!(
        result.errors[0],
        LexError::InconsistentIndentation { expected: 0, found: 4, .. }
    ));
    // Scanning continues; the stream still balances
    assert_eq!(count(&result, TokenKind::Indent), count(&result, TokenKind::Dedent));
    assert_eq!(result.tokens.last().map(Token::kind), Some(TokenKind::EndOfFile));
}

#[test]
fn test_brackets_join_lines() {
    let result = scan("x = (\n    1 +\n    2\n)\n");

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Indent), 0);
    assert_eq!(count(&result, TokenKind::Dedent), 0);
    // Only the final logical line emits NEWLINE
    assert_eq!(count(&result, TokenKind::Newline), 1);
}

#[test]
fn test_comment_inside_brackets() {
    let result = scan("x = [\n    1,  # first\n    2,\n]\n");

    assert!(result.errors.is_empty());
    assert_eq!(count(&result, TokenKind::Newline), 1);
}

#[test]
fn test_empty_input() {
    let result = scan("");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result), vec![TokenKind::EndOfFile]);
}

#[test]
fn test_only_blank_and_comment_lines() {
    let result = scan("\n\n# nothing here\n   \n");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result), vec![TokenKind::EndOfFile]);
}

#[test]
fn test_indent_tokens_are_zero_width() {
    let result = scan("if a:\n    x\n");

    for token in &result.tokens {
        if matches!(token.kind, TokenKind::Indent | TokenKind::Dedent | TokenKind::EndOfFile) {
            assert!(token.span.is_empty(), "{:?} should be zero-width", token.kind);
            assert!(token.lexeme.is_empty());
        }
    }
}

#[test]
fn test_eof_span_is_at_final_position() {
    let result = scan("ab\n");

    let eof = result.tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EndOfFile);
    assert_eq!(eof.span.start, eof.span.end);
    assert_eq!(eof.span.start.line, 2);
    assert_eq!(eof.span.start.column, 1);
}
