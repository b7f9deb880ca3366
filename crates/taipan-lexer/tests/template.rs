//! Tests for markup scanning in view bodies: tags, attributes, text,
//! interpolations, HTML comments, and view scope lifetime.

use taipan_lexer::diagnostics::LexError;
use taipan_lexer::lexer::{Literal, ScanResult, Scanner, Token, TokenKind};
use taipan_source::types::FileID;

fn scan(source: &str) -> ScanResult {
    Scanner::new(source.as_bytes(), FileID::new(1)).scan()
}

fn kinds(result: &ScanResult) -> Vec<TokenKind> {
    result.tokens.iter().map(Token::kind).collect()
}

#[test]
fn test_view_body_with_tag_text_and_interpolation() {
    let result = scan("view V():\n    <div class=\"c\">Hi {n}</div>\n");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result), vec![
        TokenKind::View,
        TokenKind::Identifier, // V
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::Colon,
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::TagOpen,
        TokenKind::Identifier, // div
        TokenKind::Identifier, // class
        TokenKind::Assign,
        TokenKind::String, // "c"
        TokenKind::TagClose,
        TokenKind::TagText, // "Hi "
        TokenKind::InterpolationStart,
        TokenKind::Identifier, // n
        TokenKind::InterpolationEnd,
        TokenKind::TagCloseStart,
        TokenKind::Identifier, // div
        TokenKind::TagClose,
        TokenKind::Newline,
        TokenKind::Dedent,
        TokenKind::EndOfFile,
    ]);

    assert_eq!(result.tokens[8].lexeme, "div");
    assert_eq!(result.tokens[11].literal, Literal::Str("c".to_string()));
    assert_eq!(result.tokens[13].lexeme, "Hi ");
    assert_eq!(result.tokens[13].literal, Literal::Str("Hi ".to_string()));
}

#[test]
fn test_self_closing_tag() {
    let result = scan("view V():\n    <br/>\n");

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    assert!(kinds.contains(&TokenKind::TagOpen));
    assert!(kinds.contains(&TokenKind::TagSelfClose));
    assert!(!kinds.contains(&TokenKind::TagClose));
}

#[test]
fn test_attribute_names_may_contain_dashes() {
    let result = scan("view V():\n    <div data-id=\"7\" aria-hidden></div>\n");

    assert!(result.errors.is_empty());
    let names: Vec<&str> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(Token::lexeme)
        .collect();
    assert!(names.contains(&"data-id"));
    assert!(names.contains(&"aria-hidden"));
}

#[test]
fn test_interpolation_in_attribute_position() {
    let result = scan("view V():\n    <img src={user.avatar} />\n");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result)[7..], [
        TokenKind::TagOpen,
        TokenKind::Identifier, // img
        TokenKind::Identifier, // src
        TokenKind::Assign,
        TokenKind::InterpolationStart,
        TokenKind::Identifier, // user
        TokenKind::Dot,
        TokenKind::Identifier, // avatar
        TokenKind::InterpolationEnd,
        TokenKind::TagSelfClose,
        TokenKind::Newline,
        TokenKind::Dedent,
        TokenKind::EndOfFile,
    ]);
}

#[test]
fn test_nested_braces_inside_interpolation() {
    let result = scan("view V():\n    <p>{ {'k': 1} }</p>\n");

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    // The dict braces stay plain braces; only the outer pair is the
    // interpolation
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::InterpolationStart).count(), 1);
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::InterpolationEnd).count(), 1);
    assert!(kinds.contains(&TokenKind::LeftBrace));
    assert!(kinds.contains(&TokenKind::RightBrace));
}

#[test]
fn test_whitespace_only_text_is_discarded() {
    let result = scan("view V():\n    <b> </b>\n");

    assert!(result.errors.is_empty());
    assert!(!kinds(&result).contains(&TokenKind::TagText));
}

#[test]
fn test_text_with_content_is_preserved_verbatim() {
    let result = scan("view V():\n    <b>  two  spaces  </b>\n");

    let text = result
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::TagText)
        .expect("tag text");
    assert_eq!(text.lexeme, "  two  spaces  ");
}

#[test]
fn test_nested_tags() {
    let result = scan("view V():\n    <ul><li>one</li></ul>\n");

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::TagOpen).count(), 2);
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::TagCloseStart).count(), 2);
}

#[test]
fn test_self_close_inside_content_returns_to_content() {
    let result = scan("view V():\n    <p>a<br/>b</p>\n");

    assert!(result.errors.is_empty());
    let texts: Vec<&str> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::TagText)
        .map(Token::lexeme)
        .collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn test_mid_expression_tag() {
    let result = scan("view V():\n    return <span/>\n");

    assert!(result.errors.is_empty());
    assert_eq!(kinds(&result)[7..], [
        TokenKind::Return,
        TokenKind::TagOpen,
        TokenKind::Identifier,
        TokenKind::TagSelfClose,
        TokenKind::Newline,
        TokenKind::Dedent,
        TokenKind::EndOfFile,
    ]);
}

#[test]
fn test_comparison_is_not_a_tag() {
    // `<` before whitespace stays a comparison even inside a view body
    let result = scan("view V():\n    x = a < b\n");

    assert!(result.errors.is_empty());
    assert!(kinds(&result).contains(&TokenKind::LessThan));
    assert!(!kinds(&result).contains(&TokenKind::TagOpen));
}

#[test]
fn test_view_scope_closes_on_dedent() {
    let result = scan("view V():\n    <b>x</b>\na <b\n");

    // After the dedent the view scope is gone, so `<b` is a comparison
    let kinds = kinds(&result);
    let dedent = kinds.iter().position(|&k| k == TokenKind::Dedent).unwrap();
    assert!(kinds[dedent..].contains(&TokenKind::LessThan));
    assert_eq!(kinds[dedent..].iter().filter(|&&k| k == TokenKind::TagOpen).count(), 0);
}

#[test]
fn test_multiline_open_tag_joins_lines() {
    let result = scan("view V():\n    <div\n        class=\"c\">x</div>\n");

    assert!(result.errors.is_empty());
    // No NEWLINE or INDENT between `<div` and the closing `>`
    let kinds = kinds(&result);
    let open = kinds.iter().position(|&k| k == TokenKind::TagOpen).unwrap();
    let close = kinds.iter().position(|&k| k == TokenKind::TagClose).unwrap();
    assert!(!kinds[open..close].contains(&TokenKind::Newline));
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::Indent).count(), 1);
}

#[test]
fn test_html_comment_is_discarded() {
    let result = scan("view V():\n    <!-- note -->\n    <b>t</b>\n");

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    // Only the real tag survives
    assert_eq!(kinds.iter().filter(|&&k| k == TokenKind::TagOpen).count(), 1);
    assert!(!kinds.contains(&TokenKind::Error));
}

#[test]
fn test_unterminated_html_comment() {
    let result = scan("view V():\n    <!-- oops\n");

    assert!(matches!(result.errors[0], LexError::UnterminatedComment { .. }));
    assert_eq!(result.tokens.last().map(Token::kind), Some(TokenKind::EndOfFile));
}

#[test]
fn test_fstring_inside_interpolation() {
    let result = scan("view V():\n    <p>{f\"n={n}\"}</p>\n");

    assert!(result.errors.is_empty());
    let kinds = kinds(&result);
    assert!(kinds.contains(&TokenKind::InterpolationStart));
    assert!(kinds.contains(&TokenKind::FStringStart));
    assert!(kinds.contains(&TokenKind::FStringExprStart));
    assert!(kinds.contains(&TokenKind::InterpolationEnd));
}

#[test]
fn test_component_is_a_keyword_without_markup_modes() {
    let result = scan("component Button(label):\n    pass\n");

    assert!(result.errors.is_empty());
    assert_eq!(result.tokens[0].kind, TokenKind::Component);
    assert!(!kinds(&result).contains(&TokenKind::TagOpen));
}
