//! Additional rules for lexical analysis in the Taipan language.
//!
//! This module contains helper functions for the scanner, including:
//! - The hard and soft keyword tables
//! - Identifier character classification
//! - The post-scan merge pass for `is not` / `not in`

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use unicode_xid::UnicodeXID;

use super::cursor::Cursor;
use super::token::{Literal, Token, TokenKind};

/// Get a global map of hard keywords for efficient lookups.
///
/// `True`, `False`, and `None` are listed under both the lowercase and the
/// conventional capitalized spelling; every other keyword is
/// lowercase-only and matching is case-sensitive.
pub fn hard_keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        let _ = map.insert("and", TokenKind::And);
        let _ = map.insert("as", TokenKind::As);
        let _ = map.insert("assert", TokenKind::Assert);
        let _ = map.insert("async", TokenKind::Async);
        let _ = map.insert("await", TokenKind::Await);
        let _ = map.insert("break", TokenKind::Break);
        let _ = map.insert("class", TokenKind::Class);
        let _ = map.insert("component", TokenKind::Component);
        let _ = map.insert("continue", TokenKind::Continue);
        let _ = map.insert("def", TokenKind::Def);
        let _ = map.insert("del", TokenKind::Del);
        let _ = map.insert("elif", TokenKind::Elif);
        let _ = map.insert("else", TokenKind::Else);
        let _ = map.insert("except", TokenKind::Except);
        let _ = map.insert("finally", TokenKind::Finally);
        let _ = map.insert("for", TokenKind::For);
        let _ = map.insert("from", TokenKind::From);
        let _ = map.insert("global", TokenKind::Global);
        let _ = map.insert("if", TokenKind::If);
        let _ = map.insert("import", TokenKind::Import);
        let _ = map.insert("in", TokenKind::In);
        let _ = map.insert("is", TokenKind::Is);
        let _ = map.insert("lambda", TokenKind::Lambda);
        let _ = map.insert("match", TokenKind::Match);
        let _ = map.insert("nonlocal", TokenKind::Nonlocal);
        let _ = map.insert("not", TokenKind::Not);
        let _ = map.insert("or", TokenKind::Or);
        let _ = map.insert("pass", TokenKind::Pass);
        let _ = map.insert("raise", TokenKind::Raise);
        let _ = map.insert("return", TokenKind::Return);
        let _ = map.insert("try", TokenKind::Try);
        let _ = map.insert("view", TokenKind::View);
        let _ = map.insert("while", TokenKind::While);
        let _ = map.insert("with", TokenKind::With);
        let _ = map.insert("yield", TokenKind::Yield);

        // Keyword literals: both spellings accepted
        let _ = map.insert("True", TokenKind::True);
        let _ = map.insert("true", TokenKind::True);
        let _ = map.insert("False", TokenKind::False);
        let _ = map.insert("false", TokenKind::False);
        let _ = map.insert("None", TokenKind::None);
        let _ = map.insert("none", TokenKind::None);

        map
    })
}

/// Get a global map of soft keywords for efficient lookups
pub fn soft_keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        let _ = map.insert("case", TokenKind::Case);
        let _ = map.insert("type", TokenKind::Type);

        map
    })
}

/// Resolve an identifier lexeme to its keyword kind, if any.
///
/// Soft keywords still come back as their keyword kinds here; the parser
/// decides from context whether they act as identifiers.
#[must_use]
pub fn lookup_keyword(lexeme: &str) -> Option<TokenKind> {
    hard_keywords().get(lexeme).or_else(|| soft_keywords().get(lexeme)).copied()
}

/// Check if a character may start an identifier.
#[must_use]
pub fn is_identifier_start(c: char) -> bool { c == '_' || UnicodeXID::is_xid_start(c) }

/// Check if a character may continue an identifier.
#[must_use]
pub fn is_identifier_continue(c: char) -> bool { c == '_' || UnicodeXID::is_xid_continue(c) }

/// Merge adjacent `is`/`not` and `not`/`in` token pairs.
///
/// Runs once over the finished token vector. The merged token spans both
/// words and its lexeme is the exact source text between them, including
/// the whitespace. The pass is idempotent: merged kinds are not inputs to
/// any further merge.
#[must_use]
pub fn merge_compound_keywords(tokens: Vec<Token>, cursor: &Cursor) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let compound = match (token.kind, iter.peek().map(Token::kind)) {
            (TokenKind::Is, Some(TokenKind::Not)) => Some(TokenKind::IsNot),
            (TokenKind::Not, Some(TokenKind::In)) => Some(TokenKind::NotIn),
            _ => Option::None,
        };

        match compound {
            Some(kind) => {
                // peek() above guarantees the partner token exists
                let Some(second) = iter.next() else { break };
                let span = token.span.combine(&second.span);
                let lexeme = cursor.slice(span.start.offset, span.end.offset);
                merged.push(Token::new(kind, lexeme, Literal::None, span));
            }
            Option::None => merged.push(token),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(lookup_keyword("def"), Some(TokenKind::Def));
        assert_eq!(lookup_keyword("Def"), Option::None);
        assert_eq!(lookup_keyword("view"), Some(TokenKind::View));
        assert_eq!(lookup_keyword("component"), Some(TokenKind::Component));
    }

    #[test]
    fn keyword_literals_accept_both_spellings() {
        assert_eq!(lookup_keyword("True"), Some(TokenKind::True));
        assert_eq!(lookup_keyword("true"), Some(TokenKind::True));
        assert_eq!(lookup_keyword("None"), Some(TokenKind::None));
        assert_eq!(lookup_keyword("NONE"), Option::None);
    }

    #[test]
    fn soft_keywords_resolve_to_keyword_kinds() {
        assert_eq!(lookup_keyword("case"), Some(TokenKind::Case));
        assert_eq!(lookup_keyword("type"), Some(TokenKind::Type));
    }

    #[test]
    fn identifier_classification_accepts_unicode_letters() {
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('π'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_continue('1'));
        assert!(!is_identifier_continue('-'));
    }
}
