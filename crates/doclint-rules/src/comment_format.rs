//! Allowed comment placements and formats.
//!
//! A format descriptor is a whitespace-separated list of clauses, each a
//! context keyword optionally followed by a delimited regular expression:
//!
//! ```text
//! package class func stmts|//\s.*|
//! ```
//!
//! The delimiter is any character that is neither a word character nor
//! whitespace and does not occur in the expression. A context without an
//! expression accepts any comment; a context missing from the descriptor
//! accepts none.

use crate::messages;
use crate::regions::{ContextKind, SpanMap};
use doclint_core::tree::{CommentStyle, CompilationUnit, RawComment};
use doclint_core::RuleError;
use regex::Regex;
use thiserror::Error;

/// One clause of a format descriptor.
#[derive(Debug, Clone)]
pub struct AllowPattern {
    /// Context the clause applies to.
    pub kind: ContextKind,
    /// Required format of the whole comment text, if constrained.
    pub regex: Option<Regex>,
}

impl AllowPattern {
    /// Returns true if the comment text satisfies this clause.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(text))
    }
}

/// Allow-list used when none is configured: every context, any format.
#[must_use]
pub fn allow_anywhere() -> Vec<AllowPattern> {
    ContextKind::ALL
        .into_iter()
        .map(|kind| AllowPattern { kind, regex: None })
        .collect()
}

/// Errors in a format descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Text that is not a clause, starting at the offending character.
    #[error("trailing garbage in format: '{0}'")]
    TrailingGarbage(String),
    /// A delimited expression that does not compile.
    #[error("bad format: '{0}'")]
    BadFormat(String),
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parses a format descriptor into its clauses, in order.
///
/// # Errors
///
/// Returns [`DescriptorError`] for unknown keywords, unterminated or
/// malformed expressions, and any other text that is not a clause.
pub fn parse_descriptor(desc: &str) -> Result<Vec<AllowPattern>, DescriptorError> {
    let mut allowed = Vec::new();
    let mut rest = desc;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(allowed);
        }

        let word_len = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
        let Some(kind) = ContextKind::from_keyword(&rest[..word_len]) else {
            return Err(DescriptorError::TrailingGarbage(rest.to_string()));
        };
        rest = rest[word_len..].trim_start();

        let mut regex = None;
        if let Some(delim) = rest.chars().next().filter(|&c| !is_word(c) && !c.is_whitespace()) {
            let body = &rest[delim.len_utf8()..];
            // An unterminated expression leaves the delimiter as garbage.
            if let Some(end) = body.find(|c| c == delim || c == '\n') {
                if body[end..].starts_with(delim) {
                    let source = &body[..end];
                    regex = Some(
                        Regex::new(&format!(r"(?s)\A(?:{source})\z"))
                            .map_err(|_| DescriptorError::BadFormat(source.to_string()))?,
                    );
                    rest = &body[end + delim.len_utf8()..];
                }
            }
        }

        allowed.push(AllowPattern { kind, regex });
    }
}

/// A comment that breaks the placement rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFinding {
    /// Line of the comment start.
    pub line: usize,
    /// Column of the comment start.
    pub column: usize,
    /// Message key.
    pub key: &'static str,
    /// Delimiter of the comment style (`/*` or `//`).
    pub id: &'static str,
}

/// Checks every comment against the allow-list for its style.
///
/// Block comments are checked before line comments.
///
/// # Errors
///
/// Returns [`RuleError`] if a comment has an impossible position.
pub fn validate(
    spans: &SpanMap,
    unit: &CompilationUnit,
    allowed_block: &[AllowPattern],
    allowed_line: &[AllowPattern],
) -> Result<Vec<CommentFinding>, RuleError> {
    let mut findings = Vec::new();
    for (style, allowed) in [
        (CommentStyle::Block, allowed_block),
        (CommentStyle::Line, allowed_line),
    ] {
        for comment in unit.comments_of(style) {
            if let Some(key) = check_comment(spans, comment, allowed)? {
                findings.push(CommentFinding {
                    line: comment.start_line,
                    column: comment.start_column,
                    key,
                    id: style.delimiter(),
                });
            }
        }
    }
    Ok(findings)
}

fn check_comment(
    spans: &SpanMap,
    comment: &RawComment,
    allowed: &[AllowPattern],
) -> Result<Option<&'static str>, RuleError> {
    let context = spans.span_for(comment.start_line)?.kind;

    if allowed.is_empty() {
        return Ok(Some(messages::COMMENT_NEVER_ALLOWED));
    }

    match allowed.iter().find(|p| p.kind == context) {
        None => Ok(Some(messages::COMMENT_NOT_ALLOWED)),
        Some(pattern) if !pattern.accepts(&comment.joined_text()) => {
            Ok(Some(messages::COMMENT_BAD_FORMAT))
        }
        Some(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_every_context_unconstrained() {
        let allowed = allow_anywhere();
        let keywords: Vec<&str> = allowed.iter().map(|p| p.kind.keyword()).collect();
        assert_eq!(keywords, vec!["package", "class", "func", "init", "prestmts", "stmts"]);
        assert!(allowed.iter().all(|p| p.accepts("/* anything */")));
    }

    #[test]
    fn keywords_round_trip() {
        for kind in ContextKind::ALL {
            assert_eq!(ContextKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(ContextKind::from_keyword("method"), None);
    }

    #[test]
    fn delimited_expression() {
        let allowed = parse_descriptor(r"stmts |//\s.*\n| class").expect("parse");
        assert_eq!(allowed.len(), 2);
        assert_eq!(allowed[0].kind, ContextKind::Statements);
        assert!(allowed[0].accepts("// fine\n"));
        assert!(!allowed[0].accepts("//tight\n"));
        assert!(allowed[1].regex.is_none());
    }

    #[test]
    fn expression_must_match_whole_text() {
        let allowed = parse_descriptor("stmts#/\\*.*\\*/\\n#").expect("parse");
        assert!(allowed[0].accepts("/* one\n   two */\n"));
        assert!(!allowed[0].accepts("/* one */\ntrailing\n"));
    }

    #[test]
    fn empty_descriptor_is_empty() {
        assert!(parse_descriptor("   ").expect("parse").is_empty());
    }

    #[test]
    fn unknown_keyword_is_garbage() {
        assert_eq!(
            parse_descriptor("class method").expect_err("garbage"),
            DescriptorError::TrailingGarbage("method".to_string())
        );
        assert!(parse_descriptor("stmtsx").is_err());
    }

    #[test]
    fn unterminated_expression_is_garbage() {
        assert_eq!(
            parse_descriptor("stmts |abc").expect_err("garbage"),
            DescriptorError::TrailingGarbage("|abc".to_string())
        );
    }

    #[test]
    fn invalid_expression_is_bad_format() {
        assert_eq!(
            parse_descriptor("stmts |(unclosed|").expect_err("bad"),
            DescriptorError::BadFormat("(unclosed".to_string())
        );
    }

    #[test]
    fn descriptor_errors_are_std_errors() {
        fn parse_boxed(desc: &str) -> Result<usize, Box<dyn std::error::Error>> {
            Ok(parse_descriptor(desc)?.len())
        }

        let err = parse_boxed("stmts |abc").expect_err("garbage");
        assert_eq!(err.to_string(), "trailing garbage in format: '|abc'");
        assert_eq!(
            DescriptorError::BadFormat("(x".to_string()).to_string(),
            "bad format: '(x'"
        );
    }
}
