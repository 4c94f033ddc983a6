//! Extraction of tags from Javadoc comments.
//!
//! Two readers are provided. [`method_tags`] recognizes the tags the method
//! check cross-references (`@param`, `@return`, `@throws`, `@exception`,
//! `@see`, `{@inheritDoc}`), including a tag whose description starts on a
//! following line. [`block_tags`] reads every block tag at the start of a
//! line and sorts them into known and unknown names.

use doclint_core::tree::RawComment;
use regex::{Captures, Regex};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static ARG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(throws|exception|param)\s+(\S+)\s+\S*").expect("valid tag pattern")
});
#[allow(clippy::expect_used)]
static NOARG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(return|see)\s+\S").expect("valid tag pattern"));
#[allow(clippy::expect_used)]
static INHERIT_DOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*@(inheritDoc)\s*\}").expect("valid tag pattern"));
#[allow(clippy::expect_used)]
static ARG_TAG_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(throws|exception|param)\s+(\S+)\s*$").expect("valid tag pattern")
});
#[allow(clippy::expect_used)]
static NOARG_TAG_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(return|see)\s*$").expect("valid tag pattern"));
#[allow(clippy::expect_used)]
static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*/|@|[^\s*])").expect("valid tag pattern"));
#[allow(clippy::expect_used)]
static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\**\s*@([A-Za-z]+)\s").expect("valid tag pattern"));

/// Block tag names Javadoc knows.
const STANDARD_TAGS: &[&str] = &[
    "author",
    "code",
    "deprecated",
    "docRoot",
    "exception",
    "inheritDoc",
    "link",
    "linkplain",
    "literal",
    "param",
    "return",
    "see",
    "serial",
    "serialData",
    "serialField",
    "since",
    "throws",
    "value",
    "version",
];

/// Kind of a Javadoc tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `@param`
    Param,
    /// `@return`
    Return,
    /// `@throws`
    Throws,
    /// `@exception`
    Exception,
    /// `@see`
    See,
    /// `{@inheritDoc}`
    InheritDoc,
    /// `@author`
    Author,
    /// `@version`
    Version,
    /// Any other tag, by name.
    Other(String),
}

impl TagKind {
    fn from_name(name: &str) -> Self {
        match name {
            "param" => Self::Param,
            "return" => Self::Return,
            "throws" => Self::Throws,
            "exception" => Self::Exception,
            "see" => Self::See,
            "inheritDoc" => Self::InheritDoc,
            "author" => Self::Author,
            "version" => Self::Version,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A tag found in a Javadoc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavadocTag {
    /// Line of the tag.
    pub line: usize,
    /// Column of the `@`.
    pub column: usize,
    /// Kind of tag.
    pub kind: TagKind,
    /// First argument (parameter or exception name, or the rest of the line for block tags).
    pub first_arg: Option<String>,
}

impl JavadocTag {
    /// `@param`
    #[must_use]
    pub fn is_param(&self) -> bool {
        self.kind == TagKind::Param
    }

    /// `@return`
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.kind == TagKind::Return
    }

    /// `@throws` or `@exception`
    #[must_use]
    pub fn is_throws(&self) -> bool {
        matches!(self.kind, TagKind::Throws | TagKind::Exception)
    }

    /// `{@inheritDoc}`
    #[must_use]
    pub fn is_inherit_doc(&self) -> bool {
        self.kind == TagKind::InheritDoc
    }

    /// `@see` or `{@inheritDoc}`
    #[must_use]
    pub fn is_see_or_inherit_doc(&self) -> bool {
        matches!(self.kind, TagKind::See | TagKind::InheritDoc)
    }

    /// First argument, or an empty string.
    #[must_use]
    pub fn arg(&self) -> &str {
        self.first_arg.as_deref().unwrap_or("")
    }
}

/// Scanner state of [`method_tags`].
enum ScanState {
    /// Looking for a tag on the current line.
    ExpectTagLine,
    /// A tag ended its line; waiting for its description.
    InContinuation(JavadocTag),
}

/// Position of a comment line in the file.
#[derive(Clone, Copy)]
struct LinePos {
    index: usize,
    line: usize,
    start_column: usize,
}

impl LinePos {
    fn tag(self, caps: &Captures<'_>) -> Option<JavadocTag> {
        let name = caps.get(1)?;
        let mut column = name.start().saturating_sub(1);
        if self.index == 0 {
            column += self.start_column;
        }
        Some(JavadocTag {
            line: self.line,
            column,
            kind: TagKind::from_name(name.as_str()),
            first_arg: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

fn single_line_tag(text: &str, pos: LinePos) -> Option<JavadocTag> {
    [&*ARG_TAG, &*NOARG_TAG, &*INHERIT_DOC]
        .into_iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| pos.tag(&caps))
}

fn multi_line_start(text: &str, pos: LinePos) -> Option<JavadocTag> {
    [&*ARG_TAG_START, &*NOARG_TAG_START]
        .into_iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| pos.tag(&caps))
}

/// Extracts the method-level tags of a Javadoc comment, in source order.
///
/// A tag with nothing after its name waits for its description on a later
/// line. Lines holding only whitespace and `*` are skipped; reaching `*/`,
/// another `@`, or the end of the comment first drops the tag.
#[must_use]
pub fn method_tags(comment: &RawComment) -> Vec<JavadocTag> {
    let mut tags = Vec::new();
    let mut state = ScanState::ExpectTagLine;
    let mut index = 0;

    while index < comment.lines.len() {
        let text = comment.lines[index].as_str();
        let pos = LinePos {
            index,
            line: comment.start_line + index,
            start_column: comment.start_column,
        };

        state = match state {
            ScanState::ExpectTagLine => {
                index += 1;
                if let Some(tag) = single_line_tag(text, pos) {
                    tags.push(tag);
                    ScanState::ExpectTagLine
                } else if let Some(tag) = multi_line_start(text, pos) {
                    ScanState::InContinuation(tag)
                } else {
                    ScanState::ExpectTagLine
                }
            }
            ScanState::InContinuation(pending) => match CONTINUATION.find(text) {
                None => {
                    index += 1;
                    ScanState::InContinuation(pending)
                }
                Some(hit) => {
                    if hit.as_str() != "*/" && hit.as_str() != "@" {
                        tags.push(pending);
                    }
                    // Re-read this line as a tag line.
                    ScanState::ExpectTagLine
                }
            },
        };
    }

    tags
}

/// Block tags of a comment, split by whether Javadoc knows their name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTags {
    /// Tags with standard names.
    pub valid: Vec<JavadocTag>,
    /// Tags with unknown names.
    pub unknown: Vec<JavadocTag>,
}

/// Reads the block tags (`@name` at the start of a line) of a comment.
///
/// The first argument of each tag is the trimmed rest of its line, without
/// a closing `*/`.
#[must_use]
pub fn block_tags(comment: &RawComment) -> BlockTags {
    let mut result = BlockTags::default();

    for (index, text) in comment.lines.iter().enumerate() {
        let Some(caps) = BLOCK_TAG.captures(text) else {
            continue;
        };
        let Some(name) = caps.get(1) else {
            continue;
        };

        let mut content = &text[name.end()..];
        if let Some(stripped) = content.strip_suffix("*/") {
            content = stripped;
        }
        let mut column = name.start().saturating_sub(1);
        if index == 0 {
            column += comment.start_column;
        }
        let tag = JavadocTag {
            line: comment.start_line + index,
            column,
            kind: TagKind::from_name(name.as_str()),
            first_arg: Some(content.trim().to_string()),
        };

        if STANDARD_TAGS.contains(&name.as_str()) {
            result.valid.push(tag);
        } else {
            result.unknown.push(tag);
        }
    }

    result
}
