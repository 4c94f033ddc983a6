//! Lookup of documentation comments by declaration line.

use crate::tree::{CommentStyle, CompilationUnit, RawComment};
use std::collections::BTreeMap;

/// Index of the Javadoc comments of one file, keyed by their last line.
#[derive(Debug)]
pub struct CommentIndex<'a> {
    lines: Vec<&'a str>,
    javadoc_by_end: BTreeMap<usize, &'a RawComment>,
}

impl<'a> CommentIndex<'a> {
    /// Builds the index for a parsed file and its source text.
    #[must_use]
    pub fn new(unit: &'a CompilationUnit, content: &'a str) -> Self {
        let javadoc_by_end = unit
            .comments_of(CommentStyle::Block)
            .filter(|c| c.is_javadoc())
            .map(|c| (c.end_line, c))
            .collect();
        Self {
            lines: content.lines().collect(),
            javadoc_by_end,
        }
    }

    /// Returns the Javadoc comment attached to a declaration starting at `line`.
    ///
    /// Blank lines and `//` comment lines between the comment and the
    /// declaration are skipped.
    #[must_use]
    pub fn javadoc_before(&self, line: usize) -> Option<&'a RawComment> {
        let mut candidate = line.checked_sub(1)?;
        while candidate > 1 && self.is_skippable(candidate) {
            candidate -= 1;
        }
        self.javadoc_by_end.get(&candidate).copied()
    }

    fn is_skippable(&self, line: usize) -> bool {
        self.lines.get(line - 1).map_or(true, |text| {
            let text = text.trim_start();
            text.is_empty() || text.starts_with("//")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_with(comments: Vec<RawComment>) -> CompilationUnit {
        CompilationUnit {
            types: Vec::new(),
            comments,
            line_count: 0,
        }
    }

    #[test]
    fn finds_adjacent_javadoc() {
        let src = "/**\n * Doc.\n */\nclass A {}\n";
        let unit = unit_with(vec![RawComment::new(
            CommentStyle::Block,
            1,
            0,
            "/**\n * Doc.\n */",
        )]);
        let index = CommentIndex::new(&unit, src);
        let doc = index.javadoc_before(4).expect("javadoc");
        assert_eq!(doc.start_line, 1);
    }

    #[test]
    fn skips_blank_and_line_comment_lines() {
        let src = "/** Doc. */\n\n// note\nclass A {}\n";
        let unit = unit_with(vec![
            RawComment::new(CommentStyle::Block, 1, 0, "/** Doc. */"),
            RawComment::new(CommentStyle::Line, 3, 0, "// note"),
        ]);
        let index = CommentIndex::new(&unit, src);
        assert!(index.javadoc_before(4).is_some());
    }

    #[test]
    fn ignores_plain_block_comments() {
        let src = "/* not doc */\nclass A {}\n";
        let unit = unit_with(vec![RawComment::new(
            CommentStyle::Block,
            1,
            0,
            "/* not doc */",
        )]);
        let index = CommentIndex::new(&unit, src);
        assert!(index.javadoc_before(2).is_none());
    }

    #[test]
    fn code_between_detaches_comment() {
        let src = "/** Doc. */\nint x;\nclass A {}\n";
        let unit = unit_with(vec![RawComment::new(
            CommentStyle::Block,
            1,
            0,
            "/** Doc. */",
        )]);
        let index = CommentIndex::new(&unit, src);
        assert!(index.javadoc_before(3).is_none());
        assert!(index.javadoc_before(1).is_none());
    }
}
