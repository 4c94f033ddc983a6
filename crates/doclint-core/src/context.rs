//! Context types for rule execution.

use crate::types::Location;
use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 0-indexed column, as stored in the syntax tree
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or the file length if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.lines().enumerate() {
            if i + 1 == line {
                return offset + column.min(line_content.len());
            }
            offset += line_content.len() + 1;
        }

        offset.min(self.content.len())
    }

    /// Builds a violation location from a tree position.
    ///
    /// The reported column is 1-indexed; the span covers the rest of the
    /// token starting at that position.
    #[must_use]
    pub fn location(&self, line: usize, column: usize) -> Location {
        let offset = self.offset_for(line, column);
        let length = self.content.get(offset..).map_or(0, |rest| {
            rest.find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len())
        });
        Location::new(self.relative_path.clone(), line, column + 1).with_span(offset, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::new(Path::new("/src/Foo.java"), content, Path::new("/src"))
    }

    #[test]
    fn test_relative_path() {
        let c = ctx("");
        assert_eq!(c.relative_path, PathBuf::from("Foo.java"));

        let outside = FileContext::new(Path::new("/other/Bar.java"), "", Path::new("/src"));
        assert_eq!(outside.relative_path, PathBuf::from("/other/Bar.java"));
    }

    #[test]
    fn test_offset_calculation() {
        let c = ctx("line1\nline2\nline3");

        assert_eq!(c.offset_for(1, 0), 0);
        assert_eq!(c.offset_for(2, 0), 6);
        assert_eq!(c.offset_for(2, 2), 8);
        assert_eq!(c.offset_for(9, 0), 17);
    }

    #[test]
    fn test_location_spans_token() {
        let c = ctx("class A {\n  void run() {}\n}");
        let loc = c.location(2, 7);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 8);
        assert_eq!(loc.offset, 17);
        assert_eq!(loc.length, 3);
        assert_eq!(loc.file, PathBuf::from("Foo.java"));
    }
}
