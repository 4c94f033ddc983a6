//! Java front-end using Tree-sitter.

use doclint_core::{CompilationUnit, Frontend, FrontendError};
use tracing::debug;
use tree_sitter::{Language, Parser};

use crate::lower::{first_error, Lowering};

/// Parses Java source files into doclint syntax trees.
pub struct JavaFrontend {
    language: Language,
}

impl JavaFrontend {
    /// Creates a new Java front-end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for JavaFrontend {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, source: &str) -> Result<CompilationUnit, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| FrontendError::Language {
                language: "java".to_string(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| FrontendError::Parse {
            line: 1,
            message: "parser produced no tree".to_string(),
        })?;
        let root = tree.root_node();

        if let Some(node) = first_error(root) {
            let line = node.start_position().row + 1;
            debug!(line, kind = node.kind(), "Java syntax error");
            let message = if node.is_missing() {
                format!("missing '{}'", node.kind())
            } else {
                "unexpected input".to_string()
            };
            return Err(FrontendError::Parse { line, message });
        }

        let line_count = source.lines().count().max(1);
        Ok(Lowering::new(source).unit(root, line_count))
    }
}
