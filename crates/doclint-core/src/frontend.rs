//! Language front-ends that turn source text into a [`CompilationUnit`].

use crate::tree::CompilationUnit;

/// Errors raised by a front-end.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The parser could not be set up for the language.
    #[error("Failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: String,
        /// Underlying error text.
        message: String,
    },

    /// The source could not be turned into a tree.
    #[error("Syntax error at line {line}: {message}")]
    Parse {
        /// First offending line (1-indexed).
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

/// Builds the typed syntax tree for one language.
pub trait Frontend: Send + Sync {
    /// Returns the language identifier (e.g., "java").
    fn language_id(&self) -> &'static str;

    /// Returns the file extensions handled, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses a source file.
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError`] if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<CompilationUnit, FrontendError>;
}

/// Type alias for boxed Frontend trait objects.
pub type FrontendBox = Box<dyn Frontend>;
