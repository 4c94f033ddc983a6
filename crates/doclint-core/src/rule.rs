//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::tree::CompilationUnit;
use crate::types::{Severity, Violation};

/// Errors a rule raises when the tree it was handed is inconsistent.
///
/// These are internal invariant violations, not findings. The analyzer
/// aborts the file for the rule that raised one.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A node carries positions that cannot describe real source.
    #[error("Malformed syntax tree at line {line}: {reason}")]
    MalformedTree {
        /// Line of the offending node.
        line: usize,
        /// What is inconsistent about it.
        reason: String,
    },
}

impl RuleError {
    /// Creates a [`RuleError::MalformedTree`].
    #[must_use]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            line,
            reason: reason.into(),
        }
    }
}

/// A per-file lint rule over a typed syntax tree.
///
/// Rules hold read-only configuration and are reused across files. Any
/// per-file state lives in a session value created inside [`Rule::check`].
///
/// # Example
///
/// ```ignore
/// use doclint_core::{CompilationUnit, FileContext, Rule, RuleError, Violation};
///
/// pub struct NoEmptyFiles;
///
/// impl Rule for NoEmptyFiles {
///     fn name(&self) -> &'static str { "no-empty-files" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(&self, ctx: &FileContext, unit: &CompilationUnit)
///         -> Result<Vec<Violation>, RuleError>
///     {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "javadoc-method").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `unit` - The parsed syntax tree of the file
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if the tree is structurally inconsistent.
    fn check(&self, ctx: &FileContext, unit: &CompilationUnit)
        -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
