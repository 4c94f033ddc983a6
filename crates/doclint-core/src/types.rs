//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DL002").
    pub code: String,
    /// Rule name (e.g., "javadoc-method").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Stable message key (e.g., `javadoc.expectedTag`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Ordered arguments of the message key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            message_key: None,
            arguments: Vec::new(),
        }
    }

    /// Attaches the message key and its arguments to this violation.
    #[must_use]
    pub fn with_message_key<I, S>(mut self, key: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message_key = Some(key.into());
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this violation carries the given message key.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.message_key.as_deref() == Some(key)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.message_key.as_ref().map(|key| format!("message key: {key}")),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files whose checking was aborted by a rule.
    #[serde(default)]
    pub files_aborted: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns violations carrying the given message key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.has_key(key)).collect()
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let errors = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count();
        let infos = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Info)
            .count();
        (errors, warnings, infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "DL002",
            "javadoc-method",
            severity,
            Location::new(PathBuf::from("src/Foo.java"), 42, 10),
            "Expected @param tag for 'y'.",
        )
    }

    // --- Violation message key tests ---

    #[test]
    fn violation_new_has_no_message_key() {
        let v = make_violation(Severity::Error);
        assert!(v.message_key.is_none());
        assert!(v.arguments.is_empty());
    }

    #[test]
    fn violation_with_message_key_sets_key_and_arguments() {
        let v = make_violation(Severity::Error)
            .with_message_key("javadoc.expectedTag", ["@param", "y"]);
        assert!(v.has_key("javadoc.expectedTag"));
        assert!(!v.has_key("javadoc.unusedTag"));
        assert_eq!(v.arguments, vec!["@param", "y"]);
    }

    #[test]
    fn violation_display_is_one_line() {
        let v = make_violation(Severity::Error);
        assert_eq!(
            v.to_string(),
            "src/Foo.java:42:10: error [DL002] Expected @param tag for 'y'."
        );
    }

    #[test]
    fn diagnostic_carries_code_and_key() {
        let v = make_violation(Severity::Warning)
            .with_message_key("javadoc.expectedTag", ["@param", "y"]);
        let diagnostic = ViolationDiagnostic::from(&v);
        assert_eq!(diagnostic.to_string(), "[DL002] Expected @param tag for 'y'.");
        assert_eq!(diagnostic.help.as_deref(), Some("message key: javadoc.expectedTag"));
    }

    // --- LintResult tests ---

    #[test]
    fn by_key_filters_on_message_key() {
        let mut result = LintResult::new();
        result.violations.push(
            make_violation(Severity::Warning).with_message_key("javadoc.missing", Vec::<String>::new()),
        );
        result.violations.push(make_violation(Severity::Warning));
        assert_eq!(result.by_key("javadoc.missing").len(), 1);
    }

    #[test]
    fn counts_by_severity() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Warning));
        assert_eq!(result.count_by_severity(), (1, 2, 0));
        assert!(result.has_errors());
        assert_eq!(result.by_severity(Severity::Warning).len(), 2);
    }
}
