//! Rule restricting where comments may appear and what they look like.
//!
//! # Rationale
//!
//! Course and team style guides often restrict comments by location: no
//! `//` comments at class level, block comments inside method bodies only
//! in a given shape, and so on. This rule assigns every comment to the
//! lexical context it starts in and checks it against a per-style
//! allow-list.
//!
//! # Configuration
//!
//! - `allowed_block_formats`: descriptor for `/* */` comments
//! - `allowed_line_formats`: descriptor for `//` comments
//!
//! Both default to `package class func init prestmts stmts` (anywhere, any
//! format). See [`crate::comment_format`] for the descriptor grammar.
//!
//! # Example
//!
//! ```toml
//! [rules.internal-comments]
//! allowed_line_formats = "stmts prestmts"
//! allowed_block_formats = "package class func init prestmts stmts|/\\*\\s.*|"
//! ```

use crate::comment_format::{allow_anywhere, parse_descriptor, validate, AllowPattern};
use crate::messages::Reporter;
use crate::regions::classify;
use doclint_core::{
    CompilationUnit, ConfigError, FileContext, Rule, RuleConfig, RuleError, Severity, Violation,
};

/// Rule code for internal-comments.
pub const CODE: &str = "DL001";

/// Rule name for internal-comments.
pub const NAME: &str = "internal-comments";

/// Checks placement and format of every comment in a file.
#[derive(Debug, Clone)]
pub struct InternalComments {
    /// Custom severity.
    pub severity: Severity,
    allowed_block: Vec<AllowPattern>,
    allowed_line: Vec<AllowPattern>,
}

impl Default for InternalComments {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalComments {
    /// Creates a new rule allowing any comment anywhere.
    #[must_use]
    pub fn new() -> Self {
        let anywhere = allow_anywhere();
        Self {
            severity: Severity::Warning,
            allowed_block: anywhere.clone(),
            allowed_line: anywhere,
        }
    }

    /// Builds the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if a descriptor is malformed.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let mut rule = Self::new();
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        if let Some(desc) = config.get_opt_str("allowed_block_formats") {
            rule = rule.allowed_block_formats(desc)?;
        }
        if let Some(desc) = config.get_opt_str("allowed_line_formats") {
            rule = rule.allowed_line_formats(desc)?;
        }
        Ok(rule)
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the descriptor for `/* */` comments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the descriptor is malformed.
    pub fn allowed_block_formats(mut self, descriptor: &str) -> Result<Self, ConfigError> {
        self.allowed_block = parse_descriptor(descriptor)
            .map_err(|e| ConfigError::invalid(NAME, "allowed_block_formats", e.to_string()))?;
        Ok(self)
    }

    /// Sets the descriptor for `//` comments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the descriptor is malformed.
    pub fn allowed_line_formats(mut self, descriptor: &str) -> Result<Self, ConfigError> {
        self.allowed_line = parse_descriptor(descriptor)
            .map_err(|e| ConfigError::invalid(NAME, "allowed_line_formats", e.to_string()))?;
        Ok(self)
    }

    fn reporter(&self) -> Reporter {
        Reporter {
            code: CODE,
            name: NAME,
            severity: self.severity,
        }
    }
}

impl Rule for InternalComments {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts comment placement and format by lexical context"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(
        &self,
        ctx: &FileContext,
        unit: &CompilationUnit,
    ) -> Result<Vec<Violation>, RuleError> {
        let spans = classify(unit)?;
        let findings = validate(&spans, unit, &self.allowed_block, &self.allowed_line)?;

        let reporter = self.reporter();
        Ok(findings
            .into_iter()
            .map(|f| reporter.violation(ctx, f.line, f.column, f.key, vec![f.id.to_string()]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use doclint_core::Frontend;
    use doclint_java::JavaFrontend;
    use std::path::Path;

    fn check_code(rule: &InternalComments, code: &str) -> Vec<Violation> {
        let unit = JavaFrontend::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("Test.java"), code, Path::new("."));
        rule.check(&ctx, &unit).expect("check")
    }

    const SAMPLE: &str = r#"// header
package demo;

class A {
    // field note
    int x;

    void m(int a /* arg */)
    {
        // prologue
        x = a;
        // body
    }
}
"#;

    #[test]
    fn default_allows_everything() {
        let violations = check_code(&InternalComments::new(), SAMPLE);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn line_comments_only_in_bodies() {
        let rule = InternalComments::new()
            .allowed_line_formats("prestmts stmts")
            .expect("descriptor");
        let violations = check_code(&rule, SAMPLE);
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![1, 5]);
        assert!(violations
            .iter()
            .all(|v| v.has_key(messages::COMMENT_NOT_ALLOWED)));
        assert_eq!(violations[0].arguments, vec!["//"]);
    }

    #[test]
    fn empty_descriptor_never_allows() {
        let rule = InternalComments::new()
            .allowed_block_formats("")
            .expect("descriptor");
        let violations = check_code(&rule, SAMPLE);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].has_key(messages::COMMENT_NEVER_ALLOWED));
        assert_eq!(violations[0].location.line, 8);
        assert_eq!(violations[0].arguments, vec!["/*"]);
    }

    #[test]
    fn exact_format_passes_and_mutation_fails() {
        let rule = InternalComments::new()
            .allowed_line_formats(r"package class func init prestmts stmts|// [a-z]+ ?[a-z]*\n|")
            .expect("descriptor");
        assert!(check_code(&rule, SAMPLE).is_empty());

        let mutated = SAMPLE.replace("// body", "//body");
        let violations = check_code(&rule, &mutated);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].has_key(messages::COMMENT_BAD_FORMAT));
        assert_eq!(violations[0].location.line, 12);
    }

    #[test]
    fn anonymous_class_in_field_has_method_regions() {
        let code = "class A {\n    Runnable r = new Runnable() {\n        public void run() {\n            // inside body\n            go();\n        }\n    };\n}\n";
        let rule = InternalComments::new()
            .allowed_line_formats("stmts prestmts")
            .expect("descriptor");
        let violations = check_code(&rule, code);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn enum_constant_body_has_method_regions() {
        let code = "enum E {\n    A {\n        void f() {\n            // inside body\n            go();\n        }\n    };\n    // after constants\n    void go() {}\n}\n";
        let rule = InternalComments::new()
            .allowed_line_formats("stmts prestmts")
            .expect("descriptor");
        let violations = check_code(&rule, code);
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert_eq!(violations[0].location.line, 8);
    }

    #[test]
    fn invalid_descriptor_fails_setup() {
        let err = InternalComments::new()
            .allowed_line_formats("stmts nowhere")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
    }
}
