//! Message catalog shared by the rules.
//!
//! Every finding carries a stable key and ordered arguments. The text shown
//! to users is rendered from the templates below, with `{0}`, `{1}`, ...
//! replaced by the arguments.

use doclint_core::{FileContext, Severity, Violation};

/// A comment of this style is not allowed anywhere.
pub const COMMENT_NEVER_ALLOWED: &str = "comment.neverAllowed";
/// A comment of this style is not allowed in its context.
pub const COMMENT_NOT_ALLOWED: &str = "comment.notAllowed";
/// A comment does not match the format configured for its context.
pub const COMMENT_BAD_FORMAT: &str = "comment.badFormat";

/// Declaration without a Javadoc comment.
pub const JAVADOC_MISSING: &str = "javadoc.missing";
/// A required tag is missing.
pub const JAVADOC_EXPECTED_TAG: &str = "javadoc.expectedTag";
/// A tag refers to something that is not declared.
pub const JAVADOC_UNUSED_TAG: &str = "javadoc.unusedTag";
/// A tag is not used by any check.
pub const JAVADOC_UNUSED_TAG_GENERAL: &str = "javadoc.unusedTagGeneral";
/// Method without a `@return` tag.
pub const JAVADOC_RETURN_EXPECTED: &str = "javadoc.return.expected";
/// Repeated tag.
pub const JAVADOC_DUPLICATE_TAG: &str = "javadoc.duplicateTag";
/// `{@inheritDoc}` where nothing can be inherited.
pub const JAVADOC_INVALID_INHERIT_DOC: &str = "javadoc.invalidInheritDoc";
/// Parameters documented both with tags and narratively.
pub const JAVADOC_MIXED_STYLE: &str = "javadoc.mixedStyle";
/// A documented class cannot be resolved.
pub const JAVADOC_CLASS_INFO: &str = "javadoc.classInfo";
/// Block tag with a name Javadoc does not know.
pub const JAVADOC_UNKNOWN_TAG: &str = "javadoc.unknownTag";
/// Type comment lacks a required tag.
pub const TYPE_MISSING_TAG: &str = "type.missingTag";
/// Type comment tag does not match its configured format.
pub const TYPE_TAG_FORMAT: &str = "type.tagFormat";

fn template(key: &str) -> &'static str {
    match key {
        COMMENT_NEVER_ALLOWED => "'{0}' comments are not allowed anywhere.",
        COMMENT_NOT_ALLOWED => "'{0}' comments are not allowed here.",
        COMMENT_BAD_FORMAT => "Badly formatted '{0}' comment.",
        JAVADOC_MISSING => "Missing a Javadoc comment.",
        JAVADOC_EXPECTED_TAG => "Expected {0} tag for '{1}'.",
        JAVADOC_UNUSED_TAG => "Unused {0} tag for '{1}'.",
        JAVADOC_UNUSED_TAG_GENERAL => "Unused Javadoc tag.",
        JAVADOC_RETURN_EXPECTED => "Expected @return tag.",
        JAVADOC_DUPLICATE_TAG => "Duplicate {0} tag.",
        JAVADOC_INVALID_INHERIT_DOC => "Invalid use of the {@inheritDoc} tag.",
        JAVADOC_MIXED_STYLE => "Parameters are documented with both @param tags and narrative text.",
        JAVADOC_CLASS_INFO => "Unable to get class information for {0} tag '{1}'.",
        JAVADOC_UNKNOWN_TAG => "Unknown tag '{0}'.",
        TYPE_MISSING_TAG => "Type Javadoc comment is missing an {0} tag.",
        TYPE_TAG_FORMAT => "Type Javadoc tag {0} must match pattern '{1}'.",
        _ => "{0}",
    }
}

/// Renders the message for a key and its arguments.
#[must_use]
pub fn render(key: &str, arguments: &[String]) -> String {
    let mut text = template(key).to_string();
    for (i, arg) in arguments.iter().enumerate() {
        text = text.replace(&format!("{{{i}}}"), arg);
    }
    text
}

/// Identity of the rule reporting a finding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reporter {
    pub code: &'static str,
    pub name: &'static str,
    pub severity: Severity,
}

impl Reporter {
    /// Builds a keyed violation at a tree position.
    pub(crate) fn violation(
        self,
        ctx: &FileContext,
        line: usize,
        column: usize,
        key: &str,
        arguments: Vec<String>,
    ) -> Violation {
        Violation::new(
            self.code,
            self.name,
            self.severity,
            ctx.location(line, column),
            render(key, &arguments),
        )
        .with_message_key(key, arguments)
    }
}
