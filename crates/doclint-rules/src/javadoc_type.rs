//! Rule checking the Javadoc of classes, interfaces, enums, annotations and records.
//!
//! # Rationale
//!
//! Every type should say what it is for. Outermost types additionally carry
//! authorship and version tags in many course and team conventions, and
//! their type parameters deserve the same documentation as method
//! parameters.
//!
//! # Configuration
//!
//! - `scope` / `exclude_scope`: visibility filter (default: `private` / none)
//! - `require_author` / `author_format`: `@author` must be present, and match
//!   the format if one is given
//! - `require_version` / `version_format`: same for `@version`
//! - `allow_missing_param_tags`: do not require `@param <T>` tags
//! - `allow_unknown_tags`: do not report unknown block tags
//!
//! # Example
//!
//! ```toml
//! [rules.javadoc-type]
//! author_format = "\\S"
//! ```

use crate::javadoc_tags::{block_tags, JavadocTag, TagKind};
use crate::messages::{self, Reporter};
use doclint_core::tree::{Member, RawComment, TypeDecl, TypeKind};
use doclint_core::{
    CommentIndex, CompilationUnit, ConfigError, FileContext, Rule, RuleConfig, RuleError, Scope,
    ScopeFilter, Severity, Violation,
};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for javadoc-type.
pub const CODE: &str = "DL003";

/// Rule name for javadoc-type.
pub const NAME: &str = "javadoc-type";

#[allow(clippy::expect_used)]
static TYPE_PARAM_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*<([^>]+)>.*\z").expect("valid type parameter pattern"));

/// Requirement on a tag such as `@author`.
#[derive(Debug, Clone, Default)]
pub struct TagRequirement {
    /// The tag must appear at least once.
    pub required: bool,
    /// Every occurrence must contain a match of this pattern.
    pub format: Option<Regex>,
}

impl TagRequirement {
    fn is_active(&self) -> bool {
        self.required || self.format.is_some()
    }
}

/// Checks type-level Javadoc comments.
#[derive(Debug, Clone)]
pub struct JavadocType {
    scope: ScopeFilter,
    author: TagRequirement,
    version: TagRequirement,
    allow_missing_param_tags: bool,
    allow_unknown_tags: bool,
    severity: Severity,
}

impl Default for JavadocType {
    fn default() -> Self {
        Self::new()
    }
}

fn tag_format(key: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::invalid(NAME, key, e.to_string()))
}

impl JavadocType {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: ScopeFilter::default(),
            author: TagRequirement::default(),
            version: TagRequirement::default(),
            allow_missing_param_tags: false,
            allow_unknown_tags: false,
            severity: Severity::Warning,
        }
    }

    /// Builds the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for unknown scope names and
    /// invalid formats.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let mut rule = Self::new().scope_filter(ScopeFilter::from_config(NAME, config)?);
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        rule = rule
            .require_author(config.get_bool("require_author", false))
            .require_version(config.get_bool("require_version", false))
            .allow_missing_param_tags(config.get_bool("allow_missing_param_tags", false))
            .allow_unknown_tags(config.get_bool("allow_unknown_tags", false));
        if let Some(pattern) = config.get_opt_str("author_format") {
            rule = rule.author_format(pattern)?;
        }
        if let Some(pattern) = config.get_opt_str("version_format") {
            rule = rule.version_format(pattern)?;
        }
        Ok(rule)
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the visibility filter.
    #[must_use]
    pub fn scope_filter(mut self, filter: ScopeFilter) -> Self {
        self.scope = filter;
        self
    }

    /// Sets the scope to check.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope.scope = scope;
        self
    }

    /// Requires an `@author` tag on outermost types.
    #[must_use]
    pub fn require_author(mut self, required: bool) -> Self {
        self.author.required = required;
        self
    }

    /// Requires an `@version` tag on outermost types.
    #[must_use]
    pub fn require_version(mut self, required: bool) -> Self {
        self.version.required = required;
        self
    }

    /// Sets the format every `@author` tag must contain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the pattern is invalid.
    pub fn author_format(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.author.format = Some(tag_format("author_format", pattern)?);
        Ok(self)
    }

    /// Sets the format every `@version` tag must contain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the pattern is invalid.
    pub fn version_format(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.version.format = Some(tag_format("version_format", pattern)?);
        Ok(self)
    }

    /// Allows type parameters without `@param <T>` tags.
    #[must_use]
    pub fn allow_missing_param_tags(mut self, allow: bool) -> Self {
        self.allow_missing_param_tags = allow;
        self
    }

    /// Allows block tags Javadoc does not know.
    #[must_use]
    pub fn allow_unknown_tags(mut self, allow: bool) -> Self {
        self.allow_unknown_tags = allow;
        self
    }

    fn reporter(&self) -> Reporter {
        Reporter {
            code: CODE,
            name: NAME,
            severity: self.severity,
        }
    }
}

impl Rule for JavadocType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks Javadoc of type declarations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(
        &self,
        ctx: &FileContext,
        unit: &CompilationUnit,
    ) -> Result<Vec<Violation>, RuleError> {
        let mut session = TypeSession {
            rule: self,
            ctx,
            reporter: self.reporter(),
            comments: CommentIndex::new(unit, ctx.content),
            ancestors: Vec::new(),
            violations: Vec::new(),
        };
        for decl in &unit.types {
            session.visit_type(decl);
        }
        Ok(session.violations)
    }
}

/// Per-file traversal state.
struct TypeSession<'a> {
    rule: &'a JavadocType,
    ctx: &'a FileContext<'a>,
    reporter: Reporter,
    comments: CommentIndex<'a>,
    ancestors: Vec<&'a TypeDecl>,
    violations: Vec<Violation>,
}

impl<'a> TypeSession<'a> {
    fn report(&mut self, line: usize, column: usize, key: &str, arguments: Vec<String>) {
        let violation = self
            .reporter
            .violation(self.ctx, line, column, key, arguments);
        self.violations.push(violation);
    }

    /// Visits a named type and its member types; bodies are not entered.
    fn visit_type(&mut self, decl: &'a TypeDecl) {
        if decl.kind == TypeKind::Anonymous {
            return;
        }
        self.check_type(decl);

        self.ancestors.push(decl);
        for member in &decl.members {
            if let Member::Type(nested) = member {
                self.visit_type(nested);
            }
        }
        self.ancestors.pop();
    }

    fn check_type(&mut self, decl: &TypeDecl) {
        let enclosing = self.ancestors.last().map(|parent| parent.kind);
        let declared = Scope::effective(&decl.modifiers, enclosing);
        let surrounding = Scope::surrounding(&self.ancestors);
        if !self.rule.scope.should_check(declared, surrounding) {
            return;
        }

        match self.comments.javadoc_before(decl.line) {
            None => self.report(decl.line, 0, messages::JAVADOC_MISSING, Vec::new()),
            Some(comment) if self.ancestors.is_empty() => self.check_outermost(decl, comment),
            Some(_) => {}
        }
    }

    fn check_outermost(&mut self, decl: &TypeDecl, comment: &RawComment) {
        let rule = self.rule;
        let tags = block_tags(comment);
        if !rule.allow_unknown_tags {
            for tag in &tags.unknown {
                let TagKind::Other(name) = &tag.kind else {
                    continue;
                };
                self.report(
                    tag.line,
                    tag.column,
                    messages::JAVADOC_UNKNOWN_TAG,
                    vec![name.clone()],
                );
            }
        }

        let valid = &tags.valid;
        self.check_tag(decl.line, valid, &TagKind::Author, "@author", &rule.author);
        self.check_tag(decl.line, valid, &TagKind::Version, "@version", &rule.version);

        if !rule.allow_missing_param_tags {
            for param in &decl.type_params {
                let prefix = format!("<{}>", param.text);
                let documented = valid
                    .iter()
                    .any(|tag| tag.is_param() && tag.arg().starts_with(&prefix));
                if !documented {
                    self.report(
                        decl.line,
                        0,
                        messages::TYPE_MISSING_TAG,
                        vec![format!("@param {prefix}")],
                    );
                }
            }
        }

        for tag in valid.iter().rev().filter(|tag| tag.is_param()) {
            match TYPE_PARAM_ARG.captures(tag.arg()).and_then(|caps| caps.get(1)) {
                Some(name) => {
                    let name = name.as_str().trim();
                    if !decl.type_params.iter().any(|p| p.text == name) {
                        self.report(
                            tag.line,
                            tag.column,
                            messages::JAVADOC_UNUSED_TAG,
                            vec!["@param".to_string(), format!("<{name}>")],
                        );
                    }
                }
                None => self.report(
                    tag.line,
                    tag.column,
                    messages::JAVADOC_UNUSED_TAG_GENERAL,
                    Vec::new(),
                ),
            }
        }
    }

    /// Checks presence and format of one tag, newest occurrence first.
    fn check_tag(
        &mut self,
        line: usize,
        tags: &[JavadocTag],
        kind: &TagKind,
        display: &str,
        requirement: &TagRequirement,
    ) {
        if !requirement.is_active() {
            return;
        }

        let mut count = 0;
        for tag in tags.iter().rev().filter(|tag| &tag.kind == kind) {
            count += 1;
            if let Some(format) = &requirement.format {
                if !format.is_match(tag.arg()) {
                    self.report(
                        line,
                        0,
                        messages::TYPE_TAG_FORMAT,
                        vec![display.to_string(), format.as_str().to_string()],
                    );
                }
            }
        }
        if count == 0 {
            self.report(line, 0, messages::TYPE_MISSING_TAG, vec![display.to_string()]);
        }
    }
}
