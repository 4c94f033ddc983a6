//! Rule checking the Javadoc of methods, constructors and annotation elements.
//!
//! # Rationale
//!
//! A method comment should account for everything in the signature: each
//! parameter and type parameter, each declared exception, and the result.
//! Tags that refer to nothing in the signature are just as misleading as
//! missing ones.
//!
//! # Detected Patterns
//!
//! - Declarations without a Javadoc comment
//! - Missing, unused and duplicate `@param`, `@throws`/`@exception` and
//!   `@return` tags
//! - `{@inheritDoc}` where nothing can be inherited
//! - Parameters documented both with tags and narratively
//!
//! Parameters may instead be described in running text (`allow_narrative_param_tags`)
//! by writing the name in capitals, and results by words such as "returns" or
//! "yielding" (`allow_narrative_return_tags`).
//!
//! # Configuration
//!
//! - `scope` / `exclude_scope`: visibility filter (default: `private` / none)
//! - `min_line_count`: skip bodies with at most this many lines (default: -1)
//! - `allowed_annotations`: annotations that exempt a declaration (default: `["Override"]`)
//! - `ignore_method_names`: names that need no comment, as a regex
//! - `unused_param_format`: parameter names that need no `@param`, as a regex
//! - `allow_missing_javadoc`, `allow_missing_property_javadoc`,
//!   `allow_missing_param_tags`, `allow_missing_throws_tags`,
//!   `allow_missing_return_tag`, `allow_undeclared_rte`,
//!   `allow_throws_tags_for_subclasses`, `allow_narrative_param_tags`,
//!   `allow_narrative_return_tags`, `log_load_errors` (all default: false)

use crate::class_resolver::{ClassId, ClassResolver};
use crate::javadoc_tags::{method_tags, JavadocTag};
use crate::messages::{self, Reporter};
use doclint_core::tree::{
    Ident, Member, MethodDecl, MethodKind, ReturnType, Statement, StatementKind, TypeDecl,
    Visibility,
};
use doclint_core::{
    CommentIndex, CompilationUnit, ConfigError, FileContext, Rule, RuleConfig, RuleError, Scope,
    ScopeFilter, Severity, Violation,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Rule code for javadoc-method.
pub const CODE: &str = "DL002";

/// Rule name for javadoc-method.
pub const NAME: &str = "javadoc-method";

#[allow(clippy::expect_used)]
static RETURN_NARRATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(return|yield)(s|ing)?\b").expect("valid narrative pattern")
});

/// Options of the javadoc-method rule.
#[derive(Debug, Clone)]
pub struct JavadocMethodConfig {
    /// Visibility filter.
    pub scope: ScopeFilter,
    /// Bodies with at most this many lines are skipped.
    pub min_line_count: i64,
    /// Annotations exempting a declaration from the check.
    pub allowed_annotations: Vec<String>,
    /// Method names that need no comment (full match).
    pub ignore_method_names: Option<Regex>,
    /// Parameter names that need no `@param` tag (full match).
    pub unused_param_format: Option<Regex>,
    /// Do not report missing comments.
    pub allow_missing_javadoc: bool,
    /// Do not report missing comments on simple setters and getters.
    pub allow_missing_property_javadoc: bool,
    /// Do not report missing `@param` tags.
    pub allow_missing_param_tags: bool,
    /// Do not report missing `@throws` tags.
    pub allow_missing_throws_tags: bool,
    /// Do not report a missing `@return` tag.
    pub allow_missing_return_tag: bool,
    /// Accept `@throws` for undeclared unchecked exceptions.
    pub allow_undeclared_rte: bool,
    /// Accept `@throws` for subclasses of declared exceptions.
    pub allow_throws_tags_for_subclasses: bool,
    /// Accept parameters named in capitals in the comment text.
    pub allow_narrative_param_tags: bool,
    /// Accept results described in the comment text.
    pub allow_narrative_return_tags: bool,
    /// Report exception names that cannot be resolved.
    pub log_load_errors: bool,
}

impl Default for JavadocMethodConfig {
    fn default() -> Self {
        Self {
            scope: ScopeFilter::default(),
            min_line_count: -1,
            allowed_annotations: vec!["Override".to_string()],
            ignore_method_names: None,
            unused_param_format: None,
            allow_missing_javadoc: false,
            allow_missing_property_javadoc: false,
            allow_missing_param_tags: false,
            allow_missing_throws_tags: false,
            allow_missing_return_tag: false,
            allow_undeclared_rte: false,
            allow_throws_tags_for_subclasses: false,
            allow_narrative_param_tags: false,
            allow_narrative_return_tags: false,
            log_load_errors: false,
        }
    }
}

/// Checks method, constructor and annotation element comments.
#[derive(Debug, Clone)]
pub struct JavadocMethod {
    config: JavadocMethodConfig,
    severity: Severity,
}

impl Default for JavadocMethod {
    fn default() -> Self {
        Self::new()
    }
}

fn full_match(rule: &str, key: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!(r"\A(?:{pattern})\z"))
        .map_err(|e| ConfigError::invalid(rule, key, e.to_string()))
}

impl JavadocMethod {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: JavadocMethodConfig::default(),
            severity: Severity::Warning,
        }
    }

    /// Builds the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for unknown scope names and
    /// invalid regular expressions.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let mut rule = Self::new().scope_filter(ScopeFilter::from_config(NAME, config)?);
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        rule = rule.min_line_count(config.get_int("min_line_count", -1));
        if config.has("allowed_annotations") {
            rule = rule.allowed_annotations(config.get_str_array("allowed_annotations"));
        }
        if let Some(pattern) = config.get_opt_str("ignore_method_names") {
            rule = rule.ignore_method_names(pattern)?;
        }
        if let Some(pattern) = config.get_opt_str("unused_param_format") {
            rule = rule.unused_param_format(pattern)?;
        }

        let c = &mut rule.config;
        c.allow_missing_javadoc = config.get_bool("allow_missing_javadoc", false);
        c.allow_missing_property_javadoc =
            config.get_bool("allow_missing_property_javadoc", false);
        c.allow_missing_param_tags = config.get_bool("allow_missing_param_tags", false);
        c.allow_missing_throws_tags = config.get_bool("allow_missing_throws_tags", false);
        c.allow_missing_return_tag = config.get_bool("allow_missing_return_tag", false);
        c.allow_undeclared_rte = config.get_bool("allow_undeclared_rte", false);
        c.allow_throws_tags_for_subclasses =
            config.get_bool("allow_throws_tags_for_subclasses", false);
        c.allow_narrative_param_tags = config.get_bool("allow_narrative_param_tags", false);
        c.allow_narrative_return_tags = config.get_bool("allow_narrative_return_tags", false);
        c.log_load_errors = config.get_bool("log_load_errors", false);
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
        self.config.scope = filter;
        self
    }

    /// Sets the scope to check.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.config.scope.scope = scope;
        self
    }

    /// Sets the minimum body size that is checked.
    #[must_use]
    pub fn min_line_count(mut self, count: i64) -> Self {
        self.config.min_line_count = count;
        self
    }

    /// Sets the annotations exempting a declaration.
    #[must_use]
    pub fn allowed_annotations(mut self, annotations: Vec<String>) -> Self {
        self.config.allowed_annotations = annotations;
        self
    }

    /// Sets the method names that need no comment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the pattern is invalid.
    pub fn ignore_method_names(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.config.ignore_method_names = Some(full_match(NAME, "ignore_method_names", pattern)?);
        Ok(self)
    }

    /// Sets the parameter names that need no `@param` tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the pattern is invalid.
    pub fn unused_param_format(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.config.unused_param_format = Some(full_match(NAME, "unused_param_format", pattern)?);
        Ok(self)
    }

    /// Allows missing comments entirely.
    #[must_use]
    pub fn allow_missing_javadoc(mut self, allow: bool) -> Self {
        self.config.allow_missing_javadoc = allow;
        self
    }

    /// Allows missing comments on simple setters and getters.
    #[must_use]
    pub fn allow_missing_property_javadoc(mut self, allow: bool) -> Self {
        self.config.allow_missing_property_javadoc = allow;
        self
    }

    /// Allows missing `@param` tags.
    #[must_use]
    pub fn allow_missing_param_tags(mut self, allow: bool) -> Self {
        self.config.allow_missing_param_tags = allow;
        self
    }

    /// Allows missing `@throws` tags.
    #[must_use]
    pub fn allow_missing_throws_tags(mut self, allow: bool) -> Self {
        self.config.allow_missing_throws_tags = allow;
        self
    }

    /// Allows a missing `@return` tag.
    #[must_use]
    pub fn allow_missing_return_tag(mut self, allow: bool) -> Self {
        self.config.allow_missing_return_tag = allow;
        self
    }

    /// Accepts `@throws` tags for undeclared unchecked exceptions.
    #[must_use]
    pub fn allow_undeclared_rte(mut self, allow: bool) -> Self {
        self.config.allow_undeclared_rte = allow;
        self
    }

    /// Accepts `@throws` tags for subclasses of declared exceptions.
    #[must_use]
    pub fn allow_throws_tags_for_subclasses(mut self, allow: bool) -> Self {
        self.config.allow_throws_tags_for_subclasses = allow;
        self
    }

    /// Accepts parameters described in capitals in the comment text.
    #[must_use]
    pub fn allow_narrative_param_tags(mut self, allow: bool) -> Self {
        self.config.allow_narrative_param_tags = allow;
        self
    }

    /// Accepts results described in the comment text.
    #[must_use]
    pub fn allow_narrative_return_tags(mut self, allow: bool) -> Self {
        self.config.allow_narrative_return_tags = allow;
        self
    }

    /// Reports exception names that cannot be resolved.
    #[must_use]
    pub fn log_load_errors(mut self, log: bool) -> Self {
        self.config.log_load_errors = log;
        self
    }

    fn reporter(&self) -> Reporter {
        Reporter {
            code: CODE,
            name: NAME,
            severity: self.severity,
        }
    }

    fn is_exempt(&self, method: &MethodDecl) -> bool {
        let sized = matches!(method.kind, MethodKind::Method | MethodKind::Constructor);
        (sized && body_line_count(method) <= self.config.min_line_count)
            || self
                .config
                .allowed_annotations
                .iter()
                .any(|a| method.modifiers.has_annotation(a))
    }

    fn missing_javadoc_allowed(&self, method: &MethodDecl) -> bool {
        self.config.allow_missing_javadoc
            || (self.config.allow_missing_property_javadoc
                && (is_setter(method) || is_getter(method)))
            || self
                .config
                .ignore_method_names
                .as_ref()
                .is_some_and(|re| re.is_match(&method.name.text))
    }
}

impl Rule for JavadocMethod {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks Javadoc of methods and constructors against their signatures"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(
        &self,
        ctx: &FileContext,
        unit: &CompilationUnit,
    ) -> Result<Vec<Violation>, RuleError> {
        let classes = ClassResolver::new(unit);
        let mut session = MethodSession {
            rule: self,
            ctx,
            reporter: self.reporter(),
            comments: CommentIndex::new(unit, ctx.content),
            classes: &classes,
            ancestors: Vec::new(),
            violations: Vec::new(),
        };
        for decl in &unit.types {
            session.visit_type(decl);
        }
        Ok(session.violations)
    }
}

/// Number of body lines, as compared against `min_line_count`.
///
/// Empty and missing bodies count as one line.
fn body_line_count(method: &MethodDecl) -> i64 {
    match &method.body {
        Some(body) if !body.statements.is_empty() => {
            let inner = body.close_line.saturating_sub(body.open_line + 1);
            i64::try_from(inner).unwrap_or(i64::MAX)
        }
        _ => 1,
    }
}

fn has_property_prefix(name: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

fn only_statement(method: &MethodDecl) -> Option<&Statement> {
    match method.body.as_ref()?.statements.as_slice() {
        [single] => Some(single),
        _ => None,
    }
}

fn is_plain_method(method: &MethodDecl) -> bool {
    method.kind == MethodKind::Method && method.type_params.is_empty() && method.throws.is_empty()
}

/// `void setX(T x) { this.x = x; }`
fn is_setter(method: &MethodDecl) -> bool {
    is_plain_method(method)
        && has_property_prefix(&method.name.text, &["set"])
        && method.returns == ReturnType::Void
        && method.params.len() == 1
        && only_statement(method).is_some_and(|s| s.kind == StatementKind::Assignment)
}

/// `T getX() { return x; }` or `boolean isX() { return x; }`
fn is_getter(method: &MethodDecl) -> bool {
    is_plain_method(method)
        && has_property_prefix(&method.name.text, &["is", "get"])
        && method.returns == ReturnType::Value
        && method.params.is_empty()
        && only_statement(method)
            .is_some_and(|s| s.kind == StatementKind::Return { has_value: true })
}

fn inherit_doc_valid(method: &MethodDecl) -> bool {
    method.kind == MethodKind::Method
        && !method.modifiers.is_static
        && method.modifiers.visibility != Some(Visibility::Private)
}

fn mentions(name: &str, lines: &[String]) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(&name.to_uppercase()));
    Regex::new(&pattern).is_ok_and(|re| lines.iter().any(|line| re.is_match(line)))
}

/// Declared exception tracked while matching `@throws` tags.
struct ExceptionInfo<'a> {
    ident: &'a Ident,
    class: Option<ClassId<'a>>,
    found: bool,
    load_reported: bool,
}

/// Per-file traversal state.
struct MethodSession<'a> {
    rule: &'a JavadocMethod,
    ctx: &'a FileContext<'a>,
    reporter: Reporter,
    comments: CommentIndex<'a>,
    classes: &'a ClassResolver,
    ancestors: Vec<&'a TypeDecl>,
    violations: Vec<Violation>,
}

impl<'a> MethodSession<'a> {
    fn report(&mut self, line: usize, column: usize, key: &str, arguments: Vec<String>) {
        let violation = self
            .reporter
            .violation(self.ctx, line, column, key, arguments);
        self.violations.push(violation);
    }

    fn visit_type(&mut self, decl: &'a TypeDecl) {
        self.ancestors.push(decl);
        for member in &decl.members {
            match member {
                Member::Method(method) => {
                    self.check_method(method);
                    for stmt in method.body.iter().flat_map(|b| &b.statements) {
                        self.visit_statement(stmt);
                    }
                }
                Member::StaticInit(init) => {
                    for stmt in &init.body.statements {
                        self.visit_statement(stmt);
                    }
                }
                Member::Type(nested) => self.visit_type(nested),
            }
        }
        self.ancestors.pop();
    }

    fn visit_statement(&mut self, stmt: &'a Statement) {
        for nested in &stmt.nested_types {
            self.visit_type(nested);
        }
    }

    fn check_method(&mut self, method: &'a MethodDecl) {
        if self.rule.is_exempt(method) {
            debug!(method = %method.name.text, line = method.line, "Exempt from Javadoc check");
            return;
        }

        let enclosing = self.ancestors.last().map(|decl| decl.kind);
        let declared = Scope::effective(&method.modifiers, enclosing);
        let surrounding = Scope::surrounding(&self.ancestors);
        if !self.rule.config.scope.should_check(declared, surrounding) {
            return;
        }

        match self.comments.javadoc_before(method.line) {
            Some(comment) => self.check_comment(method, &comment.lines, method_tags(comment)),
            None if self.rule.missing_javadoc_allowed(method) => {}
            None => self.report(
                method.line,
                method.column,
                messages::JAVADOC_MISSING,
                Vec::new(),
            ),
        }
    }

    fn check_comment(&mut self, method: &'a MethodDecl, lines: &[String], mut tags: Vec<JavadocTag>) {
        if tags.len() == 1 && tags.iter().all(JavadocTag::is_inherit_doc) {
            if !inherit_doc_valid(method) {
                self.report(
                    method.line,
                    method.column,
                    messages::JAVADOC_INVALID_INHERIT_DOC,
                    Vec::new(),
                );
            }
            return;
        }

        if method.kind != MethodKind::AnnotationElement {
            let report = !tags.iter().any(JavadocTag::is_inherit_doc);
            self.check_params(method, &mut tags, lines, report);
            self.check_throws(method, &mut tags, report);
            if method.is_function() {
                self.check_return(method, &mut tags, lines, report);
            }
        }

        for tag in tags.iter().filter(|t| !t.is_see_or_inherit_doc()) {
            self.report(tag.line, 0, messages::JAVADOC_UNUSED_TAG_GENERAL, Vec::new());
        }
    }

    fn check_params(
        &mut self,
        method: &MethodDecl,
        tags: &mut Vec<JavadocTag>,
        lines: &[String],
        report: bool,
    ) {
        let rule = self.rule;
        let config = &rule.config;
        let mut tag_found = false;
        let mut narrative_found = false;

        let params = method.params.iter().map(|p| (p, p.text.clone()));
        let type_params = method.type_params.iter().map(|p| (p, format!("<{}>", p.text)));

        for (ident, tag_text) in params.chain(type_params) {
            let tag = tags
                .iter()
                .position(|t| t.is_param() && t.arg() == tag_text)
                .map(|index| tags.remove(index));

            if config
                .unused_param_format
                .as_ref()
                .is_some_and(|re| re.is_match(&ident.text))
            {
                continue;
            }

            if tag.is_some() {
                tag_found = true;
            } else if config.allow_narrative_param_tags && mentions(&ident.text, lines) {
                narrative_found = true;
            } else if !config.allow_missing_param_tags && report {
                self.report(
                    ident.line,
                    ident.column,
                    messages::JAVADOC_EXPECTED_TAG,
                    vec!["@param".to_string(), tag_text],
                );
            }
        }

        if tag_found && narrative_found {
            self.report(method.line, method.column, messages::JAVADOC_MIXED_STYLE, Vec::new());
        }

        let (unused, rest): (Vec<_>, Vec<_>) =
            std::mem::take(tags).into_iter().partition(JavadocTag::is_param);
        *tags = rest;
        for tag in unused {
            self.report(
                tag.line,
                tag.column,
                messages::JAVADOC_UNUSED_TAG,
                vec!["@param".to_string(), tag.arg().to_string()],
            );
        }
    }

    fn check_throws(&mut self, method: &'a MethodDecl, tags: &mut Vec<JavadocTag>, report: bool) {
        let classes = self.classes;
        let mut declared: Vec<ExceptionInfo<'a>> = method
            .throws
            .iter()
            .map(|ident| ExceptionInfo {
                ident,
                class: classes.resolve(&ident.text),
                found: false,
                load_reported: false,
            })
            .collect();

        let (documented, rest): (Vec<_>, Vec<_>) =
            std::mem::take(tags).into_iter().partition(JavadocTag::is_throws);
        *tags = rest;

        for tag in &documented {
            self.match_throws_tag(tag, &mut declared);
        }

        if !self.rule.config.allow_missing_throws_tags && report {
            for info in declared.iter().filter(|info| !info.found) {
                self.report(
                    info.ident.line,
                    info.ident.column,
                    messages::JAVADOC_EXPECTED_TAG,
                    vec!["@throws".to_string(), info.ident.text.clone()],
                );
            }
        }
    }

    fn match_throws_tag(&mut self, tag: &JavadocTag, declared: &mut [ExceptionInfo<'a>]) {
        let name = tag.arg();
        if let Some(info) = declared.iter_mut().find(|info| info.ident.text == name) {
            info.found = true;
            return;
        }

        let classes = self.classes;
        let class = classes.resolve(name);
        if class.is_none() {
            self.load_error(tag.line, tag.column, name);
        }
        if self.matched_by_class(class, declared) {
            return;
        }

        let tolerated = self.rule.config.allow_undeclared_rte
            && class.is_some_and(|class| classes.is_unchecked(class));
        if !tolerated {
            self.report(
                tag.line,
                tag.column,
                messages::JAVADOC_UNUSED_TAG,
                vec!["@throws".to_string(), name.to_string()],
            );
        }
    }

    /// Matches a documented class against the declared exceptions in order.
    ///
    /// Identity marks the declaration as documented; with subclass tolerance a
    /// subclass is accepted without marking it.
    fn matched_by_class(
        &mut self,
        class: Option<ClassId<'a>>,
        declared: &mut [ExceptionInfo<'a>],
    ) -> bool {
        let classes = self.classes;
        let allow_subclasses = self.rule.config.allow_throws_tags_for_subclasses;

        for info in declared.iter_mut() {
            if info.class.is_none() && !info.load_reported {
                info.load_reported = true;
                self.load_error(info.ident.line, info.ident.column, &info.ident.text);
            }
            let (Some(documented), Some(target)) = (class, info.class) else {
                continue;
            };
            if documented == target {
                info.found = true;
                return true;
            }
            if allow_subclasses && classes.is_subclass(documented, target) {
                return true;
            }
        }
        false
    }

    fn load_error(&mut self, line: usize, column: usize, name: &str) {
        if self.rule.config.log_load_errors {
            self.report(
                line,
                column,
                messages::JAVADOC_CLASS_INFO,
                vec!["@throws".to_string(), name.to_string()],
            );
        }
    }

    fn check_return(
        &mut self,
        method: &MethodDecl,
        tags: &mut Vec<JavadocTag>,
        lines: &[String],
        report: bool,
    ) {
        let rule = self.rule;
        let config = &rule.config;
        let (returns, rest): (Vec<_>, Vec<_>) =
            std::mem::take(tags).into_iter().partition(JavadocTag::is_return);
        *tags = rest;

        for duplicate in returns.iter().skip(1) {
            self.report(
                duplicate.line,
                duplicate.column,
                messages::JAVADOC_DUPLICATE_TAG,
                vec!["@return".to_string()],
            );
        }

        let narrated = config.allow_narrative_return_tags
            && lines.iter().any(|line| RETURN_NARRATIVE.is_match(line));
        if returns.is_empty() && !config.allow_missing_return_tag && report && !narrated {
            self.report(method.line, 0, messages::JAVADOC_RETURN_EXPECTED, Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclint_core::Frontend;
    use doclint_java::JavaFrontend;
    use std::path::Path;

    fn check_code(rule: &JavadocMethod, code: &str) -> Vec<Violation> {
        let unit = JavaFrontend::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("Test.java"), code, Path::new("."));
        rule.check(&ctx, &unit).expect("check")
    }

    fn keys(violations: &[Violation]) -> Vec<&str> {
        violations
            .iter()
            .filter_map(|v| v.message_key.as_deref())
            .collect()
    }

    #[test]
    fn reports_missing_javadoc() {
        let code = "class A {\n    void run() {\n    }\n}\n";
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 5);
    }

    #[test]
    fn reports_exactly_the_undocumented_parameter() {
        let code = r#"class A {
    /**
     * Does it.
     * @param x the x
     */
    void f(int x, String y) {
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_EXPECTED_TAG]);
        assert_eq!(violations[0].arguments, vec!["@param", "y"]);
        assert_eq!(violations[0].location.line, 6);
    }

    #[test]
    fn type_parameters_need_tags() {
        let code = r#"class A {
    /**
     * Keeps it.
     * @param t the value
     */
    <T> void keep(T t) {
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_EXPECTED_TAG]);
        assert_eq!(violations[0].arguments, vec!["@param", "<T>"]);
    }

    #[test]
    fn unused_param_tag() {
        let code = r#"class A {
    /**
     * Does it.
     * @param z not a parameter
     */
    void f() {
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_UNUSED_TAG]);
        assert_eq!(violations[0].arguments, vec!["@param", "z"]);
        assert_eq!(violations[0].location.line, 4);
    }

    #[test]
    fn duplicate_return_is_reported_once() {
        let code = r#"class A {
    /**
     * Gets.
     * @return one
     * @return two
     */
    int f() {
        return 1;
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_DUPLICATE_TAG]);
        assert_eq!(violations[0].location.line, 5);
    }

    #[test]
    fn missing_return_and_narrative_return() {
        let code = r#"class A {
    /**
     * Returns the answer.
     */
    int answer() {
        return 42;
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_RETURN_EXPECTED]);
        assert_eq!(violations[0].location.line, 5);
        assert_eq!(violations[0].location.column, 1);

        let narrative = JavadocMethod::new().allow_narrative_return_tags(true);
        assert!(check_code(&narrative, code).is_empty());
    }

    #[test]
    fn return_tag_on_void_method_is_unused() {
        let code = r#"class A {
    /**
     * Runs.
     * @return nothing
     */
    void run() {
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_UNUSED_TAG_GENERAL]);
        assert_eq!(violations[0].location.line, 4);
    }

    const INHERIT: &str = r#"class A {
    /** {@inheritDoc} */
    public String describe() {
        return "a";
    }

    /** {@inheritDoc} */
    private String hidden() {
        return "b";
    }

    /** {@inheritDoc} */
    A() {
    }
}
"#;

    #[test]
    fn inherit_doc_only_on_overridable_methods() {
        let violations = check_code(&JavadocMethod::new(), INHERIT);
        assert_eq!(
            keys(&violations),
            vec![
                messages::JAVADOC_INVALID_INHERIT_DOC,
                messages::JAVADOC_INVALID_INHERIT_DOC
            ]
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![8, 13]);
    }

    const NARRATIVE: &str = r#"class A {
    /**
     * Adds TOTAL to the running sum.
     */
    void add(int total) {
    }
}
"#;

    #[test]
    fn narrative_parameter_only_in_narrative_mode() {
        let violations = check_code(&JavadocMethod::new(), NARRATIVE);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_EXPECTED_TAG]);
        assert_eq!(violations[0].arguments, vec!["@param", "total"]);

        let narrative = JavadocMethod::new().allow_narrative_param_tags(true);
        assert!(check_code(&narrative, NARRATIVE).is_empty());
    }

    #[test]
    fn mixed_style_is_reported() {
        let code = r#"class A {
    /**
     * Moves by DY.
     * @param dx horizontal offset
     */
    void move(int dx, int dy) {
    }
}
"#;
        let rule = JavadocMethod::new().allow_narrative_param_tags(true);
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MIXED_STYLE]);
        assert_eq!(violations[0].location.line, 6);
    }

    #[test]
    fn unused_parameter_format_precedes_narrative() {
        let code = r#"class A {
    /**
     * Mentions UNUSEDFLAG and documents x.
     * @param x the x
     */
    void f(int x, boolean unusedFlag) {
    }
}
"#;
        let rule = JavadocMethod::new()
            .allow_narrative_param_tags(true)
            .unused_param_format("unused.*")
            .expect("pattern");
        assert!(check_code(&rule, code).is_empty());
    }

    const THROWS: &str = r#"import java.io.IOException;

class A {
    /**
     * Reads.
     * @throws java.io.FileNotFoundException if absent
     */
    void read() throws IOException {
    }
}
"#;

    #[test]
    fn subclass_throws_tag_is_unused_by_default() {
        let violations = check_code(&JavadocMethod::new(), THROWS);
        assert_eq!(
            keys(&violations),
            vec![messages::JAVADOC_UNUSED_TAG, messages::JAVADOC_EXPECTED_TAG]
        );
        assert_eq!(
            violations[0].arguments,
            vec!["@throws", "java.io.FileNotFoundException"]
        );
        assert_eq!(violations[1].arguments, vec!["@throws", "IOException"]);
        assert_eq!(violations[1].location.line, 8);
    }

    #[test]
    fn subclass_throws_tag_accepted_but_does_not_document() {
        let rule = JavadocMethod::new().allow_throws_tags_for_subclasses(true);
        let violations = check_code(&rule, THROWS);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_EXPECTED_TAG]);
        assert_eq!(violations[0].arguments, vec!["@throws", "IOException"]);
    }

    #[test]
    fn throws_matched_by_name_and_class() {
        let code = r#"class A {
    /**
     * Reads.
     * @throws IOException on failure
     * @exception InterruptedException when stopped
     */
    void read() throws java.io.IOException, InterruptedException {
    }
}
"#;
        assert!(check_code(&JavadocMethod::new(), code).is_empty());
    }

    #[test]
    fn undeclared_runtime_exceptions() {
        let code = r#"class A {
    /**
     * Parses.
     * @throws NumberFormatException on bad input
     */
    void parse() {
    }
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_UNUSED_TAG]);

        let rule = JavadocMethod::new().allow_undeclared_rte(true);
        assert!(check_code(&rule, code).is_empty());
    }

    #[test]
    fn unresolved_exception_logged_when_enabled() {
        let code = r#"class A {
    /**
     * Fails.
     * @throws MysteryException sometimes
     */
    void fail() {
    }
}
"#;
        let rule = JavadocMethod::new().log_load_errors(true);
        let violations = check_code(&rule, code);
        assert_eq!(
            keys(&violations),
            vec![messages::JAVADOC_CLASS_INFO, messages::JAVADOC_UNUSED_TAG]
        );
        assert_eq!(violations[0].arguments, vec!["@throws", "MysteryException"]);
    }

    #[test]
    fn file_exception_classes_resolve() {
        let code = r#"class A {
    static class Oops extends IllegalStateException {
    }

    /**
     * Fails.
     * @throws Oops always
     */
    void fail() {
    }
}
"#;
        let rule = JavadocMethod::new().allow_undeclared_rte(true);
        assert!(check_code(&rule, code).is_empty());
    }

    const PROPERTIES: &str = r#"class A {
    private int size;

    void setSize(int size) {
        this.size = size;
    }

    int getSize() {
        return size;
    }

    int getLarger() {
        size = size + 1;
        return size;
    }
}
"#;

    #[test]
    fn property_accessors_may_skip_javadoc() {
        let violations = check_code(&JavadocMethod::new(), PROPERTIES);
        assert_eq!(violations.len(), 3);

        let rule = JavadocMethod::new().allow_missing_property_javadoc(true);
        let violations = check_code(&rule, PROPERTIES);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 12);
    }

    #[test]
    fn ignored_names_and_annotations() {
        let code = r#"class A {
    @Override
    public String toString() {
        return "A";
    }

    void testSomething() {
    }
}
"#;
        let rule = JavadocMethod::new()
            .ignore_method_names("test.*")
            .expect("pattern");
        assert!(check_code(&rule, code).is_empty());
    }

    #[test]
    fn short_bodies_skipped_by_min_line_count() {
        let code = "class A {\n    void a() {\n    }\n\n    void b() {\n        a();\n        a();\n    }\n}\n";
        let rule = JavadocMethod::new().min_line_count(1);
        let violations = check_code(&rule, code);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 5);
    }

    #[test]
    fn scope_filter_and_interfaces() {
        let code = r#"public interface Shape {
    double area();
}

class Impl {
    private void helper() {
    }
}
"#;
        let rule = JavadocMethod::new().scope(Scope::Public);
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn anonymous_members_need_anoninner_scope() {
        let code = r#"public class A {
    /** Starts. */
    public void start() {
        Runnable r = new Runnable() {
            public void run() {
            }
        };
    }
}
"#;
        assert!(check_code(&JavadocMethod::new(), code).is_empty());

        let rule = JavadocMethod::new().scope(Scope::Anoninner);
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 5);
    }

    #[test]
    fn anonymous_class_in_field_is_checked() {
        let code = r#"public class A {
    Runnable r = new Runnable() {
        public void run() {
        }
    };
}
"#;
        assert!(check_code(&JavadocMethod::new(), code).is_empty());

        let rule = JavadocMethod::new().scope(Scope::Anoninner);
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn enum_constant_body_is_checked() {
        let code = r#"public enum Op {
    PLUS {
        int apply(int x) {
            return x;
        }
    };
}
"#;
        assert!(check_code(&JavadocMethod::new(), code).is_empty());

        let rule = JavadocMethod::new().scope(Scope::Anoninner);
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn missing_javadoc_may_be_allowed() {
        let code = "class A {\n    void run() {\n    }\n}\n";
        let rule = JavadocMethod::new().allow_missing_javadoc(true);
        assert!(check_code(&rule, code).is_empty());
    }

    const UNDOCUMENTED_TAGS: &str = r#"class A {
    /**
     * Does it.
     */
    int f(int x) throws IllegalStateException {
        return x;
    }
}
"#;

    fn has_expected(violations: &[Violation], tag: &str, arg: &str) -> bool {
        violations
            .iter()
            .any(|v| v.has_key(messages::JAVADOC_EXPECTED_TAG) && v.arguments == [tag, arg])
    }

    #[test]
    fn missing_tags_may_be_allowed_one_by_one() {
        let all = check_code(&JavadocMethod::new(), UNDOCUMENTED_TAGS);
        assert_eq!(all.len(), 3, "{all:?}");
        assert!(has_expected(&all, "@param", "x"));
        assert!(has_expected(&all, "@throws", "IllegalStateException"));
        assert_eq!(all.iter().filter(|v| v.has_key(messages::JAVADOC_RETURN_EXPECTED)).count(), 1);

        let no_params = check_code(
            &JavadocMethod::new().allow_missing_param_tags(true),
            UNDOCUMENTED_TAGS,
        );
        assert_eq!(no_params.len(), 2);
        assert!(!has_expected(&no_params, "@param", "x"));

        let no_throws = check_code(
            &JavadocMethod::new().allow_missing_throws_tags(true),
            UNDOCUMENTED_TAGS,
        );
        assert_eq!(no_throws.len(), 2);
        assert!(!has_expected(&no_throws, "@throws", "IllegalStateException"));

        let no_return = check_code(
            &JavadocMethod::new().allow_missing_return_tag(true),
            UNDOCUMENTED_TAGS,
        );
        assert_eq!(no_return.len(), 2);
        assert!(!no_return
            .iter()
            .any(|v| v.has_key(messages::JAVADOC_RETURN_EXPECTED)));

        let relaxed = JavadocMethod::new()
            .allow_missing_param_tags(true)
            .allow_missing_throws_tags(true)
            .allow_missing_return_tag(true);
        assert!(check_code(&relaxed, UNDOCUMENTED_TAGS).is_empty());
    }

    #[test]
    fn inherit_doc_with_other_tags_suppresses_expected_tags() {
        let code = r#"class A {
    /**
     * {@inheritDoc}
     * @see Object
     */
    public int f(int x) throws IllegalStateException {
        return x;
    }
}
"#;
        assert!(check_code(&JavadocMethod::new(), code).is_empty());

        let without = code.replace("{@inheritDoc}", "Does it.");
        assert_eq!(check_code(&JavadocMethod::new(), &without).len(), 3);
    }

    #[test]
    fn annotation_element_tags_are_unused() {
        let code = r#"@interface Marker {
    /**
     * The value.
     * @param x not a parameter
     * @return the value
     */
    int value();
}
"#;
        let violations = check_code(&JavadocMethod::new(), code);
        assert_eq!(
            keys(&violations),
            vec![
                messages::JAVADOC_UNUSED_TAG_GENERAL,
                messages::JAVADOC_UNUSED_TAG_GENERAL
            ]
        );
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![4, 5]);
    }

    #[test]
    fn exclude_scope_skips_visible_members() {
        let code = r#"public class A {
    public void open() {
    }

    private void hidden() {
    }
}
"#;
        let rule = JavadocMethod::new().scope_filter(ScopeFilter {
            scope: Scope::Private,
            exclude: Some(Scope::Protected),
        });
        let violations = check_code(&rule, code);
        assert_eq!(keys(&violations), vec![messages::JAVADOC_MISSING]);
        assert_eq!(violations[0].location.line, 5);
    }

    #[test]
    fn from_config_reads_options() {
        let config = doclint_core::Config::parse(
            r#"
[rules.javadoc-method]
scope = "public"
allow_narrative_param_tags = true
unused_param_format = "unused.*"
"#,
        )
        .expect("config");
        let rule = JavadocMethod::from_config(&config.rule(NAME)).expect("rule");
        assert_eq!(rule.config.scope.scope, Scope::Public);
        assert!(rule.config.allow_narrative_param_tags);
        assert!(rule.config.unused_param_format.is_some());

        let bad = doclint_core::Config::parse("[rules.javadoc-method]\nscope = \"galaxy\"\n")
            .expect("config");
        assert!(JavadocMethod::from_config(&bad.rule(NAME)).is_err());
    }
}
