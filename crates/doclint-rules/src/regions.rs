//! Partitioning of a file into lexical contexts.
//!
//! A file is split into regions by line: package level, class bodies,
//! method and constructor signatures, static initializer headers, the
//! prologue between a body's `{` and its first statement, and statement
//! lists. Every line belongs to exactly one region, so every comment can be
//! assigned a context by its starting line.

use doclint_core::tree::{Block, CompilationUnit, Initializer, Member, MethodDecl, TypeDecl, TypeKind};
use doclint_core::RuleError;
use std::fmt;

/// The kind of lexical context a region represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Outside of any class.
    Package,
    /// Inside a class, outside methods, constructors and static initializers.
    ClassBody,
    /// A method or constructor before the `{` of its body.
    Signature,
    /// A static initializer up to its first statement.
    StaticInitHeader,
    /// Between a body's `{` and its first statement.
    PreStatements,
    /// From the first statement to the end of a body.
    Statements,
}

impl ContextKind {
    /// Every context, outermost first.
    pub const ALL: [Self; 6] = [
        Self::Package,
        Self::ClassBody,
        Self::Signature,
        Self::StaticInitHeader,
        Self::PreStatements,
        Self::Statements,
    ];

    /// Keyword naming this context in format descriptors.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::ClassBody => "class",
            Self::Signature => "func",
            Self::StaticInitHeader => "init",
            Self::PreStatements => "prestmts",
            Self::Statements => "stmts",
        }
    }

    /// Looks up a context by its descriptor keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == word)
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Start of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Context of the region.
    pub kind: ContextKind,
    /// First line of the region (1-indexed).
    pub start_line: usize,
}

impl Span {
    const fn new(kind: ContextKind, start_line: usize) -> Self {
        Self { kind, start_line }
    }
}

/// Regions of one file, sorted by start line.
#[derive(Debug, Clone)]
pub struct SpanMap {
    spans: Vec<Span>,
}

impl SpanMap {
    /// Returns the regions in order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the last region starting at or before `line`.
    ///
    /// Among regions with the same start line, the one recorded last wins.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MalformedTree`] for line 0.
    pub fn span_for(&self, line: usize) -> Result<Span, RuleError> {
        if line == 0 {
            return Err(RuleError::malformed(line, "line numbers start at 1"));
        }
        let mut low = 0;
        let mut high = self.spans.len();
        while low + 1 < high {
            let mid = (low + high) / 2;
            if line < self.spans[mid].start_line {
                high = mid;
            } else {
                low = mid;
            }
        }
        self.spans
            .get(low)
            .copied()
            .ok_or_else(|| RuleError::malformed(line, "no regions recorded"))
    }
}

/// Computes the regions of a compilation unit.
///
/// # Errors
///
/// Returns [`RuleError::MalformedTree`] if a declaration carries positions
/// that cannot describe real source.
pub fn classify(unit: &CompilationUnit) -> Result<SpanMap, RuleError> {
    let mut classifier = Classifier::new();
    for decl in &unit.types {
        classifier.visit_type(decl)?;
    }
    Ok(classifier.finish())
}

/// Per-file traversal state.
struct Classifier {
    context: Vec<ContextKind>,
    spans: Vec<Span>,
}

impl Classifier {
    fn new() -> Self {
        Self {
            context: vec![ContextKind::Package],
            spans: vec![Span::new(ContextKind::Package, 1)],
        }
    }

    fn finish(mut self) -> SpanMap {
        self.spans.sort_by_key(|s| s.start_line);
        SpanMap { spans: self.spans }
    }

    fn record(&mut self, kind: ContextKind, line: usize) {
        self.spans.push(Span::new(kind, line));
    }

    fn enter(&mut self, kind: ContextKind) {
        self.context.push(kind);
    }

    /// Pops the current context and restores the parent after `closing_line`.
    fn leave(&mut self, closing_line: usize) -> Result<(), RuleError> {
        self.context.pop();
        let parent = *self
            .context
            .last()
            .ok_or_else(|| RuleError::malformed(closing_line, "unbalanced context stack"))?;
        self.record(parent, closing_line + 1);
        Ok(())
    }

    fn visit_type(&mut self, decl: &TypeDecl) -> Result<(), RuleError> {
        if decl.kind == TypeKind::Anonymous {
            return self.visit_members(&decl.members);
        }
        check_line(decl.line, "type declaration")?;
        if decl.end_line < decl.line {
            return Err(RuleError::malformed(decl.line, "type ends before it starts"));
        }

        self.record(ContextKind::ClassBody, decl.line);
        self.enter(ContextKind::ClassBody);
        self.visit_members(&decl.members)?;
        self.leave(decl.end_line)
    }

    fn visit_members(&mut self, members: &[Member]) -> Result<(), RuleError> {
        for member in members {
            match member {
                Member::Method(method) => self.visit_method(method)?,
                Member::StaticInit(init) => self.visit_initializer(init)?,
                Member::Type(decl) => self.visit_type(decl)?,
            }
        }
        Ok(())
    }

    fn visit_method(&mut self, method: &MethodDecl) -> Result<(), RuleError> {
        check_line(method.line, "method declaration")?;
        let Some(body) = &method.body else {
            return Ok(());
        };
        check_body(body, method.line)?;

        self.record(ContextKind::Signature, method.line);
        self.record(ContextKind::PreStatements, body.open_line);
        self.record(
            ContextKind::Statements,
            body.first_statement_line().unwrap_or(body.close_line),
        );
        self.enter(ContextKind::Statements);
        self.visit_statements(body)?;
        self.leave(body.close_line)
    }

    fn visit_initializer(&mut self, init: &Initializer) -> Result<(), RuleError> {
        check_line(init.line, "static initializer")?;
        check_body(&init.body, init.line)?;

        self.record(ContextKind::StaticInitHeader, init.line);
        if let Some(first) = init.body.first_statement_line() {
            self.record(ContextKind::Statements, first);
        }
        self.enter(ContextKind::Statements);
        self.visit_statements(&init.body)?;
        self.leave(init.body.close_line)
    }

    fn visit_statements(&mut self, body: &Block) -> Result<(), RuleError> {
        for stmt in &body.statements {
            for decl in &stmt.nested_types {
                self.visit_type(decl)?;
            }
        }
        Ok(())
    }
}

fn check_line(line: usize, what: &str) -> Result<(), RuleError> {
    if line == 0 {
        Err(RuleError::malformed(line, format!("{what} at line 0")))
    } else {
        Ok(())
    }
}

fn check_body(body: &Block, decl_line: usize) -> Result<(), RuleError> {
    if body.open_line < decl_line {
        return Err(RuleError::malformed(decl_line, "body opens before its declaration"));
    }
    if body.close_line < body.open_line {
        return Err(RuleError::malformed(body.open_line, "body closes before it opens"));
    }
    if let Some(first) = body.first_statement_line() {
        if first < body.open_line || first > body.close_line {
            return Err(RuleError::malformed(first, "statement outside of its body"));
        }
    }
    Ok(())
}
