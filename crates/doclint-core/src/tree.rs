//! Typed syntax tree consumed by the rules.
//!
//! A [`Frontend`](crate::Frontend) turns source text into a
//! [`CompilationUnit`]. The tree only carries what the comment and Javadoc
//! rules need: declarations, their line structure, signatures, and the raw
//! comments of the file. Node kinds are closed enums so rules can match on
//! them exhaustively.
//!
//! Lines are 1-indexed. Columns are 0-indexed byte offsets within the line.

/// An identifier (or dotted name) with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Identifier text as written (e.g., `IOException` or `java.io.IOException`).
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }

    /// Returns the last segment of a dotted name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.text.rsplit('.').next().unwrap_or(&self.text)
    }
}

/// Declared access modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

/// Modifiers and annotations attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Explicit access modifier, `None` for package-private.
    pub visibility: Option<Visibility>,
    /// `static`
    pub is_static: bool,
    /// `final`
    pub is_final: bool,
    /// `abstract`
    pub is_abstract: bool,
    /// Annotation names as written, without `@` (e.g., `Override`, `java.lang.Override`).
    pub annotations: Vec<String>,
}

impl Modifiers {
    /// Returns true if an annotation with the given simple name is present.
    #[must_use]
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a == name || a.rsplit('.').next() == Some(name))
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `class Foo`
    Class,
    /// `interface Foo`
    Interface,
    /// `enum Foo`
    Enum,
    /// `@interface Foo`
    Annotation,
    /// `record Foo(...)`
    Record,
    /// Anonymous class body (`new Foo() { ... }`).
    Anonymous,
}

impl TypeKind {
    /// Returns true for interface and annotation bodies, whose members are implicitly public.
    #[must_use]
    pub fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// A class, interface, enum, annotation, record, or anonymous class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Kind of declaration.
    pub kind: TypeKind,
    /// Declared name (empty for anonymous bodies).
    pub name: String,
    /// First line of the declaration, including modifiers and annotations.
    pub line: usize,
    /// Column of the first token.
    pub column: usize,
    /// Line of the closing `}` of the body.
    pub end_line: usize,
    /// Modifiers of the declaration.
    pub modifiers: Modifiers,
    /// Declared type parameters, in order.
    pub type_params: Vec<Ident>,
    /// Name of the `extends` class, if any.
    pub superclass: Option<String>,
    /// Members in source order.
    pub members: Vec<Member>,
}

/// A member of a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Method, constructor, or annotation element.
    Method(MethodDecl),
    /// `static { ... }`
    StaticInit(Initializer),
    /// Nested type declaration.
    Type(TypeDecl),
}

/// Kind of a method-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Ordinary method.
    Method,
    /// Constructor.
    Constructor,
    /// Element of an annotation type (`String value();`).
    AnnotationElement,
}

/// Declared result of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// `void`, and constructors.
    Void,
    /// Any non-void type.
    Value,
}

/// A method, constructor, or annotation element declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Kind of declaration.
    pub kind: MethodKind,
    /// Declared name.
    pub name: Ident,
    /// First line of the declaration, including modifiers and annotations.
    pub line: usize,
    /// Column of the first token.
    pub column: usize,
    /// Last line of the declaration.
    pub end_line: usize,
    /// Modifiers of the declaration.
    pub modifiers: Modifiers,
    /// Declared type parameters, in order.
    pub type_params: Vec<Ident>,
    /// Formal parameter names, in order.
    pub params: Vec<Ident>,
    /// Entries of the `throws` clause, in order.
    pub throws: Vec<Ident>,
    /// Declared result.
    pub returns: ReturnType,
    /// Body, absent for abstract and interface methods.
    pub body: Option<Block>,
}

impl MethodDecl {
    /// Returns true for methods that yield a value.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.kind == MethodKind::Method && self.returns == ReturnType::Value
    }
}

/// A `static { ... }` initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    /// Line of the `static` keyword.
    pub line: usize,
    /// The initializer block.
    pub body: Block,
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Line of the opening `{`.
    pub open_line: usize,
    /// Line of the closing `}`.
    pub close_line: usize,
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl Block {
    /// Line of the first statement, if any.
    #[must_use]
    pub fn first_statement_line(&self) -> Option<usize> {
        self.statements.first().map(|s| s.line)
    }
}

/// Shape of a statement, as far as the rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Expression statement consisting of a plain `=` assignment.
    Assignment,
    /// `return;` or `return expr;`
    Return {
        /// Whether an expression is returned.
        has_value: bool,
    },
    /// Anything else.
    Other,
}

/// A statement of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// First line of the statement.
    pub line: usize,
    /// Last line of the statement.
    pub end_line: usize,
    /// Shape of the statement.
    pub kind: StatementKind,
    /// Local classes and anonymous class bodies found inside this statement.
    pub nested_types: Vec<TypeDecl>,
}

/// Comment delimiter style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `/* ... */`, including Javadoc `/** ... */`.
    Block,
    /// `// ...`
    Line,
}

impl CommentStyle {
    /// The opening delimiter, used to name the style in messages.
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Block => "/*",
            Self::Line => "//",
        }
    }
}

/// A comment exactly as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    /// Line of the opening delimiter.
    pub start_line: usize,
    /// Column of the opening delimiter.
    pub start_column: usize,
    /// Line of the closing delimiter (same as `start_line` for line comments).
    pub end_line: usize,
    /// Comment text split into lines, delimiters included.
    pub lines: Vec<String>,
    /// Delimiter style.
    pub style: CommentStyle,
}

impl RawComment {
    /// Creates a comment from its source text.
    #[must_use]
    pub fn new(style: CommentStyle, start_line: usize, start_column: usize, text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let end_line = start_line + lines.len().saturating_sub(1);
        Self {
            start_line,
            start_column,
            end_line,
            lines,
            style,
        }
    }

    /// Returns true for `/** ... */` documentation comments.
    #[must_use]
    pub fn is_javadoc(&self) -> bool {
        self.style == CommentStyle::Block
            && self.lines.first().is_some_and(|l| l.starts_with("/**"))
            && !(self.lines.len() == 1 && self.lines[0] == "/**/")
    }

    /// Every line followed by a newline, as matched by format patterns.
    #[must_use]
    pub fn joined_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Top-level type declarations.
    pub types: Vec<TypeDecl>,
    /// All comments of the file, in source order.
    pub comments: Vec<RawComment>,
    /// Number of lines in the file.
    pub line_count: usize,
}

impl CompilationUnit {
    /// Comments of the given style, in source order.
    pub fn comments_of(&self, style: CommentStyle) -> impl Iterator<Item = &RawComment> {
        self.comments.iter().filter(move |c| c.style == style)
    }
}
