//! Lowering of tree-sitter-java nodes into the doclint syntax tree.

use doclint_core::tree::{
    Block, CommentStyle, CompilationUnit, Ident, Initializer, Member, MethodDecl, MethodKind,
    Modifiers, RawComment, ReturnType, Statement, StatementKind, TypeDecl, TypeKind, Visibility,
};
use tree_sitter::Node;

fn line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

fn end_line(node: Node<'_>) -> usize {
    node.end_position().row + 1
}

fn column(node: Node<'_>) -> usize {
    node.start_position().column
}

/// Named children, without comments.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|child| child.kind() == kind)
}

fn type_kind(kind: &str) -> Option<TypeKind> {
    match kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "annotation_type_declaration" => Some(TypeKind::Annotation),
        "record_declaration" => Some(TypeKind::Record),
        _ => None,
    }
}

fn method_kind(kind: &str) -> Option<MethodKind> {
    match kind {
        "method_declaration" => Some(MethodKind::Method),
        "constructor_declaration" | "compact_constructor_declaration" => {
            Some(MethodKind::Constructor)
        }
        "annotation_type_element_declaration" => Some(MethodKind::AnnotationElement),
        _ => None,
    }
}

/// Returns the first syntax error or missing token below `node`.
pub(crate) fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    children(node).into_iter().find_map(first_error)
}

/// Converts nodes of one parsed file.
pub(crate) struct Lowering<'s> {
    src: &'s [u8],
}

impl<'s> Lowering<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self {
            src: src.as_bytes(),
        }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn ident(&self, node: Node<'_>) -> Ident {
        Ident::new(self.text(node), line(node), column(node))
    }

    pub(crate) fn unit(&self, root: Node<'_>, line_count: usize) -> CompilationUnit {
        let types = named_children(root)
            .into_iter()
            .filter_map(|child| self.type_decl(child))
            .collect();

        let mut comments = Vec::new();
        self.collect_comments(root, &mut comments);

        CompilationUnit {
            types,
            comments,
            line_count,
        }
    }

    fn type_decl(&self, node: Node<'_>) -> Option<TypeDecl> {
        let kind = type_kind(node.kind())?;
        let body = node.child_by_field_name("body");

        let mut members = Vec::new();
        if let Some(body) = body {
            self.members(body, &mut members);
        }

        Some(TypeDecl {
            kind,
            name: node
                .child_by_field_name("name")
                .map(|name| self.text(name).to_string())
                .unwrap_or_default(),
            line: line(node),
            column: column(node),
            end_line: body.map_or_else(|| end_line(node), end_line),
            modifiers: self.modifiers(node),
            type_params: self.type_params(node),
            superclass: self.superclass(node),
            members,
        })
    }

    fn anonymous(&self, body: Node<'_>) -> TypeDecl {
        let mut members = Vec::new();
        self.members(body, &mut members);
        TypeDecl {
            kind: TypeKind::Anonymous,
            name: String::new(),
            line: line(body),
            column: column(body),
            end_line: end_line(body),
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            superclass: None,
            members,
        }
    }

    fn members(&self, body: Node<'_>, out: &mut Vec<Member>) {
        for child in named_children(body) {
            if let Some(kind) = method_kind(child.kind()) {
                out.push(Member::Method(self.method(child, kind)));
            } else if child.kind() == "static_initializer" {
                if let Some(init) = self.initializer(child) {
                    out.push(Member::StaticInit(init));
                }
            } else if child.kind() == "enum_body_declarations" {
                self.members(child, out);
            } else if let Some(decl) = self.type_decl(child) {
                out.push(Member::Type(decl));
            } else {
                self.initializer_types(child, out);
            }
        }
    }

    /// Types declared inside field initializers and enum constants.
    fn initializer_types(&self, node: Node<'_>, out: &mut Vec<Member>) {
        let mut found = Vec::new();
        for child in named_children(node) {
            if node.kind() == "enum_constant" && child.kind() == "class_body" {
                found.push(self.anonymous(child));
            } else {
                self.nested_types(child, &mut found);
            }
        }
        out.extend(found.into_iter().map(Member::Type));
    }

    fn method(&self, node: Node<'_>, kind: MethodKind) -> MethodDecl {
        let name = node.child_by_field_name("name").map_or_else(
            || Ident::new("", line(node), column(node)),
            |name| self.ident(name),
        );
        let returns = match node.child_by_field_name("type") {
            Some(ty) if ty.kind() != "void_type" => ReturnType::Value,
            _ => ReturnType::Void,
        };

        MethodDecl {
            kind,
            name,
            line: line(node),
            column: column(node),
            end_line: end_line(node),
            modifiers: self.modifiers(node),
            type_params: self.type_params(node),
            params: self.params(node),
            throws: self.throws(node),
            returns,
            body: node.child_by_field_name("body").map(|body| self.block(body)),
        }
    }

    fn initializer(&self, node: Node<'_>) -> Option<Initializer> {
        let body = child_of_kind(node, "block")?;
        Some(Initializer {
            line: line(node),
            body: self.block(body),
        })
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        let Some(list) = child_of_kind(node, "modifiers") else {
            return modifiers;
        };

        for child in children(list) {
            match child.kind() {
                "public" => modifiers.visibility = Some(Visibility::Public),
                "protected" => modifiers.visibility = Some(Visibility::Protected),
                "private" => modifiers.visibility = Some(Visibility::Private),
                "static" => modifiers.is_static = true,
                "final" => modifiers.is_final = true,
                "abstract" => modifiers.is_abstract = true,
                "marker_annotation" | "annotation" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        modifiers.annotations.push(self.text(name).to_string());
                    }
                }
                _ => {}
            }
        }
        modifiers
    }

    fn type_params(&self, node: Node<'_>) -> Vec<Ident> {
        let Some(list) = child_of_kind(node, "type_parameters") else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|param| param.kind() == "type_parameter")
            .filter_map(|param| child_of_kind(param, "type_identifier"))
            .map(|name| self.ident(name))
            .collect()
    }

    fn params(&self, node: Node<'_>) -> Vec<Ident> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter_map(|param| match param.kind() {
                "formal_parameter" => param.child_by_field_name("name"),
                "spread_parameter" => child_of_kind(param, "variable_declarator")
                    .and_then(|decl| decl.child_by_field_name("name"))
                    .or_else(|| child_of_kind(param, "identifier")),
                _ => None,
            })
            .map(|name| self.ident(name))
            .collect()
    }

    fn throws(&self, node: Node<'_>) -> Vec<Ident> {
        child_of_kind(node, "throws").map_or_else(Vec::new, |list| {
            named_children(list)
                .into_iter()
                .map(|ty| self.ident(ty))
                .collect()
        })
    }

    fn superclass(&self, node: Node<'_>) -> Option<String> {
        let clause = child_of_kind(node, "superclass")?;
        let ty = named_children(clause).into_iter().next()?;
        let name = self.text(ty);
        Some(name.split('<').next().unwrap_or(name).trim().to_string())
    }

    fn block(&self, node: Node<'_>) -> Block {
        Block {
            open_line: line(node),
            close_line: end_line(node),
            statements: named_children(node)
                .into_iter()
                .map(|stmt| self.statement(stmt))
                .collect(),
        }
    }

    fn statement(&self, node: Node<'_>) -> Statement {
        let kind = match node.kind() {
            "expression_statement" => {
                let plain_assignment = named_children(node).first().is_some_and(|expr| {
                    expr.kind() == "assignment_expression"
                        && expr
                            .child_by_field_name("operator")
                            .is_some_and(|op| op.kind() == "=")
                });
                if plain_assignment {
                    StatementKind::Assignment
                } else {
                    StatementKind::Other
                }
            }
            "return_statement" => StatementKind::Return {
                has_value: !named_children(node).is_empty(),
            },
            _ => StatementKind::Other,
        };

        let mut nested_types = Vec::new();
        self.nested_types(node, &mut nested_types);

        Statement {
            line: line(node),
            end_line: end_line(node),
            kind,
            nested_types,
        }
    }

    /// Collects local classes and anonymous class bodies, outermost only.
    fn nested_types(&self, node: Node<'_>, out: &mut Vec<TypeDecl>) {
        if let Some(decl) = self.type_decl(node) {
            out.push(decl);
            return;
        }

        let mut anonymous_body = None;
        for child in named_children(node) {
            if node.kind() == "object_creation_expression" && child.kind() == "class_body" {
                anonymous_body = Some(child);
            } else {
                self.nested_types(child, out);
            }
        }
        if let Some(body) = anonymous_body {
            out.push(self.anonymous(body));
        }
    }

    fn collect_comments(&self, node: Node<'_>, out: &mut Vec<RawComment>) {
        let style = match node.kind() {
            "line_comment" => Some(CommentStyle::Line),
            "block_comment" => Some(CommentStyle::Block),
            _ => None,
        };
        if let Some(style) = style {
            let text = self.text(node).trim_end_matches(['\r', '\n']);
            out.push(RawComment::new(style, line(node), column(node), text));
            return;
        }

        for child in children(node) {
            self.collect_comments(child, out);
        }
    }
}
