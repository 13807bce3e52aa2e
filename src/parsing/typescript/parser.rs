//! TypeScript parser implementation
//!
//! **Tree-sitter grammar**: tree-sitter-typescript 0.23 (`typescript` and `tsx` dialects)
//!
//! Lowers the top level of a tree-sitter CST into [`SourceFile`]. Only
//! top-level statements are visited; class and interface bodies are never
//! entered because resolution works on declarations and bindings only.

use crate::Range;
use crate::error::{ParseError, ParseResult};
use crate::parsing::ast::{
    ClassDecl, Declaration, EnumDecl, EnumMember, ExportModifier, ExportSpecifier, HeritageForm,
    HeritageRef, ImportSpecifier, ImportStatement, InterfaceDecl, SourceFile, Statement,
    StatementKind, TypeAliasDecl, TypeNode, TypeParameter,
};
use std::path::Path;
use std::sync::Arc;
use tree_sitter::{Language, Node, Parser};

/// TypeScript language parser
pub struct TypeScriptParser {
    parser: Parser,
}

impl TypeScriptParser {
    /// Create a parser for the dialect matching `path` (`.tsx` gets the TSX grammar)
    pub fn for_path(path: &Path) -> ParseResult<Self> {
        let is_tsx = path.extension().is_some_and(|ext| ext == "tsx");
        let language: Language = if is_tsx {
            tree_sitter_typescript::LANGUAGE_TSX.into()
        } else {
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
        };

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::ParserInit {
                reason: format!("Failed to set TypeScript language: {e}"),
            })?;

        Ok(Self { parser })
    }

    /// Parse TypeScript source code into its top-level statements
    pub fn parse(&mut self, path: &Path, code: &str) -> ParseResult<SourceFile> {
        let tree = self
            .parser
            .parse(code, None)
            .ok_or_else(|| ParseError::SyntaxError {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
                reason: "parser produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let offending = first_error_node(root).unwrap_or(root);
            let range = node_range(offending);
            let reason = if offending.is_missing() {
                format!("missing '{}'", offending.kind())
            } else {
                let text = node_text(offending, code);
                let snippet: String = text.chars().take(40).collect();
                format!("unexpected '{snippet}'")
            };
            return Err(ParseError::SyntaxError {
                path: path.to_path_buf(),
                line: range.line(),
                column: range.column(),
                reason,
            });
        }

        let mut statements = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            statements.push(Statement {
                kind: self.lower_statement(child, code),
                range: node_range(child),
            });
        }

        Ok(SourceFile {
            path: path.to_path_buf(),
            statements,
        })
    }

    fn lower_statement(&self, node: Node, code: &str) -> StatementKind {
        match node.kind() {
            "export_statement" => self.lower_export(node, code),
            "import_statement" => self.lower_import(node, code),
            _ => match self.lower_declaration(node, node, code) {
                Some(declaration) => StatementKind::Declaration {
                    declaration,
                    export: ExportModifier::None,
                },
                None => StatementKind::Other {
                    node_kind: node.kind().to_string(),
                },
            },
        }
    }

    /// Lower a declaration node; `statement` is the top-level node owning the doc comment
    fn lower_declaration(&self, node: Node, statement: Node, code: &str) -> Option<Declaration> {
        match node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => self
                .lower_class(node, statement, code)
                .map(|class| Declaration::Class(Arc::new(class))),
            "interface_declaration" => Some(Declaration::Interface(Arc::new(
                self.lower_interface(node, statement, code)?,
            ))),
            "type_alias_declaration" => Some(Declaration::TypeAlias(Arc::new(
                self.lower_type_alias(node, statement, code)?,
            ))),
            "enum_declaration" => Some(Declaration::Enum(Arc::new(
                self.lower_enum(node, statement, code)?,
            ))),
            // `declare class A {}` wraps the real declaration
            "ambient_declaration" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() != "comment")?;
                self.lower_declaration(inner, statement, code)
            }
            _ => None,
        }
    }

    fn lower_export(&self, node: Node, code: &str) -> StatementKind {
        let is_default = has_token(node, "default");

        if let Some(declaration) = node.child_by_field_name("declaration") {
            return match self.lower_declaration(declaration, node, code) {
                Some(declaration) => StatementKind::Declaration {
                    declaration,
                    export: if is_default {
                        ExportModifier::Default
                    } else {
                        ExportModifier::Named
                    },
                },
                None => StatementKind::Other {
                    node_kind: declaration.kind().to_string(),
                },
            };
        }

        if let Some(value) = node.child_by_field_name("value") {
            if value.kind() == "class" {
                return match self.lower_declaration(value, node, code) {
                    Some(declaration) => StatementKind::Declaration {
                        declaration,
                        export: ExportModifier::Default,
                    },
                    None => StatementKind::AnonymousDefaultClass,
                };
            }
            return StatementKind::Other {
                node_kind: "export_default_expression".to_string(),
            };
        }

        let source = node
            .child_by_field_name("source")
            .map(|s| unquote(node_text(s, code)));

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "export_clause" => {
                    return StatementKind::ExportNamed {
                        specifiers: self.lower_export_clause(child, code),
                        source,
                    };
                }
                "namespace_export" => {
                    let alias = child
                        .named_child(0)
                        .map(|n| unquote(node_text(n, code)))
                        .unwrap_or_default();
                    return match source {
                        Some(source) => StatementKind::ExportNamespace { alias, source },
                        None => StatementKind::Other {
                            node_kind: "namespace_export".to_string(),
                        },
                    };
                }
                "*" => {
                    if let Some(source) = source {
                        return StatementKind::ExportAll { source };
                    }
                }
                _ => {}
            }
        }

        StatementKind::Other {
            node_kind: node.kind().to_string(),
        }
    }

    fn lower_export_clause(&self, clause: Node, code: &str) -> Vec<ExportSpecifier> {
        let mut specifiers = Vec::new();
        let mut cursor = clause.walk();
        for specifier in clause.named_children(&mut cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(name) = specifier.child_by_field_name("name") else {
                continue;
            };
            specifiers.push(ExportSpecifier {
                name: unquote(node_text(name, code)),
                alias: specifier
                    .child_by_field_name("alias")
                    .map(|a| unquote(node_text(a, code))),
                range: node_range(specifier),
            });
        }
        specifiers
    }

    fn lower_import(&self, node: Node, code: &str) -> StatementKind {
        let Some(source) = node.child_by_field_name("source") else {
            return StatementKind::Other {
                node_kind: node.kind().to_string(),
            };
        };

        let mut import = ImportStatement {
            source: unquote(node_text(source, code)),
            default: None,
            namespace: None,
            specifiers: Vec::new(),
            is_type_only: false,
        };

        let mut cursor = node.walk();
        for (i, child) in node.children(&mut cursor).enumerate() {
            // `import type { Foo } from './foo'`
            if child.kind() == "type" && i == 1 {
                import.is_type_only = true;
            }
            if child.kind() != "import_clause" {
                continue;
            }
            let mut clause_cursor = child.walk();
            for part in child.named_children(&mut clause_cursor) {
                match part.kind() {
                    "identifier" => import.default = Some(node_text(part, code).to_string()),
                    "namespace_import" => {
                        let mut ns_cursor = part.walk();
                        import.namespace = part
                            .named_children(&mut ns_cursor)
                            .filter(|n| n.kind() == "identifier")
                            .last()
                            .map(|n| node_text(n, code).to_string());
                    }
                    "named_imports" => {
                        let mut named_cursor = part.walk();
                        for specifier in part.named_children(&mut named_cursor) {
                            if specifier.kind() != "import_specifier" {
                                continue;
                            }
                            let Some(name) = specifier.child_by_field_name("name") else {
                                continue;
                            };
                            import.specifiers.push(ImportSpecifier {
                                name: unquote(node_text(name, code)),
                                alias: specifier
                                    .child_by_field_name("alias")
                                    .map(|a| node_text(a, code).to_string()),
                            });
                        }
                    }
                    _ => {}
                }
            }
        }

        StatementKind::Import(import)
    }

    fn lower_class(&self, node: Node, statement: Node, code: &str) -> Option<ClassDecl> {
        // For abstract classes, the name isn't always exposed as a field
        let name = node
            .child_by_field_name("name")
            .or_else(|| {
                let mut cursor = node.walk();
                node.children(&mut cursor)
                    .find(|n| n.kind() == "type_identifier")
            })
            .map(|n| node_text(n, code).to_string())?;

        let mut extends = None;
        let mut implements = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "class_heritage" {
                continue;
            }
            let mut heritage_cursor = child.walk();
            for clause in child.children(&mut heritage_cursor) {
                match clause.kind() {
                    "extends_clause" => extends = self.lower_extends_clause(clause, code),
                    "implements_clause" => {
                        let mut impl_cursor = clause.walk();
                        implements.extend(
                            clause
                                .named_children(&mut impl_cursor)
                                .filter(|t| t.kind() != "comment")
                                .map(|t| self.lower_type_heritage(t, code)),
                        );
                    }
                    _ => {}
                }
            }
        }

        Some(ClassDecl {
            name,
            is_abstract: node.kind() == "abstract_class_declaration" || has_token(node, "abstract"),
            type_parameters: self.lower_type_parameters(node, code),
            extends,
            implements,
            doc_comment: doc_comment(statement, code),
            range: node_range(node),
        })
    }

    /// Class `extends` holds an expression, not a type
    fn lower_extends_clause(&self, clause: Node, code: &str) -> Option<HeritageRef> {
        let value = clause.child_by_field_name("value").or_else(|| {
            let mut cursor = clause.walk();
            clause
                .named_children(&mut cursor)
                .find(|n| n.kind() != "type_arguments" && n.kind() != "comment")
        })?;

        let form = match value.kind() {
            "identifier" | "type_identifier" => {
                HeritageForm::Identifier(node_text(value, code).to_string())
            }
            other => HeritageForm::Unsupported {
                node_kind: other.to_string(),
            },
        };

        Some(HeritageRef {
            form,
            text: node_text(value, code).to_string(),
            type_arguments: clause
                .child_by_field_name("type_arguments")
                .map(|args| self.lower_type_arguments(args, code))
                .unwrap_or_default(),
            range: node_range(value),
        })
    }

    /// `implements` entries and interface `extends` entries are types
    fn lower_type_heritage(&self, node: Node, code: &str) -> HeritageRef {
        let (form, text, type_arguments) = match node.kind() {
            "type_identifier" | "identifier" => (
                HeritageForm::Identifier(node_text(node, code).to_string()),
                node_text(node, code).to_string(),
                Vec::new(),
            ),
            "generic_type" => {
                let name = node.child_by_field_name("name");
                let arguments = node
                    .child_by_field_name("type_arguments")
                    .map(|args| self.lower_type_arguments(args, code))
                    .unwrap_or_default();
                match name {
                    Some(name) if name.kind() == "type_identifier" => (
                        HeritageForm::Identifier(node_text(name, code).to_string()),
                        node_text(name, code).to_string(),
                        arguments,
                    ),
                    Some(name) => (
                        HeritageForm::Unsupported {
                            node_kind: name.kind().to_string(),
                        },
                        node_text(name, code).to_string(),
                        arguments,
                    ),
                    None => (
                        HeritageForm::Unsupported {
                            node_kind: node.kind().to_string(),
                        },
                        node_text(node, code).to_string(),
                        arguments,
                    ),
                }
            }
            other => (
                HeritageForm::Unsupported {
                    node_kind: other.to_string(),
                },
                node_text(node, code).to_string(),
                Vec::new(),
            ),
        };

        HeritageRef {
            form,
            text,
            type_arguments,
            range: node_range(node),
        }
    }

    fn lower_interface(&self, node: Node, statement: Node, code: &str) -> Option<InterfaceDecl> {
        let name = node.child_by_field_name("name")?;

        let mut extends = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "extends_type_clause" && child.kind() != "extends_clause" {
                continue;
            }
            let mut type_cursor = child.walk();
            let types: Vec<Node> = child.children_by_field_name("type", &mut type_cursor).collect();
            if types.is_empty() {
                let mut fallback = child.walk();
                extends.extend(
                    child
                        .named_children(&mut fallback)
                        .filter(|t| t.kind() != "comment")
                        .map(|t| self.lower_type_heritage(t, code)),
                );
            } else {
                extends.extend(types.into_iter().map(|t| self.lower_type_heritage(t, code)));
            }
        }

        Some(InterfaceDecl {
            name: node_text(name, code).to_string(),
            type_parameters: self.lower_type_parameters(node, code),
            extends,
            doc_comment: doc_comment(statement, code),
            range: node_range(node),
        })
    }

    fn lower_type_alias(&self, node: Node, statement: Node, code: &str) -> Option<TypeAliasDecl> {
        let name = node.child_by_field_name("name")?;
        let value = node.child_by_field_name("value")?;

        Some(TypeAliasDecl {
            name: node_text(name, code).to_string(),
            type_parameters: self.lower_type_parameters(node, code),
            value: type_node(value, code),
            doc_comment: doc_comment(statement, code),
            range: node_range(node),
        })
    }

    fn lower_enum(&self, node: Node, statement: Node, code: &str) -> Option<EnumDecl> {
        let name = node.child_by_field_name("name")?;

        let mut members = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "comment" => {}
                    "enum_assignment" => {
                        if let Some(member_name) = member.child_by_field_name("name") {
                            members.push(EnumMember {
                                name: unquote(node_text(member_name, code)),
                                value: member
                                    .child_by_field_name("value")
                                    .map(|v| node_text(v, code).to_string()),
                            });
                        }
                    }
                    _ => members.push(EnumMember {
                        name: unquote(node_text(member, code)),
                        value: None,
                    }),
                }
            }
        }

        Some(EnumDecl {
            name: node_text(name, code).to_string(),
            is_const: has_token(node, "const"),
            members,
            doc_comment: doc_comment(statement, code),
            range: node_range(node),
        })
    }

    fn lower_type_parameters(&self, node: Node, code: &str) -> Vec<TypeParameter> {
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };

        let mut parameters = Vec::new();
        let mut cursor = list.walk();
        for parameter in list.named_children(&mut cursor) {
            if parameter.kind() != "type_parameter" {
                continue;
            }
            let Some(name) = parameter.child_by_field_name("name") else {
                continue;
            };
            // `constraint` and `default_type` wrap the actual type node
            let constraint = parameter
                .child_by_field_name("constraint")
                .and_then(|c| c.named_child(0))
                .map(|t| type_node(t, code));
            let default = parameter
                .child_by_field_name("value")
                .and_then(|d| d.named_child(0))
                .map(|t| type_node(t, code));

            parameters.push(TypeParameter {
                name: node_text(name, code).to_string(),
                constraint,
                default,
            });
        }
        parameters
    }

    fn lower_type_arguments(&self, node: Node, code: &str) -> Vec<TypeNode> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| type_node(n, code))
            .collect()
    }
}

/// Extract the nearest preceding JSDoc/TSDoc comment (`/** ... */`)
///
/// Only comments directly above the statement are considered; the search
/// stops at the first sibling that is not a comment.
fn doc_comment(statement: Node, code: &str) -> Option<String> {
    let mut previous = statement.prev_sibling();
    while let Some(prev) = previous {
        if prev.kind() != "comment" {
            return None;
        }
        let comment = node_text(prev, code);
        if comment.starts_with("/**") {
            let cleaned = clean_doc_comment(comment);
            return if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            };
        }
        previous = prev.prev_sibling();
    }
    None
}

fn clean_doc_comment(comment: &str) -> String {
    comment
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error_node(child) {
                return Some(found);
            }
        }
    }
    None
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == token)
}

fn type_node(node: Node, code: &str) -> TypeNode {
    TypeNode {
        text: node_text(node, code).to_string(),
        kind: node.kind().to_string(),
        range: node_range(node),
    }
}

fn node_text<'a>(node: Node, code: &'a str) -> &'a str {
    &code[node.byte_range()]
}

fn node_range(node: Node) -> Range {
    let (start, end) = (node.start_position(), node.end_position());
    Range::new(
        saturate(start.row),
        saturate(start.column),
        saturate(end.row),
        saturate(end.column),
    )
}

/// Minified declaration files can put a whole module on one line
fn saturate(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
