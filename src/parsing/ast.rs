//! Owned top-level AST for one TypeScript file
//!
//! The tree-sitter tree is lowered into this model once per file. Only the
//! shapes the resolver needs are kept: declarations with their type
//! parameters and heritage clauses, import and export bindings. Everything
//! else becomes [`StatementKind::Other`].

use crate::Range;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// A parsed file: ordered top-level statements
#[derive(Debug)]
pub struct SourceFile {
    /// Path the source was actually read from (after extension probing)
    pub path: PathBuf,
    pub statements: Vec<Statement>,
}

#[derive(Debug)]
pub struct Statement {
    pub kind: StatementKind,
    pub range: Range,
}

#[derive(Debug)]
pub enum StatementKind {
    /// `class`, `interface`, `type` or `enum`, possibly exported or `declare`d
    Declaration {
        declaration: Declaration,
        export: ExportModifier,
    },
    /// `export default class { ... }` without a name
    AnonymousDefaultClass,
    /// `export { A as B }` or `export { A as B } from './x'`
    ExportNamed {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
    },
    /// `export * from './x'`
    ExportAll { source: String },
    /// `export * as ns from './x'`
    ExportNamespace { alias: String, source: String },
    Import(ImportStatement),
    /// Any statement the engine does not interpret, by tree-sitter kind
    Other { node_kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportModifier {
    None,
    Named,
    Default,
}

impl ExportModifier {
    pub fn is_exported(&self) -> bool {
        !matches!(self, ExportModifier::None)
    }
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Class(Arc<ClassDecl>),
    Interface(Arc<InterfaceDecl>),
    TypeAlias(Arc<TypeAliasDecl>),
    Enum(Arc<EnumDecl>),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(d) => &d.name,
            Declaration::Interface(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
            Declaration::Enum(d) => &d.name,
        }
    }
}

#[derive(Debug)]
pub struct ClassDecl {
    pub name: String,
    pub is_abstract: bool,
    pub type_parameters: Vec<TypeParameter>,
    /// `extends` clause; TypeScript allows at most one superclass
    pub extends: Option<HeritageRef>,
    pub implements: Vec<HeritageRef>,
    pub doc_comment: Option<String>,
    pub range: Range,
}

#[derive(Debug)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<HeritageRef>,
    pub doc_comment: Option<String>,
    pub range: Range,
}

#[derive(Debug)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub value: TypeNode,
    pub doc_comment: Option<String>,
    pub range: Range,
}

#[derive(Debug)]
pub struct EnumDecl {
    pub name: String,
    pub is_const: bool,
    pub members: Vec<EnumMember>,
    pub doc_comment: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One `<T extends C = D>` entry
#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

/// A type expression kept as its source text and tree-sitter kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    pub text: String,
    pub kind: String,
    #[serde(skip)]
    pub range: Range,
}

/// One entry of an `extends` or `implements` clause
#[derive(Debug, Clone)]
pub struct HeritageRef {
    pub form: HeritageForm,
    /// Source text of the expression, without type arguments
    pub text: String,
    pub type_arguments: Vec<TypeNode>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeritageForm {
    /// `extends B`, `extends B<T>`
    Identifier(String),
    /// `extends ns.B`, `extends mixin(B)`, ...
    Unsupported { node_kind: String },
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier {
    pub name: String,
    pub alias: Option<String>,
    pub range: Range,
}

impl ExportSpecifier {
    /// Name visible to importers of this module
    pub fn exported_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct ImportStatement {
    pub source: String,
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub specifiers: Vec<ImportSpecifier>,
    pub is_type_only: bool,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportSpecifier {
    /// Name the binding is visible under inside the importing file
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
