//! Symbol references and loaded declarations

use crate::SymbolKind;
use crate::parsing::ast::{
    ClassDecl, EnumDecl, EnumMember, InterfaceDecl, SourceFile, TypeAliasDecl, TypeNode,
    TypeParameter,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A symbol named from some file, kind not yet known
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolReference {
    pub local_name: String,
    pub file_name: PathBuf,
    pub package_name: Option<String>,
    pub qualified_path: Option<Vec<String>>,
    /// File the reference was originally made from
    pub file_name_referenced: Option<PathBuf>,
}

impl SymbolReference {
    pub fn new(local_name: impl Into<String>, file_name: impl Into<PathBuf>) -> Self {
        Self {
            local_name: local_name.into(),
            file_name: file_name.into(),
            package_name: None,
            qualified_path: None,
            file_name_referenced: None,
        }
    }

    pub fn with_package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }
}

/// Bounds of one type parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericParameter {
    /// `extends` bound; absent when the parameter is unbounded
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub constraint: Option<TypeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<TypeNode>,
}

/// Type parameters by name, in declaration order
pub type Generics = IndexMap<String, GenericParameter>;

pub fn generics_from(parameters: &[TypeParameter]) -> Generics {
    parameters
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                GenericParameter {
                    constraint: p.constraint.clone(),
                    default: p.default.clone(),
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ClassLoaded {
    pub reference: SymbolReference,
    pub ast: Arc<SourceFile>,
    pub declaration: Arc<ClassDecl>,
    pub comment: Option<String>,
    pub generics: Generics,
    pub is_abstract: bool,
    pub super_class: Option<Box<ClassLoaded>>,
    pub implements_interfaces: Vec<LoadedSymbol>,
}

#[derive(Debug, Clone)]
pub struct InterfaceLoaded {
    pub reference: SymbolReference,
    pub ast: Arc<SourceFile>,
    pub declaration: Arc<InterfaceDecl>,
    pub comment: Option<String>,
    pub generics: Generics,
    pub super_interfaces: Vec<InterfaceLoaded>,
}

#[derive(Debug, Clone)]
pub struct TypeAliasLoaded {
    pub reference: SymbolReference,
    pub ast: Arc<SourceFile>,
    pub declaration: Arc<TypeAliasDecl>,
    pub comment: Option<String>,
    pub generics: Generics,
}

#[derive(Debug, Clone)]
pub struct EnumLoaded {
    pub reference: SymbolReference,
    pub ast: Arc<SourceFile>,
    pub declaration: Arc<EnumDecl>,
    pub comment: Option<String>,
}

/// The authoritative declaration a reference resolved to
#[derive(Debug, Clone)]
pub enum LoadedSymbol {
    Class(ClassLoaded),
    Interface(InterfaceLoaded),
    TypeAlias(TypeAliasLoaded),
    Enum(EnumLoaded),
}

impl LoadedSymbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            LoadedSymbol::Class(_) => SymbolKind::Class,
            LoadedSymbol::Interface(_) => SymbolKind::Interface,
            LoadedSymbol::TypeAlias(_) => SymbolKind::TypeAlias,
            LoadedSymbol::Enum(_) => SymbolKind::Enum,
        }
    }

    pub fn reference(&self) -> &SymbolReference {
        match self {
            LoadedSymbol::Class(s) => &s.reference,
            LoadedSymbol::Interface(s) => &s.reference,
            LoadedSymbol::TypeAlias(s) => &s.reference,
            LoadedSymbol::Enum(s) => &s.reference,
        }
    }

    pub fn name(&self) -> &str {
        &self.reference().local_name
    }

    pub fn file_name(&self) -> &Path {
        &self.reference().file_name
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            LoadedSymbol::Class(s) => s.comment.as_deref(),
            LoadedSymbol::Interface(s) => s.comment.as_deref(),
            LoadedSymbol::TypeAlias(s) => s.comment.as_deref(),
            LoadedSymbol::Enum(s) => s.comment.as_deref(),
        }
    }

    /// Enums carry no type parameters
    pub fn generics(&self) -> Option<&Generics> {
        match self {
            LoadedSymbol::Class(s) => Some(&s.generics),
            LoadedSymbol::Interface(s) => Some(&s.generics),
            LoadedSymbol::TypeAlias(s) => Some(&s.generics),
            LoadedSymbol::Enum(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassLoaded> {
        match self {
            LoadedSymbol::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceLoaded> {
        match self {
            LoadedSymbol::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    /// Serializable view of this symbol and every link loaded so far
    pub fn summary(&self) -> SymbolSummary {
        let mut summary = SymbolSummary {
            name: self.name().to_string(),
            kind: self.kind(),
            file: self.file_name().to_path_buf(),
            comment: self.comment().map(str::to_string),
            generics: self.generics().cloned().unwrap_or_default(),
            is_abstract: None,
            super_class: None,
            implements: Vec::new(),
            super_interfaces: Vec::new(),
            members: Vec::new(),
        };

        match self {
            LoadedSymbol::Class(class) => {
                summary.is_abstract = Some(class.is_abstract);
                summary.super_class = class
                    .super_class
                    .as_ref()
                    .map(|parent| Box::new(LoadedSymbol::Class((**parent).clone()).summary()));
                summary.implements = class
                    .implements_interfaces
                    .iter()
                    .map(LoadedSymbol::summary)
                    .collect();
            }
            LoadedSymbol::Interface(interface) => {
                summary.super_interfaces = interface
                    .super_interfaces
                    .iter()
                    .map(|parent| LoadedSymbol::Interface(parent.clone()).summary())
                    .collect();
            }
            LoadedSymbol::Enum(loaded) => {
                summary.members = loaded.declaration.members.clone();
            }
            LoadedSymbol::TypeAlias(_) => {}
        }

        summary
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSummary {
    pub name: String,
    pub kind: SymbolKind,
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub generics: Generics,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class: Option<Box<SymbolSummary>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<SymbolSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub super_interfaces: Vec<SymbolSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<EnumMember>,
}
