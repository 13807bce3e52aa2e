//! Declaration extraction
//!
//! Classifies the top-level statements of one file into the indexes the
//! resolver consults: exported and declared declarations, import bindings,
//! and re-export bindings with their target modules.

use crate::error::{ResolveError, ResolveResult};
use crate::parsing::ast::{
    ClassDecl, Declaration, EnumDecl, InterfaceDecl, SourceFile, StatementKind, TypeAliasDecl,
};
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Declarations or bindings by name; a later entry replaces an earlier one
pub type ClassIndex<T> = IndexMap<String, T>;

/// Where a module specifier points
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleTarget {
    /// Relative specifier resolved against the referencing file's directory
    File(PathBuf),
    /// Bare package specifier; recorded, never followed
    Package(String),
}

/// `import { A as B } from './x'` seen from `B`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedElement {
    pub imported_name: String,
    pub target: ModuleTarget,
}

/// `export { A as B } from './x'` seen from `B`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReexportedElement {
    pub local_name: String,
    pub target: ModuleTarget,
}

#[derive(Debug, Default)]
pub struct ClassElements {
    pub exported_classes: ClassIndex<Arc<ClassDecl>>,
    pub exported_interfaces: ClassIndex<Arc<InterfaceDecl>>,
    pub exported_types: ClassIndex<Arc<TypeAliasDecl>>,
    pub exported_enums: ClassIndex<Arc<EnumDecl>>,
    pub exported_imported_elements: ClassIndex<ReexportedElement>,
    pub exported_imported_all: Vec<ModuleTarget>,
    /// `export { A as B }` without a source: B -> A, terminal
    pub exported_unknowns: ClassIndex<String>,
    /// `export * as ns from './x'`: ns -> target, terminal
    pub exported_namespaces: ClassIndex<ModuleTarget>,
    pub declared_classes: ClassIndex<Arc<ClassDecl>>,
    pub declared_interfaces: ClassIndex<Arc<InterfaceDecl>>,
    pub declared_types: ClassIndex<Arc<TypeAliasDecl>>,
    pub declared_enums: ClassIndex<Arc<EnumDecl>>,
    pub imported_elements: ClassIndex<ImportedElement>,
}

/// Classify one file's top-level statements
pub fn extract(file: &SourceFile) -> ResolveResult<ClassElements> {
    let mut elements = ClassElements::default();

    for statement in &file.statements {
        match &statement.kind {
            StatementKind::AnonymousDefaultClass => {
                return Err(ResolveError::MalformedExport {
                    path: file.path.clone(),
                    line: statement.range.line(),
                    column: statement.range.column(),
                    reason: "exported class has no name".to_string(),
                });
            }
            StatementKind::Declaration {
                declaration,
                export,
            } => {
                let name = declaration.name().to_string();
                match (declaration, export.is_exported()) {
                    (Declaration::Class(d), true) => {
                        elements.exported_classes.insert(name, Arc::clone(d));
                    }
                    (Declaration::Interface(d), true) => {
                        elements.exported_interfaces.insert(name, Arc::clone(d));
                    }
                    (Declaration::TypeAlias(d), true) => {
                        elements.exported_types.insert(name, Arc::clone(d));
                    }
                    (Declaration::Enum(d), true) => {
                        elements.exported_enums.insert(name, Arc::clone(d));
                    }
                    (Declaration::Class(d), false) => {
                        elements.declared_classes.insert(name, Arc::clone(d));
                    }
                    (Declaration::Interface(d), false) => {
                        elements.declared_interfaces.insert(name, Arc::clone(d));
                    }
                    (Declaration::TypeAlias(d), false) => {
                        elements.declared_types.insert(name, Arc::clone(d));
                    }
                    (Declaration::Enum(d), false) => {
                        elements.declared_enums.insert(name, Arc::clone(d));
                    }
                }
            }
            StatementKind::ExportNamed {
                specifiers,
                source: Some(source),
            } => {
                let target = resolve_module(source, &file.path);
                for specifier in specifiers {
                    elements.exported_imported_elements.insert(
                        specifier.exported_name().to_string(),
                        ReexportedElement {
                            local_name: specifier.name.clone(),
                            target: target.clone(),
                        },
                    );
                }
            }
            StatementKind::ExportNamed {
                specifiers,
                source: None,
            } => {
                for specifier in specifiers {
                    elements.exported_unknowns.insert(
                        specifier.exported_name().to_string(),
                        specifier.name.clone(),
                    );
                }
            }
            StatementKind::ExportAll { source } => {
                elements
                    .exported_imported_all
                    .push(resolve_module(source, &file.path));
            }
            StatementKind::ExportNamespace { alias, source } => {
                elements
                    .exported_namespaces
                    .insert(alias.clone(), resolve_module(source, &file.path));
            }
            StatementKind::Import(import) => {
                let target = resolve_module(&import.source, &file.path);
                for specifier in &import.specifiers {
                    elements.imported_elements.insert(
                        specifier.local_name().to_string(),
                        ImportedElement {
                            imported_name: specifier.name.clone(),
                            target: target.clone(),
                        },
                    );
                }
            }
            StatementKind::Other { .. } => {}
        }
    }

    Ok(elements)
}

/// Resolve a module specifier relative to the file that contains it
pub fn resolve_module(specifier: &str, from_file: &Path) -> ModuleTarget {
    let is_relative = specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || Path::new(specifier).is_absolute();

    if !is_relative {
        return ModuleTarget::Package(specifier.to_string());
    }

    let directory = from_file.parent().unwrap_or_else(|| Path::new(""));
    ModuleTarget::File(normalize_path(&directory.join(specifier)))
}

/// Lexically normalize `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
