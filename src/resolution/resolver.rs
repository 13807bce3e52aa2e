//! Reference resolution across files
//!
//! Resolution order for a name in a file, first success wins:
//! 1. exported classes, 2. declared classes,
//! 3. exported interfaces, 4. declared interfaces (interfaces only when asked),
//! 5. named imports, 6. named re-exports,
//! 7. wildcard re-exports in declaration order,
//! then `SymbolNotFound`. Re-exports without a source module
//! (`export { A as B }`) are never followed.

use crate::error::{ResolveError, ResolveResult};
use crate::parsing::AstProvider;
use crate::parsing::ast::SourceFile;
use crate::resolution::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolution::elements::{ClassElements, ModuleTarget, extract};
use crate::resolution::symbol::{
    ClassLoaded, EnumLoaded, InterfaceLoaded, LoadedSymbol, SymbolReference, TypeAliasLoaded,
    generics_from,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which declaration kinds a resolution may return besides classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KindFilter {
    interfaces: bool,
    types: bool,
}

/// State for one top-level resolution request
struct Lookup<'d> {
    filter: KindFilter,
    origin: SymbolReference,
    visited: HashSet<(PathBuf, String)>,
    diagnostics: &'d mut Diagnostics,
}

/// Finds the authoritative declaration behind a [`SymbolReference`]
pub struct ReferenceResolver<'p> {
    provider: &'p dyn AstProvider,
}

impl<'p> ReferenceResolver<'p> {
    pub fn new(provider: &'p dyn AstProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &'p dyn AstProvider {
        self.provider
    }

    /// Resolve a class, or also an interface when `consider_interfaces` is set
    pub fn resolve(
        &self,
        reference: &SymbolReference,
        consider_interfaces: bool,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let filter = KindFilter {
            interfaces: consider_interfaces,
            types: false,
        };
        self.resolve_filtered(reference, filter, diagnostics)
    }

    /// Resolve any declaration kind: class, interface, type alias or enum
    pub fn resolve_type(
        &self,
        reference: &SymbolReference,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let filter = KindFilter {
            interfaces: true,
            types: true,
        };
        self.resolve_filtered(reference, filter, diagnostics)
    }

    /// Parse and classify one file
    pub fn elements(&self, path: &Path) -> ResolveResult<(Arc<SourceFile>, ClassElements)> {
        let ast = self.provider.parse(path)?;
        let elements = extract(&ast)?;
        Ok((ast, elements))
    }

    fn resolve_filtered(
        &self,
        reference: &SymbolReference,
        filter: KindFilter,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let mut lookup = Lookup {
            filter,
            origin: reference.clone(),
            visited: HashSet::new(),
            diagnostics,
        };
        self.lookup(&reference.local_name, &reference.file_name, &mut lookup)
    }

    fn lookup(&self, name: &str, file: &Path, state: &mut Lookup<'_>) -> ResolveResult<LoadedSymbol> {
        let (ast, elements) = self.elements(file)?;

        if !state.visited.insert((ast.path.clone(), name.to_string())) {
            state.diagnostics.push(
                DiagnosticKind::RevisitedReference,
                &ast.path,
                None,
                format!("'{name}' was already visited in this resolution"),
            );
            return Err(ResolveError::symbol_not_found(name, &ast.path));
        }

        tracing::debug!("[resolve] looking up '{name}' in {}", ast.path.display());

        if let Some(found) = self.load_local(name, &ast, &elements, state) {
            return Ok(found);
        }

        if let Some(import) = elements.imported_elements.get(name) {
            return self.follow(&import.imported_name, &import.target, &ast.path, state);
        }

        if let Some(reexport) = elements.exported_imported_elements.get(name) {
            return self.follow(&reexport.local_name, &reexport.target, &ast.path, state);
        }

        for target in &elements.exported_imported_all {
            match self.follow(name, target, &ast.path, state) {
                Ok(found) => return Ok(found),
                Err(e) => {
                    if !matches!(e, ResolveError::SymbolNotFound { .. }) {
                        tracing::warn!(
                            "[resolve] skipping wildcard target of {} for '{name}': {e}",
                            ast.path.display()
                        );
                    }
                    state.diagnostics.push(
                        DiagnosticKind::SuppressedWildcardTarget,
                        &ast.path,
                        None,
                        format!("wildcard target did not provide '{name}': {e}"),
                    );
                }
            }
        }

        if let Some(local) = elements.exported_unknowns.get(name) {
            state.diagnostics.push(
                DiagnosticKind::UnfollowedExport,
                &ast.path,
                None,
                format!("'{name}' is re-exported from local '{local}' without a source module"),
            );
        } else if elements.exported_namespaces.contains_key(name) {
            state.diagnostics.push(
                DiagnosticKind::UnfollowedExport,
                &ast.path,
                None,
                format!("'{name}' is a namespace re-export, not a declaration"),
            );
        }

        Err(ResolveError::symbol_not_found(name, &ast.path))
    }

    fn follow(
        &self,
        name: &str,
        target: &ModuleTarget,
        from: &Path,
        state: &mut Lookup<'_>,
    ) -> ResolveResult<LoadedSymbol> {
        match target {
            ModuleTarget::File(path) => self.lookup(name, path, state),
            ModuleTarget::Package(package) => {
                state.diagnostics.push(
                    DiagnosticKind::PackageTarget,
                    from,
                    None,
                    format!("'{name}' comes from package '{package}', which is not followed"),
                );
                Err(ResolveError::symbol_not_found(name, from))
            }
        }
    }

    /// Steps 1-4 plus type aliases and enums when requested
    fn load_local(
        &self,
        name: &str,
        ast: &Arc<SourceFile>,
        elements: &ClassElements,
        state: &Lookup<'_>,
    ) -> Option<LoadedSymbol> {
        let reference = loaded_reference(name, &ast.path, &state.origin);

        let class = elements
            .exported_classes
            .get(name)
            .or_else(|| elements.declared_classes.get(name));
        if let Some(declaration) = class {
            return Some(LoadedSymbol::Class(ClassLoaded {
                reference,
                ast: Arc::clone(ast),
                declaration: Arc::clone(declaration),
                comment: declaration.doc_comment.clone(),
                generics: generics_from(&declaration.type_parameters),
                is_abstract: declaration.is_abstract,
                super_class: None,
                implements_interfaces: Vec::new(),
            }));
        }

        if state.filter.interfaces {
            let interface = elements
                .exported_interfaces
                .get(name)
                .or_else(|| elements.declared_interfaces.get(name));
            if let Some(declaration) = interface {
                return Some(LoadedSymbol::Interface(InterfaceLoaded {
                    reference,
                    ast: Arc::clone(ast),
                    declaration: Arc::clone(declaration),
                    comment: declaration.doc_comment.clone(),
                    generics: generics_from(&declaration.type_parameters),
                    super_interfaces: Vec::new(),
                }));
            }
        }

        if state.filter.types {
            let alias = elements
                .exported_types
                .get(name)
                .or_else(|| elements.declared_types.get(name));
            if let Some(declaration) = alias {
                return Some(LoadedSymbol::TypeAlias(TypeAliasLoaded {
                    reference,
                    ast: Arc::clone(ast),
                    declaration: Arc::clone(declaration),
                    comment: declaration.doc_comment.clone(),
                    generics: generics_from(&declaration.type_parameters),
                }));
            }

            let enumeration = elements
                .exported_enums
                .get(name)
                .or_else(|| elements.declared_enums.get(name));
            if let Some(declaration) = enumeration {
                return Some(LoadedSymbol::Enum(EnumLoaded {
                    reference,
                    ast: Arc::clone(ast),
                    declaration: Arc::clone(declaration),
                    comment: declaration.doc_comment.clone(),
                }));
            }
        }

        None
    }
}

fn loaded_reference(name: &str, file: &Path, origin: &SymbolReference) -> SymbolReference {
    SymbolReference {
        local_name: name.to_string(),
        file_name: file.to_path_buf(),
        package_name: origin.package_name.clone(),
        qualified_path: origin.qualified_path.clone(),
        file_name_referenced: Some(origin.file_name.clone()),
    }
}
