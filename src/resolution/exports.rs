//! Classes reachable as exports from an entry file

use crate::error::{ResolveError, ResolveResult};
use crate::resolution::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolution::elements::ModuleTarget;
use crate::resolution::resolver::ReferenceResolver;
use crate::resolution::symbol::SymbolReference;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One class a consumer of the entry file can import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedClass {
    /// File the export was found through
    pub via: PathBuf,
    pub declared_name: String,
    pub declared_in: PathBuf,
}

/// Exported class names in enumeration order, plus the named re-exports
/// whose targets could not be resolved
#[derive(Debug, Default)]
pub struct ExportedClasses {
    classes: IndexMap<String, ExportedClass>,
    failed: Vec<(String, ResolveError)>,
    /// (declared_in, declared_name) -> first exported name
    by_declaration: HashMap<(PathBuf, String), String>,
}

impl ExportedClasses {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ExportedClass> {
        self.classes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportedClass)> {
        self.classes.iter().map(|(name, class)| (name.as_str(), class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Named re-exports that failed for a reason other than a missing name
    pub fn failed(&self) -> &[(String, ResolveError)] {
        &self.failed
    }

    pub fn into_failed(self) -> Vec<(String, ResolveError)> {
        self.failed
    }

    /// Public name of the class declared as `declared_name` in `declared_in`
    ///
    /// When a class is exported under several names the first one wins.
    pub fn exported_name(&self, declared_in: &Path, declared_name: &str) -> Option<&str> {
        self.by_declaration
            .get(&(declared_in.to_path_buf(), declared_name.to_string()))
            .map(String::as_str)
    }

    /// A name is taken once exported or once its explicit re-export failed
    fn is_taken(&self, name: &str) -> bool {
        self.classes.contains_key(name) || self.failed.iter().any(|(failed, _)| failed == name)
    }

    fn insert(&mut self, name: &str, class: ExportedClass) {
        if self.is_taken(name) {
            return;
        }
        self.by_declaration
            .entry((class.declared_in.clone(), class.declared_name.clone()))
            .or_insert_with(|| name.to_string());
        self.classes.insert(name.to_string(), class);
    }
}

/// List every class name a consumer of `entry` can import
///
/// Direct class exports come first, then named re-exports that resolve to a
/// class, then wildcard targets in declaration order. The first file to
/// export a name wins. Sourceless re-exports and namespace re-exports are
/// not followed. Only a broken entry file is an error; a named re-export
/// that fails is kept in [`ExportedClasses::failed`] and its name is not
/// taken from later wildcard targets.
pub fn exported_classes(
    resolver: &ReferenceResolver<'_>,
    entry: &Path,
    diagnostics: &mut Diagnostics,
) -> ResolveResult<ExportedClasses> {
    let mut found = ExportedClasses::default();
    let mut visited = HashSet::new();
    collect(resolver, entry, true, &mut found, &mut visited, diagnostics)?;
    Ok(found)
}

fn collect(
    resolver: &ReferenceResolver<'_>,
    file: &Path,
    is_entry: bool,
    found: &mut ExportedClasses,
    visited: &mut HashSet<PathBuf>,
    diagnostics: &mut Diagnostics,
) -> ResolveResult<()> {
    let (ast, elements) = match resolver.elements(file) {
        Ok(parsed) => parsed,
        // The entry must parse; a broken wildcard target only loses its names
        Err(e) if !is_entry => {
            diagnostics.push(
                DiagnosticKind::SuppressedWildcardTarget,
                file,
                None,
                format!("wildcard target skipped: {e}"),
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if !visited.insert(ast.path.clone()) {
        return Ok(());
    }

    for name in elements.exported_classes.keys() {
        found.insert(
            name,
            ExportedClass {
                via: ast.path.clone(),
                declared_name: name.clone(),
                declared_in: ast.path.clone(),
            },
        );
    }

    for name in elements.exported_imported_elements.keys() {
        if found.is_taken(name) {
            continue;
        }
        let reference = SymbolReference::new(name.as_str(), &ast.path);
        match resolver.resolve(&reference, false, diagnostics) {
            Ok(class) => found.insert(
                name,
                ExportedClass {
                    via: ast.path.clone(),
                    declared_name: class.name().to_string(),
                    declared_in: class.file_name().to_path_buf(),
                },
            ),
            // Re-exported interfaces, aliases and enums land here too
            Err(ResolveError::SymbolNotFound { .. }) => {}
            Err(e) => {
                tracing::warn!(
                    "[exports] re-export '{name}' in {} failed: {e}",
                    ast.path.display()
                );
                found.failed.push((name.clone(), e));
            }
        }
    }

    for target in &elements.exported_imported_all {
        match target {
            ModuleTarget::File(path) => {
                collect(resolver, path, false, found, visited, diagnostics)?;
            }
            ModuleTarget::Package(package) => {
                diagnostics.push(
                    DiagnosticKind::PackageTarget,
                    &ast.path,
                    None,
                    format!("wildcard re-export of package '{package}' is not followed"),
                );
            }
        }
    }

    Ok(())
}
