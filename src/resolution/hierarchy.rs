//! Superclass and super-interface chains
//!
//! Each heritage entry is resolved relative to the file declaring it and
//! linked recursively. Cycles are detected on the current ancestry path only,
//! so two interfaces sharing a base (a diamond) are not a cycle.

use crate::error::{ResolveError, ResolveResult};
use crate::parsing::AstProvider;
use crate::parsing::ast::{HeritageForm, HeritageRef};
use crate::resolution::diagnostics::Diagnostics;
use crate::resolution::resolver::ReferenceResolver;
use crate::resolution::symbol::{LoadedSymbol, SymbolReference};
use std::path::{Path, PathBuf};

pub struct HierarchyBuilder<'p> {
    resolver: ReferenceResolver<'p>,
}

impl<'p> HierarchyBuilder<'p> {
    pub fn new(provider: &'p dyn AstProvider) -> Self {
        Self {
            resolver: ReferenceResolver::new(provider),
        }
    }

    pub fn resolver(&self) -> &ReferenceResolver<'p> {
        &self.resolver
    }

    /// Populate `super_class`, `implements_interfaces` and `super_interfaces`
    /// on `symbol` and on everything it reaches
    pub fn load_chain(
        &self,
        symbol: LoadedSymbol,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let mut ancestry = Vec::new();
        self.link(symbol, &mut ancestry, diagnostics)
    }

    /// The linear chain starting at `symbol`, most derived first
    ///
    /// Follows the single parent link of each entry. An interface with more
    /// than one parent ends the sequence; its parallel chains stay reachable
    /// through `super_interfaces`.
    pub fn build_chain(
        &self,
        symbol: LoadedSymbol,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<Vec<LoadedSymbol>> {
        let root = self.load_chain(symbol, diagnostics)?;
        Ok(linearize(root))
    }

    fn link(
        &self,
        symbol: LoadedSymbol,
        ancestry: &mut Vec<(PathBuf, String)>,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let key = (symbol.file_name().to_path_buf(), symbol.name().to_string());
        if ancestry.contains(&key) {
            let mut chain: Vec<String> = ancestry.iter().map(|(_, name)| name.clone()).collect();
            chain.push(key.1.clone());
            return Err(ResolveError::CyclicHierarchy {
                name: key.1,
                path: key.0,
                chain,
            });
        }

        ancestry.push(key);
        let linked = self.link_parents(symbol, ancestry, diagnostics);
        ancestry.pop();
        linked
    }

    fn link_parents(
        &self,
        symbol: LoadedSymbol,
        ancestry: &mut Vec<(PathBuf, String)>,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        match symbol {
            LoadedSymbol::Class(mut class) => {
                let declaration = class.declaration.clone();
                let reference = class.reference.clone();

                if let Some(heritage) = &declaration.extends {
                    let parent = self.resolve_heritage(&reference, heritage, false, diagnostics)?;
                    if let LoadedSymbol::Class(parent) = self.link(parent, ancestry, diagnostics)? {
                        class.super_class = Some(Box::new(parent));
                    }
                }

                for heritage in &declaration.implements {
                    let parent = self.resolve_heritage(&reference, heritage, true, diagnostics)?;
                    let parent = self.link(parent, ancestry, diagnostics)?;
                    class.implements_interfaces.push(parent);
                }

                tracing::debug!(
                    "[hierarchy] linked class '{}' (super: {}, implements: {})",
                    class.reference.local_name,
                    class
                        .super_class
                        .as_ref()
                        .map_or("-", |p| p.reference.local_name.as_str()),
                    class.implements_interfaces.len()
                );
                Ok(LoadedSymbol::Class(class))
            }
            LoadedSymbol::Interface(mut interface) => {
                let declaration = interface.declaration.clone();
                let reference = interface.reference.clone();

                for heritage in &declaration.extends {
                    let parent = self.resolve_heritage(&reference, heritage, true, diagnostics)?;
                    match self.link(parent, ancestry, diagnostics)? {
                        LoadedSymbol::Interface(parent) => interface.super_interfaces.push(parent),
                        other => {
                            return Err(unsupported(
                                &reference.local_name,
                                heritage,
                                &reference.file_name,
                                format!("interface cannot extend {} '{}'", other.kind(), other.name()),
                            ));
                        }
                    }
                }
                Ok(LoadedSymbol::Interface(interface))
            }
            other => Ok(other),
        }
    }

    fn resolve_heritage(
        &self,
        child: &SymbolReference,
        heritage: &HeritageRef,
        consider_interfaces: bool,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        let name = match &heritage.form {
            HeritageForm::Identifier(name) => name,
            HeritageForm::Unsupported { node_kind } => {
                return Err(unsupported(
                    &child.local_name,
                    heritage,
                    &child.file_name,
                    format!("only identifiers are supported, found {node_kind}"),
                ));
            }
        };

        let mut reference = SymbolReference::new(name.as_str(), &child.file_name);
        reference.package_name = child.package_name.clone();
        self.resolver
            .resolve(&reference, consider_interfaces, diagnostics)
    }
}

fn unsupported(name: &str, heritage: &HeritageRef, path: &Path, reason: String) -> ResolveError {
    ResolveError::UnsupportedHeritage {
        name: name.to_string(),
        expression: heritage.text.clone(),
        path: path.to_path_buf(),
        line: heritage.range.line(),
        column: heritage.range.column(),
        reason,
    }
}

fn linearize(root: LoadedSymbol) -> Vec<LoadedSymbol> {
    let mut chain = Vec::new();
    let mut current = Some(root);

    while let Some(symbol) = current {
        current = match &symbol {
            LoadedSymbol::Class(class) => class
                .super_class
                .as_deref()
                .map(|parent| LoadedSymbol::Class(parent.clone())),
            LoadedSymbol::Interface(interface) if interface.super_interfaces.len() == 1 => {
                Some(LoadedSymbol::Interface(interface.super_interfaces[0].clone()))
            }
            _ => None,
        };
        chain.push(symbol);
    }

    chain
}
