#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tscomp::{Diagnostics, FileAstCache, HierarchyBuilder, LoadedSymbol, ResolveResult, SymbolReference};

/// A throwaway TypeScript package on disk
pub struct TestProject {
    pub dir: TempDir,
    pub cache: FileAstCache,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            cache: FileAstCache::new(),
        }
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }

    pub fn builder(&self) -> HierarchyBuilder<'_> {
        HierarchyBuilder::new(&self.cache)
    }

    pub fn resolve(
        &self,
        name: &str,
        file: &str,
        consider_interfaces: bool,
        diagnostics: &mut Diagnostics,
    ) -> ResolveResult<LoadedSymbol> {
        self.builder().resolver().resolve(
            &SymbolReference::new(name, self.file(file)),
            consider_interfaces,
            diagnostics,
        )
    }

    /// Resolve then build the linear chain, returning declared names
    pub fn chain(&self, name: &str, file: &str) -> ResolveResult<Vec<String>> {
        let mut diagnostics = Diagnostics::new();
        let builder = self.builder();
        let symbol = builder.resolver().resolve(
            &SymbolReference::new(name, self.file(file)),
            false,
            &mut diagnostics,
        )?;
        let chain = builder.build_chain(symbol, &mut diagnostics)?;
        Ok(chain.iter().map(|s| s.name().to_string()).collect())
    }
}
