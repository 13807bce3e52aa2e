//! Descriptor generation for a whole package
//!
//! Enumerates the classes exported from the package entry point, resolves
//! each one's hierarchy, and writes one descriptor file per class. A class
//! that fails to resolve, whether while enumerating exports or while linking
//! its hierarchy, is reported and skipped; the others still run.

pub mod descriptor;
pub mod ignore;
pub mod package;

pub use descriptor::{ComponentDescriptor, ComponentType, GenericTypeParameter, component_id};
pub use ignore::IgnoreList;
pub use package::PackageMetadata;

use crate::config::Settings;
use crate::error::{GenerateError, GenerateResult, ParseError, ResolveError};
use crate::parsing::{AstProvider, cache::resolve_source_path};
use crate::resolution::{
    Diagnostic, Diagnostics, ExportedClasses, HierarchyBuilder, SymbolReference,
    exported_classes,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Outcome of one generation run
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub package: String,
    pub entry: PathBuf,
    /// (class name, descriptor file)
    pub written: Vec<(String, PathBuf)>,
    pub ignored: Vec<String>,
    pub failed: Vec<(String, GenerateError)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Generator<'a> {
    settings: &'a Settings,
    provider: &'a dyn AstProvider,
}

impl<'a> Generator<'a> {
    pub fn new(settings: &'a Settings, provider: &'a dyn AstProvider) -> Self {
        Self { settings, provider }
    }

    /// Generate descriptors for every exported class of the package
    pub fn run(&self) -> GenerateResult<GenerateReport> {
        let package_dir = &self.settings.package_dir;
        let metadata = PackageMetadata::load(package_dir)?;
        let ignore = IgnoreList::load(&self.settings.ignore_path())?;
        let entry = self.entry_module(&metadata)?;

        let builder = HierarchyBuilder::new(self.provider);
        let mut diagnostics = Diagnostics::new();
        let exports = exported_classes(builder.resolver(), &entry, &mut diagnostics)?;

        tracing::info!(
            "[generate] {} exports {} classes from {}",
            metadata.name,
            exports.len(),
            entry.display()
        );

        let (ignored, selected): (Vec<String>, Vec<String>) = exports
            .names()
            .map(str::to_string)
            .partition(|name| ignore.contains(name));

        let output_dir = self.settings.output_path();
        std::fs::create_dir_all(&output_dir).map_err(|source| GenerateError::OutputWrite {
            path: output_dir.clone(),
            source,
        })?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.generate.parallel_threads.max(1))
            .build()
            .map_err(|e| GenerateError::WorkerPool {
                reason: e.to_string(),
            })?;

        let outcomes: Vec<(String, GenerateResult<PathBuf>, Diagnostics)> = pool.install(|| {
            selected
                .par_iter()
                .map(|name| {
                    let mut class_diagnostics = Diagnostics::new();
                    let outcome = self.generate_class(
                        &builder,
                        &metadata,
                        &exports,
                        name,
                        &entry,
                        &output_dir,
                        &mut class_diagnostics,
                    );
                    (name.clone(), outcome, class_diagnostics)
                })
                .collect()
        });

        let mut report = GenerateReport {
            package: metadata.name.clone(),
            entry,
            ignored,
            diagnostics: diagnostics.into_entries(),
            ..Default::default()
        };

        for (name, error) in exports.into_failed() {
            if ignore.contains(&name) {
                report.ignored.push(name);
            } else {
                tracing::warn!("[generate] skipping export '{name}': {error}");
                report.failed.push((name, error.into()));
            }
        }

        for (name, outcome, class_diagnostics) in outcomes {
            report.diagnostics.extend(class_diagnostics.into_entries());
            match outcome {
                Ok(path) => report.written.push((name, path)),
                Err(e) => {
                    tracing::warn!("[generate] skipping class '{name}': {e}");
                    report.failed.push((name, e));
                }
            }
        }

        Ok(report)
    }

    /// Resolve, link and write one class
    fn generate_class(
        &self,
        builder: &HierarchyBuilder<'_>,
        metadata: &PackageMetadata,
        exports: &ExportedClasses,
        name: &str,
        entry: &Path,
        output_dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> GenerateResult<PathBuf> {
        let reference = SymbolReference::new(name, entry).with_package(metadata.name.as_str());
        let class = builder.resolver().resolve(&reference, false, diagnostics)?;
        let class = builder.load_chain(class, diagnostics)?;

        // Exports were enumerated as classes, so this only fails if the
        // source changed in between
        let descriptor =
            ComponentDescriptor::from_symbol(metadata.id_prefix(), name, &class, exports)
                .ok_or_else(|| ResolveError::symbol_not_found(name, entry))?;

        let path = output_dir.join(format!("{name}{}", self.settings.generate.extension));
        let json = serde_json::to_string_pretty(&descriptor)?;
        std::fs::write(&path, json).map_err(|source| GenerateError::OutputWrite {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("[generate] wrote {}", path.display());
        Ok(path)
    }

    fn entry_module(&self, metadata: &PackageMetadata) -> GenerateResult<PathBuf> {
        let candidates = metadata.entry_candidates(&self.settings.generate.source_dir);
        let tried = candidates.len();
        for candidate in &candidates {
            if let Ok(path) = resolve_source_path(candidate) {
                return Ok(path);
            }
        }

        let first = candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| metadata.root.join("index"));
        Err(ResolveError::from(ParseError::FileNotFound {
            path: first,
            tried,
        })
        .into())
    }
}
