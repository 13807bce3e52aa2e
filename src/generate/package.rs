//! `package.json` loading

use crate::error::{GenerateError, GenerateResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    types: Option<String>,
    typings: Option<String>,
}

/// The parts of `package.json` descriptor generation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub root: PathBuf,
    pub name: String,
    pub version: Option<String>,
    /// `types` or `typings` entry, relative to the root
    pub types: PathBuf,
}

impl PackageMetadata {
    pub fn load(package_dir: &Path) -> GenerateResult<Self> {
        let path = package_dir.join("package.json");
        let content = std::fs::read_to_string(&path).map_err(|e| GenerateError::PackageMetadata {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let package: PackageJson =
            serde_json::from_str(&content).map_err(|e| GenerateError::PackageMetadata {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let name = package
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| GenerateError::PackageMetadata {
                path: path.clone(),
                reason: "missing 'name' field".to_string(),
            })?;

        let types = package
            .types
            .or(package.typings)
            .unwrap_or_else(|| "index.d.ts".to_string());

        tracing::debug!("[package] loaded {name} from {}", path.display());

        Ok(Self {
            root: package_dir.to_path_buf(),
            name,
            version: package.version,
            types: PathBuf::from(types),
        })
    }

    /// Module paths to try as the export entry point, in order
    ///
    /// The typings entry names emitted declarations (`index.d.ts`); its
    /// extensionless stem lets the AST provider find the `.ts` source next to
    /// it. `<source_dir>/index` is the fallback for packages without typings
    /// at the root.
    pub fn entry_candidates(&self, source_dir: &Path) -> Vec<PathBuf> {
        let types = self.types.to_string_lossy();
        let stem = [".d.ts", ".ts", ".tsx", ".js"]
            .iter()
            .find_map(|ext| types.strip_suffix(ext))
            .unwrap_or(&types);

        let mut candidates = vec![self.root.join(stem)];
        let fallback = self.root.join(source_dir).join("index");
        if !candidates.contains(&fallback) {
            candidates.push(fallback);
        }
        candidates
    }

    /// Prefix for component identifiers
    pub fn id_prefix(&self) -> &str {
        &self.name
    }
}
