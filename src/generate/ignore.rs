//! Class names excluded from generation

use crate::error::{GenerateError, GenerateResult};
use std::collections::HashSet;
use std::path::Path;

/// Names read from a JSON array, e.g. `["InternalHelper", "Deprecated"]`
#[derive(Debug, Default, Clone)]
pub struct IgnoreList {
    names: HashSet<String>,
}

impl IgnoreList {
    /// A missing file means nothing is ignored
    pub fn load(path: &Path) -> GenerateResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[ignore] no ignore file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(GenerateError::IgnoreFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let names: Vec<String> =
            serde_json::from_str(&content).map_err(|e| GenerateError::IgnoreFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(names.into_iter().collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
