//! Per-file AST cache
//!
//! Module specifiers reach this layer without an extension (`./base`), so the
//! provider probes the usual TypeScript candidates before parsing. Parsed
//! files are shared as `Arc<SourceFile>`; loaded symbols keep handles into
//! this cache instead of copying trees.

use crate::error::{ParseError, ParseResult};
use crate::parsing::ast::SourceFile;
use crate::parsing::typescript::TypeScriptParser;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of parsed files for the resolver
pub trait AstProvider: Send + Sync {
    /// Parse the file at `path`, probing TypeScript extensions when needed
    fn parse(&self, path: &Path) -> ParseResult<Arc<SourceFile>>;
}

type Slot = Arc<Mutex<Option<Arc<SourceFile>>>>;

/// Memoizing provider backed by the filesystem
///
/// Each resolved file owns a slot guarded by its own mutex, so two threads
/// asking for the same file parse it once while different files parse in
/// parallel. Failed parses are not cached.
#[derive(Default)]
pub struct FileAstCache {
    slots: DashMap<PathBuf, Slot>,
}

impl FileAstCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files parsed so far
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, path: &Path) -> Slot {
        self.slots
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}

impl AstProvider for FileAstCache {
    fn parse(&self, path: &Path) -> ParseResult<Arc<SourceFile>> {
        let resolved = resolve_source_path(path)?;

        // Clone the slot out first; holding a DashMap guard while parsing
        // would block unrelated files on the same shard.
        let slot = self.slot(&resolved);
        let mut guard = slot.lock();
        if let Some(file) = guard.as_ref() {
            return Ok(Arc::clone(file));
        }

        tracing::debug!("[ast] parsing {}", resolved.display());
        let code = std::fs::read_to_string(&resolved).map_err(|source| ParseError::FileRead {
            path: resolved.clone(),
            source,
        })?;
        let mut parser = TypeScriptParser::for_path(&resolved)?;
        let file = Arc::new(parser.parse(&resolved, &code)?);

        *guard = Some(Arc::clone(&file));
        Ok(file)
    }
}

/// Candidate files for a module path, in probing order
pub fn source_candidates(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];

    // ESM-style specifiers name the emitted `.js` file
    if path.extension().is_some_and(|ext| ext == "js") {
        let stem = path.with_extension("");
        for ext in [".ts", ".d.ts", ".tsx"] {
            candidates.push(with_suffix(&stem, ext));
        }
    }

    for ext in [".ts", ".tsx", ".d.ts"] {
        candidates.push(with_suffix(path, ext));
    }

    for index in ["index.ts", "index.tsx", "index.d.ts"] {
        candidates.push(path.join(index));
    }

    candidates
}

/// Find the first existing source file for a module path
pub fn resolve_source_path(path: &Path) -> ParseResult<PathBuf> {
    let candidates = source_candidates(path);
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| ParseError::FileNotFound {
            path: path.to_path_buf(),
            tried: candidates.len(),
        })
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
