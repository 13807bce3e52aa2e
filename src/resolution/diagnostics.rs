//! Structured diagnostics collected during one resolution request
//!
//! Failures the resolver deliberately swallows (a wildcard target that does
//! not provide the symbol, an export form it will not follow) are recorded
//! here so callers can surface them without relying on log output.

use crate::Range;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A wildcard re-export target failed and the next one was tried
    SuppressedWildcardTarget,
    /// A reference pointed at a bare package specifier
    PackageTarget,
    /// A (file, name) hop was reached twice within one resolution
    RevisitedReference,
    /// An export form that is recorded but never followed
    UnfollowedExport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(
                f,
                "{}:{}:{}: {}",
                self.path.display(),
                range.line(),
                range.column(),
                self.message
            ),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

/// Diagnostic sink threaded through resolver calls
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        path: &Path,
        range: Option<Range>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            path: path.to_path_buf(),
            range,
            message: message.into(),
        };
        tracing::debug!("[resolve] {diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
