//! Error types for the resolution engine
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages. Every resolution error
//! names the symbol and file involved, and a source position where one exists.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the source AST provider
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to initialize TypeScript parser: {reason}")]
    ParserInit { reason: String },

    #[error("Failed to read source file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No TypeScript source found for '{path}' (tried {tried} candidates)")]
    FileNotFound { path: PathBuf, tried: usize },

    #[error("Failed to parse '{path}' at line {line}, column {column}: {reason}")]
    SyntaxError {
        path: PathBuf,
        line: u32,
        column: u32,
        reason: String,
    },
}

/// Errors raised while extracting, resolving, or chaining declarations
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Malformed export in '{path}' at line {line}, column {column}: {reason}")]
    MalformedExport {
        path: PathBuf,
        line: u32,
        column: u32,
        reason: String,
    },

    #[error("Could not load class or interface '{name}' from '{path}'")]
    SymbolNotFound { name: String, path: PathBuf },

    #[error(
        "Unsupported heritage '{expression}' on '{name}' in '{path}' at line {line}, column {column}: {reason}"
    )]
    UnsupportedHeritage {
        name: String,
        expression: String,
        path: PathBuf,
        line: u32,
        column: u32,
        reason: String,
    },

    #[error("Cyclic hierarchy detected at '{name}' in '{path}': {}", chain.join(" -> "))]
    CyclicHierarchy {
        name: String,
        path: PathBuf,
        chain: Vec<String>,
    },
}

impl ResolveError {
    pub fn symbol_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::SymbolNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::Parse(ParseError::ParserInit { .. }) => "PARSER_INIT_ERROR",
            Self::Parse(ParseError::FileRead { .. }) => "FILE_READ_ERROR",
            Self::Parse(ParseError::FileNotFound { .. }) => "FILE_NOT_FOUND",
            Self::Parse(ParseError::SyntaxError { .. }) => "PARSE_ERROR",
            Self::MalformedExport { .. } => "MALFORMED_EXPORT",
            Self::SymbolNotFound { .. } => "SYMBOL_NOT_FOUND",
            Self::UnsupportedHeritage { .. } => "UNSUPPORTED_HERITAGE",
            Self::CyclicHierarchy { .. } => "CYCLIC_HIERARCHY",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Parse(ParseError::SyntaxError { .. }) => vec![
                "Fix the syntax error reported above; the engine never guesses around broken source",
            ],
            Self::Parse(ParseError::FileNotFound { .. }) => vec![
                "Check the module specifier; relative imports resolve from the importing file's directory",
                "Build the package first if only .d.ts files are expected",
            ],
            Self::MalformedExport { .. } => {
                vec!["Give the exported class a name, e.g. 'export default class MyClass'"]
            }
            Self::SymbolNotFound { .. } => vec![
                "Check that the symbol is exported or imported under this exact name",
                "Re-exports without a source module ('export { A }') are not followed",
            ],
            Self::UnsupportedHeritage { .. } => vec![
                "Import the parent directly and extend it by name instead of 'ns.Parent' or an expression",
                "Interfaces may only extend other interfaces here",
            ],
            Self::CyclicHierarchy { .. } => {
                vec!["Break the inheritance cycle between the listed declarations"]
            }
            _ => vec![],
        }
    }
}

/// Errors raised by the descriptor generator around the core
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Invalid package metadata in '{path}': {reason}")]
    PackageMetadata { path: PathBuf, reason: String },

    #[error("Invalid ignore file '{path}': {reason}")]
    IgnoreFile { path: PathBuf, reason: String },

    #[error("Failed to write descriptor '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to start generation workers: {reason}")]
    WorkerPool { reason: String },

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GenerateError {
    pub fn status_code(&self) -> String {
        match self {
            Self::Resolve(e) => return e.status_code(),
            Self::PackageMetadata { .. } => "PACKAGE_METADATA_ERROR",
            Self::IgnoreFile { .. } => "IGNORE_FILE_ERROR",
            Self::OutputWrite { .. } => "FILE_WRITE_ERROR",
            Self::WorkerPool { .. } => "WORKER_POOL_ERROR",
            Self::Serialize(_) => "SERIALIZE_ERROR",
        }
        .to_string()
    }

    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Resolve(e) => e.recovery_suggestions(),
            Self::PackageMetadata { .. } => vec![
                "Make sure package.json exists in the package directory and has a 'name' field",
            ],
            Self::IgnoreFile { .. } => {
                vec!["The ignore file must be a JSON array of class names"]
            }
            Self::OutputWrite { .. } => vec!["Check permissions and disk space for the output directory"],
            Self::WorkerPool { .. } => vec!["Lower generate.parallel_threads in the configuration"],
            Self::Serialize(_) => vec![],
        }
    }
}

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type alias for generation
pub type GenerateResult<T> = Result<T, GenerateError>;
