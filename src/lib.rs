/// The main library module for tscomp
pub mod config;
pub mod display;
pub mod error;
pub mod generate;
pub mod io;
pub mod logging;
pub mod parsing;
pub mod resolution;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{
    GenerateError, GenerateResult, ParseError, ParseResult, ResolveError, ResolveResult,
};
pub use generate::{ComponentDescriptor, GenerateReport, Generator};
pub use parsing::{AstProvider, FileAstCache, TypeScriptParser};
pub use resolution::{
    Diagnostics, HierarchyBuilder, LoadedSymbol, ReferenceResolver, SymbolReference,
};
pub use types::{Range, SymbolKind};
