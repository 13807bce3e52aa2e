//! Source AST provider: tree-sitter lowering plus the per-file cache

pub mod ast;
pub mod cache;
pub mod typescript;

pub use ast::{Declaration, SourceFile, Statement, StatementKind};
pub use cache::{AstProvider, FileAstCache};
pub use typescript::TypeScriptParser;
