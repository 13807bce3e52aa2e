//! TypeScript language parser implementation

pub mod parser;

pub use parser::TypeScriptParser;
