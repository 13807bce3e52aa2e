//! Cross-file symbol resolution and class hierarchies

pub mod diagnostics;
pub mod elements;
pub mod exports;
pub mod hierarchy;
pub mod resolver;
pub mod symbol;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use elements::{ClassElements, ClassIndex, ModuleTarget, extract};
pub use exports::{ExportedClass, ExportedClasses, exported_classes};
pub use hierarchy::HierarchyBuilder;
pub use resolver::ReferenceResolver;
pub use symbol::{
    ClassLoaded, EnumLoaded, GenericParameter, Generics, InterfaceLoaded, LoadedSymbol,
    SymbolReference, SymbolSummary, TypeAliasLoaded,
};
