//! Exit codes for CLI operations.
//!
//! - `0`: success
//! - `1`: unspecified failure
//! - `3-125`: specific errors scripts can branch on

use crate::error::{GenerateError, ParseError, ResolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    GeneralError = 1,

    /// Symbol or file not found (code 3)
    NotFound = 3,

    /// Source could not be parsed (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration, package metadata or ignore file error (code 6)
    ConfigError = 6,

    /// Heritage form the engine will not interpret (code 8)
    UnsupportedOperation = 8,

    /// Some classes failed while others were generated (code 9)
    PartialFailure = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    pub fn from_resolve_error(error: &ResolveError) -> Self {
        match error {
            ResolveError::SymbolNotFound { .. }
            | ResolveError::Parse(ParseError::FileNotFound { .. }) => ExitCode::NotFound,
            ResolveError::Parse(ParseError::SyntaxError { .. })
            | ResolveError::MalformedExport { .. } => ExitCode::ParseError,
            ResolveError::Parse(ParseError::FileRead { .. }) => ExitCode::IoError,
            ResolveError::UnsupportedHeritage { .. } => ExitCode::UnsupportedOperation,
            _ => ExitCode::GeneralError,
        }
    }

    pub fn from_generate_error(error: &GenerateError) -> Self {
        match error {
            GenerateError::Resolve(e) => Self::from_resolve_error(e),
            GenerateError::PackageMetadata { .. } | GenerateError::IgnoreFile { .. } => {
                ExitCode::ConfigError
            }
            GenerateError::OutputWrite { .. } => ExitCode::IoError,
            _ => ExitCode::GeneralError,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::NotFound => "Not found",
            ExitCode::ParseError => "Parse error",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::UnsupportedOperation => "Unsupported operation",
            ExitCode::PartialFailure => "Some classes failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::NotFound as u8, 3);
        assert_eq!(i32::from(ExitCode::PartialFailure), 9);
        assert!(ExitCode::Success.is_success());
    }

    #[test]
    fn test_error_mapping() {
        let not_found = ResolveError::symbol_not_found("A", "a.ts");
        assert_eq!(ExitCode::from_resolve_error(&not_found), ExitCode::NotFound);

        let heritage = ResolveError::UnsupportedHeritage {
            name: "A".to_string(),
            expression: "ns.B".to_string(),
            path: PathBuf::from("a.ts"),
            line: 1,
            column: 17,
            reason: "only identifiers are supported".to_string(),
        };
        assert_eq!(
            ExitCode::from_resolve_error(&heritage),
            ExitCode::UnsupportedOperation
        );

        let metadata = GenerateError::PackageMetadata {
            path: PathBuf::from("package.json"),
            reason: "missing 'name' field".to_string(),
        };
        assert_eq!(
            ExitCode::from_generate_error(&metadata),
            ExitCode::ConfigError
        );
    }
}
