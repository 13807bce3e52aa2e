//! CLI process plumbing.

pub mod exit_code;

pub use exit_code::ExitCode;
