use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - scan (and deletion, if requested) completed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (manifest error, graph inconsistency, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for asset cleanup.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("Asset '{id}' is in the candidate pool but has no record in the catalog\n\n💡 Hint: The asset manifest is inconsistent. Re-export it from your content tool and run the scan again")]
    MissingRecord { id: String },

    #[error("Deletion round removed zero assets while {} candidate(s) remain\n\n💡 Hint: The remaining assets could not be deleted (locked externally or the catalog is inconsistent). Inspect the residual list and retry", remaining.len())]
    NoProgress { remaining: Vec<String> },

    #[error("Asset manifest not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse asset manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest is valid TOML with [[asset]] entries")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Invalid content path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid content directory")]
    InvalidContentPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for newtypes and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
